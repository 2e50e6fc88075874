// ABOUTME: Core value types for biometric calculations: metrics, gender, activity level, inputs
// ABOUTME: Every value is created per request and compared by value only
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrimetric Contributors

//! Value types shared by every stage of the engine.

use crate::errors::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Biological sex used by sex-specific formulas and classification bands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    /// Male
    Male,
    /// Female
    Female,
}

impl Gender {
    /// Accepted option names
    pub const OPTIONS: &'static [&'static str] = &["male", "female"];

    /// Canonical name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Self::Male),
            "female" | "f" => Ok(Self::Female),
            other => Err(format!(
                "Unknown gender: '{other}'. Valid options: male, female"
            )),
        }
    }
}

/// Activity level for TDEE calculation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Sedentary (little/no exercise)
    Sedentary,
    /// Lightly active (1-3 days/week)
    LightlyActive,
    /// Moderately active (3-5 days/week)
    ModeratelyActive,
    /// Very active (6-7 days/week)
    VeryActive,
    /// Extra active (hard training 2x/day or physical job)
    ExtraActive,
}

impl ActivityLevel {
    /// Every level, least to most active
    pub const ALL: [Self; 5] = [
        Self::Sedentary,
        Self::LightlyActive,
        Self::ModeratelyActive,
        Self::VeryActive,
        Self::ExtraActive,
    ];

    /// Accepted option names
    pub const OPTIONS: &'static [&'static str] = &[
        "sedentary",
        "lightly_active",
        "moderately_active",
        "very_active",
        "extra_active",
    ];

    /// Canonical name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sedentary => "sedentary",
            Self::LightlyActive => "lightly_active",
            Self::ModeratelyActive => "moderately_active",
            Self::VeryActive => "very_active",
            Self::ExtraActive => "extra_active",
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ActivityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_identifier(s).as_str() {
            "sedentary" => Ok(Self::Sedentary),
            "lightly_active" | "light" => Ok(Self::LightlyActive),
            "moderately_active" | "moderate" => Ok(Self::ModeratelyActive),
            "very_active" | "active" => Ok(Self::VeryActive),
            "extra_active" | "extremely_active" => Ok(Self::ExtraActive),
            other => Err(format!(
                "Unknown activity level: '{other}'. Valid options: {}",
                Self::OPTIONS.join(", ")
            )),
        }
    }
}

/// Lowercase, trim, and fold `-` and spaces into `_`
pub(crate) fn normalize_identifier(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '-' || c == ' ' { '_' } else { c })
        .collect()
}

/// Metrics the engine can calculate
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Body Mass Index
    Bmi,
    /// Basal Metabolic Rate
    Bmr,
    /// Total Daily Energy Expenditure
    Tdee,
    /// Macronutrient split of a calorie budget
    Macros,
    /// Ideal body weight
    IdealWeight,
    /// Body fat percentage
    BodyFat,
    /// Daily water intake
    WaterIntake,
    /// Daily protein needs
    ProteinNeeds,
    /// Calorie deficit/surplus plan
    CalorieDeficitSurplus,
    /// Waist-to-hip ratio
    Whr,
    /// Waist-to-height ratio
    Whtr,
    /// Lean body mass
    LeanBodyMass,
    /// Fat-free mass index
    Ffmi,
    /// Metabolic age
    MetabolicAge,
    /// Body surface area
    Bsa,
}

impl Metric {
    /// Every metric
    pub const ALL: [Self; 15] = [
        Self::Bmi,
        Self::Bmr,
        Self::Tdee,
        Self::Macros,
        Self::IdealWeight,
        Self::BodyFat,
        Self::WaterIntake,
        Self::ProteinNeeds,
        Self::CalorieDeficitSurplus,
        Self::Whr,
        Self::Whtr,
        Self::LeanBodyMass,
        Self::Ffmi,
        Self::MetabolicAge,
        Self::Bsa,
    ];

    /// Canonical name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Bmi => "bmi",
            Self::Bmr => "bmr",
            Self::Tdee => "tdee",
            Self::Macros => "macros",
            Self::IdealWeight => "ideal_weight",
            Self::BodyFat => "body_fat",
            Self::WaterIntake => "water_intake",
            Self::ProteinNeeds => "protein_needs",
            Self::CalorieDeficitSurplus => "calorie_deficit_surplus",
            Self::Whr => "whr",
            Self::Whtr => "whtr",
            Self::LeanBodyMass => "lean_body_mass",
            Self::Ffmi => "ffmi",
            Self::MetabolicAge => "metabolic_age",
            Self::Bsa => "bsa",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize_identifier(s);
        Self::ALL
            .into_iter()
            .find(|metric| metric.name() == normalized)
            .ok_or_else(|| format!("Unknown metric: '{normalized}'"))
    }
}

/// Percentage targets for protein, carbohydrate and fat (whole percents)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MacroSplit {
    /// Protein percentage (0-100)
    pub protein_percent: u32,
    /// Carbohydrate percentage (0-100)
    pub carb_percent: u32,
    /// Fat percentage (0-100)
    pub fat_percent: u32,
}

impl MacroSplit {
    /// Create a split; validity is checked by [`MacroSplit::is_complete`]
    #[must_use]
    pub const fn new(protein_percent: u32, carb_percent: u32, fat_percent: u32) -> Self {
        Self {
            protein_percent,
            carb_percent,
            fat_percent,
        }
    }

    /// Sum of the three percentages
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.protein_percent
            .saturating_add(self.carb_percent)
            .saturating_add(self.fat_percent)
    }

    /// Whether the percentages add up to exactly 100
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.total() == 100
    }
}

/// Normalized, range-checked inputs for one calculation
///
/// Produced by the validator. Only the fields the metric declared are
/// populated; everything else stays `None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BiometricInput {
    /// Body weight in kilograms (0-500]
    pub weight_kg: Option<f64>,
    /// Height in centimeters (0-300]
    pub height_cm: Option<f64>,
    /// Age in whole years (1-120)
    pub age_years: Option<u32>,
    /// Biological sex
    pub gender: Option<Gender>,
    /// Habitual activity level
    pub activity_level: Option<ActivityLevel>,
    /// Neck circumference in centimeters
    pub neck_cm: Option<f64>,
    /// Waist circumference in centimeters
    pub waist_cm: Option<f64>,
    /// Hip circumference in centimeters
    pub hip_cm: Option<f64>,
    /// Measured body fat percentage (0-70)
    pub body_fat_percent: Option<f64>,
    /// Macro percentage targets
    pub macro_split: Option<MacroSplit>,
    /// Explicit calorie budget overriding the TDEE baseline
    pub total_calories: Option<f64>,
    /// Requested daily change in kcal (negative = deficit)
    pub daily_calorie_delta: Option<f64>,
    /// Goal weight in kilograms for duration projections
    pub target_weight_kg: Option<f64>,
}

impl BiometricInput {
    /// Input with the four core anthropometrics set
    #[must_use]
    pub fn adult(weight_kg: f64, height_cm: f64, age_years: u32, gender: Gender) -> Self {
        Self {
            weight_kg: Some(weight_kg),
            height_cm: Some(height_cm),
            age_years: Some(age_years),
            gender: Some(gender),
            ..Self::default()
        }
    }

    /// Set the activity level
    #[must_use]
    pub const fn with_activity(mut self, level: ActivityLevel) -> Self {
        self.activity_level = Some(level);
        self
    }

    /// Set neck, waist and hip circumferences
    #[must_use]
    pub const fn with_circumferences(
        mut self,
        neck_cm: Option<f64>,
        waist_cm: Option<f64>,
        hip_cm: Option<f64>,
    ) -> Self {
        self.neck_cm = neck_cm;
        self.waist_cm = waist_cm;
        self.hip_cm = hip_cm;
        self
    }

    /// Set measured body fat percentage
    #[must_use]
    pub const fn with_body_fat(mut self, percent: f64) -> Self {
        self.body_fat_percent = Some(percent);
        self
    }

    /// Set macro percentage targets
    #[must_use]
    pub const fn with_macro_split(mut self, split: MacroSplit) -> Self {
        self.macro_split = Some(split);
        self
    }

    /// Set the explicit calorie budget
    #[must_use]
    pub const fn with_total_calories(mut self, kcal: f64) -> Self {
        self.total_calories = Some(kcal);
        self
    }

    /// Set the daily calorie delta and optional goal weight
    #[must_use]
    pub const fn with_calorie_delta(mut self, delta_kcal: f64, target_weight_kg: Option<f64>) -> Self {
        self.daily_calorie_delta = Some(delta_kcal);
        self.target_weight_kg = target_weight_kg;
        self
    }

    /// Weight, or `MissingInput` attributed to `metric`
    ///
    /// # Errors
    ///
    /// Returns `EngineError::MissingInput` when the field is absent
    pub fn require_weight(&self, metric: Metric) -> EngineResult<f64> {
        self.weight_kg
            .ok_or_else(|| EngineError::missing(metric, "weight_kg"))
    }

    /// Height in centimeters, or `MissingInput`
    ///
    /// # Errors
    ///
    /// Returns `EngineError::MissingInput` when the field is absent
    pub fn require_height(&self, metric: Metric) -> EngineResult<f64> {
        self.height_cm
            .ok_or_else(|| EngineError::missing(metric, "height_cm"))
    }

    /// Age in years, or `MissingInput`
    ///
    /// # Errors
    ///
    /// Returns `EngineError::MissingInput` when the field is absent
    pub fn require_age(&self, metric: Metric) -> EngineResult<u32> {
        self.age_years
            .ok_or_else(|| EngineError::missing(metric, "age_years"))
    }

    /// Gender, or `MissingInput`
    ///
    /// # Errors
    ///
    /// Returns `EngineError::MissingInput` when the field is absent
    pub fn require_gender(&self, metric: Metric) -> EngineResult<Gender> {
        self.gender
            .ok_or_else(|| EngineError::missing(metric, "gender"))
    }

    /// Activity level, or `MissingInput`
    ///
    /// # Errors
    ///
    /// Returns `EngineError::MissingInput` when the field is absent
    pub fn require_activity(&self, metric: Metric) -> EngineResult<ActivityLevel> {
        self.activity_level
            .ok_or_else(|| EngineError::missing(metric, "activity_level"))
    }

    /// Body fat percentage, or `MissingInput`
    ///
    /// # Errors
    ///
    /// Returns `EngineError::MissingInput` when the field is absent
    pub fn require_body_fat(&self, metric: Metric) -> EngineResult<f64> {
        self.body_fat_percent
            .ok_or_else(|| EngineError::missing(metric, "body_fat_percent"))
    }

    /// Circumference by field name, or `MissingInput`
    ///
    /// # Errors
    ///
    /// Returns `EngineError::MissingInput` when the field is absent
    pub fn require_circumference(&self, metric: Metric, field: &'static str) -> EngineResult<f64> {
        let value = match field {
            "neck_cm" => self.neck_cm,
            "waist_cm" => self.waist_cm,
            "hip_cm" => self.hip_cm,
            _ => None,
        };
        value.ok_or_else(|| EngineError::missing(metric, field))
    }

    /// Height in meters, or `MissingInput`
    ///
    /// # Errors
    ///
    /// Returns `EngineError::MissingInput` when the field is absent
    pub fn require_height_m(&self, metric: Metric) -> EngineResult<f64> {
        Ok(self.require_height(metric)? / 100.0)
    }
}
