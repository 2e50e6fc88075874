// ABOUTME: Nutrition configuration for energy expenditure, macros, hydration and protein targets
// ABOUTME: Activity multipliers, calorie safety floors, default macro split and reference bodies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrimetric Contributors

//! Nutrition Configuration
//!
//! Practice-tunable tables consumed by the composer. Formula coefficients are
//! not configurable; they live in [`crate::constants`].
//!
//! # Scientific References
//!
//! - Activity factors: `McArdle` et al. (2010) - Exercise Physiology
//! - Protein: Phillips & Van Loon (2011) DOI: 10.1080/02640414.2011.619204
//! - Water: EFSA Panel on Dietetic Products (2010) DOI: 10.2903/j.efsa.2010.1459

use super::error::ConfigError;
use crate::models::{ActivityLevel, Gender, MacroSplit};
use serde::{Deserialize, Serialize};

/// Activity factor multipliers for TDEE calculation
///
/// Reference: `McArdle`, W.D., Katch, F.I., & Katch, V.L. (2010). Exercise Physiology
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityFactorsConfig {
    /// Sedentary (little/no exercise): 1.2
    pub sedentary: f64,
    /// Lightly active (1-3 days/week): 1.375
    pub lightly_active: f64,
    /// Moderately active (3-5 days/week): 1.55
    pub moderately_active: f64,
    /// Very active (6-7 days/week): 1.725
    pub very_active: f64,
    /// Extra active (hard training 2x/day): 1.9
    pub extra_active: f64,
}

impl ActivityFactorsConfig {
    /// Multiplier for an activity level
    #[must_use]
    pub const fn factor(&self, level: ActivityLevel) -> f64 {
        match level {
            ActivityLevel::Sedentary => self.sedentary,
            ActivityLevel::LightlyActive => self.lightly_active,
            ActivityLevel::ModeratelyActive => self.moderately_active,
            ActivityLevel::VeryActive => self.very_active,
            ActivityLevel::ExtraActive => self.extra_active,
        }
    }

    /// Validate that factors are within 1.0-2.5 and strictly ascending
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a factor is out of range or out of order
    pub fn validate(&self) -> Result<(), ConfigError> {
        let in_range = ActivityLevel::ALL
            .iter()
            .all(|level| (1.0..=2.5).contains(&self.factor(*level)));
        if !in_range {
            return Err(ConfigError::ValueOutOfRange(
                "Activity factors must be between 1.0 and 2.5",
            ));
        }
        let ascending = ActivityLevel::ALL
            .windows(2)
            .all(|pair| self.factor(pair[0]) < self.factor(pair[1]));
        if !ascending {
            return Err(ConfigError::InvalidRange(
                "Activity factors must be in ascending order",
            ));
        }
        Ok(())
    }
}

impl Default for ActivityFactorsConfig {
    fn default() -> Self {
        Self {
            sedentary: 1.2,
            lightly_active: 1.375,
            moderately_active: 1.55,
            very_active: 1.725,
            extra_active: 1.9,
        }
    }
}

/// Minimum daily calorie intake below which a plan is flagged unsafe
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SafetyFloorConfig {
    /// Female floor (kcal/day): 1200
    pub female_kcal: f64,
    /// Male floor (kcal/day): 1500
    pub male_kcal: f64,
}

impl SafetyFloorConfig {
    /// Floor for a gender
    #[must_use]
    pub const fn floor(&self, gender: Gender) -> f64 {
        match gender {
            Gender::Male => self.male_kcal,
            Gender::Female => self.female_kcal,
        }
    }
}

impl Default for SafetyFloorConfig {
    fn default() -> Self {
        Self {
            female_kcal: 1200.0,
            male_kcal: 1500.0,
        }
    }
}

/// Hydration allowance: base per kg plus an activity-level addition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HydrationConfig {
    /// Base water need (ml per kg body weight): 35
    pub ml_per_kg: f64,
    /// Extra ml/day per activity level, least to most active
    pub activity_extra_ml: [f64; 5],
    /// Glass size used for the glasses count (ml): 250
    pub glass_ml: f64,
}

impl HydrationConfig {
    /// Extra ml/day for an activity level
    #[must_use]
    pub const fn activity_extra(&self, level: ActivityLevel) -> f64 {
        self.activity_extra_ml[level as usize]
    }
}

impl Default for HydrationConfig {
    fn default() -> Self {
        Self {
            ml_per_kg: 35.0,
            activity_extra_ml: [0.0, 350.0, 500.0, 750.0, 1000.0],
            glass_ml: 250.0,
        }
    }
}

/// Protein recommendation range (g/kg) per activity level
///
/// Reference: Phillips & Van Loon (2011) DOI: 10.1080/02640414.2011.619204
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProteinConfig {
    /// (min, max) g/kg per activity level, least to most active
    pub g_per_kg: [(f64, f64); 5],
}

impl ProteinConfig {
    /// (min, max) g/kg for an activity level
    #[must_use]
    pub const fn range(&self, level: ActivityLevel) -> (f64, f64) {
        self.g_per_kg[level as usize]
    }
}

impl Default for ProteinConfig {
    fn default() -> Self {
        Self {
            g_per_kg: [(0.8, 1.0), (1.0, 1.2), (1.2, 1.6), (1.6, 2.0), (1.8, 2.2)],
        }
    }
}

/// Reference body used to build the age/BMR curve for metabolic age
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReferenceBody {
    /// Weight (kg)
    pub weight_kg: f64,
    /// Height (cm)
    pub height_cm: f64,
}

/// Metabolic age reference curve configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetabolicAgeConfig {
    /// Male reference body: 70 kg, 175 cm
    pub male_reference: ReferenceBody,
    /// Female reference body: 60 kg, 162 cm
    pub female_reference: ReferenceBody,
    /// Youngest age in the curve
    pub min_age: u32,
    /// Oldest age in the curve
    pub max_age: u32,
}

impl MetabolicAgeConfig {
    /// Reference body for a gender
    #[must_use]
    pub const fn reference(&self, gender: Gender) -> &ReferenceBody {
        match gender {
            Gender::Male => &self.male_reference,
            Gender::Female => &self.female_reference,
        }
    }
}

impl Default for MetabolicAgeConfig {
    fn default() -> Self {
        Self {
            male_reference: ReferenceBody {
                weight_kg: 70.0,
                height_cm: 175.0,
            },
            female_reference: ReferenceBody {
                weight_kg: 60.0,
                height_cm: 162.0,
            },
            min_age: 18,
            max_age: 80,
        }
    }
}

/// Nutrition configuration consumed by the composer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NutritionConfig {
    /// Activity factor multipliers for TDEE
    pub activity_factors: ActivityFactorsConfig,
    /// Calorie safety floors
    pub safety_floor: SafetyFloorConfig,
    /// Macro split used when the caller supplies none (25/45/30)
    pub default_macro_split: MacroSplit,
    /// Water intake allowances
    pub hydration: HydrationConfig,
    /// Protein recommendation ranges
    pub protein: ProteinConfig,
    /// Metabolic age reference curve
    pub metabolic_age: MetabolicAgeConfig,
}

impl Default for NutritionConfig {
    fn default() -> Self {
        Self {
            activity_factors: ActivityFactorsConfig::default(),
            safety_floor: SafetyFloorConfig::default(),
            // Balanced distribution for general eating
            default_macro_split: MacroSplit::new(25, 45, 30),
            hydration: HydrationConfig::default(),
            protein: ProteinConfig::default(),
            metabolic_age: MetabolicAgeConfig::default(),
        }
    }
}

impl NutritionConfig {
    /// Validate every nutrition table
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` describing the first invalid setting
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.activity_factors.validate()?;

        if !is_positive(self.safety_floor.female_kcal) || !is_positive(self.safety_floor.male_kcal) {
            return Err(ConfigError::ValueOutOfRange(
                "Calorie safety floors must be positive",
            ));
        }

        if !self.default_macro_split.is_complete() {
            return Err(ConfigError::InvalidWeights(format!(
                "default macro percentages must sum to 100, got {}",
                self.default_macro_split.total()
            )));
        }

        if !is_positive(self.hydration.ml_per_kg) || !is_positive(self.hydration.glass_ml) {
            return Err(ConfigError::ValueOutOfRange(
                "Hydration allowances must be positive",
            ));
        }
        let additions_valid = self
            .hydration
            .activity_extra_ml
            .iter()
            .all(|ml| ml.is_finite() && *ml >= 0.0);
        if !additions_valid {
            return Err(ConfigError::ValueOutOfRange(
                "Activity water additions cannot be negative",
            ));
        }

        let protein_valid = self
            .protein
            .g_per_kg
            .iter()
            .all(|(min, max)| is_positive(*min) && min <= max && *max <= 3.0);
        if !protein_valid {
            return Err(ConfigError::InvalidRange(
                "Protein ranges must satisfy 0 < min <= max <= 3.0 g/kg",
            ));
        }

        let ages = &self.metabolic_age;
        let references = [&ages.male_reference, &ages.female_reference];
        if references
            .iter()
            .any(|body| !is_positive(body.weight_kg) || !is_positive(body.height_cm))
        {
            return Err(ConfigError::ValueOutOfRange(
                "Metabolic age reference bodies must have positive weight and height",
            ));
        }

        if ages.min_age == 0 || ages.min_age >= ages.max_age || ages.max_age > 120 {
            return Err(ConfigError::InvalidRange(
                "Metabolic age curve must satisfy 1 <= min_age < max_age <= 120",
            ));
        }

        Ok(())
    }
}

/// Finite and strictly greater than zero
fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert_eq!(NutritionConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_descending_activity_factors_rejected() {
        let mut config = NutritionConfig::default();
        config.activity_factors.very_active = 1.5;

        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidRange(
                "Activity factors must be in ascending order"
            ))
        );
    }

    #[test]
    fn test_incomplete_default_split_rejected() {
        let config = NutritionConfig {
            default_macro_split: MacroSplit::new(30, 30, 30),
            ..NutritionConfig::default()
        };

        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidWeights(_))
        ));
    }

    #[test]
    fn test_non_finite_values_rejected() {
        let mut config = NutritionConfig::default();
        config.safety_floor.male_kcal = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = NutritionConfig::default();
        config.hydration.ml_per_kg = f64::INFINITY;
        assert!(config.validate().is_err());

        let mut config = NutritionConfig::default();
        config.protein.g_per_kg[2] = (f64::NAN, 1.6);
        assert!(config.validate().is_err());

        let mut config = NutritionConfig::default();
        config.metabolic_age.female_reference.height_cm = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = NutritionConfig::default();
        config.activity_factors.lightly_active = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_activity_indexed_tables_follow_level_order() {
        let hydration = HydrationConfig::default();
        assert!((hydration.activity_extra(ActivityLevel::Sedentary) - 0.0).abs() < f64::EPSILON);
        assert!((hydration.activity_extra(ActivityLevel::ExtraActive) - 1000.0).abs() < f64::EPSILON);

        let protein = ProteinConfig::default();
        assert_eq!(protein.range(ActivityLevel::ModeratelyActive), (1.2, 1.6));
    }
}
