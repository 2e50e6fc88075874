// ABOUTME: Public result shapes returned for every metric calculation
// ABOUTME: Rounded primary value, unit, method, category and per-metric secondary details
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrimetric Contributors

//! Calculation results
//!
//! Every numeric field is already rounded to its display precision, so two
//! calls with identical inputs serialize byte-identically.

use crate::composer::{CalorieSource, PlanType};
use crate::models::{ActivityLevel, Metric};
use serde::Serialize;

/// Direction of change against a previous value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    /// Current value is higher
    Up,
    /// Current value is lower
    Down,
    /// Rounded values are equal
    Neutral,
}

/// Change between a previous and the current value
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Comparison {
    /// Current rounded value
    pub current: f64,
    /// Previous value rounded to the same precision
    pub previous: f64,
    /// `current - previous`
    pub delta: f64,
    /// Direction of change
    pub trend: Trend,
}

/// One macronutrient of a macro split
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacroAmount {
    /// Share of total calories (%)
    pub percent: u32,
    /// Calories (kcal/day)
    pub calories: f64,
    /// Grams per day
    pub grams: f64,
}

/// Secondary values specific to each metric
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MetricDetails {
    /// Body Mass Index
    Bmi {
        /// BMI divided by 25
        bmi_prime: f64,
        /// Lowest weight with a normal BMI at this height (kg)
        healthy_weight_min_kg: f64,
        /// Highest weight with a normal BMI at this height (kg)
        healthy_weight_max_kg: f64,
    },
    /// Basal metabolic rate
    Bmr {
        /// BMR spread over the day (kcal/hour)
        kcal_per_hour: f64,
        /// Lean mass used by lean-mass formulas (kg)
        #[serde(skip_serializing_if = "Option::is_none")]
        lean_mass_kg: Option<f64>,
    },
    /// Total daily energy expenditure
    Tdee {
        /// Underlying BMR (kcal/day)
        bmr: f64,
        /// Activity level applied
        activity_level: ActivityLevel,
        /// Multiplier applied
        activity_factor: f64,
    },
    /// Macro split
    Macros {
        /// Origin of the calorie budget
        calorie_source: CalorieSource,
        /// Protein
        protein: MacroAmount,
        /// Carbohydrates
        carbs: MacroAmount,
        /// Fat
        fat: MacroAmount,
    },
    /// Ideal body weight
    IdealWeight {
        /// Lowest weight with a normal BMI at this height (kg)
        healthy_weight_min_kg: f64,
        /// Highest weight with a normal BMI at this height (kg)
        healthy_weight_max_kg: f64,
        /// Current minus ideal weight (kg), when weight is known
        #[serde(skip_serializing_if = "Option::is_none")]
        difference_kg: Option<f64>,
    },
    /// Body fat percentage
    BodyFat {
        /// Fat mass (kg), when weight is known
        #[serde(skip_serializing_if = "Option::is_none")]
        fat_mass_kg: Option<f64>,
        /// Lean mass (kg), when weight is known
        #[serde(skip_serializing_if = "Option::is_none")]
        lean_mass_kg: Option<f64>,
    },
    /// Daily water intake
    WaterIntake {
        /// Milliliters per day
        milliliters: f64,
        /// Standard glasses per day
        glasses: f64,
    },
    /// Daily protein needs
    ProteinNeeds {
        /// Lower end of the range (g/day)
        min_grams: f64,
        /// Upper end of the range (g/day)
        max_grams: f64,
        /// Lower g/kg used
        min_g_per_kg: f64,
        /// Upper g/kg used
        max_g_per_kg: f64,
    },
    /// Calorie deficit or surplus plan
    CaloriePlan {
        /// Estimated TDEE (kcal/day)
        tdee: f64,
        /// Requested daily change (kcal/day)
        daily_delta: f64,
        /// Deficit, surplus or maintenance
        plan_type: PlanType,
        /// Projected body mass change per week (kg)
        weekly_change_kg: f64,
        /// Weeks to the goal weight
        #[serde(skip_serializing_if = "Option::is_none")]
        weeks_to_goal: Option<f64>,
        /// Minimum daily intake for the subject's gender (kcal/day)
        safety_floor: f64,
        /// Whether the target is at or above the floor
        is_safe: bool,
        /// Explanation when the plan is unsafe
        #[serde(skip_serializing_if = "Option::is_none")]
        warning: Option<String>,
    },
    /// Lean body mass
    LeanMass {
        /// Fat mass (kg)
        fat_mass_kg: f64,
        /// Lean share of body weight (%)
        lean_mass_percent: f64,
    },
    /// Fat-free mass index
    Ffmi {
        /// Lean body mass (kg)
        lean_mass_kg: f64,
        /// FFMI before height normalization (kg/m²)
        raw_ffmi: f64,
    },
    /// Metabolic age
    MetabolicAge {
        /// Chronological age (years)
        actual_age: u32,
        /// Metabolic minus chronological age (years)
        difference_years: i64,
        /// Subject BMR (kcal/day)
        subject_bmr: f64,
        /// Reference BMR at the metabolic age (kcal/day)
        reference_bmr: f64,
    },
    /// No secondary values (WHR, `WHtR`, BSA)
    Plain,
}

/// Result of one calculation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricResult {
    /// Metric calculated
    pub metric: Metric,
    /// Primary value, rounded to the metric's precision
    pub value: f64,
    /// Unit of `value`
    pub unit: &'static str,
    /// Formula or method used
    pub method: &'static str,
    /// Category label for classified metrics
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<&'static str>,
    /// Category description or explanatory note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Change against a previous value, when one was supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<Comparison>,
    /// Metric-specific secondary values
    pub details: MetricDetails,
}

impl MetricResult {
    /// Safety flag of a calorie plan; `None` for other metrics
    #[must_use]
    pub const fn is_safe(&self) -> Option<bool> {
        match &self.details {
            MetricDetails::CaloriePlan { is_safe, .. } => Some(*is_safe),
            _ => None,
        }
    }
}
