// ABOUTME: Lean body mass estimation from body fat percentage or height/weight regressions
// ABOUTME: Implements the body-fat subtraction, Boer (1984) and Hume (1966) formulas
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrimetric Contributors

use crate::constants::body_composition::{BOER_FEMALE, BOER_MALE, HUME_FEMALE, HUME_MALE};
use crate::errors::{EngineError, EngineResult};
use crate::models::{BiometricInput, Gender, Metric, normalize_identifier};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lean body mass estimation formula
///
/// # Scientific References
///
/// - Boer, P. (1984). *Am J Physiol*, 247(4), F632-F636.
/// - Hume, R. (1966). *J Clin Pathol*, 19(4), 389-391.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum LeanMassFormula {
    /// Weight minus fat mass from a known body fat percentage
    #[default]
    FromBodyFat,

    /// Boer regression on weight and height, sex-specific
    Boer,

    /// Hume regression on weight and height, sex-specific
    Hume,
}

impl LeanMassFormula {
    /// Accepted variant names
    pub const OPTIONS: &'static [&'static str] = &["from_body_fat", "boer", "hume"];

    /// Estimate lean body mass (kg)
    ///
    /// # Errors
    ///
    /// Returns `EngineError::MissingInput` if a required input is absent, or
    /// `EngineError::Validation` if a regression lands outside (0, weight]
    pub fn estimate(&self, metric: Metric, input: &BiometricInput) -> EngineResult<f64> {
        let weight = input.require_weight(metric)?;
        let lean_mass = match self {
            Self::FromBodyFat => return Ok(from_body_fat(weight, input.require_body_fat(metric)?)),
            Self::Boer => boer(
                weight,
                input.require_height(metric)?,
                input.require_gender(metric)?,
            ),
            Self::Hume => hume(
                weight,
                input.require_height(metric)?,
                input.require_gender(metric)?,
            ),
        };

        if lean_mass <= 0.0 || lean_mass > weight {
            return Err(EngineError::inconsistent(
                metric,
                "height_cm",
                format!(
                    "{} estimate of {lean_mass:.1} kg lean mass is not plausible for {weight} kg body weight",
                    self.name()
                ),
            ));
        }
        Ok(lean_mass)
    }

    /// Whether the formula needs a body fat percentage
    #[must_use]
    pub const fn needs_body_fat(&self) -> bool {
        matches!(self, Self::FromBodyFat)
    }

    /// Get formula name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::FromBodyFat => "from_body_fat",
            Self::Boer => "boer",
            Self::Hume => "hume",
        }
    }

    /// Get formula description
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::FromBodyFat => "Weight minus fat mass from measured body fat",
            Self::Boer => "Boer (1984): weight/height regression",
            Self::Hume => "Hume (1966): weight/height regression",
        }
    }

    /// Get the formula as a string
    #[must_use]
    pub const fn formula(&self) -> &'static str {
        match self {
            Self::FromBodyFat => "weight x (1 - body fat % / 100)",
            Self::Boer => "0.407w + 0.267h - 19.2 (male) | 0.252w + 0.473h - 48.3 (female)",
            Self::Hume => {
                "0.32810w + 0.33929h - 29.5336 (male) | 0.29569w + 0.41813h - 43.2933 (female)"
            }
        }
    }
}

impl FromStr for LeanMassFormula {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_identifier(s).as_str() {
            "from_body_fat" | "body_fat" => Ok(Self::FromBodyFat),
            "boer" => Ok(Self::Boer),
            "hume" => Ok(Self::Hume),
            other => Err(format!(
                "Unknown lean body mass formula: '{other}'. Valid options: {}",
                Self::OPTIONS.join(", ")
            )),
        }
    }
}

/// Lean body mass (kg) from weight and body fat percentage
#[must_use]
pub fn from_body_fat(weight_kg: f64, body_fat_percent: f64) -> f64 {
    weight_kg * (1.0 - body_fat_percent / 100.0)
}

fn regression([weight_coef, height_coef, constant]: [f64; 3], weight_kg: f64, height_cm: f64) -> f64 {
    weight_coef.mul_add(weight_kg, height_coef * height_cm) - constant
}

/// Boer lean body mass (kg)
#[must_use]
pub fn boer(weight_kg: f64, height_cm: f64, gender: Gender) -> f64 {
    let coefficients = match gender {
        Gender::Male => BOER_MALE,
        Gender::Female => BOER_FEMALE,
    };
    regression(coefficients, weight_kg, height_cm)
}

/// Hume lean body mass (kg)
#[must_use]
pub fn hume(weight_kg: f64, height_cm: f64, gender: Gender) -> f64 {
    let coefficients = match gender {
        Gender::Male => HUME_MALE,
        Gender::Female => HUME_FEMALE,
    };
    regression(coefficients, weight_kg, height_cm)
}
