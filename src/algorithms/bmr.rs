// ABOUTME: Basal metabolic rate estimation using predictive resting energy equations
// ABOUTME: Implements Mifflin-St Jeor, revised Harris-Benedict and Katch-McArdle formulas
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrimetric Contributors

use super::lean_mass;
use crate::constants::{harris_benedict, katch_mcardle, mifflin};
use crate::errors::EngineResult;
use crate::models::{BiometricInput, Gender, Metric, normalize_identifier};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Basal metabolic rate estimation formula
///
/// - `MifflinStJeor`: most accurate for the general adult population (±10%)
/// - `HarrisBenedict`: 1984 revision of the original 1919 equation
/// - `KatchMcArdle`: lean-mass based, preferred when body fat is known
///
/// # Scientific References
///
/// - Mifflin, M.D. et al. (1990). *Am J Clin Nutr*, 51(2), 241-247.
/// - Roza, A.M. & Shizgal, H.M. (1984). *Am J Clin Nutr*, 40(1), 168-182.
/// - `McArdle`, W.D., Katch, F.I., & Katch, V.L. (2010). *Exercise Physiology*.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum BmrFormula {
    /// Mifflin-St Jeor: 10w + 6.25h - 5a + {5 male, -161 female}
    #[default]
    MifflinStJeor,

    /// Revised Harris-Benedict with sex-specific coefficients
    HarrisBenedict,

    /// Katch-McArdle: 370 + 21.6 x lean body mass
    ///
    /// Sex-independent; needs weight and body fat percentage instead of
    /// height, age and gender
    KatchMcArdle,
}

impl BmrFormula {
    /// Accepted variant names
    pub const OPTIONS: &'static [&'static str] =
        &["mifflin_st_jeor", "harris_benedict", "katch_mcardle"];

    /// Estimate basal metabolic rate (kcal/day)
    ///
    /// Missing inputs are attributed to `metric`, the metric the caller is
    /// computing (BMR itself, or a composite that builds on it).
    ///
    /// # Errors
    ///
    /// Returns `EngineError::MissingInput` if an input the formula needs is absent
    pub fn estimate(&self, metric: Metric, input: &BiometricInput) -> EngineResult<f64> {
        match self {
            Self::MifflinStJeor => Ok(mifflin_st_jeor(
                input.require_weight(metric)?,
                input.require_height(metric)?,
                input.require_age(metric)?,
                input.require_gender(metric)?,
            )),
            Self::HarrisBenedict => Ok(harris_benedict(
                input.require_weight(metric)?,
                input.require_height(metric)?,
                input.require_age(metric)?,
                input.require_gender(metric)?,
            )),
            Self::KatchMcArdle => {
                let lean_mass = lean_mass::from_body_fat(
                    input.require_weight(metric)?,
                    input.require_body_fat(metric)?,
                );
                Ok(katch_mcardle(lean_mass))
            }
        }
    }

    /// Whether the formula is driven by lean mass rather than sex and age
    #[must_use]
    pub const fn uses_lean_mass(&self) -> bool {
        matches!(self, Self::KatchMcArdle)
    }

    /// Get formula name for logging and result labels
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::MifflinStJeor => "mifflin_st_jeor",
            Self::HarrisBenedict => "harris_benedict",
            Self::KatchMcArdle => "katch_mcardle",
        }
    }

    /// Get formula description
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::MifflinStJeor => "Mifflin-St Jeor (1990): general adult population, ±10%",
            Self::HarrisBenedict => "Harris-Benedict, Roza & Shizgal revision (1984)",
            Self::KatchMcArdle => "Katch-McArdle: lean body mass based, sex-independent",
        }
    }

    /// Get the formula as a string
    #[must_use]
    pub const fn formula(&self) -> &'static str {
        match self {
            Self::MifflinStJeor => "10 x weight + 6.25 x height - 5 x age + (5 | -161)",
            Self::HarrisBenedict => {
                "88.362 + 13.397w + 4.799h - 5.677a (male) | 447.593 + 9.247w + 3.098h - 4.330a (female)"
            }
            Self::KatchMcArdle => "370 + 21.6 x lean body mass",
        }
    }
}

impl FromStr for BmrFormula {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_identifier(s).as_str() {
            "mifflin_st_jeor" | "mifflin" | "msj" => Ok(Self::MifflinStJeor),
            "harris_benedict" | "harris" => Ok(Self::HarrisBenedict),
            "katch_mcardle" | "katch" => Ok(Self::KatchMcArdle),
            other => Err(format!(
                "Unknown BMR formula: '{other}'. Valid options: {}",
                Self::OPTIONS.join(", ")
            )),
        }
    }
}

/// Mifflin-St Jeor basal metabolic rate (kcal/day)
#[must_use]
pub fn mifflin_st_jeor(weight_kg: f64, height_cm: f64, age_years: u32, gender: Gender) -> f64 {
    let sex_constant = match gender {
        Gender::Male => mifflin::MALE_CONSTANT,
        Gender::Female => mifflin::FEMALE_CONSTANT,
    };

    mifflin::WEIGHT_COEF.mul_add(
        weight_kg,
        mifflin::HEIGHT_COEF.mul_add(height_cm, -mifflin::AGE_COEF * f64::from(age_years)),
    ) + sex_constant
}

/// Revised Harris-Benedict basal metabolic rate (kcal/day)
#[must_use]
pub fn harris_benedict(weight_kg: f64, height_cm: f64, age_years: u32, gender: Gender) -> f64 {
    let [constant, weight_coef, height_coef, age_coef] = match gender {
        Gender::Male => harris_benedict::MALE,
        Gender::Female => harris_benedict::FEMALE,
    };

    weight_coef.mul_add(
        weight_kg,
        height_coef.mul_add(height_cm, -age_coef * f64::from(age_years)),
    ) + constant
}

/// Katch-McArdle basal metabolic rate (kcal/day) from lean body mass
#[must_use]
pub fn katch_mcardle(lean_mass_kg: f64) -> f64 {
    katch_mcardle::LEAN_MASS_COEF.mul_add(lean_mass_kg, katch_mcardle::CONSTANT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mifflin_male_reference_subject() {
        // 10*70 + 6.25*175 - 5*30 + 5
        let bmr = mifflin_st_jeor(70.0, 175.0, 30, Gender::Male);
        assert!((bmr - 1648.75).abs() < 1e-9);
    }

    #[test]
    fn test_mifflin_female_constant_is_166_lower() {
        let male = mifflin_st_jeor(60.0, 165.0, 40, Gender::Male);
        let female = mifflin_st_jeor(60.0, 165.0, 40, Gender::Female);
        assert!((male - female - 166.0).abs() < 1e-9);
    }

    #[test]
    fn test_harris_benedict_female() {
        // 447.593 + 9.247*60 + 3.098*165 - 4.330*40 = 1340.383
        let bmr = harris_benedict(60.0, 165.0, 40, Gender::Female);
        assert!((bmr - 1340.383).abs() < 1e-6);
    }

    #[test]
    fn test_katch_mcardle_uses_lean_mass_only() {
        let input = BiometricInput {
            weight_kg: Some(80.0),
            body_fat_percent: Some(20.0),
            ..BiometricInput::default()
        };
        // LBM = 64 kg; 370 + 21.6*64 = 1752.4
        let bmr = BmrFormula::KatchMcArdle.estimate(Metric::Bmr, &input).unwrap();
        assert!((bmr - 1752.4).abs() < 1e-9);
    }

    #[test]
    fn test_missing_age_is_attributed_to_requesting_metric() {
        let input = BiometricInput {
            weight_kg: Some(70.0),
            height_cm: Some(175.0),
            gender: Some(Gender::Male),
            ..BiometricInput::default()
        };
        let err = BmrFormula::MifflinStJeor
            .estimate(Metric::Tdee, &input)
            .unwrap_err();
        assert_eq!(err.metric(), Metric::Tdee);
        assert_eq!(err.fields(), vec!["age_years"]);
    }

    #[test]
    fn test_formula_parsing() {
        assert_eq!("Mifflin-St-Jeor".parse(), Ok(BmrFormula::MifflinStJeor));
        assert_eq!("katch".parse(), Ok(BmrFormula::KatchMcArdle));
        assert!("cunningham".parse::<BmrFormula>().is_err());
        assert_eq!(BmrFormula::default(), BmrFormula::MifflinStJeor);
    }
}
