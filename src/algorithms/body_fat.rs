// ABOUTME: Body fat percentage estimation from circumferences, BMI, or caliper measurements
// ABOUTME: Implements the US Navy circumference method and the Deurenberg BMI equation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrimetric Contributors

use super::anthropometric;
use crate::constants::body_composition::{
    DEURENBERG, NAVY_FEMALE, NAVY_MALE, SIRI_NUMERATOR, SIRI_OFFSET,
};
use crate::constants::ranges::BODY_FAT_PERCENT;
use crate::errors::{EngineError, EngineResult};
use crate::models::{BiometricInput, Gender, Metric, normalize_identifier};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Body fat estimation method
///
/// # Scientific References
///
/// - Hodgdon, J.A. & Beckett, M.B. (1984). Prediction of percent body fat for
///   U.S. Navy men and women from body circumferences and height. NHRC 84-11.
/// - Deurenberg, P. et al. (1991). *Br J Nutr*, 65(2), 105-114.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum BodyFatMethod {
    /// US Navy circumference method (neck, waist, and hip for women)
    #[default]
    Navy,

    /// Deurenberg adult equation from BMI, age and sex
    BmiBased,

    /// Caliper measurement taken by the practitioner
    ///
    /// The site equation (3-site, 7-site, ...) is applied by whatever device
    /// or worksheet produced the reading; the engine receives the resulting
    /// percentage as `body_fat_percent` and classifies and composes it.
    Skinfold,
}

impl BodyFatMethod {
    /// Accepted variant names
    pub const OPTIONS: &'static [&'static str] = &["navy", "bmi_based", "skinfold"];

    /// Estimate body fat percentage
    ///
    /// # Errors
    ///
    /// Returns `EngineError::MissingInput` if a required measurement is absent,
    /// or `EngineError::Validation` if the measurements fall outside the
    /// method's domain (e.g. waist not larger than neck)
    pub fn estimate(&self, metric: Metric, input: &BiometricInput) -> EngineResult<f64> {
        let (percent, blamed_field) = match self {
            Self::Navy => (navy(metric, input)?, "waist_cm"),
            Self::BmiBased => {
                let bmi = anthropometric::bmi(
                    input.require_weight(metric)?,
                    input.require_height(metric)?,
                );
                let percent = deurenberg(
                    bmi,
                    input.require_age(metric)?,
                    input.require_gender(metric)?,
                );
                (percent, "weight_kg")
            }
            Self::Skinfold => return input.require_body_fat(metric),
        };

        let (min, max) = BODY_FAT_PERCENT;
        if !(min..=max).contains(&percent) {
            return Err(EngineError::inconsistent(
                metric,
                blamed_field,
                format!(
                    "{} estimate of {percent:.1}% is outside the plausible {min}-{max}% range",
                    self.name()
                ),
            ));
        }
        Ok(percent)
    }

    /// Get method name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Navy => "navy",
            Self::BmiBased => "bmi_based",
            Self::Skinfold => "skinfold",
        }
    }

    /// Get method description
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Navy => "US Navy circumference method (Hodgdon & Beckett, 1984)",
            Self::BmiBased => "Deurenberg (1991): BMI, age and sex",
            Self::Skinfold => "Skinfold caliper reading supplied by the practitioner",
        }
    }

    /// Get the formula as a string
    #[must_use]
    pub const fn formula(&self) -> &'static str {
        match self {
            Self::Navy => {
                "495 / (1.0324 - 0.19077 log10(waist - neck) + 0.15456 log10(height)) - 450 (male) | \
                 495 / (1.29579 - 0.35004 log10(waist + hip - neck) + 0.22100 log10(height)) - 450 (female)"
            }
            Self::BmiBased => "1.20 x BMI + 0.23 x age - 10.8 x (1 male | 0 female) - 5.4",
            Self::Skinfold => "measured body fat %",
        }
    }
}

impl FromStr for BodyFatMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_identifier(s).as_str() {
            "navy" | "us_navy" | "circumference" => Ok(Self::Navy),
            "bmi_based" | "bmi" | "deurenberg" => Ok(Self::BmiBased),
            "skinfold" | "caliper" => Ok(Self::Skinfold),
            other => Err(format!(
                "Unknown body fat method: '{other}'. Valid options: {}",
                Self::OPTIONS.join(", ")
            )),
        }
    }
}

fn navy(metric: Metric, input: &BiometricInput) -> EngineResult<f64> {
    let gender = input.require_gender(metric)?;
    let height = input.require_height(metric)?;
    let neck = input.require_circumference(metric, "neck_cm")?;
    let waist = input.require_circumference(metric, "waist_cm")?;

    let (girth, [constant, girth_coef, height_coef]) = match gender {
        Gender::Male => (waist - neck, NAVY_MALE),
        Gender::Female => {
            let hip = input.require_circumference(metric, "hip_cm")?;
            (waist + hip - neck, NAVY_FEMALE)
        }
    };

    if girth <= 0.0 {
        let detail = match gender {
            Gender::Male => "waist must be larger than neck circumference",
            Gender::Female => "waist plus hip must be larger than neck circumference",
        };
        return Err(EngineError::inconsistent(metric, "waist_cm", detail));
    }

    let density = height_coef.mul_add(height.log10(), girth_coef.mul_add(-girth.log10(), constant));
    Ok(SIRI_NUMERATOR / density - SIRI_OFFSET)
}

/// Deurenberg adult body fat percentage from BMI, age and sex
#[must_use]
pub fn deurenberg(bmi: f64, age_years: u32, gender: Gender) -> f64 {
    let [bmi_coef, age_coef, sex_coef, constant] = DEURENBERG;
    let sex = match gender {
        Gender::Male => 1.0,
        Gender::Female => 0.0,
    };
    bmi_coef.mul_add(bmi, age_coef.mul_add(f64::from(age_years), -sex_coef * sex)) - constant
}
