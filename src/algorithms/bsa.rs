// ABOUTME: Body surface area estimation used by clinical dosing and metabolic formulas
// ABOUTME: Implements the Mosteller (1987) and Du Bois & Du Bois (1916) formulas
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrimetric Contributors

use crate::constants::surface_area::{DUBOIS, MOSTELLER_DIVISOR};
use crate::models::normalize_identifier;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Body surface area formula
///
/// # Scientific References
///
/// - Mosteller, R.D. (1987). Simplified calculation of body-surface area.
///   *N Engl J Med*, 317(17), 1098.
/// - Du Bois, D. & Du Bois, E.F. (1916). A formula to estimate the approximate
///   surface area if height and weight be known. *Arch Intern Med*, 17, 863-871.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum BsaFormula {
    /// Mosteller: sqrt(weight x height / 3600)
    #[default]
    Mosteller,
    /// Du Bois: 0.007184 x weight^0.425 x height^0.725
    DuBois,
}

impl BsaFormula {
    /// Accepted variant names
    pub const OPTIONS: &'static [&'static str] = &["mosteller", "dubois"];

    /// Estimate body surface area (m²) from weight (kg) and height (cm)
    #[must_use]
    pub fn estimate(&self, weight_kg: f64, height_cm: f64) -> f64 {
        match self {
            Self::Mosteller => (weight_kg * height_cm / MOSTELLER_DIVISOR).sqrt(),
            Self::DuBois => {
                let [constant, weight_exp, height_exp] = DUBOIS;
                constant * weight_kg.powf(weight_exp) * height_cm.powf(height_exp)
            }
        }
    }

    /// Get formula name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Mosteller => "mosteller",
            Self::DuBois => "dubois",
        }
    }

    /// Get formula description
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Mosteller => "Mosteller (1987): simplified square-root form",
            Self::DuBois => "Du Bois & Du Bois (1916): original power-law fit",
        }
    }

    /// Get the formula as a string
    #[must_use]
    pub const fn formula(&self) -> &'static str {
        match self {
            Self::Mosteller => "sqrt(weight x height / 3600)",
            Self::DuBois => "0.007184 x weight^0.425 x height^0.725",
        }
    }
}

impl FromStr for BsaFormula {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_identifier(s).as_str() {
            "mosteller" => Ok(Self::Mosteller),
            "dubois" | "du_bois" => Ok(Self::DuBois),
            other => Err(format!(
                "Unknown BSA formula: '{other}'. Valid options: {}",
                Self::OPTIONS.join(", ")
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mosteller() {
        let bsa = BsaFormula::Mosteller.estimate(70.0, 175.0);
        assert!((bsa - (70.0_f64 * 175.0 / 3600.0).sqrt()).abs() < 1e-12);
        assert!((bsa - 1.8447).abs() < 1e-4);
    }

    #[test]
    fn test_dubois_close_to_mosteller_for_average_adult() {
        let mosteller = BsaFormula::Mosteller.estimate(70.0, 175.0);
        let dubois = BsaFormula::DuBois.estimate(70.0, 175.0);
        assert!((mosteller - dubois).abs() < 0.05);
    }

    #[test]
    fn test_parse_accepts_spaced_name() {
        assert_eq!("Du Bois".parse(), Ok(BsaFormula::DuBois));
    }
}
