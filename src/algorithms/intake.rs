// ABOUTME: Daily water and protein intake recommendations scaled by body weight and activity
// ABOUTME: Uses the configurable hydration allowance and protein g/kg tables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrimetric Contributors

//! Intake recommendations
//!
//! # Scientific References
//!
//! - EFSA Panel on Dietetic Products (2010). Scientific Opinion on Dietary
//!   Reference Values for water. DOI: 10.2903/j.efsa.2010.1459
//! - Phillips, S.M., & Van Loon, L.J. (2011). Dietary protein for athletes.
//!   DOI: 10.1080/02640414.2011.619204

use crate::config::{HydrationConfig, ProteinConfig};
use crate::models::ActivityLevel;

/// Daily water recommendation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterIntake {
    /// Total milliliters per day
    pub milliliters: f64,
    /// Liters per day
    pub liters: f64,
    /// Number of standard glasses
    pub glasses: f64,
}

/// Water intake from body weight plus an activity allowance
///
/// Without an activity level no activity allowance is added.
#[must_use]
pub fn water_intake(
    weight_kg: f64,
    activity_level: Option<ActivityLevel>,
    config: &HydrationConfig,
) -> WaterIntake {
    let extra = activity_level.map_or(0.0, |level| config.activity_extra(level));
    let milliliters = weight_kg.mul_add(config.ml_per_kg, extra);
    WaterIntake {
        milliliters,
        liters: milliliters / 1000.0,
        glasses: milliliters / config.glass_ml,
    }
}

/// Daily protein recommendation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProteinNeeds {
    /// Lower end of the range (g/day)
    pub min_grams: f64,
    /// Upper end of the range (g/day)
    pub max_grams: f64,
    /// Midpoint of the range (g/day)
    pub recommended_grams: f64,
    /// Lower g/kg used
    pub min_g_per_kg: f64,
    /// Upper g/kg used
    pub max_g_per_kg: f64,
}

/// Protein needs from body weight and activity level
#[must_use]
pub fn protein_needs(
    weight_kg: f64,
    activity_level: ActivityLevel,
    config: &ProteinConfig,
) -> ProteinNeeds {
    let (min_g_per_kg, max_g_per_kg) = config.range(activity_level);
    let min_grams = weight_kg * min_g_per_kg;
    let max_grams = weight_kg * max_g_per_kg;
    ProteinNeeds {
        min_grams,
        max_grams,
        recommended_grams: (min_grams + max_grams) / 2.0,
        min_g_per_kg,
        max_g_per_kg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_water_without_activity_is_weight_based_only() {
        let water = water_intake(70.0, None, &HydrationConfig::default());
        assert!((water.milliliters - 2450.0).abs() < 1e-9);
        assert!((water.liters - 2.45).abs() < 1e-9);
        assert!((water.glasses - 9.8).abs() < 1e-9);
    }

    #[test]
    fn test_water_activity_allowance() {
        let water = water_intake(
            70.0,
            Some(ActivityLevel::VeryActive),
            &HydrationConfig::default(),
        );
        assert!((water.milliliters - 3200.0).abs() < 1e-9);
    }

    #[test]
    fn test_protein_range_for_moderate_activity() {
        let protein = protein_needs(
            80.0,
            ActivityLevel::ModeratelyActive,
            &ProteinConfig::default(),
        );
        assert!((protein.min_grams - 96.0).abs() < 1e-9);
        assert!((protein.max_grams - 128.0).abs() < 1e-9);
        assert!((protein.recommended_grams - 112.0).abs() < 1e-9);
    }
}
