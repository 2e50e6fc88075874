// ABOUTME: Closed-form anthropometric indices: BMI, waist-to-hip and waist-to-height ratios
// ABOUTME: Single-formula metrics with no variant selection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrimetric Contributors

use crate::constants::bmi::{HEALTHY_MAX, HEALTHY_MIN, PRIME_REFERENCE};

/// Body Mass Index (kg/m²) from weight (kg) and height (cm)
#[must_use]
pub fn bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// BMI Prime: BMI relative to the upper limit of the normal band
#[must_use]
pub fn bmi_prime(bmi: f64) -> f64 {
    bmi / PRIME_REFERENCE
}

/// Weight range (kg) that keeps BMI within the healthy band at this height
#[must_use]
pub fn healthy_weight_range(height_cm: f64) -> (f64, f64) {
    let height_m = height_cm / 100.0;
    let height_sq = height_m * height_m;
    (HEALTHY_MIN * height_sq, HEALTHY_MAX * height_sq)
}

/// Waist-to-hip ratio
#[must_use]
pub fn waist_to_hip(waist_cm: f64, hip_cm: f64) -> f64 {
    waist_cm / hip_cm
}

/// Waist-to-height ratio
#[must_use]
pub fn waist_to_height(waist_cm: f64, height_cm: f64) -> f64 {
    waist_cm / height_cm
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmi() {
        assert!((bmi(70.0, 175.0) - 22.857_142_857).abs() < 1e-6);
    }

    #[test]
    fn test_healthy_range_brackets_reference_bmi() {
        let (min, max) = healthy_weight_range(175.0);
        assert!((bmi(min, 175.0) - HEALTHY_MIN).abs() < 1e-9);
        assert!((bmi(max, 175.0) - HEALTHY_MAX).abs() < 1e-9);
    }

    #[test]
    fn test_ratios() {
        assert!((waist_to_hip(80.0, 100.0) - 0.8).abs() < 1e-12);
        assert!((waist_to_height(87.5, 175.0) - 0.5).abs() < 1e-12);
    }
}
