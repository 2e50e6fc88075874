// ABOUTME: Result formatting with per-metric rounding, units and classification
// ABOUTME: Assembles public MetricResult values and previous-value trend comparisons
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrimetric Contributors

//! Result Formatter
//!
//! Rounding is half away from zero at a fixed precision per metric.
//! Classification runs on the rounded value, so the displayed number and its
//! category always agree.

use crate::algorithms::intake::{ProteinNeeds, WaterIntake};
use crate::algorithms::{
    anthropometric, lean_mass, BmrFormula, BsaFormula, IdealWeightFormula, LeanMassFormula,
};
use crate::classification;
use crate::composer::{
    BodyFatBreakdown, CalorieSource, CaloriePlan, FfmiBreakdown, LeanMassBreakdown, MacroBreakdown, MacroPortion,
    MetabolicAgeEstimate, TdeeBreakdown,
};
use crate::errors::EngineResult;
use crate::models::{BiometricInput, Gender, Metric};
use crate::results::{Comparison, MacroAmount, MetricDetails, MetricResult, Trend};
use std::cmp::Ordering;

/// Decimal places for weights, energy per hour and percentages
const ONE_DECIMAL: i32 = 1;
/// Decimal places for ratios and small projections
const TWO_DECIMALS: i32 = 2;

/// Round half away from zero to `decimals` places
///
/// The scaled value is first snapped to 6 decimals so binary representation
/// error (e.g. `1978.4999999999998`) does not flip a half-way case. Negative
/// zero is normalized to zero.
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let scaled = value * factor;
    let snapped = (scaled * 1e6).round() / 1e6;
    let rounded = snapped.round() / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Decimal places of a metric's primary value
#[must_use]
pub const fn precision(metric: Metric) -> i32 {
    match metric {
        Metric::Tdee
        | Metric::Macros
        | Metric::ProteinNeeds
        | Metric::CalorieDeficitSurplus
        | Metric::MetabolicAge => 0,
        Metric::Bmi
        | Metric::Bmr
        | Metric::IdealWeight
        | Metric::BodyFat
        | Metric::WaterIntake
        | Metric::LeanBodyMass
        | Metric::Ffmi => ONE_DECIMAL,
        Metric::Whr | Metric::Whtr | Metric::Bsa => TWO_DECIMALS,
    }
}

/// Unit of a metric's primary value
#[must_use]
pub const fn unit(metric: Metric) -> &'static str {
    match metric {
        Metric::Bmi | Metric::Ffmi => "kg/m²",
        Metric::Bmr | Metric::Tdee | Metric::Macros | Metric::CalorieDeficitSurplus => "kcal/day",
        Metric::IdealWeight | Metric::LeanBodyMass => "kg",
        Metric::BodyFat => "%",
        Metric::WaterIntake => "L/day",
        Metric::ProteinNeeds => "g/day",
        Metric::Whr | Metric::Whtr => "ratio",
        Metric::MetabolicAge => "years",
        Metric::Bsa => "m²",
    }
}

/// Method label of single-formula metrics
const fn standard_method(metric: Metric) -> &'static str {
    match metric {
        Metric::Bmi => "quetelet",
        Metric::WaterIntake => "weight_based",
        Metric::ProteinNeeds => "activity_adjusted",
        Metric::Whr => "waist_to_hip",
        Metric::Whtr => "waist_to_height",
        Metric::Ffmi => "kouri_normalized",
        _ => "standard",
    }
}

fn base(metric: Metric, method: &'static str, raw_value: f64, details: MetricDetails) -> MetricResult {
    MetricResult {
        metric,
        value: round_to(raw_value, precision(metric)),
        unit: unit(metric),
        method,
        category: None,
        description: None,
        comparison: None,
        details,
    }
}

fn classified(mut result: MetricResult, gender: Option<Gender>) -> EngineResult<MetricResult> {
    if let Some(class) = classification::classify(result.metric, result.value, gender)? {
        result.category = Some(class.label);
        result.description = Some(class.description.to_owned());
    }
    Ok(result)
}

fn kg(value: f64) -> f64 {
    round_to(value, ONE_DECIMAL)
}

fn kcal(value: f64) -> f64 {
    round_to(value, 0)
}

/// Compare the current rounded value against a previous value
///
/// Both sides are compared at the metric's precision; equal rounded values
/// are `Neutral` even when the raw inputs differed.
#[must_use]
pub fn compare(metric: Metric, current: f64, previous: f64) -> Comparison {
    let decimals = precision(metric);
    let current = round_to(current, decimals);
    let previous = round_to(previous, decimals);
    let trend = match current.partial_cmp(&previous) {
        Some(Ordering::Greater) => Trend::Up,
        Some(Ordering::Less) => Trend::Down,
        Some(Ordering::Equal) | None => Trend::Neutral,
    };
    Comparison {
        current,
        previous,
        delta: round_to(current - previous, decimals),
        trend,
    }
}

/// BMI with category and healthy weight range
///
/// # Errors
///
/// Propagates classification errors
pub fn bmi(raw_bmi: f64, height_cm: f64) -> EngineResult<MetricResult> {
    let (min_kg, max_kg) = anthropometric::healthy_weight_range(height_cm);
    let rounded = round_to(raw_bmi, precision(Metric::Bmi));
    let details = MetricDetails::Bmi {
        bmi_prime: round_to(anthropometric::bmi_prime(rounded), TWO_DECIMALS),
        healthy_weight_min_kg: kg(min_kg),
        healthy_weight_max_kg: kg(max_kg),
    };
    classified(
        base(Metric::Bmi, standard_method(Metric::Bmi), raw_bmi, details),
        None,
    )
}

/// Basal metabolic rate
#[must_use]
pub fn bmr(formula: BmrFormula, raw_bmr: f64, input: &BiometricInput) -> MetricResult {
    let lean_mass_kg = if formula.uses_lean_mass() {
        input
            .weight_kg
            .zip(input.body_fat_percent)
            .map(|(weight, fat)| kg(lean_mass::from_body_fat(weight, fat)))
    } else {
        None
    };
    let details = MetricDetails::Bmr {
        kcal_per_hour: round_to(raw_bmr / 24.0, ONE_DECIMAL),
        lean_mass_kg,
    };
    base(Metric::Bmr, formula.name(), raw_bmr, details)
}

/// Total daily energy expenditure
#[must_use]
pub fn tdee(formula: BmrFormula, breakdown: &TdeeBreakdown) -> MetricResult {
    let details = MetricDetails::Tdee {
        bmr: round_to(breakdown.bmr, precision(Metric::Bmr)),
        activity_level: breakdown.activity_level,
        activity_factor: breakdown.activity_factor,
    };
    base(Metric::Tdee, formula.name(), breakdown.tdee, details)
}

fn macro_amount(portion: &MacroPortion) -> MacroAmount {
    MacroAmount {
        percent: portion.percent,
        calories: round_to(portion.calories, ONE_DECIMAL),
        grams: round_to(portion.grams, ONE_DECIMAL),
    }
}

/// Macro split of a calorie budget; the primary value is the budget
#[must_use]
pub fn macros(formula: BmrFormula, breakdown: &MacroBreakdown) -> MetricResult {
    let details = MetricDetails::Macros {
        calorie_source: breakdown.source,
        protein: macro_amount(&breakdown.protein),
        carbs: macro_amount(&breakdown.carbs),
        fat: macro_amount(&breakdown.fat),
    };
    let method = match breakdown.source {
        CalorieSource::Explicit => "explicit_budget",
        CalorieSource::Tdee => formula.name(),
    };
    base(Metric::Macros, method, breakdown.total_calories, details)
}

/// Ideal body weight with healthy range and difference from current weight
#[must_use]
pub fn ideal_weight(
    formula: IdealWeightFormula,
    raw_weight: f64,
    height_cm: f64,
    current_weight_kg: Option<f64>,
) -> MetricResult {
    let (min_kg, max_kg) = anthropometric::healthy_weight_range(height_cm);
    let ideal = kg(raw_weight);
    let details = MetricDetails::IdealWeight {
        healthy_weight_min_kg: kg(min_kg),
        healthy_weight_max_kg: kg(max_kg),
        difference_kg: current_weight_kg.map(|current| kg(kg(current) - ideal)),
    };
    base(Metric::IdealWeight, formula.name(), raw_weight, details)
}

/// Body fat percentage with category
///
/// # Errors
///
/// Returns `EngineError::MissingInput` when gender is absent (gender-specific bands)
pub fn body_fat(breakdown: &BodyFatBreakdown, gender: Option<Gender>) -> EngineResult<MetricResult> {
    let details = MetricDetails::BodyFat {
        fat_mass_kg: breakdown.fat_mass_kg.map(kg),
        lean_mass_kg: breakdown.lean_mass_kg.map(kg),
    };
    classified(
        base(Metric::BodyFat, breakdown.method.name(), breakdown.percent, details),
        gender,
    )
}

/// Daily water intake in liters
#[must_use]
pub fn water_intake(water: &WaterIntake) -> MetricResult {
    let details = MetricDetails::WaterIntake {
        milliliters: round_to(water.milliliters, 0),
        glasses: round_to(water.glasses, ONE_DECIMAL),
    };
    base(
        Metric::WaterIntake,
        standard_method(Metric::WaterIntake),
        water.liters,
        details,
    )
}

/// Daily protein needs; the primary value is the midpoint
#[must_use]
pub fn protein_needs(protein: &ProteinNeeds) -> MetricResult {
    let details = MetricDetails::ProteinNeeds {
        min_grams: round_to(protein.min_grams, 0),
        max_grams: round_to(protein.max_grams, 0),
        min_g_per_kg: protein.min_g_per_kg,
        max_g_per_kg: protein.max_g_per_kg,
    };
    base(
        Metric::ProteinNeeds,
        standard_method(Metric::ProteinNeeds),
        protein.recommended_grams,
        details,
    )
}

/// Calorie deficit or surplus plan; the primary value is the daily target
#[must_use]
pub fn calorie_plan(formula: BmrFormula, plan: &CaloriePlan) -> MetricResult {
    let details = MetricDetails::CaloriePlan {
        tdee: kcal(plan.tdee),
        daily_delta: kcal(plan.daily_delta),
        plan_type: plan.plan_type,
        weekly_change_kg: round_to(plan.weekly_change_kg, TWO_DECIMALS),
        weeks_to_goal: plan.weeks_to_goal.map(|weeks| round_to(weeks, ONE_DECIMAL)),
        safety_floor: kcal(plan.safety_floor),
        is_safe: plan.is_safe,
        warning: plan.warning.clone(),
    };
    base(
        Metric::CalorieDeficitSurplus,
        formula.name(),
        plan.target_calories,
        details,
    )
}

/// Waist-to-hip or waist-to-height ratio with risk category
///
/// # Errors
///
/// Returns `EngineError::MissingInput` when gender is absent
pub fn ratio(metric: Metric, raw_ratio: f64, gender: Option<Gender>) -> EngineResult<MetricResult> {
    classified(
        base(metric, standard_method(metric), raw_ratio, MetricDetails::Plain),
        gender,
    )
}

/// Lean body mass with fat mass
#[must_use]
pub fn lean_mass(formula: LeanMassFormula, breakdown: &LeanMassBreakdown) -> MetricResult {
    let details = MetricDetails::LeanMass {
        fat_mass_kg: kg(breakdown.fat_mass_kg),
        lean_mass_percent: round_to(breakdown.lean_mass_percent, ONE_DECIMAL),
    };
    base(
        Metric::LeanBodyMass,
        formula.name(),
        breakdown.lean_mass_kg,
        details,
    )
}

/// Height-normalized FFMI with category
///
/// # Errors
///
/// Propagates classification errors
pub fn ffmi(breakdown: &FfmiBreakdown) -> EngineResult<MetricResult> {
    let details = MetricDetails::Ffmi {
        lean_mass_kg: kg(breakdown.lean_mass_kg),
        raw_ffmi: round_to(breakdown.raw, ONE_DECIMAL),
    };
    classified(
        base(
            Metric::Ffmi,
            standard_method(Metric::Ffmi),
            breakdown.normalized,
            details,
        ),
        None,
    )
}

/// Metabolic age with the gap to chronological age
#[must_use]
pub fn metabolic_age(formula: BmrFormula, estimate: &MetabolicAgeEstimate) -> MetricResult {
    let difference_years = i64::from(estimate.metabolic_age) - i64::from(estimate.actual_age);
    let description = match difference_years.cmp(&0) {
        Ordering::Less => format!(
            "{} years younger than chronological age",
            difference_years.unsigned_abs()
        ),
        Ordering::Equal => "Matches chronological age".to_owned(),
        Ordering::Greater => format!("{difference_years} years older than chronological age"),
    };
    let details = MetricDetails::MetabolicAge {
        actual_age: estimate.actual_age,
        difference_years,
        subject_bmr: round_to(estimate.subject_bmr, precision(Metric::Bmr)),
        reference_bmr: round_to(estimate.reference_bmr, precision(Metric::Bmr)),
    };
    let mut result = base(
        Metric::MetabolicAge,
        formula.name(),
        f64::from(estimate.metabolic_age),
        details,
    );
    result.description = Some(description);
    result
}

/// Body surface area
#[must_use]
pub fn bsa(formula: BsaFormula, raw_bsa: f64) -> MetricResult {
    base(Metric::Bsa, formula.name(), raw_bsa, MetricDetails::Plain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_away_from_zero() {
        assert!((round_to(2.45, 1) - 2.5).abs() < f64::EPSILON);
        assert!((round_to(-2.45, 1) + 2.5).abs() < f64::EPSILON);
        assert!((round_to(1648.75, 1) - 1648.8).abs() < 1e-9);
        assert!((round_to(1.844_662, 2) - 1.84).abs() < f64::EPSILON);
    }

    #[test]
    fn test_round_absorbs_representation_error() {
        assert!((round_to(1648.75 * 1.2, 0) - 1979.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_round_normalizes_negative_zero() {
        let rounded = round_to(-0.04, 1);
        assert!(rounded.is_sign_positive());
    }

    #[test]
    fn test_compare_uses_rounded_values() {
        let comparison = compare(Metric::Bmi, 22.94, 22.91);
        assert_eq!(comparison.trend, Trend::Neutral);
        assert!(comparison.delta.abs() < f64::EPSILON);

        let comparison = compare(Metric::Bmi, 22.9, 23.4);
        assert_eq!(comparison.trend, Trend::Down);
        assert!((comparison.delta + 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_bmi_reference_subject() {
        let result = bmi(anthropometric::bmi(70.0, 175.0), 175.0).unwrap();
        assert!((result.value - 22.9).abs() < f64::EPSILON);
        assert_eq!(result.category, Some("Normal"));
        assert_eq!(result.unit, "kg/m²");
    }

    #[test]
    fn test_every_metric_has_unit_and_precision() {
        for metric in Metric::ALL {
            assert!(!unit(metric).is_empty());
            assert!((0..=2).contains(&precision(metric)));
        }
    }
}
