// ABOUTME: Integration tests for composite metrics built from formula outputs
// ABOUTME: TDEE, macro split, calorie plan projections, metabolic age and lean mass breakdowns
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrimetric Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use nutrimetric::algorithms::{BmrFormula, BodyFatMethod, LeanMassFormula};
use nutrimetric::composer::{self, CalorieSource, PlanType};
use nutrimetric::config::{EngineConfig, NutritionConfig};
use nutrimetric::engine::calculate_typed;
use nutrimetric::errors::ErrorCode;
use nutrimetric::models::{ActivityLevel, BiometricInput, Gender, MacroSplit, Metric};

fn client() -> BiometricInput {
    BiometricInput::adult(70.0, 175.0, 30, Gender::Male).with_activity(ActivityLevel::Sedentary)
}

#[test]
fn test_tdee_threads_bmr_through_activity_factor() {
    let config = NutritionConfig::default();
    let breakdown =
        composer::tdee(Metric::Tdee, BmrFormula::MifflinStJeor, &client(), &config).unwrap();

    assert!((breakdown.bmr - 1648.75).abs() < 1e-9);
    assert!((breakdown.tdee - 1978.5).abs() < 1e-9);
    assert_eq!(breakdown.activity_level, ActivityLevel::Sedentary);
}

#[test]
fn test_tdee_with_katch_mcardle_needs_no_age() {
    let config = NutritionConfig::default();
    let input = BiometricInput {
        weight_kg: Some(80.0),
        body_fat_percent: Some(15.0),
        activity_level: Some(ActivityLevel::VeryActive),
        ..BiometricInput::default()
    };
    let breakdown = composer::tdee(Metric::Tdee, BmrFormula::KatchMcArdle, &input, &config).unwrap();
    assert!((breakdown.tdee - 1838.8 * 1.725).abs() < 1e-6);
}

#[test]
fn test_macro_grams_use_energy_densities() {
    let config = NutritionConfig::default();
    let input = BiometricInput::default()
        .with_total_calories(2400.0)
        .with_macro_split(MacroSplit::new(30, 40, 30));
    let breakdown =
        composer::macros(Metric::Macros, BmrFormula::default(), &input, &config).unwrap();

    assert_eq!(breakdown.source, CalorieSource::Explicit);
    assert!((breakdown.protein.grams - 180.0).abs() < 1e-9);
    assert!((breakdown.carbs.grams - 240.0).abs() < 1e-9);
    assert!((breakdown.fat.grams - 80.0).abs() < 1e-9);
}

#[test]
fn test_surplus_toward_lower_goal_has_no_projection() {
    let config = NutritionConfig::default();
    let input = client().with_calorie_delta(300.0, Some(65.0));
    let plan = composer::calorie_plan(
        Metric::CalorieDeficitSurplus,
        BmrFormula::default(),
        &input,
        &config,
    )
    .unwrap();

    assert_eq!(plan.plan_type, PlanType::Surplus);
    assert!(plan.weeks_to_goal.is_none());
    assert!(plan.is_safe);
}

#[test]
fn test_maintenance_plan_has_zero_weekly_change() {
    let config = NutritionConfig::default();
    let input = client().with_calorie_delta(0.0, None);
    let plan = composer::calorie_plan(
        Metric::CalorieDeficitSurplus,
        BmrFormula::default(),
        &input,
        &config,
    )
    .unwrap();

    assert_eq!(plan.plan_type, PlanType::Maintenance);
    assert!(plan.weekly_change_kg.abs() < f64::EPSILON);
    assert!(plan.weeks_to_goal.is_none());
}

#[test]
fn test_female_floor_is_lower_than_male_floor() {
    let config = NutritionConfig::default();
    // Female BMR 1482.75, TDEE 1779.3; a 550 kcal deficit lands at 1229
    let input = BiometricInput::adult(70.0, 175.0, 30, Gender::Female)
        .with_activity(ActivityLevel::Sedentary)
        .with_calorie_delta(-550.0, None);
    let plan = composer::calorie_plan(
        Metric::CalorieDeficitSurplus,
        BmrFormula::default(),
        &input,
        &config,
    )
    .unwrap();

    assert!((plan.safety_floor - 1200.0).abs() < f64::EPSILON);
    assert!(plan.is_safe);
}

#[test]
fn test_metabolic_age_clamps_to_curve_start() {
    let config = NutritionConfig::default();
    // BMR above the reference body at every age on the curve
    let input = BiometricInput::adult(95.0, 190.0, 40, Gender::Male);
    let estimate = composer::metabolic_age(
        Metric::MetabolicAge,
        BmrFormula::default(),
        &input,
        &config,
    )
    .unwrap();

    assert_eq!(estimate.metabolic_age, config.metabolic_age.min_age);
}

#[test]
fn test_body_fat_breakdown_splits_weight() {
    let input = BiometricInput::adult(80.0, 180.0, 40, Gender::Male);
    let breakdown = composer::body_fat(Metric::BodyFat, BodyFatMethod::BmiBased, &input).unwrap();

    let fat = breakdown.fat_mass_kg.unwrap();
    let lean = breakdown.lean_mass_kg.unwrap();
    assert!((fat + lean - 80.0).abs() < 1e-9);
}

#[test]
fn test_lean_mass_regressions_stay_below_weight() {
    let input = BiometricInput::adult(75.0, 178.0, 35, Gender::Male);
    for formula in [LeanMassFormula::Boer, LeanMassFormula::Hume] {
        let breakdown = composer::lean_mass(Metric::LeanBodyMass, formula, &input).unwrap();
        assert!(breakdown.lean_mass_kg < 75.0);
        assert!(breakdown.lean_mass_percent > 50.0);
    }
}

#[test]
fn test_typed_input_is_range_checked() {
    let input = BiometricInput::adult(700.0, 175.0, 30, Gender::Male);
    let err = calculate_typed(&EngineConfig::default(), Metric::Bmi, None, &input).unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidInput);
}
