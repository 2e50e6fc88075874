// ABOUTME: Tests for engine configuration loading from environment overrides
// ABOUTME: Validates override parsing, validation failures and effect on calculations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrimetric Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use common::{assert_close, male_client, with_activity};
use nutrimetric::config::{ConfigError, EngineConfig};
use nutrimetric::engine::{calculate_with, CalculationRequest};
use nutrimetric::logging::{LogFormat, LoggingConfig};
use nutrimetric::models::{MacroSplit, Metric};
use serial_test::serial;
use std::env;

mod common;

const OVERRIDES: [&str; 9] = [
    "NUTRIMETRIC_ACTIVITY_SEDENTARY",
    "NUTRIMETRIC_ACTIVITY_VERY_ACTIVE",
    "NUTRIMETRIC_WATER_GLASS_ML",
    "NUTRIMETRIC_SAFETY_FLOOR_FEMALE",
    "NUTRIMETRIC_SAFETY_FLOOR_MALE",
    "NUTRIMETRIC_MACRO_PROTEIN_PERCENT",
    "NUTRIMETRIC_MACRO_CARB_PERCENT",
    "NUTRIMETRIC_WATER_ML_PER_KG",
    "NUTRIMETRIC_METABOLIC_AGE_MIN",
];

fn clear_overrides() {
    for name in OVERRIDES {
        env::remove_var(name);
    }
}

#[test]
#[serial]
fn test_load_without_overrides_matches_defaults() {
    clear_overrides();
    assert_eq!(EngineConfig::load().unwrap(), EngineConfig::default());
}

#[test]
#[serial]
fn test_overrides_change_calculations() {
    clear_overrides();
    env::set_var("NUTRIMETRIC_ACTIVITY_SEDENTARY", "1.3");
    env::set_var("NUTRIMETRIC_SAFETY_FLOOR_MALE", " 1400 ");
    let config = EngineConfig::load().unwrap();
    clear_overrides();

    assert_close(config.nutrition.activity_factors.sedentary, 1.3);
    assert_close(config.nutrition.safety_floor.male_kcal, 1400.0);

    // 1648.75 * 1.3 = 2143.375
    let request = CalculationRequest::new(Metric::Tdee, with_activity(male_client(), "sedentary"));
    let result = calculate_with(&config, &request).unwrap();
    assert_close(result.value, 2143.0);
}

#[test]
#[serial]
fn test_unparsable_override_is_rejected() {
    clear_overrides();
    env::set_var("NUTRIMETRIC_WATER_ML_PER_KG", "lots");
    let result = EngineConfig::load();
    clear_overrides();

    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
#[serial]
fn test_non_finite_overrides_fail_validation() {
    // f64::from_str accepts these spellings, so validation must catch them
    let cases = [
        ("NUTRIMETRIC_SAFETY_FLOOR_MALE", "NaN"),
        ("NUTRIMETRIC_SAFETY_FLOOR_FEMALE", "inf"),
        ("NUTRIMETRIC_WATER_ML_PER_KG", "NaN"),
        ("NUTRIMETRIC_WATER_GLASS_ML", "infinity"),
        ("NUTRIMETRIC_ACTIVITY_VERY_ACTIVE", "NaN"),
    ];

    for (name, value) in cases {
        clear_overrides();
        env::set_var(name, value);
        let result = EngineConfig::load();
        clear_overrides();

        assert!(result.is_err(), "{name}={value} should be rejected");
    }
}

#[test]
#[serial]
fn test_macro_override_must_keep_split_complete() {
    clear_overrides();
    env::set_var("NUTRIMETRIC_MACRO_PROTEIN_PERCENT", "30");
    let result = EngineConfig::load();
    clear_overrides();

    assert!(matches!(result, Err(ConfigError::InvalidWeights(_))));

    env::set_var("NUTRIMETRIC_MACRO_PROTEIN_PERCENT", "30");
    env::set_var("NUTRIMETRIC_MACRO_CARB_PERCENT", "40");
    let config = EngineConfig::load().unwrap();
    clear_overrides();

    assert_eq!(config.nutrition.default_macro_split, MacroSplit::new(30, 40, 30));
}

#[test]
#[serial]
fn test_out_of_order_activity_factors_fail_validation() {
    clear_overrides();
    env::set_var("NUTRIMETRIC_ACTIVITY_SEDENTARY", "1.5");
    let result = EngineConfig::load();
    clear_overrides();

    assert!(matches!(result, Err(ConfigError::InvalidRange(_))));
}

#[test]
#[serial]
fn test_metabolic_age_curve_bounds_are_validated() {
    clear_overrides();
    env::set_var("NUTRIMETRIC_METABOLIC_AGE_MIN", "0");
    let result = EngineConfig::load();
    clear_overrides();

    assert!(result.is_err());
}

#[test]
#[serial]
fn test_logging_config_from_env() {
    env::set_var("LOG_FORMAT", "json");
    env::set_var("SERVICE_NAME", "nutrimetric-test");
    let config = LoggingConfig::from_env();
    env::remove_var("LOG_FORMAT");
    env::remove_var("SERVICE_NAME");

    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.service_name, "nutrimetric-test");
}
