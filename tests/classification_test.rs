// ABOUTME: Tests for classification band tables and value lookup
// ABOUTME: Table well-formedness, boundary ownership, clamping and gender requirements
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrimetric Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use nutrimetric::classification::{classify, lookup, validate_tables, BandTable};
use nutrimetric::errors::EngineError;
use nutrimetric::models::{Gender, Metric};
use proptest::prelude::*;

fn label(metric: Metric, value: f64, gender: Option<Gender>) -> &'static str {
    classify(metric, value, gender).unwrap().unwrap().label
}

#[test]
fn test_builtin_tables_are_well_formed() {
    validate_tables().unwrap();
}

#[test]
fn test_bmi_boundaries_belong_to_upper_band() {
    assert_eq!(label(Metric::Bmi, 18.4, None), "Underweight");
    assert_eq!(label(Metric::Bmi, 18.5, None), "Normal");
    assert_eq!(label(Metric::Bmi, 24.9, None), "Normal");
    assert_eq!(label(Metric::Bmi, 25.0, None), "Overweight");
    assert_eq!(label(Metric::Bmi, 30.0, None), "Obese Class I");
    assert_eq!(label(Metric::Bmi, 40.0, None), "Obese Class III");
}

#[test]
fn test_body_fat_bands_depend_on_gender() {
    assert_eq!(label(Metric::BodyFat, 20.0, Some(Gender::Male)), "Average");
    assert_eq!(label(Metric::BodyFat, 20.0, Some(Gender::Female)), "Athletes");
}

#[test]
fn test_gender_specific_table_without_gender_is_missing_input() {
    let err = classify(Metric::Whtr, 0.5, None).unwrap_err();
    assert_eq!(err, EngineError::missing(Metric::Whtr, "gender"));
}

#[test]
fn test_unclassified_metrics_have_no_category() {
    for metric in [Metric::Bmr, Metric::Tdee, Metric::Bsa, Metric::MetabolicAge] {
        assert!(classify(metric, 1.0, Some(Gender::Male)).unwrap().is_none());
        assert!(BandTable::for_metric(metric).is_none());
    }
}

#[test]
fn test_values_past_table_ends_are_clamped() {
    assert_eq!(label(Metric::Bmi, 95.0, None), "Obese Class III");
    assert_eq!(label(Metric::Ffmi, -1.0, None), "Below average");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn test_every_value_falls_in_exactly_one_band(value in 0.0f64..120.0) {
        for table in BandTable::ALL {
            for gender in [Gender::Male, Gender::Female] {
                let bands = table.bands(Some(gender)).unwrap();
                let containing = bands
                    .iter()
                    .filter(|band| value >= band.lower && value < band.upper)
                    .count();
                prop_assert_eq!(containing, 1, "table {} value {}", table.name(), value);

                let found = lookup(bands, value).unwrap();
                prop_assert!(value >= found.lower && value < found.upper);
            }
        }
    }

    #[test]
    fn test_bmi_category_is_monotonic(a in 10.0f64..60.0, b in 10.0f64..60.0) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let bands = BandTable::Bmi.bands(None).unwrap();
        let position = |value: f64| {
            let found = lookup(bands, value).unwrap();
            bands.iter().position(|band| band.label == found.label).unwrap()
        };
        prop_assert!(position(low) <= position(high));
    }
}
