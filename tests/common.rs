// ABOUTME: Shared test utilities and input fixtures for integration tests
// ABOUTME: Provides quiet logging setup and raw client measurement builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrimetric Contributors
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `nutrimetric`
//!
//! This module provides common fixtures to reduce duplication across
//! integration tests.

use nutrimetric::config::EngineConfig;
use nutrimetric::engine::{calculate_with, CalculationRequest};
use nutrimetric::errors::EngineResult;
use nutrimetric::models::Metric;
use nutrimetric::results::MetricResult;
use nutrimetric::validation::RawBiometricInput;
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN, // Default to WARN for quiet tests
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// 30-year-old male, 70 kg, 175 cm, entered as form text
pub fn male_client() -> RawBiometricInput {
    RawBiometricInput {
        weight_kg: Some("70".into()),
        height_cm: Some("175".into()),
        age_years: Some("30".into()),
        gender: Some("male".into()),
        ..RawBiometricInput::default()
    }
}

/// 35-year-old female, 62 kg, 165 cm
pub fn female_client() -> RawBiometricInput {
    RawBiometricInput {
        weight_kg: Some(62.0.into()),
        height_cm: Some(165.0.into()),
        age_years: Some(35_u32.into()),
        gender: Some("female".into()),
        ..RawBiometricInput::default()
    }
}

/// Add an activity level to `input`
pub fn with_activity(input: RawBiometricInput, level: &str) -> RawBiometricInput {
    RawBiometricInput {
        activity_level: Some(level.into()),
        ..input
    }
}

/// Calculate with default configuration
pub fn run(metric: Metric, variant: Option<&str>, input: RawBiometricInput) -> EngineResult<MetricResult> {
    init_test_logging();
    let mut request = CalculationRequest::new(metric, input);
    request.variant = variant.map(str::to_owned);
    calculate_with(&EngineConfig::default(), &request)
}

/// Assert `actual` equals `expected` at display precision
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
