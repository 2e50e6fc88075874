// ABOUTME: Calculation entry points tying variant resolution, validation, computation and formatting
// ABOUTME: Single, typed and parallel batch evaluation of metric requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrimetric Contributors

//! # Calculation Engine
//!
//! One request flows through four stages:
//!
//! 1. resolve the formula variant for the metric
//! 2. validate the raw inputs the metric declares
//! 3. compute the metric (directly or through the composer)
//! 4. round, classify and attach secondary details
//!
//! Every stage is pure and requests share no mutable state, so batches are
//! evaluated in parallel.

use crate::algorithms::{self, anthropometric, expect_standard, intake, FormulaVariant};
use crate::composer;
use crate::config::EngineConfig;
use crate::errors::EngineResult;
use crate::formatter;
use crate::models::{BiometricInput, Metric};
use crate::results::MetricResult;
use crate::validation::{self, RawBiometricInput};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A single calculation request as received from a form or API call
///
/// Input fields are flattened into the request body:
///
/// ```json
/// { "metric": "bmi", "weight_kg": "70", "height_cm": 175 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Metric to calculate
    pub metric: Metric,
    /// Formula variant identifier; the metric's default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    /// Raw input values
    #[serde(flatten)]
    pub input: RawBiometricInput,
    /// Earlier value of the same metric for trend comparison
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_value: Option<f64>,
}

impl CalculationRequest {
    /// Request for `metric` with the default variant
    #[must_use]
    pub const fn new(metric: Metric, input: RawBiometricInput) -> Self {
        Self {
            metric,
            variant: None,
            input,
            previous_value: None,
        }
    }

    /// Select a formula variant
    #[must_use]
    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    /// Compare the result against an earlier value
    #[must_use]
    pub const fn with_previous_value(mut self, previous: f64) -> Self {
        self.previous_value = Some(previous);
        self
    }
}

/// Calculate one request with the process-wide configuration
///
/// # Errors
///
/// Returns the request's `EngineError` if the variant is unsupported or the
/// inputs fail validation
pub fn calculate(request: &CalculationRequest) -> EngineResult<MetricResult> {
    calculate_with(EngineConfig::global(), request)
}

/// Calculate one request with an explicit configuration
///
/// # Errors
///
/// Returns the request's `EngineError` if the variant is unsupported or the
/// inputs fail validation
pub fn calculate_with(config: &EngineConfig, request: &CalculationRequest) -> EngineResult<MetricResult> {
    let metric = request.metric;
    let variant = metric.parse_variant(request.variant.as_deref())?;
    let input = validation::validate(metric, variant, &request.input).inspect_err(|error| {
        debug!(metric = %metric, code = ?error.code(), fields = ?error.fields(), "Input rejected");
    })?;

    let mut result = evaluate(metric, variant, &input, config)?;
    if let Some(previous) = request.previous_value {
        result.comparison = Some(formatter::compare(metric, result.value, previous));
    }

    debug!(
        metric = %metric,
        method = result.method,
        value = result.value,
        "Calculation complete"
    );
    Ok(result)
}

/// Calculate from already-typed inputs, skipping raw-value parsing
///
/// The typed input still goes through range and consistency checks.
///
/// # Errors
///
/// Returns `EngineError::UnsupportedVariant`, `EngineError::MissingInput` or
/// `EngineError::Validation` as for [`calculate_with`]
pub fn calculate_typed(
    config: &EngineConfig,
    metric: Metric,
    variant: Option<&str>,
    input: &BiometricInput,
) -> EngineResult<MetricResult> {
    let request = CalculationRequest {
        metric,
        variant: variant.map(str::to_owned),
        input: RawBiometricInput::from(input),
        previous_value: None,
    };
    calculate_with(config, &request)
}

/// Calculate independent requests in parallel
///
/// Results keep the order of `requests`; one failing request does not
/// affect the others.
#[must_use]
pub fn calculate_batch(
    config: &EngineConfig,
    requests: &[CalculationRequest],
) -> Vec<EngineResult<MetricResult>> {
    debug!(requests = requests.len(), "Evaluating calculation batch");
    requests
        .par_iter()
        .map(|request| calculate_with(config, request))
        .collect()
}

/// Compute and format `metric` from validated inputs
fn evaluate(
    metric: Metric,
    variant: FormulaVariant,
    input: &BiometricInput,
    config: &EngineConfig,
) -> EngineResult<MetricResult> {
    let nutrition = &config.nutrition;
    match metric {
        Metric::Bmi => {
            expect_standard(metric, variant)?;
            let height = input.require_height(metric)?;
            formatter::bmi(anthropometric::bmi(input.require_weight(metric)?, height), height)
        }
        Metric::Bmr => {
            let formula = variant.bmr_formula(metric)?;
            let raw = formula.estimate(metric, input)?;
            Ok(formatter::bmr(formula, raw, input))
        }
        Metric::Tdee => {
            let formula = variant.bmr_formula(metric)?;
            let breakdown = composer::tdee(metric, formula, input, nutrition)?;
            Ok(formatter::tdee(formula, &breakdown))
        }
        Metric::Macros => {
            let formula = variant.bmr_formula(metric)?;
            let breakdown = composer::macros(metric, formula, input, nutrition)?;
            Ok(formatter::macros(formula, &breakdown))
        }
        Metric::IdealWeight => {
            let formula = variant.ideal_weight_formula(metric)?;
            let height = input.require_height(metric)?;
            let raw = formula.estimate(metric, height, input.require_gender(metric)?)?;
            Ok(formatter::ideal_weight(formula, raw, height, input.weight_kg))
        }
        Metric::BodyFat => {
            let breakdown = composer::body_fat(metric, variant.body_fat_method(metric)?, input)?;
            formatter::body_fat(&breakdown, input.gender)
        }
        Metric::WaterIntake => {
            expect_standard(metric, variant)?;
            let water = intake::water_intake(
                input.require_weight(metric)?,
                input.activity_level,
                &nutrition.hydration,
            );
            Ok(formatter::water_intake(&water))
        }
        Metric::ProteinNeeds => {
            expect_standard(metric, variant)?;
            let protein = intake::protein_needs(
                input.require_weight(metric)?,
                input.require_activity(metric)?,
                &nutrition.protein,
            );
            Ok(formatter::protein_needs(&protein))
        }
        Metric::CalorieDeficitSurplus => {
            let formula = variant.bmr_formula(metric)?;
            let plan = composer::calorie_plan(metric, formula, input, nutrition)?;
            Ok(formatter::calorie_plan(formula, &plan))
        }
        Metric::Whr | Metric::Whtr => {
            let raw = algorithms::compute(metric, variant, input, config)?;
            formatter::ratio(metric, raw, input.gender)
        }
        Metric::LeanBodyMass => {
            let formula = variant.lean_mass_formula(metric)?;
            let breakdown = composer::lean_mass(metric, formula, input)?;
            Ok(formatter::lean_mass(formula, &breakdown))
        }
        Metric::Ffmi => {
            expect_standard(metric, variant)?;
            formatter::ffmi(&composer::ffmi(metric, input)?)
        }
        Metric::MetabolicAge => {
            let formula = variant.bmr_formula(metric)?;
            let estimate = composer::metabolic_age(metric, formula, input, nutrition)?;
            Ok(formatter::metabolic_age(formula, &estimate))
        }
        Metric::Bsa => {
            let formula = variant.bsa_formula(metric)?;
            let raw = formula.estimate(input.require_weight(metric)?, input.require_height(metric)?);
            Ok(formatter::bsa(formula, raw))
        }
    }
}
