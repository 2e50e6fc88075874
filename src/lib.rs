// ABOUTME: Main library entry point for the nutrimetric calculation engine
// ABOUTME: Biometric and nutrition metrics with validation, classification and formatting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrimetric Contributors

// Crate-level attributes:
// - deny(unsafe_code): Zero-tolerance unsafe policy
#![deny(unsafe_code)]

//! # Nutrimetric
//!
//! A calculation engine for the body-composition and nutrition metrics a
//! dietitian tracks for clients: BMI, BMR, TDEE, macro splits, ideal weight,
//! body fat, water and protein needs, calorie plans, waist ratios, lean mass,
//! FFMI, metabolic age and body surface area.
//!
//! ## Features
//!
//! - **Formula registry**: selectable variants per metric (Mifflin-St Jeor,
//!   Harris-Benedict, Katch-McArdle, Devine, Navy, Mosteller, ...)
//! - **Input validation**: raw form values are parsed, range-checked and
//!   cross-checked, with every violation reported at once
//! - **Composition**: derived metrics reuse their inputs' formulas
//! - **Classification**: category bands for BMI, body fat, WHR, `WHtR`, FFMI
//! - **Formatting**: fixed display precision, units and trend comparison
//!
//! ## Architecture
//!
//! - **Validation**: raw values to typed [`models::BiometricInput`]
//! - **Algorithms**: pure formula implementations and the variant registry
//! - **Composer**: TDEE, macros, calorie plans and other multi-stage metrics
//! - **Classification**: static band tables
//! - **Formatter**: rounding, units and per-metric result details
//! - **Engine**: the request pipeline tying the stages together
//!
//! ## Example Usage
//!
//! ```rust
//! use nutrimetric::config::EngineConfig;
//! use nutrimetric::engine::{calculate_with, CalculationRequest};
//! use nutrimetric::models::Metric;
//! use nutrimetric::validation::RawBiometricInput;
//!
//! let input = RawBiometricInput {
//!     weight_kg: Some("70".into()),
//!     height_cm: Some(175.0.into()),
//!     ..RawBiometricInput::default()
//! };
//! let request = CalculationRequest::new(Metric::Bmi, input);
//! let result = calculate_with(&EngineConfig::default(), &request)?;
//!
//! assert_eq!(result.category, Some("Normal"));
//! # Ok::<(), nutrimetric::errors::EngineError>(())
//! ```

/// Formula implementations and the per-metric variant registry
pub mod algorithms;

/// Category band tables and value classification
pub mod classification;

/// Multi-stage metrics built on other metrics
pub mod composer;

/// Engine configuration with environment overrides
pub mod config;

/// Physiological constants and input ranges
pub mod constants;

/// Calculation request pipeline
pub mod engine;

/// Error taxonomy with stable error codes
pub mod errors;

/// Rounding, units and result assembly
pub mod formatter;

/// Structured logging setup
pub mod logging;

/// Typed inputs, metrics and enumerations
pub mod models;

/// Calculation result shapes
pub mod results;

/// Raw input parsing and validation
pub mod validation;

pub use engine::{calculate, calculate_batch, calculate_typed, calculate_with, CalculationRequest};
pub use errors::{EngineError, EngineResult, ErrorCode};
pub use models::{ActivityLevel, BiometricInput, Gender, Metric};
pub use results::MetricResult;
