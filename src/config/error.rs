// ABOUTME: Configuration error types for engine configuration validation
// ABOUTME: Defines error variants for invalid ranges, bad weights and env parse failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrimetric Contributors

//! Configuration error types for engine configuration validation.

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Values out of order (e.g., activity factors not ascending)
    #[error("Invalid range: {0}")]
    InvalidRange(&'static str),

    /// Failed to parse an environment override
    #[error("Parse error: {0}")]
    Parse(String),

    /// Percentages don't sum to the required total
    #[error("Invalid weights: {0}")]
    InvalidWeights(String),

    /// Numeric value outside valid range for parameter
    #[error("Value out of range: {0}")]
    ValueOutOfRange(&'static str),
}
