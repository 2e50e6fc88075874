// ABOUTME: Error taxonomy for the calculation engine with stable error codes
// ABOUTME: Validation, missing-input and unsupported-variant failures with per-field detail
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrimetric Contributors

//! # Engine Error Handling
//!
//! Every failure the engine can produce is local to one calculation request and
//! is returned, never thrown. Errors carry the metric, the offending field(s) and
//! a machine-readable reason so the caller can render an actionable message.
//!
//! Three kinds exist:
//! - [`EngineError::Validation`] - a value could not be parsed, is out of range,
//!   or is inconsistent with another value
//! - [`EngineError::MissingInput`] - a field required by the chosen
//!   metric/variant/gender combination is absent
//! - [`EngineError::UnsupportedVariant`] - the formula variant is not registered
//!   for the metric

use crate::models::Metric;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes exposed to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    /// At least one field failed parsing, range or consistency checks
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput,
    /// A required field is absent
    #[serde(rename = "MISSING_REQUIRED_FIELD")]
    MissingRequiredField,
    /// The formula variant is not registered for the metric
    #[serde(rename = "UNSUPPORTED_VARIANT")]
    UnsupportedVariant,
}

impl ErrorCode {
    /// HTTP status a surrounding service should answer with
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            Self::InvalidInput | Self::MissingRequiredField | Self::UnsupportedVariant => 400,
        }
    }

    /// User-friendly description of this error code
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "One or more values are invalid",
            Self::MissingRequiredField => "A required measurement is missing",
            Self::UnsupportedVariant => "The requested formula is not available for this metric",
        }
    }
}

/// Why a single field was rejected
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViolationKind {
    /// The raw value is not a number
    Unparsable {
        /// Raw text received
        raw: String,
    },
    /// The value is not a whole number where one is required
    NotAnInteger {
        /// Value received
        value: f64,
    },
    /// The value lies outside the accepted range
    OutOfRange {
        /// Value received
        value: f64,
        /// Lowest accepted value
        min: f64,
        /// Highest accepted value
        max: f64,
        /// Whether `min` itself is rejected
        min_exclusive: bool,
    },
    /// The raw value does not name one of the accepted options
    UnknownOption {
        /// Raw text received
        raw: String,
        /// Accepted option names
        expected: &'static [&'static str],
    },
    /// The field is required but absent
    Missing,
    /// The value contradicts another value or the formula's domain
    Inconsistent {
        /// Human-readable explanation
        detail: String,
    },
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unparsable { raw } => write!(f, "'{raw}' is not a number"),
            Self::NotAnInteger { value } => write!(f, "{value} must be a whole number"),
            Self::OutOfRange {
                value,
                min,
                max,
                min_exclusive,
            } => {
                if *min_exclusive {
                    write!(f, "{value} must be greater than {min} and at most {max}")
                } else {
                    write!(f, "{value} must be between {min} and {max}")
                }
            }
            Self::UnknownOption { raw, expected } => {
                write!(f, "'{raw}' is not one of: {}", expected.join(", "))
            }
            Self::Missing => f.write_str("is required"),
            Self::Inconsistent { detail } => f.write_str(detail),
        }
    }
}

/// One rejected field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldViolation {
    /// Input field name (e.g. `hip_cm`)
    pub field: &'static str,
    /// Reason for the rejection
    pub reason: ViolationKind,
}

impl FieldViolation {
    /// Create a violation for `field`
    #[must_use]
    pub const fn new(field: &'static str, reason: ViolationKind) -> Self {
        Self { field, reason }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.reason)
    }
}

/// Failure of a single calculation request
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// One or more fields failed parsing, range or consistency checks
    #[error("invalid input for {metric}: {}", join_violations(.violations))]
    Validation {
        /// Metric being calculated
        metric: Metric,
        /// Every violation found, in field order
        violations: Vec<FieldViolation>,
    },

    /// Required fields are absent
    #[error("missing required input for {metric}: {}", .fields.join(", "))]
    MissingInput {
        /// Metric being calculated
        metric: Metric,
        /// Every missing field, in field order
        fields: Vec<&'static str>,
    },

    /// The variant identifier is not registered for the metric
    #[error("unsupported variant '{variant}' for {metric}; supported: {}", .metric.supported_variants().join(", "))]
    UnsupportedVariant {
        /// Metric being calculated
        metric: Metric,
        /// Variant identifier received
        variant: String,
    },
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl EngineError {
    /// Single missing field
    #[must_use]
    pub fn missing(metric: Metric, field: &'static str) -> Self {
        Self::MissingInput {
            metric,
            fields: vec![field],
        }
    }

    /// Single field whose value falls outside the formula's domain
    #[must_use]
    pub fn inconsistent(metric: Metric, field: &'static str, detail: impl Into<String>) -> Self {
        Self::Validation {
            metric,
            violations: vec![FieldViolation::new(
                field,
                ViolationKind::Inconsistent {
                    detail: detail.into(),
                },
            )],
        }
    }

    /// Error code for this failure
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Validation { .. } => ErrorCode::InvalidInput,
            Self::MissingInput { .. } => ErrorCode::MissingRequiredField,
            Self::UnsupportedVariant { .. } => ErrorCode::UnsupportedVariant,
        }
    }

    /// Metric the failing request targeted
    #[must_use]
    pub const fn metric(&self) -> Metric {
        match self {
            Self::Validation { metric, .. }
            | Self::MissingInput { metric, .. }
            | Self::UnsupportedVariant { metric, .. } => *metric,
        }
    }

    /// Names of every field involved in the failure
    #[must_use]
    pub fn fields(&self) -> Vec<&'static str> {
        match self {
            Self::Validation { violations, .. } => violations.iter().map(|v| v.field).collect(),
            Self::MissingInput { fields, .. } => fields.clone(),
            Self::UnsupportedVariant { .. } => vec!["variant"],
        }
    }
}

/// Serializable error body for callers that render errors as JSON
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error payload
    pub error: ErrorResponseDetails,
}

/// Error payload details
#[derive(Debug, Serialize)]
pub struct ErrorResponseDetails {
    /// Stable error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Metric the request targeted
    pub metric: Metric,
    /// Per-field violations (empty for unsupported variants)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<FieldViolation>,
}

impl From<&EngineError> for ErrorResponse {
    fn from(error: &EngineError) -> Self {
        let violations = match error {
            EngineError::Validation { violations, .. } => violations.clone(),
            EngineError::MissingInput { fields, .. } => fields
                .iter()
                .copied()
                .map(|field| FieldViolation::new(field, ViolationKind::Missing))
                .collect(),
            EngineError::UnsupportedVariant { .. } => Vec::new(),
        };

        Self {
            error: ErrorResponseDetails {
                code: error.code(),
                message: error.to_string(),
                metric: error.metric(),
                violations,
            },
        }
    }
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
