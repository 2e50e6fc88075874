// ABOUTME: Classification band tables converting metric values into category labels
// ABOUTME: Ordered half-open threshold bands per metric and gender with a generic lookup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrimetric Contributors

//! Classification Tables
//!
//! Bands are data. Each table is an ordered list of half-open intervals
//! `[lower, upper)` that starts at 0 and ends at +∞ with no gaps. Lookup is
//! a linear scan; values below the first band or past the last are clamped
//! to the terminal band.
//!
//! # References
//!
//! - BMI: WHO Technical Report Series 894 (2000)
//! - Body fat: American Council on Exercise body fat categories
//! - WHR: WHO Expert Consultation on Waist Circumference and Waist-Hip Ratio (2008)
//! - `WHtR`: Ashwell, M. & Hsieh, S.D. (2005). *Int J Food Sci Nutr*, 56(5), 303-307.
//! - FFMI: Kouri, E.M. et al. (1995). *Clin J Sport Med*, 5(4), 223-228.

use crate::errors::{EngineError, EngineResult};
use crate::models::{Gender, Metric};
use serde::Serialize;
use thiserror::Error;

/// Upper bound of every terminal band
const UNBOUNDED: f64 = f64::INFINITY;

/// One half-open classification interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassificationBand {
    /// Inclusive lower bound
    pub lower: f64,
    /// Exclusive upper bound (+∞ for the terminal band)
    pub upper: f64,
    /// Category label
    pub label: &'static str,
    /// Human-readable description or risk statement
    pub description: &'static str,
}

const fn band(
    lower: f64,
    upper: f64,
    label: &'static str,
    description: &'static str,
) -> ClassificationBand {
    ClassificationBand {
        lower,
        upper,
        label,
        description,
    }
}

static BMI_BANDS: [ClassificationBand; 6] = [
    band(0.0, 18.5, "Underweight", "Below the healthy weight range"),
    band(18.5, 25.0, "Normal", "Within the healthy weight range"),
    band(25.0, 30.0, "Overweight", "Above the healthy weight range, increased risk"),
    band(30.0, 35.0, "Obese Class I", "Obesity with moderate health risk"),
    band(35.0, 40.0, "Obese Class II", "Obesity with severe health risk"),
    band(40.0, UNBOUNDED, "Obese Class III", "Obesity with very severe health risk"),
];

static BODY_FAT_MALE_BANDS: [ClassificationBand; 5] = [
    band(0.0, 6.0, "Essential fat", "Minimum fat needed for basic physiological function"),
    band(6.0, 14.0, "Athletes", "Typical of trained athletes"),
    band(14.0, 18.0, "Fitness", "Lean, physically fit range"),
    band(18.0, 25.0, "Average", "Typical of the general population"),
    band(25.0, UNBOUNDED, "Obese", "Excess body fat with increased health risk"),
];

static BODY_FAT_FEMALE_BANDS: [ClassificationBand; 5] = [
    band(0.0, 14.0, "Essential fat", "Minimum fat needed for basic physiological function"),
    band(14.0, 21.0, "Athletes", "Typical of trained athletes"),
    band(21.0, 25.0, "Fitness", "Lean, physically fit range"),
    band(25.0, 32.0, "Average", "Typical of the general population"),
    band(32.0, UNBOUNDED, "Obese", "Excess body fat with increased health risk"),
];

static WHR_MALE_BANDS: [ClassificationBand; 3] = [
    band(0.0, 0.90, "Low risk", "Low cardiometabolic risk from abdominal fat"),
    band(0.90, 1.0, "Moderate risk", "Moderately increased cardiometabolic risk"),
    band(1.0, UNBOUNDED, "High risk", "Substantially increased cardiometabolic risk"),
];

static WHR_FEMALE_BANDS: [ClassificationBand; 3] = [
    band(0.0, 0.80, "Low risk", "Low cardiometabolic risk from abdominal fat"),
    band(0.80, 0.85, "Moderate risk", "Moderately increased cardiometabolic risk"),
    band(0.85, UNBOUNDED, "High risk", "Substantially increased cardiometabolic risk"),
];

static WHTR_MALE_BANDS: [ClassificationBand; 6] = [
    band(0.0, 0.35, "Extremely slim", "Possible underweight, assess nutrition"),
    band(0.35, 0.43, "Slim", "Slim, low risk"),
    band(0.43, 0.53, "Healthy", "Healthy central fat distribution"),
    band(0.53, 0.58, "Overweight", "Increased central adiposity risk"),
    band(0.58, 0.63, "Very overweight", "High central adiposity risk"),
    band(0.63, UNBOUNDED, "Morbidly obese", "Very high central adiposity risk"),
];

static WHTR_FEMALE_BANDS: [ClassificationBand; 6] = [
    band(0.0, 0.35, "Extremely slim", "Possible underweight, assess nutrition"),
    band(0.35, 0.42, "Slim", "Slim, low risk"),
    band(0.42, 0.49, "Healthy", "Healthy central fat distribution"),
    band(0.49, 0.54, "Overweight", "Increased central adiposity risk"),
    band(0.54, 0.58, "Very overweight", "High central adiposity risk"),
    band(0.58, UNBOUNDED, "Morbidly obese", "Very high central adiposity risk"),
];

static FFMI_BANDS: [ClassificationBand; 6] = [
    band(0.0, 18.0, "Below average", "Lean mass below typical for height"),
    band(18.0, 20.0, "Average", "Typical lean mass for height"),
    band(20.0, 22.0, "Above average", "Above typical lean mass for height"),
    band(22.0, 23.0, "Excellent", "Well developed lean mass"),
    band(23.0, 26.0, "Superior", "Near the upper limit of natural development"),
    band(26.0, UNBOUNDED, "Exceeds natural range", "Above values commonly seen without pharmacological aid"),
];

/// Band tables, one per classified metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BandTable {
    /// WHO adult BMI categories
    Bmi,
    /// Body fat categories, gender-specific
    BodyFat,
    /// Waist-to-hip risk, gender-specific
    Whr,
    /// Waist-to-height categories, gender-specific
    Whtr,
    /// Fat-free mass index categories
    Ffmi,
}

impl BandTable {
    /// Every table
    pub const ALL: [Self; 5] = [Self::Bmi, Self::BodyFat, Self::Whr, Self::Whtr, Self::Ffmi];

    /// Table used to classify `metric`, if the metric is classified
    #[must_use]
    pub const fn for_metric(metric: Metric) -> Option<Self> {
        match metric {
            Metric::Bmi => Some(Self::Bmi),
            Metric::BodyFat => Some(Self::BodyFat),
            Metric::Whr => Some(Self::Whr),
            Metric::Whtr => Some(Self::Whtr),
            Metric::Ffmi => Some(Self::Ffmi),
            _ => None,
        }
    }

    /// Whether bands differ by gender
    #[must_use]
    pub const fn is_gender_specific(&self) -> bool {
        matches!(self, Self::BodyFat | Self::Whr | Self::Whtr)
    }

    /// Bands for `gender`; `None` selects the only table of a gender-neutral metric
    ///
    /// Returns `None` when the table is gender-specific and no gender is given.
    #[must_use]
    pub fn bands(&self, gender: Option<Gender>) -> Option<&'static [ClassificationBand]> {
        let bands: &'static [ClassificationBand] = match (self, gender) {
            (Self::Bmi, _) => &BMI_BANDS,
            (Self::Ffmi, _) => &FFMI_BANDS,
            (Self::BodyFat, Some(Gender::Male)) => &BODY_FAT_MALE_BANDS,
            (Self::BodyFat, Some(Gender::Female)) => &BODY_FAT_FEMALE_BANDS,
            (Self::Whr, Some(Gender::Male)) => &WHR_MALE_BANDS,
            (Self::Whr, Some(Gender::Female)) => &WHR_FEMALE_BANDS,
            (Self::Whtr, Some(Gender::Male)) => &WHTR_MALE_BANDS,
            (Self::Whtr, Some(Gender::Female)) => &WHTR_FEMALE_BANDS,
            (Self::BodyFat | Self::Whr | Self::Whtr, None) => return None,
        };
        Some(bands)
    }

    /// Table name for diagnostics
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Bmi => "bmi",
            Self::BodyFat => "body_fat",
            Self::Whr => "whr",
            Self::Whtr => "whtr",
            Self::Ffmi => "ffmi",
        }
    }
}

/// Category assigned to a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// Category label
    pub label: &'static str,
    /// Description or risk statement
    pub description: &'static str,
}

impl From<&ClassificationBand> for Classification {
    fn from(band: &ClassificationBand) -> Self {
        Self {
            label: band.label,
            description: band.description,
        }
    }
}

/// Find the band containing `value`, clamping to the terminal bands
///
/// Returns `None` only for an empty band list.
#[must_use]
pub fn lookup(bands: &[ClassificationBand], value: f64) -> Option<&ClassificationBand> {
    let first = bands.first()?;
    if value < first.lower {
        return Some(first);
    }
    bands
        .iter()
        .find(|band| band.lower <= value && value < band.upper)
        .or_else(|| bands.last())
}

/// Classify `value` for `metric`
///
/// Returns `Ok(None)` for metrics without a band table.
///
/// # Errors
///
/// Returns `EngineError::MissingInput` for gender-specific tables when
/// `gender` is `None`
pub fn classify(
    metric: Metric,
    value: f64,
    gender: Option<Gender>,
) -> EngineResult<Option<Classification>> {
    let Some(table) = BandTable::for_metric(metric) else {
        return Ok(None);
    };
    let bands = table
        .bands(gender)
        .ok_or_else(|| EngineError::missing(metric, "gender"))?;
    Ok(lookup(bands, value).map(Classification::from))
}

/// Structural defect found in a band table
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BandTableError {
    /// The table has no bands
    #[error("{table} table is empty")]
    Empty {
        /// Table name
        table: &'static str,
    },
    /// The first band does not start at zero
    #[error("{table} table does not start at 0")]
    DoesNotStartAtZero {
        /// Table name
        table: &'static str,
    },
    /// A band is empty or inverted
    #[error("{table} band '{label}' has lower bound not below upper bound")]
    EmptyBand {
        /// Table name
        table: &'static str,
        /// Band label
        label: &'static str,
    },
    /// Two adjacent bands leave a gap or overlap
    #[error("{table} band '{label}' does not start where the previous band ends")]
    NotContiguous {
        /// Table name
        table: &'static str,
        /// Band label
        label: &'static str,
    },
    /// The terminal band is bounded
    #[error("{table} table does not extend to infinity")]
    Bounded {
        /// Table name
        table: &'static str,
    },
}

fn validate_bands(table: &'static str, bands: &[ClassificationBand]) -> Result<(), BandTableError> {
    let (Some(first), Some(last)) = (bands.first(), bands.last()) else {
        return Err(BandTableError::Empty { table });
    };
    if first.lower.total_cmp(&0.0).is_ne() {
        return Err(BandTableError::DoesNotStartAtZero { table });
    }
    if let Some(band) = bands.iter().find(|band| band.lower >= band.upper) {
        return Err(BandTableError::EmptyBand {
            table,
            label: band.label,
        });
    }
    if let Some(pair) = bands.windows(2).find(|pair| pair[0].upper.total_cmp(&pair[1].lower).is_ne()) {
        return Err(BandTableError::NotContiguous {
            table,
            label: pair[1].label,
        });
    }
    if last.upper.is_finite() {
        return Err(BandTableError::Bounded { table });
    }
    Ok(())
}

/// Check every table is ordered, contiguous, starts at 0 and ends at +∞
///
/// # Errors
///
/// Returns the first `BandTableError` found
pub fn validate_tables() -> Result<(), BandTableError> {
    for table in BandTable::ALL {
        for gender in [Some(Gender::Male), Some(Gender::Female)] {
            if let Some(bands) = table.bands(gender) {
                validate_bands(table.name(), bands)?;
            }
        }
    }
    Ok(())
}
