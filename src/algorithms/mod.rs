// ABOUTME: Formula registry mapping (metric, variant) pairs to pure calculation functions
// ABOUTME: Provides enum-based dispatch for BMR, ideal weight, body fat, lean mass and BSA formulas
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrimetric Contributors

//! Formula Registry
//!
//! Every metric owns a closed set of formula variants. Variants are enums, not
//! strings, so the set of valid (metric, variant) pairs is statically
//! enumerable: [`Metric::supported_variants`] lists them and
//! [`Metric::parse_variant`] is the only place a caller-supplied identifier is
//! turned into a [`FormulaVariant`].
//!
//! # Example
//!
//! ```rust
//! use nutrimetric::algorithms::{compute, FormulaVariant, BmrFormula};
//! use nutrimetric::config::EngineConfig;
//! use nutrimetric::models::{BiometricInput, Gender, Metric};
//!
//! let input = BiometricInput::adult(70.0, 175.0, 30, Gender::Male);
//! let variant = FormulaVariant::Bmr(BmrFormula::MifflinStJeor);
//! let bmr = compute(Metric::Bmr, variant, &input, &EngineConfig::default())?;
//! assert!((bmr - 1648.75).abs() < 1e-9);
//! # Ok::<(), nutrimetric::errors::EngineError>(())
//! ```

pub mod anthropometric;
pub mod bmr;
pub mod body_fat;
pub mod bsa;
pub mod ideal_weight;
pub mod intake;
pub mod lean_mass;

// Re-export formula types
pub use bmr::BmrFormula;
pub use body_fat::BodyFatMethod;
pub use bsa::BsaFormula;
pub use ideal_weight::IdealWeightFormula;
pub use lean_mass::LeanMassFormula;

use crate::composer;
use crate::config::EngineConfig;
use crate::errors::{EngineError, EngineResult};
use crate::models::{normalize_identifier, BiometricInput, Metric};
use serde::Serialize;

/// Variant name of metrics that have a single formula
pub const STANDARD: &str = "standard";

/// A formula selection for one metric
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum FormulaVariant {
    /// The metric has exactly one formula
    Standard,
    /// BMR formula, also used by metrics composed on top of BMR
    Bmr(BmrFormula),
    /// Ideal body weight formula
    IdealWeight(IdealWeightFormula),
    /// Body fat estimation method
    BodyFat(BodyFatMethod),
    /// Lean body mass formula
    LeanMass(LeanMassFormula),
    /// Body surface area formula
    Bsa(BsaFormula),
}

impl FormulaVariant {
    /// Get variant name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Standard => STANDARD,
            Self::Bmr(formula) => formula.name(),
            Self::IdealWeight(formula) => formula.name(),
            Self::BodyFat(method) => method.name(),
            Self::LeanMass(formula) => formula.name(),
            Self::Bsa(formula) => formula.name(),
        }
    }

    /// Get variant description
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Standard => "Single published formula",
            Self::Bmr(formula) => formula.description(),
            Self::IdealWeight(formula) => formula.description(),
            Self::BodyFat(method) => method.description(),
            Self::LeanMass(formula) => formula.description(),
            Self::Bsa(formula) => formula.description(),
        }
    }

    fn mismatch(self, metric: Metric) -> EngineError {
        EngineError::UnsupportedVariant {
            metric,
            variant: self.name().to_owned(),
        }
    }

    /// BMR formula for a BMR-based metric
    ///
    /// # Errors
    ///
    /// Returns `EngineError::UnsupportedVariant` if this is not a BMR variant
    pub fn bmr_formula(self, metric: Metric) -> EngineResult<BmrFormula> {
        match self {
            Self::Bmr(formula) => Ok(formula),
            other => Err(other.mismatch(metric)),
        }
    }

    /// Ideal weight formula
    ///
    /// # Errors
    ///
    /// Returns `EngineError::UnsupportedVariant` if this is not an ideal weight variant
    pub fn ideal_weight_formula(self, metric: Metric) -> EngineResult<IdealWeightFormula> {
        match self {
            Self::IdealWeight(formula) => Ok(formula),
            other => Err(other.mismatch(metric)),
        }
    }

    /// Body fat method
    ///
    /// # Errors
    ///
    /// Returns `EngineError::UnsupportedVariant` if this is not a body fat variant
    pub fn body_fat_method(self, metric: Metric) -> EngineResult<BodyFatMethod> {
        match self {
            Self::BodyFat(method) => Ok(method),
            other => Err(other.mismatch(metric)),
        }
    }

    /// Lean body mass formula
    ///
    /// # Errors
    ///
    /// Returns `EngineError::UnsupportedVariant` if this is not a lean mass variant
    pub fn lean_mass_formula(self, metric: Metric) -> EngineResult<LeanMassFormula> {
        match self {
            Self::LeanMass(formula) => Ok(formula),
            other => Err(other.mismatch(metric)),
        }
    }

    /// Body surface area formula
    ///
    /// # Errors
    ///
    /// Returns `EngineError::UnsupportedVariant` if this is not a BSA variant
    pub fn bsa_formula(self, metric: Metric) -> EngineResult<BsaFormula> {
        match self {
            Self::Bsa(formula) => Ok(formula),
            other => Err(other.mismatch(metric)),
        }
    }
}

impl Metric {
    /// Variant names accepted for this metric, default first
    #[must_use]
    pub const fn supported_variants(&self) -> &'static [&'static str] {
        match self {
            Self::Bmr | Self::Tdee | Self::Macros | Self::CalorieDeficitSurplus | Self::MetabolicAge => {
                BmrFormula::OPTIONS
            }
            Self::IdealWeight => IdealWeightFormula::OPTIONS,
            Self::BodyFat => BodyFatMethod::OPTIONS,
            Self::LeanBodyMass => LeanMassFormula::OPTIONS,
            Self::Bsa => BsaFormula::OPTIONS,
            Self::Bmi
            | Self::WaterIntake
            | Self::ProteinNeeds
            | Self::Whr
            | Self::Whtr
            | Self::Ffmi => &[STANDARD],
        }
    }

    /// Variant used when the caller selects none
    #[must_use]
    pub fn default_variant(&self) -> FormulaVariant {
        match self {
            Self::Bmr | Self::Tdee | Self::Macros | Self::CalorieDeficitSurplus | Self::MetabolicAge => {
                FormulaVariant::Bmr(BmrFormula::default())
            }
            Self::IdealWeight => FormulaVariant::IdealWeight(IdealWeightFormula::default()),
            Self::BodyFat => FormulaVariant::BodyFat(BodyFatMethod::default()),
            Self::LeanBodyMass => FormulaVariant::LeanMass(LeanMassFormula::default()),
            Self::Bsa => FormulaVariant::Bsa(BsaFormula::default()),
            Self::Bmi
            | Self::WaterIntake
            | Self::ProteinNeeds
            | Self::Whr
            | Self::Whtr
            | Self::Ffmi => FormulaVariant::Standard,
        }
    }

    /// Resolve a caller-supplied variant identifier
    ///
    /// `None` and blank identifiers select [`Metric::default_variant`].
    ///
    /// # Errors
    ///
    /// Returns `EngineError::UnsupportedVariant` if the identifier is not
    /// registered for this metric
    pub fn parse_variant(&self, raw: Option<&str>) -> EngineResult<FormulaVariant> {
        let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
            return Ok(self.default_variant());
        };

        match self.default_variant() {
            FormulaVariant::Standard => (normalize_identifier(raw) == STANDARD)
                .then_some(FormulaVariant::Standard)
                .ok_or_else(|| format!("{self} has a single formula")),
            FormulaVariant::Bmr(_) => raw.parse().map(FormulaVariant::Bmr),
            FormulaVariant::IdealWeight(_) => raw.parse().map(FormulaVariant::IdealWeight),
            FormulaVariant::BodyFat(_) => raw.parse().map(FormulaVariant::BodyFat),
            FormulaVariant::LeanMass(_) => raw.parse().map(FormulaVariant::LeanMass),
            FormulaVariant::Bsa(_) => raw.parse().map(FormulaVariant::Bsa),
        }
        .map_err(|_: String| EngineError::UnsupportedVariant {
            metric: *self,
            variant: raw.to_owned(),
        })
    }
}

/// Compute the unrounded primary value of `metric` with `variant`
///
/// Single-stage metrics are evaluated here directly; composite metrics
/// (TDEE, macros, calorie plan, metabolic age, body fat, lean mass, FFMI) are
/// delegated to the [`composer`]. For macros the primary value is the total
/// calorie budget being split.
///
/// # Errors
///
/// Returns `EngineError::UnsupportedVariant` if `variant` does not belong to
/// `metric`, `EngineError::MissingInput` if a required input is absent, or
/// `EngineError::Validation` if the inputs fall outside the formula's domain
pub fn compute(
    metric: Metric,
    variant: FormulaVariant,
    input: &BiometricInput,
    config: &EngineConfig,
) -> EngineResult<f64> {
    let nutrition = &config.nutrition;
    match metric {
        Metric::Bmi => {
            expect_standard(metric, variant)?;
            Ok(anthropometric::bmi(
                input.require_weight(metric)?,
                input.require_height(metric)?,
            ))
        }
        Metric::Bmr => variant.bmr_formula(metric)?.estimate(metric, input),
        Metric::Tdee => {
            composer::tdee(metric, variant.bmr_formula(metric)?, input, nutrition).map(|t| t.tdee)
        }
        Metric::Macros => composer::macros(metric, variant.bmr_formula(metric)?, input, nutrition)
            .map(|m| m.total_calories),
        Metric::IdealWeight => variant.ideal_weight_formula(metric)?.estimate(
            metric,
            input.require_height(metric)?,
            input.require_gender(metric)?,
        ),
        Metric::BodyFat => {
            composer::body_fat(metric, variant.body_fat_method(metric)?, input).map(|b| b.percent)
        }
        Metric::WaterIntake => {
            expect_standard(metric, variant)?;
            Ok(intake::water_intake(
                input.require_weight(metric)?,
                input.activity_level,
                &nutrition.hydration,
            )
            .liters)
        }
        Metric::ProteinNeeds => {
            expect_standard(metric, variant)?;
            Ok(intake::protein_needs(
                input.require_weight(metric)?,
                input.require_activity(metric)?,
                &nutrition.protein,
            )
            .recommended_grams)
        }
        Metric::CalorieDeficitSurplus => {
            composer::calorie_plan(metric, variant.bmr_formula(metric)?, input, nutrition)
                .map(|plan| plan.target_calories)
        }
        Metric::Whr => {
            expect_standard(metric, variant)?;
            Ok(anthropometric::waist_to_hip(
                input.require_circumference(metric, "waist_cm")?,
                input.require_circumference(metric, "hip_cm")?,
            ))
        }
        Metric::Whtr => {
            expect_standard(metric, variant)?;
            Ok(anthropometric::waist_to_height(
                input.require_circumference(metric, "waist_cm")?,
                input.require_height(metric)?,
            ))
        }
        Metric::LeanBodyMass => {
            composer::lean_mass(metric, variant.lean_mass_formula(metric)?, input)
                .map(|l| l.lean_mass_kg)
        }
        Metric::Ffmi => {
            expect_standard(metric, variant)?;
            composer::ffmi(metric, input).map(|f| f.normalized)
        }
        Metric::MetabolicAge => {
            composer::metabolic_age(metric, variant.bmr_formula(metric)?, input, nutrition)
                .map(|m| f64::from(m.metabolic_age))
        }
        Metric::Bsa => Ok(variant.bsa_formula(metric)?.estimate(
            input.require_weight(metric)?,
            input.require_height(metric)?,
        )),
    }
}

/// Reject formula-family variants for single-formula metrics
///
/// # Errors
///
/// Returns `EngineError::UnsupportedVariant` unless `variant` is `Standard`
pub fn expect_standard(metric: Metric, variant: FormulaVariant) -> EngineResult<()> {
    match variant {
        FormulaVariant::Standard => Ok(()),
        other => Err(other.mismatch(metric)),
    }
}
