// ABOUTME: Input validation normalizing raw form values into typed, range-checked inputs
// ABOUTME: Resolves required fields per metric and variant and reports every violation at once
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrimetric Contributors

//! Input Validator
//!
//! Form values arrive as JSON numbers or strings. The validator decides which
//! fields the (metric, variant, gender) combination needs, parses and
//! range-checks only those, and collects every violation in a single pass.
//!
//! Error precedence: if any field is unparsable, out of range or
//! inconsistent, the result is `EngineError::Validation` and missing fields
//! appear in it as `Missing` violations. If the only problems are absent
//! fields, the result is `EngineError::MissingInput` listing all of them.

use crate::algorithms::{BmrFormula, BodyFatMethod, FormulaVariant, LeanMassFormula};
use crate::constants::ranges;
use crate::errors::{EngineError, EngineResult, FieldViolation, ViolationKind};
use crate::models::{ActivityLevel, BiometricInput, Gender, MacroSplit, Metric};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A raw form value: a JSON number or the text typed into a field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// Numeric value
    Number(f64),
    /// Text value; blank text counts as absent
    Text(String),
}

impl RawValue {
    /// Text form of the value with surrounding whitespace removed
    fn text(&self) -> String {
        match self {
            Self::Number(number) => number.to_string(),
            Self::Text(text) => text.trim().to_owned(),
        }
    }

    /// Whether the value carries no information
    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(text) if text.trim().is_empty())
    }

    /// Parse as a finite number, accepting a decimal comma
    fn number(&self) -> Result<f64, ViolationKind> {
        let parsed = match self {
            Self::Number(number) => Some(*number),
            Self::Text(text) => {
                let text = text.trim();
                let normalized = if text.contains('.') {
                    text.to_owned()
                } else {
                    text.replacen(',', ".", 1)
                };
                normalized.parse::<f64>().ok()
            }
        };
        parsed
            .filter(|number| number.is_finite())
            .ok_or_else(|| ViolationKind::Unparsable { raw: self.text() })
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<u32> for RawValue {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// Unvalidated calculation inputs as gathered from form fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawBiometricInput {
    /// Body weight (kg)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<RawValue>,
    /// Height (cm)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<RawValue>,
    /// Age (whole years)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_years: Option<RawValue>,
    /// `male` / `female`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<RawValue>,
    /// Activity level name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<RawValue>,
    /// Neck circumference (cm)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neck_cm: Option<RawValue>,
    /// Waist circumference (cm)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waist_cm: Option<RawValue>,
    /// Hip circumference (cm)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hip_cm: Option<RawValue>,
    /// Measured body fat (%)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_fat_percent: Option<RawValue>,
    /// Protein share of calories (whole %)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein_percent: Option<RawValue>,
    /// Carbohydrate share of calories (whole %)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carb_percent: Option<RawValue>,
    /// Fat share of calories (whole %)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat_percent: Option<RawValue>,
    /// Explicit calorie budget (kcal/day)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_calories: Option<RawValue>,
    /// Daily calorie change (kcal/day, negative = deficit)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_calorie_delta: Option<RawValue>,
    /// Goal weight (kg)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_weight_kg: Option<RawValue>,
}

impl From<&BiometricInput> for RawBiometricInput {
    fn from(input: &BiometricInput) -> Self {
        let number = |value: Option<f64>| value.map(RawValue::Number);
        let split = input.macro_split;
        Self {
            weight_kg: number(input.weight_kg),
            height_cm: number(input.height_cm),
            age_years: input.age_years.map(RawValue::from),
            gender: input.gender.map(|gender| RawValue::from(gender.name())),
            activity_level: input.activity_level.map(|level| RawValue::from(level.name())),
            neck_cm: number(input.neck_cm),
            waist_cm: number(input.waist_cm),
            hip_cm: number(input.hip_cm),
            body_fat_percent: number(input.body_fat_percent),
            protein_percent: split.map(|s| RawValue::from(s.protein_percent)),
            carb_percent: split.map(|s| RawValue::from(s.carb_percent)),
            fat_percent: split.map(|s| RawValue::from(s.fat_percent)),
            total_calories: number(input.total_calories),
            daily_calorie_delta: number(input.daily_calorie_delta),
            target_weight_kg: number(input.target_weight_kg),
        }
    }
}

/// Input fields, in reporting order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Field {
    WeightKg,
    HeightCm,
    AgeYears,
    Gender,
    ActivityLevel,
    NeckCm,
    WaistCm,
    HipCm,
    BodyFatPercent,
    ProteinPercent,
    CarbPercent,
    FatPercent,
    TotalCalories,
    DailyCalorieDelta,
    TargetWeightKg,
}

/// How a field's value is checked
enum FieldKind {
    /// Decimal within `(min, max]` or `[min, max]`
    Decimal {
        range: (f64, f64),
        min_exclusive: bool,
    },
    /// Whole number within `[min, max]`
    Integer { range: (f64, f64) },
    /// One of the gender names
    Gender,
    /// One of the activity level names
    Activity,
}

impl Field {
    const fn name(self) -> &'static str {
        match self {
            Self::WeightKg => "weight_kg",
            Self::HeightCm => "height_cm",
            Self::AgeYears => "age_years",
            Self::Gender => "gender",
            Self::ActivityLevel => "activity_level",
            Self::NeckCm => "neck_cm",
            Self::WaistCm => "waist_cm",
            Self::HipCm => "hip_cm",
            Self::BodyFatPercent => "body_fat_percent",
            Self::ProteinPercent => "protein_percent",
            Self::CarbPercent => "carb_percent",
            Self::FatPercent => "fat_percent",
            Self::TotalCalories => "total_calories",
            Self::DailyCalorieDelta => "daily_calorie_delta",
            Self::TargetWeightKg => "target_weight_kg",
        }
    }

    const fn kind(self) -> FieldKind {
        const fn exclusive(range: (f64, f64)) -> FieldKind {
            FieldKind::Decimal {
                range,
                min_exclusive: true,
            }
        }
        const fn inclusive(range: (f64, f64)) -> FieldKind {
            FieldKind::Decimal {
                range,
                min_exclusive: false,
            }
        }

        match self {
            Self::WeightKg | Self::TargetWeightKg => exclusive(ranges::WEIGHT_KG),
            Self::HeightCm => exclusive(ranges::HEIGHT_CM),
            Self::NeckCm | Self::WaistCm | Self::HipCm => exclusive(ranges::CIRCUMFERENCE_CM),
            Self::TotalCalories => exclusive(ranges::TOTAL_CALORIES),
            Self::BodyFatPercent => inclusive(ranges::BODY_FAT_PERCENT),
            Self::DailyCalorieDelta => inclusive(ranges::DAILY_CALORIE_DELTA),
            Self::AgeYears => FieldKind::Integer {
                range: ranges::AGE_YEARS,
            },
            Self::ProteinPercent | Self::CarbPercent | Self::FatPercent => FieldKind::Integer {
                range: ranges::MACRO_PERCENT,
            },
            Self::Gender => FieldKind::Gender,
            Self::ActivityLevel => FieldKind::Activity,
        }
    }

    fn raw(self, input: &RawBiometricInput) -> Option<&RawValue> {
        let value = match self {
            Self::WeightKg => &input.weight_kg,
            Self::HeightCm => &input.height_cm,
            Self::AgeYears => &input.age_years,
            Self::Gender => &input.gender,
            Self::ActivityLevel => &input.activity_level,
            Self::NeckCm => &input.neck_cm,
            Self::WaistCm => &input.waist_cm,
            Self::HipCm => &input.hip_cm,
            Self::BodyFatPercent => &input.body_fat_percent,
            Self::ProteinPercent => &input.protein_percent,
            Self::CarbPercent => &input.carb_percent,
            Self::FatPercent => &input.fat_percent,
            Self::TotalCalories => &input.total_calories,
            Self::DailyCalorieDelta => &input.daily_calorie_delta,
            Self::TargetWeightKg => &input.target_weight_kg,
        };
        value.as_ref().filter(|raw| !raw.is_blank())
    }
}

/// Whether a declared field must be present
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Need {
    Optional,
    Required,
}

/// Fields a calculation declares, in reporting order
#[derive(Default)]
struct FieldPlan(BTreeMap<Field, Need>);

impl FieldPlan {
    fn require(&mut self, fields: &[Field]) -> &mut Self {
        for field in fields {
            self.0.insert(*field, Need::Required);
        }
        self
    }

    fn allow(&mut self, fields: &[Field]) -> &mut Self {
        for field in fields {
            self.0.entry(*field).or_insert(Need::Optional);
        }
        self
    }

    fn declares(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }
}

const BMR_SUBJECT: &[Field] = &[Field::WeightKg, Field::HeightCm, Field::AgeYears, Field::Gender];
const LEAN_MASS_SUBJECT: &[Field] = &[Field::WeightKg, Field::BodyFatPercent];
const MACRO_PERCENTS: &[Field] = &[Field::ProteinPercent, Field::CarbPercent, Field::FatPercent];

const fn bmr_fields(formula: BmrFormula) -> &'static [Field] {
    if formula.uses_lean_mass() {
        LEAN_MASS_SUBJECT
    } else {
        BMR_SUBJECT
    }
}

fn bmr_formula(variant: FormulaVariant) -> BmrFormula {
    match variant {
        FormulaVariant::Bmr(formula) => formula,
        _ => BmrFormula::default(),
    }
}

/// Resolve which fields `metric` with `variant` needs
///
/// `gender` is the already-parsed gender, used where a gender changes the
/// field set (the female Navy method also needs the hip).
fn plan_fields(
    metric: Metric,
    variant: FormulaVariant,
    gender: Option<Gender>,
    raw: &RawBiometricInput,
) -> FieldPlan {
    let mut plan = FieldPlan::default();
    match metric {
        Metric::Bmi | Metric::Bsa => {
            plan.require(&[Field::WeightKg, Field::HeightCm]);
        }
        Metric::Bmr => {
            plan.require(bmr_fields(bmr_formula(variant)));
        }
        Metric::Tdee => {
            plan.require(bmr_fields(bmr_formula(variant)))
                .require(&[Field::ActivityLevel]);
        }
        Metric::Macros => {
            if Field::TotalCalories.raw(raw).is_some() {
                plan.require(&[Field::TotalCalories]);
            } else {
                plan.require(bmr_fields(bmr_formula(variant)))
                    .require(&[Field::ActivityLevel]);
            }
            if MACRO_PERCENTS.iter().any(|field| field.raw(raw).is_some()) {
                plan.require(MACRO_PERCENTS);
            }
        }
        Metric::IdealWeight => {
            plan.require(&[Field::HeightCm, Field::Gender])
                .allow(&[Field::WeightKg]);
        }
        Metric::BodyFat => match variant {
            FormulaVariant::BodyFat(BodyFatMethod::BmiBased) => {
                plan.require(BMR_SUBJECT);
            }
            FormulaVariant::BodyFat(BodyFatMethod::Skinfold) => {
                plan.require(&[Field::BodyFatPercent, Field::Gender])
                    .allow(&[Field::WeightKg]);
            }
            _ => {
                plan.require(&[Field::HeightCm, Field::Gender, Field::NeckCm, Field::WaistCm])
                    .allow(&[Field::WeightKg]);
                if gender == Some(Gender::Female) {
                    plan.require(&[Field::HipCm]);
                }
            }
        },
        Metric::WaterIntake => {
            plan.require(&[Field::WeightKg])
                .allow(&[Field::ActivityLevel]);
        }
        Metric::ProteinNeeds => {
            plan.require(&[Field::WeightKg, Field::ActivityLevel]);
        }
        Metric::CalorieDeficitSurplus => {
            plan.require(bmr_fields(bmr_formula(variant)))
                .require(&[Field::ActivityLevel, Field::Gender, Field::DailyCalorieDelta])
                .allow(&[Field::WeightKg, Field::TargetWeightKg]);
        }
        Metric::Whr => {
            plan.require(&[Field::WaistCm, Field::HipCm, Field::Gender]);
        }
        Metric::Whtr => {
            plan.require(&[Field::WaistCm, Field::HeightCm, Field::Gender]);
        }
        Metric::LeanBodyMass => match variant {
            FormulaVariant::LeanMass(formula) if !formula.needs_body_fat() => {
                plan.require(&[Field::WeightKg, Field::HeightCm, Field::Gender]);
            }
            _ => {
                plan.require(LEAN_MASS_SUBJECT);
            }
        },
        Metric::Ffmi => {
            plan.require(&[Field::WeightKg, Field::HeightCm, Field::BodyFatPercent]);
        }
        Metric::MetabolicAge => {
            plan.require(bmr_fields(bmr_formula(variant)))
                .require(&[Field::AgeYears, Field::Gender]);
        }
    }
    plan
}

/// A successfully parsed field value
#[derive(Clone, Copy)]
enum Parsed {
    Number(f64),
    Gender(Gender),
    Activity(ActivityLevel),
}

fn parse_field(field: Field, raw: &RawValue) -> Result<Parsed, ViolationKind> {
    match field.kind() {
        FieldKind::Gender => raw
            .text()
            .parse()
            .map(Parsed::Gender)
            .map_err(|_| ViolationKind::UnknownOption {
                raw: raw.text(),
                expected: Gender::OPTIONS,
            }),
        FieldKind::Activity => raw
            .text()
            .parse()
            .map(Parsed::Activity)
            .map_err(|_| ViolationKind::UnknownOption {
                raw: raw.text(),
                expected: ActivityLevel::OPTIONS,
            }),
        FieldKind::Decimal {
            range: (min, max),
            min_exclusive,
        } => {
            let value = raw.number()?;
            let above_min = if min_exclusive { value > min } else { value >= min };
            if above_min && value <= max {
                Ok(Parsed::Number(value))
            } else {
                Err(ViolationKind::OutOfRange {
                    value,
                    min,
                    max,
                    min_exclusive,
                })
            }
        }
        FieldKind::Integer { range: (min, max) } => {
            let value = raw.number()?;
            if value.fract() != 0.0 {
                Err(ViolationKind::NotAnInteger { value })
            } else if (min..=max).contains(&value) {
                Ok(Parsed::Number(value))
            } else {
                Err(ViolationKind::OutOfRange {
                    value,
                    min,
                    max,
                    min_exclusive: false,
                })
            }
        }
    }
}

fn store(input: &mut BiometricInput, percents: &mut [u32; 3], field: Field, value: Parsed) {
    match (field, value) {
        (Field::Gender, Parsed::Gender(gender)) => input.gender = Some(gender),
        (Field::ActivityLevel, Parsed::Activity(level)) => input.activity_level = Some(level),
        (Field::WeightKg, Parsed::Number(v)) => input.weight_kg = Some(v),
        (Field::HeightCm, Parsed::Number(v)) => input.height_cm = Some(v),
        (Field::AgeYears, Parsed::Number(v)) => input.age_years = Some(v as u32),
        (Field::NeckCm, Parsed::Number(v)) => input.neck_cm = Some(v),
        (Field::WaistCm, Parsed::Number(v)) => input.waist_cm = Some(v),
        (Field::HipCm, Parsed::Number(v)) => input.hip_cm = Some(v),
        (Field::BodyFatPercent, Parsed::Number(v)) => input.body_fat_percent = Some(v),
        (Field::ProteinPercent, Parsed::Number(v)) => percents[0] = v as u32,
        (Field::CarbPercent, Parsed::Number(v)) => percents[1] = v as u32,
        (Field::FatPercent, Parsed::Number(v)) => percents[2] = v as u32,
        (Field::TotalCalories, Parsed::Number(v)) => input.total_calories = Some(v),
        (Field::DailyCalorieDelta, Parsed::Number(v)) => input.daily_calorie_delta = Some(v),
        (Field::TargetWeightKg, Parsed::Number(v)) => input.target_weight_kg = Some(v),
        _ => {}
    }
}

/// Cross-field checks on fields that individually passed
fn check_consistency(plan: &FieldPlan, input: &BiometricInput) -> Vec<FieldViolation> {
    let mut violations = Vec::new();

    if let Some(split) = input.macro_split {
        if !split.is_complete() {
            violations.push(FieldViolation::new(
                "macro_percentages",
                ViolationKind::Inconsistent {
                    detail: format!(
                        "protein, carb and fat percentages must sum to 100, got {}",
                        split.total()
                    ),
                },
            ));
        }
    }

    if plan.declares(Field::TargetWeightKg) {
        if let (Some(target), Some(current), Some(delta)) = (
            input.target_weight_kg,
            input.weight_kg,
            input.daily_calorie_delta,
        ) {
            let detail = if delta < 0.0 && target > current {
                Some("a calorie deficit cannot reach a goal weight above the current weight")
            } else if delta > 0.0 && target < current {
                Some("a calorie surplus cannot reach a goal weight below the current weight")
            } else if delta == 0.0 && target.total_cmp(&current).is_ne() {
                Some("a maintenance plan cannot reach a different goal weight")
            } else {
                None
            };
            if let Some(detail) = detail {
                violations.push(FieldViolation::new(
                    Field::TargetWeightKg.name(),
                    ViolationKind::Inconsistent {
                        detail: detail.to_owned(),
                    },
                ));
            }
        }
    }

    violations
}

/// Validate raw inputs for `metric` computed with `variant`
///
/// Only the fields the metric declares are read; anything else in `raw` is
/// ignored.
///
/// # Errors
///
/// Returns `EngineError::Validation` listing every parse, range and
/// consistency violation (plus missing fields), or
/// `EngineError::MissingInput` when fields are only missing
pub fn validate(
    metric: Metric,
    variant: FormulaVariant,
    raw: &RawBiometricInput,
) -> EngineResult<BiometricInput> {
    // Gender can change the field set, so it is resolved first
    let gender = Field::Gender
        .raw(raw)
        .and_then(|value| match parse_field(Field::Gender, value) {
            Ok(Parsed::Gender(gender)) => Some(gender),
            _ => None,
        });
    let plan = plan_fields(metric, variant, gender, raw);

    let mut input = BiometricInput::default();
    let mut percents = [0_u32; 3];
    let mut violations = Vec::new();
    let mut missing = Vec::new();

    for (&field, &need) in &plan.0 {
        match field.raw(raw) {
            None if need == Need::Required => {
                missing.push(field.name());
                violations.push(FieldViolation::new(field.name(), ViolationKind::Missing));
            }
            None => {}
            Some(value) => match parse_field(field, value) {
                Ok(parsed) => store(&mut input, &mut percents, field, parsed),
                Err(reason) => violations.push(FieldViolation::new(field.name(), reason)),
            },
        }
    }

    if MACRO_PERCENTS.iter().all(|field| plan.declares(*field)) {
        let [protein, carb, fat] = percents;
        input.macro_split = Some(MacroSplit::new(protein, carb, fat));
    }

    if violations.is_empty() {
        violations = check_consistency(&plan, &input);
    }

    if violations.is_empty() {
        Ok(input)
    } else if violations.len() == missing.len() {
        Err(EngineError::MissingInput {
            metric,
            fields: missing,
        })
    } else {
        Err(EngineError::Validation { metric, violations })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::IdealWeightFormula;

    fn raw_adult() -> RawBiometricInput {
        RawBiometricInput {
            weight_kg: Some("70".into()),
            height_cm: Some("175".into()),
            age_years: Some("30".into()),
            gender: Some("male".into()),
            ..RawBiometricInput::default()
        }
    }

    #[test]
    fn test_text_values_are_parsed() {
        let input = validate(Metric::Bmr, Metric::Bmr.default_variant(), &raw_adult()).unwrap();
        assert_eq!(input.weight_kg, Some(70.0));
        assert_eq!(input.age_years, Some(30));
        assert_eq!(input.gender, Some(Gender::Male));
    }

    #[test]
    fn test_decimal_comma_is_accepted() {
        let raw = RawBiometricInput {
            weight_kg: Some("70,5".into()),
            ..raw_adult()
        };
        let input = validate(Metric::Bmi, FormulaVariant::Standard, &raw).unwrap();
        assert_eq!(input.weight_kg, Some(70.5));
    }

    #[test]
    fn test_undeclared_fields_are_ignored() {
        let raw = RawBiometricInput {
            neck_cm: Some("not a number".into()),
            ..raw_adult()
        };
        let input = validate(Metric::Bmi, FormulaVariant::Standard, &raw).unwrap();
        assert_eq!(input.neck_cm, None);
        assert_eq!(input.age_years, None);
    }

    #[test]
    fn test_all_violations_reported_in_field_order() {
        let raw = RawBiometricInput {
            weight_kg: Some("abc".into()),
            height_cm: Some(400.0.into()),
            age_years: Some(30.5.into()),
            gender: Some("male".into()),
            ..RawBiometricInput::default()
        };
        let err = validate(Metric::Bmr, Metric::Bmr.default_variant(), &raw).unwrap_err();
        assert_eq!(err.fields(), vec!["weight_kg", "height_cm", "age_years"]);
        assert_eq!(err.code(), crate::errors::ErrorCode::InvalidInput);
    }

    #[test]
    fn test_only_missing_fields_yield_missing_input() {
        let raw = RawBiometricInput {
            weight_kg: Some("".into()),
            ..RawBiometricInput::default()
        };
        let err = validate(Metric::Bmi, FormulaVariant::Standard, &raw).unwrap_err();
        assert_eq!(
            err,
            EngineError::MissingInput {
                metric: Metric::Bmi,
                fields: vec!["weight_kg", "height_cm"],
            }
        );
    }

    #[test]
    fn test_missing_fields_ride_along_with_invalid_ones() {
        let raw = RawBiometricInput {
            weight_kg: Some("-1".into()),
            ..RawBiometricInput::default()
        };
        let err = validate(Metric::Bmi, FormulaVariant::Standard, &raw).unwrap_err();
        let EngineError::Validation { violations, .. } = err else {
            panic!("expected validation error");
        };
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[1].reason, ViolationKind::Missing);
    }

    #[test]
    fn test_female_navy_requires_hip() {
        let raw = RawBiometricInput {
            height_cm: Some(165.0.into()),
            gender: Some("female".into()),
            neck_cm: Some(33.0.into()),
            waist_cm: Some(75.0.into()),
            ..RawBiometricInput::default()
        };
        let err = validate(Metric::BodyFat, Metric::BodyFat.default_variant(), &raw).unwrap_err();
        assert_eq!(err, EngineError::missing(Metric::BodyFat, "hip_cm"));
    }

    #[test]
    fn test_katch_mcardle_does_not_need_height_or_age() {
        let raw = RawBiometricInput {
            weight_kg: Some(80.0.into()),
            body_fat_percent: Some(20.0.into()),
            ..RawBiometricInput::default()
        };
        let variant = Metric::Bmr.parse_variant(Some("katch_mcardle")).unwrap();
        let input = validate(Metric::Bmr, variant, &raw).unwrap();
        assert_eq!(input.body_fat_percent, Some(20.0));
    }

    #[test]
    fn test_macro_percentages_must_sum_to_100() {
        let raw = RawBiometricInput {
            total_calories: Some(2000.0.into()),
            protein_percent: Some(30_u32.into()),
            carb_percent: Some(40_u32.into()),
            fat_percent: Some(20_u32.into()),
            ..RawBiometricInput::default()
        };
        let err = validate(Metric::Macros, Metric::Macros.default_variant(), &raw).unwrap_err();
        assert_eq!(err.fields(), vec!["macro_percentages"]);
    }

    #[test]
    fn test_partial_macro_percentages_require_all_three() {
        let raw = RawBiometricInput {
            total_calories: Some(2000.0.into()),
            protein_percent: Some(30_u32.into()),
            ..RawBiometricInput::default()
        };
        let err = validate(Metric::Macros, Metric::Macros.default_variant(), &raw).unwrap_err();
        assert_eq!(err.fields(), vec!["carb_percent", "fat_percent"]);
    }

    #[test]
    fn test_deficit_toward_heavier_goal_is_inconsistent() {
        let raw = RawBiometricInput {
            activity_level: Some("sedentary".into()),
            daily_calorie_delta: Some((-500.0).into()),
            target_weight_kg: Some(80.0.into()),
            ..raw_adult()
        };
        let variant = Metric::CalorieDeficitSurplus.default_variant();
        let err = validate(Metric::CalorieDeficitSurplus, variant, &raw).unwrap_err();
        assert_eq!(err.fields(), vec!["target_weight_kg"]);
    }

    #[test]
    fn test_unknown_option_lists_expected_values() {
        let raw = RawBiometricInput {
            gender: Some("other".into()),
            height_cm: Some(170.0.into()),
            ..RawBiometricInput::default()
        };
        let variant = FormulaVariant::IdealWeight(IdealWeightFormula::Devine);
        let err = validate(Metric::IdealWeight, variant, &raw).unwrap_err();
        let EngineError::Validation { violations, .. } = err else {
            panic!("expected validation error");
        };
        assert!(matches!(
            violations[0].reason,
            ViolationKind::UnknownOption { expected, .. } if expected == Gender::OPTIONS
        ));
    }

    #[test]
    fn test_typed_input_round_trips_through_raw_form() {
        let typed = BiometricInput::adult(70.0, 175.0, 30, Gender::Female)
            .with_activity(ActivityLevel::VeryActive);
        let raw = RawBiometricInput::from(&typed);
        let input = validate(Metric::Tdee, Metric::Tdee.default_variant(), &raw).unwrap();
        assert_eq!(input, typed);
    }
}
