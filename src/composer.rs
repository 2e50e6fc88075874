// ABOUTME: Composite metric orchestration threading one formula's output into the next stage
// ABOUTME: TDEE, macro split, calorie plan, metabolic age, body fat and lean mass composition
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrimetric Contributors

//! Composer
//!
//! Every composite metric is plain function composition over the formula
//! registry: BMR feeds TDEE, TDEE feeds the macro split and the calorie plan,
//! BMR feeds metabolic age. Intermediate values are returned unrounded in
//! breakdown structs; rounding happens once, in the formatter.

use crate::algorithms::bmr::{self, BmrFormula};
use crate::algorithms::{lean_mass, BodyFatMethod, LeanMassFormula};
use crate::config::NutritionConfig;
use crate::constants::body_composition::{FFMI_HEIGHT_SLOPE, FFMI_REFERENCE_HEIGHT_M};
use crate::constants::energy::{
    CARB_KCAL_PER_GRAM, DAYS_PER_WEEK, FAT_KCAL_PER_GRAM, KCAL_PER_KG_BODY_MASS,
    PROTEIN_KCAL_PER_GRAM,
};
use crate::errors::{EngineError, EngineResult};
use crate::formatter;
use crate::models::{ActivityLevel, BiometricInput, Gender, MacroSplit, Metric};
use serde::Serialize;
use tracing::warn;

/// BMR scaled by the activity multiplier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TdeeBreakdown {
    /// Basal metabolic rate (kcal/day)
    pub bmr: f64,
    /// Activity level used
    pub activity_level: ActivityLevel,
    /// Multiplier applied to BMR
    pub activity_factor: f64,
    /// Total daily energy expenditure (kcal/day)
    pub tdee: f64,
}

/// Total daily energy expenditure
///
/// # Errors
///
/// Returns `EngineError::MissingInput` if the BMR inputs or the activity level are absent
pub fn tdee(
    metric: Metric,
    formula: BmrFormula,
    input: &BiometricInput,
    config: &NutritionConfig,
) -> EngineResult<TdeeBreakdown> {
    let bmr = formula.estimate(metric, input)?;
    let activity_level = input.require_activity(metric)?;
    let activity_factor = config.activity_factors.factor(activity_level);

    Ok(TdeeBreakdown {
        bmr,
        activity_level,
        activity_factor,
        tdee: bmr * activity_factor,
    })
}

/// Where the calorie budget of a macro split came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CalorieSource {
    /// Caller-supplied `total_calories`
    Explicit,
    /// Estimated TDEE
    Tdee,
}

/// Calories and grams of one macronutrient
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroPortion {
    /// Share of the budget (%)
    pub percent: u32,
    /// Calories (kcal/day)
    pub calories: f64,
    /// Grams per day
    pub grams: f64,
}

impl MacroPortion {
    fn of(percent: u32, total_calories: f64, kcal_per_gram: f64) -> Self {
        let calories = f64::from(percent) / 100.0 * total_calories;
        Self {
            percent,
            calories,
            grams: calories / kcal_per_gram,
        }
    }
}

/// Calorie budget split into macronutrients
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroBreakdown {
    /// Budget being split (kcal/day)
    pub total_calories: f64,
    /// Origin of the budget
    pub source: CalorieSource,
    /// Percentages applied
    pub split: MacroSplit,
    /// Protein portion (4 kcal/g)
    pub protein: MacroPortion,
    /// Carbohydrate portion (4 kcal/g)
    pub carbs: MacroPortion,
    /// Fat portion (9 kcal/g)
    pub fat: MacroPortion,
}

/// Split a calorie budget into protein, carbohydrate and fat
///
/// The budget is `total_calories` when given, otherwise the estimated TDEE.
/// The split is the caller's, otherwise the configured default.
///
/// # Errors
///
/// Returns `EngineError::Validation` if the percentages do not sum to 100, or
/// `EngineError::MissingInput` if no budget can be established
pub fn macros(
    metric: Metric,
    formula: BmrFormula,
    input: &BiometricInput,
    config: &NutritionConfig,
) -> EngineResult<MacroBreakdown> {
    let split = input.macro_split.unwrap_or(config.default_macro_split);
    if !split.is_complete() {
        return Err(EngineError::inconsistent(
            metric,
            "macro_percentages",
            format!(
                "protein, carb and fat percentages must sum to 100, got {}",
                split.total()
            ),
        ));
    }

    let (total_calories, source) = match input.total_calories {
        Some(total) => (total, CalorieSource::Explicit),
        None => (tdee(metric, formula, input, config)?.tdee, CalorieSource::Tdee),
    };

    Ok(MacroBreakdown {
        total_calories,
        source,
        split,
        protein: MacroPortion::of(split.protein_percent, total_calories, PROTEIN_KCAL_PER_GRAM),
        carbs: MacroPortion::of(split.carb_percent, total_calories, CARB_KCAL_PER_GRAM),
        fat: MacroPortion::of(split.fat_percent, total_calories, FAT_KCAL_PER_GRAM),
    })
}

/// Direction of a calorie plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanType {
    /// Eating below TDEE
    Deficit,
    /// Eating above TDEE
    Surplus,
    /// Eating at TDEE
    Maintenance,
}

impl PlanType {
    /// Plan type for a daily delta
    #[must_use]
    pub fn for_delta(delta_kcal: f64) -> Self {
        if delta_kcal < 0.0 {
            Self::Deficit
        } else if delta_kcal > 0.0 {
            Self::Surplus
        } else {
            Self::Maintenance
        }
    }

    /// Plan type name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Deficit => "deficit",
            Self::Surplus => "surplus",
            Self::Maintenance => "maintenance",
        }
    }
}

/// Calorie deficit or surplus plan
#[derive(Debug, Clone, PartialEq)]
pub struct CaloriePlan {
    /// Estimated TDEE (kcal/day)
    pub tdee: f64,
    /// Requested daily change (kcal/day)
    pub daily_delta: f64,
    /// Daily intake target, TDEE plus delta (kcal/day)
    pub target_calories: f64,
    /// Deficit, surplus or maintenance
    pub plan_type: PlanType,
    /// Projected body mass change per week (kg, negative = loss)
    pub weekly_change_kg: f64,
    /// Weeks to reach the goal weight, when one is given and reachable
    pub weeks_to_goal: Option<f64>,
    /// Minimum daily intake for the subject's gender (kcal/day)
    pub safety_floor: f64,
    /// Whether the target is at or above the floor
    pub is_safe: bool,
    /// Explanation when the plan is unsafe
    pub warning: Option<String>,
}

/// Calorie deficit/surplus plan on top of TDEE
///
/// The requested delta is never adjusted: a target below the gender floor is
/// returned with `is_safe = false` and a warning. Safety is judged on the
/// whole-kcal target that callers display.
///
/// # Errors
///
/// Returns `EngineError::MissingInput` if TDEE inputs, gender or the daily delta are absent
pub fn calorie_plan(
    metric: Metric,
    formula: BmrFormula,
    input: &BiometricInput,
    config: &NutritionConfig,
) -> EngineResult<CaloriePlan> {
    let energy = tdee(metric, formula, input, config)?;
    let gender = input.require_gender(metric)?;
    let daily_delta = input
        .daily_calorie_delta
        .ok_or_else(|| EngineError::missing(metric, "daily_calorie_delta"))?;

    let target_calories = energy.tdee + daily_delta;
    let safety_floor = config.safety_floor.floor(gender);
    let displayed_target = formatter::round_to(target_calories, 0);
    let is_safe = displayed_target >= safety_floor;
    let warning = (!is_safe).then(|| {
        format!(
            "Daily target of {displayed_target:.0} kcal is below the {safety_floor:.0} kcal minimum recommended for {gender} clients; \
             consider a smaller deficit or medical supervision"
        )
    });
    if let Some(warning) = &warning {
        warn!(metric = %metric, target_calories, safety_floor, "{warning}");
    }

    let weekly_change_kg = daily_delta * DAYS_PER_WEEK / KCAL_PER_KG_BODY_MASS;
    let weeks_to_goal = match (input.target_weight_kg, input.weight_kg) {
        (Some(target), Some(current)) if daily_delta != 0.0 => {
            let remaining_kg = target - current;
            // Only projected when the plan moves weight toward the goal
            (remaining_kg * daily_delta >= 0.0).then(|| remaining_kg.abs() / weekly_change_kg.abs())
        }
        _ => None,
    };

    Ok(CaloriePlan {
        tdee: energy.tdee,
        daily_delta,
        target_calories,
        plan_type: PlanType::for_delta(daily_delta),
        weekly_change_kg,
        weeks_to_goal,
        safety_floor,
        is_safe,
        warning,
    })
}

/// Subject BMR placed on the reference age curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetabolicAgeEstimate {
    /// Reference age whose BMR is closest to the subject's
    pub metabolic_age: u32,
    /// Chronological age
    pub actual_age: u32,
    /// Subject BMR (kcal/day)
    pub subject_bmr: f64,
    /// Reference BMR at the metabolic age (kcal/day)
    pub reference_bmr: f64,
}

/// Metabolic age: nearest reference age by BMR
///
/// The reference curve is Mifflin-St Jeor evaluated for the configured
/// reference body of the subject's gender at every age in the configured
/// range. BMR falls with age, so the curve is monotonic; equal distances
/// resolve to the younger age.
///
/// # Errors
///
/// Returns `EngineError::MissingInput` if BMR inputs, age or gender are absent
pub fn metabolic_age(
    metric: Metric,
    formula: BmrFormula,
    input: &BiometricInput,
    config: &NutritionConfig,
) -> EngineResult<MetabolicAgeEstimate> {
    let subject_bmr = formula.estimate(metric, input)?;
    let actual_age = input.require_age(metric)?;
    let gender = input.require_gender(metric)?;

    let curve = &config.metabolic_age;
    let reference = curve.reference(gender);

    let mut best_age = curve.min_age;
    let mut best_bmr = f64::NAN;
    let mut best_distance = f64::INFINITY;
    for age in curve.min_age..=curve.max_age {
        let reference_bmr = reference_bmr(reference.weight_kg, reference.height_cm, age, gender);
        let distance = (reference_bmr - subject_bmr).abs();
        if distance < best_distance {
            best_age = age;
            best_bmr = reference_bmr;
            best_distance = distance;
        }
    }

    Ok(MetabolicAgeEstimate {
        metabolic_age: best_age,
        actual_age,
        subject_bmr,
        reference_bmr: best_bmr,
    })
}

fn reference_bmr(weight_kg: f64, height_cm: f64, age: u32, gender: Gender) -> f64 {
    bmr::mifflin_st_jeor(weight_kg, height_cm, age, gender)
}

/// Body fat percentage with fat and lean mass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyFatBreakdown {
    /// Body fat (%)
    pub percent: f64,
    /// Method used
    pub method: BodyFatMethod,
    /// Fat mass (kg), when weight is known
    pub fat_mass_kg: Option<f64>,
    /// Lean mass (kg), when weight is known
    pub lean_mass_kg: Option<f64>,
}

/// Body fat estimate composed with body weight
///
/// # Errors
///
/// Propagates the method's `MissingInput` and `Validation` errors
pub fn body_fat(
    metric: Metric,
    method: BodyFatMethod,
    input: &BiometricInput,
) -> EngineResult<BodyFatBreakdown> {
    let percent = method.estimate(metric, input)?;
    let lean_mass_kg = input
        .weight_kg
        .map(|weight| lean_mass::from_body_fat(weight, percent));
    let fat_mass_kg = input
        .weight_kg
        .zip(lean_mass_kg)
        .map(|(weight, lean)| weight - lean);

    Ok(BodyFatBreakdown {
        percent,
        method,
        fat_mass_kg,
        lean_mass_kg,
    })
}

/// Lean and fat mass split of body weight
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeanMassBreakdown {
    /// Lean body mass (kg)
    pub lean_mass_kg: f64,
    /// Fat mass (kg)
    pub fat_mass_kg: f64,
    /// Lean mass share of body weight (%)
    pub lean_mass_percent: f64,
}

/// Lean body mass with the matching fat mass
///
/// # Errors
///
/// Propagates the formula's `MissingInput` and `Validation` errors
pub fn lean_mass(
    metric: Metric,
    formula: LeanMassFormula,
    input: &BiometricInput,
) -> EngineResult<LeanMassBreakdown> {
    let weight = input.require_weight(metric)?;
    let lean_mass_kg = formula.estimate(metric, input)?;

    Ok(LeanMassBreakdown {
        lean_mass_kg,
        fat_mass_kg: weight - lean_mass_kg,
        lean_mass_percent: lean_mass_kg / weight * 100.0,
    })
}

/// Fat-free mass index
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FfmiBreakdown {
    /// Lean body mass (kg)
    pub lean_mass_kg: f64,
    /// LBM / height² (kg/m²)
    pub raw: f64,
    /// Height-normalized FFMI (kg/m²), the classified value
    pub normalized: f64,
}

/// Fat-free mass index with height normalization above 1.8 m
///
/// # Errors
///
/// Returns `EngineError::MissingInput` if weight, height or body fat are absent
pub fn ffmi(metric: Metric, input: &BiometricInput) -> EngineResult<FfmiBreakdown> {
    let lean_mass_kg = lean_mass::from_body_fat(
        input.require_weight(metric)?,
        input.require_body_fat(metric)?,
    );
    let height_m = input.require_height_m(metric)?;

    let raw = lean_mass_kg / (height_m * height_m);
    let normalized = if height_m > FFMI_REFERENCE_HEIGHT_M {
        FFMI_HEIGHT_SLOPE.mul_add(FFMI_REFERENCE_HEIGHT_M - height_m, raw)
    } else {
        raw
    };

    Ok(FfmiBreakdown {
        lean_mass_kg,
        raw,
        normalized,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_male() -> BiometricInput {
        BiometricInput::adult(70.0, 175.0, 30, Gender::Male).with_activity(ActivityLevel::Sedentary)
    }

    #[test]
    fn test_tdee_scales_bmr() {
        let breakdown = tdee(
            Metric::Tdee,
            BmrFormula::MifflinStJeor,
            &reference_male(),
            &NutritionConfig::default(),
        )
        .unwrap();
        assert!((breakdown.tdee - 1648.75 * 1.2).abs() < 1e-9);
        assert!((breakdown.activity_factor - 1.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_tdee_without_activity_fails_fast() {
        let input = BiometricInput::adult(70.0, 175.0, 30, Gender::Male);
        let err = tdee(
            Metric::Tdee,
            BmrFormula::MifflinStJeor,
            &input,
            &NutritionConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err, EngineError::missing(Metric::Tdee, "activity_level"));
    }

    #[test]
    fn test_macros_from_explicit_budget() {
        let input = BiometricInput::default()
            .with_total_calories(2000.0)
            .with_macro_split(MacroSplit::new(30, 40, 30));
        let breakdown = macros(
            Metric::Macros,
            BmrFormula::default(),
            &input,
            &NutritionConfig::default(),
        )
        .unwrap();

        assert_eq!(breakdown.source, CalorieSource::Explicit);
        assert!((breakdown.protein.calories - 600.0).abs() < 1e-9);
        assert!((breakdown.protein.grams - 150.0).abs() < 1e-9);
        assert!((breakdown.carbs.grams - 200.0).abs() < 1e-9);
        assert!((breakdown.fat.grams - 600.0 / 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_macros_default_to_tdee_and_default_split() {
        let breakdown = macros(
            Metric::Macros,
            BmrFormula::default(),
            &reference_male(),
            &NutritionConfig::default(),
        )
        .unwrap();
        assert_eq!(breakdown.source, CalorieSource::Tdee);
        assert_eq!(breakdown.split, MacroSplit::new(25, 45, 30));
    }

    #[test]
    fn test_calorie_plan_below_floor_is_flagged_not_adjusted() {
        let input = reference_male().with_calorie_delta(-700.0, None);
        let plan = calorie_plan(
            Metric::CalorieDeficitSurplus,
            BmrFormula::default(),
            &input,
            &NutritionConfig::default(),
        )
        .unwrap();

        // 1978.5 - 700 = 1278.5 < 1500
        assert!((plan.target_calories - 1278.5).abs() < 1e-9);
        assert!(!plan.is_safe);
        assert!(plan.warning.is_some());
        assert_eq!(plan.plan_type, PlanType::Deficit);
    }

    #[test]
    fn test_calorie_plan_weeks_to_goal() {
        let input = reference_male().with_calorie_delta(-385.0, Some(65.0));
        let plan = calorie_plan(
            Metric::CalorieDeficitSurplus,
            BmrFormula::default(),
            &input,
            &NutritionConfig::default(),
        )
        .unwrap();

        // -385 * 7 / 7700 = -0.35 kg/week; 5 kg / 0.35
        assert!((plan.weekly_change_kg + 0.35).abs() < 1e-12);
        let weeks = plan.weeks_to_goal.unwrap();
        assert!((weeks - 5.0 / 0.35).abs() < 1e-9);
        assert!(plan.is_safe);
    }

    #[test]
    fn test_metabolic_age_matches_reference_body() {
        let estimate = metabolic_age(
            Metric::MetabolicAge,
            BmrFormula::MifflinStJeor,
            &reference_male(),
            &NutritionConfig::default(),
        )
        .unwrap();
        assert_eq!(estimate.metabolic_age, 30);
    }

    #[test]
    fn test_metabolic_age_tie_resolves_to_younger_age() {
        // Subject BMR sits exactly between the reference BMR at 30 and 31
        let input = BiometricInput::adult(69.75, 175.0, 30, Gender::Male);
        let estimate = metabolic_age(
            Metric::MetabolicAge,
            BmrFormula::MifflinStJeor,
            &input,
            &NutritionConfig::default(),
        )
        .unwrap();
        assert_eq!(estimate.metabolic_age, 30);
        assert_eq!(estimate.actual_age, 30);
    }

    #[test]
    fn test_ffmi_normalization_only_above_reference_height() {
        let short = BiometricInput {
            weight_kg: Some(80.0),
            height_cm: Some(175.0),
            body_fat_percent: Some(15.0),
            ..BiometricInput::default()
        };
        let breakdown = ffmi(Metric::Ffmi, &short).unwrap();
        assert!((breakdown.raw - breakdown.normalized).abs() < f64::EPSILON);

        let tall = BiometricInput {
            height_cm: Some(190.0),
            ..short
        };
        let breakdown = ffmi(Metric::Ffmi, &tall).unwrap();
        assert!((breakdown.normalized - (breakdown.raw - 0.61)).abs() < 1e-9);
    }

    #[test]
    fn test_body_fat_composition_with_weight() {
        let input = BiometricInput {
            weight_kg: Some(80.0),
            ..BiometricInput::default()
        }
        .with_body_fat(25.0);
        let breakdown = body_fat(Metric::BodyFat, BodyFatMethod::Skinfold, &input).unwrap();
        assert!((breakdown.fat_mass_kg.unwrap() - 20.0).abs() < 1e-9);
        assert!((breakdown.lean_mass_kg.unwrap() - 60.0).abs() < 1e-9);
    }
}
