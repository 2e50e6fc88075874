// ABOUTME: Engine configuration container with environment overrides and validation
// ABOUTME: Loads once into a process-wide instance; calculations receive it by reference
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrimetric Contributors

//! Engine Configuration Module
//!
//! Configuration is read-only after loading. Every calculation receives the
//! configuration explicitly, so a result depends only on (configuration,
//! request); [`EngineConfig::global`] exists for callers that are happy with
//! defaults plus `NUTRIMETRIC_*` environment overrides.

pub mod error;
pub mod nutrition;

pub use error::ConfigError;
pub use nutrition::{
    ActivityFactorsConfig, HydrationConfig, MetabolicAgeConfig, NutritionConfig, ProteinConfig,
    ReferenceBody, SafetyFloorConfig,
};

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::warn;

/// Global configuration singleton
static ENGINE_CONFIG: OnceLock<EngineConfig> = OnceLock::new();

/// Main engine configuration container
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    /// Nutrition tables (activity factors, floors, hydration, protein, reference bodies)
    pub nutrition: NutritionConfig,
}

impl EngineConfig {
    /// Get the global configuration instance
    pub fn global() -> &'static Self {
        ENGINE_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                warn!("Failed to load engine config: {}, using defaults", e);
                Self::default()
            })
        })
    }

    /// Load configuration from defaults and environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` describing the first invalid setting
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.nutrition.validate()
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .trim()
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        let nutrition = &mut self.nutrition;

        // Activity factor overrides
        let factors = &mut nutrition.activity_factors;
        Self::apply_env_var("NUTRIMETRIC_ACTIVITY_SEDENTARY", &mut factors.sedentary)?;
        Self::apply_env_var(
            "NUTRIMETRIC_ACTIVITY_LIGHTLY_ACTIVE",
            &mut factors.lightly_active,
        )?;
        Self::apply_env_var(
            "NUTRIMETRIC_ACTIVITY_MODERATELY_ACTIVE",
            &mut factors.moderately_active,
        )?;
        Self::apply_env_var("NUTRIMETRIC_ACTIVITY_VERY_ACTIVE", &mut factors.very_active)?;
        Self::apply_env_var("NUTRIMETRIC_ACTIVITY_EXTRA_ACTIVE", &mut factors.extra_active)?;

        // Safety floor overrides
        Self::apply_env_var(
            "NUTRIMETRIC_SAFETY_FLOOR_FEMALE",
            &mut nutrition.safety_floor.female_kcal,
        )?;
        Self::apply_env_var(
            "NUTRIMETRIC_SAFETY_FLOOR_MALE",
            &mut nutrition.safety_floor.male_kcal,
        )?;

        // Default macro split overrides
        let split = &mut nutrition.default_macro_split;
        Self::apply_env_var("NUTRIMETRIC_MACRO_PROTEIN_PERCENT", &mut split.protein_percent)?;
        Self::apply_env_var("NUTRIMETRIC_MACRO_CARB_PERCENT", &mut split.carb_percent)?;
        Self::apply_env_var("NUTRIMETRIC_MACRO_FAT_PERCENT", &mut split.fat_percent)?;

        // Hydration overrides
        Self::apply_env_var(
            "NUTRIMETRIC_WATER_ML_PER_KG",
            &mut nutrition.hydration.ml_per_kg,
        )?;
        Self::apply_env_var("NUTRIMETRIC_WATER_GLASS_ML", &mut nutrition.hydration.glass_ml)?;

        // Metabolic age curve overrides
        Self::apply_env_var(
            "NUTRIMETRIC_METABOLIC_AGE_MIN",
            &mut nutrition.metabolic_age.min_age,
        )?;
        Self::apply_env_var(
            "NUTRIMETRIC_METABOLIC_AGE_MAX",
            &mut nutrition.metabolic_age.max_age,
        )?;

        Ok(self)
    }
}
