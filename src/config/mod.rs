// ABOUTME: Application configuration for the recipe engine loaded from the environment
// ABOUTME: Rounding policy, unit table location, override recomputation and QA tolerance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for Larder
//!
//! Values start from defaults, are overridden by `LARDER_*` environment
//! variables and are validated before use. All values can be overridden via
//! environment variables with the `LARDER_` prefix:
//!
//! | Variable | Field |
//! | --- | --- |
//! | `LARDER_UNIT_TABLE` | YAML unit table replacing the standard vocabulary |
//! | `LARDER_ROUNDING_DECIMAL_BELOW` | `rounding.decimal_below` |
//! | `LARDER_ROUNDING_DECIMAL_PLACES` | `rounding.decimal_places` |
//! | `LARDER_ROUNDING_MIN_COUNT` | `rounding.min_count` |
//! | `LARDER_RECOMPUTE_OVERRIDES` | `recompute_overrides` |
//! | `LARDER_QA_TOLERANCE` | `qa_tolerance` |

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use larder_core::errors::{AppError, AppResult};
use larder_nutrition::units::{UnitTable, UnitTableFile};
use larder_nutrition::{ConfigError, RoundingPolicy};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Default relative tolerance between stated and recomputed nutrition
pub const DEFAULT_QA_TOLERANCE: f64 = 0.10;

/// Engine configuration container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Alternate unit table file; the standard table when absent
    pub unit_table_path: Option<PathBuf>,
    /// Display rounding
    pub rounding: RoundingPolicy,
    /// Attach the computed aggregate to editorial overrides
    pub recompute_overrides: bool,
    /// Relative difference above which an override is flagged by the audit
    pub qa_tolerance: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            unit_table_path: None,
            rounding: RoundingPolicy::default(),
            recompute_overrides: false,
            qa_tolerance: DEFAULT_QA_TOLERANCE,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        debug!(?config, "Engine configuration loaded");
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if configuration values are invalid
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rounding.validate()?;
        if !self.qa_tolerance.is_finite() || self.qa_tolerance < 0.0 {
            return Err(ConfigError::InvalidRange(
                "qa_tolerance must be a non-negative number",
            ));
        }
        if self
            .unit_table_path
            .as_ref()
            .is_some_and(|path| path.as_os_str().is_empty())
        {
            return Err(ConfigError::MissingField("unit_table_path"));
        }
        Ok(())
    }

    /// Parse an environment variable into `target` when it is set
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
        if let Ok(path) = env::var("LARDER_UNIT_TABLE") {
            self.unit_table_path = Some(PathBuf::from(path));
        }

        // Rounding policy
        Self::apply_env_var(
            "LARDER_ROUNDING_DECIMAL_BELOW",
            &mut self.rounding.decimal_below,
        )?;
        Self::apply_env_var(
            "LARDER_ROUNDING_DECIMAL_PLACES",
            &mut self.rounding.decimal_places,
        )?;
        Self::apply_env_var("LARDER_ROUNDING_MIN_COUNT", &mut self.rounding.min_count)?;

        // Nutrition QA
        Self::apply_env_var(
            "LARDER_RECOMPUTE_OVERRIDES",
            &mut self.recompute_overrides,
        )?;
        Self::apply_env_var("LARDER_QA_TOLERANCE", &mut self.qa_tolerance)?;

        Ok(self)
    }

    /// Override the unit table location (command-line flag)
    #[must_use]
    pub fn with_unit_table(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.unit_table_path = path;
        }
        self
    }

    /// Build the configured unit table
    ///
    /// # Errors
    ///
    /// Returns an error if the unit table file cannot be read, is not valid
    /// YAML or defines invalid units
    pub fn load_unit_table(&self) -> AppResult<UnitTable> {
        match &self.unit_table_path {
            Some(path) => load_unit_table_file(path),
            None => Ok(UnitTable::standard()),
        }
    }
}

/// Read a YAML unit table (`units: { symbol: { class, factor } }`)
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or the table is invalid
pub fn load_unit_table_file(path: &Path) -> AppResult<UnitTable> {
    let text = fs::read_to_string(path).map_err(|e| {
        AppError::config(format!("cannot read unit table {}", path.display())).with_source(e)
    })?;
    let file: UnitTableFile = serde_yaml::from_str(&text).map_err(|e| {
        AppError::config(format!("invalid unit table {}: {e}", path.display())).with_source(e)
    })?;
    let table = UnitTable::from_file(file)?;
    info!(
        path = %path.display(),
        units = table.len(),
        "Loaded unit table"
    );
    Ok(table)
}
