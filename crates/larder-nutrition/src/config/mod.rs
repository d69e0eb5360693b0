// ABOUTME: Engine configuration for display rounding
// ABOUTME: RoundingPolicy controls decimal and count rounding of scaled quantities
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Engine configuration.
//!
//! The engine crate never reads the environment itself; the application
//! layer builds these values (defaults, then environment overrides) and
//! passes them in.

mod error;

pub use error::ConfigError;

use serde::{Deserialize, Serialize};

/// Most decimal places a display value may carry
pub const MAX_DECIMAL_PLACES: u32 = 3;

/// How scaled quantities are rounded for display
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundingPolicy {
    /// Mass/volume values below this keep decimals when non-integer
    pub decimal_below: f64,
    /// Decimal places kept for small mass/volume values
    pub decimal_places: u32,
    /// Smallest count a positive count line may display
    pub min_count: u32,
}

impl Default for RoundingPolicy {
    fn default() -> Self {
        Self {
            decimal_below: 10.0,
            decimal_places: 1,
            min_count: 1,
        }
    }
}

impl RoundingPolicy {
    /// Validate the policy
    ///
    /// # Errors
    ///
    /// Returns an error if the threshold is not positive and finite, the
    /// decimal places exceed [`MAX_DECIMAL_PLACES`], or the minimum count is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.decimal_below.is_finite() || self.decimal_below <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "rounding decimal_below must be positive and finite",
            ));
        }
        if self.decimal_places > MAX_DECIMAL_PLACES {
            return Err(ConfigError::ValueOutOfRange(
                "rounding decimal_places must be <= 3",
            ));
        }
        if self.min_count == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "rounding min_count must be > 0",
            ));
        }
        Ok(())
    }

    /// Smallest non-zero value decimal rounding can display
    #[must_use]
    pub fn smallest_step(&self) -> f64 {
        1.0 / 10_f64.powi(self.decimal_places as i32)
    }

    /// Round a mass or volume value.
    ///
    /// Non-integer values below `decimal_below` keep `decimal_places`;
    /// everything else rounds to a whole unit. Positive values never round to 0.
    #[must_use]
    pub fn round_decimal(&self, value: f64) -> f64 {
        if value <= 0.0 {
            return 0.0;
        }
        let is_integer = value.fract() == 0.0;
        let rounded = if !is_integer && value < self.decimal_below {
            let scale = 10_f64.powi(self.decimal_places as i32);
            (value * scale).round() / scale
        } else {
            value.round()
        };
        if rounded > 0.0 {
            rounded
        } else if value < self.decimal_below {
            self.smallest_step()
        } else {
            1.0
        }
    }

    /// Round a count value to a whole number, never below `min_count`
    #[must_use]
    pub fn round_count(&self, value: f64) -> f64 {
        value.round().max(f64::from(self.min_count))
    }
}
