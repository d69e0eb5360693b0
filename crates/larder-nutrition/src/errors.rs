// ABOUTME: Engine-level error type for scaling and aggregation
// ABOUTME: Folds into AppError with the matching ErrorCode at the application boundary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use larder_core::errors::{AppError, ErrorCode};
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Failures that abort a whole engine call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Target or recipe serving count is zero
    #[error("servings must be positive (recipe {recipe}, target {target})")]
    InvalidServings {
        /// Servings the recipe was authored for
        recipe: u32,
        /// Requested servings
        target: u32,
    },
    /// A line uses a unit missing from the unit table
    #[error("unknown unit '{unit}' on '{item}'")]
    UnknownUnit {
        /// Unit as authored
        unit: String,
        /// Line display name
        item: String,
    },
}

impl Serialize for EngineError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<EngineError> for AppError {
    fn from(error: EngineError) -> Self {
        let converted = match &error {
            EngineError::InvalidServings { .. } => {
                Self::new(ErrorCode::ValueOutOfRange, error.to_string())
            }
            EngineError::UnknownUnit { .. } => Self::data_integrity(error.to_string()),
        };
        converted.with_source(error)
    }
}
