// ABOUTME: Recipe engine: unit table, quantity normalizer, serving scaler, nutrition aggregator
// ABOUTME: Pure synchronous algorithms over resolved recipes; emits tracing events, installs no subscriber
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Larder Nutrition
//!
//! Four components, each depending on the one before it:
//!
//! 1. [`units`]: unit symbol to conversion class and canonical factor
//! 2. [`normalize`]: one recipe line to grams
//! 3. [`scaler`]: display quantities for a target serving count
//! 4. [`aggregator`]: per-serving macros and the allergen union
//!
//! The display path (scaler) and the nutrition path (aggregator) read the
//! same authored quantities independently. Nutrition is never derived from
//! rounded display values.

/// Nutrition and allergen aggregation
pub mod aggregator;
/// Rounding policy and configuration errors
pub mod config;
/// Engine-level errors
pub mod errors;
/// Quantity normalization to grams
pub mod normalize;
/// Serving scaling
pub mod scaler;
/// Unit table
pub mod units;

pub use aggregator::{
    aggregate, aggregate_with_options, collect_allergens, compute_totals, AggregateOptions,
    AllergenReport, LineContribution, MissingItem, NutritionResult, NutritionSource,
    NutritionStatus, RecipeTotals,
};
pub use config::{ConfigError, RoundingPolicy};
pub use errors::EngineError;
pub use normalize::{normalize, GramsMass, NormalizationError};
pub use scaler::{scale, RoundingMode, ScaledGroup, ScaledLine, ScaledRecipe};
pub use units::{UnitClass, UnitEntry, UnitTable, UnitTableFile, UnknownUnitLine};
