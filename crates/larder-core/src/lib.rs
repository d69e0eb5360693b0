// ABOUTME: Core types and constants for the Larder recipe engine
// ABOUTME: Foundation crate with error handling, exact quantities, ingredient and recipe models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Larder Core
//!
//! Foundation crate providing the shared domain types for the Larder recipe
//! engine. Everything here is plain data: the engine crate consumes these
//! types and never mutates them.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **quantity**: Exact rational quantities and the authored-text parser
//! - **models**: Ingredients, the ingredient catalog, recipes and macros
//! - **constants**: Nutrition and service constants

/// Unified error handling system with standard error codes
pub mod errors;

/// Exact rational quantities parsed from authored text
pub mod quantity;

/// Ingredient, catalog and recipe data models
pub mod models;

/// Domain constants
pub mod constants;

pub use errors::{AppError, AppResult, ErrorCode};
pub use quantity::{Quantity, QuantityError, Rational};
