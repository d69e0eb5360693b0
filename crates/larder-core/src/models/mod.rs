// ABOUTME: Core data models for the Larder recipe engine
// ABOUTME: Re-exports Ingredient, IngredientCatalog, Recipe, Macros and related structures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! - `Ingredient`: a reusable pantry entity with per-100 g macros and the
//!   optional density / piece weight needed for unit conversion
//! - `IngredientCatalog`: id-keyed, synonym-aware collection of ingredients
//! - `Recipe`, `IngredientGroup`, `IngredientItem`: authored recipe content
//!   with every line tagged as catalog-backed or free text
//! - `Macros`: calories, protein, fat and carbohydrates

// Domain modules
mod catalog;
mod ingredient;
mod nutrition;
mod recipe;

pub use catalog::IngredientCatalog;
pub use ingredient::Ingredient;
pub use nutrition::Macros;
pub use recipe::{IngredientGroup, IngredientItem, ItemSource, Recipe};
