// ABOUTME: Application services built on the recipe engine
// ABOUTME: Document ingestion and the RecipeEngine front door
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// CMS document ingestion
pub mod ingestion;
/// Recipe engine service (single, batch and audit)
pub mod recipes;

pub use ingestion::{load_catalog, load_recipe, resolve, DocumentFormat, RecipeDocument};
pub use recipes::{NutritionDiscrepancy, RecipeAudit, RecipeComputation, RecipeEngine};
