// ABOUTME: Main library entry point for the Larder recipe engine application layer
// ABOUTME: Configuration, logging, CMS document ingestion and the RecipeEngine service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Larder
//!
//! Converts recipe ingredient quantities to grams, scales recipes to any
//! serving count and aggregates per-serving nutrition and allergens.
//!
//! ## Architecture
//!
//! - **`larder_core`**: errors, exact quantities, ingredients, catalog, recipes
//! - **`larder_nutrition`**: unit table, normalizer, serving scaler, aggregator
//! - **this crate**: environment configuration, logging, document ingestion
//!   and the [`services::RecipeEngine`] used by the `larder-cli` binary
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use larder::config::EngineConfig;
//! use larder::services::{load_catalog, load_recipe, RecipeEngine};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = EngineConfig::load()?;
//! let engine = RecipeEngine::from_config(&config)?;
//! let catalog = load_catalog(Path::new("catalog.yaml"))?;
//! let recipe = load_recipe(Path::new("sushi.yaml"), &catalog)?;
//!
//! let page = engine.compute(&recipe, 8)?;
//! println!("{} kcal per serving", page.nutrition()?.per_serving.calories);
//! # Ok(())
//! # }
//! ```

/// Engine configuration from the environment
pub mod config;

/// Structured logging setup
pub mod logging;

/// Ingestion and the recipe engine service
pub mod services;

pub use larder_core::errors::{AppError, AppResult, ErrorCode};
