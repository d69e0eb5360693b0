// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Provides quiet test logging plus ingredient, catalog and recipe builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `larder`
//!
//! This module provides common fixtures to reduce duplication across
//! integration tests.

use std::sync::{Arc, Once};

use larder_core::models::{
    Ingredient, IngredientCatalog, IngredientGroup, IngredientItem, Macros, Recipe,
};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN, // Default to WARN for quiet tests
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Float comparison helper
pub fn assert_close(actual: f64, expected: f64, what: &str) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "{what}: expected {expected}, got {actual}"
    );
}

// ============================================================================
// Ingredient fixtures
// ============================================================================

/// Sushi rice: 130 kcal per 100 g, no density, no piece weight
pub fn sushi_rice() -> Arc<Ingredient> {
    Arc::new(Ingredient::new(
        "ing-sushi-rice",
        "Sushi rice",
        Macros::new(130.0, 2.7, 0.3, 28.0),
    ))
}

/// Avocado: 209 kcal per 100 g, 150 g per piece
pub fn avocado() -> Arc<Ingredient> {
    Arc::new(
        Ingredient::new("ing-avocado", "Avocado", Macros::new(209.0, 2.0, 19.5, 8.5))
            .with_piece_weight(150.0),
    )
}

/// Soy sauce with allergens and no density
pub fn soy_sauce() -> Arc<Ingredient> {
    Arc::new(
        Ingredient::new("ing-soy-sauce", "Soy sauce", Macros::new(53.0, 8.1, 0.6, 4.9))
            .with_allergens([" Soy", "gluten "]),
    )
}

/// Rice vinegar with a density
pub fn rice_vinegar() -> Arc<Ingredient> {
    Arc::new(
        Ingredient::new(
            "ing-rice-vinegar",
            "Rice vinegar",
            Macros::new(18.0, 0.0, 0.0, 0.8),
        )
        .with_density(1.01),
    )
}

/// Egg: 143 kcal per 100 g, 50 g per piece
pub fn egg() -> Arc<Ingredient> {
    Arc::new(
        Ingredient::new("ing-egg", "Egg", Macros::new(143.0, 12.6, 9.5, 0.7))
            .with_piece_weight(50.0)
            .with_allergens(["egg"]),
    )
}

/// Catalog holding every fixture ingredient
pub fn fixture_catalog() -> IngredientCatalog {
    IngredientCatalog::from_ingredients(
        [sushi_rice(), avocado(), soy_sauce(), rice_vinegar(), egg()]
            .into_iter()
            .map(|ingredient| (*ingredient).clone()),
    )
    .unwrap()
}

// ============================================================================
// Recipe fixtures
// ============================================================================

/// 200 g sushi rice, 4 servings
pub fn sushi_rice_recipe() -> Recipe {
    Recipe::new(
        "Sushi rice",
        4,
        vec![IngredientGroup::unnamed(vec![IngredientItem::catalog(
            sushi_rice(),
            "200",
            "g",
        )])],
    )
}

/// Recipe with one line per unit class plus a free-text line, 2 servings
pub fn mixed_recipe() -> Recipe {
    Recipe::new(
        "Avocado rice bowl",
        2,
        vec![
            IngredientGroup::named(
                "Bowl",
                vec![
                    IngredientItem::catalog(sushi_rice(), "300", "g"),
                    IngredientItem::catalog(avocado(), "1", "piece"),
                    IngredientItem::catalog(egg(), "2", ""),
                ],
            ),
            IngredientGroup::named(
                "Dressing",
                vec![
                    IngredientItem::catalog(rice_vinegar(), "1 1/2", "tbsp"),
                    IngredientItem::catalog(soy_sauce(), "2", "tbsp"),
                    IngredientItem::free_text("pinch of furikake", "1", ""),
                ],
            ),
        ],
    )
}
