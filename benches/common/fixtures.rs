// ABOUTME: Benchmark fixtures generating deterministic ingredient catalogs and recipes
// ABOUTME: Covers every unit class so benchmarks exercise all normalization rules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Deterministic recipe generation for reproducible performance measurements.

use std::sync::Arc;

use larder_core::models::{Ingredient, IngredientGroup, IngredientItem, Macros, Recipe};

/// Predefined batch sizes for benchmark scenarios
#[derive(Debug, Clone, Copy)]
pub enum RecipeBatchSize {
    /// Small batch (10 recipes) - quick benchmarks
    Small,
    /// Medium batch (100 recipes) - a CMS section
    Medium,
    /// Large batch (1000 recipes) - full re-index
    Large,
}

impl RecipeBatchSize {
    #[must_use]
    pub const fn count(self) -> usize {
        match self {
            Self::Small => 10,
            Self::Medium => 100,
            Self::Large => 1000,
        }
    }
}

// (unit, quantity) pairs cycling through mass, volume, count and unitless lines
const LINE_SHAPES: [(&str, &str); 6] = [
    ("g", "250"),
    ("kg", "0.5"),
    ("tbsp", "1 1/2"),
    ("cup", "¾"),
    ("piece", "2"),
    ("", "3"),
];

#[allow(clippy::cast_precision_loss)]
fn bench_ingredient(index: usize) -> Arc<Ingredient> {
    let variation = (index % 17) as f64;
    Arc::new(
        Ingredient::new(
            format!("ing-bench-{index}"),
            format!("Bench ingredient {index}"),
            Macros::new(
                80.0 + variation * 10.0,
                2.0 + variation,
                1.0 + variation / 2.0,
                10.0 + variation * 2.0,
            ),
        )
        .with_density(0.9 + variation / 100.0)
        .with_piece_weight(40.0 + variation * 5.0)
        .with_allergens(if index % 5 == 0 { vec!["gluten"] } else { vec![] }),
    )
}

/// Generate one recipe with `lines` ingredient lines split over two groups
#[must_use]
pub fn generate_recipe(index: usize, lines: usize) -> Recipe {
    let items: Vec<IngredientItem> = (0..lines)
        .map(|line| {
            let (unit, quantity) = LINE_SHAPES[(index + line) % LINE_SHAPES.len()];
            if line % 11 == 10 {
                IngredientItem::free_text(format!("garnish {line}"), quantity, unit)
            } else {
                IngredientItem::catalog(bench_ingredient(index * 31 + line), quantity, unit)
            }
        })
        .collect();
    let (main, sauce) = items.split_at(lines / 2);

    Recipe::new(
        format!("Bench recipe {index}"),
        2 + (index % 6) as u32,
        vec![
            IngredientGroup::unnamed(main.to_vec()),
            IngredientGroup::named("Sauce", sauce.to_vec()),
        ],
    )
}

/// Generate a batch of recipes with 12 lines each
#[must_use]
pub fn generate_recipes(size: RecipeBatchSize) -> Vec<Recipe> {
    (0..size.count()).map(|i| generate_recipe(i, 12)).collect()
}
