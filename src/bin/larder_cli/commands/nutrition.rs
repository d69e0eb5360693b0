// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Nutrition command for larder-cli
// ABOUTME: Prints per-serving macros, the per-line breakdown and allergens for a recipe

use std::path::Path;

use anyhow::{Context, Result};
use larder::services::{load_catalog, load_recipe, RecipeEngine};
use larder_nutrition::{AllergenReport, NutritionResult, NutritionSource};
use serde::Serialize;

use crate::helpers::display::{display_allergens, display_breakdown, display_nutrition, print_json};
use crate::OutputFormat;

#[derive(Serialize)]
struct NutritionReport<'a> {
    nutrition: &'a NutritionResult,
    allergens: &'a AllergenReport,
}

/// Print nutrition for `recipe` at `servings` (the recipe's own count when absent)
pub fn run(
    engine: &RecipeEngine,
    recipe: &Path,
    catalog: &Path,
    servings: Option<u32>,
    output: OutputFormat,
) -> Result<()> {
    let catalog = load_catalog(catalog)?;
    let recipe = load_recipe(recipe, &catalog)?;
    let target = servings.unwrap_or(recipe.servings);

    let nutrition = engine
        .nutrition(&recipe, target)
        .with_context(|| format!("cannot compute nutrition for '{}'", recipe.title))?;
    let allergens = engine.allergens(&recipe);

    match output {
        OutputFormat::Text => {
            display_nutrition(&recipe.title, &nutrition);
            if nutrition.source == NutritionSource::Computed {
                display_breakdown(&engine.breakdown(&recipe)?);
            }
            display_allergens(&allergens);
        }
        OutputFormat::Json => print_json(&NutritionReport {
            nutrition: &nutrition,
            allergens: &allergens,
        })?,
    }
    Ok(())
}
