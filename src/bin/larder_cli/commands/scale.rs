// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Scale command for larder-cli
// ABOUTME: Loads a recipe and catalog and prints the ingredient lines for a serving count

use std::path::Path;

use anyhow::{Context, Result};
use larder::services::{load_catalog, load_recipe, RecipeEngine};

use crate::helpers::display::{display_scaled_recipe, print_json};
use crate::OutputFormat;

/// Print `recipe` scaled to `servings`
pub fn run(
    engine: &RecipeEngine,
    recipe: &Path,
    catalog: &Path,
    servings: u32,
    output: OutputFormat,
) -> Result<()> {
    let catalog = load_catalog(catalog)?;
    let recipe = load_recipe(recipe, &catalog)?;
    let scaled = engine
        .scale(&recipe, servings)
        .with_context(|| format!("cannot scale '{}'", recipe.title))?;

    match output {
        OutputFormat::Text => display_scaled_recipe(&scaled),
        OutputFormat::Json => print_json(&scaled)?,
    }
    Ok(())
}
