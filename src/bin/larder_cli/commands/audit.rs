// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Audit command for larder-cli
// ABOUTME: Reports unknown units and stated nutrition that disagrees with ingredient data

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use larder::services::{load_catalog, load_recipe, RecipeAudit, RecipeEngine};
use tracing::info;

use crate::helpers::display::{display_audit, print_json};
use crate::OutputFormat;

/// Audit every recipe file. Returns `false` when any recipe uses an unknown unit.
pub fn run(
    engine: &RecipeEngine,
    catalog: &Path,
    recipes: &[PathBuf],
    output: OutputFormat,
) -> Result<bool> {
    let catalog = load_catalog(catalog)?;

    let audits = recipes
        .iter()
        .map(|path| {
            let recipe = load_recipe(path, &catalog)?;
            engine
                .audit(&recipe)
                .with_context(|| format!("cannot audit {}", path.display()))
        })
        .collect::<Result<Vec<RecipeAudit>>>()?;

    let failing = audits
        .iter()
        .filter(|audit| !audit.unknown_units.is_empty())
        .count();
    let flagged = audits
        .iter()
        .filter(|audit| audit.discrepancy.is_some())
        .count();
    info!(
        audit.recipes = audits.len(),
        audit.unknown_unit_recipes = failing,
        audit.flagged_overrides = flagged,
        "Audit finished"
    );

    match output {
        OutputFormat::Text => display_audit(&audits),
        OutputFormat::Json => print_json(&audits)?,
    }
    Ok(failing == 0)
}
