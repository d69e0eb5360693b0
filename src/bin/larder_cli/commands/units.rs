// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Units command for larder-cli
// ABOUTME: Prints the active unit table as text or in its YAML-equivalent JSON form

use anyhow::Result;
use larder_nutrition::UnitTable;

use crate::helpers::display::{display_unit_table, print_json};
use crate::OutputFormat;

/// Print the unit table
pub fn run(units: &UnitTable, output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Text => display_unit_table(units),
        OutputFormat::Json => print_json(&units.to_file())?,
    }
    Ok(())
}
