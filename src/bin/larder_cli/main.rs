// ABOUTME: Larder CLI - command-line front end for the recipe engine
// ABOUTME: Scales recipes, reports nutrition, audits CMS content and prints the unit table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Show a recipe scaled to 8 servings
//! larder-cli scale --recipe sushi.yaml --catalog catalog.yaml --servings 8
//!
//! # Per-serving nutrition as JSON, with the recomputed figures next to an override
//! larder-cli nutrition --recipe sushi.yaml --catalog catalog.yaml --recomputed --output json
//!
//! # Validate many recipes before publishing (non-zero exit on unknown units)
//! larder-cli audit --catalog catalog.yaml recipes/*.yaml
//!
//! # Print the active unit table
//! larder-cli --unit-table units.yaml units
//! ```

mod commands;
mod helpers;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use larder::config::EngineConfig;
use larder::logging::LoggingConfig;
use larder::services::RecipeEngine;
use larder::AppError;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "larder-cli",
    about = "Larder recipe engine CLI",
    long_about = "Scale recipes, compute per-serving nutrition and allergens, and audit CMS recipe content."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// YAML unit table replacing the standard vocabulary
    #[arg(long, global = true)]
    unit_table: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

/// Output rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable table
    Text,
    /// Pretty-printed JSON
    Json,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Show a recipe's ingredient lines for a serving count
    Scale {
        /// Recipe document (.json, .yaml)
        #[arg(long)]
        recipe: PathBuf,

        /// Ingredient catalog (.json, .yaml)
        #[arg(long)]
        catalog: PathBuf,

        /// Target servings
        #[arg(long)]
        servings: u32,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },

    /// Per-serving nutrition and allergens
    Nutrition {
        /// Recipe document (.json, .yaml)
        #[arg(long)]
        recipe: PathBuf,

        /// Ingredient catalog (.json, .yaml)
        #[arg(long)]
        catalog: PathBuf,

        /// Target servings (defaults to the recipe's own)
        #[arg(long)]
        servings: Option<u32>,

        /// Attach the computed aggregate when the recipe has an editorial override
        #[arg(long)]
        recomputed: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },

    /// Check recipes for unknown units and stated nutrition that disagrees with ingredient data
    Audit {
        /// Ingredient catalog (.json, .yaml)
        #[arg(long)]
        catalog: PathBuf,

        /// Recipe documents
        #[arg(required = true)]
        recipes: Vec<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },

    /// Print the active unit table
    Units {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },
}

fn run(cli: Cli) -> Result<ExitCode> {
    LoggingConfig::for_cli(cli.verbose).init()?;

    let config = EngineConfig::load()
        .context("invalid LARDER_* configuration")?
        .with_unit_table(cli.unit_table);
    debug!(?config, "Configuration resolved");

    match cli.command {
        Command::Scale {
            recipe,
            catalog,
            servings,
            output,
        } => {
            let engine = RecipeEngine::from_config(&config)?;
            commands::scale::run(&engine, &recipe, &catalog, servings, output)?;
        }
        Command::Nutrition {
            recipe,
            catalog,
            servings,
            recomputed,
            output,
        } => {
            let config = EngineConfig {
                recompute_overrides: config.recompute_overrides || recomputed,
                ..config
            };
            let engine = RecipeEngine::from_config(&config)?;
            commands::nutrition::run(&engine, &recipe, &catalog, servings, output)?;
        }
        Command::Audit {
            catalog,
            recipes,
            output,
        } => {
            let engine = RecipeEngine::from_config(&config)?;
            let clean = commands::audit::run(&engine, &catalog, &recipes, output)?;
            if !clean {
                return Ok(ExitCode::from(1));
            }
        }
        Command::Units { output } => {
            let engine = RecipeEngine::from_config(&config)?;
            commands::units::run(engine.units(), output)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("Error: {error:#}");
            let code = error
                .downcast_ref::<AppError>()
                .map_or(1, |app| app.code.exit_code());
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}
