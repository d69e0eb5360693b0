// ABOUTME: Recipe engine service combining scaling, nutrition and allergens for one or many recipes
// ABOUTME: Shares one immutable unit table across rayon workers and audits content for QA
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;
use std::time::Instant;

use larder_core::errors::{AppError, AppResult};
use larder_core::models::{Macros, Recipe};
use larder_nutrition::units::UnknownUnitLine;
use larder_nutrition::{
    aggregate_with_options, collect_allergens, compute_totals, scale, AggregateOptions,
    AllergenReport, EngineError, NutritionResult, RecipeTotals, RoundingPolicy, ScaledRecipe,
    UnitTable,
};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{EngineConfig, DEFAULT_QA_TOLERANCE};

/// Display, nutrition and allergen output for one recipe at a target serving count.
///
/// The nutrition path fails on its own: an unknown unit leaves the display
/// and allergen output in place and is reported in `nutrition`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeComputation {
    /// Display path
    pub scaled: ScaledRecipe,
    /// Nutrition path
    pub nutrition: Result<NutritionResult, EngineError>,
    /// Allergen union
    pub allergens: AllergenReport,
}

impl RecipeComputation {
    /// Nutrition outcome with the failure mapped to its application error code
    ///
    /// # Errors
    ///
    /// Returns `DataIntegrity` when a line uses a unit missing from the table
    pub fn nutrition(&self) -> AppResult<&NutritionResult> {
        self.nutrition
            .as_ref()
            .map_err(|error| AppError::from(error.clone()))
    }
}

/// Editorial nutrition that disagrees with the ingredient data
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionDiscrepancy {
    /// Per-serving figures stated on the recipe
    pub stated: Macros,
    /// Per-serving figures computed from ingredients
    pub computed: Macros,
    /// Largest relative difference across the four macros
    pub relative_difference: f64,
    /// The computed figures exclude some lines
    pub computed_partial: bool,
}

/// Content QA findings for one recipe
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeAudit {
    /// Recipe title
    pub title: String,
    /// Lines with units missing from the unit table
    pub unknown_units: Vec<UnknownUnitLine>,
    /// Override that exceeds the QA tolerance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discrepancy: Option<NutritionDiscrepancy>,
}

impl RecipeAudit {
    /// True when nothing needs an editor's attention
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.unknown_units.is_empty() && self.discrepancy.is_none()
    }
}

/// Engine front door for the application layer
#[derive(Debug, Clone)]
pub struct RecipeEngine {
    units: Arc<UnitTable>,
    rounding: RoundingPolicy,
    options: AggregateOptions,
    qa_tolerance: f64,
}

impl RecipeEngine {
    /// Engine over a unit table and rounding policy
    #[must_use]
    pub fn new(units: Arc<UnitTable>, rounding: RoundingPolicy) -> Self {
        Self {
            units,
            rounding,
            options: AggregateOptions::default(),
            qa_tolerance: DEFAULT_QA_TOLERANCE,
        }
    }

    /// Engine built from application configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configured unit table cannot be loaded
    pub fn from_config(config: &EngineConfig) -> AppResult<Self> {
        let units = Arc::new(config.load_unit_table()?);
        Ok(Self::new(units, config.rounding)
            .with_options(AggregateOptions {
                include_recomputed: config.recompute_overrides,
            })
            .with_qa_tolerance(config.qa_tolerance))
    }

    /// Set aggregation options
    #[must_use]
    pub fn with_options(mut self, options: AggregateOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the override audit tolerance
    #[must_use]
    pub fn with_qa_tolerance(mut self, tolerance: f64) -> Self {
        self.qa_tolerance = tolerance;
        self
    }

    /// Shared unit table
    #[must_use]
    pub fn units(&self) -> &UnitTable {
        &self.units
    }

    /// Display path
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` for a zero serving count
    pub fn scale(&self, recipe: &Recipe, target_servings: u32) -> AppResult<ScaledRecipe> {
        Ok(scale(recipe, target_servings, &self.units, &self.rounding)?)
    }

    /// Nutrition path
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` for a zero serving count and `DataIntegrity`
    /// for a unit missing from the table
    pub fn nutrition(&self, recipe: &Recipe, target_servings: u32) -> AppResult<NutritionResult> {
        Ok(aggregate_with_options(
            recipe,
            target_servings,
            &self.units,
            self.options,
        )?)
    }

    /// Per-line gram and macro breakdown at authored quantities
    ///
    /// # Errors
    ///
    /// Returns `DataIntegrity` for a unit missing from the table
    pub fn breakdown(&self, recipe: &Recipe) -> AppResult<RecipeTotals> {
        Ok(compute_totals(recipe, &self.units)?)
    }

    /// Allergen union
    #[must_use]
    pub fn allergens(&self, recipe: &Recipe) -> AllergenReport {
        collect_allergens(recipe)
    }

    /// Everything a recipe page needs.
    ///
    /// A unit missing from the table fails only the nutrition path; the
    /// scaled lines and allergens are still returned.
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` for a zero serving count
    pub fn compute(&self, recipe: &Recipe, target_servings: u32) -> AppResult<RecipeComputation> {
        let scaled = self.scale(recipe, target_servings)?;
        let allergens = self.allergens(recipe);
        let nutrition = aggregate_with_options(recipe, target_servings, &self.units, self.options);

        match &nutrition {
            Ok(result) => debug!(
                recipe.title = %recipe.title,
                target = target_servings,
                nutrition.status = ?result.status(),
                allergens.complete = allergens.is_complete(),
                "Recipe computed"
            ),
            Err(error) => warn!(
                recipe.title = %recipe.title,
                target = target_servings,
                error = %error,
                "Recipe computed without nutrition"
            ),
        }
        Ok(RecipeComputation {
            scaled,
            nutrition,
            allergens,
        })
    }

    /// Compute many recipes in parallel, each at `target_servings` or its own serving count.
    ///
    /// Results keep the input order; one failing recipe does not affect the
    /// others, and a recipe whose nutrition fails still carries its display output.
    #[must_use]
    pub fn compute_batch(
        &self,
        recipes: &[Recipe],
        target_servings: Option<u32>,
    ) -> Vec<AppResult<RecipeComputation>> {
        let started = Instant::now();
        let results: Vec<AppResult<RecipeComputation>> = recipes
            .par_iter()
            .map(|recipe| self.compute(recipe, target_servings.unwrap_or(recipe.servings)))
            .collect();

        let failed = results.iter().filter(|r| r.is_err()).count();
        let without_nutrition = results
            .iter()
            .filter(|r| r.as_ref().is_ok_and(|page| page.nutrition.is_err()))
            .count();
        info!(
            batch.recipes = recipes.len(),
            batch.failed = failed,
            batch.without_nutrition = without_nutrition,
            batch.elapsed_ms = started.elapsed().as_millis() as u64,
            "Batch computation finished"
        );
        results
    }

    /// Lines whose units are missing from the table
    #[must_use]
    pub fn audit_units(&self, recipe: &Recipe) -> Vec<UnknownUnitLine> {
        self.units.unknown_units(recipe)
    }

    /// Compare an editorial override with the ingredient data.
    ///
    /// Returns `None` when the recipe has no override or the figures agree
    /// within the QA tolerance.
    ///
    /// # Errors
    ///
    /// Returns `DataIntegrity` for a unit missing from the table
    pub fn audit_override(&self, recipe: &Recipe) -> AppResult<Option<NutritionDiscrepancy>> {
        let Some(stated) = recipe.nutrition else {
            return Ok(None);
        };
        let with_recompute = AggregateOptions {
            include_recomputed: true,
        };
        let result = aggregate_with_options(recipe, recipe.servings, &self.units, with_recompute)?;
        if let Some(error) = result.recompute_error {
            return Err(error.into());
        }
        let Some(computed) = result.recomputed else {
            return Ok(None);
        };

        let relative_difference = stated.max_relative_difference(&computed.per_serving);
        if relative_difference <= self.qa_tolerance {
            return Ok(None);
        }
        warn!(
            recipe.title = %recipe.title,
            difference = relative_difference,
            tolerance = self.qa_tolerance,
            "Stated nutrition differs from ingredient data"
        );
        Ok(Some(NutritionDiscrepancy {
            stated,
            computed: computed.per_serving,
            relative_difference,
            computed_partial: computed.partial,
        }))
    }

    /// Unit and override checks for CMS validation
    ///
    /// # Errors
    ///
    /// Propagates failures other than unknown units, which are reported
    pub fn audit(&self, recipe: &Recipe) -> AppResult<RecipeAudit> {
        let unknown_units = self.audit_units(recipe);
        // Recomputation cannot run past an unknown unit
        let discrepancy = if unknown_units.is_empty() {
            self.audit_override(recipe)?
        } else {
            None
        };
        Ok(RecipeAudit {
            title: recipe.title.clone(),
            unknown_units,
            discrepancy,
        })
    }
}
