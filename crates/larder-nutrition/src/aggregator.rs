// ABOUTME: Nutrition and allergen aggregator summing normalized line masses into macros
// ABOUTME: Produces per-serving and batch totals, honors editorial overrides and unions allergen tags
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Nutrition & Allergen Aggregator
//!
//! The nutrition path. Each line is normalized from its authored, unscaled
//! quantity; contributions are summed for the whole batch and divided by the
//! authored serving count. The target serving count only changes the reported
//! batch totals, never the per-serving figures.

use std::collections::BTreeSet;

use larder_core::models::{ItemSource, Macros, Recipe};
use serde::Serialize;
use tracing::{debug, warn};

use crate::errors::EngineError;
use crate::normalize::{normalize, NormalizationError};
use crate::scaler::serving_factor;
use crate::units::UnitTable;

/// Where the reported figures came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NutritionSource {
    /// Summed from ingredient data
    Computed,
    /// Editorial figures from the recipe
    Override,
}

/// How much the reader can trust the figures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NutritionStatus {
    /// Every line contributed, or an editorial override is in effect
    Complete,
    /// Some lines were excluded
    Approximate,
    /// No line contributed
    Unavailable,
}

/// A line left out of the computed aggregate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingItem {
    /// Line display name
    pub name: String,
    /// Group heading, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Stable reason code (`MISSING_DENSITY`, ...)
    pub reason: &'static str,
    /// Human-readable detail
    pub detail: String,
}

/// Grams and macros contributed by one line
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineContribution {
    /// Line display name
    pub name: String,
    /// Group heading, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Normalized mass
    pub grams: f64,
    /// Macros for that mass
    pub macros: Macros,
}

/// Unscaled per-line breakdown of a recipe
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeTotals {
    /// Lines that normalized
    pub lines: Vec<LineContribution>,
    /// Lines that did not
    pub missing: Vec<MissingItem>,
}

impl RecipeTotals {
    /// Grams across all contributing lines
    #[must_use]
    pub fn grams(&self) -> f64 {
        self.lines.iter().map(|line| line.grams).sum()
    }

    /// Macros across all contributing lines
    #[must_use]
    pub fn macros(&self) -> Macros {
        self.lines.iter().map(|line| line.macros).sum()
    }
}

/// Aggregation switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AggregateOptions {
    /// Attach the computed aggregate when an override is returned
    pub include_recomputed: bool,
}

/// Nutrition for a recipe at a target serving count
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionResult {
    /// Target servings
    pub servings: u32,
    /// Servings the recipe was authored for
    pub original_servings: u32,
    /// Per-serving macros
    #[serde(flatten)]
    pub per_serving: Macros,
    /// Macros for the batch at the target servings
    pub total: Macros,
    /// Grams for the batch at the target servings
    pub total_grams: f64,
    /// Some lines were excluded
    pub partial: bool,
    /// Excluded lines
    pub missing_items: Vec<MissingItem>,
    /// Computed or editorial
    pub source: NutritionSource,
    /// Computed aggregate alongside an override, for QA
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recomputed: Option<Box<NutritionResult>>,
    /// Why the requested QA recomputation is missing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recompute_error: Option<EngineError>,
    #[serde(skip)]
    contributing_lines: usize,
}

impl NutritionResult {
    /// Trust level of the figures
    #[must_use]
    pub const fn status(&self) -> NutritionStatus {
        match self.source {
            NutritionSource::Override => NutritionStatus::Complete,
            NutritionSource::Computed if self.contributing_lines == 0 => {
                NutritionStatus::Unavailable
            }
            NutritionSource::Computed if self.partial => NutritionStatus::Approximate,
            NutritionSource::Computed => NutritionStatus::Complete,
        }
    }

    /// Number of lines that contributed to a computed result
    #[must_use]
    pub const fn contributing_lines(&self) -> usize {
        self.contributing_lines
    }

    /// Display names of the excluded lines, in recipe order
    #[must_use]
    pub fn missing_names(&self) -> Vec<&str> {
        self.missing_items
            .iter()
            .map(|item| item.name.as_str())
            .collect()
    }
}

/// Union of allergen tags across a recipe
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllergenReport {
    /// Trimmed, lowercase tags from catalog ingredients
    pub allergens: BTreeSet<String>,
    /// Free-text lines whose allergens are unknown
    pub unverified_items: Vec<String>,
}

impl AllergenReport {
    /// False when any line could not be checked
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unverified_items.is_empty()
    }

    /// True when `tag` is present, ignoring case
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.allergens.contains(&tag.trim().to_lowercase())
    }
}

/// Normalize every line of the recipe at its authored quantities.
///
/// # Errors
///
/// Returns [`EngineError::UnknownUnit`] for the first line whose unit is
/// missing from the table. All other line failures are collected in
/// [`RecipeTotals::missing`].
pub fn compute_totals(recipe: &Recipe, units: &UnitTable) -> Result<RecipeTotals, EngineError> {
    let mut totals = RecipeTotals::default();
    for (group, item) in recipe.items() {
        match normalize(item, units) {
            Ok(mass) => {
                // normalize only succeeds for catalog lines
                if let ItemSource::Catalog(ingredient) = &item.source {
                    totals.lines.push(LineContribution {
                        name: ingredient.name.clone(),
                        group: group.map(str::to_owned),
                        grams: mass.grams(),
                        macros: ingredient.macros_for_grams(mass.grams()),
                    });
                }
            }
            Err(NormalizationError::UnknownUnit { item, unit }) => {
                return Err(EngineError::UnknownUnit { unit, item });
            }
            Err(error) => {
                debug!(
                    recipe.title = %recipe.title,
                    item.name = item.display_name(),
                    reason = error.code(),
                    "Line excluded from nutrition"
                );
                totals.missing.push(MissingItem {
                    name: item.display_name().to_owned(),
                    group: group.map(str::to_owned),
                    reason: error.code(),
                    detail: error.to_string(),
                });
            }
        }
    }
    Ok(totals)
}

/// Aggregate nutrition for `target_servings` with default options.
///
/// # Errors
///
/// See [`aggregate_with_options`].
pub fn aggregate(
    recipe: &Recipe,
    target_servings: u32,
    units: &UnitTable,
) -> Result<NutritionResult, EngineError> {
    aggregate_with_options(recipe, target_servings, units, AggregateOptions::default())
}

/// Aggregate nutrition for `target_servings`.
///
/// An editorial override on the recipe is returned verbatim; the computed
/// aggregate is only attached when `options.include_recomputed` is set. A
/// recomputation that fails leaves the override intact and is reported in
/// [`NutritionResult::recompute_error`].
///
/// # Errors
///
/// Returns [`EngineError::InvalidServings`] for a zero target or recipe
/// serving count and [`EngineError::UnknownUnit`] when a recipe without an
/// override meets a unit missing from the table.
pub fn aggregate_with_options(
    recipe: &Recipe,
    target_servings: u32,
    units: &UnitTable,
    options: AggregateOptions,
) -> Result<NutritionResult, EngineError> {
    serving_factor(recipe.servings, target_servings)?;

    let Some(per_serving) = recipe.nutrition else {
        return computed(recipe, target_servings, units);
    };

    let (recomputed, recompute_error) = if options.include_recomputed {
        match computed(recipe, target_servings, units) {
            Ok(result) => (Some(Box::new(result)), None),
            Err(error) => {
                warn!(
                    recipe.title = %recipe.title,
                    error = %error,
                    "Override returned without recomputed nutrition"
                );
                (None, Some(error))
            }
        }
    } else {
        (None, None)
    };

    Ok(NutritionResult {
        servings: target_servings,
        original_servings: recipe.servings,
        per_serving,
        total: per_serving.scaled(f64::from(target_servings)),
        total_grams: recomputed.as_ref().map_or(0.0, |r| r.total_grams),
        partial: false,
        missing_items: Vec::new(),
        source: NutritionSource::Override,
        recomputed,
        recompute_error,
        contributing_lines: 0,
    })
}

fn computed(
    recipe: &Recipe,
    target_servings: u32,
    units: &UnitTable,
) -> Result<NutritionResult, EngineError> {
    let totals = compute_totals(recipe, units)?;
    let servings = f64::from(recipe.servings);
    let target = f64::from(target_servings);

    let per_serving = totals.macros().scaled(servings.recip());
    let grams_per_serving = totals.grams() / servings;

    Ok(NutritionResult {
        servings: target_servings,
        original_servings: recipe.servings,
        per_serving,
        total: per_serving.scaled(target),
        total_grams: grams_per_serving * target,
        partial: !totals.missing.is_empty(),
        missing_items: totals.missing,
        source: NutritionSource::Computed,
        recomputed: None,
        recompute_error: None,
        contributing_lines: totals.lines.len(),
    })
}

/// Union allergen tags from every catalog-backed line.
///
/// Tags are collected even when the line's quantity or unit cannot be
/// normalized; free-text lines are listed as unverified.
#[must_use]
pub fn collect_allergens(recipe: &Recipe) -> AllergenReport {
    let mut report = AllergenReport::default();
    for (_, item) in recipe.items() {
        match &item.source {
            ItemSource::Catalog(ingredient) => {
                report.allergens.extend(
                    ingredient
                        .allergens
                        .iter()
                        .map(|tag| tag.trim().to_lowercase())
                        .filter(|tag| !tag.is_empty()),
                );
            }
            ItemSource::FreeText(text) => report.unverified_items.push(text.clone()),
        }
    }
    report
}
