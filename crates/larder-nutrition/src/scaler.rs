// ABOUTME: Serving scaler rewriting each line's displayed quantity for a target serving count
// ABOUTME: Scales exact authored quantities by a rational factor and applies the display rounding policy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Serving Scaler
//!
//! The display path. Every line is scaled from its exact authored quantity,
//! never from grams, and keeps its unit, group and position. Rounding only
//! affects `display`; `exact` is the unrounded product.

use larder_core::models::{IngredientGroup, IngredientItem, ItemSource, Recipe};
use larder_core::{Quantity, Rational};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::RoundingPolicy;
use crate::errors::EngineError;
use crate::units::{UnitClass, UnitTable};

/// How a line's display value was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Mass/volume rounding (one decimal below the threshold)
    Decimal,
    /// Whole pieces with a minimum
    Count,
    /// Quantity could not be parsed; authored text shown as is
    PassThrough,
}

/// One scaled recipe line
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaledLine {
    /// Display name
    pub name: String,
    /// Unit exactly as authored
    pub unit: String,
    /// Display-only notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Quantity text as authored for the original servings
    pub authored: String,
    /// Unrounded scaled quantity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exact: Option<Rational>,
    /// Rounded value shown to readers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<f64>,
    /// Text shown to readers
    pub display_text: String,
    /// Rounding applied
    pub rounding: RoundingMode,
    #[serde(skip)]
    source: ItemSource,
}

/// Scaled ingredient group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaledGroup {
    /// Heading, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Lines in authored order
    pub lines: Vec<ScaledLine>,
}

/// Recipe rewritten for a target serving count
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaledRecipe {
    /// Title
    pub title: String,
    /// Target servings
    pub servings: u32,
    /// Servings the recipe was authored for
    pub original_servings: u32,
    /// `servings / original_servings`
    pub factor: Rational,
    /// Groups in authored order
    pub groups: Vec<ScaledGroup>,
}

impl ScaledRecipe {
    /// Every line in display order
    pub fn lines(&self) -> impl Iterator<Item = &ScaledLine> {
        self.groups.iter().flat_map(|group| group.lines.iter())
    }

    /// The scaled recipe as a recipe authored for the target servings.
    ///
    /// Lines keep their exact scaled quantity, so scaling the result again
    /// composes factors without rounding loss. Pass-through lines keep their
    /// authored text.
    #[must_use]
    pub fn to_recipe(&self) -> Recipe {
        let groups = self
            .groups
            .iter()
            .map(|group| IngredientGroup {
                name: group.name.clone(),
                items: group
                    .lines
                    .iter()
                    .map(|line| IngredientItem {
                        source: line.source.clone(),
                        quantity: line
                            .exact
                            .map_or_else(|| Quantity::parse(line.authored.clone()), Quantity::exact),
                        unit: line.unit.clone(),
                        notes: line.notes.clone(),
                    })
                    .collect(),
            })
            .collect();
        Recipe::new(self.title.clone(), self.servings, groups)
    }
}

/// Format a display value without trailing zeros
#[must_use]
pub fn format_display(value: f64, decimal_places: u32) -> String {
    let text = format!("{value:.prec$}", prec = decimal_places as usize);
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_owned()
    } else {
        text
    }
}

/// Scale a recipe to `target_servings`.
///
/// # Errors
///
/// Returns [`EngineError::InvalidServings`] when the target or the recipe's
/// own serving count is zero. Unknown units and unparsable quantities never
/// fail the display path; they are logged and passed through.
pub fn scale(
    recipe: &Recipe,
    target_servings: u32,
    units: &UnitTable,
    policy: &RoundingPolicy,
) -> Result<ScaledRecipe, EngineError> {
    let factor = serving_factor(recipe.servings, target_servings)?;
    debug!(
        recipe.title = %recipe.title,
        recipe.servings = recipe.servings,
        target = target_servings,
        factor = %factor,
        "Scaling recipe"
    );

    let groups = recipe
        .groups
        .iter()
        .map(|group| ScaledGroup {
            name: group.name.clone(),
            lines: group
                .items
                .iter()
                .map(|item| scale_line(item, factor, units, policy))
                .collect(),
        })
        .collect();

    Ok(ScaledRecipe {
        title: recipe.title.clone(),
        servings: target_servings,
        original_servings: recipe.servings,
        factor,
        groups,
    })
}

/// Exact `target / servings`
///
/// # Errors
///
/// Returns [`EngineError::InvalidServings`] if either count is zero.
pub fn serving_factor(servings: u32, target_servings: u32) -> Result<Rational, EngineError> {
    let invalid = || EngineError::InvalidServings {
        recipe: servings,
        target: target_servings,
    };
    if servings == 0 || target_servings == 0 {
        return Err(invalid());
    }
    Rational::new(u64::from(target_servings), u64::from(servings)).ok_or_else(invalid)
}

fn rounding_mode(item: &IngredientItem, units: &UnitTable) -> RoundingMode {
    let Some(entry) = units.lookup(&item.unit) else {
        warn!(
            item.name = item.display_name(),
            item.unit = %item.unit,
            "Unknown unit in scaling, using mass rounding"
        );
        return RoundingMode::Decimal;
    };
    match entry.class {
        UnitClass::Mass | UnitClass::Volume => RoundingMode::Decimal,
        UnitClass::Count => RoundingMode::Count,
        UnitClass::None => {
            let has_piece_weight = item
                .source
                .ingredient()
                .is_some_and(|ingredient| ingredient.grams_per_piece.is_some());
            if has_piece_weight {
                RoundingMode::Count
            } else {
                RoundingMode::Decimal
            }
        }
    }
}

fn scale_line(
    item: &IngredientItem,
    factor: Rational,
    units: &UnitTable,
    policy: &RoundingPolicy,
) -> ScaledLine {
    let mut line = ScaledLine {
        name: item.display_name().to_owned(),
        unit: item.unit.clone(),
        notes: item.notes.clone(),
        authored: item.quantity.authored().to_owned(),
        exact: None,
        display: None,
        display_text: item.quantity.authored().to_owned(),
        rounding: RoundingMode::PassThrough,
        source: item.source.clone(),
    };

    let quantity = match item.quantity.value() {
        Ok(quantity) => quantity,
        Err(reason) => {
            warn!(
                item.name = %line.name,
                item.quantity = %line.authored,
                error = %reason,
                "Unparsable quantity passed through unscaled"
            );
            return line;
        }
    };

    let exact = quantity.checked_mul(factor);
    let value = exact.map_or_else(
        || {
            warn!(
                item.name = %line.name,
                factor = %factor,
                "Exact scaling overflowed, falling back to floating point"
            );
            quantity.to_f64() * factor.to_f64()
        },
        Rational::to_f64,
    );

    let mode = rounding_mode(item, units);
    let (display, places) = match mode {
        RoundingMode::Count => (policy.round_count(value), 0),
        _ => (policy.round_decimal(value), policy.decimal_places),
    };

    line.exact = exact;
    line.display = Some(display);
    line.display_text = format_display(display, places);
    line.rounding = mode;
    line
}
