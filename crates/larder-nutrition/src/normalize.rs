// ABOUTME: Quantity normalizer converting one recipe line to grams
// ABOUTME: Applies unit class rules with the ingredient's density or piece weight
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use larder_core::models::{IngredientItem, ItemSource};
use larder_core::QuantityError;
use serde::Serialize;
use thiserror::Error;

use crate::units::{UnitClass, UnitTable};

/// Mass in grams produced by normalization
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct GramsMass(f64);

impl GramsMass {
    /// Grams as a float
    #[must_use]
    pub const fn grams(self) -> f64 {
        self.0
    }
}

/// Why a line could not be converted to grams
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NormalizationError {
    /// Quantity text is empty, zero, negative, a range or unparsable
    #[error("invalid quantity for '{item}': {reason}")]
    InvalidQuantity {
        /// Line display name
        item: String,
        /// Parse failure
        reason: QuantityError,
    },
    /// Unit symbol missing from the unit table
    #[error("unknown unit '{unit}' for '{item}'")]
    UnknownUnit {
        /// Line display name
        item: String,
        /// Unit as authored
        unit: String,
    },
    /// Volume unit on an ingredient without a density
    #[error("'{item}' has no density for volume unit '{unit}'")]
    MissingDensity {
        /// Ingredient name
        item: String,
        /// Unit as authored
        unit: String,
    },
    /// Count or unit-less line on an ingredient without a piece weight
    #[error("'{item}' has no piece weight")]
    MissingPieceWeight {
        /// Ingredient name
        item: String,
    },
    /// Free-text line with no catalog data
    #[error("'{item}' is not linked to ingredient data")]
    NoIngredientData {
        /// Authored text
        item: String,
    },
}

impl NormalizationError {
    /// Stable reason code reported in `missingItems`
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidQuantity { .. } => "INVALID_QUANTITY",
            Self::UnknownUnit { .. } => "UNKNOWN_UNIT",
            Self::MissingDensity { .. } => "MISSING_DENSITY",
            Self::MissingPieceWeight { .. } => "MISSING_PIECE_WEIGHT",
            Self::NoIngredientData { .. } => "NO_INGREDIENT_DATA",
        }
    }

    /// Whether this failure aborts aggregation instead of marking it partial
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::UnknownUnit { .. })
    }
}

/// Convert one recipe line to grams.
///
/// Checks run in a fixed order: unit lookup, item source, quantity, then the
/// class rule. The quantity used is the authored, unscaled amount.
///
/// # Errors
///
/// Returns a [`NormalizationError`] naming the first check that failed.
pub fn normalize(item: &IngredientItem, units: &UnitTable) -> Result<GramsMass, NormalizationError> {
    let entry = units
        .lookup(&item.unit)
        .ok_or_else(|| NormalizationError::UnknownUnit {
            item: item.display_name().to_owned(),
            unit: item.unit.clone(),
        })?;

    let ingredient = match &item.source {
        ItemSource::Catalog(ingredient) => ingredient,
        ItemSource::FreeText(text) => {
            return Err(NormalizationError::NoIngredientData { item: text.clone() })
        }
    };

    let quantity = item
        .quantity
        .value()
        .map_err(|reason| NormalizationError::InvalidQuantity {
            item: ingredient.name.clone(),
            reason,
        })?
        .to_f64();

    let grams = match entry.class {
        UnitClass::Mass => quantity * entry.factor,
        UnitClass::Volume => {
            let density =
                ingredient
                    .density_g_per_ml
                    .ok_or_else(|| NormalizationError::MissingDensity {
                        item: ingredient.name.clone(),
                        unit: item.unit.clone(),
                    })?;
            quantity * entry.factor * density
        }
        UnitClass::Count | UnitClass::None => {
            let piece = ingredient.grams_per_piece.ok_or_else(|| {
                NormalizationError::MissingPieceWeight {
                    item: ingredient.name.clone(),
                }
            })?;
            quantity * entry.factor * piece
        }
    };

    Ok(GramsMass(grams))
}
