// ABOUTME: Reusable pantry ingredient with per-100 g macros and conversion data
// ABOUTME: Carries the optional density and piece weight needed to normalize volume and count units
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::Macros;
use crate::constants::nutrition::GRAMS_BASIS;
use crate::errors::{AppError, AppResult};

/// A catalog ingredient as stored in the CMS
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    /// Reference key used by recipe lines (`ingredientRef`)
    pub id: String,
    /// Canonical display name, unique within the catalog
    pub name: String,
    /// Alternate names used for lookup and deduplication
    #[serde(default)]
    pub synonyms: Vec<String>,
    /// Energy per 100 g (kcal)
    #[serde(rename = "kcal100")]
    pub kcal_100: f64,
    /// Protein per 100 g
    #[serde(rename = "protein100")]
    pub protein_100: f64,
    /// Fat per 100 g
    #[serde(rename = "fat100")]
    pub fat_100: f64,
    /// Carbohydrates per 100 g
    #[serde(rename = "carbs100")]
    pub carbs_100: f64,
    /// Free-form allergen tags
    #[serde(default)]
    pub allergens: BTreeSet<String>,
    /// Grams per millilitre, required for volume units
    #[serde(
        rename = "density_g_per_ml",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub density_g_per_ml: Option<f64>,
    /// Weight of one piece in grams, required for count units
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grams_per_piece: Option<f64>,
}

impl Ingredient {
    /// Create an ingredient with macros and no conversion data
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, per_100g: Macros) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            synonyms: Vec::new(),
            kcal_100: per_100g.calories,
            protein_100: per_100g.protein,
            fat_100: per_100g.fat,
            carbs_100: per_100g.carbs,
            allergens: BTreeSet::new(),
            density_g_per_ml: None,
            grams_per_piece: None,
        }
    }

    /// Set the density in grams per millilitre
    #[must_use]
    pub fn with_density(mut self, grams_per_ml: f64) -> Self {
        self.density_g_per_ml = Some(grams_per_ml);
        self
    }

    /// Set the weight of one piece in grams
    #[must_use]
    pub fn with_piece_weight(mut self, grams: f64) -> Self {
        self.grams_per_piece = Some(grams);
        self
    }

    /// Add allergen tags
    #[must_use]
    pub fn with_allergens<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allergens.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Add lookup synonyms
    #[must_use]
    pub fn with_synonyms<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.synonyms.extend(names.into_iter().map(Into::into));
        self
    }

    /// Macros per 100 g
    #[must_use]
    pub const fn per_100g(&self) -> Macros {
        Macros::new(self.kcal_100, self.protein_100, self.fat_100, self.carbs_100)
    }

    /// Macros contributed by `grams` of this ingredient
    #[must_use]
    pub fn macros_for_grams(&self, grams: f64) -> Macros {
        self.per_100g().scaled(grams / GRAMS_BASIS)
    }

    /// Check that the ingredient can take part in nutrition arithmetic
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty id or name, negative or non-finite
    /// macros, or a non-positive density or piece weight.
    pub fn validate(&self) -> AppResult<()> {
        if self.id.trim().is_empty() {
            return Err(AppError::invalid_input("ingredient id must not be empty"));
        }
        if self.name.trim().is_empty() {
            return Err(AppError::invalid_input(format!(
                "ingredient '{}' has an empty name",
                self.id
            )));
        }
        if !self.per_100g().is_valid() {
            return Err(AppError::invalid_input(format!(
                "ingredient '{}' has negative or non-finite macros",
                self.id
            )));
        }
        let positive = |value: Option<f64>| match value {
            Some(v) => v.is_finite() && v > 0.0,
            None => true,
        };
        if !positive(self.density_g_per_ml) {
            return Err(AppError::invalid_input(format!(
                "ingredient '{}' density must be positive",
                self.id
            )));
        }
        if !positive(self.grams_per_piece) {
            return Err(AppError::invalid_input(format!(
                "ingredient '{}' piece weight must be positive",
                self.id
            )));
        }
        Ok(())
    }
}
