// ABOUTME: Recipe, ingredient group and recipe line models used by the engine
// ABOUTME: Lines carry a tagged source (catalog ingredient or free text) and an exact parsed quantity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use super::{Ingredient, Macros};
use crate::quantity::Quantity;

/// Where a recipe line's ingredient data comes from
#[derive(Debug, Clone, PartialEq)]
pub enum ItemSource {
    /// Resolved catalog ingredient
    Catalog(Arc<Ingredient>),
    /// Authored text with no catalog data behind it
    FreeText(String),
}

impl ItemSource {
    /// Catalog ingredient, if the line resolved to one
    #[must_use]
    pub fn ingredient(&self) -> Option<&Ingredient> {
        match self {
            Self::Catalog(ingredient) => Some(ingredient),
            Self::FreeText(_) => None,
        }
    }
}

/// One line of a recipe
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientItem {
    /// Ingredient source
    pub source: ItemSource,
    /// Authored quantity and its exact value
    pub quantity: Quantity,
    /// Unit symbol as authored, may be empty
    pub unit: String,
    /// Display-only notes ("finely chopped")
    pub notes: Option<String>,
}

impl IngredientItem {
    /// Line backed by a catalog ingredient
    #[must_use]
    pub fn catalog(ingredient: Arc<Ingredient>, quantity: &str, unit: &str) -> Self {
        Self {
            source: ItemSource::Catalog(ingredient),
            quantity: Quantity::parse(quantity),
            unit: unit.to_owned(),
            notes: None,
        }
    }

    /// Free-text line
    #[must_use]
    pub fn free_text(text: impl Into<String>, quantity: &str, unit: &str) -> Self {
        Self {
            source: ItemSource::FreeText(text.into()),
            quantity: Quantity::parse(quantity),
            unit: unit.to_owned(),
            notes: None,
        }
    }

    /// Attach display notes
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Name shown to readers: the catalog name or the authored text
    #[must_use]
    pub fn display_name(&self) -> &str {
        match &self.source {
            ItemSource::Catalog(ingredient) => &ingredient.name,
            ItemSource::FreeText(text) => text,
        }
    }
}

/// Optionally named, ordered block of lines ("For the sauce")
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IngredientGroup {
    /// Heading, if any
    pub name: Option<String>,
    /// Lines in display order
    pub items: Vec<IngredientItem>,
}

impl IngredientGroup {
    /// Group without a heading
    #[must_use]
    pub const fn unnamed(items: Vec<IngredientItem>) -> Self {
        Self { name: None, items }
    }

    /// Group with a heading
    #[must_use]
    pub fn named(name: impl Into<String>, items: Vec<IngredientItem>) -> Self {
        Self {
            name: Some(name.into()),
            items,
        }
    }
}

/// A recipe as the engine sees it
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    /// Title
    pub title: String,
    /// Servings the authored quantities make
    pub servings: u32,
    /// Ingredient groups in display order
    pub groups: Vec<IngredientGroup>,
    /// Editorial per-serving nutrition that overrides the computed aggregate
    pub nutrition: Option<Macros>,
}

impl Recipe {
    /// Recipe with no nutrition override
    #[must_use]
    pub fn new(title: impl Into<String>, servings: u32, groups: Vec<IngredientGroup>) -> Self {
        Self {
            title: title.into(),
            servings,
            groups,
            nutrition: None,
        }
    }

    /// Attach an editorial nutrition override
    #[must_use]
    pub fn with_nutrition(mut self, per_serving: Macros) -> Self {
        self.nutrition = Some(per_serving);
        self
    }

    /// Every line with its group heading, in display order
    pub fn items(&self) -> impl Iterator<Item = (Option<&str>, &IngredientItem)> {
        self.groups.iter().flat_map(|group| {
            group
                .items
                .iter()
                .map(move |item| (group.name.as_deref(), item))
        })
    }
}
