// ABOUTME: Id-keyed ingredient catalog with case-insensitive name and synonym lookup
// ABOUTME: Validates every entry and rejects duplicate ids or colliding names at build time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use super::Ingredient;
use crate::errors::{AppError, AppResult};

/// Validated collection of ingredients shared by every recipe that references them
#[derive(Debug, Clone, Default)]
pub struct IngredientCatalog {
    by_id: BTreeMap<String, Arc<Ingredient>>,
    // lowercase name or synonym -> id
    names: HashMap<String, String>,
}

fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

impl IngredientCatalog {
    /// Build a catalog from ingredient records
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when an ingredient fails validation and
    /// `ResourceAlreadyExists` when an id, name or synonym is used twice.
    pub fn from_ingredients<I>(ingredients: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = Ingredient>,
    {
        let mut catalog = Self::default();
        for ingredient in ingredients {
            catalog.insert(ingredient)?;
        }
        Ok(catalog)
    }

    /// Add one ingredient
    ///
    /// # Errors
    ///
    /// Same conditions as [`IngredientCatalog::from_ingredients`]. The catalog
    /// is left unchanged on error.
    pub fn insert(&mut self, ingredient: Ingredient) -> AppResult<()> {
        ingredient.validate()?;
        if self.by_id.contains_key(&ingredient.id) {
            return Err(AppError::already_exists(format!(
                "ingredient id '{}'",
                ingredient.id
            )));
        }

        let mut keys: Vec<String> = Vec::with_capacity(ingredient.synonyms.len() + 1);
        for name in std::iter::once(&ingredient.name).chain(&ingredient.synonyms) {
            let key = name_key(name);
            if key.is_empty() || keys.contains(&key) {
                continue;
            }
            if let Some(owner) = self.names.get(&key) {
                return Err(AppError::already_exists(format!(
                    "ingredient name '{name}' (used by '{owner}')"
                )));
            }
            keys.push(key);
        }

        for key in keys {
            self.names.insert(key, ingredient.id.clone());
        }
        self.by_id
            .insert(ingredient.id.clone(), Arc::new(ingredient));
        Ok(())
    }

    /// Look up an ingredient by reference id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Arc<Ingredient>> {
        self.by_id.get(id).cloned()
    }

    /// Look up an ingredient by canonical name or synonym, ignoring case
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<Arc<Ingredient>> {
        self.names
            .get(&name_key(name))
            .and_then(|id| self.by_id.get(id))
            .cloned()
    }

    /// Number of ingredients
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// True when the catalog holds no ingredients
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Ingredients ordered by id
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Ingredient>> {
        self.by_id.values()
    }
}
