// ABOUTME: CMS document ingestion turning authored recipe and catalog files into engine models
// ABOUTME: Parses JSON or YAML, resolves ingredient references and parses quantities once
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Document ingestion.
//!
//! The CMS emits recipes as camelCase documents whose lines either reference a
//! catalog ingredient (`ingredientRef`) or carry plain text
//! (`ingredientText`). Resolution tags every line with its source; a reference
//! that does not resolve degrades to free text and is logged, it never
//! receives a placeholder ingredient.

use std::fmt;
use std::fs;
use std::path::Path;

use larder_core::errors::{AppError, AppResult, ErrorCode};
use larder_core::models::{
    Ingredient, IngredientCatalog, IngredientGroup, IngredientItem, ItemSource, Macros, Recipe,
};
use larder_core::Quantity;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Serialization format of an authored document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// `.json`
    Json,
    /// `.yaml` / `.yml`
    Yaml,
}

impl DocumentFormat {
    /// Choose the format from a file extension
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` for any other extension
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);
        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            _ => Err(AppError::new(
                ErrorCode::InvalidFormat,
                format!(
                    "{} must have a .json, .yaml or .yml extension",
                    path.display()
                ),
            )),
        }
    }
}

/// Authored quantity: text as typed, or a bare number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuantityDocument {
    /// Number written without quotes
    Number(f64),
    /// Text ("1 1/2", "½")
    Text(String),
}

impl fmt::Display for QuantityDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl Default for QuantityDocument {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

/// One authored recipe line
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDocument {
    /// Catalog ingredient id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredient_ref: Option<String>,
    /// Plain text for lines without catalog data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredient_text: Option<String>,
    /// Authored quantity
    #[serde(default)]
    pub quantity: QuantityDocument,
    /// Unit symbol, may be empty
    #[serde(default)]
    pub unit: String,
    /// Display-only notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Authored ingredient group
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDocument {
    /// Heading, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Lines in display order
    #[serde(default)]
    pub items: Vec<ItemDocument>,
}

/// Editorial per-serving nutrition
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionDocument {
    /// kcal per serving
    pub calories: f64,
    /// Protein grams per serving
    #[serde(default)]
    pub protein: f64,
    /// Fat grams per serving
    #[serde(default)]
    pub fat: f64,
    /// Carbohydrate grams per serving
    #[serde(default)]
    pub carbs: f64,
}

impl From<NutritionDocument> for Macros {
    fn from(doc: NutritionDocument) -> Self {
        Self::new(doc.calories, doc.protein, doc.fat, doc.carbs)
    }
}

/// Authored recipe
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDocument {
    /// Title
    pub title: String,
    /// Servings the quantities make
    pub servings: u32,
    /// Ingredient groups
    #[serde(default, alias = "ingredientGroups")]
    pub groups: Vec<GroupDocument>,
    /// Editorial nutrition override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<NutritionDocument>,
}

/// Catalog file: a bare list or `{ ingredients: [...] }`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    List(Vec<Ingredient>),
    Wrapped { ingredients: Vec<Ingredient> },
}

/// Decode a document from text
///
/// # Errors
///
/// Returns `SerializationError` when the text does not match the expected shape
pub fn parse_document<T: DeserializeOwned>(text: &str, format: DocumentFormat) -> AppResult<T> {
    match format {
        DocumentFormat::Json => Ok(serde_json::from_str(text)?),
        DocumentFormat::Yaml => serde_yaml::from_str(text).map_err(|e| {
            AppError::serialization(format!("YAML error: {e}")).with_source(e)
        }),
    }
}

fn read_document<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let format = DocumentFormat::from_path(path)?;
    let text = fs::read_to_string(path).map_err(|e| {
        AppError::new(
            ErrorCode::StorageError,
            format!("cannot read {}", path.display()),
        )
        .with_source(e)
    })?;
    parse_document(&text, format).map_err(|e| AppError {
        message: format!("{}: {}", path.display(), e.message),
        ..e
    })
}

/// Decode a catalog from text
///
/// # Errors
///
/// Returns an error when decoding fails or the ingredients do not form a valid catalog
pub fn parse_catalog(text: &str, format: DocumentFormat) -> AppResult<IngredientCatalog> {
    let doc: CatalogDocument = parse_document(text, format)?;
    catalog_from_document(doc)
}

fn catalog_from_document(doc: CatalogDocument) -> AppResult<IngredientCatalog> {
    let ingredients = match doc {
        CatalogDocument::List(ingredients) | CatalogDocument::Wrapped { ingredients } => {
            ingredients
        }
    };
    IngredientCatalog::from_ingredients(ingredients)
}

/// Load an ingredient catalog file
///
/// # Errors
///
/// Returns an error when the file cannot be read or decoded, or the catalog is invalid
pub fn load_catalog(path: &Path) -> AppResult<IngredientCatalog> {
    let catalog = catalog_from_document(read_document(path)?)?;
    debug!(path = %path.display(), ingredients = catalog.len(), "Loaded catalog");
    Ok(catalog)
}

/// Load an authored recipe document
///
/// # Errors
///
/// Returns an error when the file cannot be read or decoded
pub fn load_recipe_document(path: &Path) -> AppResult<RecipeDocument> {
    read_document(path)
}

/// Load and resolve a recipe file
///
/// # Errors
///
/// Returns an error when the file cannot be read or decoded, or does not resolve
pub fn load_recipe(path: &Path, catalog: &IngredientCatalog) -> AppResult<Recipe> {
    resolve(&load_recipe_document(path)?, catalog)
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

fn resolve_source(
    item: &ItemDocument,
    catalog: &IngredientCatalog,
    title: &str,
) -> AppResult<ItemSource> {
    let text = non_blank(item.ingredient_text.as_ref());
    match non_blank(item.ingredient_ref.as_ref()) {
        Some(id) => match catalog.get(id) {
            Some(ingredient) => Ok(ItemSource::Catalog(ingredient)),
            None => {
                warn!(
                    recipe.title = %title,
                    item.ingredient_ref = %id,
                    "Ingredient reference not in catalog, treating line as free text"
                );
                Ok(ItemSource::FreeText(text.unwrap_or(id).to_owned()))
            }
        },
        None => text.map(|t| ItemSource::FreeText(t.to_owned())).ok_or_else(|| {
            AppError::invalid_input(format!(
                "recipe '{title}' has a line with neither ingredientRef nor ingredientText"
            ))
        }),
    }
}

/// Resolve an authored recipe against a catalog.
///
/// Quantities are parsed here, once; lines whose quantity does not parse are
/// kept with their authored text so the display path can still show them.
///
/// # Errors
///
/// Returns `ValueOutOfRange` for zero servings, `InvalidInput` for an empty
/// title, a line with no ingredient at all or invalid override nutrition
pub fn resolve(doc: &RecipeDocument, catalog: &IngredientCatalog) -> AppResult<Recipe> {
    if doc.title.trim().is_empty() {
        return Err(AppError::invalid_input("recipe title must not be empty"));
    }
    if doc.servings == 0 {
        return Err(AppError::new(
            ErrorCode::ValueOutOfRange,
            format!("recipe '{}' must make at least one serving", doc.title),
        ));
    }

    let groups = doc
        .groups
        .iter()
        .map(|group| {
            let items = group
                .items
                .iter()
                .map(|item| {
                    Ok(IngredientItem {
                        source: resolve_source(item, catalog, &doc.title)?,
                        quantity: Quantity::parse(item.quantity.to_string()),
                        unit: item.unit.clone(),
                        notes: item.notes.clone(),
                    })
                })
                .collect::<AppResult<Vec<_>>>()?;
            Ok(IngredientGroup {
                name: group.name.clone(),
                items,
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    let nutrition = doc.nutrition.map(Macros::from);
    if nutrition.is_some_and(|macros| !macros.is_valid()) {
        return Err(AppError::invalid_input(format!(
            "recipe '{}' has negative or non-finite nutrition",
            doc.title
        )));
    }

    Ok(Recipe {
        title: doc.title.clone(),
        servings: doc.servings,
        groups,
        nutrition,
    })
}
