// ABOUTME: Integration tests for CMS document ingestion and the ingredient catalog
// ABOUTME: Tests JSON and YAML decoding, reference resolution, catalog validation and file errors
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

mod common;

use std::fs;
use std::path::Path;

use larder::services::ingestion::{parse_catalog, parse_document, ItemDocument, QuantityDocument};
use larder::services::{load_catalog, load_recipe, resolve, DocumentFormat, RecipeDocument};
use larder::ErrorCode;
use larder_core::models::{Ingredient, IngredientCatalog, ItemSource, Macros};
use larder_core::Rational;
use tempfile::TempDir;

const CATALOG_YAML: &str = r"
ingredients:
  - id: ing-sushi-rice
    name: Sushi rice
    synonyms: [Japanese rice]
    kcal100: 130
    protein100: 2.7
    fat100: 0.3
    carbs100: 28
  - id: ing-rice-vinegar
    name: Rice vinegar
    kcal100: 18
    protein100: 0
    fat100: 0
    carbs100: 0.8
    density_g_per_ml: 1.01
  - id: ing-nori
    name: Nori
    kcal100: 35
    protein100: 5.8
    fat100: 0.3
    carbs100: 5.1
    gramsPerPiece: 2.5
    allergens: [seaweed]
";

const RECIPE_JSON: &str = r#"{
  "title": "Sushi rice",
  "servings": 4,
  "ingredientGroups": [
    {
      "items": [
        { "ingredientRef": "ing-sushi-rice", "quantity": 200, "unit": "g" },
        { "ingredientRef": "ing-rice-vinegar", "quantity": "1 1/2", "unit": "tbsp", "notes": "warmed" }
      ]
    },
    {
      "name": "To serve",
      "items": [
        { "ingredientRef": "ing-nori", "quantity": "½", "unit": "sheet" },
        { "ingredientText": "pickled ginger", "quantity": "2-3", "unit": "slices" }
      ]
    }
  ]
}"#;

fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn yaml_catalog() -> IngredientCatalog {
    parse_catalog(CATALOG_YAML, DocumentFormat::Yaml).unwrap()
}

// ============================================================================
// Catalog
// ============================================================================

#[test]
fn test_catalog_from_yaml() {
    let catalog = yaml_catalog();
    assert_eq!(catalog.len(), 3);

    let vinegar = catalog.get("ing-rice-vinegar").unwrap();
    assert_eq!(vinegar.density_g_per_ml, Some(1.01));
    assert_eq!(vinegar.grams_per_piece, None);

    let nori = catalog.get("ing-nori").unwrap();
    assert_eq!(nori.grams_per_piece, Some(2.5));
    assert!(nori.allergens.contains("seaweed"));
}

#[test]
fn test_catalog_accepts_bare_json_list() {
    let json = r#"[{ "id": "ing-egg", "name": "Egg", "kcal100": 143, "protein100": 12.6,
                    "fat100": 9.5, "carbs100": 0.7, "gramsPerPiece": 50 }]"#;
    let catalog = parse_catalog(json, DocumentFormat::Json).unwrap();
    assert_eq!(catalog.get("ing-egg").unwrap().grams_per_piece, Some(50.0));
}

#[test]
fn test_catalog_name_and_synonym_lookup() {
    let catalog = yaml_catalog();
    assert_eq!(catalog.find_by_name("  sushi RICE").unwrap().id, "ing-sushi-rice");
    assert_eq!(catalog.find_by_name("japanese rice").unwrap().id, "ing-sushi-rice");
    assert!(catalog.find_by_name("brown rice").is_none());
}

#[test]
fn test_catalog_rejects_duplicates() {
    let rice = Ingredient::new("ing-rice", "Rice", Macros::new(130.0, 2.7, 0.3, 28.0));

    let same_id = IngredientCatalog::from_ingredients([rice.clone(), rice.clone()]);
    assert_eq!(same_id.unwrap_err().code, ErrorCode::ResourceAlreadyExists);

    let clashing_synonym = Ingredient::new("ing-basmati", "Basmati", Macros::ZERO)
        .with_synonyms(["RICE"]);
    let result = IngredientCatalog::from_ingredients([rice, clashing_synonym]);
    assert_eq!(result.unwrap_err().code, ErrorCode::ResourceAlreadyExists);
}

#[test]
fn test_catalog_rejects_invalid_ingredients() {
    let negative = Ingredient::new("ing-x", "X", Macros::new(-1.0, 0.0, 0.0, 0.0));
    let zero_density = Ingredient::new("ing-y", "Y", Macros::ZERO).with_density(0.0);
    let nameless = Ingredient::new("ing-z", " ", Macros::ZERO);

    for ingredient in [negative, zero_density, nameless] {
        let result = IngredientCatalog::from_ingredients([ingredient]);
        assert_eq!(result.unwrap_err().code, ErrorCode::InvalidInput);
    }
}

// ============================================================================
// Recipe resolution
// ============================================================================

#[test]
fn test_resolve_json_recipe() {
    let doc: RecipeDocument = parse_document(RECIPE_JSON, DocumentFormat::Json).unwrap();
    let recipe = resolve(&doc, &yaml_catalog()).unwrap();

    assert_eq!(recipe.title, "Sushi rice");
    assert_eq!(recipe.servings, 4);
    assert_eq!(recipe.groups.len(), 2);
    assert_eq!(recipe.groups[0].name, None);
    assert_eq!(recipe.groups[1].name.as_deref(), Some("To serve"));

    let items: Vec<_> = recipe.items().map(|(_, item)| item).collect();
    // Bare numbers become authored text
    assert_eq!(items[0].quantity.authored(), "200");
    assert_eq!(items[0].quantity.value().unwrap(), Rational::from_integer(200));
    assert_eq!(items[1].quantity.value().unwrap(), Rational::new(3, 2).unwrap());
    assert_eq!(items[1].notes.as_deref(), Some("warmed"));
    assert_eq!(items[2].quantity.value().unwrap(), Rational::new(1, 2).unwrap());

    assert!(matches!(items[0].source, ItemSource::Catalog(_)));
    assert_eq!(items[3].source, ItemSource::FreeText("pickled ginger".into()));
    // Unparsable quantities are kept for display
    assert!(!items[3].quantity.is_valid());
    assert_eq!(items[3].quantity.authored(), "2-3");
}

#[test]
fn test_dangling_reference_degrades_to_free_text() {
    common::init_test_logging();
    let doc = RecipeDocument {
        title: "Mystery bowl".into(),
        servings: 1,
        groups: vec![larder::services::ingestion::GroupDocument {
            name: None,
            items: vec![
                ItemDocument {
                    ingredient_ref: Some("ing-missing".into()),
                    ingredient_text: Some("secret spice".into()),
                    quantity: QuantityDocument::Text("1".into()),
                    unit: "tsp".into(),
                    notes: None,
                },
                ItemDocument {
                    ingredient_ref: Some("ing-gone".into()),
                    quantity: QuantityDocument::Number(2.0),
                    ..ItemDocument::default()
                },
            ],
        }],
        nutrition: None,
    };
    let recipe = resolve(&doc, &yaml_catalog()).unwrap();
    let sources: Vec<_> = recipe.items().map(|(_, item)| item.source.clone()).collect();
    assert_eq!(
        sources,
        [
            ItemSource::FreeText("secret spice".into()),
            ItemSource::FreeText("ing-gone".into())
        ]
    );
}

#[test]
fn test_resolve_rejects_invalid_documents() {
    let catalog = yaml_catalog();
    let valid: RecipeDocument = parse_document(RECIPE_JSON, DocumentFormat::Json).unwrap();

    let mut zero_servings = valid.clone();
    zero_servings.servings = 0;
    assert_eq!(
        resolve(&zero_servings, &catalog).unwrap_err().code,
        ErrorCode::ValueOutOfRange
    );

    let mut untitled = valid.clone();
    untitled.title = "  ".into();
    assert_eq!(
        resolve(&untitled, &catalog).unwrap_err().code,
        ErrorCode::InvalidInput
    );

    let mut empty_line = valid.clone();
    empty_line.groups[0].items.push(ItemDocument::default());
    assert_eq!(
        resolve(&empty_line, &catalog).unwrap_err().code,
        ErrorCode::InvalidInput
    );

    let mut bad_override = valid;
    bad_override.nutrition = Some(larder::services::ingestion::NutritionDocument {
        calories: -5.0,
        ..Default::default()
    });
    assert_eq!(
        resolve(&bad_override, &catalog).unwrap_err().code,
        ErrorCode::InvalidInput
    );
}

#[test]
fn test_override_nutrition_is_carried() {
    let yaml = r"
title: Onigiri
servings: 2
nutrition:
  calories: 180
  protein: 4
groups:
  - items:
      - ingredientRef: ing-sushi-rice
        quantity: 150
        unit: g
";
    let doc: RecipeDocument = parse_document(yaml, DocumentFormat::Yaml).unwrap();
    let recipe = resolve(&doc, &yaml_catalog()).unwrap();
    assert_eq!(recipe.nutrition, Some(Macros::new(180.0, 4.0, 0.0, 0.0)));
}

// ============================================================================
// Files
// ============================================================================

#[test]
fn test_load_from_files() {
    let dir = TempDir::new().unwrap();
    let catalog_path = write(&dir, "catalog.yml", CATALOG_YAML);
    let recipe_path = write(&dir, "sushi.json", RECIPE_JSON);

    let catalog = load_catalog(&catalog_path).unwrap();
    let recipe = load_recipe(&recipe_path, &catalog).unwrap();
    assert_eq!(recipe.items().count(), 4);
}

#[test]
fn test_file_errors_carry_codes() {
    let dir = TempDir::new().unwrap();

    let wrong_extension = write(&dir, "catalog.toml", CATALOG_YAML);
    assert_eq!(
        load_catalog(&wrong_extension).unwrap_err().code,
        ErrorCode::InvalidFormat
    );

    let missing = dir.path().join("absent.json");
    assert_eq!(
        load_catalog(&missing).unwrap_err().code,
        ErrorCode::StorageError
    );

    let malformed = write(&dir, "recipe.json", "{ \"title\": ");
    let error = load_recipe(&malformed, &yaml_catalog()).unwrap_err();
    assert_eq!(error.code, ErrorCode::SerializationError);
    assert!(error.message.contains("recipe.json"));
}

#[test]
fn test_document_format_from_path() {
    assert_eq!(
        DocumentFormat::from_path(Path::new("a/b.YAML")).unwrap(),
        DocumentFormat::Yaml
    );
    assert_eq!(
        DocumentFormat::from_path(Path::new("b.json")).unwrap(),
        DocumentFormat::Json
    );
    assert!(DocumentFormat::from_path(Path::new("noext")).is_err());
}
