// ABOUTME: Integration tests for the RecipeEngine service
// ABOUTME: Tests single and batch computation, error codes and content QA audits
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

mod common;

use std::sync::Arc;

use common::{assert_close, mixed_recipe, sushi_rice, sushi_rice_recipe};
use larder::config::EngineConfig;
use larder::services::RecipeEngine;
use larder::{AppError, ErrorCode};
use larder_core::models::{IngredientGroup, IngredientItem, Macros, Recipe};
use larder_nutrition::{
    AggregateOptions, EngineError, NutritionSource, RoundingPolicy, UnitTable,
};

fn engine() -> RecipeEngine {
    RecipeEngine::new(Arc::new(UnitTable::standard()), RoundingPolicy::default())
}

fn recipe_with_unknown_unit() -> Recipe {
    Recipe::new(
        "Herb rice",
        2,
        vec![IngredientGroup::unnamed(vec![
            IngredientItem::catalog(sushi_rice(), "200", "g"),
            IngredientItem::free_text("herbs", "1", "handful"),
        ])],
    )
}

// ============================================================================
// Single recipe
// ============================================================================

#[test]
fn test_compute_combines_both_paths() {
    let page = engine().compute(&sushi_rice_recipe(), 8).unwrap();

    assert_eq!(page.scaled.servings, 8);
    assert_eq!(page.scaled.lines().next().unwrap().display_text, "400");
    let nutrition = page.nutrition().unwrap();
    assert_close(nutrition.per_serving.calories, 65.0, "per serving");
    assert_close(nutrition.total.calories, 520.0, "batch");
    assert!(page.allergens.is_complete());
}

#[test]
fn test_from_default_config_uses_standard_units() {
    let engine = RecipeEngine::from_config(&EngineConfig::default()).unwrap();
    assert_eq!(engine.units(), &UnitTable::standard());
}

#[test]
fn test_engine_errors_map_to_codes() {
    let engine = engine();

    let zero = engine.compute(&sushi_rice_recipe(), 0).unwrap_err();
    assert_eq!(zero.code, ErrorCode::ValueOutOfRange);

    let unknown = engine.nutrition(&recipe_with_unknown_unit(), 2).unwrap_err();
    assert_eq!(unknown.code, ErrorCode::DataIntegrity);
    assert!(unknown.message.contains("handful"));

    // The display path tolerates unknown units
    assert!(engine.scale(&recipe_with_unknown_unit(), 4).is_ok());
}

#[test]
fn test_engine_error_conversion_keeps_source() {
    let unknown = AppError::from(EngineError::UnknownUnit {
        unit: "handful".into(),
        item: "herbs".into(),
    });
    assert_eq!(unknown.code, ErrorCode::DataIntegrity);
    assert_eq!(unknown.code.exit_code(), 3);
    assert_eq!(
        std::error::Error::source(&unknown).unwrap().to_string(),
        "unknown unit 'handful' on 'herbs'"
    );

    let servings = AppError::from(EngineError::InvalidServings {
        recipe: 4,
        target: 0,
    });
    assert_eq!(servings.code, ErrorCode::ValueOutOfRange);
    assert!(servings.message.contains("target 0"));
}

#[test]
fn test_breakdown_matches_nutrition() {
    let engine = engine();
    let recipe = mixed_recipe();
    let breakdown = engine.breakdown(&recipe).unwrap();
    let nutrition = engine.nutrition(&recipe, recipe.servings).unwrap();

    assert_close(
        breakdown.macros().calories,
        nutrition.total.calories,
        "batch kcal",
    );
    assert_eq!(breakdown.missing, nutrition.missing_items);
}

#[test]
fn test_engine_options_attach_recomputed() {
    let recipe = sushi_rice_recipe().with_nutrition(Macros::new(70.0, 1.5, 0.2, 15.0));

    let plain = engine().nutrition(&recipe, 4).unwrap();
    assert_eq!(plain.source, NutritionSource::Override);
    assert!(plain.recomputed.is_none());

    let qa = engine()
        .with_options(AggregateOptions {
            include_recomputed: true,
        })
        .nutrition(&recipe, 4)
        .unwrap();
    assert_close(
        qa.recomputed.unwrap().per_serving.calories,
        65.0,
        "recomputed",
    );
}

// ============================================================================
// Batch
// ============================================================================

#[test]
fn test_batch_keeps_order_and_isolates_failures() {
    common::init_test_logging();
    let mut broken = sushi_rice_recipe();
    broken.servings = 0;

    let recipes = vec![
        sushi_rice_recipe(),
        broken,
        mixed_recipe(),
        recipe_with_unknown_unit(),
    ];
    let results = engine().compute_batch(&recipes, None);

    assert_eq!(results.len(), 4);
    let first = results[0].as_ref().unwrap();
    assert_eq!(first.scaled.title, "Sushi rice");
    assert_eq!(first.nutrition().unwrap().servings, 4);

    assert_eq!(
        results[1].as_ref().unwrap_err().code,
        ErrorCode::ValueOutOfRange
    );
    assert_eq!(results[2].as_ref().unwrap().scaled.title, "Avocado rice bowl");

    // Unknown unit: display survives, nutrition reports the integrity error
    let herb_rice = results[3].as_ref().unwrap();
    assert_eq!(herb_rice.scaled.lines().count(), 2);
    assert_eq!(
        herb_rice.nutrition().unwrap_err().code,
        ErrorCode::DataIntegrity
    );
}

#[test]
fn test_compute_keeps_display_when_unit_is_unknown() {
    common::init_test_logging();
    let page = engine().compute(&recipe_with_unknown_unit(), 4).unwrap();

    let lines: Vec<_> = page.scaled.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].display_text, "400");
    assert_eq!(lines[1].name, "herbs");
    assert_eq!(lines[1].unit, "handful");
    assert_eq!(lines[1].display_text, "2");

    assert_eq!(
        page.nutrition,
        Err(EngineError::UnknownUnit {
            unit: "handful".into(),
            item: "herbs".into()
        })
    );
    let error = page.nutrition().unwrap_err();
    assert_eq!(error.code, ErrorCode::DataIntegrity);
    assert!(error.message.contains("handful"));

    assert_eq!(page.allergens.unverified_items, ["herbs"]);
}

#[test]
fn test_batch_with_common_target() {
    let recipes = vec![sushi_rice_recipe(), mixed_recipe()];
    let results = engine().compute_batch(&recipes, Some(10));
    for result in results {
        let page = result.unwrap();
        assert_eq!(page.scaled.servings, 10);
        assert_eq!(page.nutrition().unwrap().servings, 10);
    }
}

// ============================================================================
// Audit
// ============================================================================

#[test]
fn test_audit_clean_recipe() {
    let audit = engine().audit(&mixed_recipe()).unwrap();
    assert!(audit.is_clean());
    assert_eq!(audit.title, "Avocado rice bowl");
}

#[test]
fn test_audit_reports_unknown_units() {
    let audit = engine().audit(&recipe_with_unknown_unit()).unwrap();
    assert!(!audit.is_clean());
    assert_eq!(audit.unknown_units.len(), 1);
    assert_eq!(audit.unknown_units[0].unit, "handful");
    assert!(audit.discrepancy.is_none());
}

#[test]
fn test_audit_override_within_tolerance() {
    // Computed per serving: 65 kcal, 1.35 g protein, 0.15 g fat, 14 g carbs
    let recipe = sushi_rice_recipe().with_nutrition(Macros::new(68.0, 1.4, 0.16, 14.5));
    assert!(engine().audit_override(&recipe).unwrap().is_none());
}

#[test]
fn test_audit_override_beyond_tolerance() {
    common::init_test_logging();
    let recipe = sushi_rice_recipe().with_nutrition(Macros::new(130.0, 1.35, 0.15, 14.0));
    let discrepancy = engine().audit_override(&recipe).unwrap().unwrap();

    assert_close(discrepancy.computed.calories, 65.0, "computed");
    assert_close(discrepancy.relative_difference, 0.5, "difference");
    assert!(!discrepancy.computed_partial);

    // A looser tolerance accepts it
    let lenient = engine().with_qa_tolerance(0.6);
    assert!(lenient.audit_override(&recipe).unwrap().is_none());
}

#[test]
fn test_audit_override_reports_unknown_unit() {
    let recipe = recipe_with_unknown_unit().with_nutrition(Macros::new(200.0, 4.0, 1.0, 40.0));
    let error = engine().audit_override(&recipe).unwrap_err();
    assert_eq!(error.code, ErrorCode::DataIntegrity);

    // The page still serves the editorial figures
    let served = engine()
        .with_options(AggregateOptions {
            include_recomputed: true,
        })
        .nutrition(&recipe, 2)
        .unwrap();
    assert_eq!(served.source, NutritionSource::Override);
}

#[test]
fn test_audit_ignores_recipes_without_override() {
    assert!(engine()
        .audit_override(&sushi_rice_recipe())
        .unwrap()
        .is_none());
}
