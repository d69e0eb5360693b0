// ABOUTME: Integration tests for quantity normalization to grams
// ABOUTME: Tests each unit class rule, missing conversion data and the order of checks
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

mod common;

use common::{assert_close, avocado, egg, rice_vinegar, soy_sauce, sushi_rice};
use larder_core::models::IngredientItem;
use larder_core::QuantityError;
use larder_nutrition::{normalize, NormalizationError, UnitTable};

fn grams(item: &IngredientItem) -> f64 {
    normalize(item, &UnitTable::standard()).unwrap().grams()
}

// ============================================================================
// Class rules
// ============================================================================

#[test]
fn test_mass_units() {
    assert_close(grams(&IngredientItem::catalog(sushi_rice(), "200", "g")), 200.0, "g");
    assert_close(grams(&IngredientItem::catalog(sushi_rice(), "1.5", "kg")), 1500.0, "kg");
    assert_close(grams(&IngredientItem::catalog(sushi_rice(), "500", "mg")), 0.5, "mg");
}

#[test]
fn test_volume_units_use_density() {
    // 1 1/2 tbsp = 22.5 ml at 1.01 g/ml
    assert_close(
        grams(&IngredientItem::catalog(rice_vinegar(), "1 1/2", "tbsp")),
        22.725,
        "tbsp",
    );
    assert_close(
        grams(&IngredientItem::catalog(rice_vinegar(), "1", "cup")),
        242.4,
        "cup",
    );
}

#[test]
fn test_count_units_use_piece_weight() {
    // 2 pieces at 150 g
    assert_close(grams(&IngredientItem::catalog(avocado(), "2", "piece")), 300.0, "piece");
    assert_close(grams(&IngredientItem::catalog(avocado(), "½", "pcs")), 75.0, "half");
}

#[test]
fn test_unitless_line_counts_pieces() {
    assert_close(grams(&IngredientItem::catalog(egg(), "2", "")), 100.0, "eggs");
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_volume_without_density() {
    let item = IngredientItem::catalog(soy_sauce(), "30", "ml");
    let error = normalize(&item, &UnitTable::standard()).unwrap_err();
    assert!(matches!(error, NormalizationError::MissingDensity { .. }));
    assert_eq!(error.code(), "MISSING_DENSITY");
    assert!(!error.is_fatal());
}

#[test]
fn test_count_and_unitless_without_piece_weight() {
    let units = UnitTable::standard();
    let counted = IngredientItem::catalog(sushi_rice(), "2", "cup");
    assert!(matches!(
        normalize(&counted, &units),
        Err(NormalizationError::MissingDensity { .. })
    ));

    let pieces = IngredientItem::catalog(sushi_rice(), "2", "piece");
    assert!(matches!(
        normalize(&pieces, &units),
        Err(NormalizationError::MissingPieceWeight { .. })
    ));

    let unitless = IngredientItem::catalog(soy_sauce(), "1", "");
    assert!(matches!(
        normalize(&unitless, &units),
        Err(NormalizationError::MissingPieceWeight { .. })
    ));
}

#[test]
fn test_invalid_quantities() {
    let units = UnitTable::standard();
    for text in ["0", "", "-2", "2-3", "some"] {
        let item = IngredientItem::catalog(sushi_rice(), text, "g");
        let error = normalize(&item, &units).unwrap_err();
        assert!(
            matches!(error, NormalizationError::InvalidQuantity { .. }),
            "'{text}' should be an invalid quantity"
        );
        assert_eq!(error.code(), "INVALID_QUANTITY");
    }

    let range = IngredientItem::catalog(sushi_rice(), "2 to 3", "g");
    match normalize(&range, &units) {
        Err(NormalizationError::InvalidQuantity { reason, .. }) => {
            assert!(matches!(reason, QuantityError::Range(_)));
        }
        other => panic!("expected range rejection, got {other:?}"),
    }
}

#[test]
fn test_free_text_has_no_ingredient_data() {
    let item = IngredientItem::free_text("salt to taste", "1", "");
    let error = normalize(&item, &UnitTable::standard()).unwrap_err();
    assert_eq!(
        error,
        NormalizationError::NoIngredientData {
            item: "salt to taste".into()
        }
    );
}

#[test]
fn test_unknown_unit_is_checked_first_and_fatal() {
    // Free text with an unparsable quantity still reports the unit first
    let item = IngredientItem::free_text("herbs", "a few", "handful");
    let error = normalize(&item, &UnitTable::standard()).unwrap_err();
    assert!(matches!(error, NormalizationError::UnknownUnit { .. }));
    assert!(error.is_fatal());
    assert_eq!(error.code(), "UNKNOWN_UNIT");
}

#[test]
fn test_source_is_checked_before_quantity() {
    let item = IngredientItem::free_text("salt", "a pinch", "");
    assert!(matches!(
        normalize(&item, &UnitTable::standard()),
        Err(NormalizationError::NoIngredientData { .. })
    ));
}
