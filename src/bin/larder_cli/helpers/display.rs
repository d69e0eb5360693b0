// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Output formatting helpers for larder-cli
// ABOUTME: Provides consistent display functions for scaled recipes, nutrition, audits and units

use anyhow::Result;
use larder::services::RecipeAudit;
use larder_nutrition::{
    AllergenReport, NutritionResult, NutritionStatus, RecipeTotals, ScaledRecipe, UnitTable,
};
use serde::Serialize;

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Display a scaled recipe grouped as authored
pub fn display_scaled_recipe(scaled: &ScaledRecipe) {
    println!(
        "\n{} ({} servings, authored for {})",
        scaled.title, scaled.servings, scaled.original_servings
    );
    println!("{}", "=".repeat(60));

    for group in &scaled.groups {
        if let Some(name) = &group.name {
            println!("\n{name}");
            println!("{}", "-".repeat(name.chars().count()));
        }
        for line in &group.lines {
            let amount = if line.unit.is_empty() {
                line.display_text.clone()
            } else {
                format!("{} {}", line.display_text, line.unit)
            };
            match &line.notes {
                Some(notes) => println!("   {amount:>12}  {}, {notes}", line.name),
                None => println!("   {amount:>12}  {}", line.name),
            }
        }
    }
}

/// Display per-serving and batch nutrition
pub fn display_nutrition(title: &str, nutrition: &NutritionResult) {
    let status = match nutrition.status() {
        NutritionStatus::Complete => "complete",
        NutritionStatus::Approximate => "approximate",
        NutritionStatus::Unavailable => "unavailable",
    };
    println!("\n{title}");
    println!("{}", "=".repeat(60));
    println!("   Source: {:?} ({status})", nutrition.source);
    println!(
        "   Servings: {} (authored for {})",
        nutrition.servings, nutrition.original_servings
    );

    println!("\n   Per serving:");
    println!("      Calories: {:.0} kcal", nutrition.per_serving.calories);
    println!("      Protein:  {:.1} g", nutrition.per_serving.protein);
    println!("      Fat:      {:.1} g", nutrition.per_serving.fat);
    println!("      Carbs:    {:.1} g", nutrition.per_serving.carbs);
    println!(
        "\n   Batch: {:.0} kcal, {:.0} g",
        nutrition.total.calories, nutrition.total_grams
    );

    if !nutrition.missing_items.is_empty() {
        println!("\n   Not counted:");
        for missing in &nutrition.missing_items {
            println!("      • {} [{}]", missing.name, missing.reason);
        }
    }

    if let Some(recomputed) = &nutrition.recomputed {
        println!(
            "\n   Recomputed from ingredients: {:.0} kcal per serving{}",
            recomputed.per_serving.calories,
            if recomputed.partial { " (partial)" } else { "" }
        );
    }
    if let Some(error) = &nutrition.recompute_error {
        println!("\n   Recomputation unavailable: {error}");
    }
}

/// Display the per-line gram and calorie breakdown
pub fn display_breakdown(totals: &RecipeTotals) {
    if totals.lines.is_empty() {
        return;
    }
    println!("\n   Breakdown (authored quantities):");
    for line in &totals.lines {
        println!(
            "      {:>8.1} g  {:>7.0} kcal  {}",
            line.grams, line.macros.calories, line.name
        );
    }
}

/// Display the allergen union
pub fn display_allergens(report: &AllergenReport) {
    if report.allergens.is_empty() {
        println!("\n   Allergens: none listed");
    } else {
        let tags: Vec<&str> = report.allergens.iter().map(String::as_str).collect();
        println!("\n   Allergens: {}", tags.join(", "));
    }
    if !report.is_complete() {
        println!("   Unverified lines: {}", report.unverified_items.join(", "));
    }
}

/// Display audit findings for every recipe
pub fn display_audit(audits: &[RecipeAudit]) {
    for audit in audits {
        if audit.is_clean() {
            println!("OK    {}", audit.title);
            continue;
        }
        if audit.unknown_units.is_empty() {
            println!("WARN  {}", audit.title);
        } else {
            println!("FAIL  {}", audit.title);
        }
        for line in &audit.unknown_units {
            println!("      unknown unit '{}' on {}", line.unit, line.item);
        }
        if let Some(discrepancy) = &audit.discrepancy {
            println!(
                "      stated {:.0} kcal vs computed {:.0} kcal ({:.0}% off{})",
                discrepancy.stated.calories,
                discrepancy.computed.calories,
                discrepancy.relative_difference * 100.0,
                if discrepancy.computed_partial {
                    ", computed is partial"
                } else {
                    ""
                }
            );
        }
    }
}

/// Display the unit table grouped by class
pub fn display_unit_table(units: &UnitTable) {
    println!("{:<10} {:<8} {:>10}", "SYMBOL", "CLASS", "FACTOR");
    println!("{}", "-".repeat(30));
    for (symbol, entry) in units.sorted_entries() {
        let symbol = if symbol.is_empty() { "(none)" } else { symbol };
        println!("{symbol:<10} {:<8} {:>10}", entry.class.as_str(), entry.factor);
    }
}
