// ABOUTME: Macro nutrient value type shared by ingredients, overrides and aggregates
// ABOUTME: Calories, protein, fat and carbohydrates with scaling and summing helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// The four macros tracked for every recipe
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Macros {
    /// Energy in kcal
    pub calories: f64,
    /// Protein in grams
    pub protein: f64,
    /// Fat in grams
    pub fat: f64,
    /// Carbohydrates in grams
    pub carbs: f64,
}

impl Macros {
    /// All-zero macros
    pub const ZERO: Self = Self {
        calories: 0.0,
        protein: 0.0,
        fat: 0.0,
        carbs: 0.0,
    };

    /// Create macros from individual values
    #[must_use]
    pub const fn new(calories: f64, protein: f64, fat: f64, carbs: f64) -> Self {
        Self {
            calories,
            protein,
            fat,
            carbs,
        }
    }

    /// Multiply every macro by `factor`
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            calories: self.calories * factor,
            protein: self.protein * factor,
            fat: self.fat * factor,
            carbs: self.carbs * factor,
        }
    }

    /// True when every macro is finite and non-negative
    #[must_use]
    pub fn is_valid(&self) -> bool {
        [self.calories, self.protein, self.fat, self.carbs]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
    }

    /// Largest relative difference between two sets of macros.
    ///
    /// Each macro is compared against `self` as the reference; a zero
    /// reference compares absolute values instead.
    #[must_use]
    pub fn max_relative_difference(&self, other: &Self) -> f64 {
        let pairs = [
            (self.calories, other.calories),
            (self.protein, other.protein),
            (self.fat, other.fat),
            (self.carbs, other.carbs),
        ];
        pairs
            .iter()
            .map(|(reference, actual)| {
                let diff = (reference - actual).abs();
                if *reference == 0.0 {
                    diff
                } else {
                    diff / reference.abs()
                }
            })
            .fold(0.0, f64::max)
    }
}

impl Add for Macros {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            calories: self.calories + rhs.calories,
            protein: self.protein + rhs.protein,
            fat: self.fat + rhs.fat,
            carbs: self.carbs + rhs.carbs,
        }
    }
}

impl AddAssign for Macros {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Macros {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}
