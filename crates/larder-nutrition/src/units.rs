// ABOUTME: Unit table mapping unit symbols to a conversion class and canonical factor
// ABOUTME: Ships the standard CMS vocabulary and validates alternate tables loaded from configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Unit Table
//!
//! Every unit symbol the CMS may emit maps to a [`UnitClass`] and a factor:
//! grams for mass units, millilitres for volume units and `1` for count and
//! unit-less entries. The table is immutable once built and is shared between
//! threads behind an `Arc`.

use std::collections::{BTreeMap, HashMap};
use std::fmt::{Display, Formatter, Result as FmtResult};

use larder_core::models::Recipe;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Volume conversion constants (to millilitres)
const ML_PER_CUP: f64 = 240.0;
const ML_PER_TBSP: f64 = 15.0;
const ML_PER_TSP: f64 = 5.0;
const ML_PER_L: f64 = 1000.0;
const ML_PER_DL: f64 = 100.0;
const ML_PER_CL: f64 = 10.0;

/// Mass conversion constants (to grams)
const GRAMS_PER_KG: f64 = 1000.0;
const GRAMS_PER_MG: f64 = 0.001;

/// Conversion class of a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitClass {
    /// Factor converts to grams
    Mass,
    /// Factor converts to millilitres; needs a density to reach grams
    Volume,
    /// Whole pieces; needs a piece weight to reach grams
    Count,
    /// No unit ("2 eggs")
    None,
}

impl UnitClass {
    /// Lowercase name used in configuration files
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mass => "mass",
            Self::Volume => "volume",
            Self::Count => "count",
            Self::None => "none",
        }
    }
}

impl Display for UnitClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Class and canonical factor for one symbol
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitEntry {
    /// Conversion class
    pub class: UnitClass,
    /// Grams (mass), millilitres (volume) or 1 (count, none)
    #[serde(default = "default_factor")]
    pub factor: f64,
}

const fn default_factor() -> f64 {
    1.0
}

impl UnitEntry {
    /// Mass unit worth `grams` grams
    #[must_use]
    pub const fn mass(grams: f64) -> Self {
        Self {
            class: UnitClass::Mass,
            factor: grams,
        }
    }

    /// Volume unit worth `ml` millilitres
    #[must_use]
    pub const fn volume(ml: f64) -> Self {
        Self {
            class: UnitClass::Volume,
            factor: ml,
        }
    }

    /// Count unit
    #[must_use]
    pub const fn count() -> Self {
        Self {
            class: UnitClass::Count,
            factor: 1.0,
        }
    }

    /// Unit-less entry
    #[must_use]
    pub const fn none() -> Self {
        Self {
            class: UnitClass::None,
            factor: 1.0,
        }
    }
}

/// Serialized unit table: `units: { symbol: { class, factor } }`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnitTableFile {
    /// Entries keyed by symbol
    pub units: BTreeMap<String, UnitEntry>,
}

/// A recipe line whose unit is missing from the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnknownUnitLine {
    /// Group heading, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Line display name
    pub item: String,
    /// Unit as authored
    pub unit: String,
}

/// Immutable mapping from unit symbol to [`UnitEntry`]
#[derive(Debug, Clone, PartialEq)]
pub struct UnitTable {
    entries: HashMap<String, UnitEntry>,
}

/// Normalize a symbol for lookup: trimmed, lowercase
#[must_use]
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_lowercase()
}

const STANDARD_UNITS: &[(&str, UnitEntry)] = &[
    // Mass
    ("g", UnitEntry::mass(1.0)),
    ("gram", UnitEntry::mass(1.0)),
    ("grams", UnitEntry::mass(1.0)),
    ("kg", UnitEntry::mass(GRAMS_PER_KG)),
    ("mg", UnitEntry::mass(GRAMS_PER_MG)),
    // Volume
    ("ml", UnitEntry::volume(1.0)),
    ("cl", UnitEntry::volume(ML_PER_CL)),
    ("dl", UnitEntry::volume(ML_PER_DL)),
    ("l", UnitEntry::volume(ML_PER_L)),
    ("tsp", UnitEntry::volume(ML_PER_TSP)),
    ("tbsp", UnitEntry::volume(ML_PER_TBSP)),
    ("cup", UnitEntry::volume(ML_PER_CUP)),
    // Count
    ("piece", UnitEntry::count()),
    ("pieces", UnitEntry::count()),
    ("pc", UnitEntry::count()),
    ("pcs", UnitEntry::count()),
    ("clove", UnitEntry::count()),
    ("cloves", UnitEntry::count()),
    ("slice", UnitEntry::count()),
    ("slices", UnitEntry::count()),
    ("leaf", UnitEntry::count()),
    ("leaves", UnitEntry::count()),
    ("sheet", UnitEntry::count()),
    ("sheets", UnitEntry::count()),
    ("sprig", UnitEntry::count()),
    ("sprigs", UnitEntry::count()),
    ("stalk", UnitEntry::count()),
    ("stalks", UnitEntry::count()),
    // Unit-less
    ("", UnitEntry::none()),
];

impl UnitTable {
    /// The standard CMS vocabulary
    #[must_use]
    pub fn standard() -> Self {
        Self {
            entries: STANDARD_UNITS
                .iter()
                .map(|(symbol, entry)| ((*symbol).to_owned(), *entry))
                .collect(),
        }
    }

    /// Build and validate an alternate table
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUnit`] when a factor is not positive and
    /// finite, a count or unit-less factor is not exactly 1, or two symbols
    /// collide after normalization.
    pub fn from_entries<I, S>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (S, UnitEntry)>,
        S: AsRef<str>,
    {
        let mut table = HashMap::new();
        for (symbol, entry) in entries {
            let symbol = normalize_symbol(symbol.as_ref());
            if !entry.factor.is_finite() || entry.factor <= 0.0 {
                return Err(ConfigError::InvalidUnit {
                    symbol,
                    reason: "factor must be positive and finite",
                });
            }
            if matches!(entry.class, UnitClass::Count | UnitClass::None) && entry.factor != 1.0 {
                return Err(ConfigError::InvalidUnit {
                    symbol,
                    reason: "count and unit-less factors must be 1",
                });
            }
            if table.contains_key(&symbol) {
                return Err(ConfigError::InvalidUnit {
                    symbol,
                    reason: "duplicate symbol",
                });
            }
            table.insert(symbol, entry);
        }
        Ok(Self { entries: table })
    }

    /// Build a table from its serialized form
    ///
    /// # Errors
    ///
    /// Same conditions as [`UnitTable::from_entries`].
    pub fn from_file(file: UnitTableFile) -> Result<Self, ConfigError> {
        Self::from_entries(file.units)
    }

    /// Serializable form of this table
    #[must_use]
    pub fn to_file(&self) -> UnitTableFile {
        UnitTableFile {
            units: self
                .entries
                .iter()
                .map(|(symbol, entry)| (symbol.clone(), *entry))
                .collect(),
        }
    }

    /// Look up a symbol, ignoring case and surrounding whitespace
    #[must_use]
    pub fn lookup(&self, symbol: &str) -> Option<UnitEntry> {
        self.entries.get(&normalize_symbol(symbol)).copied()
    }

    /// True when the symbol is known
    #[must_use]
    pub fn contains(&self, symbol: &str) -> bool {
        self.lookup(symbol).is_some()
    }

    /// Number of symbols
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True for a table with no symbols
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by class then symbol
    #[must_use]
    pub fn sorted_entries(&self) -> Vec<(&str, UnitEntry)> {
        let mut entries: Vec<(&str, UnitEntry)> = self
            .entries
            .iter()
            .map(|(symbol, entry)| (symbol.as_str(), *entry))
            .collect();
        entries.sort_by(|a, b| {
            (a.1.class as u8)
                .cmp(&(b.1.class as u8))
                .then_with(|| a.0.cmp(b.0))
        });
        entries
    }

    /// Every recipe line whose unit is missing from this table
    #[must_use]
    pub fn unknown_units(&self, recipe: &Recipe) -> Vec<UnknownUnitLine> {
        recipe
            .items()
            .filter(|(_, item)| !self.contains(&item.unit))
            .map(|(group, item)| UnknownUnitLine {
                group: group.map(str::to_owned),
                item: item.display_name().to_owned(),
                unit: item.unit.clone(),
            })
            .collect()
    }
}

impl Default for UnitTable {
    fn default() -> Self {
        Self::standard()
    }
}
