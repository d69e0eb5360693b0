// ABOUTME: Domain constants shared by the engine and application layers
// ABOUTME: Nutrition basis, allowed quantity precision and service names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Nutrition data constants
pub mod nutrition {
    /// Ingredient macros are expressed per this many grams
    pub const GRAMS_BASIS: f64 = 100.0;
}

/// Quantity parsing limits
pub mod quantity {
    /// Maximum number of fractional digits accepted in a decimal quantity.
    ///
    /// Keeps `10^digits` well inside `u64` while leaving headroom for scaling.
    pub const MAX_DECIMAL_DIGITS: usize = 6;
}

/// Service names used in structured logging
pub mod service_names {
    /// Command-line tool
    pub const LARDER_CLI: &str = "larder-cli";
    /// Engine library
    pub const LARDER_ENGINE: &str = "larder-engine";
}
