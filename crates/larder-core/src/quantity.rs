// ABOUTME: Exact rational quantities and the parser for authored quantity text
// ABOUTME: Parses integers, decimals, fractions, mixed numbers and unicode vulgar fractions once at ingestion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Exact quantities.
//!
//! Recipe quantities are authored as text ("0.5", "1/2", "1 ½") so the CMS can
//! preserve the author's form. The text is parsed once into a [`Rational`] and
//! that exact value is carried through serving scaling and normalization, so
//! the display path and the nutrition path never re-parse strings or
//! accumulate floating-point drift before the final gram conversion.
//!
//! Ranges ("2-3", "2 to 3") are rejected with [`QuantityError::Range`]: the
//! structured `quantity` field is expected to hold a single amount.

use std::cmp::Ordering;
use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::constants::quantity::MAX_DECIMAL_DIGITS;

/// Reasons an authored quantity cannot be used
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantityError {
    /// Quantity text was empty or whitespace
    #[error("quantity is empty")]
    Empty,
    /// Quantity text describes a range rather than a single amount
    #[error("ranges are not supported in structured quantities: '{0}'")]
    Range(String),
    /// Quantity text is negative
    #[error("negative quantity: '{0}'")]
    Negative(String),
    /// Quantity parsed to zero
    #[error("quantity must be greater than zero")]
    NotPositive,
    /// Quantity text is not a recognized number form
    #[error("unrecognized quantity: '{0}'")]
    Malformed(String),
    /// Quantity is too large or too precise to represent exactly
    #[error("quantity too large or too precise: '{0}'")]
    Overflow(String),
}

/// Non-negative exact fraction, always stored in lowest terms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rational {
    numer: u64,
    denom: u64,
}

const fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

impl Rational {
    /// Zero
    pub const ZERO: Self = Self { numer: 0, denom: 1 };
    /// One
    pub const ONE: Self = Self { numer: 1, denom: 1 };

    /// Create a fraction, reduced to lowest terms. Returns `None` for a zero denominator.
    #[must_use]
    pub const fn new(numer: u64, denom: u64) -> Option<Self> {
        if denom == 0 {
            return None;
        }
        if numer == 0 {
            return Some(Self::ZERO);
        }
        let g = gcd(numer, denom);
        Some(Self {
            numer: numer / g,
            denom: denom / g,
        })
    }

    /// Whole number
    #[must_use]
    pub const fn from_integer(value: u64) -> Self {
        Self {
            numer: value,
            denom: 1,
        }
    }

    /// Numerator in lowest terms
    #[must_use]
    pub const fn numer(&self) -> u64 {
        self.numer
    }

    /// Denominator in lowest terms
    #[must_use]
    pub const fn denom(&self) -> u64 {
        self.denom
    }

    /// True for zero
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.numer == 0
    }

    /// True when the value is a whole number
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        self.denom == 1
    }

    /// Exact addition, `None` on overflow
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        let g = gcd(self.denom, other.denom);
        let denom = (self.denom / g).checked_mul(other.denom)?;
        let left = self.numer.checked_mul(other.denom / g)?;
        let right = other.numer.checked_mul(self.denom / g)?;
        Self::new(left.checked_add(right)?, denom)
    }

    /// Exact multiplication, `None` on overflow
    #[must_use]
    pub fn checked_mul(self, other: Self) -> Option<Self> {
        if self.is_zero() || other.is_zero() {
            return Some(Self::ZERO);
        }
        // Cross-reduce first so intermediate products stay small
        let g1 = gcd(self.numer, other.denom);
        let g2 = gcd(other.numer, self.denom);
        let numer = (self.numer / g1).checked_mul(other.numer / g2)?;
        let denom = (self.denom / g2).checked_mul(other.denom / g1)?;
        Some(Self { numer, denom })
    }

    /// Closest `f64`
    #[must_use]
    pub fn to_f64(self) -> f64 {
        self.numer as f64 / self.denom as f64
    }

    /// Parse authored quantity text. Zero is accepted here; [`Quantity`] rejects it.
    ///
    /// # Errors
    ///
    /// Returns a [`QuantityError`] describing why the text is not a single
    /// non-negative amount.
    pub fn parse(text: &str) -> Result<Self, QuantityError> {
        let normalized = text.trim().replace('\u{2044}', "/");
        let s = normalized.as_str();
        if s.is_empty() {
            return Err(QuantityError::Empty);
        }
        if s.starts_with('-') {
            return Err(QuantityError::Negative(s.to_owned()));
        }
        if is_range(s) {
            return Err(QuantityError::Range(s.to_owned()));
        }

        let tokens: Vec<&str> = s.split_whitespace().collect();
        match tokens.as_slice() {
            [single] => parse_token(single, s),
            [whole, fraction] => {
                let whole = parse_whole(whole).ok_or_else(|| malformed(s))?;
                let fraction = parse_fraction_token(fraction, s)?;
                // "1 1/2" only: the trailing part must be a proper fraction
                if fraction.numer >= fraction.denom {
                    return Err(malformed(s));
                }
                whole
                    .checked_add(fraction)
                    .ok_or_else(|| QuantityError::Overflow(s.to_owned()))
            }
            _ => Err(malformed(s)),
        }
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        let left = u128::from(self.numer) * u128::from(other.denom);
        let right = u128::from(other.numer) * u128::from(self.denom);
        left.cmp(&right)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denom == 1 {
            write!(f, "{}", self.numer)
        } else {
            write!(f, "{}/{}", self.numer, self.denom)
        }
    }
}

impl Serialize for Rational {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn malformed(s: &str) -> QuantityError {
    QuantityError::Malformed(s.to_owned())
}

/// A range hyphen has something on both sides ("2-3"); "to"/"or" joins alternatives.
fn is_range(s: &str) -> bool {
    let lower = s.to_lowercase();
    if lower.contains(" to ") || lower.contains(" or ") {
        return true;
    }
    s.char_indices()
        .any(|(idx, c)| matches!(c, '-' | '\u{2013}' | '\u{2014}') && idx > 0)
}

fn vulgar_fraction(c: char) -> Option<Rational> {
    let (numer, denom) = match c {
        '½' => (1, 2),
        '⅓' => (1, 3),
        '⅔' => (2, 3),
        '¼' => (1, 4),
        '¾' => (3, 4),
        '⅕' => (1, 5),
        '⅖' => (2, 5),
        '⅗' => (3, 5),
        '⅘' => (4, 5),
        '⅙' => (1, 6),
        '⅚' => (5, 6),
        '⅛' => (1, 8),
        '⅜' => (3, 8),
        '⅝' => (5, 8),
        '⅞' => (7, 8),
        _ => return None,
    };
    Rational::new(numer, denom)
}

fn parse_whole(token: &str) -> Option<Rational> {
    if token.is_empty() || !token.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    token.parse::<u64>().ok().map(Rational::from_integer)
}

/// Single token: "2", "0.5", "1/2", "½", "1½"
fn parse_token(token: &str, whole_text: &str) -> Result<Rational, QuantityError> {
    let mut chars = token.chars();
    if let Some(last) = chars.next_back() {
        if let Some(fraction) = vulgar_fraction(last) {
            let prefix = chars.as_str();
            if prefix.is_empty() {
                return Ok(fraction);
            }
            let whole = parse_whole(prefix).ok_or_else(|| malformed(whole_text))?;
            return whole
                .checked_add(fraction)
                .ok_or_else(|| QuantityError::Overflow(whole_text.to_owned()));
        }
    }
    if token.contains('/') {
        return parse_fraction_token(token, whole_text);
    }
    parse_decimal(token, whole_text)
}

/// "a/b" or a lone vulgar fraction
fn parse_fraction_token(token: &str, whole_text: &str) -> Result<Rational, QuantityError> {
    let mut chars = token.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if let Some(fraction) = vulgar_fraction(c) {
            return Ok(fraction);
        }
    }
    let (numer, denom) = token.split_once('/').ok_or_else(|| malformed(whole_text))?;
    let numer = parse_whole(numer).ok_or_else(|| malformed(whole_text))?;
    let denom = parse_whole(denom).ok_or_else(|| malformed(whole_text))?;
    Rational::new(numer.numer(), denom.numer()).ok_or_else(|| malformed(whole_text))
}

/// "12", "0.5", ".5", "3."
fn parse_decimal(token: &str, whole_text: &str) -> Result<Rational, QuantityError> {
    let (int_part, frac_part) = token.split_once('.').unwrap_or((token, ""));
    let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
    if (int_part.is_empty() && frac_part.is_empty()) || !all_digits(int_part) || !all_digits(frac_part)
    {
        return Err(malformed(whole_text));
    }

    let frac_part = frac_part.trim_end_matches('0');
    if frac_part.len() > MAX_DECIMAL_DIGITS {
        return Err(QuantityError::Overflow(whole_text.to_owned()));
    }
    let overflow = || QuantityError::Overflow(whole_text.to_owned());

    let whole = if int_part.is_empty() {
        0
    } else {
        int_part.parse::<u64>().map_err(|_| overflow())?
    };
    let scale = 10_u64.pow(frac_part.len() as u32);
    let frac = if frac_part.is_empty() {
        0
    } else {
        frac_part.parse::<u64>().map_err(|_| overflow())?
    };
    let numer = whole
        .checked_mul(scale)
        .and_then(|n| n.checked_add(frac))
        .ok_or_else(overflow)?;
    Rational::new(numer, scale).ok_or_else(overflow)
}

/// An authored quantity: the verbatim text plus its parsed value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quantity {
    authored: String,
    value: Result<Rational, QuantityError>,
}

impl Quantity {
    /// Parse authored text. Failures are kept so the line can still be displayed.
    #[must_use]
    pub fn parse(text: impl Into<String>) -> Self {
        let authored = text.into();
        let value = Rational::parse(&authored).and_then(|value| {
            if value.is_zero() {
                Err(QuantityError::NotPositive)
            } else {
                Ok(value)
            }
        });
        Self { authored, value }
    }

    /// Quantity from an exact value
    #[must_use]
    pub fn exact(value: Rational) -> Self {
        Self {
            authored: value.to_string(),
            value: if value.is_zero() {
                Err(QuantityError::NotPositive)
            } else {
                Ok(value)
            },
        }
    }

    /// Text exactly as authored
    #[must_use]
    pub fn authored(&self) -> &str {
        &self.authored
    }

    /// Parsed positive value
    ///
    /// # Errors
    ///
    /// Returns the reason the authored text could not be used.
    pub fn value(&self) -> Result<Rational, QuantityError> {
        self.value.clone()
    }

    /// True when the authored text parsed to a positive amount
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.value.is_ok()
    }
}
