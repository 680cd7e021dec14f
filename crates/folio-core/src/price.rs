//! # Price Module
//!
//! Provides the `Price` type for store-specific book prices.
//!
//! ## Why Integer Cents?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Fixtures and the mock API carry prices as JSON numbers:               │
//! │    { "store_id": 1, "book_id": 3, "price": 9.5 }                       │
//! │                                                                         │
//! │  Holding 0.1 + 0.2 style values in memory invites drift, so the        │
//! │  number is converted to cents ONCE at the serde boundary:              │
//! │    9.5   ──deserialize──►  Price(950)  ──serialize──►  9.5             │
//! │                                                                         │
//! │  Everything in between (edits, comparisons, display) is integer math.  │
//! │                                                                         │
//! │  Sub-cent wire values are rounded on the way in, so they do not        │
//! │  survive a load/save cycle:                                             │
//! │    12.345 ──deserialize──►  Price(1235)  ──serialize──►  12.35         │
//! │  Operator input is stricter: parse_price rejects more than two         │
//! │  decimal places.                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use folio_core::price::Price;
//!
//! let price = Price::from_cents(1250);
//! assert_eq!(price.to_string(), "12.50");
//! assert_eq!(price.search_text(), "12.5");
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// =============================================================================
// Price Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// On the wire it is a plain JSON number in major units, matching what the
/// REST endpoints and static fixtures return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(i64);

impl Price {
    /// Creates a price from cents.
    ///
    /// ## Example
    /// ```rust
    /// use folio_core::price::Price;
    ///
    /// let price = Price::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Price(cents)
    }

    /// Creates a price from a major-unit float, rounding to the nearest cent.
    ///
    /// Returns `None` for NaN, infinities, and values that do not fit in cents.
    ///
    /// ## Example
    /// ```rust
    /// use folio_core::price::Price;
    ///
    /// assert_eq!(Price::from_major(12.5), Some(Price::from_cents(1250)));
    /// assert_eq!(Price::from_major(0.1 + 0.2), Some(Price::from_cents(30)));
    /// assert_eq!(Price::from_major(f64::NAN), None);
    /// ```
    pub fn from_major(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }

        let cents = (value * 100.0).round();
        if cents.abs() >= i64::MAX as f64 {
            return None;
        }

        Some(Price(cents as i64))
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the value in major units (for the wire format only).
    #[inline]
    pub fn as_major(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the whole-unit portion.
    #[inline]
    pub const fn major_part(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns true for prices below zero.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Shortest numeric rendering used when matching search terms.
    ///
    /// `1250` cents renders as `12.5`, `1400` as `14`: the same text the
    /// JSON number would stringify to.
    pub fn search_text(&self) -> String {
        format!("{}", self.as_major())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Two-decimal display without a currency symbol.
///
/// Currency symbols are a presentation concern of the app config.
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}{}.{:02}",
            sign,
            self.major_part().abs(),
            self.cents_part()
        )
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % 100 == 0 {
            serializer.serialize_i64(self.0 / 100)
        } else {
            serializer.serialize_f64(self.as_major())
        }
    }
}

/// Reads a JSON number in major units, rounding to the nearest cent.
impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Price::from_major(value)
            .ok_or_else(|| serde::de::Error::custom(format!("price out of range: {}", value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let price = Price::from_cents(1099);
        assert_eq!(price.cents(), 1099);
        assert_eq!(price.major_part(), 10);
        assert_eq!(price.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::from_cents(1099).to_string(), "10.99");
        assert_eq!(Price::from_cents(500).to_string(), "5.00");
        assert_eq!(Price::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Price::from_cents(0).to_string(), "0.00");
    }

    #[test]
    fn test_search_text_matches_json_number_text() {
        assert_eq!(Price::from_cents(1250).search_text(), "12.5");
        assert_eq!(Price::from_cents(1400).search_text(), "14");
        assert_eq!(Price::from_cents(1099).search_text(), "10.99");
    }

    #[test]
    fn test_float_noise_is_rounded_away() {
        assert_eq!(Price::from_major(16.25).map(|p| p.cents()), Some(1625));
        assert_eq!(Price::from_major(0.1 + 0.2).map(|p| p.cents()), Some(30));
        assert_eq!(Price::from_major(f64::INFINITY), None);
    }

    #[test]
    fn test_json_wire_format() {
        let price: Price = serde_json::from_str("9.5").unwrap();
        assert_eq!(price.cents(), 950);

        let whole: Price = serde_json::from_str("14").unwrap();
        assert_eq!(whole.cents(), 1400);

        assert_eq!(serde_json::to_string(&Price::from_cents(950)).unwrap(), "9.5");
        assert_eq!(serde_json::to_string(&Price::from_cents(1400)).unwrap(), "14");
    }

    #[test]
    fn test_sub_cent_wire_values_round_to_cents() {
        let price: Price = serde_json::from_str("12.345").unwrap();
        assert_eq!(price.cents(), 1235);
        assert_eq!(serde_json::to_string(&price).unwrap(), "12.35");
    }

    #[test]
    fn test_rejects_non_numeric_json() {
        assert!(serde_json::from_str::<Price>("\"12\"").is_err());
    }
}
