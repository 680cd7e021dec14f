//! # Display State
//!
//! Presentation settings for rendered output.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`FOLIO_CURRENCY_SYMBOL`, `FOLIO_MAX_COLUMN_WIDTH`)
//! 2. Defaults (this file)
//!
//! Read-only after start-up.

use folio_core::Price;
use serde::{Deserialize, Serialize};

/// How prices and tables are shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayState {
    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Cells wider than this are truncated with `…` (0 disables truncation)
    pub max_column_width: usize,
}

impl Default for DisplayState {
    fn default() -> Self {
        DisplayState {
            currency_symbol: "$".to_string(),
            max_column_width: 40,
        }
    }
}

impl DisplayState {
    /// Defaults with `FOLIO_*` environment overrides applied.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut display = DisplayState::default();

        if let Some(symbol) = lookup("FOLIO_CURRENCY_SYMBOL") {
            display.currency_symbol = symbol;
        }

        if let Some(width) = lookup("FOLIO_MAX_COLUMN_WIDTH") {
            if let Ok(w) = width.parse::<usize>() {
                display.max_column_width = w;
            }
        }

        display
    }

    /// Formats a price with the currency symbol.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let display = DisplayState::default();
    /// assert_eq!(display.format_price(Price::from_cents(1234)), "$12.34");
    /// ```
    pub fn format_price(&self, price: Price) -> String {
        format!(
            "{}{}{}.{:02}",
            if price.is_negative() { "-" } else { "" },
            self.currency_symbol,
            price.major_part().abs(),
            price.cents_part()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price_positive() {
        let display = DisplayState::default();
        assert_eq!(display.format_price(Price::from_cents(1234)), "$12.34");
        assert_eq!(display.format_price(Price::from_cents(100)), "$1.00");
        assert_eq!(display.format_price(Price::from_cents(1)), "$0.01");
        assert_eq!(display.format_price(Price::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_format_price_negative() {
        let display = DisplayState::default();
        assert_eq!(display.format_price(Price::from_cents(-1234)), "-$12.34");
    }

    #[test]
    fn test_env_overrides() {
        let display = DisplayState::from_lookup(|key| match key {
            "FOLIO_CURRENCY_SYMBOL" => Some("€".to_string()),
            "FOLIO_MAX_COLUMN_WIDTH" => Some("not a number".to_string()),
            _ => None,
        });
        assert_eq!(display.format_price(Price::from_cents(950)), "€9.50");
        assert_eq!(display.max_column_width, 40);
    }
}
