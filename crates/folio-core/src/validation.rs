//! # Validation Module
//!
//! Input validation for inline edits and "add new" dialogs.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Page (folio-admin)                                           │
//! │  └── Collects raw text from the operator                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Rejects empty names                                               │
//! │  ├── Parses prices (finite, non-negative)                              │
//! │  └── Parses ids and page counts                                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: In-memory collections                                        │
//! │  └── No further constraints (ids are not enforced unique)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed validation blocks the save and leaves the edit in progress.

use crate::error::ValidationError;
use crate::price::Price;
use crate::MAX_NAME_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a display name (book title or author name).
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 200 characters
///
/// ## Returns
/// The trimmed name.
///
/// ## Example
/// ```rust
/// use folio_core::validation::validate_name;
///
/// assert_eq!(validate_name("  Small Gods ").unwrap(), "Small Gods");
/// assert!(validate_name("   ").is_err());
/// ```
pub fn validate_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

/// Splits a full author name into `(first_name, last_name)`.
///
/// The first whitespace-separated word is the first name; everything after
/// it (joined by single spaces) is the last name, possibly empty.
///
/// ## Example
/// ```rust
/// use folio_core::validation::split_author_name;
///
/// assert_eq!(
///     split_author_name("Ursula K. Le Guin").unwrap(),
///     ("Ursula".to_string(), "K. Le Guin".to_string())
/// );
/// assert_eq!(
///     split_author_name("Homer").unwrap(),
///     ("Homer".to_string(), String::new())
/// );
/// ```
pub fn split_author_name(full_name: &str) -> ValidationResult<(String, String)> {
    let full_name = validate_name(full_name)?;
    let mut parts = full_name.split_whitespace();

    let first_name = parts.next().unwrap_or_default().to_string();
    let last_name = parts.collect::<Vec<_>>().join(" ");

    Ok((first_name, last_name))
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Parses a price typed by the operator.
///
/// ## Rules
/// - Must parse as a number (`"12.50"`, `"7"`, `"0.5"`)
/// - Must be finite and non-negative
/// - At most two decimal places (`"12.345"` is rejected, not rounded)
///
/// ## Example
/// ```rust
/// use folio_core::price::Price;
/// use folio_core::validation::parse_price;
///
/// assert_eq!(parse_price("12.50").unwrap(), Price::from_cents(1250));
/// assert!(parse_price("-5").is_err());
/// assert!(parse_price("abc").is_err());
/// ```
pub fn parse_price(input: &str) -> ValidationResult<Price> {
    let invalid = || ValidationError::MustBeNonNegative {
        field: "price".to_string(),
    };

    let value: f64 = input.trim().parse().map_err(|_| invalid())?;
    if !value.is_finite() || value < 0.0 {
        return Err(invalid());
    }

    let cents = value * 100.0;
    if (cents - cents.round()).abs() > 1e-6 {
        return Err(ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: "use at most two decimal places".to_string(),
        });
    }

    Price::from_major(value).ok_or_else(invalid)
}

/// Parses a positive page count.
pub fn parse_page_count(input: &str) -> ValidationResult<i64> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ValidationError::Required {
            field: "page_count".to_string(),
        });
    }

    let pages: i64 = input.parse().map_err(|_| ValidationError::InvalidFormat {
        field: "page_count".to_string(),
        reason: "must be a whole number".to_string(),
    })?;

    if pages <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "page_count".to_string(),
        });
    }

    Ok(pages)
}

/// Parses a record id typed by the operator (e.g. an author picked for a new book).
pub fn parse_id(field: &str, input: &str) -> ValidationResult<i64> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    input.parse().map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a whole number".to_string(),
    })
}
