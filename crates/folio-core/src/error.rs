//! # Error Types
//!
//! Domain-specific error types for folio-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  folio-core errors (this file)                                         │
//! │  ├── CoreError        - Catalog / record shape failures                │
//! │  └── ValidationError  - Input validation failures (inline edits, adds) │
//! │                                                                         │
//! │  folio-data errors (separate crate)                                    │
//! │  └── DataError        - Fetch, storage and config failures             │
//! │                                                                         │
//! │  folio-admin errors (in app)                                           │
//! │  └── AppError         - What the operator sees                         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DataError → AppError → Terminal   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::Resource;

// =============================================================================
// Core Error
// =============================================================================

/// Catalog-level errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A record with the given id does not exist in the collection.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    /// An endpoint returned JSON that is neither a record nor a list of records.
    ///
    /// ## When This Occurs
    /// - Endpoint returned a bare string/number/null
    /// - A record inside the list is missing required fields
    #[error("Unexpected {resource} payload: {reason}")]
    InvalidRecords { resource: Resource, reason: String },

    /// Unknown column key in a column request.
    #[error("Unknown column '{0}'. Valid columns: id, name, pages, author, price, actions")]
    UnknownColumn(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any record is mutated; the caller keeps its edit state
/// and shows the message to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be non-negative.
    #[error("Please enter a valid non-negative {field}")]
    MustBeNonNegative { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (not a number, not an integer, ...).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// No row is currently being edited.
    #[error("No row is being edited")]
    NotEditing,

    /// The largest id is already in use.
    #[error("No {field} left to assign")]
    IdsExhausted { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
