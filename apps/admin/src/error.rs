//! # App Error Type
//!
//! Unified error type for CLI commands and shell actions.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in folio-admin                            │
//! │                                                                         │
//! │  Shell: `save`                                                          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Page action                                                     │  │
//! │  │  Result<T, AppError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Bad draft? ──── ValidationError::MustBeNonNegative ──┐         │  │
//! │  │         │                                             │         │  │
//! │  │         ▼                                             ▼         │  │
//! │  │  Fetch failed? ── DataError::Http ─────────────── AppError ────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  The shell prints `[VALIDATION_ERROR] Please enter a valid ...` and    │
//! │  keeps the edit open. One-shot commands exit non-zero via anyhow.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use folio_core::{CoreError, ValidationError};
use folio_data::DataError;
use serde::Serialize;
use thiserror::Error;

/// Error returned from commands and shell actions.
///
/// ## Serialization
/// With `--json` a failing command prints:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Book not found: 42"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("[{}] {}", .code.as_str(), .message)]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Record or store not found
    NotFound,

    /// Input validation failed; the edit stays open
    ValidationError,

    /// Fetching, parsing, or serving data failed
    DataSourceError,

    /// Session storage failed, or the action needs a signed-in user
    SessionError,

    /// Anything else
    Internal,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::DataSourceError => "DATA_SOURCE_ERROR",
            ErrorCode::SessionError => "SESSION_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        AppError::new(ErrorCode::NotFound, format!("{} not found: {}", entity, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    pub fn session(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::SessionError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }

    /// Mutating actions are only offered to signed-in users.
    pub fn sign_in_required() -> Self {
        AppError::session("Sign in to make changes (sign-in <name>)")
    }
}

/// Convenience type alias for command results.
pub type AppResult<T> = Result<T, AppError>;

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound { entity, id } => AppError::not_found(entity, id),
            CoreError::InvalidRecords { .. } => {
                tracing::error!("Unusable records: {}", err);
                AppError::new(ErrorCode::DataSourceError, err.to_string())
            }
            CoreError::UnknownColumn(_) => AppError::validation(err.to_string()),
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<DataError> for AppError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::InvalidShape(e) => e.into(),
            DataError::Session(_) => {
                tracing::error!("Session storage failed: {}", err);
                AppError::session(err.to_string())
            }
            ref e if e.is_config_error() => AppError::validation(e.to_string()),
            DataError::Cancelled => AppError::internal(err.to_string()),
            _ => {
                tracing::error!("Data source failed: {}", err);
                AppError::new(ErrorCode::DataSourceError, err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_wire_code() {
        let err = AppError::not_found("Book", 42);
        assert_eq!(err.to_string(), "[NOT_FOUND] Book not found: 42");
    }

    #[test]
    fn test_converts_into_anyhow() {
        let err: anyhow::Error = AppError::sign_in_required().into();
        assert_eq!(
            err.to_string(),
            "[SESSION_ERROR] Sign in to make changes (sign-in <name>)"
        );
        assert!(err.downcast_ref::<AppError>().is_some());
    }

    #[test]
    fn test_serializes_code_screaming_snake() {
        let err = AppError::validation("name is required");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["message"], "name is required");
    }

    #[test]
    fn test_core_errors_map_to_codes() {
        let err: AppError = CoreError::NotFound { entity: "Author", id: 7 }.into();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err: AppError = CoreError::from(ValidationError::NotEditing).into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "No row is being edited");
    }

    #[test]
    fn test_data_errors_map_to_codes() {
        let err: AppError = DataError::Session("disk full".into()).into();
        assert_eq!(err.code, ErrorCode::SessionError);

        let err: AppError = DataError::http(folio_core::Resource::Books, "timed out").into();
        assert_eq!(err.code, ErrorCode::DataSourceError);

        let err: AppError = DataError::InvalidConfig("port".into()).into();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }
}
