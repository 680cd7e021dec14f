//! # Data Error Types
//!
//! Error types for everything that touches the network, the file system or
//! local storage.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Data Error Categories                             │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Fetching       │  │  Configuration  │  │     Session             │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Http           │  │  InvalidConfig  │  │  Session                │ │
//! │  │  Io             │  │  ConfigLoad     │  │  (local storage file)   │ │
//! │  │  Json           │  │  ConfigSave     │  │                         │ │
//! │  │  InvalidShape   │  │  InvalidUrl     │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐                              │
//! │  │  Loader         │  │  Mock server    │                              │
//! │  │  Cancelled      │  │  Server         │                              │
//! │  └─────────────────┘  └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use folio_core::{CoreError, Resource};
use thiserror::Error;

/// Result type alias for data operations.
pub type DataResult<T> = Result<T, DataError>;

/// Data layer error.
#[derive(Debug, Error)]
pub enum DataError {
    // =========================================================================
    // Fetching
    // =========================================================================
    /// Request failed or returned a non-success status.
    #[error("Request for {resource} failed: {message}")]
    Http { resource: Resource, message: String },

    /// Local file could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Body was not valid JSON.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// JSON was valid but not a record or list of records.
    #[error(transparent)]
    InvalidShape(#[from] CoreError),

    // =========================================================================
    // Configuration
    // =========================================================================
    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Loader / Session / Server
    // =========================================================================
    /// The load was cancelled before it finished.
    #[error("Load cancelled")]
    Cancelled,

    /// Local session storage failed.
    #[error("Session storage error: {0}")]
    Session(String),

    /// Mock server failed to bind or serve.
    #[error("Server error: {0}")]
    Server(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<url::ParseError> for DataError {
    fn from(err: url::ParseError) -> Self {
        DataError::InvalidUrl(err.to_string())
    }
}

impl From<toml::de::Error> for DataError {
    fn from(err: toml::de::Error) -> Self {
        DataError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for DataError {
    fn from(err: toml::ser::Error) -> Self {
        DataError::ConfigSaveFailed(err.to_string())
    }
}

impl DataError {
    /// Wraps a reqwest failure for a resource.
    pub fn http(resource: Resource, err: impl std::fmt::Display) -> Self {
        DataError::Http {
            resource,
            message: err.to_string(),
        }
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            DataError::InvalidConfig(_)
                | DataError::InvalidUrl(_)
                | DataError::ConfigLoadFailed(_)
                | DataError::ConfigSaveFailed(_)
        )
    }
}
