//! # folio-data: Data Sources, Loading and Session Storage
//!
//! The I/O half of Folio. Pages get their [`folio_core::Catalog`] from the
//! [`loader`], their sign-in state from [`auth`], and everything is wired
//! by [`config`].
//!
//! ## Module Structure
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          folio-data                                     │
//! │                                                                         │
//! │  config ──► endpoints ──► fetch ──► loader ──► Catalog (folio-core)    │
//! │     │                                                                   │
//! │     └─────► auth (FileSessionStore) ──► AuthSnapshot (folio-core)      │
//! │                                                                         │
//! │  mock: axum server answering the same routes the fetchers request      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! let config = FolioConfig::load(None)?;
//! let loader = LibraryLoader::new(DataSource::from_config(&config)?);
//! let report = loader.spawn().wait().await?;
//! let mut catalog = loader.catalog().await;
//! ```

pub mod auth;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod fetch;
pub mod loader;
pub mod mock;

pub use auth::{AuthContext, FileSessionStore, MemorySessionStore, SessionStore};
pub use config::FolioConfig;
pub use endpoints::{ApiRoutes, DataSourceMode};
pub use error::{DataError, DataResult};
pub use fetch::{DataSource, FixtureFetcher, HttpFetcher, ResourceFetcher};
pub use loader::{LibraryLoader, LibraryState, LoadHandle, LoadReport, LoadStatus};
