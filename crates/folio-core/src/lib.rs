//! # folio-core: Pure Catalog Logic for Folio
//!
//! Everything the admin pages compute, as plain functions and small state
//! machines over in-memory collections. No I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Folio Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    folio-admin (CLI / shell)                    │   │
//! │  │    authors page ── store inventory page ── browse page          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ folio-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │  columns  │  │  editing  │  │ validation│  │   │
//! │  │   │  joins    │  │  table    │  │  session  │  │  price    │  │   │
//! │  │   │  search   │  │  tables   │  │  collect. │  │  records  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO STORAGE • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    folio-data (I/O Layer)                       │   │
//! │  │        fetchers, loader, session storage, mock server           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Author, Book, Store, InventoryItem and derived rows
//! - [`price`] - Integer-cent prices with a JSON number wire format
//! - [`catalog`] - Lookup maps, store books, books with stores, search
//! - [`columns`], [`table`], [`tables`] - Editable grid composition
//! - [`editing`] - Inline edit session
//! - [`collection`] - Id assignment, replace, confirmed delete, adds
//! - [`session`] - Signed-in user and auth snapshot
//!
//! ## Example Usage
//!
//! ```rust
//! use folio_core::catalog::Catalog;
//! use folio_core::price::Price;
//! use folio_core::types::{Author, Book, InventoryItem};
//!
//! let mut catalog = Catalog::from_parts(
//!     vec![Book { id: 1, name: "Kindred".into(), page_count: 264, author_id: 3, price: None }],
//!     vec![Author { id: 3, first_name: "Octavia".into(), last_name: "Butler".into() }],
//!     vec![],
//!     vec![InventoryItem { store_id: 1, book_id: 1, price: Price::from_cents(1400) }],
//! );
//!
//! let books = catalog.store_books(Some(1), "butler");
//! assert_eq!(books[0].price, Some(Price::from_cents(1400)));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod collection;
pub mod columns;
pub mod editing;
pub mod error;
pub mod price;
pub mod query;
pub mod records;
pub mod session;
pub mod table;
pub mod tables;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::Catalog;
pub use error::{CoreError, CoreResult, ValidationError};
pub use price::Price;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a book title or author name.
pub const MAX_NAME_LEN: usize = 200;

/// Name given to a user who signs in with a blank name.
pub const DEFAULT_USER_NAME: &str = "User";

/// Local storage key holding the serialized signed-in user.
pub const SESSION_KEY: &str = "user";
