//! # Domain Types
//!
//! Records loaded from the four resource endpoints, plus the derived rows
//! the admin pages render.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Author      │   │      Book       │   │     Store       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  author_id      │   │  id             │       │
//! │  │  first_name     │   │  id             │   │  name           │       │
//! │  │  last_name      │   │  name           │   │  ...extra       │       │
//! │  └─────────────────┘   │  page_count     │   └────────▲────────┘       │
//! │                        │  price?         │            │                │
//! │                        └────────▲────────┘            │                │
//! │                                 │                     │                │
//! │                        ┌────────┴─────────────────────┴──┐             │
//! │                        │        InventoryItem            │             │
//! │                        │  store_id, book_id, price       │             │
//! │                        └─────────────────────────────────┘             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! References are never enforced: an unknown `author_id` renders as
//! [`UNKNOWN_AUTHOR`], an unknown `store_id` as [`UNKNOWN_STORE`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use ts_rs::TS;

use crate::price::Price;

/// Label used when a book's `author_id` does not resolve.
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Label used when an inventory row's `store_id` does not resolve.
pub const UNKNOWN_STORE: &str = "Unknown Store";

// =============================================================================
// Resource
// =============================================================================

/// The four base collections served by the data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Stores,
    Books,
    Authors,
    Inventory,
}

impl Resource {
    /// Every resource, in the order the loader issues requests.
    pub const ALL: [Resource; 4] = [
        Resource::Stores,
        Resource::Books,
        Resource::Authors,
        Resource::Inventory,
    ];

    /// Lower-case name used in routes and file names.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Resource::Stores => "stores",
            Resource::Books => "books",
            Resource::Authors => "authors",
            Resource::Inventory => "inventory",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Resource {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resource::ALL
            .into_iter()
            .find(|resource| resource.as_str() == s)
            .ok_or(())
    }
}

// =============================================================================
// Author
// =============================================================================

/// A book author. The display name is always derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Author {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

impl Author {
    /// `first_name + " " + last_name`.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// =============================================================================
// Book
// =============================================================================

/// A book. `price` is only present when the book was joined against a
/// store's inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Book {
    pub id: i64,
    pub name: String,
    pub page_count: i64,
    pub author_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(type = "number | null")]
    pub price: Option<Price>,
}

impl Book {
    /// Returns a copy annotated with a store-specific price.
    pub fn with_price(&self, price: Price) -> Self {
        Book {
            price: Some(price),
            ..self.clone()
        }
    }
}

// =============================================================================
// Store
// =============================================================================

/// A store. Fields beyond `id` and `name` are kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Store {
    pub id: i64,
    pub name: String,
    #[serde(flatten)]
    #[ts(skip)]
    pub extra: Map<String, Value>,
}

impl Store {
    /// Looks up one of the untyped extra fields (e.g. `address`).
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}

// =============================================================================
// Inventory
// =============================================================================

/// Join row: a book stocked by a store at a store-specific price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InventoryItem {
    pub store_id: i64,
    pub book_id: i64,
    #[ts(type = "number")]
    pub price: Price,
}

// =============================================================================
// Derived Rows
// =============================================================================

/// An author together with the derived display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct AuthorEntry {
    #[serde(flatten)]
    pub author: Author,
    pub name: String,
}

impl From<&Author> for AuthorEntry {
    fn from(author: &Author) -> Self {
        AuthorEntry {
            name: author.display_name(),
            author: author.clone(),
        }
    }
}

/// A book enriched with its resolved author name, as shown in book tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct BookRow {
    #[serde(flatten)]
    pub book: Book,
    pub author_name: String,
}

/// One store carrying a book, for the cross-store browse view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct StoreListing {
    pub name: String,
    #[ts(type = "number")]
    pub price: Price,
}

/// A book and every store that stocks it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct BookWithStores {
    pub title: String,
    pub author: String,
    pub stores: Vec<StoreListing>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_display_name() {
        let author = Author {
            id: 1,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
        };
        assert_eq!(author.display_name(), "Ada Lovelace");
        assert_eq!(AuthorEntry::from(&author).name, "Ada Lovelace");
    }

    #[test]
    fn test_book_price_is_optional_on_the_wire() {
        let book: Book = serde_json::from_str(
            r#"{ "id": 1, "name": "Kindred", "page_count": 264, "author_id": 3 }"#,
        )
        .unwrap();
        assert_eq!(book.price, None);
        assert!(!serde_json::to_string(&book).unwrap().contains("price"));

        let priced = book.with_price(Price::from_cents(1400));
        assert!(serde_json::to_string(&priced).unwrap().contains("\"price\":14"));
    }

    #[test]
    fn test_store_keeps_extra_fields() {
        let store: Store = serde_json::from_str(
            r#"{ "id": 2, "name": "Harbor Reads", "address": "3 Quay Lane" }"#,
        )
        .unwrap();
        assert_eq!(store.name, "Harbor Reads");
        assert_eq!(
            store.attribute("address").and_then(Value::as_str),
            Some("3 Quay Lane")
        );

        let json = serde_json::to_value(&store).unwrap();
        assert_eq!(json["address"], "3 Quay Lane");
    }

    #[test]
    fn test_resource_names() {
        assert_eq!(Resource::Inventory.to_string(), "inventory");
        assert_eq!("books".parse::<Resource>(), Ok(Resource::Books));
        assert!("shelves".parse::<Resource>().is_err());
    }
}
