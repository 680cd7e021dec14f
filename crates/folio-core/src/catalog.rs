//! # Catalog
//!
//! The four base collections and every view derived from them.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Catalog Projections                            │
//! │                                                                         │
//! │   authors ──► author_map ─────────────┬──────────────┐                 │
//! │                                       │              │                  │
//! │   books ──────────────────────────────┼──► store_books(store, search)  │
//! │                                       │              │                  │
//! │   inventory ──────────────────────────┼──────────────┤                  │
//! │                                       │              ▼                  │
//! │   stores ──► store_map ───────────────┴──► books_with_stores           │
//! │                                                                         │
//! │  Every projection is a pure function of its inputs. The `Catalog`      │
//! │  caches each one keyed by the revisions of the collections it reads,   │
//! │  so unchanged inputs hand back the very same `Arc`.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{CoreError, CoreResult};
use crate::price::Price;
use crate::records::normalize_records;
use crate::types::{
    Author, AuthorEntry, Book, BookRow, BookWithStores, InventoryItem, Resource, Store,
    StoreListing, UNKNOWN_AUTHOR, UNKNOWN_STORE,
};

/// Author id → author with display name.
pub type AuthorMap = BTreeMap<i64, AuthorEntry>;

/// Store id → store record.
pub type StoreMap = BTreeMap<i64, Store>;

// =============================================================================
// Search
// =============================================================================

/// A row that can be matched against a free-text search term.
pub trait Searchable {
    /// The stringified field values a search term is matched against.
    fn search_values(&self) -> Vec<String>;
}

impl Searchable for Author {
    fn search_values(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.first_name.clone(),
            self.last_name.clone(),
        ]
    }
}

impl Searchable for BookRow {
    fn search_values(&self) -> Vec<String> {
        let book = &self.book;
        let mut values = vec![
            book.id.to_string(),
            book.name.clone(),
            book.page_count.to_string(),
            book.author_id.to_string(),
        ];
        if let Some(price) = book.price {
            values.push(price.search_text());
        }
        values.push(self.author_name.clone());
        values
    }
}

/// The lower-cased term to look for, or `None` when the term is blank
/// (empty or whitespace only). Surrounding spaces of a non-blank term are
/// kept as typed.
pub fn search_needle(search: &str) -> Option<String> {
    if search.trim().is_empty() {
        None
    } else {
        Some(search.to_lowercase())
    }
}

/// Case-insensitive substring match over a row's values.
///
/// A blank term matches everything; see [`search_needle`].
pub fn matches_search<R: Searchable + ?Sized>(row: &R, search: &str) -> bool {
    let Some(needle) = search_needle(search) else {
        return true;
    };

    row.search_values()
        .iter()
        .any(|value| value.to_lowercase().contains(&needle))
}

/// Keeps the rows matching `search`, preserving order.
pub fn filter_rows<R: Searchable + Clone>(rows: &[R], search: &str) -> Vec<R> {
    rows.iter()
        .filter(|row| matches_search(*row, search))
        .cloned()
        .collect()
}

/// Authors page filter: matches id, first name and last name.
pub fn filter_authors(authors: &[Author], search: &str) -> Vec<Author> {
    filter_rows(authors, search)
}

// =============================================================================
// Pure Projections
// =============================================================================

/// Builds the author lookup. A repeated id keeps the last record.
pub fn author_map(authors: &[Author]) -> AuthorMap {
    authors
        .iter()
        .map(|author| (author.id, AuthorEntry::from(author)))
        .collect()
}

/// Builds the store lookup. A repeated id keeps the last record.
pub fn store_map(stores: &[Store]) -> StoreMap {
    stores
        .iter()
        .map(|store| (store.id, store.clone()))
        .collect()
}

/// Resolves an author id to a display name, falling back to [`UNKNOWN_AUTHOR`].
pub fn author_name(authors: &AuthorMap, author_id: i64) -> String {
    authors
        .get(&author_id)
        .map(|entry| entry.name.clone())
        .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string())
}

/// Resolves a store id to its name, falling back to [`UNKNOWN_STORE`].
pub fn store_name(stores: &StoreMap, store_id: i64) -> String {
    stores
        .get(&store_id)
        .map(|store| store.name.clone())
        .unwrap_or_else(|| UNKNOWN_STORE.to_string())
}

/// Attaches resolved author names to books, as book tables display them.
pub fn enrich_books(books: &[Book], authors: &AuthorMap) -> Vec<BookRow> {
    books
        .iter()
        .map(|book| BookRow {
            author_name: author_name(authors, book.author_id),
            book: book.clone(),
        })
        .collect()
}

/// Books for the store inventory page.
///
/// ## Behavior
/// - `store_id == None`: the full book list, unfiltered (search ignored)
/// - `store_id == Some(s)`: books with at least one inventory row for `s`,
///   in book order, priced from the first such row, then narrowed by
///   `search` over the book's values plus its resolved author name
pub fn store_books(
    books: &[Book],
    inventory: &[InventoryItem],
    authors: &AuthorMap,
    store_id: Option<i64>,
    search: &str,
) -> Vec<Book> {
    let Some(store_id) = store_id else {
        return books.to_vec();
    };

    let store_inventory: Vec<&InventoryItem> = inventory
        .iter()
        .filter(|item| item.store_id == store_id)
        .collect();

    books
        .iter()
        .filter_map(|book| {
            store_inventory
                .iter()
                .find(|item| item.book_id == book.id)
                .map(|item| book.with_price(item.price))
        })
        .filter(|book| {
            let row = BookRow {
                author_name: author_name(authors, book.author_id),
                book: book.clone(),
            };
            matches_search(&row, search)
        })
        .collect()
}

/// Every book with the stores carrying it, for the browse page.
///
/// One entry per book; one listing per inventory row referencing the book.
pub fn books_with_stores(
    books: &[Book],
    inventory: &[InventoryItem],
    authors: &AuthorMap,
    stores: &StoreMap,
) -> Vec<BookWithStores> {
    books
        .iter()
        .map(|book| BookWithStores {
            title: book.name.clone(),
            author: author_name(authors, book.author_id),
            stores: inventory
                .iter()
                .filter(|item| item.book_id == book.id)
                .map(|item| StoreListing {
                    name: store_name(stores, item.store_id),
                    price: item.price,
                })
                .collect(),
        })
        .collect()
}

// =============================================================================
// Memoization
// =============================================================================

/// Single-slot cache: recompute when the key changes, otherwise share.
#[derive(Debug, Clone)]
struct Memo<K, V> {
    slot: Option<(K, Arc<V>)>,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Memo { slot: None }
    }
}

impl<K: PartialEq, V> Memo<K, V> {
    fn get_or_compute(&mut self, key: K, compute: impl FnOnce() -> V) -> Arc<V> {
        if let Some((cached_key, value)) = &self.slot {
            if *cached_key == key {
                return Arc::clone(value);
            }
        }

        let value = Arc::new(compute());
        self.slot = Some((key, Arc::clone(&value)));
        value
    }
}

/// Revision stamp per collection. Bumped by every write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Revisions {
    books: u64,
    authors: u64,
    stores: u64,
    inventory: u64,
}

type StoreBooksKey = (u64, u64, u64, Option<i64>, String);

// =============================================================================
// Catalog
// =============================================================================

/// The in-memory catalog a page works against.
///
/// ## Lifecycle
/// ```text
/// load (four fetches) ──► set_*/apply_payload ──► projections
///                                 ▲                     │
///                                 └── edits / deletes ◄─┘
/// ```
/// Writes only touch memory; nothing is sent back to the data source.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    books: Vec<Book>,
    authors: Vec<Author>,
    stores: Vec<Store>,
    inventory: Vec<InventoryItem>,
    revisions: Revisions,
    clock: u64,
    author_map: Memo<u64, AuthorMap>,
    store_map: Memo<u64, StoreMap>,
    store_books: Memo<StoreBooksKey, Vec<Book>>,
    books_with_stores: Memo<(u64, u64, u64, u64), Vec<BookWithStores>>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog from already-loaded collections.
    pub fn from_parts(
        books: Vec<Book>,
        authors: Vec<Author>,
        stores: Vec<Store>,
        inventory: Vec<InventoryItem>,
    ) -> Self {
        let mut catalog = Catalog::new();
        catalog.set_books(books);
        catalog.set_authors(authors);
        catalog.set_stores(stores);
        catalog.set_inventory(inventory);
        catalog
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    // =========================================================================
    // Collections
    // =========================================================================

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    pub fn stores(&self) -> &[Store] {
        &self.stores
    }

    pub fn inventory(&self) -> &[InventoryItem] {
        &self.inventory
    }

    pub fn set_books(&mut self, books: Vec<Book>) {
        self.books = books;
        self.revisions.books = self.tick();
    }

    pub fn set_authors(&mut self, authors: Vec<Author>) {
        self.authors = authors;
        self.revisions.authors = self.tick();
    }

    pub fn set_stores(&mut self, stores: Vec<Store>) {
        self.stores = stores;
        self.revisions.stores = self.tick();
    }

    pub fn set_inventory(&mut self, inventory: Vec<InventoryItem>) {
        self.inventory = inventory;
        self.revisions.inventory = self.tick();
    }

    /// Mutates the book list in place.
    pub fn update_books<R>(&mut self, f: impl FnOnce(&mut Vec<Book>) -> R) -> R {
        let result = f(&mut self.books);
        self.revisions.books = self.tick();
        result
    }

    /// Mutates the author list in place.
    pub fn update_authors<R>(&mut self, f: impl FnOnce(&mut Vec<Author>) -> R) -> R {
        let result = f(&mut self.authors);
        self.revisions.authors = self.tick();
        result
    }

    /// Mutates the inventory in place.
    pub fn update_inventory<R>(&mut self, f: impl FnOnce(&mut Vec<InventoryItem>) -> R) -> R {
        let result = f(&mut self.inventory);
        self.revisions.inventory = self.tick();
        result
    }

    /// Normalizes a raw endpoint payload and replaces that collection.
    ///
    /// Returns the number of records stored.
    pub fn apply_payload(&mut self, resource: Resource, payload: Value) -> CoreResult<usize> {
        match resource {
            Resource::Stores => {
                let stores: Vec<Store> = normalize_records(resource, payload)?;
                let count = stores.len();
                self.set_stores(stores);
                Ok(count)
            }
            Resource::Books => {
                let books: Vec<Book> = normalize_records(resource, payload)?;
                let count = books.len();
                self.set_books(books);
                Ok(count)
            }
            Resource::Authors => {
                let authors: Vec<Author> = normalize_records(resource, payload)?;
                let count = authors.len();
                self.set_authors(authors);
                Ok(count)
            }
            Resource::Inventory => {
                let inventory: Vec<InventoryItem> = normalize_records(resource, payload)?;
                let count = inventory.len();
                self.set_inventory(inventory);
                Ok(count)
            }
        }
    }

    /// Number of records currently held for a resource.
    pub fn len_of(&self, resource: Resource) -> usize {
        match resource {
            Resource::Stores => self.stores.len(),
            Resource::Books => self.books.len(),
            Resource::Authors => self.authors.len(),
            Resource::Inventory => self.inventory.len(),
        }
    }

    /// The store record for an id, if loaded.
    pub fn current_store(&self, store_id: i64) -> Option<&Store> {
        self.stores.iter().find(|store| store.id == store_id)
    }

    /// Sets the price of the first inventory row for `(store_id, book_id)`.
    pub fn set_store_price(&mut self, store_id: i64, book_id: i64, price: Price) -> CoreResult<()> {
        let position = self
            .inventory
            .iter()
            .position(|item| item.store_id == store_id && item.book_id == book_id)
            .ok_or(CoreError::NotFound {
                entity: "Inventory item",
                id: book_id,
            })?;

        self.update_inventory(|inventory| inventory[position].price = price);
        Ok(())
    }

    // =========================================================================
    // Projections (memoized)
    // =========================================================================

    /// Author id → author entry.
    pub fn author_map(&mut self) -> Arc<AuthorMap> {
        let authors = &self.authors;
        self.author_map
            .get_or_compute(self.revisions.authors, || author_map(authors))
    }

    /// Store id → store.
    pub fn store_map(&mut self) -> Arc<StoreMap> {
        let stores = &self.stores;
        self.store_map
            .get_or_compute(self.revisions.stores, || store_map(stores))
    }

    /// See [`store_books`].
    pub fn store_books(&mut self, store_id: Option<i64>, search: &str) -> Arc<Vec<Book>> {
        let authors = self.author_map();
        let key = (
            self.revisions.books,
            self.revisions.inventory,
            self.revisions.authors,
            store_id,
            search.to_string(),
        );
        let (books, inventory) = (&self.books, &self.inventory);
        self.store_books.get_or_compute(key, || {
            store_books(books, inventory, &authors, store_id, search)
        })
    }

    /// See [`books_with_stores`].
    pub fn books_with_stores(&mut self) -> Arc<Vec<BookWithStores>> {
        let authors = self.author_map();
        let stores = self.store_map();
        let key = (
            self.revisions.books,
            self.revisions.inventory,
            self.revisions.authors,
            self.revisions.stores,
        );
        let (books, inventory) = (&self.books, &self.inventory);
        self.books_with_stores.get_or_compute(key, || {
            books_with_stores(books, inventory, &authors, &stores)
        })
    }
}
