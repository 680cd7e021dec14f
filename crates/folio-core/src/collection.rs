//! # Collection Helpers
//!
//! In-memory mutations shared by every page: id assignment, replace-by-id,
//! confirmed deletes, and the "add new" dialogs.
//!
//! ## Id Assignment
//! ```text
//! existing ids:  [1, 2, 7]   ──►  next_id = 8
//! existing ids:  []          ──►  next_id = 1
//! ```
//! Ids are never checked for uniqueness. Two pages adding records against
//! different copies of a collection can hand out the same id.

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::price::Price;
use crate::types::{Author, Book, InventoryItem};
use crate::validation::{split_author_name, validate_name, ValidationResult};

// =============================================================================
// Record Identity
// =============================================================================

/// A record with a numeric id.
pub trait Identified {
    fn id(&self) -> i64;
}

impl Identified for Author {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Identified for Book {
    fn id(&self) -> i64 {
        self.id
    }
}

/// Asks the operator a yes/no question before something destructive.
///
/// The admin shell prompts on stdin; tests use closures or fixed answers.
pub trait Confirm {
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

/// A confirmer that always gives the same answer.
#[derive(Debug, Clone, Copy)]
pub struct Always(pub bool);

impl Confirm for Always {
    fn confirm(&mut self, _message: &str) -> bool {
        self.0
    }
}

// =============================================================================
// Generic Operations
// =============================================================================

/// `max(ids) + 1`, or 1 for an empty collection.
///
/// Fails when the largest id is `i64::MAX`.
pub fn next_id<T: Identified>(rows: &[T]) -> ValidationResult<i64> {
    match rows.iter().map(Identified::id).max() {
        None => Ok(1),
        Some(max) => max.checked_add(1).ok_or_else(|| ValidationError::IdsExhausted {
            field: "id".to_string(),
        }),
    }
}

/// Replaces the first record whose id matches `record.id()`.
///
/// Returns `false` when no record matched; nothing is inserted.
pub fn replace_by_id<T: Identified>(rows: &mut [T], record: T) -> bool {
    match rows.iter_mut().find(|row| row.id() == record.id()) {
        Some(slot) => {
            *slot = record;
            true
        }
        None => false,
    }
}

/// Deletes every record with `id` after the operator confirms.
///
/// Declining is a no-op. Returns whether the delete went ahead.
pub fn delete_with_confirmation<T: Identified>(
    rows: &mut Vec<T>,
    id: i64,
    message: &str,
    confirm: &mut dyn Confirm,
) -> bool {
    if !confirm.confirm(message) {
        return false;
    }

    rows.retain(|row| row.id() != id);
    true
}

// =============================================================================
// Add Dialogs
// =============================================================================

/// Builds a new author from a full name, with the next free id.
///
/// ## Example
/// ```rust
/// use folio_core::collection::new_author;
///
/// let author = new_author(&[], "Ada Lovelace").unwrap();
/// assert_eq!((author.id, author.first_name.as_str(), author.last_name.as_str()),
///            (1, "Ada", "Lovelace"));
/// ```
pub fn new_author(existing: &[Author], full_name: &str) -> ValidationResult<Author> {
    let (first_name, last_name) = split_author_name(full_name)?;
    Ok(Author {
        id: next_id(existing)?,
        first_name,
        last_name,
    })
}

/// Builds a new book with the next free id. Name, author and page count are
/// all required.
pub fn new_book(
    existing: &[Book],
    author_id: i64,
    name: &str,
    page_count: i64,
) -> ValidationResult<Book> {
    let name = validate_name(name)?;
    if page_count <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "page_count".to_string(),
        });
    }

    Ok(Book {
        id: next_id(existing)?,
        name,
        page_count,
        author_id,
        price: None,
    })
}

/// Adds an author to the catalog. Returns the stored record.
pub fn add_author(catalog: &mut Catalog, full_name: &str) -> CoreResult<Author> {
    let author = new_author(catalog.authors(), full_name)?;
    catalog.update_authors(|authors| authors.push(author.clone()));
    Ok(author)
}

/// Adds a book to the catalog. Returns the stored record.
pub fn add_book(
    catalog: &mut Catalog,
    author_id: i64,
    name: &str,
    page_count: i64,
) -> CoreResult<Book> {
    let book = new_book(catalog.books(), author_id, name, page_count)?;
    catalog.update_books(|books| books.push(book.clone()));
    Ok(book)
}

/// Stocks an existing book in a store at a price.
///
/// The book must exist; stocking a book twice adds a second row, and only
/// the first row's price shows on the store page.
pub fn add_inventory_item(
    catalog: &mut Catalog,
    store_id: i64,
    book_id: i64,
    price: Price,
) -> CoreResult<InventoryItem> {
    if !catalog.books().iter().any(|book| book.id == book_id) {
        return Err(CoreError::NotFound {
            entity: "Book",
            id: book_id,
        });
    }
    if price.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        }
        .into());
    }

    let item = InventoryItem {
        store_id,
        book_id,
        price,
    };
    catalog.update_inventory(|inventory| inventory.push(item.clone()));
    Ok(item)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author(id: i64, first: &str, last: &str) -> Author {
        Author {
            id,
            first_name: first.to_string(),
            last_name: last.to_string(),
        }
    }

    fn book(id: i64, name: &str) -> Book {
        Book {
            id,
            name: name.to_string(),
            page_count: 100,
            author_id: 1,
            price: None,
        }
    }

    #[test]
    fn test_next_id() {
        assert_eq!(next_id::<Author>(&[]), Ok(1));
        assert_eq!(
            next_id(&[author(1, "A", "B"), author(7, "C", "D"), author(2, "E", "F")]),
            Ok(8)
        );
    }

    #[test]
    fn test_next_id_at_max_is_an_error() {
        let authors = [author(1, "A", "B"), author(i64::MAX, "C", "D")];
        assert_eq!(
            next_id(&authors),
            Err(ValidationError::IdsExhausted {
                field: "id".to_string()
            })
        );
        assert!(new_author(&authors, "Ada Lovelace").is_err());
    }

    #[test]
    fn test_replace_by_id() {
        let mut books = vec![book(1, "One"), book(2, "Two")];
        assert!(replace_by_id(&mut books, book(2, "Deux")));
        assert_eq!(books[1].name, "Deux");
        assert_eq!(books[0].name, "One");

        assert!(!replace_by_id(&mut books, book(9, "Nine")));
        assert_eq!(books.len(), 2);
    }

    #[test]
    fn test_delete_declined_is_noop() {
        let mut books = vec![book(1, "One"), book(2, "Two")];
        let mut asked = Vec::new();
        let deleted = delete_with_confirmation(
            &mut books,
            1,
            "Are you sure you want to delete this book?",
            &mut |message: &str| {
                asked.push(message.to_string());
                false
            },
        );
        assert!(!deleted);
        assert_eq!(books.len(), 2);
        assert_eq!(asked, vec!["Are you sure you want to delete this book?"]);
    }

    #[test]
    fn test_delete_accepted_removes_exactly_that_id() {
        let mut books = vec![book(1, "One"), book(2, "Two"), book(3, "Three")];
        assert!(delete_with_confirmation(&mut books, 2, "Delete?", &mut Always(true)));
        let ids: Vec<i64> = books.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_add_author_splits_name() {
        let mut catalog = Catalog::new();
        catalog.set_authors(vec![author(4, "Italo", "Calvino")]);

        let added = add_author(&mut catalog, "Ada Lovelace").unwrap();
        assert_eq!(added, author(5, "Ada", "Lovelace"));
        assert_eq!(catalog.authors().len(), 2);

        assert!(add_author(&mut catalog, "  ").is_err());
        assert_eq!(catalog.authors().len(), 2);
    }

    #[test]
    fn test_add_book_requires_fields() {
        let mut catalog = Catalog::new();
        let added = add_book(&mut catalog, 3, "Kindred", 264).unwrap();
        assert_eq!(added.id, 1);
        assert_eq!(added.author_id, 3);

        assert!(add_book(&mut catalog, 3, "", 264).is_err());
        assert!(add_book(&mut catalog, 3, "Dawn", 0).is_err());
        assert_eq!(catalog.books().len(), 1);
    }

    #[test]
    fn test_add_inventory_item() {
        let mut catalog = Catalog::new();
        catalog.set_books(vec![book(1, "One")]);

        add_inventory_item(&mut catalog, 2, 1, Price::from_cents(899)).unwrap();
        let books = catalog.store_books(Some(2), "");
        assert_eq!(books[0].price, Some(Price::from_cents(899)));

        assert!(matches!(
            add_inventory_item(&mut catalog, 2, 42, Price::from_cents(100)),
            Err(CoreError::NotFound { .. })
        ));
    }
}
