//! # Inline Editing
//!
//! One `EditSession` per page tracks the single cell being edited.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Edit Session                                   │
//! │                                                                         │
//! │            begin(row)                     save ok                      │
//! │   Idle ─────────────────► Editing(row) ─────────────► Idle             │
//! │    ▲                        │    │  │                                   │
//! │    │        cancel / Escape │    │  │ save fails validation            │
//! │    └────────────────────────┘    │  └──► Editing(row), draft kept      │
//! │                                  │                                      │
//! │            begin(other row)      ▼                                      │
//! │   draft clean ──► Editing(other)                                        │
//! │   draft dirty ──► confirm? yes ──► Editing(other), draft discarded     │
//! │                            no  ──► Editing(row), unchanged             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Saves only touch the in-memory [`Catalog`]; nothing is written back to
//! the data source.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::collection::{replace_by_id, Confirm};
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::price::Price;
use crate::types::{Author, Book};
use crate::validation::{parse_price, split_author_name, validate_name};

/// Which cell of the row is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditField {
    Name,
    Price,
}

/// Keys the inline editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    /// Saves the draft.
    Enter,
    /// Cancels the edit.
    Escape,
}

impl EditKey {
    /// Maps a key name (`"Enter"`, `"Escape"`) to an editor key.
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "Enter" => Some(EditKey::Enter),
            "Escape" | "Esc" => Some(EditKey::Escape),
            _ => None,
        }
    }
}

/// The edit in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEdit {
    pub row: i64,
    pub field: EditField,
    pub draft: String,
    pub original: String,
}

impl PendingEdit {
    /// True once the draft differs from the value the edit started with.
    pub fn is_dirty(&self) -> bool {
        self.draft != self.original
    }
}

/// What `begin`/`toggle` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BeginOutcome {
    /// Editing started (nothing was pending, or the pending draft was clean).
    Started,
    /// The operator declined to discard a dirty draft; the old edit stays.
    Kept,
    /// A dirty draft on another row was discarded.
    Switched { discarded: PendingEdit },
    /// The row was already being edited; the edit was cancelled.
    Cancelled,
}

/// Inline edit state for one page.
#[derive(Debug, Clone, Default)]
pub struct EditSession {
    pending: Option<PendingEdit>,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Row id currently in edit mode, if any.
    pub fn editing_row(&self) -> Option<i64> {
        self.pending.as_ref().map(|edit| edit.row)
    }

    pub fn is_editing(&self, row: i64) -> bool {
        self.editing_row() == Some(row)
    }

    pub fn pending(&self) -> Option<&PendingEdit> {
        self.pending.as_ref()
    }

    /// Current draft text, empty when idle.
    pub fn draft(&self) -> &str {
        self.pending.as_ref().map_or("", |edit| edit.draft.as_str())
    }

    /// Replaces the draft. Ignored when idle.
    pub fn set_draft(&mut self, value: impl Into<String>) {
        if let Some(edit) = self.pending.as_mut() {
            edit.draft = value.into();
        }
    }

    /// Enters edit mode for `row`, seeding the draft with `initial`.
    ///
    /// A dirty draft on a different row is only dropped if `confirm` agrees.
    pub fn begin(
        &mut self,
        row: i64,
        field: EditField,
        initial: impl Into<String>,
        confirm: &mut dyn Confirm,
    ) -> BeginOutcome {
        let discarded = match self.pending.take() {
            Some(edit) if edit.row != row && edit.is_dirty() => {
                let message = format!("Discard unsaved changes to row {}?", edit.row);
                if !confirm.confirm(&message) {
                    self.pending = Some(edit);
                    return BeginOutcome::Kept;
                }
                Some(edit)
            }
            _ => None,
        };

        let initial = initial.into();
        self.pending = Some(PendingEdit {
            row,
            field,
            draft: initial.clone(),
            original: initial,
        });

        match discarded {
            Some(discarded) => BeginOutcome::Switched { discarded },
            None => BeginOutcome::Started,
        }
    }

    /// The row's action button: cancels when `row` is being edited,
    /// otherwise behaves like [`EditSession::begin`].
    pub fn toggle(
        &mut self,
        row: i64,
        field: EditField,
        initial: impl Into<String>,
        confirm: &mut dyn Confirm,
    ) -> BeginOutcome {
        if self.is_editing(row) {
            self.cancel();
            return BeginOutcome::Cancelled;
        }
        self.begin(row, field, initial, confirm)
    }

    /// Drops the draft and leaves edit mode. Never mutates data.
    pub fn cancel(&mut self) -> Option<PendingEdit> {
        self.pending.take()
    }

    /// Leaves edit mode if `row` is the one being edited (used after deletes).
    pub fn clear_row(&mut self, row: i64) {
        if self.is_editing(row) {
            self.pending = None;
        }
    }

    fn active(&self, field: EditField) -> Result<&PendingEdit, ValidationError> {
        self.pending
            .as_ref()
            .filter(|edit| edit.field == field)
            .ok_or(ValidationError::NotEditing)
    }

    // =========================================================================
    // Saves
    // =========================================================================

    /// Saves the draft as the edited book's title.
    pub fn save_book_name(&mut self, catalog: &mut Catalog) -> CoreResult<Book> {
        let edit = self.active(EditField::Name)?;
        let name = validate_name(&edit.draft)?;

        let mut book = catalog
            .books()
            .iter()
            .find(|book| book.id == edit.row)
            .cloned()
            .ok_or(CoreError::NotFound {
                entity: "Book",
                id: edit.row,
            })?;
        book.name = name;

        catalog.update_books(|books| replace_by_id(books, book.clone()));
        self.pending = None;
        Ok(book)
    }

    /// Saves the draft as the edited book's price in `store_id`.
    pub fn save_store_price(&mut self, catalog: &mut Catalog, store_id: i64) -> CoreResult<Price> {
        let edit = self.active(EditField::Price)?;
        let price = parse_price(&edit.draft)?;

        catalog.set_store_price(store_id, edit.row, price)?;
        self.pending = None;
        Ok(price)
    }

    /// Saves the draft as the edited author's full name.
    ///
    /// The first word becomes the first name, the rest the last name. A
    /// single-word draft keeps the previous last name.
    pub fn save_author_name(&mut self, catalog: &mut Catalog) -> CoreResult<Author> {
        let edit = self.active(EditField::Name)?;
        let (first_name, last_name) = split_author_name(&edit.draft)?;

        let mut author = catalog
            .authors()
            .iter()
            .find(|author| author.id == edit.row)
            .cloned()
            .ok_or(CoreError::NotFound {
                entity: "Author",
                id: edit.row,
            })?;
        author.first_name = first_name;
        if !last_name.is_empty() {
            author.last_name = last_name;
        }

        catalog.update_authors(|authors| replace_by_id(authors, author.clone()));
        self.pending = None;
        Ok(author)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::Always;
    use crate::types::InventoryItem;

    fn catalog() -> Catalog {
        Catalog::from_parts(
            vec![
                Book {
                    id: 1,
                    name: "Small Gods".to_string(),
                    page_count: 384,
                    author_id: 2,
                    price: None,
                },
                Book {
                    id: 2,
                    name: "Kindred".to_string(),
                    page_count: 264,
                    author_id: 3,
                    price: None,
                },
            ],
            vec![Author {
                id: 2,
                first_name: "Terry".to_string(),
                last_name: "Pratchett".to_string(),
            }],
            vec![],
            vec![
                InventoryItem {
                    store_id: 1,
                    book_id: 1,
                    price: Price::from_cents(950),
                },
                InventoryItem {
                    store_id: 2,
                    book_id: 1,
                    price: Price::from_cents(1320),
                },
            ],
        )
    }

    #[test]
    fn test_begin_and_cancel() {
        let mut session = EditSession::new();
        assert_eq!(
            session.begin(1, EditField::Name, "Small Gods", &mut Always(true)),
            BeginOutcome::Started
        );
        assert!(session.is_editing(1));
        assert_eq!(session.draft(), "Small Gods");

        session.set_draft("Large Gods");
        let dropped = session.cancel().unwrap();
        assert_eq!(dropped.draft, "Large Gods");
        assert_eq!(session.editing_row(), None);
        assert_eq!(session.draft(), "");
    }

    #[test]
    fn test_switching_with_clean_draft_is_silent() {
        let mut session = EditSession::new();
        session.begin(1, EditField::Name, "Small Gods", &mut Always(true));

        let mut asked = false;
        let outcome = session.begin(2, EditField::Name, "Kindred", &mut |_: &str| {
            asked = true;
            false
        });
        assert_eq!(outcome, BeginOutcome::Started);
        assert!(!asked);
        assert!(session.is_editing(2));
    }

    #[test]
    fn test_switching_with_dirty_draft_asks() {
        let mut session = EditSession::new();
        session.begin(1, EditField::Name, "Small Gods", &mut Always(true));
        session.set_draft("Smaller Gods");

        let outcome = session.begin(2, EditField::Name, "Kindred", &mut Always(false));
        assert_eq!(outcome, BeginOutcome::Kept);
        assert!(session.is_editing(1));
        assert_eq!(session.draft(), "Smaller Gods");

        let mut message = String::new();
        let outcome = session.begin(2, EditField::Name, "Kindred", &mut |m: &str| {
            message = m.to_string();
            true
        });
        assert_eq!(message, "Discard unsaved changes to row 1?");
        match outcome {
            BeginOutcome::Switched { discarded } => assert_eq!(discarded.draft, "Smaller Gods"),
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(session.is_editing(2));
        assert_eq!(session.draft(), "Kindred");
    }

    #[test]
    fn test_toggle_cancels_the_edited_row() {
        let mut session = EditSession::new();
        session.toggle(1, EditField::Name, "Small Gods", &mut Always(true));
        assert!(session.is_editing(1));
        assert_eq!(
            session.toggle(1, EditField::Name, "Small Gods", &mut Always(true)),
            BeginOutcome::Cancelled
        );
        assert_eq!(session.editing_row(), None);
    }

    #[test]
    fn test_save_book_name_replaces_only_that_book() {
        let mut catalog = catalog();
        let mut session = EditSession::new();
        session.begin(1, EditField::Name, "Small Gods", &mut Always(true));
        session.set_draft("  Pyramids ");

        let saved = session.save_book_name(&mut catalog).unwrap();
        assert_eq!(saved.name, "Pyramids");
        assert_eq!(catalog.books()[0].name, "Pyramids");
        assert_eq!(catalog.books()[1].name, "Kindred");
        assert_eq!(session.editing_row(), None);
    }

    #[test]
    fn test_empty_name_keeps_edit_mode() {
        let mut catalog = catalog();
        let mut session = EditSession::new();
        session.begin(1, EditField::Name, "Small Gods", &mut Always(true));
        session.set_draft("   ");

        let err = session.save_book_name(&mut catalog).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Required { .. })
        ));
        assert!(session.is_editing(1));
        assert_eq!(session.draft(), "   ");
        assert_eq!(catalog.books()[0].name, "Small Gods");
    }

    #[test]
    fn test_save_store_price_updates_inventory_row() {
        let mut catalog = catalog();
        let mut session = EditSession::new();
        session.begin(1, EditField::Price, "9.50", &mut Always(true));
        session.set_draft("12.50");

        let price = session.save_store_price(&mut catalog, 1).unwrap();
        assert_eq!(price.cents(), 1250);
        assert_eq!(
            catalog.store_books(Some(1), "")[0].price,
            Some(Price::from_cents(1250))
        );
        assert_eq!(
            catalog.store_books(Some(2), "")[0].price,
            Some(Price::from_cents(1320))
        );
        assert!(catalog.books()[0].price.is_none());
    }

    #[test]
    fn test_invalid_price_is_rejected() {
        let mut catalog = catalog();
        let mut session = EditSession::new();
        session.begin(1, EditField::Price, "9.50", &mut Always(true));

        for bad in ["-5", "abc", ""] {
            session.set_draft(bad);
            let err = session.save_store_price(&mut catalog, 1).unwrap_err();
            assert_eq!(
                err.to_string(),
                "Validation error: Please enter a valid non-negative price"
            );
            assert!(session.is_editing(1));
        }
        assert_eq!(catalog.inventory()[0].price, Price::from_cents(950));
    }

    #[test]
    fn test_save_author_name_splits_on_first_space() {
        let mut catalog = catalog();
        let mut session = EditSession::new();

        session.begin(2, EditField::Name, "Terry Pratchett", &mut Always(true));
        session.set_draft("Terence David John Pratchett");
        let author = session.save_author_name(&mut catalog).unwrap();
        assert_eq!(author.first_name, "Terence");
        assert_eq!(author.last_name, "David John Pratchett");

        session.begin(2, EditField::Name, "Terence David John Pratchett", &mut Always(true));
        session.set_draft("Pterry");
        let author = session.save_author_name(&mut catalog).unwrap();
        assert_eq!(author.first_name, "Pterry");
        assert_eq!(author.last_name, "David John Pratchett");
    }

    #[test]
    fn test_save_without_edit_fails() {
        let mut catalog = catalog();
        let mut session = EditSession::new();
        assert!(matches!(
            session.save_book_name(&mut catalog),
            Err(CoreError::Validation(ValidationError::NotEditing))
        ));

        session.begin(1, EditField::Price, "9.50", &mut Always(true));
        assert!(session.save_book_name(&mut catalog).is_err());
    }

    #[test]
    fn test_clear_row_after_delete() {
        let mut session = EditSession::new();
        session.begin(1, EditField::Name, "Small Gods", &mut Always(true));
        session.clear_row(2);
        assert!(session.is_editing(1));
        session.clear_row(1);
        assert_eq!(session.editing_row(), None);
    }

    #[test]
    fn test_edit_key_names() {
        assert_eq!(EditKey::from_key_name("Enter"), Some(EditKey::Enter));
        assert_eq!(EditKey::from_key_name("Escape"), Some(EditKey::Escape));
        assert_eq!(EditKey::from_key_name("Tab"), None);
    }
}
