//! # Pages
//!
//! A page owns a [`Catalog`], one [`EditSession`] and a search term, and
//! turns them into a [`View`] for the current sign-in state.
//!
//! ## Page Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          PageState                                      │
//! │                                                                         │
//! │  location "/store/1?search=gods"                                        │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  Page::Inventory { store_id: 1 }, search "gods"                         │
//! │        │                                                                │
//! │        ├── view(auth) ─────► catalog projections ──► Grid ──► render   │
//! │        │                                                                │
//! │        └── actions ────────► edit / set / save / cancel / delete       │
//! │                              add_author / add_book / stock              │
//! │                              (signed-in users only, except cancel)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Locations
//! | Location       | Page                          |
//! |----------------|-------------------------------|
//! | `/`, `/books`  | all books                     |
//! | `/authors`     | authors                       |
//! | `/store/{id}`  | one store's inventory         |
//! | `/browse`      | books with the stores stocking them |

pub mod authors;
pub mod books;
pub mod browse;
pub mod inventory;

use std::fmt;
use std::sync::Arc;

use folio_core::collection::{add_author, add_book, add_inventory_item, delete_with_confirmation, Confirm};
use folio_core::columns::{ColumnKind, DEFAULT_BOOK_COLUMNS};
use folio_core::editing::{BeginOutcome, EditField, EditKey, EditSession, PendingEdit};
use folio_core::query::search_from_location;
use folio_core::session::AuthSnapshot;
use folio_core::table::Grid;
use folio_core::validation::{parse_id, parse_price};
use folio_core::{Author, Book, BookWithStores, Catalog, InventoryItem, Price, ValidationError};
use tracing::{debug, info};

use crate::error::{AppError, AppResult};

// =============================================================================
// Page
// =============================================================================

/// Which page is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Books,
    Authors,
    Inventory { store_id: i64 },
    Browse,
}

impl Page {
    /// Parses the path part of a location; the query string is ignored.
    pub fn from_location(location: &str) -> AppResult<Page> {
        let path = location
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_end_matches('/');

        match path {
            "" | "/books" => Ok(Page::Books),
            "/authors" => Ok(Page::Authors),
            "/browse" => Ok(Page::Browse),
            _ => match path.strip_prefix("/store/") {
                Some(id) => Ok(Page::Inventory {
                    store_id: parse_id("store id", id)?,
                }),
                None => Err(AppError::not_found("Page", location)),
            },
        }
    }

    pub fn title(&self, catalog: &Catalog) -> String {
        match self {
            Page::Books => "Books".to_string(),
            Page::Authors => "Authors List".to_string(),
            Page::Inventory { store_id } => inventory::title(catalog, *store_id),
            Page::Browse => "Books by Store".to_string(),
        }
    }
}

/// What a page shows.
#[derive(Debug, Clone)]
pub enum View {
    Table(Grid),
    Browse(Arc<Vec<BookWithStores>>),
}

/// What a successful save changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Saved {
    Book(Book),
    Author(Author),
    Price { book_id: i64, price: Price },
}

impl fmt::Display for Saved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Saved::Book(book) => write!(f, "Saved book {}: {}", book.id, book.name),
            Saved::Author(author) => {
                write!(f, "Saved author {}: {}", author.id, author.display_name())
            }
            Saved::Price { book_id, price } => write!(f, "Saved price of book {}: {}", book_id, price),
        }
    }
}

// =============================================================================
// Page State
// =============================================================================

/// One open page and everything it needs to render and edit.
#[derive(Debug, Clone)]
pub struct PageState {
    page: Page,
    catalog: Catalog,
    edit: EditSession,
    search: String,
    columns: Vec<ColumnKind>,
}

impl PageState {
    pub fn new(page: Page, catalog: Catalog) -> Self {
        PageState {
            page,
            catalog,
            edit: EditSession::new(),
            search: String::new(),
            columns: DEFAULT_BOOK_COLUMNS.to_vec(),
        }
    }

    /// Opens the page at `location`, seeding the search from `?search=`.
    pub fn open(location: &str, catalog: Catalog) -> AppResult<Self> {
        let page = Page::from_location(location)?;
        Ok(PageState::new(page, catalog).with_search(search_from_location(location)))
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_columns(mut self, columns: Vec<ColumnKind>) -> Self {
        self.columns = columns;
        self
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn edit(&self) -> &EditSession {
        &self.edit
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn title(&self) -> String {
        self.page.title(&self.catalog)
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        debug!(search = %self.search, "Search changed");
    }

    /// Renders the page for the given sign-in state.
    pub fn view(&mut self, auth: &AuthSnapshot) -> View {
        let signed_in = auth.is_authenticated;
        match self.page {
            Page::Books => View::Table(books::grid(
                &mut self.catalog,
                &self.search,
                &self.columns,
                signed_in,
                &self.edit,
            )),
            Page::Authors => View::Table(authors::grid(
                &self.catalog,
                &self.search,
                signed_in,
                &self.edit,
            )),
            Page::Inventory { store_id } => View::Table(inventory::grid(
                &mut self.catalog,
                store_id,
                &self.search,
                &self.columns,
                signed_in,
                &self.edit,
            )),
            Page::Browse => View::Browse(browse::entries(&mut self.catalog, &self.search)),
        }
    }

    // =========================================================================
    // Edit Actions
    // =========================================================================

    /// The row's edit button: starts editing `id`, or cancels when `id` is
    /// already being edited.
    pub fn edit_row(
        &mut self,
        auth: &AuthSnapshot,
        id: i64,
        field: Option<EditField>,
        confirm: &mut dyn Confirm,
    ) -> AppResult<BeginOutcome> {
        require_sign_in(auth)?;

        let (field, initial) = match self.page {
            Page::Books => books::edit_target(&self.catalog, id, field)?,
            Page::Authors => authors::edit_target(&self.catalog, id, field)?,
            Page::Inventory { store_id } => {
                inventory::edit_target(&mut self.catalog, store_id, id, field)?
            }
            Page::Browse => return Err(AppError::validation("Nothing to edit on this page")),
        };

        Ok(self.edit.toggle(id, field, initial, confirm))
    }

    /// Replaces the draft of the open edit.
    pub fn set_draft(&mut self, value: &str) -> AppResult<()> {
        if self.edit.pending().is_none() {
            return Err(ValidationError::NotEditing.into());
        }
        self.edit.set_draft(value);
        Ok(())
    }

    /// Saves the open edit. A validation failure leaves it open.
    pub fn save(&mut self) -> AppResult<Saved> {
        let pending = self.edit.pending().ok_or(ValidationError::NotEditing)?;
        let book_id = pending.row;

        let saved = match (self.page, pending.field) {
            (Page::Authors, _) => Saved::Author(self.edit.save_author_name(&mut self.catalog)?),
            (Page::Inventory { store_id }, EditField::Price) => Saved::Price {
                book_id,
                price: self.edit.save_store_price(&mut self.catalog, store_id)?,
            },
            (_, EditField::Name) => Saved::Book(self.edit.save_book_name(&mut self.catalog)?),
            (_, EditField::Price) => return Err(ValidationError::NotEditing.into()),
        };

        info!(%saved, "Edit saved");
        Ok(saved)
    }

    /// Drops the open edit without touching data.
    pub fn cancel(&mut self) -> Option<PendingEdit> {
        self.edit.cancel()
    }

    /// Enter saves, Escape cancels.
    pub fn key(&mut self, key: EditKey) -> AppResult<Option<Saved>> {
        match key {
            EditKey::Enter => self.save().map(Some),
            EditKey::Escape => {
                self.cancel();
                Ok(None)
            }
        }
    }

    // =========================================================================
    // Collection Actions
    // =========================================================================

    /// Deletes row `id` after confirmation. Returns whether it was deleted.
    ///
    /// Books are removed from the whole catalog, also from a store page.
    pub fn delete(&mut self, auth: &AuthSnapshot, id: i64, confirm: &mut dyn Confirm) -> AppResult<bool> {
        require_sign_in(auth)?;

        let deleted = match self.page {
            Page::Authors => {
                let message = authors::delete_message(&self.catalog, id)?;
                self.catalog
                    .update_authors(|rows| delete_with_confirmation(rows, id, &message, confirm))
            }
            Page::Books => {
                let message = books::delete_message(&self.catalog, id)?;
                self.catalog
                    .update_books(|rows| delete_with_confirmation(rows, id, &message, confirm))
            }
            Page::Inventory { store_id } => {
                let message = inventory::delete_message(&mut self.catalog, store_id, id)?;
                self.catalog
                    .update_books(|rows| delete_with_confirmation(rows, id, &message, confirm))
            }
            Page::Browse => return Err(AppError::validation("Nothing to delete on this page")),
        };

        if deleted {
            self.edit.clear_row(id);
            info!(id, page = ?self.page, "Row deleted");
        }
        Ok(deleted)
    }

    /// Adds an author from a full name ("Ada Lovelace").
    pub fn add_author(&mut self, auth: &AuthSnapshot, full_name: &str) -> AppResult<Author> {
        require_sign_in(auth)?;
        let author = add_author(&mut self.catalog, full_name)?;
        info!(id = author.id, name = %author.display_name(), "Author added");
        Ok(author)
    }

    /// Adds a book. Author id, page count and name are all required.
    pub fn add_book(
        &mut self,
        auth: &AuthSnapshot,
        author_id: &str,
        page_count: &str,
        name: &str,
    ) -> AppResult<Book> {
        require_sign_in(auth)?;
        let author_id = parse_id("author_id", author_id)?;
        let page_count = folio_core::validation::parse_page_count(page_count)?;
        let book = add_book(&mut self.catalog, author_id, name, page_count)?;
        info!(id = book.id, name = %book.name, "Book added");
        Ok(book)
    }

    /// Stocks a book in the open store.
    pub fn stock(&mut self, auth: &AuthSnapshot, book_id: &str, price: &str) -> AppResult<InventoryItem> {
        require_sign_in(auth)?;
        let Page::Inventory { store_id } = self.page else {
            return Err(AppError::validation("Open a store page to add to inventory"));
        };

        let book_id = parse_id("book_id", book_id)?;
        let price = parse_price(price)?;
        let item = add_inventory_item(&mut self.catalog, store_id, book_id, price)?;
        info!(store_id, book_id, %price, "Added to inventory");
        Ok(item)
    }
}

fn require_sign_in(auth: &AuthSnapshot) -> AppResult<()> {
    if auth.is_authenticated {
        Ok(())
    } else {
        Err(AppError::sign_in_required())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use folio_core::collection::Always;
    use folio_core::session::User;
    use folio_core::table::Cell;
    use folio_core::Resource;
    use folio_data::fetch::embedded_fixture;

    use crate::error::ErrorCode;

    /// The bundled fixtures as a catalog.
    pub(crate) fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        for resource in Resource::ALL {
            let payload = serde_json::from_str(embedded_fixture(resource)).unwrap();
            catalog.apply_payload(resource, payload).unwrap();
        }
        catalog
    }

    pub(crate) fn signed_in() -> AuthSnapshot {
        AuthSnapshot::from_user(Some(User {
            name: "Ada".into(),
            signed_in_at: None,
        }))
    }

    fn table(view: View) -> Grid {
        match view {
            View::Table(grid) => grid,
            View::Browse(_) => panic!("expected a table"),
        }
    }

    #[test]
    fn test_locations() {
        assert_eq!(Page::from_location("/").unwrap(), Page::Books);
        assert_eq!(Page::from_location("").unwrap(), Page::Books);
        assert_eq!(Page::from_location("/authors?search=le").unwrap(), Page::Authors);
        assert_eq!(
            Page::from_location("/store/3/").unwrap(),
            Page::Inventory { store_id: 3 }
        );
        assert_eq!(Page::from_location("/browse#top").unwrap(), Page::Browse);
        assert_eq!(
            Page::from_location("/store/x").unwrap_err().code,
            ErrorCode::ValidationError
        );
        assert_eq!(
            Page::from_location("/shelves").unwrap_err().code,
            ErrorCode::NotFound
        );
    }

    #[test]
    fn test_open_seeds_search() {
        let mut state = PageState::open("/store/1?search=J.%20R.", catalog()).unwrap();
        assert_eq!(state.search(), "J. R.");
        assert!(table(state.view(&AuthSnapshot::signed_out())).is_empty());
    }

    #[test]
    fn test_signed_out_cannot_mutate() {
        let mut state = PageState::new(Page::Books, catalog());
        let guest = AuthSnapshot::signed_out();

        let err = state.edit_row(&guest, 1, None, &mut Always(true)).unwrap_err();
        assert_eq!(err.code, ErrorCode::SessionError);
        assert!(state.delete(&guest, 1, &mut Always(true)).is_err());
        assert!(state.add_author(&guest, "Ada Lovelace").is_err());
        assert_eq!(state.catalog().books().len(), 8);
    }

    #[test]
    fn test_price_edit_round_trip() {
        let auth = signed_in();
        let mut state = PageState::new(Page::Inventory { store_id: 1 }, catalog());

        let outcome = state.edit_row(&auth, 3, None, &mut Always(true)).unwrap();
        assert_eq!(outcome, BeginOutcome::Started);
        let grid = table(state.view(&auth));
        assert_eq!(
            grid.cell(3, "price"),
            Some(&Cell::Editor {
                value: "9.50".into(),
                input: folio_core::table::InputKind::Number
            })
        );

        state.set_draft("-1").unwrap();
        let err = state.save().unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(state.edit().editing_row(), Some(3));

        state.set_draft("12.50").unwrap();
        let saved = state.key(EditKey::Enter).unwrap();
        assert_eq!(
            saved,
            Some(Saved::Price {
                book_id: 3,
                price: Price::from_cents(1250)
            })
        );
        assert_eq!(state.edit().editing_row(), None);

        let grid = table(state.view(&auth));
        assert_eq!(grid.cell(3, "price"), Some(&Cell::text("12.50")));
        assert_eq!(grid.cell(3, "actions"), Some(&Cell::Actions { editing: false }));
    }

    #[test]
    fn test_author_rename_keeps_last_name() {
        let auth = signed_in();
        let mut state = PageState::new(Page::Authors, catalog());

        state.edit_row(&auth, 1, None, &mut Always(true)).unwrap();
        assert_eq!(state.edit().draft(), "Ursula Le Guin");
        state.set_draft("Ursula").unwrap();
        let saved = state.save().unwrap();

        let Saved::Author(author) = saved else {
            panic!("expected an author");
        };
        assert_eq!((author.first_name.as_str(), author.last_name.as_str()), ("Ursula", "Le Guin"));
    }

    #[test]
    fn test_edit_button_toggles() {
        let auth = signed_in();
        let mut state = PageState::new(Page::Books, catalog());

        state.edit_row(&auth, 2, None, &mut Always(true)).unwrap();
        let outcome = state.edit_row(&auth, 2, None, &mut Always(true)).unwrap();
        assert_eq!(outcome, BeginOutcome::Cancelled);
        assert_eq!(state.edit().editing_row(), None);
    }

    #[test]
    fn test_switching_rows_asks_before_discarding() {
        let auth = signed_in();
        let mut state = PageState::new(Page::Books, catalog());

        state.edit_row(&auth, 1, None, &mut Always(true)).unwrap();
        state.set_draft("Earthsea").unwrap();

        let mut asked = Vec::new();
        let mut decline = |message: &str| {
            asked.push(message.to_string());
            false
        };
        let outcome = state.edit_row(&auth, 2, None, &mut decline).unwrap();
        assert_eq!(outcome, BeginOutcome::Kept);
        assert_eq!(asked, vec!["Discard unsaved changes to row 1?"]);
        assert_eq!(state.edit().draft(), "Earthsea");

        let outcome = state.edit_row(&auth, 2, None, &mut Always(true)).unwrap();
        assert!(matches!(outcome, BeginOutcome::Switched { .. }));
        assert_eq!(state.edit().editing_row(), Some(2));
    }

    #[test]
    fn test_escape_cancels_without_saving() {
        let auth = signed_in();
        let mut state = PageState::new(Page::Books, catalog());

        state.edit_row(&auth, 1, None, &mut Always(true)).unwrap();
        state.set_draft("Something Else").unwrap();
        assert_eq!(state.key(EditKey::Escape).unwrap(), None);
        assert_eq!(state.catalog().books()[0].name, "A Wizard of Earthsea");
    }

    #[test]
    fn test_delete_needs_confirmation_and_clears_edit() {
        let auth = signed_in();
        let mut state = PageState::new(Page::Books, catalog());

        assert!(!state.delete(&auth, 4, &mut Always(false)).unwrap());
        assert_eq!(state.catalog().books().len(), 8);

        state.edit_row(&auth, 4, None, &mut Always(true)).unwrap();
        let mut seen = String::new();
        let mut accept = |message: &str| {
            seen = message.to_string();
            true
        };
        assert!(state.delete(&auth, 4, &mut accept).unwrap());
        assert_eq!(seen, "Are you sure you want to delete \"Guards! Guards!\"?");
        assert_eq!(state.catalog().books().len(), 7);
        assert_eq!(state.edit().editing_row(), None);
    }

    #[test]
    fn test_adds_take_next_id() {
        let auth = signed_in();
        let mut state = PageState::new(Page::Authors, catalog());

        let author = state.add_author(&auth, "Ada Lovelace").unwrap();
        assert_eq!(author.id, 6);

        let book = state.add_book(&auth, "6", "120", "Notes").unwrap();
        assert_eq!((book.id, book.author_id, book.page_count), (9, 6, 120));

        let err = state.add_book(&auth, "6", "0", "Notes").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_stock_only_on_store_pages() {
        let auth = signed_in();
        let mut state = PageState::new(Page::Books, catalog());
        assert!(state.stock(&auth, "2", "10").is_err());

        let mut state = PageState::new(Page::Inventory { store_id: 1 }, catalog());
        state.stock(&auth, "2", "10").unwrap();
        let grid = table(state.view(&auth));
        assert_eq!(grid.cell(2, "price"), Some(&Cell::text("10.00")));

        let err = state.stock(&auth, "42", "10").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_set_without_edit_fails() {
        let mut state = PageState::new(Page::Books, catalog());
        assert_eq!(
            state.set_draft("x").unwrap_err().message,
            "No row is being edited"
        );
    }
}
