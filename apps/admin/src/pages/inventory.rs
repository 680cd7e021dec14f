//! # Store Inventory Page
//!
//! Books stocked by one store, with that store's price.
//!
//! ```text
//! inventory 1 --search gods
//!        │
//!        ▼
//! catalog.store_books(Some(1), "gods") ──► render_books(.., show_price) ──► Grid
//! ```
//!
//! `edit <id>` opens the price for editing; `edit <id> name` the title.

use folio_core::columns::{ColumnFlags, ColumnKind};
use folio_core::editing::{EditField, EditSession};
use folio_core::table::Grid;
use folio_core::tables::render_books;
use folio_core::{Book, Catalog, UNKNOWN_STORE};

use crate::error::{AppError, AppResult};

/// Page title, e.g. `Store Inventory: Downtown Books`.
pub fn title(catalog: &Catalog, store_id: i64) -> String {
    let name = catalog
        .current_store(store_id)
        .map_or(UNKNOWN_STORE, |store| store.name.as_str());
    format!("Store Inventory: {}", name)
}

pub fn grid(
    catalog: &mut Catalog,
    store_id: i64,
    search: &str,
    columns: &[ColumnKind],
    is_authenticated: bool,
    edit: &EditSession,
) -> Grid {
    let books = catalog.store_books(Some(store_id), search);
    let flags = ColumnFlags {
        show_price: true,
        is_authenticated,
    };
    render_books(&books, columns, flags, &catalog.author_map(), edit)
}

/// Field and starting draft for editing stocked book `id`. Price unless
/// `field` asks for the name.
pub fn edit_target(
    catalog: &mut Catalog,
    store_id: i64,
    id: i64,
    field: Option<EditField>,
) -> AppResult<(EditField, String)> {
    let book = find(catalog, store_id, id)?;
    match field.unwrap_or(EditField::Price) {
        EditField::Name => Ok((EditField::Name, book.name)),
        EditField::Price => Ok((
            EditField::Price,
            book.price.map(|price| price.to_string()).unwrap_or_default(),
        )),
    }
}

pub fn delete_message(catalog: &mut Catalog, store_id: i64, id: i64) -> AppResult<String> {
    find(catalog, store_id, id)
        .map(|book| format!("Are you sure you want to delete \"{}\"?", book.name))
}

fn find(catalog: &mut Catalog, store_id: i64, id: i64) -> AppResult<Book> {
    catalog
        .store_books(Some(store_id), "")
        .iter()
        .find(|book| book.id == id)
        .cloned()
        .ok_or_else(|| AppError::not_found("Inventory item", id))
}
