//! The all-books page: every book, no prices, searchable by any column.

use folio_core::catalog::{enrich_books, filter_rows};
use folio_core::columns::{ColumnFlags, ColumnKind};
use folio_core::editing::{EditField, EditSession};
use folio_core::table::Grid;
use folio_core::tables::render_books;
use folio_core::{Book, Catalog};

use crate::error::{AppError, AppResult};

/// Books matching `search` against id, name, pages, author id or author name.
pub fn rows(catalog: &mut Catalog, search: &str) -> Vec<Book> {
    let authors = catalog.author_map();
    filter_rows(&enrich_books(catalog.books(), &authors), search)
        .into_iter()
        .map(|row| row.book)
        .collect()
}

pub fn grid(
    catalog: &mut Catalog,
    search: &str,
    columns: &[ColumnKind],
    is_authenticated: bool,
    edit: &EditSession,
) -> Grid {
    let books = rows(catalog, search);
    let flags = ColumnFlags {
        show_price: false,
        is_authenticated,
    };
    render_books(&books, columns, flags, &catalog.author_map(), edit)
}

/// Field and starting draft for editing book `id`. Only titles are
/// editable here.
pub fn edit_target(catalog: &Catalog, id: i64, field: Option<EditField>) -> AppResult<(EditField, String)> {
    if field == Some(EditField::Price) {
        return Err(AppError::validation("Prices are edited on a store page"));
    }

    find(catalog, id).map(|book| (EditField::Name, book.name.clone()))
}

pub fn delete_message(catalog: &Catalog, id: i64) -> AppResult<String> {
    find(catalog, id).map(|book| format!("Are you sure you want to delete \"{}\"?", book.name))
}

fn find(catalog: &Catalog, id: i64) -> AppResult<&Book> {
    catalog
        .books()
        .iter()
        .find(|book| book.id == id)
        .ok_or_else(|| AppError::not_found("Book", id))
}
