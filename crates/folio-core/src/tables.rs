//! # Page Tables
//!
//! Concrete book and author tables built on [`crate::table`].
//!
//! The edit session decides which cells turn into editors:
//!
//! ```text
//! editing row 3, field Name    ──►  row 3 "name"  cell = Editor(Text)
//! editing row 3, field Price   ──►  row 3 "price" cell = Editor(Number)
//! any row                      ──►  "actions" cell = Actions { editing: row == 3 }
//! ```

use crate::catalog::{author_name, AuthorMap};
use crate::columns::{compose_book_columns, ColumnFlags, ColumnKind};
use crate::editing::{EditField, EditSession};
use crate::table::{Cell, Column, Grid, InputKind, Table, TableRow};
use crate::types::{Author, Book};

impl TableRow for Book {
    fn row_id(&self) -> i64 {
        self.id
    }
}

impl TableRow for Author {
    fn row_id(&self) -> i64 {
        self.id
    }
}

/// Text shown in a price cell when the book has no price.
pub const MISSING_PRICE: &str = "-";

fn editor_for(
    edit: &EditSession,
    row: i64,
    field: EditField,
    input: InputKind,
) -> Option<Cell> {
    edit.pending()
        .filter(|pending| pending.row == row && pending.field == field)
        .map(|pending| Cell::Editor {
            value: pending.draft.clone(),
            input,
        })
}

fn book_column<'a>(kind: ColumnKind, authors: &'a AuthorMap, edit: &'a EditSession) -> Column<'a, Book> {
    match kind {
        ColumnKind::Id => Column::new(kind.key(), kind.header(), |b: &Book| b.id.to_string()),
        ColumnKind::Name => Column::new(kind.key(), kind.header(), |b: &Book| b.name.clone())
            .with_cell(move |b: &Book| {
                editor_for(edit, b.id, EditField::Name, InputKind::Text)
                    .unwrap_or_else(|| Cell::text(b.name.clone()))
            }),
        ColumnKind::Pages => {
            Column::new(kind.key(), kind.header(), |b: &Book| b.page_count.to_string())
        }
        ColumnKind::Author => Column::new(kind.key(), kind.header(), move |b: &Book| {
            author_name(authors, b.author_id)
        }),
        ColumnKind::Price => Column::new(kind.key(), kind.header(), |b: &Book| {
            b.price
                .map(|price| price.to_string())
                .unwrap_or_else(|| MISSING_PRICE.to_string())
        })
        .with_cell(move |b: &Book| {
            editor_for(edit, b.id, EditField::Price, InputKind::Number).unwrap_or_else(|| {
                Cell::text(
                    b.price
                        .map(|price| price.to_string())
                        .unwrap_or_else(|| MISSING_PRICE.to_string()),
                )
            })
        }),
        ColumnKind::Actions => Column::new(kind.key(), kind.header(), |_: &Book| String::new())
            .with_cell(move |b: &Book| Cell::Actions {
                editing: edit.is_editing(b.id),
            }),
    }
}

/// Composes a book table for the requested columns and flags.
pub fn book_table<'a>(
    requested: &[ColumnKind],
    flags: ColumnFlags,
    authors: &'a AuthorMap,
    edit: &'a EditSession,
) -> Table<'a, Book> {
    Table::new(
        compose_book_columns(requested, flags)
            .into_iter()
            .map(|kind| book_column(kind, authors, edit))
            .collect(),
    )
}

/// Composes and renders a book table in one step.
pub fn render_books(
    books: &[Book],
    requested: &[ColumnKind],
    flags: ColumnFlags,
    authors: &AuthorMap,
    edit: &EditSession,
) -> Grid {
    book_table(requested, flags, authors, edit).render(books)
}

/// The authors page table: ID, Name and, when signed in, Actions.
pub fn authors_table<'a>(is_authenticated: bool, edit: &'a EditSession) -> Table<'a, Author> {
    let mut table = Table::new(vec![
        Column::new("id", "ID", |a: &Author| a.id.to_string()),
        Column::new("name", "Name", |a: &Author| a.display_name()).with_cell(move |a: &Author| {
            editor_for(edit, a.id, EditField::Name, InputKind::Text)
                .unwrap_or_else(|| Cell::text(a.display_name()))
        }),
    ]);

    if is_authenticated {
        table.push(
            Column::new("actions", "Actions", |_: &Author| String::new()).with_cell(
                move |a: &Author| Cell::Actions {
                    editing: edit.is_editing(a.id),
                },
            ),
        );
    }

    table
}

/// Composes and renders the authors table in one step.
pub fn render_authors(authors: &[Author], is_authenticated: bool, edit: &EditSession) -> Grid {
    authors_table(is_authenticated, edit).render(authors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::author_map;
    use crate::collection::Always;
    use crate::columns::DEFAULT_BOOK_COLUMNS;
    use crate::price::Price;
    use crate::types::UNKNOWN_AUTHOR;

    fn authors() -> Vec<Author> {
        vec![Author {
            id: 1,
            first_name: "Ursula".to_string(),
            last_name: "Le Guin".to_string(),
        }]
    }

    fn books() -> Vec<Book> {
        vec![
            Book {
                id: 1,
                name: "A Wizard of Earthsea".to_string(),
                page_count: 183,
                author_id: 1,
                price: Some(Price::from_cents(1299)),
            },
            Book {
                id: 2,
                name: "Orphan".to_string(),
                page_count: 90,
                author_id: 42,
                price: None,
            },
        ]
    }

    #[test]
    fn test_book_grid_headers_and_cells() {
        let map = author_map(&authors());
        let edit = EditSession::new();
        let grid = render_books(
            &books(),
            &DEFAULT_BOOK_COLUMNS,
            ColumnFlags {
                show_price: true,
                is_authenticated: true,
            },
            &map,
            &edit,
        );

        assert_eq!(
            grid.headers,
            vec!["Book Id", "Name", "Pages", "Author", "Price", "Actions"]
        );
        assert_eq!(grid.cell(1, "author"), Some(&Cell::text("Ursula Le Guin")));
        assert_eq!(grid.cell(2, "author"), Some(&Cell::text(UNKNOWN_AUTHOR)));
        assert_eq!(grid.cell(1, "price"), Some(&Cell::text("12.99")));
        assert_eq!(grid.cell(2, "price"), Some(&Cell::text(MISSING_PRICE)));
        assert_eq!(grid.cell(2, "actions"), Some(&Cell::Actions { editing: false }));
    }

    #[test]
    fn test_unauthenticated_hides_actions() {
        let map = author_map(&authors());
        let edit = EditSession::new();
        let grid = render_books(&books(), &DEFAULT_BOOK_COLUMNS, ColumnFlags::default(), &map, &edit);
        assert_eq!(grid.keys, vec!["id", "name", "pages", "author"]);

        let grid = render_authors(&authors(), false, &edit);
        assert_eq!(grid.headers, vec!["ID", "Name"]);
    }

    #[test]
    fn test_editing_row_renders_editor() {
        let map = author_map(&authors());
        let mut edit = EditSession::new();
        edit.begin(1, EditField::Price, "12.99", &mut Always(true));
        edit.set_draft("13");

        let grid = render_books(
            &books(),
            &DEFAULT_BOOK_COLUMNS,
            ColumnFlags {
                show_price: true,
                is_authenticated: true,
            },
            &map,
            &edit,
        );

        assert_eq!(
            grid.cell(1, "price"),
            Some(&Cell::Editor {
                value: "13".to_string(),
                input: InputKind::Number
            })
        );
        assert_eq!(grid.cell(1, "name"), Some(&Cell::text("A Wizard of Earthsea")));
        assert_eq!(grid.cell(1, "actions"), Some(&Cell::Actions { editing: true }));
        assert_eq!(grid.cell(2, "actions"), Some(&Cell::Actions { editing: false }));
    }

    #[test]
    fn test_authors_table_editing_name() {
        let mut edit = EditSession::new();
        edit.begin(1, EditField::Name, "Ursula Le Guin", &mut Always(true));

        let grid = render_authors(&authors(), true, &edit);
        assert_eq!(grid.headers, vec!["ID", "Name", "Actions"]);
        assert_eq!(
            grid.cell(1, "name"),
            Some(&Cell::Editor {
                value: "Ursula Le Guin".to_string(),
                input: InputKind::Text
            })
        );
    }
}
