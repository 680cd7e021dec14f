//! # Book Columns
//!
//! Book tables appear on several pages with different column sets. A page
//! asks for a list of [`ColumnKind`]s and two flags decide what survives:
//!
//! ```text
//! requested: [id, name, pages, author, actions]
//!
//!   show_price=false, authenticated=false ──► [id, name, pages, author]
//!   show_price=true,  authenticated=false ──► [id, name, pages, author, price]
//!   show_price=true,  authenticated=true  ──► [id, name, pages, author, price, actions]
//! ```
//!
//! A price column that was not requested goes right before the first
//! actions column, or at the end when there is none.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

/// The columns a book table knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Id,
    Name,
    Pages,
    Author,
    Price,
    Actions,
}

/// Column set used when a page does not ask for one.
pub const DEFAULT_BOOK_COLUMNS: [ColumnKind; 5] = [
    ColumnKind::Id,
    ColumnKind::Name,
    ColumnKind::Pages,
    ColumnKind::Author,
    ColumnKind::Actions,
];

impl ColumnKind {
    pub const fn key(&self) -> &'static str {
        match self {
            ColumnKind::Id => "id",
            ColumnKind::Name => "name",
            ColumnKind::Pages => "pages",
            ColumnKind::Author => "author",
            ColumnKind::Price => "price",
            ColumnKind::Actions => "actions",
        }
    }

    pub const fn header(&self) -> &'static str {
        match self {
            ColumnKind::Id => "Book Id",
            ColumnKind::Name => "Name",
            ColumnKind::Pages => "Pages",
            ColumnKind::Author => "Author",
            ColumnKind::Price => "Price",
            ColumnKind::Actions => "Actions",
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ColumnKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "id" => Ok(ColumnKind::Id),
            "name" => Ok(ColumnKind::Name),
            "pages" => Ok(ColumnKind::Pages),
            "author" => Ok(ColumnKind::Author),
            "price" => Ok(ColumnKind::Price),
            "actions" => Ok(ColumnKind::Actions),
            other => Err(CoreError::UnknownColumn(other.to_string())),
        }
    }
}

/// Parses a comma-separated column list such as `"id,name,price"`.
///
/// An empty list yields [`DEFAULT_BOOK_COLUMNS`].
pub fn parse_column_list(input: &str) -> CoreResult<Vec<ColumnKind>> {
    let kinds = input
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(str::parse)
        .collect::<CoreResult<Vec<_>>>()?;

    if kinds.is_empty() {
        return Ok(DEFAULT_BOOK_COLUMNS.to_vec());
    }
    Ok(kinds)
}

/// Flags that gate optional columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnFlags {
    pub show_price: bool,
    pub is_authenticated: bool,
}

/// Builds the final, ordered column list for a book table.
///
/// ## Example
/// ```rust
/// use folio_core::columns::{compose_book_columns, ColumnFlags, ColumnKind, DEFAULT_BOOK_COLUMNS};
///
/// let columns = compose_book_columns(
///     &DEFAULT_BOOK_COLUMNS,
///     ColumnFlags { show_price: true, is_authenticated: true },
/// );
/// assert_eq!(columns[4], ColumnKind::Price);
/// assert_eq!(columns[5], ColumnKind::Actions);
/// ```
pub fn compose_book_columns(requested: &[ColumnKind], flags: ColumnFlags) -> Vec<ColumnKind> {
    let mut columns: Vec<ColumnKind> = requested
        .iter()
        .copied()
        .filter(|kind| match kind {
            ColumnKind::Price => flags.show_price,
            ColumnKind::Actions => flags.is_authenticated,
            _ => true,
        })
        .collect();

    if flags.show_price && !requested.contains(&ColumnKind::Price) {
        match columns.iter().position(|kind| *kind == ColumnKind::Actions) {
            Some(index) => columns.insert(index, ColumnKind::Price),
            None => columns.push(ColumnKind::Price),
        }
    }

    columns
}
