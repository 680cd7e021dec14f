//! # Table Composition
//!
//! A generic, front-end agnostic description of an editable grid.
//!
//! ```text
//! Vec<Column<R>>  +  &[R]  ──render──►  Grid { headers, rows: [GridRow { id, cells }] }
//!
//! Column<R>
//!   key       stable identifier ("name", "price", ...)
//!   header    display text
//!   accessor  R -> String            (plain text rendering)
//!   cell      R -> Cell   (optional, replaces the accessor: editors, buttons)
//! ```
//!
//! Front ends (the admin shell, a browser bridge) only ever see [`Grid`].

use serde::Serialize;
use ts_rs::TS;

/// Rows rendered by a [`Table`] carry a stable id.
pub trait TableRow {
    fn row_id(&self) -> i64;
}

/// Input control of an inline editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Text,
    Number,
}

/// One rendered cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Cell {
    /// Read-only text.
    Text { text: String },
    /// An inline editor holding the current draft.
    Editor { value: String, input: InputKind },
    /// Row buttons: Edit/Delete, or Save/Cancel while the row is edited.
    Actions { editing: bool },
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Cell::Text { text: text.into() }
    }

    /// Plain-text rendering used by terminal front ends.
    pub fn display_text(&self) -> String {
        match self {
            Cell::Text { text } => text.clone(),
            Cell::Editor { value, .. } => format!("[{}]", value),
            Cell::Actions { editing: true } => "Save | Cancel".to_string(),
            Cell::Actions { editing: false } => "Edit | Delete".to_string(),
        }
    }
}

type Accessor<'a, R> = Box<dyn Fn(&R) -> String + 'a>;
type CellRenderer<'a, R> = Box<dyn Fn(&R) -> Cell + 'a>;

/// A column over rows of type `R`.
pub struct Column<'a, R> {
    key: String,
    header: String,
    accessor: Accessor<'a, R>,
    cell: Option<CellRenderer<'a, R>>,
}

impl<'a, R> Column<'a, R> {
    pub fn new(
        key: impl Into<String>,
        header: impl Into<String>,
        accessor: impl Fn(&R) -> String + 'a,
    ) -> Self {
        Column {
            key: key.into(),
            header: header.into(),
            accessor: Box::new(accessor),
            cell: None,
        }
    }

    /// Overrides the accessor rendering with a custom cell.
    pub fn with_cell(mut self, cell: impl Fn(&R) -> Cell + 'a) -> Self {
        self.cell = Some(Box::new(cell));
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    /// Plain accessor value, ignoring any cell override.
    pub fn value(&self, row: &R) -> String {
        (self.accessor)(row)
    }

    pub fn render_cell(&self, row: &R) -> Cell {
        match &self.cell {
            Some(cell) => cell(row),
            None => Cell::text((self.accessor)(row)),
        }
    }
}

impl<R> std::fmt::Debug for Column<'_, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("custom_cell", &self.cell.is_some())
            .finish()
    }
}

/// An ordered set of columns.
#[derive(Debug)]
pub struct Table<'a, R> {
    columns: Vec<Column<'a, R>>,
}

impl<'a, R> Default for Table<'a, R> {
    fn default() -> Self {
        Table {
            columns: Vec::new(),
        }
    }
}

impl<'a, R: TableRow> Table<'a, R> {
    pub fn new(columns: Vec<Column<'a, R>>) -> Self {
        Table { columns }
    }

    pub fn push(&mut self, column: Column<'a, R>) {
        self.columns.push(column);
    }

    pub fn columns(&self) -> &[Column<'a, R>] {
        &self.columns
    }

    pub fn keys(&self) -> Vec<&str> {
        self.columns.iter().map(Column::key).collect()
    }

    /// Renders every row through every column.
    pub fn render(&self, rows: &[R]) -> Grid {
        Grid {
            keys: self.columns.iter().map(|c| c.key.clone()).collect(),
            headers: self.columns.iter().map(|c| c.header.clone()).collect(),
            rows: rows
                .iter()
                .map(|row| GridRow {
                    id: row.row_id(),
                    cells: self.columns.iter().map(|c| c.render_cell(row)).collect(),
                })
                .collect(),
        }
    }
}

/// A rendered row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct GridRow {
    pub id: i64,
    pub cells: Vec<Cell>,
}

/// A fully rendered table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct Grid {
    pub keys: Vec<String>,
    pub headers: Vec<String>,
    pub rows: Vec<GridRow>,
}

impl Grid {
    /// Cell of `row_id` under column `key`.
    pub fn cell(&self, row_id: i64, key: &str) -> Option<&Cell> {
        let column = self.keys.iter().position(|k| k == key)?;
        self.rows
            .iter()
            .find(|row| row.id == row_id)
            .and_then(|row| row.cells.get(column))
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
