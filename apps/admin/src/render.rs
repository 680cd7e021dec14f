//! # Terminal Rendering
//!
//! Turns [`Grid`]s and the browse view into aligned text.
//!
//! ```text
//! Book Id  Name         Pages  Author           Price  Actions
//! -------  -----------  -----  ---------------  -----  -------------
//! 1        Small Gods   400    Terry Pratchett  12.99  Edit | Delete
//! 3        [Mort_____]  320    Terry Pratchett  9.50   Save | Cancel
//! ```
//!
//! Widths are measured in terminal columns, so wide characters line up.

use folio_core::table::Grid;
use folio_core::BookWithStores;
use folio_data::{LoadReport, LoadStatus};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::state::DisplayState;

/// Shown in place of an empty table.
pub const NO_DATA: &str = "No data found.";

const GAP: &str = "  ";

/// Cuts `text` to at most `max` columns, ending in `…` when cut.
fn fit(text: &str, max: usize) -> String {
    if max == 0 || text.width() <= max {
        return text.to_string();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}

/// Renders a grid as left-aligned columns with a header rule.
pub fn render_grid(grid: &Grid, display: &DisplayState) -> String {
    if grid.is_empty() {
        return NO_DATA.to_string();
    }

    let max = display.max_column_width;
    let headers: Vec<String> = grid.headers.iter().map(|h| fit(h, max)).collect();
    let rows: Vec<Vec<String>> = grid
        .rows
        .iter()
        .map(|row| {
            row.cells
                .iter()
                .map(|cell| fit(&cell.display_text(), max))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .filter_map(|cells| cells.get(i))
                .map(|cell| cell.width())
                .chain(std::iter::once(header.width()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: &[String]| {
        let last = cells.len().saturating_sub(1);
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                if i == last {
                    cell.clone()
                } else {
                    pad(cell, widths[i])
                }
            })
            .collect::<Vec<_>>()
            .join(GAP)
    };

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();

    let mut out = vec![line(&headers), line(&rule)];
    out.extend(rows.iter().map(|cells| line(cells)));
    out.join("\n")
}

/// Renders every book with the stores that stock it.
///
/// ```text
/// Small Gods by Terry Pratchett
///   Downtown Books    $12.99
///   Harbor Readers    $13.50
/// ```
pub fn render_browse(entries: &[BookWithStores], display: &DisplayState) -> String {
    if entries.is_empty() {
        return NO_DATA.to_string();
    }

    let store_width = entries
        .iter()
        .flat_map(|entry| entry.stores.iter())
        .map(|listing| listing.name.width())
        .max()
        .unwrap_or(0);

    let mut out = Vec::new();
    for entry in entries {
        out.push(format!("{} by {}", entry.title, entry.author));
        if entry.stores.is_empty() {
            out.push("  (not stocked)".to_string());
        }
        for listing in &entry.stores {
            out.push(format!(
                "  {}{}{}",
                pad(&listing.name, store_width),
                GAP,
                display.format_price(listing.price)
            ));
        }
    }
    out.join("\n")
}

/// One line per resource that did not load.
pub fn render_load_problems(report: &LoadReport) -> Vec<String> {
    report
        .statuses
        .iter()
        .filter_map(|(resource, status)| match status {
            LoadStatus::Failed(message) => Some(format!("Could not load {}: {}", resource, message)),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::table::{Cell, GridRow};
    use folio_core::{Price, StoreListing};

    fn grid() -> Grid {
        Grid {
            keys: vec!["id".into(), "name".into()],
            headers: vec!["ID".into(), "Name".into()],
            rows: vec![
                GridRow {
                    id: 1,
                    cells: vec![Cell::text("1"), Cell::text("Ursula Le Guin")],
                },
                GridRow {
                    id: 12,
                    cells: vec![Cell::text("12"), Cell::text("Ōe Kenzaburō")],
                },
            ],
        }
    }

    #[test]
    fn test_columns_align() {
        let text = render_grid(&grid(), &DisplayState::default());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "ID  Name");
        assert_eq!(lines[1], "--  --------------");
        assert_eq!(lines[2], "1   Ursula Le Guin");
        assert_eq!(lines[3], "12  Ōe Kenzaburō");
    }

    #[test]
    fn test_long_cells_are_cut() {
        let display = DisplayState {
            max_column_width: 8,
            ..DisplayState::default()
        };
        let text = render_grid(&grid(), &display);
        assert!(text.contains("Ursula …"));
        assert!(text.lines().all(|line| line.width() <= 2 + 2 + 8));
    }

    #[test]
    fn test_empty_grid() {
        let empty = Grid {
            keys: vec!["id".into()],
            headers: vec!["ID".into()],
            rows: vec![],
        };
        assert_eq!(render_grid(&empty, &DisplayState::default()), NO_DATA);
    }

    #[test]
    fn test_browse_lists_prices() {
        let entries = vec![
            BookWithStores {
                title: "Small Gods".into(),
                author: "Terry Pratchett".into(),
                stores: vec![StoreListing {
                    name: "Downtown Books".into(),
                    price: Price::from_cents(1299),
                }],
            },
            BookWithStores {
                title: "Orphan".into(),
                author: "Unknown Author".into(),
                stores: vec![],
            },
        ];

        let text = render_browse(&entries, &DisplayState::default());
        assert_eq!(
            text,
            "Small Gods by Terry Pratchett\n  Downtown Books  $12.99\nOrphan by Unknown Author\n  (not stocked)"
        );
    }
}
