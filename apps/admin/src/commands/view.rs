//! Rendering a page for the terminal or as JSON.

use folio_core::editing::EditField;
use folio_core::session::AuthSnapshot;

use crate::error::{AppError, AppResult};
use crate::pages::{PageState, View};
use crate::render::{render_browse, render_grid};
use crate::state::DisplayState;

/// Title, search line, edit hint and the page body.
pub fn render_page(state: &mut PageState, auth: &AuthSnapshot, display: &DisplayState) -> String {
    let mut out = vec![state.title()];

    if !state.search().trim().is_empty() {
        out.push(format!("Search: \"{}\"", state.search()));
    }

    out.push(String::new());
    out.push(match state.view(auth) {
        View::Table(grid) => render_grid(&grid, display),
        View::Browse(entries) => render_browse(&entries, display),
    });

    if let Some(pending) = state.edit().pending() {
        let field = match pending.field {
            EditField::Name => "name",
            EditField::Price => "price",
        };
        out.push(String::new());
        out.push(format!(
            "Editing {} of row {}. Use set <value>, then save or cancel.",
            field, pending.row
        ));
    }

    out.join("\n")
}

/// The page body as pretty JSON.
pub fn render_page_json(state: &mut PageState, auth: &AuthSnapshot) -> AppResult<String> {
    let json = match state.view(auth) {
        View::Table(grid) => serde_json::to_string_pretty(&grid),
        View::Browse(entries) => serde_json::to_string_pretty(entries.as_ref()),
    };
    json.map_err(|e| AppError::internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::tests::{catalog, signed_in};
    use crate::pages::Page;
    use folio_core::collection::Always;

    #[test]
    fn test_inventory_page_text() {
        let mut state = PageState::new(Page::Inventory { store_id: 3 }, catalog()).with_search("be");
        let text = render_page(&mut state, &AuthSnapshot::signed_out(), &DisplayState::default());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Store Inventory: The Reading Room");
        assert_eq!(lines[1], "Search: \"be\"");
        assert!(lines[3].starts_with("Book Id"));
        assert!(!lines[3].contains("Actions"));
        assert!(text.contains("Beloved"));
        assert!(text.contains("17.50"));
    }

    #[test]
    fn test_edit_hint() {
        let auth = signed_in();
        let mut state = PageState::new(Page::Authors, catalog());
        state.edit_row(&auth, 3, None, &mut Always(true)).unwrap();

        let text = render_page(&mut state, &auth, &DisplayState::default());
        assert!(text.contains("[Octavia Butler]"));
        assert!(text.contains("Save | Cancel"));
        assert!(text.ends_with("Editing name of row 3. Use set <value>, then save or cancel."));
    }

    #[test]
    fn test_json_grid() {
        let mut state = PageState::new(Page::Authors, catalog());
        let json = render_page_json(&mut state, &AuthSnapshot::signed_out()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["headers"], serde_json::json!(["ID", "Name"]));
        assert_eq!(value["rows"][0]["cells"][1]["type"], "text");
    }
}
