//! The authors page.

use folio_core::catalog::filter_authors;
use folio_core::editing::{EditField, EditSession};
use folio_core::table::Grid;
use folio_core::tables::render_authors;
use folio_core::{Author, Catalog};

use crate::error::{AppError, AppResult};

pub fn grid(catalog: &Catalog, search: &str, is_authenticated: bool, edit: &EditSession) -> Grid {
    render_authors(&filter_authors(catalog.authors(), search), is_authenticated, edit)
}

/// Authors are edited by full name, split on the first space when saved.
pub fn edit_target(catalog: &Catalog, id: i64, field: Option<EditField>) -> AppResult<(EditField, String)> {
    if field == Some(EditField::Price) {
        return Err(AppError::validation("Authors have no price"));
    }

    find(catalog, id).map(|author| (EditField::Name, author.display_name()))
}

pub fn delete_message(catalog: &Catalog, id: i64) -> AppResult<String> {
    find(catalog, id).map(|author| {
        format!(
            "Are you sure you want to delete {} {}?",
            author.first_name, author.last_name
        )
    })
}

fn find(catalog: &Catalog, id: i64) -> AppResult<&Author> {
    catalog
        .authors()
        .iter()
        .find(|author| author.id == id)
        .ok_or_else(|| AppError::not_found("Author", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::tests::catalog;

    #[test]
    fn test_actions_only_when_signed_in() {
        let catalog = catalog();
        let edit = EditSession::new();
        assert_eq!(grid(&catalog, "", false, &edit).headers, vec!["ID", "Name"]);
        assert_eq!(
            grid(&catalog, "", true, &edit).headers,
            vec!["ID", "Name", "Actions"]
        );
    }

    #[test]
    fn test_search_filters_rows() {
        let catalog = catalog();
        let grid = grid(&catalog, "BUTLER", false, &EditSession::new());
        let ids: Vec<i64> = grid.rows.iter().map(|row| row.id).collect();
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn test_delete_message_names_author() {
        let catalog = catalog();
        assert_eq!(
            delete_message(&catalog, 2).unwrap(),
            "Are you sure you want to delete Terry Pratchett?"
        );
        assert_eq!(
            delete_message(&catalog, 99).unwrap_err().code,
            crate::error::ErrorCode::NotFound
        );
    }
}
