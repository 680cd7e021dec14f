//! Every book with the stores that carry it. Read-only.

use std::sync::Arc;

use folio_core::catalog::search_needle;
use folio_core::{BookWithStores, Catalog};

/// Books whose title, author, or any stocking store matches `search`.
pub fn entries(catalog: &mut Catalog, search: &str) -> Arc<Vec<BookWithStores>> {
    let all = catalog.books_with_stores();
    let Some(needle) = search_needle(search) else {
        return all;
    };

    Arc::new(
        all.iter()
            .filter(|entry| {
                entry.title.to_lowercase().contains(&needle)
                    || entry.author.to_lowercase().contains(&needle)
                    || entry
                        .stores
                        .iter()
                        .any(|listing| listing.name.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect(),
    )
}
