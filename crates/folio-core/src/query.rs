//! # Query Strings
//!
//! Pages read their initial search term from `?search=` in the location
//! they were opened with. Values are form-decoded, so `J.%20R.` and
//! `J.+R.` both seed `J. R.`.

use url::form_urlencoded;

/// Query key that seeds page filters.
pub const SEARCH_PARAM: &str = "search";

/// Reads `search` from a raw query string (with or without the leading `?`).
pub fn search_from_query(query: &str) -> Option<String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == SEARCH_PARAM)
        .map(|(_, value)| value.into_owned())
}

/// Reads `search` from a location such as `/store/1?search=gods#top`.
///
/// Returns an empty term when the location carries none.
pub fn search_from_location(location: &str) -> String {
    let without_fragment = location.split('#').next().unwrap_or_default();
    without_fragment
        .split_once('?')
        .and_then(|(_, query)| search_from_query(query))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_from_query() {
        assert_eq!(search_from_query("?search=tolkien").as_deref(), Some("tolkien"));
        assert_eq!(search_from_query("page=2&search=J.%20R.").as_deref(), Some("J. R."));
        assert_eq!(search_from_query("search=small+gods").as_deref(), Some("small gods"));
        assert_eq!(search_from_query("page=2"), None);
    }

    #[test]
    fn test_search_from_location() {
        assert_eq!(search_from_location("/store/1?search=gods#top"), "gods");
        assert_eq!(search_from_location("/authors"), "");
        assert_eq!(search_from_location("/authors#search=x"), "");
    }
}
