//! # Data Source Endpoints
//!
//! Where each resource is fetched from, depending on the data source mode.
//!
//! ```text
//! ┌──────────────┬──────────────────┬────────────────────────┐
//! │  Resource    │  Mock            │  Static                │
//! ├──────────────┼──────────────────┼────────────────────────┤
//! │  stores      │  /api/stores     │  /data/stores.json     │
//! │  books       │  /api/books      │  /data/books.json      │
//! │  authors     │  /api/authors    │  /data/authors.json    │
//! │  inventory   │  /api/inventory  │  /data/inventory.json  │
//! └──────────────┴──────────────────┴────────────────────────┘
//! ```
//!
//! The default mode is baked in at compile time from `FOLIO_USE_MOCK`
//! (`true` selects mock). Config files and the environment can override it.

use folio_core::Resource;
use serde::{Deserialize, Serialize};

use crate::error::DataError;

// =============================================================================
// Data Source Mode
// =============================================================================

/// Which family of routes the fetchers use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSourceMode {
    /// Mocked REST layer (`/api/*`).
    Mock,

    /// Static JSON fixtures (`/data/*.json`).
    #[default]
    Static,
}

impl DataSourceMode {
    /// Mode selected by the `FOLIO_USE_MOCK` build flag.
    pub fn build_default() -> Self {
        Self::from_flag(option_env!("FOLIO_USE_MOCK"))
    }

    /// Only the exact string `true` turns mock mode on.
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some("true") => DataSourceMode::Mock,
            _ => DataSourceMode::Static,
        }
    }

    pub fn is_mock(&self) -> bool {
        matches!(self, DataSourceMode::Mock)
    }
}

impl std::fmt::Display for DataSourceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSourceMode::Mock => write!(f, "mock"),
            DataSourceMode::Static => write!(f, "static"),
        }
    }
}

impl std::str::FromStr for DataSourceMode {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mock" | "api" => Ok(DataSourceMode::Mock),
            "static" | "fixtures" | "files" => Ok(DataSourceMode::Static),
            other => Err(DataError::InvalidConfig(format!(
                "Unknown data source mode: '{}'. Valid options: mock, static",
                other
            ))),
        }
    }
}

// =============================================================================
// Routes
// =============================================================================

/// The four resource paths for one mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRoutes {
    pub stores: String,
    pub books: String,
    pub authors: String,
    pub inventory: String,
}

impl ApiRoutes {
    pub fn for_mode(mode: DataSourceMode) -> Self {
        ApiRoutes {
            stores: route_for(mode, Resource::Stores),
            books: route_for(mode, Resource::Books),
            authors: route_for(mode, Resource::Authors),
            inventory: route_for(mode, Resource::Inventory),
        }
    }

    /// Path of one resource.
    pub fn path(&self, resource: Resource) -> &str {
        match resource {
            Resource::Stores => &self.stores,
            Resource::Books => &self.books,
            Resource::Authors => &self.authors,
            Resource::Inventory => &self.inventory,
        }
    }
}

/// Path of `resource` under `mode`.
pub fn route_for(mode: DataSourceMode, resource: Resource) -> String {
    match mode {
        DataSourceMode::Mock => format!("/api/{}", resource),
        DataSourceMode::Static => format!("/data/{}", fixture_file(resource)),
    }
}

/// Fixture file name of a resource (`books.json`).
pub fn fixture_file(resource: Resource) -> String {
    format!("{}.json", resource)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_by_mode() {
        let mock = ApiRoutes::for_mode(DataSourceMode::Mock);
        assert_eq!(mock.path(Resource::Stores), "/api/stores");
        assert_eq!(mock.path(Resource::Inventory), "/api/inventory");

        let fixtures = ApiRoutes::for_mode(DataSourceMode::Static);
        assert_eq!(fixtures.path(Resource::Books), "/data/books.json");
        assert_eq!(fixtures.authors, "/data/authors.json");
    }

    #[test]
    fn test_build_flag() {
        assert_eq!(DataSourceMode::from_flag(Some("true")), DataSourceMode::Mock);
        assert_eq!(DataSourceMode::from_flag(Some("TRUE")), DataSourceMode::Static);
        assert_eq!(DataSourceMode::from_flag(Some("1")), DataSourceMode::Static);
        assert_eq!(DataSourceMode::from_flag(None), DataSourceMode::Static);
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("mock".parse::<DataSourceMode>().unwrap(), DataSourceMode::Mock);
        assert_eq!("API".parse::<DataSourceMode>().unwrap(), DataSourceMode::Mock);
        assert_eq!("fixtures".parse::<DataSourceMode>().unwrap(), DataSourceMode::Static);
        assert!("graphql".parse::<DataSourceMode>().is_err());
    }
}
