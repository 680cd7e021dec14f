//! # Resource Fetchers
//!
//! A [`ResourceFetcher`] turns a [`Resource`] into raw JSON. The loader does
//! not care where the bytes come from:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Fetcher Implementations                        │
//! │                                                                         │
//! │  HttpFetcher      GET {base_url}{route}   (mock or static routes)      │
//! │  FixtureFetcher   read {dir}/{resource}.json                            │
//! │  Embedded         fixtures compiled into the binary                     │
//! │                                                                         │
//! │  DataSource       picks one of the above from FolioConfig               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No retries: a failed request is reported once and the loader moves on.

use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use folio_core::Resource;
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use crate::config::FolioConfig;
use crate::endpoints::{fixture_file, ApiRoutes, DataSourceMode};
use crate::error::{DataError, DataResult};

/// Fetches the raw JSON payload of one resource.
pub trait ResourceFetcher: Send + Sync {
    fn fetch(&self, resource: Resource) -> impl Future<Output = DataResult<Value>> + Send;
}

// =============================================================================
// Embedded Fixtures
// =============================================================================

/// Fixture text compiled into the binary.
pub fn embedded_fixture(resource: Resource) -> &'static str {
    match resource {
        Resource::Stores => include_str!("../../../fixtures/stores.json"),
        Resource::Books => include_str!("../../../fixtures/books.json"),
        Resource::Authors => include_str!("../../../fixtures/authors.json"),
        Resource::Inventory => include_str!("../../../fixtures/inventory.json"),
    }
}

// =============================================================================
// HTTP
// =============================================================================

/// Fetches resources over HTTP from the mock or static routes.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    base_url: Url,
    routes: ApiRoutes,
}

impl HttpFetcher {
    pub fn new(base_url: &str, mode: DataSourceMode, timeout: Duration) -> DataResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DataError::InvalidConfig(format!("HTTP client: {}", e)))?;

        Ok(HttpFetcher {
            client,
            base_url: Url::parse(base_url)?,
            routes: ApiRoutes::for_mode(mode),
        })
    }

    /// Absolute URL of a resource.
    pub fn url_for(&self, resource: Resource) -> DataResult<Url> {
        Ok(self.base_url.join(self.routes.path(resource))?)
    }
}

impl ResourceFetcher for HttpFetcher {
    async fn fetch(&self, resource: Resource) -> DataResult<Value> {
        let url = self.url_for(resource)?;
        debug!(%resource, %url, "Fetching resource");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| DataError::http(resource, e))?;

        let body = response
            .bytes()
            .await
            .map_err(|e| DataError::http(resource, e))?;

        Ok(serde_json::from_slice(&body)?)
    }
}

// =============================================================================
// Files
// =============================================================================

/// Reads `{resource}.json` files from a directory.
#[derive(Debug, Clone)]
pub struct FixtureFetcher {
    dir: PathBuf,
}

impl FixtureFetcher {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FixtureFetcher { dir: dir.into() }
    }

    pub fn path_for(&self, resource: Resource) -> PathBuf {
        self.dir.join(fixture_file(resource))
    }
}

impl ResourceFetcher for FixtureFetcher {
    async fn fetch(&self, resource: Resource) -> DataResult<Value> {
        let path = self.path_for(resource);
        debug!(%resource, ?path, "Reading fixture");

        let bytes = tokio::fs::read(&path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

// =============================================================================
// Data Source
// =============================================================================

/// The fetcher selected by configuration.
#[derive(Debug, Clone)]
pub enum DataSource {
    Http(HttpFetcher),
    Fixtures(FixtureFetcher),
    Embedded,
}

impl DataSource {
    /// HTTP unless a fixtures directory is configured.
    pub fn from_config(config: &FolioConfig) -> DataResult<Self> {
        match &config.data.fixtures_dir {
            Some(dir) => {
                info!(?dir, "Reading data from fixture files");
                Ok(DataSource::Fixtures(FixtureFetcher::new(dir)))
            }
            None => {
                info!(
                    mode = %config.mode(),
                    base_url = %config.data.base_url,
                    "Reading data over HTTP"
                );
                Ok(DataSource::Http(HttpFetcher::new(
                    &config.data.base_url,
                    config.mode(),
                    config.request_timeout(),
                )?))
            }
        }
    }
}

impl ResourceFetcher for DataSource {
    async fn fetch(&self, resource: Resource) -> DataResult<Value> {
        match self {
            DataSource::Http(fetcher) => fetcher.fetch(resource).await,
            DataSource::Fixtures(fetcher) => fetcher.fetch(resource).await,
            DataSource::Embedded => Ok(serde_json::from_str(embedded_fixture(resource))?),
        }
    }
}
