//! # Commands Module
//!
//! One module per group of `folio-admin` subcommands.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (catalog loading)
//! ├── serve.rs    ◄─── Mock REST server
//! ├── view.rs     ◄─── authors, books, inventory, browse
//! ├── session.rs  ◄─── sign-in, sign-out, whoami
//! └── shell.rs    ◄─── Interactive page
//! ```
//!
//! ## How a Page Command Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Page Command Flow                                    │
//! │                                                                         │
//! │  folio-admin inventory 1 --search gods                                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  load_catalog(config) ── LibraryLoader::spawn().wait()                  │
//! │         │                (four requests at once; failures logged,       │
//! │         │                 the resource stays empty)                     │
//! │         ▼                                                               │
//! │  PageState::new(Page::Inventory { store_id: 1 }, catalog)              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  view::render_page(state, auth snapshot) ──► stdout                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod serve;
pub mod session;
pub mod shell;
pub mod view;

use folio_core::Catalog;
use folio_data::{DataSource, FolioConfig, LibraryLoader, LoadReport};
use tracing::{info, warn};

use crate::error::AppResult;

/// Loads all four collections from the configured source, or from the
/// bundled fixtures when `offline`.
pub async fn load_catalog(config: &FolioConfig, offline: bool) -> AppResult<(Catalog, LoadReport)> {
    let source = if offline {
        info!("Reading bundled fixtures");
        DataSource::Embedded
    } else {
        DataSource::from_config(config)?
    };

    let loader = LibraryLoader::new(source);
    let report = loader.spawn().wait().await?;

    for (resource, message) in report.failures() {
        warn!(%resource, error = %message, "Resource did not load");
    }
    info!(records = report.total_records(), "Catalog loaded");

    Ok((loader.catalog().await, report))
}
