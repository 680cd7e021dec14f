//! `folio-admin serve`: the mock REST layer.

use std::path::PathBuf;

use folio_data::mock::{self, FixtureSource};
use folio_data::FolioConfig;
use tracing::info;

use crate::error::AppResult;

/// Serves fixtures until Ctrl+C or SIGTERM.
///
/// `fixtures` beats the configured fixtures directory; with neither, the
/// bundled fixtures are served.
pub async fn serve(config: &FolioConfig, fixtures: Option<PathBuf>, port: Option<u16>) -> AppResult<()> {
    let mut server = config.server.clone();
    if let Some(port) = port {
        server.port = port;
    }

    let source = FixtureSource::from_dir(fixtures.or_else(|| config.data.fixtures_dir.clone()));
    let listener = mock::bind(&server.bind_address()).await?;
    info!(mode = %config.mode(), "Clients in this mode request the matching routes");

    mock::serve(listener, source, mock::shutdown_signal()).await?;
    Ok(())
}
