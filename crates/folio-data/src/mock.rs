//! # Mock Server
//!
//! Serves the fixtures over HTTP so the HTTP fetcher has something to talk
//! to during development and in tests.
//!
//! ## Routes
//! ```text
//! GET /health                  {"ok": true, "source": "embedded"}
//! GET /api/{resource}          fixture JSON (mock routes)
//! GET /data/{resource}.json    fixture JSON (static routes)
//! anything else                404
//! ```
//!
//! Both route families return identical bodies.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use folio_core::Resource;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::endpoints::fixture_file;
use crate::error::{DataError, DataResult};
use crate::fetch::embedded_fixture;

// =============================================================================
// Fixture Source
// =============================================================================

/// Where the server reads fixture bodies from.
#[derive(Debug, Clone)]
pub enum FixtureSource {
    /// Fixtures compiled into the binary.
    Embedded,
    /// `{resource}.json` files in a directory, read per request.
    Directory(PathBuf),
}

impl FixtureSource {
    pub fn from_dir(dir: Option<PathBuf>) -> Self {
        dir.map_or(FixtureSource::Embedded, FixtureSource::Directory)
    }

    fn label(&self) -> String {
        match self {
            FixtureSource::Embedded => "embedded".to_string(),
            FixtureSource::Directory(dir) => dir.display().to_string(),
        }
    }

    async fn load(&self, resource: Resource) -> DataResult<Value> {
        match self {
            FixtureSource::Embedded => Ok(serde_json::from_str(embedded_fixture(resource))?),
            FixtureSource::Directory(dir) => {
                let bytes = tokio::fs::read(dir.join(fixture_file(resource))).await?;
                Ok(serde_json::from_slice(&bytes)?)
            }
        }
    }
}

// =============================================================================
// Router
// =============================================================================

/// Builds the mock router.
pub fn router(source: FixtureSource) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/{resource}", get(api_handler))
        .route("/data/{file}", get(static_handler))
        .with_state(Arc::new(source))
}

/// Binds a listener on `addr` (e.g. `"127.0.0.1:5173"`).
pub async fn bind(addr: &str) -> DataResult<TcpListener> {
    TcpListener::bind(addr)
        .await
        .map_err(|e| DataError::Server(format!("failed to bind {}: {}", addr, e)))
}

/// Serves until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    source: FixtureSource,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> DataResult<()> {
    let addr = listener
        .local_addr()
        .map_err(|e| DataError::Server(e.to_string()))?;
    info!(%addr, source = %source.label(), "Mock server listening");

    axum::serve(listener, router(source))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| DataError::Server(e.to_string()))?;

    info!("Mock server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}

// =============================================================================
// Handlers
// =============================================================================

async fn health_handler(State(source): State<Arc<FixtureSource>>) -> impl IntoResponse {
    Json(json!({ "ok": true, "source": source.label() }))
}

async fn api_handler(
    State(source): State<Arc<FixtureSource>>,
    Path(resource): Path<String>,
) -> Response {
    match resource.parse::<Resource>() {
        Ok(resource) => respond(&source, resource).await,
        Err(()) => not_found(&resource),
    }
}

async fn static_handler(
    State(source): State<Arc<FixtureSource>>,
    Path(file): Path<String>,
) -> Response {
    match file
        .strip_suffix(".json")
        .and_then(|name| name.parse::<Resource>().ok())
    {
        Some(resource) => respond(&source, resource).await,
        None => not_found(&file),
    }
}

async fn respond(source: &FixtureSource, resource: Resource) -> Response {
    match source.load(resource).await {
        Ok(body) => {
            debug!(%resource, "Serving fixture");
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            warn!(%resource, error = %e, "Fixture unavailable");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

fn not_found(path: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": format!("No such resource: {}", path) })),
    )
        .into_response()
}
