//! # Library Loader
//!
//! Loads the four base collections into a shared [`Catalog`].
//!
//! ## Load Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          LibraryLoader                                  │
//! │                                                                         │
//! │   spawn() ──► task ─┬─ select! ─┬─ join!(stores, books,               │
//! │                     │           │        authors, inventory)           │
//! │                     │           │     each: fetch ─► normalize ─►      │
//! │                     │           │           write lock ─► apply        │
//! │                     │           │                                      │
//! │                     │           └─ cancel signal (watch) ─► Cancelled  │
//! │                     │                                                  │
//! │   LoadHandle ───────┘  cancel() / drop ─► signal                      │
//! │                                                                         │
//! │   A failed resource is logged and settles as Failed; its collection    │
//! │   stays empty and the other three still load.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cancel flag is re-checked after the write lock is taken, so a load
//! that was cancelled never touches the catalog again.

use std::collections::BTreeMap;
use std::sync::Arc;

use folio_core::{Catalog, Resource};
use serde_json::Value;
use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::error::{DataError, DataResult};
use crate::fetch::ResourceFetcher;

// =============================================================================
// Load Status
// =============================================================================

/// Per-resource load state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// Request still in flight.
    Pending,
    /// Applied to the catalog with this many records.
    Loaded(usize),
    /// Fetch or parse failed; the collection stays empty.
    Failed(String),
}

impl LoadStatus {
    pub fn is_settled(&self) -> bool {
        !matches!(self, LoadStatus::Pending)
    }
}

impl std::fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadStatus::Pending => write!(f, "pending"),
            LoadStatus::Loaded(count) => write!(f, "loaded ({} records)", count),
            LoadStatus::Failed(message) => write!(f, "failed: {}", message),
        }
    }
}

/// Outcome of a finished load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub statuses: BTreeMap<Resource, LoadStatus>,
}

impl LoadReport {
    /// Resources that failed, with their messages.
    pub fn failures(&self) -> Vec<(Resource, &str)> {
        self.statuses
            .iter()
            .filter_map(|(resource, status)| match status {
                LoadStatus::Failed(message) => Some((*resource, message.as_str())),
                _ => None,
            })
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.statuses.values().all(LoadStatus::is_settled)
    }

    pub fn total_records(&self) -> usize {
        self.statuses
            .values()
            .map(|status| match status {
                LoadStatus::Loaded(count) => *count,
                _ => 0,
            })
            .sum()
    }
}

// =============================================================================
// Library State
// =============================================================================

/// The catalog plus the load state of each resource.
#[derive(Debug, Clone)]
pub struct LibraryState {
    pub catalog: Catalog,
    statuses: BTreeMap<Resource, LoadStatus>,
}

impl Default for LibraryState {
    fn default() -> Self {
        LibraryState {
            catalog: Catalog::new(),
            statuses: Resource::ALL
                .into_iter()
                .map(|resource| (resource, LoadStatus::Pending))
                .collect(),
        }
    }
}

impl LibraryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self, resource: Resource) -> &LoadStatus {
        static PENDING: LoadStatus = LoadStatus::Pending;
        self.statuses.get(&resource).unwrap_or(&PENDING)
    }

    /// True until every resource has settled (loaded or failed).
    pub fn is_loading(&self) -> bool {
        !self.statuses.values().all(LoadStatus::is_settled)
    }

    pub fn report(&self) -> LoadReport {
        LoadReport {
            statuses: self.statuses.clone(),
        }
    }

    /// Applies one fetch result.
    fn apply(&mut self, resource: Resource, result: DataResult<Value>) {
        let status = match result.and_then(|payload| {
            self.catalog
                .apply_payload(resource, payload)
                .map_err(DataError::from)
        }) {
            Ok(count) => {
                debug!(%resource, count, "Resource loaded");
                LoadStatus::Loaded(count)
            }
            Err(e) => {
                error!(%resource, error = %e, "Error fetching {}", resource);
                LoadStatus::Failed(e.to_string())
            }
        };
        self.statuses.insert(resource, status);
    }
}

// =============================================================================
// Loader
// =============================================================================

/// Runs the four-way load against a fetcher.
pub struct LibraryLoader<F> {
    fetcher: Arc<F>,
    state: Arc<RwLock<LibraryState>>,
}

impl<F> Clone for LibraryLoader<F> {
    fn clone(&self) -> Self {
        LibraryLoader {
            fetcher: Arc::clone(&self.fetcher),
            state: Arc::clone(&self.state),
        }
    }
}

impl<F: ResourceFetcher + 'static> LibraryLoader<F> {
    pub fn new(fetcher: F) -> Self {
        LibraryLoader {
            fetcher: Arc::new(fetcher),
            state: Arc::new(RwLock::new(LibraryState::new())),
        }
    }

    /// Shared state the load writes into.
    pub fn state(&self) -> Arc<RwLock<LibraryState>> {
        Arc::clone(&self.state)
    }

    /// Copy of the catalog as loaded so far.
    pub async fn catalog(&self) -> Catalog {
        self.state.read().await.catalog.clone()
    }

    /// Loads to completion in the current task.
    pub async fn load(&self) -> LoadReport {
        let (_cancel_tx, cancel_rx) = watch::channel(false);
        run_load(self.fetcher.as_ref(), &self.state, &cancel_rx).await
    }

    /// Starts a load in the background.
    ///
    /// Dropping the returned handle cancels the load.
    pub fn spawn(&self) -> LoadHandle {
        let (cancel_tx, mut cancel_rx) = watch::channel(false);
        let fetcher = Arc::clone(&self.fetcher);
        let state = Arc::clone(&self.state);

        let task = tokio::spawn(async move {
            let guard_rx = cancel_rx.clone();
            tokio::select! {
                report = run_load(fetcher.as_ref(), &state, &guard_rx) => Ok(report),
                _ = cancel_rx.wait_for(|cancelled| *cancelled) => {
                    info!("Library load cancelled");
                    Err(DataError::Cancelled)
                }
            }
        });

        LoadHandle {
            cancel_tx,
            task: Some(task),
        }
    }
}

async fn run_load<F: ResourceFetcher>(
    fetcher: &F,
    state: &RwLock<LibraryState>,
    cancel: &watch::Receiver<bool>,
) -> LoadReport {
    info!("Loading library data");

    tokio::join!(
        load_one(fetcher, state, cancel, Resource::Stores),
        load_one(fetcher, state, cancel, Resource::Books),
        load_one(fetcher, state, cancel, Resource::Authors),
        load_one(fetcher, state, cancel, Resource::Inventory),
    );

    let report = state.read().await.report();
    info!(
        records = report.total_records(),
        failures = report.failures().len(),
        "Library data loaded"
    );
    report
}

async fn load_one<F: ResourceFetcher>(
    fetcher: &F,
    state: &RwLock<LibraryState>,
    cancel: &watch::Receiver<bool>,
    resource: Resource,
) {
    let result = fetcher.fetch(resource).await;

    let mut guard = state.write().await;
    if *cancel.borrow() {
        warn!(%resource, "Discarding result of cancelled load");
        return;
    }
    guard.apply(resource, result);
}

// =============================================================================
// Load Handle
// =============================================================================

/// Handle to a background load.
pub struct LoadHandle {
    cancel_tx: watch::Sender<bool>,
    task: Option<JoinHandle<DataResult<LoadReport>>>,
}

impl LoadHandle {
    /// Aborts outstanding requests. No result is applied afterwards.
    pub fn cancel(&self) {
        self.cancel_tx.send_replace(true);
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Waits for the load to finish.
    pub async fn wait(mut self) -> DataResult<LoadReport> {
        let task = self.task.take().ok_or(DataError::Cancelled)?;
        task.await
            .map_err(|e| DataError::Server(format!("load task failed: {}", e)))?
    }
}

impl Drop for LoadHandle {
    fn drop(&mut self) {
        if self.task.is_some() {
            self.cancel();
        }
    }
}

impl std::fmt::Debug for LoadHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadHandle")
            .field("cancelled", &*self.cancel_tx.borrow())
            .field("finished", &self.is_finished())
            .finish()
    }
}
