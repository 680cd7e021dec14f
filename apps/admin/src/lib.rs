//! # Folio Admin Library
//!
//! Everything behind the `folio-admin` binary: command dispatch, pages,
//! rendering and the interactive shell.
//!
//! ## Module Organization
//! ```text
//! folio_admin/
//! ├── lib.rs          ◄─── You are here (tracing setup & dispatch)
//! ├── cli.rs          ◄─── clap definitions
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── Display settings (currency, widths)
//! │   └── session.rs  ◄─── AuthContext over the session file
//! ├── pages/
//! │   ├── mod.rs      ◄─── PageState: view + edit/delete/add actions
//! │   ├── books.rs    ◄─── All books
//! │   ├── authors.rs  ◄─── Authors
//! │   ├── inventory.rs◄─── One store's stock and prices
//! │   └── browse.rs   ◄─── Books with their stores
//! ├── commands/
//! │   ├── mod.rs      ◄─── Catalog loading
//! │   ├── serve.rs    ◄─── Mock server
//! │   ├── view.rs     ◄─── One-shot page output
//! │   ├── session.rs  ◄─── sign-in / sign-out / whoami
//! │   └── shell.rs    ◄─── Interactive page
//! ├── prompt.rs       ◄─── y/N confirmation
//! ├── render.rs       ◄─── Grid → aligned text
//! └── error.rs        ◄─── AppError for commands
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod pages;
pub mod prompt;
pub mod render;
pub mod state;

use std::io::Write;

use folio_data::FolioConfig;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::{shell_location, Cli, Commands};
use commands::{load_catalog, session, shell, view};
use error::{AppError, AppResult};
use folio_core::columns::parse_column_list;
use pages::{Page, PageState};
use render::render_load_problems;
use state::{open_session, DisplayState};

/// Runs one `folio-admin` invocation.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Command Startup                                   │
/// │                                                                         │
/// │  1. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults (FOLIO_USE_MOCK baked in at build time)                  │
/// │     • config.toml, then FOLIO_* environment variables                   │
/// │                                                                         │
/// │  2. Restore Session ──────────────────────────────────────────────────► │
/// │     • "user" key of the session file                                    │
/// │                                                                         │
/// │  3. Load Catalog (page commands only) ────────────────────────────────► │
/// │     • four concurrent requests, or the bundled fixtures with --offline  │
/// │                                                                         │
/// │  4. Render or Run ────────────────────────────────────────────────────► │
/// │     • one-shot page output, the shell loop, or the mock server          │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> AppResult<()> {
    let config = FolioConfig::load(cli.config.clone())?;
    let display = DisplayState::from_env();
    let mut auth = open_session(&config);
    debug!(mode = %config.mode(), signed_in = auth.is_authenticated(), "Starting");

    let page = match cli.command {
        Commands::Serve { fixtures, port } => {
            return commands::serve::serve(&config, fixtures, port).await;
        }
        Commands::SignIn { name } => return emit(&session::sign_in(&mut auth, &name)?),
        Commands::SignOut => return emit(&session::sign_out(&mut auth)?),
        Commands::Whoami => return emit(&session::whoami(&auth)),
        Commands::Authors { search } => PagePlan::new(Page::Authors, search),
        Commands::Books { columns, search } => {
            PagePlan::new(Page::Books, search).with_columns(&columns)?
        }
        Commands::Inventory { store, search } => {
            PagePlan::new(Page::Inventory { store_id: store }, search)
        }
        Commands::Browse { search } => PagePlan::new(Page::Browse, search),
        Commands::Shell { store, location } => {
            let location = shell_location(store, &location);
            let (catalog, report) = load_catalog(&config, cli.offline).await?;
            report_problems(&report);

            let mut state = PageState::open(&location, catalog)?;
            let stdin = std::io::stdin();
            let mut input = stdin.lock();
            let mut output = std::io::stdout();
            return shell::run(&mut state, &mut auth, &display, &mut input, &mut output);
        }
    };

    let (catalog, report) = load_catalog(&config, cli.offline).await?;
    report_problems(&report);

    let mut state = page.into_state(catalog);
    let snapshot = auth.snapshot();
    if cli.json {
        emit(&view::render_page_json(&mut state, &snapshot)?)
    } else {
        emit(&view::render_page(&mut state, &snapshot, &display))
    }
}

/// A one-shot page request, before the catalog is loaded.
struct PagePlan {
    page: Page,
    search: String,
    columns: Option<Vec<folio_core::columns::ColumnKind>>,
}

impl PagePlan {
    fn new(page: Page, search: String) -> Self {
        PagePlan {
            page,
            search,
            columns: None,
        }
    }

    fn with_columns(mut self, columns: &str) -> AppResult<Self> {
        self.columns = Some(parse_column_list(columns)?);
        Ok(self)
    }

    fn into_state(self, catalog: folio_core::Catalog) -> PageState {
        let state = PageState::new(self.page, catalog).with_search(self.search);
        match self.columns {
            Some(columns) => state.with_columns(columns),
            None => state,
        }
    }
}

fn report_problems(report: &folio_data::LoadReport) {
    for line in render_load_problems(report) {
        eprintln!("{}", line);
    }
}

fn emit(text: &str) -> AppResult<()> {
    let mut stdout = std::io::stdout();
    writeln!(stdout, "{}", text).map_err(|e| AppError::internal(e.to_string()))
}

/// Initializes the tracing subscriber on stderr.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=folio=trace` - Show trace for folio crates only
/// - Default: `default_filter` (see [`Cli::log_filter`])
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
