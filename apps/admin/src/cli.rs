//! Command line definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "folio-admin", bin_name = "folio-admin", version)]
#[command(about = "Library and bookstore administration", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (defaults to the platform config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Read the fixtures bundled into the binary instead of the data source
    #[arg(long, global = true)]
    pub offline: bool,

    /// Print tables and errors as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the fixtures on the mock and static routes
    Serve {
        /// Directory holding {stores,books,authors,inventory}.json
        #[arg(long, value_name = "DIR")]
        fixtures: Option<PathBuf>,

        /// Port to listen on (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// List authors
    Authors {
        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// List all books
    Books {
        /// Comma-separated columns: id,name,pages,author,price,actions
        #[arg(short, long, default_value = "")]
        columns: String,

        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// List one store's inventory with prices
    Inventory {
        /// Store id
        store: i64,

        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// List every book with the stores stocking it
    Browse {
        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// Sign in under a name (blank signs in as "User")
    SignIn {
        #[arg(default_value = "")]
        name: String,
    },

    /// Sign out
    SignOut,

    /// Show the signed-in user
    Whoami,

    /// Open an interactive page
    Shell {
        /// Open this store's inventory (keeps the query of --location)
        #[arg(long)]
        store: Option<i64>,

        /// Page location, e.g. "/authors?search=le%20guin"
        #[arg(long, default_value = "/")]
        location: String,
    },
}

impl Cli {
    /// Default log filter when `RUST_LOG` is unset. The server and
    /// `--verbose` log progress; other commands only warnings.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose || matches!(self.command, Commands::Serve { .. }) {
            "info,folio=debug"
        } else {
            "warn"
        }
    }
}

/// The page a shell opens on. `--store` replaces the path of `--location`
/// and keeps its query, so `--store 2 --location "/?search=gods"` opens
/// `/store/2?search=gods`.
pub fn shell_location(store: Option<i64>, location: &str) -> String {
    let Some(id) = store else {
        return location.to_string();
    };

    match location.split_once('?') {
        Some((_, query)) => format!("/store/{}?{}", id, query),
        None => format!("/store/{}", id),
    }
}
