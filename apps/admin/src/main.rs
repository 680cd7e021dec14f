//! # folio-admin
//!
//! Entry point. All logic lives in the `folio_admin` library.

use clap::Parser;
use folio_admin::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    folio_admin::init_tracing(cli.log_filter());

    let json = cli.json;
    match folio_admin::run(cli).await {
        Ok(()) => Ok(()),
        Err(err) if json => {
            println!("{}", serde_json::to_string_pretty(&err)?);
            std::process::exit(1);
        }
        Err(err) => Err(err.into()),
    }
}
