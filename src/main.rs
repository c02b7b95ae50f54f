//! rackspec binary entry point.

use anyhow::Result;
use clap::{Parser, Subcommand};
use rackspec::cli::{self, fetch_cmd::Engine};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "rackspec",
    version,
    about = "Harvest server spec sheets from product pages into SQLite and CSV"
)]
struct Cli {
    /// Print machine-readable JSON to stdout instead of styled text.
    #[arg(long, global = true)]
    json: bool,
    /// Suppress status output.
    #[arg(long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch a product page and extract its spec sheet.
    Fetch {
        /// Product page URL.
        url: String,
        /// Acquisition engine.
        #[arg(long, value_enum, default_value = "browser")]
        engine: Engine,
        /// Write the raw page HTML to this path for inspection.
        #[arg(long, value_name = "PATH")]
        dump: Option<PathBuf>,
        /// Parse and print without touching the database.
        #[arg(long)]
        no_store: bool,
    },
    /// Print a stored record.
    Show {
        /// URL the record was fetched from.
        url: String,
    },
    /// List stored records, newest first.
    List,
    /// Export stored records to a CSV file.
    Export {
        /// Output CSV path.
        out: PathBuf,
        /// Export only the record with this URL.
        #[arg(long)]
        url: Option<String>,
    },
    /// Delete a stored record.
    Delete {
        /// URL the record was fetched from.
        url: String,
    },
    /// Check that the environment is ready (browser, data dir, database).
    Doctor,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The output helpers read these so every subcommand sees the flags.
    if cli.json {
        std::env::set_var("RACKSPEC_JSON", "1");
    }
    if cli.quiet {
        std::env::set_var("RACKSPEC_QUIET", "1");
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("rackspec=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Fetch {
            url,
            engine,
            dump,
            no_store,
        } => cli::fetch_cmd::run(&url, engine, dump.as_deref(), no_store).await,
        Command::Show { url } => cli::show_cmd::run(&url),
        Command::List => cli::list_cmd::run(),
        Command::Export { out, url } => cli::export_cmd::run(&out, url.as_deref()),
        Command::Delete { url } => cli::delete_cmd::run(&url),
        Command::Doctor => cli::doctor::run(),
    }
}
