//! tracuu - look up merged Vietnamese wards from the terminal
//!
//! Usage examples
//! --------------
//!
//! - Search a new ward and list the old units merged into it
//!   $ tracuu search "bàn cờ"
//!   $ tracuu search "sài gòn" --maps
//!
//! - Summary of the loaded data
//!   $ tracuu stats
//!
//! - Type queries line by line; only the latest one is searched
//!   $ tracuu interactive
//!
//! - Print the diagnostics log (why did nothing match?)
//!   $ tracuu logs
//!
//! Data source
//! -----------
//!
//! By default the CLI reads the dataset bundled with `tracuu-core`. Use
//! `--input <path>` (or `TRACUU_DATA`) to point at another export; `.gz`
//! files are decompressed on the fly. A missing file is not fatal: searches
//! return nothing and `tracuu logs` shows the CRITICAL entry.
mod args;
mod interactive;
mod output;

use crate::args::{CliArgs, Commands};
use clap::Parser;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing::Level;
use tracuu_core::{DataSource, LoadStatus, WardSearch, WardStore};

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_logging(&args);

    let source = match &args.input {
        Some(path) => DataSource::File(path.into()),
        None => DataSource::bundled(),
    };
    let store = Arc::new(WardStore::new(source));

    // Warm the cache up front so a missing source is reported once, before any query.
    store.ensure_loaded();
    if store.status() == LoadStatus::SourceUnavailable && !matches!(args.command, Commands::Logs) {
        eprintln!(
            "warning: data source not found; searches will return nothing (see `tracuu logs`)"
        );
    }

    let stdout = io::stdout();
    match args.command {
        Commands::Search { query, maps } => {
            let results = store.search(&query);
            output::print_results(&mut stdout.lock(), &query, &results, args.json, maps)?;
        }

        Commands::Stats => {
            let stats = store.ensure_loaded().stats();
            output::print_stats(&mut stdout.lock(), &stats, args.json)?;
        }

        Commands::Interactive { debounce_ms } => {
            interactive::run(store, Duration::from_millis(debounce_ms), args.json)?;
        }

        Commands::Logs => {
            println!("{}", store.diagnostics().export());
        }
    }

    Ok(())
}

fn init_logging(args: &CliArgs) {
    let level = if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        Level::WARN
    };
    // Diagnostics already carry their own timestamps.
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .without_time()
        .try_init();
}
