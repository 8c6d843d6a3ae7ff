use clap::{Parser, Subcommand};

/// CLI arguments for tracuu-cli
#[derive(Debug, Parser)]
#[command(
    name = "tracuu",
    version,
    about = "Look up which old wards were merged into a new Vietnamese ward"
)]
pub struct CliArgs {
    /// Path to the data file (default: the dataset bundled with tracuu-core).
    /// `.gz` files are decompressed on the fly.
    #[arg(short = 'i', long = "input", env = "TRACUU_DATA", global = true)]
    pub input: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Show debug logs on stderr
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only show errors on stderr
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Search new wards by name (case-insensitive substring)
    Search {
        /// Part of the new ward name, e.g. "bàn cờ"
        query: String,

        /// Print a map link for each old unit
        #[arg(long)]
        maps: bool,
    },

    /// Show a summary of the loaded data
    Stats,

    /// Read queries from stdin, one per line, and search the latest one
    Interactive {
        /// Quiet period in milliseconds before a query is searched
        #[arg(long, default_value_t = 300)]
        debounce_ms: u64,
    },

    /// Load the data and print the diagnostics log
    Logs,
}
