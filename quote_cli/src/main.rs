//! quote_cli - price sheet-material quotes from the command line.
//!
//! Loads the settings tree once, then runs one command. Results go to
//! stdout as JSON; logs go to stderr.

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Price quotes and manage the quote log.
#[derive(Parser, Debug)]
#[command(name = "quote_cli")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
Examples:
  quote_cli quote request.json          Price a request and log it
  quote_cli quote - --no-log < req.json Price from stdin without logging
  quote_cli quotes list                 Logged quotes, newest first
  quote_cli quotes show 12              One logged quote in full
  quote_cli materials styrene           Custom-sheet options for a material")]
pub struct Cli {
    /// Settings root containing config/ and data/
    #[arg(long, global = true, env = "QUOTE_SETTINGS_DIR", default_value = "settings")]
    pub settings_dir: PathBuf,

    /// Quote log file (default: <settings-dir>/data/quotes.json)
    #[arg(long, global = true, env = "QUOTE_LOG_PATH")]
    pub quotes_file: Option<PathBuf>,

    /// Recorded as requested_by on logged quotes
    #[arg(long, global = true, env = "QUOTE_USER")]
    pub user: Option<String>,

    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    fn quotes_path(&self) -> PathBuf {
        self.quotes_file
            .clone()
            .unwrap_or_else(|| self.settings_dir.join("data").join("quotes.json"))
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Price a quote request (JSON file, or - for stdin)
    Quote {
        request: PathBuf,

        /// Don't append the priced quote to the log
        #[arg(long)]
        no_log: bool,
    },

    /// Browse the quote log
    Quotes {
        #[command(subcommand)]
        command: QuotesCommand,
    },

    /// List customers (id and name)
    Customers,

    /// List stock items (SKU and description)
    Items,

    /// Custom-sheet and stock options, optionally for one material
    Materials { material: Option<String> },

    /// Create or update a customer
    CustomerSet {
        id: String,

        #[arg(long)]
        name: Option<String>,

        /// e.g. VN10ST20AP15
        #[arg(long)]
        column_break: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        freight_offset: Option<i32>,
    },

    /// Change a stock item's description
    ItemDescribe { sku: String, description: String },
}

#[derive(Subcommand, Debug)]
pub enum QuotesCommand {
    /// Summaries, newest first
    List,
    /// One full record
    Show { id: u64 },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    commands::run(&cli)
}
