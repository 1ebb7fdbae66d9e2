//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Query Stripe resources as tables
#[derive(Parser, Debug)]
#[command(name = "solidafy-stripe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Connection config file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Stripe secret key (overrides the config file and STRIPE_API_KEY)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// API base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List available tables
    Tables,

    /// Show a table's columns and key columns
    Describe {
        /// Table name
        table: String,
    },

    /// Test the API key by fetching the connected account
    Check,

    /// List rows of a table
    Query {
        /// Table name
        table: String,

        /// Filter expression, e.g. "created >= 2024-01-01" (repeatable)
        #[arg(short, long = "where")]
        filters: Vec<String>,

        /// Maximum rows
        #[arg(short, long)]
        limit: Option<u64>,

        /// Columns to return (comma-separated, default all)
        #[arg(long, value_delimiter = ',')]
        columns: Option<Vec<String>>,

        /// Output file (required for parquet)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Fetch one row by id
    Get {
        /// Table name
        table: String,

        /// Object id
        id: String,

        /// Columns to return (comma-separated, default all)
        #[arg(long, value_delimiter = ',')]
        columns: Option<Vec<String>>,
    },

    /// Start HTTP server mode
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one row per line)
    Json,
    /// Human-readable output
    Pretty,
    /// Parquet file
    Parquet,
}
