//! CLI module
//!
//! Command-line interface over the Stripe tables.
//!
//! # Commands
//!
//! - `tables` - List available tables
//! - `describe` - Show one table's schema
//! - `check` - Test the API key
//! - `query` - Stream rows as JSON lines or write a Parquet file
//! - `get` - Fetch one row by id
//! - `serve` - Start HTTP server mode

mod commands;
mod runner;
mod server;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::{write_parquet, Runner};
pub use server::{router, serve};
