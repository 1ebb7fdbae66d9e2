// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Solidafy Stripe
//!
//! Stripe billing resources (accounts, charges, coupons, customers,
//! invoices, plans, products, subscriptions and subscription items) exposed
//! as queryable tables.
//!
//! ## Features
//!
//! - **Predicate pushdown**: `=`, `<>` and range quals on key columns become
//!   Stripe list parameters (`created[gte]`, `status`, ...)
//! - **Limit-aware pagination**: pages are fetched lazily and never past the
//!   row limit
//! - **Computed columns**: `account_id` and usage record summaries are
//!   fetched per row only when requested
//! - **Arrow Output**: rows convert to RecordBatches and Parquet files
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use futures::TryStreamExt;
//! use solidafy_stripe::{ConnectionConfig, Operator, Plugin, Qual, QueryContext};
//!
//! #[tokio::main]
//! async fn main() -> solidafy_stripe::Result<()> {
//!     let plugin = Plugin::new(ConnectionConfig::with_api_key("sk_test_..."));
//!
//!     let ctx = QueryContext::new()
//!         .qual(Qual::eq_str("status", "open"))
//!         .qual(Qual::timestamp("created", Operator::Ge, 1_700_000_000))
//!         .limit(10);
//!
//!     let mut rows = plugin.list("stripe_invoice", ctx)?;
//!     while let Some(row) = rows.try_next().await? {
//!         println!("{}", serde_json::to_string(&row)?);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │        Plugin: list(table, quals, limit)  get(table, id)      │
//! └──────────────────────────────────────────────────────────────┘
//!                                │
//! ┌────────────┬─────────────┬───┴─────────┬────────────┬────────┐
//! │   Tables   │   Filter    │  Pagination │   Stripe   │ Output │
//! ├────────────┼─────────────┼─────────────┼────────────┼────────┤
//! │ Columns    │ Key columns │ Cursor      │ List / Get │ Arrow  │
//! │ Hydrates   │ Ranges      │ Row limit   │ Expand     │ Parquet│
//! └────────────┴─────────────┴─────────────┴────────────┴────────┘
//!                                │
//!                   HTTP: retry, backoff, rate limit
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Connection configuration
pub mod config;

/// HTTP client with retry and rate limiting
pub mod http;

/// Qual to list parameter translation
pub mod filter;

/// Cursor pagination over Stripe lists
pub mod pagination;

/// Stripe API client
pub mod stripe;

/// Table plugin surface
pub mod plugin;

/// Stripe table definitions
pub mod tables;

/// Arrow/Parquet output
pub mod output;

/// Command-line interface and HTTP server
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::ConnectionConfig;
pub use error::{Error, Result};
pub use filter::{Operator, Qual, QualValue};
pub use plugin::{Plugin, QueryContext, Row, TableDef};
pub use stripe::StripeClient;
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
