//! Output module
//!
//! Turns table rows into Arrow RecordBatches and Parquet files.
//!
//! # Overview
//!
//! - Arrow schemas derived from table definitions
//! - Rows to RecordBatch conversion
//! - Batched Parquet writing

mod schema;
mod writer;

pub use schema::{arrow_type, rows_to_batch, table_schema};
pub use writer::{write_rows_to_parquet, ParquetWriter, ParquetWriterConfig, DEFAULT_BATCH_SIZE};

#[cfg(test)]
mod tests;
