//! Tests for output module

use super::*;
use crate::plugin::{Column, ListConfig, Row, TableDef};
use arrow::array::{Array, BooleanArray, Float64Array, Int64Array, StringArray, TimestampSecondArray};
use arrow::datatypes::{DataType, TimeUnit};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::fs::File;
use tempfile::tempdir;

fn charges() -> TableDef {
    TableDef {
        name: "charges",
        description: "",
        list: ListConfig::Paginated {
            path: "/v1/charges",
            expand: &[],
        },
        key_columns: Vec::new(),
        get: None,
        columns: vec![
            Column::string("id", ""),
            Column::int("amount", ""),
            Column::double("amount_decimal", ""),
            Column::bool("paid", ""),
            Column::timestamp("created", ""),
            Column::json("metadata", ""),
        ],
    }
}

fn row(id: &str, amount: i64, paid: bool) -> Row {
    let mut row = Row::default();
    row.push("id", json!(id));
    row.push("amount", json!(amount));
    row.push("amount_decimal", json!(amount as f64 / 100.0));
    row.push("paid", json!(paid));
    row.push("created", json!("2023-11-14T22:13:20Z"));
    row.push("metadata", json!({"order": "o_1"}));
    row
}

// ============================================================================
// Schema Tests
// ============================================================================

#[test]
fn test_arrow_types() {
    assert_eq!(arrow_type(crate::types::ColumnType::Json), DataType::Utf8);
    assert_eq!(
        arrow_type(crate::types::ColumnType::Timestamp),
        DataType::Timestamp(TimeUnit::Second, Some("UTC".into()))
    );
}

#[test]
fn test_table_schema_all_columns() {
    let schema = table_schema(&charges(), None);
    let names: Vec<_> = schema.fields().iter().map(|f| f.name().as_str()).collect();
    assert_eq!(
        names,
        vec!["id", "amount", "amount_decimal", "paid", "created", "metadata"]
    );
    assert!(schema.fields().iter().all(|f| f.is_nullable()));
}

#[test]
fn test_table_schema_selected_columns_keep_table_order() {
    let wanted = vec!["paid".to_string(), "id".to_string(), "nope".to_string()];
    let schema = table_schema(&charges(), Some(&wanted));
    let names: Vec<_> = schema.fields().iter().map(|f| f.name().as_str()).collect();
    assert_eq!(names, vec!["id", "paid"]);
}

// ============================================================================
// RecordBatch Tests
// ============================================================================

#[test]
fn test_rows_to_batch() {
    let schema = table_schema(&charges(), None);
    let batch = rows_to_batch(&[row("ch_1", 500, true), row("ch_2", 250, false)], &schema).unwrap();

    assert_eq!(batch.num_rows(), 2);
    assert_eq!(batch.num_columns(), 6);

    let ids = batch.column(0).as_any().downcast_ref::<StringArray>().unwrap();
    assert_eq!(ids.value(1), "ch_2");

    let amounts = batch.column(1).as_any().downcast_ref::<Int64Array>().unwrap();
    assert_eq!(amounts.value(0), 500);

    let decimals = batch.column(2).as_any().downcast_ref::<Float64Array>().unwrap();
    assert!((decimals.value(1) - 2.5).abs() < f64::EPSILON);

    let paid = batch.column(3).as_any().downcast_ref::<BooleanArray>().unwrap();
    assert!(!paid.value(1));

    let created = batch
        .column(4)
        .as_any()
        .downcast_ref::<TimestampSecondArray>()
        .unwrap();
    assert_eq!(created.value(0), 1_700_000_000);

    let metadata = batch.column(5).as_any().downcast_ref::<StringArray>().unwrap();
    assert_eq!(metadata.value(0), r#"{"order":"o_1"}"#);
}

#[test]
fn test_rows_to_batch_nulls_and_missing_columns() {
    let schema = table_schema(&charges(), None);
    let mut sparse = Row::default();
    sparse.push("id", json!("ch_3"));
    sparse.push("created", json!(null));

    let batch = rows_to_batch(&[sparse], &schema).unwrap();
    assert_eq!(batch.num_rows(), 1);
    assert!(batch.column(1).is_null(0));
    assert!(batch.column(4).is_null(0));
    assert!(batch.column(5).is_null(0));
}

#[test]
fn test_rows_to_batch_empty() {
    let schema = table_schema(&charges(), None);
    let batch = rows_to_batch(&[], &schema).unwrap();
    assert_eq!(batch.num_rows(), 0);
    assert_eq!(batch.num_columns(), 6);
}

// ============================================================================
// Parquet Writer Tests
// ============================================================================

#[test]
fn test_parquet_writer_config_default() {
    let config = ParquetWriterConfig::default();
    assert_eq!(config.row_group_size(), 1024 * 1024);
    assert_eq!(config.batch_size(), DEFAULT_BATCH_SIZE);
}

#[test]
fn test_parquet_writer_config_builder() {
    let config = ParquetWriterConfig::new()
        .with_row_group_size(1000)
        .with_batch_size(0)
        .zstd();
    assert_eq!(config.row_group_size(), 1000);
    assert_eq!(config.batch_size(), 1);
}

#[test]
fn test_parquet_writer_flushes_in_batches() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("charges.parquet");
    let schema = table_schema(&charges(), None);
    let config = ParquetWriterConfig::new().with_batch_size(2).uncompressed();

    let mut writer = ParquetWriter::new(&path, schema, &config).unwrap();
    writer.push(row("ch_1", 1, true)).unwrap();
    assert_eq!(writer.rows_written(), 0);
    writer.push(row("ch_2", 2, true)).unwrap();
    assert_eq!(writer.rows_written(), 2);
    writer.push(row("ch_3", 3, false)).unwrap();

    assert_eq!(writer.close().unwrap(), 3);

    let reader = ParquetRecordBatchReaderBuilder::try_new(File::open(&path).unwrap())
        .unwrap()
        .build()
        .unwrap();
    let total: usize = reader.map(|batch| batch.unwrap().num_rows()).sum();
    assert_eq!(total, 3);
}

#[test]
fn test_write_rows_to_parquet_round_trip_schema() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("one.parquet");
    let wanted = vec!["id".to_string(), "created".to_string()];
    let schema = table_schema(&charges(), Some(&wanted));

    let rows = write_rows_to_parquet(&path, schema, vec![row("ch_1", 1, true)], None).unwrap();
    assert_eq!(rows, 1);

    let builder = ParquetRecordBatchReaderBuilder::try_new(File::open(&path).unwrap()).unwrap();
    let read_schema = builder.schema().clone();
    assert_eq!(read_schema.fields().len(), 2);
    assert_eq!(
        read_schema.field(1).data_type(),
        &DataType::Timestamp(TimeUnit::Second, Some("UTC".into()))
    );
}

#[test]
fn test_write_no_rows_creates_empty_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.parquet");
    let schema = table_schema(&charges(), None);

    let rows = write_rows_to_parquet(&path, schema, Vec::new(), None).unwrap();
    assert_eq!(rows, 0);
    assert!(path.exists());
}
