//! Table rows to Arrow
//!
//! Arrow schemas come from the table definition, not from the data, so
//! every batch of a table shares one schema even when a page holds only
//! nulls for some column.

use crate::error::{Error, Result};
use crate::plugin::{Row, TableDef};
use crate::types::{ColumnType, JsonValue};
use arrow::array::{
    ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray, TimestampSecondArray,
};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef, TimeUnit};
use arrow::record_batch::RecordBatch;
use chrono::DateTime;
use std::sync::Arc;

/// Arrow type for a column type
///
/// JSON columns are stored as their serialized text.
pub fn arrow_type(column_type: ColumnType) -> DataType {
    match column_type {
        ColumnType::String | ColumnType::Json => DataType::Utf8,
        ColumnType::Int => DataType::Int64,
        ColumnType::Double => DataType::Float64,
        ColumnType::Bool => DataType::Boolean,
        ColumnType::Timestamp => DataType::Timestamp(TimeUnit::Second, Some("UTC".into())),
    }
}

/// Arrow schema for a table, optionally restricted to some columns
///
/// Columns keep table order; unknown names are ignored.
pub fn table_schema(table: &TableDef, columns: Option<&[String]>) -> SchemaRef {
    let fields: Vec<Field> = table
        .columns
        .iter()
        .filter(|c| columns.map_or(true, |wanted| wanted.iter().any(|w| w == c.name)))
        .map(|c| Field::new(c.name, arrow_type(c.column_type), true))
        .collect();
    Arc::new(Schema::new(fields))
}

/// Convert rows to a RecordBatch with the given schema
///
/// A column missing from a row is null.
pub fn rows_to_batch(rows: &[Row], schema: &SchemaRef) -> Result<RecordBatch> {
    if rows.is_empty() {
        return Ok(RecordBatch::new_empty(Arc::clone(schema)));
    }

    let columns = schema
        .fields()
        .iter()
        .map(|field| {
            let values: Vec<Option<&JsonValue>> = rows
                .iter()
                .map(|row| row.get(field.name()).filter(|v| !v.is_null()))
                .collect();
            build_array(&values, field.data_type())
        })
        .collect::<Result<Vec<_>>>()?;

    RecordBatch::try_new(Arc::clone(schema), columns).map_err(|e| Error::Output {
        message: format!("Failed to create RecordBatch: {e}"),
    })
}

fn build_array(values: &[Option<&JsonValue>], data_type: &DataType) -> Result<ArrayRef> {
    let array: ArrayRef = match data_type {
        DataType::Utf8 => Arc::new(
            values
                .iter()
                .map(|v| {
                    v.map(|v| match v {
                        JsonValue::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                })
                .collect::<StringArray>(),
        ),
        DataType::Int64 => Arc::new(
            values
                .iter()
                .map(|v| v.and_then(JsonValue::as_i64))
                .collect::<Int64Array>(),
        ),
        DataType::Float64 => Arc::new(
            values
                .iter()
                .map(|v| v.and_then(JsonValue::as_f64))
                .collect::<Float64Array>(),
        ),
        DataType::Boolean => Arc::new(
            values
                .iter()
                .map(|v| v.and_then(JsonValue::as_bool))
                .collect::<BooleanArray>(),
        ),
        DataType::Timestamp(TimeUnit::Second, tz) => Arc::new(
            values
                .iter()
                .map(|v| v.and_then(timestamp_seconds))
                .collect::<TimestampSecondArray>()
                .with_timezone_opt(tz.clone()),
        ),
        other => {
            return Err(Error::output(format!("Unsupported column type: {other}")));
        }
    };
    Ok(array)
}

/// Seconds from an RFC 3339 string or a unix number
fn timestamp_seconds(value: &JsonValue) -> Option<i64> {
    match value {
        JsonValue::Number(n) => n.as_i64(),
        JsonValue::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|ts| ts.timestamp()),
        _ => None,
    }
}
