//! Table, column and row types

use super::hydrate::Hydrate;
use crate::error::{Error, Result};
use crate::filter::{parse_qual_expr, KeyColumn, Operator, Qual, QualValue, Requirement};
use crate::stripe::StripeClient;
use crate::types::{ColumnType, JsonValue};
use chrono::{DateTime, SecondsFormat};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

// ============================================================================
// Columns
// ============================================================================

/// Where a column's value comes from
#[derive(Clone)]
pub enum ColumnSource {
    /// Dotted path into the API object (`billing_details.email`)
    Field(&'static str),
    /// Computed per row, possibly with extra API calls
    Hydrate(Arc<dyn Hydrate>),
}

impl fmt::Debug for ColumnSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(path) => f.debug_tuple("Field").field(path).finish(),
            Self::Hydrate(h) => f.debug_tuple("Hydrate").field(&h.name()).finish(),
        }
    }
}

/// A table column
#[derive(Debug, Clone)]
pub struct Column {
    /// Column name
    pub name: &'static str,
    /// Value type
    pub column_type: ColumnType,
    /// Human description
    pub description: &'static str,
    source: ColumnSource,
}

impl Column {
    fn new(name: &'static str, column_type: ColumnType, description: &'static str) -> Self {
        Self {
            name,
            column_type,
            description,
            source: ColumnSource::Field(name),
        }
    }

    pub fn string(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ColumnType::String, description)
    }

    pub fn int(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ColumnType::Int, description)
    }

    pub fn double(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ColumnType::Double, description)
    }

    pub fn bool(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ColumnType::Bool, description)
    }

    pub fn timestamp(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ColumnType::Timestamp, description)
    }

    pub fn json(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ColumnType::Json, description)
    }

    /// Read the value from another field of the API object
    #[must_use]
    pub fn from_field(mut self, path: &'static str) -> Self {
        self.source = ColumnSource::Field(path);
        self
    }

    /// Compute the value with a hydrate function
    #[must_use]
    pub fn hydrated(mut self, hydrate: impl Hydrate + 'static) -> Self {
        self.source = ColumnSource::Hydrate(Arc::new(hydrate));
        self
    }

    /// Value source
    pub fn source(&self) -> &ColumnSource {
        &self.source
    }

    /// Whether the value needs a hydrate call
    pub fn is_hydrated(&self) -> bool {
        matches!(self.source, ColumnSource::Hydrate(_))
    }

    /// Produce the column value for an API object
    pub async fn value(&self, client: &StripeClient, item: &JsonValue) -> Result<JsonValue> {
        match &self.source {
            ColumnSource::Field(path) => Ok(self.convert(lookup(item, path))),
            ColumnSource::Hydrate(hydrate) => {
                let value = hydrate.hydrate(client, item).await?;
                Ok(self.convert(Some(&value)))
            }
        }
    }

    /// Convert a raw API value to this column's type
    ///
    /// Zero timestamps and empty strings become null. String columns take
    /// the `id` of an expanded object.
    pub fn convert(&self, value: Option<&JsonValue>) -> JsonValue {
        let Some(value) = value else {
            return JsonValue::Null;
        };
        match self.column_type {
            ColumnType::Json => value.clone(),
            ColumnType::String => match value {
                JsonValue::String(s) if s.is_empty() => JsonValue::Null,
                JsonValue::String(_) => value.clone(),
                JsonValue::Object(map) => map.get("id").cloned().unwrap_or(JsonValue::Null),
                JsonValue::Null => JsonValue::Null,
                other => JsonValue::String(other.to_string()),
            },
            ColumnType::Int => match value {
                JsonValue::Number(n) => n.as_i64().map_or(JsonValue::Null, JsonValue::from),
                JsonValue::String(s) => s.parse::<i64>().map_or(JsonValue::Null, JsonValue::from),
                _ => JsonValue::Null,
            },
            ColumnType::Double => match value {
                JsonValue::Number(n) => n.as_f64().map_or(JsonValue::Null, JsonValue::from),
                JsonValue::String(s) => s.parse::<f64>().map_or(JsonValue::Null, JsonValue::from),
                _ => JsonValue::Null,
            },
            ColumnType::Bool => match value {
                JsonValue::Bool(_) => value.clone(),
                _ => JsonValue::Null,
            },
            ColumnType::Timestamp => match value {
                JsonValue::Number(n) => n
                    .as_i64()
                    .filter(|secs| *secs != 0)
                    .and_then(|secs| DateTime::from_timestamp(secs, 0))
                    .map_or(JsonValue::Null, |ts| {
                        JsonValue::String(ts.to_rfc3339_opts(SecondsFormat::Secs, true))
                    }),
                JsonValue::String(s) if !s.is_empty() => value.clone(),
                _ => JsonValue::Null,
            },
        }
    }
}

/// Follow a dotted path through nested objects
pub fn lookup<'a>(item: &'a JsonValue, path: &str) -> Option<&'a JsonValue> {
    path.split('.').try_fold(item, |current, part| current.get(part))
}

// ============================================================================
// Tables
// ============================================================================

/// How a table lists its objects
#[derive(Debug, Clone, Copy)]
pub enum ListConfig {
    /// Paginated list endpoint
    Paginated {
        path: &'static str,
        expand: &'static [&'static str],
    },
    /// Single object endpoint, listed as one row
    Singleton { path: &'static str },
}

impl ListConfig {
    /// API path
    pub fn path(&self) -> &'static str {
        match self {
            Self::Paginated { path, .. } | Self::Singleton { path } => path,
        }
    }
}

/// How a table retrieves one object by `id`
#[derive(Debug, Clone, Copy)]
pub struct GetConfig {
    pub path: &'static str,
    pub expand: &'static [&'static str],
}

/// Declarative description of one table
#[derive(Debug, Clone)]
pub struct TableDef {
    /// Table name (`stripe_charge`)
    pub name: &'static str,
    /// Human description
    pub description: &'static str,
    /// List behavior
    pub list: ListConfig,
    /// Columns the API can filter on
    pub key_columns: Vec<KeyColumn>,
    /// Get-by-id behavior, if supported
    pub get: Option<GetConfig>,
    /// Row schema
    pub columns: Vec<Column>,
}

impl TableDef {
    /// Look up a column
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Fail when a required key column has no usable qual
    pub fn check_required(&self, quals: &[Qual]) -> Result<()> {
        for key in self.key_columns.iter().filter(|k| k.is_required()) {
            let present = quals
                .iter()
                .any(|q| q.column == key.name && key.supports(q.operator));
            if !present {
                return Err(Error::MissingKeyColumn {
                    table: self.name.to_string(),
                    column: key.name.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Build a row from an API object
    ///
    /// With `wanted`, only those columns are produced and other hydrates are
    /// not called.
    pub async fn build_row(
        &self,
        client: &StripeClient,
        item: &JsonValue,
        wanted: Option<&[String]>,
    ) -> Result<Row> {
        let mut row = Row::with_capacity(self.columns.len());
        for column in &self.columns {
            if let Some(wanted) = wanted {
                if !wanted.iter().any(|w| w == column.name) {
                    continue;
                }
            }
            row.push(column.name, column.value(client, item).await?);
        }
        Ok(row)
    }

    /// Schema description for listings
    pub fn schema(&self) -> TableSchema {
        TableSchema {
            name: self.name,
            description: self.description,
            path: self.list.path(),
            get: self.get.is_some(),
            key_columns: self
                .key_columns
                .iter()
                .map(|k| KeyColumnSchema {
                    name: k.name,
                    operators: k.operators.iter().map(|op| op.as_str()).collect(),
                    require: k.require,
                })
                .collect(),
            columns: self
                .columns
                .iter()
                .map(|c| ColumnSchema {
                    name: c.name,
                    column_type: c.column_type,
                    description: c.description,
                })
                .collect(),
        }
    }
}

/// Serializable table description
#[derive(Debug, Clone, Serialize)]
pub struct TableSchema {
    pub name: &'static str,
    pub description: &'static str,
    pub path: &'static str,
    pub get: bool,
    pub key_columns: Vec<KeyColumnSchema>,
    pub columns: Vec<ColumnSchema>,
}

#[derive(Debug, Clone, Serialize)]
pub struct KeyColumnSchema {
    pub name: &'static str,
    pub operators: Vec<&'static str>,
    pub require: Requirement,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColumnSchema {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    pub description: &'static str,
}

// ============================================================================
// Query context and rows
// ============================================================================

/// What the host asks of one list or get call
#[derive(Debug, Clone, Default)]
pub struct QueryContext {
    /// Filter conditions
    pub quals: Vec<Qual>,
    /// Row limit
    pub limit: Option<u64>,
    /// Requested columns; all when absent
    pub columns: Option<Vec<String>>,
}

impl QueryContext {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn qual(mut self, qual: Qual) -> Self {
        self.quals.push(qual);
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Value of an `=` qual on a column
    pub fn equal(&self, column: &str) -> Option<String> {
        self.quals
            .iter()
            .rev()
            .find(|q| q.column == column && q.operator == Operator::Eq)
            .map(|q| q.value.to_param_string())
    }
}

/// Host request as received over the wire
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryRequest {
    /// `column op value` expressions
    #[serde(default, rename = "where")]
    pub filters: Vec<String>,
    /// Quals with typed JSON values
    #[serde(default)]
    pub quals: Vec<QualRequest>,
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub columns: Option<Vec<String>>,
}

/// A qual sent as structured JSON
#[derive(Debug, Clone, Deserialize)]
pub struct QualRequest {
    pub column: String,
    pub operator: Operator,
    pub value: JsonValue,
}

impl QueryRequest {
    /// Parse the `where` expressions against a table's column types
    ///
    /// Quals on columns that are not key columns are kept; translation
    /// ignores them.
    pub fn into_context(self, table: &TableDef) -> Result<QueryContext> {
        let column_type = |column: &str| {
            table.column(column).map(|c| c.column_type).ok_or_else(|| {
                Error::invalid_qual(format!("{} has no column '{column}'", table.name))
            })
        };

        let mut ctx = QueryContext {
            quals: Vec::with_capacity(self.filters.len() + self.quals.len()),
            limit: self.limit,
            columns: self.columns,
        };
        for expr in &self.filters {
            let (column, operator, raw) = parse_qual_expr(expr)?;
            let value = QualValue::parse(&raw, column_type(&column)?)?;
            ctx.quals.push(Qual::new(column, operator, value));
        }
        for qual in self.quals {
            let value = QualValue::from_json(&qual.value, column_type(&qual.column)?)?;
            ctx.quals.push(Qual::new(qual.column, qual.operator, value));
        }
        Ok(ctx)
    }
}

/// One output row, columns in table order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    values: Vec<(&'static str, JsonValue)>,
}

impl Row {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, column: &'static str, value: JsonValue) {
        self.values.push((column, value));
    }

    /// Value of a column
    pub fn get(&self, column: &str) -> Option<&JsonValue> {
        self.values
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, value)| value)
    }

    /// Column names in order
    pub fn columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.values.iter().map(|(name, _)| *name)
    }

    /// Column/value pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &JsonValue)> {
        self.values.iter().map(|(name, value)| (*name, value))
    }

    /// Keep only the named columns
    pub fn retain_columns(&mut self, wanted: &[String]) {
        self.values.retain(|(name, _)| wanted.iter().any(|w| w == name));
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Convert to a JSON object
    pub fn into_json(self) -> JsonValue {
        JsonValue::Object(
            self.values
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        )
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
