//! Qual and key column types

use crate::error::{Error, Result};
use crate::types::{ColumnType, JsonValue};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Operator
// ============================================================================

/// Comparison operator of a qual
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "<>", alias = "!=")]
    Ne,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
}

impl Operator {
    /// Operators usable on a timestamp range column
    pub const RANGE: &'static [Operator] = &[
        Operator::Gt,
        Operator::Ge,
        Operator::Eq,
        Operator::Lt,
        Operator::Le,
    ];

    /// SQL spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Ne => "<>",
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::Lt => "<",
            Operator::Le => "<=",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "=" => Ok(Operator::Eq),
            "<>" | "!=" => Ok(Operator::Ne),
            ">" => Ok(Operator::Gt),
            ">=" => Ok(Operator::Ge),
            "<" => Ok(Operator::Lt),
            "<=" => Ok(Operator::Le),
            other => Err(Error::invalid_qual(format!("unknown operator '{other}'"))),
        }
    }
}

// ============================================================================
// Qual Value
// ============================================================================

/// Value side of a qual
#[derive(Debug, Clone, PartialEq)]
pub enum QualValue {
    String(String),
    Bool(bool),
    Int(i64),
    Double(f64),
    Timestamp(DateTime<Utc>),
}

impl QualValue {
    /// String form of scalar values
    pub fn to_param_string(&self) -> String {
        match self {
            QualValue::String(s) => s.clone(),
            QualValue::Bool(b) => b.to_string(),
            QualValue::Int(i) => i.to_string(),
            QualValue::Double(d) => d.to_string(),
            QualValue::Timestamp(ts) => ts.timestamp().to_string(),
        }
    }

    /// Boolean value, if this is one
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            QualValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Unix seconds for timestamp-like values
    pub fn as_unix_seconds(&self) -> Option<i64> {
        match self {
            QualValue::Timestamp(ts) => Some(ts.timestamp()),
            QualValue::Int(secs) => Some(*secs),
            _ => None,
        }
    }

    /// Parse a textual value for a column of the given type
    pub fn parse(raw: &str, column_type: ColumnType) -> Result<Self> {
        let raw = unquote(raw.trim());
        match column_type {
            ColumnType::String | ColumnType::Json => Ok(QualValue::String(raw.to_string())),
            ColumnType::Bool => match raw.to_ascii_lowercase().as_str() {
                "true" | "t" | "1" => Ok(QualValue::Bool(true)),
                "false" | "f" | "0" => Ok(QualValue::Bool(false)),
                _ => Err(Error::invalid_qual(format!("'{raw}' is not a boolean"))),
            },
            ColumnType::Int => raw
                .parse()
                .map(QualValue::Int)
                .map_err(|_| Error::invalid_qual(format!("'{raw}' is not an integer"))),
            ColumnType::Double => raw
                .parse()
                .map(QualValue::Double)
                .map_err(|_| Error::invalid_qual(format!("'{raw}' is not a number"))),
            ColumnType::Timestamp => parse_timestamp(raw).map(QualValue::Timestamp),
        }
    }

    /// Convert a JSON value sent by the host for a column of the given type
    pub fn from_json(value: &JsonValue, column_type: ColumnType) -> Result<Self> {
        match (value, column_type) {
            (JsonValue::String(s), _) => Self::parse(s, column_type),
            (JsonValue::Bool(b), ColumnType::Bool) => Ok(QualValue::Bool(*b)),
            (JsonValue::Number(n), ColumnType::Timestamp) => n
                .as_i64()
                .and_then(|secs| DateTime::from_timestamp(secs, 0))
                .map(QualValue::Timestamp)
                .ok_or_else(|| Error::invalid_qual(format!("{n} is not a unix timestamp"))),
            (JsonValue::Number(n), ColumnType::Int) => n
                .as_i64()
                .map(QualValue::Int)
                .ok_or_else(|| Error::invalid_qual(format!("{n} is not an integer"))),
            (JsonValue::Number(n), ColumnType::Double) => n
                .as_f64()
                .map(QualValue::Double)
                .ok_or_else(|| Error::invalid_qual(format!("{n} is not a number"))),
            (JsonValue::Number(n), ColumnType::String) => Ok(QualValue::String(n.to_string())),
            (other, ty) => Err(Error::invalid_qual(format!(
                "{other} is not a valid {ty} value"
            ))),
        }
    }
}

impl QualValue {
    /// Order a row value against this value
    ///
    /// Row timestamps are RFC 3339 strings. `None` when the two cannot be
    /// compared.
    pub fn compare(&self, value: &JsonValue) -> Option<Ordering> {
        match (self, value) {
            (QualValue::String(s), JsonValue::String(v)) => Some(v.as_str().cmp(s)),
            (QualValue::Bool(b), JsonValue::Bool(v)) => Some(v.cmp(b)),
            (QualValue::Int(i), JsonValue::Number(n)) => match n.as_i64() {
                Some(v) => Some(v.cmp(i)),
                None => n.as_f64()?.partial_cmp(&(*i as f64)),
            },
            (QualValue::Double(d), JsonValue::Number(n)) => n.as_f64()?.partial_cmp(d),
            (QualValue::Timestamp(ts), JsonValue::Number(n)) => {
                Some(n.as_i64()?.cmp(&ts.timestamp()))
            }
            (QualValue::Timestamp(_) | QualValue::Int(_), JsonValue::String(v)) => {
                let secs = DateTime::parse_from_rfc3339(v).ok()?.timestamp();
                Some(secs.cmp(&self.as_unix_seconds()?))
            }
            _ => None,
        }
    }
}

fn unquote(raw: &str) -> &str {
    for quote in ['\'', '"'] {
        if raw.len() >= 2 && raw.starts_with(quote) && raw.ends_with(quote) {
            return &raw[1..raw.len() - 1];
        }
    }
    raw
}

/// Accepts unix seconds, RFC 3339, `YYYY-MM-DD HH:MM:SS` (UTC) or `YYYY-MM-DD`
fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(secs) = raw.parse::<i64>() {
        return DateTime::from_timestamp(secs, 0)
            .ok_or_else(|| Error::invalid_qual(format!("{secs} is out of range")));
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Ok(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| Error::invalid_qual(format!("'{raw}' is not a timestamp")))
}

// ============================================================================
// Qual
// ============================================================================

/// A host-supplied filter condition
#[derive(Debug, Clone, PartialEq)]
pub struct Qual {
    /// Column the condition applies to
    pub column: String,
    /// Comparison operator
    pub operator: Operator,
    /// Compared value
    pub value: QualValue,
}

impl Qual {
    /// Create a qual
    pub fn new(column: impl Into<String>, operator: Operator, value: QualValue) -> Self {
        Self {
            column: column.into(),
            operator,
            value,
        }
    }

    /// `column = 'value'`
    pub fn eq_str(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(column, Operator::Eq, QualValue::String(value.into()))
    }

    /// `column <op> bool`
    pub fn bool(column: impl Into<String>, operator: Operator, value: bool) -> Self {
        Self::new(column, operator, QualValue::Bool(value))
    }

    /// `column <op> timestamp`, from unix seconds
    pub fn timestamp(column: impl Into<String>, operator: Operator, secs: i64) -> Self {
        let value = DateTime::from_timestamp(secs, 0)
            .map_or(QualValue::Int(secs), QualValue::Timestamp);
        Self::new(column, operator, value)
    }
}

impl Qual {
    /// Whether a row value satisfies the condition
    ///
    /// Null or incomparable values never match.
    pub fn matches(&self, value: Option<&JsonValue>) -> bool {
        let Some(ordering) = value.and_then(|v| self.value.compare(v)) else {
            return false;
        };
        match self.operator {
            Operator::Eq => ordering == Ordering::Equal,
            Operator::Ne => ordering != Ordering::Equal,
            Operator::Gt => ordering == Ordering::Greater,
            Operator::Ge => ordering != Ordering::Less,
            Operator::Lt => ordering == Ordering::Less,
            Operator::Le => ordering != Ordering::Greater,
        }
    }
}

impl fmt::Display for Qual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.column,
            self.operator,
            self.value.to_param_string()
        )
    }
}

static QUAL_EXPR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([A-Za-z_][A-Za-z0-9_]*)\s*(>=|<=|<>|!=|=|>|<)\s*(.*?)\s*$")
        .expect("qual expression regex is valid")
});

/// Split `column op value` into its parts
pub fn parse_qual_expr(expr: &str) -> Result<(String, Operator, String)> {
    let caps = QUAL_EXPR
        .captures(expr)
        .ok_or_else(|| Error::invalid_qual(format!("cannot parse '{expr}'")))?;
    let value = caps[3].to_string();
    if value.is_empty() {
        return Err(Error::invalid_qual(format!("missing value in '{expr}'")));
    }
    Ok((caps[1].to_string(), caps[2].parse()?, value))
}

// ============================================================================
// Key Columns
// ============================================================================

/// How the API expects a key column's value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    String,
    Bool,
    Timestamp,
}

/// Whether a list call needs the key column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Requirement {
    #[default]
    Optional,
    Required,
}

/// A column whose quals can be pushed down to the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyColumn {
    /// Table column name
    pub name: &'static str,
    /// Stripe list parameter name
    pub param: &'static str,
    /// Value kind
    pub kind: ValueKind,
    /// Operators the API can express
    pub operators: &'static [Operator],
    /// Whether the column must be supplied
    pub require: Requirement,
}

impl KeyColumn {
    /// Equality-only string column
    pub const fn string(name: &'static str) -> Self {
        Self {
            name,
            param: name,
            kind: ValueKind::String,
            operators: &[Operator::Eq],
            require: Requirement::Optional,
        }
    }

    /// Boolean column (`=` and `<>`)
    pub const fn bool(name: &'static str) -> Self {
        Self {
            name,
            param: name,
            kind: ValueKind::Bool,
            operators: &[Operator::Eq, Operator::Ne],
            require: Requirement::Optional,
        }
    }

    /// Timestamp column with range support
    pub const fn timestamp(name: &'static str) -> Self {
        Self {
            name,
            param: name,
            kind: ValueKind::Timestamp,
            operators: Operator::RANGE,
            require: Requirement::Optional,
        }
    }

    /// Send under a different API parameter name
    #[must_use]
    pub const fn param(self, param: &'static str) -> Self {
        Self { param, ..self }
    }

    /// Mark the column as required
    #[must_use]
    pub const fn required(self) -> Self {
        Self {
            require: Requirement::Required,
            ..self
        }
    }

    /// Whether the operator can be pushed down
    pub fn supports(&self, operator: Operator) -> bool {
        self.operators.contains(&operator)
    }

    /// Whether the column must be supplied
    pub fn is_required(&self) -> bool {
        self.require == Requirement::Required
    }
}
