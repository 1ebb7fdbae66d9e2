//! Generic qual → list parameter builder

use super::types::{KeyColumn, Operator, Qual, ValueKind};
use crate::types::QueryPairs;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use tracing::trace;

// ============================================================================
// Range Query
// ============================================================================

/// Stripe's `{gt, gte, lt, lte}` range object, in unix seconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RangeQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gt: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gte: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lt: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lte: Option<i64>,
}

impl RangeQuery {
    /// No bound set
    pub fn is_empty(&self) -> bool {
        self.gt.is_none() && self.gte.is_none() && self.lt.is_none() && self.lte.is_none()
    }

    /// Set the bound for a range operator; `=` and `<>` are not range bounds
    pub fn set(&mut self, operator: Operator, secs: i64) {
        match operator {
            Operator::Gt => self.gt = Some(secs),
            Operator::Ge => self.gte = Some(secs),
            Operator::Lt => self.lt = Some(secs),
            Operator::Le => self.lte = Some(secs),
            Operator::Eq | Operator::Ne => {}
        }
    }

    /// Bound currently set for a range operator
    pub fn bound(&self, operator: Operator) -> Option<i64> {
        match operator {
            Operator::Gt => self.gt,
            Operator::Ge => self.gte,
            Operator::Lt => self.lt,
            Operator::Le => self.lte,
            Operator::Eq | Operator::Ne => None,
        }
    }

    fn append_pairs(&self, param: &str, pairs: &mut QueryPairs) {
        let bounds = [
            ("gt", self.gt),
            ("gte", self.gte),
            ("lt", self.lt),
            ("lte", self.lte),
        ];
        for (suffix, bound) in bounds {
            if let Some(secs) = bound {
                pairs.push((format!("{param}[{suffix}]"), secs.to_string()));
            }
        }
    }
}

/// Filter on one timestamp parameter
///
/// The exact value and the range are kept apart: Stripe accepts one or the
/// other for a parameter, never both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RangeFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exact: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<RangeQuery>,
}

// ============================================================================
// List Filters
// ============================================================================

/// Native filter parameters for one list call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListFilters {
    /// Single-value parameters (`customer=cus_123`, `active=true`)
    pub equals: BTreeMap<String, String>,
    /// Timestamp parameters (`created[gte]=...`)
    pub ranges: BTreeMap<String, RangeFilter>,
}

impl ListFilters {
    /// Nothing to send
    pub fn is_empty(&self) -> bool {
        self.equals.is_empty() && self.ranges.is_empty()
    }

    /// Value of a single-value parameter
    pub fn equal(&self, param: &str) -> Option<&str> {
        self.equals.get(param).map(String::as_str)
    }

    /// Filter on a timestamp parameter
    pub fn range(&self, param: &str) -> Option<&RangeFilter> {
        self.ranges.get(param)
    }

    /// Encode as Stripe form-style query pairs
    ///
    /// When a timestamp parameter has both an exact value and a range, only
    /// the exact value is sent.
    pub fn to_query_pairs(&self) -> QueryPairs {
        let mut pairs: QueryPairs = self
            .equals
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        for (param, filter) in &self.ranges {
            if let Some(exact) = filter.exact {
                pairs.push((param.clone(), exact.to_string()));
            } else if let Some(range) = &filter.range {
                range.append_pairs(param, &mut pairs);
            }
        }
        pairs
    }
}

impl fmt::Display for ListFilters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs = self.to_query_pairs();
        for (i, (key, value)) in pairs.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(f, "{key}={value}")?;
        }
        Ok(())
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Accumulates quals into [`ListFilters`] for a table's key columns
#[derive(Debug)]
pub struct FilterBuilder<'a> {
    key_columns: &'a [KeyColumn],
    filters: ListFilters,
    exact: bool,
}

impl<'a> FilterBuilder<'a> {
    /// Builder for the given key columns
    pub fn new(key_columns: &'a [KeyColumn]) -> Self {
        Self {
            key_columns,
            filters: ListFilters::default(),
            exact: true,
        }
    }

    /// Push one qual down, returning whether the API can express it
    ///
    /// A later qual on the same parameter overwrites an earlier one; the
    /// builder then stops being [exact](Self::is_exact).
    pub fn apply(&mut self, qual: &Qual) -> bool {
        let pushed = self.push(qual);
        if !pushed {
            self.exact = false;
        }
        pushed
    }

    fn push(&mut self, qual: &Qual) -> bool {
        let Some(key) = self.key_columns.iter().find(|k| k.name == qual.column) else {
            trace!(column = %qual.column, "not a key column, left to the host");
            return false;
        };
        if !key.supports(qual.operator) {
            trace!(qual = %qual, "operator not supported by the API");
            return false;
        }

        match key.kind {
            ValueKind::String => {
                self.set_equal(key.param, qual.value.to_param_string());
            }
            ValueKind::Bool => {
                let Some(value) = qual.value.as_bool() else {
                    return false;
                };
                // no native not-equal: send the complement
                let value = if qual.operator == Operator::Ne {
                    !value
                } else {
                    value
                };
                self.set_equal(key.param, value.to_string());
            }
            ValueKind::Timestamp => {
                let Some(secs) = qual.value.as_unix_seconds() else {
                    return false;
                };
                let filter = self.filters.ranges.entry(key.param.to_string()).or_default();
                let conflict = if qual.operator == Operator::Eq {
                    let conflict = filter.exact.is_some_and(|prev| prev != secs)
                        || filter.range.is_some();
                    filter.exact = Some(secs);
                    conflict
                } else {
                    let range = filter.range.get_or_insert_with(RangeQuery::default);
                    let conflict = filter.exact.is_some()
                        || range.bound(qual.operator).is_some_and(|prev| prev != secs);
                    range.set(qual.operator, secs);
                    conflict
                };
                if conflict {
                    trace!(qual = %qual, "overlaps another qual on the same parameter");
                    self.exact = false;
                }
            }
        }
        true
    }

    fn set_equal(&mut self, param: &str, value: String) {
        if self.filters.equals.get(param).is_some_and(|prev| *prev != value) {
            self.exact = false;
        }
        self.filters.equals.insert(param.to_string(), value);
    }

    /// Whether the filters select exactly the rows the applied quals do
    ///
    /// False once a qual was skipped or overwritten by a later one.
    pub fn is_exact(&self) -> bool {
        self.exact
    }

    /// Finish building
    pub fn build(self) -> ListFilters {
        self.filters
    }
}

/// Translate a qual set against a table's key columns
pub fn translate(key_columns: &[KeyColumn], quals: &[Qual]) -> ListFilters {
    pushdown(key_columns, quals).filters
}

/// Result of pushing a qual set down to the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pushdown {
    /// Parameters to send
    pub filters: ListFilters,
    /// Whether the API alone selects exactly the matching rows
    pub exact: bool,
}

/// Translate a qual set, reporting whether the rows still need filtering
pub fn pushdown(key_columns: &[KeyColumn], quals: &[Qual]) -> Pushdown {
    let mut builder = FilterBuilder::new(key_columns);
    for qual in quals {
        builder.apply(qual);
    }
    let exact = builder.is_exact();
    Pushdown {
        filters: builder.build(),
        exact,
    }
}
