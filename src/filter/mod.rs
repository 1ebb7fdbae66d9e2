//! Predicate translation
//!
//! Turns host-supplied quals (`column operator value`) into Stripe list
//! parameters. One generic builder serves every table: a table only declares
//! its [`KeyColumn`]s (column name, API parameter, value kind, operators) and
//! the builder does the rest.
//!
//! # Mapping
//!
//! | kind      | operators                | API parameters                     |
//! |-----------|--------------------------|------------------------------------|
//! | string    | `=`                      | `param=value`                      |
//! | bool      | `=`, `<>`                | `param=true` / negated for `<>`    |
//! | timestamp | `>`, `>=`, `=`, `<=`, `<`| `param[gt]`, ..., or exact `param` |
//!
//! Translation cannot fail. Quals the API cannot express are skipped and
//! [`pushdown`] reports the result as inexact; the rows must then be checked
//! against every qual with [`Qual::matches`].

mod builder;
mod types;

pub use builder::{
    pushdown, translate, FilterBuilder, ListFilters, Pushdown, RangeFilter, RangeQuery,
};
pub use types::{parse_qual_expr, KeyColumn, Operator, Qual, QualValue, Requirement, ValueKind};

#[cfg(test)]
mod tests;
