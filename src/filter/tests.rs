//! Tests for predicate translation

use super::*;
use crate::types::ColumnType;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

fn pairs(filters: &ListFilters) -> Vec<(String, String)> {
    filters.to_query_pairs()
}

fn pair(k: &str, v: &str) -> (String, String) {
    (k.to_string(), v.to_string())
}

const INVOICE_KEYS: &[KeyColumn] = &[
    KeyColumn::string("collection_method"),
    KeyColumn::timestamp("created"),
    KeyColumn::timestamp("due_date"),
    KeyColumn::string("status"),
    KeyColumn::string("subscription_id").param("subscription"),
];

const PRODUCT_KEYS: &[KeyColumn] = &[
    KeyColumn::bool("active"),
    KeyColumn::timestamp("created"),
    KeyColumn::bool("shippable"),
    KeyColumn::string("url"),
];

// ============================================================================
// Timestamp ranges
// ============================================================================

#[test_case(Operator::Gt, "created[gt]" ; "greater than")]
#[test_case(Operator::Ge, "created[gte]" ; "greater or equal")]
#[test_case(Operator::Lt, "created[lt]" ; "less than")]
#[test_case(Operator::Le, "created[lte]" ; "less or equal")]
#[test_case(Operator::Eq, "created" ; "exact")]
fn test_timestamp_operator_mapping(operator: Operator, key: &str) {
    let filters = translate(
        INVOICE_KEYS,
        &[Qual::timestamp("created", operator, 1_700_000_000)],
    );
    assert_eq!(pairs(&filters), vec![pair(key, "1700000000")]);
}

#[test]
fn test_closed_interval() {
    let filters = translate(
        INVOICE_KEYS,
        &[
            Qual::timestamp("created", Operator::Ge, 1_700_000_000),
            Qual::timestamp("created", Operator::Lt, 1_700_100_000),
        ],
    );

    let created = filters.range("created").unwrap();
    assert_eq!(created.exact, None);
    assert_eq!(
        created.range,
        Some(RangeQuery {
            gte: Some(1_700_000_000),
            lt: Some(1_700_100_000),
            ..RangeQuery::default()
        })
    );
    assert_eq!(
        pairs(&filters),
        vec![
            pair("created[gte]", "1700000000"),
            pair("created[lt]", "1700100000"),
        ]
    );
}

#[test]
fn test_exact_value_wins_over_range() {
    let filters = translate(
        INVOICE_KEYS,
        &[
            Qual::timestamp("due_date", Operator::Gt, 10),
            Qual::timestamp("due_date", Operator::Eq, 20),
        ],
    );

    let due = filters.range("due_date").unwrap();
    assert_eq!(due.exact, Some(20));
    assert_eq!(due.range.map(|r| r.gt), Some(Some(10)));
    assert_eq!(pairs(&filters), vec![pair("due_date", "20")]);
}

#[test]
fn test_ne_on_timestamp_is_skipped() {
    let mut builder = FilterBuilder::new(INVOICE_KEYS);
    assert!(!builder.apply(&Qual::timestamp("created", Operator::Ne, 5)));
    assert!(builder.build().is_empty());
}

#[test]
fn test_integer_value_accepted_as_unix_seconds() {
    let filters = translate(
        INVOICE_KEYS,
        &[Qual::new("created", Operator::Le, QualValue::Int(42))],
    );
    assert_eq!(pairs(&filters), vec![pair("created[lte]", "42")]);
}

// ============================================================================
// Strings and booleans
// ============================================================================

#[test]
fn test_string_equality_with_param_rename() {
    let filters = translate(
        INVOICE_KEYS,
        &[
            Qual::eq_str("status", "paid"),
            Qual::eq_str("subscription_id", "sub_123"),
        ],
    );
    assert_eq!(filters.equal("status"), Some("paid"));
    assert_eq!(filters.equal("subscription"), Some("sub_123"));
    assert_eq!(filters.equal("subscription_id"), None);
}

#[test]
fn test_string_non_equality_is_skipped() {
    let filters = translate(
        INVOICE_KEYS,
        &[Qual::new(
            "status",
            Operator::Ne,
            QualValue::String("void".into()),
        )],
    );
    assert!(filters.is_empty());
}

#[test_case(Operator::Eq, true, "true" ; "eq true")]
#[test_case(Operator::Eq, false, "false" ; "eq false")]
#[test_case(Operator::Ne, true, "false" ; "ne true negates")]
#[test_case(Operator::Ne, false, "true" ; "ne false negates")]
fn test_bool_mapping(operator: Operator, value: bool, expected: &str) {
    let filters = translate(PRODUCT_KEYS, &[Qual::bool("active", operator, value)]);
    assert_eq!(filters.equal("active"), Some(expected));
}

#[test]
fn test_bool_range_operator_is_skipped() {
    let filters = translate(PRODUCT_KEYS, &[Qual::bool("shippable", Operator::Gt, true)]);
    assert!(filters.is_empty());
}

// ============================================================================
// General behavior
// ============================================================================

#[test]
fn test_non_key_column_ignored() {
    let mut builder = FilterBuilder::new(PRODUCT_KEYS);
    assert!(!builder.apply(&Qual::eq_str("name", "Widget")));
    assert!(builder.apply(&Qual::eq_str("url", "https://example.com")));

    let filters = builder.build();
    assert_eq!(
        pairs(&filters),
        vec![pair("url", "https://example.com")]
    );
}

#[test]
fn test_last_write_wins() {
    let filters = translate(
        PRODUCT_KEYS,
        &[
            Qual::bool("active", Operator::Eq, true),
            Qual::bool("active", Operator::Eq, false),
            Qual::timestamp("created", Operator::Gt, 1),
            Qual::timestamp("created", Operator::Gt, 2),
        ],
    );
    assert_eq!(filters.equal("active"), Some("false"));
    assert_eq!(
        pairs(&filters),
        vec![pair("active", "false"), pair("created[gt]", "2")]
    );
}

#[test]
fn test_no_quals_is_empty() {
    let filters = translate(INVOICE_KEYS, &[]);
    assert!(filters.is_empty());
    assert_eq!(filters.to_string(), "");
}

#[test]
fn test_display_renders_query_string() {
    let filters = translate(
        INVOICE_KEYS,
        &[
            Qual::eq_str("status", "open"),
            Qual::timestamp("created", Operator::Ge, 100),
        ],
    );
    assert_eq!(filters.to_string(), "status=open&created[gte]=100");
}

#[test]
fn test_key_column_builders() {
    let key = KeyColumn::string("subscription_id")
        .param("subscription")
        .required();
    assert_eq!(key.name, "subscription_id");
    assert_eq!(key.param, "subscription");
    assert!(key.is_required());
    assert!(key.supports(Operator::Eq));
    assert!(!key.supports(Operator::Gt));

    assert!(KeyColumn::timestamp("created").supports(Operator::Le));
    assert!(KeyColumn::bool("active").supports(Operator::Ne));
}

// ============================================================================
// Parsing
// ============================================================================

#[test_case("status = 'paid'", "status", Operator::Eq, "'paid'" ; "quoted string")]
#[test_case("created>=1700000000", "created", Operator::Ge, "1700000000" ; "no spaces")]
#[test_case("active <> false", "active", Operator::Ne, "false" ; "not equal")]
#[test_case("active != true", "active", Operator::Ne, "true" ; "bang equal")]
#[test_case("  due_date < 2024-01-01  ", "due_date", Operator::Lt, "2024-01-01" ; "padded")]
fn test_parse_qual_expr(expr: &str, column: &str, operator: Operator, value: &str) {
    let (c, op, v) = parse_qual_expr(expr).unwrap();
    assert_eq!(c, column);
    assert_eq!(op, operator);
    assert_eq!(v, value);
}

#[test_case("status" ; "no operator")]
#[test_case("status =" ; "no value")]
#[test_case("= paid" ; "no column")]
fn test_parse_qual_expr_rejects(expr: &str) {
    assert!(parse_qual_expr(expr).is_err());
}

#[test]
fn test_parse_values() {
    assert_eq!(
        QualValue::parse("'paid'", ColumnType::String).unwrap(),
        QualValue::String("paid".into())
    );
    assert_eq!(
        QualValue::parse("t", ColumnType::Bool).unwrap(),
        QualValue::Bool(true)
    );
    assert_eq!(
        QualValue::parse("42", ColumnType::Int).unwrap(),
        QualValue::Int(42)
    );
    assert!(QualValue::parse("maybe", ColumnType::Bool).is_err());
    assert!(QualValue::parse("abc", ColumnType::Int).is_err());
}

#[test_case("1700000000" ; "unix seconds")]
#[test_case("2023-11-14T22:13:20Z" ; "rfc3339")]
#[test_case("2023-11-14 22:13:20" ; "sql datetime")]
fn test_parse_timestamp_formats(raw: &str) {
    let value = QualValue::parse(raw, ColumnType::Timestamp).unwrap();
    assert_eq!(value.as_unix_seconds(), Some(1_700_000_000));
}

#[test]
fn test_parse_date_only() {
    let value = QualValue::parse("2024-01-01", ColumnType::Timestamp).unwrap();
    assert_eq!(value.as_unix_seconds(), Some(1_704_067_200));
}

#[test]
fn test_from_json() {
    let value = QualValue::from_json(&json!(1_700_000_000), ColumnType::Timestamp)
        .unwrap();
    assert_eq!(value.as_unix_seconds(), Some(1_700_000_000));

    let value = QualValue::from_json(&json!(true), ColumnType::Bool).unwrap();
    assert_eq!(value, QualValue::Bool(true));

    assert!(QualValue::from_json(&json!([1]), ColumnType::String).is_err());
}

#[test]
fn test_operator_round_trip_through_str() {
    for op in [
        Operator::Eq,
        Operator::Ne,
        Operator::Gt,
        Operator::Ge,
        Operator::Lt,
        Operator::Le,
    ] {
        assert_eq!(op.as_str().parse::<Operator>().unwrap(), op);
    }
    assert!("~".parse::<Operator>().is_err());
}

// ============================================================================
// Exactness
// ============================================================================

#[test]
fn test_pushdown_exact_when_every_qual_is_sent() {
    let result = pushdown(
        INVOICE_KEYS,
        &[
            Qual::eq_str("status", "open"),
            Qual::timestamp("created", Operator::Ge, 10),
            Qual::timestamp("created", Operator::Lt, 20),
        ],
    );
    assert!(result.exact);
    assert_eq!(result.filters.to_string(), "status=open&created[gte]=10&created[lt]=20");
}

#[test_case(&[Qual::eq_str("number", "INV-1")] ; "non key column")]
#[test_case(&[Qual::new("status", Operator::Ne, QualValue::String("void".into()))] ; "unsupported operator")]
#[test_case(&[Qual::timestamp("created", Operator::Eq, 20), Qual::timestamp("created", Operator::Gt, 10)] ; "range after exact")]
#[test_case(&[Qual::timestamp("created", Operator::Gt, 10), Qual::timestamp("created", Operator::Eq, 20)] ; "exact after range")]
#[test_case(&[Qual::timestamp("created", Operator::Gt, 1), Qual::timestamp("created", Operator::Gt, 2)] ; "bound overwritten")]
#[test_case(&[Qual::eq_str("status", "open"), Qual::eq_str("status", "paid")] ; "equal overwritten")]
fn test_pushdown_inexact(quals: &[Qual]) {
    assert!(!pushdown(INVOICE_KEYS, quals).exact);
}

#[test]
fn test_repeated_identical_qual_stays_exact() {
    let quals = [Qual::eq_str("status", "open"), Qual::eq_str("status", "open")];
    assert!(pushdown(INVOICE_KEYS, &quals).exact);
}

// ============================================================================
// Row matching
// ============================================================================

#[test_case(Operator::Gt, 100.0, false ; "gt above value")]
#[test_case(Operator::Lt, 100.0, true ; "lt above value")]
#[test_case(Operator::Eq, 12.5, true ; "eq same value")]
#[test_case(Operator::Ne, 12.5, false ; "ne same value")]
#[test_case(Operator::Ge, 12.5, true ; "ge same value")]
#[test_case(Operator::Le, 12.0, false ; "le below value")]
fn test_matches_double(operator: Operator, bound: f64, expected: bool) {
    let qual = Qual::new("price", operator, QualValue::Double(bound));
    assert_eq!(qual.matches(Some(&json!(12.5))), expected);
}

#[test]
fn test_matches_timestamp_against_rfc3339() {
    let row_value = json!("2023-11-14T22:13:20Z");
    assert!(Qual::timestamp("created", Operator::Eq, 1_700_000_000).matches(Some(&row_value)));
    assert!(Qual::timestamp("created", Operator::Gt, 1_699_999_999).matches(Some(&row_value)));
    assert!(!Qual::timestamp("created", Operator::Lt, 1_700_000_000).matches(Some(&row_value)));
}

#[test]
fn test_matches_strings_ints_and_bools() {
    assert!(Qual::eq_str("status", "open").matches(Some(&json!("open"))));
    assert!(!Qual::eq_str("status", "open").matches(Some(&json!("paid"))));
    assert!(Qual::new("amount", Operator::Ge, QualValue::Int(500)).matches(Some(&json!(500))));
    assert!(Qual::bool("paid", Operator::Ne, true).matches(Some(&json!(false))));
}

#[test]
fn test_null_never_matches() {
    let null = serde_json::Value::Null;
    assert!(!Qual::eq_str("status", "open").matches(Some(&null)));
    assert!(!Qual::new("status", Operator::Ne, QualValue::String("open".into())).matches(Some(&null)));
    assert!(!Qual::bool("paid", Operator::Eq, true).matches(None));
}
