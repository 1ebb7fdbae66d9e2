//! Tests for the Stripe table definitions

use super::*;
use crate::config::ConnectionConfig;
use crate::filter::Operator;
use crate::plugin::{ColumnSource, ListConfig, Plugin, QueryContext};
use crate::types::ColumnType;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::HashSet;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn test_all_tables_registered() {
    let names: Vec<_> = all().iter().map(|t| t.name).collect();
    assert_eq!(
        names,
        vec![
            "stripe_account",
            "stripe_charge",
            "stripe_coupon",
            "stripe_customer",
            "stripe_invoice",
            "stripe_plan",
            "stripe_product",
            "stripe_subscription",
            "stripe_subscription_item",
        ]
    );
}

#[test]
fn test_column_names_unique() {
    for table in all() {
        let mut seen = HashSet::new();
        for column in &table.columns {
            assert!(seen.insert(column.name), "{} repeats {}", table.name, column.name);
        }
    }
}

#[test]
fn test_account_id_on_every_table_but_account() {
    for table in all() {
        let first = &table.columns[0];
        if table.name == "stripe_account" {
            assert_eq!(first.name, "id");
            assert!(table.column("account_id").is_none());
        } else {
            assert_eq!(first.name, "account_id", "{}", table.name);
            assert!(first.is_hydrated());
        }
    }
}

#[test]
fn test_key_columns_are_columns() {
    for table in all() {
        for key in &table.key_columns {
            assert!(
                table.column(key.name).is_some(),
                "{} has no column {}",
                table.name,
                key.name
            );
        }
    }
}

#[test]
fn test_every_table_but_account_supports_get() {
    for table in all() {
        assert_eq!(table.get.is_some(), table.name != "stripe_account", "{}", table.name);
    }
}

#[test]
fn test_timestamp_key_columns_support_ranges() {
    for table in all() {
        for key in table.key_columns.iter().filter(|k| k.name == "created") {
            assert!(key.supports(Operator::Ge), "{}", table.name);
            assert!(key.supports(Operator::Lt), "{}", table.name);
            assert_eq!(
                table.column("created").map(|c| c.column_type),
                Some(ColumnType::Timestamp)
            );
        }
    }
}

#[test]
fn test_invoice_definition() {
    let invoice = all()
        .into_iter()
        .find(|t| t.name == "stripe_invoice")
        .unwrap();

    match invoice.list {
        ListConfig::Paginated { path, expand } => {
            assert_eq!(path, "/v1/invoices");
            assert_eq!(
                expand,
                &[
                    "data.default_payment_method",
                    "data.default_source",
                    "data.subscription"
                ]
            );
        }
        ListConfig::Singleton { .. } => panic!("invoice is paginated"),
    }

    let sub = invoice
        .key_columns
        .iter()
        .find(|k| k.name == "subscription_id")
        .unwrap();
    assert_eq!(sub.param, "subscription");

    match invoice.column("subscription_id").unwrap().source() {
        ColumnSource::Field(path) => assert_eq!(*path, "subscription"),
        ColumnSource::Hydrate(_) => panic!("subscription_id reads a field"),
    }
}

#[test]
fn test_subscription_item_requires_subscription() {
    let item = all()
        .into_iter()
        .find(|t| t.name == "stripe_subscription_item")
        .unwrap();

    assert_eq!(item.key_columns.len(), 1);
    assert!(item.key_columns[0].is_required());
    assert!(item.check_required(&[]).is_err());
    assert!(item
        .column("usage_record_summaries")
        .unwrap()
        .is_hydrated());
}

#[test]
fn test_customer_nested_lists() {
    let customer = all()
        .into_iter()
        .find(|t| t.name == "stripe_customer")
        .unwrap();
    let sources = customer.column("sources").unwrap();
    assert_eq!(
        sources.convert(crate::plugin::lookup(
            &json!({"sources": {"object": "list", "data": [{"id": "card_1"}]}}),
            "sources.data"
        )),
        json!([{"id": "card_1"}])
    );
}

#[tokio::test]
async fn test_subscription_item_hydrates_usage_summaries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/subscription_items"))
        .and(query_param("subscription", "sub_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "data": [{"id": "si_1", "subscription": "sub_1", "quantity": 2}],
            "has_more": false
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/subscription_items/si_1/usage_record_summaries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "data": [{"id": "sis_1", "total_usage": 40}],
            "has_more": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = ConnectionConfig::with_api_key("sk_test_abc").base_url(server.uri());
    config.requests_per_second = 0;
    config.max_network_retries = 0;
    let plugin = Plugin::new(config);

    let ctx = QueryContext::new()
        .qual(crate::filter::Qual::eq_str("subscription_id", "sub_1"))
        .columns(["id", "subscription_id", "quantity", "usage_record_summaries"]);
    let rows = plugin
        .list_all("stripe_subscription_item", ctx)
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("subscription_id"), Some(&json!("sub_1")));
    assert_eq!(rows[0].get("quantity"), Some(&json!(2)));
    assert_eq!(
        rows[0].get("usage_record_summaries"),
        Some(&json!([{"id": "sis_1", "total_usage": 40}]))
    );
}
