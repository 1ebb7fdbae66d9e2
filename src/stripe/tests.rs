//! Tests for the Stripe client

use super::*;
use crate::config::ConnectionConfig;
use crate::error::Error;
use crate::filter::{translate, KeyColumn, Operator, Qual};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(server: &MockServer) -> ConnectionConfig {
    let mut config = ConnectionConfig::with_api_key("sk_test_abc").base_url(server.uri());
    config.max_network_retries = 0;
    config.requests_per_second = 0;
    config
}

fn client(server: &MockServer) -> StripeClient {
    StripeClient::new(&config(server)).unwrap()
}

#[test]
fn test_list_params_query() {
    let filters = translate(
        &[
            KeyColumn::timestamp("created"),
            KeyColumn::string("status"),
        ],
        &[
            Qual::eq_str("status", "open"),
            Qual::timestamp("created", Operator::Gt, 10),
        ],
    );
    let params = ListParams::new()
        .limit(Some(5))
        .filters(filters)
        .expand(["data.subscription", "data.default_source"]);

    assert_eq!(
        params.to_query(),
        vec![
            ("status".to_string(), "open".to_string()),
            ("created[gt]".to_string(), "10".to_string()),
            ("expand[]".to_string(), "data.subscription".to_string()),
            ("expand[]".to_string(), "data.default_source".to_string()),
        ]
    );
}

#[test]
fn test_new_without_api_key_fails() {
    let config = ConnectionConfig {
        api_key: None,
        ..ConnectionConfig::default()
    };
    // only the env fallback could supply a key here
    if std::env::var(crate::config::API_KEY_ENV).is_err() {
        let err = StripeClient::new(&config).unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { .. }));
    }
}

#[test]
fn test_new_rejects_bad_base_url() {
    let config = ConnectionConfig::with_api_key("sk_test_abc").base_url("ftp://example.com");
    assert!(StripeClient::new(&config).is_err());
}

#[tokio::test]
async fn test_list_sends_filters_and_expand() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/invoices"))
        .and(header("Authorization", "Bearer sk_test_abc"))
        .and(query_param("limit", "2"))
        .and(query_param("status", "paid"))
        .and(query_param("expand[]", "data.subscription"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "data": [{"id": "in_1"}, {"id": "in_2"}],
            "has_more": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut params = ListParams::new()
        .limit(Some(2))
        .expand(["data.subscription"]);
    params.filters.equals.insert("status".into(), "paid".into());

    let items = client(&server)
        .list("/v1/invoices", &params)
        .collect_all()
        .await
        .unwrap();
    assert_eq!(items.len(), 2);
}

#[tokio::test]
async fn test_get_with_expand() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/invoices/in_123"))
        .and(query_param("expand[]", "subscription"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "in_123",
            "subscription": {"id": "sub_1", "object": "subscription"}
        })))
        .mount(&server)
        .await;

    let invoice = client(&server)
        .get("/v1/invoices", "in_123", &["subscription"])
        .await
        .unwrap();
    assert_eq!(invoice["subscription"]["id"], "sub_1");
}

#[tokio::test]
async fn test_get_missing_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/customers/cus_gone"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {
                "type": "invalid_request_error",
                "code": "resource_missing",
                "message": "No such customer: 'cus_gone'"
            }
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .get("/v1/customers", "cus_gone", &[])
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_get_rejects_path_in_id() {
    let server = MockServer::start().await;
    let err = client(&server)
        .get("/v1/customers", "../account", &[])
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidQual { .. }));
}

#[tokio::test]
async fn test_stripe_version_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/account"))
        .and(header(STRIPE_VERSION_HEADER, "2023-10-16"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "acct_1"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = config(&server);
    config.stripe_version = Some("2023-10-16".into());
    let account = StripeClient::new(&config).unwrap().account().await.unwrap();
    assert_eq!(account["id"], "acct_1");
}

#[tokio::test]
async fn test_account_id_is_memoized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/account"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "acct_42",
            "object": "account"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let clone = client.clone();
    assert_eq!(client.account_id().await.unwrap(), "acct_42");
    assert_eq!(clone.account_id().await.unwrap(), "acct_42");
}

#[tokio::test]
async fn test_usage_record_summaries_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/subscription_items/si_1/usage_record_summaries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "data": [{"id": "sis_1", "total_usage": 12}],
            "has_more": false
        })))
        .mount(&server)
        .await;

    let summaries = client(&server)
        .usage_record_summaries("si_1", None)
        .collect_all()
        .await
        .unwrap();
    assert_eq!(summaries[0]["total_usage"], 12);
}
