//! Stripe client

use crate::config::ConnectionConfig;
use crate::error::{Error, Result};
use crate::filter::ListFilters;
use crate::http::{HttpClient, HttpClientConfig, RateLimiterConfig, RequestConfig};
use crate::pagination::ListCursor;
use crate::types::{JsonValue, QueryPairs};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// Header pinning the API version
pub const STRIPE_VERSION_HEADER: &str = "Stripe-Version";

const ACCOUNT_PATH: &str = "/v1/account";

/// Parameters of one list call
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    /// Row limit for the whole listing
    pub limit: Option<u64>,
    /// Native filters from the host quals
    pub filters: ListFilters,
    /// Fields to expand (`expand[]`)
    pub expand: Vec<String>,
}

impl ListParams {
    /// Empty parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the row limit
    #[must_use]
    pub fn limit(mut self, limit: Option<u64>) -> Self {
        self.limit = limit;
        self
    }

    /// Set the native filters
    #[must_use]
    pub fn filters(mut self, filters: ListFilters) -> Self {
        self.filters = filters;
        self
    }

    /// Add expansions
    #[must_use]
    pub fn expand<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expand.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Query pairs, excluding `limit` and `starting_after`
    pub fn to_query(&self) -> QueryPairs {
        let mut pairs = self.filters.to_query_pairs();
        pairs.extend(expand_pairs(&self.expand));
        pairs
    }
}

fn expand_pairs<S: AsRef<str>>(fields: &[S]) -> QueryPairs {
    fields
        .iter()
        .map(|f| ("expand[]".to_string(), f.as_ref().to_string()))
        .collect()
}

/// Client for the Stripe REST API
///
/// Cheap to clone; clones share the connection pool, the rate limiter and
/// the memoized account id.
#[derive(Debug, Clone)]
pub struct StripeClient {
    http: HttpClient,
    account_id: Arc<OnceCell<String>>,
}

impl StripeClient {
    /// Build a client from connection settings
    ///
    /// Fails when no API key is configured or the settings are invalid.
    pub fn new(config: &ConnectionConfig) -> Result<Self> {
        config.validate()?;
        let api_key = config.resolve_api_key()?;

        let mut builder = HttpClientConfig::builder()
            .base_url(&config.base_url)
            .bearer_token(api_key)
            .timeout(config.timeout())
            .max_retries(config.max_network_retries);
        builder = match RateLimiterConfig::from_requests_per_second(config.requests_per_second) {
            Some(limit) => builder.rate_limit(limit),
            None => builder.no_rate_limit(),
        };
        if let Some(version) = &config.stripe_version {
            builder = builder.header(STRIPE_VERSION_HEADER, version);
        }

        info!(base_url = %config.base_url, "Created Stripe client");
        Ok(Self::from_http(HttpClient::with_config(builder.build())?))
    }

    /// Wrap an already configured HTTP client
    pub fn from_http(http: HttpClient) -> Self {
        Self {
            http,
            account_id: Arc::new(OnceCell::new()),
        }
    }

    /// Underlying HTTP client
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Open a lazy cursor over a list endpoint
    pub fn list(&self, path: &str, params: &ListParams) -> ListCursor {
        debug!(path, params = %params.filters, limit = ?params.limit, "Opening list cursor");
        ListCursor::new(self.http.clone(), path, params.to_query(), params.limit)
    }

    /// Retrieve one object by id
    pub async fn get(&self, path: &str, id: &str, expand: &[&str]) -> Result<JsonValue> {
        if id.is_empty() || id.contains(['/', '?', '#']) {
            return Err(Error::invalid_qual(format!("invalid object id '{id}'")));
        }
        let url = format!("{}/{id}", path.trim_end_matches('/'));
        let request = RequestConfig::new().query_pairs(expand_pairs(expand));
        self.http.get_json(&url, request).await
    }

    /// The account the API key belongs to
    pub async fn account(&self) -> Result<JsonValue> {
        self.http.get_json(ACCOUNT_PATH, RequestConfig::new()).await
    }

    /// Id of the connected account, fetched once per client
    pub async fn account_id(&self) -> Result<String> {
        let id = self
            .account_id
            .get_or_try_init(|| async {
                let account = self.account().await?;
                account
                    .get("id")
                    .and_then(JsonValue::as_str)
                    .map(str::to_string)
                    .ok_or_else(|| Error::decode("account response has no id"))
            })
            .await?;
        Ok(id.clone())
    }

    /// Usage record summaries of a metered subscription item
    pub fn usage_record_summaries(&self, item_id: &str, limit: Option<u64>) -> ListCursor {
        let path = format!("/v1/subscription_items/{item_id}/usage_record_summaries");
        ListCursor::new(self.http.clone(), path, Vec::new(), limit)
    }
}
