//! Computed columns

use crate::error::Result;
use crate::stripe::StripeClient;
use crate::types::JsonValue;
use async_trait::async_trait;

/// Computes a column value from an API object, possibly calling the API
#[async_trait]
pub trait Hydrate: Send + Sync {
    /// Name for logs and debug output
    fn name(&self) -> &'static str;

    /// Compute the raw value; the column converts it to its type
    async fn hydrate(&self, client: &StripeClient, item: &JsonValue) -> Result<JsonValue>;
}

/// Id of the connected account
#[derive(Debug, Clone, Copy, Default)]
pub struct AccountIdHydrate;

#[async_trait]
impl Hydrate for AccountIdHydrate {
    fn name(&self) -> &'static str {
        "account_id"
    }

    async fn hydrate(&self, client: &StripeClient, _item: &JsonValue) -> Result<JsonValue> {
        client.account_id().await.map(JsonValue::String)
    }
}
