//! `stripe_subscription_item`

use super::with_account_id;
use crate::error::{Error, Result};
use crate::filter::KeyColumn;
use crate::plugin::{Column, GetConfig, Hydrate, ListConfig, TableDef};
use crate::stripe::StripeClient;
use crate::types::JsonValue;
use async_trait::async_trait;
use tracing::debug;

const PATH: &str = "/v1/subscription_items";

pub fn table() -> TableDef {
    TableDef {
        name: "stripe_subscription_item",
        description: "Subscription items are the individual products that a customer is subscribed to.",
        list: ListConfig::Paginated {
            path: PATH,
            expand: &[],
        },
        key_columns: vec![KeyColumn::string("subscription_id")
            .param("subscription")
            .required()],
        get: Some(GetConfig {
            path: PATH,
            expand: &[],
        }),
        columns: with_account_id(vec![
            Column::string("id", "Unique identifier for the subscription item."),
            Column::timestamp("created", "Time at which the subscription item was created."),
            Column::json("metadata", "Set of key-value pairs attached to the subscription item."),
            Column::json("plan", "A plan represents a billing configuration. (Deprecated)"),
            Column::json(
                "price",
                "A price represents a unit cost for a product, specifying the amount, currency, and billing frequency.",
            ),
            Column::int("quantity", "The quantity of the plan to which the customer is subscribed."),
            Column::string("subscription_id", "The ID of the subscription this item belongs to.")
                .from_field("subscription"),
            Column::json(
                "usage_record_summaries",
                "Usage record summaries for metered billing, one per billing period.",
            )
            .hydrated(UsageRecordSummariesHydrate),
        ]),
    }
}

/// Every usage record summary of the item, as a JSON array
#[derive(Debug, Clone, Copy, Default)]
pub struct UsageRecordSummariesHydrate;

#[async_trait]
impl Hydrate for UsageRecordSummariesHydrate {
    fn name(&self) -> &'static str {
        "usage_record_summaries"
    }

    async fn hydrate(&self, client: &StripeClient, item: &JsonValue) -> Result<JsonValue> {
        let id = item
            .get("id")
            .and_then(JsonValue::as_str)
            .ok_or_else(|| Error::decode("subscription item has no id"))?;
        debug!(item = id, "Listing usage record summaries");

        let summaries = client.usage_record_summaries(id, None).collect_all().await?;
        Ok(JsonValue::Array(summaries))
    }
}
