//! `stripe_plan`

use super::with_account_id;
use crate::filter::KeyColumn;
use crate::plugin::{Column, GetConfig, ListConfig, TableDef};

const PATH: &str = "/v1/plans";

pub fn table() -> TableDef {
    TableDef {
        name: "stripe_plan",
        description: "Plans define the base price, currency, and billing cycle for subscriptions.",
        list: ListConfig::Paginated {
            path: PATH,
            expand: &[],
        },
        key_columns: vec![
            KeyColumn::bool("active"),
            KeyColumn::timestamp("created"),
            KeyColumn::string("product_id").param("product"),
        ],
        get: Some(GetConfig {
            path: PATH,
            expand: &[],
        }),
        columns: with_account_id(vec![
            Column::string("id", "Unique identifier for the plan."),
            Column::string("nickname", "A brief description of the plan, hidden from customers."),
            Column::bool("active", "Whether the plan is currently available for purchase."),
            Column::string(
                "aggregate_usage",
                "Usage aggregation strategy for plans of usage_type=metered.",
            ),
            Column::int("amount", "The unit amount in cents to be charged."),
            Column::double(
                "amount_decimal",
                "The unit amount in cents to be charged, as a decimal with at most 12 decimal places.",
            ),
            Column::string(
                "billing_scheme",
                "Describes how to compute the price per period. Either per_unit or tiered.",
            ),
            Column::timestamp("created", "Time at which the plan was created."),
            Column::string("currency", "Three-letter ISO currency code, in lowercase."),
            Column::bool("deleted", "True if the plan is marked as deleted."),
            Column::string(
                "interval",
                "The frequency at which a subscription is billed. One of day, week, month or year.",
            ),
            Column::int(
                "interval_count",
                "The number of intervals between subscription billings.",
            ),
            Column::bool(
                "livemode",
                "True if the plan exists in live mode, false if it exists in test mode.",
            ),
            Column::json("metadata", "Set of key-value pairs attached to the plan."),
            Column::string(
                "product_id",
                "ID of the product whose pricing this plan determines.",
            )
            .from_field("product"),
            Column::json("tiers", "Each element represents a pricing tier."),
            Column::string(
                "tiers_mode",
                "Defines if the tiering price should be graduated or volume based.",
            ),
            Column::json(
                "transform_usage",
                "Transformation applied to the reported usage or set quantity before computing the amount billed.",
            ),
            Column::int(
                "trial_period_days",
                "Default number of trial days when subscribing a customer to this plan.",
            ),
            Column::string(
                "usage_type",
                "How the quantity per period is determined. Either metered or licensed.",
            ),
        ]),
    }
}
