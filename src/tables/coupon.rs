//! `stripe_coupon`

use super::with_account_id;
use crate::filter::KeyColumn;
use crate::plugin::{Column, GetConfig, ListConfig, TableDef};

const PATH: &str = "/v1/coupons";

pub fn table() -> TableDef {
    TableDef {
        name: "stripe_coupon",
        description: "Coupons available for purchase or subscription.",
        list: ListConfig::Paginated {
            path: PATH,
            expand: &[],
        },
        key_columns: vec![KeyColumn::timestamp("created")],
        get: Some(GetConfig {
            path: PATH,
            expand: &[],
        }),
        columns: with_account_id(vec![
            Column::string("id", "Unique identifier for the coupon."),
            Column::string("name", "The coupon's full name or business name."),
            Column::int(
                "amount_off",
                "Amount (in the currency specified) that will be taken off the subtotal of any invoices for this customer.",
            ),
            Column::timestamp("created", "Time at which the coupon was created."),
            Column::string(
                "currency",
                "If amount_off has been set, the three-letter ISO code for the currency of the amount to take off.",
            ),
            Column::bool("deleted", "True if the coupon is marked as deleted."),
            Column::string(
                "duration",
                "One of forever, once, and repeating. Describes how long a customer who applies this coupon will get the discount.",
            ),
            Column::int(
                "duration_in_months",
                "If duration is repeating, the number of months the coupon applies.",
            ),
            Column::bool(
                "livemode",
                "True if the coupon exists in live mode, false if it exists in test mode.",
            ),
            Column::int(
                "max_redemptions",
                "Maximum number of times this coupon can be redeemed across all customers.",
            ),
            Column::json("metadata", "Set of key-value pairs attached to the coupon."),
            Column::double(
                "percent_off",
                "Percent that will be taken off the subtotal of any invoices for this customer for the duration of the coupon.",
            ),
            Column::timestamp("redeem_by", "Date after which the coupon can no longer be redeemed."),
            Column::int("times_redeemed", "Number of times this coupon has been applied to a customer."),
            Column::bool(
                "valid",
                "Whether this coupon can still be applied to a customer.",
            ),
        ]),
    }
}
