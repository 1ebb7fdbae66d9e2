//! `stripe_charge`

use super::with_account_id;
use crate::filter::KeyColumn;
use crate::plugin::{Column, GetConfig, ListConfig, TableDef};

const PATH: &str = "/v1/charges";

pub fn table() -> TableDef {
    TableDef {
        name: "stripe_charge",
        description: "Historical Stripe charges, or a specific charge by ID.",
        list: ListConfig::Paginated {
            path: PATH,
            expand: &[],
        },
        key_columns: vec![
            KeyColumn::timestamp("created"),
            KeyColumn::string("payment_intent"),
            KeyColumn::string("transfer_group"),
            KeyColumn::string("customer"),
        ],
        get: Some(GetConfig {
            path: PATH,
            expand: &[],
        }),
        columns: with_account_id(vec![
            Column::string("id", "Unique identifier for the charge."),
            Column::int("amount", "Amount charged in cents."),
            Column::int("amount_refunded", "Amount refunded in cents."),
            Column::string("authorization_code", "Authorization code for the charge."),
            Column::string("balance_transaction", "Balance transaction related to the charge."),
            Column::bool("captured", "Indicates whether the charge was captured."),
            Column::timestamp("created", "Timestamp when the charge was created."),
            Column::string("currency", "Currency of the charge."),
            Column::string("customer", "Customer related to the charge."),
            Column::string("description", "Description of the charge."),
            Column::bool("disputed", "Indicates whether the charge is disputed."),
            Column::string("failure_code", "Failure code if the charge failed."),
            Column::string("failure_message", "Failure message if the charge failed."),
            Column::bool("livemode", "Indicates whether the charge was created in live mode."),
            Column::bool("paid", "Indicates whether the charge was paid."),
            Column::string("payment_intent", "Payment intent related to the charge."),
            Column::string("payment_method", "Payment method used for the charge."),
            Column::string("receipt_email", "Receipt email for the charge."),
            Column::string("receipt_number", "Receipt number for the charge."),
            Column::string("receipt_url", "URL to the receipt of the charge."),
            Column::bool("refunded", "Indicates whether the charge was refunded."),
            Column::string("status", "Status of the charge (succeeded, pending or failed)."),
            Column::string("transfer_group", "Transfer group related to the charge."),
            Column::json("application", "Application that initiated the charge."),
            Column::json("application_fee", "Application fee related to the charge."),
            Column::json("billing_details", "Billing details associated with the charge."),
            Column::json("destination", "Destination account receiving the funds."),
            Column::json("dispute", "Details about the dispute if the charge is disputed."),
            Column::json("fraud_details", "Fraud details for the charge."),
            Column::json("invoice", "Invoice associated with the charge."),
            Column::json("level3", "Level 3 data for the charge."),
            Column::json("metadata", "Metadata associated with the charge."),
            Column::json("outcome", "Details about the outcome of the charge."),
            Column::json(
                "payment_method_details",
                "Details about the payment method used for the charge.",
            ),
            Column::json("refunds", "List of refunds applied to the charge."),
            Column::json("review", "Review associated with the charge."),
            Column::json("shipping", "Shipping details for the charge."),
            Column::json("source", "Payment source for the charge."),
            Column::json("source_transfer", "Transfer related to the charge source."),
            Column::json("transfer", "Transfer related to the charge."),
            Column::json("transfer_data", "Transfer data for the charge."),
        ]),
    }
}
