//! `stripe_subscription`

use super::with_account_id;
use crate::filter::KeyColumn;
use crate::plugin::{Column, GetConfig, ListConfig, TableDef};

const PATH: &str = "/v1/subscriptions";

pub fn table() -> TableDef {
    TableDef {
        name: "stripe_subscription",
        description: "Subscriptions allow customers to be charged on a recurring basis.",
        list: ListConfig::Paginated {
            path: PATH,
            expand: &[],
        },
        key_columns: vec![
            KeyColumn::string("collection_method"),
            KeyColumn::timestamp("created"),
            KeyColumn::string("customer"),
            KeyColumn::string("status"),
        ],
        get: Some(GetConfig {
            path: PATH,
            expand: &[],
        }),
        columns: with_account_id(vec![
            Column::string("id", "Unique identifier for the subscription."),
            Column::string("customer", "ID of the customer who owns the subscription."),
            Column::string(
                "status",
                "One of incomplete, incomplete_expired, trialing, active, past_due, canceled, unpaid or paused.",
            ),
            Column::double(
                "application_fee_percent",
                "Percentage of the subscription invoice subtotal transferred to the application owner's account.",
            ),
            Column::timestamp(
                "billing_cycle_anchor",
                "Determines the date of the first full invoice and the day of month for subsequent invoices.",
            ),
            Column::json(
                "billing_thresholds",
                "Thresholds at which an invoice will be sent and the billing period reset.",
            ),
            Column::timestamp(
                "cancel_at",
                "A date in the future at which the subscription will automatically get canceled.",
            ),
            Column::bool(
                "cancel_at_period_end",
                "Whether the subscription will be canceled at the end of the current period.",
            ),
            Column::timestamp("canceled_at", "The date the subscription was canceled, if any."),
            Column::string(
                "collection_method",
                "Either charge_automatically, or send_invoice.",
            ),
            Column::timestamp("created", "Time at which the subscription was created."),
            Column::timestamp(
                "current_period_end",
                "End of the current period that the subscription has been invoiced for.",
            ),
            Column::timestamp(
                "current_period_start",
                "Start of the current period that the subscription has been invoiced for.",
            ),
            Column::int(
                "days_until_due",
                "Number of days a customer has to pay invoices generated by this subscription.",
            ),
            Column::string(
                "default_payment_method",
                "ID of the default payment method for the subscription.",
            ),
            Column::string(
                "default_source",
                "ID of the default payment source for the subscription.",
            ),
            Column::json(
                "default_tax_rates",
                "The tax rates applied to any subscription item without tax_rates set.",
            ),
            Column::json(
                "discount",
                "Describes the current discount applied to this subscription, if there is one.",
            ),
            Column::timestamp("ended_at", "The date the subscription ended, if it has ended."),
            Column::json("items", "The subscription items of this subscription.")
                .from_field("items.data"),
            Column::string(
                "latest_invoice",
                "The most recent invoice this subscription has generated.",
            ),
            Column::bool(
                "livemode",
                "True if the subscription exists in live mode, false if it exists in test mode.",
            ),
            Column::json("metadata", "Set of key-value pairs attached to the subscription."),
            Column::timestamp(
                "next_pending_invoice_item_invoice",
                "When the next invoice for pending invoice items will be created.",
            ),
            Column::string(
                "on_behalf_of",
                "The account (if any) the charge was made on behalf of for charges associated with this subscription.",
            ),
            Column::json(
                "pause_collection",
                "If specified, payment collection for this subscription will be paused.",
            ),
            Column::json(
                "pending_invoice_item_interval",
                "How often pending invoice items are invoiced.",
            ),
            Column::string(
                "pending_setup_intent",
                "SetupIntent used to collect user authentication when updating the subscription.",
            ),
            Column::json(
                "pending_update",
                "Changes to the subscription applied once the latest invoice is paid.",
            ),
            Column::json("plan", "The plan the customer is subscribed to, for single-item subscriptions."),
            Column::int("quantity", "The quantity of the plan, for single-item subscriptions."),
            Column::string("schedule", "The schedule attached to the subscription."),
            Column::timestamp("start_date", "Date when the subscription was first created."),
            Column::json(
                "transfer_data",
                "The account the subscription's payments will be attributed to for tax reporting.",
            ),
            Column::timestamp("trial_end", "If the subscription has a trial, the end of that trial."),
            Column::timestamp(
                "trial_start",
                "If the subscription has a trial, the beginning of that trial.",
            ),
        ]),
    }
}
