//! `stripe_invoice`

use super::with_account_id;
use crate::filter::KeyColumn;
use crate::plugin::{Column, GetConfig, ListConfig, TableDef};

const PATH: &str = "/v1/invoices";

pub fn table() -> TableDef {
    TableDef {
        name: "stripe_invoice",
        description: "Invoices are statements of amounts owed by a customer, generated one-off or periodically from a subscription.",
        list: ListConfig::Paginated {
            path: PATH,
            expand: &[
                "data.default_payment_method",
                "data.default_source",
                "data.subscription",
            ],
        },
        key_columns: vec![
            KeyColumn::string("collection_method"),
            KeyColumn::timestamp("created"),
            KeyColumn::timestamp("due_date"),
            KeyColumn::string("subscription_id").param("subscription"),
            KeyColumn::string("status"),
        ],
        get: Some(GetConfig {
            path: PATH,
            expand: &["default_payment_method", "default_source", "subscription"],
        }),
        columns: with_account_id(vec![
            Column::string("id", "Unique identifier for the invoice."),
            Column::string(
                "number",
                "A unique, identifying string that appears on emails sent to the customer for this invoice.",
            ),
            Column::int("amount_due", "Final amount due at this time for this invoice."),
            Column::int("amount_paid", "The amount, in cents, that was paid."),
            Column::int("amount_remaining", "The amount remaining, in cents, that is due."),
            Column::timestamp("created", "Time at which the invoice was created."),
            Column::string(
                "status",
                "The status of the invoice, one of draft, open, paid, uncollectible, or void.",
            ),
            Column::string(
                "account_country",
                "The country of the business associated with this invoice.",
            ),
            Column::string(
                "account_name",
                "The public name of the business associated with this invoice.",
            ),
            Column::int(
                "application_fee_amount",
                "The fee in cents that will be applied to the invoice and transferred to the application owner's Stripe account.",
            ),
            Column::int(
                "attempt_count",
                "Number of payment attempts made for this invoice.",
            ),
            Column::bool("attempted", "Whether an attempt has been made to pay the invoice."),
            Column::bool(
                "auto_advance",
                "Controls whether Stripe will perform automatic collection of the invoice.",
            ),
            Column::string(
                "billing_reason",
                "Indicates the reason why the invoice was created.",
            ),
            Column::json("charge", "ID of the latest charge generated for this invoice, if any."),
            Column::string(
                "collection_method",
                "Either charge_automatically, or send_invoice.",
            ),
            Column::string("currency", "Three-letter ISO currency code, in lowercase."),
            Column::json("custom_fields", "Custom fields displayed on the invoice."),
            Column::json("customer", "The ID of the customer who will be billed."),
            Column::json("customer_address", "The customer's address."),
            Column::string("customer_email", "The customer's email."),
            Column::string("customer_name", "The customer's name."),
            Column::string("customer_phone", "The customer's phone number."),
            Column::json("customer_shipping", "The customer's shipping information."),
            Column::string("customer_tax_exempt", "The customer's tax exempt status."),
            Column::json("customer_tax_ids", "The customer's tax IDs."),
            Column::string(
                "default_payment_method",
                "ID of the default payment method for the invoice.",
            ),
            Column::string(
                "default_source",
                "ID of the default payment source for the invoice.",
            ),
            Column::json("default_tax_rates", "The tax rates applied to this invoice, if any."),
            Column::string("description", "An arbitrary string attached to the object."),
            Column::json(
                "discount",
                "Describes the current discount applied to this invoice, if there is one.",
            ),
            Column::timestamp(
                "due_date",
                "The date on which payment for this invoice is due. Null for invoices where collection_method=charge_automatically.",
            ),
            Column::int(
                "ending_balance",
                "Ending customer balance after the invoice is finalized.",
            ),
            Column::string("footer", "Footer displayed on the invoice."),
            Column::string(
                "hosted_invoice_url",
                "The URL for the hosted invoice page. Null until the invoice is finalized.",
            ),
            Column::string(
                "invoice_pdf",
                "The link to download the PDF for the invoice. Null until the invoice is finalized.",
            ),
            Column::json("lines", "The individual line items that make up the invoice."),
            Column::bool(
                "livemode",
                "True if the invoice exists in live mode, false if it exists in test mode.",
            ),
            Column::json("metadata", "Set of key-value pairs attached to the invoice."),
            Column::timestamp(
                "next_payment_attempt",
                "The time at which payment will next be attempted.",
            ),
            Column::bool("paid", "Whether payment was successfully collected for this invoice."),
            Column::json("payment_intent", "The PaymentIntent associated with this invoice."),
            Column::timestamp(
                "period_end",
                "End of the usage period during which invoice items were added to this invoice.",
            ),
            Column::timestamp(
                "period_start",
                "Start of the usage period during which invoice items were added to this invoice.",
            ),
            Column::int(
                "post_payment_credit_notes_amount",
                "Total amount of all post-payment credit notes issued for this invoice.",
            ),
            Column::int(
                "pre_payment_credit_notes_amount",
                "Total amount of all pre-payment credit notes issued for this invoice.",
            ),
            Column::string(
                "receipt_number",
                "The transaction number that appears on email receipts sent for this invoice.",
            ),
            Column::int(
                "starting_balance",
                "Starting customer balance before the invoice is finalized.",
            ),
            Column::string(
                "statement_descriptor",
                "Extra information about an invoice for the customer's credit card statement.",
            ),
            Column::json(
                "status_transitions",
                "The timestamps at which the invoice status was updated.",
            ),
            Column::json(
                "subscription",
                "The subscription that this invoice was prepared for, if any.",
            ),
            Column::string(
                "subscription_id",
                "ID of the subscription that this invoice was prepared for, if any.",
            )
            .from_field("subscription"),
            Column::timestamp(
                "subscription_proration_date",
                "Only set for upcoming invoices that preview prorations. The time used to calculate prorations.",
            ),
            Column::int(
                "subtotal",
                "Total of all subscriptions, invoice items, and prorations on the invoice before any discount or tax.",
            ),
            Column::int("tax", "The amount of tax on this invoice."),
            Column::json(
                "threshold_reason",
                "More information on which threshold rules triggered the invoice, for subscription_threshold invoices.",
            ),
            Column::int("total", "Total after discounts and taxes."),
            Column::json(
                "total_tax_amounts",
                "The aggregate amounts calculated per tax rate for all line items.",
            ),
            Column::json(
                "transfer_data",
                "The account the payment will be attributed to for tax reporting, and where funds will be transferred.",
            ),
            Column::timestamp(
                "webhooks_delivered_at",
                "The time at which webhooks for this invoice were successfully delivered.",
            ),
        ]),
    }
}
