//! `stripe_customer`

use super::with_account_id;
use crate::filter::KeyColumn;
use crate::plugin::{Column, GetConfig, ListConfig, TableDef};

const PATH: &str = "/v1/customers";

pub fn table() -> TableDef {
    TableDef {
        name: "stripe_customer",
        description: "Customer details.",
        list: ListConfig::Paginated {
            path: PATH,
            expand: &[],
        },
        key_columns: vec![KeyColumn::timestamp("created"), KeyColumn::string("email")],
        get: Some(GetConfig {
            path: PATH,
            expand: &[],
        }),
        columns: with_account_id(vec![
            Column::string("id", "Unique identifier for the customer."),
            Column::string("email", "The customer's email address."),
            Column::json("address", "The customer's address."),
            Column::int(
                "balance",
                "Current balance stored on the customer. If negative, the customer has credit to apply to their next invoice.",
            ),
            Column::timestamp("created", "Time at which the object was created."),
            Column::string(
                "currency",
                "Three-letter ISO code for the currency the customer can be charged in for recurring billing purposes.",
            ),
            Column::json("default_source", "ID of the default payment source for the customer."),
            Column::bool("deleted", "True if the customer is marked as deleted."),
            Column::bool(
                "delinquent",
                "Whether the customer's latest invoice failed to be paid when billed automatically.",
            ),
            Column::string("description", "An arbitrary string attached to the object."),
            Column::json(
                "discount",
                "Describes the current discount active on the customer, if there is one.",
            ),
            Column::string(
                "invoice_prefix",
                "The prefix for the customer used to generate unique invoice numbers.",
            ),
            Column::json("invoice_settings", "The customer's default invoice settings."),
            Column::bool(
                "livemode",
                "True if the object exists in live mode, false if it exists in test mode.",
            ),
            Column::json("metadata", "Set of key-value pairs attached to the object."),
            Column::string("name", "The customer's full name or business name."),
            Column::int(
                "next_invoice_sequence",
                "The suffix of the customer's next invoice number, e.g., 0001.",
            ),
            Column::string("phone", "The customer's phone number."),
            Column::json(
                "preferred_locales",
                "The customer's preferred locales (languages), ordered by preference.",
            ),
            Column::json("shipping", "Mailing and shipping address for the customer."),
            Column::json("sources", "The customer's payment sources, if any.")
                .from_field("sources.data"),
            Column::json("subscriptions", "The customer's current subscriptions, if any.")
                .from_field("subscriptions.data"),
            Column::string(
                "tax_exempt",
                "The customer's tax exemption status. One of none, exempt, or reverse.",
            ),
            Column::json("tax_ids", "The customer's tax IDs."),
        ]),
    }
}
