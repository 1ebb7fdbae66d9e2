//! `stripe_product`

use super::with_account_id;
use crate::filter::KeyColumn;
use crate::plugin::{Column, GetConfig, ListConfig, TableDef};

const PATH: &str = "/v1/products";

pub fn table() -> TableDef {
    TableDef {
        name: "stripe_product",
        description: "Products available for purchase or subscription.",
        list: ListConfig::Paginated {
            path: PATH,
            expand: &[],
        },
        key_columns: vec![
            KeyColumn::bool("active"),
            KeyColumn::timestamp("created"),
            KeyColumn::bool("shippable"),
            KeyColumn::string("url"),
        ],
        get: Some(GetConfig {
            path: PATH,
            expand: &[],
        }),
        columns: with_account_id(vec![
            Column::string("id", "Unique identifier for the product."),
            Column::string("name", "The product's full name or business name."),
            Column::string("type", "The product type."),
            Column::string(
                "unit_label",
                "A label that represents units of this product on customers' receipts and invoices.",
            ),
            Column::bool("active", "Whether the product is currently available for purchase."),
            Column::timestamp("created", "Time at which the product was created."),
            Column::string("description", "An arbitrary string attached to the product."),
            Column::json("images", "A list of up to 8 URLs of images for this product."),
            Column::bool(
                "livemode",
                "True if the product exists in live mode, false if it exists in test mode.",
            ),
            Column::json("metadata", "Set of key-value pairs attached to the product."),
            Column::json(
                "package_dimensions",
                "The dimensions of this product for shipping purposes.",
            ),
            Column::bool("shippable", "Whether this product is shipped (i.e., physical goods)."),
            Column::string(
                "statement_descriptor",
                "Extra information about a product which will appear on your customer's credit card statement.",
            ),
            Column::timestamp("updated", "Time at which the product was updated."),
            Column::string("url", "A URL of a publicly-accessible webpage for this product."),
        ]),
    }
}
