//! `stripe_account`

use crate::plugin::{Column, ListConfig, TableDef};

pub fn table() -> TableDef {
    TableDef {
        name: "stripe_account",
        description: "This is an object representing a Stripe account.",
        list: ListConfig::Singleton {
            path: "/v1/account",
        },
        key_columns: Vec::new(),
        get: None,
        columns: vec![
            Column::string("id", "Unique identifier for the account."),
            Column::string(
                "email",
                "An email address associated with the account. It is not used for authentication or messaging account holders.",
            ),
            Column::json("business_profile", "Business information about the account."),
            Column::string("business_type", "The business type."),
            Column::json(
                "capabilities",
                "The capabilities requested for this account and their states (active, inactive or pending).",
            ),
            Column::bool("charges_enabled", "Whether the account can create live charges."),
            Column::json(
                "company",
                "Information about the company or business. Available for any business_type.",
            ),
            Column::string("country", "The account's country."),
            Column::timestamp("created", "Time at which the account was created."),
            Column::string(
                "default_currency",
                "Three-letter ISO currency code representing the default currency for the account.",
            ),
            Column::bool("deleted", "True if the account is marked as deleted."),
            Column::bool(
                "details_submitted",
                "Whether account details have been submitted. Standard accounts cannot receive payouts before this is true.",
            ),
            Column::json(
                "external_accounts",
                "External accounts (bank accounts and debit cards) currently attached to this account.",
            ),
            Column::json(
                "individual",
                "Information about the person represented by the account. Null unless business_type is individual.",
            ),
            Column::json("metadata", "Set of key-value pairs attached to the account."),
            Column::bool("payouts_enabled", "Whether Stripe can send payouts to this account."),
            Column::json(
                "requirements",
                "Information that needs to be collected for the account, and by when.",
            ),
            Column::json("settings", "Options for customizing how the account functions within Stripe."),
            Column::json("tos_acceptance", "Details on the acceptance of the Stripe Services Agreement."),
            Column::string("type", "The Stripe account type. Can be standard, express, or custom."),
        ],
    }
}
