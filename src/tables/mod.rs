//! Stripe table definitions
//!
//! One [`TableDef`] per Stripe resource. Tables only declare columns, key
//! columns and endpoints; listing, filtering and paging are shared.

mod account;
mod charge;
mod coupon;
mod customer;
mod invoice;
mod plan;
mod product;
mod subscription;
mod subscription_item;

pub use subscription_item::UsageRecordSummariesHydrate;

use crate::plugin::{AccountIdHydrate, Column, TableDef};

/// Every Stripe table
pub fn all() -> Vec<TableDef> {
    vec![
        account::table(),
        charge::table(),
        coupon::table(),
        customer::table(),
        invoice::table(),
        plan::table(),
        product::table(),
        subscription::table(),
        subscription_item::table(),
    ]
}

/// Prepend the connected account's id
fn with_account_id(columns: Vec<Column>) -> Vec<Column> {
    let account_id =
        Column::string("account_id", "The Stripe account ID.").hydrated(AccountIdHydrate);
    std::iter::once(account_id).chain(columns).collect()
}

#[cfg(test)]
mod tests;
