//! Stripe API client
//!
//! Thin layer over [`crate::http::HttpClient`] that knows Stripe's list,
//! retrieve and expansion conventions. Lists come back as lazy
//! [`ListCursor`]s.

mod client;

pub use client::{ListParams, StripeClient, STRIPE_VERSION_HEADER};

pub use crate::pagination::ListCursor;

#[cfg(test)]
mod tests;
