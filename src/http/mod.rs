//! HTTP client module
//!
//! Provides the transport under the Stripe client: retries, rate limiting
//! and Stripe error decoding.
//!
//! # Features
//!
//! - **Automatic Retries**: Up to `max_retries` on connect errors, timeouts,
//!   429/5xx, honouring Stripe's `Stripe-Should-Retry` header
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Backoff Strategies**: Constant, linear, and exponential backoff
//! - **Error Decoding**: Non-2xx bodies become [`crate::error::ApiError`]

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
