//! Shopify Admin API client.
//!
//! Implements [`bulkship_core::platform::FulfillmentPlatform`] against
//! the real platform: REST for the order-name lookup, GraphQL for the
//! fulfillment-order query and the fulfillment-creation mutation. All
//! responses are decoded into the core's tagged types at this boundary.

pub mod client;
pub mod graphql;

pub use client::{ShopConfig, ShopifyClient};
