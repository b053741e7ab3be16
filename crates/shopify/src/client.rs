//! HTTP client for the Shopify Admin API.
//!
//! [`ShopifyClient`] holds a [`reqwest::Client`] plus the shop
//! credentials and implements the platform trait: order lookup over
//! REST, fulfillment-order query and fulfillment creation over GraphQL.

use serde::Deserialize;

use bulkship_core::error::PlatformError;
use bulkship_core::platform::{
    FulfillOutcome, FulfillmentOrderUnit, FulfillmentPlatform, ResolvedOrder,
};
use bulkship_core::row::TrackingInfo;

use crate::graphql::{
    FulfillmentCreateData, FulfillmentOrdersData, GraphqlEnvelope, FULFILLMENT_CREATE_MUTATION,
    FULFILLMENT_ORDERS_QUERY, FULFILLMENT_ORDER_PAGE_SIZE, LINE_ITEM_PAGE_SIZE,
};

/// Admin API version the client speaks.
pub const DEFAULT_API_VERSION: &str = "2024-04";

/// Header carrying the Admin API access token.
const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Connection settings for one shop.
#[derive(Debug, Clone)]
pub struct ShopConfig {
    /// Shop domain, e.g. `example.myshopify.com`.
    pub shop_domain: String,
    /// Admin API access token.
    pub access_token: String,
    /// Admin API version segment, e.g. `2024-04`.
    pub api_version: String,
}

impl ShopConfig {
    /// Settings for a shop on the default API version.
    pub fn new(shop_domain: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            shop_domain: shop_domain.into(),
            access_token: access_token.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }
}

/// Admin API client for a single shop.
pub struct ShopifyClient {
    client: reqwest::Client,
    config: ShopConfig,
}

/// Envelope of the REST `orders.json` lookup.
#[derive(Debug, Deserialize)]
struct OrdersEnvelope {
    #[serde(default)]
    orders: Vec<RestOrder>,
}

#[derive(Debug, Deserialize)]
struct RestOrder {
    id: i64,
}

impl ShopifyClient {
    /// Create a client for one shop.
    pub fn new(config: ShopConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling across shops).
    pub fn with_client(client: reqwest::Client, config: ShopConfig) -> Self {
        Self { client, config }
    }

    /// Shop domain this client targets.
    pub fn shop_domain(&self) -> &str {
        &self.config.shop_domain
    }

    fn admin_base(&self) -> String {
        format!(
            "https://{}/admin/api/{}",
            self.config.shop_domain, self.config.api_version
        )
    }

    /// Execute one GraphQL request and unwrap the envelope.
    ///
    /// Top-level GraphQL errors are protocol failures; user errors live
    /// inside the typed payload and are handled by the caller.
    async fn graphql<T: serde::de::DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, PlatformError> {
        let body = serde_json::json!({
            "query": query,
            "variables": variables,
        });

        let response = self
            .client
            .post(format!("{}/graphql.json", self.admin_base()))
            .header(ACCESS_TOKEN_HEADER, &self.config.access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| PlatformError::Transport(e.to_string()))?;

        let response = Self::ensure_success(response).await?;

        let envelope: GraphqlEnvelope<T> = response
            .json()
            .await
            .map_err(|e| PlatformError::Protocol(e.to_string()))?;

        if let Some(first) = envelope.errors.first() {
            return Err(PlatformError::Protocol(first.message.clone()));
        }
        envelope
            .data
            .ok_or_else(|| PlatformError::Protocol("GraphQL response carried no data".to_string()))
    }

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or [`PlatformError::Api`] with
    /// the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, PlatformError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(PlatformError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait::async_trait]
impl FulfillmentPlatform for ShopifyClient {
    /// Look up orders by exact name via `GET orders.json?name=...`.
    async fn find_orders(&self, order_name: &str) -> Result<Vec<ResolvedOrder>, PlatformError> {
        let response = self
            .client
            .get(format!("{}/orders.json", self.admin_base()))
            .query(&[("name", order_name)])
            .header(ACCESS_TOKEN_HEADER, &self.config.access_token)
            .send()
            .await
            .map_err(|e| PlatformError::Transport(e.to_string()))?;

        let response = Self::ensure_success(response).await?;
        let envelope: OrdersEnvelope = response
            .json()
            .await
            .map_err(|e| PlatformError::Protocol(e.to_string()))?;

        Ok(envelope
            .orders
            .into_iter()
            .map(|o| ResolvedOrder::from_order_id(o.id))
            .collect())
    }

    /// Fetch the first page of fulfillment-order sub-units, unfiltered.
    async fn fulfillment_orders(
        &self,
        order: &ResolvedOrder,
    ) -> Result<Vec<FulfillmentOrderUnit>, PlatformError> {
        let data: FulfillmentOrdersData = self
            .graphql(
                FULFILLMENT_ORDERS_QUERY,
                serde_json::json!({
                    "id": order.gid,
                    "foCount": FULFILLMENT_ORDER_PAGE_SIZE,
                    "liCount": LINE_ITEM_PAGE_SIZE,
                }),
            )
            .await?;

        let Some(node) = data.order else {
            // The order vanished between lookup and query. Treat as
            // nothing actionable rather than a protocol failure.
            tracing::warn!(gid = %order.gid, "Order missing from fulfillment-order query");
            return Ok(Vec::new());
        };

        Ok(node
            .fulfillment_orders
            .edges
            .into_iter()
            .map(|e| e.node.into_unit())
            .collect())
    }

    /// Create one fulfillment covering every line item's entire
    /// remaining quantity, with tracking info and customer
    /// notification. Notification is a fixed policy and fires on
    /// success, so re-invoking on the same unit can double-notify.
    async fn create_fulfillment(
        &self,
        unit: &FulfillmentOrderUnit,
        tracking: &TrackingInfo,
    ) -> Result<FulfillOutcome, PlatformError> {
        let line_items: Vec<_> = unit
            .line_items
            .iter()
            .map(|li| {
                serde_json::json!({
                    "id": li.id,
                    "quantity": li.remaining_quantity,
                })
            })
            .collect();

        let variables = serde_json::json!({
            "fulfillment": {
                "lineItemsByFulfillmentOrder": [{
                    "fulfillmentOrderId": unit.id,
                    "fulfillmentOrderLineItems": line_items,
                }],
                "trackingInfo": {
                    "number": tracking.number,
                    "company": tracking.company,
                    "url": tracking.url,
                },
                "notifyCustomer": true,
            }
        });

        let data: FulfillmentCreateData = self
            .graphql(FULFILLMENT_CREATE_MUTATION, variables)
            .await?;

        data.fulfillment_create_v2.into_outcome().ok_or_else(|| {
            PlatformError::Protocol(
                "fulfillmentCreateV2 returned neither a fulfillment nor user errors".to_string(),
            )
        })
    }
}
