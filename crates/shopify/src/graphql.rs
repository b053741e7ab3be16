//! GraphQL documents and typed response payloads.
//!
//! Responses are deserialized through the envelope types here and
//! converted into core types exactly once; no `serde_json::Value`
//! escapes this module.

use serde::Deserialize;

use bulkship_core::platform::{
    FulfillOutcome, FulfillmentOrderLineItem, FulfillmentOrderStatus, FulfillmentOrderUnit,
};

/// Fulfillment-order sub-units fetched per order (first page only).
pub const FULFILLMENT_ORDER_PAGE_SIZE: u32 = 10;

/// Line items fetched per fulfillment order (first page only).
pub const LINE_ITEM_PAGE_SIZE: u32 = 10;

/// Query for an order's fulfillment-order sub-units and their
/// remaining line-item quantities.
pub const FULFILLMENT_ORDERS_QUERY: &str = r#"
query ($id: ID!, $foCount: Int!, $liCount: Int!) {
  order(id: $id) {
    fulfillmentOrders(first: $foCount) {
      edges {
        node {
          id
          status
          lineItems(first: $liCount) {
            edges {
              node {
                id
                remainingQuantity
              }
            }
          }
        }
      }
    }
  }
}
"#;

/// Mutation creating one fulfillment against a fulfillment order.
pub const FULFILLMENT_CREATE_MUTATION: &str = r#"
mutation FulfillmentCreate($fulfillment: FulfillmentV2Input!) {
  fulfillmentCreateV2(fulfillment: $fulfillment) {
    fulfillment { id status }
    userErrors { field message }
  }
}
"#;

/// Top-level GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub struct GraphqlEnvelope<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

/// One top-level GraphQL error (query-level, not a user error).
#[derive(Debug, Deserialize)]
pub struct GraphqlError {
    pub message: String,
}

/// Relay-style connection wrapper.
#[derive(Debug, Deserialize)]
pub struct Connection<T> {
    pub edges: Vec<Edge<T>>,
}

#[derive(Debug, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

// ---- fulfillmentOrders query payload ----

#[derive(Debug, Deserialize)]
pub struct FulfillmentOrdersData {
    pub order: Option<OrderNode>,
}

#[derive(Debug, Deserialize)]
pub struct OrderNode {
    #[serde(rename = "fulfillmentOrders")]
    pub fulfillment_orders: Connection<FulfillmentOrderNode>,
}

#[derive(Debug, Deserialize)]
pub struct FulfillmentOrderNode {
    pub id: String,
    pub status: FulfillmentOrderStatus,
    #[serde(rename = "lineItems")]
    pub line_items: Connection<LineItemNode>,
}

#[derive(Debug, Deserialize)]
pub struct LineItemNode {
    pub id: String,
    #[serde(rename = "remainingQuantity")]
    pub remaining_quantity: i64,
}

impl FulfillmentOrderNode {
    /// Flatten the edge/node nesting into the core unit type.
    pub fn into_unit(self) -> FulfillmentOrderUnit {
        FulfillmentOrderUnit {
            id: self.id,
            status: self.status,
            line_items: self
                .line_items
                .edges
                .into_iter()
                .map(|e| FulfillmentOrderLineItem {
                    id: e.node.id,
                    remaining_quantity: e.node.remaining_quantity,
                })
                .collect(),
        }
    }
}

// ---- fulfillmentCreateV2 mutation payload ----

#[derive(Debug, Deserialize)]
pub struct FulfillmentCreateData {
    #[serde(rename = "fulfillmentCreateV2")]
    pub fulfillment_create_v2: FulfillmentCreatePayload,
}

#[derive(Debug, Deserialize)]
pub struct FulfillmentCreatePayload {
    pub fulfillment: Option<CreatedFulfillment>,
    #[serde(rename = "userErrors", default)]
    pub user_errors: Vec<UserError>,
}

#[derive(Debug, Deserialize)]
pub struct CreatedFulfillment {
    pub id: String,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UserError {
    pub field: Option<Vec<String>>,
    pub message: String,
}

impl FulfillmentCreatePayload {
    /// Fold the payload into the tagged outcome. User errors win over a
    /// (partially) returned fulfillment; an empty payload is a protocol
    /// defect the caller must surface.
    pub fn into_outcome(self) -> Option<FulfillOutcome> {
        if !self.user_errors.is_empty() {
            return Some(FulfillOutcome::Rejected {
                messages: self.user_errors.into_iter().map(|e| e.message).collect(),
            });
        }
        self.fulfillment.map(|f| FulfillOutcome::Created {
            fulfillment_id: f.id,
            status: f.status,
        })
    }
}
