//! Platform-facing order model and the remote boundary trait.
//!
//! Remote responses are decoded once at the boundary into the tagged
//! types here; nothing loosely-typed crosses into the engine.

use serde::{Deserialize, Serialize};

use crate::error::PlatformError;
use crate::row::TrackingInfo;

/// An order located on the platform for one input row.
///
/// Exists only when the order-name lookup matched; an ambiguous or
/// empty lookup never produces a partial `ResolvedOrder`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOrder {
    /// Platform numeric order identity.
    pub order_id: i64,
    /// Platform opaque global identifier derived from `order_id`.
    pub gid: String,
}

impl ResolvedOrder {
    /// Build from the numeric identity, deriving the global identifier.
    pub fn from_order_id(order_id: i64) -> Self {
        Self {
            order_id,
            gid: format!("gid://shopify/Order/{order_id}"),
        }
    }
}

/// Status of a fulfillment-order sub-unit. Only `Open` is actionable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FulfillmentOrderStatus {
    /// The unit can accept fulfillments.
    Open,
    /// The unit is fully fulfilled or cancelled.
    Closed,
    /// Any other platform-defined state (on hold, incomplete, ...).
    #[serde(untagged)]
    Other(String),
}

/// One line item within a fulfillment-order sub-unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FulfillmentOrderLineItem {
    /// Opaque line-item identifier.
    pub id: String,
    /// Quantity not yet fulfilled.
    pub remaining_quantity: i64,
}

/// One fulfillment-order sub-unit: a distinct shippable allocation of
/// an order's line items.
///
/// Fetched fresh from the platform per row and never cached across
/// rows; remaining quantities can change between calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FulfillmentOrderUnit {
    /// Opaque unit identifier.
    pub id: String,
    /// Unit status.
    pub status: FulfillmentOrderStatus,
    /// Line items in platform order.
    pub line_items: Vec<FulfillmentOrderLineItem>,
}

impl FulfillmentOrderUnit {
    /// Whether this unit can be fulfilled: status is `Open` and at
    /// least one line item has remaining quantity.
    pub fn is_fulfillable(&self) -> bool {
        self.status == FulfillmentOrderStatus::Open
            && self.line_items.iter().any(|li| li.remaining_quantity > 0)
    }
}

/// Outcome of one fulfillment-creation call, decoded at the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FulfillOutcome {
    /// The platform created the fulfillment.
    Created {
        /// Identifier of the created fulfillment.
        fulfillment_id: String,
        /// Platform-reported fulfillment status, when present.
        status: Option<String>,
    },
    /// The platform refused for business reasons (user errors). Not a
    /// transport failure; the messages are user-facing.
    Rejected {
        /// Platform-reported refusal messages; never empty.
        messages: Vec<String>,
    },
}

/// The commerce platform's order-management boundary.
///
/// One implementation talks to the real platform; tests script their
/// own. All calls are one blocking round-trip from the caller's point
/// of view; implementations must not retry internally.
#[async_trait::async_trait]
pub trait FulfillmentPlatform: Send + Sync {
    /// Look up orders by exact order name. Zero-or-more matches; the
    /// caller applies its match policy.
    async fn find_orders(&self, order_name: &str) -> Result<Vec<ResolvedOrder>, PlatformError>;

    /// Fetch the first page of fulfillment-order sub-units for an
    /// order, unfiltered.
    async fn fulfillment_orders(
        &self,
        order: &ResolvedOrder,
    ) -> Result<Vec<FulfillmentOrderUnit>, PlatformError>;

    /// Create one fulfillment covering the entire remaining quantity of
    /// every line item in the unit, attaching tracking metadata and
    /// requesting customer notification.
    ///
    /// Business-rule refusals come back as
    /// [`FulfillOutcome::Rejected`]; only transport/protocol failures
    /// are `Err`. The customer notification is sent on success, so
    /// re-invoking on the same unit after a transient failure may
    /// double-notify.
    async fn create_fulfillment(
        &self,
        unit: &FulfillmentOrderUnit,
        tracking: &TrackingInfo,
    ) -> Result<FulfillOutcome, PlatformError>;
}
