use std::sync::Arc;

use bulkship_core::platform::FulfillmentPlatform;
use bulkship_engine::ReportStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Commerce platform boundary (real Shopify client in production,
    /// scripted in tests).
    pub platform: Arc<dyn FulfillmentPlatform>,
    /// Single-slot store of the last finished batch report.
    pub reports: Arc<dyn ReportStore>,
}
