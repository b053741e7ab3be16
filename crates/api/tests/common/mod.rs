//! Shared test harness.
//!
//! Builds the full application router (same middleware stack as
//! production via [`bulkship_api::router::build_app_router`]) around a
//! scripted in-memory platform, plus small request/response helpers.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use bulkship_api::config::ServerConfig;
use bulkship_api::router::build_app_router;
use bulkship_api::state::AppState;
use bulkship_core::error::PlatformError;
use bulkship_core::platform::{
    FulfillOutcome, FulfillmentOrderLineItem, FulfillmentOrderStatus, FulfillmentOrderUnit,
    FulfillmentPlatform, ResolvedOrder,
};
use bulkship_core::row::{TrackingDefaults, TrackingInfo};
use bulkship_engine::{InMemoryReportStore, OrderMatchPolicy};

/// Scripted platform: orders keyed by name, one open unit each unless
/// overridden.
#[derive(Default)]
pub struct ScriptedPlatform {
    orders: HashMap<String, i64>,
    units: HashMap<i64, Vec<FulfillmentOrderUnit>>,
    next_fulfillment: AtomicUsize,
}

impl ScriptedPlatform {
    /// Register an order with a single open unit of quantity 1.
    pub fn with_open_order(mut self, name: &str, order_id: i64) -> Self {
        self.orders.insert(name.to_string(), order_id);
        self.units.insert(
            order_id,
            vec![FulfillmentOrderUnit {
                id: format!("gid://shopify/FulfillmentOrder/{order_id}"),
                status: FulfillmentOrderStatus::Open,
                line_items: vec![FulfillmentOrderLineItem {
                    id: format!("gid://shopify/FulfillmentOrderLineItem/{order_id}"),
                    remaining_quantity: 1,
                }],
            }],
        );
        self
    }

    /// Register an order whose only unit is closed.
    pub fn with_closed_order(mut self, name: &str, order_id: i64) -> Self {
        self.orders.insert(name.to_string(), order_id);
        self.units.insert(
            order_id,
            vec![FulfillmentOrderUnit {
                id: format!("gid://shopify/FulfillmentOrder/{order_id}"),
                status: FulfillmentOrderStatus::Closed,
                line_items: vec![FulfillmentOrderLineItem {
                    id: format!("gid://shopify/FulfillmentOrderLineItem/{order_id}"),
                    remaining_quantity: 1,
                }],
            }],
        );
        self
    }
}

#[async_trait::async_trait]
impl FulfillmentPlatform for ScriptedPlatform {
    async fn find_orders(&self, order_name: &str) -> Result<Vec<ResolvedOrder>, PlatformError> {
        Ok(self
            .orders
            .get(order_name)
            .map(|id| vec![ResolvedOrder::from_order_id(*id)])
            .unwrap_or_default())
    }

    async fn fulfillment_orders(
        &self,
        order: &ResolvedOrder,
    ) -> Result<Vec<FulfillmentOrderUnit>, PlatformError> {
        Ok(self.units.get(&order.order_id).cloned().unwrap_or_default())
    }

    async fn create_fulfillment(
        &self,
        _unit: &FulfillmentOrderUnit,
        _tracking: &TrackingInfo,
    ) -> Result<FulfillOutcome, PlatformError> {
        let n = self.next_fulfillment.fetch_add(1, Ordering::SeqCst);
        Ok(FulfillOutcome::Created {
            fulfillment_id: format!("gid://shopify/Fulfillment/{n}"),
            status: Some("SUCCESS".to_string()),
        })
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        tracking: TrackingDefaults::default(),
        match_policy: OrderMatchPolicy::FirstWins,
    }
}

/// Build the full application router around the given platform.
pub fn build_test_app(platform: Arc<dyn FulfillmentPlatform>) -> Router {
    let config = test_config();
    let state = AppState {
        config: Arc::new(config.clone()),
        platform,
        reports: Arc::new(InMemoryReportStore::new()),
    };
    build_app_router(state, &config)
}

/// Issue a GET request against the app.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request"),
    )
    .await
    .expect("response")
}

/// Boundary used by [`multipart_upload`].
pub const BOUNDARY: &str = "bulkship-test-boundary";

/// Build a multipart POST request carrying `csv` in a `file` field.
pub fn multipart_upload(uri: &str, csv: &str) -> Request<Body> {
    let body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"orders.csv\"\r\n\
         Content-Type: text/csv\r\n\r\n\
         {csv}\r\n\
         --{BOUNDARY}--\r\n"
    );

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("request")
}

/// Build a multipart POST request with no `file` field.
pub fn multipart_without_file(uri: &str) -> Request<Body> {
    let body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"note\"\r\n\r\n\
         hello\r\n\
         --{BOUNDARY}--\r\n"
    );

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("request")
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}

/// Collect a response body into a UTF-8 string.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}
