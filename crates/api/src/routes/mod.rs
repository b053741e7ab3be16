pub mod fulfillment;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /orders/bulk-fulfill            POST  upload + run batch (multipart)
/// /orders/bulk-fulfill/report     GET   last stored report
/// /orders/bulk-fulfill/sample     GET   CSV template download
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(fulfillment::router())
}
