//! Route definitions for bulk order fulfillment.
//!
//! Mounted at `/orders`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::fulfillment;
use crate::state::AppState;

/// Routes mounted at `/orders`.
///
/// ```text
/// POST   /bulk-fulfill           -> bulk_fulfill   (multipart)
/// GET    /bulk-fulfill/report    -> get_report
/// GET    /bulk-fulfill/sample    -> sample_file
/// ```
pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/orders",
        Router::new()
            .route("/bulk-fulfill", post(fulfillment::bulk_fulfill))
            .route("/bulk-fulfill/report", get(fulfillment::get_report))
            .route("/bulk-fulfill/sample", get(fulfillment::sample_file)),
    )
}
