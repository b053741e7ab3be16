//! Handlers for bulk order fulfillment.
//!
//! Upload (multipart spreadsheet → batch run → report), last-report
//! retrieval, and the sample template download.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use bulkship_core::input;
use bulkship_core::report::{BatchReport, ReportEntry, ReportSummary};
use bulkship_engine::BatchRunner;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Multipart field carrying the spreadsheet.
const FILE_FIELD: &str = "file";

/// Wire view of a batch report, with the derived counters computed at
/// serialization time.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportBody {
    pub batch_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub summary: ReportSummary,
    pub entries: Vec<ReportEntry>,
}

impl From<&BatchReport> for ReportBody {
    fn from(report: &BatchReport) -> Self {
        Self {
            batch_id: report.batch_id,
            generated_at: report.generated_at,
            summary: report.summary(),
            entries: report.entries.clone(),
        }
    }
}

/// POST /api/v1/orders/bulk-fulfill
///
/// Accept a multipart upload with a `file` field holding the CSV, run
/// the batch to completion, publish the report, and return it.
///
/// A missing file or unreadable spreadsheet fails the whole request
/// before any row runs; everything after that point is recorded per
/// row in the report, which is returned even when every row failed.
pub async fn bulk_fulfill(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<DataResponse<ReportBody>>> {
    let mut file_bytes = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() == Some(FILE_FIELD) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            file_bytes = Some(bytes);
            break;
        }
    }

    let bytes = file_bytes.ok_or_else(|| AppError::BadRequest("No file uploaded".to_string()))?;

    // The upload lives only in this request scope; it is released on
    // every exit path.
    let rows = input::parse_rows(&bytes)?;

    tracing::info!(rows = rows.len(), "Received bulk fulfillment upload");

    let runner = BatchRunner::new(
        Arc::clone(&state.platform),
        state.config.tracking.clone(),
        state.config.match_policy,
    );
    let report = runner.run(&rows).await;

    let body = ReportBody::from(&report);
    state.reports.publish(report).await;

    Ok(Json(DataResponse { data: body }))
}

/// GET /api/v1/orders/bulk-fulfill/report
///
/// Return the last stored report, or 404 if no batch has completed in
/// this process lifetime. Reads are snapshots: repeated calls with no
/// intervening batch return identical content.
pub async fn get_report(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<ReportBody>>> {
    let report = state
        .reports
        .latest()
        .await
        .ok_or_else(|| AppError::NotFound("No fulfillment report available yet".to_string()))?;

    Ok(Json(DataResponse {
        data: ReportBody::from(report.as_ref()),
    }))
}

/// GET /api/v1/orders/bulk-fulfill/sample
///
/// Download a one-row CSV template documenting the expected columns.
pub async fn sample_file() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"bulk-fulfillment-sample.csv\"",
            ),
        ],
        input::sample_csv(),
    )
}
