//! The per-row fulfillment pipeline and its batch driver.
//!
//! Rows run strictly in input order; sub-units of a row run in the
//! order the platform returned them. Every remote call is awaited
//! before the next begins, so report ordering is deterministic and the
//! platform's rate limits see one request at a time. Any per-row or
//! per-unit failure is recorded and contained; nothing short of the
//! caller dropping the future stops a started batch.

use std::str::FromStr;
use std::sync::Arc;

use bulkship_core::error::RowError;
use bulkship_core::platform::{
    FulfillOutcome, FulfillmentOrderUnit, FulfillmentPlatform, ResolvedOrder,
};
use bulkship_core::report::{BatchReport, ReportEntry};
use bulkship_core::row::{FulfillmentRow, RawRow, TrackingDefaults};

/// What to do when an order-name lookup returns more than one match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderMatchPolicy {
    /// Take the first returned order (the platform's behavior the
    /// operators are used to).
    #[default]
    FirstWins,
    /// Fail the row with an ambiguity error.
    RejectAmbiguous,
}

impl FromStr for OrderMatchPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" | "first_wins" | "first-wins" => Ok(Self::FirstWins),
            "reject" | "reject_ambiguous" | "reject-ambiguous" => Ok(Self::RejectAmbiguous),
            other => Err(format!("Unknown order match policy: {other}")),
        }
    }
}

/// Drives one batch through the pipeline
/// `Normalized -> Resolving -> Selecting -> (Executing)* -> Reported`.
pub struct BatchRunner {
    platform: Arc<dyn FulfillmentPlatform>,
    defaults: TrackingDefaults,
    match_policy: OrderMatchPolicy,
}

impl BatchRunner {
    pub fn new(
        platform: Arc<dyn FulfillmentPlatform>,
        defaults: TrackingDefaults,
        match_policy: OrderMatchPolicy,
    ) -> Self {
        Self {
            platform,
            defaults,
            match_policy,
        }
    }

    /// Process every row and return the finished report.
    ///
    /// Each input row yields at least one report entry: one per
    /// executed sub-unit, or a single error entry when the row fails
    /// before execution.
    pub async fn run(&self, rows: &[RawRow]) -> BatchReport {
        tracing::info!(rows = rows.len(), "Starting bulk fulfillment batch");

        let mut entries = Vec::with_capacity(rows.len());
        for raw in rows {
            self.process_row(raw, &mut entries).await;
        }

        let report = BatchReport::new(entries);
        let summary = report.summary();
        tracing::info!(
            batch_id = %report.batch_id,
            total = summary.total,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Bulk fulfillment batch finished",
        );
        report
    }

    /// One row: failures at normalize/resolve/select short-circuit into
    /// a single error entry; execution failures are contained per
    /// sub-unit.
    async fn process_row(&self, raw: &RawRow, entries: &mut Vec<ReportEntry>) {
        let row = match FulfillmentRow::normalize(raw, &self.defaults) {
            Ok(row) => row,
            Err(e) => {
                entries.push(ReportEntry::failed(raw.display_name(), e));
                return;
            }
        };

        let order = match self.resolve(&row.order_name).await {
            Ok(order) => order,
            Err(e) => {
                tracing::debug!(order_name = %row.order_name, error = %e, "Row failed to resolve");
                entries.push(ReportEntry::failed(&row.order_name, e));
                return;
            }
        };

        let units = match self.platform.fulfillment_orders(&order).await {
            Ok(units) => units,
            Err(e) => {
                entries.push(ReportEntry::failed(&row.order_name, RowError::from(e)));
                return;
            }
        };

        let eligible: Vec<FulfillmentOrderUnit> = units
            .into_iter()
            .filter(FulfillmentOrderUnit::is_fulfillable)
            .collect();

        if eligible.is_empty() {
            entries.push(ReportEntry::failed(
                &row.order_name,
                RowError::NoEligibleUnits,
            ));
            return;
        }

        for unit in &eligible {
            let entry = match self.platform.create_fulfillment(unit, &row.tracking).await {
                Ok(FulfillOutcome::Created { fulfillment_id, .. }) => {
                    tracing::debug!(
                        order_name = %row.order_name,
                        unit_id = %unit.id,
                        fulfillment_id = %fulfillment_id,
                        "Fulfillment created",
                    );
                    ReportEntry::fulfilled(&row.order_name, fulfillment_id)
                }
                Ok(FulfillOutcome::Rejected { messages }) => {
                    let message = messages
                        .into_iter()
                        .next()
                        .unwrap_or_else(|| "Unknown error".to_string());
                    ReportEntry::failed(&row.order_name, RowError::Rejected(message))
                }
                Err(e) => ReportEntry::failed(&row.order_name, RowError::from(e)),
            };
            entries.push(entry);
        }
    }

    /// Resolve an order name to exactly one order, applying the match
    /// policy when the lookup returns several.
    async fn resolve(&self, order_name: &str) -> Result<ResolvedOrder, RowError> {
        let mut matches = self.platform.find_orders(order_name).await?;

        match (matches.len(), self.match_policy) {
            (0, _) => Err(RowError::OrderNotFound),
            (1, _) => Ok(matches.remove(0)),
            (n, OrderMatchPolicy::FirstWins) => {
                tracing::warn!(order_name, matches = n, "Multiple orders matched; taking first");
                Ok(matches.remove(0))
            }
            (n, OrderMatchPolicy::RejectAmbiguous) => Err(RowError::AmbiguousOrder { matches: n }),
        }
    }
}
