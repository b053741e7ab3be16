//! Batch report types.
//!
//! One [`ReportEntry`] per processed sub-unit (or per failed row), in
//! processing order. Counters are derived at read time via
//! [`BatchReport::summary`], never stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One outcome record: an order name plus exactly one of a fulfillment
/// id (success) or an error message (failure).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEntry {
    /// Order reference the outcome belongs to. Empty when the row had
    /// no order name at all.
    pub order_name: String,
    /// Identifier of the created fulfillment, on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fulfillment_id: Option<String>,
    /// Failure reason, on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ReportEntry {
    /// A success entry.
    pub fn fulfilled(order_name: impl Into<String>, fulfillment_id: impl Into<String>) -> Self {
        Self {
            order_name: order_name.into(),
            fulfillment_id: Some(fulfillment_id.into()),
            error: None,
        }
    }

    /// A failure entry.
    pub fn failed(order_name: impl Into<String>, error: impl std::fmt::Display) -> Self {
        Self {
            order_name: order_name.into(),
            fulfillment_id: None,
            error: Some(error.to_string()),
        }
    }

    /// Whether this entry records a created fulfillment.
    pub fn is_success(&self) -> bool {
        self.fulfillment_id.is_some()
    }
}

/// Derived counters for a report, computed at read time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    /// Number of entries.
    pub total: usize,
    /// Entries with a fulfillment id.
    pub succeeded: usize,
    /// Entries with an error.
    pub failed: usize,
}

/// The ordered outcome list produced by one batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    /// Identifier of this batch run.
    pub batch_id: Uuid,
    /// When the batch finished.
    pub generated_at: DateTime<Utc>,
    /// Entries in processing order: rows in input order, sub-units of a
    /// row contiguous in the order the platform returned them.
    pub entries: Vec<ReportEntry>,
}

impl BatchReport {
    /// Wrap finished entries into a report, stamping id and time.
    pub fn new(entries: Vec<ReportEntry>) -> Self {
        Self {
            batch_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            entries,
        }
    }

    /// Compute the derived counters.
    pub fn summary(&self) -> ReportSummary {
        let succeeded = self.entries.iter().filter(|e| e.is_success()).count();
        ReportSummary {
            total: self.entries.len(),
            succeeded,
            failed: self.entries.len() - succeeded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_carries_exactly_one_outcome() {
        let ok = ReportEntry::fulfilled("#1025", "gid://shopify/Fulfillment/9");
        assert!(ok.is_success());
        assert!(ok.error.is_none());

        let err = ReportEntry::failed("#9999", "Order not found");
        assert!(!err.is_success());
        assert_eq!(err.error.as_deref(), Some("Order not found"));
        assert!(err.fulfillment_id.is_none());
    }

    #[test]
    fn test_summary_counts() {
        let report = BatchReport::new(vec![
            ReportEntry::fulfilled("#1", "f1"),
            ReportEntry::failed("#2", "Order not found"),
            ReportEntry::fulfilled("#3", "f2"),
        ]);
        let summary = report.summary();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
    }

    #[test]
    fn test_wire_shape_omits_absent_outcome() {
        let json = serde_json::to_value(ReportEntry::failed("#9999", "Order not found")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "orderName": "#9999", "error": "Order not found" })
        );

        let json = serde_json::to_value(ReportEntry::fulfilled("#1025", "f1")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "orderName": "#1025", "fulfillmentId": "f1" })
        );
    }
}
