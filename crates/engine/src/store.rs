//! Single-slot home of the last finished batch report.
//!
//! Writes are last-batch-wins; reads return a whole-report snapshot.
//! The trait exists so the in-memory slot can be swapped for a
//! persistent or multi-tenant store without touching the orchestrator
//! or handlers.

use std::sync::Arc;

use tokio::sync::RwLock;

use bulkship_core::report::BatchReport;

/// Repository for the most recent batch report.
#[async_trait::async_trait]
pub trait ReportStore: Send + Sync {
    /// Replace the stored report. The previous report, if any, is
    /// discarded; there is no history.
    async fn publish(&self, report: BatchReport);

    /// Snapshot of the last stored report, or `None` if no batch has
    /// completed in this store's lifetime.
    async fn latest(&self) -> Option<Arc<BatchReport>>;
}

/// Process-local single-slot store. Initially empty.
#[derive(Default)]
pub struct InMemoryReportStore {
    slot: RwLock<Option<Arc<BatchReport>>>,
}

impl InMemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ReportStore for InMemoryReportStore {
    async fn publish(&self, report: BatchReport) {
        let mut slot = self.slot.write().await;
        *slot = Some(Arc::new(report));
    }

    async fn latest(&self) -> Option<Arc<BatchReport>> {
        self.slot.read().await.clone()
    }
}
