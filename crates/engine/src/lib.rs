//! Bulk fulfillment reconciliation engine.
//!
//! [`runner::BatchRunner`] drives the per-row pipeline
//! (normalize, resolve, select, execute) across a whole batch,
//! isolating failures per sub-unit and accumulating the report.
//! [`store::ReportStore`] is the single-slot home of the last finished
//! report.

pub mod runner;
pub mod store;

pub use runner::{BatchRunner, OrderMatchPolicy};
pub use store::{InMemoryReportStore, ReportStore};
