//! Domain types and pure logic for bulk order fulfillment.
//!
//! This crate holds everything the reconciliation engine and the HTTP
//! surface share: input rows and their normalization rules, the
//! platform-facing order model, the [`platform::FulfillmentPlatform`]
//! trait seam, report types, and the error taxonomy. It performs no
//! network I/O.

pub mod error;
pub mod input;
pub mod platform;
pub mod report;
pub mod row;
