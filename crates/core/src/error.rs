//! Error taxonomy for the fulfillment pipeline.
//!
//! [`RowError`] covers everything that can go wrong while processing a
//! single row or sub-unit; these are recorded as report entries and
//! never abort the batch. [`InputError`] covers failures before any row
//! is processed (missing or unreadable file) and is the only error that
//! aborts an entire batch. [`PlatformError`] is the remote boundary's
//! transport/protocol failure bucket.

/// A transport or protocol failure from the commerce platform.
///
/// These are infrastructure failures, not business-rule refusals. A
/// platform rejecting a fulfillment for business reasons comes back as
/// a [`crate::platform::FulfillOutcome::Rejected`], not an error.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The platform returned a non-2xx status code.
    #[error("Platform API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response arrived but could not be interpreted (GraphQL
    /// errors, malformed or missing payload).
    #[error("Protocol error: {0}")]
    Protocol(String),
}

/// A per-row (or per-sub-unit) failure.
///
/// Every variant's `Display` output is the exact string surfaced in the
/// report entry for that row.
#[derive(Debug, thiserror::Error)]
pub enum RowError {
    /// The row carries no order name at all.
    #[error("Row has no order name")]
    MalformedRow,

    /// No order matched the row's order name.
    #[error("Order not found")]
    OrderNotFound,

    /// More than one order matched and the configured match policy
    /// rejects ambiguity.
    #[error("Ambiguous order name: {matches} orders matched")]
    AmbiguousOrder { matches: usize },

    /// The order exists but has no open fulfillment order with
    /// remaining quantity.
    #[error("No valid fulfillment orders to fulfill (already fulfilled or closed)")]
    NoEligibleUnits,

    /// The platform refused the fulfillment for business reasons
    /// (e.g. already fulfilled elsewhere). Carries the platform's first
    /// reported message.
    #[error("{0}")]
    Rejected(String),

    /// A transport/protocol failure from any remote call.
    #[error(transparent)]
    Platform(#[from] PlatformError),
}

/// A batch-level input failure. Aborts the batch before any row runs.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// The file parsed but contained no data rows.
    #[error("Uploaded file contains no data rows")]
    EmptyFile,

    /// The file could not be parsed as a spreadsheet.
    #[error("Unreadable spreadsheet: {0}")]
    Malformed(String),
}
