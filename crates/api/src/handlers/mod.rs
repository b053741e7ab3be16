//! Request handlers.
//!
//! Handlers stay thin: they adapt HTTP to the engine (multipart → rows,
//! report → JSON) and map errors via [`crate::error::AppError`].

pub mod fulfillment;
