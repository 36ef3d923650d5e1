//! Error types for roster, settings and export operations.
//!
//! Placement problems are not errors: they are reported as
//! [`Rejection`](crate::validation::Rejection) values.

use thiserror::Error;

/// Result type for configuration-level operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while configuring the roster or settings.
#[derive(Error, Debug)]
pub enum Error {
    /// Settings failed validation.
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// A time of day could not be parsed.
    #[error("Invalid time of day '{0}' (expected HH:MM)")]
    InvalidTimeOfDay(String),

    /// A series or round ID is already in use.
    #[error("Duplicate ID: {0}")]
    DuplicateId(String),

    /// The referenced series does not exist.
    #[error("Series not found: {0}")]
    SeriesNotFound(String),

    /// The referenced round does not exist.
    #[error("Round not found: {0}")]
    RoundNotFound(String),

    /// A round must span at least one court.
    #[error("Round '{0}' has a match count of zero")]
    EmptyRound(String),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
