//! Error types for the name service boundary.

use thiserror::Error;

use signpost_core::Name;

/// Errors that can occur at the name service boundary.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Record rejected: its sequence number is not strictly greater than the
    /// service's current record for that name. Surfaced to the caller, never
    /// retried automatically; a fresh resolve is the caller's decision.
    #[error("stale sequence for {name}: attempted {attempted}, current {current}")]
    StaleSequence {
        name: Name,
        attempted: u64,
        current: u64,
    },

    /// Record bytes did not decode or did not verify.
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// The collaborator could not be reached or failed transiently.
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;
