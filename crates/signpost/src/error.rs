//! Error types for the Signpost client.

use signpost_core::{CoreError, Name, ValidationError};
use signpost_service::ServiceError;
use thiserror::Error;

/// Errors that can occur during client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Core error (encoding, keys, sequences).
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// Validation error.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Name service error. Includes stale-sequence rejections from the
    /// network boundary.
    #[error("service error: {0}")]
    Service(#[from] ServiceError),

    /// The supplied keypair does not own the name being published.
    /// Rejected before any network call.
    #[error("not authorized to publish under {name}")]
    NotAuthorized { name: Name },

    /// No record has been published for the name.
    #[error("no record published for {name}")]
    NotFound { name: Name },

    /// A resolved record failed signature verification; its value must not
    /// be treated as authoritative.
    #[error("resolved record for {name} failed verification")]
    Verification { name: Name },

    /// A resolved record's validity window has passed.
    #[error("record for {name} expired at {expires_at}")]
    Expired { name: Name, expires_at: i64 },

    /// Resolved bytes did not decode as a record.
    #[error("decode error: {0}")]
    Decode(String),
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
