//! Error types for Signpost Core.

use thiserror::Error;

use crate::name::Name;

/// Core errors that can occur during keypair, name, and revision operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid signature")]
    InvalidSignature,

    #[error("invalid public key")]
    InvalidPublicKey,

    #[error("malformed key encoding: {0}")]
    MalformedKey(String),

    #[error("malformed name: {0}")]
    MalformedName(String),

    #[error("malformed value path: {0}")]
    MalformedValue(String),

    #[error("malformed revision: {0}")]
    MalformedRevision(String),

    #[error("decoding error: {0}")]
    DecodingError(String),

    #[error("unsupported revision version: {0}")]
    UnsupportedVersion(u8),

    #[error("keypair does not own name {name}")]
    KeyMismatch { name: Name },

    #[error("sequence number exhausted for name {name} at seq {seq}")]
    SequenceExhausted { name: Name, seq: u64 },
}

/// Validation errors for revision structure and signatures.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("signature verification failed")]
    SignatureFailed,

    #[error("unsupported version: {0}")]
    UnsupportedVersion(u8),

    #[error("structural error: {0}")]
    StructuralError(String),
}

impl From<CoreError> for ValidationError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::InvalidSignature | CoreError::InvalidPublicKey => {
                ValidationError::SignatureFailed
            }
            CoreError::UnsupportedVersion(v) => ValidationError::UnsupportedVersion(v),
            other => ValidationError::StructuralError(other.to_string()),
        }
    }
}
