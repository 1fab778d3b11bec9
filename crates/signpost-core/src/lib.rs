//! # Signpost Core
//!
//! Pure primitives for Signpost: signed, updatable pointer records layered
//! on top of a content-addressed storage network.
//!
//! This crate contains no I/O and no networking. It is pure computation
//! over cryptographic data structures.
//!
//! ## Key Types
//!
//! - [`Keypair`] - An Ed25519 signing identity
//! - [`Name`] - Self-certifying identifier derived from a public key
//! - [`Revision`] - One unsigned, sequenced version of the value a name points to
//! - [`SignedRevision`] - A revision plus its Ed25519 signature
//! - [`RevisionId`] - Content-addressed identifier (Blake3 hash) of a signed record
//!
//! ## Canonicalization
//!
//! All revisions are encoded using deterministic CBOR. See [`canonical`] module.

pub mod canonical;
pub mod crypto;
pub mod error;
pub mod name;
pub mod revision;
pub mod types;
pub mod validation;

pub use canonical::{canonical_record_bytes, decode_signed_revision, signed_message, wire_bytes};
pub use crypto::{Ed25519PublicKey, Ed25519Signature, Keypair};
pub use error::{CoreError, ValidationError};
pub use name::Name;
pub use revision::{Revision, SignedRevision, DEFAULT_TTL_MS, REVISION_VERSION};
pub use types::{RevisionId, ValuePath};
pub use validation::{validate_revision, validate_revision_structure};
