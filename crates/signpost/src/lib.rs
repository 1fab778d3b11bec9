//! # Signpost
//!
//! A mutable-naming client: signed, updatable pointer records on top of a
//! content-addressed storage network.
//!
//! Content addresses are immutable; when data changes, its address changes.
//! Signpost layers names on top: a [`Name`] is derived from an Ed25519
//! public key, and the key holder publishes signed [`Revision`]s pointing
//! the name at successive content addresses. Anyone can resolve the name and
//! verify the result using only the key embedded in the name itself.
//!
//! ## Example
//!
//! ```no_run
//! use signpost::{Keypair, NameClient, Revision, ValuePath};
//! use signpost_service::MemoryNameService;
//!
//! # async fn demo() -> signpost::Result<()> {
//! let keypair = Keypair::generate();
//! let client = NameClient::new(MemoryNameService::new());
//!
//! // Point the name at an address, then move it.
//! client.update(&keypair, ValuePath::new("/addr/A")?).await?;
//! client.update(&keypair, ValuePath::new("/addr/B")?).await?;
//!
//! let resolved = client.resolve(&keypair.to_name()).await?;
//! assert_eq!(resolved.value().as_str(), "/addr/B");
//! assert_eq!(resolved.seq(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Consistency
//!
//! Resolution is best-effort: a distributed name service may serve a stale
//! record during propagation, but never one that fails verification and
//! never a state that was never published. See [`Resolved::confidence`].

pub mod client;
pub mod error;

pub use client::{Confidence, NameClient, Resolved};
pub use error::{ClientError, Result};

pub use signpost_core::{
    Ed25519PublicKey, Ed25519Signature, Keypair, Name, Revision, RevisionId, SignedRevision,
    ValuePath, DEFAULT_TTL_MS,
};
pub use signpost_service::{MemoryNameService, NameService, PutOutcome};
