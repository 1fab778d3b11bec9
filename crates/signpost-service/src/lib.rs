//! # Signpost Service
//!
//! The boundary between the Signpost client and the network that actually
//! stores and distributes name records.
//!
//! The [`NameService`] trait is the contract a network collaborator must
//! honor: keyed byte storage plus the ordering invariant (a record with a
//! sequence number not strictly greater than the current one is rejected).
//! Real collaborators are expected to be best-effort and eventually
//! consistent; [`MemoryNameService`] is the in-process reference
//! implementation used by tests.

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{Result, ServiceError};
pub use memory::MemoryNameService;
pub use traits::{NameService, PutOutcome};
