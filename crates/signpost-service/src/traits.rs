//! NameService trait: the abstract interface to the record network.
//!
//! The client never talks to the network directly; it hands signed record
//! bytes to a `NameService` keyed by [`Name`]. Implementations may be an
//! in-process map (tests), an HTTP gateway, or a DHT client.

use async_trait::async_trait;

use signpost_core::Name;

use crate::error::Result;

/// Result of publishing a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    /// Record was stored as the new current record for the name.
    Stored,
    /// The identical record was already current (idempotent - not an error).
    AlreadyStored,
}

/// The NameService trait: async interface to the record network.
///
/// # Contract
///
/// - **Ordering at the boundary**: `put` must reject a record whose sequence
///   number is not strictly greater than the current record's, with
///   [`StaleSequence`](crate::ServiceError::StaleSequence). Equal-sequence
///   records with different content are likewise rejected; tie-breaking
///   between them is a network policy this crate does not define.
/// - **Idempotence**: re-`put` of the byte-identical current record returns
///   `AlreadyStored`.
/// - **Best effort reads**: `get` returns the highest-sequence record the
///   implementation is aware of. Distributed implementations may serve a
///   stale view during propagation, but never a record that was never
///   published.
#[async_trait]
pub trait NameService: Send + Sync {
    /// Store a signed record as the current record for `name`.
    async fn put(&self, name: &Name, record: &[u8]) -> Result<PutOutcome>;

    /// Fetch the current record for `name`, or `None` if nothing has been
    /// published under it.
    async fn get(&self, name: &Name) -> Result<Option<Vec<u8>>>;
}
