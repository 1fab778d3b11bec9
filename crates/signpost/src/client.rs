//! The NameClient: publish and resolve revisions over a name service.
//!
//! The client owns no keys. Every signing or publishing operation takes the
//! keypair explicitly, and the authority check (does this keypair own the
//! name?) runs before any network call.

use std::sync::Arc;

use tracing::{debug, warn};

use signpost_core::{
    validate_revision, Keypair, Name, Revision, SignedRevision, ValuePath,
};
use signpost_service::{NameService, PutOutcome};

use crate::error::{ClientError, Result};

/// How much a resolution result can be trusted to be current.
///
/// Signatures are always verified, so the *authenticity* of a resolved
/// record is never in question; what a distributed name service cannot
/// promise is that the record is the newest one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confidence {
    /// The record is authentic and is the highest-sequence record the
    /// service knows of, which may lag behind the newest published one.
    BestEffort,
}

/// A successfully resolved record.
#[derive(Debug, Clone)]
pub struct Resolved {
    /// The verified record.
    pub revision: SignedRevision,
    /// Consistency guarantee of this result.
    pub confidence: Confidence,
}

impl Resolved {
    /// The content-addressed path the name currently points to.
    pub fn value(&self) -> &ValuePath {
        &self.revision.revision.value
    }

    /// The record's sequence number.
    pub fn seq(&self) -> u64 {
        self.revision.revision.seq
    }
}

/// Client for publishing and resolving name records.
///
/// Generic over the [`NameService`] collaborator. Cheap to share: `resolve`
/// and `publish` may run concurrently from multiple tasks; different names
/// never interfere.
pub struct NameClient<S: NameService> {
    service: Arc<S>,
}

impl<S: NameService> NameClient<S> {
    /// Create a client over a name service.
    pub fn new(service: S) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Create a client over a shared name service.
    pub fn from_arc(service: Arc<S>) -> Self {
        Self { service }
    }

    /// The underlying service.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Publish a signed revision under its name.
    ///
    /// Fails with [`ClientError::NotAuthorized`] before any network call if
    /// `keypair` does not own the revision's name, and re-validates the
    /// record locally so nothing unverifiable is ever sent. Republishing an
    /// identical record is a no-op. A stale sequence number is rejected by
    /// the service and surfaced as
    /// [`ServiceError::StaleSequence`](signpost_service::ServiceError::StaleSequence);
    /// the client never retries on the caller's behalf.
    ///
    /// Signing completed fully in memory before this call, so cancelling the
    /// returned future leaves no partial local state.
    pub async fn publish(&self, signed: &SignedRevision, keypair: &Keypair) -> Result<PutOutcome> {
        let name = signed.revision.name;
        if keypair.to_name() != name {
            return Err(ClientError::NotAuthorized { name });
        }

        validate_revision(signed)?;

        let outcome = self.service.put(&name, &signed.to_bytes()).await?;
        debug!(name = %name, seq = signed.revision.seq, ?outcome, "published revision");
        Ok(outcome)
    }

    /// Resolve the current record for a name.
    ///
    /// Returns the highest-sequence record the service is aware of, after
    /// verifying its signature against the key embedded in the name. The
    /// result is best-effort: a distributed service may serve a stale view
    /// during propagation, never a state that never existed.
    pub async fn resolve(&self, name: &Name) -> Result<Resolved> {
        let signed = self
            .fetch_verified(name)
            .await?
            .ok_or(ClientError::NotFound { name: *name })?;

        let expires_at = signed.revision.expires_at;
        if signed.revision.is_expired(now_millis()) {
            return Err(ClientError::Expired {
                name: *name,
                expires_at,
            });
        }

        debug!(name = %name, seq = signed.revision.seq, "resolved revision");
        Ok(Resolved {
            revision: signed,
            confidence: Confidence::BestEffort,
        })
    }

    /// Point the keypair's name at a new value.
    ///
    /// Convenience over the primitive steps: fetches the current record (if
    /// any), derives the next revision (`v0` for a fresh name), signs it,
    /// and publishes. Returns the published record.
    ///
    /// Two processes updating from the same stale head race: the service
    /// keeps whichever publishes first and rejects the other with a
    /// stale-sequence error. The loser should resolve afresh and decide
    /// whether its update still makes sense; this method does not retry.
    pub async fn update(&self, keypair: &Keypair, value: ValuePath) -> Result<SignedRevision> {
        let name = keypair.to_name();
        let now = now_millis();

        // An expired head still occupies its sequence number at the
        // service, so continue from it rather than restarting at v0.
        let revision = match self.fetch_verified(&name).await? {
            Some(head) => head.revision.increment(value, now)?,
            None => Revision::v0(name, value, now),
        };

        let signed = SignedRevision::sign(revision, keypair)?;
        self.publish(&signed, keypair).await?;
        Ok(signed)
    }

    /// Fetch and verify the current record for a name, without the expiry
    /// check. `Ok(None)` means nothing has been published.
    async fn fetch_verified(&self, name: &Name) -> Result<Option<SignedRevision>> {
        let Some(bytes) = self.service.get(name).await? else {
            return Ok(None);
        };

        let signed =
            SignedRevision::from_bytes(&bytes).map_err(|e| ClientError::Decode(e.to_string()))?;

        if signed.revision.name != *name {
            warn!(name = %name, embedded = %signed.revision.name, "record name mismatch");
            return Err(ClientError::Verification { name: *name });
        }
        if !signed.verify() {
            warn!(name = %name, seq = signed.revision.seq, "record failed verification");
            return Err(ClientError::Verification { name: *name });
        }

        Ok(Some(signed))
    }
}

impl<S: NameService> Clone for NameClient<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

/// Get current time in milliseconds.
fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_millis() as i64
}
