//! Revision: one signed, sequenced version of the value a name points to.
//!
//! A revision is immutable. Updates never edit a published record; they are
//! expressed as a new revision with a strictly higher sequence number that
//! supersedes the old one.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::canonical::{decode_signed_revision, signed_message, wire_bytes};
use crate::crypto::{Ed25519Signature, Keypair};
use crate::error::CoreError;
use crate::name::Name;
use crate::types::{RevisionId, ValuePath};

/// The current revision schema version.
pub const REVISION_VERSION: u8 = 0;

/// Default validity window for a fresh revision: 24 hours.
pub const DEFAULT_TTL_MS: i64 = 24 * 60 * 60 * 1000;

/// An unsigned revision.
///
/// Signing is a separate, explicit step ([`SignedRevision::sign`]) so that a
/// revision can be constructed and inspected before the keypair is brought
/// into scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revision {
    /// Schema version (currently 0).
    pub version: u8,

    /// The name this revision belongs to.
    pub name: Name,

    /// The content-addressed path the name points to.
    pub value: ValuePath,

    /// Sequence number within the name's history (0-indexed).
    pub seq: u64,

    /// Expiry of the validity window (Unix milliseconds).
    pub expires_at: i64,
}

impl Revision {
    /// Construct the base revision for a name, with `seq = 0` and a validity
    /// window of [`DEFAULT_TTL_MS`] from `now`.
    pub fn v0(name: Name, value: ValuePath, now: i64) -> Self {
        Self {
            version: REVISION_VERSION,
            name,
            value,
            seq: 0,
            expires_at: now.saturating_add(DEFAULT_TTL_MS),
        }
    }

    /// Derive the next revision: `seq + 1`, new value, refreshed validity.
    ///
    /// The result is unsigned; the caller must sign it before publication.
    /// Two processes incrementing from the same stale revision will race;
    /// the network boundary keeps whichever publishes first and rejects the
    /// other as stale. Signpost does not serialize concurrent increments.
    pub fn increment(&self, value: ValuePath, now: i64) -> Result<Self, CoreError> {
        let seq = self
            .seq
            .checked_add(1)
            .ok_or(CoreError::SequenceExhausted {
                name: self.name,
                seq: self.seq,
            })?;
        Ok(Self {
            version: REVISION_VERSION,
            name: self.name,
            value,
            seq,
            expires_at: now.saturating_add(DEFAULT_TTL_MS),
        })
    }

    /// Whether the validity window has passed.
    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.expires_at
    }
}

/// A revision plus its Ed25519 signature over the canonical encoding of all
/// fields except the signature itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedRevision {
    /// The signed fields.
    pub revision: Revision,

    /// Signature by the key embedded in `revision.name`.
    pub signature: Ed25519Signature,
}

impl SignedRevision {
    /// Sign a revision with the keypair that owns its name.
    ///
    /// Fails with [`CoreError::KeyMismatch`] when the keypair's derived name
    /// differs from `revision.name`; nothing is ever signed under a name the
    /// key does not own.
    pub fn sign(revision: Revision, keypair: &Keypair) -> Result<Self, CoreError> {
        if keypair.to_name() != revision.name {
            return Err(CoreError::KeyMismatch {
                name: revision.name,
            });
        }
        let message = signed_message(&revision);
        let signature = keypair.sign(&message);
        Ok(Self {
            revision,
            signature,
        })
    }

    /// Verify the signature against the public key embedded in the name.
    ///
    /// Returns false for a well-formed-but-invalid signature; structurally
    /// malformed input never reaches this point (it fails at decode).
    pub fn verify(&self) -> bool {
        let message = signed_message(&self.revision);
        self.revision
            .name
            .public_key()
            .verify(&message, &self.signature)
            .is_ok()
    }

    /// Content-address of this record (Blake3 of the wire bytes).
    pub fn id(&self) -> RevisionId {
        RevisionId::hash(&self.to_bytes())
    }

    /// Canonical wire encoding: deterministic CBOR record followed by the
    /// 64-byte signature.
    pub fn to_bytes(&self) -> Vec<u8> {
        wire_bytes(self)
    }

    /// Decode from canonical wire bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CoreError> {
        decode_signed_revision(bytes)
    }

    /// Parse from the textual form produced by `to_string()`.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        let bytes = hex::decode(s).map_err(|e| CoreError::DecodingError(e.to_string()))?;
        Self::from_bytes(&bytes)
    }
}

impl fmt::Display for SignedRevision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.to_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_value(path: &str) -> ValuePath {
        ValuePath::new(path).unwrap()
    }

    #[test]
    fn test_v0_base_case() {
        let keypair = Keypair::from_seed(&[0x42; 32]);
        let revision = Revision::v0(keypair.to_name(), test_value("/addr/A"), 1_000);

        assert_eq!(revision.seq, 0);
        assert_eq!(revision.version, REVISION_VERSION);
        assert_eq!(revision.expires_at, 1_000 + DEFAULT_TTL_MS);
        assert!(!revision.is_expired(1_000));
        assert!(revision.is_expired(1_000 + DEFAULT_TTL_MS));
    }

    #[test]
    fn test_increment_advances_seq() {
        let keypair = Keypair::generate();
        let v0 = Revision::v0(keypair.to_name(), test_value("/addr/A"), 1_000);

        let v1 = v0.increment(test_value("/addr/B"), 2_000).unwrap();
        assert_eq!(v1.seq, 1);
        assert_eq!(v1.value.as_str(), "/addr/B");
        assert_eq!(v1.expires_at, 2_000 + DEFAULT_TTL_MS);
        assert_eq!(v1.name, v0.name);

        let v2 = v1.increment(test_value("/addr/C"), 3_000).unwrap();
        assert_eq!(v2.seq, 2);
    }

    #[test]
    fn test_increment_exhausted_sequence() {
        let keypair = Keypair::generate();
        let mut revision = Revision::v0(keypair.to_name(), test_value("/addr/A"), 1_000);
        revision.seq = u64::MAX;

        let result = revision.increment(test_value("/addr/B"), 2_000);
        assert!(matches!(
            result,
            Err(CoreError::SequenceExhausted { seq: u64::MAX, .. })
        ));
    }

    #[test]
    fn test_sign_and_verify() {
        let keypair = Keypair::generate();
        let revision = Revision::v0(keypair.to_name(), test_value("/addr/A"), 1_000);

        let signed = SignedRevision::sign(revision, &keypair).unwrap();
        assert!(signed.verify());
    }

    #[test]
    fn test_sign_rejects_foreign_keypair() {
        let owner = Keypair::generate();
        let stranger = Keypair::generate();
        let revision = Revision::v0(owner.to_name(), test_value("/addr/A"), 1_000);

        let result = SignedRevision::sign(revision, &stranger);
        assert!(matches!(result, Err(CoreError::KeyMismatch { .. })));
    }

    #[test]
    fn test_tampered_signature_fails_verify() {
        let keypair = Keypair::generate();
        let revision = Revision::v0(keypair.to_name(), test_value("/addr/A"), 1_000);
        let mut signed = SignedRevision::sign(revision, &keypair).unwrap();

        // Flip one bit.
        signed.signature.0[0] ^= 0x01;
        assert!(!signed.verify());
    }

    #[test]
    fn test_tampered_value_fails_verify() {
        let keypair = Keypair::generate();
        let revision = Revision::v0(keypair.to_name(), test_value("/addr/A"), 1_000);
        let mut signed = SignedRevision::sign(revision, &keypair).unwrap();

        signed.revision.value = test_value("/addr/B");
        assert!(!signed.verify());
    }

    #[test]
    fn test_textual_roundtrip() {
        let keypair = Keypair::from_seed(&[0x42; 32]);
        let revision = Revision::v0(keypair.to_name(), test_value("/addr/A"), 1_000);
        let signed = SignedRevision::sign(revision, &keypair).unwrap();

        let text = signed.to_string();
        let parsed = SignedRevision::parse(&text).unwrap();
        assert_eq!(signed, parsed);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(SignedRevision::parse("not hex at all").is_err());
        assert!(SignedRevision::parse("abcd").is_err());
    }

    #[test]
    fn test_id_deterministic() {
        let keypair = Keypair::from_seed(&[0x42; 32]);
        let revision = Revision::v0(keypair.to_name(), test_value("/addr/A"), 1_000);
        let signed = SignedRevision::sign(revision, &keypair).unwrap();

        assert_eq!(signed.id(), signed.id());
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        fn arb_signed() -> impl Strategy<Value = SignedRevision> {
            (
                any::<[u8; 32]>(),
                "[A-Za-z0-9]{1,40}",
                0u64..1_000_000,
                0i64..=1_800_000_000_000,
            )
                .prop_map(|(seed, segment, seq, now)| {
                    let keypair = Keypair::from_seed(&seed);
                    let value = ValuePath::new(format!("/addr/{segment}")).unwrap();
                    let mut revision = Revision::v0(keypair.to_name(), value, now);
                    revision.seq = seq;
                    SignedRevision::sign(revision, &keypair).unwrap()
                })
        }

        proptest! {
            #[test]
            fn wire_roundtrip(signed in arb_signed()) {
                let decoded = SignedRevision::from_bytes(&signed.to_bytes()).unwrap();
                prop_assert_eq!(&signed, &decoded);

                let parsed = SignedRevision::parse(&signed.to_string()).unwrap();
                prop_assert_eq!(&signed, &parsed);
            }

            #[test]
            fn signed_revisions_verify(signed in arb_signed()) {
                prop_assert!(signed.verify());
            }

            #[test]
            fn any_flipped_signature_bit_fails(signed in arb_signed(), bit in 0usize..512) {
                let mut tampered = signed;
                tampered.signature.0[bit / 8] ^= 1 << (bit % 8);
                prop_assert!(!tampered.verify());
            }

            #[test]
            fn increment_is_plus_one(signed in arb_signed(), now in 0i64..=1_800_000_000_000) {
                let next = signed
                    .revision
                    .increment(ValuePath::new("/addr/next").unwrap(), now)
                    .unwrap();
                prop_assert_eq!(next.seq, signed.revision.seq + 1);
            }
        }
    }
}
