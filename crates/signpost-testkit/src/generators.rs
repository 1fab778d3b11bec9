//! Proptest generators for property-based testing.

use proptest::prelude::*;

use signpost_core::{
    Ed25519PublicKey, Keypair, Name, Revision, RevisionId, SignedRevision, ValuePath,
    REVISION_VERSION,
};

/// Generate a random keypair.
pub fn keypair() -> impl Strategy<Value = Keypair> {
    any::<[u8; 32]>().prop_map(|seed| Keypair::from_seed(&seed))
}

/// Generate a random Ed25519PublicKey.
pub fn public_key() -> impl Strategy<Value = Ed25519PublicKey> {
    keypair().prop_map(|kp| kp.public_key())
}

/// Generate a random Name.
pub fn name() -> impl Strategy<Value = Name> {
    public_key().prop_map(Name::from_public_key)
}

/// Generate a random RevisionId.
pub fn revision_id() -> impl Strategy<Value = RevisionId> {
    any::<[u8; 32]>().prop_map(RevisionId::from_bytes)
}

/// Generate a valid content-addressed value path.
pub fn value_path() -> impl Strategy<Value = ValuePath> {
    "/addr/[A-Za-z0-9]{1,46}".prop_map(|s| ValuePath::new(s).unwrap())
}

/// Generate a sequence number (0-indexed).
pub fn seq() -> impl Strategy<Value = u64> {
    0u64..=u64::MAX - 1
}

/// Generate a reasonable expiry timestamp.
pub fn expires_at() -> impl Strategy<Value = i64> {
    0i64..=i64::MAX / 2
}

/// Parameters for generating a signed revision.
#[derive(Debug, Clone)]
pub struct RevisionParams {
    pub seed: [u8; 32],
    pub value: ValuePath,
    pub seq: u64,
    pub expires_at: i64,
}

impl Arbitrary for RevisionParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (any::<[u8; 32]>(), value_path(), seq(), expires_at())
            .prop_map(|(seed, value, seq, expires_at)| RevisionParams {
                seed,
                value,
                seq,
                expires_at,
            })
            .boxed()
    }
}

/// Build a signed revision from generated parameters.
pub fn signed_revision_from_params(params: &RevisionParams) -> SignedRevision {
    let keypair = Keypair::from_seed(&params.seed);
    let revision = Revision {
        version: REVISION_VERSION,
        name: keypair.to_name(),
        value: params.value.clone(),
        seq: params.seq,
        expires_at: params.expires_at,
    };
    SignedRevision::sign(revision, &keypair).expect("keypair owns the name it derived")
}

/// Generate a signed revision directly.
pub fn signed_revision() -> impl Strategy<Value = SignedRevision> {
    any::<RevisionParams>().prop_map(|p| signed_revision_from_params(&p))
}
