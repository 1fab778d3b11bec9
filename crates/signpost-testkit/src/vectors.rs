//! Golden test vectors for deterministic verification.
//!
//! These vectors ensure that canonical encoding produces identical wire
//! bytes (and thus identical revision ids and signatures) across all
//! implementations. Ed25519 signing is deterministic, so every field of a
//! vector-derived record is reproducible from the inputs alone.

use serde::Serialize;

use signpost_core::{Keypair, Revision, SignedRevision, ValuePath, REVISION_VERSION};

/// A golden test vector.
#[derive(Debug, Clone, Serialize)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Seed for deterministic key generation.
    pub seed: [u8; 32],
    /// Content-addressed value path.
    pub value: &'static str,
    /// Sequence number.
    pub seq: u64,
    /// Expiry timestamp (Unix ms).
    pub expires_at: i64,
    /// Expected revision ID (hex).
    pub expected_revision_id: &'static str,
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "v0 pointing at /addr/A",
            seed: [0x42; 32],
            value: "/addr/A",
            seq: 0,
            expires_at: 1736956800000, // 2026-01-15T12:00:00Z
            // Filled in when reference outputs are frozen
            expected_revision_id: "",
        },
        GoldenVector {
            name: "seq 1 pointing at /addr/B",
            seed: [0x42; 32],
            value: "/addr/B",
            seq: 1,
            expires_at: 1736956801000,
            expected_revision_id: "",
        },
        GoldenVector {
            name: "zero seed, zero expiry",
            seed: [0x00; 32],
            value: "/addr/QmWGeRAEgtsHW3ec7U4qW2CyVy7eA2mFRVbk1nb24jFyks",
            seq: 0,
            expires_at: 0,
            expected_revision_id: "",
        },
        GoldenVector {
            name: "large sequence number",
            seed: [0x07; 32],
            value: "/addr/deep",
            seq: 281474976710655,
            expires_at: 1736956800000,
            expected_revision_id: "",
        },
    ]
}

/// Generate a signed revision from a golden vector.
pub fn signed_revision_from_vector(vector: &GoldenVector) -> SignedRevision {
    let keypair = Keypair::from_seed(&vector.seed);
    let revision = Revision {
        version: REVISION_VERSION,
        name: keypair.to_name(),
        value: ValuePath::new(vector.value).expect("vector paths are valid"),
        seq: vector.seq,
        expires_at: vector.expires_at,
    };
    SignedRevision::sign(revision, &keypair).expect("vector keypair owns its name")
}

/// Verify all golden vectors produce consistent revision IDs.
///
/// Call this to verify your implementation matches the reference.
/// Returns `(vector name, matches, computed id hex)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| {
            let signed = signed_revision_from_vector(v);
            let hex = signed.id().to_hex();

            // If expected is empty, just report what we got
            let matches = v.expected_revision_id.is_empty() || hex == v.expected_revision_id;

            (v.name.to_string(), matches, hex)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vectors_are_deterministic() {
        for vector in all_vectors() {
            let r1 = signed_revision_from_vector(&vector);
            let r2 = signed_revision_from_vector(&vector);

            assert_eq!(
                r1.id(),
                r2.id(),
                "Vector '{}' produced different IDs on regeneration",
                vector.name
            );
            assert_eq!(
                r1.to_bytes(),
                r2.to_bytes(),
                "Vector '{}' produced different wire bytes",
                vector.name
            );
            assert_eq!(
                r1.signature, r2.signature,
                "Vector '{}' produced different signatures",
                vector.name
            );
        }
    }

    #[test]
    fn test_vectors_verify_and_roundtrip() {
        for vector in all_vectors() {
            let signed = signed_revision_from_vector(&vector);
            assert!(signed.verify(), "Vector '{}' failed to verify", vector.name);

            let decoded = SignedRevision::from_bytes(&signed.to_bytes()).unwrap();
            assert_eq!(signed, decoded, "Vector '{}' failed roundtrip", vector.name);
        }
    }

    #[test]
    fn test_different_seeds_different_ids() {
        let base = GoldenVector {
            name: "seed1",
            seed: [0x01; 32],
            value: "/addr/same",
            seq: 0,
            expires_at: 1_000,
            expected_revision_id: "",
        };
        let other = GoldenVector {
            seed: [0x02; 32],
            ..base.clone()
        };

        let r1 = signed_revision_from_vector(&base);
        let r2 = signed_revision_from_vector(&other);
        assert_ne!(r1.id(), r2.id());
    }

    #[test]
    fn test_verify_all_vectors_reports() {
        for (name, matches, hex) in verify_all_vectors() {
            assert!(matches, "vector '{name}' mismatched (got {hex})");
            assert_eq!(hex.len(), 64);
        }
    }

    #[test]
    fn test_vectors_serialize_for_export() {
        // Vectors are exported as JSON for non-Rust implementations.
        let json = serde_json::to_string_pretty(&all_vectors()).unwrap();
        assert!(json.contains("/addr/A"));
    }
}
