//! Revision validation: signature verification and structural checks.

use crate::canonical::signed_message;
use crate::error::ValidationError;
use crate::revision::{SignedRevision, REVISION_VERSION};

/// Validate a signed revision's structure and signature.
///
/// This performs:
/// - Version check
/// - Value path structural check
/// - Signature verification against the key embedded in the name
///
/// Expiry is deliberately not checked here; whether a stale-but-authentic
/// record is acceptable is a resolution-time decision.
pub fn validate_revision(signed: &SignedRevision) -> Result<(), ValidationError> {
    validate_revision_structure(signed)?;

    let message = signed_message(&signed.revision);
    signed
        .revision
        .name
        .public_key()
        .verify(&message, &signed.signature)
        .map_err(|_| ValidationError::SignatureFailed)?;

    Ok(())
}

/// Validate revision structure without signature verification.
///
/// Useful when the record is known to be valid (e.g., produced locally and
/// signed moments ago).
pub fn validate_revision_structure(signed: &SignedRevision) -> Result<(), ValidationError> {
    if signed.revision.version != REVISION_VERSION {
        return Err(ValidationError::UnsupportedVersion(signed.revision.version));
    }

    if signed.revision.expires_at < 0 {
        return Err(ValidationError::StructuralError(
            "negative expiry timestamp".into(),
        ));
    }

    // Hand-built revisions can carry any ValuePath; re-check the invariant.
    if !signed.revision.value.as_str().starts_with('/') {
        return Err(ValidationError::StructuralError(
            "value path must be absolute".into(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{Ed25519Signature, Keypair};
    use crate::revision::Revision;
    use crate::types::ValuePath;

    fn make_test_keypair() -> Keypair {
        Keypair::from_seed(&[0x42; 32])
    }

    fn make_signed(keypair: &Keypair, path: &str) -> SignedRevision {
        let revision = Revision::v0(
            keypair.to_name(),
            ValuePath::new(path).unwrap(),
            1_736_870_400_000,
        );
        SignedRevision::sign(revision, keypair).unwrap()
    }

    #[test]
    fn test_valid_revision() {
        let keypair = make_test_keypair();
        let signed = make_signed(&keypair, "/addr/A");
        assert!(validate_revision(&signed).is_ok());
    }

    #[test]
    fn test_invalid_signature() {
        let keypair = make_test_keypair();
        let mut signed = make_signed(&keypair, "/addr/A");

        signed.signature = Ed25519Signature::from_bytes([0xff; 64]);

        let result = validate_revision(&signed);
        assert!(matches!(result, Err(ValidationError::SignatureFailed)));
    }

    #[test]
    fn test_unsupported_version() {
        let keypair = make_test_keypair();
        let mut signed = make_signed(&keypair, "/addr/A");

        signed.revision.version = 7;

        let result = validate_revision(&signed);
        assert!(matches!(result, Err(ValidationError::UnsupportedVersion(7))));
    }

    #[test]
    fn test_negative_expiry() {
        let keypair = make_test_keypair();
        let mut signed = make_signed(&keypair, "/addr/A");

        signed.revision.expires_at = -1;

        let result = validate_revision(&signed);
        assert!(matches!(result, Err(ValidationError::StructuralError(_))));
    }

    #[test]
    fn test_signature_covers_seq() {
        let keypair = make_test_keypair();
        let mut signed = make_signed(&keypair, "/addr/A");

        signed.revision.seq += 1;

        let result = validate_revision(&signed);
        assert!(matches!(result, Err(ValidationError::SignatureFailed)));
    }
}
