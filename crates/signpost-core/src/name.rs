//! Name: a self-certifying identifier.
//!
//! A name is the canonical encoding of an Ed25519 public key. Anyone holding
//! a name can verify records published under it using only the key embedded
//! in the name itself; only the holder of the matching private key can
//! produce new records for it.
//!
//! Textual form: `name:ed25519:<64 hex chars>`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::crypto::Ed25519PublicKey;
use crate::error::CoreError;

/// Prefix identifying the name scheme.
const NAME_PREFIX: &str = "name";

/// Key-type label for Ed25519 names.
const KEY_TYPE_LABEL: &str = "ed25519";

/// A self-certifying name, immutable once created.
///
/// Many revisions reference one name, but at most one revision is current
/// per name at any resolution time.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Name(Ed25519PublicKey);

impl Name {
    /// Derive a name from a public key.
    pub const fn from_public_key(key: Ed25519PublicKey) -> Self {
        Self(key)
    }

    /// The verification key embedded in this name.
    pub const fn public_key(&self) -> &Ed25519PublicKey {
        &self.0
    }

    /// Raw public key bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_bytes()
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", NAME_PREFIX, KEY_TYPE_LABEL, self.0.to_hex())
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", &self.0.to_hex()[..16])
    }
}

impl FromStr for Name {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 3 {
            return Err(CoreError::MalformedName(format!(
                "expected 3 parts, got {}",
                parts.len()
            )));
        }
        if parts[0] != NAME_PREFIX {
            return Err(CoreError::MalformedName(format!(
                "must start with '{NAME_PREFIX}'"
            )));
        }
        if parts[1] != KEY_TYPE_LABEL {
            return Err(CoreError::MalformedName(format!(
                "unknown key type '{}'",
                parts[1]
            )));
        }
        let key = Ed25519PublicKey::from_hex(parts[2])
            .map_err(|e| CoreError::MalformedName(e.to_string()))?;
        Ok(Self(key))
    }
}

impl From<Ed25519PublicKey> for Name {
    fn from(key: Ed25519PublicKey) -> Self {
        Self(key)
    }
}
