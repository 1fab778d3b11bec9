//! Strong type definitions for Signpost.
//!
//! All identifiers are newtypes to prevent misuse at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// A 32-byte revision identifier, computed as Blake3(wire_bytes(revision)).
///
/// This is the content-address of a signed revision. Two identical signed
/// records will have the same RevisionId; it is what makes republishing the
/// same record detectable as a no-op.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RevisionId(pub [u8; 32]);

impl RevisionId {
    /// Create a new RevisionId from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Compute the id of a wire-encoded record.
    pub fn hash(wire: &[u8]) -> Self {
        Self(*blake3::hash(wire).as_bytes())
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != 32 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for RevisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RevisionId({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for RevisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for RevisionId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for RevisionId {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// An opaque content-addressed path, e.g. `/addr/Qm...`.
///
/// The value a name points to. Signpost treats the path as opaque beyond a
/// structural check: non-empty, absolute (leading `/`), no whitespace, no
/// interior NUL. The referenced content lives in the external
/// content-addressed network and is never fetched here.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValuePath(String);

impl ValuePath {
    /// Validate and wrap an address string.
    pub fn new(path: impl Into<String>) -> Result<Self, CoreError> {
        let path = path.into();
        if path.is_empty() {
            return Err(CoreError::MalformedValue("empty path".into()));
        }
        if !path.starts_with('/') {
            return Err(CoreError::MalformedValue(format!(
                "path must be absolute: {path:?}"
            )));
        }
        if path.contains('\0') {
            return Err(CoreError::MalformedValue("path contains NUL".into()));
        }
        if path.chars().any(char::is_whitespace) {
            return Err(CoreError::MalformedValue(format!(
                "path contains whitespace: {path:?}"
            )));
        }
        Ok(Self(path))
    }

    /// The path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ValuePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for ValuePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ValuePath({})", self.0)
    }
}

impl FromStr for ValuePath {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for ValuePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revision_id_hex_roundtrip() {
        let id = RevisionId::from_bytes([0x42; 32]);
        let hex = id.to_hex();
        let recovered = RevisionId::from_hex(&hex).unwrap();
        assert_eq!(id, recovered);
    }

    #[test]
    fn test_revision_id_display() {
        let id = RevisionId::from_bytes([0xab; 32]);
        let display = format!("{}", id);
        assert_eq!(display, "abababababababab");
    }

    #[test]
    fn test_revision_id_hash_deterministic() {
        let id1 = RevisionId::hash(b"record bytes");
        let id2 = RevisionId::hash(b"record bytes");
        assert_eq!(id1, id2);
        assert_ne!(id1, RevisionId::hash(b"other bytes"));
    }

    #[test]
    fn test_value_path_accepts_content_address() {
        let path = ValuePath::new("/addr/QmWGeRAEgtsHW3ec7U4qW2CyVy7eA2mFRVbk1nb24jFyks").unwrap();
        assert_eq!(
            path.as_str(),
            "/addr/QmWGeRAEgtsHW3ec7U4qW2CyVy7eA2mFRVbk1nb24jFyks"
        );
    }

    #[test]
    fn test_value_path_rejects_empty() {
        assert!(matches!(
            ValuePath::new(""),
            Err(CoreError::MalformedValue(_))
        ));
    }

    #[test]
    fn test_value_path_rejects_relative() {
        assert!(matches!(
            ValuePath::new("addr/abc"),
            Err(CoreError::MalformedValue(_))
        ));
    }

    #[test]
    fn test_value_path_rejects_whitespace() {
        assert!(matches!(
            ValuePath::new("/addr/a b"),
            Err(CoreError::MalformedValue(_))
        ));
        assert!(matches!(
            ValuePath::new("/addr/a\nb"),
            Err(CoreError::MalformedValue(_))
        ));
    }

    #[test]
    fn test_value_path_rejects_nul() {
        assert!(matches!(
            ValuePath::new("/addr/a\0b"),
            Err(CoreError::MalformedValue(_))
        ));
    }
}
