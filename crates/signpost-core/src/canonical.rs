//! Canonical CBOR encoding for deterministic serialization.
//!
//! This module implements RFC 8949 Core Deterministic Encoding:
//! - Map keys sorted by encoded byte comparison
//! - Integers use smallest valid encoding
//! - Definite lengths only
//! - No floats (timestamps are i64 milliseconds)
//!
//! The canonical encoding is critical: independently implemented clients
//! must produce identical bytes for the same revision, so that signatures
//! and content addresses agree across platforms.
//!
//! Wire format: `canonical_record || signature(64)`. The signed message is
//! the canonical record prefixed with a domain-separation tag, so revision
//! signatures can never collide with signatures from other protocols.

use ciborium::value::Value;

use crate::crypto::Ed25519Signature;
use crate::error::CoreError;
use crate::name::Name;
use crate::revision::{Revision, SignedRevision, REVISION_VERSION};
use crate::types::ValuePath;

/// Domain-separation tag prepended to the signed message.
pub const SIGN_DOMAIN: &[u8] = b"signpost-revision-v0:";

/// Record field keys (integer keys for compact encoding).
///
/// Keys 0-23 encode as single bytes in CBOR.
mod keys {
    pub const VERSION: u64 = 0;
    pub const NAME: u64 = 1;
    pub const VALUE: u64 = 2;
    pub const SEQ: u64 = 3;
    pub const EXPIRES_AT: u64 = 4;
}

/// Encode a revision (the signed fields) to canonical CBOR bytes.
pub fn canonical_record_bytes(revision: &Revision) -> Vec<u8> {
    let value = revision_to_cbor_value(revision);
    let mut buf = Vec::new();
    encode_value_to(&mut buf, &value);
    buf
}

/// Construct the signed message: `SIGN_DOMAIN || canonical_record`.
pub fn signed_message(revision: &Revision) -> Vec<u8> {
    let mut buf = Vec::with_capacity(SIGN_DOMAIN.len() + 128);
    buf.extend_from_slice(SIGN_DOMAIN);
    buf.extend_from_slice(&canonical_record_bytes(revision));
    buf
}

/// Encode an entire signed revision to wire bytes.
///
/// Format: `canonical_record || signature`
pub fn wire_bytes(signed: &SignedRevision) -> Vec<u8> {
    let mut buf = canonical_record_bytes(&signed.revision);
    buf.extend_from_slice(&signed.signature.0);
    buf
}

/// Convert a revision to a CBOR Value (map with integer keys).
fn revision_to_cbor_value(revision: &Revision) -> Value {
    // Build map entries in key order (already sorted 0-4)
    let entries = vec![
        (
            Value::Integer(keys::VERSION.into()),
            Value::Integer(revision.version.into()),
        ),
        (
            Value::Integer(keys::NAME.into()),
            Value::Bytes(revision.name.as_bytes().to_vec()),
        ),
        (
            Value::Integer(keys::VALUE.into()),
            Value::Text(revision.value.as_str().to_owned()),
        ),
        (
            Value::Integer(keys::SEQ.into()),
            Value::Integer(revision.seq.into()),
        ),
        (
            Value::Integer(keys::EXPIRES_AT.into()),
            Value::Integer(revision.expires_at.into()),
        ),
    ];
    Value::Map(entries)
}

/// Recursively encode a CBOR value.
fn encode_value_to(buf: &mut Vec<u8>, value: &Value) {
    match value {
        Value::Integer(i) => {
            encode_integer(buf, *i);
        }
        Value::Bytes(b) => {
            encode_bytes(buf, b);
        }
        Value::Text(s) => {
            encode_text(buf, s);
        }
        Value::Array(arr) => {
            encode_array(buf, arr);
        }
        Value::Map(entries) => {
            encode_map_canonical(buf, entries);
        }
        Value::Bool(b) => {
            buf.push(if *b { 0xf5 } else { 0xf4 });
        }
        Value::Null => {
            buf.push(0xf6);
        }
        Value::Float(_) => {
            panic!("floats not supported in canonical encoding");
        }
        _ => {
            panic!("unsupported CBOR value type");
        }
    }
}

/// Encode a CBOR integer (major types 0 and 1).
fn encode_integer(buf: &mut Vec<u8>, i: ciborium::value::Integer) {
    let n: i128 = i.into();

    if n >= 0 {
        // Major type 0: unsigned integer
        encode_uint(buf, 0, n as u64);
    } else {
        // Major type 1: negative integer
        // CBOR encodes -1 as 0, -2 as 1, etc.
        let abs = (-1 - n) as u64;
        encode_uint(buf, 1, abs);
    }
}

/// Encode an unsigned integer with the given major type.
fn encode_uint(buf: &mut Vec<u8>, major: u8, n: u64) {
    let mt = major << 5;
    if n < 24 {
        buf.push(mt | (n as u8));
    } else if n <= 0xff {
        buf.push(mt | 24);
        buf.push(n as u8);
    } else if n <= 0xffff {
        buf.push(mt | 25);
        buf.extend_from_slice(&(n as u16).to_be_bytes());
    } else if n <= 0xffffffff {
        buf.push(mt | 26);
        buf.extend_from_slice(&(n as u32).to_be_bytes());
    } else {
        buf.push(mt | 27);
        buf.extend_from_slice(&n.to_be_bytes());
    }
}

/// Encode a byte string (major type 2).
fn encode_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    encode_uint(buf, 2, bytes.len() as u64);
    buf.extend_from_slice(bytes);
}

/// Encode a text string (major type 3).
fn encode_text(buf: &mut Vec<u8>, s: &str) {
    encode_uint(buf, 3, s.len() as u64);
    buf.extend_from_slice(s.as_bytes());
}

/// Encode an array (major type 4).
fn encode_array(buf: &mut Vec<u8>, arr: &[Value]) {
    encode_uint(buf, 4, arr.len() as u64);
    for item in arr {
        encode_value_to(buf, item);
    }
}

/// Encode a map canonically (major type 5).
///
/// Keys are sorted by their encoded byte comparison.
fn encode_map_canonical(buf: &mut Vec<u8>, entries: &[(Value, Value)]) {
    let mut key_value_pairs: Vec<(Vec<u8>, &Value)> = entries
        .iter()
        .map(|(k, v)| {
            let mut key_buf = Vec::new();
            encode_value_to(&mut key_buf, k);
            (key_buf, v)
        })
        .collect();

    // Sort by encoded key bytes (lexicographic)
    key_value_pairs.sort_by(|a, b| a.0.cmp(&b.0));

    encode_uint(buf, 5, key_value_pairs.len() as u64);

    for (key_bytes, value) in key_value_pairs {
        buf.extend_from_slice(&key_bytes);
        encode_value_to(buf, value);
    }
}

/// Decode a signed revision from wire bytes.
///
/// Rejects non-canonical encodings: the parsed record is re-encoded and must
/// reproduce the input prefix byte-for-byte, so every record has exactly one
/// wire form (and therefore exactly one content address).
pub fn decode_signed_revision(bytes: &[u8]) -> Result<SignedRevision, CoreError> {
    // Minimum size: record (variable) + 64 byte signature
    if bytes.len() < 64 {
        return Err(CoreError::MalformedRevision("too short".into()));
    }

    // Parse CBOR record
    let cursor = std::io::Cursor::new(bytes);
    let value: Value =
        ciborium::from_reader(cursor).map_err(|e| CoreError::DecodingError(e.to_string()))?;

    let revision = cbor_value_to_revision(&value)?;

    // Locate the signature boundary by re-encoding
    let record_bytes = canonical_record_bytes(&revision);
    let record_len = record_bytes.len();

    if bytes.len() < record_len + 64 {
        return Err(CoreError::MalformedRevision(
            "insufficient bytes for signature".into(),
        ));
    }
    if bytes.len() > record_len + 64 {
        return Err(CoreError::MalformedRevision("trailing bytes".into()));
    }
    if bytes[..record_len] != record_bytes[..] {
        return Err(CoreError::MalformedRevision(
            "non-canonical encoding".into(),
        ));
    }

    let sig_bytes: [u8; 64] = bytes[record_len..]
        .try_into()
        .map_err(|_| CoreError::MalformedRevision("invalid signature length".into()))?;

    Ok(SignedRevision {
        revision,
        signature: Ed25519Signature(sig_bytes),
    })
}

/// Convert a CBOR Value (map) back to a Revision.
fn cbor_value_to_revision(value: &Value) -> Result<Revision, CoreError> {
    let map = match value {
        Value::Map(m) => m,
        _ => return Err(CoreError::MalformedRevision("expected map".into())),
    };

    if map.len() != 5 {
        return Err(CoreError::MalformedRevision(format!(
            "expected 5 fields, got {}",
            map.len()
        )));
    }

    // Helper to get a value by integer key
    let get = |key: u64| -> Option<&Value> {
        map.iter()
            .find(|(k, _)| matches!(k, Value::Integer(i) if i128::from(*i) == key as i128))
            .map(|(_, v)| v)
    };

    // Parse version
    let version = match get(keys::VERSION) {
        Some(Value::Integer(i)) => {
            let n = i128::from(*i);
            u8::try_from(n)
                .map_err(|_| CoreError::MalformedRevision(format!("invalid version: {n}")))?
        }
        _ => return Err(CoreError::MalformedRevision("missing version".into())),
    };
    if version != REVISION_VERSION {
        return Err(CoreError::UnsupportedVersion(version));
    }

    // Parse name (embedded public key)
    let name = match get(keys::NAME) {
        Some(Value::Bytes(b)) if b.len() == 32 => {
            let mut arr = [0u8; 32];
            arr.copy_from_slice(b);
            Name::from_public_key(arr.into())
        }
        _ => return Err(CoreError::MalformedRevision("invalid name".into())),
    };

    // Parse value path
    let value_path = match get(keys::VALUE) {
        Some(Value::Text(s)) => {
            ValuePath::new(s.as_str()).map_err(|e| CoreError::MalformedRevision(e.to_string()))?
        }
        _ => return Err(CoreError::MalformedRevision("invalid value".into())),
    };

    // Parse seq
    let seq = match get(keys::SEQ) {
        Some(Value::Integer(i)) => {
            let n = i128::from(*i);
            u64::try_from(n)
                .map_err(|_| CoreError::MalformedRevision(format!("invalid seq: {n}")))?
        }
        _ => return Err(CoreError::MalformedRevision("missing seq".into())),
    };

    // Parse expiry
    let expires_at = match get(keys::EXPIRES_AT) {
        Some(Value::Integer(i)) => {
            let n = i128::from(*i);
            i64::try_from(n)
                .map_err(|_| CoreError::MalformedRevision(format!("invalid expiry: {n}")))?
        }
        _ => return Err(CoreError::MalformedRevision("missing expiry".into())),
    };

    Ok(Revision {
        version,
        name,
        value: value_path,
        seq,
        expires_at,
    })
}
