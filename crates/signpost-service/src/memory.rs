//! In-memory implementation of the NameService trait.
//!
//! This is the reference implementation, primarily for testing. It applies
//! the same boundary rules a real collaborator must apply, but keeps
//! everything in one process (and is therefore trivially consistent).

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use tracing::debug;

use signpost_core::{Name, RevisionId, SignedRevision};

use crate::error::{Result, ServiceError};
use crate::traits::{NameService, PutOutcome};

/// In-memory name service.
///
/// All records are lost when the service is dropped. Thread-safe via RwLock.
pub struct MemoryNameService {
    records: RwLock<HashMap<Name, StoredRecord>>,
}

struct StoredRecord {
    bytes: Vec<u8>,
    seq: u64,
    id: RevisionId,
}

impl MemoryNameService {
    /// Create a new empty service.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Number of names with a current record.
    pub fn len(&self) -> usize {
        self.records.read().unwrap().len()
    }

    /// Whether no record has been published yet.
    pub fn is_empty(&self) -> bool {
        self.records.read().unwrap().is_empty()
    }
}

impl Default for MemoryNameService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NameService for MemoryNameService {
    async fn put(&self, name: &Name, record: &[u8]) -> Result<PutOutcome> {
        // Decode so the record can be ordered; reject records the rest of
        // the network could never accept.
        let signed = SignedRevision::from_bytes(record)
            .map_err(|e| ServiceError::InvalidRecord(e.to_string()))?;

        if signed.revision.name != *name {
            return Err(ServiceError::InvalidRecord(format!(
                "record is for {}, not {}",
                signed.revision.name, name
            )));
        }
        if !signed.verify() {
            return Err(ServiceError::InvalidRecord(
                "signature does not verify".into(),
            ));
        }

        let id = RevisionId::hash(record);
        let seq = signed.revision.seq;

        let mut records = self.records.write().unwrap();

        if let Some(existing) = records.get(name) {
            if existing.id == id {
                return Ok(PutOutcome::AlreadyStored);
            }
            // Equal seq with different content is rejected too: first
            // writer wins here; tie-break policy is a network concern.
            if seq <= existing.seq {
                return Err(ServiceError::StaleSequence {
                    name: *name,
                    attempted: seq,
                    current: existing.seq,
                });
            }
        }

        debug!(name = %name, seq, id = %id, "storing record");
        records.insert(
            *name,
            StoredRecord {
                bytes: record.to_vec(),
                seq,
                id,
            },
        );

        Ok(PutOutcome::Stored)
    }

    async fn get(&self, name: &Name) -> Result<Option<Vec<u8>>> {
        let records = self.records.read().unwrap();
        Ok(records.get(name).map(|r| r.bytes.clone()))
    }
}
