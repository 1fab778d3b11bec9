//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::Arc;

use signpost::NameClient;
use signpost_core::{Keypair, Name, Revision, SignedRevision, ValuePath};
use signpost_service::MemoryNameService;

/// A test fixture with a keypair and a shared in-memory name service.
pub struct TestFixture {
    pub keypair: Keypair,
    pub service: Arc<MemoryNameService>,
}

impl TestFixture {
    /// Create a new test fixture with a random keypair.
    pub fn new() -> Self {
        Self {
            keypair: Keypair::generate(),
            service: Arc::new(MemoryNameService::new()),
        }
    }

    /// Create with a deterministic keypair from seed.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self {
            keypair: Keypair::from_seed(&seed),
            service: Arc::new(MemoryNameService::new()),
        }
    }

    /// The fixture keypair's name.
    pub fn name(&self) -> Name {
        self.keypair.to_name()
    }

    /// A client over the fixture's service. Call repeatedly to simulate
    /// multiple processes sharing one network.
    pub fn client(&self) -> NameClient<MemoryNameService> {
        NameClient::from_arc(Arc::clone(&self.service))
    }

    /// Create and sign the base revision for the fixture's name.
    pub fn make_v0(&self, path: &str) -> SignedRevision {
        let revision = Revision::v0(
            self.name(),
            ValuePath::new(path).expect("fixture paths are valid"),
            now_millis(),
        );
        SignedRevision::sign(revision, &self.keypair).expect("fixture keypair owns its name")
    }

    /// Derive, sign, and return the successor of `previous`.
    pub fn make_next(&self, previous: &SignedRevision, path: &str) -> SignedRevision {
        let revision = previous
            .revision
            .increment(
                ValuePath::new(path).expect("fixture paths are valid"),
                now_millis(),
            )
            .expect("fixture sequences do not exhaust");
        SignedRevision::sign(revision, &self.keypair).expect("fixture keypair owns its name")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create multiple test fixtures for multi-party tests.
pub fn multi_party_fixtures(count: usize) -> Vec<TestFixture> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[0] = i as u8;
            TestFixture::with_seed(seed)
        })
        .collect()
}

/// Get current time in milliseconds.
fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_millis() as i64
}
