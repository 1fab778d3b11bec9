//! # Signpost Testkit
//!
//! Testing utilities for Signpost.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known test cases with expected outputs for cross-implementation verification
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Helper structs for setting up test scenarios
//!
//! ## Golden Vectors
//!
//! Golden vectors ensure deterministic canonicalization across implementations:
//!
//! ```rust
//! use signpost_testkit::vectors::{all_vectors, signed_revision_from_vector};
//!
//! for vector in all_vectors() {
//!     let signed = signed_revision_from_vector(&vector);
//!     println!("{}: {}", vector.name, signed.id().to_hex());
//! }
//! ```
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use signpost_testkit::generators::{signed_revision_from_params, RevisionParams};
//!
//! proptest! {
//!     #[test]
//!     fn revision_id_is_deterministic(params: RevisionParams) {
//!         let r1 = signed_revision_from_params(&params);
//!         let r2 = signed_revision_from_params(&params);
//!         prop_assert_eq!(r1.id(), r2.id());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! Quickly set up test scenarios:
//!
//! ```rust
//! use signpost_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let signed = fixture.make_v0("/addr/A");
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_party_fixtures, TestFixture};
pub use generators::{signed_revision_from_params, RevisionParams};
pub use vectors::{all_vectors, signed_revision_from_vector, verify_all_vectors, GoldenVector};
