//! # Chainlog Testkit
//!
//! Testing utilities for Chainlog.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Fully specified block states with their expected
//!   canonical records and SHA-256 hashes, for cross-implementation checks
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Helper structs for setting up signed chains
//!
//! ## Golden Vectors
//!
//! ```rust
//! use chainlog_testkit::vectors::verify_all_vectors;
//!
//! for (name, matches, hash) in verify_all_vectors() {
//!     assert!(matches, "{name} hashed to {hash}");
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust,no_run
//! use chainlog_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::shared();
//! let chain = fixture.sealed_chain(1, &["startup", "login failure"]);
//! assert!(chain.validate(chain.blocks()));
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_party_fixtures, seal_next, TestFixture};
pub use generators::{block_from_params, BlockParams};
pub use vectors::{all_vectors, vector_data, verify_all_vectors, GoldenVector};
