//! # Chainlog Core
//!
//! Pure primitives for the Chainlog ledger: identities, blocks, canonical
//! hashing, proof-of-work, and chain validation.
//!
//! This crate contains no I/O and no networking. It is pure computation
//! over cryptographic data structures.
//!
//! ## Key Types
//!
//! - [`Identity`] - RSA keypair that signs events; [`verify_event`] checks them
//! - [`Block`] - One sealed ledger entry, content-addressed by SHA-256
//! - [`Chain`] - The append-only block sequence owned by one node
//! - [`ProofOfWork`] - The nonce search that seals a block
//!
//! ## Canonicalization
//!
//! Block hashes are computed over a fixed canonical record; see the
//! [`canonical`] module for the exact byte layout.

pub mod block;
pub mod canonical;
pub mod chain;
pub mod error;
pub mod identity;
pub mod payload;
pub mod pow;

pub use block::{Block, GENESIS_PREVIOUS_HASH};
pub use canonical::{canonical_record, content_hash, meets_difficulty};
pub use chain::{check_successor, validate_chain, Chain};
pub use error::{IdentityError, SealError, ValidationError};
pub use identity::{verify_event, Identity};
pub use payload::{BlockData, LogPayload, GENESIS_MARKER};
pub use pow::{now_secs, CancelToken, ProofOfWork, Sealed};
