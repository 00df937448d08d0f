//! Block: one sealed entry of the ledger.

use serde::{Deserialize, Serialize};

use crate::canonical::content_hash;
use crate::payload::BlockData;

/// The `previous_hash` sentinel carried by the genesis block.
pub const GENESIS_PREVIOUS_HASH: &str = "0";

/// A sealed ledger entry. Immutable once constructed.
///
/// Invariant for any block accepted into a chain:
/// `hash == content_hash(index, timestamp, data, previous_hash, proof)`.
///
/// Field order is part of the wire compatibility surface and must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Position in the chain; genesis is 0.
    pub index: u64,
    /// Seal time, Unix epoch seconds.
    pub timestamp: i64,
    /// The genesis marker or a signed log payload.
    pub data: BlockData,
    /// Hex hash of the immediate predecessor, `"0"` for genesis.
    pub previous_hash: String,
    /// Proof-of-work nonce.
    pub proof: u64,
    /// Hex SHA-256 content hash over all other fields.
    pub hash: String,
}

impl Block {
    /// Build a block, computing its hash from the other fields.
    pub fn new(
        index: u64,
        timestamp: i64,
        data: BlockData,
        previous_hash: String,
        proof: u64,
    ) -> Self {
        let hash = content_hash(index, timestamp, &data, &previous_hash, proof);
        Self {
            index,
            timestamp,
            data,
            previous_hash,
            proof,
            hash,
        }
    }

    /// The fixed genesis block for a given creation time.
    pub fn genesis(timestamp: i64) -> Self {
        Self::new(
            0,
            timestamp,
            BlockData::Genesis,
            GENESIS_PREVIOUS_HASH.to_string(),
            0,
        )
    }

    /// Recompute the content hash from the stored fields.
    ///
    /// Differs from `self.hash` iff the block was mutated after sealing.
    pub fn computed_hash(&self) -> String {
        content_hash(
            self.index,
            self.timestamp,
            &self.data,
            &self.previous_hash,
            self.proof,
        )
    }
}
