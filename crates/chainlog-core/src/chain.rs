//! Chain: the append-only block sequence and its validation rules.

use crate::block::Block;
use crate::canonical::meets_difficulty;
use crate::error::ValidationError;
use crate::pow::now_secs;

/// Check whether `candidate` validly extends `previous`.
///
/// The four checks, in order:
/// 1. index continuity
/// 2. hash linkage to the predecessor
/// 3. content-hash integrity (tamper detection: the stored hash is
///    recomputed from the candidate's own fields)
/// 4. proof-of-work prefix at the chain's difficulty
pub fn check_successor(
    candidate: &Block,
    previous: &Block,
    difficulty: u32,
) -> Result<(), ValidationError> {
    let expected = previous.index + 1;
    if candidate.index != expected {
        return Err(ValidationError::IndexMismatch {
            expected,
            got: candidate.index,
        });
    }

    if candidate.previous_hash != previous.hash {
        return Err(ValidationError::PreviousHashMismatch);
    }

    if candidate.hash != candidate.computed_hash() {
        return Err(ValidationError::ContentHashMismatch);
    }

    if !meets_difficulty(&candidate.hash, difficulty) {
        return Err(ValidationError::DifficultyNotMet { difficulty });
    }

    Ok(())
}

/// One node's ledger: an ordered block sequence plus its fixed difficulty.
///
/// Owned exclusively; callers needing shared mutation must put it behind a
/// mutex and hold the lock across the whole read-validate-append sequence.
/// Committed blocks are never truncated or reordered.
#[derive(Debug, Clone)]
pub struct Chain {
    blocks: Vec<Block>,
    difficulty: u32,
}

impl Chain {
    /// Create a chain with a genesis block stamped at the current time.
    ///
    /// Two nodes created this way will not share a genesis hash; use
    /// [`with_genesis_timestamp`](Self::with_genesis_timestamp) when nodes
    /// must exchange blocks.
    pub fn new(difficulty: u32) -> Self {
        Self::with_genesis_timestamp(difficulty, now_secs())
    }

    /// Create a chain whose genesis carries an agreed timestamp.
    pub fn with_genesis_timestamp(difficulty: u32, timestamp: i64) -> Self {
        Self {
            blocks: vec![Block::genesis(timestamp)],
            difficulty,
        }
    }

    /// The difficulty fixed at creation.
    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    /// Number of blocks, genesis included.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Always false in practice: a chain is constructed holding its
    /// genesis block and committed blocks are never truncated.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// The committed blocks, genesis first.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// The current tail.
    pub fn tip(&self) -> &Block {
        debug_assert!(!self.blocks.is_empty());
        self.blocks.last().expect("chain holds at least genesis")
    }

    /// Append `candidate` if it validly extends the current tail.
    ///
    /// On failure nothing is mutated; the error names the first check that
    /// failed. Rejection is a normal outcome, not a fault.
    pub fn append(&mut self, candidate: Block) -> Result<(), ValidationError> {
        check_successor(&candidate, self.tip(), self.difficulty)?;
        self.blocks.push(candidate);
        Ok(())
    }

    /// Validate an externally supplied block sequence at this chain's
    /// difficulty.
    ///
    /// Every adjacent pair must satisfy [`check_successor`]. The first
    /// block is accepted unconditionally; a genesis block's own hash and
    /// proof-of-work are never re-verified.
    pub fn validate(&self, blocks: &[Block]) -> bool {
        validate_chain(blocks, self.difficulty)
    }
}

/// Whole-chain validation; see [`Chain::validate`].
pub fn validate_chain(blocks: &[Block], difficulty: u32) -> bool {
    if blocks.is_empty() {
        return false;
    }
    blocks
        .windows(2)
        .all(|pair| check_successor(&pair[1], &pair[0], difficulty).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::{BlockData, LogPayload};
    use crate::pow::{CancelToken, ProofOfWork};

    fn payload(event: &str) -> BlockData {
        BlockData::Log(LogPayload {
            event: event.into(),
            public_key: "pem".into(),
            signature: "c2ln".into(),
        })
    }

    /// Seal a valid successor for the current tip.
    fn sealed_successor(chain: &Chain, data: BlockData) -> Block {
        let tip = chain.tip();
        let pow = ProofOfWork::new(chain.difficulty());
        let sealed = pow
            .seal(tip.index + 1, &data, &tip.hash, &CancelToken::new())
            .unwrap();
        Block::new(
            tip.index + 1,
            sealed.timestamp,
            data,
            tip.hash.clone(),
            sealed.proof,
        )
    }

    #[test]
    fn test_new_chain_has_genesis() {
        let chain = Chain::new(1);
        assert_eq!(chain.len(), 1);
        assert!(!chain.is_empty());
        assert!(chain.blocks()[0].data.is_genesis());
        assert_eq!(chain.tip().index, 0);
    }

    #[test]
    fn test_append_test_log_at_difficulty_one() {
        let mut chain = Chain::new(1);
        let block = sealed_successor(&chain, payload("Test Log"));

        chain.append(block).unwrap();
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.blocks()[1].previous_hash, chain.blocks()[0].hash);
    }

    #[test]
    fn test_append_is_monotonic() {
        let mut chain = Chain::new(1);
        for i in 0..3 {
            let block = sealed_successor(&chain, payload(&format!("Log {i}")));
            chain.append(block).unwrap();
        }
        assert_eq!(chain.len(), 4);
        for (i, block) in chain.blocks().iter().enumerate() {
            assert_eq!(block.index, i as u64);
        }
        assert!(chain.validate(chain.blocks()));
    }

    #[test]
    fn test_reject_index_mismatch() {
        let mut chain = Chain::new(0);
        let mut block = sealed_successor(&chain, payload("skip"));
        block = Block::new(
            5,
            block.timestamp,
            block.data,
            block.previous_hash,
            block.proof,
        );

        let result = chain.append(block);
        assert_eq!(
            result,
            Err(ValidationError::IndexMismatch { expected: 1, got: 5 })
        );
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn test_reject_previous_hash_mismatch() {
        let mut chain = Chain::new(0);
        let block = Block::new(1, now_secs(), payload("fake"), "wrong_hash".into(), 0);

        let result = chain.append(block);
        assert_eq!(result, Err(ValidationError::PreviousHashMismatch));
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn test_reject_tampered_content_hash() {
        let mut chain = Chain::new(0);
        let mut block = sealed_successor(&chain, payload("original"));
        // Mutate data after sealing without recomputing the hash.
        block.data = payload("tampered");

        let result = chain.append(block);
        assert_eq!(result, Err(ValidationError::ContentHashMismatch));
    }

    #[test]
    fn test_reject_insufficient_difficulty() {
        let mut chain = Chain::with_genesis_timestamp(4, 1736870400);
        // A correctly hashed block whose proof was never searched: proof 0
        // will (for this fixed record) not carry four leading zeros.
        let tip_hash = chain.tip().hash.clone();
        let block = Block::new(1, 1736870401, payload("weak"), tip_hash, 0);
        assert!(!block.hash.starts_with("0000"), "fixture proof must be weak");

        let result = chain.append(block);
        assert_eq!(result, Err(ValidationError::DifficultyNotMet { difficulty: 4 }));
    }

    #[test]
    fn test_race_only_one_append_wins() {
        let mut chain = Chain::new(1);
        // Two submissions sealed against the same tail.
        let first = sealed_successor(&chain, payload("first"));
        let second = sealed_successor(&chain, payload("second"));

        chain.append(first).unwrap();
        let result = chain.append(second);
        assert!(result.is_err(), "stale candidate must be rejected");
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn test_validate_chain_detects_tamper() {
        let mut chain = Chain::new(1);
        for i in 0..2 {
            let block = sealed_successor(&chain, payload(&format!("Log {i}")));
            chain.append(block).unwrap();
        }
        assert!(chain.validate(chain.blocks()));

        let mut tampered: Vec<Block> = chain.blocks().to_vec();
        tampered[1].data = payload("Hacked");
        assert!(!chain.validate(&tampered));
    }

    #[test]
    fn test_validate_chain_empty_is_invalid() {
        assert!(!validate_chain(&[], 1));
    }

    #[test]
    fn test_validate_chain_genesis_only() {
        // Genesis is accepted unconditionally, even at high difficulty.
        let chain = Chain::with_genesis_timestamp(4, 1736870400);
        assert!(chain.validate(chain.blocks()));
    }
}
