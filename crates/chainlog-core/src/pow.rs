//! Proof-of-work sealing.
//!
//! A linear search over nonce values until the block content hash carries
//! the required zero prefix. Expected cost grows as 16^difficulty hash
//! evaluations, so the search supports cooperative cancellation and an
//! optional proof ceiling; both default off, leaving the search unbounded.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::canonical::{hash_record, meets_difficulty};
use crate::error::SealError;
use crate::payload::BlockData;

/// How many proofs to try between cancellation checks.
const CANCEL_CHECK_INTERVAL: u64 = 1024;

/// Cooperative cancellation signal for an in-flight seal.
///
/// Cloneable; all clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// A token that is never cancelled unless [`cancel`](Self::cancel) is called.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of any seal holding a clone of this token.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// True once [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Result of a successful seal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sealed {
    /// The winning nonce.
    pub proof: u64,
    /// The timestamp fixed at the start of the search.
    pub timestamp: i64,
}

/// Proof-of-work search parameters.
#[derive(Debug, Clone, Copy)]
pub struct ProofOfWork {
    difficulty: u32,
    ceiling: Option<u64>,
}

impl ProofOfWork {
    /// An unbounded search at the given difficulty.
    pub fn new(difficulty: u32) -> Self {
        Self {
            difficulty,
            ceiling: None,
        }
    }

    /// Bound the search: proofs beyond `ceiling` fail with
    /// [`SealError::Exhausted`] instead of livelocking.
    pub fn with_ceiling(mut self, ceiling: u64) -> Self {
        self.ceiling = Some(ceiling);
        self
    }

    /// The required zero-prefix length.
    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    /// Search for a proof sealing `(index, data, previous_hash)`.
    ///
    /// Picks the timestamp once at call time and holds it fixed for the
    /// whole search. CPU-bound with unbounded latency at high difficulty;
    /// callers should run it off the async executor.
    pub fn seal(
        &self,
        index: u64,
        data: &BlockData,
        previous_hash: &str,
        cancel: &CancelToken,
    ) -> Result<Sealed, SealError> {
        let timestamp = now_secs();
        self.seal_at(index, timestamp, data, previous_hash, cancel)
    }

    /// Search with an explicit timestamp (deterministic variant for tests
    /// and for re-sealing a known record).
    pub fn seal_at(
        &self,
        index: u64,
        timestamp: i64,
        data: &BlockData,
        previous_hash: &str,
        cancel: &CancelToken,
    ) -> Result<Sealed, SealError> {
        // The record prefix is stable across the search; only the decimal
        // proof suffix varies.
        let prefix = format!(
            "{index}{timestamp}{}{previous_hash}",
            data.canonical_text()
        );

        let mut proof: u64 = 0;
        loop {
            if proof % CANCEL_CHECK_INTERVAL == 0 && cancel.is_cancelled() {
                return Err(SealError::Cancelled);
            }
            if let Some(ceiling) = self.ceiling {
                if proof > ceiling {
                    return Err(SealError::Exhausted { ceiling });
                }
            }

            let hash = hash_record(&format!("{prefix}{proof}"));
            if meets_difficulty(&hash, self.difficulty) {
                return Ok(Sealed { proof, timestamp });
            }
            proof += 1;
        }
    }
}

/// Current time, Unix epoch seconds. A clock before the epoch reads as 0.
pub fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::content_hash;
    use crate::payload::LogPayload;

    fn sample_data() -> BlockData {
        BlockData::Log(LogPayload {
            event: "Test Log".into(),
            public_key: "pem".into(),
            signature: "c2ln".into(),
        })
    }

    #[test]
    fn test_difficulty_zero_accepts_first_proof() {
        let pow = ProofOfWork::new(0);
        let sealed = pow
            .seal_at(1, 1000, &sample_data(), "0", &CancelToken::new())
            .unwrap();
        assert_eq!(sealed.proof, 0);
        assert_eq!(sealed.timestamp, 1000);
    }

    #[test]
    fn test_sealed_proof_meets_difficulty() {
        let pow = ProofOfWork::new(1);
        let data = sample_data();
        let sealed = pow
            .seal_at(1, 1736870401, &data, "abc", &CancelToken::new())
            .unwrap();

        let hash = content_hash(1, sealed.timestamp, &data, "abc", sealed.proof);
        assert!(hash.starts_with('0'));
    }

    #[test]
    fn test_sealed_proof_is_minimal() {
        let pow = ProofOfWork::new(1);
        let data = sample_data();
        let sealed = pow
            .seal_at(2, 1736870402, &data, "00ff", &CancelToken::new())
            .unwrap();

        for earlier in 0..sealed.proof {
            let hash = content_hash(2, sealed.timestamp, &data, "00ff", earlier);
            assert!(!hash.starts_with('0'), "proof {earlier} should not seal");
        }
    }

    #[test]
    fn test_ceiling_exhaustion() {
        // Difficulty 8 will not be met within 16 proofs.
        let pow = ProofOfWork::new(8).with_ceiling(16);
        let result = pow.seal_at(1, 1000, &sample_data(), "0", &CancelToken::new());
        assert_eq!(result, Err(SealError::Exhausted { ceiling: 16 }));
    }

    #[test]
    fn test_now_secs_is_nonnegative() {
        assert!(now_secs() >= 0);
    }

    #[test]
    fn test_pre_cancelled_token() {
        let cancel = CancelToken::new();
        cancel.cancel();

        let pow = ProofOfWork::new(8);
        let result = pow.seal_at(1, 1000, &sample_data(), "0", &cancel);
        assert_eq!(result, Err(SealError::Cancelled));
    }
}
