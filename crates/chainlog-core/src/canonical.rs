//! Canonical serialization for block content hashing.
//!
//! The canonical record is the exact byte string fed to SHA-256 and must be
//! reproducible byte-for-byte across implementations:
//!
//! ```text
//! {index}{timestamp}{data}{previous_hash}{proof}
//! ```
//!
//! - `index`, `timestamp`, `proof`: decimal, no padding, no separators
//! - `data`: [`BlockData::canonical_text`] — the literal `Genesis Block`
//!   marker, or the payload's compact JSON with fields in the order
//!   `event`, `public_key`, `signature`
//! - `previous_hash`: the lowercase hex hash of the predecessor (or `"0"`)
//!
//! The content hash is the lowercase hex SHA-256 digest of that record.
//! Any divergence here breaks cross-node validation, so this form is fixed.

use sha2::{Digest, Sha256};

use crate::payload::BlockData;

/// Build the canonical record string for one block state.
pub fn canonical_record(
    index: u64,
    timestamp: i64,
    data: &BlockData,
    previous_hash: &str,
    proof: u64,
) -> String {
    format!(
        "{index}{timestamp}{}{previous_hash}{proof}",
        data.canonical_text()
    )
}

/// Hex SHA-256 of the canonical record.
///
/// Pure and deterministic: equal inputs always yield an identical digest.
pub fn content_hash(
    index: u64,
    timestamp: i64,
    data: &BlockData,
    previous_hash: &str,
    proof: u64,
) -> String {
    hash_record(&canonical_record(index, timestamp, data, previous_hash, proof))
}

/// Hash an already-built canonical record.
///
/// Split out so the proof-of-work loop can pre-render the stable prefix
/// of the record once and vary only the proof suffix.
pub fn hash_record(record: &str) -> String {
    let digest = Sha256::digest(record.as_bytes());
    hex::encode(digest)
}

/// True iff `hash` starts with `difficulty` ASCII `'0'` characters.
pub fn meets_difficulty(hash: &str, difficulty: u32) -> bool {
    let difficulty = difficulty as usize;
    hash.len() >= difficulty && hash.bytes().take(difficulty).all(|b| b == b'0')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::LogPayload;
    use proptest::prelude::*;

    fn sample_data() -> BlockData {
        BlockData::Log(LogPayload {
            event: "Test Log".into(),
            public_key: "pem".into(),
            signature: "c2ln".into(),
        })
    }

    #[test]
    fn test_genesis_record_layout() {
        let record = canonical_record(0, 1736870400, &BlockData::Genesis, "0", 0);
        assert_eq!(record, "01736870400Genesis Block00");
    }

    #[test]
    fn test_content_hash_deterministic() {
        let h1 = content_hash(1, 1736870401, &sample_data(), "abc", 7);
        let h2 = content_hash(1, 1736870401, &sample_data(), "abc", 7);
        assert_eq!(h1, h2);
        assert_eq!(h1.len(), 64);
    }

    #[test]
    fn test_each_field_changes_digest() {
        let base = content_hash(1, 1736870401, &sample_data(), "abc", 7);

        assert_ne!(base, content_hash(2, 1736870401, &sample_data(), "abc", 7));
        assert_ne!(base, content_hash(1, 1736870402, &sample_data(), "abc", 7));
        assert_ne!(base, content_hash(1, 1736870401, &BlockData::Genesis, "abc", 7));
        assert_ne!(base, content_hash(1, 1736870401, &sample_data(), "abd", 7));
        assert_ne!(base, content_hash(1, 1736870401, &sample_data(), "abc", 8));
    }

    #[test]
    fn test_meets_difficulty() {
        assert!(meets_difficulty("00abc", 2));
        assert!(meets_difficulty("00abc", 0));
        assert!(!meets_difficulty("00abc", 3));
        assert!(!meets_difficulty("0", 2));
        assert!(!meets_difficulty("a0", 1));
    }

    proptest! {
        #[test]
        fn prop_content_hash_deterministic(
            index in 0u64..1_000_000,
            timestamp in 0i64..=2_000_000_000,
            proof in 0u64..1_000_000,
            event in ".{0,64}",
            prev in "[0-9a-f]{0,64}",
        ) {
            let data = BlockData::Log(LogPayload {
                event,
                public_key: "pem".into(),
                signature: "c2ln".into(),
            });
            let h1 = content_hash(index, timestamp, &data, &prev, proof);
            let h2 = content_hash(index, timestamp, &data, &prev, proof);
            prop_assert_eq!(h1, h2);
        }

        #[test]
        fn prop_proof_changes_digest(
            proof in 0u64..1_000_000,
        ) {
            let data = sample_data();
            let h1 = content_hash(1, 1000, &data, "0", proof);
            let h2 = content_hash(1, 1000, &data, "0", proof + 1);
            prop_assert_ne!(h1, h2);
        }
    }
}
