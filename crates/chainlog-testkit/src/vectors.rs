//! Golden test vectors for deterministic verification.
//!
//! These vectors pin the canonical record layout and its SHA-256 digest so
//! that any implementation hashing blocks can be checked byte-for-byte.
//! The expected values were computed independently with `sha256sum`.

use chainlog_core::{content_hash, BlockData, LogPayload};

/// A golden test vector: one fully specified block state and its expected
/// canonical record and hash.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Block index.
    pub index: u64,
    /// Seal timestamp, Unix epoch seconds.
    pub timestamp: i64,
    /// Event text; `None` means the genesis marker.
    pub event: Option<&'static str>,
    /// Submitter public key (opaque here; hashing does not parse it).
    pub public_key: &'static str,
    /// Submitter signature (opaque here).
    pub signature: &'static str,
    /// Predecessor hash.
    pub previous_hash: &'static str,
    /// Proof-of-work nonce.
    pub proof: u64,
    /// Expected canonical record string.
    pub expected_record: &'static str,
    /// Expected hex SHA-256 content hash.
    pub expected_hash: &'static str,
}

/// Get all golden test vectors.
///
/// The vectors form a short chain: each one's `previous_hash` is the
/// expected hash of the one before it.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "genesis block",
            index: 0,
            timestamp: 1736870400,
            event: None,
            public_key: "",
            signature: "",
            previous_hash: "0",
            proof: 0,
            expected_record: "01736870400Genesis Block00",
            expected_hash: "573bba5799e27c51129b973f68340fe6ca9603fc626beb897fbedc975825c994",
        },
        GoldenVector {
            name: "signed security event",
            index: 1,
            timestamp: 1736870401,
            event: Some("SECURITY_ALERT: failed login"),
            public_key: "test-key-pem",
            signature: "c2ln",
            previous_hash: "573bba5799e27c51129b973f68340fe6ca9603fc626beb897fbedc975825c994",
            proof: 7,
            expected_record: "11736870401{\"event\":\"SECURITY_ALERT: failed login\",\"public_key\":\"test-key-pem\",\"signature\":\"c2ln\"}573bba5799e27c51129b973f68340fe6ca9603fc626beb897fbedc975825c9947",
            expected_hash: "61860a12049d71df3e596140fc9b088698ac1e98a0e5c92b1ef3394108be71e7",
        },
        GoldenVector {
            name: "event text needing JSON escapes",
            index: 2,
            timestamp: 1736870402,
            event: Some("line1\nline2 \"quoted\""),
            public_key: "k",
            signature: "s",
            previous_hash: "61860a12049d71df3e596140fc9b088698ac1e98a0e5c92b1ef3394108be71e7",
            proof: 0,
            expected_record: "21736870402{\"event\":\"line1\\nline2 \\\"quoted\\\"\",\"public_key\":\"k\",\"signature\":\"s\"}61860a12049d71df3e596140fc9b088698ac1e98a0e5c92b1ef3394108be71e70",
            expected_hash: "a21f1bb30b6311461f5b17b8760d8b2061b748543f592b094b5d357823db25eb",
        },
    ]
}

/// Build the block data a vector describes.
pub fn vector_data(vector: &GoldenVector) -> BlockData {
    match vector.event {
        None => BlockData::Genesis,
        Some(event) => BlockData::Log(LogPayload {
            event: event.to_string(),
            public_key: vector.public_key.to_string(),
            signature: vector.signature.to_string(),
        }),
    }
}

/// Verify all golden vectors against the local hashing code.
///
/// Returns `(name, matches, computed_hash)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| {
            let data = vector_data(v);
            let hash = content_hash(v.index, v.timestamp, &data, v.previous_hash, v.proof);
            let matches = hash == v.expected_hash;
            (v.name.to_string(), matches, hash)
        })
        .collect()
}
