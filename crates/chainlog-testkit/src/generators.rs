//! Proptest generators for property-based testing.

use proptest::prelude::*;

use chainlog_core::{Block, BlockData, LogPayload};

/// Generate an event string, including ones that need JSON escaping.
pub fn event() -> impl Strategy<Value = String> {
    ".{0,128}"
}

/// Generate a lowercase hex string shaped like a content hash.
pub fn hex_hash() -> impl Strategy<Value = String> {
    "[0-9a-f]{64}"
}

/// Generate a log payload with arbitrary (not necessarily verifiable)
/// key and signature fields; hashing treats them as opaque text.
pub fn log_payload() -> impl Strategy<Value = LogPayload> {
    (event(), "[A-Za-z0-9+/=\\-\n ]{0,64}", "[A-Za-z0-9+/=]{0,64}").prop_map(
        |(event, public_key, signature)| LogPayload {
            event,
            public_key,
            signature,
        },
    )
}

/// Generate block data: mostly signed payloads, occasionally genesis.
pub fn block_data() -> impl Strategy<Value = BlockData> {
    prop_oneof![
        1 => Just(BlockData::Genesis),
        9 => log_payload().prop_map(BlockData::Log),
    ]
}

/// Generate a reasonable timestamp.
pub fn timestamp() -> impl Strategy<Value = i64> {
    0i64..=2_000_000_000
}

/// Generate a difficulty cheap enough to seal inside a test.
pub fn difficulty() -> impl Strategy<Value = u32> {
    0u32..=2
}

/// Parameters for generating a block.
#[derive(Debug, Clone)]
pub struct BlockParams {
    pub index: u64,
    pub timestamp: i64,
    pub data: BlockData,
    pub previous_hash: String,
    pub proof: u64,
}

impl Arbitrary for BlockParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            0u64..=1_000_000,
            timestamp(),
            block_data(),
            hex_hash(),
            0u64..=1_000_000,
        )
            .prop_map(|(index, timestamp, data, previous_hash, proof)| BlockParams {
                index,
                timestamp,
                data,
                previous_hash,
                proof,
            })
            .boxed()
    }
}

/// Generate a block from parameters, hash computed from the fields.
pub fn block_from_params(params: &BlockParams) -> Block {
    Block::new(
        params.index,
        params.timestamp,
        params.data.clone(),
        params.previous_hash.clone(),
        params.proof,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn test_block_hash_deterministic(params: BlockParams) {
            let b1 = block_from_params(&params);
            let b2 = block_from_params(&params);
            prop_assert_eq!(b1.hash, b2.hash);
        }

        #[test]
        fn test_block_wire_roundtrip(params: BlockParams) {
            let block = block_from_params(&params);
            let json = serde_json::to_string(&block).unwrap();
            let back: Block = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(block, back);
        }

        #[test]
        fn test_hash_invariant_survives_roundtrip(params: BlockParams) {
            let block = block_from_params(&params);
            let json = serde_json::to_string(&block).unwrap();
            let back: Block = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(back.hash.clone(), back.computed_hash());
        }

        #[test]
        fn test_distinct_payloads_distinct_hashes(
            params: BlockParams,
            other in event(),
        ) {
            let block = block_from_params(&params);

            let mut changed = params.clone();
            changed.data = BlockData::Log(LogPayload {
                event: other,
                public_key: "pk".into(),
                signature: "sig".into(),
            });
            let changed = block_from_params(&changed);

            if changed.data != block.data {
                prop_assert_ne!(block.hash, changed.hash);
            }
        }
    }
}
