//! Block payloads: the signed event record and the genesis marker.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The literal `data` value of the genesis block.
pub const GENESIS_MARKER: &str = "Genesis Block";

/// A signed security event as submitted by a client.
///
/// Immutable once constructed. The exact textual form feeds the block
/// content hash, so field order is fixed: `event`, `public_key`, `signature`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogPayload {
    /// The event text that was signed.
    pub event: String,
    /// SPKI PEM encoding of the submitter's public key.
    pub public_key: String,
    /// Base64 RSA-PSS signature over the event text.
    pub signature: String,
}

impl LogPayload {
    /// The canonical textual form of this payload: its compact JSON
    /// encoding with fields in declaration order.
    ///
    /// This string is part of the cross-node compatibility surface; any
    /// change to it changes every block hash.
    pub fn canonical_json(&self) -> String {
        serde_json::to_string(self).expect("LogPayload serialization is infallible")
    }
}

/// The `data` field of a block: either the genesis marker or a log payload.
///
/// The wire format stores the genesis marker as a bare string and
/// payloads as objects, so serde impls are written by hand rather than
/// relying on an untagged derive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockData {
    /// The fixed marker carried by block 0.
    Genesis,
    /// A signed event payload.
    Log(LogPayload),
}

impl BlockData {
    /// The canonical text hashed into the block content hash.
    pub fn canonical_text(&self) -> String {
        match self {
            BlockData::Genesis => GENESIS_MARKER.to_string(),
            BlockData::Log(payload) => payload.canonical_json(),
        }
    }

    /// True for the genesis marker.
    pub fn is_genesis(&self) -> bool {
        matches!(self, BlockData::Genesis)
    }
}

impl Serialize for BlockData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            BlockData::Genesis => serializer.serialize_str(GENESIS_MARKER),
            BlockData::Log(payload) => payload.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for BlockData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Marker(String),
            Payload(LogPayload),
        }

        match Wire::deserialize(deserializer)? {
            Wire::Marker(s) if s == GENESIS_MARKER => Ok(BlockData::Genesis),
            Wire::Marker(s) => Err(serde::de::Error::custom(format!(
                "unknown block data marker: {s:?}"
            ))),
            Wire::Payload(payload) => Ok(BlockData::Log(payload)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_payload() -> LogPayload {
        LogPayload {
            event: "Test Log".into(),
            public_key: "pem".into(),
            signature: "c2ln".into(),
        }
    }

    #[test]
    fn test_canonical_json_field_order() {
        let json = sample_payload().canonical_json();
        assert_eq!(
            json,
            r#"{"event":"Test Log","public_key":"pem","signature":"c2ln"}"#
        );
    }

    #[test]
    fn test_canonical_json_escapes() {
        let payload = LogPayload {
            event: r#"say "hi""#.into(),
            public_key: "pem".into(),
            signature: "c2ln".into(),
        };
        assert_eq!(
            payload.canonical_json(),
            r#"{"event":"say \"hi\"","public_key":"pem","signature":"c2ln"}"#
        );
    }

    #[test]
    fn test_genesis_serializes_as_marker_string() {
        let json = serde_json::to_string(&BlockData::Genesis).unwrap();
        assert_eq!(json, r#""Genesis Block""#);
    }

    #[test]
    fn test_genesis_roundtrip() {
        let data: BlockData = serde_json::from_str(r#""Genesis Block""#).unwrap();
        assert!(data.is_genesis());
    }

    #[test]
    fn test_payload_roundtrip() {
        let data = BlockData::Log(sample_payload());
        let json = serde_json::to_string(&data).unwrap();
        let back: BlockData = serde_json::from_str(&json).unwrap();
        assert_eq!(data, back);
    }

    #[test]
    fn test_unknown_marker_rejected() {
        let result: Result<BlockData, _> = serde_json::from_str(r#""Some Other Marker""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_canonical_text_genesis() {
        assert_eq!(BlockData::Genesis.canonical_text(), "Genesis Block");
    }
}
