//! Log topic parsing.
//!
//! `topics[0]` of a non-anonymous event is keccak256 of its canonical
//! signature and is matched against the registry as-is. The remaining
//! topics are indexed parameters, one 32-byte word each.

use abidecoder_core::{
    error::DecodeError,
    types::{AbiType, AbiValue},
};
use alloy_primitives::B256;

use crate::codec;

/// Parse a hex topic into its 32-byte word.
pub fn parse_topic(topic: &str) -> Result<[u8; 32], DecodeError> {
    let invalid = |reason: String| DecodeError::InvalidTopic {
        topic: topic.to_string(),
        reason,
    };
    let bytes = codec::decode_hex(topic).map_err(|e| invalid(e.to_string()))?;
    <[u8; 32]>::try_from(bytes.as_slice())
        .map_err(|_| invalid(format!("expected 32 bytes, got {}", bytes.len())))
}

/// The event key carried in `topics[0]`, if present.
pub fn event_key(topics: &[String]) -> Option<Result<B256, DecodeError>> {
    let first = topics.first()?;
    Some(parse_topic(first).map(B256::from))
}

/// Decode an indexed parameter from its topic.
///
/// Value types are stored verbatim and decode like a head word. Reference
/// types (`string`, `bytes`, arrays, tuples) are stored as the keccak256 of
/// their encoding; the original value is unrecoverable, so the raw hash is
/// returned as `bytes32`.
pub fn decode_indexed(ty: &AbiType, topic: &str) -> Result<AbiValue, DecodeError> {
    let word = parse_topic(topic)?;
    if ty.is_value_type() {
        codec::decode_word(ty, &word)
    } else {
        Ok(AbiValue::FixedBytes(B256::from(word), 32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::Address;

    #[test]
    fn event_key_valid() {
        let topics = vec![
            "0xc42079f94a6350d7e6235f29174924f928cc2ac818eb64fed8004e115fbcca67".to_string(),
        ];
        let key = event_key(&topics).unwrap().unwrap();
        assert_eq!(key.as_slice()[0], 0xc4);
    }

    #[test]
    fn event_key_empty() {
        assert!(event_key(&[]).is_none());
    }

    #[test]
    fn short_topic_rejected() {
        let err = parse_topic("0xdeadbeef").unwrap_err();
        assert!(matches!(err, DecodeError::InvalidTopic { .. }));
    }

    #[test]
    fn indexed_address_uses_low_bytes() {
        let v = decode_indexed(
            &AbiType::Address,
            "0x000000000000000000000000E592427A0AECE92DE3EDEE1F18E0157C05861564",
        )
        .unwrap();
        let expected: Address = "0xe592427a0aece92de3edee1f18e0157c05861564".parse().unwrap();
        assert_eq!(v, AbiValue::Address(expected));
    }

    #[test]
    fn indexed_string_is_hash() {
        let topic = "0x9c22ff5f21f0b81b113e63f7db6da94fedef11b2119b4088b89664fb9a3cb658";
        let v = decode_indexed(&AbiType::String, topic).unwrap();
        assert!(matches!(v, AbiValue::FixedBytes(_, 32)));
    }
}
