//! `EvmLogDecoder` — decodes event logs against a signature registry.
//!
//! - topics[0] → event key, looked up in the registry
//! - topics[1..] → indexed parameters, one per topic, in declared order
//! - `data` → non-indexed parameters, ABI-encoded as one tuple
//!
//! Results list parameters in declared order, not indexed-first.

use abidecoder_core::{
    call::DecodedParam,
    error::DecodeError,
    event::{DecodedLog, LogEntry},
    item::{EventParam, InterfaceItem},
    outcome::DecodeOutcome,
    types::AbiType,
};
use abidecoder_registry::SignatureRegistry;

use crate::{codec, normalizer, topic};

/// Log decoder over a borrowed registry.
#[derive(Debug, Clone, Copy)]
pub struct EvmLogDecoder<'r> {
    registry: &'r SignatureRegistry,
    keep_non_decoded: bool,
}

impl<'r> EvmLogDecoder<'r> {
    /// A decoder that discards logs it cannot decode.
    pub fn new(registry: &'r SignatureRegistry) -> Self {
        Self {
            registry,
            keep_non_decoded: false,
        }
    }

    /// Keep (`true`) or drop (`false`) unresolved and failed logs in
    /// `decode_logs` output.
    pub fn with_retention(mut self, keep_non_decoded: bool) -> Self {
        self.keep_non_decoded = keep_non_decoded;
        self
    }

    /// Whether unresolved and failed logs are kept.
    pub fn keeps_non_decoded(&self) -> bool {
        self.keep_non_decoded
    }

    /// Decode a batch of logs, in input order.
    ///
    /// Logs without topics never appear. Logs that do not decode appear as
    /// `Unresolved`/`Failed` only when retention is on.
    pub fn decode_logs(&self, entries: &[LogEntry]) -> Vec<DecodeOutcome<DecodedLog>> {
        entries
            .iter()
            .filter_map(|entry| self.decode_log(entry))
            .filter(|outcome| self.retains(outcome))
            .collect()
    }

    /// Decode a single log. `None` when the log has no topics.
    pub fn decode_log(&self, entry: &LogEntry) -> Option<DecodeOutcome<DecodedLog>> {
        let key = match topic::event_key(&entry.topics)? {
            Ok(key) => key,
            Err(e) => {
                tracing::warn!(address = %entry.address, error = %e, "malformed topics[0]");
                return Some(DecodeOutcome::Failed(e));
            }
        };

        let Some(item) = self.registry.lookup_topic(&key) else {
            tracing::debug!(address = %entry.address, topic = %key, "no event for topic");
            return Some(DecodeOutcome::Unresolved);
        };

        let outcome = decode_with_item(item, entry);
        if let Err(e) = &outcome {
            tracing::warn!(
                address = %entry.address,
                event = item.name().unwrap_or_default(),
                error = %e,
                "failed to decode log"
            );
        }
        Some(outcome.into())
    }

    pub(crate) fn retains(&self, outcome: &DecodeOutcome<DecodedLog>) -> bool {
        self.keep_non_decoded || outcome.is_decoded()
    }
}

fn decode_with_item(item: &InterfaceItem, entry: &LogEntry) -> Result<DecodedLog, DecodeError> {
    let inputs: &[EventParam] = item.event_inputs().unwrap_or(&[]);

    let data_types = inputs
        .iter()
        .filter(|p| !p.indexed)
        .map(|p| AbiType::from_param(&p.param))
        .collect::<Result<Vec<_>, _>>()?;
    let data = codec::decode_hex(&entry.data)?;
    let mut data_values = codec::decode_params(&data_types, &data)?.into_iter();

    let mut topic_index = 1;
    let mut params = Vec::with_capacity(inputs.len());
    for input in inputs {
        let param = &input.param;
        let value = if input.indexed {
            let topic = entry
                .topics
                .get(topic_index)
                .ok_or_else(|| DecodeError::MissingTopic {
                    index: topic_index,
                    param: param.name.clone(),
                })?;
            topic_index += 1;
            topic::decode_indexed(&AbiType::from_param(param)?, topic)?
        } else {
            data_values.next().ok_or_else(|| DecodeError::InvalidType {
                ty: param.ty.clone(),
                reason: "no value decoded from log data".into(),
            })?
        };
        params.push(DecodedParam {
            name: param.name.clone(),
            ty: param.ty.clone(),
            value: normalizer::normalize_param(value, param),
        });
    }

    Ok(DecodedLog {
        name: item.name().unwrap_or_default().to_string(),
        address: entry.address.clone(),
        params,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use abidecoder_core::{item::EventParam, types::NormalizedValue};

    const TRANSFER_TOPIC: &str =
        "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef";

    fn registry() -> SignatureRegistry {
        let mut reg = SignatureRegistry::new();
        reg.add(&[InterfaceItem::event(
            "Transfer",
            vec![
                EventParam::indexed("from", "address"),
                EventParam::indexed("to", "address"),
                EventParam::data("value", "uint256"),
            ],
        )])
        .unwrap();
        reg
    }

    fn erc20_transfer() -> LogEntry {
        LogEntry::new(
            "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
            vec![
                TRANSFER_TOPIC.into(),
                "0x000000000000000000000000d8da6bf26964af9d7eed9e03e53415d37aa96045".into(),
                "0x000000000000000000000000ab5801a7d398351b8be11c439e05c5b3259aec9b".into(),
            ],
            "0x0000000000000000000000000000000000000000000000000de0b6b3a7640000",
        )
    }

    #[test]
    fn decodes_erc20_transfer() {
        let reg = registry();
        let dec = EvmLogDecoder::new(&reg);
        let log = dec.decode_log(&erc20_transfer()).unwrap().into_decoded().unwrap();
        assert_eq!(log.name, "Transfer");
        assert_eq!(log.address, "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48");
        let names: Vec<_> = log.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["from", "to", "value"]);
        assert_eq!(
            log.param("from").and_then(|v| v.as_address()),
            Some("0xd8da6bf26964af9d7eed9e03e53415d37aa96045")
        );
        assert_eq!(
            log.param("value").and_then(|v| v.as_number()),
            Some("1000000000000000000")
        );
    }

    #[test]
    fn declared_order_is_kept_when_indexed_params_come_last() {
        let mut reg = SignatureRegistry::new();
        reg.add(&[InterfaceItem::event(
            "Transfer",
            vec![
                EventParam::data("value", "uint256"),
                EventParam::indexed("from", "address"),
                EventParam::indexed("to", "address"),
            ],
        )])
        .unwrap();
        // Signature differs from the ERC-20 one, so compute its topic.
        let topic = reg.keys().keys().next().unwrap().to_string();
        let mut entry = erc20_transfer();
        entry.topics[0] = topic;

        let log = EvmLogDecoder::new(&reg)
            .decode_log(&entry)
            .unwrap()
            .into_decoded()
            .unwrap();
        let names: Vec<_> = log.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["value", "from", "to"]);
    }

    #[test]
    fn extra_topics_are_ignored() {
        let reg = registry();
        let mut entry = erc20_transfer();
        entry.topics.push(format!("0x{}", "11".repeat(32)));
        let outcome = EvmLogDecoder::new(&reg).decode_log(&entry).unwrap();
        assert!(outcome.is_decoded());
    }

    #[test]
    fn missing_topic_fails() {
        let reg = registry();
        let mut entry = erc20_transfer();
        entry.topics.truncate(2);
        let outcome = EvmLogDecoder::new(&reg).decode_log(&entry).unwrap();
        assert_eq!(
            outcome.error(),
            Some(&DecodeError::MissingTopic {
                index: 2,
                param: "to".into()
            })
        );
    }

    #[test]
    fn empty_topics_are_dropped_in_both_modes() {
        let reg = registry();
        let entry = LogEntry::new("0x1234567890abcdef1234567890abcdef12345678", vec![], "0x");
        let discard = EvmLogDecoder::new(&reg);
        assert!(discard.decode_logs(&[entry.clone()]).is_empty());
        let keep = EvmLogDecoder::new(&reg).with_retention(true);
        assert!(keep.decode_logs(&[entry]).is_empty());
    }

    #[test]
    fn retention_controls_unresolved_entries() {
        let reg = registry();
        let unknown = LogEntry::new(
            "0x1234567890abcdef1234567890abcdef12345678",
            vec![format!("0x{}", "00".repeat(32))],
            "0x",
        );
        let entries = vec![unknown, erc20_transfer()];

        let discarded = EvmLogDecoder::new(&reg).decode_logs(&entries);
        assert_eq!(discarded.len(), 1);
        assert!(discarded[0].is_decoded());

        let kept = EvmLogDecoder::new(&reg).with_retention(true).decode_logs(&entries);
        assert_eq!(kept.len(), 2);
        assert!(kept[0].is_unresolved());
        assert!(kept[1].is_decoded());
    }

    #[test]
    fn truncated_data_is_failed_not_panic() {
        let reg = registry();
        let mut entry = erc20_transfer();
        entry.data = "0x00".into();
        let outcome = EvmLogDecoder::new(&reg).decode_log(&entry).unwrap();
        assert!(matches!(outcome, DecodeOutcome::Failed(DecodeError::BufferTooShort { .. })));
        assert!(EvmLogDecoder::new(&reg).decode_logs(&[entry]).is_empty());
    }

    #[test]
    fn indexed_dynamic_param_surfaces_hash() {
        let mut reg = SignatureRegistry::new();
        reg.add(&[InterfaceItem::event(
            "Named",
            vec![EventParam::indexed("label", "string")],
        )])
        .unwrap();
        let key = reg.keys().keys().next().unwrap().to_string();
        let hash = format!("0x{}", "ab".repeat(32));
        let entry = LogEntry::new("0x00", vec![key, hash.clone()], "0x");
        let log = EvmLogDecoder::new(&reg)
            .decode_log(&entry)
            .unwrap()
            .into_decoded()
            .unwrap();
        assert_eq!(log.param("label"), Some(&NormalizedValue::Bytes(hash)));
    }
}
