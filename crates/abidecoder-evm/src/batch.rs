//! Rayon-powered batch log decoding.
//!
//! Output is identical to `EvmLogDecoder::decode_logs`, including order and
//! the retention filter; only the per-log work is spread across threads.

use abidecoder_core::{
    event::{DecodedLog, LogEntry},
    outcome::DecodeOutcome,
};
use rayon::prelude::*;

use crate::decoder::EvmLogDecoder;

/// Decode `entries` in parallel.
pub fn decode_logs_par(
    decoder: &EvmLogDecoder<'_>,
    entries: &[LogEntry],
) -> Vec<DecodeOutcome<DecodedLog>> {
    let decoded: Vec<Option<DecodeOutcome<DecodedLog>>> = entries
        .par_iter()
        .map(|entry| decoder.decode_log(entry))
        .collect();

    decoded
        .into_iter()
        .flatten()
        .filter(|outcome| decoder.retains(outcome))
        .collect()
}

/// Decode `entries` in parallel, `chunk_size` logs per task.
pub fn decode_logs_chunked(
    decoder: &EvmLogDecoder<'_>,
    entries: &[LogEntry],
    chunk_size: usize,
) -> Vec<DecodeOutcome<DecodedLog>> {
    entries
        .par_chunks(chunk_size.max(1))
        .map(|chunk| decoder.decode_logs(chunk))
        .collect::<Vec<_>>()
        .into_iter()
        .flatten()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use abidecoder_core::item::{EventParam, InterfaceItem};
    use abidecoder_registry::SignatureRegistry;

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

    fn entries() -> Vec<LogEntry> {
        (0..64u64)
            .map(|i| {
                let topics = if i % 5 == 0 {
                    vec![]
                } else if i % 3 == 0 {
                    vec![format!("0x{}", "ee".repeat(32))]
                } else {
                    vec![
                        "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef".into(),
                        format!("0x{:064x}", i),
                        format!("0x{:064x}", i + 1),
                    ]
                };
                LogEntry::new("0x00", topics, format!("0x{:064x}", i * 1000))
            })
            .collect()
    }

    #[test]
    fn parallel_matches_sequential() {
        let reg = registry();
        let logs = entries();
        for keep in [false, true] {
            let dec = EvmLogDecoder::new(&reg).with_retention(keep);
            let seq = dec.decode_logs(&logs);
            assert_eq!(decode_logs_par(&dec, &logs), seq);
            assert_eq!(decode_logs_chunked(&dec, &logs, 7), seq);
        }
    }

    #[test]
    fn zero_chunk_size_is_clamped() {
        let reg = registry();
        let dec = EvmLogDecoder::new(&reg);
        let logs = entries();
        assert_eq!(decode_logs_chunked(&dec, &logs, 0), dec.decode_logs(&logs));
    }
}
