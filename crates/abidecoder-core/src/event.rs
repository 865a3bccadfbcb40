//! Raw log entries and decoded logs.

use crate::call::DecodedParam;
use crate::types::NormalizedValue;
use serde::{Deserialize, Serialize};

/// A raw EVM log as returned by `eth_getLogs` / transaction receipts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Contract address that emitted the log
    pub address: String,
    /// topics[0] is the event signature hash; the rest are indexed params.
    #[serde(default)]
    pub topics: Vec<String>,
    /// ABI-encoded non-indexed params, `0x`-prefixed hex
    #[serde(default)]
    pub data: String,
}

impl LogEntry {
    /// A log from hex strings, as a node returns it.
    pub fn new(address: impl Into<String>, topics: Vec<String>, data: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            topics,
            data: data.into(),
        }
    }

    /// topics[0], if present.
    pub fn event_signature(&self) -> Option<&str> {
        self.topics.first().map(|s| s.as_str())
    }
}

/// A decoded log. Parameters are in declared order, not indexed-first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedLog {
    pub name: String,
    /// Emitting contract, as given in the entry
    pub address: String,
    #[serde(rename = "events")]
    pub params: Vec<DecodedParam>,
}

impl DecodedLog {
    /// Look up a decoded parameter by name.
    pub fn param(&self, name: &str) -> Option<&NormalizedValue> {
        self.params.iter().find(|p| p.name == name).map(|p| &p.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_entry_from_rpc_json() {
        let json = r#"{
            "address": "0x11b815efB8f581194ae79006d24E0d814B7697F6",
            "topics": ["0xc42079f94a6350d7e6235f29174924f928cc2ac818eb64fed8004e115fbcca67"],
            "data": "0x",
            "logIndex": "0x1"
        }"#;
        let entry: LogEntry = serde_json::from_str(json).unwrap();
        assert!(entry.event_signature().unwrap().starts_with("0xc42079"));
        assert_eq!(entry.data, "0x");
    }
}
