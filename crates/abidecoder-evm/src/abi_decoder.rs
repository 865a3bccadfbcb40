//! `AbiDecoder` — owns a registry and the log retention setting, and hands
//! out borrowed call and log decoders over them.

use abidecoder_core::{
    call::DecodedMethod,
    error::RegistryError,
    event::{DecodedLog, LogEntry},
    item::InterfaceItem,
    outcome::DecodeOutcome,
    signature::SignatureKey,
};
use abidecoder_registry::SignatureRegistry;
use indexmap::IndexMap;

use crate::{batch, call_decoder::EvmCallDecoder, decoder::EvmLogDecoder};

/// ABI decoder: registered interface items plus decode entry points.
///
/// Non-decoded logs are discarded unless retention is turned on.
#[derive(Debug, Clone, Default)]
pub struct AbiDecoder {
    registry: SignatureRegistry,
    keep_non_decoded_logs: bool,
}

impl AbiDecoder {
    /// An empty decoder that discards non-decoded logs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing registry.
    pub fn with_registry(registry: SignatureRegistry) -> Self {
        Self {
            registry,
            keep_non_decoded_logs: false,
        }
    }

    // ── Registration ─────────────────────────────────────────────────────────

    /// Register interface items.
    ///
    /// # Errors
    /// `InvalidArgument` when any item has an unparseable type; nothing is
    /// registered in that case.
    pub fn add_interface_items(&mut self, items: &[InterfaceItem]) -> Result<(), RegistryError> {
        self.registry.add(items)
    }

    /// Register every item of a JSON ABI array. Returns the item count.
    ///
    /// # Errors
    /// `InvalidArgument` when the input is not an array of interface items.
    pub fn add_abi_json(&mut self, json: &str) -> Result<usize, RegistryError> {
        self.registry.add_json(json)
    }

    /// Unregister interface items, matched by their signature keys.
    ///
    /// # Errors
    /// `InvalidArgument` when any item has an unparseable type.
    pub fn remove_interface_items(&mut self, items: &[InterfaceItem]) -> Result<(), RegistryError> {
        self.registry.remove(items)
    }

    /// Unregister every item of a JSON ABI array.
    ///
    /// # Errors
    /// `InvalidArgument` when the input is not an array of interface items.
    pub fn remove_abi_json(&mut self, json: &str) -> Result<(), RegistryError> {
        self.registry.remove_json(json)
    }

    /// All registered items, in registration order.
    pub fn interface_items(&self) -> &[InterfaceItem] {
        self.registry.items()
    }

    /// Selector/topic → item map.
    pub fn signature_keys(&self) -> &IndexMap<SignatureKey, InterfaceItem> {
        self.registry.keys()
    }

    /// The underlying signature registry.
    pub fn registry(&self) -> &SignatureRegistry {
        &self.registry
    }

    // ── Retention ────────────────────────────────────────────────────────────

    /// Keep (`true`) or drop (`false`) logs that do not decode.
    pub fn set_log_retention(&mut self, keep_non_decoded: bool) {
        self.keep_non_decoded_logs = keep_non_decoded;
    }

    /// Report unresolved and failed logs in `decode_logs` output.
    pub fn keep_non_decoded_logs(&mut self) {
        self.set_log_retention(true);
    }

    /// Drop unresolved and failed logs from `decode_logs` output.
    pub fn discard_non_decoded_logs(&mut self) {
        self.set_log_retention(false);
    }

    /// Current retention setting.
    pub fn keeps_non_decoded_logs(&self) -> bool {
        self.keep_non_decoded_logs
    }

    // ── Decoding ─────────────────────────────────────────────────────────────

    /// Call-data decoder over the registered items.
    pub fn call_decoder(&self) -> EvmCallDecoder<'_> {
        EvmCallDecoder::new(&self.registry)
    }

    /// Log decoder over the registered items, with the current retention.
    pub fn log_decoder(&self) -> EvmLogDecoder<'_> {
        EvmLogDecoder::new(&self.registry).with_retention(self.keep_non_decoded_logs)
    }

    /// Decode hex call data. See [`EvmCallDecoder::decode_method`].
    pub fn decode_method(&self, call_data: &str) -> DecodeOutcome<DecodedMethod> {
        self.call_decoder().decode_method(call_data)
    }

    /// Decode raw call data, selector included.
    pub fn decode_method_bytes(&self, call_data: &[u8]) -> DecodeOutcome<DecodedMethod> {
        self.call_decoder().decode_method_bytes(call_data)
    }

    /// Decode hex constructor arguments against the registered constructor.
    pub fn decode_constructor(&self, args: &str) -> DecodeOutcome<DecodedMethod> {
        self.call_decoder().decode_constructor(args)
    }

    /// Decode one log; `None` when it has no topics.
    pub fn decode_log(&self, entry: &LogEntry) -> Option<DecodeOutcome<DecodedLog>> {
        self.log_decoder().decode_log(entry)
    }

    /// Decode logs in order, applying the retention setting.
    pub fn decode_logs(&self, entries: &[LogEntry]) -> Vec<DecodeOutcome<DecodedLog>> {
        self.log_decoder().decode_logs(entries)
    }

    /// Parallel `decode_logs`; same output.
    pub fn decode_logs_par(&self, entries: &[LogEntry]) -> Vec<DecodeOutcome<DecodedLog>> {
        batch::decode_logs_par(&self.log_decoder(), entries)
    }
}
