//! Function-call and constructor call-data decoder.
//!
//! # How it works
//! - First 4 bytes of call data = keccak256(function_signature)[:4] (the selector)
//! - Remaining bytes = ABI-encoded inputs tuple
//! - Constructor: no selector prefix; all bytes = ABI-encoded constructor args
//!
//! Errors share the selector space with functions, so revert data of a
//! registered custom error decodes the same way.

use abidecoder_core::{
    call::{DecodedMethod, DecodedParam},
    error::DecodeError,
    item::InterfaceItem,
    outcome::DecodeOutcome,
    types::AbiType,
};
use abidecoder_registry::SignatureRegistry;

use crate::{codec, normalizer};

/// Call-data decoder over a borrowed registry.
#[derive(Debug, Clone, Copy)]
pub struct EvmCallDecoder<'r> {
    registry: &'r SignatureRegistry,
}

impl<'r> EvmCallDecoder<'r> {
    /// Create a decoder over `registry`.
    pub fn new(registry: &'r SignatureRegistry) -> Self {
        Self { registry }
    }

    /// Decode `0x`-prefixed hex call data.
    pub fn decode_method(&self, call_data: &str) -> DecodeOutcome<DecodedMethod> {
        match codec::decode_hex(call_data) {
            Ok(bytes) => self.decode_method_bytes(&bytes),
            Err(e) => {
                tracing::warn!(error = %e, "call data is not valid hex");
                DecodeOutcome::Failed(e)
            }
        }
    }

    /// Decode raw call data (selector included).
    ///
    /// Call data shorter than a selector, or with an unknown selector, is
    /// `Unresolved`.
    pub fn decode_method_bytes(&self, call_data: &[u8]) -> DecodeOutcome<DecodedMethod> {
        let Some((selector, args)) = split_selector(call_data) else {
            tracing::debug!(len = call_data.len(), "call data shorter than a selector");
            return DecodeOutcome::Unresolved;
        };

        let Some(item) = self.registry.lookup_selector(selector) else {
            tracing::debug!(selector = %hex::encode(selector), "no interface item for selector");
            return DecodeOutcome::Unresolved;
        };

        let name = item.name().unwrap_or_default();
        match decode_inputs(item, args) {
            Ok(params) => DecodeOutcome::Decoded(DecodedMethod {
                name: name.to_string(),
                params,
            }),
            Err(e) => {
                tracing::warn!(
                    selector = %hex::encode(selector),
                    method = name,
                    error = %e,
                    "failed to decode call data"
                );
                DecodeOutcome::Failed(e)
            }
        }
    }

    /// Decode hex constructor arguments against the registered constructor.
    pub fn decode_constructor(&self, args: &str) -> DecodeOutcome<DecodedMethod> {
        match codec::decode_hex(args) {
            Ok(bytes) => self.decode_constructor_bytes(&bytes),
            Err(e) => {
                tracing::warn!(error = %e, "constructor arguments are not valid hex");
                DecodeOutcome::Failed(e)
            }
        }
    }

    /// Decode raw constructor arguments (no selector prefix).
    pub fn decode_constructor_bytes(&self, args: &[u8]) -> DecodeOutcome<DecodedMethod> {
        let Some(ctor) = self.registry.constructor() else {
            tracing::debug!("no constructor registered");
            return DecodeOutcome::Unresolved;
        };
        match decode_inputs(ctor, args) {
            Ok(params) => DecodeOutcome::Decoded(DecodedMethod {
                name: "constructor".into(),
                params,
            }),
            Err(e) => {
                tracing::warn!(error = %e, "failed to decode constructor arguments");
                DecodeOutcome::Failed(e)
            }
        }
    }
}

fn split_selector(call_data: &[u8]) -> Option<([u8; 4], &[u8])> {
    if call_data.len() < 4 {
        return None;
    }
    let (head, rest) = call_data.split_at(4);
    Some((head.try_into().ok()?, rest))
}

/// Decode `data` as the input tuple of `item` and normalize each value.
fn decode_inputs(item: &InterfaceItem, data: &[u8]) -> Result<Vec<DecodedParam>, DecodeError> {
    let inputs = item.inputs();
    let types = inputs
        .iter()
        .map(|p| AbiType::from_param(p))
        .collect::<Result<Vec<_>, _>>()?;
    let values = codec::decode_params(&types, data)?;

    Ok(inputs
        .into_iter()
        .zip(values)
        .map(|(param, value)| DecodedParam {
            name: param.name.clone(),
            ty: param.ty.clone(),
            value: normalizer::normalize_param(value, param),
        })
        .collect())
}
