//! Converts codec `AbiValue`s into `NormalizedValue`s.
//!
//! Integers become decimal strings, addresses lower-case `0x` hex. Arrays
//! keep their shape; tuple components are keyed by their declared names.

use abidecoder_core::{
    item::Param,
    types::{AbiValue, NormalizedValue},
};
use indexmap::IndexMap;

/// Normalize the value decoded for `param`.
pub fn normalize_param(val: AbiValue, param: &Param) -> NormalizedValue {
    normalize(val, &param.components)
}

/// Normalize a value. `components` names tuple members (and the members of
/// tuples nested in arrays); pass `&[]` when there are none.
pub fn normalize(val: AbiValue, components: &[Param]) -> NormalizedValue {
    match val {
        AbiValue::Uint(u, _) => NormalizedValue::Number(u.to_string()),
        AbiValue::Int(i, _) => NormalizedValue::Number(i.to_string()),
        AbiValue::Address(a) => NormalizedValue::Address(format!("0x{}", hex::encode(a))),
        AbiValue::Bool(b) => NormalizedValue::Bool(b),
        AbiValue::FixedBytes(word, size) => {
            NormalizedValue::Bytes(format!("0x{}", hex::encode(&word[..size.min(32)])))
        }
        AbiValue::Function(f) => NormalizedValue::Bytes(format!("0x{}", hex::encode(f))),
        AbiValue::Bytes(b) => NormalizedValue::Bytes(format!("0x{}", hex::encode(b))),
        AbiValue::String(s) => NormalizedValue::Str(s),
        AbiValue::Array(vals) | AbiValue::FixedArray(vals) => NormalizedValue::Array(
            vals.into_iter().map(|v| normalize(v, components)).collect(),
        ),
        AbiValue::Tuple(vals) => {
            let fields: IndexMap<String, NormalizedValue> = vals
                .into_iter()
                .enumerate()
                .map(|(i, v)| match components.get(i) {
                    Some(c) if !c.name.is_empty() => (c.name.clone(), normalize(v, &c.components)),
                    Some(c) => (i.to_string(), normalize(v, &c.components)),
                    None => (i.to_string(), normalize(v, &[])),
                })
                .collect();
            NormalizedValue::Tuple(fields)
        }
    }
}
