//! ABI JSON loading.
//!
//! An ABI document must be a JSON array of interface items. Anything else,
//! including a single item object, is rejected as an invalid argument.
//! Items that omit `"type"` are read as functions, as older compilers
//! emitted them.

use abidecoder_core::{error::RegistryError, item::InterfaceItem};
use serde_json::Value;

/// Parse an ABI JSON document into interface items.
pub fn parse_items(json: &str) -> Result<Vec<InterfaceItem>, RegistryError> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| RegistryError::invalid(format!("malformed ABI JSON: {e}")))?;
    items_from_value(value)
}

/// Convert an already-parsed JSON value into interface items.
pub fn items_from_value(value: Value) -> Result<Vec<InterfaceItem>, RegistryError> {
    let entries = match value {
        Value::Array(entries) => entries,
        other => {
            return Err(RegistryError::invalid(format!(
                "expected ABI array, got {}",
                json_kind(&other)
            )))
        }
    };

    entries
        .into_iter()
        .map(default_item_type)
        .enumerate()
        .map(|(i, entry)| {
            serde_json::from_value(entry)
                .map_err(|e| RegistryError::invalid(format!("ABI item {i}: {e}")))
        })
        .collect()
}

/// Items without a `"type"` field are functions.
fn default_item_type(mut entry: Value) -> Value {
    if let Value::Object(fields) = &mut entry {
        fields
            .entry("type")
            .or_insert_with(|| Value::String("function".into()));
    }
    entry
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
