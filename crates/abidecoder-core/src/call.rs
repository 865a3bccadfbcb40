//! Types for decoded function calls.

use crate::types::NormalizedValue;
use serde::Serialize;

/// One decoded parameter, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedParam {
    pub name: String,
    /// The declared type tag, as written in the ABI (e.g. `"address[]"`)
    #[serde(rename = "type")]
    pub ty: String,
    pub value: NormalizedValue,
}

/// Result of decoding call data (or constructor arguments).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedMethod {
    /// Function or error name; `"constructor"` for constructor arguments
    pub name: String,
    pub params: Vec<DecodedParam>,
}

impl DecodedMethod {
    /// Look up a decoded parameter by name.
    pub fn param(&self, name: &str) -> Option<&NormalizedValue> {
        self.params.iter().find(|p| p.name == name).map(|p| &p.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn param_lookup() {
        let call = DecodedMethod {
            name: "transfer".into(),
            params: vec![DecodedParam {
                name: "value".into(),
                ty: "uint256".into(),
                value: NormalizedValue::Number("1000".into()),
            }],
        };
        assert_eq!(call.param("value").and_then(|v| v.as_number()), Some("1000"));
        assert!(call.param("to").is_none());
    }

    #[test]
    fn serializes_type_field() {
        let p = DecodedParam {
            name: "ok".into(),
            ty: "bool".into(),
            value: NormalizedValue::Bool(true),
        };
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#"{"name":"ok","type":"bool","value":true}"#);
    }
}
