//! Canonical signatures and the registry keys derived from them.
//!
//! The key of an item is the keccak256 hash of its canonical signature:
//!   keccak256("transfer(address,uint256)")[..4] → 0xa9059cbb
//!   keccak256("Swap(address,address,int256,int256,uint160,uint128,int24)")
//!   → 0xc42079f94a6350d7e6235f29174924f928cc2ac818eb64fed8004e115fbcca67
//!
//! Tuples are always expanded into parenthesized component lists. Parameter
//! names and `indexed` flags never take part.

use alloy_primitives::B256;
use serde::{Serialize, Serializer};
use std::fmt;
use tiny_keccak::{Hasher, Keccak};

use crate::error::DecodeError;
use crate::item::{ItemKind, Param};
use crate::types::AbiType;

/// keccak256 of arbitrary bytes.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    let mut output = [0u8; 32];
    hasher.update(data);
    hasher.finalize(&mut output);
    output
}

/// Build `name(type1,type2,...)` from a parameter list.
pub fn canonical_signature<'a>(
    name: &str,
    params: impl IntoIterator<Item = &'a Param>,
) -> Result<String, DecodeError> {
    let types = params
        .into_iter()
        .map(|p| AbiType::from_param(p).map(|t| t.to_string()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(format!("{name}({})", types.join(",")))
}

/// Compact identifier of an interface item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureKey {
    /// First 4 bytes of the signature hash (functions and errors)
    Selector([u8; 4]),
    /// Full signature hash (events), matched against `topics[0]`
    Topic(B256),
}

impl SignatureKey {
    /// Hash `signature` and keep as many bytes as `kind` requires.
    pub fn from_signature(kind: ItemKind, signature: &str) -> Self {
        let hash = keccak256(signature.as_bytes());
        match kind {
            ItemKind::Event => SignatureKey::Topic(B256::from(hash)),
            _ => SignatureKey::Selector([hash[0], hash[1], hash[2], hash[3]]),
        }
    }

    /// Parse a `0x`-prefixed (or bare) hex string of 4 or 32 bytes.
    pub fn from_hex(s: &str) -> Result<Self, DecodeError> {
        let bytes = hex::decode(s.strip_prefix("0x").unwrap_or(s))?;
        match bytes.len() {
            4 => Ok(SignatureKey::Selector([bytes[0], bytes[1], bytes[2], bytes[3]])),
            32 => Ok(SignatureKey::Topic(B256::from_slice(&bytes))),
            n => Err(DecodeError::InvalidHex {
                reason: format!("signature key must be 4 or 32 bytes, got {n}"),
            }),
        }
    }

    /// The 4 or 32 key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            SignatureKey::Selector(s) => s,
            SignatureKey::Topic(t) => t.as_slice(),
        }
    }
}

impl fmt::Display for SignatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.as_bytes()))
    }
}

impl Serialize for SignatureKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
