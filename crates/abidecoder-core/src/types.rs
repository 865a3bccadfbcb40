//! ABI type grammar and decoded value trees.
//!
//! `AbiType` is the parsed form of a Solidity ABI type tag (`uint256`,
//! `address[]`, `(bool,bytes)[2]`, ...). The codec produces `AbiValue`
//! trees, which the normalizer turns into `NormalizedValue` trees ready for
//! JSON output.

use alloy_primitives::{Address, B256, I256, U256};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

use crate::error::DecodeError;
use crate::item::Param;

/// A parsed ABI type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AbiType {
    /// Unsigned integer. Width in bits (8..=256).
    Uint(usize),
    /// Signed integer. Width in bits (8..=256).
    Int(usize),
    Address,
    Bool,
    /// Fixed-size byte array (bytes1 .. bytes32). Length in bytes.
    FixedBytes(usize),
    /// External function reference: 20-byte address + 4-byte selector.
    Function,
    Bytes,
    String,
    /// `T[]`
    Array(Box<AbiType>),
    /// `T[k]`
    FixedArray(Box<AbiType>, usize),
    Tuple(Vec<AbiType>),
}

impl AbiType {
    /// Parse a type tag. `components` is consulted only when the base of the
    /// tag is `tuple`.
    pub fn parse(tag: &str, components: &[Param]) -> Result<Self, DecodeError> {
        let tag = tag.trim();
        if let Some(stripped) = tag.strip_suffix(']') {
            let open = stripped.rfind('[').ok_or_else(|| invalid(tag, "unbalanced ']'"))?;
            let inner = Self::parse(&stripped[..open], components)?;
            let dim = &stripped[open + 1..];
            if dim.is_empty() {
                return Ok(AbiType::Array(Box::new(inner)));
            }
            let len: usize = dim
                .parse()
                .map_err(|_| invalid(tag, "array length is not a number"))?;
            return Ok(AbiType::FixedArray(Box::new(inner), len));
        }

        match tag {
            "address" => Ok(AbiType::Address),
            "bool" => Ok(AbiType::Bool),
            "string" => Ok(AbiType::String),
            "bytes" => Ok(AbiType::Bytes),
            "function" => Ok(AbiType::Function),
            "uint" => Ok(AbiType::Uint(256)),
            "int" => Ok(AbiType::Int(256)),
            "tuple" => {
                if components.is_empty() {
                    return Err(invalid(tag, "tuple without components"));
                }
                let inner = components
                    .iter()
                    .map(|c| Self::parse(&c.ty, &c.components))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(AbiType::Tuple(inner))
            }
            _ => {
                if let Some(bits) = tag.strip_prefix("uint") {
                    Ok(AbiType::Uint(int_width(tag, bits)?))
                } else if let Some(bits) = tag.strip_prefix("int") {
                    Ok(AbiType::Int(int_width(tag, bits)?))
                } else if let Some(size) = tag.strip_prefix("bytes") {
                    match size.parse::<usize>() {
                        Ok(n) if (1..=32).contains(&n) => Ok(AbiType::FixedBytes(n)),
                        _ => Err(invalid(tag, "bytesN requires 1 <= N <= 32")),
                    }
                } else {
                    Err(invalid(tag, "unknown type"))
                }
            }
        }
    }

    /// Parse the type of a declared parameter.
    pub fn from_param(param: &Param) -> Result<Self, DecodeError> {
        Self::parse(&param.ty, &param.components)
    }

    /// Whether values of this type live in the tail of an encoding.
    pub fn is_dynamic(&self) -> bool {
        match self {
            AbiType::Bytes | AbiType::String | AbiType::Array(_) => true,
            AbiType::FixedArray(inner, _) => inner.is_dynamic(),
            AbiType::Tuple(inner) => inner.iter().any(AbiType::is_dynamic),
            _ => false,
        }
    }

    /// Number of bytes this type occupies in the head of an encoding.
    pub fn head_size(&self) -> usize {
        if self.is_dynamic() {
            return 32;
        }
        match self {
            AbiType::FixedArray(inner, len) => inner.head_size().saturating_mul(*len),
            AbiType::Tuple(inner) => inner.iter().map(AbiType::head_size).sum(),
            _ => 32,
        }
    }

    /// Whether this is a value type, i.e. stored verbatim when indexed.
    pub fn is_value_type(&self) -> bool {
        matches!(
            self,
            AbiType::Uint(_)
                | AbiType::Int(_)
                | AbiType::Address
                | AbiType::Bool
                | AbiType::FixedBytes(_)
                | AbiType::Function
        )
    }
}

fn int_width(tag: &str, bits: &str) -> Result<usize, DecodeError> {
    match bits.parse::<usize>() {
        Ok(n) if n % 8 == 0 && (8..=256).contains(&n) => Ok(n),
        _ => Err(invalid(tag, "integer width must be a multiple of 8 in 8..=256")),
    }
}

fn invalid(ty: &str, reason: &str) -> DecodeError {
    DecodeError::InvalidType {
        ty: ty.to_string(),
        reason: reason.to_string(),
    }
}

/// Canonical form, as hashed into selectors: tuples are expanded.
impl fmt::Display for AbiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbiType::Uint(bits) => write!(f, "uint{bits}"),
            AbiType::Int(bits) => write!(f, "int{bits}"),
            AbiType::Address => write!(f, "address"),
            AbiType::Bool => write!(f, "bool"),
            AbiType::FixedBytes(n) => write!(f, "bytes{n}"),
            AbiType::Function => write!(f, "function"),
            AbiType::Bytes => write!(f, "bytes"),
            AbiType::String => write!(f, "string"),
            AbiType::Array(inner) => write!(f, "{inner}[]"),
            AbiType::FixedArray(inner, len) => write!(f, "{inner}[{len}]"),
            AbiType::Tuple(inner) => {
                let parts: Vec<_> = inner.iter().map(|t| t.to_string()).collect();
                write!(f, "({})", parts.join(","))
            }
        }
    }
}

/// A raw decoded value, mirroring the shape of its `AbiType`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiValue {
    Uint(U256, usize),
    Int(I256, usize),
    Address(Address),
    Bool(bool),
    /// Left-aligned word and the declared size in bytes.
    FixedBytes(B256, usize),
    Function([u8; 24]),
    Bytes(Vec<u8>),
    String(String),
    Array(Vec<AbiValue>),
    FixedArray(Vec<AbiValue>),
    Tuple(Vec<AbiValue>),
}

/// A decoded value after normalization.
///
/// Integers become decimal strings so no precision is lost downstream;
/// addresses become lower-case hex. Serializes to plain JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NormalizedValue {
    /// Decimal integer, e.g. `"-197585"`
    Number(String),
    /// `0x` + 40 lower-case hex digits
    Address(String),
    Bool(bool),
    /// `0x`-prefixed hex
    Bytes(String),
    Str(String),
    Array(Vec<NormalizedValue>),
    /// Component name → value. Unnamed components get positional names.
    Tuple(IndexMap<String, NormalizedValue>),
}

impl NormalizedValue {
    /// Returns the decimal string if this is an integer.
    pub fn as_number(&self) -> Option<&str> {
        match self {
            NormalizedValue::Number(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the inner string if this is an address.
    pub fn as_address(&self) -> Option<&str> {
        match self {
            NormalizedValue::Address(s) => Some(s),
            _ => None,
        }
    }

    /// Elements of an array or fixed array.
    pub fn as_array(&self) -> Option<&[NormalizedValue]> {
        match self {
            NormalizedValue::Array(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for NormalizedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizedValue::Number(v)
            | NormalizedValue::Address(v)
            | NormalizedValue::Bytes(v)
            | NormalizedValue::Str(v) => write!(f, "{v}"),
            NormalizedValue::Bool(v) => write!(f, "{v}"),
            NormalizedValue::Array(v) => {
                let parts: Vec<_> = v.iter().map(|x| x.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            NormalizedValue::Tuple(fields) => {
                let parts: Vec<_> = fields.iter().map(|(k, v)| format!("{k}: {v}")).collect();
                write!(f, "{{{}}}", parts.join(", "))
            }
        }
    }
}
