//! Interface items: the typed form of a contract ABI JSON entry.
//!
//! An ABI is a list of items tagged by `"type"`. Only events carry the
//! `indexed` flag on their parameters, so events get their own parameter
//! type instead of an optional field on every parameter.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::RegistryError;
use crate::signature::{self, SignatureKey};
use crate::types::AbiType;

/// A named, typed parameter of a function, error or constructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    #[serde(default)]
    pub name: String,
    /// Solidity type tag, e.g. `"uint256"`, `"address[]"`, `"tuple[2]"`
    #[serde(rename = "type")]
    pub ty: String,
    /// Populated only when `ty` is a tuple or tuple array.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<Param>,
    #[serde(
        default,
        rename = "internalType",
        skip_serializing_if = "Option::is_none"
    )]
    pub internal_type: Option<String>,
}

impl Param {
    /// A parameter without tuple components.
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            components: Vec::new(),
            internal_type: None,
        }
    }

    /// A tuple (or tuple array, when `ty` carries a suffix) parameter.
    pub fn tuple(name: impl Into<String>, ty: impl Into<String>, components: Vec<Param>) -> Self {
        Self {
            components,
            ..Self::new(name, ty)
        }
    }
}

/// An event parameter. Indexed parameters are carried in the log topics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventParam {
    #[serde(flatten)]
    pub param: Param,
    #[serde(default)]
    pub indexed: bool,
}

impl EventParam {
    /// An indexed parameter, carried in a topic.
    pub fn indexed(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            param: Param::new(name, ty),
            indexed: true,
        }
    }

    /// A non-indexed parameter, carried in the log data.
    pub fn data(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            param: Param::new(name, ty),
            indexed: false,
        }
    }
}

/// Discriminant of an [`InterfaceItem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Function,
    Event,
    Error,
    Constructor,
    Fallback,
    Receive,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ItemKind::Function => "function",
            ItemKind::Event => "event",
            ItemKind::Error => "error",
            ItemKind::Constructor => "constructor",
            ItemKind::Fallback => "fallback",
            ItemKind::Receive => "receive",
        };
        write!(f, "{s}")
    }
}

/// One entry of a contract ABI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InterfaceItem {
    Function {
        #[serde(default)]
        name: String,
        #[serde(default)]
        inputs: Vec<Param>,
        #[serde(default)]
        outputs: Vec<Param>,
        #[serde(
            default,
            rename = "stateMutability",
            skip_serializing_if = "Option::is_none"
        )]
        state_mutability: Option<String>,
    },
    Event {
        #[serde(default)]
        name: String,
        #[serde(default)]
        inputs: Vec<EventParam>,
        #[serde(default)]
        anonymous: bool,
    },
    Error {
        #[serde(default)]
        name: String,
        #[serde(default)]
        inputs: Vec<Param>,
    },
    Constructor {
        #[serde(default)]
        inputs: Vec<Param>,
        #[serde(
            default,
            rename = "stateMutability",
            skip_serializing_if = "Option::is_none"
        )]
        state_mutability: Option<String>,
    },
    Fallback {
        #[serde(
            default,
            rename = "stateMutability",
            skip_serializing_if = "Option::is_none"
        )]
        state_mutability: Option<String>,
    },
    Receive {
        #[serde(
            default,
            rename = "stateMutability",
            skip_serializing_if = "Option::is_none"
        )]
        state_mutability: Option<String>,
    },
}

impl InterfaceItem {
    /// A function with no outputs and no declared mutability.
    pub fn function(name: impl Into<String>, inputs: Vec<Param>) -> Self {
        InterfaceItem::Function {
            name: name.into(),
            inputs,
            outputs: Vec::new(),
            state_mutability: None,
        }
    }

    /// A non-anonymous event.
    pub fn event(name: impl Into<String>, inputs: Vec<EventParam>) -> Self {
        InterfaceItem::Event {
            name: name.into(),
            inputs,
            anonymous: false,
        }
    }

    /// A custom error.
    pub fn error(name: impl Into<String>, inputs: Vec<Param>) -> Self {
        InterfaceItem::Error {
            name: name.into(),
            inputs,
        }
    }

    /// A constructor with the given arguments.
    pub fn constructor(inputs: Vec<Param>) -> Self {
        InterfaceItem::Constructor {
            inputs,
            state_mutability: None,
        }
    }

    /// The item's `"type"` tag.
    pub fn kind(&self) -> ItemKind {
        match self {
            InterfaceItem::Function { .. } => ItemKind::Function,
            InterfaceItem::Event { .. } => ItemKind::Event,
            InterfaceItem::Error { .. } => ItemKind::Error,
            InterfaceItem::Constructor { .. } => ItemKind::Constructor,
            InterfaceItem::Fallback { .. } => ItemKind::Fallback,
            InterfaceItem::Receive { .. } => ItemKind::Receive,
        }
    }

    /// The item name, if it has a non-empty one.
    pub fn name(&self) -> Option<&str> {
        let name = match self {
            InterfaceItem::Function { name, .. }
            | InterfaceItem::Event { name, .. }
            | InterfaceItem::Error { name, .. } => name.as_str(),
            _ => return None,
        };
        (!name.is_empty()).then_some(name)
    }

    /// Input parameters in declared order (event `indexed` flags dropped).
    pub fn inputs(&self) -> Vec<&Param> {
        match self {
            InterfaceItem::Function { inputs, .. }
            | InterfaceItem::Error { inputs, .. }
            | InterfaceItem::Constructor { inputs, .. } => inputs.iter().collect(),
            InterfaceItem::Event { inputs, .. } => inputs.iter().map(|p| &p.param).collect(),
            InterfaceItem::Fallback { .. } | InterfaceItem::Receive { .. } => Vec::new(),
        }
    }

    /// Event parameters, or `None` for every other kind.
    pub fn event_inputs(&self) -> Option<&[EventParam]> {
        match self {
            InterfaceItem::Event { inputs, .. } => Some(inputs),
            _ => None,
        }
    }

    /// Resolved input types in declared order.
    pub fn input_types(&self) -> Result<Vec<AbiType>, RegistryError> {
        self.inputs()
            .into_iter()
            .map(|p| {
                AbiType::from_param(p).map_err(|e| {
                    RegistryError::invalid(format!(
                        "{} '{}': parameter '{}': {e}",
                        self.kind(),
                        self.name().unwrap_or_default(),
                        p.name
                    ))
                })
            })
            .collect()
    }

    /// Check that every input type tag parses.
    pub fn validate(&self) -> Result<(), RegistryError> {
        self.input_types().map(|_| ())
    }

    /// Canonical signature, e.g. `"transfer(address,uint256)"`.
    /// `None` for unnamed items.
    pub fn signature(&self) -> Result<Option<String>, RegistryError> {
        let Some(name) = self.name() else {
            return Ok(None);
        };
        signature::canonical_signature(name, self.inputs())
            .map(Some)
            .map_err(|e| RegistryError::invalid(format!("{} '{name}': {e}", self.kind())))
    }

    /// Registry key: 4-byte selector for functions and errors, the full
    /// 32-byte hash for events. `None` for unnamed items.
    pub fn signature_key(&self) -> Result<Option<SignatureKey>, RegistryError> {
        Ok(self
            .signature()?
            .map(|sig| SignatureKey::from_signature(self.kind(), &sig)))
    }
}
