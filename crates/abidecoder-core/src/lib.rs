//! # abidecoder-core
//!
//! Core types shared across the abidecoder crates: the interface item
//! model, the ABI type grammar, canonical signatures and registry keys,
//! decoded value trees, and the error/outcome types of the decode pipeline.

pub mod call;
pub mod error;
pub mod event;
pub mod item;
pub mod outcome;
pub mod signature;
pub mod types;

pub use call::{DecodedMethod, DecodedParam};
pub use error::{DecodeError, RegistryError};
pub use event::{DecodedLog, LogEntry};
pub use item::{EventParam, InterfaceItem, ItemKind, Param};
pub use outcome::DecodeOutcome;
pub use signature::{canonical_signature, keccak256, SignatureKey};
pub use types::{AbiType, AbiValue, NormalizedValue};
