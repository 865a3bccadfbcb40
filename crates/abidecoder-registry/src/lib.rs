//! # abidecoder-registry
//!
//! Signature registry for abidecoder: indexes contract ABI items by their
//! 4-byte selector (functions, errors) or 32-byte topic hash (events).
//!
//! Items can be registered directly or loaded from ABI JSON.

pub mod abi_json;
pub mod memory;

pub use memory::SignatureRegistry;
