//! # abidecoder-evm
//!
//! EVM ABI decoding against an `abidecoder-registry` signature registry.
//!
//! ## Implementation notes
//! - Call data: first 4 bytes → selector, remainder → ABI-encoded inputs
//! - Topics[0] → event topic hash (keccak256 of the canonical signature)
//! - Topics[1..] → indexed parameters (each 32 bytes)
//! - `data` → non-indexed parameters (ABI-encoded tuple)
//! - Decoded values are normalized to strings and lower-case hex

pub mod abi_decoder;
pub mod batch;
pub mod call_decoder;
pub mod codec;
pub mod decoder;
pub mod normalizer;
pub mod topic;

pub use abi_decoder::AbiDecoder;
pub use call_decoder::EvmCallDecoder;
pub use decoder::EvmLogDecoder;
