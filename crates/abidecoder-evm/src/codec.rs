//! ABI parameter decoding (the head/tail layout).
//!
//! A parameter block is a sequence of 32-byte words. Every parameter owns a
//! slot in the head:
//! - static types (`uintN`, `intN`, `address`, `bool`, `bytesN`, and fixed
//!   arrays/tuples made only of those) are stored inline
//! - dynamic types (`bytes`, `string`, `T[]`, and fixed arrays/tuples with a
//!   dynamic member) store a byte offset, relative to the start of the
//!   enclosing block, pointing into the tail
//!
//! `bytes`/`string` tails are a length word followed by the padded content;
//! `T[]` tails are a count word followed by a nested block of `count`
//! elements. Tuples and fixed arrays are nested blocks of their own.

use abidecoder_core::{
    error::DecodeError,
    types::{AbiType, AbiValue},
};
use alloy_primitives::{Address, B256, I256, U256};

/// Size of one ABI word.
pub const WORD: usize = 32;

/// Decode work units allowed per input word.
const WORK_PER_WORD: usize = 4;
/// Decode work units allowed regardless of input size.
const MIN_WORK: usize = 64;

/// Decode a parameter block against an ordered list of types.
///
/// Offsets may point anywhere inside the block, so a crafted input can make
/// many heads share one tail. Decoding work is therefore capped in
/// proportion to the input size; inputs that exceed the cap fail with
/// [`DecodeError::WorkLimitExceeded`].
pub fn decode_params(types: &[AbiType], data: &[u8]) -> Result<Vec<AbiValue>, DecodeError> {
    decode_sequence(types.iter(), data, &mut Budget::for_input(data.len()))
}

/// Decode one 32-byte word as a single-word static type.
pub fn decode_word(ty: &AbiType, word: &[u8; WORD]) -> Result<AbiValue, DecodeError> {
    match ty {
        AbiType::Uint(bits) => Ok(AbiValue::Uint(U256::from_be_bytes(*word), *bits)),
        AbiType::Int(bits) => Ok(AbiValue::Int(signed_from_word(word, *bits), *bits)),
        AbiType::Address => Ok(AbiValue::Address(Address::from_slice(&word[12..]))),
        AbiType::Bool => Ok(AbiValue::Bool(word.iter().any(|b| *b != 0))),
        AbiType::FixedBytes(size) => Ok(AbiValue::FixedBytes(B256::from(*word), *size)),
        AbiType::Function => {
            let mut f = [0u8; 24];
            f.copy_from_slice(&word[..24]);
            Ok(AbiValue::Function(f))
        }
        other => Err(DecodeError::InvalidType {
            ty: other.to_string(),
            reason: "not a single-word type".into(),
        }),
    }
}

/// Two's complement over the declared width: the sign comes from bit
/// `bits - 1`, bits above the width are ignored.
pub fn signed_from_word(word: &[u8; WORD], bits: usize) -> I256 {
    let raw = U256::from_be_bytes(*word);
    if bits >= 256 {
        return I256::from_raw(raw);
    }
    let mask = (U256::from(1u64) << bits) - U256::from(1u64);
    let low = raw & mask;
    if bits > 0 && low.bit(bits - 1) {
        I256::from_raw(low | !mask)
    } else {
        I256::from_raw(low)
    }
}

/// Strip an optional `0x` and hex-decode.
pub fn decode_hex(s: &str) -> Result<Vec<u8>, DecodeError> {
    let s = s.trim();
    let s = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    Ok(hex::decode(s)?)
}

/// Remaining decode work. One unit per decoded value, per offset/length
/// word, and per content word of `bytes`/`string`.
struct Budget {
    limit: usize,
    remaining: usize,
}

impl Budget {
    fn for_input(len: usize) -> Self {
        let limit = (len / WORD)
            .saturating_add(1)
            .saturating_mul(WORK_PER_WORD)
            .saturating_add(MIN_WORK);
        Self {
            limit,
            remaining: limit,
        }
    }

    fn charge(&mut self, units: usize) -> Result<(), DecodeError> {
        self.remaining = self
            .remaining
            .checked_sub(units)
            .ok_or(DecodeError::WorkLimitExceeded { limit: self.limit })?;
        Ok(())
    }
}

fn decode_sequence<'a>(
    types: impl Iterator<Item = &'a AbiType>,
    block: &[u8],
    budget: &mut Budget,
) -> Result<Vec<AbiValue>, DecodeError> {
    let mut head = 0usize;
    let mut out = Vec::new();
    for ty in types {
        out.push(decode_at(ty, block, head, budget)?);
        head = head.saturating_add(ty.head_size());
    }
    Ok(out)
}

fn decode_repeated(
    ty: &AbiType,
    count: usize,
    block: &[u8],
    budget: &mut Budget,
) -> Result<Vec<AbiValue>, DecodeError> {
    decode_sequence(std::iter::repeat(ty).take(count), block, budget)
}

/// Decode the value whose head slot starts at `pos` within `block`.
fn decode_at(
    ty: &AbiType,
    block: &[u8],
    pos: usize,
    budget: &mut Budget,
) -> Result<AbiValue, DecodeError> {
    budget.charge(1)?;
    if ty.is_dynamic() {
        let offset = read_usize(block, pos, budget)?;
        return decode_tail(ty, slice_from(block, offset)?, budget);
    }
    match ty {
        AbiType::FixedArray(inner, len) => Ok(AbiValue::FixedArray(decode_repeated(
            inner,
            *len,
            slice_from(block, pos)?,
            budget,
        )?)),
        AbiType::Tuple(inner) => Ok(AbiValue::Tuple(decode_sequence(
            inner.iter(),
            slice_from(block, pos)?,
            budget,
        )?)),
        _ => decode_word(ty, read_word(block, pos)?),
    }
}

/// Decode a dynamic value whose content starts at the beginning of `tail`.
fn decode_tail(ty: &AbiType, tail: &[u8], budget: &mut Budget) -> Result<AbiValue, DecodeError> {
    match ty {
        AbiType::Bytes => Ok(AbiValue::Bytes(read_length_prefixed(tail, budget)?.to_vec())),
        // Non-UTF-8 content is kept, with invalid sequences replaced.
        AbiType::String => Ok(AbiValue::String(
            String::from_utf8_lossy(read_length_prefixed(tail, budget)?).into_owned(),
        )),
        AbiType::Array(inner) => {
            let count = read_usize(tail, 0, budget)?;
            let elems = slice_from(tail, WORD)?;
            // Each element needs at least one head byte; reject counts the
            // buffer cannot possibly hold before allocating for them.
            let needed = count.checked_mul(inner.head_size().max(1));
            if needed.map_or(true, |n| n > elems.len()) {
                return Err(DecodeError::LengthOverflow {
                    word: format!("{count:x}"),
                });
            }
            Ok(AbiValue::Array(decode_repeated(inner, count, elems, budget)?))
        }
        AbiType::FixedArray(inner, len) => Ok(AbiValue::FixedArray(decode_repeated(
            inner, *len, tail, budget,
        )?)),
        AbiType::Tuple(inner) => Ok(AbiValue::Tuple(decode_sequence(inner.iter(), tail, budget)?)),
        _ => decode_word(ty, read_word(tail, 0)?),
    }
}

fn read_word(block: &[u8], pos: usize) -> Result<&[u8; WORD], DecodeError> {
    pos.checked_add(WORD)
        .and_then(|end| block.get(pos..end))
        .and_then(|w| w.try_into().ok())
        .ok_or(DecodeError::BufferTooShort {
            offset: pos,
            needed: WORD,
            available: block.len().saturating_sub(pos),
        })
}

/// A word used as an offset, length or count. Must fit a `usize`.
fn read_usize(block: &[u8], pos: usize, budget: &mut Budget) -> Result<usize, DecodeError> {
    budget.charge(1)?;
    let word = read_word(block, pos)?;
    let overflow = || DecodeError::LengthOverflow {
        word: hex::encode(word),
    };
    if word[..24].iter().any(|b| *b != 0) {
        return Err(overflow());
    }
    let mut low = [0u8; 8];
    low.copy_from_slice(&word[24..]);
    usize::try_from(u64::from_be_bytes(low)).map_err(|_| overflow())
}

fn slice_from(block: &[u8], offset: usize) -> Result<&[u8], DecodeError> {
    block.get(offset..).ok_or(DecodeError::OffsetOutOfRange {
        offset,
        len: block.len(),
    })
}

fn read_length_prefixed<'b>(tail: &'b [u8], budget: &mut Budget) -> Result<&'b [u8], DecodeError> {
    let len = read_usize(tail, 0, budget)?;
    let content = slice_from(tail, WORD)?;
    let content = content.get(..len).ok_or(DecodeError::BufferTooShort {
        offset: WORD,
        needed: len,
        available: content.len(),
    })?;
    budget.charge(len.div_ceil(WORD))?;
    Ok(content)
}
