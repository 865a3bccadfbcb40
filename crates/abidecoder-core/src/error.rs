//! Error types for the abidecoder registry and decode pipeline.

use thiserror::Error;

/// Errors that can occur while decoding call data or a log entry.
///
/// These never escape the method/log decoders: they are converted into
/// [`DecodeOutcome::Failed`](crate::outcome::DecodeOutcome::Failed) at that
/// boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("buffer too short: need {needed} bytes at offset {offset}, have {available}")]
    BufferTooShort {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("offset {offset} points outside a {len}-byte buffer")]
    OffsetOutOfRange { offset: usize, len: usize },

    #[error("length word 0x{word} does not fit the remaining buffer")]
    LengthOverflow { word: String },

    #[error("decoding exceeded the work limit of {limit} for this input size")]
    WorkLimitExceeded { limit: usize },

    #[error("invalid ABI type '{ty}': {reason}")]
    InvalidType { ty: String, reason: String },

    #[error("invalid hex input: {reason}")]
    InvalidHex { reason: String },

    #[error("missing topic {index} for indexed parameter '{param}'")]
    MissingTopic { index: usize, param: String },

    #[error("invalid topic '{topic}': {reason}")]
    InvalidTopic { topic: String, reason: String },
}

impl From<hex::FromHexError> for DecodeError {
    fn from(e: hex::FromHexError) -> Self {
        DecodeError::InvalidHex {
            reason: e.to_string(),
        }
    }
}

/// Errors from the signature registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },
}

impl RegistryError {
    /// Shorthand for `InvalidArgument`.
    pub fn invalid(reason: impl Into<String>) -> Self {
        RegistryError::InvalidArgument {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_errors_convert() {
        let err: DecodeError = hex::decode("0xzz").unwrap_err().into();
        assert!(matches!(err, DecodeError::InvalidHex { .. }));
    }

    #[test]
    fn messages_name_the_offset() {
        let err = DecodeError::OffsetOutOfRange { offset: 96, len: 64 };
        assert_eq!(err.to_string(), "offset 96 points outside a 64-byte buffer");
    }
}
