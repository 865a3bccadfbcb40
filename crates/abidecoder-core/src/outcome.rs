//! The result of a single decode attempt.

use crate::error::DecodeError;

/// Distinguishes "not something we know" from "known, but the bytes are bad".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeOutcome<T> {
    Decoded(T),
    /// No registered item matches the selector / topic.
    Unresolved,
    /// An item matched but its payload could not be decoded.
    Failed(DecodeError),
}

impl<T> DecodeOutcome<T> {
    /// `true` for `Decoded`.
    pub fn is_decoded(&self) -> bool {
        matches!(self, DecodeOutcome::Decoded(_))
    }

    /// No registered item matched.
    pub fn is_unresolved(&self) -> bool {
        matches!(self, DecodeOutcome::Unresolved)
    }

    /// The decoded value, if any.
    pub fn decoded(&self) -> Option<&T> {
        match self {
            DecodeOutcome::Decoded(v) => Some(v),
            _ => None,
        }
    }

    /// Collapse to `Option`, losing the unresolved/failed distinction.
    pub fn into_decoded(self) -> Option<T> {
        match self {
            DecodeOutcome::Decoded(v) => Some(v),
            _ => None,
        }
    }

    /// The decode error, for `Failed`.
    pub fn error(&self) -> Option<&DecodeError> {
        match self {
            DecodeOutcome::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Transform the decoded value, leaving the other variants as they are.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> DecodeOutcome<U> {
        match self {
            DecodeOutcome::Decoded(v) => DecodeOutcome::Decoded(f(v)),
            DecodeOutcome::Unresolved => DecodeOutcome::Unresolved,
            DecodeOutcome::Failed(e) => DecodeOutcome::Failed(e),
        }
    }
}

impl<T> From<Result<T, DecodeError>> for DecodeOutcome<T> {
    fn from(r: Result<T, DecodeError>) -> Self {
        match r {
            Ok(v) => DecodeOutcome::Decoded(v),
            Err(e) => DecodeOutcome::Failed(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_conversion() {
        let ok: DecodeOutcome<u8> = Ok(1).into();
        assert_eq!(ok.decoded(), Some(&1));

        let err: DecodeOutcome<u8> =
            Err(DecodeError::OffsetOutOfRange { offset: 1, len: 0 }).into();
        assert!(err.error().is_some());
        assert!(!err.is_unresolved());
        assert_eq!(err.into_decoded(), None);
    }
}
