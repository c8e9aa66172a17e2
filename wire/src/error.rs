//! Error types for envelope and capture handling.

use thiserror::Error;

/// Result type for wire operations.
pub type WireResult<T> = Result<T, WireError>;

/// Errors raised while building packets from external input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    /// Direction was neither `"C"` nor `"S"`.
    #[error("invalid direction {found:?}, expected \"C\" or \"S\"")]
    InvalidDirection {
        /// The rejected value.
        found: String,
    },

    /// Hex payload could not be decoded.
    #[error("invalid hex payload: {reason}")]
    InvalidHex {
        /// Decoder message.
        reason: String,
    },
}

impl From<hex::FromHexError> for WireError {
    fn from(err: hex::FromHexError) -> Self {
        Self::InvalidHex {
            reason: err.to_string(),
        }
    }
}
