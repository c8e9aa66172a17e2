//! Error types for cursor operations.

use thiserror::Error;

use crate::text::TextEncoding;

/// Result type for cursor operations.
pub type CursorResult<T> = Result<T, CursorError>;

/// Errors that can occur while reading or writing through a cursor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CursorError {
    /// Attempted to read past the end of the buffer.
    #[error("attempted to read {requested} bytes but only {available} bytes available")]
    Truncated {
        /// Number of bytes requested.
        requested: usize,
        /// Number of bytes available.
        available: usize,
    },

    /// Text could not be decoded from, or encoded into, the given encoding.
    #[error("invalid {encoding} text: {reason}")]
    InvalidEncoding {
        /// Encoding that was in effect.
        encoding: TextEncoding,
        /// What went wrong.
        reason: &'static str,
    },

    /// A string length does not fit its 16-bit prefix or a caller-supplied maximum.
    #[error("string length {length} exceeds the allowed maximum")]
    LengthOverflow {
        /// Length in code units.
        length: usize,
    },
}
