//! Error types for codec operations.

use std::fmt;

use cursor::{CursorError, TextEncoding};
use schema::{FieldType, SchemaError};
use thiserror::Error;

/// Result type for decoding.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Result type for encoding.
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Errors that can occur while decoding a payload.
///
/// None of these are retried: decoding the same bytes again cannot succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The payload has no bytes at all.
    #[error("empty packet")]
    EmptyPacket,

    /// A read would run past the end of the payload.
    #[error("truncated buffer: needed {requested} bytes but only {available} available")]
    TruncatedBuffer { requested: usize, available: usize },

    /// A fixed-ID packet shape found a different leading ID byte.
    #[error("unexpected packet id 0x{found:02X}, expected 0x{expected:02X}")]
    UnexpectedPacketId { expected: u8, found: u8 },

    /// Text could not be decoded.
    #[error("invalid {encoding} text: {reason}")]
    InvalidEncoding {
        encoding: TextEncoding,
        reason: &'static str,
    },

    /// A size or count read from the wire exceeds the configured limit.
    #[error("{kind} limit exceeded: {actual} > {limit}")]
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },

    /// A count read from the wire is negative.
    #[error("invalid {what} count {count}")]
    InvalidCount { what: &'static str, count: i64 },

    /// Bytes remained after the last schema field.
    #[error("{remaining} trailing bytes after the last field")]
    TrailingBytes { remaining: usize },

    /// A field value did not have the type its record expects.
    #[error("field {field:?} is not a {expected} value")]
    TypeMismatch { field: String, expected: FieldType },
}

/// Specific limit that was exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    PacketBytes,
    ListItems,
    StringUnits,
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PacketBytes => "packet bytes",
            Self::ListItems => "list items",
            Self::StringUnits => "string units",
        };
        f.write_str(name)
    }
}

impl From<CursorError> for DecodeError {
    fn from(err: CursorError) -> Self {
        match err {
            CursorError::Truncated {
                requested,
                available,
            } => Self::TruncatedBuffer {
                requested,
                available,
            },
            CursorError::InvalidEncoding { encoding, reason } => {
                Self::InvalidEncoding { encoding, reason }
            }
            // The reader reports the first unit past the caller's maximum.
            CursorError::LengthOverflow { length } => Self::LimitsExceeded {
                kind: LimitKind::StringUnits,
                limit: length.saturating_sub(1),
                actual: length,
            },
        }
    }
}

/// Errors that can occur while encoding records or packets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// A schema named a type the field codec cannot serialize.
    #[error("unsupported field type {name:?}")]
    UnsupportedFieldType { name: String },

    /// A schema given as text failed validation.
    #[error("invalid schema: {0}")]
    InvalidSchema(SchemaError),

    /// A value does not match the type of its schema field.
    #[error("field {field:?} expects a {expected} value")]
    TypeMismatch { field: String, expected: FieldType },

    /// A field name is not part of the schema.
    #[error("no field named {name:?}")]
    UnknownField { name: String },

    /// The number of values differs from the number of schema fields.
    #[error("schema has {expected} fields but {found} values were given")]
    ValueCount { expected: usize, found: usize },

    /// A mask bit is set but no value was supplied for it.
    #[error("mask bit {tag} is set but no component value was supplied")]
    MissingComponent { tag: u8 },

    /// Text cannot be represented in the requested encoding.
    #[error("invalid {encoding} text: {reason}")]
    InvalidEncoding {
        encoding: TextEncoding,
        reason: &'static str,
    },

    /// A string or list is too long for its length field.
    #[error("length {length} does not fit its length field")]
    LengthOverflow { length: usize },
}

impl From<CursorError> for EncodeError {
    fn from(err: CursorError) -> Self {
        match err {
            CursorError::InvalidEncoding { encoding, reason } => {
                Self::InvalidEncoding { encoding, reason }
            }
            CursorError::LengthOverflow { length } => Self::LengthOverflow { length },
            // Writers never report truncation.
            CursorError::Truncated { requested, .. } => Self::LengthOverflow { length: requested },
        }
    }
}

impl From<SchemaError> for EncodeError {
    fn from(err: SchemaError) -> Self {
        match err {
            SchemaError::UnsupportedFieldType { name } => Self::UnsupportedFieldType { name },
            other => Self::InvalidSchema(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_truncation_maps_to_truncated_buffer() {
        let err: DecodeError = CursorError::Truncated {
            requested: 4,
            available: 1,
        }
        .into();
        assert_eq!(
            err,
            DecodeError::TruncatedBuffer {
                requested: 4,
                available: 1
            }
        );
    }

    #[test]
    fn cursor_overflow_maps_to_string_limit() {
        let err: DecodeError = CursorError::LengthOverflow { length: 65 }.into();
        assert_eq!(
            err,
            DecodeError::LimitsExceeded {
                kind: LimitKind::StringUnits,
                limit: 64,
                actual: 65
            }
        );
    }

    #[test]
    fn unsupported_type_survives_schema_conversion() {
        let err: EncodeError = SchemaError::UnsupportedFieldType {
            name: "decimal".to_string(),
        }
        .into();
        assert!(matches!(err, EncodeError::UnsupportedFieldType { .. }));

        let err: EncodeError = SchemaError::EmptyFieldName { index: 0 }.into();
        assert!(matches!(err, EncodeError::InvalidSchema(_)));
    }

    #[test]
    fn display_messages() {
        let err = DecodeError::UnexpectedPacketId {
            expected: 0x32,
            found: 0x33,
        };
        assert_eq!(err.to_string(), "unexpected packet id 0x33, expected 0x32");

        let err = DecodeError::LimitsExceeded {
            kind: LimitKind::ListItems,
            limit: 120,
            actual: 300,
        };
        assert!(err.to_string().contains("list items"));
    }

    #[test]
    fn errors_are_send_sync() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<DecodeError>();
        assert_error::<EncodeError>();
    }
}
