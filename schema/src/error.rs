//! Schema validation errors.

use thiserror::Error;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors that can occur when building, parsing or validating a schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A field has an empty name.
    #[error("field {index} has an empty name")]
    EmptyFieldName { index: usize },

    /// Two fields share a name.
    #[error("duplicate field name {name:?}")]
    DuplicateField { name: String },

    /// An unprefixed UTF-8/ASCII string consumes the rest of the buffer, so
    /// nothing may follow it.
    #[error("unterminated string field {name:?} must be the last field")]
    UnterminatedStringNotLast { name: String },

    /// A type name in a textual schema is not a supported field type.
    #[error("unsupported field type {name:?}")]
    UnsupportedFieldType { name: String },

    /// A textual schema entry is not of the form `name:type`.
    #[error("malformed schema entry {entry:?}")]
    MalformedEntry { entry: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = SchemaError::DuplicateField {
            name: "price".to_string(),
        };
        assert!(err.to_string().contains("\"price\""));
        let err = SchemaError::UnsupportedFieldType {
            name: "decimal".to_string(),
        };
        assert!(err.to_string().contains("decimal"));
    }
}
