//! Field schemas for fixed-layout records in the l2wire codec.
//!
//! This crate defines how fixed-layout records are described:
//! - [`FieldType`] and [`FieldDef`] for individual fields
//! - [`FieldSchema`] for an ordered record layout plus its string [`TextFormat`]
//! - Deterministic schema fingerprinting
//!
//! # Design Principles
//!
//! - **Explicit schemas** - No reflection on arbitrary Rust types; records
//!   describe themselves.
//! - **Validated once** - A `FieldSchema` that exists is a valid one.
//! - **Deterministic hashing** - The fingerprint is stable given the same definition.
//!
//! [`TextFormat`]: cursor::TextFormat

mod error;
mod field;
mod hash;
mod schema;

pub use error::{SchemaError, SchemaResult};
pub use field::{FieldDef, FieldType};
pub use hash::schema_fingerprint;
pub use schema::{FieldSchema, SchemaBuilder};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_exports() {
        let _ = FieldType::U8;
        let _ = FieldDef::new("id", FieldType::U8);
        let _ = FieldSchema::builder();
        let _: SchemaResult<()> = Ok(());
    }

    #[test]
    fn empty_schema_is_valid() {
        let schema = FieldSchema::builder().build().unwrap();
        assert!(schema.is_empty());
        assert_eq!(schema.fixed_size(), Some(0));
        let _ = schema_fingerprint(&schema);
    }
}
