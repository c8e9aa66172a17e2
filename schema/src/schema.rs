//! Record schemas and validation.

use std::collections::HashSet;

use cursor::{TextEncoding, TextFormat};

use crate::error::{SchemaError, SchemaResult};
use crate::field::{FieldDef, FieldType};
use crate::hash::schema_fingerprint;

/// An ordered list of fields plus the text format used for string fields.
///
/// Schema order is wire order. Field names are unique and non-empty, and an
/// unprefixed UTF-8/ASCII string (which runs to the end of the buffer) can
/// only be the last field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "SchemaDoc", into = "SchemaDoc"))]
pub struct FieldSchema {
    fields: Vec<FieldDef>,
    text: TextFormat,
}

impl FieldSchema {
    /// Creates a schema after validation.
    pub fn new(fields: Vec<FieldDef>, text: TextFormat) -> SchemaResult<Self> {
        let schema = Self { fields, text };
        schema.validate()?;
        Ok(schema)
    }

    /// Creates a schema without validating it.
    ///
    /// Meant for schemas written out in source; pair each with a test that
    /// calls [`FieldSchema::validate`].
    #[must_use]
    pub fn new_unchecked(fields: Vec<FieldDef>, text: TextFormat) -> Self {
        Self { fields, text }
    }

    /// Creates a schema builder using UTF-8 length-prefixed strings.
    #[must_use]
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Parses a comma- or newline-separated list of `name:type` entries.
    ///
    /// ```
    /// use cursor::TextFormat;
    /// use schema::{FieldSchema, FieldType};
    ///
    /// let schema = FieldSchema::parse("id:u8, object_id:i32", TextFormat::UTF8_PREFIXED).unwrap();
    /// assert_eq!(schema.fields()[1].ty, FieldType::I32);
    /// ```
    pub fn parse(source: &str, text: TextFormat) -> SchemaResult<Self> {
        let mut fields = Vec::new();
        for entry in source
            .split(|c| c == ',' || c == '\n')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
        {
            let (name, ty) = entry
                .split_once(':')
                .ok_or_else(|| SchemaError::MalformedEntry {
                    entry: entry.to_string(),
                })?;
            fields.push(FieldDef::new(name.trim(), ty.parse::<FieldType>()?));
        }
        Self::new(fields, text)
    }

    /// Validates schema invariants.
    pub fn validate(&self) -> SchemaResult<()> {
        let mut names = HashSet::new();
        let last = self.fields.len().saturating_sub(1);
        for (index, field) in self.fields.iter().enumerate() {
            if field.name.is_empty() {
                return Err(SchemaError::EmptyFieldName { index });
            }
            if !names.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField {
                    name: field.name.clone(),
                });
            }
            if field.ty == FieldType::String && index != last && !self.text.is_self_delimiting() {
                return Err(SchemaError::UnterminatedStringNotLast {
                    name: field.name.clone(),
                });
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Text format applied to every string field.
    #[must_use]
    pub const fn text(&self) -> TextFormat {
        self.text
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the field named `name`, if any.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Encoded size in bytes when the schema has no string fields.
    #[must_use]
    pub fn fixed_size(&self) -> Option<usize> {
        self.fields
            .iter()
            .map(|field| field.ty.fixed_width())
            .sum()
    }

    /// Deterministic 64-bit digest of names, types and text format.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        schema_fingerprint(self)
    }
}

/// Builder for [`FieldSchema`].
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    fields: Vec<FieldDef>,
    text: TextFormat,
}

impl SchemaBuilder {
    /// Appends a field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, ty: FieldType) -> Self {
        self.fields.push(FieldDef::new(name, ty));
        self
    }

    /// Sets the text format for string fields.
    #[must_use]
    pub const fn text(mut self, text: TextFormat) -> Self {
        self.text = text;
        self
    }

    /// Shorthand for `text(TextFormat::new(encoding, length_prefixed))`.
    #[must_use]
    pub const fn strings(self, encoding: TextEncoding, length_prefixed: bool) -> Self {
        self.text(TextFormat::new(encoding, length_prefixed))
    }

    /// Builds the schema after validation.
    pub fn build(self) -> SchemaResult<FieldSchema> {
        FieldSchema::new(self.fields, self.text)
    }
}

/// Serialized shape of a schema; validated on the way in.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct SchemaDoc {
    #[serde(default)]
    text: TextFormat,
    fields: Vec<FieldDef>,
}

#[cfg(feature = "serde")]
impl TryFrom<SchemaDoc> for FieldSchema {
    type Error = SchemaError;

    fn try_from(doc: SchemaDoc) -> Result<Self, Self::Error> {
        Self::new(doc.fields, doc.text)
    }
}

#[cfg(feature = "serde")]
impl From<FieldSchema> for SchemaDoc {
    fn from(schema: FieldSchema) -> Self {
        Self {
            text: schema.text,
            fields: schema.fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_roundtrip() {
        let schema = FieldSchema::builder()
            .field("id", FieldType::U8)
            .field("object_id", FieldType::I32)
            .build()
            .unwrap();
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.text(), TextFormat::UTF8_PREFIXED);
        assert_eq!(schema.fixed_size(), Some(5));
    }

    #[test]
    fn unchecked_schema_can_be_validated_later() {
        let schema = FieldSchema::new_unchecked(
            vec![
                FieldDef::new("a", FieldType::U8),
                FieldDef::new("a", FieldType::U8),
            ],
            TextFormat::UTF8_PREFIXED,
        );
        assert!(schema.validate().is_err());
    }

    #[test]
    fn rejects_duplicate_names() {
        let err = FieldSchema::builder()
            .field("a", FieldType::U8)
            .field("a", FieldType::U16)
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateField { .. }));
    }

    #[test]
    fn rejects_empty_name() {
        let err = FieldSchema::builder()
            .field("", FieldType::U8)
            .build()
            .unwrap_err();
        assert_eq!(err, SchemaError::EmptyFieldName { index: 0 });
    }

    #[test]
    fn unprefixed_utf8_string_must_be_last() {
        let err = FieldSchema::builder()
            .strings(TextEncoding::Utf8, false)
            .field("text", FieldType::String)
            .field("after", FieldType::U8)
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::UnterminatedStringNotLast { .. }));

        FieldSchema::builder()
            .strings(TextEncoding::Utf8, false)
            .field("id", FieldType::U8)
            .field("text", FieldType::String)
            .build()
            .unwrap();
    }

    #[test]
    fn terminated_utf16_string_may_be_anywhere() {
        let schema = FieldSchema::builder()
            .text(TextFormat::UTF16_TERMINATED)
            .field("id", FieldType::U8)
            .field("text", FieldType::String)
            .field("chat_type", FieldType::I32)
            .build()
            .unwrap();
        assert_eq!(schema.fixed_size(), None);
    }

    #[test]
    fn parse_text_form() {
        let schema = FieldSchema::parse(
            "id: byte\nobject_id: int, position: Vector3",
            TextFormat::UTF8_PREFIXED,
        )
        .unwrap();
        assert_eq!(schema.field("position").unwrap().ty, FieldType::Vec3);
    }

    #[test]
    fn parse_rejects_unsupported_type() {
        let err = FieldSchema::parse("price: decimal", TextFormat::UTF8_PREFIXED).unwrap_err();
        assert!(matches!(err, SchemaError::UnsupportedFieldType { .. }));
    }

    #[test]
    fn parse_rejects_missing_colon() {
        let err = FieldSchema::parse("price", TextFormat::UTF8_PREFIXED).unwrap_err();
        assert!(matches!(err, SchemaError::MalformedEntry { .. }));
    }
}
