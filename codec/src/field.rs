//! Schema-driven field codec.
//!
//! Records describe their layout with a [`FieldSchema`]; values travel as
//! [`FieldValue`]s in schema order. Schema order is wire order and every
//! [`FieldType`] has exactly one representation.

use cursor::{ByteReader, ByteWriter, TextFormat};
use schema::{FieldDef, FieldSchema, FieldType};
use serde::Serialize;

use crate::error::{DecodeError, DecodeResult, EncodeError, EncodeResult};

/// Three little-endian `f32` components.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// A decoded field value; one variant per [`FieldType`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
    Bool(bool),
    Vec3(Vec3),
    String(String),
}

impl FieldValue {
    /// The field type this value encodes as.
    #[must_use]
    pub const fn field_type(&self) -> FieldType {
        match self {
            Self::U8(_) => FieldType::U8,
            Self::I16(_) => FieldType::I16,
            Self::U16(_) => FieldType::U16,
            Self::I32(_) => FieldType::I32,
            Self::U32(_) => FieldType::U32,
            Self::I64(_) => FieldType::I64,
            Self::U64(_) => FieldType::U64,
            Self::F32(_) => FieldType::F32,
            Self::F64(_) => FieldType::F64,
            Self::Bool(_) => FieldType::Bool,
            Self::Vec3(_) => FieldType::Vec3,
            Self::String(_) => FieldType::String,
        }
    }

    /// Parses `text` as a value of type `ty`.
    ///
    /// Integers accept decimal or `0x` hex, booleans `true`/`false`/`1`/`0`,
    /// and vectors `x,y,z`. Returns `None` when the text does not fit the type.
    #[must_use]
    pub fn parse(ty: FieldType, text: &str) -> Option<Self> {
        let text = text.trim();
        let value = match ty {
            FieldType::U8 => Self::U8(parse_int(text)?),
            FieldType::I16 => Self::I16(parse_int(text)?),
            FieldType::U16 => Self::U16(parse_int(text)?),
            FieldType::I32 => Self::I32(parse_int(text)?),
            FieldType::U32 => Self::U32(parse_int(text)?),
            FieldType::I64 => Self::I64(parse_int(text)?),
            FieldType::U64 => Self::U64(parse_int(text)?),
            FieldType::F32 => Self::F32(text.parse().ok()?),
            FieldType::F64 => Self::F64(text.parse().ok()?),
            FieldType::Bool => match text {
                "true" | "1" => Self::Bool(true),
                "false" | "0" => Self::Bool(false),
                _ => return None,
            },
            FieldType::Vec3 => {
                let mut parts = text.split(',').map(|part| part.trim().parse::<f32>());
                let x = parts.next()?.ok()?;
                let y = parts.next()?.ok()?;
                let z = parts.next()?.ok()?;
                if parts.next().is_some() {
                    return None;
                }
                Self::Vec3(Vec3 { x, y, z })
            }
            FieldType::String => Self::String(text.to_string()),
        };
        Some(value)
    }
}

fn parse_int<T: TryFrom<i128>>(text: &str) -> Option<T> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let magnitude = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) => i128::from_str_radix(hex, 16).ok()?,
        None => digits.parse::<i128>().ok()?,
    };
    T::try_from(if negative { -magnitude } else { magnitude }).ok()
}

/// A Rust type with a fixed wire layout described by a static schema.
pub trait Record: Sized {
    /// The record's layout, built once.
    fn schema() -> &'static FieldSchema;

    /// Field values in schema order.
    fn to_values(&self) -> Vec<FieldValue>;

    /// Rebuilds the record from values in schema order.
    fn from_values(values: FieldValues<'_>) -> DecodeResult<Self>;
}

/// Declares a record schema backed by a `OnceLock`.
///
/// ```
/// use codec::{record_schema, FieldSchema};
/// use cursor::TextFormat;
///
/// fn schema() -> &'static FieldSchema {
///     record_schema!(TextFormat::UTF8_PREFIXED; "id" => U8, "object_id" => I32)
/// }
/// assert_eq!(schema().len(), 2);
/// ```
#[macro_export]
macro_rules! record_schema {
    ($text:expr; $($name:literal => $ty:ident),+ $(,)?) => {{
        static SCHEMA: ::std::sync::OnceLock<$crate::FieldSchema> = ::std::sync::OnceLock::new();
        SCHEMA.get_or_init(|| {
            $crate::FieldSchema::new_unchecked(
                vec![$($crate::FieldDef::new($name, $crate::FieldType::$ty)),+],
                $text,
            )
        })
    }};
}

/// Typed, in-order access to decoded values for [`Record::from_values`].
#[derive(Debug)]
pub struct FieldValues<'s> {
    schema: &'s FieldSchema,
    values: std::vec::IntoIter<FieldValue>,
    index: usize,
}

/// A Rust type that stores exactly one [`FieldType`].
pub trait FieldKind: Sized + Into<FieldValue> {
    const TYPE: FieldType;

    /// Unwraps a value of this kind, or `None` for any other variant.
    fn from_value(value: FieldValue) -> Option<Self>;
}

macro_rules! field_kinds {
    ($($method:ident => $variant:ident: $ty:ty),* $(,)?) => {
        $(
            impl FieldKind for $ty {
                const TYPE: FieldType = FieldType::$variant;

                fn from_value(value: FieldValue) -> Option<Self> {
                    match value {
                        FieldValue::$variant(v) => Some(v),
                        _ => None,
                    }
                }
            }

            impl From<$ty> for FieldValue {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*

        impl FieldValues<'_> {
            $(
                pub fn $method(&mut self) -> DecodeResult<$ty> {
                    self.take()
                }
            )*
        }
    };
}

field_kinds! {
    u8 => U8: u8,
    i16 => I16: i16,
    u16 => U16: u16,
    i32 => I32: i32,
    u32 => U32: u32,
    i64 => I64: i64,
    u64 => U64: u64,
    f32 => F32: f32,
    f64 => F64: f64,
    bool => Bool: bool,
    vec3 => Vec3: Vec3,
    string => String: String,
}

impl<'s> FieldValues<'s> {
    #[must_use]
    pub fn new(schema: &'s FieldSchema, values: Vec<FieldValue>) -> Self {
        Self {
            schema,
            values: values.into_iter(),
            index: 0,
        }
    }

    /// Takes the next value, which must be of kind `T`.
    pub fn take<T: FieldKind>(&mut self) -> DecodeResult<T> {
        let index = self.index;
        self.index += 1;
        self.values
            .next()
            .and_then(T::from_value)
            .ok_or_else(|| DecodeError::TypeMismatch {
                field: field_name(self.schema, index),
                expected: T::TYPE,
            })
    }
}

fn field_name(schema: &FieldSchema, index: usize) -> String {
    schema
        .fields()
        .get(index)
        .map_or_else(|| format!("#{index}"), |field| field.name.clone())
}

/// Encodes `values` in schema order.
pub fn encode_fields(schema: &FieldSchema, values: &[FieldValue]) -> EncodeResult<Vec<u8>> {
    let mut writer = ByteWriter::with_capacity(schema.fixed_size().unwrap_or(64));
    encode_fields_into(schema, values, &mut writer)?;
    Ok(writer.finish())
}

/// Encodes `values` onto an existing writer.
pub fn encode_fields_into(
    schema: &FieldSchema,
    values: &[FieldValue],
    writer: &mut ByteWriter,
) -> EncodeResult<()> {
    if values.len() != schema.len() {
        return Err(EncodeError::ValueCount {
            expected: schema.len(),
            found: values.len(),
        });
    }
    for (field, value) in schema.fields().iter().zip(values) {
        write_value(writer, field, value, schema.text())?;
    }
    Ok(())
}

/// Parses a `name:type` schema and encodes `values` with it.
///
/// Unknown type names fail with [`EncodeError::UnsupportedFieldType`].
pub fn encode_with_schema_text(
    source: &str,
    text: TextFormat,
    values: &[FieldValue],
) -> EncodeResult<Vec<u8>> {
    let schema = FieldSchema::parse(source, text)?;
    encode_fields(&schema, values)
}

/// Decodes a whole buffer; bytes left over are an error.
pub fn decode_fields(schema: &FieldSchema, bytes: &[u8]) -> DecodeResult<Vec<FieldValue>> {
    let mut reader = ByteReader::new(bytes);
    let values = decode_fields_from(schema, &mut reader)?;
    if !reader.is_empty() {
        return Err(DecodeError::TrailingBytes {
            remaining: reader.remaining(),
        });
    }
    Ok(values)
}

/// Decodes one schema's worth of fields from a reader, leaving the rest.
pub fn decode_fields_from(
    schema: &FieldSchema,
    reader: &mut ByteReader<'_>,
) -> DecodeResult<Vec<FieldValue>> {
    schema
        .fields()
        .iter()
        .map(|field| read_value(reader, field.ty, schema.text()))
        .collect()
}

pub fn encode_record<R: Record>(record: &R) -> EncodeResult<Vec<u8>> {
    encode_fields(R::schema(), &record.to_values())
}

pub fn encode_record_into<R: Record>(record: &R, writer: &mut ByteWriter) -> EncodeResult<()> {
    encode_fields_into(R::schema(), &record.to_values(), writer)
}

pub fn decode_record<R: Record>(bytes: &[u8]) -> DecodeResult<R> {
    let schema = R::schema();
    R::from_values(FieldValues::new(schema, decode_fields(schema, bytes)?))
}

pub fn decode_record_from<R: Record>(reader: &mut ByteReader<'_>) -> DecodeResult<R> {
    let schema = R::schema();
    R::from_values(FieldValues::new(schema, decode_fields_from(schema, reader)?))
}

/// Encodes a record and renders it as uppercase hex.
pub fn record_to_hex<R: Record>(record: &R) -> EncodeResult<String> {
    encode_record(record).map(|bytes| wire::to_hex(&bytes))
}

fn write_value(
    writer: &mut ByteWriter,
    field: &FieldDef,
    value: &FieldValue,
    text: TextFormat,
) -> EncodeResult<()> {
    match (field.ty, value) {
        (FieldType::U8, FieldValue::U8(v)) => writer.write_u8(*v),
        (FieldType::I16, FieldValue::I16(v)) => writer.write_i16(*v),
        (FieldType::U16, FieldValue::U16(v)) => writer.write_u16(*v),
        (FieldType::I32, FieldValue::I32(v)) => writer.write_i32(*v),
        (FieldType::U32, FieldValue::U32(v)) => writer.write_u32(*v),
        (FieldType::I64, FieldValue::I64(v)) => writer.write_i64(*v),
        (FieldType::U64, FieldValue::U64(v)) => writer.write_u64(*v),
        (FieldType::F32, FieldValue::F32(v)) => writer.write_f32(*v),
        (FieldType::F64, FieldValue::F64(v)) => writer.write_f64(*v),
        (FieldType::Bool, FieldValue::Bool(v)) => writer.write_bool(*v),
        (FieldType::Vec3, FieldValue::Vec3(v)) => {
            writer.write_f32(v.x);
            writer.write_f32(v.y);
            writer.write_f32(v.z);
        }
        (FieldType::String, FieldValue::String(v)) => writer.write_string(v, text)?,
        (expected, _) => {
            return Err(EncodeError::TypeMismatch {
                field: field.name.clone(),
                expected,
            })
        }
    }
    Ok(())
}

fn read_value(
    reader: &mut ByteReader<'_>,
    ty: FieldType,
    text: TextFormat,
) -> DecodeResult<FieldValue> {
    let value = match ty {
        FieldType::U8 => FieldValue::U8(reader.read_u8()?),
        FieldType::I16 => FieldValue::I16(reader.read_i16()?),
        FieldType::U16 => FieldValue::U16(reader.read_u16()?),
        FieldType::I32 => FieldValue::I32(reader.read_i32()?),
        FieldType::U32 => FieldValue::U32(reader.read_u32()?),
        FieldType::I64 => FieldValue::I64(reader.read_i64()?),
        FieldType::U64 => FieldValue::U64(reader.read_u64()?),
        FieldType::F32 => FieldValue::F32(reader.read_f32()?),
        FieldType::F64 => FieldValue::F64(reader.read_f64()?),
        FieldType::Bool => FieldValue::Bool(reader.read_bool()?),
        FieldType::Vec3 => FieldValue::Vec3(Vec3 {
            x: reader.read_f32()?,
            y: reader.read_f32()?,
            z: reader.read_f32()?,
        }),
        FieldType::String => FieldValue::String(reader.read_string(text)?),
    };
    Ok(value)
}
