//! Field types and definitions.

use std::fmt;
use std::str::FromStr;

use crate::error::SchemaError;

/// The wire type of a schema field.
///
/// Integers and floats are little-endian. `Bool` is one `0`/`1` byte, `Vec3`
/// is three `f32` (x, y, z), and `String` follows the schema's text format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub enum FieldType {
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
    Bool,
    Vec3,
    String,
}

impl FieldType {
    /// Every field type, in declaration order.
    pub const ALL: [Self; 12] = [
        Self::U8,
        Self::I16,
        Self::U16,
        Self::I32,
        Self::U32,
        Self::I64,
        Self::U64,
        Self::F32,
        Self::F64,
        Self::Bool,
        Self::Vec3,
        Self::String,
    ];

    /// Encoded width in bytes, or `None` for strings.
    #[must_use]
    pub const fn fixed_width(self) -> Option<usize> {
        match self {
            Self::U8 | Self::Bool => Some(1),
            Self::I16 | Self::U16 => Some(2),
            Self::I32 | Self::U32 | Self::F32 => Some(4),
            Self::I64 | Self::U64 | Self::F64 => Some(8),
            Self::Vec3 => Some(12),
            Self::String => None,
        }
    }

    /// Canonical lowercase name, as accepted by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::I16 => "i16",
            Self::U16 => "u16",
            Self::I32 => "i32",
            Self::U32 => "u32",
            Self::I64 => "i64",
            Self::U64 => "u64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Bool => "bool",
            Self::Vec3 => "vec3",
            Self::String => "string",
        }
    }

    /// Stable numeric tag used when fingerprinting schemas.
    pub(crate) const fn tag(self) -> u8 {
        match self {
            Self::U8 => 0,
            Self::I16 => 1,
            Self::U16 => 2,
            Self::I32 => 3,
            Self::U32 => 4,
            Self::I64 => 5,
            Self::U64 => 6,
            Self::F32 => 7,
            Self::F64 => 8,
            Self::Bool => 9,
            Self::Vec3 => 10,
            Self::String => 11,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FieldType {
    type Err = SchemaError;

    /// Parses a canonical name, or one of the .NET-style aliases used by
    /// older command definitions (`byte`, `short`, `int`, `Vector3`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ty = match s.trim() {
            "u8" | "byte" => Self::U8,
            "i16" | "short" => Self::I16,
            "u16" | "ushort" => Self::U16,
            "i32" | "int" => Self::I32,
            "u32" | "uint" => Self::U32,
            "i64" | "long" => Self::I64,
            "u64" | "ulong" => Self::U64,
            "f32" | "float" => Self::F32,
            "f64" | "double" => Self::F64,
            "bool" => Self::Bool,
            "vec3" | "Vector3" => Self::Vec3,
            "string" => Self::String,
            other => {
                return Err(SchemaError::UnsupportedFieldType {
                    name: other.to_string(),
                })
            }
        };
        Ok(ty)
    }
}

impl TryFrom<String> for FieldType {
    type Error = SchemaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FieldType> for String {
    fn from(ty: FieldType) -> Self {
        ty.name().to_string()
    }
}

/// A named field in a schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldDef {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub ty: FieldType,
}

impl FieldDef {
    /// Creates a field definition.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}
