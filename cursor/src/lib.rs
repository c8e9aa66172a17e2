//! Byte-level cursor primitives for the l2wire codec.
//!
//! This crate provides [`ByteReader`] and [`ByteWriter`] for little-endian packet
//! payloads, plus the [`TextFormat`] rules used for string fields.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Safety is paramount.
//! - **Bounded operations** - All reads are bounds-checked and never move backward.
//! - **No domain knowledge** - This crate knows nothing about packets or components.
//! - **Explicit errors** - All failures return structured errors, never panic.
//!
//! # Example
//!
//! ```
//! use cursor::{ByteReader, ByteWriter, TextFormat};
//!
//! let mut writer = ByteWriter::new();
//! writer.write_u32(0x1234_5678);
//! writer.write_string("Hero", TextFormat::UTF16_TERMINATED).unwrap();
//!
//! let bytes = writer.finish();
//!
//! let mut reader = ByteReader::new(&bytes);
//! assert_eq!(reader.read_u32().unwrap(), 0x1234_5678);
//! assert_eq!(reader.read_string(TextFormat::UTF16_TERMINATED).unwrap(), "Hero");
//! ```

mod error;
mod reader;
mod text;
mod writer;

pub use error::{CursorError, CursorResult};
pub use reader::ByteReader;
pub use text::{TextEncoding, TextFormat};
pub use writer::ByteWriter;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_roundtrip() {
        let bytes = ByteWriter::new().finish();
        assert!(bytes.is_empty());
        assert!(ByteReader::new(&bytes).is_empty());
    }

    #[test]
    fn mixed_roundtrip() {
        let mut writer = ByteWriter::new();
        writer.write_u8(0x32);
        writer.write_i32(-17);
        writer.write_length_prefixed_utf16("Name").unwrap();
        writer.write_f32(0.5);
        writer.write_u64(u64::MAX);
        let bytes = writer.finish();

        let mut reader = ByteReader::new(&bytes);
        assert_eq!(reader.read_u8().unwrap(), 0x32);
        assert_eq!(reader.read_i32().unwrap(), -17);
        assert_eq!(reader.read_length_prefixed_utf16().unwrap(), "Name");
        assert!((reader.read_f32().unwrap() - 0.5).abs() < f32::EPSILON);
        assert_eq!(reader.read_u64().unwrap(), u64::MAX);
        assert!(reader.is_empty());
    }

    #[test]
    fn doctest_example() {
        let mut writer = ByteWriter::new();
        writer.write_u32(0x1234_5678);
        writer
            .write_string("Hero", TextFormat::UTF16_TERMINATED)
            .unwrap();
        let bytes = writer.finish();

        let mut reader = ByteReader::new(&bytes);
        assert_eq!(reader.read_u32().unwrap(), 0x1234_5678);
        assert_eq!(
            reader.read_string(TextFormat::UTF16_TERMINATED).unwrap(),
            "Hero"
        );
    }
}
