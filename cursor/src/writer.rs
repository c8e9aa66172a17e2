//! Little-endian writer that mirrors [`ByteReader`](crate::ByteReader).

use crate::error::{CursorError, CursorResult};
use crate::text::{TextEncoding, TextFormat};

/// A growable byte writer for encoding packet payloads.
#[derive(Debug, Default, Clone)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    /// Creates an empty writer.
    #[must_use]
    pub const fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Creates an empty writer with room for `capacity` bytes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns the bytes written so far.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn write_i8(&mut self, value: i8) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a boolean as a single `0`/`1` byte.
    pub fn write_bool(&mut self, value: bool) {
        self.buf.push(u8::from(value));
    }

    pub fn write_u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_i16(&mut self, value: i16) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_i32(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_i64(&mut self, value: i64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_f32(&mut self, value: f32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_f64(&mut self, value: f64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Writes a `u16` code-unit count followed by the UTF-16LE units, with no
    /// terminator.
    pub fn write_length_prefixed_utf16(&mut self, text: &str) -> CursorResult<()> {
        let (bytes, units) = TextEncoding::Utf16Le.encode(text)?;
        self.write_u16(prefix(units)?);
        self.write_bytes(&bytes);
        Ok(())
    }

    /// Writes UTF-16LE units followed by a NUL unit.
    ///
    /// An empty string is written as a bare terminator, which reads back as a
    /// null string.
    pub fn write_utf16_nul_terminated(&mut self, text: &str) -> CursorResult<()> {
        reject_embedded_nul(text)?;
        let (bytes, _) = TextEncoding::Utf16Le.encode(text)?;
        self.write_bytes(&bytes);
        self.write_u16(0);
        Ok(())
    }

    /// Writes a string laid out according to `format`.
    pub fn write_string(&mut self, text: &str, format: TextFormat) -> CursorResult<()> {
        let encoding = format.encoding;
        if !format.length_prefixed && encoding == TextEncoding::Utf16Le {
            return self.write_utf16_nul_terminated(text);
        }
        let (bytes, units) = encoding.encode(text)?;
        if format.length_prefixed {
            self.write_u16(prefix(units)?);
        }
        self.write_bytes(&bytes);
        if encoding == TextEncoding::Utf16Le {
            self.write_u16(0);
        }
        Ok(())
    }

    /// Consumes the writer and returns the encoded bytes.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

fn prefix(units: usize) -> CursorResult<u16> {
    u16::try_from(units).map_err(|_| CursorError::LengthOverflow { length: units })
}

fn reject_embedded_nul(text: &str) -> CursorResult<()> {
    if text.contains('\0') {
        return Err(CursorError::InvalidEncoding {
            encoding: TextEncoding::Utf16Le,
            reason: "embedded NUL in a terminated string",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ByteReader;

    #[test]
    fn empty_writer() {
        let writer = ByteWriter::new();
        assert!(writer.is_empty());
        assert!(writer.finish().is_empty());
    }

    #[test]
    fn integers_are_little_endian() {
        let mut writer = ByteWriter::new();
        writer.write_u32(0x1234_5678);
        writer.write_i16(-2);
        writer.write_bool(true);
        assert_eq!(writer.finish(), vec![0x78, 0x56, 0x34, 0x12, 0xFE, 0xFF, 0x01]);
    }

    #[test]
    fn length_prefixed_utf16_has_no_terminator() {
        let mut writer = ByteWriter::new();
        writer.write_length_prefixed_utf16("Hero").unwrap();
        assert_eq!(
            writer.finish(),
            vec![0x04, 0x00, b'H', 0, b'e', 0, b'r', 0, b'o', 0]
        );
    }

    #[test]
    fn prefixed_utf16_string_gets_terminator() {
        let mut writer = ByteWriter::new();
        writer.write_string("ab", TextFormat::UTF16_PREFIXED).unwrap();
        assert_eq!(writer.finish(), vec![0x02, 0x00, b'a', 0, b'b', 0, 0, 0]);
    }

    #[test]
    fn unprefixed_utf16_string() {
        let mut writer = ByteWriter::new();
        writer.write_string("hi", TextFormat::UTF16_TERMINATED).unwrap();
        assert_eq!(writer.finish(), vec![b'h', 0, b'i', 0, 0, 0]);
    }

    #[test]
    fn prefixed_utf8_counts_bytes() {
        let mut writer = ByteWriter::new();
        writer.write_string("é", TextFormat::UTF8_PREFIXED).unwrap();
        assert_eq!(writer.finish(), vec![0x02, 0x00, 0xC3, 0xA9]);
    }

    #[test]
    fn ascii_rejects_non_ascii() {
        let mut writer = ByteWriter::new();
        let format = TextFormat::new(TextEncoding::Ascii, true);
        let err = writer.write_string("naïve", format).unwrap_err();
        assert!(matches!(err, CursorError::InvalidEncoding { .. }));
        assert!(writer.is_empty());
    }

    #[test]
    fn overlong_string_overflows_prefix() {
        let text = "x".repeat(usize::from(u16::MAX) + 1);
        let mut writer = ByteWriter::new();
        let err = writer.write_string(&text, TextFormat::UTF8_PREFIXED).unwrap_err();
        assert_eq!(
            err,
            CursorError::LengthOverflow {
                length: usize::from(u16::MAX) + 1
            }
        );
    }

    #[test]
    fn embedded_nul_rejected_in_terminated_string() {
        let mut writer = ByteWriter::new();
        assert!(writer
            .write_string("a\0b", TextFormat::UTF16_TERMINATED)
            .is_err());
    }

    #[test]
    fn nul_terminated_roundtrip() {
        let mut writer = ByteWriter::new();
        writer.write_utf16_nul_terminated("Seller").unwrap();
        writer.write_utf16_nul_terminated("").unwrap();
        let bytes = writer.finish();

        let mut reader = ByteReader::new(&bytes);
        assert_eq!(
            reader.read_utf16_until_nul(64).unwrap().as_deref(),
            Some("Seller")
        );
        assert_eq!(reader.read_utf16_until_nul(64).unwrap(), None);
    }
}
