//! Forward-only little-endian reader with bounded operations.

use crate::error::{CursorError, CursorResult};
use crate::text::{decode_utf16_units, TextEncoding, TextFormat};

/// A byte reader for decoding little-endian packet payloads.
///
/// All read operations are bounds-checked and return errors on failure.
/// The position only moves forward, and the reader never panics on
/// malformed input.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Creates a new `ByteReader` from a byte slice.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the number of bytes remaining to read.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Returns `true` if there are no more bytes to read.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns the current byte position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Returns the unread part of the buffer without consuming it.
    #[must_use]
    pub fn remaining_slice(&self) -> &'a [u8] {
        self.data.get(self.pos..).unwrap_or_default()
    }

    pub fn read_u8(&mut self) -> CursorResult<u8> {
        let [b] = self.read_array::<1>()?;
        Ok(b)
    }

    pub fn read_i8(&mut self) -> CursorResult<i8> {
        Ok(i8::from_le_bytes(self.read_array::<1>()?))
    }

    /// Reads a one-byte boolean; any non-zero byte is `true`.
    pub fn read_bool(&mut self) -> CursorResult<bool> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_u16(&mut self) -> CursorResult<u16> {
        Ok(u16::from_le_bytes(self.read_array::<2>()?))
    }

    pub fn read_i16(&mut self) -> CursorResult<i16> {
        Ok(i16::from_le_bytes(self.read_array::<2>()?))
    }

    pub fn read_u32(&mut self) -> CursorResult<u32> {
        Ok(u32::from_le_bytes(self.read_array::<4>()?))
    }

    pub fn read_i32(&mut self) -> CursorResult<i32> {
        Ok(i32::from_le_bytes(self.read_array::<4>()?))
    }

    pub fn read_u64(&mut self) -> CursorResult<u64> {
        Ok(u64::from_le_bytes(self.read_array::<8>()?))
    }

    pub fn read_i64(&mut self) -> CursorResult<i64> {
        Ok(i64::from_le_bytes(self.read_array::<8>()?))
    }

    pub fn read_f32(&mut self) -> CursorResult<f32> {
        Ok(f32::from_le_bytes(self.read_array::<4>()?))
    }

    pub fn read_f64(&mut self) -> CursorResult<f64> {
        Ok(f64::from_le_bytes(self.read_array::<8>()?))
    }

    /// Reads exactly `len` bytes.
    pub fn read_bytes(&mut self, len: usize) -> CursorResult<&'a [u8]> {
        self.ensure(len)?;
        let start = self.pos;
        self.pos += len;
        Ok(&self.data[start..self.pos])
    }

    /// Skips exactly `len` bytes.
    pub fn skip(&mut self, len: usize) -> CursorResult<()> {
        self.ensure(len)?;
        self.pos += len;
        Ok(())
    }

    /// Splits off the next `len` bytes as an independent reader and advances
    /// past them.
    pub fn take(&mut self, len: usize) -> CursorResult<ByteReader<'a>> {
        self.read_bytes(len).map(ByteReader::new)
    }

    /// Reads a `u16` code-unit count followed by that many UTF-16LE units.
    ///
    /// One trailing NUL unit inside the counted range is dropped.
    pub fn read_length_prefixed_utf16(&mut self) -> CursorResult<String> {
        let count = usize::from(self.read_u16()?);
        let bytes = self.read_bytes(count * 2)?;
        let mut units: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        if units.last() == Some(&0) {
            units.pop();
        }
        decode_utf16_units(&units)
    }

    /// Reads UTF-16LE units up to and including a NUL terminator.
    ///
    /// Returns `None` when the terminator comes first (a null string). Fails
    /// with [`CursorError::LengthOverflow`] once more than `max_units` units
    /// precede the terminator.
    pub fn read_utf16_until_nul(&mut self, max_units: usize) -> CursorResult<Option<String>> {
        let mut units = Vec::new();
        loop {
            let unit = self.read_u16()?;
            if unit == 0 {
                break;
            }
            if units.len() >= max_units {
                return Err(CursorError::LengthOverflow {
                    length: units.len() + 1,
                });
            }
            units.push(unit);
        }
        if units.is_empty() {
            return Ok(None);
        }
        decode_utf16_units(&units).map(Some)
    }

    /// Reads a string laid out according to `format`.
    ///
    /// Prefixed strings read a `u16` count of code units first. UTF-16LE
    /// strings are followed by a NUL unit; unprefixed ones are read up to it.
    /// Unprefixed UTF-8 and ASCII strings consume the rest of the buffer.
    pub fn read_string(&mut self, format: TextFormat) -> CursorResult<String> {
        let encoding = format.encoding;
        if format.length_prefixed {
            let count = usize::from(self.read_u16()?);
            let bytes = self.read_bytes(count * encoding.unit_width())?;
            let text = encoding.decode(bytes)?;
            if encoding == TextEncoding::Utf16Le && self.read_u16()? != 0 {
                return Err(CursorError::InvalidEncoding {
                    encoding,
                    reason: "missing NUL terminator",
                });
            }
            return Ok(text);
        }
        match encoding {
            TextEncoding::Utf16Le => Ok(self.read_utf16_until_nul(usize::MAX)?.unwrap_or_default()),
            TextEncoding::Utf8 | TextEncoding::Ascii => {
                let bytes = self.read_bytes(self.remaining())?;
                encoding.decode(bytes)
            }
        }
    }

    fn ensure(&self, len: usize) -> CursorResult<()> {
        let available = self.remaining();
        if len > available {
            return Err(CursorError::Truncated {
                requested: len,
                available,
            });
        }
        Ok(())
    }

    fn read_array<const N: usize>(&mut self) -> CursorResult<[u8; N]> {
        self.ensure(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&self.data[self.pos..self.pos + N]);
        self.pos += N;
        Ok(out)
    }
}
