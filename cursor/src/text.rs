//! Text encodings understood by the cursor.

use std::fmt;

use crate::error::{CursorError, CursorResult};

/// Character encoding for string fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TextEncoding {
    /// UTF-8, one length unit per byte.
    #[default]
    Utf8,
    /// 7-bit ASCII, one length unit per byte.
    Ascii,
    /// UTF-16 little-endian, one length unit per code unit.
    Utf16Le,
}

impl TextEncoding {
    /// Width in bytes of one code unit.
    #[must_use]
    pub const fn unit_width(self) -> usize {
        match self {
            Self::Utf8 | Self::Ascii => 1,
            Self::Utf16Le => 2,
        }
    }

    /// Encodes `text`, returning the bytes and the number of code units.
    pub fn encode(self, text: &str) -> CursorResult<(Vec<u8>, usize)> {
        match self {
            Self::Utf8 => Ok((text.as_bytes().to_vec(), text.len())),
            Self::Ascii => {
                if !text.is_ascii() {
                    return Err(CursorError::InvalidEncoding {
                        encoding: self,
                        reason: "non-ASCII character",
                    });
                }
                Ok((text.as_bytes().to_vec(), text.len()))
            }
            Self::Utf16Le => {
                let mut bytes = Vec::with_capacity(text.len() * 2);
                let mut units = 0usize;
                for unit in text.encode_utf16() {
                    bytes.extend_from_slice(&unit.to_le_bytes());
                    units += 1;
                }
                Ok((bytes, units))
            }
        }
    }

    /// Decodes `bytes` as text in this encoding.
    pub fn decode(self, bytes: &[u8]) -> CursorResult<String> {
        match self {
            Self::Utf8 => String::from_utf8(bytes.to_vec()).map_err(|_| {
                CursorError::InvalidEncoding {
                    encoding: self,
                    reason: "invalid UTF-8 sequence",
                }
            }),
            Self::Ascii => {
                if !bytes.is_ascii() {
                    return Err(CursorError::InvalidEncoding {
                        encoding: self,
                        reason: "byte outside the ASCII range",
                    });
                }
                // ASCII is a subset of UTF-8.
                Ok(bytes.iter().map(|&b| char::from(b)).collect())
            }
            Self::Utf16Le => {
                if bytes.len() % 2 != 0 {
                    return Err(CursorError::InvalidEncoding {
                        encoding: self,
                        reason: "odd byte count",
                    });
                }
                let units: Vec<u16> = bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                    .collect();
                decode_utf16_units(&units)
            }
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Utf8 => "UTF-8",
            Self::Ascii => "ASCII",
            Self::Utf16Le => "UTF-16LE",
        };
        write!(f, "{name}")
    }
}

/// How string fields are laid out on the wire.
///
/// With `length_prefixed`, a `u16` count of code units precedes the bytes.
/// UTF-16LE strings are always followed by a two-byte NUL terminator.
/// The default is UTF-8 with a length prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextFormat {
    pub encoding: TextEncoding,
    pub length_prefixed: bool,
}

impl TextFormat {
    /// UTF-8 with a length prefix.
    pub const UTF8_PREFIXED: Self = Self::new(TextEncoding::Utf8, true);

    /// UTF-16LE without a length prefix (terminator only).
    pub const UTF16_TERMINATED: Self = Self::new(TextEncoding::Utf16Le, false);

    /// UTF-16LE with a length prefix and a terminator.
    pub const UTF16_PREFIXED: Self = Self::new(TextEncoding::Utf16Le, true);

    /// Creates a text format.
    #[must_use]
    pub const fn new(encoding: TextEncoding, length_prefixed: bool) -> Self {
        Self {
            encoding,
            length_prefixed,
        }
    }

    /// Returns `true` if strings in this format carry their own end marker
    /// (a length prefix or a terminator).
    #[must_use]
    pub const fn is_self_delimiting(self) -> bool {
        self.length_prefixed || matches!(self.encoding, TextEncoding::Utf16Le)
    }
}

impl Default for TextFormat {
    fn default() -> Self {
        Self::UTF8_PREFIXED
    }
}

pub(crate) fn decode_utf16_units(units: &[u16]) -> CursorResult<String> {
    String::from_utf16(units).map_err(|_| CursorError::InvalidEncoding {
        encoding: TextEncoding::Utf16Le,
        reason: "unpaired surrogate",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_widths() {
        assert_eq!(TextEncoding::Utf8.unit_width(), 1);
        assert_eq!(TextEncoding::Ascii.unit_width(), 1);
        assert_eq!(TextEncoding::Utf16Le.unit_width(), 2);
    }

    #[test]
    fn utf16_encode_counts_code_units() {
        let (bytes, units) = TextEncoding::Utf16Le.encode("Hero").unwrap();
        assert_eq!(units, 4);
        assert_eq!(bytes, vec![b'H', 0, b'e', 0, b'r', 0, b'o', 0]);
    }

    #[test]
    fn utf16_surrogate_pair_counts_two_units() {
        let (bytes, units) = TextEncoding::Utf16Le.encode("\u{1F600}").unwrap();
        assert_eq!(units, 2);
        assert_eq!(bytes.len(), 4);
        assert_eq!(TextEncoding::Utf16Le.decode(&bytes).unwrap(), "\u{1F600}");
    }

    #[test]
    fn utf8_counts_bytes() {
        let (bytes, units) = TextEncoding::Utf8.encode("héllo").unwrap();
        assert_eq!(units, 6);
        assert_eq!(bytes.len(), 6);
    }

    #[test]
    fn ascii_rejects_non_ascii() {
        let err = TextEncoding::Ascii.encode("héllo").unwrap_err();
        assert!(matches!(err, CursorError::InvalidEncoding { .. }));
        let err = TextEncoding::Ascii.decode(&[0x41, 0xC3]).unwrap_err();
        assert!(matches!(err, CursorError::InvalidEncoding { .. }));
    }

    #[test]
    fn utf16_rejects_odd_length_and_lone_surrogate() {
        assert!(TextEncoding::Utf16Le.decode(&[0x41]).is_err());
        assert!(TextEncoding::Utf16Le.decode(&[0x00, 0xD8]).is_err());
    }

    #[test]
    fn utf8_rejects_invalid_sequence() {
        assert!(TextEncoding::Utf8.decode(&[0xFF, 0xFE]).is_err());
    }

    #[test]
    fn self_delimiting_formats() {
        assert!(TextFormat::UTF8_PREFIXED.is_self_delimiting());
        assert!(TextFormat::UTF16_TERMINATED.is_self_delimiting());
        assert!(!TextFormat::new(TextEncoding::Ascii, false).is_self_delimiting());
    }

    #[test]
    fn default_format_is_prefixed_utf8() {
        assert_eq!(TextFormat::default(), TextFormat::UTF8_PREFIXED);
    }
}
