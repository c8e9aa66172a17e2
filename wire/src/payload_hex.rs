//! Hex rendering for payloads and commands.

use crate::error::WireResult;

/// Renders each byte as two uppercase hex digits, without separators.
#[must_use]
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode_upper(bytes)
}

/// Parses a hex string (either case) back into bytes.
pub fn from_hex(text: &str) -> WireResult<Vec<u8>> {
    Ok(hex::decode(text.trim())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uppercase_without_separators() {
        assert_eq!(to_hex(&[0x1F, 0x00, 0xAB]), "1F00AB");
        assert_eq!(to_hex(&[]), "");
    }

    #[test]
    fn parse_accepts_lowercase() {
        assert_eq!(from_hex("d0ff").unwrap(), vec![0xD0, 0xFF]);
    }

    #[test]
    fn parse_rejects_odd_length() {
        assert!(from_hex("123").is_err());
    }
}
