//! Limits enforced while decoding untrusted payloads.

use crate::error::{DecodeError, DecodeResult, LimitKind};

/// Decode limits.
///
/// Every count and length read from the wire is checked against these before
/// it drives a loop or an allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeLimits {
    /// Maximum payload size accepted for a registered packet type.
    pub max_packet_bytes: usize,
    /// Maximum number of entries in a listing packet.
    pub max_list_items: usize,
    /// Maximum code units in a NUL-terminated string.
    pub max_string_units: usize,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_packet_bytes: 64 * 1024,
            max_list_items: 120,
            max_string_units: 4096,
        }
    }
}

impl DecodeLimits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_packet_bytes: 4096,
            max_list_items: 16,
            max_string_units: 64,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_packet_bytes: usize::MAX,
            max_list_items: usize::MAX,
            max_string_units: usize::MAX,
        }
    }

    /// Validates a list length read from the wire.
    pub(crate) fn list_len(&self, what: &'static str, count: i32) -> DecodeResult<usize> {
        let len = usize::try_from(count).map_err(|_| DecodeError::InvalidCount {
            what,
            count: i64::from(count),
        })?;
        if len > self.max_list_items {
            return Err(DecodeError::LimitsExceeded {
                kind: LimitKind::ListItems,
                limit: self.max_list_items,
                actual: len,
            });
        }
        Ok(len)
    }

    /// Rejects payloads larger than `max_packet_bytes`.
    pub(crate) fn check_packet(&self, len: usize) -> DecodeResult<()> {
        if len > self.max_packet_bytes {
            return Err(DecodeError::LimitsExceeded {
                kind: LimitKind::PacketBytes,
                limit: self.max_packet_bytes,
                actual: len,
            });
        }
        Ok(())
    }
}
