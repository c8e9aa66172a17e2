//! Packet header and registry key.

use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::direction::Direction;

/// Lookup key for a packet type: direction, ID and optional extended ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PacketKey {
    pub direction: Direction,
    pub id: u16,
    pub ext_id: Option<u16>,
}

impl PacketKey {
    /// Key for a packet without an extended ID.
    #[must_use]
    pub const fn new(direction: Direction, id: u16) -> Self {
        Self {
            direction,
            id,
            ext_id: None,
        }
    }

    /// Key for a packet with an extended ID.
    #[must_use]
    pub const fn extended(direction: Direction, id: u16, ext_id: u16) -> Self {
        Self {
            direction,
            id,
            ext_id: Some(ext_id),
        }
    }
}

impl fmt::Display for PacketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.direction, FullId(self.id, self.ext_id))
    }
}

struct FullId(u16, Option<u16>);

impl fmt::Display for FullId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.1 {
            Some(ext) => write!(f, "{:02X}:{ext:04X}", self.0),
            None => write!(f, "{:02X}", self.0),
        }
    }
}

/// Metadata delivered alongside a payload by the external capture layer.
///
/// Immutable after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketHeader {
    direction: Direction,
    id: u16,
    ext_id: Option<u16>,
    size: u32,
    timestamp: Instant,
}

impl PacketHeader {
    /// Creates a header stamped with the current time.
    #[must_use]
    pub fn new(direction: Direction, id: u16, size: u32) -> Self {
        Self::at(direction, id, size, Instant::now())
    }

    /// Creates a header with an explicit receive time.
    #[must_use]
    pub const fn at(direction: Direction, id: u16, size: u32, timestamp: Instant) -> Self {
        Self {
            direction,
            id,
            ext_id: None,
            size,
            timestamp,
        }
    }

    /// Returns a copy carrying the given extended ID.
    #[must_use]
    pub const fn with_ext_id(mut self, ext_id: u16) -> Self {
        self.ext_id = Some(ext_id);
        self
    }

    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub const fn id(&self) -> u16 {
        self.id
    }

    #[must_use]
    pub const fn ext_id(&self) -> Option<u16> {
        self.ext_id
    }

    /// Size reported by the capture layer; not checked against the payload.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    #[must_use]
    pub const fn timestamp(&self) -> Instant {
        self.timestamp
    }

    /// Renders the ID as `"32"` or, with an extended ID, `"FE:02D4"`.
    #[must_use]
    pub fn full_id(&self) -> String {
        FullId(self.id, self.ext_id).to_string()
    }

    /// Returns the registry lookup key.
    #[must_use]
    pub const fn key(&self) -> PacketKey {
        PacketKey {
            direction: self.direction,
            id: self.id,
            ext_id: self.ext_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_id_plain() {
        let header = PacketHeader::new(Direction::ServerToClient, 0x32, 10);
        assert_eq!(header.full_id(), "32");
        let header = PacketHeader::new(Direction::ServerToClient, 0x0C, 10);
        assert_eq!(header.full_id(), "0C");
    }

    #[test]
    fn full_id_extended() {
        let header = PacketHeader::new(Direction::ServerToClient, 0xFE, 10).with_ext_id(0x02D4);
        assert_eq!(header.full_id(), "FE:02D4");
        assert_eq!(header.ext_id(), Some(0x02D4));
    }

    #[test]
    fn key_matches_fields() {
        let header = PacketHeader::new(Direction::ClientToServer, 0xD0, 4).with_ext_id(0x9E);
        assert_eq!(
            header.key(),
            PacketKey::extended(Direction::ClientToServer, 0xD0, 0x9E)
        );
        assert_ne!(header.key(), PacketKey::new(Direction::ClientToServer, 0xD0));
    }

    #[test]
    fn key_display() {
        let key = PacketKey::extended(Direction::ServerToClient, 0xFE, 0x00F8);
        assert_eq!(key.to_string(), "S FE:00F8");
    }
}
