//! Undecoded packet: header plus owned payload.

use crate::header::PacketHeader;

/// A packet whose payload has not been (or could not be) decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPacket {
    pub header: PacketHeader,
    pub payload: Vec<u8>,
}

impl RawPacket {
    #[must_use]
    pub const fn new(header: PacketHeader, payload: Vec<u8>) -> Self {
        Self { header, payload }
    }

    /// Copies `payload` into a new raw packet.
    #[must_use]
    pub fn copied(header: &PacketHeader, payload: &[u8]) -> Self {
        Self::new(*header, payload.to_vec())
    }

    #[must_use]
    pub fn into_parts(self) -> (PacketHeader, Vec<u8>) {
        (self.header, self.payload)
    }
}
