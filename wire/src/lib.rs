//! Packet envelope for the l2wire codec.
//!
//! This crate describes packets as the external capture layer delivers them:
//! a [`Direction`], a packet ID with an optional extended ID, the reported
//! size and receive time, and the payload bytes. It knows nothing about
//! payload layouts.
//!
//! Captures are stored as JSON lines of [`Capture`] records with a hex payload.

mod capture;
mod direction;
mod error;
mod header;
mod packet;
mod payload_hex;

pub use capture::Capture;
pub use direction::Direction;
pub use error::{WireError, WireResult};
pub use header::{PacketHeader, PacketKey};
pub use packet::RawPacket;
pub use payload_hex::{from_hex, to_hex};

/// Packet ID carried by every extended packet; the real type is in the
/// extended ID.
pub const EXTENDED_PACKET_ID: u16 = 0xFE;
