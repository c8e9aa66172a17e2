//! Capture records: one JSON object per observed packet.

use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::error::WireResult;
use crate::header::PacketHeader;
use crate::packet::RawPacket;
use crate::payload_hex::{from_hex, to_hex};

/// A packet as recorded by the capture layer.
///
/// ```json
/// {"direction":"S","id":254,"exid":724,"size":120,"data":"0100..."}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capture {
    pub direction: String,
    pub id: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exid: Option<u16>,
    pub size: u32,
    pub data: String,
}

impl Capture {
    /// Records a raw packet in capture form.
    #[must_use]
    pub fn from_raw(packet: &RawPacket) -> Self {
        let header = &packet.header;
        Self {
            direction: header.direction().to_string(),
            id: header.id(),
            exid: header.ext_id(),
            size: header.size(),
            data: to_hex(&packet.payload),
        }
    }

    /// Validates the record and decodes its hex payload.
    pub fn into_raw(self) -> WireResult<RawPacket> {
        let direction: Direction = self.direction.parse()?;
        let payload = from_hex(&self.data)?;
        let mut header = PacketHeader::new(direction, self.id, self.size);
        if let Some(ext_id) = self.exid {
            header = header.with_ext_id(ext_id);
        }
        Ok(RawPacket::new(header, payload))
    }
}
