//! Fixed-layout user info, the older shape that repeats its packet id as the
//! first payload byte.

use cursor::{ByteReader, ByteWriter};
use serde::Serialize;

use crate::error::{DecodeError, DecodeResult, EncodeResult};
use crate::field::Vec3;

/// Leading id byte of the fixed user info payload.
pub const PACKET_ID: u8 = 0x32;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixedUserInfo {
    pub object_id: u32,
    pub name: String,
    pub level: i32,
    pub class_id: i32,
    pub position: Vec3,
}

impl FixedUserInfo {
    pub fn decode(buf: &[u8]) -> DecodeResult<Self> {
        let mut reader = ByteReader::new(buf);
        let id = reader.read_u8().map_err(|_| DecodeError::EmptyPacket)?;
        if id != PACKET_ID {
            return Err(DecodeError::UnexpectedPacketId {
                expected: PACKET_ID,
                found: id,
            });
        }
        Ok(Self {
            object_id: reader.read_u32()?,
            name: reader.read_length_prefixed_utf16()?,
            level: reader.read_i32()?,
            class_id: reader.read_i32()?,
            position: Vec3 {
                x: reader.read_f32()?,
                y: reader.read_f32()?,
                z: reader.read_f32()?,
            },
        })
    }

    pub fn encode(&self) -> EncodeResult<Vec<u8>> {
        let mut writer = ByteWriter::new();
        writer.write_u8(PACKET_ID);
        writer.write_u32(self.object_id);
        writer.write_length_prefixed_utf16(&self.name)?;
        writer.write_i32(self.level);
        writer.write_i32(self.class_id);
        writer.write_f32(self.position.x);
        writer.write_f32(self.position.y);
        writer.write_f32(self.position.z);
        Ok(writer.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FixedUserInfo {
        FixedUserInfo {
            object_id: 0x1000_0001,
            name: "Hero".to_string(),
            level: 40,
            class_id: 5,
            position: Vec3::new(-80_000.0, 150_000.0, -3_000.5),
        }
    }

    #[test]
    fn roundtrip() {
        let bytes = sample().encode().unwrap();
        assert_eq!(bytes[0], PACKET_ID);
        assert_eq!(bytes.len(), 1 + 4 + 2 + 8 + 4 + 4 + 12);
        assert_eq!(FixedUserInfo::decode(&bytes).unwrap(), sample());
    }

    #[test]
    fn wrong_leading_id() {
        let mut bytes = sample().encode().unwrap();
        bytes[0] = 0x33;
        assert_eq!(
            FixedUserInfo::decode(&bytes),
            Err(DecodeError::UnexpectedPacketId {
                expected: 0x32,
                found: 0x33
            })
        );
    }

    #[test]
    fn empty_payload() {
        assert_eq!(FixedUserInfo::decode(&[]), Err(DecodeError::EmptyPacket));
    }

    #[test]
    fn truncated_after_id() {
        assert!(matches!(
            FixedUserInfo::decode(&[PACKET_ID, 1, 2]),
            Err(DecodeError::TruncatedBuffer { .. })
        ));
    }
}
