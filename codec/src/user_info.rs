//! Masked "user info" packet.
//!
//! The payload is `object_id u32`, `init_block_size u32`, `mask_bits u16`, the
//! mask bytes, then one block per set mask bit in ascending order. Known
//! kinds are decoded field by field; any other block is skipped by its `u16`
//! length prefix.

use std::collections::BTreeMap;

use cursor::{ByteReader, ByteWriter, TextFormat};
use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{DecodeError, DecodeResult, EncodeError, EncodeResult};
use crate::field::{decode_record_from, encode_record_into, FieldValue, FieldValues, Record};
use crate::limits::DecodeLimits;
use crate::mask::{build_mask, clear_pad_bits, mask_len, present_tags, ComponentKind};
use crate::FieldSchema;

/// Bytes before the mask: object id, init block size and mask bit count.
pub const HEADER_SIZE: usize = 10;

/// Mask width used when building packets locally.
pub const DEFAULT_MASK_BITS: u16 = ComponentKind::COUNT as u16;

/// The `BASIC_INFO` component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BasicInfo {
    pub name: String,
    pub is_gm: u8,
    pub race: u8,
    pub is_female: u8,
    pub root_class_id: u32,
    pub class_id: u32,
    pub level: u32,
    pub class_id_repeat: u32,
}

impl BasicInfo {
    /// Self-inclusive block size: the size field, the name and the fixed tail.
    fn block_size(&self) -> EncodeResult<u16> {
        let units = self.name.encode_utf16().count();
        u16::try_from(23 + 2 * units).map_err(|_| EncodeError::LengthOverflow { length: units })
    }

    fn decode(reader: &mut ByteReader<'_>) -> DecodeResult<Self> {
        let _block_size = reader.read_u16()?;
        Ok(Self {
            name: reader.read_length_prefixed_utf16()?,
            is_gm: reader.read_u8()?,
            race: reader.read_u8()?,
            is_female: reader.read_u8()?,
            root_class_id: reader.read_u32()?,
            class_id: reader.read_u32()?,
            level: reader.read_u32()?,
            class_id_repeat: reader.read_u32()?,
        })
    }

    fn encode(&self, writer: &mut ByteWriter) -> EncodeResult<()> {
        writer.write_u16(self.block_size()?);
        writer.write_length_prefixed_utf16(&self.name)?;
        writer.write_u8(self.is_gm);
        writer.write_u8(self.race);
        writer.write_u8(self.is_female);
        writer.write_u32(self.root_class_id);
        writer.write_u32(self.class_id);
        writer.write_u32(self.level);
        writer.write_u32(self.class_id_repeat);
        Ok(())
    }
}

/// The `POSITION` component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub vehicle_id: u32,
}

impl Position {
    const BLOCK_SIZE: u16 = 18;
}

impl Record for Position {
    fn schema() -> &'static FieldSchema {
        crate::record_schema!(TextFormat::UTF8_PREFIXED;
            "x" => I32, "y" => I32, "z" => I32, "vehicle_id" => U32)
    }

    fn to_values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::I32(self.x),
            FieldValue::I32(self.y),
            FieldValue::I32(self.z),
            FieldValue::U32(self.vehicle_id),
        ]
    }

    fn from_values(mut values: FieldValues<'_>) -> DecodeResult<Self> {
        Ok(Self {
            x: values.i32()?,
            y: values.i32()?,
            z: values.i32()?,
            vehicle_id: values.u32()?,
        })
    }
}

/// A decoded component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentValue {
    Relation(u32),
    BasicInfo(BasicInfo),
    Position(Position),
}

impl ComponentValue {
    #[must_use]
    pub const fn kind(&self) -> ComponentKind {
        match self {
            Self::Relation(_) => ComponentKind::Relation,
            Self::BasicInfo(_) => ComponentKind::BasicInfo,
            Self::Position(_) => ComponentKind::Position,
        }
    }
}

/// How much of a masked payload the decoder interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Completeness {
    /// Every byte was consumed.
    Complete,
    /// An unknown component's length prefix or body did not fit; decoding
    /// stopped there with `remaining` bytes left at the start of that block.
    StoppedAtOpaque { tag: u8, remaining: usize },
    /// All set components decoded and bytes remained after the last one.
    TrailingBytes { remaining: usize },
}

impl Completeness {
    #[must_use]
    pub const fn is_complete(self) -> bool {
        matches!(self, Self::Complete)
    }
}

/// A decoded user info packet.
///
/// `components` holds only kinds the decoder implements. Other set bits are
/// consumed from the stream without producing an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaskedPacket {
    pub object_id: u32,
    pub init_block_size: u32,
    pub mask_bits: u16,
    pub mask: Vec<u8>,
    pub components: BTreeMap<ComponentKind, ComponentValue>,
    pub completeness: Completeness,
}

impl MaskedPacket {
    /// Builds a packet with a [`DEFAULT_MASK_BITS`]-bit mask covering exactly
    /// the given components.
    #[must_use]
    pub fn new(
        object_id: u32,
        init_block_size: u32,
        components: impl IntoIterator<Item = ComponentValue>,
    ) -> Self {
        let components: BTreeMap<_, _> = components
            .into_iter()
            .map(|value| (value.kind(), value))
            .collect();
        let mask = build_mask(
            components.keys().map(|kind| usize::from(kind.tag())),
            DEFAULT_MASK_BITS,
        );
        Self {
            object_id,
            init_block_size,
            mask_bits: DEFAULT_MASK_BITS,
            mask,
            components,
            completeness: Completeness::Complete,
        }
    }

    /// Logical indices set in the mask, ascending.
    pub fn present_tags(&self) -> impl Iterator<Item = usize> + '_ {
        present_tags(&self.mask, self.mask_bits)
    }

    #[must_use]
    pub fn component(&self, kind: ComponentKind) -> Option<&ComponentValue> {
        self.components.get(&kind)
    }

    #[must_use]
    pub fn basic_info(&self) -> Option<&BasicInfo> {
        match self.components.get(&ComponentKind::BasicInfo) {
            Some(ComponentValue::BasicInfo(info)) => Some(info),
            _ => None,
        }
    }

    #[must_use]
    pub fn position(&self) -> Option<&Position> {
        match self.components.get(&ComponentKind::Position) {
            Some(ComponentValue::Position(position)) => Some(position),
            _ => None,
        }
    }
}

/// Decodes a user info payload.
///
/// A read failure aborts the whole decode. Running out of bytes inside an
/// unknown component is not an error: the packet is returned with
/// [`Completeness::StoppedAtOpaque`]. Any `mask_bits` value is accepted; the
/// mask and every block length are bounded by the buffer, so no limit applies.
pub fn decode_user_info(buf: &[u8], _limits: &DecodeLimits) -> DecodeResult<MaskedPacket> {
    if buf.is_empty() {
        return Err(DecodeError::EmptyPacket);
    }
    let mut reader = ByteReader::new(buf);
    let object_id = reader.read_u32()?;
    let init_block_size = reader.read_u32()?;
    let mask_bits = reader.read_u16()?;
    let mask = reader.read_bytes(mask_len(mask_bits))?.to_vec();

    let mut components = BTreeMap::new();
    let mut completeness = None;
    for index in present_tags(&mask, mask_bits) {
        // Indices past 0xFF have no kind and report as 0xFF.
        let tag = u8::try_from(index).unwrap_or(u8::MAX);
        let value = match ComponentKind::from_tag(tag) {
            Some(ComponentKind::Relation) => Some(ComponentValue::Relation(reader.read_u32()?)),
            Some(ComponentKind::BasicInfo) => {
                Some(ComponentValue::BasicInfo(BasicInfo::decode(&mut reader)?))
            }
            Some(ComponentKind::Position) => {
                let _block_size = reader.read_u16()?;
                Some(ComponentValue::Position(decode_record_from(&mut reader)?))
            }
            _ => {
                if !skip_opaque(&mut reader) {
                    completeness = Some(Completeness::StoppedAtOpaque {
                        tag,
                        remaining: reader.remaining(),
                    });
                    break;
                }
                trace!(tag, "skipped opaque component");
                None
            }
        };
        if let Some(value) = value {
            components.insert(value.kind(), value);
        }
    }

    let completeness = completeness.unwrap_or(if reader.is_empty() {
        Completeness::Complete
    } else {
        Completeness::TrailingBytes {
            remaining: reader.remaining(),
        }
    });
    if !completeness.is_complete() {
        debug!(object_id, ?completeness, "partial user info decode");
    }

    Ok(MaskedPacket {
        object_id,
        init_block_size,
        mask_bits,
        mask,
        components,
        completeness,
    })
}

/// Skips one length-prefixed block. Leaves the reader untouched and returns
/// `false` if the prefix or the body does not fit.
fn skip_opaque(reader: &mut ByteReader<'_>) -> bool {
    let mut probe = reader.clone();
    let Ok(len) = probe.read_u16() else {
        return false;
    };
    if probe.skip(usize::from(len)).is_err() {
        return false;
    }
    *reader = probe;
    true
}

/// Encodes a user info packet.
///
/// Every set mask bit must have a component value. Components whose bit is
/// not set are not written.
pub fn encode_user_info(packet: &MaskedPacket) -> EncodeResult<Vec<u8>> {
    let mut writer = ByteWriter::with_capacity(HEADER_SIZE + packet.mask.len() + 64);
    writer.write_u32(packet.object_id);
    writer.write_u32(packet.init_block_size);
    writer.write_u16(packet.mask_bits);
    // The mask is always written at its declared width with pad bits clear.
    let mut mask = packet.mask.clone();
    mask.resize(mask_len(packet.mask_bits), 0);
    clear_pad_bits(&mut mask, packet.mask_bits);
    writer.write_bytes(&mask);

    for index in present_tags(&mask, packet.mask_bits) {
        let tag = u8::try_from(index).unwrap_or(u8::MAX);
        let value = ComponentKind::from_tag(tag)
            .and_then(|kind| packet.components.get(&kind))
            .ok_or(EncodeError::MissingComponent { tag })?;
        match value {
            ComponentValue::Relation(relation) => writer.write_u32(*relation),
            ComponentValue::BasicInfo(info) => info.encode(&mut writer)?,
            ComponentValue::Position(position) => {
                writer.write_u16(Position::BLOCK_SIZE);
                encode_record_into(position, &mut writer)?;
            }
        }
    }
    Ok(writer.finish())
}
