//! The item block shared by market listing packets.

use std::fmt;

use bitflags::{bitflags, Flags};
use cursor::{ByteReader, ByteWriter};
use serde::{Deserialize, Serialize};

use crate::error::{DecodeError, DecodeResult, EncodeError, EncodeResult};

bitflags! {
    /// Optional sub-blocks announced by an item's leading mask.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct ItemBlocks: u16 {
        const AUGMENT = 1;
        const ELEMENTAL = 2;
        const VISUAL_ID = 4;
        const SOUL_CRYSTAL = 8;
        const REUSE_DELAY = 16;
        const ENCHANT_EFFECT = 32;
        const BLESSED = 128;
    }
}

impl ItemBlocks {
    /// Blocks whose payload the codec reads and writes. Other bits are kept
    /// as-is but carry no payload.
    pub const INTERPRETED: Self = Self::AUGMENT
        .union(Self::ELEMENTAL)
        .union(Self::VISUAL_ID)
        .union(Self::SOUL_CRYSTAL);
}

bitflags! {
    /// Equipment slots an item occupies.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct BodyPart: u64 {
        const UNDERWEAR = 0x0001;
        const R_EAR = 0x0002;
        const L_EAR = 0x0004;
        const LR_EAR = 0x0006;
        const NECK = 0x0008;
        const R_FINGER = 0x0010;
        const L_FINGER = 0x0020;
        const LR_FINGER = 0x0030;
        const HEAD = 0x0040;
        const R_HAND = 0x0080;
        const L_HAND = 0x0100;
        const GLOVES = 0x0200;
        const CHEST = 0x0400;
        const LEGS = 0x0800;
        const FEET = 0x1000;
        const BACK = 0x2000;
        const LR_HAND = 0x4000;
        const FULL_ARMOR = 0x8000;
        const HAIR = 0x0001_0000;
        const ALL_DRESS = 0x0002_0000;
        const HAIR2 = 0x0004_0000;
        const HAIR_ALL = 0x0008_0000;
        const R_BRACELET = 0x0010_0000;
        const L_BRACELET = 0x0020_0000;
        const DECO = 0x0040_0000;
        const BELT = 0x1000_0000;
        const BROOCH = 0x2000_0000;
        const BROOCH_JEWEL = 0x4000_0000;
        const AGATHION = 0x30_0000_0000;
        const ARTIFACT_BOOK = 0x200_0000_0000;
        const ARTIFACT = 0x400_0000_0000;
    }
}

impl fmt::Display for BodyPart {
    /// Renders the exact slot name when there is one, otherwise the slots
    /// that make up the value, largest first, joined by `" | "`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bits = self.bits();
        if bits == 0 {
            return f.write_str("NONE");
        }
        if let Some(flag) = Self::FLAGS.iter().find(|flag| flag.value().bits() == bits) {
            return f.write_str(flag.name());
        }

        let mut flags: Vec<_> = Self::FLAGS.iter().collect();
        flags.sort_by_key(|flag| std::cmp::Reverse(flag.value().bits()));
        let mut remaining = bits;
        let mut parts = Vec::new();
        for flag in flags {
            let value = flag.value().bits();
            if remaining & value == value {
                parts.push(flag.name().to_string());
                remaining &= !value;
            }
        }
        if remaining != 0 {
            parts.push(format!("UNKNOWN_SLOT(0x{remaining:X})"));
        }
        f.write_str(&parts.join(" | "))
    }
}

/// Augmentation options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Augmentation {
    pub option1: i32,
    pub option2: i32,
}

/// Attack attribute and the six defence attributes (fire, water, wind,
/// earth, holy, dark).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ElementalAttributes {
    pub attack_type: i16,
    pub attack_power: i16,
    pub defence: [i16; 6],
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SoulCrystalOptions {
    pub regular: Vec<i32>,
    pub special: Vec<i32>,
}

/// An item as carried by commission, private store and similar listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemInfo {
    /// Blocks announced on the wire. On encode, the interpreted bits are
    /// recomputed from the optional fields below.
    pub blocks: ItemBlocks,
    pub object_id: i32,
    pub item_id: i32,
    pub location: u8,
    pub count: i64,
    pub type2: u8,
    pub custom_type1: u8,
    pub equipped: u16,
    pub body_part: BodyPart,
    pub enchant_level: u16,
    pub mana: i32,
    pub reserved: u8,
    pub time: i32,
    pub available: u8,
    pub locked: u16,
    pub augmentation: Option<Augmentation>,
    pub elemental: Option<ElementalAttributes>,
    pub visual_id: Option<i32>,
    pub soul_crystal: Option<SoulCrystalOptions>,
}

impl ItemInfo {
    /// Fixed part of the block, before any optional sub-block.
    pub const BASE_SIZE: usize = 45;

    /// A plain item with no optional blocks.
    #[must_use]
    pub const fn new(object_id: i32, item_id: i32, count: i64) -> Self {
        Self {
            blocks: ItemBlocks::empty(),
            object_id,
            item_id,
            location: 0,
            count,
            type2: 5,
            custom_type1: 0,
            equipped: 0,
            body_part: BodyPart::empty(),
            enchant_level: 0,
            mana: -1,
            reserved: 0,
            time: -9999,
            available: 1,
            locked: 0,
            augmentation: None,
            elemental: None,
            visual_id: None,
            soul_crystal: None,
        }
    }

    /// The mask that [`encode`](Self::encode) writes.
    #[must_use]
    pub fn wire_blocks(&self) -> ItemBlocks {
        let mut blocks = self.blocks.difference(ItemBlocks::INTERPRETED);
        blocks.set(ItemBlocks::AUGMENT, self.augmentation.is_some());
        blocks.set(ItemBlocks::ELEMENTAL, self.elemental.is_some());
        blocks.set(ItemBlocks::VISUAL_ID, self.visual_id.is_some());
        blocks.set(ItemBlocks::SOUL_CRYSTAL, self.soul_crystal.is_some());
        blocks
    }

    pub fn decode(reader: &mut ByteReader<'_>) -> DecodeResult<Self> {
        let blocks = ItemBlocks::from_bits_retain(reader.read_u16()?);
        let mut item = Self {
            blocks,
            object_id: reader.read_i32()?,
            item_id: reader.read_i32()?,
            location: reader.read_u8()?,
            count: reader.read_i64()?,
            type2: reader.read_u8()?,
            custom_type1: reader.read_u8()?,
            equipped: reader.read_u16()?,
            body_part: BodyPart::from_bits_retain(reader.read_u64()?),
            enchant_level: reader.read_u16()?,
            mana: reader.read_i32()?,
            reserved: reader.read_u8()?,
            time: reader.read_i32()?,
            available: reader.read_u8()?,
            locked: reader.read_u16()?,
            augmentation: None,
            elemental: None,
            visual_id: None,
            soul_crystal: None,
        };

        if blocks.contains(ItemBlocks::AUGMENT) {
            item.augmentation = Some(Augmentation {
                option1: reader.read_i32()?,
                option2: reader.read_i32()?,
            });
        }
        if blocks.contains(ItemBlocks::ELEMENTAL) {
            let attack_type = reader.read_i16()?;
            let attack_power = reader.read_i16()?;
            let mut defence = [0i16; 6];
            for value in &mut defence {
                *value = reader.read_i16()?;
            }
            item.elemental = Some(ElementalAttributes {
                attack_type,
                attack_power,
                defence,
            });
        }
        if blocks.contains(ItemBlocks::VISUAL_ID) {
            item.visual_id = Some(reader.read_i32()?);
        }
        if blocks.contains(ItemBlocks::SOUL_CRYSTAL) {
            item.soul_crystal = Some(SoulCrystalOptions {
                regular: read_options(reader)?,
                special: read_options(reader)?,
            });
        }
        Ok(item)
    }

    pub fn encode(&self, writer: &mut ByteWriter) -> EncodeResult<()> {
        writer.write_u16(self.wire_blocks().bits());
        writer.write_i32(self.object_id);
        writer.write_i32(self.item_id);
        writer.write_u8(self.location);
        writer.write_i64(self.count);
        writer.write_u8(self.type2);
        writer.write_u8(self.custom_type1);
        writer.write_u16(self.equipped);
        writer.write_u64(self.body_part.bits());
        writer.write_u16(self.enchant_level);
        writer.write_i32(self.mana);
        writer.write_u8(self.reserved);
        writer.write_i32(self.time);
        writer.write_u8(self.available);
        writer.write_u16(self.locked);

        if let Some(augmentation) = &self.augmentation {
            writer.write_i32(augmentation.option1);
            writer.write_i32(augmentation.option2);
        }
        if let Some(elemental) = &self.elemental {
            writer.write_i16(elemental.attack_type);
            writer.write_i16(elemental.attack_power);
            for value in elemental.defence {
                writer.write_i16(value);
            }
        }
        if let Some(visual_id) = self.visual_id {
            writer.write_i32(visual_id);
        }
        if let Some(options) = &self.soul_crystal {
            write_options(writer, &options.regular)?;
            write_options(writer, &options.special)?;
        }
        Ok(())
    }
}

fn read_options(reader: &mut ByteReader<'_>) -> DecodeResult<Vec<i32>> {
    let count = reader.read_u8()?;
    (0..count)
        .map(|_| reader.read_i32().map_err(DecodeError::from))
        .collect()
}

fn write_options(writer: &mut ByteWriter, options: &[i32]) -> EncodeResult<()> {
    let count = u8::try_from(options.len()).map_err(|_| EncodeError::LengthOverflow {
        length: options.len(),
    })?;
    writer.write_u8(count);
    for option in options {
        writer.write_i32(*option);
    }
    Ok(())
}
