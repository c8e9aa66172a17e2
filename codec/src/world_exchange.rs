//! World exchange item list, `S FE:02FD`.

use cursor::{ByteReader, ByteWriter, TextFormat};
use serde::Serialize;

use crate::commission::list_len;
use crate::error::{DecodeResult, EncodeResult};
use crate::field::{decode_record_from, encode_record_into, FieldValue, FieldValues, Record};
use crate::limits::DecodeLimits;
use crate::FieldSchema;

/// Extended packet id of the world exchange item list.
pub const EXT_ID: u16 = 0x02FD;

/// One listing. The layout is fixed, so it is described as a [`Record`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorldExchangeItem {
    pub world_exchange_id: u64,
    pub price: u64,
    pub end_time: i32,
    pub item_id: i32,
    pub count: u64,
    pub enchant_level: i32,
    pub augmentation_option1: i32,
    pub augmentation_option2: i32,
    pub unknown: i32,
    pub attack_attribute_type: u16,
    pub attack_attribute_value: u16,
    pub defence_fire: u16,
    pub defence_water: u16,
    pub defence_wind: u16,
    pub defence_earth: u16,
    pub defence_holy: u16,
    pub defence_dark: u16,
    pub visual_id: i32,
    pub soul_crystal_option1: i32,
    pub soul_crystal_option2: i32,
    pub soul_crystal_special_option: i32,
    pub blessed: u16,
}

impl Record for WorldExchangeItem {
    fn schema() -> &'static FieldSchema {
        crate::record_schema!(TextFormat::UTF8_PREFIXED;
            "world_exchange_id" => U64,
            "price" => U64,
            "end_time" => I32,
            "item_id" => I32,
            "count" => U64,
            "enchant_level" => I32,
            "augmentation_option1" => I32,
            "augmentation_option2" => I32,
            "unknown" => I32,
            "attack_attribute_type" => U16,
            "attack_attribute_value" => U16,
            "defence_fire" => U16,
            "defence_water" => U16,
            "defence_wind" => U16,
            "defence_earth" => U16,
            "defence_holy" => U16,
            "defence_dark" => U16,
            "visual_id" => I32,
            "soul_crystal_option1" => I32,
            "soul_crystal_option2" => I32,
            "soul_crystal_special_option" => I32,
            "blessed" => U16,
        )
    }

    fn to_values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::U64(self.world_exchange_id),
            FieldValue::U64(self.price),
            FieldValue::I32(self.end_time),
            FieldValue::I32(self.item_id),
            FieldValue::U64(self.count),
            FieldValue::I32(self.enchant_level),
            FieldValue::I32(self.augmentation_option1),
            FieldValue::I32(self.augmentation_option2),
            FieldValue::I32(self.unknown),
            FieldValue::U16(self.attack_attribute_type),
            FieldValue::U16(self.attack_attribute_value),
            FieldValue::U16(self.defence_fire),
            FieldValue::U16(self.defence_water),
            FieldValue::U16(self.defence_wind),
            FieldValue::U16(self.defence_earth),
            FieldValue::U16(self.defence_holy),
            FieldValue::U16(self.defence_dark),
            FieldValue::I32(self.visual_id),
            FieldValue::I32(self.soul_crystal_option1),
            FieldValue::I32(self.soul_crystal_option2),
            FieldValue::I32(self.soul_crystal_special_option),
            FieldValue::U16(self.blessed),
        ]
    }

    fn from_values(mut values: FieldValues<'_>) -> DecodeResult<Self> {
        Ok(Self {
            world_exchange_id: values.u64()?,
            price: values.u64()?,
            end_time: values.i32()?,
            item_id: values.i32()?,
            count: values.u64()?,
            enchant_level: values.i32()?,
            augmentation_option1: values.i32()?,
            augmentation_option2: values.i32()?,
            unknown: values.i32()?,
            attack_attribute_type: values.u16()?,
            attack_attribute_value: values.u16()?,
            defence_fire: values.u16()?,
            defence_water: values.u16()?,
            defence_wind: values.u16()?,
            defence_earth: values.u16()?,
            defence_holy: values.u16()?,
            defence_dark: values.u16()?,
            visual_id: values.i32()?,
            soul_crystal_option1: values.i32()?,
            soul_crystal_option2: values.i32()?,
            soul_crystal_special_option: values.i32()?,
            blessed: values.u16()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorldExchangeList {
    pub category: u16,
    pub sort_type: u8,
    pub page: i32,
    pub items: Vec<WorldExchangeItem>,
}

impl WorldExchangeList {
    pub fn decode(buf: &[u8], limits: &DecodeLimits) -> DecodeResult<Self> {
        let mut reader = ByteReader::new(buf);
        let category = reader.read_u16()?;
        let sort_type = reader.read_u8()?;
        let page = reader.read_i32()?;
        let count = limits.list_len("world exchange items", reader.read_i32()?)?;
        let items = (0..count)
            .map(|_| decode_record_from(&mut reader))
            .collect::<DecodeResult<_>>()?;
        Ok(Self {
            category,
            sort_type,
            page,
            items,
        })
    }

    pub fn encode(&self) -> EncodeResult<Vec<u8>> {
        let mut writer = ByteWriter::new();
        writer.write_u16(self.category);
        writer.write_u8(self.sort_type);
        writer.write_i32(self.page);
        writer.write_i32(list_len(self.items.len())?);
        for item in &self.items {
            encode_record_into(item, &mut writer)?;
        }
        Ok(writer.finish())
    }
}
