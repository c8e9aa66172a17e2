//! Commission (auction house) listing, `S FE:00F8`.

use cursor::{ByteReader, ByteWriter};
use serde::Serialize;

use crate::error::{DecodeResult, EncodeError, EncodeResult};
use crate::item::ItemInfo;
use crate::limits::DecodeLimits;

/// Extended packet id of the commission list.
pub const EXT_ID: u16 = 0x00F8;

/// Reply type at the head of a commission list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommissionReply {
    PlayerAuctionsEmpty,
    ItemDoesNotExist,
    PlayerAuctions,
    Auctions,
    Other(i32),
}

impl CommissionReply {
    #[must_use]
    pub const fn from_wire(value: i32) -> Self {
        match value {
            -2 => Self::PlayerAuctionsEmpty,
            -1 => Self::ItemDoesNotExist,
            2 => Self::PlayerAuctions,
            3 => Self::Auctions,
            other => Self::Other(other),
        }
    }

    #[must_use]
    pub const fn to_wire(self) -> i32 {
        match self {
            Self::PlayerAuctionsEmpty => -2,
            Self::ItemDoesNotExist => -1,
            Self::PlayerAuctions => 2,
            Self::Auctions => 3,
            Self::Other(other) => other,
        }
    }

    /// Whether a chunk of items follows the reply type.
    #[must_use]
    pub const fn has_items(self) -> bool {
        matches!(self, Self::PlayerAuctions | Self::Auctions)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommissionItem {
    pub commission_id: i64,
    pub price_per_unit: i64,
    pub item_type: i32,
    pub duration_type: i32,
    pub end_time: i32,
    /// `None` for a null name. An empty name is written as null.
    pub seller: Option<String>,
    pub item: ItemInfo,
}

impl CommissionItem {
    fn decode(reader: &mut ByteReader<'_>, limits: &DecodeLimits) -> DecodeResult<Self> {
        Ok(Self {
            commission_id: reader.read_i64()?,
            price_per_unit: reader.read_i64()?,
            item_type: reader.read_i32()?,
            duration_type: reader.read_i32()?,
            end_time: reader.read_i32()?,
            seller: reader.read_utf16_until_nul(limits.max_string_units)?,
            item: ItemInfo::decode(reader)?,
        })
    }

    fn encode(&self, writer: &mut ByteWriter) -> EncodeResult<()> {
        writer.write_i64(self.commission_id);
        writer.write_i64(self.price_per_unit);
        writer.write_i32(self.item_type);
        writer.write_i32(self.duration_type);
        writer.write_i32(self.end_time);
        writer.write_utf16_nul_terminated(self.seller.as_deref().unwrap_or_default())?;
        self.item.encode(writer)
    }
}

/// A decoded commission list.
///
/// `current_time`, `chunk_id` and `items` are only on the wire when the
/// reply carries items; otherwise they decode as zero and empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommissionList {
    pub reply: CommissionReply,
    pub current_time: i32,
    pub chunk_id: i32,
    pub items: Vec<CommissionItem>,
}

impl CommissionList {
    /// A reply without items.
    #[must_use]
    pub const fn empty(reply: CommissionReply) -> Self {
        Self {
            reply,
            current_time: 0,
            chunk_id: 0,
            items: Vec::new(),
        }
    }

    pub fn decode(buf: &[u8], limits: &DecodeLimits) -> DecodeResult<Self> {
        let mut reader = ByteReader::new(buf);
        let reply = CommissionReply::from_wire(reader.read_i32()?);
        if !reply.has_items() {
            return Ok(Self::empty(reply));
        }
        let current_time = reader.read_i32()?;
        let chunk_id = reader.read_i32()?;
        let chunk_size = limits.list_len("commission chunk", reader.read_i32()?)?;
        let items = (0..chunk_size)
            .map(|_| CommissionItem::decode(&mut reader, limits))
            .collect::<DecodeResult<_>>()?;
        Ok(Self {
            reply,
            current_time,
            chunk_id,
            items,
        })
    }

    pub fn encode(&self) -> EncodeResult<Vec<u8>> {
        let mut writer = ByteWriter::new();
        writer.write_i32(self.reply.to_wire());
        if self.reply.has_items() {
            writer.write_i32(self.current_time);
            writer.write_i32(self.chunk_id);
            writer.write_i32(list_len(self.items.len())?);
            for item in &self.items {
                item.encode(&mut writer)?;
            }
        }
        Ok(writer.finish())
    }
}

pub(crate) fn list_len(len: usize) -> EncodeResult<i32> {
    i32::try_from(len).map_err(|_| EncodeError::LengthOverflow { length: len })
}
