//! Private store search results, `S FE:02D4`.

use cursor::{ByteReader, ByteWriter};
use serde::Serialize;
use tracing::debug;

use crate::commission::list_len;
use crate::error::{DecodeError, DecodeResult, EncodeResult};
use crate::item::ItemInfo;
use crate::limits::DecodeLimits;

/// Extended packet id of the private store search result.
pub const EXT_ID: u16 = 0x02D4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrivateStoreItem {
    pub vendor_name: String,
    pub vendor_object_id: i32,
    /// See [`describe::store_type`](crate::describe::store_type).
    pub store_type: u8,
    pub price: i64,
    pub vendor_x: i32,
    pub vendor_y: i32,
    pub vendor_z: i32,
    pub item: ItemInfo,
}

impl PrivateStoreItem {
    fn decode(reader: &mut ByteReader<'_>) -> DecodeResult<Self> {
        let vendor_name = reader.read_length_prefixed_utf16()?;
        let vendor_object_id = reader.read_i32()?;
        let store_type = reader.read_u8()?;
        let price = reader.read_i64()?;
        let vendor_x = reader.read_i32()?;
        let vendor_y = reader.read_i32()?;
        let vendor_z = reader.read_i32()?;
        let item_size = reader.read_i32()?;
        let item_size = usize::try_from(item_size).map_err(|_| DecodeError::InvalidCount {
            what: "item size",
            count: i64::from(item_size),
        })?;
        // The item is parsed inside its declared size; unread bytes are skipped.
        let mut item_reader = reader.take(item_size)?;
        let item = ItemInfo::decode(&mut item_reader)?;
        Ok(Self {
            vendor_name,
            vendor_object_id,
            store_type,
            price,
            vendor_x,
            vendor_y,
            vendor_z,
            item,
        })
    }

    fn encode(&self, writer: &mut ByteWriter) -> EncodeResult<()> {
        writer.write_length_prefixed_utf16(&self.vendor_name)?;
        writer.write_i32(self.vendor_object_id);
        writer.write_u8(self.store_type);
        writer.write_i64(self.price);
        writer.write_i32(self.vendor_x);
        writer.write_i32(self.vendor_y);
        writer.write_i32(self.vendor_z);
        let mut item = ByteWriter::with_capacity(ItemInfo::BASE_SIZE);
        self.item.encode(&mut item)?;
        writer.write_i32(list_len(item.len())?);
        writer.write_bytes(item.as_slice());
        Ok(())
    }
}

/// A page of private store search results.
///
/// A malformed item ends the list: earlier items are kept and `complete` is
/// `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrivateStoreSearch {
    pub page: u8,
    pub max_page: u8,
    /// Item count announced on the wire.
    pub declared: usize,
    pub items: Vec<PrivateStoreItem>,
    pub complete: bool,
}

impl PrivateStoreSearch {
    #[must_use]
    pub fn new(page: u8, max_page: u8, items: Vec<PrivateStoreItem>) -> Self {
        Self {
            page,
            max_page,
            declared: items.len(),
            items,
            complete: true,
        }
    }

    pub fn decode(buf: &[u8], limits: &DecodeLimits) -> DecodeResult<Self> {
        let mut reader = ByteReader::new(buf);
        let page = reader.read_u8()?;
        let max_page = reader.read_u8()?;
        let declared = limits.list_len("private store items", reader.read_i32()?)?;

        let mut items = Vec::with_capacity(declared);
        let mut complete = true;
        for index in 0..declared {
            match PrivateStoreItem::decode(&mut reader) {
                Ok(item) => items.push(item),
                Err(err) => {
                    debug!(index, declared, %err, "private store item list cut short");
                    complete = false;
                    break;
                }
            }
        }
        Ok(Self {
            page,
            max_page,
            declared,
            items,
            complete,
        })
    }

    /// Encodes the page. The written count is the number of items held.
    pub fn encode(&self) -> EncodeResult<Vec<u8>> {
        let mut writer = ByteWriter::new();
        writer.write_u8(self.page);
        writer.write_u8(self.max_page);
        writer.write_i32(list_len(self.items.len())?);
        for item in &self.items {
            item.encode(&mut writer)?;
        }
        Ok(writer.finish())
    }
}
