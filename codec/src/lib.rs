//! Packet decoders, encoders and dispatch for the l2wire codec.
//!
//! This is the main codec crate that ties together cursor, wire, and schema
//! to turn captured payloads into typed packets and typed commands into bytes.
//!
//! # Features
//!
//! - Masked user info decoding with generic skipping of unknown components
//! - Schema-driven field codec and the [`Record`] trait
//! - Commission, private store and world exchange listing packets
//! - Outbound client commands
//! - A [`Registry`] that dispatches payloads by [`PacketKey`]
//!
//! # Design Principles
//!
//! - **Correctness first** - All invariants are documented and tested.
//! - **Bounded decoding** - Every count read from the wire is checked against
//!   [`DecodeLimits`] before it drives a loop or an allocation.
//! - **Lossless fallback** - Payloads without a decoder are kept byte for byte.
//! - **Deterministic** - Same inputs produce same outputs.

pub mod command;
mod commission;
pub mod describe;
mod error;
mod field;
mod fixed_user_info;
mod item;
mod limits;
pub mod mask;
mod private_store;
mod registry;
mod user_info;
mod world_exchange;

pub use command::{commands, CommandInfo};
pub use commission::{CommissionItem, CommissionList, CommissionReply};
pub use error::{DecodeError, DecodeResult, EncodeError, EncodeResult, LimitKind};
pub use field::{
    decode_fields, decode_fields_from, decode_record, decode_record_from, encode_fields,
    encode_fields_into, encode_record, encode_record_into, encode_with_schema_text,
    record_to_hex, FieldKind, FieldValue, FieldValues, Record, Vec3,
};
pub use fixed_user_info::FixedUserInfo;
pub use item::{
    Augmentation, BodyPart, ElementalAttributes, ItemBlocks, ItemInfo, SoulCrystalOptions,
};
pub use limits::DecodeLimits;
pub use mask::ComponentKind;
pub use private_store::{PrivateStoreItem, PrivateStoreSearch};
pub use registry::{
    decode_fixed_user_info, DecodeFn, DecodedPacket, Registry, RegistryBuilder, USER_INFO_ID,
};
pub use user_info::{
    decode_user_info, encode_user_info, BasicInfo, Completeness, ComponentValue, MaskedPacket,
    Position, DEFAULT_MASK_BITS, HEADER_SIZE,
};
pub use world_exchange::{WorldExchangeItem, WorldExchangeList};

pub use cursor::{TextEncoding, TextFormat};
pub use schema::{FieldDef, FieldSchema, FieldType};
pub use wire::{from_hex, to_hex, Direction, PacketHeader, PacketKey, RawPacket};

/// Extended ids of the listing packets.
pub mod ext_id {
    pub use crate::commission::EXT_ID as COMMISSION_LIST;
    pub use crate::private_store::EXT_ID as PRIVATE_STORE_SEARCH;
    pub use crate::world_exchange::EXT_ID as WORLD_EXCHANGE_LIST;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_exports() {
        let _ = DecodeLimits::default();
        let _ = Registry::standard();
        let _ = ComponentKind::Relation;
        let _ = Vec3::new(0.0, 0.0, 0.0);
        let _ = CommissionList::empty(CommissionReply::PlayerAuctionsEmpty);
        let _ = command::find("Action");

        // Error types
        let _: DecodeResult<()> = Ok(());
        let _: EncodeResult<()> = Ok(());
    }

    #[test]
    fn extended_ids() {
        assert_eq!(ext_id::COMMISSION_LIST, 0x00F8);
        assert_eq!(ext_id::PRIVATE_STORE_SEARCH, 0x02D4);
        assert_eq!(ext_id::WORLD_EXCHANGE_LIST, 0x02FD);
    }

    #[test]
    fn record_schema_macro_is_usable_from_the_crate_root() {
        let schema = crate::record_schema!(TextFormat::UTF8_PREFIXED; "a" => U8, "b" => I32);
        assert_eq!(schema.fixed_size(), Some(5));
    }
}
