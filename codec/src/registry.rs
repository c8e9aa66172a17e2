//! Packet registry and dispatcher.
//!
//! The registry maps a [`PacketKey`] to the decoder for that packet shape.
//! Unregistered keys are not an error: their payload comes back as
//! [`DecodedPacket::Raw`], byte for byte.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use serde::{Serialize, Serializer};
use tracing::debug;
use wire::{Capture, Direction, PacketHeader, PacketKey, RawPacket, EXTENDED_PACKET_ID};

use crate::commission::{self, CommissionList};
use crate::error::DecodeResult;
use crate::fixed_user_info::FixedUserInfo;
use crate::limits::DecodeLimits;
use crate::private_store::{self, PrivateStoreSearch};
use crate::user_info::{decode_user_info, MaskedPacket};
use crate::world_exchange::{self, WorldExchangeList};

/// Packet id of the masked user info packet.
pub const USER_INFO_ID: u16 = 0x32;

/// Decoder for one packet shape.
pub type DecodeFn = fn(&[u8], &DecodeLimits) -> DecodeResult<DecodedPacket>;

/// The result of dispatching one payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "packet", content = "body", rename_all = "snake_case")]
pub enum DecodedPacket {
    UserInfo(MaskedPacket),
    FixedUserInfo(FixedUserInfo),
    CommissionList(CommissionList),
    PrivateStoreSearch(PrivateStoreSearch),
    WorldExchangeList(WorldExchangeList),
    /// Any packet without a registered decoder.
    Raw(#[serde(serialize_with = "serialize_raw")] RawPacket),
}

impl DecodedPacket {
    /// Short name of the packet shape.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::UserInfo(_) => "UserInfo",
            Self::FixedUserInfo(_) => "FixedUserInfo",
            Self::CommissionList(_) => "ExResponseCommissionList",
            Self::PrivateStoreSearch(_) => "ExPrivateStoreSearchItem",
            Self::WorldExchangeList(_) => "WorldExchangeItemList",
            Self::Raw(_) => "Raw",
        }
    }

    #[must_use]
    pub const fn is_raw(&self) -> bool {
        matches!(self, Self::Raw(_))
    }
}

fn serialize_raw<S: Serializer>(packet: &RawPacket, serializer: S) -> Result<S::Ok, S::Error> {
    Capture::from_raw(packet).serialize(serializer)
}

/// An immutable table of packet decoders.
#[derive(Clone)]
pub struct Registry {
    decoders: HashMap<PacketKey, DecodeFn>,
    limits: DecodeLimits,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<_> = self.decoders.keys().collect();
        keys.sort();
        f.debug_struct("Registry")
            .field("keys", &keys)
            .field("limits", &self.limits)
            .finish()
    }
}

impl Registry {
    /// The built-in table with default limits.
    pub fn standard() -> &'static Self {
        static STANDARD: OnceLock<Registry> = OnceLock::new();
        STANDARD.get_or_init(|| Self::with_limits(DecodeLimits::default()))
    }

    /// The built-in table with custom limits.
    #[must_use]
    pub fn with_limits(limits: DecodeLimits) -> Self {
        Self::builder().standard_packets().limits(limits).build()
    }

    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    #[must_use]
    pub const fn limits(&self) -> &DecodeLimits {
        &self.limits
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }

    #[must_use]
    pub fn contains(&self, key: &PacketKey) -> bool {
        self.decoders.contains_key(key)
    }

    /// Registered keys, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<PacketKey> {
        let mut keys: Vec<_> = self.decoders.keys().copied().collect();
        keys.sort();
        keys
    }

    /// Decodes `payload` with the decoder registered for `header`.
    ///
    /// Only a registered decoder can fail; anything else is returned as
    /// [`DecodedPacket::Raw`] with an identical copy of the payload.
    pub fn dispatch(&self, header: &PacketHeader, payload: &[u8]) -> DecodeResult<DecodedPacket> {
        let Some(decode) = self.decoders.get(&header.key()) else {
            debug!(packet = %header.key(), len = payload.len(), "no decoder, keeping raw payload");
            return Ok(DecodedPacket::Raw(RawPacket::copied(header, payload)));
        };
        self.limits.check_packet(payload.len())?;
        decode(payload, &self.limits)
    }

    /// Dispatches an owned raw packet.
    pub fn dispatch_raw(&self, packet: RawPacket) -> DecodeResult<DecodedPacket> {
        if !self.contains(&packet.header.key()) {
            return Ok(DecodedPacket::Raw(packet));
        }
        self.dispatch(&packet.header, &packet.payload)
    }
}

/// Builds a [`Registry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    decoders: HashMap<PacketKey, DecodeFn>,
    limits: DecodeLimits,
}

impl RegistryBuilder {
    /// Registers `decode` for `key`, replacing any earlier decoder.
    #[must_use]
    pub fn register(mut self, key: PacketKey, decode: DecodeFn) -> Self {
        self.decoders.insert(key, decode);
        self
    }

    /// Adds the built-in server packets.
    #[must_use]
    pub fn standard_packets(self) -> Self {
        let ext = |ext_id| PacketKey::extended(Direction::ServerToClient, EXTENDED_PACKET_ID, ext_id);
        self.register(
            PacketKey::new(Direction::ServerToClient, USER_INFO_ID),
            |buf, limits| decode_user_info(buf, limits).map(DecodedPacket::UserInfo),
        )
        .register(ext(commission::EXT_ID), |buf, limits| {
            CommissionList::decode(buf, limits).map(DecodedPacket::CommissionList)
        })
        .register(ext(private_store::EXT_ID), |buf, limits| {
            PrivateStoreSearch::decode(buf, limits).map(DecodedPacket::PrivateStoreSearch)
        })
        .register(ext(world_exchange::EXT_ID), |buf, limits| {
            WorldExchangeList::decode(buf, limits).map(DecodedPacket::WorldExchangeList)
        })
    }

    #[must_use]
    pub const fn limits(mut self, limits: DecodeLimits) -> Self {
        self.limits = limits;
        self
    }

    #[must_use]
    pub fn build(self) -> Registry {
        Registry {
            decoders: self.decoders,
            limits: self.limits,
        }
    }
}

/// Decoder for [`FixedUserInfo`], for registries that map a key to it.
pub fn decode_fixed_user_info(buf: &[u8], _limits: &DecodeLimits) -> DecodeResult<DecodedPacket> {
    FixedUserInfo::decode(buf).map(DecodedPacket::FixedUserInfo)
}
