//! Component mask table and the mask bit-order rule.
//!
//! Mask bytes are read most significant bit first: bit `b` of byte `i` is
//! logical index `i * 8 + (7 - b)`. Only indices below `mask_bits` count.

use std::fmt;

use serde::{Serialize, Serializer};

/// Optional component blocks of the user info packet, by mask index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum ComponentKind {
    Relation = 0x00,
    BasicInfo = 0x01,
    BaseStats = 0x02,
    MaxHpCpMp = 0x03,
    CurrentHpMpCpExpSp = 0x04,
    EnchantLevel = 0x05,
    Appearance = 0x06,
    Status = 0x07,
    Stats = 0x08,
    Elementals = 0x09,
    Position = 0x0A,
    Speed = 0x0B,
    Multiplier = 0x0C,
    ColRadiusHeight = 0x0D,
    AtkElemental = 0x0E,
    Clan = 0x0F,
    Social = 0x10,
    VitaFame = 0x11,
    Slots = 0x12,
    Movements = 0x13,
    Color = 0x14,
    InventoryLimit = 0x15,
    TrueHero = 0x16,
    AttSpirits = 0x17,
    Ranking = 0x18,
    StatPoints = 0x19,
    StatAbilities = 0x1A,
    ElixirUsed = 0x1B,
    VanguardMount = 0x1C,
}

impl ComponentKind {
    /// Number of known component kinds.
    pub const COUNT: usize = 29;

    /// Every kind in tag order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Relation,
        Self::BasicInfo,
        Self::BaseStats,
        Self::MaxHpCpMp,
        Self::CurrentHpMpCpExpSp,
        Self::EnchantLevel,
        Self::Appearance,
        Self::Status,
        Self::Stats,
        Self::Elementals,
        Self::Position,
        Self::Speed,
        Self::Multiplier,
        Self::ColRadiusHeight,
        Self::AtkElemental,
        Self::Clan,
        Self::Social,
        Self::VitaFame,
        Self::Slots,
        Self::Movements,
        Self::Color,
        Self::InventoryLimit,
        Self::TrueHero,
        Self::AttSpirits,
        Self::Ranking,
        Self::StatPoints,
        Self::StatAbilities,
        Self::ElixirUsed,
        Self::VanguardMount,
    ];

    /// Looks up the kind for a mask index. Unknown tags are legal on the wire.
    #[must_use]
    pub const fn from_tag(tag: u8) -> Option<Self> {
        if (tag as usize) < Self::COUNT {
            Some(Self::ALL[tag as usize])
        } else {
            None
        }
    }

    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Stable symbolic name, e.g. `BASIC_INFO`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Relation => "RELATION",
            Self::BasicInfo => "BASIC_INFO",
            Self::BaseStats => "BASE_STATS",
            Self::MaxHpCpMp => "MAX_HPCPMP",
            Self::CurrentHpMpCpExpSp => "CURRENT_HPMPCP_EXP_SP",
            Self::EnchantLevel => "ENCHANTLEVEL",
            Self::Appearance => "APPEARANCE",
            Self::Status => "STATUS",
            Self::Stats => "STATS",
            Self::Elementals => "ELEMENTALS",
            Self::Position => "POSITION",
            Self::Speed => "SPEED",
            Self::Multiplier => "MULTIPLIER",
            Self::ColRadiusHeight => "COL_RADIUS_HEIGHT",
            Self::AtkElemental => "ATK_ELEMENTAL",
            Self::Clan => "CLAN",
            Self::Social => "SOCIAL",
            Self::VitaFame => "VITA_FAME",
            Self::Slots => "SLOTS",
            Self::Movements => "MOVEMENTS",
            Self::Color => "COLOR",
            Self::InventoryLimit => "INVENTORY_LIMIT",
            Self::TrueHero => "TRUE_HERO",
            Self::AttSpirits => "ATT_SPIRITS",
            Self::Ranking => "RANKING",
            Self::StatPoints => "STAT_POINTS",
            Self::StatAbilities => "STAT_ABILITIES",
            Self::ElixirUsed => "ELIXIR_USED",
            Self::VanguardMount => "VANGUARD_MOUNT",
        }
    }

    /// Looks up a kind by its symbolic name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for ComponentKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Number of mask bytes needed for `mask_bits` bits.
#[must_use]
pub const fn mask_len(mask_bits: u16) -> usize {
    (mask_bits as usize).div_ceil(8)
}

/// Returns `true` if logical index `index` is set and below `mask_bits`.
#[must_use]
pub fn is_set(mask: &[u8], mask_bits: u16, index: usize) -> bool {
    if index >= usize::from(mask_bits) {
        return false;
    }
    mask.get(index / 8)
        .is_some_and(|byte| byte & (0x80 >> (index % 8)) != 0)
}

/// Logical indices set in `mask`, ascending. Pad bits at or beyond
/// `mask_bits` are ignored.
pub fn present_tags(mask: &[u8], mask_bits: u16) -> impl Iterator<Item = usize> + '_ {
    let limit = usize::from(mask_bits).min(mask.len() * 8);
    (0..limit).filter(move |&index| is_set(mask, mask_bits, index))
}

/// Builds a `mask_len(mask_bits)`-byte mask with the given indices set.
/// Indices at or beyond `mask_bits` are dropped.
#[must_use]
pub fn build_mask(tags: impl IntoIterator<Item = usize>, mask_bits: u16) -> Vec<u8> {
    let mut mask = vec![0u8; mask_len(mask_bits)];
    for index in tags {
        if index < usize::from(mask_bits) {
            mask[index / 8] |= 0x80 >> (index % 8);
        }
    }
    mask
}

/// Zeroes every bit at or beyond `mask_bits`.
pub fn clear_pad_bits(mask: &mut [u8], mask_bits: u16) {
    let used = usize::from(mask_bits);
    for (byte_index, byte) in mask.iter_mut().enumerate() {
        let first = byte_index * 8;
        if first >= used {
            *byte = 0;
        } else if used - first < 8 {
            *byte &= !(0xFFu8 >> (used - first));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_dense() {
        for (index, kind) in ComponentKind::ALL.iter().enumerate() {
            assert_eq!(usize::from(kind.tag()), index);
            assert_eq!(ComponentKind::from_tag(kind.tag()), Some(*kind));
            assert_eq!(ComponentKind::from_name(kind.name()), Some(*kind));
        }
        assert_eq!(ComponentKind::from_tag(0x1D), None);
        assert_eq!(ComponentKind::from_tag(0xFF), None);
    }

    #[test]
    fn names() {
        assert_eq!(ComponentKind::Relation.name(), "RELATION");
        assert_eq!(ComponentKind::Appearance.to_string(), "APPEARANCE");
        assert_eq!(ComponentKind::VanguardMount.name(), "VANGUARD_MOUNT");
    }

    #[test]
    fn msb_first_bit_order() {
        let tags: Vec<_> = present_tags(&[0b1000_0000], 2).collect();
        assert_eq!(tags, vec![0]);

        let tags: Vec<_> = present_tags(&[0b0100_0000], 8).collect();
        assert_eq!(tags, vec![1]);

        let tags: Vec<_> = present_tags(&[0x00, 0b0010_0001], 16).collect();
        assert_eq!(tags, vec![10, 15]);
    }

    #[test]
    fn pad_bits_ignored() {
        let tags: Vec<_> = present_tags(&[0b1011_1111], 2).collect();
        assert_eq!(tags, vec![0]);
        assert!(!is_set(&[0xFF], 2, 2));
    }

    #[test]
    fn clear_pad_bits_keeps_used_bits() {
        let mut mask = vec![0xFF, 0xFF, 0xFF, 0xFF];
        clear_pad_bits(&mut mask, 29);
        assert_eq!(mask, vec![0xFF, 0xFF, 0xFF, 0b1111_1000]);

        let mut mask = vec![0xFF, 0xFF];
        clear_pad_bits(&mut mask, 8);
        assert_eq!(mask, vec![0xFF, 0x00]);

        let mut mask = vec![0b1011_1111];
        clear_pad_bits(&mut mask, 2);
        assert_eq!(mask, vec![0b1000_0000]);
    }

    #[test]
    fn short_mask_yields_nothing_past_end() {
        let tags: Vec<_> = present_tags(&[0xFF], 29).collect();
        assert_eq!(tags, (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn mask_lengths() {
        assert_eq!(mask_len(0), 0);
        assert_eq!(mask_len(1), 1);
        assert_eq!(mask_len(8), 1);
        assert_eq!(mask_len(29), 4);
        assert_eq!(mask_len(u16::MAX), 8192);
    }

    #[test]
    fn build_mask_inverts_present_tags() {
        let mask = build_mask([0, 1, 10, 28, 40], 29);
        assert_eq!(mask, vec![0b1100_0000, 0b0010_0000, 0x00, 0b0000_1000]);
        let tags: Vec<_> = present_tags(&mask, 29).collect();
        assert_eq!(tags, vec![0, 1, 10, 28]);
    }

    #[test]
    fn kind_serializes_as_name() {
        let json = serde_json::to_string(&ComponentKind::BasicInfo).unwrap();
        assert_eq!(json, "\"BASIC_INFO\"");
    }
}
