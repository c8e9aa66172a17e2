#![no_main]

use codec::{DecodeLimits, DecodedPacket, Registry};
use libfuzzer_sys::fuzz_target;
use wire::{Direction, PacketHeader};

const KEYS: [(u16, Option<u16>); 5] = [
    (0x32, None),
    (0xFE, Some(0x00F8)),
    (0xFE, Some(0x02D4)),
    (0xFE, Some(0x02FD)),
    (0xFE, Some(0x7777)),
];

fuzz_target!(|data: &[u8]| {
    let Some((&selector, payload)) = data.split_first() else {
        return;
    };
    let (id, ext_id) = KEYS[usize::from(selector) % KEYS.len()];
    let mut header = PacketHeader::new(Direction::ServerToClient, id, 0);
    if let Some(ext_id) = ext_id {
        header = header.with_ext_id(ext_id);
    }

    let registry = Registry::with_limits(DecodeLimits::for_testing());
    if let Ok(DecodedPacket::Raw(raw)) = registry.dispatch(&header, payload) {
        assert_eq!(raw.payload, payload);
    }
});
