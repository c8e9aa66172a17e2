use codec::{
    decode_fixed_user_info, encode_user_info, BasicInfo, CommissionItem, CommissionList,
    CommissionReply, Completeness, ComponentKind, ComponentValue, DecodeError, DecodedPacket,
    Direction, FixedUserInfo, ItemInfo, MaskedPacket, PacketHeader, PacketKey, Position,
    PrivateStoreItem, PrivateStoreSearch, RawPacket, Registry, Vec3,
};
use wire::Capture;

fn server(id: u16, ext_id: Option<u16>, payload: &[u8]) -> RawPacket {
    let size = u32::try_from(payload.len()).unwrap() + 3;
    let mut header = PacketHeader::new(Direction::ServerToClient, id, size);
    if let Some(ext_id) = ext_id {
        header = header.with_ext_id(ext_id);
    }
    RawPacket::new(header, payload.to_vec())
}

/// Serializes a packet to a capture line and reads it back, as the tools do.
fn through_capture_line(packet: &RawPacket) -> RawPacket {
    let line = serde_json::to_string(&Capture::from_raw(packet)).unwrap();
    serde_json::from_str::<Capture>(&line)
        .unwrap()
        .into_raw()
        .unwrap()
}

fn hero() -> BasicInfo {
    BasicInfo {
        name: "Hero".to_string(),
        is_gm: 0,
        race: 1,
        is_female: 0,
        root_class_id: 0x10,
        class_id: 0x11,
        level: 52,
        class_id_repeat: 0x11,
    }
}

#[test]
fn integration_user_info_from_capture_line() {
    let packet = MaskedPacket::new(
        0x1000_0001,
        0x58,
        [
            ComponentValue::Relation(0),
            ComponentValue::BasicInfo(hero()),
            ComponentValue::Position(Position {
                x: -80_000,
                y: 150_000,
                z: -3_000,
                vehicle_id: 0,
            }),
        ],
    );
    let payload = encode_user_info(&packet).unwrap();
    let raw = through_capture_line(&server(0x32, None, &payload));

    let DecodedPacket::UserInfo(decoded) = Registry::standard().dispatch_raw(raw).unwrap() else {
        panic!("expected user info");
    };
    assert_eq!(decoded, packet);
    assert_eq!(decoded.basic_info().map(|info| info.name.as_str()), Some("Hero"));
    assert_eq!(decoded.position().map(|p| p.y), Some(150_000));
}

#[test]
fn integration_two_mask_bits_relation_only() {
    let mut payload = Vec::new();
    payload.extend_from_slice(&7u32.to_le_bytes());
    payload.extend_from_slice(&0u32.to_le_bytes());
    payload.extend_from_slice(&2u16.to_le_bytes());
    payload.push(0b1000_0000);
    payload.extend_from_slice(&0x0000_0100u32.to_le_bytes());

    let registry = Registry::standard();
    let header = PacketHeader::new(Direction::ServerToClient, 0x32, 0);
    let DecodedPacket::UserInfo(packet) = registry.dispatch(&header, &payload).unwrap() else {
        panic!("expected user info");
    };
    assert_eq!(packet.present_tags().collect::<Vec<_>>(), vec![0]);
    assert_eq!(
        packet.component(ComponentKind::Relation),
        Some(&ComponentValue::Relation(0x100))
    );
    assert_eq!(packet.completeness, Completeness::Complete);

    // Pad bits past the second bit must not change the result.
    let mut noisy = payload.clone();
    noisy[10] |= 0b0011_1111;
    let DecodedPacket::UserInfo(noisy) = registry.dispatch(&header, &noisy).unwrap() else {
        panic!("expected user info");
    };
    assert_eq!(noisy.components, packet.components);
    assert_eq!(noisy.completeness, packet.completeness);
}

#[test]
fn integration_wide_mask_relation_only() {
    let mut payload = Vec::new();
    payload.extend_from_slice(&7u32.to_le_bytes());
    payload.extend_from_slice(&0u32.to_le_bytes());
    payload.extend_from_slice(&300u16.to_le_bytes());
    let mut mask = vec![0u8; 38];
    mask[0] = 0b1000_0000;
    payload.extend_from_slice(&mask);
    payload.extend_from_slice(&7u32.to_le_bytes());

    let raw = through_capture_line(&server(0x32, None, &payload));
    let DecodedPacket::UserInfo(packet) = Registry::standard().dispatch_raw(raw).unwrap() else {
        panic!("expected user info");
    };
    assert_eq!(packet.mask_bits, 300);
    assert_eq!(packet.present_tags().collect::<Vec<_>>(), vec![0]);
    assert_eq!(
        packet.component(ComponentKind::Relation),
        Some(&ComponentValue::Relation(7))
    );
    assert_eq!(packet.completeness, Completeness::Complete);
}

#[test]
fn integration_opaque_component_does_not_hide_later_ones() {
    let mut payload = Vec::new();
    payload.extend_from_slice(&1u32.to_le_bytes());
    payload.extend_from_slice(&0u32.to_le_bytes());
    payload.extend_from_slice(&29u16.to_le_bytes());
    // RELATION, BASE_STATS and POSITION.
    payload.extend_from_slice(&[0b1010_0000, 0b0010_0000, 0, 0]);
    payload.extend_from_slice(&9u32.to_le_bytes());
    payload.extend_from_slice(&4u16.to_le_bytes());
    payload.extend_from_slice(&[0xAA, 0xBB, 0xCC, 0xDD]);
    payload.extend_from_slice(&18u16.to_le_bytes());
    for value in [10i32, 20, 30] {
        payload.extend_from_slice(&value.to_le_bytes());
    }
    payload.extend_from_slice(&0u32.to_le_bytes());

    let header = PacketHeader::new(Direction::ServerToClient, 0x32, 0);
    let DecodedPacket::UserInfo(packet) = Registry::standard().dispatch(&header, &payload).unwrap()
    else {
        panic!("expected user info");
    };
    assert_eq!(packet.present_tags().collect::<Vec<_>>(), vec![0, 2, 10]);
    assert!(packet.component(ComponentKind::BaseStats).is_none());
    assert_eq!(
        packet.position(),
        Some(&Position {
            x: 10,
            y: 20,
            z: 30,
            vehicle_id: 0
        })
    );
    assert!(packet.completeness.is_complete());
}

#[test]
fn integration_short_header_is_truncated() {
    let header = PacketHeader::new(Direction::ServerToClient, 0x32, 0);
    let err = Registry::standard()
        .dispatch(&header, &[1, 0, 0, 0, 2])
        .unwrap_err();
    assert!(matches!(err, DecodeError::TruncatedBuffer { .. }));
}

#[test]
fn integration_commission_list_from_capture_line() {
    let list = CommissionList {
        reply: CommissionReply::Auctions,
        current_time: 1_700_000_000,
        chunk_id: 0,
        items: vec![CommissionItem {
            commission_id: 9_001,
            price_per_unit: 150_000,
            item_type: 0,
            duration_type: 1,
            end_time: 1_700_086_400,
            seller: Some("Trader".to_string()),
            item: ItemInfo::new(0x4000_0001, 57, 1_000),
        }],
    };
    let payload = list.encode().unwrap();
    let raw = through_capture_line(&server(0xFE, Some(0x00F8), &payload));

    let decoded = Registry::standard().dispatch_raw(raw).unwrap();
    assert_eq!(decoded.name(), "ExResponseCommissionList");
    assert_eq!(decoded, DecodedPacket::CommissionList(list));
}

#[test]
fn integration_private_store_search() {
    let search = PrivateStoreSearch::new(
        1,
        3,
        vec![PrivateStoreItem {
            vendor_name: "Vendor".to_string(),
            vendor_object_id: 0x1000_0042,
            store_type: 0,
            price: 2_500,
            vendor_x: 83_000,
            vendor_y: 148_000,
            vendor_z: -3_400,
            item: ItemInfo::new(0x4000_0002, 1_864, 20),
        }],
    );
    let payload = search.encode().unwrap();
    let header = PacketHeader::new(Direction::ServerToClient, 0xFE, 0).with_ext_id(0x02D4);

    let decoded = Registry::standard().dispatch(&header, &payload).unwrap();
    assert_eq!(decoded, DecodedPacket::PrivateStoreSearch(search));
}

#[test]
fn integration_unregistered_packet_is_byte_identical() {
    let payload: Vec<u8> = (0..=255).collect();
    let raw = server(0xFE, Some(0x0123), &payload);
    let decoded = Registry::standard()
        .dispatch(&raw.header, &raw.payload)
        .unwrap();
    assert_eq!(decoded, DecodedPacket::Raw(raw.clone()));

    let json = serde_json::to_value(&decoded).unwrap();
    let capture: Capture = serde_json::from_value(json["body"].clone()).unwrap();
    let reread = capture.into_raw().unwrap();
    assert_eq!(reread.header.key(), raw.header.key());
    assert_eq!(reread.header.size(), raw.header.size());
    assert_eq!(reread.payload, raw.payload);
}

#[test]
fn integration_client_direction_is_not_user_info() {
    let header = PacketHeader::new(Direction::ClientToServer, 0x32, 0);
    let decoded = Registry::standard().dispatch(&header, &[0x32]).unwrap();
    assert!(decoded.is_raw());
}

#[test]
fn integration_fixed_user_info_registry() {
    let key = PacketKey::new(Direction::ServerToClient, 0x32);
    let registry = Registry::builder()
        .register(key, decode_fixed_user_info)
        .build();
    let info = FixedUserInfo {
        object_id: 5,
        name: "Hero".to_string(),
        level: 1,
        class_id: 0,
        position: Vec3::new(1.0, 2.0, 3.0),
    };
    let mut payload = info.encode().unwrap();
    let header = PacketHeader::new(Direction::ServerToClient, 0x32, 0);
    assert_eq!(
        registry.dispatch(&header, &payload).unwrap(),
        DecodedPacket::FixedUserInfo(info)
    );

    payload[0] = 0x33;
    assert_eq!(
        registry.dispatch(&header, &payload).unwrap_err(),
        DecodeError::UnexpectedPacketId {
            expected: 0x32,
            found: 0x33
        }
    );
}
