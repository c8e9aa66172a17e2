//! Human-readable summaries of decoded packets.

use std::fmt::Write;

use codec::describe;
use codec::{
    CommissionList, DecodedPacket, ItemInfo, MaskedPacket, PrivateStoreSearch, WorldExchangeList,
};

use crate::{DecodeReport, Outcome};

/// Longest payload prefix shown for raw packets, in bytes.
const RAW_PREVIEW_BYTES: usize = 32;

/// Renders one report: a header line followed by the packet summary.
#[must_use]
pub fn format_report(report: &DecodeReport) -> String {
    let mut out = format!(
        "== {}:{} {} ({} bytes) ==\n",
        report.source, report.line, report.packet, report.size
    );
    match &report.outcome {
        Outcome::Decoded(packet) => out.push_str(&format_packet(packet)),
        Outcome::Error(err) => {
            let _ = writeln!(out, "error: {err}");
        }
    }
    out
}

/// Renders a decoded packet as indented text.
#[must_use]
pub fn format_packet(packet: &DecodedPacket) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", packet.name());
    match packet {
        DecodedPacket::UserInfo(info) => user_info(&mut out, info),
        DecodedPacket::FixedUserInfo(info) => {
            let _ = writeln!(out, "  object id: {}", info.object_id);
            let _ = writeln!(out, "  name: {} level {} class {}", info.name, info.level, info.class_id);
            let _ = writeln!(
                out,
                "  position: ({}, {}, {})",
                info.position.x, info.position.y, info.position.z
            );
        }
        DecodedPacket::CommissionList(list) => commission(&mut out, list),
        DecodedPacket::PrivateStoreSearch(search) => private_store(&mut out, search),
        DecodedPacket::WorldExchangeList(list) => world_exchange(&mut out, list),
        DecodedPacket::Raw(raw) => {
            let shown = raw.payload.len().min(RAW_PREVIEW_BYTES);
            let ellipsis = if shown < raw.payload.len() { "..." } else { "" };
            let _ = writeln!(
                out,
                "  payload: {}{ellipsis}",
                wire::to_hex(&raw.payload[..shown])
            );
        }
    }
    out
}

fn user_info(out: &mut String, info: &MaskedPacket) {
    let _ = writeln!(out, "  object id: 0x{:08X}", info.object_id);
    let tags: Vec<_> = info.present_tags().map(|tag| tag.to_string()).collect();
    let _ = writeln!(out, "  mask: {} bits, tags [{}]", info.mask_bits, tags.join(", "));
    for (kind, value) in &info.components {
        let _ = writeln!(out, "  {kind}: {value:?}");
    }
    let _ = writeln!(out, "  completeness: {:?}", info.completeness);
}

fn commission(out: &mut String, list: &CommissionList) {
    let _ = writeln!(out, "  reply: {:?}", list.reply);
    if !list.reply.has_items() {
        return;
    }
    let _ = writeln!(
        out,
        "  time: {} chunk: {} items: {}",
        list.current_time,
        list.chunk_id,
        list.items.len()
    );
    for entry in &list.items {
        let _ = writeln!(
            out,
            "  - #{} {} adena each, seller {}, ends at {}",
            entry.commission_id,
            entry.price_per_unit,
            entry.seller.as_deref().unwrap_or("<none>"),
            entry.end_time
        );
        item(out, &entry.item);
    }
}

fn private_store(out: &mut String, search: &PrivateStoreSearch) {
    let _ = writeln!(
        out,
        "  page {}/{}: {} of {} items{}",
        search.page,
        search.max_page,
        search.items.len(),
        search.declared,
        if search.complete { "" } else { " (incomplete)" }
    );
    for entry in &search.items {
        let _ = writeln!(
            out,
            "  - {} [{}] {} adena at ({}, {}, {})",
            entry.vendor_name,
            describe::store_type(entry.store_type),
            entry.price,
            entry.vendor_x,
            entry.vendor_y,
            entry.vendor_z
        );
        item(out, &entry.item);
    }
}

fn world_exchange(out: &mut String, list: &WorldExchangeList) {
    let _ = writeln!(
        out,
        "  category {} sort {} page {}: {} items",
        list.category,
        list.sort_type,
        list.page,
        list.items.len()
    );
    for entry in &list.items {
        let _ = writeln!(
            out,
            "  - #{} item {} x{} +{} for {}",
            entry.world_exchange_id, entry.item_id, entry.count, entry.enchant_level, entry.price
        );
    }
}

fn item(out: &mut String, item: &ItemInfo) {
    let _ = writeln!(
        out,
        "      item {} x{} +{} ({}, {})",
        item.item_id,
        item.count,
        item.enchant_level,
        describe::item_type2(item.type2),
        describe::equipped(item.equipped)
    );
    let _ = writeln!(
        out,
        "      slot: {}; {}; {}",
        item.body_part,
        describe::mana(item.mana),
        describe::time(item.time)
    );
    if let Some(augmentation) = &item.augmentation {
        let _ = writeln!(out, "      augmentation: {augmentation:?}");
    }
    if let Some(elemental) = &item.elemental {
        let _ = writeln!(out, "      elemental: {elemental:?}");
    }
    if let Some(visual_id) = item.visual_id {
        let _ = writeln!(out, "      visual id: {visual_id}");
    }
    if let Some(soul_crystal) = &item.soul_crystal {
        let _ = writeln!(out, "      soul crystal: {soul_crystal:?}");
    }
}
