//! Capture decoding and command building tools for the l2wire codec.
//!
//! This crate provides the pieces behind the `l2wire` binary:
//!
//! - Read JSON-lines capture files and run every record through a [`Registry`]
//! - Render decoded packets as JSON or as a short human-readable summary
//! - Build outbound commands from `key=value` overrides
//!
//! # Design Principles
//!
//! - **First-class tooling** - These tools are part of the product, not afterthoughts.
//! - **Human-readable output** - Make it easy to understand what the codec is doing.

mod captures;
mod pretty;

use anyhow::{anyhow, Context, Result};
use codec::{CommandInfo, DecodedPacket, Registry};
use serde::Serialize;
use wire::{Direction, PacketHeader, RawPacket};

pub use captures::{collect_capture_files, read_captures, CaptureLine};
pub use pretty::{format_packet, format_report};

/// One capture record run through the dispatcher.
#[derive(Debug, Serialize)]
pub struct DecodeReport {
    /// File the record came from.
    pub source: String,
    /// 1-based line number within `source`.
    pub line: usize,
    /// Packet key, e.g. `S FE:00F8`.
    pub packet: String,
    pub size: u32,
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// Result of decoding one record. Decode errors are reported per record and
/// never stop the rest of the file.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Decoded(DecodedPacket),
    Error(String),
}

impl DecodeReport {
    /// Dispatches `raw` and records the outcome.
    pub fn new(registry: &Registry, source: &str, line: usize, raw: RawPacket) -> Self {
        let packet = raw.header.key().to_string();
        let size = raw.header.size();
        let outcome = match registry.dispatch_raw(raw) {
            Ok(decoded) => Outcome::Decoded(decoded),
            Err(err) => {
                tracing::warn!(source, line, %packet, error = %err, "decode failed");
                Outcome::Error(err.to_string())
            }
        };
        Self {
            source: source.to_string(),
            line,
            packet,
            size,
            outcome,
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.outcome, Outcome::Error(_))
    }
}

/// Decodes every record of a capture file.
pub fn decode_lines(
    registry: &Registry,
    source: &str,
    lines: Vec<CaptureLine>,
) -> Result<Vec<DecodeReport>> {
    lines
        .into_iter()
        .map(|CaptureLine { line, capture }| {
            let raw = capture
                .into_raw()
                .with_context(|| format!("{source}:{line}: invalid capture record"))?;
            Ok(DecodeReport::new(registry, source, line, raw))
        })
        .collect()
}

/// Dispatches one hex payload with an explicit header.
pub fn decode_hex(
    registry: &Registry,
    direction: Direction,
    id: u16,
    ext_id: Option<u16>,
    hex: &str,
) -> Result<DecodedPacket> {
    let payload = wire::from_hex(hex.trim()).context("parse payload hex")?;
    let size = u32::try_from(payload.len()).context("payload too large")?;
    let mut header = PacketHeader::new(direction, id, size);
    if let Some(ext_id) = ext_id {
        header = header.with_ext_id(ext_id);
    }
    registry
        .dispatch(&header, &payload)
        .with_context(|| format!("decode {}", header.key()))
}

/// Splits a `key=value` command argument.
pub fn parse_assignment(text: &str) -> Result<(String, String)> {
    let (key, value) = text
        .split_once('=')
        .ok_or_else(|| anyhow!("expected key=value, got {text:?}"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(anyhow!("empty field name in {text:?}"));
    }
    Ok((key.to_string(), value.to_string()))
}

fn find_command(name: &str) -> Result<&'static CommandInfo> {
    codec::command::find(name).ok_or_else(|| {
        let known: Vec<_> = codec::commands().iter().map(|command| command.name).collect();
        anyhow!("unknown command {name:?}; known commands: {}", known.join(", "))
    })
}

/// Encodes a named command with field overrides and returns its hex string.
pub fn build_command(name: &str, args: &[(String, String)]) -> Result<String> {
    let command = find_command(name)?;
    let bytes = command
        .encode(args.iter().map(|(key, value)| (key.as_str(), value.as_str())))
        .with_context(|| format!("encode {}", command.name))?;
    Ok(wire::to_hex(&bytes))
}

/// Lists a command's fields in wire order with its schema fingerprint.
pub fn describe_command(name: &str) -> Result<String> {
    let command = find_command(name)?;
    let schema = command.schema();
    let mut out = format!(
        "{} (schema {:016x}, strings {:?})\n",
        command.name,
        schema.fingerprint(),
        schema.text()
    );
    for field in schema.fields() {
        out.push_str(&format!("  {}: {}\n", field.name, field.ty));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const LINES: &str = concat!(
        r#"{"direction":"S","id":254,"exid":291,"size":5,"data":"DEADBEEF"}"#,
        "\n\n",
        r#"{"direction":"S","id":50,"size":3,"data":""}"#,
        "\n",
    );

    #[test]
    fn decode_lines_reports_each_record() {
        let lines = read_captures(Cursor::new(LINES), "test.jsonl").unwrap();
        assert_eq!(lines.len(), 2);
        let reports = decode_lines(Registry::standard(), "test.jsonl", lines).unwrap();

        assert_eq!(reports[0].line, 1);
        assert_eq!(reports[0].packet, "S FE:0123");
        assert!(matches!(
            reports[0].outcome,
            Outcome::Decoded(DecodedPacket::Raw(_))
        ));

        // An empty user info payload fails without stopping the file.
        assert_eq!(reports[1].line, 3);
        assert!(reports[1].is_error());
    }

    #[test]
    fn invalid_hex_is_a_hard_error() {
        let text = r#"{"direction":"S","id":1,"size":3,"data":"ABC"}"#;
        let lines = read_captures(Cursor::new(text), "bad.jsonl").unwrap();
        let err = decode_lines(Registry::standard(), "bad.jsonl", lines).unwrap_err();
        assert!(err.to_string().contains("bad.jsonl:1"));
    }

    #[test]
    fn report_serializes_flat() {
        let lines = read_captures(Cursor::new(LINES), "test.jsonl").unwrap();
        let reports = decode_lines(Registry::standard(), "test.jsonl", lines).unwrap();
        let json = serde_json::to_value(&reports[0]).unwrap();
        assert_eq!(json["packet"], "S FE:0123");
        assert_eq!(json["decoded"]["packet"], "raw");
        assert_eq!(json["decoded"]["body"]["data"], "DEADBEEF");

        let json = serde_json::to_value(&reports[1]).unwrap();
        assert_eq!(json["error"], "empty packet");
    }

    #[test]
    fn decode_hex_dispatches() {
        let decoded = decode_hex(
            Registry::standard(),
            Direction::ServerToClient,
            0xFE,
            Some(0x00F8),
            "FEFFFFFF",
        )
        .unwrap();
        let DecodedPacket::CommissionList(list) = decoded else {
            panic!("expected commission list");
        };
        assert_eq!(list.reply, codec::CommissionReply::PlayerAuctionsEmpty);
        assert!(list.items.is_empty());
    }

    #[test]
    fn assignments() {
        assert_eq!(
            parse_assignment("item_type=0x02").unwrap(),
            ("item_type".to_string(), "0x02".to_string())
        );
        assert_eq!(
            parse_assignment("text=a=b").unwrap(),
            ("text".to_string(), "a=b".to_string())
        );
        assert!(parse_assignment("item_type").is_err());
        assert!(parse_assignment("=1").is_err());
    }

    #[test]
    fn build_command_hex() {
        let args = vec![("item_type".to_string(), "2".to_string())];
        assert_eq!(
            build_command("requestitemlist", &args).unwrap(),
            "D0140200000302FF00"
        );
        let err = build_command("Teleport", &[]).unwrap_err();
        assert!(err.to_string().contains("RequestItemList"));
    }

    #[test]
    fn describe_lists_fields_in_order() {
        let text = describe_command("Say2").unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert!(lines[0].starts_with("Say2 (schema "));
        assert_eq!(lines[1].trim(), "packet_id: u8");
        assert_eq!(lines[2].trim(), "text: string");
        assert_eq!(lines.len(), 5);
        assert_eq!(describe_command("say2").unwrap(), text);
    }
}
