use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use codec::{DecodeLimits, Registry};
use l2wire_tools::{
    build_command, collect_capture_files, decode_hex, decode_lines, describe_command,
    format_packet, format_report, parse_assignment, read_captures,
};
use tracing_subscriber::EnvFilter;
use wire::Direction;

#[derive(Parser)]
#[command(
    name = "l2wire",
    version,
    about = "l2wire capture decoding and command tools"
)]
struct Cli {
    /// Log decoder activity at debug level.
    #[arg(long, short, global = true)]
    verbose: bool,
    /// Largest payload accepted for a packet with a registered decoder.
    #[arg(long, global = true)]
    max_packet_bytes: Option<usize>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode a JSON-lines capture file or a directory of them.
    Decode {
        /// Capture file or directory.
        capture: PathBuf,
        /// Optional glob filter when decoding a directory.
        #[arg(long)]
        glob: Option<String>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Build an outbound command and print its hex.
    Command {
        /// Command name, e.g. RequestItemList.
        name: String,
        /// Field override as key=value; may be repeated.
        #[arg(long = "arg", value_parser = parse_assignment)]
        args: Vec<(String, String)>,
        /// Print the command's field layout instead of encoding it.
        #[arg(long, conflicts_with = "args")]
        describe: bool,
    },
    /// Decode a single hex payload.
    Hex {
        /// Payload bytes as hex.
        payload: String,
        /// Sender, C or S.
        #[arg(long, default_value = "S", value_parser = parse_direction)]
        direction: Direction,
        /// Packet id, decimal or 0x hex.
        #[arg(long, value_parser = parse_id)]
        id: u16,
        /// Extended packet id, decimal or 0x hex.
        #[arg(long, value_parser = parse_id)]
        ext_id: Option<u16>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut limits = DecodeLimits::default();
    if let Some(max_packet_bytes) = cli.max_packet_bytes {
        limits.max_packet_bytes = max_packet_bytes;
    }
    let registry = Registry::with_limits(limits);

    match cli.command {
        Command::Decode {
            capture,
            glob,
            format,
        } => {
            for path in collect_capture_files(&capture, glob.as_deref())? {
                let source = path.display().to_string();
                let file = File::open(&path).with_context(|| format!("open capture {source}"))?;
                let lines = read_captures(BufReader::new(file), &source)?;
                for report in decode_lines(&registry, &source, lines)? {
                    match format {
                        OutputFormat::Json => {
                            let json = serde_json::to_string(&report).context("serialize json")?;
                            println!("{json}");
                        }
                        OutputFormat::Pretty => print!("{}", format_report(&report)),
                    }
                }
            }
        }
        Command::Command {
            name,
            args,
            describe,
        } => {
            if describe {
                print!("{}", describe_command(&name)?);
            } else {
                println!("{}", build_command(&name, &args)?);
            }
        }
        Command::Hex {
            payload,
            direction,
            id,
            ext_id,
            format,
        } => {
            let decoded = decode_hex(&registry, direction, id, ext_id, &payload)?;
            match format {
                OutputFormat::Json => {
                    let json = serde_json::to_string_pretty(&decoded).context("serialize json")?;
                    println!("{json}");
                }
                OutputFormat::Pretty => print!("{}", format_packet(&decoded)),
            }
        }
    }
    Ok(())
}

/// `RUST_LOG` wins; otherwise warnings only, or debug with `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_direction(text: &str) -> Result<Direction, String> {
    text.to_ascii_uppercase()
        .parse()
        .map_err(|err: wire::WireError| err.to_string())
}

fn parse_id(text: &str) -> Result<u16, String> {
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => text.parse(),
    };
    parsed.map_err(|err| format!("invalid id {text:?}: {err}"))
}
