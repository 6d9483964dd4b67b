//! Convert AX.25 addresses between text and binary forms.
//!
//! Usage:
//!   ax25addr encode N0CALL-5
//!   ax25addr decode "4e 30 43 41 4c 4c 6b"
//!   ax25addr validate 4e30434c4c2020
//!   ax25addr parse N0CALL-1 via RELAY1 RELAY2 [--native]
//!   ax25addr parse port:radio via RELAY1 [--axports FILE]
//!   ax25addr constants [NAME]
//!   ax25addr ports [--axports FILE]
//!
//! Exit code 1 when the input is rejected (or `validate` finds it invalid).

use anyhow::Context;
use ax25addr::constants::{self, CONSTANTS};
use ax25addr::dump::{hex_string, parse_hex, sockaddr_dump};
use ax25addr::{
    decode_callsign_entry, encode_callsign_entry, parse_full_address, resolve_full_address,
    validate_raw_address, AxPorts, ADDRESS_LEN,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// AX.25 address codec.
#[derive(Parser, Debug)]
#[command(name = "ax25addr", version, about = "AX.25 callsign and socket address codec")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode CALL[-SSID] into a 7-byte station address.
    Encode { callsign: String },
    /// Decode a 7-byte station address given in hex.
    Decode { hex: String },
    /// Check whether hex bytes form a well-formed station address.
    Validate { hex: String },
    /// Parse a full address: PRIMARY [VIA] DIGI...
    Parse {
        #[arg(required = true, num_args = 1..)]
        address: Vec<String>,
        /// Dump the native full_sockaddr_ax25 bytes.
        #[arg(long)]
        native: bool,
        /// axports file used to resolve `port:NAME` (default: $AX25_AXPORTS or /etc/ax25/axports).
        #[arg(long)]
        axports: Option<PathBuf>,
    },
    /// List protocol constants, or print one by name.
    Constants { name: Option<String> },
    /// List configured AX.25 ports.
    Ports {
        #[arg(long)]
        axports: Option<PathBuf>,
    },
}

fn load_ports(path: Option<PathBuf>) -> anyhow::Result<AxPorts> {
    let path = path.unwrap_or_else(AxPorts::default_path);
    AxPorts::load(&path).with_context(|| format!("reading {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    match args.command {
        Command::Encode { callsign } => {
            let bytes = encode_callsign_entry(&callsign)?;
            println!("{}", hex_string(&bytes));
        }
        Command::Decode { hex } => {
            let bytes = parse_hex(&hex)?;
            let record: [u8; ADDRESS_LEN] = bytes.as_slice().try_into().map_err(|_| {
                anyhow::anyhow!("expected {} bytes, got {}", ADDRESS_LEN, bytes.len())
            })?;
            println!("{}", decode_callsign_entry(&record));
        }
        Command::Validate { hex } => {
            let bytes = parse_hex(&hex)?;
            if validate_raw_address(&bytes) {
                println!("valid");
            } else {
                println!("invalid");
                std::process::exit(1);
            }
        }
        Command::Parse {
            address,
            native,
            axports,
        } => {
            let text = address.join(" ");
            let addr = if text.trim_start().starts_with(ax25addr::parser::PORT_PREFIX) {
                resolve_full_address(&text, &load_ports(axports)?)?
            } else {
                parse_full_address(&text)?
            };
            if native {
                println!("{}", sockaddr_dump(&addr));
            } else {
                println!("{}", addr);
            }
        }
        Command::Constants { name: Some(name) } => match constants::lookup(&name) {
            Some(value) => println!("{}", value),
            None => anyhow::bail!("unknown constant {}", name),
        },
        Command::Constants { name: None } => {
            for c in CONSTANTS {
                println!("{:<20} {:>8}  {:?}", c.name, c.value, c.group);
            }
        }
        Command::Ports { axports } => {
            let ports = load_ports(axports)?;
            for p in ports.iter() {
                println!(
                    "{:<10} {:<10} speed={} paclen={} window={}  {}",
                    p.name, p.callsign, p.speed, p.paclen, p.window, p.description
                );
            }
        }
    }
    Ok(())
}
