//! Print the address field of every AX.25 frame in a pcap or pcapng capture.
//!
//! Supported link types: AX25 (3, raw frames) and AX25_KISS (202, one KISS command byte
//! before the frame). Other packets are counted and skipped.
//!
//! Usage:
//!   decode_pcap [--verbose] [--frame=N] FILE

use ax25addr::dump::hex_string;
use ax25addr::frame::decode_address_field;
use clap::Parser;
use pcap_parser::pcapng::Block as PcapNgBlock;
use pcap_parser::traits::{PcapNGPacketBlock, PcapReaderIterator};
use pcap_parser::{Linktype, PcapBlockOwned, PcapError};
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

/// Assumed when a packet arrives before any header names its link type.
const LINKTYPE_AX25: Linktype = Linktype(3);

#[derive(Parser, Debug)]
#[command(name = "decode_pcap", version, about = "Print AX.25 address fields from a capture")]
struct Args {
    /// Also print the raw address bytes.
    #[arg(short, long)]
    verbose: bool,
    /// Only print this packet number (1-based).
    #[arg(long)]
    frame: Option<u64>,
    /// pcap or pcapng file.
    file: PathBuf,
}

#[derive(Default)]
struct Stats {
    packets: u64,
    ax25: u64,
    decoded: u64,
    rejected: u64,
}

fn ax25_payload(linktype: Linktype, data: &[u8]) -> Option<&[u8]> {
    match linktype.0 {
        3 => Some(data),
        // Low nibble of the KISS command byte 0 = data frame.
        202 => match data.split_first() {
            Some((cmd, rest)) if cmd & 0x0f == 0 => Some(rest),
            _ => None,
        },
        _ => None,
    }
}

fn process_packet(args: &Args, stats: &mut Stats, linktype: Linktype, data: &[u8]) {
    stats.packets += 1;
    let frame = match ax25_payload(linktype, data) {
        Some(f) => f,
        None => return,
    };
    stats.ax25 += 1;
    if args.frame.is_some_and(|n| n != stats.packets) {
        return;
    }
    match decode_address_field(frame) {
        Ok((field, used)) => {
            stats.decoded += 1;
            println!("#{} {}", stats.packets, field);
            if args.verbose {
                println!("  address: {}", hex_string(&frame[..used]));
            }
        }
        Err(e) => {
            stats.rejected += 1;
            tracing::debug!(packet = stats.packets, error = %e, "address field rejected");
            if args.verbose {
                println!("#{} <{}>", stats.packets, e);
            }
        }
    }
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
    let mut stats = Stats::default();

    // pcapng starts with the section header block type.
    let mut probe = [0u8; 4];
    {
        let mut f = File::open(&args.file)?;
        f.read_exact(&mut probe)?;
    }
    let file = File::open(&args.file)?;
    if probe == [0x0a, 0x0d, 0x0d, 0x0a] {
        run_pcapng(file, &args, &mut stats)?;
    } else {
        run_legacy_pcap(file, &args, &mut stats)?;
    }

    tracing::info!(
        file = %args.file.display(),
        packets = stats.packets,
        ax25 = stats.ax25,
        decoded = stats.decoded,
        rejected = stats.rejected,
        "capture scanned"
    );
    Ok(())
}

fn run_legacy_pcap<R: Read>(file: R, args: &Args, stats: &mut Stats) -> anyhow::Result<()> {
    let mut reader = pcap_parser::pcap::LegacyPcapReader::new(1 << 20, file)?;
    let mut linktype: Option<Linktype> = None;
    loop {
        match reader.next() {
            Ok((offset, block)) => {
                match block {
                    PcapBlockOwned::LegacyHeader(h) => {
                        tracing::debug!(linktype = h.network.0, "pcap header");
                        linktype = Some(h.network);
                    }
                    PcapBlockOwned::Legacy(b) => {
                        let lt = linktype.unwrap_or(LINKTYPE_AX25);
                        process_packet(args, stats, lt, b.data);
                    }
                    PcapBlockOwned::NG(_) => {}
                }
                reader.consume(offset);
            }
            Err(PcapError::Eof) => break,
            Err(PcapError::Incomplete(_)) => {
                reader
                    .refill()
                    .map_err(|e| anyhow::anyhow!("pcap refill error: {:?}", e))?;
            }
            Err(e) => return Err(anyhow::anyhow!("pcap read error: {:?}", e)),
        }
    }
    Ok(())
}

fn run_pcapng<R: Read>(file: R, args: &Args, stats: &mut Stats) -> anyhow::Result<()> {
    let mut reader = pcap_parser::pcapng::PcapNGReader::new(1 << 20, file)?;
    let mut if_linktypes: Vec<Linktype> = Vec::new();
    loop {
        match reader.next() {
            Ok((offset, block)) => {
                if let PcapBlockOwned::NG(b) = block {
                    match &b {
                        PcapNgBlock::InterfaceDescription(idb) => {
                            tracing::debug!(linktype = idb.linktype.0, "pcapng interface");
                            if_linktypes.push(idb.linktype);
                        }
                        PcapNgBlock::EnhancedPacket(epb) => {
                            let lt = if_linktypes
                                .get(epb.if_id as usize)
                                .copied()
                                .unwrap_or(LINKTYPE_AX25);
                            process_packet(args, stats, lt, epb.packet_data());
                        }
                        PcapNgBlock::SimplePacket(spb) => {
                            let lt = if_linktypes.first().copied().unwrap_or(LINKTYPE_AX25);
                            process_packet(args, stats, lt, spb.packet_data());
                        }
                        _ => {}
                    }
                }
                reader.consume(offset);
            }
            Err(PcapError::Eof) => break,
            Err(PcapError::Incomplete(_)) => {
                reader
                    .refill()
                    .map_err(|e| anyhow::anyhow!("pcapng refill error: {:?}", e))?;
            }
            Err(e) => return Err(anyhow::anyhow!("pcapng read error: {:?}", e)),
        }
    }
    Ok(())
}
