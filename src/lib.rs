//! # ax25addr — AX.25 station address codec
//!
//! Converts between the human-readable callsign notation used on packet radio
//! (`CALL-SSID`, optionally followed by a digipeater path) and the fixed-width binary
//! address records used on the wire and by the Linux AX.25 socket layer.
//!
//! ## Station address (7 bytes)
//!
//! ```text
//! +---+---+---+---+---+---+------------------------+
//! | C | A | L | L | S | P | C R R S S S S E        |
//! +---+---+---+---+---+---+------------------------+
//!   callsign, space-padded   bit 7 C/R or H, bits 6..5 reserved (1),
//!                            bits 4..1 SSID, bit 0 extension
//! ```
//!
//! ## Full socket address
//!
//! A primary station plus up to 8 digipeaters, written `N0CALL-1 VIA RELAY1,RELAY2`
//! (commas and/or blanks; `VIA` optional). [`FullSockAddr::to_bytes`] produces the native
//! `full_sockaddr_ax25` layout for `bind`/`connect`.
//!
//! ## Usage
//!
//! ```
//! use ax25addr::{encode_callsign_entry, decode_callsign_entry, parse_full_address};
//!
//! let bytes = encode_callsign_entry("N0CALL-5").unwrap();
//! assert_eq!(decode_callsign_entry(&bytes), "N0CALL-5");
//!
//! let addr = parse_full_address("N0CALL,RELAY1,RELAY2").unwrap();
//! assert_eq!(addr.family(), ax25addr::constants::AF_AX25);
//! assert_eq!(addr.digipeaters()[1].to_string(), "RELAY2");
//! ```

pub mod address;
pub mod axports;
pub mod codec;
pub mod constants;
pub mod dump;
pub mod frame;
pub mod parser;
pub mod sockaddr;

/// Crate version, as published.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use address::StationAddress;
pub use axports::{AxPort, AxPorts};
pub use codec::{
    decode_callsign_entry, encode_callsign_entry, validate_raw_address, AddressError,
    ADDRESS_LEN,
};
pub use frame::{decode_address_field, AddressField, FrameAddress};
pub use parser::{parse_full_address, resolve_full_address};
pub use sockaddr::FullSockAddr;
