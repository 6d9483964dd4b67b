//! Parse full address strings (`PRIMARY [VIA] DIGI1,DIGI2,...`) using PEST.

use crate::address::StationAddress;
use crate::axports::AxPorts;
use crate::codec::AddressError;
use crate::constants::AX25_MAX_DIGIS;
use crate::sockaddr::FullSockAddr;
use pest::error::LineColLocation;
use pest::Parser;
use pest_derive::Parser as PestParser;

#[derive(PestParser)]
#[grammar = "grammar.pest"]
struct AddressListParser;

/// Prefix of a primary entry naming an axports port instead of a callsign.
pub const PORT_PREFIX: &str = "port:";

/// Parse a full socket address: one primary entry followed by up to 8 digipeaters.
///
/// Entries are `CALL` or `CALL-SSID`, separated by commas and/or blanks; `VIA` (or `V`)
/// may follow the primary.
///
/// ```
/// use ax25addr::parse_full_address;
///
/// let addr = parse_full_address("N0CALL via RELAY1,RELAY2-3").unwrap();
/// assert_eq!(addr.primary().to_string(), "N0CALL");
/// assert_eq!(addr.digipeaters().len(), 2);
/// ```
pub fn parse_full_address(text: &str) -> Result<FullSockAddr, AddressError> {
    let (primary, digipeaters) = split_address_list(text)?;
    let primary = StationAddress::parse(primary)?;
    build(primary, &digipeaters)
}

/// Like [`parse_full_address`], but a primary written `port:NAME` is replaced by the
/// callsign of that axports port.
pub fn resolve_full_address(text: &str, ports: &AxPorts) -> Result<FullSockAddr, AddressError> {
    let (primary, digipeaters) = split_address_list(text)?;
    let primary = match primary.strip_prefix(PORT_PREFIX) {
        Some(name) => ports.callsign_of(name)?,
        None => StationAddress::parse(primary)?,
    };
    build(primary, &digipeaters)
}

fn build(primary: StationAddress, digipeaters: &[&str]) -> Result<FullSockAddr, AddressError> {
    let digipeaters = digipeaters
        .iter()
        .map(|d| StationAddress::parse(d))
        .collect::<Result<Vec<_>, _>>()?;
    FullSockAddr::new(primary, digipeaters)
}

/// Split into primary and digipeater entries without checking entry syntax.
/// The digipeater count is checked here, before any entry is encoded.
pub fn split_address_list(text: &str) -> Result<(&str, Vec<&str>), AddressError> {
    let mut pairs = AddressListParser::parse(Rule::address_list, text).map_err(|e| {
        let column = match e.line_col {
            LineColLocation::Pos((_, c)) => c,
            LineColLocation::Span((_, c), _) => c,
        };
        AddressError::invalid(text, format!("syntax error at column {}", column))
    })?;
    let list = pairs
        .next()
        .ok_or_else(|| AddressError::invalid(text, "empty address"))?;

    let mut primary = None;
    let mut digipeaters = Vec::new();
    for inner in list.into_inner() {
        match inner.as_rule() {
            Rule::primary => primary = Some(inner.as_str()),
            Rule::digipeater => digipeaters.push(inner.as_str()),
            _ => {}
        }
    }
    let primary = primary.ok_or_else(|| AddressError::invalid(text, "missing primary address"))?;
    if digipeaters.len() > AX25_MAX_DIGIS {
        return Err(AddressError::TooManyDigipeaters {
            count: digipeaters.len(),
        });
    }
    Ok((primary, digipeaters))
}
