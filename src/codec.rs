//! Encode/decode single AX.25 station addresses.
//!
//! A station address is 7 bytes: the callsign left-justified and space-padded
//! in bytes 0..6, then one packed byte holding the SSID (bits 1..4), the two
//! reserved bits (5 and 6, always set), the extension bit (0) and the
//! command/response or has-been-repeated bit (7).

/// Number of callsign characters in an address.
pub const CALLSIGN_LEN: usize = 6;
/// Encoded size of one station address.
pub const ADDRESS_LEN: usize = 7;
/// Largest SSID that fits in the 4-bit field.
pub const MAX_SSID: u8 = 15;

/// SSID bits of the packed byte (after shifting left one).
pub const SSID_MASK: u8 = 0x1E;
/// Reserved bits, set on every encoded address.
pub const RESERVED_BITS: u8 = 0x60;
/// Extension bit: set on the last address of a list.
pub const EXTENSION_BIT: u8 = 0x01;
/// Command/response bit (destination/source) or has-been-repeated bit (digipeaters).
pub const CR_BIT: u8 = 0x80;

const PAD: u8 = b' ';

#[derive(Debug, thiserror::Error)]
pub enum AddressError {
    #[error("invalid address \"{value}\": {reason}")]
    InvalidAddressFormat { value: String, reason: String },
    #[error("too many digipeaters: {count} (at most {})", crate::constants::AX25_MAX_DIGIS)]
    TooManyDigipeaters { count: usize },
    #[error("address resolution failed: {source}")]
    AddressSyscall {
        #[from]
        source: std::io::Error,
    },
    #[error("unknown AX.25 port: {name}")]
    UnknownPort { name: String },
}

impl AddressError {
    pub(crate) fn invalid(value: impl Into<String>, reason: impl Into<String>) -> Self {
        AddressError::InvalidAddressFormat {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// The platform error code carried by [`AddressError::AddressSyscall`], if any.
    pub fn os_error_code(&self) -> Option<i32> {
        match self {
            AddressError::AddressSyscall { source } => source.raw_os_error(),
            _ => None,
        }
    }
}

/// Encode `CALL` or `CALL-SSID` into the 7-byte station address.
///
/// The callsign must be 1..=6 ASCII alphanumeric characters; case is kept as given.
/// The SSID, when present, must be a decimal number in 0..=15. The extension bit is
/// set on the result.
pub fn encode_callsign_entry(text: &str) -> Result<[u8; ADDRESS_LEN], AddressError> {
    if text.is_empty() {
        return Err(AddressError::invalid(text, "empty address"));
    }
    let (call, ssid) = match text.split_once('-') {
        Some((call, ssid_str)) => (call, parse_ssid(text, ssid_str)?),
        None => (text, 0),
    };
    encode_parts(call, ssid).map_err(|reason| AddressError::invalid(text, reason))
}

/// Encode an already split callsign and SSID. Returns the failure reason on error.
pub(crate) fn encode_parts(call: &str, ssid: u8) -> Result<[u8; ADDRESS_LEN], String> {
    if call.is_empty() {
        return Err("callsign is empty".to_string());
    }
    if call.len() > CALLSIGN_LEN {
        return Err(format!(
            "callsign has {} characters (at most {})",
            call.len(),
            CALLSIGN_LEN
        ));
    }
    if let Some(c) = call.chars().find(|c| !c.is_ascii_alphanumeric()) {
        return Err(format!("invalid character {:?} in callsign", c));
    }
    if ssid > MAX_SSID {
        return Err(format!("SSID {} out of range 0-{}", ssid, MAX_SSID));
    }
    let mut out = [PAD; ADDRESS_LEN];
    out[..call.len()].copy_from_slice(call.as_bytes());
    out[CALLSIGN_LEN] = RESERVED_BITS | ((ssid << 1) & SSID_MASK) | EXTENSION_BIT;
    Ok(out)
}

fn parse_ssid(text: &str, ssid_str: &str) -> Result<u8, AddressError> {
    if ssid_str.is_empty() {
        return Err(AddressError::invalid(text, "missing SSID after '-'"));
    }
    if !ssid_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AddressError::invalid(text, "SSID must be numeric"));
    }
    match ssid_str.parse::<u8>() {
        Ok(ssid) if ssid <= MAX_SSID => Ok(ssid),
        _ => Err(AddressError::invalid(
            text,
            format!("SSID {} out of range 0-{}", ssid_str, MAX_SSID),
        )),
    }
}

/// Decode a 7-byte station address into `CALL` or `CALL-SSID`.
///
/// Total: bytes are rendered as they are, only trailing pad spaces are removed and
/// the flag bits of byte 6 are ignored.
pub fn decode_callsign_entry(bytes: &[u8; ADDRESS_LEN]) -> String {
    let call: String = bytes[..CALLSIGN_LEN].iter().map(|&b| b as char).collect();
    let call = call.trim_end_matches(' ');
    match ssid_of(bytes) {
        0 => call.to_string(),
        ssid => format!("{}-{}", call, ssid),
    }
}

pub(crate) fn ssid_of(bytes: &[u8; ADDRESS_LEN]) -> u8 {
    (bytes[CALLSIGN_LEN] & SSID_MASK) >> 1
}

/// Check that the leading 7 bytes of `buf` form a well-formed station address:
/// an uppercase/digit callsign of at least one character, left-justified, padded
/// only with trailing spaces. The packed byte is not inspected.
pub fn validate_raw_address(buf: &[u8]) -> bool {
    if buf.len() < ADDRESS_LEN {
        return false;
    }
    let call = &buf[..CALLSIGN_LEN];
    let len = call.iter().position(|&b| b == PAD).unwrap_or(CALLSIGN_LEN);
    if len == 0 {
        return false;
    }
    call[..len]
        .iter()
        .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        && call[len..].iter().all(|&b| b == PAD)
}
