//! Station address value type (one callsign + SSID, 7 encoded bytes).

use std::fmt;
use std::str::FromStr;

use crate::codec::{
    self, AddressError, ADDRESS_LEN, CALLSIGN_LEN, EXTENSION_BIT, RESERVED_BITS, SSID_MASK,
};
use crate::dump::hex_string;

/// One AX.25 station address.
///
/// Holds the encoded 7-byte record; equality and hashing compare those bytes.
/// There are no setters: a different address is a different value.
///
/// # Examples
///
/// ```
/// use ax25addr::StationAddress;
///
/// let addr: StationAddress = "N0CALL-5".parse().unwrap();
/// assert_eq!(addr.callsign(), "N0CALL");
/// assert_eq!(addr.ssid(), 5);
/// assert_eq!(addr.to_string(), "N0CALL-5");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct StationAddress([u8; ADDRESS_LEN]);

impl StationAddress {
    /// Build from a callsign and an SSID (0..=15).
    pub fn new(callsign: &str, ssid: u8) -> Result<Self, AddressError> {
        codec::encode_parts(callsign, ssid)
            .map(Self)
            .map_err(|reason| AddressError::invalid(format!("{}-{}", callsign, ssid), reason))
    }

    /// Parse `CALL` or `CALL-SSID`.
    pub fn parse(text: &str) -> Result<Self, AddressError> {
        codec::encode_callsign_entry(text).map(Self)
    }

    /// Wrap an encoded record as-is. Any 7 bytes are accepted.
    pub fn from_bytes(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Decode the kernel/on-air form, where callsign characters are shifted left one bit.
    /// Flag bits of the packed byte are kept.
    pub fn from_shifted(bytes: [u8; ADDRESS_LEN]) -> Self {
        let mut out = bytes;
        for b in &mut out[..CALLSIGN_LEN] {
            *b = (*b >> 1) & 0x7F;
        }
        Self(out)
    }

    /// Callsign characters shifted left one bit, packed byte unchanged.
    pub fn to_shifted(&self) -> [u8; ADDRESS_LEN] {
        let mut out = self.0;
        for b in &mut out[..CALLSIGN_LEN] {
            *b <<= 1;
        }
        out
    }

    /// The same address with only the SSID, reserved and extension bits in the packed byte.
    pub fn normalized(&self) -> Self {
        let mut out = self.0;
        out[CALLSIGN_LEN] = RESERVED_BITS | (out[CALLSIGN_LEN] & SSID_MASK) | EXTENSION_BIT;
        Self(out)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// Callsign without padding.
    pub fn callsign(&self) -> String {
        self.0[..CALLSIGN_LEN]
            .iter()
            .map(|&b| b as char)
            .collect::<String>()
            .trim_end_matches(' ')
            .to_string()
    }

    pub fn ssid(&self) -> u8 {
        codec::ssid_of(&self.0)
    }

    /// Whether the record passes [`codec::validate_raw_address`].
    pub fn is_valid(&self) -> bool {
        codec::validate_raw_address(&self.0)
    }
}

impl fmt::Display for StationAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&codec::decode_callsign_entry(&self.0))
    }
}

impl fmt::Debug for StationAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationAddress([{}] {:?})", hex_string(&self.0), self.to_string())
    }
}

impl FromStr for StationAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<[u8; ADDRESS_LEN]> for StationAddress {
    fn from(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for StationAddress {
    type Error = AddressError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; ADDRESS_LEN] = bytes.try_into().map_err(|_| {
            AddressError::invalid(
                hex_string(bytes),
                format!("expected {} bytes, got {}", ADDRESS_LEN, bytes.len()),
            )
        })?;
        Ok(Self(arr))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for StationAddress {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for StationAddress {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
