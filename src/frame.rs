//! Address field of on-air AX.25 frames.
//!
//! A frame starts with destination, source and up to 8 repeater addresses, each 7 bytes
//! with characters shifted left one bit. The extension bit marks the last address.
//! Bit 7 of the packed byte is the command/response bit on destination and source and
//! the has-been-repeated bit on repeaters. Nothing after the address field is read.

use std::fmt;

use crate::address::StationAddress;
use crate::codec::{
    AddressError, ADDRESS_LEN, CALLSIGN_LEN, CR_BIT, EXTENSION_BIT, RESERVED_BITS,
};
use crate::constants::AX25_MAX_DIGIS;
use crate::dump::hex_string;

/// One address of the field with its bit-7 flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameAddress {
    pub address: StationAddress,
    /// Command/response bit (destination, source) or has-been-repeated (repeaters).
    pub flag: bool,
}

impl FrameAddress {
    pub fn new(address: StationAddress, flag: bool) -> Self {
        FrameAddress {
            address: address.normalized(),
            flag,
        }
    }

    fn decode(chunk: &[u8]) -> Result<(Self, bool), AddressError> {
        let raw: [u8; ADDRESS_LEN] = chunk
            .try_into()
            .map_err(|_| AddressError::invalid(hex_string(chunk), "short address entry"))?;
        let packed = raw[CALLSIGN_LEN];
        let address = StationAddress::from_shifted(raw);
        Ok((
            FrameAddress::new(address, packed & CR_BIT != 0),
            packed & EXTENSION_BIT != 0,
        ))
    }

    fn encode(&self, last: bool, out: &mut Vec<u8>) {
        let mut raw = self.address.to_shifted();
        raw[CALLSIGN_LEN] &= !(CR_BIT | EXTENSION_BIT);
        raw[CALLSIGN_LEN] |= RESERVED_BITS;
        if self.flag {
            raw[CALLSIGN_LEN] |= CR_BIT;
        }
        if last {
            raw[CALLSIGN_LEN] |= EXTENSION_BIT;
        }
        out.extend_from_slice(&raw);
    }
}

/// Decoded address field of one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressField {
    pub destination: FrameAddress,
    pub source: FrameAddress,
    pub repeaters: Vec<FrameAddress>,
}

impl AddressField {
    /// Number of bytes the field occupies.
    pub fn encoded_len(&self) -> usize {
        (2 + self.repeaters.len()) * ADDRESS_LEN
    }

    /// Whether the frame is a command (destination C bit set, source C bit clear).
    pub fn is_command(&self) -> bool {
        self.destination.flag && !self.source.flag
    }

    /// Encode with reserved bits set and the extension bit on the last address only.
    pub fn encode(&self) -> Result<Vec<u8>, AddressError> {
        if self.repeaters.len() > AX25_MAX_DIGIS {
            return Err(AddressError::TooManyDigipeaters {
                count: self.repeaters.len(),
            });
        }
        let mut out = Vec::with_capacity(self.encoded_len());
        self.destination.encode(false, &mut out);
        self.source.encode(self.repeaters.is_empty(), &mut out);
        let last = self.repeaters.len().saturating_sub(1);
        for (i, r) in self.repeaters.iter().enumerate() {
            r.encode(i == last, &mut out);
        }
        Ok(out)
    }
}

/// Decode the address field at the start of `bytes`. Returns the field and the number of
/// bytes consumed.
pub fn decode_address_field(bytes: &[u8]) -> Result<(AddressField, usize), AddressError> {
    let mut entries = Vec::new();
    let mut offset = 0;
    loop {
        let end = offset + ADDRESS_LEN;
        if end > bytes.len() {
            return Err(AddressError::invalid(
                hex_string(bytes),
                "address field ends before the extension bit",
            ));
        }
        let (entry, last) = FrameAddress::decode(&bytes[offset..end])?;
        entries.push(entry);
        offset = end;
        if entries.len() > 2 + AX25_MAX_DIGIS {
            return Err(AddressError::TooManyDigipeaters {
                count: entries.len() - 2,
            });
        }
        if last {
            break;
        }
    }
    let missing = || {
        AddressError::invalid(
            hex_string(bytes),
            "address field needs a destination and a source",
        )
    };
    let mut it = entries.into_iter();
    let destination = it.next().ok_or_else(missing)?;
    let source = it.next().ok_or_else(missing)?;
    Ok((
        AddressField {
            destination,
            source,
            repeaters: it.collect(),
        },
        offset,
    ))
}

/// TNC2 monitor notation: `SRC>DEST,DIGI1*,DIGI2`. A `*` follows the last repeater that
/// has repeated the frame.
impl fmt::Display for AddressField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}>{}", self.source.address, self.destination.address)?;
        let last_repeated = self.repeaters.iter().rposition(|r| r.flag);
        for (i, r) in self.repeaters.iter().enumerate() {
            write!(f, ",{}", r.address)?;
            if Some(i) == last_repeated {
                f.write_str("*")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(s: &str) -> StationAddress {
        s.parse().unwrap()
    }

    #[test]
    fn decode_aprs_header() {
        let mut raw = vec![0x82, 0xA0, 0xA4, 0xA6, 0x40, 0x40, 0x60];
        raw.extend_from_slice(&[0x9C, 0x60, 0x86, 0x82, 0x98, 0x98, 0xE1]);
        raw.extend_from_slice(&[0x03, 0xF0]);
        let (field, used) = decode_address_field(&raw).unwrap();
        assert_eq!(used, 14);
        assert_eq!(field.destination.address, call("APRS"));
        assert_eq!(field.source.address, call("N0CALL"));
        assert!(field.source.flag);
        assert!(!field.destination.flag);
        assert!(field.repeaters.is_empty());
        assert_eq!(field.to_string(), "N0CALL>APRS");
    }

    #[test]
    fn encode_sets_extension_on_last_only() {
        let field = AddressField {
            destination: FrameAddress::new(call("APRS"), true),
            source: FrameAddress::new(call("N0CALL-7"), false),
            repeaters: vec![
                FrameAddress::new(call("WIDE1"), true),
                FrameAddress::new(call("WIDE2-2"), false),
            ],
        };
        let bytes = field.encode().unwrap();
        assert_eq!(bytes.len(), 28);
        for (i, chunk) in bytes.chunks(7).enumerate() {
            assert_eq!(chunk[6] & EXTENSION_BIT != 0, i == 3, "entry {}", i);
            assert_eq!(chunk[6] & 0x60, 0x60);
        }
        let (back, used) = decode_address_field(&bytes).unwrap();
        assert_eq!(used, 28);
        assert_eq!(back, field);
        assert!(back.is_command());
        assert_eq!(back.to_string(), "N0CALL-7>APRS,WIDE1*,WIDE2-2");
    }

    #[test]
    fn encode_sets_reserved_bits_on_raw_addresses() {
        let field = AddressField {
            destination: FrameAddress {
                address: StationAddress::from_bytes(*b"ABC   \x04"),
                flag: false,
            },
            source: FrameAddress {
                address: StationAddress::from_bytes(*b"N0CALL\x00"),
                flag: true,
            },
            repeaters: vec![],
        };
        let bytes = field.encode().unwrap();
        assert_eq!(bytes[6], RESERVED_BITS | 0x04);
        assert_eq!(bytes[13], CR_BIT | RESERVED_BITS | EXTENSION_BIT);
        let (back, _) = decode_address_field(&bytes).unwrap();
        assert_eq!(back.destination.address, call("ABC-2"));
    }

    #[test]
    fn truncated_field() {
        let raw = [0x82, 0xA0, 0xA4, 0xA6, 0x40, 0x40, 0x60, 0x9C, 0x60];
        assert!(matches!(
            decode_address_field(&raw),
            Err(AddressError::InvalidAddressFormat { .. })
        ));
    }

    #[test]
    fn single_address_rejected() {
        let raw = [0x82, 0xA0, 0xA4, 0xA6, 0x40, 0x40, 0x61];
        assert!(decode_address_field(&raw).is_err());
    }

    #[test]
    fn too_many_repeaters() {
        let entry = call("D1").to_shifted();
        let mut raw = Vec::new();
        for _ in 0..11 {
            let mut e = entry;
            e[6] &= !EXTENSION_BIT;
            raw.extend_from_slice(&e);
        }
        raw.extend_from_slice(&entry);
        assert!(matches!(
            decode_address_field(&raw),
            Err(AddressError::TooManyDigipeaters { .. })
        ));
    }
}
