//! Full AX.25 socket address: primary station plus digipeater path.
//!
//! The native byte layout follows Linux `struct full_sockaddr_ax25`:
//!
//! ```text
//! offset  0  u16  sax25_family   (native endian)
//! offset  2  [7]  sax25_call     (characters shifted left one bit)
//! offset  9  [3]  padding
//! offset 12  i32  sax25_ndigis   (native endian)
//! offset 16  [8][7] fsa_digipeater
//! ```
//!
//! The first 16 bytes on their own are `struct sockaddr_ax25`.

use std::fmt;
use std::io::{Cursor, Read};

use byteorder::{NativeEndian, ReadBytesExt};

use crate::address::StationAddress;
use crate::codec::{AddressError, ADDRESS_LEN, CALLSIGN_LEN, SSID_MASK};
use crate::constants::{AF_AX25, AX25_MAX_DIGIS};

/// Size of `struct sockaddr_ax25`.
pub const SOCKADDR_AX25_LEN: usize = 16;
/// Size of `struct full_sockaddr_ax25`.
pub const FULL_SOCKADDR_AX25_LEN: usize = SOCKADDR_AX25_LEN + AX25_MAX_DIGIS * ADDRESS_LEN;

/// Primary address and ordered digipeater path (first entry is the first hop).
///
/// Immutable once built; at most [`AX25_MAX_DIGIS`] digipeaters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FullSockAddr {
    primary: StationAddress,
    digipeaters: Vec<StationAddress>,
}

impl FullSockAddr {
    pub fn new(
        primary: StationAddress,
        digipeaters: Vec<StationAddress>,
    ) -> Result<Self, AddressError> {
        if digipeaters.len() > AX25_MAX_DIGIS {
            return Err(AddressError::TooManyDigipeaters {
                count: digipeaters.len(),
            });
        }
        Ok(Self {
            primary,
            digipeaters,
        })
    }

    /// Always [`AF_AX25`].
    pub fn family(&self) -> u16 {
        AF_AX25
    }

    /// A copy of the primary address.
    pub fn primary(&self) -> StationAddress {
        self.primary
    }

    pub fn digipeaters(&self) -> &[StationAddress] {
        &self.digipeaters
    }

    pub fn ndigis(&self) -> usize {
        self.digipeaters.len()
    }

    /// Native `full_sockaddr_ax25` bytes, ready for `bind`/`connect`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = self.to_short_bytes();
        for i in 0..AX25_MAX_DIGIS {
            match self.digipeaters.get(i) {
                Some(d) => write_native_call(&mut out, d),
                None => out.extend_from_slice(&[0u8; ADDRESS_LEN]),
            }
        }
        out
    }

    /// Native `sockaddr_ax25` bytes (family, primary and digipeater count only).
    pub fn to_short_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(FULL_SOCKADDR_AX25_LEN);
        out.extend_from_slice(&AF_AX25.to_ne_bytes());
        write_native_call(&mut out, &self.primary);
        out.extend_from_slice(&[0u8; 3]);
        out.extend_from_slice(&(self.digipeaters.len() as i32).to_ne_bytes());
        out
    }

    /// Decode a native `sockaddr_ax25` or `full_sockaddr_ax25`.
    ///
    /// A 16-byte buffer must carry zero digipeaters; otherwise the buffer must hold as
    /// many digipeater slots as `sax25_ndigis` announces.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AddressError> {
        let truncated = || {
            AddressError::invalid(
                crate::dump::hex_string(bytes),
                format!("truncated socket address ({} bytes)", bytes.len()),
            )
        };
        let mut r = Cursor::new(bytes);
        let family = r.read_u16::<NativeEndian>().map_err(|_| truncated())?;
        if family != AF_AX25 {
            return Err(AddressError::invalid(
                crate::dump::hex_string(bytes),
                format!("address family {} is not AF_AX25", family),
            ));
        }
        let primary = read_native_call(&mut r).map_err(|_| truncated())?;
        let mut pad = [0u8; 3];
        r.read_exact(&mut pad).map_err(|_| truncated())?;
        let ndigis = r.read_i32::<NativeEndian>().map_err(|_| truncated())?;
        if ndigis < 0 {
            return Err(AddressError::invalid(
                crate::dump::hex_string(bytes),
                format!("negative digipeater count {}", ndigis),
            ));
        }
        let ndigis = ndigis as usize;
        if ndigis > AX25_MAX_DIGIS {
            return Err(AddressError::TooManyDigipeaters { count: ndigis });
        }
        let digipeaters = (0..ndigis)
            .map(|_| read_native_call(&mut r))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| truncated())?;
        Self::new(primary, digipeaters)
    }
}

/// Kernel form: shifted characters, SSID bits only.
fn write_native_call(out: &mut Vec<u8>, addr: &StationAddress) {
    let mut call = addr.to_shifted();
    call[CALLSIGN_LEN] &= SSID_MASK;
    out.extend_from_slice(&call);
}

fn read_native_call(r: &mut Cursor<&[u8]>) -> std::io::Result<StationAddress> {
    let mut call = [0u8; ADDRESS_LEN];
    r.read_exact(&mut call)?;
    Ok(StationAddress::from_shifted(call).normalized())
}

impl fmt::Display for FullSockAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.primary)?;
        if !self.digipeaters.is_empty() {
            let path: Vec<String> = self.digipeaters.iter().map(|d| d.to_string()).collect();
            write!(f, " via {}", path.join(","))?;
        }
        Ok(())
    }
}
