//! Hex formatting for raw address records (Debug output, command-line tools).

use crate::codec::AddressError;
use crate::sockaddr::FullSockAddr;

/// Bytes as space-separated lowercase hex pairs.
pub fn hex_string(b: &[u8]) -> String {
    b.iter().map(|x| format!("{:02x}", x)).collect::<Vec<_>>().join(" ")
}

/// Parse hex bytes. Whitespace, `:` and a leading `0x` are ignored.
pub fn parse_hex(s: &str) -> Result<Vec<u8>, AddressError> {
    let s = s.trim();
    let s = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
    let digits: Vec<u8> = s
        .bytes()
        .filter(|b| !b.is_ascii_whitespace() && *b != b':')
        .collect();
    if digits.len() % 2 != 0 {
        return Err(AddressError::invalid(s, "odd number of hex digits"));
    }
    digits
        .chunks(2)
        .map(|pair| {
            let hi = hex_value(pair[0]);
            let lo = hex_value(pair[1]);
            match (hi, lo) {
                (Some(hi), Some(lo)) => Ok((hi << 4) | lo),
                _ => Err(AddressError::invalid(s, "invalid hex digit")),
            }
        })
        .collect()
}

fn hex_value(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// Multi-line dump of a socket address and its native layout, 16 bytes per row.
pub fn sockaddr_dump(addr: &FullSockAddr) -> String {
    let mut lines = vec![
        format!("family: {}", addr.family()),
        format!("primary: {} [{}]", addr.primary(), hex_string(addr.primary().as_bytes())),
    ];
    for (i, d) in addr.digipeaters().iter().enumerate() {
        lines.push(format!("digipeater[{}]: {} [{}]", i, d, hex_string(d.as_bytes())));
    }
    const COLS: usize = 16;
    for (i, chunk) in addr.to_bytes().chunks(COLS).enumerate() {
        lines.push(format!("  offset {:3}: {}", i * COLS, hex_string(chunk)));
    }
    lines.join("\n")
}
