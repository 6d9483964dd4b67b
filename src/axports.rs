//! AX.25 port configuration (`/etc/ax25/axports`).
//!
//! One port per line: `name callsign speed paclen window description...`.
//! Blank lines and lines starting with `#` are ignored.
//!
//! | Variable       | Default             | Description               |
//! |----------------|---------------------|---------------------------|
//! | `AX25_AXPORTS` | `/etc/ax25/axports` | path read by [`AxPorts::load_default`] |

use std::path::{Path, PathBuf};

use crate::address::StationAddress;
use crate::codec::AddressError;

/// Default location of the port file.
pub const DEFAULT_AXPORTS_PATH: &str = "/etc/ax25/axports";
/// Environment variable overriding [`DEFAULT_AXPORTS_PATH`].
pub const AXPORTS_ENV: &str = "AX25_AXPORTS";

/// One configured port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxPort {
    pub name: String,
    pub callsign: StationAddress,
    /// Serial speed in baud; 0 lets the driver choose.
    pub speed: u32,
    pub paclen: u16,
    pub window: u8,
    pub description: String,
}

/// All ports of an axports file, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AxPorts {
    ports: Vec<AxPort>,
}

impl AxPorts {
    /// Path from `AX25_AXPORTS`, else the system default.
    pub fn default_path() -> PathBuf {
        std::env::var_os(AXPORTS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_AXPORTS_PATH))
    }

    pub fn load_default() -> Result<Self, AddressError> {
        Self::load(Self::default_path())
    }

    /// Read and parse a port file. I/O failures surface as [`AddressError::AddressSyscall`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AddressError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let ports = Self::parse(&text)?;
        tracing::debug!(path = %path.display(), ports = ports.len(), "loaded axports");
        Ok(ports)
    }

    pub fn parse(text: &str) -> Result<Self, AddressError> {
        let mut ports: Vec<AxPort> = Vec::new();
        for (i, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let port = parse_line(line).map_err(|reason| {
                AddressError::invalid(line, format!("axports line {}: {}", i + 1, reason))
            })?;
            if ports.iter().any(|p| p.name == port.name) {
                return Err(AddressError::invalid(
                    line,
                    format!("axports line {}: duplicate port {}", i + 1, port.name),
                ));
            }
            ports.push(port);
        }
        Ok(AxPorts { ports })
    }

    pub fn get(&self, name: &str) -> Option<&AxPort> {
        self.ports.iter().find(|p| p.name == name)
    }

    /// Callsign of a port, [`AddressError::UnknownPort`] if there is no such port.
    pub fn callsign_of(&self, name: &str) -> Result<StationAddress, AddressError> {
        self.get(name)
            .map(|p| p.callsign)
            .ok_or_else(|| AddressError::UnknownPort {
                name: name.to_string(),
            })
    }

    /// First port bound to `callsign`.
    pub fn port_for(&self, callsign: &StationAddress) -> Option<&AxPort> {
        self.ports.iter().find(|p| p.callsign == *callsign)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AxPort> {
        self.ports.iter()
    }

    pub fn len(&self) -> usize {
        self.ports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }
}

fn parse_line(line: &str) -> Result<AxPort, String> {
    let mut fields = line.split_whitespace();
    let mut next = |what: &str| fields.next().ok_or_else(|| format!("missing {}", what));
    let name = next("port name")?.to_string();
    let callsign = next("callsign")?;
    let callsign = StationAddress::parse(callsign).map_err(|e| e.to_string())?;
    let speed = next("speed")?;
    let speed: u32 = speed
        .parse()
        .map_err(|_| format!("invalid speed {:?}", speed))?;
    let paclen = next("paclen")?;
    let paclen: u16 = paclen
        .parse()
        .map_err(|_| format!("invalid paclen {:?}", paclen))?;
    let window = next("window")?;
    let window: u8 = window
        .parse()
        .map_err(|_| format!("invalid window {:?}", window))?;
    let description = fields.collect::<Vec<_>>().join(" ");
    Ok(AxPort {
        name,
        callsign,
        speed,
        paclen,
        window,
        description,
    })
}
