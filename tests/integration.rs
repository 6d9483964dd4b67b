//! Integration tests: entry encode/decode, validation, full addresses, native layout,
//! frame address fields and axports resolution.

use ax25addr::codec::{RESERVED_BITS, SSID_MASK};
use ax25addr::constants::{AF_AX25, AX25_MAX_DIGIS};
use ax25addr::sockaddr::FULL_SOCKADDR_AX25_LEN;
use ax25addr::{
    decode_address_field, decode_callsign_entry, encode_callsign_entry, parse_full_address,
    resolve_full_address, validate_raw_address, AddressError, AxPorts, FullSockAddr,
    StationAddress,
};
use std::io::Write;

const CALLSIGNS: &[&str] = &["A", "N0", "AB1", "N0CA", "VK2AB", "N0CALL", "123456", "ZZZZZZ"];

fn canonical(call: &str, ssid: u8) -> String {
    if ssid == 0 {
        call.to_string()
    } else {
        format!("{}-{}", call, ssid)
    }
}

#[test]
fn test_version() {
    assert_eq!(ax25addr::VERSION, env!("CARGO_PKG_VERSION"));
    assert_eq!(ax25addr::VERSION.split('.').count(), 3);
    assert!(ax25addr::VERSION
        .split('.')
        .all(|part| part.parse::<u32>().is_ok()));
}

// ==================== Entry codec ====================

#[test]
fn test_roundtrip_all_ssids() {
    for call in CALLSIGNS {
        for ssid in 0..=15u8 {
            let text = format!("{}-{}", call, ssid);
            let bytes = encode_callsign_entry(&text).expect("encode");
            assert_eq!(decode_callsign_entry(&bytes), canonical(call, ssid));
        }
    }
}

#[test]
fn test_reencode_canonical_is_stable() {
    for call in CALLSIGNS {
        for ssid in [0u8, 1, 9, 10, 15] {
            let first = decode_callsign_entry(&encode_callsign_entry(&canonical(call, ssid)).unwrap());
            let second = decode_callsign_entry(&encode_callsign_entry(&first).unwrap());
            assert_eq!(first, second);
        }
    }
}

#[test]
fn test_six_chars_ssid_15_has_no_padding() {
    let bytes = encode_callsign_entry("N0CALL-15").expect("encode");
    assert_eq!(bytes.len(), 7);
    assert!(!bytes[..6].contains(&b' '));
    assert_eq!((bytes[6] & SSID_MASK) >> 1, 15);
    assert_eq!(bytes[6] & RESERVED_BITS, RESERVED_BITS);
}

#[test]
fn test_boundaries_rejected() {
    assert!(matches!(
        encode_callsign_entry("N0CALLX"),
        Err(AddressError::InvalidAddressFormat { .. })
    ));
    assert!(matches!(
        encode_callsign_entry("N0CALL-16"),
        Err(AddressError::InvalidAddressFormat { .. })
    ));
    assert!(matches!(
        encode_callsign_entry(""),
        Err(AddressError::InvalidAddressFormat { .. })
    ));
}

#[test]
fn test_scenario_n0call_5() {
    let bytes = encode_callsign_entry("N0CALL-5").expect("encode");
    assert_eq!(&bytes[..6], &[0x4E, 0x30, 0x43, 0x41, 0x4C, 0x4C]);
    // (5 << 1) | 1, plus the reserved bits
    assert_eq!(bytes[6] & !RESERVED_BITS, 0x0B);
}

#[test]
fn test_scenario_decode_zero_ssid() {
    let bytes = encode_callsign_entry("N0CALL").unwrap();
    assert_eq!(decode_callsign_entry(&bytes), "N0CALL");
}

#[test]
fn test_validate() {
    assert!(!validate_raw_address(&[0u8; 7]));
    assert!(!validate_raw_address(&[]));
    assert!(validate_raw_address(&encode_callsign_entry("N0CALL-5").unwrap()));
    assert!(validate_raw_address(&encode_callsign_entry("AB1").unwrap()));
}

#[test]
fn test_error_messages() {
    let err = encode_callsign_entry("N0CALL-99").unwrap_err();
    assert_eq!(err.to_string(), "invalid address \"N0CALL-99\": SSID 99 out of range 0-15");
    let err = parse_full_address("A B C D E F G H I J").unwrap_err();
    assert_eq!(err.to_string(), "too many digipeaters: 9 (at most 8)");
}

// ==================== Full address ====================

#[test]
fn test_scenario_full_address() {
    let addr = parse_full_address("N0CALL,RELAY1,RELAY2").expect("parse");
    assert_eq!(addr.family(), AF_AX25);
    assert_eq!(addr.primary().to_string(), "N0CALL");
    let digis: Vec<String> = addr.digipeaters().iter().map(|d| d.to_string()).collect();
    assert_eq!(digis, vec!["RELAY1", "RELAY2"]);
}

#[test]
fn test_eight_digipeaters_ok_nine_rejected() {
    let eight = "N0CALL D1 D2 D3 D4 D5 D6 D7 D8";
    let addr = parse_full_address(eight).expect("parse");
    assert_eq!(addr.ndigis(), AX25_MAX_DIGIS);
    assert_eq!(addr.digipeaters()[7].to_string(), "D8");

    let nine = "N0CALL D1 D2 D3 D4 D5 D6 D7 D8 D9";
    assert!(matches!(
        parse_full_address(nine),
        Err(AddressError::TooManyDigipeaters { count: 9 })
    ));
}

#[test]
fn test_bad_entry_in_path() {
    assert!(matches!(
        parse_full_address("N0CALL VIA RELAY1 BADCALL1"),
        Err(AddressError::InvalidAddressFormat { .. })
    ));
    assert!(matches!(
        parse_full_address("N0CALL-16"),
        Err(AddressError::InvalidAddressFormat { .. })
    ));
}

#[test]
fn test_primary_is_a_copy() {
    let addr = parse_full_address("N0CALL-3 VIA RELAY").unwrap();
    let mut primary = addr.primary();
    assert_eq!(primary, StationAddress::parse("N0CALL-3").unwrap());
    primary = StationAddress::parse("OTHER").unwrap();
    assert_eq!(primary.to_string(), "OTHER");
    assert_eq!(addr.primary().to_string(), "N0CALL-3");
}

#[test]
fn test_native_bytes_roundtrip() {
    let addr = parse_full_address("N0CALL-3 VIA RELAY1,RELAY2-7").unwrap();
    let bytes = addr.to_bytes();
    assert_eq!(bytes.len(), FULL_SOCKADDR_AX25_LEN);
    let back = FullSockAddr::from_bytes(&bytes).expect("from_bytes");
    assert_eq!(back, addr);
    assert_eq!(back.to_string(), "N0CALL-3 via RELAY1,RELAY2-7");
}

// ==================== Frame address field ====================

#[test]
fn test_frame_address_field_from_socket_path() {
    let addr = parse_full_address("APRS VIA WIDE1-1").unwrap();
    let field = ax25addr::AddressField {
        destination: ax25addr::FrameAddress::new(addr.primary(), true),
        source: ax25addr::FrameAddress::new(StationAddress::parse("N0CALL-9").unwrap(), false),
        repeaters: addr
            .digipeaters()
            .iter()
            .map(|d| ax25addr::FrameAddress::new(*d, false))
            .collect(),
    };
    let mut bytes = field.encode().expect("encode");
    bytes.extend_from_slice(&[0x03, 0xF0, b'!']);
    let (decoded, used) = decode_address_field(&bytes).expect("decode");
    assert_eq!(used, 21);
    assert_eq!(decoded.to_string(), "N0CALL-9>APRS,WIDE1-1");
}

// ==================== axports ====================

#[test]
fn test_axports_file_resolution() {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    writeln!(file, "# test ports").unwrap();
    writeln!(file, "radio N0CALL-1 9600 255 2 VHF").unwrap();
    file.flush().unwrap();

    let ports = AxPorts::load(file.path()).expect("load");
    let addr = resolve_full_address("port:radio VIA RELAY", &ports).expect("resolve");
    assert_eq!(addr.primary().to_string(), "N0CALL-1");
    assert_eq!(addr.ndigis(), 1);

    let plain = resolve_full_address("N0CALL-2", &ports).expect("resolve");
    assert_eq!(plain.primary().to_string(), "N0CALL-2");

    assert!(matches!(
        resolve_full_address("port:hf", &ports),
        Err(AddressError::UnknownPort { .. })
    ));
}

#[test]
fn test_axports_env_override() {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    writeln!(file, "hf N0CALL-3 0 128 4 HF 300 baud").unwrap();
    file.flush().unwrap();

    // Only test in this binary touching AX25_AXPORTS.
    std::env::set_var(ax25addr::axports::AXPORTS_ENV, file.path());
    assert_eq!(AxPorts::default_path(), file.path());
    let ports = AxPorts::load_default().expect("load_default");
    std::env::remove_var(ax25addr::axports::AXPORTS_ENV);

    assert_eq!(ports.len(), 1);
    assert_eq!(ports.callsign_of("hf").unwrap().to_string(), "N0CALL-3");
    assert_eq!(
        AxPorts::default_path(),
        std::path::PathBuf::from(ax25addr::axports::DEFAULT_AXPORTS_PATH)
    );
}

#[test]
fn test_axports_missing_file_is_syscall_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = AxPorts::load(dir.path().join("axports")).unwrap_err();
    assert!(matches!(err, AddressError::AddressSyscall { .. }));
    assert!(err.os_error_code().is_some());
}
