//! Address fuzz target: feed arbitrary text to the entry codec and the full address parser.
//! Neither may panic; whatever parses must decode back to a string that parses again.
//! Build with: cargo fuzz run address_fuzz (requires nightly and cargo fuzz).

#![cfg_attr(fuzzing, no_main)]

#[cfg(fuzzing)]
use libfuzzer_sys::fuzz_target;

#[cfg(fuzzing)]
fuzz_target!(|data: &[u8]| {
    let s = match std::str::from_utf8(data) {
        Ok(x) => x,
        Err(_) => return,
    };
    if let Ok(bytes) = ax25addr::encode_callsign_entry(s) {
        let text = ax25addr::decode_callsign_entry(&bytes);
        assert!(ax25addr::encode_callsign_entry(&text).is_ok());
    }
    if let Ok(addr) = ax25addr::parse_full_address(s) {
        let back = ax25addr::FullSockAddr::from_bytes(&addr.to_bytes());
        assert_eq!(back.ok(), Some(addr));
    }
});

#[cfg(not(fuzzing))]
fn main() {
    eprintln!("Build with: cargo fuzz run address_fuzz");
}
