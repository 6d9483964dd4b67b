//! Frame fuzz target: feed arbitrary bytes to the address-field decoder and the native
//! socket address decoder. Neither may panic.
//! Build with: cargo fuzz run frame_fuzz (requires nightly and cargo fuzz).

#![cfg_attr(fuzzing, no_main)]

#[cfg(fuzzing)]
use libfuzzer_sys::fuzz_target;

#[cfg(fuzzing)]
fuzz_target!(|data: &[u8]| {
    if let Ok((field, used)) = ax25addr::decode_address_field(data) {
        assert_eq!(used, field.encoded_len());
    }
    let _ = ax25addr::FullSockAddr::from_bytes(data);
    let _ = ax25addr::validate_raw_address(data);
});

#[cfg(not(fuzzing))]
fn main() {
    eprintln!("Build with: cargo fuzz run frame_fuzz");
}
