#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: event record walker.
//
// Arbitrary payloads must never panic, and every record consumes at
// least two bytes, which bounds the output.
fuzz_target!(|data: &[u8]| {
    let out = acaia_decoder::decode_events(data);
    assert!(out.len() <= data.len() / 2);
});
