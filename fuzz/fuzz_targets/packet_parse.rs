#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: strict single-packet parsing.
//
// Catches bugs in:
// - Short-slice handling in accessors
// - Marker and length checks
// - Both checksum variants
fuzz_target!(|data: &[u8]| {
    for variant in [
        acaia_wire::ChecksumVariant::Split,
        acaia_wire::ChecksumVariant::Sum,
    ] {
        let valid = acaia_wire::checksum::validate(data, variant);
        if let Ok(packet) = acaia_wire::Packet::parse(data, variant) {
            assert!(valid);
            assert_eq!(packet.as_bytes(), data);
            let _ = acaia_decoder::dispatch(&packet);
        }
    }

    let view = acaia_wire::Packet::from_framed(data.to_vec());
    let _ = (view.body(), view.payload(), view.checksum_tail());
});
