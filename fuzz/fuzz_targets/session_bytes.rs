#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: full session over an arbitrarily chunked stream.
//
// The first input byte picks the chunk size; the rest is the stream.
// Feeding it whole and in chunks must give identical events, and every
// emitted packet must carry a valid checksum.
fuzz_target!(|data: &[u8]| {
    let Some((&size, stream)) = data.split_first() else {
        return;
    };
    let chunk = usize::from(size).max(1);

    let mut whole = acaia_decoder::ScaleSession::new();
    let expected = whole.on_bytes(stream);

    let mut chunked = acaia_decoder::ScaleSession::new();
    let mut actual = Vec::new();
    for piece in stream.chunks(chunk) {
        actual.extend(chunked.on_bytes(piece));
    }

    assert_eq!(actual, expected);
    assert_eq!(chunked.stats(), whole.stats());

    for event in &expected {
        if let acaia_decoder::SessionEvent::Packet(p) = event {
            assert!(acaia_wire::checksum::validate(
                p.as_bytes(),
                acaia_wire::ChecksumVariant::Split
            ));
        }
    }
});
