#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    message_type: u8,
    sum: bool,
    payload: Vec<u8>,
}

// Fuzz target: encode_message -> FrameAssembler roundtrip.
//
// Any payload the encoder accepts must frame back to exactly the bytes
// written, with the same type and payload, under either checksum.
fuzz_target!(|input: Input| {
    let variant = if input.sum {
        acaia_wire::ChecksumVariant::Sum
    } else {
        acaia_wire::ChecksumVariant::Split
    };
    let msg = acaia_types::MessageType::from_wire_id(input.message_type);

    let Ok(bytes) = acaia_encoder::encode_message(msg, &input.payload, variant) else {
        assert!(input.payload.len() > acaia_encoder::encoder::MAX_PAYLOAD_LEN);
        return;
    };

    let config = acaia_decoder::DecoderConfig::default().with_checksum(variant);
    let mut assembler = acaia_decoder::FrameAssembler::with_config(config);
    let packets = assembler.feed(&bytes);

    assert_eq!(packets.len(), 1);
    assert_eq!(packets[0].as_bytes(), bytes.as_slice());
    assert_eq!(packets[0].message_type(), input.message_type);
    assert_eq!(packets[0].payload(), input.payload.as_slice());
});
