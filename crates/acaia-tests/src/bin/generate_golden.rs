//! Golden fixture generator for the conformance test suite.
//!
//! Writes every capture under `tests/golden/` as an annotated hex dump.
//! Run it after changing the encoder, then re-run the conformance tests
//! and review the snapshot diffs.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin generate_golden -p acaia-tests
//! ```
//!
//! # Generated fixtures
//!
//! | File            | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | weigh_in.hex    | Handshake, a weight ramp, battery/timer/key events    |
//! | noisy_link.hex  | Noise, a lone marker byte, a damaged tail, a cut-off  |
//! | units.hex       | Ounces, a negative reading, an unknown divisor        |
//! | legacy_sum.hex  | Packets checksummed with the legacy sum scheme        |

#![allow(clippy::pedantic)]

use std::fmt::Write as _;
use std::path::Path;

use acaia_encoder::encode_message;
use acaia_types::MessageType;
use acaia_wire::ChecksumVariant;

type Capture = Vec<(&'static str, Vec<u8>)>;

fn event(payload: &[u8], variant: ChecksumVariant) -> Vec<u8> {
    encode_message(MessageType::Event, payload, variant).expect("payload fits")
}

fn message(msg: MessageType, payload: &[u8]) -> Vec<u8> {
    encode_message(msg, payload, ChecksumVariant::Split).expect("payload fits")
}

fn weigh_in() -> Capture {
    let split = ChecksumVariant::Split;
    vec![
        (
            "status, battery 47%",
            message(MessageType::Status, &[0x2F, 2, 2, 3, 0, 0, 0, 1]),
        ),
        (
            "device info",
            message(MessageType::Info, &[0x02, 0x01, 0x02, 0x04, 0x00]),
        ),
        ("heartbeat ack", message(MessageType::System, &[0xFE])),
        (
            "weight 0.00 g, settling",
            event(&[0x05, 0x00, 0x00, 0, 0, 2, 1], split),
        ),
        (
            "weight 5.20 g, settling",
            event(&[0x05, 0x08, 0x02, 0, 0, 2, 1], split),
        ),
        (
            "weight 18.00 g, settling",
            event(&[0x05, 0x08, 0x07, 0, 0, 2, 1], split),
        ),
        (
            "weight 18.00 g, stable",
            event(&[0x05, 0x08, 0x07, 0, 0, 2, 0], split),
        ),
        (
            "battery 70%, timer 00:37.003",
            event(&[0x06, 0x46, 0x07, 0x00, 0x25, 0x03], split),
        ),
        (
            "key 0x0A, heartbeat ack",
            event(&[0x08, 0x0A, 0x0B, 0x00, 0xE0], split),
        ),
    ]
}

fn noisy_link() -> Capture {
    let split = ChecksumVariant::Split;

    let mut damaged = event(&[0x06, 0x50], split);
    if let Some(last) = damaged.last_mut() {
        *last ^= 0x01;
    }

    let mut cut_off = event(&[0x05, 0x10, 0x27, 0, 0, 2, 0], split);
    cut_off.truncate(6);

    vec![
        (
            "line noise ending in a lone marker byte",
            vec![0x00, 0x13, 0x37, 0xEF],
        ),
        (
            "weight -0.04 g, stable",
            event(&[0x05, 0x04, 0, 0, 0, 2, 2], split),
        ),
        ("battery 80%, tail damaged", damaged),
        ("line noise", vec![0xDD, 0x42]),
        ("key 0x01", event(&[0x08, 0x01], split)),
        ("weight packet cut off mid-flight", cut_off),
    ]
}

fn units() -> Capture {
    let split = ChecksumVariant::Split;
    vec![
        (
            "weight 0.2099 oz, stable",
            event(&[0x05, 0x33, 0x08, 0, 0, 4, 0], split),
        ),
        (
            "weight -1.50 g, stable",
            event(&[0x05, 0x96, 0, 0, 0, 2, 2], split),
        ),
        (
            "weight 5.7, unknown unit, settling",
            event(&[0x05, 0x39, 0, 0, 0, 1, 1], split),
        ),
    ]
}

fn legacy_sum() -> Capture {
    let sum = ChecksumVariant::Sum;
    vec![
        ("battery 55%", event(&[0x06, 55], sum)),
        (
            "weight 12.34 g, stable",
            event(&[0x05, 0xD2, 0x04, 0, 0, 2, 0], sum),
        ),
        (
            "status, battery 90%",
            encode_message(MessageType::Status, &[90, 2, 2, 3, 0, 0, 0, 1], sum)
                .expect("payload fits"),
        ),
    ]
}

fn render(name: &str, capture: &Capture) -> String {
    let mut out = format!("# {name}: generated by generate_golden, do not edit\n");
    for (comment, bytes) in capture {
        let line: Vec<String> = bytes.iter().map(|b| hex::encode_upper([*b])).collect();
        let _ = writeln!(out, "# {comment}\n{}", line.join(" "));
    }
    out
}

fn main() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/golden");
    std::fs::create_dir_all(&dir).expect("create tests/golden");

    let fixtures: [(&str, Capture); 4] = [
        ("weigh_in", weigh_in()),
        ("noisy_link", noisy_link()),
        ("units", units()),
        ("legacy_sum", legacy_sum()),
    ];

    for (name, capture) in &fixtures {
        let path = dir.join(format!("{name}.hex"));
        std::fs::write(&path, render(name, capture))
            .unwrap_or_else(|e| panic!("failed to write {}: {e}", path.display()));
        println!("wrote {}", path.display());
    }
}
