//! Conformance tests: golden captures decoded into transcript snapshots.
//!
//! Each test reads a hex capture from `tests/golden/`, runs it through a
//! [`ScaleSession`], and renders every measurement and reply followed by
//! the final state line and counters. The transcript is compared against
//! an inline insta snapshot.
//!
//! Fixtures are written by `src/bin/generate_golden.rs`. A diff here means
//! either a deliberate behaviour change (accept via `cargo insta review`)
//! or a regression in framing, dispatch, or event decoding.

use std::path::Path;

use acaia_decoder::{DecoderConfig, ScaleSession, SessionEvent};
use acaia_wire::ChecksumVariant;
use insta::assert_snapshot;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Read `tests/golden/<name>.hex` and decode its hex lines.
fn golden(name: &str) -> Vec<u8> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/golden")
        .join(format!("{name}.hex"));
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read golden fixture {}: {e}", path.display()));

    let digits: String = text
        .lines()
        .filter(|line| !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace())
        .collect();
    hex::decode(digits).unwrap_or_else(|e| panic!("bad hex in {}: {e}", path.display()))
}

/// Feed `bytes` in chunks of `chunk` and render what the session saw.
fn transcript(config: DecoderConfig, bytes: &[u8], chunk: usize) -> String {
    let mut session = ScaleSession::with_config(config);
    let mut lines = Vec::new();

    for piece in bytes.chunks(chunk) {
        for event in session.on_bytes(piece) {
            match event {
                SessionEvent::Packet(_) => {}
                SessionEvent::Measurement(m) => lines.push(m.to_string()),
                SessionEvent::Reply(r) => lines.push(format!("reply {r:?}")),
            }
        }
    }

    let stats = session.stats();
    lines.push(format!("state: {}", session.state()));
    lines.push(format!(
        "stats: packets={} checksum_errors={} discarded_bytes={} buffered={}",
        stats.packets,
        stats.checksum_errors,
        stats.discarded_bytes,
        session.buffered()
    ));
    lines.join("\n")
}

fn split() -> DecoderConfig {
    DecoderConfig::default()
}

fn sum() -> DecoderConfig {
    DecoderConfig::default().with_checksum(ChecksumVariant::Sum)
}

// ── weigh_in ──────────────────────────────────────────────────────────────────

#[test]
fn weigh_in_transcript() {
    let bytes = golden("weigh_in");
    assert_snapshot!(transcript(split(), &bytes, bytes.len()), @r"
battery 47%
reply NotificationRequest
reply Identify
weight 0.00g settling
weight 5.20g settling
weight 18.00g settling
weight 18.00g stable
battery 70%
timer 00:37.003
key 0x0A
ack 00 E0
state:   18.00g ###   Battery:  70%   Timer: 00:37.003
stats: packets=9 checksum_errors=0 discarded_bytes=0 buffered=0
");
}

#[test]
fn weigh_in_is_chunking_independent() {
    let bytes = golden("weigh_in");
    let whole = transcript(split(), &bytes, bytes.len());
    for chunk in [1, 2, 3, 7, 20] {
        assert_eq!(transcript(split(), &bytes, chunk), whole, "chunk size {chunk}");
    }
}

// ── noisy_link ────────────────────────────────────────────────────────────────

#[test]
fn noisy_link_transcript() {
    let bytes = golden("noisy_link");
    assert_snapshot!(transcript(split(), &bytes, bytes.len()), @r"
weight -0.04g stable
key 0x01
state:   -0.04g ###   Battery:   0%   Timer: 00:00.000
stats: packets=2 checksum_errors=1 discarded_bytes=6 buffered=6
");
}

#[test]
fn noisy_link_byte_by_byte() {
    let bytes = golden("noisy_link");
    assert_eq!(
        transcript(split(), &bytes, 1),
        transcript(split(), &bytes, bytes.len())
    );
}

// ── units ─────────────────────────────────────────────────────────────────────

#[test]
fn units_transcript() {
    let bytes = golden("units");
    assert_snapshot!(transcript(split(), &bytes, bytes.len()), @r"
weight 0.2099oz stable
weight -1.50g stable
weight 5.7 settling
state:      5.7 ...   Battery:   0%   Timer: 00:00.000
stats: packets=3 checksum_errors=0 discarded_bytes=0 buffered=0
");
}

// ── legacy_sum ────────────────────────────────────────────────────────────────

#[test]
fn legacy_sum_transcript() {
    let bytes = golden("legacy_sum");
    assert_snapshot!(transcript(sum(), &bytes, bytes.len()), @r"
battery 55%
weight 12.34g stable
battery 90%
reply NotificationRequest
state:   12.34g ###   Battery:  90%   Timer: 00:00.000
stats: packets=3 checksum_errors=0 discarded_bytes=0 buffered=0
");
}

#[test]
fn legacy_sum_rejected_under_split() {
    let bytes = golden("legacy_sum");
    let mut session = ScaleSession::new();
    assert!(session.on_bytes(&bytes).is_empty());
    assert_eq!(session.checksum_error_count(), 3);
}
