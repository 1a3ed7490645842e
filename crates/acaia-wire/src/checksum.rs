use crate::header::{CHECKSUM_SIZE, LENGTH_OFFSET, MIN_PACKET_SIZE};

/// Checksum scheme used by the two-byte packet tail.
///
/// Scales in the field ship with one of two firmware generations, so
/// both are kept as selectable strategies.
///
/// ```text
/// ┌────────┬────────────────────────────────────────────────────────┐
/// │ Split  │ tail[0] = Σ body[even] mod 256                         │
/// │        │ tail[1] = Σ body[odd]  mod 256                         │
/// ├────────┼────────────────────────────────────────────────────────┤
/// │ Sum    │ (tail[0] + tail[1]) mod 256 = Σ body mod 256           │
/// └────────┴────────────────────────────────────────────────────────┘
/// ```
///
/// The body is everything between the message type byte and the tail,
/// length byte included.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ChecksumVariant {
    #[default]
    Split,
    Sum,
}

impl ChecksumVariant {
    /// Parse a variant from its lowercase name (`split` or `sum`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "split" => Some(Self::Split),
            "sum" => Some(Self::Sum),
            _ => None,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Split => "split",
            Self::Sum => "sum",
        }
    }
}

/// Wrapping byte sum.
fn sum(bytes: impl Iterator<Item = u8>) -> u8 {
    bytes.fold(0u8, u8::wrapping_add)
}

/// Compute the tail bytes for `body` under `variant`.
///
/// For [`ChecksumVariant::Sum`] the whole sum goes in the first byte and
/// the second is zero, which is one of the 256 tails that satisfy it.
#[must_use]
pub fn compute(body: &[u8], variant: ChecksumVariant) -> [u8; CHECKSUM_SIZE] {
    match variant {
        ChecksumVariant::Split => [
            sum(body.iter().step_by(2).copied()),
            sum(body.iter().skip(1).step_by(2).copied()),
        ],
        ChecksumVariant::Sum => [sum(body.iter().copied()), 0],
    }
}

/// Compare a body against a received tail.
#[must_use]
pub fn matches(body: &[u8], tail: [u8; CHECKSUM_SIZE], variant: ChecksumVariant) -> bool {
    match variant {
        ChecksumVariant::Split => compute(body, variant) == tail,
        ChecksumVariant::Sum => sum(body.iter().copied()) == tail[0].wrapping_add(tail[1]),
    }
}

/// Validate a complete packet slice.
///
/// Pure and total: slices shorter than the fixed overhead are `false`,
/// never a panic. Only the checksum is checked here; markers and the
/// length byte are the assembler's concern.
#[must_use]
pub fn validate(packet: &[u8], variant: ChecksumVariant) -> bool {
    if packet.len() < MIN_PACKET_SIZE {
        return false;
    }
    let tail_start = packet.len() - CHECKSUM_SIZE;
    let body = &packet[LENGTH_OFFSET..tail_start];
    let tail = [packet[tail_start], packet[tail_start + 1]];
    matches(body, tail, variant)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEIGHT_EVENT: [u8; 13] = [
        0xEF, 0xDD, 0x0C, 0x08, 0x05, 0x04, 0x00, 0x00, 0x00, 0x02, 0x02, 0x0E, 0x07,
    ];
    const STATUS: [u8; 14] = [
        0xEF, 0xDD, 0x08, 0x09, 0x2F, 0x02, 0x02, 0x03, 0x00, 0x00, 0x00, 0x01, 0x0F, 0x31,
    ];
    const SYSTEM: [u8; 7] = [0xEF, 0xDD, 0x00, 0x02, 0xFE, 0x02, 0xFE];

    #[test]
    fn captured_packets_validate_under_both_variants() {
        for variant in [ChecksumVariant::Split, ChecksumVariant::Sum] {
            assert!(validate(&WEIGHT_EVENT, variant), "{variant:?}");
            assert!(validate(&STATUS, variant), "{variant:?}");
            assert!(validate(&SYSTEM, variant), "{variant:?}");
        }
    }

    #[test]
    fn truncated_packet_fails() {
        let truncated = &WEIGHT_EVENT[..WEIGHT_EVENT.len() - 1];
        assert!(!validate(truncated, ChecksumVariant::Split));
        assert!(!validate(truncated, ChecksumVariant::Sum));
    }

    #[test]
    fn damaged_length_byte_fails() {
        let mut damaged = WEIGHT_EVENT;
        damaged[3] = 0x04;
        assert!(!validate(&damaged, ChecksumVariant::Split));
        assert!(!validate(&damaged, ChecksumVariant::Sum));
    }

    #[test]
    fn short_slices_are_invalid() {
        for len in 0..MIN_PACKET_SIZE {
            let buf = vec![0u8; len];
            assert!(!validate(&buf, ChecksumVariant::Split));
        }
    }

    #[test]
    fn empty_body_validates_with_zero_tail() {
        assert!(validate(&[0xEF, 0xDD, 0x06, 0x00, 0x00], ChecksumVariant::Split));
        assert!(validate(&[0xEF, 0xDD, 0x06, 0x00, 0x00], ChecksumVariant::Sum));
        assert_eq!(compute(&[], ChecksumVariant::Split), [0, 0]);
    }

    #[test]
    fn split_detects_swapped_tail_where_sum_does_not() {
        let mut swapped = WEIGHT_EVENT;
        swapped.swap(11, 12);
        assert!(!validate(&swapped, ChecksumVariant::Split));
        assert!(validate(&swapped, ChecksumVariant::Sum));
    }

    #[test]
    fn compute_split_matches_capture() {
        assert_eq!(compute(&WEIGHT_EVENT[3..11], ChecksumVariant::Split), [0x0E, 0x07]);
        assert_eq!(compute(&STATUS[3..12], ChecksumVariant::Split), [0x0F, 0x31]);
    }

    #[test]
    fn variant_names_roundtrip() {
        for variant in [ChecksumVariant::Split, ChecksumVariant::Sum] {
            assert_eq!(ChecksumVariant::from_name(variant.name()), Some(variant));
        }
        assert_eq!(ChecksumVariant::from_name("SPLIT"), Some(ChecksumVariant::Split));
        assert_eq!(ChecksumVariant::from_name("crc"), None);
    }

    proptest::proptest! {
        #[test]
        fn flipped_body_byte_is_detected(
            body in proptest::collection::vec(proptest::prelude::any::<u8>(), 1..64),
            index in proptest::prelude::any::<proptest::sample::Index>(),
            delta in 1u8..=255,
        ) {
            for variant in [ChecksumVariant::Split, ChecksumVariant::Sum] {
                let tail = compute(&body, variant);
                proptest::prop_assert!(matches(&body, tail, variant));

                let mut damaged = body.clone();
                let i = index.index(damaged.len());
                damaged[i] = damaged[i].wrapping_add(delta);
                proptest::prop_assert!(!matches(&damaged, tail, variant));
            }
        }
    }
}
