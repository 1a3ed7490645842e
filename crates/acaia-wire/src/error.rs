/// Reasons a byte slice is not a well-formed scale packet.
///
/// The streaming path never surfaces these: the frame assembler only asks
/// the yes/no question through [`validate`](crate::checksum::validate) and
/// counts the failures. `WireError` exists for strict, one-shot parsing
/// (tooling, fixtures, tests) where the caller wants to know *why*.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    /// Fewer bytes than the fixed header + checksum overhead.
    #[error("packet too short: {len} bytes, need at least {min}")]
    TooShort { len: usize, min: usize },

    /// The first two bytes are not the `0xEF 0xDD` marker pair.
    #[error("invalid marker: expected 0xEF 0xDD, got {found:#06X}")]
    BadMarker { found: u16 },

    /// The length byte disagrees with the slice length.
    #[error("length byte claims {expected} bytes total, slice has {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// The trailing checksum bytes do not match the body.
    #[error("checksum mismatch: computed {computed:02X?}, tail {tail:02X?}")]
    ChecksumMismatch { computed: [u8; 2], tail: [u8; 2] },
}
