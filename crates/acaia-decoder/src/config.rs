use acaia_wire::ChecksumVariant;

/// Default cap on buffered bytes while no packet header is in sight.
pub const DEFAULT_MAX_BUFFER_LEN: usize = 4096;

/// Configuration for a decoding session.
///
/// ```text
/// ┌────────────────┬──────────────────────────────────────────────────┐
/// │ Field          │ Purpose                                          │
/// ├────────────────┼──────────────────────────────────────────────────┤
/// │ checksum       │ Tail scheme the scale's firmware uses            │
/// │ max_buffer_len │ Noise bound: header-less input beyond this is    │
/// │                │ discarded (a trailing 0xEF is always kept)       │
/// └────────────────┴──────────────────────────────────────────────────┘
/// ```
///
/// The cap only applies while no marker pair is buffered. A located
/// header is kept until its packet completes, and the length byte bounds
/// any packet to 260 bytes, so the buffer cannot grow without limit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecoderConfig {
    pub checksum: ChecksumVariant,
    pub max_buffer_len: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            checksum: ChecksumVariant::Split,
            max_buffer_len: DEFAULT_MAX_BUFFER_LEN,
        }
    }
}

impl DecoderConfig {
    #[must_use]
    pub fn with_checksum(mut self, checksum: ChecksumVariant) -> Self {
        self.checksum = checksum;
        self
    }

    #[must_use]
    pub fn with_max_buffer_len(mut self, max_buffer_len: usize) -> Self {
        self.max_buffer_len = max_buffer_len;
        self
    }
}
