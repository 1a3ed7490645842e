use acaia_wire::Packet;
use acaia_wire::checksum::validate;
use acaia_wire::header::{LENGTH_OFFSET, MARKER_1, MESSAGE_TYPE_OFFSET, find_header, packet_len};
use tracing::{debug, trace, warn};

use crate::config::DecoderConfig;

/// Counters kept by the assembler for diagnostics.
///
/// All three only ever grow (until [`FrameAssembler::reset`]).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AssemblerStats {
    /// Packets that passed validation and were emitted.
    pub packets: u64,
    /// Packets that were framed but failed the checksum.
    pub checksum_errors: u64,
    /// Bytes thrown away as noise (before a header, or over the cap).
    pub discarded_bytes: u64,
}

/// Where the assembler stands with the bytes it currently holds.
///
/// ```text
///   Idle ──(marker pair buffered)──▶ Framing
///     ▲                                │
///     └──(packet extracted or dropped)─┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FramingState {
    /// No marker pair in the buffer.
    Idle,
    /// A header is buffered but its packet is not complete yet.
    Framing,
}

/// Outcome of one framing attempt.
enum Step {
    Emitted(Packet),
    Dropped,
    Wait,
}

/// Reassembles packets from an arbitrarily chunked byte stream.
///
/// Bytes go in with [`push`](Self::push) (or [`feed`](Self::feed)) and
/// complete, checksum-valid packets come out of
/// [`next_packet`](Self::next_packet) in arrival order. Nothing here
/// blocks: when a packet is still incomplete the assembler simply
/// returns `None` and picks up where it left off on the next chunk.
///
/// Corrupt packets never produce errors. They are removed from the
/// buffer (so the same garbage is not re-framed forever), counted in
/// [`AssemblerStats::checksum_errors`], and framing continues with the
/// bytes after them.
///
/// # Example
///
/// ```rust
/// use acaia_decoder::FrameAssembler;
///
/// let packet = [0xEF, 0xDD, 0x0C, 0x08, 0x05, 0x04, 0x00, 0x00, 0x00, 0x02, 0x02, 0x0E, 0x07];
/// let mut assembler = FrameAssembler::new();
///
/// assert!(assembler.feed(&packet[..6]).is_empty());
/// let packets = assembler.feed(&packet[6..]);
/// assert_eq!(packets.len(), 1);
/// assert_eq!(packets[0].as_bytes(), &packet);
/// ```
#[derive(Debug, Default)]
pub struct FrameAssembler {
    buf: Vec<u8>,
    config: DecoderConfig,
    stats: AssemblerStats,
}

impl FrameAssembler {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DecoderConfig::default())
    }

    #[must_use]
    pub fn with_config(config: DecoderConfig) -> Self {
        Self {
            buf: Vec::with_capacity(256),
            config,
            stats: AssemblerStats::default(),
        }
    }

    /// Append a chunk to the stream buffer without framing.
    pub fn push(&mut self, chunk: &[u8]) {
        self.buf.extend_from_slice(chunk);
    }

    /// Append a chunk and drain every packet it completes.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<Packet> {
        self.push(chunk);
        std::iter::from_fn(|| self.next_packet()).collect()
    }

    /// Extract the next valid packet, dropping invalid ones on the way.
    ///
    /// Returns `None` once the buffer holds no complete packet.
    pub fn next_packet(&mut self) -> Option<Packet> {
        loop {
            match self.step() {
                Step::Emitted(packet) => return Some(packet),
                Step::Dropped => {}
                Step::Wait => return None,
            }
        }
    }

    #[must_use]
    pub fn state(&self) -> FramingState {
        if find_header(&self.buf, 0).is_some() {
            FramingState::Framing
        } else {
            FramingState::Idle
        }
    }

    /// Number of bytes waiting in the buffer.
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    #[must_use]
    pub fn checksum_error_count(&self) -> u64 {
        self.stats.checksum_errors
    }

    #[must_use]
    pub fn stats(&self) -> AssemblerStats {
        self.stats
    }

    #[must_use]
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Empty the buffer and clear the counters, as on reconnect.
    pub fn reset(&mut self) {
        self.buf.clear();
        self.stats = AssemblerStats::default();
    }

    fn step(&mut self) -> Step {
        let Some(start) = find_header(&self.buf, 0) else {
            self.enforce_noise_cap();
            return Step::Wait;
        };

        // Header found; need the length byte and then the whole packet.
        let Some(&length) = self.buf.get(start + LENGTH_OFFSET) else {
            return Step::Wait;
        };
        let end = start + packet_len(length);
        if end > self.buf.len() {
            trace!(
                need = end - start,
                have = self.buf.len() - start,
                "waiting for rest of packet"
            );
            return Step::Wait;
        }

        let bytes = self.buf[start..end].to_vec();
        self.buf.drain(..end);

        if start > 0 {
            debug!(skipped = start, "discarded bytes before packet header");
            self.stats.discarded_bytes += start as u64;
        }

        if validate(&bytes, self.config.checksum) {
            self.stats.packets += 1;
            Step::Emitted(Packet::from_framed(bytes))
        } else {
            self.stats.checksum_errors += 1;
            warn!(
                msg_type = bytes[MESSAGE_TYPE_OFFSET],
                len = bytes.len(),
                errors = self.stats.checksum_errors,
                "checksum mismatch, packet dropped"
            );
            Step::Dropped
        }
    }

    /// Bound the buffer while no header is in sight.
    ///
    /// A final `0xEF` survives: it may be the first half of a marker pair
    /// whose second byte is still in flight.
    fn enforce_noise_cap(&mut self) {
        if self.buf.len() <= self.config.max_buffer_len {
            return;
        }
        let keep = usize::from(self.buf.last() == Some(&MARKER_1));
        let discard = self.buf.len() - keep;
        self.buf.drain(..discard);
        self.stats.discarded_bytes += discard as u64;
        warn!(
            discarded = discard,
            limit = self.config.max_buffer_len,
            "no packet header in buffer, discarded noise"
        );
    }
}
