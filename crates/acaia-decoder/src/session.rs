use acaia_types::{Measurement, ScaleState};
use acaia_wire::Packet;
use tracing::trace;

use crate::assembler::{AssemblerStats, FrameAssembler};
use crate::config::DecoderConfig;
use crate::dispatch::{Reply, dispatch};

/// What a session reports back for each chunk it is given.
///
/// For every packet the order is fixed: the packet itself, then each
/// measurement it carried (already folded into the state), then the
/// reply it calls for, if any.
///
/// ```text
///   Packet(p1)
///   Measurement(m1)
///   Measurement(m2)
///   Reply(NotificationRequest)
///   Packet(p2)
///   ...
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    Packet(Packet),
    Measurement(Measurement),
    Reply(Reply),
}

/// Decoding state for one scale connection.
///
/// Owns the frame buffer and the last known scale readings. The
/// transport hands it notification chunks as they arrive through
/// [`on_bytes`](Self::on_bytes) and calls [`reset`](Self::reset) on
/// disconnect. Sessions share nothing, so any number of scales can be
/// decoded side by side.
///
/// # Example
///
/// ```rust
/// use acaia_decoder::{ScaleSession, SessionEvent};
///
/// let mut session = ScaleSession::new();
/// let events = session.on_bytes(&[
///     0xEF, 0xDD, 0x0C, 0x08, 0x05, 0x04, 0x00, 0x00, 0x00, 0x02, 0x02, 0x0E, 0x07,
/// ]);
///
/// assert!(matches!(events[0], SessionEvent::Packet(_)));
/// assert_eq!(session.state().weight.to_string(), "-0.04g");
/// ```
#[derive(Debug, Default)]
pub struct ScaleSession {
    assembler: FrameAssembler,
    state: ScaleState,
}

impl ScaleSession {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DecoderConfig::default())
    }

    #[must_use]
    pub fn with_config(config: DecoderConfig) -> Self {
        Self {
            assembler: FrameAssembler::with_config(config),
            state: ScaleState::new(),
        }
    }

    /// Feed one received chunk and collect everything it completes.
    ///
    /// Partial packets stay buffered for the next call. Corrupt packets
    /// are dropped and show up only in
    /// [`checksum_error_count`](Self::checksum_error_count).
    pub fn on_bytes(&mut self, chunk: &[u8]) -> Vec<SessionEvent> {
        trace!(len = chunk.len(), "chunk received");
        self.assembler.push(chunk);

        let mut events = Vec::new();
        while let Some(packet) = self.assembler.next_packet() {
            let outcome = dispatch(&packet);
            events.push(SessionEvent::Packet(packet));

            for measurement in outcome.measurements {
                self.state.apply(&measurement);
                events.push(SessionEvent::Measurement(measurement));
            }

            if let Some(reply) = outcome.reply {
                events.push(SessionEvent::Reply(reply));
            }
        }
        events
    }

    /// Forget everything: buffered bytes, counters and readings.
    pub fn reset(&mut self) {
        self.assembler.reset();
        self.state.reset();
    }

    #[must_use]
    pub fn checksum_error_count(&self) -> u64 {
        self.assembler.checksum_error_count()
    }

    #[must_use]
    pub fn stats(&self) -> AssemblerStats {
        self.assembler.stats()
    }

    #[must_use]
    pub fn state(&self) -> &ScaleState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &DecoderConfig {
        self.assembler.config()
    }

    /// Bytes held back waiting for the rest of a packet.
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.assembler.buffered()
    }
}
