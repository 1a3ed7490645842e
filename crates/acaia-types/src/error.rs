use crate::event::EventType;

/// Errors raised by the typed record decoders.
///
/// The event decoder checks record bounds before calling into these, so
/// on the streaming path they only fire for hand-built or fuzzed input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    /// A fixed-length record was handed fewer bytes than its layout needs.
    #[error("truncated {event:?} record: need {needed} bytes, have {available}")]
    TruncatedRecord {
        event: EventType,
        needed: usize,
        available: usize,
    },
}
