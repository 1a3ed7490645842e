use acaia_types::{EventType, Measurement};
use tracing::{debug, warn};

/// Decode every event record packed into an event-message payload.
///
/// Records sit back to back, each a type byte followed by that type's
/// fixed-length field block:
///
/// ```text
///   ┌──────┬────────────┬──────┬────────────┬─────
///   │ type │ fields (n) │ type │ fields (m) │ ...
///   └──────┴────────────┴──────┴────────────┴─────
/// ```
///
/// The walk is a cursor loop; every iteration consumes at least one byte,
/// so it ends after at most `payload.len()` steps whatever the input.
/// Decoding of the payload stops early (keeping what was decoded so far)
/// when:
///
/// - the type is unknown, since its length cannot be known;
/// - a record's field block runs past the end of the payload.
#[must_use]
pub fn decode_events(payload: &[u8]) -> Vec<Measurement> {
    let mut measurements = Vec::new();
    let mut cursor = 0;

    while let Some(&type_byte) = payload.get(cursor) {
        let event = EventType::from_wire_id(type_byte);
        let Some(len) = event.record_len() else {
            warn!(
                event_type = type_byte,
                offset = cursor,
                remaining = payload.len() - cursor,
                "unknown event type, rest of payload skipped"
            );
            break;
        };

        let fields_start = cursor + 1;
        let Some(record) = payload.get(fields_start..fields_start + len) else {
            debug!(
                ?event,
                need = len,
                have = payload.len() - fields_start,
                "truncated event record"
            );
            break;
        };

        match Measurement::decode(event, record) {
            Ok(measurement) => measurements.push(measurement),
            // Length and type are both checked above.
            Err(e) => {
                debug!(error = %e, "event record rejected");
                break;
            }
        }

        cursor = fields_start + len;
    }

    measurements
}
