use acaia_types::{Measurement, MessageType};
use acaia_wire::Packet;
use tracing::{debug, warn};

use crate::events::decode_events;

/// Replies the host is expected to send in response to a message.
///
/// The decoder only suggests them; encoding and writing them back to the
/// scale is up to the transport (see `acaia_encoder::commands`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reply {
    /// The scale introduced itself; answer with an identify packet.
    Identify,
    /// The scale reported status; subscribe to event notifications.
    NotificationRequest,
}

/// What one packet amounted to.
#[derive(Clone, Debug, PartialEq)]
pub struct Dispatch {
    pub message_type: MessageType,
    /// Typed updates, in payload order.
    pub measurements: Vec<Measurement>,
    pub reply: Option<Reply>,
}

/// Route a validated packet by its message type.
///
/// ```text
/// ┌──────────┬──────────────────────────────────────────────┐
/// │ Type     │ Result                                       │
/// ├──────────┼──────────────────────────────────────────────┤
/// │ Event    │ every record decoded by `decode_events`      │
/// │ Status   │ battery from payload[0]; NotificationRequest │
/// │ Info     │ Identify reply                               │
/// │ System   │ nothing (heartbeat acknowledged)             │
/// │ Tare     │ nothing                                      │
/// │ Identify │ nothing                                      │
/// │ Timer    │ nothing                                      │
/// │ Unknown  │ nothing; logged                              │
/// └──────────┴──────────────────────────────────────────────┘
/// ```
#[must_use]
pub fn dispatch(packet: &Packet) -> Dispatch {
    let message_type = MessageType::from_wire_id(packet.message_type());
    let payload = packet.payload();

    let mut measurements = Vec::new();
    let mut reply = None;

    match message_type {
        MessageType::Event => measurements = decode_events(payload),
        MessageType::Status => {
            if let Some(&battery) = payload.first() {
                measurements.push(Measurement::Battery(battery));
            }
            debug!(len = payload.len(), "status message");
            reply = Some(Reply::NotificationRequest);
        }
        MessageType::Info => {
            debug!(len = payload.len(), "device info message");
            reply = Some(Reply::Identify);
        }
        MessageType::System
        | MessageType::Tare
        | MessageType::Identify
        | MessageType::Timer => {
            debug!(?message_type, ?payload, "message acknowledged");
        }
        MessageType::Unknown(id) => {
            warn!(msg_type = id, ?payload, "unknown message type ignored");
        }
    }

    Dispatch {
        message_type,
        measurements,
        reply,
    }
}
