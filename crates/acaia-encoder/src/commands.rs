//! Fixed outbound commands.
//!
//! Sending them is the transport's job; this module only produces the
//! bytes. Every command is built with the caller's checksum variant so a
//! session talking to an older firmware can stay consistent.

use acaia_types::{EventType, MessageType};
use acaia_wire::ChecksumVariant;

use crate::encoder::{encode_message, encode_packet};
use crate::error::EncodeError;

/// Heartbeat body. Its first byte doubles as the length byte.
const HEARTBEAT_BODY: [u8; 2] = [0x02, 0x00];

/// Identify body: fifteen `0x0B` bytes, as the scale expects.
const IDENTIFY_BODY: [u8; 15] = [0x0B; 15];

/// Event subscriptions requested after the status handshake.
///
/// Pairs of (event type, argument). The weight argument is the
/// notification period in tenths of a second.
const NOTIFICATION_SUBSCRIPTIONS: [u8; 8] = [
    0, 1, // weight, every 0.1 s
    1, 2, // battery
    2, 5, // timer
    3, 4, // key, setting
];

/// Commands a host sends to the scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Keep-alive; the scale answers with an ack event.
    Heartbeat,
    /// Reply to the scale's info message.
    Identify,
    /// Subscribe to weight, battery, timer and key events.
    NotificationRequest,
    /// Ask for a battery reading.
    BatteryRequest,
}

impl Command {
    /// Parse a command from its CLI name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "heartbeat" => Some(Self::Heartbeat),
            "identify" | "id" => Some(Self::Identify),
            "notifications" | "notification_request" => Some(Self::NotificationRequest),
            "battery" => Some(Self::BatteryRequest),
            _ => None,
        }
    }

    /// Encode the command into a complete packet.
    ///
    /// # Errors
    ///
    /// Never fails for the built-in bodies; the `Result` is kept so the
    /// signature matches the rest of the encoder.
    pub fn encode(self, variant: ChecksumVariant) -> Result<Vec<u8>, EncodeError> {
        match self {
            Self::Heartbeat => heartbeat(variant),
            Self::Identify => identify(variant),
            Self::NotificationRequest => notification_request(variant),
            Self::BatteryRequest => battery_request(variant),
        }
    }
}

/// `EF DD 00 02 00 <tail>`
///
/// # Errors
///
/// See [`Command::encode`].
pub fn heartbeat(variant: ChecksumVariant) -> Result<Vec<u8>, EncodeError> {
    encode_packet(MessageType::System, &HEARTBEAT_BODY, variant)
}

/// # Errors
///
/// See [`Command::encode`].
pub fn identify(variant: ChecksumVariant) -> Result<Vec<u8>, EncodeError> {
    encode_packet(MessageType::Identify, &IDENTIFY_BODY, variant)
}

/// # Errors
///
/// See [`Command::encode`].
pub fn notification_request(variant: ChecksumVariant) -> Result<Vec<u8>, EncodeError> {
    encode_message(MessageType::Event, &NOTIFICATION_SUBSCRIPTIONS, variant)
}

/// Battery request: the battery event id sent as a message type with an
/// empty body.
///
/// # Errors
///
/// See [`Command::encode`].
pub fn battery_request(variant: ChecksumVariant) -> Result<Vec<u8>, EncodeError> {
    encode_packet(
        MessageType::Unknown(EventType::Battery.wire_id()),
        &[],
        variant,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use acaia_wire::checksum::validate;

    const SPLIT: ChecksumVariant = ChecksumVariant::Split;

    #[test]
    fn heartbeat_bytes() {
        assert_eq!(
            heartbeat(SPLIT).unwrap(),
            vec![0xEF, 0xDD, 0x00, 0x02, 0x00, 0x02, 0x00]
        );
    }

    #[test]
    fn notification_request_bytes() {
        assert_eq!(
            notification_request(SPLIT).unwrap(),
            vec![
                0xEF, 0xDD, 0x0C, 0x09, 0x00, 0x01, 0x01, 0x02, 0x02, 0x05, 0x03, 0x04, 0x15, 0x06
            ]
        );
    }

    #[test]
    fn identify_bytes() {
        let bytes = identify(SPLIT).unwrap();
        assert_eq!(bytes.len(), 20);
        assert_eq!(&bytes[..3], &[0xEF, 0xDD, 0x0B]);
        // 8 even-position bytes and 7 odd-position bytes of 0x0B.
        assert_eq!(&bytes[18..], &[0x58, 0x4D]);
    }

    #[test]
    fn battery_request_bytes() {
        assert_eq!(
            battery_request(SPLIT).unwrap(),
            vec![0xEF, 0xDD, 0x06, 0x00, 0x00]
        );
    }

    #[test]
    fn every_command_carries_a_valid_checksum() {
        for command in [
            Command::Heartbeat,
            Command::Identify,
            Command::NotificationRequest,
            Command::BatteryRequest,
        ] {
            for variant in [ChecksumVariant::Split, ChecksumVariant::Sum] {
                let bytes = command.encode(variant).unwrap();
                assert!(validate(&bytes, variant), "{command:?} / {variant:?}");
            }
        }
    }

    #[test]
    fn names() {
        assert_eq!(Command::from_name("Heartbeat"), Some(Command::Heartbeat));
        assert_eq!(Command::from_name("notifications"), Some(Command::NotificationRequest));
        assert_eq!(Command::from_name("tare"), None);
    }
}
