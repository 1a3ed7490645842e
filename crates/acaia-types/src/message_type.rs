/// Message type carried in byte 2 of every packet.
///
/// ```text
/// ┌──────┬──────────┬─────────────────────────────────────────┐
/// │ Wire │ Variant  │ Meaning                                 │
/// ├──────┼──────────┼─────────────────────────────────────────┤
/// │ 0x00 │ System   │ Heartbeat acknowledgement               │
/// │ 0x04 │ Tare     │ Tare acknowledgement                    │
/// │ 0x07 │ Info     │ Device info / handshake opener          │
/// │ 0x08 │ Status   │ Status snapshot, battery in byte 0      │
/// │ 0x0B │ Identify │ Identify acknowledgement                │
/// │ 0x0C │ Event    │ Envelope of one or more event records   │
/// │ 0x0D │ Timer    │ Timer notice                            │
/// └──────┴──────────┴─────────────────────────────────────────┘
/// ```
///
/// Unknown ids are kept in `Unknown(u8)` so they can be logged verbatim.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageType {
    System,
    Tare,
    Info,
    Status,
    Identify,
    Event,
    Timer,
    Unknown(u8),
}

impl MessageType {
    #[must_use]
    pub fn wire_id(self) -> u8 {
        match self {
            Self::System => 0x00,
            Self::Tare => 0x04,
            Self::Info => 0x07,
            Self::Status => 0x08,
            Self::Identify => 0x0B,
            Self::Event => 0x0C,
            Self::Timer => 0x0D,
            Self::Unknown(id) => id,
        }
    }

    #[must_use]
    pub fn from_wire_id(id: u8) -> Self {
        match id {
            0x00 => Self::System,
            0x04 => Self::Tare,
            0x07 => Self::Info,
            0x08 => Self::Status,
            0x0B => Self::Identify,
            0x0C => Self::Event,
            0x0D => Self::Timer,
            other => Self::Unknown(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_variants_roundtrip() {
        let variants = [
            (MessageType::System, 0x00),
            (MessageType::Tare, 0x04),
            (MessageType::Info, 0x07),
            (MessageType::Status, 0x08),
            (MessageType::Identify, 0x0B),
            (MessageType::Event, 0x0C),
            (MessageType::Timer, 0x0D),
        ];

        for (variant, wire) in variants {
            assert_eq!(variant.wire_id(), wire, "wire_id mismatch for {variant:?}");
            assert_eq!(MessageType::from_wire_id(wire), variant);
        }
    }

    #[test]
    fn unknown_value_preserved() {
        let unknown = MessageType::from_wire_id(0x42);
        assert_eq!(unknown, MessageType::Unknown(0x42));
        assert_eq!(unknown.wire_id(), 0x42);
    }
}
