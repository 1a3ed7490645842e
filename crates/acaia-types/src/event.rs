use std::fmt;

use crate::error::TypeError;

/// Event record type, the first byte of each record inside an
/// [`Event`](crate::MessageType::Event) payload.
///
/// Each known type has a fixed field block that follows the type byte:
///
/// ```text
/// ┌──────┬─────────┬────────┬──────────────────────────────────────┐
/// │ Wire │ Variant │ Length │ Fields                               │
/// ├──────┼─────────┼────────┼──────────────────────────────────────┤
/// │ 0x05 │ Weight  │ 6      │ d0 d1 d2 (LE magnitude), -, div, flg │
/// │ 0x06 │ Battery │ 1      │ percent                              │
/// │ 0x07 │ Timer   │ 3      │ minutes, seconds, millis             │
/// │ 0x08 │ Key     │ 1      │ raw key code                         │
/// │ 0x0B │ Ack     │ 2      │ heartbeat reply bytes                │
/// └──────┴─────────┴────────┴──────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventType {
    Weight,
    Battery,
    Timer,
    Key,
    Ack,
    Unknown(u8),
}

impl EventType {
    #[must_use]
    pub fn wire_id(self) -> u8 {
        match self {
            Self::Weight => 0x05,
            Self::Battery => 0x06,
            Self::Timer => 0x07,
            Self::Key => 0x08,
            Self::Ack => 0x0B,
            Self::Unknown(id) => id,
        }
    }

    #[must_use]
    pub fn from_wire_id(id: u8) -> Self {
        match id {
            0x05 => Self::Weight,
            0x06 => Self::Battery,
            0x07 => Self::Timer,
            0x08 => Self::Key,
            0x0B => Self::Ack,
            other => Self::Unknown(other),
        }
    }

    /// Length of the field block after the type byte.
    ///
    /// `None` for unknown types: their extent cannot be known, so the
    /// rest of the payload is undecodable.
    #[must_use]
    pub fn record_len(self) -> Option<usize> {
        match self {
            Self::Weight => Some(6),
            Self::Battery | Self::Key => Some(1),
            Self::Timer => Some(3),
            Self::Ack => Some(2),
            Self::Unknown(_) => None,
        }
    }
}

/// Display unit selected by the weight divisor byte.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Unit {
    Grams,
    Ounces,
    #[default]
    Unknown,
}

impl Unit {
    /// Divisor 2 means grams, 4 means ounces. Anything else is unknown.
    #[must_use]
    pub fn from_divisor(divisor: u8) -> Self {
        match divisor {
            2 => Self::Grams,
            4 => Self::Ounces,
            _ => Self::Unknown,
        }
    }

    /// Short unit label; empty when unknown.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Grams => "g",
            Self::Ounces => "oz",
            Self::Unknown => "",
        }
    }
}

/// A decoded weight record.
///
/// The raw fixed-point parts are kept so the value can be rendered at the
/// scale's own precision; [`value`](Self::value) gives the float.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WeightReading {
    /// 24-bit unsigned magnitude.
    pub magnitude: u32,
    /// Power-of-ten divisor; also selects the unit.
    pub divisor: u8,
    pub negative: bool,
    pub stable: bool,
    pub unit: Unit,
}

impl WeightReading {
    pub const RECORD_LEN: usize = 6;

    const FLAG_UNSTABLE: u8 = 0b0000_0001;
    const FLAG_NEGATIVE: u8 = 0b0000_0010;

    /// Decode the 6-byte field block of a weight record.
    ///
    /// ```text
    ///   [0] [1] [2]   magnitude, little-endian 24-bit
    ///   [3]           unused
    ///   [4]           divisor (2 = g, 4 = oz)
    ///   [5]           flags: bit 0 set = unstable, bit 1 set = negative
    /// ```
    ///
    /// # Errors
    ///
    /// [`TypeError::TruncatedRecord`] if `record` is shorter than 6 bytes.
    pub fn decode(record: &[u8]) -> Result<Self, TypeError> {
        let fields: &[u8; Self::RECORD_LEN] = record
            .get(..Self::RECORD_LEN)
            .and_then(|s| s.try_into().ok())
            .ok_or(TypeError::TruncatedRecord {
                event: EventType::Weight,
                needed: Self::RECORD_LEN,
                available: record.len(),
            })?;

        let magnitude = u32::from_le_bytes([fields[0], fields[1], fields[2], 0]);
        let divisor = fields[4];
        let flags = fields[5];

        Ok(Self {
            magnitude,
            divisor,
            negative: flags & Self::FLAG_NEGATIVE != 0,
            stable: flags & Self::FLAG_UNSTABLE == 0,
            unit: Unit::from_divisor(divisor),
        })
    }

    /// Signed value: magnitude / 10^divisor, negated when flagged.
    #[must_use]
    pub fn value(&self) -> f64 {
        let scaled = f64::from(self.magnitude) / 10f64.powi(i32::from(self.divisor));
        if self.negative { -scaled } else { scaled }
    }
}

impl fmt::Display for WeightReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = usize::from(self.divisor);
        write!(f, "{:.precision$}{}", self.value(), self.unit.symbol())
    }
}

/// Elapsed time shown by the scale's built-in timer.
///
/// Fields are taken at face value; no carry normalisation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Timer {
    pub minutes: u8,
    pub seconds: u8,
    pub millis: u8,
}

impl fmt::Display for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}.{:03}", self.minutes, self.seconds, self.millis)
    }
}

/// One typed update produced by the event decoder.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Measurement {
    Weight(WeightReading),
    /// Battery level in percent.
    Battery(u8),
    Timer(Timer),
    /// Raw key code.
    Key(u8),
    /// Heartbeat acknowledgement bytes.
    Ack([u8; 2]),
}

impl Measurement {
    /// Decode the field block of a known event type.
    ///
    /// `record` is the block *after* the type byte.
    ///
    /// # Errors
    ///
    /// [`TypeError::TruncatedRecord`] if `record` is shorter than the
    /// type's fixed length. Unknown types also report as truncated with
    /// `needed: 0`; callers are expected to filter them out first.
    pub fn decode(event: EventType, record: &[u8]) -> Result<Self, TypeError> {
        let needed = event.record_len().unwrap_or(0);
        let truncated = || TypeError::TruncatedRecord {
            event,
            needed,
            available: record.len(),
        };
        if event.record_len().is_none() || record.len() < needed {
            return Err(truncated());
        }

        Ok(match event {
            EventType::Weight => Self::Weight(WeightReading::decode(record)?),
            EventType::Battery => Self::Battery(record[0]),
            EventType::Timer => Self::Timer(Timer {
                minutes: record[0],
                seconds: record[1],
                millis: record[2],
            }),
            EventType::Key => Self::Key(record[0]),
            EventType::Ack => Self::Ack([record[0], record[1]]),
            EventType::Unknown(_) => return Err(truncated()),
        })
    }

    #[must_use]
    pub fn event_type(&self) -> EventType {
        match self {
            Self::Weight(_) => EventType::Weight,
            Self::Battery(_) => EventType::Battery,
            Self::Timer(_) => EventType::Timer,
            Self::Key(_) => EventType::Key,
            Self::Ack(_) => EventType::Ack,
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weight(w) => {
                write!(f, "weight {w} {}", if w.stable { "stable" } else { "settling" })
            }
            Self::Battery(pct) => write!(f, "battery {pct}%"),
            Self::Timer(t) => write!(f, "timer {t}"),
            Self::Key(code) => write!(f, "key {code:#04X}"),
            Self::Ack([a, b]) => write!(f, "ack {a:02X} {b:02X}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_one_gram_stable() {
        let reading = WeightReading::decode(&[100, 0, 0, 0, 2, 0]).unwrap();
        assert_eq!(reading.magnitude, 100);
        assert_eq!(reading.unit, Unit::Grams);
        assert!(reading.stable);
        assert!(!reading.negative);
        assert!((reading.value() - 1.0).abs() < f64::EPSILON);
        assert_eq!(reading.to_string(), "1.00g");
    }

    #[test]
    fn weight_uses_all_three_magnitude_bytes() {
        // 0x01_02_03 little-endian
        let reading = WeightReading::decode(&[0x03, 0x02, 0x01, 0xFF, 2, 0]).unwrap();
        assert_eq!(reading.magnitude, 0x01_02_03);
    }

    #[test]
    fn weight_negative_and_unstable() {
        let reading = WeightReading::decode(&[0x04, 0, 0, 0, 2, 0b11]).unwrap();
        assert!(reading.negative);
        assert!(!reading.stable);
        assert!((reading.value() + 0.04).abs() < 1e-12);
        assert_eq!(reading.to_string(), "-0.04g");
    }

    #[test]
    fn weight_ounces_and_unknown_unit() {
        let oz = WeightReading::decode(&[0x10, 0x27, 0, 0, 4, 0]).unwrap();
        assert_eq!(oz.unit, Unit::Ounces);
        assert!((oz.value() - 1.0).abs() < f64::EPSILON);

        let odd = WeightReading::decode(&[5, 0, 0, 0, 1, 0]).unwrap();
        assert_eq!(odd.unit, Unit::Unknown);
        assert_eq!(odd.to_string(), "0.5");
    }

    #[test]
    fn weight_truncated() {
        let result = WeightReading::decode(&[1, 2, 3]);
        assert_eq!(
            result,
            Err(TypeError::TruncatedRecord {
                event: EventType::Weight,
                needed: 6,
                available: 3
            })
        );
    }

    #[test]
    fn record_lengths() {
        assert_eq!(EventType::Weight.record_len(), Some(6));
        assert_eq!(EventType::Battery.record_len(), Some(1));
        assert_eq!(EventType::Timer.record_len(), Some(3));
        assert_eq!(EventType::Key.record_len(), Some(1));
        assert_eq!(EventType::Ack.record_len(), Some(2));
        assert_eq!(EventType::Unknown(0x42).record_len(), None);
    }

    #[test]
    fn event_type_roundtrip() {
        for id in [0x05, 0x06, 0x07, 0x08, 0x0B, 0x42] {
            assert_eq!(EventType::from_wire_id(id).wire_id(), id);
        }
    }

    #[test]
    fn decode_simple_records() {
        assert_eq!(
            Measurement::decode(EventType::Battery, &[87]).unwrap(),
            Measurement::Battery(87)
        );
        assert_eq!(
            Measurement::decode(EventType::Timer, &[1, 75, 5]).unwrap(),
            Measurement::Timer(Timer {
                minutes: 1,
                seconds: 75,
                millis: 5
            })
        );
        assert_eq!(
            Measurement::decode(EventType::Ack, &[0x00, 0xE0]).unwrap(),
            Measurement::Ack([0x00, 0xE0])
        );
    }

    #[test]
    fn decode_unknown_is_rejected() {
        assert!(Measurement::decode(EventType::Unknown(0x42), &[1, 2, 3]).is_err());
    }

    #[test]
    fn timer_display_pads() {
        let t = Timer {
            minutes: 2,
            seconds: 5,
            millis: 7,
        };
        assert_eq!(t.to_string(), "02:05.007");
    }

    #[test]
    fn measurement_display() {
        let m = Measurement::decode(EventType::Weight, &[0xE8, 0x03, 0, 0, 2, 1]).unwrap();
        insta::assert_snapshot!(m.to_string(), @"weight 10.00g settling");
        insta::assert_snapshot!(Measurement::Key(0x0A).to_string(), @"key 0x0A");
    }
}
