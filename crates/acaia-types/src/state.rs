use std::fmt;

use crate::event::{Measurement, Timer, Unit, WeightReading};

/// Most recent value of every field the scale reports.
///
/// There is no history: each measurement overwrites the field it
/// carries. One `ScaleState` belongs to one connection session, so
/// several scales can be decoded side by side.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScaleState {
    pub weight: WeightReading,
    /// Battery level in percent, raw from the device (no clamping).
    pub battery: u8,
    pub timer: Timer,
    /// Last key code seen, if any.
    pub last_key: Option<u8>,
}

impl ScaleState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one measurement into the state (last write wins).
    ///
    /// Acks carry nothing worth keeping and leave the state untouched.
    pub fn apply(&mut self, measurement: &Measurement) {
        match *measurement {
            Measurement::Weight(w) => self.weight = w,
            Measurement::Battery(pct) => self.battery = pct,
            Measurement::Timer(t) => self.timer = t,
            Measurement::Key(code) => self.last_key = Some(code),
            Measurement::Ack(_) => {}
        }
    }

    /// Zero every field, as on reconnect.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn weight(&self) -> f64 {
        self.weight.value()
    }

    #[must_use]
    pub fn unit(&self) -> Unit {
        self.weight.unit
    }

    #[must_use]
    pub fn is_stable(&self) -> bool {
        self.weight.stable
    }
}

/// One status line: weight, stability marker, battery and timer.
///
/// ```text
///    1.00g ###   Battery:  87%   Timer: 00:12.005
/// ```
impl fmt::Display for ScaleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let weight = self.weight.to_string();
        write!(
            f,
            "{weight:>8} {}   Battery: {:>3}%   Timer: {}",
            if self.weight.stable { "###" } else { "..." },
            self.battery,
            self.timer,
        )
    }
}
