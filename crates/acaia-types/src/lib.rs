#![warn(clippy::pedantic)]

pub mod error;
pub mod event;
pub mod message_type;
pub mod state;

pub use error::TypeError;
pub use event::{EventType, Measurement, Timer, Unit, WeightReading};
pub use message_type::MessageType;
pub use state::ScaleState;
