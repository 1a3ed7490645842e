#![warn(clippy::pedantic)]

pub mod assembler;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod session;
pub mod streaming;

pub use assembler::{AssemblerStats, FrameAssembler};
pub use config::DecoderConfig;
pub use dispatch::{Dispatch, Reply, dispatch};
pub use error::DecodeError;
pub use events::decode_events;
pub use session::{ScaleSession, SessionEvent};
pub use streaming::StreamingDecoder;
