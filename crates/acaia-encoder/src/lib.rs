#![warn(clippy::pedantic)]

pub mod commands;
pub mod encoder;
pub mod error;

pub use encoder::{encode_message, encode_packet};
pub use error::EncodeError;
