#![warn(clippy::pedantic)]

pub mod checksum;
pub mod error;
pub mod header;
pub mod packet;

pub use checksum::ChecksumVariant;
pub use error::WireError;
pub use packet::Packet;
