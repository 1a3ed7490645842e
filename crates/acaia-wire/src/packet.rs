use crate::checksum::{self, ChecksumVariant};
use crate::error::WireError;
use crate::header::{
    CHECKSUM_SIZE, LENGTH_OFFSET, MARKER_1, MARKER_2, MESSAGE_TYPE_OFFSET, MIN_PACKET_SIZE,
    packet_len,
};

/// Offset of the first message payload byte (just past the length byte).
const PAYLOAD_OFFSET: usize = LENGTH_OFFSET + 1;

/// One complete packet as extracted from the byte stream.
///
/// The raw bytes are kept whole (markers and tail included) so the packet
/// can be traced or re-emitted verbatim. Accessors hand out views into
/// the regions the dispatcher cares about:
///
/// ```text
///   EF DD 0C 08 05 04 00 00 00 02 02 0E 07
///   └─┬─┘ │  └──────────┬──────────┘ └─┬─┘
///  marker │           body           tail
///       type   (length byte + payload)
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Packet {
    bytes: Vec<u8>,
}

impl Packet {
    /// Wrap bytes that the caller has already framed and validated.
    ///
    /// The frame assembler uses this after its own bounds and checksum
    /// checks. Slices shorter than the fixed overhead are still safe:
    /// every accessor degrades to an empty view.
    #[must_use]
    pub fn from_framed(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Strictly parse a single packet that must span the whole slice.
    ///
    /// # Errors
    ///
    /// - [`WireError::TooShort`] if the slice is below the 5-byte overhead.
    /// - [`WireError::BadMarker`] if it does not open with `0xEF 0xDD`.
    /// - [`WireError::LengthMismatch`] if the length byte disagrees with
    ///   the slice length.
    /// - [`WireError::ChecksumMismatch`] if the tail does not verify.
    pub fn parse(bytes: &[u8], variant: ChecksumVariant) -> Result<Self, WireError> {
        if bytes.len() < MIN_PACKET_SIZE {
            return Err(WireError::TooShort {
                len: bytes.len(),
                min: MIN_PACKET_SIZE,
            });
        }

        if bytes[0] != MARKER_1 || bytes[1] != MARKER_2 {
            return Err(WireError::BadMarker {
                found: u16::from_be_bytes([bytes[0], bytes[1]]),
            });
        }

        let expected = packet_len(bytes[LENGTH_OFFSET]);
        if expected != bytes.len() {
            return Err(WireError::LengthMismatch {
                expected,
                actual: bytes.len(),
            });
        }

        let packet = Self::from_framed(bytes.to_vec());
        let tail = packet.checksum_tail();
        if !checksum::matches(packet.body(), tail, variant) {
            return Err(WireError::ChecksumMismatch {
                computed: checksum::compute(packet.body(), variant),
                tail,
            });
        }

        Ok(packet)
    }

    /// Raw message type byte.
    #[must_use]
    pub fn message_type(&self) -> u8 {
        self.bytes.get(MESSAGE_TYPE_OFFSET).copied().unwrap_or(0)
    }

    /// The length byte as received.
    #[must_use]
    pub fn length_byte(&self) -> u8 {
        self.bytes.get(LENGTH_OFFSET).copied().unwrap_or(0)
    }

    /// Checksummed region: length byte through the last payload byte.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        self.region(LENGTH_OFFSET)
    }

    /// Message payload: the body without its length byte.
    ///
    /// Empty for packets whose length byte is 0 or 1.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        self.region(PAYLOAD_OFFSET)
    }

    /// The two trailing checksum bytes.
    #[must_use]
    pub fn checksum_tail(&self) -> [u8; CHECKSUM_SIZE] {
        match self.bytes.len().checked_sub(CHECKSUM_SIZE) {
            Some(start) if self.bytes.len() >= MIN_PACKET_SIZE => {
                [self.bytes[start], self.bytes[start + 1]]
            }
            _ => [0, 0],
        }
    }

    /// Whole packet, markers and tail included.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    fn region(&self, start: usize) -> &[u8] {
        let end = self.bytes.len().saturating_sub(CHECKSUM_SIZE);
        self.bytes.get(start..end).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEIGHT_EVENT: [u8; 13] = [
        0xEF, 0xDD, 0x0C, 0x08, 0x05, 0x04, 0x00, 0x00, 0x00, 0x02, 0x02, 0x0E, 0x07,
    ];

    #[test]
    fn parse_splits_regions() {
        let packet = Packet::parse(&WEIGHT_EVENT, ChecksumVariant::Split).unwrap();
        assert_eq!(packet.message_type(), 0x0C);
        assert_eq!(packet.length_byte(), 8);
        assert_eq!(packet.body(), &WEIGHT_EVENT[3..11]);
        assert_eq!(packet.payload(), &[0x05, 0x04, 0x00, 0x00, 0x00, 0x02, 0x02]);
        assert_eq!(packet.checksum_tail(), [0x0E, 0x07]);
        assert_eq!(packet.len(), 13);
    }

    #[test]
    fn empty_packet_has_empty_payload() {
        let packet = Packet::parse(&[0xEF, 0xDD, 0x06, 0x00, 0x00], ChecksumVariant::Split).unwrap();
        assert!(packet.payload().is_empty());
        assert!(packet.body().is_empty());
    }

    #[test]
    fn parse_rejects_short_slice() {
        let result = Packet::parse(&[0xEF, 0xDD, 0x00], ChecksumVariant::Split);
        assert_eq!(result, Err(WireError::TooShort { len: 3, min: 5 }));
    }

    #[test]
    fn parse_rejects_bad_marker() {
        let mut bytes = WEIGHT_EVENT;
        bytes[1] = 0x00;
        let result = Packet::parse(&bytes, ChecksumVariant::Split);
        assert!(matches!(result, Err(WireError::BadMarker { found: 0xEF00 })));
    }

    #[test]
    fn parse_rejects_length_mismatch() {
        let result = Packet::parse(&WEIGHT_EVENT[..12], ChecksumVariant::Split);
        assert_eq!(
            result,
            Err(WireError::LengthMismatch {
                expected: 13,
                actual: 12
            })
        );
    }

    #[test]
    fn parse_rejects_bad_checksum() {
        let mut bytes = WEIGHT_EVENT;
        bytes[12] = 0x08;
        let result = Packet::parse(&bytes, ChecksumVariant::Split);
        assert!(matches!(
            result,
            Err(WireError::ChecksumMismatch {
                computed: [0x0E, 0x07],
                tail: [0x0E, 0x08]
            })
        ));
    }

    #[test]
    fn accessors_are_total_on_short_input() {
        let packet = Packet::from_framed(vec![0xEF]);
        assert_eq!(packet.message_type(), 0);
        assert!(packet.payload().is_empty());
        assert_eq!(packet.checksum_tail(), [0, 0]);
    }
}
