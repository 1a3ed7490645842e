/// First byte of the packet-start marker.
pub const MARKER_1: u8 = 0xEF;

/// Second byte of the packet-start marker.
pub const MARKER_2: u8 = 0xDD;

/// Marker pair + message type byte.
pub const HEADER_SIZE: usize = 3;

/// Two trailing checksum bytes.
pub const CHECKSUM_SIZE: usize = 2;

/// Smallest slice that can hold a packet: header + checksum tail.
pub const MIN_PACKET_SIZE: usize = HEADER_SIZE + CHECKSUM_SIZE;

/// Offset of the message type byte.
pub const MESSAGE_TYPE_OFFSET: usize = 2;

/// Offset of the length byte. The length counts itself, so a packet
/// whose length byte is `L` occupies `L + MIN_PACKET_SIZE` bytes.
pub const LENGTH_OFFSET: usize = 3;

/// Packet layout on the wire.
///
/// ```text
/// ┌────────┬─────────┬──────────────────────────────────────────┐
/// │ Offset │ Size    │ Description                              │
/// ├────────┼─────────┼──────────────────────────────────────────┤
/// │ 0x00   │ 1 byte  │ Marker 1 (0xEF)                          │
/// │ 0x01   │ 1 byte  │ Marker 2 (0xDD)                          │
/// │ 0x02   │ 1 byte  │ Message type                             │
/// │ 0x03   │ L bytes │ Body: length byte L, then L-1 payload    │
/// │ 3 + L  │ 2 bytes │ Checksum tail                            │
/// └────────┴─────────┴──────────────────────────────────────────┘
/// ```
///
/// Returns the total packet length implied by a length byte.
#[must_use]
pub fn packet_len(length_byte: u8) -> usize {
    usize::from(length_byte) + MIN_PACKET_SIZE
}

/// Find the start of the next packet in `buf`, beginning at `from`.
///
/// Returns the index of the first `MARKER_1` whose successor is
/// `MARKER_2`. A lone `MARKER_1` followed by anything else is skipped,
/// and a `MARKER_1` in the last position is not a match: its partner has
/// not arrived yet, so the caller must keep it buffered and scan again
/// once more bytes come in.
#[must_use]
pub fn find_header(buf: &[u8], from: usize) -> Option<usize> {
    buf.get(from..)?
        .windows(2)
        .position(|pair| pair[0] == MARKER_1 && pair[1] == MARKER_2)
        .map(|pos| pos + from)
}
