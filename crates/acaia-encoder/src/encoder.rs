use acaia_types::MessageType;
use acaia_wire::checksum::{self, ChecksumVariant};
use acaia_wire::header::{MARKER_1, MARKER_2, MIN_PACKET_SIZE};

use crate::error::EncodeError;

/// Largest body a single packet can carry; the length byte is a `u8`.
pub const MAX_BODY_LEN: usize = u8::MAX as usize;

/// Largest payload [`encode_message`] accepts: the length byte itself
/// takes one slot of the body.
pub const MAX_PAYLOAD_LEN: usize = MAX_BODY_LEN - 1;

/// Frame a raw body: marker pair, message type, body, checksum tail.
///
/// The body is written verbatim. Its first byte is what a receiver will
/// read as the length byte, so callers sending to our own assembler
/// should prefer [`encode_message`]. Some fixed commands rely on the raw
/// form because their first byte already happens to be the length.
///
/// ```text
///   EF DD <type> <body ...> <tail0> <tail1>
/// ```
///
/// # Errors
///
/// [`EncodeError::BodyTooLong`] if `body` exceeds 255 bytes.
pub fn encode_packet(
    message_type: MessageType,
    body: &[u8],
    variant: ChecksumVariant,
) -> Result<Vec<u8>, EncodeError> {
    if body.len() > MAX_BODY_LEN {
        return Err(EncodeError::BodyTooLong {
            len: body.len(),
            max: MAX_BODY_LEN,
        });
    }

    let mut out = Vec::with_capacity(body.len() + MIN_PACKET_SIZE);
    out.push(MARKER_1);
    out.push(MARKER_2);
    out.push(message_type.wire_id());
    out.extend_from_slice(body);
    out.extend_from_slice(&checksum::compute(body, variant));
    Ok(out)
}

/// Frame a message payload, prefixing the self-inclusive length byte.
///
/// The result always satisfies the receiver's framing rule
/// (`total = length + 5`), so it round-trips through the assembler.
///
/// # Errors
///
/// [`EncodeError::BodyTooLong`] if `payload` exceeds 254 bytes.
pub fn encode_message(
    message_type: MessageType,
    payload: &[u8],
    variant: ChecksumVariant,
) -> Result<Vec<u8>, EncodeError> {
    let length = u8::try_from(payload.len() + 1).map_err(|_| EncodeError::BodyTooLong {
        len: payload.len(),
        max: MAX_PAYLOAD_LEN,
    })?;

    let mut body = Vec::with_capacity(payload.len() + 1);
    body.push(length);
    body.extend_from_slice(payload);
    encode_packet(message_type, &body, variant)
}
