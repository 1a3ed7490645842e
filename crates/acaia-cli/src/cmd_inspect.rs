/// Implementation of `acaia inspect`.
///
/// Walks a capture the way the frame assembler does, but reports every
/// framed packet instead of silently dropping the bad ones, together
/// with the noise between them.
///
/// # Output format
///
/// ```text
/// @0    noise (2 bytes)
/// @2    EVENT    len=8  payload=05 04 00 00 00 02 02  ok
/// @15   STATUS   len=9  payload=2F 02 02 03 00 00 00 01  checksum mismatch (computed 0F 31, tail 0F 00)
/// @29   incomplete packet (4 of 13 bytes)
/// ---
/// 2 packets, 1 valid, 1 checksum mismatch
/// ```
use acaia_types::MessageType;
use acaia_wire::header::{LENGTH_OFFSET, find_header, packet_len};
use acaia_wire::{Packet, WireError};
use anyhow::Result;

use crate::InspectArgs;
use crate::capture::{self, to_hex};

/// Run the `acaia inspect` command.
///
/// # Errors
///
/// Returns an error if the capture cannot be read or parsed, or the
/// checksum name is unknown.
pub fn run(args: &InspectArgs) -> Result<()> {
    let variant = capture::checksum_variant(&args.capture.checksum)?;
    let bytes = capture::load(&args.capture)?;

    let mut offset = 0;
    let mut framed = 0usize;
    let mut valid = 0usize;

    while offset < bytes.len() {
        let Some(start) = find_header(&bytes, offset) else {
            println!("@{offset:<4} noise ({} bytes)", bytes.len() - offset);
            break;
        };
        if start > offset {
            println!("@{offset:<4} noise ({} bytes)", start - offset);
        }

        let Some(&length) = bytes.get(start + LENGTH_OFFSET) else {
            println!("@{start:<4} incomplete header");
            break;
        };
        let end = start + packet_len(length);
        if end > bytes.len() {
            println!(
                "@{start:<4} incomplete packet ({} of {} bytes)",
                bytes.len() - start,
                end - start
            );
            break;
        }

        framed += 1;
        let slice = &bytes[start..end];
        let view = Packet::from_framed(slice.to_vec());
        let verdict = match Packet::parse(slice, variant) {
            Ok(_) => {
                valid += 1;
                "ok".to_string()
            }
            Err(WireError::ChecksumMismatch { computed, tail }) => format!(
                "checksum mismatch (computed {}, tail {})",
                to_hex(&computed),
                to_hex(&tail)
            ),
            Err(e) => e.to_string(),
        };

        println!(
            "@{start:<4} {:<8} len={:<2} payload={}  {verdict}",
            type_label(MessageType::from_wire_id(view.message_type())),
            view.length_byte(),
            to_hex(view.payload()),
        );

        offset = end;
    }

    println!("---");
    println!(
        "{framed} packet{}, {valid} valid, {} checksum mismatch{}",
        if framed == 1 { "" } else { "s" },
        framed - valid,
        if framed - valid == 1 { "" } else { "es" }
    );

    Ok(())
}

/// Upper-case label for a message type.
fn type_label(message_type: MessageType) -> String {
    match message_type {
        MessageType::System => "SYSTEM".into(),
        MessageType::Tare => "TARE".into(),
        MessageType::Info => "INFO".into(),
        MessageType::Status => "STATUS".into(),
        MessageType::Identify => "IDENTIFY".into(),
        MessageType::Event => "EVENT".into(),
        MessageType::Timer => "TIMER".into(),
        MessageType::Unknown(id) => format!("0x{id:02X}"),
    }
}
