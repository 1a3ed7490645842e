/// Implementation of `acaia encode`.
///
/// Prints one of the fixed host commands as a hex line, ready to be
/// written to the scale's characteristic by whatever BLE tool is at hand.
///
/// ```text
/// $ acaia encode heartbeat
/// EF DD 00 02 00 02 00
/// ```
use acaia_encoder::commands::Command;
use anyhow::{Result, anyhow};

use crate::EncodeArgs;
use crate::capture::{self, to_hex};

/// Run the `acaia encode` command.
///
/// # Errors
///
/// Returns an error for an unknown command or checksum name.
pub fn run(args: &EncodeArgs) -> Result<()> {
    let command = Command::from_name(&args.command).ok_or_else(|| {
        anyhow!(
            "unknown command {:?} (expected heartbeat, identify, notifications or battery)",
            args.command
        )
    })?;
    let variant = capture::checksum_variant(&args.checksum)?;

    let bytes = command.encode(variant)?;
    println!("{}", to_hex(&bytes));
    Ok(())
}
