/// Capture loading shared by `decode` and `inspect`.
///
/// Captures are either raw notification bytes or a hex dump as written
/// by most BLE sniffers and loggers:
///
/// ```text
/// # weight, -0.04 g
/// EF DD 0C 08 05 04 00 00 00 02 02 0E 07
/// 0xEF,0xDD,0x00,0x02,0xFE,0x02,0xFE   # heartbeat ack
/// ```
///
/// Tokens are separated by whitespace or commas, may carry a `0x`
/// prefix, and may hold several bytes (`EFDD0C`). `#` starts a comment.
use std::fs;
use std::io::Read as _;

use acaia_wire::ChecksumVariant;
use anyhow::{Context, Result, anyhow};

use crate::CaptureArgs;

/// Read the capture named by `args` into memory.
///
/// # Errors
///
/// Returns an error if the file (or stdin) cannot be read or a hex token
/// is malformed.
pub fn load(args: &CaptureArgs) -> Result<Vec<u8>> {
    let bytes = if is_stdin(args) {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("cannot read stdin")?;
        buf
    } else {
        fs::read(&args.file).with_context(|| format!("cannot read {}", args.file.display()))?
    };

    if args.raw {
        return Ok(bytes);
    }

    let text = String::from_utf8(bytes).context("hex capture is not valid UTF-8")?;
    parse_hex(&text).with_context(|| format!("bad hex capture {}", args.file.display()))
}

/// `true` when the capture should come from stdin.
pub fn is_stdin(args: &CaptureArgs) -> bool {
    args.file.as_os_str() == "-"
}

/// Resolve `--checksum`.
///
/// # Errors
///
/// Returns an error for anything but `split` or `sum`.
pub fn checksum_variant(name: &str) -> Result<ChecksumVariant> {
    ChecksumVariant::from_name(name)
        .ok_or_else(|| anyhow!("unknown checksum variant {name:?} (expected split or sum)"))
}

/// Parse a hex dump into bytes.
///
/// # Errors
///
/// Names the line of the first token that is not an even run of hex digits.
pub fn parse_hex(text: &str) -> Result<Vec<u8>> {
    let mut out = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line = line.split_once('#').map_or(line, |(data, _)| data);
        for token in line
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
        {
            let digits = token
                .strip_prefix("0x")
                .or_else(|| token.strip_prefix("0X"))
                .unwrap_or(token);
            let bytes = hex::decode(digits)
                .with_context(|| format!("line {}: invalid hex token {token:?}", idx + 1))?;
            out.extend(bytes);
        }
    }

    Ok(out)
}

/// Format bytes as space-separated upper-case hex pairs.
pub fn to_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| hex::encode_upper([*b]))
        .collect::<Vec<_>>()
        .join(" ")
}
