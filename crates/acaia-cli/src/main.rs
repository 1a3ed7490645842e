/// Acaia scale protocol tool: decode captured notification streams,
/// inspect their framing, and produce command packets.
///
/// # Command overview
///
/// ```text
/// acaia <COMMAND> [OPTIONS]
///
/// Commands:
///   decode     Feed a capture through a session and print measurements
///   inspect    List every framed packet with its checksum verdict
///   encode     Print a command packet as hex
///   help       Print help information
///
/// Global options:
///   -v, --verbose    Log decoder activity at debug level
///   -h, --help       Print help
///   -V, --version    Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                      |
/// |------|----------------------------------------------|
/// | 0    | Success                                      |
/// | 1    | Error (I/O failure, unparsable capture, etc.) |
///
/// Logs and errors go to stderr so stdout can be piped cleanly.
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod capture;
mod cmd_decode;
mod cmd_encode;
mod cmd_inspect;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// Command-line tool for the Acaia scale BLE protocol.
#[derive(Parser)]
#[command(name = "acaia", version, about = "Acaia scale protocol CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log decoder activity (debug level). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true)]
    verbose: bool,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Decode a capture and print the measurements it carries.
    Decode(DecodeArgs),
    /// List every framed packet in a capture.
    Inspect(InspectArgs),
    /// Print a command packet as hex.
    Encode(EncodeArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Options shared by every command that reads a capture.
#[derive(clap::Args)]
pub struct CaptureArgs {
    /// Capture file. Hex text unless `--raw`; `-` reads stdin.
    pub file: PathBuf,

    /// Treat the input as raw bytes instead of a hex dump.
    #[arg(long)]
    pub raw: bool,

    /// Checksum scheme: `split` (default) or `sum`.
    #[arg(long, default_value = "split")]
    pub checksum: String,
}

/// Arguments for `acaia decode`.
///
/// ```text
/// ┌──────────────────┬──────────────────────────────────────────────────┐
/// │ Flag             │ Effect                                           │
/// ├──────────────────┼──────────────────────────────────────────────────┤
/// │ --raw            │ Read raw bytes; with `-` the input is streamed   │
/// │ --chunk N        │ Feed N bytes per call (default: whole capture)   │
/// │ --json           │ Print a JSON report instead of text              │
/// │ --checksum NAME  │ split | sum                                      │
/// │ --max-buffer N   │ Noise cap while no header is buffered            │
/// └──────────────────┴──────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct DecodeArgs {
    #[command(flatten)]
    pub capture: CaptureArgs,

    /// Feed the capture to the session in chunks of this many bytes.
    #[arg(long)]
    pub chunk: Option<usize>,

    /// Emit a JSON report.
    #[arg(long)]
    pub json: bool,

    /// Bytes buffered without a header before they are discarded.
    #[arg(long, default_value_t = acaia_decoder::config::DEFAULT_MAX_BUFFER_LEN)]
    pub max_buffer: usize,
}

/// Arguments for `acaia inspect`.
#[derive(clap::Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub capture: CaptureArgs,
}

/// Arguments for `acaia encode`.
#[derive(clap::Args)]
pub struct EncodeArgs {
    /// `heartbeat`, `identify`, `notifications` or `battery`.
    pub command: String,

    /// Checksum scheme: `split` (default) or `sum`.
    #[arg(long, default_value = "split")]
    pub checksum: String,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Decode(args) => cmd_decode::run(&args),
        Commands::Inspect(args) => cmd_inspect::run(&args),
        Commands::Encode(args) => cmd_encode::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
