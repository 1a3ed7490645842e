/// Implementation of `acaia decode`.
///
/// Runs a capture through a [`ScaleSession`] exactly as a live link
/// would deliver it, optionally in fixed-size chunks, and prints every
/// measurement and suggested reply followed by the final scale state.
///
/// # Output format
///
/// ```text
/// weight -0.04g stable
/// battery 47%
/// reply notification_request
/// ---
///   -0.04g ###   Battery:  47%   Timer: 00:00.000
/// packets: 2, checksum errors: 0, discarded bytes: 0
/// ```
///
/// `--json` prints the same information as one JSON document. With
/// `--raw -` the input is streamed from stdin through the async
/// [`StreamingDecoder`], so a BLE bridge can pipe notifications in.
use std::io::{self, Write as _};

use acaia_decoder::{
    AssemblerStats, DecoderConfig, Reply, ScaleSession, SessionEvent, StreamingDecoder,
};
use acaia_types::{Measurement, ScaleState};
use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::info;

use crate::DecodeArgs;
use crate::capture;

/// Run the `acaia decode` command.
///
/// # Errors
///
/// Returns an error if the capture cannot be read or parsed, a flag value
/// is invalid, or stdout cannot be written.
pub fn run(args: &DecodeArgs) -> Result<()> {
    let config = DecoderConfig::default()
        .with_checksum(capture::checksum_variant(&args.capture.checksum)?)
        .with_max_buffer_len(args.max_buffer);

    if args.chunk == Some(0) {
        bail!("--chunk must be at least 1");
    }

    let (events, session) = if args.capture.raw && capture::is_stdin(&args.capture) {
        stream_stdin(config)?
    } else {
        let bytes = capture::load(&args.capture)?;
        let mut session = ScaleSession::with_config(config);
        let chunk = args.chunk.unwrap_or(bytes.len()).max(1);
        info!(
            bytes = bytes.len(),
            chunk,
            file = %args.capture.file.display(),
            "decoding capture"
        );
        let events: Vec<SessionEvent> = bytes
            .chunks(chunk)
            .flat_map(|c| session.on_bytes(c))
            .collect();
        (events, session)
    };

    if session.buffered() > 0 {
        info!(leftover = session.buffered(), "capture ends inside a packet");
    }

    let report = Report::new(&events, &session);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.json {
        serde_json::to_writer_pretty(&mut out, &report).context("failed to write JSON")?;
        writeln!(out)?;
    } else {
        for line in &report.lines {
            writeln!(out, "{line}")?;
        }
        writeln!(out, "---")?;
        writeln!(out, "{}", session.state())?;
        writeln!(
            out,
            "packets: {}, checksum errors: {}, discarded bytes: {}",
            report.stats.packets, report.stats.checksum_errors, report.stats.discarded_bytes
        )?;
    }

    Ok(())
}

/// Drain stdin through the async adapter on a single-threaded runtime.
fn stream_stdin(config: DecoderConfig) -> Result<(Vec<SessionEvent>, ScaleSession)> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("cannot start async runtime")?;

    runtime.block_on(async {
        let mut stream = StreamingDecoder::with_config(tokio::io::stdin(), config);
        let mut events = Vec::new();
        while let Some(event) = stream.next().await {
            events.push(event.context("failed reading stdin")?);
        }
        let (_, session) = stream.into_parts();
        Ok::<_, anyhow::Error>((events, session))
    })
}

// ── JSON report ───────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct Report {
    #[serde(skip)]
    lines: Vec<String>,
    measurements: Vec<MeasurementRecord>,
    replies: Vec<&'static str>,
    state: StateRecord,
    stats: StatsRecord,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum MeasurementRecord {
    Weight {
        value: f64,
        unit: &'static str,
        stable: bool,
    },
    Battery {
        percent: u8,
    },
    Timer {
        minutes: u8,
        seconds: u8,
        millis: u8,
    },
    Key {
        code: u8,
    },
    Ack {
        bytes: [u8; 2],
    },
}

#[derive(Serialize)]
struct StateRecord {
    weight: f64,
    unit: &'static str,
    stable: bool,
    battery: u8,
    timer: String,
    last_key: Option<u8>,
}

#[derive(Serialize)]
struct StatsRecord {
    packets: u64,
    checksum_errors: u64,
    discarded_bytes: u64,
}

impl Report {
    fn new(events: &[SessionEvent], session: &ScaleSession) -> Self {
        let mut lines = Vec::new();
        let mut measurements = Vec::new();
        let mut replies = Vec::new();

        for event in events {
            match event {
                SessionEvent::Packet(_) => {}
                SessionEvent::Measurement(m) => {
                    lines.push(m.to_string());
                    measurements.push(MeasurementRecord::from(*m));
                }
                SessionEvent::Reply(r) => {
                    let name = reply_name(*r);
                    lines.push(format!("reply {name}"));
                    replies.push(name);
                }
            }
        }

        Self {
            lines,
            measurements,
            replies,
            state: StateRecord::from(session.state()),
            stats: StatsRecord::from(session.stats()),
        }
    }
}

fn reply_name(reply: Reply) -> &'static str {
    match reply {
        Reply::Identify => "identify",
        Reply::NotificationRequest => "notification_request",
    }
}

impl From<Measurement> for MeasurementRecord {
    fn from(m: Measurement) -> Self {
        match m {
            Measurement::Weight(w) => Self::Weight {
                value: w.value(),
                unit: w.unit.symbol(),
                stable: w.stable,
            },
            Measurement::Battery(percent) => Self::Battery { percent },
            Measurement::Timer(t) => Self::Timer {
                minutes: t.minutes,
                seconds: t.seconds,
                millis: t.millis,
            },
            Measurement::Key(code) => Self::Key { code },
            Measurement::Ack(bytes) => Self::Ack { bytes },
        }
    }
}

impl From<&ScaleState> for StateRecord {
    fn from(state: &ScaleState) -> Self {
        Self {
            weight: state.weight(),
            unit: state.unit().symbol(),
            stable: state.is_stable(),
            battery: state.battery,
            timer: state.timer.to_string(),
            last_key: state.last_key,
        }
    }
}

impl From<AssemblerStats> for StatsRecord {
    fn from(stats: AssemblerStats) -> Self {
        Self {
            packets: stats.packets,
            checksum_errors: stats.checksum_errors,
            discarded_bytes: stats.discarded_bytes,
        }
    }
}
