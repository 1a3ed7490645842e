use std::collections::VecDeque;

use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::debug;

use crate::config::DecoderConfig;
use crate::error::DecodeError;
use crate::session::{ScaleSession, SessionEvent};

/// Bytes requested from the reader per read call.
const READ_CHUNK: usize = 512;

/// Asynchronous adapter that yields session events from any reader.
///
/// The reader can be a notification pipe from a BLE stack, a socket, or
/// a capture file. Whatever chunk sizes it delivers, the events are the
/// same as feeding the whole stream at once; a read only happens when
/// the caller awaits the next event and nothing is pending.
///
/// ```text
///   reader ──read()──▶ ScaleSession::on_bytes ──▶ pending ──next()──▶ caller
/// ```
///
/// # Example
///
/// ```rust,no_run
/// use acaia_decoder::StreamingDecoder;
/// use tokio::io::AsyncRead;
///
/// async fn print_events(reader: impl AsyncRead + Unpin) {
///     let mut stream = StreamingDecoder::new(reader);
///     while let Some(event) = stream.next().await.transpose().unwrap() {
///         println!("{event:?}");
///     }
/// }
/// ```
pub struct StreamingDecoder<R> {
    reader: R,
    session: ScaleSession,
    pending: VecDeque<SessionEvent>,
    buf: Vec<u8>,
    done: bool,
}

impl<R: AsyncRead + Unpin> StreamingDecoder<R> {
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, DecoderConfig::default())
    }

    #[must_use]
    pub fn with_config(reader: R, config: DecoderConfig) -> Self {
        Self {
            reader,
            session: ScaleSession::with_config(config),
            pending: VecDeque::new(),
            buf: vec![0; READ_CHUNK],
            done: false,
        }
    }

    /// Await the next event.
    ///
    /// Returns `None` once the reader hits EOF and every event decoded
    /// before it has been handed out. Bytes of an incomplete final packet
    /// are left in the session. A read error is returned once, after
    /// which the stream is finished.
    pub async fn next(&mut self) -> Option<Result<SessionEvent, DecodeError>> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(Ok(event));
            }
            if self.done {
                return None;
            }

            match self.reader.read(&mut self.buf).await {
                Ok(0) => {
                    debug!(leftover = self.session.buffered(), "reader reached EOF");
                    self.done = true;
                }
                Ok(n) => {
                    let events = self.session.on_bytes(&self.buf[..n]);
                    self.pending.extend(events);
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(DecodeError::Io(e)));
                }
            }
        }
    }

    /// The session behind the stream, for its state and counters.
    #[must_use]
    pub fn session(&self) -> &ScaleSession {
        &self.session
    }

    /// Give back the reader and the session.
    pub fn into_parts(self) -> (R, ScaleSession) {
        (self.reader, self.session)
    }
}
