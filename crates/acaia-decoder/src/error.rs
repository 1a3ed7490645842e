use acaia_wire::WireError;

/// Errors surfaced by the decoder crate.
///
/// Framing and event decoding never fail: corrupt input is dropped and
/// counted. Errors only come from the edges:
///
/// ```text
///   DecodeError
///   ├── Wire(WireError)    ← strict single-packet parsing
///   └── Io(std::io::Error) ← the reader behind StreamingDecoder
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error(transparent)]
    Wire(#[from] WireError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
