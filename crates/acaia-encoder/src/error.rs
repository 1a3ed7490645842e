/// Errors that can occur while building an outbound packet.
///
/// ```text
///   EncodeError
///   └── BodyTooLong   ← body exceeds what one length byte can describe
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error("packet body too long ({len} bytes, limit {max})")]
    BodyTooLong { len: usize, max: usize },
}
