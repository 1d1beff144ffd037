//! Error type shared by every codec and the format dispatcher.

use thiserror::Error;

/// Errors raised by the strict decoding tier and the stream dispatcher.
///
/// Grammar violations in any wire format surface as [`OsdError::Malformed`].
/// The lenient XML entry points never return this type; they map every
/// failure to [`crate::Osd::Undefined`].
#[derive(Debug, Error)]
pub enum OsdError {
    /// The input does not follow the grammar of the chosen format.
    #[error("malformed structured data: {0}")]
    Malformed(String),
    /// A stream passed to format detection cannot seek back to its start.
    #[error("format detection requires seekable input")]
    NotSeekable,
    /// The input ended before a complete value was read.
    #[error("unexpected end of stream")]
    UnexpectedEof,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl OsdError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        OsdError::Malformed(msg.into())
    }
}

pub type Result<T, E = OsdError> = std::result::Result<T, E>;
