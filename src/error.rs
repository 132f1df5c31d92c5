//! Error types for compression and decompression.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::min_heap::QueueError;

/// Result type alias for codec operations.
pub type Result<T> = core::result::Result<T, HuffmanError>;

/// Codec error types.
#[derive(Debug, Error)]
pub enum HuffmanError {
    /// Source could not be opened or destination could not be created.
    #[error("cannot access {}: {source}", .path.display())]
    IoUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// I/O error from an already open stream.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Compression was asked to encode zero bytes.
    #[error("source is empty, nothing to compress")]
    EmptySource,

    /// Header integers or dictionary lines could not be parsed.
    #[error("malformed header: {0}")]
    MalformedHeader(String),

    /// Payload ran out before the declared symbol count was reached.
    #[error("payload truncated: decoded {decoded} of {expected} symbols")]
    TruncatedPayload { decoded: u64, expected: u64 },

    /// A payload bit led to a child the code tree does not have.
    #[error("structural corruption: bit path left the code tree after {decoded} symbols")]
    StructuralCorruption { decoded: u64 },

    #[error(transparent)]
    Queue(#[from] QueueError),

    /// A queue script token could not be parsed.
    #[error("invalid queue script: {0}")]
    InvalidScript(String),

    /// Configuration file missing or invalid.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl HuffmanError {
    /// Create a malformed header error.
    pub fn malformed(message: impl Into<String>) -> Self {
        HuffmanError::MalformedHeader(message.into())
    }

    pub(crate) fn unavailable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        HuffmanError::IoUnavailable {
            path: path.into(),
            source,
        }
    }

    /// Get error category for logging.
    pub fn category(&self) -> &'static str {
        match self {
            HuffmanError::IoUnavailable { .. } => "io_unavailable",
            HuffmanError::Io(_) => "io_error",
            HuffmanError::EmptySource => "empty_source",
            HuffmanError::MalformedHeader(_) => "malformed_header",
            HuffmanError::TruncatedPayload { .. } => "truncated_payload",
            HuffmanError::StructuralCorruption { .. } => "structural_corruption",
            HuffmanError::Queue(_) => "queue",
            HuffmanError::InvalidScript(_) => "invalid_script",
            HuffmanError::Config(_) => "config",
        }
    }
}
