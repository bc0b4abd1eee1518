//! Error types for tus uploads.
//!
//! Every fallible operation in this crate returns [`Result`], whose error type
//! is [`TusError`]. Only [`TusError::Transport`] is considered retryable: a
//! response that arrives with an unexpected status is a protocol-level
//! rejection and is surfaced immediately.
//!
//! Failures raised inside the chunk transfer loop are wrapped in
//! [`TusError::BrokenUpload`]; use [`TusError::cause`] to reach the
//! underlying reason.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for tus operations
pub type Result<T> = std::result::Result<T, TusError>;

/// Errors that can occur while talking to a tus server
#[derive(Error, Debug)]
pub enum TusError {
    /// The session has no transport (it was closed)
    #[error("Session is not initialized")]
    SessionUninitialized,

    /// The server does not advertise the extension needed for this operation
    #[error("Server does not support the '{0}' extension")]
    UnsupportedOperation(String),

    /// The total upload size is not known upfront
    #[error("Upload size is unknown")]
    UnknownSize,

    /// The server answered the creation request with a status other than 201
    #[error("Cannot create remote resource: server responded with status {0}")]
    ResourceCreationFailed(u16),

    /// The server response is missing a required header or carries an invalid value
    #[error("Malformed server response: {0}")]
    MalformedServerResponse(String),

    /// The server answered a chunk upload with a status other than 204
    #[error("Chunk upload at offset {offset} failed with status {status}")]
    ChunkUploadFailed {
        /// Offset the chunk was sent at
        offset: u64,
        /// Status code returned by the server
        status: u16,
    },

    /// The server acknowledged a different offset than the client accounted for
    #[error("Chunk upload broken: expected server offset {expected}, got {actual}")]
    ChunkUploadBroken {
        /// Offset the client expected after the chunk
        expected: u64,
        /// Offset reported by the server
        actual: u64,
    },

    /// The byte source ran out before the declared length was reached
    #[error("Upload incomplete: sent {offset} of {length} bytes")]
    IncompleteUpload {
        /// Final offset reached
        offset: u64,
        /// Declared total length
        length: u64,
    },

    /// The transfer loop was interrupted
    #[error("Broken upload: {0}")]
    BrokenUpload(#[source] Box<TusError>),

    /// The transport failed before a response was received
    #[error("Transport error: {0}")]
    Transport(String),

    /// The path to upload is not a regular file
    #[error("No such file: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Reading from the byte source failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A server URL or location could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl TusError {
    /// Check if this error may succeed when the request is attempted again
    pub fn is_retryable(&self) -> bool {
        matches!(self, TusError::Transport(_))
    }

    /// The innermost error, looking through any [`TusError::BrokenUpload`] wrappers
    pub fn cause(&self) -> &TusError {
        match self {
            TusError::BrokenUpload(inner) => inner.cause(),
            other => other,
        }
    }
}

impl From<reqwest::Error> for TusError {
    fn from(err: reqwest::Error) -> Self {
        TusError::Transport(err.to_string())
    }
}
