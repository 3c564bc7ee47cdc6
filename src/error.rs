//! Error types and handling for logstream
//!
//! Every fallible operation in the crate returns [`StreamResult`]. Errors
//! raised by a generator are parked in the stream's head slot and reported
//! by the first `head`/`get` that needs the failed element, so the variants
//! are `Clone` and can be handed out more than once.

/// Main error type for stream operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StreamError {
    /// Malformed constructor input (wrong arity, zero lookahead, bad config)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A required piece of source configuration was not given
    #[error("Missing argument: {0}")]
    MissingArgument(String),

    /// A required piece of source configuration was given but empty
    #[error("Empty argument: {0}")]
    EmptyArgument(String),

    /// `discard`, `rewind` or `saved` called without an active bookmark
    #[error("No bookmark set")]
    NoBookmark,

    /// I/O failure from an underlying source
    #[error("IO error: {0}")]
    IO(String),
}

impl From<std::io::Error> for StreamError {
    fn from(err: std::io::Error) -> Self {
        StreamError::IO(err.to_string())
    }
}

impl From<serde_json::Error> for StreamError {
    fn from(err: serde_json::Error) -> Self {
        StreamError::InvalidArgument(format!("invalid configuration: {}", err))
    }
}

/// Result type for logstream operations
pub type StreamResult<T> = Result<T, StreamError>;
