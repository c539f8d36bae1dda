use thiserror::Error;

/// Parser-level multipart failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Generic parser failure with message context.
    #[error("{message}")]
    Message {
        /// Parser failure message.
        message: String,
    },
}

impl ParseError {
    /// Creates a parser error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
        }
    }
}

/// Runtime error type used by the streaming reader.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Multipart parser failure.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Multipart stream ended before a complete terminal boundary.
    #[error("multipart stream ended unexpectedly")]
    IncompleteStream,
}
