use thiserror::Error;

/// Result type for every parser in this crate
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// A parser could not consume the input it required
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} at position {position}")]
pub struct ParseError {
    /// Human readable description of what was expected
    pub message: String,

    /// Cursor position (byte offset) when the mismatch was detected
    pub position: usize,
}

impl ParseError {
    pub fn new(message: impl Into<String>, position: usize) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }
}
