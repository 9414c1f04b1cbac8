//! HTML input error types.

use thiserror::Error;

/// Errors that can occur before tokenization starts.
///
/// Tokenization itself never fails: malformed markup is handed back as text.
#[derive(Debug, Error)]
pub enum HtmlError {
    /// The rendered input is not valid UTF-8.
    #[error("Invalid encoding: {message}")]
    InvalidEncoding {
        /// Error message.
        message: String,
        /// Byte offset of the first invalid sequence.
        offset: usize,
    },
}

impl HtmlError {
    /// Creates a new invalid encoding error.
    pub fn invalid_encoding(message: impl Into<String>, offset: usize) -> Self {
        Self::InvalidEncoding {
            message: message.into(),
            offset,
        }
    }
}

impl From<std::str::Utf8Error> for HtmlError {
    fn from(err: std::str::Utf8Error) -> Self {
        Self::invalid_encoding(err.to_string(), err.valid_up_to())
    }
}
