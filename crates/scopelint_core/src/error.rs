//! Extraction error types.

use thiserror::Error;

/// Errors that can occur while preparing an extraction pass.
///
/// The pass itself never fails; these only surface while resolving
/// configuration or comment syntaxes.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A comment syntax pattern failed to compile.
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The rendered markup could not be read.
    #[error("HTML error: {0}")]
    Html(#[from] scopelint_html::HtmlError),
}

impl ExtractError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
