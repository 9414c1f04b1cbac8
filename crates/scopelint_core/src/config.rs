//! Extraction configuration.

use serde::{Deserialize, Serialize};

use crate::ExtractError;

/// User overrides for the scope tables.
///
/// Resolved once per pass into [`ScopeTables`](crate::ScopeTables); the
/// config itself is never consulted while tokens are being walked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ExtractConfig {
    /// Tags whose whole subtree is excluded. Replaces the defaults when set.
    #[serde(default)]
    pub skipped_scopes: Vec<String>,

    /// Extra class names whose content is masked. Added to the defaults.
    #[serde(default)]
    pub ignored_classes: Vec<String>,

    /// Tags whose content is masked but kept in the text flow.
    /// Replaces the defaults when set.
    #[serde(default)]
    pub ignored_scopes: Vec<String>,
}

impl ExtractConfig {
    /// Creates a new empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ExtractError> {
        serde_json::from_str(json)
            .map_err(|e| ExtractError::config(format!("Invalid config: {}", e)))
    }
}

/// Markup family a document was written in.
///
/// Drives the inline code delimiter used when masking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Markdown,
    ReStructuredText,
    AsciiDoc,
    Other,
}

impl Format {
    /// Normalizes a file extension (with or without the leading dot).
    pub fn from_extension(extension: &str) -> Self {
        let ext = extension.trim_start_matches('.').to_ascii_lowercase();
        match ext.as_str() {
            "md" | "markdown" | "mdown" | "mkd" | "mkdn" => Self::Markdown,
            "rst" | "rest" => Self::ReStructuredText,
            "adoc" | "asciidoc" | "asc" => Self::AsciiDoc,
            _ => Self::Other,
        }
    }

    /// Returns the delimiter wrapped around inline code spans.
    pub fn code_delimiter(&self) -> &'static str {
        match self {
            Self::Markdown | Self::AsciiDoc => "`",
            Self::ReStructuredText => "``",
            Self::Other => "",
        }
    }
}
