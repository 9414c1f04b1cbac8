//! # scopelint_core
//!
//! Scoped text extraction for ScopeLint.
//!
//! This crate provides:
//! - The `Extractor`, which turns rendered HTML into scoped blocks
//! - The `Walker`, which recovers each block's line in the original source
//! - Scope tables and their configuration
//! - Comment extraction for literal source files
//!
//! ## Example
//!
//! ```rust
//! use scopelint_core::{Document, ScopeTables, extract_blocks};
//!
//! let source = "# Setup\n\nInstall the [tool](https://example.com).\n";
//! let html = "<h1>Setup</h1>\n<p>Install the <a href=\"https://example.com\">tool</a>.</p>\n";
//!
//! let tables = ScopeTables::default();
//! let blocks = extract_blocks(&Document::new(source, ".md"), html, &tables);
//!
//! let heading = blocks.first("text.heading.h1.md").unwrap();
//! assert_eq!(heading.text, "Setup");
//! assert_eq!(heading.line, Some(1));
//!
//! let prose = blocks.first("txt.md").unwrap();
//! assert_eq!(prose.text, "Install the tool.");
//! assert_eq!(prose.line, Some(3));
//! ```

mod block;
pub mod code;
mod config;
mod error;
mod extractor;
pub mod mask;
pub mod scope;
pub mod walker;

pub use block::{Block, BlockCollector, BlockKind, BlockSink, OwnedBlock};
pub use code::{CommentSyntax, lint_code};
pub use config::{ExtractConfig, Format};
pub use error::ExtractError;
pub use extractor::{Document, Extractor, extract_blocks};
pub use scope::ScopeTables;
pub use walker::Walker;
