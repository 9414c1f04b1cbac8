//! Comment extraction for literal source files.
//!
//! Source files are not rendered, so there is no markup to walk: comments
//! are found line by line with three patterns and emitted as
//! `text.comment.line<ext>` or `text.comment.block<ext>` blocks.

use regex::Regex;
use tracing::debug;

use crate::{Block, BlockSink, ExtractError};

const C_STYLE: [&str; 3] = [r"(//.+)|(/\*.+\*/)", r"(/\*.*)", r"(.*\*/)"];

const HASH_STYLE: [&str; 3] = [
    r#"(#.*)|('{3}.+'{3})|("{3}.+"{3})"#,
    r#"(?m)^\s*[rRuUbB]?("{3}|'{3}).*$"#,
    r#"(.*("{3}|'{3}))"#,
];

/// Comment patterns for one language.
#[derive(Debug, Clone)]
pub struct CommentSyntax {
    inline: Regex,
    block_start: Regex,
    block_end: Regex,
}

impl CommentSyntax {
    /// Compiles a syntax from its three patterns.
    pub fn new(inline: &str, block_start: &str, block_end: &str) -> Result<Self, ExtractError> {
        Ok(Self {
            inline: Regex::new(inline)?,
            block_start: Regex::new(block_start)?,
            block_end: Regex::new(block_end)?,
        })
    }

    /// Returns the built-in syntax for a file extension.
    pub fn for_extension(extension: &str) -> Option<Self> {
        let ext = extension.trim_start_matches('.').to_ascii_lowercase();
        let [inline, start, end] = match ext.as_str() {
            "c" | "h" | "cc" | "cpp" | "hpp" | "cs" | "go" | "java" | "js" | "jsx" | "ts"
            | "tsx" | "rs" | "swift" | "kt" | "scala" | "css" | "scss" | "less" => C_STYLE,
            "py" | "pyi" | "rb" | "sh" | "bash" | "zsh" | "pl" | "r" | "yml" | "yaml"
            | "toml" => HASH_STYLE,
            _ => return None,
        };
        Self::new(inline, start, end).ok()
    }
}

/// Scans a source file for comments and lints each one.
///
/// Returns the number of lines scanned.
pub fn lint_code<S: BlockSink + ?Sized>(
    source: &str,
    extension: &str,
    syntax: &CommentSyntax,
    sink: &mut S,
) -> usize {
    let ext = if extension.is_empty() || extension.starts_with('.') {
        extension.to_string()
    } else {
        format!(".{}", extension)
    };
    let line_scope = format!("text.comment.line{}", ext);
    let block_scope = format!("text.comment.block{}", ext);

    let mut lines = 0;
    let mut block = String::new();
    let mut block_line = 0;
    let mut in_block = false;
    let mut ignore = false;

    for raw in source.lines() {
        let line = format!("{}\n", raw.trim_end_matches('\r'));
        lines += 1;

        if in_block {
            block.push_str(&line);
            if syntax.block_end.is_match(&line) {
                sink.lint_text(Block::lined(&block, &block, &block_scope, block_line));
                block.clear();
                in_block = false;
            }
        } else if let Some(found) = syntax.inline.find(&line) {
            // Column padding: `print("x") # note` is reduced to `# note`.
            let padding = line.len() - found.as_str().len();
            let text = found.as_str();
            sink.lint_text(
                Block::lined(text, text, &line_scope, lines).with_column(padding.saturating_sub(1)),
            );
        } else if syntax.block_start.is_match(&line) && !ignore {
            block.push_str(&line);
            block_line = lines;
            in_block = true;
        } else if syntax.block_end.is_match(&line) {
            ignore = !ignore;
        }
    }

    debug!("Scanned {} lines of {} source", lines, ext);
    lines
}
