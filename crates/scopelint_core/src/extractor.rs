//! Scoped block extraction from rendered HTML.
//!
//! The extractor walks the token stream once, accumulating the text of the
//! current block and the tags it was opened under. At every block-level end
//! tag the accumulated text is classified, handed to the sink with its
//! recovered source line, and consumed from the walker's context.

use scopelint_html::{HtmlToken, TokenKind, TokenStream};
use tracing::debug;

use crate::mask::{clean, in_highlighted_code};
use crate::{Block, BlockCollector, BlockSink, ExtractError, Format, ScopeTables, Walker};

/// Tags whose URL-like attributes are consumed from the context.
const ATTRIBUTE_TAGS: &[&str] = &["img", "a", "p", "script"];

/// Attributes whose values are consumed from the context.
const CONSUMED_ATTRIBUTES: &[&str] = &["href", "id", "src"];

/// A source document and the metadata needed to lint its rendering.
#[derive(Debug, Clone)]
pub struct Document<'a> {
    /// Original source text.
    pub content: &'a str,
    /// Real extension with a leading dot (e.g. `.md`), appended to scopes.
    pub extension: String,
    /// Normalized markup family.
    pub format: Format,
    /// Lines preceding the document in its enclosing file.
    pub line_offset: usize,
}

impl<'a> Document<'a> {
    /// Creates a document from its source and file extension.
    pub fn new(content: &'a str, extension: &str) -> Self {
        let extension = if extension.is_empty() || extension.starts_with('.') {
            extension.to_string()
        } else {
            format!(".{}", extension)
        };
        Self {
            content,
            format: Format::from_extension(&extension),
            extension,
            line_offset: 0,
        }
    }

    /// Sets the number of lines preceding the document.
    pub fn with_line_offset(mut self, line_offset: usize) -> Self {
        self.line_offset = line_offset;
        self
    }
}

/// Drives one extraction pass per call.
#[derive(Debug, Clone, Copy)]
pub struct Extractor<'t> {
    tables: &'t ScopeTables,
}

/// Per-pass accumulation state.
#[derive(Debug, Default)]
struct BlockState {
    /// Paragraph text accumulated since the last boundary.
    buffer: String,
    /// Prose-only text of the whole document.
    summary: String,
    /// Inside a skip-tag subtree.
    suppressed: bool,
    /// The last opened tag was inline.
    inline: bool,
    /// The next text fragment is masked.
    skip: bool,
    /// The previous token carried a skipped class.
    skip_class: bool,
}

impl<'t> Extractor<'t> {
    /// Creates an extractor over resolved tables.
    pub fn new(tables: &'t ScopeTables) -> Self {
        Self { tables }
    }

    /// Extracts every scoped block of `html` into `sink`.
    ///
    /// The pass always ends with two document-wide blocks: the prose
    /// summary (`summary<ext>`) and the raw source (`raw<ext>`).
    pub fn extract<S: BlockSink + ?Sized>(&self, document: &Document<'_>, html: &str, sink: &mut S) {
        debug!(
            "Extracting blocks from {} bytes of rendered {}",
            html.len(),
            document.extension
        );
        self.run(document, TokenStream::new(html), sink);
    }

    /// Extracts from rendered markup given as raw bytes.
    ///
    /// Fails only if the bytes are not valid UTF-8; nothing is emitted then.
    pub fn extract_bytes<S: BlockSink + ?Sized>(
        &self,
        document: &Document<'_>,
        html: &[u8],
        sink: &mut S,
    ) -> Result<(), ExtractError> {
        let stream = TokenStream::from_bytes(html)?;
        debug!(
            "Extracting blocks from {} bytes of rendered {}",
            html.len(),
            document.extension
        );
        self.run(document, stream, sink);
        Ok(())
    }

    fn run<S: BlockSink + ?Sized>(
        &self,
        document: &Document<'_>,
        mut stream: TokenStream<'_>,
        sink: &mut S,
    ) {
        let mut walker = Walker::new(document.content, document.line_offset);
        let mut state = BlockState::default();

        loop {
            let (kind, token, text) = stream.walk();
            match kind {
                TokenKind::EndOfStream => break,
                TokenKind::StartTag if !state.suppressed && self.tables.is_skip_tag(&text) => {
                    state.suppressed = true;
                }
                TokenKind::StartTag | TokenKind::EndTag
                    if state.suppressed && self.tables.is_skip_tag(&text) =>
                {
                    state.suppressed = false;
                }
                TokenKind::StartTag => {
                    state.inline = self.tables.is_inline(&text);
                    state.skip = self.tables.is_skipped_content(&text);
                    walker.add_tag(&text);
                }
                TokenKind::EndTag => {
                    if self.tables.is_inline(&text) {
                        walker.clear_active_tag();
                    }
                }
                TokenKind::Comment => sink.comment(&text),
                TokenKind::Text => self.on_text(document, &text, &mut walker, &mut state, sink),
            }

            if kind == TokenKind::EndTag && !self.tables.is_inline(&text) {
                if !state.buffer.trim().is_empty() {
                    self.lint_scope(document, &walker, &mut state, sink);
                }
                walker.reset();
                state.buffer.clear();
            }

            state.skip_class = token
                .attr("class")
                .is_some_and(|class| self.tables.has_skip_class(class));

            if kind == TokenKind::StartTag {
                consume_attributes(&mut walker, &token);
                if let Some(alt) = token.attr("alt").filter(|_| token.data == "img") {
                    sink.lint_text(walker.block(alt, "text.attr.alt"));
                }
            }
        }

        let summary_scope = format!("summary{}", document.extension);
        sink.lint_text(Block::new(document.content, &state.summary, &summary_scope));

        let raw_scope = format!("raw{}", document.extension);
        sink.lint_text(Block::new("", document.content, &raw_scope));

        debug!("Finished extraction at line {}", walker.current_line());
    }

    fn on_text<S: BlockSink + ?Sized>(
        &self,
        document: &Document<'_>,
        text: &str,
        walker: &mut Walker,
        state: &mut BlockState,
        sink: &mut S,
    ) {
        if state.suppressed {
            // Consumed at the next boundary so later prose can't match it.
            walker.defer(text);
            return;
        }

        state.skip = state.skip || in_highlighted_code(walker.tag_history(), document.format);

        // Inline scoped text (link text, emphasis, …) is linted on its own
        // and again as part of the paragraph.
        if !text.is_empty()
            && let Some(scope) = walker
                .active_tag()
                .and_then(|tag| self.tables.inline_scope(tag))
        {
            let context = walker.transient_context();
            let line = walker.transient_line(&context, text);
            debug!("Inline {} block at line {}", scope, line);
            sink.lint_text(Block::lined(&context, text, scope, line));
            walker.clear_active_tag();
        }

        walker.append(text);
        if !text.is_empty() {
            let cleaned = clean(
                text,
                document.format,
                state.skip,
                state.skip_class,
                state.inline,
            );
            state.buffer.push_str(&cleaned);
            state.skip = false;
        }
    }

    fn lint_scope<S: BlockSink + ?Sized>(
        &self,
        document: &Document<'_>,
        walker: &Walker,
        state: &mut BlockState,
        sink: &mut S,
    ) {
        match self.tables.resolve(walker.tag_history(), &document.extension) {
            Some(scope) => {
                let text = state.buffer.trim_start_matches(' ');
                let block = walker.block(text, &scope);
                debug!("Scoped block {} at line {:?}", scope, block.line);
                sink.lint_text(block);
            }
            None => {
                // Headings, list items and table cells stay out of the summary.
                if !state.summary.is_empty() {
                    state.summary.push(' ');
                }
                state.summary.push_str(state.buffer.trim());

                let scope = format!("txt{}", document.extension);
                let block = walker.block(&state.buffer, &scope);
                debug!("Prose block at line {:?}", block.line);
                sink.lint_prose(block);
            }
        }
    }
}

/// Marks link targets, ids and sources as seen so prose never matches them.
fn consume_attributes(walker: &mut Walker, token: &HtmlToken) {
    if !ATTRIBUTE_TAGS.contains(&token.data.as_str()) {
        return;
    }
    for attr in &token.attrs {
        if CONSUMED_ATTRIBUTES.contains(&attr.name.as_str()) {
            walker.consume(&attr.value);
        }
    }
}

/// Runs one pass with the given tables and collects every block.
pub fn extract_blocks(document: &Document<'_>, html: &str, tables: &ScopeTables) -> BlockCollector {
    let mut collector = BlockCollector::new();
    Extractor::new(tables).extract(document, html, &mut collector);
    collector
}
