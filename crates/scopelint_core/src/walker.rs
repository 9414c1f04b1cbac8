//! Source line recovery for text extracted from rendered markup.
//!
//! The walker keeps a copy of the original document (the *remaining
//! context*) and searches it for each fragment of rendered text to find the
//! source line the fragment came from. Once a block is finished its fragments
//! are overwritten in place with [`SENTINEL`] characters, so text that has
//! already been attributed to a line can never be matched again. Repeated
//! phrases (a heading repeated in a table of contents, boilerplate) are
//! therefore attributed to successive occurrences instead of the first one.
//!
//! Searching is two-tiered, per line of the fragment:
//!
//! 1. the whole line as an exact substring;
//! 2. failing that, each whitespace-delimited word, keeping the position of
//!    the last word. Rendering often reflows whitespace, so whole lines may
//!    not survive.
//!
//! Positions are only accepted when they move the line cursor forward. An
//! unfound fragment leaves the cursor alone: reporting an earlier, correct
//! line is preferred over jumping to an unrelated later one.

use tracing::trace;

use crate::Block;

/// Character written over consumed context.
///
/// ASCII, so each replaced byte keeps the context's byte length and offsets
/// unchanged. Newlines are never replaced.
pub const SENTINEL: char = '@';

/// Per-document position recovery state.
#[derive(Debug, Clone)]
pub struct Walker {
    /// Lines preceding the document in its enclosing file.
    lines: usize,
    context: String,
    /// Highest 0-indexed context line recovered so far.
    cursor: usize,
    /// Fragments seen since the last block boundary.
    queue: Vec<String>,
    /// Tags opened since the last block boundary, outermost first.
    tag_history: Vec<String>,
    active_tag: Option<String>,
}

impl Walker {
    /// Creates a walker over a document's source text.
    ///
    /// `lines` is the number of lines preceding the document when it is
    /// embedded in a larger file.
    pub fn new(context: &str, lines: usize) -> Self {
        Self {
            lines,
            context: context.to_string(),
            cursor: 0,
            queue: Vec::new(),
            tag_history: Vec::new(),
            active_tag: None,
        }
    }

    /// Returns the remaining (partially consumed) context.
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Returns the 0-indexed context line of the cursor.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns the 1-indexed source line of the cursor.
    pub fn current_line(&self) -> usize {
        self.source_line(self.cursor)
    }

    fn source_line(&self, index: usize) -> usize {
        self.lines + index + 1
    }

    /// Returns the fragments queued since the last block boundary.
    pub fn queue(&self) -> &[String] {
        &self.queue
    }

    /// Returns the tags opened since the last block boundary.
    pub fn tag_history(&self) -> &[String] {
        &self.tag_history
    }

    /// Returns the most recently opened tag still in scope.
    pub fn active_tag(&self) -> Option<&str> {
        self.active_tag.as_deref()
    }

    pub fn clear_active_tag(&mut self) {
        self.active_tag = None;
    }

    /// Records an opened tag.
    pub fn add_tag(&mut self, name: &str) {
        self.tag_history.push(name.to_string());
        self.active_tag = Some(name.to_string());
    }

    /// Queues a fragment, moving the cursor forward if its position is found.
    pub fn append(&mut self, fragment: &str) {
        if fragment.is_empty() {
            return;
        }

        match self.advance(fragment) {
            Some(line) => self.cursor = line,
            None => trace!("No new position for fragment {:?}", fragment),
        }
        self.queue.push(fragment.to_string());
    }

    /// Queues a fragment for consumption without searching for it.
    ///
    /// Used for suppressed text, which must never move the cursor.
    pub fn defer(&mut self, fragment: &str) {
        if !fragment.is_empty() {
            self.queue.push(fragment.to_string());
        }
    }

    /// Locates a fragment and returns its 0-indexed line.
    ///
    /// Returns `None` when the fragment cannot be found or is not past the
    /// cursor.
    pub fn advance(&self, fragment: &str) -> Option<usize> {
        let pos = locate(&self.context, fragment)?;
        let line = line_index(&self.context, pos);
        (line > self.cursor).then_some(line)
    }

    /// Returns the byte position of a fragment in the remaining context,
    /// regardless of the cursor.
    pub fn find(&self, fragment: &str) -> Option<usize> {
        locate(&self.context, fragment)
    }

    /// Ends the current block.
    ///
    /// Every queued fragment is consumed from the context, then the queue
    /// and tag history are cleared.
    pub fn reset(&mut self) {
        for fragment in self.queue.drain(..) {
            consume(&mut self.context, &fragment);
        }
        self.tag_history.clear();
    }

    /// Consumes text that is known not to be prose (attribute values).
    pub fn consume(&mut self, text: &str) {
        consume(&mut self.context, text);
    }

    /// Returns the context as it will look once the queued fragments are
    /// consumed, without touching the walker.
    pub fn transient_context(&self) -> String {
        let mut context = self.context.clone();
        for fragment in &self.queue {
            consume(&mut context, fragment);
        }
        context
    }

    /// Returns the 1-indexed source line of a fragment searched for in a
    /// transient context, falling back to the cursor.
    pub fn transient_line(&self, context: &str, fragment: &str) -> usize {
        let index = locate(context, fragment)
            .map(|pos| line_index(context, pos))
            .filter(|&line| line > self.cursor)
            .unwrap_or(self.cursor);
        self.source_line(index)
    }

    /// Packages a finished block.
    ///
    /// The block's text is searched once more since it may have been joined
    /// or trimmed differently from the fragments that moved the cursor; the
    /// later of the two lines wins.
    pub fn block<'a>(&'a self, text: &'a str, scope: &'a str) -> Block<'a> {
        let index = self.advance(text).unwrap_or(self.cursor);
        Block::lined(&self.context, text, scope, self.source_line(index))
    }
}

/// Two-tier search; the last line of the fragment decides.
fn locate(haystack: &str, fragment: &str) -> Option<usize> {
    let mut pos = None;
    for line in fragment.split('\n').filter(|l| !l.is_empty()) {
        pos = haystack.find(line).or_else(|| {
            line.split_whitespace()
                .next_back()
                .and_then(|word| haystack.find(word))
        });
    }
    pos
}

fn line_index(haystack: &str, pos: usize) -> usize {
    haystack.as_bytes()[..pos]
        .iter()
        .filter(|&&b| b == b'\n')
        .count()
}

/// Destructively consumes a fragment using the same two-tier search.
fn consume(haystack: &mut String, text: &str) {
    for line in text.split('\n') {
        if !substitute(haystack, line) {
            for word in line.split_whitespace() {
                substitute(haystack, word);
            }
        }
    }
}

/// Overwrites the first occurrence of `needle` with sentinels of equal byte
/// length.
fn substitute(haystack: &mut String, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    let Some(start) = haystack.find(needle) else {
        return false;
    };

    let mut replacement = String::with_capacity(needle.len());
    for c in needle.chars() {
        if c == '\n' {
            replacement.push(c);
        } else {
            replacement.extend(std::iter::repeat_n(SENTINEL, c.len_utf8()));
        }
    }
    haystack.replace_range(start..start + needle.len(), &replacement);
    true
}
