//! Scoped blocks and the sink they are delivered to.

/// A unit of text handed to rule evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'a> {
    /// Remaining document context at the time the block was emitted.
    pub context: &'a str,
    /// The text to lint.
    pub text: &'a str,
    /// Dotted scope name, e.g. `text.table.cell.md`.
    pub scope: &'a str,
    /// 1-indexed source line, `None` when the block spans the document.
    pub line: Option<usize>,
    /// Column padding of the text within its line.
    pub column: usize,
}

impl<'a> Block<'a> {
    /// Creates a block that is located by searching its context.
    pub fn new(context: &'a str, text: &'a str, scope: &'a str) -> Self {
        Self {
            context,
            text,
            scope,
            line: None,
            column: 0,
        }
    }

    /// Creates a block anchored to a known source line.
    pub fn lined(context: &'a str, text: &'a str, scope: &'a str, line: usize) -> Self {
        Self {
            line: Some(line),
            ..Self::new(context, text, scope)
        }
    }

    /// Sets the column padding.
    pub fn with_column(mut self, column: usize) -> Self {
        self.column = column;
        self
    }

    /// Copies the block out of the pass.
    pub fn to_owned_block(&self, kind: BlockKind) -> OwnedBlock {
        OwnedBlock {
            context: self.context.to_string(),
            text: self.text.to_string(),
            scope: self.scope.to_string(),
            line: self.line,
            column: self.column,
            kind,
        }
    }
}

/// Receiver of emitted blocks.
///
/// Delivery is fire-and-forget: the pass never looks at what a sink does
/// with a block.
pub trait BlockSink {
    /// Lints a scoped fragment.
    fn lint_text(&mut self, block: Block<'_>);

    /// Lints a prose block (paragraph-level text with no specific scope).
    fn lint_prose(&mut self, block: Block<'_>) {
        self.lint_text(block);
    }

    /// Receives the body of an HTML comment.
    fn comment(&mut self, _text: &str) {}
}

/// Which sink entry point received a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Text,
    Prose,
}

/// An owned copy of a [`Block`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedBlock {
    pub context: String,
    pub text: String,
    pub scope: String,
    pub line: Option<usize>,
    pub column: usize,
    pub kind: BlockKind,
}

/// A sink that records everything it receives.
#[derive(Debug, Default)]
pub struct BlockCollector {
    /// Blocks in emission order.
    pub blocks: Vec<OwnedBlock>,
    /// Comment bodies in document order.
    pub comments: Vec<String>,
}

impl BlockCollector {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns blocks whose scope equals `scope`.
    pub fn with_scope<'s>(&'s self, scope: &'s str) -> impl Iterator<Item = &'s OwnedBlock> + 's {
        self.blocks.iter().filter(move |b| b.scope == scope)
    }

    /// Returns the first block with the given scope.
    pub fn first(&self, scope: &str) -> Option<&OwnedBlock> {
        self.blocks.iter().find(|b| b.scope == scope)
    }
}

impl BlockSink for BlockCollector {
    fn lint_text(&mut self, block: Block<'_>) {
        self.blocks.push(block.to_owned_block(BlockKind::Text));
    }

    fn lint_prose(&mut self, block: Block<'_>) {
        self.blocks.push(block.to_owned_block(BlockKind::Prose));
    }

    fn comment(&mut self, text: &str) {
        self.comments.push(text.to_string());
    }
}
