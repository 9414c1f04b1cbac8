//! Token types produced by the stream.

/// The kind of an HTML token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// An opening tag such as `<p>` or a self-closing `<img />`.
    StartTag,
    /// A closing tag such as `</p>`.
    EndTag,
    /// A run of character data.
    Text,
    /// An HTML comment.
    Comment,
    /// The input is exhausted.
    EndOfStream,
}

/// A single tag attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Local attribute name, lowercased by the tokenizer.
    pub name: String,
    /// Attribute value with entities decoded.
    pub value: String,
}

impl Attribute {
    /// Creates a new attribute.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A raw token as seen in the rendered markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlToken {
    /// Token kind.
    pub kind: TokenKind,
    /// Tag name for tags, untrimmed character data for text and comments.
    pub data: String,
    /// Attributes (start tags only).
    pub attrs: Vec<Attribute>,
    /// Whether the tag was written as `<tag />`.
    pub self_closing: bool,
}

impl HtmlToken {
    pub(crate) fn tag(
        kind: TokenKind,
        name: impl Into<String>,
        attrs: Vec<Attribute>,
        self_closing: bool,
    ) -> Self {
        Self {
            kind,
            data: name.into(),
            attrs,
            self_closing,
        }
    }

    pub(crate) fn text(kind: TokenKind, data: impl Into<String>) -> Self {
        Self {
            kind,
            data: data.into(),
            attrs: Vec::new(),
            self_closing: false,
        }
    }

    pub(crate) fn end_of_stream() -> Self {
        Self::text(TokenKind::EndOfStream, String::new())
    }

    /// Returns the value of the named attribute, if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Returns true if this is a start or end tag with the given name.
    pub fn is_tag(&self, name: &str) -> bool {
        matches!(self.kind, TokenKind::StartTag | TokenKind::EndTag) && self.data == name
    }

    /// Returns the normalized text of this token.
    ///
    /// Outer whitespace is trimmed. Comment bodies are entity-decoded here;
    /// text and attribute values are already decoded by the tokenizer.
    pub fn normalized(&self) -> String {
        let trimmed = self.data.trim();
        match self.kind {
            TokenKind::Comment => html_escape::decode_html_entities(trimmed).into_owned(),
            _ => trimmed.to_string(),
        }
    }
}
