//! Pull-based token stream backed by the html5ever tokenizer.

use std::collections::VecDeque;
use std::mem;
use std::str::SplitInclusive;

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
    TokenizerResult,
};
use tracing::trace;

use crate::{Attribute, HtmlError, HtmlToken, TokenKind};

/// A single-pass stream of HTML tokens.
///
/// Input is fed to the tokenizer one line at a time, only when no finished
/// token is pending. `walk` hands tokens out in document order and keeps
/// returning [`TokenKind::EndOfStream`] once the input is exhausted.
pub struct TokenStream<'a> {
    chunks: SplitInclusive<'a, char>,
    input: BufferQueue,
    tokenizer: Tokenizer<TokenCollector>,
    finished: bool,
}

impl<'a> TokenStream<'a> {
    /// Creates a stream over rendered HTML.
    pub fn new(html: &'a str) -> Self {
        Self {
            chunks: html.split_inclusive('\n'),
            input: BufferQueue::default(),
            tokenizer: Tokenizer::new(TokenCollector::default(), TokenizerOpts::default()),
            finished: false,
        }
    }

    /// Creates a stream over rendered HTML given as raw bytes.
    pub fn from_bytes(bytes: &'a [u8]) -> Result<Self, HtmlError> {
        let html = std::str::from_utf8(bytes)?;
        Ok(Self::new(html))
    }

    /// Returns the next `(kind, raw token, normalized text)` triple.
    pub fn walk(&mut self) -> (TokenKind, HtmlToken, String) {
        let token = self.pull().unwrap_or_else(HtmlToken::end_of_stream);
        let text = token.normalized();
        (token.kind, token, text)
    }

    fn pull(&mut self) -> Option<HtmlToken> {
        loop {
            if let Some(token) = self.tokenizer.sink.tokens.pop_front() {
                return Some(token);
            }
            if self.finished {
                return None;
            }

            match self.chunks.next() {
                Some(chunk) => {
                    self.input.push_back(StrTendril::from_slice(chunk));
                    // The sink never requests script execution.
                    if let TokenizerResult::Script(()) = self.tokenizer.feed(&mut self.input) {
                        trace!("Ignoring script pause");
                    }
                }
                None => {
                    self.tokenizer.end();
                    self.tokenizer.sink.flush_text();
                    self.finished = true;
                    trace!("Reached end of rendered input");
                }
            }
        }
    }
}

impl std::fmt::Debug for TokenStream<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStream")
            .field("pending", &self.tokenizer.sink.tokens.len())
            .field("finished", &self.finished)
            .finish()
    }
}

impl Iterator for TokenStream<'_> {
    type Item = HtmlToken;

    fn next(&mut self) -> Option<Self::Item> {
        self.pull()
    }
}

#[derive(Default)]
struct TokenCollector {
    tokens: VecDeque<HtmlToken>,
    text: String,
}

impl TokenCollector {
    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            let text = mem::take(&mut self.text);
            self.tokens.push_back(HtmlToken::text(TokenKind::Text, text));
        }
    }

    fn push_tag(&mut self, tag: Tag) -> TokenSinkResult<()> {
        self.flush_text();

        let kind = match tag.kind {
            TagKind::StartTag => TokenKind::StartTag,
            TagKind::EndTag => TokenKind::EndTag,
        };
        let name = tag.name.to_string();
        let attrs = tag
            .attrs
            .iter()
            .map(|attr| Attribute::new(attr.name.local.to_string(), attr.value.to_string()))
            .collect();

        let result = if kind == TokenKind::StartTag && !tag.self_closing {
            raw_content_state(&name)
        } else {
            TokenSinkResult::Continue
        };

        self.tokens
            .push_back(HtmlToken::tag(kind, name, attrs, tag.self_closing));
        result
    }
}

/// Elements whose bodies are not markup.
///
/// Without a tree builder the tokenizer has to be told to switch states,
/// otherwise `<script>` bodies would be tokenized as tags.
fn raw_content_state(name: &str) -> TokenSinkResult<()> {
    match name {
        "script" => TokenSinkResult::RawData(RawKind::ScriptData),
        "style" | "xmp" | "iframe" | "noembed" | "noframes" => {
            TokenSinkResult::RawData(RawKind::Rawtext)
        }
        "textarea" | "title" => TokenSinkResult::RawData(RawKind::Rcdata),
        "plaintext" => TokenSinkResult::Plaintext,
        _ => TokenSinkResult::Continue,
    }
}

impl TokenSink for TokenCollector {
    type Handle = ();

    fn process_token(&mut self, token: Token, line_number: u64) -> TokenSinkResult<()> {
        match token {
            Token::CharacterTokens(chars) => self.text.push_str(&chars),
            Token::TagToken(tag) => return self.push_tag(tag),
            Token::CommentToken(comment) => {
                self.flush_text();
                self.tokens
                    .push_back(HtmlToken::text(TokenKind::Comment, comment.to_string()));
            }
            Token::DoctypeToken(_) | Token::EOFToken => self.flush_text(),
            Token::NullCharacterToken => {}
            Token::ParseError(message) => {
                trace!("HTML parse error at line {}: {}", line_number, message);
            }
        }
        TokenSinkResult::Continue
    }
}
