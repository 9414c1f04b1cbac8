//! # scopelint_html
//!
//! Token stream adapter over rendered HTML for ScopeLint.
//!
//! This crate provides:
//! - A pull-based, line-fed `TokenStream` yielding start tags, end tags, text and
//!   comments in document order
//! - Normalized token text (entities decoded, outer whitespace trimmed)
//!
//! ## Architecture
//!
//! The stream is backed by the `html5ever` tokenizer (without a tree
//! builder), so malformed markup degrades to text instead of failing.
//! Adjacent character runs are coalesced into a single text token.
//!
//! ## Example
//!
//! ```rust
//! use scopelint_html::{TokenKind, TokenStream};
//!
//! let mut stream = TokenStream::new("<p>Hello &amp; welcome</p>");
//!
//! let (kind, _, text) = stream.walk();
//! assert_eq!(kind, TokenKind::StartTag);
//! assert_eq!(text, "p");
//!
//! let (kind, _, text) = stream.walk();
//! assert_eq!(kind, TokenKind::Text);
//! assert_eq!(text, "Hello & welcome");
//! ```

mod error;
mod stream;
mod token;

pub use error::HtmlError;
pub use stream::TokenStream;
pub use token::{Attribute, HtmlToken, TokenKind};
