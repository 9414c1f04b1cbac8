//! Tag and class classification tables.
//!
//! `ScopeTables` is built once per pass from an [`ExtractConfig`] and is
//! read-only afterwards, so one value can back any number of concurrent
//! passes.

use std::collections::HashSet;

use crate::ExtractConfig;

/// Tags whose whole subtree is excluded from linting.
pub const DEFAULT_SKIP_TAGS: &[&str] = &["script", "style", "pre", "figure"];

/// Classes whose element content is masked.
///
/// `problematic` marks rst2html processing errors (often file-insertion
/// URLs); `pre` marks rst2html code spans.
pub const DEFAULT_SKIP_CLASSES: &[&str] = &["problematic", "pre"];

/// Tags whose content is masked while staying part of the paragraph.
pub const DEFAULT_SKIPPED_CONTENT: &[&str] = &["tt", "code"];

/// Formatting tags that live inside a paragraph rather than ending one.
pub const INLINE_TAGS: &[&str] = &[
    "b", "big", "i", "small", "abbr", "acronym", "cite", "dfn", "em", "kbd", "strong", "a", "br",
    "img", "span", "sub", "sup", "code", "tt", "del",
];

/// Tag to scope mapping.
///
/// Inline entries are terminal scopes: they are not prefixed with `text`,
/// otherwise they would be linted twice.
const TAG_SCOPES: &[(&str, &str)] = &[
    ("th", "text.table.header"),
    ("td", "text.table.cell"),
    ("li", "text.list"),
    ("blockquote", "text.blockquote"),
    ("strong", "strong"),
    ("b", "strong"),
    ("a", "link"),
    ("em", "emphasis"),
    ("i", "emphasis"),
    ("code", "code"),
];

/// Returns the scope mapped to a tag, if any.
pub fn tag_scope(tag: &str) -> Option<&'static str> {
    TAG_SCOPES
        .iter()
        .find(|(name, _)| *name == tag)
        .map(|(_, scope)| *scope)
}

/// Returns true for `h1` through `h6`.
pub fn is_heading(tag: &str) -> bool {
    matches!(tag.as_bytes(), [b'h', b'1'..=b'6'])
}

/// Resolved classification tables for one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeTables {
    skip_tags: HashSet<String>,
    skip_classes: HashSet<String>,
    skipped_content: HashSet<String>,
}

impl Default for ScopeTables {
    fn default() -> Self {
        Self::from_config(&ExtractConfig::default())
    }
}

impl ScopeTables {
    /// Resolves the tables from user configuration.
    ///
    /// `skipped_scopes` and `ignored_scopes` replace their defaults when
    /// non-empty; `ignored_classes` extends the default class list.
    pub fn from_config(config: &ExtractConfig) -> Self {
        let skip_tags = if config.skipped_scopes.is_empty() {
            owned(DEFAULT_SKIP_TAGS)
        } else {
            config.skipped_scopes.iter().cloned().collect()
        };

        let mut skip_classes = owned(DEFAULT_SKIP_CLASSES);
        skip_classes.extend(config.ignored_classes.iter().cloned());

        let skipped_content = if config.ignored_scopes.is_empty() {
            owned(DEFAULT_SKIPPED_CONTENT)
        } else {
            config.ignored_scopes.iter().cloned().collect()
        };

        Self {
            skip_tags,
            skip_classes,
            skipped_content,
        }
    }

    /// Returns true if the tag's subtree is excluded from linting.
    pub fn is_skip_tag(&self, tag: &str) -> bool {
        self.skip_tags.contains(tag)
    }

    /// Returns true if the tag's content is masked but kept in the flow.
    pub fn is_skipped_content(&self, tag: &str) -> bool {
        self.skipped_content.contains(tag)
    }

    /// Returns true if any class in a space-separated `class` value is skipped.
    pub fn has_skip_class(&self, class_attr: &str) -> bool {
        class_attr
            .split(' ')
            .any(|class| self.skip_classes.contains(class))
    }

    /// Returns true for formatting tags that do not end a block.
    pub fn is_inline(&self, tag: &str) -> bool {
        INLINE_TAGS.contains(&tag)
    }

    /// Returns the scope to lint an inline fragment under on its own.
    ///
    /// Only inline tags with a mapping qualify (`a`, `em`, `code`, …).
    pub fn inline_scope(&self, tag: &str) -> Option<&'static str> {
        tag_scope(tag).filter(|_| self.is_inline(tag))
    }

    /// Resolves the scope of a finished block from its tag history.
    ///
    /// The history is searched innermost first. A mapped block-level tag
    /// yields its scope, a heading yields `text.heading.<tag>`; both get the
    /// document extension appended. `None` means the block is plain prose.
    pub fn resolve(&self, history: &[String], extension: &str) -> Option<String> {
        history.iter().rev().find_map(|tag| match tag_scope(tag) {
            Some(scope) if !self.is_inline(tag) => Some(format!("{}{}", scope, extension)),
            _ if is_heading(tag) => Some(format!("text.heading.{}{}", tag, extension)),
            _ => None,
        })
    }
}

fn owned(values: &[&str]) -> HashSet<String> {
    values.iter().map(|v| v.to_string()).collect()
}
