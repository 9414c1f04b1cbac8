//! Masking of code and skipped content before it joins a paragraph.

use crate::Format;

/// Character used to hide masked content.
pub const MASK_CHAR: char = '*';

/// Leading characters that attach to the previous word without a space.
const PUNCTUATION: &[char] = &['.', '?', '!', ',', ':', ';'];

/// Replaces every character except newlines with [`MASK_CHAR`].
///
/// The character count is preserved so column math on the result still
/// lines up with the original text.
pub fn mask(text: &str) -> String {
    text.chars()
        .map(|c| if c == '\n' { c } else { MASK_CHAR })
        .collect()
}

/// Wraps text in the format's inline code delimiter.
pub fn codify(format: Format, text: &str) -> String {
    let delim = format.code_delimiter();
    format!("{}{}{}", delim, text, delim)
}

/// Prepares a text fragment for the paragraph buffer.
///
/// Skipped content is masked and code-wrapped. Fragments following an
/// inline tag get one leading space unless they open with punctuation.
pub fn clean(text: &str, format: Format, skip: bool, skip_class: bool, inline: bool) -> String {
    let starter = !skip && text.starts_with(PUNCTUATION);

    let mut out = if skip || skip_class {
        codify(format, &mask(text))
    } else {
        text.to_string()
    };

    if inline && !starter {
        out.insert(0, ' ');
    }
    out
}

/// Detects text inside a highlighted code span.
///
/// reStructuredText renderers wrap highlighted tokens in `span` elements
/// inside `tt`/`code`. Walking back over trailing spans, the fragment is
/// code if the nearest other ancestor is a code tag that is not the last
/// entry of the history.
pub fn in_highlighted_code(history: &[String], format: Format) -> bool {
    if format != Format::ReStructuredText {
        return false;
    }

    let last = history.len().checked_sub(1);
    history
        .iter()
        .enumerate()
        .rev()
        .find(|(_, tag)| tag.as_str() != "span")
        .is_some_and(|(i, tag)| matches!(tag.as_str(), "tt" | "code") && Some(i) != last)
}
