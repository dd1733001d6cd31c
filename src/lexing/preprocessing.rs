//! Raw-line preprocessing
//!
//!     Before tokenization, template lines go through comment stripping.
//!     After parsing, generated text goes through escape resolution. Both
//!     scans are explicit left-to-right loops: the markers can be escaped
//!     with a backslash, which rules out plain pattern searches.

use crate::deprecations;
use crate::parsing::symbols::{
    ARG_SYM, COMMENT_MARKER, COMMENT_SYM_DEPRECATED, ESCAPE_SYM,
};
use std::borrow::Cow;

/// The type of a top-level line in a template file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineType {
    Empty,
    Comment,
    AliasDeclaration,
    SlotDeclaration,
    IntentDeclaration,
    IncludeFile,
}

/// Returns the position of the first unescaped occurrence of `marker`.
fn find_unescaped(text: &str, marker: &str) -> Option<usize> {
    let mut escaped = false;
    let marker_head = marker.chars().next()?;
    for (i, c) in text.char_indices() {
        if escaped {
            escaped = false;
        } else if c == ESCAPE_SYM {
            escaped = true;
        } else if c == marker_head && text[i..].starts_with(marker) {
            return Some(i);
        }
    }
    None
}

/// Returns `text` without its comment (and right-trimmed).
///
/// Both the comment marker (`//`) and the deprecated marker (`;`) are
/// honored; when both are present the earlier one wins. Using the
/// deprecated marker emits a deprecation warning.
pub fn strip_comments(text: &str) -> Cow<'_, str> {
    if text.is_empty() {
        return Cow::Borrowed(text);
    }
    let comment_start = find_unescaped(text, COMMENT_MARKER);
    let deprecated_start = find_unescaped(text, COMMENT_SYM_DEPRECATED);
    if deprecated_start.is_some() {
        deprecations::warn_semicolon_comments();
    }

    let cut = match (comment_start, deprecated_start) {
        (None, None) => return Cow::Borrowed(text.trim_end()),
        (Some(start), None) | (None, Some(start)) => start,
        (Some(comment), Some(deprecated)) => comment.min(deprecated),
    };
    Cow::Owned(text[..cut].trim_end().to_string())
}

/// Returns `text` with all escaped characters resolved.
///
/// An escaped argument marker (`\$`) is kept escaped: it is resolved at
/// generation time to avoid corrupting argument substitution. A trailing
/// lone escape character is dropped. This function never fails.
pub fn remove_escapement(text: &str) -> String {
    if !text.contains(ESCAPE_SYM) {
        return text.to_string();
    }
    let mut result = String::with_capacity(text.len());
    let mut escaped = false;
    for c in text.chars() {
        if escaped {
            if c == ARG_SYM {
                // Keep \$ until generation
                result.push(ESCAPE_SYM);
            }
            result.push(c);
            escaped = false;
        } else if c == ESCAPE_SYM {
            escaped = true;
        } else {
            result.push(c);
        }
    }
    result
}

/// Returns the type of a top-level line, or `None` if the line is invalid.
///
/// `stripped_line` is `line` with comments and surrounding whitespace
/// removed; declarations are recognized on the raw line since their marker
/// must be the very first character.
pub fn line_type(line: &str, stripped_line: &str) -> Option<LineType> {
    if stripped_line.is_empty() {
        Some(LineType::Empty)
    } else if stripped_line.starts_with(COMMENT_MARKER) {
        Some(LineType::Comment)
    } else if stripped_line.starts_with(COMMENT_SYM_DEPRECATED) {
        deprecations::warn_semicolon_comments();
        Some(LineType::Comment)
    } else if line.starts_with('~') {
        Some(LineType::AliasDeclaration)
    } else if line.starts_with('@') {
        Some(LineType::SlotDeclaration)
    } else if line.starts_with('%') {
        Some(LineType::IntentDeclaration)
    } else if line.starts_with('|') {
        Some(LineType::IncludeFile)
    } else {
        None
    }
}
