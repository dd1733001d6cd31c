//! Lexer
//!
//!     This module turns a single template line into a flat stream of
//!     [`Token`]s. Tokenization is kept deliberately simple: each special
//!     symbol of the grammar becomes its own token, whitespace runs and
//!     plain-character runs become one token each, and escaped characters
//!     stay inside their word token. All structural interpretation (bracket
//!     matching, modifier extraction, sub-rule segmentation) happens in the
//!     [`parsing`](crate::parsing) layer, which only consumes token slices.
//!
//!     Comment stripping is applied to the raw line before tokenization and
//!     escape resolution to generated text afterwards; both live in
//!     [`preprocessing`](preprocessing).

pub mod preprocessing;
pub mod tokens;

pub use preprocessing::{line_type, remove_escapement, strip_comments, LineType};
pub use tokens::Token;

use logos::Logos;

/// Tokenizes a single template line into a flat token stream.
///
/// The line is expected to have been stripped of comments already.
pub fn tokenize(line: &str) -> Vec<Token> {
    Token::lexer(line).filter_map(Result::ok).collect()
}
