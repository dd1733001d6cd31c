//! Sub-rule segmentation
//!
//!     Splits a rule's token list into ordered sub-rule spans (word, word
//!     group, choice, or unit reference), and a choice's interior into its
//!     alternatives. Both segmenters are lazy iterators over token slices.
//!
//!     Unlike the declaration-interior extraction, the sub-rule segmenter
//!     tracks only one bracket level: a sub-rule ends at the first matching
//!     close token for its opener. Nested same-kind brackets inside a rule
//!     are therefore rejected upfront by [`check_no_nested_brackets`]
//!     instead of being silently mis-segmented.

use crate::error::ParseError;
use crate::lexing::Token;

/// Lazy iterator over the sub-rule spans of a rule.
///
/// A plain token is its own one-token sub-rule; a token opening a bracketed
/// construct starts a span that runs up to (and including) the matching
/// close token. An unterminated span is dropped.
pub struct SubRuleTokens<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Iterator for SubRuleTokens<'a> {
    type Item = &'a [Token];

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.tokens.get(self.pos)?;
        let close = if first.starts_unit() {
            Token::UnitClose
        } else if *first == Token::ChoiceOpen {
            Token::ChoiceClose
        } else {
            let span = &self.tokens[self.pos..self.pos + 1];
            self.pos += 1;
            return Some(span);
        };

        let start = self.pos;
        let mut end = self.pos + 1;
        while end < self.tokens.len() {
            if self.tokens[end] == close {
                self.pos = end + 1;
                return Some(&self.tokens[start..=end]);
            }
            end += 1;
        }
        // Unterminated sub-rule, nothing more to yield
        self.pos = self.tokens.len();
        None
    }
}

/// Returns a lazy iterator over the sub-rules of `tokens`.
pub fn next_sub_rule_tokens(tokens: &[Token]) -> SubRuleTokens<'_> {
    SubRuleTokens { tokens, pos: 0 }
}

/// Returns a lazy iterator over the alternatives of a choice interior.
///
/// Casegen markers are dropped wherever they sit and the span ends at the
/// randgen marker (the tokens after it modify the choice as a whole). The
/// final in-progress alternative is always yielded, even when empty.
pub fn next_choice_tokens(interior: &[Token]) -> impl Iterator<Item = Vec<Token>> + '_ {
    let end = interior
        .iter()
        .position(|t| *t == Token::Randgen)
        .unwrap_or(interior.len());
    interior[..end].split(|t| *t == Token::Slash).map(|alternative| {
        alternative
            .iter()
            .filter(|t| **t != Token::Casegen)
            .cloned()
            .collect()
    })
}

/// Rejects rules holding nested brackets of the same kind, which the
/// single-level segmenter cannot split correctly.
pub fn check_no_nested_brackets(tokens: &[Token]) -> Result<(), ParseError> {
    let mut unit_depth = 0usize;
    let mut choice_depth = 0usize;
    for token in tokens {
        match token {
            Token::UnitOpen => {
                unit_depth += 1;
                if unit_depth > 1 {
                    return Err(ParseError::NestedBrackets {
                        construct: "unit brackets",
                    });
                }
            }
            Token::UnitClose => unit_depth = unit_depth.saturating_sub(1),
            Token::ChoiceOpen => {
                choice_depth += 1;
                if choice_depth > 1 {
                    return Err(ParseError::NestedBrackets {
                        construct: "choice braces",
                    });
                }
            }
            Token::ChoiceClose => choice_depth = choice_depth.saturating_sub(1),
            _ => {}
        }
    }
    Ok(())
}

/// Returns `true` if the sub-rule span is a plain word.
pub fn is_sub_rule_word(sub_rule: &[Token]) -> bool {
    sub_rule.len() == 1
}

/// Returns `true` if the sub-rule span is a word group.
pub fn is_sub_rule_word_group(sub_rule: &[Token]) -> bool {
    sub_rule.first() == Some(&Token::UnitOpen)
}

/// Returns `true` if the sub-rule span is a choice.
pub fn is_sub_rule_choice(sub_rule: &[Token]) -> bool {
    sub_rule.first() == Some(&Token::ChoiceOpen)
}

/// Returns `true` if the sub-rule span is an alias reference.
pub fn is_sub_rule_alias_ref(sub_rule: &[Token]) -> bool {
    sub_rule.first() == Some(&Token::Alias)
}

/// Returns `true` if the sub-rule span is a slot reference.
pub fn is_sub_rule_slot_ref(sub_rule: &[Token]) -> bool {
    sub_rule.first() == Some(&Token::Slot)
}

/// Returns `true` if the sub-rule span is an intent reference.
pub fn is_sub_rule_intent_ref(sub_rule: &[Token]) -> bool {
    sub_rule.first() == Some(&Token::Intent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexing::tokenize;

    fn segments(source: &str) -> Vec<Vec<Token>> {
        next_sub_rule_tokens(&tokenize(source))
            .map(<[Token]>::to_vec)
            .collect()
    }

    #[test]
    fn test_words_are_single_token_sub_rules() {
        let subs = segments("hello there");
        assert_eq!(
            subs,
            vec![
                vec![Token::word("hello")],
                vec![Token::Whitespace(1)],
                vec![Token::word("there")],
            ]
        );
    }

    #[test]
    fn test_mixed_rule_segmentation() {
        let subs = segments("say ~[greeting] to @[person?]");
        assert_eq!(subs.len(), 7);
        assert!(is_sub_rule_word(&subs[0]));
        assert!(is_sub_rule_alias_ref(&subs[2]));
        assert!(is_sub_rule_slot_ref(&subs[6]));
        assert_eq!(subs[2].first(), Some(&Token::Alias));
        assert_eq!(subs[2].last(), Some(&Token::UnitClose));
    }

    #[test]
    fn test_word_group_and_choice_segmentation() {
        let subs = segments("[good morning?] {sir/madam}");
        assert!(is_sub_rule_word_group(&subs[0]));
        assert!(is_sub_rule_choice(&subs[2]));
        assert_eq!(subs[2].last(), Some(&Token::ChoiceClose));
    }

    #[test]
    fn test_unterminated_sub_rule_is_dropped() {
        let subs = segments("start ~[broken");
        assert_eq!(
            subs,
            vec![vec![Token::word("start")], vec![Token::Whitespace(1)]]
        );
    }

    #[test]
    fn test_segmentation_is_lazy() {
        let tokens = tokenize("a b c");
        let mut iter = next_sub_rule_tokens(&tokens);
        assert_eq!(iter.next(), Some(&[Token::word("a")][..]));
        assert_eq!(iter.next(), Some(&[Token::Whitespace(1)][..]));
    }

    #[test]
    fn test_choice_alternatives() {
        let tokens = tokenize("hi/hello there");
        let alternatives: Vec<_> = next_choice_tokens(&tokens).collect();
        assert_eq!(alternatives.len(), 2);
        assert_eq!(alternatives[0], vec![Token::word("hi")]);
        assert_eq!(
            alternatives[1],
            vec![
                Token::word("hello"),
                Token::Whitespace(1),
                Token::word("there")
            ]
        );
    }

    #[test]
    fn test_choice_randgen_tail_not_an_alternative() {
        let tokens = tokenize("&yes/no?rand/80");
        let alternatives: Vec<_> = next_choice_tokens(&tokens).collect();
        assert_eq!(alternatives.len(), 2);
        assert_eq!(alternatives[0], vec![Token::word("yes")]);
        assert_eq!(alternatives[1], vec![Token::word("no")]);
    }

    #[test]
    fn test_choice_casegen_dropped_at_any_position() {
        let tokens = tokenize("yes/&no");
        let alternatives: Vec<_> = next_choice_tokens(&tokens).collect();
        assert_eq!(alternatives.len(), 2);
        assert_eq!(alternatives[0], vec![Token::word("yes")]);
        assert_eq!(alternatives[1], vec![Token::word("no")]);
    }

    #[test]
    fn test_choice_trailing_separator_yields_empty_alternative() {
        let tokens = tokenize("yes/");
        let alternatives: Vec<_> = next_choice_tokens(&tokens).collect();
        assert_eq!(alternatives.len(), 2);
        assert!(alternatives[1].is_empty());
    }

    #[test]
    fn test_nested_bracket_rejection() {
        assert!(check_no_nested_brackets(&tokenize("a [b] {c}")).is_ok());
        assert!(check_no_nested_brackets(&tokenize("a [b [c]]")).is_err());
        assert!(check_no_nested_brackets(&tokenize("{a {b}}")).is_err());
    }
}
