//! Modifier extraction
//!
//!     Single-pass scanners that turn a validated interior token span into a
//!     typed modifier record. Each scanner walks the span left to right with
//!     an explicit expectation state: a modifier marker switches the state,
//!     and the next value token is captured into the matching field. The
//!     casegen marker, when present, is always the first token and is
//!     consumed before the scan starts.

use crate::error::ParseError;
use crate::lexing::Token;

/// What the scanner expects the next value token to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expecting {
    Nothing,
    RandgenName,
    Percentgen,
    VariationName,
    ArgumentName,
}

/// Modifiers of a unit declaration. Declarations can never be randomized,
/// so there is no randgen/percentgen here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationModifiers {
    pub casegen: bool,
    pub variation_name: Option<String>,
    pub argument_name: Option<String>,
}

/// Modifiers of a unit reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceModifiers {
    pub casegen: bool,
    pub randgen_name: Option<String>,
    pub percentgen: Option<u8>,
    pub variation_name: Option<String>,
    pub argument_value: Option<String>,
}

/// Modifiers of a word group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordGroupModifiers {
    pub casegen: bool,
    pub randgen_name: Option<String>,
    pub percentgen: Option<u8>,
}

/// Modifiers of a choice. The randgen of a choice is an unnamed flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChoiceModifiers {
    pub casegen: bool,
    pub randgen: bool,
}

/// Consumes an optional leading casegen marker, returning whether it was
/// there and the remaining span.
fn split_casegen(tokens: &[Token]) -> (bool, &[Token]) {
    match tokens.first() {
        Some(Token::Casegen) => (true, &tokens[1..]),
        _ => (false, tokens),
    }
}

fn parse_percentgen(token: &Token) -> Result<u8, ParseError> {
    let value = token.lexeme();
    value.parse().map_err(|source| ParseError::InvalidNumber {
        value,
        source,
    })
}

/// Extracts the modifiers of a unit declaration from its interior span.
pub fn find_modifiers_decl(tokens: &[Token]) -> DeclarationModifiers {
    let (casegen, rest) = split_casegen(tokens);
    let mut modifiers = DeclarationModifiers {
        casegen,
        ..Default::default()
    };

    let mut expecting = Expecting::Nothing;
    for token in rest {
        match token {
            Token::Variation => expecting = Expecting::VariationName,
            Token::Arg => {
                expecting = Expecting::ArgumentName;
                modifiers.argument_name = Some(String::new());
            }
            value => match expecting {
                Expecting::VariationName => {
                    modifiers.variation_name = Some(value.lexeme());
                    expecting = Expecting::Nothing;
                }
                Expecting::ArgumentName => {
                    modifiers.argument_name = Some(value.lexeme());
                    expecting = Expecting::Nothing;
                }
                _ => {}
            },
        }
    }
    modifiers
}

/// Extracts the modifiers of a unit reference from its interior span.
///
/// A non-numeric percentage propagates as an error; rejecting it earlier
/// is the validator's job.
pub fn find_modifiers_reference(tokens: &[Token]) -> Result<ReferenceModifiers, ParseError> {
    let (casegen, rest) = split_casegen(tokens);
    let mut modifiers = ReferenceModifiers {
        casegen,
        ..Default::default()
    };

    let mut expecting = Expecting::Nothing;
    for token in rest {
        match token {
            Token::Randgen => {
                expecting = Expecting::RandgenName;
                modifiers.randgen_name = Some(String::new());
            }
            Token::Slash => expecting = Expecting::Percentgen,
            Token::Variation => expecting = Expecting::VariationName,
            Token::Arg => {
                expecting = Expecting::ArgumentName;
                modifiers.argument_value = Some(String::new());
            }
            value => match expecting {
                Expecting::RandgenName => {
                    modifiers.randgen_name = Some(value.lexeme());
                    expecting = Expecting::Nothing;
                }
                Expecting::Percentgen => {
                    modifiers.percentgen = Some(parse_percentgen(value)?);
                    expecting = Expecting::Nothing;
                }
                Expecting::VariationName => {
                    modifiers.variation_name = Some(value.lexeme());
                    expecting = Expecting::Nothing;
                }
                Expecting::ArgumentName => {
                    modifiers.argument_value = Some(value.lexeme());
                    expecting = Expecting::Nothing;
                }
                Expecting::Nothing => {}
            },
        }
    }
    Ok(modifiers)
}

/// Extracts the modifiers of a word group from its interior span.
pub fn find_modifiers_word_group(tokens: &[Token]) -> Result<WordGroupModifiers, ParseError> {
    let (casegen, rest) = split_casegen(tokens);
    let mut modifiers = WordGroupModifiers {
        casegen,
        ..Default::default()
    };

    let mut expecting = Expecting::Nothing;
    for token in rest {
        match token {
            Token::Randgen => {
                expecting = Expecting::RandgenName;
                modifiers.randgen_name = Some(String::new());
            }
            Token::Slash => expecting = Expecting::Percentgen,
            value => match expecting {
                Expecting::RandgenName => {
                    modifiers.randgen_name = Some(value.lexeme());
                    expecting = Expecting::Nothing;
                }
                Expecting::Percentgen => {
                    modifiers.percentgen = Some(parse_percentgen(value)?);
                    expecting = Expecting::Nothing;
                }
                _ => {}
            },
        }
    }
    Ok(modifiers)
}

/// Extracts the modifiers of a choice from its interior span.
pub fn find_modifiers_choice(tokens: &[Token]) -> ChoiceModifiers {
    let (casegen, rest) = split_casegen(tokens);
    ChoiceModifiers {
        casegen,
        randgen: rest.contains(&Token::Randgen),
    }
}

/// Finds the name of a unit from its validated interior span: the token
/// after the casegen marker if there is one, the first token otherwise.
pub fn find_name(tokens: &[Token]) -> Option<String> {
    let (_, rest) = split_casegen(tokens);
    rest.first().map(Token::lexeme)
}

/// Finds the words of a word group from its validated interior span: the
/// leading run of plain tokens, stopping at the first modifier marker.
pub fn find_words(tokens: &[Token]) -> Vec<String> {
    let mut words = Vec::new();
    for token in tokens {
        match token {
            Token::Casegen => continue,
            Token::Randgen | Token::Variation | Token::Arg => break,
            other => words.push(other.lexeme()),
        }
    }
    words
}

/// Finds the alternative slot value in a slot rule's tokens, returning the
/// index of the `=` sign and the value. Returns `None` if the rule has no
/// alternative value.
pub fn find_alt_slot_value(tokens: &[Token]) -> Option<(usize, String)> {
    let index = tokens.iter().position(|t| *t == Token::AltSlotValue)?;
    let value = match tokens.get(index + 1) {
        Some(Token::Whitespace(_)) | None => tokens
            .get(index + 2)
            .map(Token::lexeme)
            .unwrap_or_default(),
        Some(token) => token.lexeme(),
    };
    Some((index, value))
}
