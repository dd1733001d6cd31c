//! Structural validation of declarations, references and choices
//!
//!     These checks run on the interior token span of a bracketed construct,
//!     before modifier extraction. They enforce the modifier-sequence rules:
//!     at most one modifier of each kind, case generation first, units and
//!     modifier values named where the grammar requires a name, percentages
//!     only together with a random generation marker and within 0-100.

use crate::error::ParseError;
use crate::lexing::Token;
use crate::parsing::symbols::RESERVED_VARIATION_NAMES;

fn count(tokens: &[Token], token: &Token) -> usize {
    tokens.iter().filter(|t| *t == token).count()
}

fn position(tokens: &[Token], token: &Token) -> Option<usize> {
    tokens.iter().position(|t| t == token)
}

/// Checks the casegen rules shared by every construct: at most one marker,
/// and only at the very start of the span.
fn check_casegen(tokens: &[Token], construct: &'static str) -> Result<usize, ParseError> {
    let casegen_count = count(tokens, &Token::Casegen);
    if casegen_count > 1 {
        return Err(ParseError::DuplicateModifier {
            modifier: "case generation",
            construct,
        });
    }
    if casegen_count == 1 && position(tokens, &Token::Casegen) != Some(0) {
        return Err(ParseError::MisplacedCasegen { construct });
    }
    Ok(casegen_count)
}

/// Checks that the span holds a name right after the optional casegen marker.
fn check_named(
    tokens: &[Token],
    casegen_count: usize,
    construct: &'static str,
) -> Result<(), ParseError> {
    let name_index = casegen_count;
    match tokens.get(name_index) {
        None => Err(ParseError::UnnamedUnit { construct }),
        Some(token) if token.is_special() => Err(ParseError::UnnamedUnit { construct }),
        Some(_) => Ok(()),
    }
}

/// Checks the variation rules: at most one marker, followed by a
/// non-reserved name.
fn check_variation(tokens: &[Token], construct: &'static str) -> Result<(), ParseError> {
    let variation_count = count(tokens, &Token::Variation);
    if variation_count > 1 {
        return Err(ParseError::DuplicateModifier {
            modifier: "variation",
            construct,
        });
    }
    if variation_count == 1 {
        let name_index = position(tokens, &Token::Variation).unwrap_or_default() + 1;
        match tokens.get(name_index) {
            None => return Err(ParseError::UnnamedVariation),
            Some(token) if token.is_special() => return Err(ParseError::UnnamedVariation),
            Some(token) => {
                let name = token.lexeme();
                if RESERVED_VARIATION_NAMES.contains(&name.as_str()) {
                    return Err(ParseError::ReservedVariationName(name));
                }
            }
        }
    }
    Ok(())
}

/// Checks the argument rules: at most one marker, followed by a name.
fn check_argument(tokens: &[Token], construct: &'static str) -> Result<(), ParseError> {
    let argument_count = count(tokens, &Token::Arg);
    if argument_count > 1 {
        return Err(ParseError::DuplicateModifier {
            modifier: "argument",
            construct,
        });
    }
    if argument_count == 1 {
        let name_index = position(tokens, &Token::Arg).unwrap_or_default() + 1;
        match tokens.get(name_index) {
            None => return Err(ParseError::UnnamedArgument),
            Some(token) if token.is_special() => return Err(ParseError::UnnamedArgument),
            Some(_) => {}
        }
    }
    Ok(())
}

/// Checks the randgen/percentgen rules for references and word groups:
/// at most one of each, a percentage only after a randgen marker, and a
/// numeric percentage within 0-100.
fn check_randgen(tokens: &[Token], construct: &'static str) -> Result<(), ParseError> {
    let randgen_count = count(tokens, &Token::Randgen);
    if randgen_count > 1 {
        return Err(ParseError::DuplicateModifier {
            modifier: "random generation",
            construct,
        });
    }
    let percentgen_count = count(tokens, &Token::Slash);
    if percentgen_count > 1 {
        return Err(ParseError::DuplicateModifier {
            modifier: "percentage",
            construct,
        });
    }
    if percentgen_count == 1 {
        let percent_index = position(tokens, &Token::Slash).unwrap_or_default();
        if randgen_count == 0 || position(tokens, &Token::Randgen).unwrap_or_default() > percent_index
        {
            return Err(ParseError::PercentgenWithoutRandgen);
        }
        match tokens.get(percent_index + 1) {
            Some(Token::Word(value)) => {
                let percentage: i64 =
                    value.parse().map_err(|source| ParseError::InvalidNumber {
                        value: value.clone(),
                        source,
                    })?;
                if !(0..=100).contains(&percentage) {
                    return Err(ParseError::PercentgenOutOfRange(percentage));
                }
            }
            _ => return Err(ParseError::MissingPercentgenValue),
        }
    }
    Ok(())
}

/// Checks that the interior of a unit declaration is syntactically legal.
///
/// The constraints checked are:
/// - there is only one modifier of each kind
/// - there are no randgen or percentgen modifiers
/// - `&` is at the beginning of the declaration (or nowhere)
/// - there is a name either after `&` or at the beginning
/// - there is a name after `#`, and it is not reserved
/// - there is a name after `$`
pub fn check_declaration_validity(tokens: &[Token]) -> Result<(), ParseError> {
    const CONSTRUCT: &str = "unit declaration";
    let casegen_count = check_casegen(tokens, CONSTRUCT)?;
    check_named(tokens, casegen_count, CONSTRUCT)?;
    check_variation(tokens, CONSTRUCT)?;
    check_argument(tokens, CONSTRUCT)?;
    if count(tokens, &Token::Randgen) > 0 {
        return Err(ParseError::RandgenInDeclaration);
    }
    if count(tokens, &Token::Slash) > 0 {
        return Err(ParseError::PercentgenInDeclaration);
    }
    Ok(())
}

/// Checks that the interior of a reference (or word group) is
/// syntactically legal.
///
/// The constraints checked are the declaration-side ones, plus:
/// - `/` is not there unless `?` is there before it
/// - the value after `/` is an integer between 0 and 100
pub fn check_reference_validity(tokens: &[Token]) -> Result<(), ParseError> {
    const CONSTRUCT: &str = "unit reference";
    let casegen_count = check_casegen(tokens, CONSTRUCT)?;
    check_named(tokens, casegen_count, CONSTRUCT)?;
    check_variation(tokens, CONSTRUCT)?;
    check_argument(tokens, CONSTRUCT)?;
    check_randgen(tokens, CONSTRUCT)?;
    Ok(())
}

/// Checks that the interior of a choice is syntactically legal.
///
/// Alternatives are separated by `/`, so only the modifier tail after the
/// randgen marker is checked for percentgen legality; the alternatives
/// themselves are validated when their own sub-rules are parsed.
pub fn check_choice_validity(tokens: &[Token]) -> Result<(), ParseError> {
    const CONSTRUCT: &str = "choice";
    let casegen_count = check_casegen(tokens, CONSTRUCT)?;
    if tokens.len() <= casegen_count {
        return Err(ParseError::UnnamedUnit { construct: CONSTRUCT });
    }
    let randgen_count = count(tokens, &Token::Randgen);
    if randgen_count > 1 {
        return Err(ParseError::DuplicateModifier {
            modifier: "random generation",
            construct: CONSTRUCT,
        });
    }
    if randgen_count == 1 {
        let tail_start = position(tokens, &Token::Randgen).unwrap_or_default() + 1;
        check_randgen_tail(&tokens[tail_start..], CONSTRUCT)?;
    }
    Ok(())
}

/// Checks the tokens after a choice's randgen marker: an optional name,
/// then an optional `/` with a numeric percentage, and nothing else.
fn check_randgen_tail(tail: &[Token], construct: &'static str) -> Result<(), ParseError> {
    let mut rest = tail;
    if let Some(Token::Word(_)) = rest.first() {
        rest = &rest[1..];
    }
    match rest.first() {
        None => Ok(()),
        Some(Token::Slash) => match rest.get(1) {
            Some(Token::Word(value)) if rest.len() == 2 => {
                let percentage: i64 =
                    value.parse().map_err(|source| ParseError::InvalidNumber {
                        value: value.clone(),
                        source,
                    })?;
                if !(0..=100).contains(&percentage) {
                    return Err(ParseError::PercentgenOutOfRange(percentage));
                }
                Ok(())
            }
            _ => Err(ParseError::MissingPercentgenValue),
        },
        Some(_) => Err(ParseError::DuplicateModifier {
            modifier: "random generation",
            construct,
        }),
    }
}
