//! Error types for template parsing and generation
//!
//!     Parsing failures are syntax errors carrying a human-readable message and
//!     are always fatal to the enclosing parse operation. Value errors (a
//!     percentage or count that is not a number) keep their integer-conversion
//!     source. Generation failures cover unknown lookups and structurally empty
//!     definitions; they are deterministic for a given template.

use crate::units::UnitType;
use std::fmt;
use std::num::ParseIntError;

/// Errors raised while validating or extracting modifier structures.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// More than one modifier of the same kind in one span.
    DuplicateModifier {
        modifier: &'static str,
        construct: &'static str,
    },
    /// A case generation marker somewhere else than the start of the span.
    MisplacedCasegen { construct: &'static str },
    /// A declaration or reference with no name.
    UnnamedUnit { construct: &'static str },
    /// A variation marker with no name after it.
    UnnamedVariation,
    /// A variation using one of the reserved names.
    ReservedVariationName(String),
    /// An argument marker with no name after it.
    UnnamedArgument,
    /// A random generation modifier inside a declaration.
    RandgenInDeclaration,
    /// A percentage modifier inside a declaration.
    PercentgenInDeclaration,
    /// A percentage modifier with no preceding random generation modifier.
    PercentgenWithoutRandgen,
    /// A percentage marker with no value after it.
    MissingPercentgenValue,
    /// A percentage value outside 0-100.
    PercentgenOutOfRange(i64),
    /// A percentage or count that could not be parsed as an integer.
    InvalidNumber {
        value: String,
        source: ParseIntError,
    },
    /// Nested brackets of the same kind inside a rule.
    NestedBrackets { construct: &'static str },
    /// Several numbers of requested examples for the same intent.
    MultipleNbExamplesAsked { kind: &'static str, text: String },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::DuplicateModifier {
                modifier,
                construct,
            } => write!(
                f,
                "There can be only one {} modifier in a {}",
                modifier, construct
            ),
            ParseError::MisplacedCasegen { construct } => write!(
                f,
                "Case generation modifiers have to be at the start of a {}",
                construct
            ),
            ParseError::UnnamedUnit { construct } => {
                write!(f, "{}s must be named", construct)
            }
            ParseError::UnnamedVariation => write!(f, "Variations must be named"),
            ParseError::ReservedVariationName(name) => write!(
                f,
                "The variation name '{}' is reserved, please use another name",
                name
            ),
            ParseError::UnnamedArgument => write!(f, "Arguments must be named"),
            ParseError::RandgenInDeclaration => write!(
                f,
                "Unit declarations cannot take a random generation modifier"
            ),
            ParseError::PercentgenInDeclaration => write!(
                f,
                "Unit declarations cannot take a percentage for the random generation modifier"
            ),
            ParseError::PercentgenWithoutRandgen => write!(
                f,
                "Percentage modifiers can only be used together with a random generation modifier"
            ),
            ParseError::MissingPercentgenValue => write!(
                f,
                "Percentage modifiers must be followed by a percentage value"
            ),
            ParseError::PercentgenOutOfRange(value) => write!(
                f,
                "Percentages of generation must be between 0 and 100 (got {})",
                value
            ),
            ParseError::InvalidNumber { value, .. } => {
                write!(f, "Expected an integer, found '{}'", value)
            }
            ParseError::NestedBrackets { construct } => write!(
                f,
                "Nested {} are not supported inside rules",
                construct
            ),
            ParseError::MultipleNbExamplesAsked { kind, text } => write!(
                f,
                "Expected only one number of {} examples asked in '{}'",
                kind, text
            ),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::InvalidNumber { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Errors raised while building definitions or generating examples.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationError {
    /// Tried to create rule content or a definition without a name.
    EmptyName,
    /// Tried to register a rule under an empty variation name.
    EmptyVariationName {
        unit_type: UnitType,
        unit_name: String,
    },
    /// Tried to register a rule under a reserved variation name.
    ReservedVariationName(String),
    /// Asked for a variation the definition does not have.
    UnknownVariation {
        unit_type: UnitType,
        unit_name: String,
        variation: String,
    },
    /// The effective rule set for an exhaustive generation is empty.
    NoRules {
        unit_type: UnitType,
        unit_name: String,
        variation: Option<String>,
    },
    /// A reference to a unit that was never declared.
    UndefinedUnit {
        unit_type: UnitType,
        name: String,
    },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::EmptyName => {
                write!(f, "Tried to create content without a name")
            }
            GenerationError::EmptyVariationName {
                unit_type,
                unit_name,
            } => write!(
                f,
                "Defining a variation of {} '{}' with an empty name is not allowed",
                unit_type, unit_name
            ),
            GenerationError::ReservedVariationName(name) => write!(
                f,
                "The variation name '{}' is reserved, please use another name",
                name
            ),
            GenerationError::UnknownVariation {
                unit_type,
                unit_name,
                variation,
            } => write!(
                f,
                "Couldn't find a variation named '{}' for {} '{}'",
                variation, unit_type, unit_name
            ),
            GenerationError::NoRules {
                unit_type,
                unit_name,
                variation,
            } => match variation {
                Some(variation) => write!(
                    f,
                    "No rules could be found for {} '{}' (variation: '{}')",
                    unit_type, unit_name, variation
                ),
                None => write!(
                    f,
                    "No rules could be found for {} '{}'",
                    unit_type, unit_name
                ),
            },
            GenerationError::UndefinedUnit { unit_type, name } => {
                write!(f, "Couldn't find a declaration of {} '{}'", unit_type, name)
            }
        }
    }
}

impl std::error::Error for GenerationError {}
