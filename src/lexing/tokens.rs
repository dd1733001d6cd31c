//! Token definitions for the template language
//!
//! This module defines all the tokens that can appear on a template line.
//! The tokens are defined using the logos derive macro for efficient
//! tokenization. Every special symbol of the grammar is its own variant;
//! runs of plain characters become `Word` tokens. A backslash escapes the
//! character after it into the surrounding word (escape resolution happens
//! later, see [`remove_escapement`](crate::lexing::remove_escapement)).

use crate::units::UnitType;
use logos::Logos;

/// All possible tokens on a template line
#[derive(Logos, Debug, Clone, PartialEq, Eq)]
pub enum Token {
    // Unit kind markers
    #[token("~")]
    Alias,
    #[token("@")]
    Slot,
    #[token("%")]
    Intent,

    // Bracket pairs
    #[token("[")]
    UnitOpen,
    #[token("]")]
    UnitClose,
    #[token("(")]
    AnnotationOpen,
    #[token(")")]
    AnnotationClose,
    #[token("{")]
    ChoiceOpen,
    #[token("}")]
    ChoiceClose,

    // Annotation interior markers
    #[token(",")]
    AnnotationSep,
    #[token(":")]
    AnnotationAssign,

    // Modifier markers
    #[token("#")]
    Variation,
    #[token("?")]
    Randgen,
    /// Percentage marker inside modifiers, alternative separator inside choices
    #[token("/")]
    Slash,
    #[token("&")]
    Casegen,
    #[token("$")]
    Arg,
    /// Introduces an alternative slot value in a slot rule
    #[token("=")]
    AltSlotValue,

    /// One or more spaces or tabs, with the run length
    #[regex(r"[ \t]+", |lex| lex.slice().len())]
    Whitespace(usize),

    #[regex(r"\r?\n")]
    Newline,

    /// A run of plain characters; escaped characters stay inside the word
    #[regex(r"(?:\\.?|[^\\~@%\[\]\(\)\{\}#\?/&\$=,: \t\r\n])+", |lex| lex.slice().to_owned())]
    Word(String),
}

impl Token {
    /// Checks if this token is one of the special symbols that modifier
    /// validation cares about (unit markers, brackets or modifier markers).
    pub fn is_special(&self) -> bool {
        matches!(
            self,
            Token::Alias
                | Token::Slot
                | Token::Intent
                | Token::UnitOpen
                | Token::UnitClose
                | Token::Variation
                | Token::Randgen
                | Token::Slash
                | Token::Casegen
                | Token::Arg
        )
    }

    /// Checks if this token marks a unit kind (`~`, `@` or `%`).
    pub fn is_unit_kind(&self) -> bool {
        matches!(self, Token::Alias | Token::Slot | Token::Intent)
    }

    /// Checks if this token can start a unit reference or word group.
    pub fn starts_unit(&self) -> bool {
        matches!(
            self,
            Token::UnitOpen | Token::Alias | Token::Slot | Token::Intent
        )
    }

    /// Returns the unit kind this token marks, if any.
    pub fn unit_kind(&self) -> Option<UnitType> {
        match self {
            Token::Alias => Some(UnitType::Alias),
            Token::Slot => Some(UnitType::Slot),
            Token::Intent => Some(UnitType::Intent),
            _ => None,
        }
    }

    /// Returns the source text this token stands for.
    pub fn lexeme(&self) -> String {
        match self {
            Token::Alias => "~".to_string(),
            Token::Slot => "@".to_string(),
            Token::Intent => "%".to_string(),
            Token::UnitOpen => "[".to_string(),
            Token::UnitClose => "]".to_string(),
            Token::AnnotationOpen => "(".to_string(),
            Token::AnnotationClose => ")".to_string(),
            Token::ChoiceOpen => "{".to_string(),
            Token::ChoiceClose => "}".to_string(),
            Token::AnnotationSep => ",".to_string(),
            Token::AnnotationAssign => ":".to_string(),
            Token::Variation => "#".to_string(),
            Token::Randgen => "?".to_string(),
            Token::Slash => "/".to_string(),
            Token::Casegen => "&".to_string(),
            Token::Arg => "$".to_string(),
            Token::AltSlotValue => "=".to_string(),
            Token::Whitespace(len) => " ".repeat(*len),
            Token::Newline => "\n".to_string(),
            Token::Word(word) => word.clone(),
        }
    }

    /// Convenience constructor for a word token.
    pub fn word(text: &str) -> Token {
        Token::Word(text.to_string())
    }
}
