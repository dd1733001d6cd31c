//! Generation engine
//!
//!     The AST side of the crate: unit definitions, the rule content nodes
//!     they are made of, and the `Example` values generation produces.
//!
//! Generation Modes
//!
//!     Every definition offers two modes. Random mode picks one rule and
//!     walks it once, threading a fresh randgen-decision map so that nodes
//!     sharing a randgen name all generate or all stay silent together.
//!     Exhaustive mode computes, for every rule, the cartesian product of
//!     its nodes' own exhaustive outputs and concatenates the results over
//!     all rules, preserving rule order and duplicates.
//!
//!     Definitions are built once during parsing and are read-only during
//!     generation, so generating from several threads over the same store
//!     needs no locking.

pub mod definition;
pub mod rule_content;
pub mod store;

pub use definition::UnitDefinition;
pub use rule_content::{Choice, Rule, RuleContent, UnitRef, Word, WordGroup};
pub use store::UnitStore;

use rand::Rng;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// The kind of a unit definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UnitType {
    Alias,
    Slot,
    Intent,
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitType::Alias => write!(f, "alias"),
            UnitType::Slot => write!(f, "slot"),
            UnitType::Intent => write!(f, "intent"),
        }
    }
}

/// An entity annotation: a sub-span of generated text tagged with the name
/// of the slot that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Entity {
    pub slot_name: String,
    pub value: String,
}

/// A generated utterance and its entity annotations.
///
/// Equality and hashing are structural: two examples are the same training
/// example iff both text and entities match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Example {
    pub text: String,
    pub entities: Vec<Entity>,
}

impl Example {
    pub fn new(text: impl Into<String>) -> Example {
        Example {
            text: text.into(),
            entities: Vec::new(),
        }
    }

    /// Appends another example's text and entities to this one, in order.
    pub fn append(&mut self, other: Example) {
        self.text.push_str(&other.text);
        self.entities.extend(other.entities);
    }
}

impl fmt::Display for Example {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<'{}' {:?}>", self.text, self.entities)
    }
}

/// Decisions already taken for named randgen modifiers during one random
/// generation pass: `true` means every node with that name generates,
/// `false` that none does.
pub type RandgenDecisions = HashMap<String, bool>;

/// Checks whether `text` can change the case of its leading letter:
/// leading whitespace is skipped, and the first non-space character must
/// be alphabetic.
pub fn may_change_leading_case(text: &str) -> bool {
    for c in text.chars() {
        if c.is_alphabetic() {
            return true;
        }
        if c.is_whitespace() {
            continue;
        }
        return false;
    }
    false
}

/// Checks whether a leading space may be added to `text`.
pub fn may_get_leading_space(text: &str) -> bool {
    !text.is_empty() && !text.starts_with(' ')
}

/// Returns `text` with its first non-space letter uppercased.
pub fn with_leading_upper(text: &str) -> String {
    change_leading(text, char::to_uppercase)
}

/// Returns `text` with its first non-space letter lowercased.
pub fn with_leading_lower(text: &str) -> String {
    change_leading(text, char::to_lowercase)
}

fn change_leading<I>(text: &str, change: impl Fn(char) -> I) -> String
where
    I: Iterator<Item = char>,
{
    for (i, c) in text.char_indices() {
        if !c.is_whitespace() {
            let mut result = String::with_capacity(text.len());
            result.push_str(&text[..i]);
            result.extend(change(c));
            result.push_str(&text[i + c.len_utf8()..]);
            return result;
        }
    }
    text.to_string()
}

/// Randomly forces the case of the first letter of `text` (50/50).
///
/// This doesn't capitalize: text that is already capitalized or indented
/// keeps its shape apart from that one letter.
pub fn randomly_change_case(text: &str) -> String {
    if rand::thread_rng().gen_bool(0.5) {
        with_leading_upper(text)
    } else {
        with_leading_lower(text)
    }
}
