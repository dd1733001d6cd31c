//! # parlance
//!
//! A parser and generation engine for a small template language describing
//! intents, slots and aliases for conversational-AI training data.
//!
//! Pipeline
//!
//!     Template lines flow through comment stripping and tokenization into flat
//!     token streams. The parsing layer extracts the bracketed interior of unit
//!     declarations and annotations, validates the modifier sequence, and turns
//!     token spans into typed modifier records and sub-rule segments. An external
//!     orchestrator assembles those pieces into `UnitDefinition`s and
//!     `RuleContent` trees, registered in a `UnitStore`.
//!
//!     The generation engine then produces `Example`s from a definition: either
//!     one random utterance (`generate_random`) or the exhaustive set
//!     (`generate_all`), applying case generation, correlated random generation
//!     and argument substitution along the way. `get_max_nb_generated_examples`
//!     bounds the exhaustive set's size without materializing it.
//!
//! Out of Scope
//!
//!     File discovery and inclusion, CLI handling and output writers are
//!     collaborators of this crate, not part of it. The only artifact handed to
//!     writers is the `Example` value (text plus ordered entity annotations).

pub mod deprecations;
pub mod error;
pub mod lexing;
pub mod parsing;
pub mod units;

pub use error::{GenerationError, ParseError};
pub use lexing::{tokenize, Token};
pub use units::{Entity, Example, UnitStore, UnitType};
