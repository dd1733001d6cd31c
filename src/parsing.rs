//! Parsing layer
//!
//!     Consumes flat token streams and produces the validated pieces an
//!     orchestrator assembles into the AST: bracketed interior spans,
//!     modifier records, sub-rule segments and requested example counts.
//!
//!     The layering mirrors the order of operations on a template line:
//!
//!         1. Interior extraction finds the span between the outermost
//!            brackets, honoring nesting by depth counting. See
//!            [interior](interior).
//!         2. Validation enforces the structural legality of the span's
//!            modifier sequence. See [validation](validation).
//!         3. Modifier extraction turns the span into a typed record, and
//!            name/word extraction pulls out the unit name or the literal
//!            words. See [modifiers](modifiers).
//!         4. Segmentation splits rule token lists into sub-rule spans and
//!            choice interiors into alternatives. See
//!            [segmentation](segmentation).
//!
//!     Every failure here is a syntax error fatal to the enclosing parse;
//!     only a missing bracketed span degrades to `None` so the caller can
//!     decide whether absence is an error.

pub mod annotations;
pub mod interior;
pub mod modifiers;
pub mod segmentation;
pub mod symbols;
pub mod validation;

pub use annotations::{
    find_nb_examples_asked, find_nb_testing_examples_asked, find_nb_training_examples_asked,
};
pub use interior::{get_annotation_interior, get_declaration_interior};
pub use modifiers::{
    find_alt_slot_value, find_modifiers_choice, find_modifiers_decl, find_modifiers_reference,
    find_modifiers_word_group, find_name, find_words, ChoiceModifiers, DeclarationModifiers,
    ReferenceModifiers, WordGroupModifiers,
};
pub use segmentation::{
    check_no_nested_brackets, is_sub_rule_alias_ref, is_sub_rule_choice, is_sub_rule_intent_ref,
    is_sub_rule_slot_ref, is_sub_rule_word, is_sub_rule_word_group, next_choice_tokens,
    next_sub_rule_tokens, SubRuleTokens,
};
pub use validation::{
    check_choice_validity, check_declaration_validity, check_reference_validity,
};
