//! Symbol grammar of the template language
//!
//!     The fixed set of special characters, the reserved variation names and
//!     the compiled patterns that recognize requested-example-count
//!     annotations. Everything here is shared by the lexer, the validators
//!     and the annotation parser.

use once_cell::sync::Lazy;
use regex::Regex;

pub const COMMENT_SYM_DEPRECATED: &str = ";";
pub const COMMENT_MARKER: &str = "//";
pub const ESCAPE_SYM: char = '\\';

pub const ALIAS_SYM: char = '~';
pub const SLOT_SYM: char = '@';
pub const INTENT_SYM: char = '%';
pub const UNIT_OPEN_SYM: char = '[';
pub const UNIT_CLOSE_SYM: char = ']';

pub const ANNOTATION_OPEN_SYM: char = '(';
pub const ANNOTATION_CLOSE_SYM: char = ')';
pub const ANNOTATION_SEP: char = ',';
pub const ANNOTATION_ASSIGNMENT_SYM: char = ':';

pub const CHOICE_OPEN_SYM: char = '{';
pub const CHOICE_CLOSE_SYM: char = '}';
pub const CHOICE_SEP: char = '/';

pub const VARIATION_SYM: char = '#';
pub const RAND_GEN_SYM: char = '?';
pub const PERCENT_GEN_SYM: char = '/';
pub const CASE_GEN_SYM: char = '&';
pub const ARG_SYM: char = '$';

pub const ALT_SLOT_VALUE_NAME_SYM: char = '=';

pub const INCLUDE_FILE_SYM: char = '|';

/// Variation names with a meaning for the generator itself.
pub const RESERVED_VARIATION_NAMES: [&str; 4] =
    ["all-variations-aggregation", "rules", "nb-gen-asked", "arg"];

/// Matches the `](<n>)` example-count suffix of an intent declaration.
pub static PATTERN_NB_EXAMPLES_ASKED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\]\((?P<nbgen>[0-9]+)\)").expect("Invalid regex pattern"));

/// Matches a `'train': <n>` (or `training`) annotation entry.
pub static PATTERN_NB_TRAINING_EXAMPLES_ASKED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"'?train(?:ing)?'?\s*:\s*'?(?P<nbgen>[0-9]+)'?").expect("Invalid regex pattern")
});

/// Matches a `'test': <n>` (or `testing`) annotation entry.
pub static PATTERN_NB_TEST_EXAMPLES_ASKED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"'?test(?:ing)?'?\s*:\s*'?(?P<nbgen_test>[0-9]+)'?").expect("Invalid regex pattern")
});

/// Matches a training-count key on its own (quoted or not).
pub static PATTERN_NB_TRAIN_EX_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^'?train(?:ing)?'?$").expect("Invalid regex pattern"));

/// Matches a testing-count key on its own (quoted or not).
pub static PATTERN_NB_TEST_EX_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^'?test(?:ing)?'?$").expect("Invalid regex pattern"));
