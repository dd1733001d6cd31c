//! Requested example-count extraction
//!
//!     Intent declarations can ask for a number of training and testing
//!     examples, either as a plain `(<n>)` suffix or as a
//!     `('train': <n>, 'test': <n>)` mapping. The token-based scanner works
//!     on an annotation interior span; the text-based scanners work on the
//!     raw intent line. A non-numeric count in the mapping form means "no
//!     count specified" and yields `None`; asking twice is a syntax error.

use crate::error::ParseError;
use crate::lexing::Token;
use crate::parsing::symbols::{
    PATTERN_NB_EXAMPLES_ASKED, PATTERN_NB_TEST_EXAMPLES_ASKED, PATTERN_NB_TEST_EX_KEY,
    PATTERN_NB_TRAINING_EXAMPLES_ASKED, PATTERN_NB_TRAIN_EX_KEY,
};

/// What the annotation scanner expects the next value token to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expecting {
    Nothing,
    TrainCount,
    TestCount,
}

/// Finds the requested training and testing example counts in an
/// annotation interior span, as a `(train, test)` pair.
///
/// A missing testing count defaults to 0. Returns `None` when no training
/// count is present or a given count is not a number.
pub fn find_nb_examples_asked(interior: &[Token]) -> Option<(u32, u32)> {
    let mut nb_train: Option<String> = None;
    let mut nb_test: Option<String> = None;

    let mut expecting = Expecting::Nothing;
    for token in interior {
        let text = match token {
            Token::Word(word) if word.chars().count() > 1 => word,
            _ => continue,
        };
        if PATTERN_NB_TRAIN_EX_KEY.is_match(text) {
            expecting = Expecting::TrainCount;
        } else if PATTERN_NB_TEST_EX_KEY.is_match(text) {
            expecting = Expecting::TestCount;
        } else {
            match expecting {
                Expecting::TrainCount => nb_train = Some(text.clone()),
                Expecting::TestCount => nb_test = Some(text.clone()),
                Expecting::Nothing => continue,
            }
            expecting = Expecting::Nothing;
        }
    }

    let nb_train = nb_train?.trim_matches('\'').parse().ok()?;
    let nb_test = match nb_test {
        Some(value) => value.trim_matches('\'').parse().ok()?,
        None => 0,
    };
    Some((nb_train, nb_test))
}

/// Finds the number of training examples asked on a raw intent line,
/// whether as a `](<n>)` suffix or a `'train': <n>` entry.
///
/// Fails if more than one count is specified for the same intent.
pub fn find_nb_training_examples_asked(intent_text: &str) -> Result<Option<u32>, ParseError> {
    let mut asked: Option<&str> = None;
    let patterns = [&PATTERN_NB_EXAMPLES_ASKED, &PATTERN_NB_TRAINING_EXAMPLES_ASKED];
    for pattern in patterns {
        for captures in pattern.captures_iter(intent_text) {
            if asked.is_some() {
                return Err(ParseError::MultipleNbExamplesAsked {
                    kind: "training",
                    text: intent_text.to_string(),
                });
            }
            asked = Some(captures.name("nbgen").map_or("", |m| m.as_str()));
        }
    }
    match asked {
        None => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|source| ParseError::InvalidNumber {
                value: value.to_string(),
                source,
            }),
    }
}

/// Finds the number of testing examples asked on a raw intent line.
///
/// Fails if more than one count is specified for the same intent.
pub fn find_nb_testing_examples_asked(intent_text: &str) -> Result<Option<u32>, ParseError> {
    let mut asked: Option<&str> = None;
    for captures in PATTERN_NB_TEST_EXAMPLES_ASKED.captures_iter(intent_text) {
        if asked.is_some() {
            return Err(ParseError::MultipleNbExamplesAsked {
                kind: "testing",
                text: intent_text.to_string(),
            });
        }
        asked = Some(captures.name("nbgen_test").map_or("", |m| m.as_str()));
    }
    match asked {
        None => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|source| ParseError::InvalidNumber {
                value: value.to_string(),
                source,
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexing::tokenize;
    use crate::parsing::interior::get_annotation_interior;

    fn interior(source: &str) -> Vec<Token> {
        get_annotation_interior(&tokenize(source))
            .expect("test input should hold an annotation")
            .to_vec()
    }

    #[test]
    fn test_keyed_counts() {
        let counts = find_nb_examples_asked(&interior("%[intent]('train': '100', 'test': '25')"));
        assert_eq!(counts, Some((100, 25)));
    }

    #[test]
    fn test_keyed_count_without_test() {
        let counts = find_nb_examples_asked(&interior("%[intent](training: 40)"));
        assert_eq!(counts, Some((40, 0)));
    }

    #[test]
    fn test_no_counts() {
        assert_eq!(find_nb_examples_asked(&interior("%[intent]()")), None);
    }

    #[test]
    fn test_non_numeric_count_is_treated_as_absent() {
        let counts = find_nb_examples_asked(&interior("%[intent]('train': many)"));
        assert_eq!(counts, None);
    }

    #[test]
    fn test_suffix_form() {
        let asked = find_nb_training_examples_asked("%[intent](30)")
            .expect("a single count should parse");
        assert_eq!(asked, Some(30));
    }

    #[test]
    fn test_mapping_form() {
        let asked = find_nb_training_examples_asked("%[intent]('training': 12)")
            .expect("a single count should parse");
        assert_eq!(asked, Some(12));
        let asked = find_nb_testing_examples_asked("%[intent]('test': 4)")
            .expect("a single count should parse");
        assert_eq!(asked, Some(4));
    }

    #[test]
    fn test_duplicate_counts_fail() {
        let result = find_nb_training_examples_asked("%[intent](30) 'train': 12");
        assert!(matches!(
            result,
            Err(ParseError::MultipleNbExamplesAsked { .. })
        ));
    }

    #[test]
    fn test_absent_counts() {
        assert_eq!(find_nb_training_examples_asked("%[intent]"), Ok(None));
        assert_eq!(find_nb_testing_examples_asked("%[intent]"), Ok(None));
    }
}
