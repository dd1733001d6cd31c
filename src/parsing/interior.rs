//! Bracketed-span extraction
//!
//!     Locates the interior token span of a declaration (`[...]`) or an
//!     annotation (`(...)`) in a token stream. Nested brackets of the same
//!     kind are handled with a depth counter, so a declaration whose name
//!     contains escaped bracket characters still closes at the right spot.

use crate::lexing::Token;

fn interior<'a>(tokens: &'a [Token], open: &Token, close: &Token) -> Option<&'a [Token]> {
    let start = tokens.iter().position(|t| t == open)? + 1;
    let mut depth = 1usize;
    let mut end = start;
    while end < tokens.len() && depth > 0 {
        if &tokens[end] == open {
            depth += 1;
        } else if &tokens[end] == close {
            depth -= 1;
        }
        end += 1;
    }
    if depth > 0 {
        // Unterminated span
        return None;
    }
    Some(&tokens[start..end - 1])
}

/// Returns the tokens strictly between the outermost `[` and `]` of the
/// declaration in `tokens`, or `None` if there is no declaration or the
/// span is unterminated.
pub fn get_declaration_interior(tokens: &[Token]) -> Option<&[Token]> {
    interior(tokens, &Token::UnitOpen, &Token::UnitClose)
}

/// Returns the tokens strictly between the outermost `(` and `)` of the
/// annotation in `tokens`, or `None` if there is no annotation or the
/// span is unterminated.
pub fn get_annotation_interior(tokens: &[Token]) -> Option<&[Token]> {
    interior(tokens, &Token::AnnotationOpen, &Token::AnnotationClose)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexing::tokenize;

    #[test]
    fn test_declaration_interior() {
        let tokens = tokenize("~[&greeting#formal]");
        let inside = get_declaration_interior(&tokens).expect("interior should be found");
        assert_eq!(
            inside,
            &[
                Token::Casegen,
                Token::word("greeting"),
                Token::Variation,
                Token::word("formal"),
            ]
        );
    }

    #[test]
    fn test_declaration_interior_nested() {
        let tokens = tokenize("~[outer [inner] tail]");
        let inside = get_declaration_interior(&tokens).expect("interior should be found");
        assert_eq!(inside.first(), Some(&Token::word("outer")));
        assert_eq!(inside.last(), Some(&Token::word("tail")));
        assert!(inside.contains(&Token::UnitOpen));
        assert!(inside.contains(&Token::UnitClose));
    }

    #[test]
    fn test_declaration_interior_missing() {
        assert_eq!(get_declaration_interior(&tokenize("no unit here")), None);
    }

    #[test]
    fn test_declaration_interior_unterminated() {
        assert_eq!(get_declaration_interior(&tokenize("~[greeting")), None);
        assert_eq!(get_declaration_interior(&tokenize("~[a [b] c")), None);
    }

    #[test]
    fn test_annotation_interior() {
        let tokens = tokenize("%[intent](30)");
        let inside = get_annotation_interior(&tokens).expect("interior should be found");
        assert_eq!(inside, &[Token::word("30")]);
    }

    #[test]
    fn test_annotation_interior_empty() {
        let tokens = tokenize("%[intent]()");
        let inside = get_annotation_interior(&tokens).expect("interior should be found");
        assert!(inside.is_empty());
    }
}
