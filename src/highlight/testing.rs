//! Testing helpers
//!
//! Assertions over rendered markup, shared by the unit tests and the integration tests in
//! `tests/`. The balance check is deliberately independent from [TagState](super::markup::TagState):
//! it matches tag names on every close, so it also catches output that merely has the right
//! number of tags.

use crate::highlight::markup::{tag_name, MarkupToken};
use logos::Logos;

/// Check that every tag in `markup` is closed by a matching tag, in order
pub fn check_balanced(markup: &str) -> Result<(), String> {
    let mut stack: Vec<&str> = Vec::new();
    let mut lexer = MarkupToken::lexer(markup);

    while let Some(token) = lexer.next() {
        match token {
            Ok(MarkupToken::Open) => stack.push(tag_name(lexer.slice())),
            Ok(MarkupToken::Close) => {
                let name = tag_name(lexer.slice());
                match stack.pop() {
                    Some(open) if open == name => {}
                    Some(open) => {
                        return Err(format!(
                            "</{}> at byte {} closes <{}>",
                            name,
                            lexer.span().start,
                            open
                        ))
                    }
                    None => {
                        return Err(format!(
                            "</{}> at byte {} has nothing to close",
                            name,
                            lexer.span().start
                        ))
                    }
                }
            }
            Ok(MarkupToken::Text) | Err(()) => {}
        }
    }

    match stack.last() {
        None => Ok(()),
        Some(open) => Err(format!("{} tag(s) left open, innermost <{}>", stack.len(), open)),
    }
}

/// Panic with a readable message unless `markup` is balanced
pub fn assert_balanced(markup: &str) {
    if let Err(problem) = check_balanced(markup) {
        panic!("markup is not balanced: {}\n---\n{}", problem, markup);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced() {
        assert!(check_balanced("").is_ok());
        assert!(check_balanced("<a><b>x</b></a>y").is_ok());
    }

    #[test]
    fn test_unbalanced() {
        assert!(check_balanced("<a>").is_err());
        assert!(check_balanced("</a>").is_err());
        assert!(check_balanced("<a><b></a></b>").is_err());
    }

    #[test]
    #[should_panic(expected = "markup is not balanced")]
    fn test_assert_balanced_panics() {
        assert_balanced("<span>");
    }
}
