//! Interpolated string splitting
//!
//! PHP reports `"Hello $name!"` as a quote, a literal fragment, a variable, another fragment
//! and a closing quote, so the variable gets its own highlight inside the string. Strings
//! without any `$variable` stay a single constant string token.

use super::tokens::{is_ident_char, is_ident_start};
use super::{RawTokenKind, Token};
use std::ops::Range;

/// Push the tokens of a double quoted string literal (quotes included in `text`)
pub fn split_interpolated(text: &str, tokens: &mut Vec<Token>) {
    let inner = &text[1..text.len() - 1];
    let variables = find_variables(inner);

    if variables.is_empty() {
        tokens.push(Token::new(RawTokenKind::ConstantEncapsedString, text));
        return;
    }

    tokens.push(Token::new(RawTokenKind::Symbol, "\""));
    let mut cursor = 0;
    for range in variables {
        if range.start > cursor {
            tokens.push(Token::new(
                RawTokenKind::EncapsedAndWhitespace,
                &inner[cursor..range.start],
            ));
        }
        tokens.push(Token::new(RawTokenKind::Variable, &inner[range.clone()]));
        cursor = range.end;
    }
    if cursor < inner.len() {
        tokens.push(Token::new(
            RawTokenKind::EncapsedAndWhitespace,
            &inner[cursor..],
        ));
    }
    tokens.push(Token::new(RawTokenKind::Symbol, "\""));
}

/// Byte ranges of the unescaped `$name` references inside a string body
fn find_variables(inner: &str) -> Vec<Range<usize>> {
    let mut found = Vec::new();
    let mut chars = inner.char_indices().peekable();
    let mut escaped = false;

    while let Some((start, c)) = chars.next() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '$' if chars.peek().is_some_and(|&(_, next)| is_ident_start(next)) => {
                let mut end = inner.len();
                chars.next();
                while let Some(&(index, next)) = chars.peek() {
                    if !is_ident_char(next) {
                        end = index;
                        break;
                    }
                    chars.next();
                }
                found.push(start..end);
            }
            _ => {}
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        split_interpolated(text, &mut tokens);
        tokens
    }

    #[test]
    fn test_plain_string_stays_whole() {
        assert_eq!(
            split("\"no vars here\""),
            vec![Token::new(
                RawTokenKind::ConstantEncapsedString,
                "\"no vars here\""
            )]
        );
    }

    #[test]
    fn test_variable_fragments() {
        assert_eq!(
            split("\"Hello $name!\""),
            vec![
                Token::new(RawTokenKind::Symbol, "\""),
                Token::new(RawTokenKind::EncapsedAndWhitespace, "Hello "),
                Token::new(RawTokenKind::Variable, "$name"),
                Token::new(RawTokenKind::EncapsedAndWhitespace, "!"),
                Token::new(RawTokenKind::Symbol, "\""),
            ]
        );
    }

    #[test]
    fn test_variable_at_both_ends() {
        assert_eq!(
            split("\"$a$b\""),
            vec![
                Token::new(RawTokenKind::Symbol, "\""),
                Token::new(RawTokenKind::Variable, "$a"),
                Token::new(RawTokenKind::Variable, "$b"),
                Token::new(RawTokenKind::Symbol, "\""),
            ]
        );
    }

    #[test]
    fn test_escaped_dollar_and_lone_dollar() {
        assert_eq!(split(r#""cost \$5""#).len(), 1);
        assert_eq!(split("\"$ 5\"").len(), 1);
        assert_eq!(split("\"$1\"").len(), 1);
    }
}
