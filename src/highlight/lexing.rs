//! PHP lexer
//!
//! This module turns PHP source into the flat token sequence consumed by the highlighter.
//!
//! Structure:
//!     A PHP file alternates between inline HTML and code regions. The mode switch is done here,
//!     by hand: inline HTML runs up to the next open tag, and each code region is handed to the
//!     logos lexer in [tokens] until it produces a close tag (or the input ends).
//!
//!     Raw logos tokens are then refined into [RawTokenKind]s:
//!     - names are classified into keywords, magic constants and (qualified) names,
//!     - double quoted strings containing `$variables` are split into their interpolated
//!       fragments, see [interpolation].
//!
//! The lexer performs no recovery. Input it cannot tokenize (an unterminated string, comment
//! or heredoc, or a stray control character) is reported as a [LexError].

pub mod interpolation;
pub mod tokens;

use crate::highlight::error::LexError;
use logos::Logos;
use serde::Serialize;
use std::fmt;
use tokens::PhpToken;

/// Token kinds as seen by the category mapper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RawTokenKind {
    /// `<?php` plus the single whitespace character after it, or `<?`
    OpenTag,
    /// `<?=`
    OpenTagWithEcho,
    /// `?>` plus an optional newline
    CloseTag,
    /// Text outside of any code region
    InlineHtml,
    Comment,
    DocComment,
    Whitespace,
    Variable,
    /// Integer literal
    LNumber,
    /// Floating point literal
    DNumber,
    /// A string literal without interpolation
    ConstantEncapsedString,
    /// Literal fragment of an interpolated or backtick string
    EncapsedAndWhitespace,
    /// Heredoc or nowdoc, from `<<<` through the closing label
    Heredoc,
    /// Unqualified name: function, class or constant identifiers, `true`, `null`...
    Name,
    NameFullyQualified,
    NameQualified,
    NameRelative,
    /// `__LINE__`, `__FILE__`, `__CLASS__`...
    MagicConstant,
    /// Reserved word
    Keyword,
    /// `#[`
    Attribute,
    /// Operators and punctuation
    Symbol,
}

/// A lexed piece of source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub text: String,
    pub kind: RawTokenKind,
}

impl Token {
    pub fn new(kind: RawTokenKind, text: impl Into<String>) -> Self {
        Token {
            text: text.into(),
            kind,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {:?}", self.kind, self.text)
    }
}

const MAGIC_CONSTANTS: &[&str] = &[
    "__line__",
    "__file__",
    "__dir__",
    "__trait__",
    "__method__",
    "__function__",
    "__namespace__",
    "__class__",
];

const KEYWORDS: &[&str] = &[
    "__halt_compiler",
    "abstract",
    "and",
    "array",
    "as",
    "break",
    "callable",
    "case",
    "catch",
    "class",
    "clone",
    "const",
    "continue",
    "declare",
    "default",
    "die",
    "do",
    "echo",
    "else",
    "elseif",
    "empty",
    "enddeclare",
    "endfor",
    "endforeach",
    "endif",
    "endswitch",
    "endwhile",
    "enum",
    "eval",
    "exit",
    "extends",
    "final",
    "finally",
    "fn",
    "for",
    "foreach",
    "function",
    "global",
    "goto",
    "if",
    "implements",
    "include",
    "include_once",
    "instanceof",
    "insteadof",
    "interface",
    "isset",
    "list",
    "match",
    "namespace",
    "new",
    "or",
    "print",
    "private",
    "protected",
    "public",
    "readonly",
    "require",
    "require_once",
    "return",
    "static",
    "switch",
    "throw",
    "trait",
    "try",
    "unset",
    "use",
    "var",
    "while",
    "xor",
    "yield",
];

/// Tokenize PHP source, inline HTML included
///
/// The concatenated token texts always reproduce `source` exactly.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < source.len() {
        let rest = &source[pos..];
        let Some((start, kind, len)) = find_open_tag(rest) else {
            tokens.push(Token::new(RawTokenKind::InlineHtml, rest));
            break;
        };
        if start > 0 {
            tokens.push(Token::new(RawTokenKind::InlineHtml, &rest[..start]));
        }
        tokens.push(Token::new(kind, &rest[start..start + len]));
        pos = lex_code(source, pos + start + len, &mut tokens)?;
    }

    tracing::trace!(tokens = tokens.len(), "tokenized source");
    Ok(tokens)
}

/// Locate the next open tag, returning its offset, kind and length
fn find_open_tag(text: &str) -> Option<(usize, RawTokenKind, usize)> {
    let start = text.find("<?")?;
    let after = &text[start + 2..];

    if after.starts_with('=') {
        return Some((start, RawTokenKind::OpenTagWithEcho, 3));
    }
    if after
        .get(..3)
        .is_some_and(|word| word.eq_ignore_ascii_case("php"))
    {
        match after[3..].chars().next() {
            None => return Some((start, RawTokenKind::OpenTag, 5)),
            Some(c) if c.is_ascii_whitespace() => {
                return Some((start, RawTokenKind::OpenTag, 5 + c.len_utf8()))
            }
            Some(_) => {}
        }
    }
    Some((start, RawTokenKind::OpenTag, 2))
}

/// Lex one code region starting at `start`, returning the offset where inline HTML resumes
fn lex_code(source: &str, start: usize, tokens: &mut Vec<Token>) -> Result<usize, LexError> {
    let mut lexer = PhpToken::lexer(&source[start..]);

    while let Some(result) = lexer.next() {
        let text = lexer.slice();
        match result {
            Ok(PhpToken::CloseTag) => {
                tokens.push(Token::new(RawTokenKind::CloseTag, text));
                return Ok(start + lexer.span().end);
            }
            Ok(PhpToken::DoubleQuoted) => interpolation::split_interpolated(text, tokens),
            Ok(token) => tokens.push(Token::new(raw_kind(token, text), text)),
            Err(()) => return Err(lex_error(source, start + lexer.span().start)),
        }
    }

    Ok(source.len())
}

fn raw_kind(token: PhpToken, text: &str) -> RawTokenKind {
    match token {
        PhpToken::Whitespace => RawTokenKind::Whitespace,
        PhpToken::CloseTag => RawTokenKind::CloseTag,
        PhpToken::Comment | PhpToken::BlockComment => RawTokenKind::Comment,
        PhpToken::DocComment => RawTokenKind::DocComment,
        PhpToken::Attribute => RawTokenKind::Attribute,
        PhpToken::Variable => RawTokenKind::Variable,
        PhpToken::LNumber => RawTokenKind::LNumber,
        PhpToken::DNumber => RawTokenKind::DNumber,
        PhpToken::SingleQuoted | PhpToken::DoubleQuoted => RawTokenKind::ConstantEncapsedString,
        PhpToken::Backtick => RawTokenKind::EncapsedAndWhitespace,
        PhpToken::Heredoc => RawTokenKind::Heredoc,
        PhpToken::Name => classify_name(text),
        PhpToken::Symbol => RawTokenKind::Symbol,
    }
}

/// Classify a lexed name the way PHP's tokenizer reports it
pub fn classify_name(name: &str) -> RawTokenKind {
    if name.starts_with('\\') {
        return RawTokenKind::NameFullyQualified;
    }
    if name.contains('\\') {
        let relative = name
            .get(..10)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("namespace\\"));
        return if relative {
            RawTokenKind::NameRelative
        } else {
            RawTokenKind::NameQualified
        };
    }

    let lower = name.to_ascii_lowercase();
    if MAGIC_CONSTANTS.contains(&lower.as_str()) {
        RawTokenKind::MagicConstant
    } else if KEYWORDS.contains(&lower.as_str()) {
        RawTokenKind::Keyword
    } else {
        RawTokenKind::Name
    }
}

fn lex_error(source: &str, offset: usize) -> LexError {
    let line = source[..offset].matches('\n').count() + 1;
    let rest = &source[offset..];

    let construct = if rest.starts_with(['\'', '"', '`']) {
        Some("string")
    } else if rest.starts_with("/*") {
        Some("comment")
    } else if rest.starts_with("<<<") {
        Some("heredoc")
    } else {
        None
    };

    match construct {
        Some(construct) => LexError::Unterminated {
            construct,
            offset,
            line,
        },
        None => LexError::UnexpectedCharacter {
            found: rest.chars().next().unwrap_or('\0'),
            offset,
            line,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<RawTokenKind> {
        tokenize(source)
            .expect("source to tokenize")
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(tokenize("").unwrap(), vec![]);
    }

    #[test]
    fn test_plain_html_is_one_token() {
        let tokens = tokenize("<p>Hello</p>\n").unwrap();
        assert_eq!(
            tokens,
            vec![Token::new(RawTokenKind::InlineHtml, "<p>Hello</p>\n")]
        );
    }

    #[test]
    fn test_open_tags() {
        let tokens = tokenize("<?php\necho 1;").unwrap();
        assert_eq!(tokens[0], Token::new(RawTokenKind::OpenTag, "<?php\n"));

        let tokens = tokenize("<?= $a ?>").unwrap();
        assert_eq!(tokens[0], Token::new(RawTokenKind::OpenTagWithEcho, "<?="));

        let tokens = tokenize("<?\nfoo();").unwrap();
        assert_eq!(tokens[0], Token::new(RawTokenKind::OpenTag, "<?"));
        assert_eq!(tokens[1], Token::new(RawTokenKind::Whitespace, "\n"));

        let tokens = tokenize("<?PHP").unwrap();
        assert_eq!(tokens, vec![Token::new(RawTokenKind::OpenTag, "<?PHP")]);
    }

    #[test]
    fn test_mode_switching() {
        let source = "<h1><?= $title ?></h1>\n<?php echo 1;";
        assert_eq!(
            kinds(source),
            vec![
                RawTokenKind::InlineHtml,
                RawTokenKind::OpenTagWithEcho,
                RawTokenKind::Whitespace,
                RawTokenKind::Variable,
                RawTokenKind::Whitespace,
                RawTokenKind::CloseTag,
                RawTokenKind::InlineHtml,
                RawTokenKind::OpenTag,
                RawTokenKind::Keyword,
                RawTokenKind::Whitespace,
                RawTokenKind::LNumber,
                RawTokenKind::Symbol,
            ]
        );
    }

    #[test]
    fn test_tokens_reproduce_source() {
        let source = "<html>\n<?php\n/** doc */\nfunction f($a) {\n\treturn \"x $a y\";\n}\n?>\n</html>";
        let rebuilt: String = tokenize(source)
            .unwrap()
            .into_iter()
            .map(|token| token.text)
            .collect();
        assert_eq!(rebuilt, source);
    }

    #[test]
    fn test_classify_name() {
        assert_eq!(classify_name("function"), RawTokenKind::Keyword);
        assert_eq!(classify_name("RETURN"), RawTokenKind::Keyword);
        assert_eq!(classify_name("__halt_compiler"), RawTokenKind::Keyword);
        assert_eq!(classify_name("__DIR__"), RawTokenKind::MagicConstant);
        assert_eq!(classify_name("strlen"), RawTokenKind::Name);
        assert_eq!(classify_name("null"), RawTokenKind::Name);
        assert_eq!(classify_name(r"\Foo\Bar"), RawTokenKind::NameFullyQualified);
        assert_eq!(classify_name(r"Foo\Bar"), RawTokenKind::NameQualified);
        assert_eq!(classify_name(r"namespace\Foo"), RawTokenKind::NameRelative);
    }

    #[test]
    fn test_unterminated_string_error() {
        let err = tokenize("<?php\n$a = 'oops;\n").unwrap_err();
        assert_eq!(
            err,
            LexError::Unterminated {
                construct: "string",
                offset: 11,
                line: 2
            }
        );
    }

    #[test]
    fn test_unterminated_comment_error() {
        let err = tokenize("<?php\n\n/* forever").unwrap_err();
        assert!(matches!(
            err,
            LexError::Unterminated {
                construct: "comment",
                line: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_unexpected_character_error() {
        let err = tokenize("<?php \u{1}").unwrap_err();
        assert_eq!(
            err,
            LexError::UnexpectedCharacter {
                found: '\u{1}',
                offset: 6,
                line: 1
            }
        );
    }

    #[test]
    fn test_html_is_never_lexed_as_code() {
        // A quote in inline HTML must not start a string
        assert!(tokenize("<a href='x>link").is_ok());
    }

    #[test]
    fn test_token_display() {
        let token = Token::new(RawTokenKind::Variable, "$x");
        assert_eq!(token.to_string(), "Variable \"$x\"");
    }
}
