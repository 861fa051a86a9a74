//! Token definitions for PHP code regions
//!
//! This module defines the tokens the logos lexer produces between an open tag (`<?php`,
//! `<?=`, `<?`) and the matching `?>`. Inline HTML outside those regions never reaches this
//! lexer, see [tokenize](super::tokenize).
//!
//! Names are lexed as a single `Name` token and classified afterwards (keyword, magic
//! constant, qualified name...), which keeps the logos definition free of overlapping
//! keyword rules.
use logos::{Lexer, Logos};

/// All possible tokens inside a PHP code region
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
pub enum PhpToken {
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    // `?>` swallows a single trailing newline, like PHP does
    #[regex(r"\?>\n?")]
    CloseTag,

    // Runs to the end of the line or to `?>`, whichever comes first
    #[regex(r"//|#", line_comment)]
    Comment,

    #[token("/*", block_comment)]
    BlockComment,

    #[token("/**", block_comment)]
    DocComment,

    #[token("#[")]
    Attribute,

    #[regex(r"\$[a-zA-Z_\x{80}-\x{10FFFF}][a-zA-Z0-9_\x{80}-\x{10FFFF}]*")]
    Variable,

    #[regex(r"0[xX][0-9a-fA-F]+(_[0-9a-fA-F]+)*")]
    #[regex(r"0[bB][01]+(_[01]+)*")]
    #[regex(r"0[oO][0-7]+(_[0-7]+)*")]
    #[regex(r"[0-9]+(_[0-9]+)*")]
    LNumber,

    #[regex(r"[0-9]+(_[0-9]+)*\.([0-9]+(_[0-9]+)*)?([eE][+-]?[0-9]+)?")]
    #[regex(r"\.[0-9]+(_[0-9]+)*([eE][+-]?[0-9]+)?")]
    #[regex(r"[0-9]+(_[0-9]+)*[eE][+-]?[0-9]+")]
    DNumber,

    #[regex(r"'([^'\\]|\\(.|\n))*'")]
    SingleQuoted,

    #[regex(r#""([^"\\]|\\(.|\n))*""#)]
    DoubleQuoted,

    #[regex(r"`[^`]*`")]
    Backtick,

    // Heredoc and nowdoc; the body is consumed by the callback
    #[regex(
        r#"<<<[ \t]*([a-zA-Z_][a-zA-Z0-9_]*|"[a-zA-Z_][a-zA-Z0-9_]*"|'[a-zA-Z_][a-zA-Z0-9_]*')\r?\n"#,
        heredoc
    )]
    Heredoc,

    // Bare, qualified and fully qualified names (keywords included)
    #[regex(
        r"\\?[a-zA-Z_\x{80}-\x{10FFFF}][a-zA-Z0-9_\x{80}-\x{10FFFF}]*(\\[a-zA-Z_\x{80}-\x{10FFFF}][a-zA-Z0-9_\x{80}-\x{10FFFF}]*)*"
    )]
    Name,

    // Operators and punctuation, one character at a time
    #[regex(r"[-+*/%=<>!&|^~.?:;,@(){}\[\]$\\]")]
    Symbol,
}

/// True for characters that may start a PHP identifier
pub fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic() || !c.is_ascii()
}

/// True for characters that may continue a PHP identifier
pub fn is_ident_char(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric() || !c.is_ascii()
}

fn line_comment(lex: &mut Lexer<PhpToken>) -> bool {
    let rest = lex.remainder();
    let line_end = rest.find('\n').unwrap_or(rest.len());
    let end = rest[..line_end].find("?>").unwrap_or(line_end);
    lex.bump(end);
    true
}

fn block_comment(lex: &mut Lexer<PhpToken>) -> bool {
    let rest = lex.remainder();
    // `/**/` is an empty comment, not the start of a doc comment
    if lex.slice() == "/**" && rest.starts_with('/') {
        lex.bump(1);
        return true;
    }
    match rest.find("*/") {
        Some(index) => {
            lex.bump(index + 2);
            true
        }
        None => false,
    }
}

fn heredoc(lex: &mut Lexer<PhpToken>) -> bool {
    let label = lex.slice()[3..]
        .trim()
        .trim_matches(|c: char| c == '"' || c == '\'')
        .to_string();
    let rest = lex.remainder();

    let mut line_start = 0;
    loop {
        let line_end = rest[line_start..]
            .find('\n')
            .map(|offset| line_start + offset)
            .unwrap_or(rest.len());
        let line = &rest[line_start..line_end];
        let body = line.trim_start_matches([' ', '\t']);
        let indent = line.len() - body.len();

        if body.starts_with(label.as_str()) && !body[label.len()..].starts_with(is_ident_char) {
            lex.bump(line_start + indent + label.len());
            return true;
        }
        if line_end == rest.len() {
            return false;
        }
        line_start = line_end + 1;
    }
}
