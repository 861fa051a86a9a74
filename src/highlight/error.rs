//! Error types for the highlighting engine

use std::fmt;

/// Error raised by the PHP lexer when it cannot tokenize its input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// No token rule matches the input at this position
    UnexpectedCharacter {
        found: char,
        offset: usize,
        line: usize,
    },
    /// A string, comment or heredoc was opened but never closed
    Unterminated {
        construct: &'static str,
        offset: usize,
        line: usize,
    },
}

impl LexError {
    /// Byte offset into the lexed source where the error starts
    pub fn offset(&self) -> usize {
        match self {
            LexError::UnexpectedCharacter { offset, .. } | LexError::Unterminated { offset, .. } => {
                *offset
            }
        }
    }

    /// 1-based line number where the error starts
    pub fn line(&self) -> usize {
        match self {
            LexError::UnexpectedCharacter { line, .. } | LexError::Unterminated { line, .. } => {
                *line
            }
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnexpectedCharacter { found, line, .. } => {
                write!(f, "Unexpected character {:?} on line {}", found, line)
            }
            LexError::Unterminated {
                construct, line, ..
            } => write!(f, "Unterminated {} starting on line {}", construct, line),
        }
    }
}

impl std::error::Error for LexError {}

/// Errors surfaced by [`CodeHighlighter`](super::CodeHighlighter)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HighlightError {
    /// The source could not be tokenized
    Lex(LexError),
    /// The source file could not be read
    Io(String),
}

impl fmt::Display for HighlightError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HighlightError::Lex(err) => write!(f, "Lexing error: {}", err),
            HighlightError::Io(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for HighlightError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HighlightError::Lex(err) => Some(err),
            HighlightError::Io(_) => None,
        }
    }
}

impl From<LexError> for HighlightError {
    fn from(err: LexError) -> Self {
        HighlightError::Lex(err)
    }
}
