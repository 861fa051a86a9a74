//! Lexical highlighter
//!
//! Turns PHP source into a [MarkupDocument] in three steps:
//!
//! 1. Preprocessing ([preprocess]): line endings are normalized, anything after
//!    `__halt_compiler();` is dropped, trailing whitespace is trimmed and every
//!    `/*sensitive{*/ ... /*}*/` region is replaced by a fixed redaction text.
//! 2. Tokenization through the [lexer](crate::highlight::lexing).
//! 3. Folding tokens into runs ([build_runs]): whitespace joins the run it follows and
//!    consecutive tokens of the same category are merged, so no two adjacent runs share a
//!    category.
//!
//! Redaction happens before lexing so secret values never reach the token stream, the markup
//! or the logs.

use crate::highlight::category::Category;
use crate::highlight::config::HighlightConfig;
use crate::highlight::document::{MarkupDocument, Run};
use crate::highlight::error::LexError;
use crate::highlight::lexing::{self, Token};
use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};
use std::borrow::Cow;

/// Everything after the halt marker is payload, not code
static HALT_COMPILER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)(__halt_compiler\s*\(\s*\)\s*;).*").expect("halt compiler regex is valid")
});

/// Non-greedy, so each marked region is redacted separately
static SENSITIVE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)/\*sensitive\{\*/.*?/\*\}\*/").expect("sensitive region regex is valid")
});

/// Highlight PHP source into balanced markup
pub fn highlight(source: &str, config: &HighlightConfig) -> Result<MarkupDocument, LexError> {
    let code = preprocess(source, config);
    let tokens = lexing::tokenize(&code)?;
    let runs = build_runs(&tokens);
    tracing::debug!(
        tokens = tokens.len(),
        runs = runs.len(),
        "highlighted source"
    );
    Ok(MarkupDocument::from_runs(runs, config.tab_width))
}

/// Render preprocessed source as a single untagged run
///
/// Used when the source cannot be tokenized. Sensitive regions are still redacted.
pub fn plain(source: &str, config: &HighlightConfig) -> MarkupDocument {
    let code = preprocess(source, config);
    let runs = if code.is_empty() {
        Vec::new()
    } else {
        vec![Run::new(Category::Plain, code)]
    };
    MarkupDocument::from_runs(runs, config.tab_width)
}

/// Apply all source-level rewrites that must happen before tokenization
pub fn preprocess(source: &str, config: &HighlightConfig) -> String {
    let code = source.replace("\r\n", "\n");
    let code = truncate_after_halt(&code);
    let code = code.trim_end();
    redact(code, &config.redaction).into_owned()
}

/// Drop everything after `__halt_compiler();`, keeping the marker itself
pub fn truncate_after_halt(code: &str) -> Cow<'_, str> {
    match HALT_COMPILER_REGEX.captures(code) {
        Some(captures) => {
            let (Some(whole), Some(marker)) = (captures.get(0), captures.get(1)) else {
                return Cow::Borrowed(code);
            };
            tracing::debug!(offset = whole.start(), "truncated source after halt marker");
            Cow::Owned(format!("{}{}", &code[..whole.start()], marker.as_str()))
        }
        None => Cow::Borrowed(code),
    }
}

/// Replace every sensitive region with `redaction`
///
/// The replacement length does not depend on the secret, and redacting an already redacted
/// text is a no-op (as long as the redaction text contains no markers itself).
pub fn redact<'a>(code: &'a str, redaction: &str) -> Cow<'a, str> {
    let redacted = SENSITIVE_REGEX.replace_all(code, NoExpand(redaction));
    if let Cow::Owned(_) = redacted {
        tracing::debug!(
            regions = SENSITIVE_REGEX.find_iter(code).count(),
            "redacted sensitive regions"
        );
    }
    redacted
}

/// Fold tokens into maximal same-category runs
pub fn build_runs(tokens: &[Token]) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();
    let mut last = Category::Plain;

    for token in tokens {
        let next = Category::resolve(token.kind, last);
        match runs.last_mut() {
            Some(run) if run.category == next => run.text.push_str(&token.text),
            _ => runs.push(Run::new(next, token.text.as_str())),
        }
        last = next;
    }

    runs
}
