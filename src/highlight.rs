//! Highlighting engine
//!
//! Renders a short, syntax-highlighted excerpt of PHP source around a line (and optionally a
//! column), ready to embed in an HTML error report.
//!
//! The engine runs in two stages:
//!
//! 1. [highlighter]: lexes the whole source ([lexing]), maps tokens to display
//!    [categories](category) and serializes the merged runs into one balanced
//!    [MarkupDocument].
//! 2. [window]: cuts a bounded, line-numbered window out of that markup, rebalancing the
//!    tags at the cut with a [TagState](markup::TagState) and flattening the target line.
//!
//! [CodeHighlighter] composes both and adds the pieces an error report needs: file loading,
//! an injection point for a source link, and a plain-text fallback for sources the lexer
//! rejects.
//!
//! Every call builds its own state, so a single [CodeHighlighter] can be shared freely between
//! threads.

pub mod category;
pub mod config;
pub mod document;
pub mod error;
pub mod highlighter;
pub mod lexing;
pub mod markup;
pub mod testing;
pub mod window;

pub use category::{category_of, Category};
pub use config::{CodeframeConfig, HighlightConfig, Loader};
pub use document::{MarkupDocument, Run};
pub use error::{HighlightError, LexError};
pub use lexing::{tokenize, RawTokenKind, Token};
pub use markup::TagState;
pub use window::{render, render_markup, WindowResult, WindowSpec};

use document::escape_attribute;
use std::fs;
use std::path::Path;

/// Byte offset in rendered output where extra attributes can be inserted
///
/// Rendered output always starts with `<pre class=...`; inserting ` name="value"` at this
/// offset adds an attribute to the container without re-parsing the markup.
pub const ATTRIBUTE_INSERTION_OFFSET: usize = 4;

/// Attribute carrying the editor link of a highlighted file
pub const HREF_ATTRIBUTE: &str = "data-codeframe-href";

/// Highlights and windows PHP source according to a [HighlightConfig]
#[derive(Debug, Clone, Default)]
pub struct CodeHighlighter {
    config: HighlightConfig,
}

impl CodeHighlighter {
    /// A highlighter using the built-in defaults
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: HighlightConfig) -> Self {
        CodeHighlighter { config }
    }

    pub fn config(&self) -> &HighlightConfig {
        &self.config
    }

    /// Highlight the whole source
    pub fn highlight(&self, source: &str) -> Result<MarkupDocument, LexError> {
        highlighter::highlight(source, &self.config)
    }

    /// The window spec for `line` and `column` under this configuration
    pub fn window_spec(&self, line: usize, column: usize) -> WindowSpec {
        WindowSpec::new(line)
            .with_column(column)
            .with_max_lines(self.config.max_lines)
    }

    /// Highlight `source` and render the window around `line`
    pub fn highlight_php(
        &self,
        source: &str,
        line: usize,
        column: usize,
    ) -> Result<WindowResult, LexError> {
        let doc = self.highlight(source)?;
        Ok(render(&doc, &self.window_spec(line, column)))
    }

    /// Like [highlight_php](Self::highlight_php), but never fails
    ///
    /// When the source cannot be tokenized the window is rendered from the escaped,
    /// unhighlighted source instead (sensitive regions are still redacted).
    pub fn highlight_php_or_plain(&self, source: &str, line: usize, column: usize) -> WindowResult {
        let doc = self.highlight(source).unwrap_or_else(|err| {
            tracing::warn!(
                error = %err,
                line = err.line(),
                offset = err.offset(),
                "falling back to unhighlighted source"
            );
            highlighter::plain(source, &self.config)
        });
        render(&doc, &self.window_spec(line, column))
    }

    /// Read, highlight and window a file, optionally linking it to an editor
    ///
    /// The editor URI is attached to the container as a `data-codeframe-href` attribute.
    pub fn highlight_file(
        &self,
        path: impl AsRef<Path>,
        line: usize,
        column: usize,
        editor_uri: Option<&str>,
    ) -> Result<String, HighlightError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)
            .map_err(|e| HighlightError::Io(format!("{}: {}", path.display(), e)))?;
        let mut html = self.highlight_php(&source, line, column)?.into_string();
        if let Some(uri) = editor_uri {
            insert_attribute(&mut html, HREF_ATTRIBUTE, uri);
        }
        Ok(html)
    }
}

/// Insert ` name="value"` into the container tag of rendered output
pub fn insert_attribute(html: &mut String, name: &str, value: &str) {
    if html.len() < ATTRIBUTE_INSERTION_OFFSET || !html.is_char_boundary(ATTRIBUTE_INSERTION_OFFSET)
    {
        return;
    }
    html.insert_str(
        ATTRIBUTE_INSERTION_OFFSET,
        &format!(" {}=\"{}\"", name, escape_attribute(value)),
    );
}

/// Highlight `source` around `line` with the default configuration
pub fn highlight_php(source: &str, line: usize, column: usize) -> Result<WindowResult, LexError> {
    CodeHighlighter::new().highlight_php(source, line, column)
}
