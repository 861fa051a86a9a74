//! Line-window renderer
//!
//! Cuts a bounded, line-numbered excerpt out of balanced markup.
//!
//! Window Placement
//!
//!     The target line sits about two thirds of the way down the window rather than in the
//!     middle: `start = max(1, min(target, lines) - floor(max_lines * 2 / 3))` and
//!     `end = min(start + max_lines - 1, lines)`. Errors are usually caused by code above the
//!     flagged line, so the window favors leading context.
//!
//! Keeping The Cut Balanced
//!
//!     Every line up to the end of the window is replayed through a [TagState], including the
//!     lines before the window that are never shown. The output then:
//!     - starts with the tags that are already open when the window begins,
//!     - closes everything right before the target line, which is rendered as flat text with
//!       its own tags stripped, and reopens whatever is open after it,
//!     - ends with the closing tags of whatever is still open after the last shown line.
//!
//! Column Marking
//!
//!     On the target line a single character can be wrapped in a column marker. Columns count
//!     characters of the stripped text, with an HTML entity such as `&amp;` counting as one.
//!     A trailing space is appended first so the position right after the last character can
//!     be marked too.

use crate::highlight::document::{MarkupDocument, CONTAINER_CLASS};
use crate::highlight::markup::{strip_tags, TagState};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

pub const DEFAULT_MAX_LINES: usize = 15;

pub const LINE_CLASS: &str = "codeframe-line";
pub const LINE_HIGHLIGHT_CLASS: &str = "codeframe-line-highlight";
pub const COLUMN_HIGHLIGHT_CLASS: &str = "codeframe-column-highlight";

/// Which line (and column) to focus, and how many lines to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSpec {
    /// 1-based line to flag
    pub target_line: usize,
    /// 1-based column to mark on the target line, 0 for none
    pub column: usize,
    /// Number of lines in the window
    pub max_lines: usize,
}

impl WindowSpec {
    pub fn new(target_line: usize) -> Self {
        WindowSpec {
            target_line,
            column: 0,
            max_lines: DEFAULT_MAX_LINES,
        }
    }

    pub fn with_column(mut self, column: usize) -> Self {
        self.column = column;
        self
    }

    pub fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = max_lines;
        self
    }
}

impl Default for WindowSpec {
    fn default() -> Self {
        Self::new(1)
    }
}

/// First and last line (1-based, inclusive) shown for a document of `line_count` lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowBounds {
    pub start: usize,
    pub end: usize,
}

impl WindowBounds {
    pub fn compute(line_count: usize, spec: &WindowSpec) -> Self {
        // A zero-line window would underflow below, show at least the target line
        let max_lines = spec.max_lines.max(1);
        // floor(max_lines * 2 / 3) without overflowing for huge windows
        let lead = max_lines / 3 * 2 + max_lines % 3 * 2 / 3;
        let start = spec.target_line.min(line_count).saturating_sub(lead).max(1);
        let end = start.saturating_add(max_lines - 1).min(line_count);
        WindowBounds { start, end }
    }

    /// Width of the widest line label
    pub fn label_width(&self) -> usize {
        self.end.to_string().len()
    }

    pub fn contains(&self, line: usize) -> bool {
        (self.start..=self.end).contains(&line)
    }
}

/// A rendered, balanced excerpt inside its container block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowResult(String);

impl WindowResult {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for WindowResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<WindowResult> for String {
    fn from(result: WindowResult) -> Self {
        result.0
    }
}

/// Render a window of a highlighted document
pub fn render(doc: &MarkupDocument, spec: &WindowSpec) -> WindowResult {
    render_markup(doc.body(), spec)
}

/// Render a window of any balanced markup
pub fn render_markup(markup: &str, spec: &WindowSpec) -> WindowResult {
    WindowResult(format!(
        "<pre class=\"{}\"><div><code>{}</code></div></pre>",
        CONTAINER_CLASS,
        render_lines(markup, spec)
    ))
}

/// Render the numbered lines of the window, without the container
pub fn render_lines(markup: &str, spec: &WindowSpec) -> String {
    let markup = markup.replace("\r\n", "\n");
    let lines: Vec<&str> = markup.split('\n').collect();
    let bounds = WindowBounds::compute(lines.len(), spec);
    let width = bounds.label_width();
    tracing::debug!(
        lines = lines.len(),
        target = spec.target_line,
        start = bounds.start,
        end = bounds.end,
        "rendering window"
    );

    let mut state = TagState::new();
    let mut out = String::new();

    for (index, line) in lines.iter().take(bounds.end).enumerate() {
        let number = index + 1;
        if number == bounds.start {
            out.push_str(&state.opening_markup());
        }

        if number == spec.target_line {
            out.push_str(&state.closing_markup());
            state.scan_line(line);
            let text = mark_column(&strip_tags(line), spec.column);
            out.push_str(&format!(
                "<span class=\"{}\">{:>width$}:    {}</span>\n",
                LINE_HIGHLIGHT_CLASS, number, text
            ));
            out.push_str(&state.opening_markup());
        } else {
            state.scan_line(line);
            if bounds.contains(number) {
                out.push_str(&format!(
                    "<span class=\"{}\">{:>width$}:</span>    {}\n",
                    LINE_CLASS, number, line
                ));
            }
        }
    }

    tracing::trace!(open = state.depth(), "closing window");
    out.push_str(&state.closing_markup());
    out
}

/// Wrap the `column`-th character of `text` in a column marker
///
/// `text` must be tag-free. A trailing space is appended whenever a column is requested.
pub fn mark_column(text: &str, column: usize) -> String {
    if column == 0 {
        return text.to_string();
    }
    let padded = format!("{} ", text);
    let unit = char_units(&padded).nth(column - 1);
    match unit {
        Some(unit) => format!(
            "{}<span class=\"{}\">{}</span>{}",
            &padded[..unit.start],
            COLUMN_HIGHLIGHT_CLASS,
            &padded[unit.clone()],
            &padded[unit.end..]
        ),
        None => padded,
    }
}

/// Byte ranges of display characters, an entity reference being a single character
fn char_units(text: &str) -> impl Iterator<Item = Range<usize>> + '_ {
    let mut offset = 0;
    std::iter::from_fn(move || {
        let rest = &text[offset..];
        let c = rest.chars().next()?;
        let len = match (c, rest.find(';')) {
            ('&', Some(semicolon)) => semicolon + 1,
            _ => c.len_utf8(),
        };
        let unit = offset..offset + len;
        offset += len;
        Some(unit)
    })
}
