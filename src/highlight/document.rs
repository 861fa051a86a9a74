//! Highlighted document model and its HTML serialization
//!
//! The highlighter produces [Run]s; markup only exists from [MarkupDocument::from_runs]
//! onward. Runs are siblings, so the serialized body never nests tags, and every opened
//! `<span>` is closed before the next run starts.

use crate::highlight::category::Category;
use std::fmt;

/// Class of the block that wraps standalone and windowed output
pub const CONTAINER_CLASS: &str = "codeframe";

/// A maximal span of source text sharing one display category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub category: Category,
    pub text: String,
}

impl Run {
    pub fn new(category: Category, text: impl Into<String>) -> Self {
        Run {
            category,
            text: text.into(),
        }
    }
}

/// The balanced markup produced by the highlighter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupDocument {
    runs: Vec<Run>,
    body: String,
}

impl MarkupDocument {
    /// Serialize runs into markup, expanding tabs to `tab_width` spaces
    pub fn from_runs(runs: Vec<Run>, tab_width: usize) -> Self {
        let mut body = String::new();
        for run in &runs {
            let text = escape_html(&run.text, tab_width);
            match run.category.class_name() {
                Some(class) => {
                    body.push_str(&format!("<span class=\"{}\">", class));
                    body.push_str(&text);
                    body.push_str("</span>");
                }
                None => body.push_str(&text),
            }
        }
        MarkupDocument { runs, body }
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// The markup without any container
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Number of lines in the body; an empty document still has one (empty) line
    pub fn line_count(&self) -> usize {
        self.body.split('\n').count()
    }

    /// The whole document wrapped in a standalone block
    pub fn to_block(&self) -> String {
        format!(
            "<pre class=\"{}\"><code>{}</code></pre>",
            CONTAINER_CLASS, self.body
        )
    }
}

impl fmt::Display for MarkupDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.body)
    }
}

/// Escape text content, expanding tabs so column arithmetic stays predictable
pub fn escape_html(text: &str, tab_width: usize) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '\t' => out.extend(std::iter::repeat(' ').take(tab_width)),
            c => out.push(c),
        }
    }
    out
}

/// Escape a value for use inside a double quoted attribute
pub fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            c => out.push(c),
        }
    }
    out
}
