//! # codeframe
//!
//! Syntax-highlighted source excerpts for error reports.
//!
//! Given PHP source and a location, codeframe renders a short HTML window of the code around
//! that line: highlighted, line-numbered, with the flagged line (and optionally a column)
//! marked, and with sensitive values redacted. See the [highlight] module for the pipeline.
//!
//! ```rust,ignore
//! use codeframe::highlight::CodeHighlighter;
//!
//! let html = CodeHighlighter::new().highlight_php(source, 42, 7)?;
//! ```
//!
//! ## Testing
//!
//! Markup assertions shared by the test suites live in [highlight::testing].

pub mod highlight;

pub use highlight::{highlight_php, CodeHighlighter};
