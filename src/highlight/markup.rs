//! Tag-balance tracking over rendered markup
//!
//! The window renderer cuts a balanced document at arbitrary line boundaries. To keep the cut
//! well formed it replays the markup line by line through a [TagState], which knows at every
//! point which tags are open and which closing tags would restore balance.
//!
//! Markup is read through a small logos tokenizer ([MarkupToken]) instead of ad hoc pattern
//! matching: a line is a sequence of opening tags, closing tags and text. Text never contains
//! a raw `<` because the highlighter escapes it, so a stray `<` is treated as text.
//!
//! The tracker trusts its input to be balanced (the highlighter guarantees it). Debug builds
//! assert that closing tags match the innermost open tag.

use logos::Logos;
use std::collections::VecDeque;

/// Lexical pieces of a markup line
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupToken {
    #[regex(r"<[a-zA-Z][a-zA-Z0-9-]*([ \t\n][^>]*)?>")]
    Open,

    #[regex(r"</[a-zA-Z][a-zA-Z0-9-]*[ \t\n]*>")]
    Close,

    #[regex(r"[^<]+")]
    Text,
}

/// Name of the element in an opening or closing tag
pub fn tag_name(tag: &str) -> &str {
    let name = tag.trim_start_matches('<').trim_start_matches('/');
    let end = name
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
        .unwrap_or(name.len());
    &name[..end]
}

/// Remove every tag from `markup`, keeping text (and entities) as they are
pub fn strip_tags(markup: &str) -> String {
    let mut lexer = MarkupToken::lexer(markup);
    let mut out = String::with_capacity(markup.len());
    while let Some(token) = lexer.next() {
        match token {
            Ok(MarkupToken::Open) | Ok(MarkupToken::Close) => {}
            Ok(MarkupToken::Text) | Err(()) => out.push_str(lexer.slice()),
        }
    }
    out
}

/// Open/close tag bookkeeping for one scan over a document
///
/// `close_tags` is always the reverse of `open_tags` in closing form: emitting
/// [closing_markup](TagState::closing_markup) closes everything that is open, emitting
/// [opening_markup](TagState::opening_markup) reopens it in the same order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagState {
    open_tags: Vec<String>,
    close_tags: VecDeque<String>,
}

impl TagState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replay every tag of `line`, in textual order
    pub fn scan_line(&mut self, line: &str) {
        let mut lexer = MarkupToken::lexer(line);
        while let Some(token) = lexer.next() {
            match token {
                Ok(MarkupToken::Open) => self.open(lexer.slice()),
                Ok(MarkupToken::Close) => self.close(lexer.slice()),
                Ok(MarkupToken::Text) | Err(()) => {}
            }
        }
    }

    fn open(&mut self, tag: &str) {
        self.close_tags.push_front(format!("</{}>", tag_name(tag)));
        self.open_tags.push(tag.to_string());
    }

    fn close(&mut self, tag: &str) {
        debug_assert!(
            !self.open_tags.is_empty(),
            "closing tag {} without an open tag",
            tag
        );
        if let Some(open) = self.open_tags.pop() {
            self.close_tags.pop_front();
            debug_assert_eq!(
                tag_name(&open),
                tag_name(tag),
                "closing tag {} does not match {}",
                tag,
                open
            );
        }
    }

    /// Currently open tags, outermost first
    pub fn open_tags(&self) -> &[String] {
        &self.open_tags
    }

    /// Closing tags that restore balance, innermost first
    pub fn close_tags(&self) -> impl Iterator<Item = &str> {
        self.close_tags.iter().map(String::as_str)
    }

    /// Number of open tags
    pub fn depth(&self) -> usize {
        self.open_tags.len()
    }

    /// The open tags joined in opening order
    pub fn opening_markup(&self) -> String {
        self.open_tags.concat()
    }

    /// The closing tags joined in closing order
    pub fn closing_markup(&self) -> String {
        self.close_tags().collect()
    }
}
