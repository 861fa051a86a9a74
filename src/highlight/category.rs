//! Display categories
//!
//! Every raw token kind maps to one of a handful of display categories. The categories carry
//! the CSS class names used in the markup; downstream renderers (terminal colorizers, themes)
//! key off these names, so they are part of the public contract.

use crate::highlight::lexing::RawTokenKind;

pub const COMMENT_CLASS: &str = "codeframe-comment";
pub const NUMBER_CLASS: &str = "codeframe-number";
pub const VARIABLE_CLASS: &str = "codeframe-var";
pub const STRING_CLASS: &str = "codeframe-string";
pub const KEYWORD_CLASS: &str = "codeframe-keyword";

/// How a run of source text is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Comment,
    /// Rendered as bare text, without a wrapping tag
    Plain,
    Number,
    Variable,
    StringLiteral,
    Keyword,
    /// Never starts a run of its own, see [Category::resolve]
    Whitespace,
}

impl Category {
    /// The CSS class for this category, `None` for untagged text
    pub fn class_name(self) -> Option<&'static str> {
        match self {
            Category::Comment => Some(COMMENT_CLASS),
            Category::Number => Some(NUMBER_CLASS),
            Category::Variable => Some(VARIABLE_CLASS),
            Category::StringLiteral => Some(STRING_CLASS),
            Category::Keyword => Some(KEYWORD_CLASS),
            Category::Plain | Category::Whitespace => None,
        }
    }

    /// The effective category of `kind` when it follows a run of category `last`
    ///
    /// Whitespace extends whatever run it follows; everything else maps directly.
    pub fn resolve(kind: RawTokenKind, last: Category) -> Category {
        match category_of(kind) {
            Category::Whitespace => last,
            category => category,
        }
    }
}

/// Map a raw token kind to its display category
pub fn category_of(kind: RawTokenKind) -> Category {
    match kind {
        RawTokenKind::Comment | RawTokenKind::DocComment | RawTokenKind::InlineHtml => {
            Category::Comment
        }
        RawTokenKind::OpenTag
        | RawTokenKind::OpenTagWithEcho
        | RawTokenKind::CloseTag
        | RawTokenKind::MagicConstant
        | RawTokenKind::Name
        | RawTokenKind::NameFullyQualified
        | RawTokenKind::NameQualified
        | RawTokenKind::NameRelative => Category::Plain,
        RawTokenKind::LNumber | RawTokenKind::DNumber => Category::Number,
        RawTokenKind::Variable => Category::Variable,
        RawTokenKind::ConstantEncapsedString
        | RawTokenKind::EncapsedAndWhitespace
        | RawTokenKind::Heredoc => Category::StringLiteral,
        RawTokenKind::Whitespace => Category::Whitespace,
        RawTokenKind::Keyword | RawTokenKind::Attribute | RawTokenKind::Symbol => {
            Category::Keyword
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(RawTokenKind::Comment, Category::Comment)]
    #[case(RawTokenKind::DocComment, Category::Comment)]
    #[case(RawTokenKind::InlineHtml, Category::Comment)]
    #[case(RawTokenKind::OpenTag, Category::Plain)]
    #[case(RawTokenKind::CloseTag, Category::Plain)]
    #[case(RawTokenKind::MagicConstant, Category::Plain)]
    #[case(RawTokenKind::NameQualified, Category::Plain)]
    #[case(RawTokenKind::LNumber, Category::Number)]
    #[case(RawTokenKind::DNumber, Category::Number)]
    #[case(RawTokenKind::Variable, Category::Variable)]
    #[case(RawTokenKind::EncapsedAndWhitespace, Category::StringLiteral)]
    #[case(RawTokenKind::Heredoc, Category::StringLiteral)]
    #[case(RawTokenKind::Keyword, Category::Keyword)]
    #[case(RawTokenKind::Symbol, Category::Keyword)]
    #[case(RawTokenKind::Attribute, Category::Keyword)]
    fn test_category_of(#[case] kind: RawTokenKind, #[case] expected: Category) {
        assert_eq!(category_of(kind), expected);
    }

    #[test]
    fn test_whitespace_inherits_previous_category() {
        assert_eq!(
            Category::resolve(RawTokenKind::Whitespace, Category::Number),
            Category::Number
        );
        assert_eq!(
            Category::resolve(RawTokenKind::Whitespace, Category::Plain),
            Category::Plain
        );
        assert_eq!(
            Category::resolve(RawTokenKind::Variable, Category::Number),
            Category::Variable
        );
    }

    #[test]
    fn test_class_names() {
        assert_eq!(Category::Plain.class_name(), None);
        assert_eq!(Category::Keyword.class_name(), Some("codeframe-keyword"));
        assert_eq!(Category::StringLiteral.class_name(), Some("codeframe-string"));
    }
}
