//! # Line Kinds
//!
//! Line prefixes the block parser recognises, owned in one place. The parser
//! refers to these constants and never hardcodes `"## "` or `"> "` itself.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::BlockType;

/// Prefixes stripped from a line before inline parsing.
pub struct LinePrefix;

impl LinePrefix {
    pub const HEADING3: &'static str = "### ";
    pub const HEADING2: &'static str = "## ";
    pub const HEADING1: &'static str = "# ";
    pub const BULLET: &'static str = "- ";
    pub const QUOTE: &'static str = "> ";

    /// Literal prefixes in test order. Longest heading first, so a `"## "`
    /// line is never read as a level-one heading.
    pub const ORDERED: [(&'static str, BlockType); 4] = [
        (Self::HEADING3, BlockType::Heading3),
        (Self::HEADING2, BlockType::Heading2),
        (Self::HEADING1, BlockType::Heading1),
        (Self::BULLET, BlockType::Bullet),
    ];

    /// Numbered list marker: digits, a dot and one whitespace character.
    pub fn numbered() -> &'static Regex {
        static NUMBERED: OnceLock<Regex> = OnceLock::new();
        NUMBERED.get_or_init(|| Regex::new(r"^[0-9]+\.\s").expect("Invalid numbered prefix regex"))
    }
}

/// Inline delimiter pairs rewritten into style spans.
pub struct InlineDelimiter;

impl InlineDelimiter {
    /// `**text**`
    pub fn bold() -> &'static Regex {
        static BOLD: OnceLock<Regex> = OnceLock::new();
        BOLD.get_or_init(|| Regex::new(r"\*\*(.*?)\*\*").expect("Invalid bold regex"))
    }

    /// `==text==`
    pub fn highlight() -> &'static Regex {
        static HIGHLIGHT: OnceLock<Regex> = OnceLock::new();
        HIGHLIGHT.get_or_init(|| Regex::new(r"==(.*?)==").expect("Invalid highlight regex"))
    }
}
