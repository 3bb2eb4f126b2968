use crate::models::{BlockType, VideoHost};

use super::kinds::LinePrefix;

/// Classification of a single line containing only local facts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineClass<'a> {
    /// Block type decided by the line's prefix.
    pub kind: BlockType,
    /// Line text after trimming and prefix stripping.
    pub body: &'a str,
    /// Whether inline markup in `body` should be translated.
    pub inline: bool,
}

/// Classifies individual lines of flat report text.
pub struct MarkdownLineClassifier;

impl MarkdownLineClassifier {
    /// Classifies a line, or returns `None` for blank lines.
    ///
    /// First match wins: headings (longest prefix first), bullet, numbered,
    /// quote, video URL, and paragraph for everything else.
    pub fn classify<'a>(&self, line: &'a str) -> Option<LineClass<'a>> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }

        for (prefix, kind) in LinePrefix::ORDERED {
            if let Some(body) = trimmed.strip_prefix(prefix) {
                return Some(LineClass {
                    kind,
                    body,
                    inline: true,
                });
            }
        }

        if let Some(m) = LinePrefix::numbered().find(trimmed) {
            return Some(LineClass {
                kind: BlockType::Numbered,
                body: &trimmed[m.end()..],
                inline: true,
            });
        }

        if let Some(body) = trimmed.strip_prefix(LinePrefix::QUOTE) {
            return Some(LineClass {
                kind: BlockType::Quote,
                body,
                inline: true,
            });
        }

        if VideoHost::matches(trimmed) {
            return Some(LineClass {
                kind: BlockType::MediaEmbed,
                body: trimmed,
                inline: false,
            });
        }

        Some(LineClass {
            kind: BlockType::Paragraph,
            body: trimmed,
            inline: true,
        })
    }
}
