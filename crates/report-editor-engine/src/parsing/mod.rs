//! # Block Parsing
//!
//! Turns flat report text into an ordered block sequence. Pure: no store, no
//! ids, never fails.
//!
//! ## Phases
//!
//! 1. **Line Classification** (`classify`): each non-blank line is trimmed and
//!    classified by its prefix into a `LineClass`
//! 2. **Inline Translation** (`inline`): `**bold**` and `==highlight==` in the
//!    line body become style spans
//!
//! ## Modules
//!
//! - **`kinds`**: prefix and delimiter constants (`LinePrefix`, `InlineDelimiter`)
//! - **`classify`**: `MarkdownLineClassifier` produces `LineClass` for each line
//! - **`inline`**: `translate_inline()` single-pass span rewriting
//!
//! ## Key Invariants
//!
//! - Blank lines never produce blocks
//! - Unrecognised lines are paragraphs
//! - Media lines keep the untouched URL as content

pub mod classify;
pub mod inline;
pub mod kinds;

#[cfg(test)]
mod tests;

use crate::models::{NewBlock, RichText};

pub use classify::{LineClass, MarkdownLineClassifier};
pub use inline::{translate_inline, translate_inline_str};

/// Parse flat text into blocks without ids.
pub fn parse_blocks(text: &str) -> Vec<NewBlock> {
    let classifier = MarkdownLineClassifier;
    text.lines()
        .filter_map(|line| classifier.classify(line))
        .map(|lc| {
            let content = if lc.inline {
                translate_inline_str(lc.body)
            } else {
                RichText::plain(lc.body)
            };
            NewBlock::new(lc.kind, content)
        })
        .collect()
}
