use crate::models::{Block, BlockId};

/// Immutable capture of a non-empty text selection inside one block.
///
/// Offsets are byte offsets into the block's plain text. A snapshot is taken
/// when the live selection changes and consumed by one formatting command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSnapshot {
    block_id: BlockId,
    start: usize,
    end: usize,
    text: String,
}

impl SelectionSnapshot {
    /// Capture `[start, end)` of `block`. The range may be given backwards.
    ///
    /// Returns `None` for collapsed or whitespace-only selections and for
    /// ranges that fall outside the text or inside a UTF-8 character.
    pub fn capture(block: &Block, start: usize, end: usize) -> Option<Self> {
        let (start, end) = (start.min(end), start.max(end));
        let text = block.content().slice(start, end)?;
        if text.trim().is_empty() {
            return None;
        }
        Some(Self {
            block_id: block.id(),
            start,
            end,
            text: text.to_string(),
        })
    }

    pub fn block_id(&self) -> BlockId {
        self.block_id
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}
