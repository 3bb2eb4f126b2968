//! Save payload construction.

use serde::{Deserialize, Serialize};

use crate::models::{Block, BlockType};

pub const SAVE_FORMAT: &str = "json";

/// Wire shape of a saved document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedDocument {
    pub format: String,
    pub sections: Vec<SavedSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSection {
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Emit each block's real type name instead of collapsing everything to
    /// `paragraph`.
    pub preserve_block_types: bool,
}

/// Flattens blocks into the save payload.
///
/// Title (heading1) and media-embed blocks are dropped and inline markup is
/// stripped. Unless [`SerializeOptions::preserve_block_types`] is set, every
/// remaining block is emitted as a paragraph, so list and heading structure
/// does not survive a save.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentSerializer {
    options: SerializeOptions,
}

impl DocumentSerializer {
    pub fn new(options: SerializeOptions) -> Self {
        Self { options }
    }

    pub fn serialize(&self, blocks: &[Block]) -> SavedDocument {
        let sections = blocks
            .iter()
            .filter(|b| !matches!(b.kind(), BlockType::Heading1 | BlockType::MediaEmbed))
            .map(|b| SavedSection {
                kind: self.section_type(b.kind()).to_string(),
                content: b.plain_text().to_string(),
            })
            .collect();
        SavedDocument {
            format: SAVE_FORMAT.to_string(),
            sections,
        }
    }

    fn section_type(&self, kind: BlockType) -> &'static str {
        if self.options.preserve_block_types {
            kind.as_str()
        } else {
            BlockType::Paragraph.as_str()
        }
    }
}
