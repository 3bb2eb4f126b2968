use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use uuid::Uuid;

use crate::editing::{FocusRequest, Patch};
use crate::models::{Block, BlockId, BlockType, NewBlock, RichText, VideoHost};

/// Placeholder of the default title heading.
pub const TITLE_PLACEHOLDER: &str = "Enter a title...";
/// Placeholder of default and newly inserted paragraphs.
pub const CONTENT_PLACEHOLDER: &str = "Enter content...";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("Block not found: {0}")]
    BlockNotFound(BlockId),
}

/// Identity of one document, regenerated by every "new document" action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DocumentId(pub Uuid);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DocumentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Owns the ordered block sequence of a document.
///
/// All mutation goes through this type. The sequence is never empty: the
/// last remaining block cannot be deleted, and wholesale replacement with an
/// empty sequence falls back to a single empty paragraph.
///
/// Ids come from a counter that is never reset while the store lives, so an
/// id is never handed out twice, not even across `replace_all` or
/// `new_document`.
#[derive(Debug)]
pub struct BlockStore {
    document_id: DocumentId,
    blocks: Vec<Block>,
    next_id: u64,
    version: u64,
}

impl Default for BlockStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockStore {
    /// A fresh document: one empty title heading and one empty paragraph.
    pub fn new() -> Self {
        Self::from_blocks(Self::default_blocks())
    }

    pub fn from_blocks(blocks: Vec<NewBlock>) -> Self {
        let mut store = Self {
            document_id: DocumentId::new(),
            blocks: Vec::new(),
            next_id: 1,
            version: 0,
        };
        store.blocks = store.assign_ids(blocks);
        store
    }

    fn default_blocks() -> Vec<NewBlock> {
        vec![
            NewBlock::new(BlockType::Heading1, "").with_placeholder(TITLE_PLACEHOLDER),
            NewBlock::paragraph("").with_placeholder(CONTENT_PLACEHOLDER),
        ]
    }

    fn fresh_id(&mut self) -> BlockId {
        let id = BlockId(self.next_id);
        self.next_id += 1;
        id
    }

    fn assign_ids(&mut self, blocks: Vec<NewBlock>) -> Vec<Block> {
        let blocks = if blocks.is_empty() {
            vec![NewBlock::paragraph("").with_placeholder(CONTENT_PLACEHOLDER)]
        } else {
            blocks
        };
        blocks
            .into_iter()
            .map(|b| {
                let id = self.fresh_id();
                Block::from_new(id, b)
            })
            .collect()
    }

    fn bump(&mut self) -> u64 {
        self.version += 1;
        self.version
    }

    fn index_of(&self, id: BlockId) -> Result<usize, EditError> {
        self.blocks
            .iter()
            .position(|b| b.id() == id)
            .ok_or(EditError::BlockNotFound(id))
    }

    fn block_mut(&mut self, id: BlockId) -> Result<&mut Block, EditError> {
        let idx = self.index_of(id)?;
        Ok(&mut self.blocks[idx])
    }

    pub fn document_id(&self) -> DocumentId {
        self.document_id
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn get(&self, id: BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id() == id)
    }

    pub fn position(&self, id: BlockId) -> Option<usize> {
        self.index_of(id).ok()
    }

    pub fn first_id(&self) -> BlockId {
        self.blocks[0].id()
    }

    /// Insert `block` directly after `after`, returning its freshly assigned id.
    pub fn insert_after(&mut self, after: BlockId, block: NewBlock) -> Result<BlockId, EditError> {
        let idx = self.index_of(after)?;
        let id = self.fresh_id();
        self.blocks.insert(idx + 1, Block::from_new(id, block));
        self.bump();
        log::debug!("inserted {id} after {after}");
        Ok(id)
    }

    /// Split-on-enter: insert an empty paragraph after `after` and focus it.
    pub fn insert_paragraph_after(&mut self, after: BlockId) -> Result<Patch, EditError> {
        let id = self.insert_after(
            after,
            NewBlock::paragraph("").with_placeholder(CONTENT_PLACEHOLDER),
        )?;
        Ok(Patch {
            changed: vec![id],
            focus: Some(FocusRequest::start(id)),
            version: self.version,
        })
    }

    /// Replace a block's content.
    ///
    /// A media-embed block only ever holds a video URL: other text leaves the
    /// block unchanged, and a URL is stored unstyled and trimmed.
    pub fn update_content(&mut self, id: BlockId, content: RichText) -> Result<Patch, EditError> {
        let kind = self.blocks[self.index_of(id)?].kind();
        let content = if kind == BlockType::MediaEmbed {
            let url = content.text().trim();
            if !VideoHost::matches(url) {
                log::warn!("ignoring non-URL content for media block {id}");
                return Ok(Patch::unchanged(self.version));
            }
            RichText::plain(url)
        } else {
            content
        };
        self.block_mut(id)?.set_content(content);
        Ok(Patch {
            changed: vec![id],
            focus: None,
            version: self.bump(),
        })
    }

    /// Change a block's type in place, replacing its content.
    ///
    /// `checked` only survives when the new type is a checkbox.
    pub fn set_type(
        &mut self,
        id: BlockId,
        kind: BlockType,
        content: RichText,
        checked: bool,
    ) -> Result<Patch, EditError> {
        self.block_mut(id)?.set_type(kind, content, checked);
        log::debug!("{id} is now {kind}");
        Ok(Patch {
            changed: vec![id],
            focus: Some(FocusRequest::end(id)),
            version: self.bump(),
        })
    }

    /// Remove a block and move focus to its predecessor, or to the new first
    /// block when the first block was removed.
    ///
    /// Deleting the only remaining block is a no-op.
    pub fn delete_block(&mut self, id: BlockId) -> Result<Patch, EditError> {
        let idx = self.index_of(id)?;
        if self.blocks.len() <= 1 {
            log::debug!("refusing to delete the last block {id}");
            return Ok(Patch::unchanged(self.version));
        }
        self.blocks.remove(idx);
        let target = self.blocks[idx.saturating_sub(1)].id();
        Ok(Patch {
            changed: vec![id],
            focus: Some(FocusRequest::end(target)),
            version: self.bump(),
        })
    }

    /// Flip the checked state of a checkbox. Other block types are untouched.
    pub fn toggle_checked(&mut self, id: BlockId) -> Result<Patch, EditError> {
        if !self.block_mut(id)?.toggle_checked() {
            return Ok(Patch::unchanged(self.version));
        }
        Ok(Patch {
            changed: vec![id],
            focus: None,
            version: self.bump(),
        })
    }

    /// Replace the whole sequence. Every block gets a fresh id.
    pub fn replace_all(&mut self, blocks: Vec<NewBlock>) -> Patch {
        self.blocks = self.assign_ids(blocks);
        let changed: Vec<BlockId> = self.blocks.iter().map(|b| b.id()).collect();
        let first = self.first_id();
        Patch {
            changed,
            focus: Some(FocusRequest::start(first)),
            version: self.bump(),
        }
    }

    /// Discard the current document and start a new default one.
    pub fn new_document(&mut self) -> Patch {
        self.document_id = DocumentId::new();
        self.replace_all(Self::default_blocks())
    }

    /// 1-based list number of a numbered block, counting every numbered
    /// block up to and including it.
    pub fn numbered_ordinal(&self, id: BlockId) -> Option<usize> {
        let idx = self.position(id)?;
        if self.blocks[idx].kind() != BlockType::Numbered {
            return None;
        }
        Some(
            self.blocks[..=idx]
                .iter()
                .filter(|b| b.kind() == BlockType::Numbered)
                .count(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InlineStyle, StyleSpan};
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn kinds(store: &BlockStore) -> Vec<BlockType> {
        store.blocks().iter().map(|b| b.kind()).collect()
    }

    #[test]
    fn new_store_has_title_and_paragraph() {
        let store = BlockStore::new();
        assert_eq!(kinds(&store), vec![BlockType::Heading1, BlockType::Paragraph]);
        assert_eq!(store.blocks()[0].visible_placeholder(), Some(TITLE_PLACEHOLDER));
        assert_eq!(store.blocks()[1].visible_placeholder(), Some(CONTENT_PLACEHOLDER));
    }

    #[test]
    fn insert_after_places_block_and_assigns_unique_id() {
        let mut store = BlockStore::new();
        let first = store.first_id();
        let id = store
            .insert_after(first, NewBlock::new(BlockType::Quote, "q"))
            .unwrap();

        assert_eq!(store.position(id), Some(1));
        assert_eq!(store.len(), 3);
        let ids: HashSet<BlockId> = store.blocks().iter().map(|b| b.id()).collect();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn ids_are_never_reused_after_replacement() {
        let mut store = BlockStore::new();
        let before: Vec<BlockId> = store.blocks().iter().map(|b| b.id()).collect();
        store.replace_all(vec![NewBlock::paragraph("a"), NewBlock::paragraph("b")]);
        for block in store.blocks() {
            assert!(!before.contains(&block.id()));
        }
    }

    #[test]
    fn unknown_block_is_an_error() {
        let mut store = BlockStore::new();
        let err = store.update_content(BlockId(999), RichText::plain("x"));
        assert_eq!(err, Err(EditError::BlockNotFound(BlockId(999))));
        assert_eq!(err.unwrap_err().to_string(), "Block not found: block_999");
    }

    #[test]
    fn document_id_parses_its_display_form() {
        let id = DocumentId::new();
        assert_eq!(id.to_string().parse::<DocumentId>().unwrap(), id);
        assert!("not-a-uuid".parse::<DocumentId>().is_err());
    }

    #[test]
    fn media_block_rejects_free_text() {
        let mut store = BlockStore::from_blocks(vec![NewBlock::new(
            BlockType::MediaEmbed,
            "https://youtu.be/abc",
        )]);
        let id = store.first_id();

        let patch = store
            .update_content(id, RichText::plain("hello world"))
            .unwrap();

        assert!(patch.is_noop());
        assert_eq!(store.version(), 0);
        let block = store.get(id).unwrap();
        assert_eq!(block.plain_text(), "https://youtu.be/abc");
        assert_eq!(block.media_source().unwrap().video_id(), Some("abc"));
    }

    #[test]
    fn media_block_stores_urls_plain_and_trimmed() {
        let mut store = BlockStore::from_blocks(vec![NewBlock::new(
            BlockType::MediaEmbed,
            "https://youtu.be/abc",
        )]);
        let id = store.first_id();
        let styled = RichText::from_parts(
            " https://youtu.be/xyz ",
            vec![StyleSpan::new(InlineStyle::Bold, 1, 21)],
        );

        let patch = store.update_content(id, styled).unwrap();

        assert!(!patch.is_noop());
        let block = store.get(id).unwrap();
        assert_eq!(block.content(), &RichText::plain("https://youtu.be/xyz"));
    }

    #[test]
    fn deleting_the_last_block_is_a_noop() {
        let mut store = BlockStore::from_blocks(vec![NewBlock::paragraph("only")]);
        let only = store.first_id();

        let patch = store.delete_block(only).unwrap();

        assert!(patch.is_noop());
        assert_eq!(store.len(), 1);
        assert_eq!(store.version(), 0);
    }

    #[test]
    fn delete_focuses_previous_block() {
        let mut store = BlockStore::from_blocks(vec![
            NewBlock::paragraph("a"),
            NewBlock::paragraph("b"),
            NewBlock::paragraph("c"),
        ]);
        let ids: Vec<BlockId> = store.blocks().iter().map(|b| b.id()).collect();

        let patch = store.delete_block(ids[2]).unwrap();
        assert_eq!(patch.focus, Some(FocusRequest::end(ids[1])));

        let patch = store.delete_block(ids[0]).unwrap();
        assert_eq!(patch.focus, Some(FocusRequest::end(ids[1])));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn set_type_clears_checked_for_non_checkboxes() {
        let mut store = BlockStore::new();
        let id = store.blocks()[1].id();

        store
            .set_type(id, BlockType::Checkbox, RichText::new(), true)
            .unwrap();
        assert_eq!(store.get(id).unwrap().checked(), Some(true));

        store
            .set_type(id, BlockType::Bullet, RichText::new(), true)
            .unwrap();
        assert_eq!(store.get(id).unwrap().checked(), None);
    }

    #[test]
    fn toggle_checked_only_affects_checkboxes() {
        let mut store = BlockStore::from_blocks(vec![
            NewBlock::checkbox("task", false),
            NewBlock::paragraph("text"),
        ]);
        let ids: Vec<BlockId> = store.blocks().iter().map(|b| b.id()).collect();

        assert!(!store.toggle_checked(ids[0]).unwrap().is_noop());
        assert_eq!(store.get(ids[0]).unwrap().checked(), Some(true));
        assert!(store.toggle_checked(ids[1]).unwrap().is_noop());
    }

    #[test]
    fn numbered_ordinal_counts_preceding_numbered_blocks() {
        let store = BlockStore::from_blocks(vec![
            NewBlock::new(BlockType::Numbered, "one"),
            NewBlock::paragraph("aside"),
            NewBlock::new(BlockType::Numbered, "two"),
        ]);
        let ids: Vec<BlockId> = store.blocks().iter().map(|b| b.id()).collect();

        assert_eq!(store.numbered_ordinal(ids[0]), Some(1));
        assert_eq!(store.numbered_ordinal(ids[1]), None);
        assert_eq!(store.numbered_ordinal(ids[2]), Some(2));
    }

    #[test]
    fn new_document_changes_identity_and_resets_blocks() {
        let mut store = BlockStore::from_blocks(vec![NewBlock::paragraph("old")]);
        let old_id = store.document_id();

        store.new_document();

        assert_ne!(store.document_id(), old_id);
        assert_eq!(kinds(&store), vec![BlockType::Heading1, BlockType::Paragraph]);
    }

    #[test]
    fn replace_all_with_nothing_keeps_one_block() {
        let mut store = BlockStore::new();
        store.replace_all(Vec::new());
        assert_eq!(store.len(), 1);
    }
}
