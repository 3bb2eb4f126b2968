use std::fmt;

use serde::{Deserialize, Serialize};

use super::{MediaSource, RichText};

/// Stable block identifier, unique for the lifetime of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockId(pub u64);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "block_{}", self.0)
    }
}

/// Structural type of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockType {
    Heading1,
    Heading2,
    Heading3,
    Paragraph,
    Bullet,
    Numbered,
    Checkbox,
    Quote,
    Code,
    MediaEmbed,
}

impl BlockType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Heading1 => "heading1",
            BlockType::Heading2 => "heading2",
            BlockType::Heading3 => "heading3",
            BlockType::Paragraph => "paragraph",
            BlockType::Bullet => "bullet",
            BlockType::Numbered => "numbered",
            BlockType::Checkbox => "checkbox",
            BlockType::Quote => "quote",
            BlockType::Code => "code",
            BlockType::MediaEmbed => "media-embed",
        }
    }

    pub fn is_heading(&self) -> bool {
        matches!(
            self,
            BlockType::Heading1 | BlockType::Heading2 | BlockType::Heading3
        )
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A block that has not yet been given an id by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBlock {
    pub kind: BlockType,
    pub content: RichText,
    pub placeholder: Option<String>,
    pub checked: bool,
}

impl NewBlock {
    pub fn new(kind: BlockType, content: impl Into<RichText>) -> Self {
        Self {
            kind,
            content: content.into(),
            placeholder: None,
            checked: false,
        }
    }

    pub fn paragraph(content: impl Into<RichText>) -> Self {
        Self::new(BlockType::Paragraph, content)
    }

    pub fn checkbox(content: impl Into<RichText>, checked: bool) -> Self {
        Self {
            checked,
            ..Self::new(BlockType::Checkbox, content)
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }
}

/// One structural unit of a document.
///
/// `checked` is `Some` exactly when the block is a checkbox; the constructors
/// and [`Block::set_type`] keep it that way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    id: BlockId,
    #[serde(rename = "type")]
    kind: BlockType,
    content: RichText,
    #[serde(skip_serializing_if = "Option::is_none")]
    placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    checked: Option<bool>,
}

impl Block {
    pub fn from_new(id: BlockId, new: NewBlock) -> Self {
        let checked = (new.kind == BlockType::Checkbox).then_some(new.checked);
        Self {
            id,
            kind: new.kind,
            content: new.content,
            placeholder: new.placeholder,
            checked,
        }
    }

    pub fn id(&self) -> BlockId {
        self.id
    }

    pub fn kind(&self) -> BlockType {
        self.kind
    }

    pub fn content(&self) -> &RichText {
        &self.content
    }

    pub fn plain_text(&self) -> &str {
        self.content.plain_text()
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    /// The placeholder to show, which is only ever shown over empty content.
    pub fn visible_placeholder(&self) -> Option<&str> {
        if self.content.is_empty() {
            self.placeholder()
        } else {
            None
        }
    }

    pub fn checked(&self) -> Option<bool> {
        self.checked
    }

    /// Source reference for media-embed blocks.
    pub fn media_source(&self) -> Option<MediaSource> {
        (self.kind == BlockType::MediaEmbed && !self.content.is_empty())
            .then(|| MediaSource::new(self.content.text()))
    }

    pub(crate) fn set_content(&mut self, content: RichText) {
        self.content = content;
    }

    pub(crate) fn set_type(&mut self, kind: BlockType, content: RichText, checked: bool) {
        self.kind = kind;
        self.content = content;
        self.checked = (kind == BlockType::Checkbox).then_some(checked);
    }

    pub(crate) fn toggle_checked(&mut self) -> bool {
        match self.checked.as_mut() {
            Some(checked) => {
                *checked = !*checked;
                true
            }
            None => false,
        }
    }
}
