use std::sync::OnceLock;

use regex::Regex;

use crate::editing::{BlockStore, EditError, Patch};
use crate::models::{BlockId, BlockType, RichText, VideoHost};

/// Literal typing patterns that turn a block into another type.
///
/// A pattern only fires when it is the block's entire text.
pub struct TriggerPattern;

impl TriggerPattern {
    pub const HEADING1: &'static str = "# ";
    pub const HEADING2: &'static str = "## ";
    pub const HEADING3: &'static str = "### ";
    pub const CHECKBOX_OPEN: &'static str = "- [ ] ";
    pub const CHECKBOX_DONE: &'static str = "- [x] ";
    pub const BULLET: &'static str = "- ";
    pub const QUOTE: &'static str = "> ";
    pub const CODE: &'static str = "```";

    fn numbered() -> &'static Regex {
        static NUMBERED: OnceLock<Regex> = OnceLock::new();
        NUMBERED.get_or_init(|| Regex::new(r"^[0-9]+\. $").expect("Invalid numbered trigger regex"))
    }
}

/// A recognised typing pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    Heading1,
    Heading2,
    Heading3,
    Checkbox { checked: bool },
    Bullet,
    Numbered,
    Quote,
    Code,
    MediaEmbed { url: String },
}

impl Trigger {
    pub fn block_type(&self) -> BlockType {
        match self {
            Trigger::Heading1 => BlockType::Heading1,
            Trigger::Heading2 => BlockType::Heading2,
            Trigger::Heading3 => BlockType::Heading3,
            Trigger::Checkbox { .. } => BlockType::Checkbox,
            Trigger::Bullet => BlockType::Bullet,
            Trigger::Numbered => BlockType::Numbered,
            Trigger::Quote => BlockType::Quote,
            Trigger::Code => BlockType::Code,
            Trigger::MediaEmbed { .. } => BlockType::MediaEmbed,
        }
    }

    /// Content the block is left with: empty, except a media URL is kept.
    fn content(&self) -> RichText {
        match self {
            Trigger::MediaEmbed { url } => RichText::plain(url.clone()),
            _ => RichText::new(),
        }
    }

    fn checked(&self) -> bool {
        matches!(self, Trigger::Checkbox { checked: true })
    }
}

/// Classify a block's full plain text.
///
/// Patterns are tested in a fixed priority order; the checkbox patterns come
/// before the bullet pattern since both start with `"- "`.
pub fn detect(text: &str) -> Option<Trigger> {
    match text {
        TriggerPattern::HEADING1 => Some(Trigger::Heading1),
        TriggerPattern::HEADING2 => Some(Trigger::Heading2),
        TriggerPattern::HEADING3 => Some(Trigger::Heading3),
        TriggerPattern::CHECKBOX_OPEN => Some(Trigger::Checkbox { checked: false }),
        TriggerPattern::CHECKBOX_DONE => Some(Trigger::Checkbox { checked: true }),
        TriggerPattern::BULLET => Some(Trigger::Bullet),
        _ if TriggerPattern::numbered().is_match(text) => Some(Trigger::Numbered),
        TriggerPattern::QUOTE => Some(Trigger::Quote),
        TriggerPattern::CODE => Some(Trigger::Code),
        _ if VideoHost::matches(text) => Some(Trigger::MediaEmbed {
            url: text.to_string(),
        }),
        _ => None,
    }
}

/// Whether a keystroke was turned into a type change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    Handled(Patch),
    NotHandled,
}

/// Watches a block's live text and performs in-place type transitions.
///
/// Callers must not feed it text while a composition sequence is active.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownTriggerDetector;

impl MarkdownTriggerDetector {
    pub fn apply(
        &self,
        store: &mut BlockStore,
        block: BlockId,
        text: &str,
    ) -> Result<TriggerOutcome, EditError> {
        if text.is_empty() {
            return Ok(TriggerOutcome::NotHandled);
        }
        let Some(trigger) = detect(text) else {
            return Ok(TriggerOutcome::NotHandled);
        };
        log::debug!("trigger {trigger:?} on {block}");
        let patch = store.set_type(
            block,
            trigger.block_type(),
            trigger.content(),
            trigger.checked(),
        )?;
        Ok(TriggerOutcome::Handled(patch))
    }
}
