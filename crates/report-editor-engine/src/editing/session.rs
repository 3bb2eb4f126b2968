use crate::editing::{
    BlockStore, EditError, FormatOutcome, InlineFormatter, MarkdownTriggerDetector, Patch,
    SelectionSnapshot, TriggerOutcome,
};
use crate::export::{DocumentSerializer, SavedDocument};
use crate::import::{AnalysisImporter, AnalysisReport};
use crate::models::{BlockId, InlineStyle, RichText};

/// A live selection reported by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRange {
    pub block: BlockId,
    pub start: usize,
    pub end: usize,
}

/// One user-input event from the editing surface.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// The block's full content after a keystroke.
    Input { block: BlockId, content: RichText },
    CompositionStart,
    CompositionEnd { block: BlockId, content: RichText },
    /// `None` means the selection collapsed.
    SelectionChanged(Option<SelectionRange>),
    PointerDown { inside_toolbar: bool },
    Enter { block: BlockId, shift: bool },
    Backspace { block: BlockId },
    Format(InlineStyle),
    ToggleCheckbox { block: BlockId },
    Blur { block: BlockId, content: RichText },
    /// Clipboard paste, already reduced to plain text.
    Paste { block: BlockId, at: usize, text: String },
}

/// What the session did with an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// Exactly one store mutation happened.
    Applied(Patch),
    /// Consumed without touching the store.
    Handled,
    /// Not consumed; the host should apply its native behaviour.
    Default,
}

impl From<Patch> for EventOutcome {
    fn from(patch: Patch) -> Self {
        if patch.is_noop() {
            EventOutcome::Handled
        } else {
            EventOutcome::Applied(patch)
        }
    }
}

/// Single-threaded editing surface state.
///
/// Every event produces at most one store mutation. While a composition
/// sequence is active no trigger detection and no selection capture happen;
/// the block is synchronised once when the composition ends.
#[derive(Debug, Default)]
pub struct EditorSession {
    store: BlockStore,
    detector: MarkdownTriggerDetector,
    formatter: InlineFormatter,
    composing: bool,
    selection: Option<SelectionSnapshot>,
    toolbar_visible: bool,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(store: BlockStore) -> Self {
        Self {
            store,
            ..Self::default()
        }
    }

    pub fn store(&self) -> &BlockStore {
        &self.store
    }

    pub fn is_composing(&self) -> bool {
        self.composing
    }

    pub fn selection(&self) -> Option<&SelectionSnapshot> {
        self.selection.as_ref()
    }

    pub fn toolbar_visible(&self) -> bool {
        self.toolbar_visible
    }

    pub fn handle(&mut self, event: EditorEvent) -> Result<EventOutcome, EditError> {
        match event {
            EditorEvent::Input { block, content } => {
                if self.composing {
                    return Ok(EventOutcome::Default);
                }
                self.detect_or_sync(block, content)
            }
            EditorEvent::CompositionStart => {
                self.composing = true;
                Ok(EventOutcome::Handled)
            }
            EditorEvent::CompositionEnd { block, content } => {
                self.composing = false;
                let patch = self.store.update_content(block, content)?;
                Ok(EventOutcome::Applied(patch))
            }
            EditorEvent::SelectionChanged(range) => {
                if !self.composing {
                    self.capture_selection(range);
                }
                Ok(EventOutcome::Handled)
            }
            EditorEvent::PointerDown { inside_toolbar } => {
                if !inside_toolbar {
                    self.toolbar_visible = false;
                }
                Ok(EventOutcome::Handled)
            }
            EditorEvent::Enter { block, shift } => {
                if shift {
                    return Ok(EventOutcome::Default);
                }
                Ok(self.store.insert_paragraph_after(block)?.into())
            }
            EditorEvent::Backspace { block } => {
                let is_empty = self
                    .store
                    .get(block)
                    .ok_or(EditError::BlockNotFound(block))?
                    .content()
                    .is_empty();
                if !is_empty {
                    return Ok(EventOutcome::Default);
                }
                Ok(self.store.delete_block(block)?.into())
            }
            EditorEvent::Format(style) => {
                self.toolbar_visible = false;
                let selection = self.selection.take();
                match self.formatter.apply(&mut self.store, selection, style)? {
                    FormatOutcome::Applied(patch) => Ok(EventOutcome::Applied(patch)),
                    FormatOutcome::NoSelection
                    | FormatOutcome::Stale
                    | FormatOutcome::Unstyleable => Ok(EventOutcome::Handled),
                }
            }
            EditorEvent::ToggleCheckbox { block } => Ok(self.store.toggle_checked(block)?.into()),
            EditorEvent::Blur { block, content } => {
                if self.composing {
                    return Ok(EventOutcome::Handled);
                }
                self.sync_content(block, content)
            }
            EditorEvent::Paste { block, at, text } => {
                if self.composing {
                    return Ok(EventOutcome::Default);
                }
                let mut content = self
                    .store
                    .get(block)
                    .ok_or(EditError::BlockNotFound(block))?
                    .content()
                    .clone();
                if !content.insert_text(at, &text) {
                    log::debug!("paste offset {at} is outside {block}");
                    return Ok(EventOutcome::Handled);
                }
                self.detect_or_sync(block, content)
            }
        }
    }

    /// A trigger on the new text wins over storing it literally.
    fn detect_or_sync(
        &mut self,
        block: BlockId,
        content: RichText,
    ) -> Result<EventOutcome, EditError> {
        match self.detector.apply(&mut self.store, block, content.text())? {
            TriggerOutcome::Handled(patch) => Ok(EventOutcome::Applied(patch)),
            TriggerOutcome::NotHandled => self.sync_content(block, content),
        }
    }

    fn sync_content(&mut self, block: BlockId, content: RichText) -> Result<EventOutcome, EditError> {
        let current = self
            .store
            .get(block)
            .ok_or(EditError::BlockNotFound(block))?;
        if current.content() == &content {
            return Ok(EventOutcome::Handled);
        }
        Ok(self.store.update_content(block, content)?.into())
    }

    fn capture_selection(&mut self, range: Option<SelectionRange>) {
        let snapshot = range.and_then(|r| {
            self.store
                .get(r.block)
                .and_then(|b| SelectionSnapshot::capture(b, r.start, r.end))
        });
        self.toolbar_visible = snapshot.is_some();
        self.selection = snapshot;
    }

    fn reset_transient_state(&mut self) {
        self.composing = false;
        self.selection = None;
        self.toolbar_visible = false;
    }

    /// Replace the document with blocks derived from an analysis report.
    pub fn import_report(&mut self, importer: &AnalysisImporter, report: &AnalysisReport) -> Patch {
        self.reset_transient_state();
        importer.import(report, &mut self.store)
    }

    /// Discard everything and start over with the default document.
    pub fn new_document(&mut self) -> Patch {
        self.reset_transient_state();
        self.store.new_document()
    }

    /// The payload a save action hands to persistence.
    pub fn save_payload(&self, serializer: &DocumentSerializer) -> SavedDocument {
        serializer.serialize(self.store.blocks())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BlockType, NewBlock};
    use pretty_assertions::assert_eq;

    fn session_with(text: &str) -> (EditorSession, BlockId) {
        let session =
            EditorSession::with_store(BlockStore::from_blocks(vec![NewBlock::paragraph(text)]));
        let id = session.store().first_id();
        (session, id)
    }

    #[test]
    fn trigger_supersedes_literal_text() {
        let (mut session, id) = session_with("");
        let outcome = session
            .handle(EditorEvent::Input {
                block: id,
                content: RichText::plain("> "),
            })
            .unwrap();

        assert!(matches!(outcome, EventOutcome::Applied(_)));
        let block = session.store().get(id).unwrap();
        assert_eq!(block.kind(), BlockType::Quote);
        assert_eq!(block.plain_text(), "");
        assert_eq!(session.store().version(), 1);
    }

    #[test]
    fn literal_text_is_applied_when_no_trigger_matches() {
        let (mut session, id) = session_with("");
        session
            .handle(EditorEvent::Input {
                block: id,
                content: RichText::plain("hello"),
            })
            .unwrap();

        assert_eq!(session.store().get(id).unwrap().plain_text(), "hello");
        assert_eq!(session.store().version(), 1);
    }

    #[test]
    fn composition_suppresses_triggers_and_syncs_once() {
        let (mut session, id) = session_with("");
        session.handle(EditorEvent::CompositionStart).unwrap();

        let outcome = session
            .handle(EditorEvent::Input {
                block: id,
                content: RichText::plain("# "),
            })
            .unwrap();
        assert_eq!(outcome, EventOutcome::Default);
        assert_eq!(session.store().version(), 0);

        session
            .handle(EditorEvent::CompositionEnd {
                block: id,
                content: RichText::plain("# 한"),
            })
            .unwrap();

        let block = session.store().get(id).unwrap();
        assert_eq!(block.kind(), BlockType::Paragraph);
        assert_eq!(block.plain_text(), "# 한");
        assert_eq!(session.store().version(), 1);
    }

    #[test]
    fn no_selection_capture_while_composing() {
        let (mut session, id) = session_with("hello");
        session.handle(EditorEvent::CompositionStart).unwrap();
        session
            .handle(EditorEvent::SelectionChanged(Some(SelectionRange {
                block: id,
                start: 0,
                end: 5,
            })))
            .unwrap();
        assert!(session.selection().is_none());
        assert!(!session.toolbar_visible());
    }

    #[test]
    fn format_consumes_selection_and_hides_toolbar() {
        let (mut session, id) = session_with("hello world");
        session
            .handle(EditorEvent::SelectionChanged(Some(SelectionRange {
                block: id,
                start: 0,
                end: 5,
            })))
            .unwrap();
        assert!(session.toolbar_visible());

        let outcome = session.handle(EditorEvent::Format(InlineStyle::Bold)).unwrap();
        assert!(matches!(outcome, EventOutcome::Applied(_)));
        assert!(!session.toolbar_visible());
        assert!(session.selection().is_none());

        let outcome = session.handle(EditorEvent::Format(InlineStyle::Bold)).unwrap();
        assert_eq!(outcome, EventOutcome::Handled);
    }

    #[test]
    fn outside_pointer_down_dismisses_toolbar() {
        let (mut session, id) = session_with("hello world");
        session
            .handle(EditorEvent::SelectionChanged(Some(SelectionRange {
                block: id,
                start: 0,
                end: 5,
            })))
            .unwrap();

        session
            .handle(EditorEvent::PointerDown {
                inside_toolbar: true,
            })
            .unwrap();
        assert!(session.toolbar_visible());

        session
            .handle(EditorEvent::PointerDown {
                inside_toolbar: false,
            })
            .unwrap();
        assert!(!session.toolbar_visible());
    }

    #[test]
    fn enter_inserts_paragraph_and_shift_enter_passes_through() {
        let (mut session, id) = session_with("first");
        let outcome = session
            .handle(EditorEvent::Enter {
                block: id,
                shift: false,
            })
            .unwrap();
        let EventOutcome::Applied(patch) = outcome else {
            panic!("expected insertion");
        };
        assert_eq!(session.store().len(), 2);
        assert_eq!(patch.focus.map(|f| f.block), Some(patch.changed[0]));

        let outcome = session
            .handle(EditorEvent::Enter {
                block: id,
                shift: true,
            })
            .unwrap();
        assert_eq!(outcome, EventOutcome::Default);
    }

    #[test]
    fn backspace_deletes_only_empty_blocks() {
        let mut session = EditorSession::with_store(BlockStore::from_blocks(vec![
            NewBlock::paragraph("keep"),
            NewBlock::paragraph(""),
        ]));
        let ids: Vec<BlockId> = session.store().blocks().iter().map(|b| b.id()).collect();

        let outcome = session.handle(EditorEvent::Backspace { block: ids[0] }).unwrap();
        assert_eq!(outcome, EventOutcome::Default);

        session.handle(EditorEvent::Backspace { block: ids[1] }).unwrap();
        assert_eq!(session.store().len(), 1);
    }

    #[test]
    fn backspace_on_sole_empty_block_keeps_it() {
        let (mut session, id) = session_with("");
        let outcome = session.handle(EditorEvent::Backspace { block: id }).unwrap();
        assert_eq!(outcome, EventOutcome::Handled);
        assert_eq!(session.store().len(), 1);
    }

    #[test]
    fn paste_inserts_plain_text_at_caret() {
        let (mut session, id) = session_with("ac");
        session
            .handle(EditorEvent::Paste {
                block: id,
                at: 1,
                text: "b".to_string(),
            })
            .unwrap();
        assert_eq!(session.store().get(id).unwrap().plain_text(), "abc");
    }

    #[test]
    fn blur_with_unchanged_content_does_not_mutate() {
        let (mut session, id) = session_with("same");
        let outcome = session
            .handle(EditorEvent::Blur {
                block: id,
                content: RichText::plain("same"),
            })
            .unwrap();
        assert_eq!(outcome, EventOutcome::Handled);
        assert_eq!(session.store().version(), 0);
    }

    #[test]
    fn pasting_a_video_url_embeds_it() {
        let (mut session, id) = session_with("");
        let outcome = session
            .handle(EditorEvent::Paste {
                block: id,
                at: 0,
                text: "https://youtu.be/abc".to_string(),
            })
            .unwrap();

        assert!(matches!(outcome, EventOutcome::Applied(_)));
        let block = session.store().get(id).unwrap();
        assert_eq!(block.kind(), BlockType::MediaEmbed);
        assert_eq!(block.plain_text(), "https://youtu.be/abc");
        assert_eq!(session.store().version(), 1);
    }

    #[test]
    fn pasting_a_checkbox_pattern_converts_the_block() {
        let (mut session, id) = session_with("");
        session
            .handle(EditorEvent::Paste {
                block: id,
                at: 0,
                text: "- [ ] ".to_string(),
            })
            .unwrap();

        let block = session.store().get(id).unwrap();
        assert_eq!(block.kind(), BlockType::Checkbox);
        assert_eq!(block.checked(), Some(false));
        assert!(block.content().is_empty());
    }

    #[test]
    fn paste_outside_the_text_changes_nothing() {
        let (mut session, id) = session_with("ab");
        let outcome = session
            .handle(EditorEvent::Paste {
                block: id,
                at: 99,
                text: "x".to_string(),
            })
            .unwrap();

        assert_eq!(outcome, EventOutcome::Handled);
        assert_eq!(session.store().version(), 0);
        assert_eq!(session.store().get(id).unwrap().plain_text(), "ab");
    }

    #[test]
    fn typing_free_text_into_a_media_block_is_ignored() {
        let mut session = EditorSession::with_store(BlockStore::from_blocks(vec![
            NewBlock::new(BlockType::MediaEmbed, "https://youtu.be/abc"),
        ]));
        let id = session.store().first_id();

        let outcome = session
            .handle(EditorEvent::Input {
                block: id,
                content: RichText::plain("hello world"),
            })
            .unwrap();

        assert_eq!(outcome, EventOutcome::Handled);
        let block = session.store().get(id).unwrap();
        assert_eq!(block.kind(), BlockType::MediaEmbed);
        assert_eq!(
            block.media_source().and_then(|s| s.embed_url()).as_deref(),
            Some("https://www.youtube.com/embed/abc")
        );
    }

    #[test]
    fn formatting_a_media_block_is_handled_without_mutation() {
        let mut session = EditorSession::with_store(BlockStore::from_blocks(vec![
            NewBlock::new(BlockType::MediaEmbed, "https://youtu.be/abc"),
        ]));
        let id = session.store().first_id();
        session
            .handle(EditorEvent::SelectionChanged(Some(SelectionRange {
                block: id,
                start: 0,
                end: 5,
            })))
            .unwrap();

        let outcome = session.handle(EditorEvent::Format(InlineStyle::Bold)).unwrap();

        assert_eq!(outcome, EventOutcome::Handled);
        assert_eq!(session.store().version(), 0);
    }
}
