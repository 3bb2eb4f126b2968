use crate::editing::{BlockStore, EditError, Patch, SelectionSnapshot};
use crate::models::{BlockType, InlineStyle, RichText};

/// What a formatting command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatOutcome {
    Applied(Patch),
    /// No selection was captured; nothing to format.
    NoSelection,
    /// The selected text no longer matches the block; the snapshot was dropped.
    Stale,
    /// The block holds a media source, which carries no inline styles.
    Unstyleable,
}

/// Applies and removes inline styles over a captured selection.
///
/// The formatter only ever rewrites a block's content, never its type.
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineFormatter;

impl InlineFormatter {
    pub fn apply(
        &self,
        store: &mut BlockStore,
        selection: Option<SelectionSnapshot>,
        style: InlineStyle,
    ) -> Result<FormatOutcome, EditError> {
        let Some(selection) = selection else {
            return Ok(FormatOutcome::NoSelection);
        };
        let Some(block) = store.get(selection.block_id()) else {
            log::warn!("selection refers to missing {}", selection.block_id());
            return Ok(FormatOutcome::Stale);
        };

        if block.kind() == BlockType::MediaEmbed {
            log::debug!("not styling media {}", selection.block_id());
            return Ok(FormatOutcome::Unstyleable);
        }

        let (start, end) = (selection.start(), selection.end());
        if block.content().slice(start, end) != Some(selection.text()) {
            log::warn!("stale selection on {}", selection.block_id());
            return Ok(FormatOutcome::Stale);
        }

        let mut content = block.content().clone();
        match style {
            InlineStyle::Highlight => toggle_highlight(&mut content, start, end),
            _ => toggle_uniform(&mut content, style, start, end),
        }
        let patch = store.update_content(selection.block_id(), content)?;
        Ok(FormatOutcome::Applied(patch))
    }
}

/// Unstyle a uniformly styled selection, otherwise style all of it.
fn toggle_uniform(content: &mut RichText, style: InlineStyle, start: usize, end: usize) {
    if content.is_uniformly_styled(style, start, end) {
        content.remove_style(style, start, end);
    } else {
        content.apply_style(style, start, end);
    }
}

/// Highlight toggle keyed on the nearest enclosing highlight span.
///
/// - enclosing span with exactly the selected text: the span is removed
/// - selection strictly inside a larger span: the span is split around it
/// - anything else: the selection is highlighted, absorbing any partially
///   overlapping highlight into one span
fn toggle_highlight(content: &mut RichText, start: usize, end: usize) {
    let selected = content.slice(start, end).map(str::to_owned);
    match content.enclosing_span(InlineStyle::Highlight, start, end) {
        Some(span) if content.slice(span.start, span.end).map(str::to_owned) == selected => {
            content.remove_style(InlineStyle::Highlight, span.start, span.end);
        }
        Some(_) => content.remove_style(InlineStyle::Highlight, start, end),
        None => content.apply_style(InlineStyle::Highlight, start, end),
    }
}
