use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Inline style kinds that can be applied over a range of block text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InlineStyle {
    Bold,
    Italic,
    Underline,
    Highlight,
}

impl InlineStyle {
    /// Visual marker used when a highlight span is rendered as markup.
    pub const HIGHLIGHT_MARKER: &'static str = "background-color: #ffeb3b; color: #000;";

    fn open_tag(self) -> String {
        match self {
            InlineStyle::Bold => "<strong>".to_string(),
            InlineStyle::Italic => "<em>".to_string(),
            InlineStyle::Underline => "<u>".to_string(),
            InlineStyle::Highlight => format!("<mark style=\"{}\">", Self::HIGHLIGHT_MARKER),
        }
    }

    fn close_tag(self) -> &'static str {
        match self {
            InlineStyle::Bold => "</strong>",
            InlineStyle::Italic => "</em>",
            InlineStyle::Underline => "</u>",
            InlineStyle::Highlight => "</mark>",
        }
    }

    /// Map an HTML tag name onto a style. Unknown tags have no style.
    fn from_tag_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "strong" | "b" => Some(InlineStyle::Bold),
            "em" | "i" => Some(InlineStyle::Italic),
            "u" => Some(InlineStyle::Underline),
            "mark" => Some(InlineStyle::Highlight),
            _ => None,
        }
    }
}

/// A style annotation over `[start, end)` byte offsets of a [`RichText`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleSpan {
    pub kind: InlineStyle,
    pub start: usize,
    pub end: usize,
}

impl StyleSpan {
    pub fn new(kind: InlineStyle, start: usize, end: usize) -> Self {
        Self { kind, start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether this span covers the whole of `[start, end)`.
    pub fn contains_range(&self, start: usize, end: usize) -> bool {
        self.start <= start && end <= self.end
    }

    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        self.start < end && start < self.end
    }
}

/// Block content: plain text plus an ordered list of style spans.
///
/// Spans of the same kind never overlap or touch; they are merged on every
/// mutation. Spans of different kinds may overlap freely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichText {
    text: String,
    spans: Vec<StyleSpan>,
}

impl RichText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unstyled text.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            spans: Vec::new(),
        }
    }

    /// Build from text and spans. Spans that fall outside the text or split a
    /// UTF-8 character are dropped.
    pub fn from_parts(text: impl Into<String>, spans: Vec<StyleSpan>) -> Self {
        let mut rich = Self {
            text: text.into(),
            spans,
        };
        rich.normalize();
        rich
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Plain text with all styling dropped.
    pub fn plain_text(&self) -> &str {
        &self.text
    }

    pub fn spans(&self) -> &[StyleSpan] {
        &self.spans
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Text covered by `[start, end)`, or `None` if the range is invalid.
    pub fn slice(&self, start: usize, end: usize) -> Option<&str> {
        if start > end {
            return None;
        }
        self.text.get(start..end)
    }

    pub fn spans_of(&self, kind: InlineStyle) -> impl Iterator<Item = &StyleSpan> {
        self.spans.iter().filter(move |s| s.kind == kind)
    }

    /// True when every byte of `[start, end)` carries `kind`.
    pub fn is_uniformly_styled(&self, kind: InlineStyle, start: usize, end: usize) -> bool {
        start < end && self.enclosing_span(kind, start, end).is_some()
    }

    /// The span of `kind` enclosing `[start, end)`, if any.
    ///
    /// Same-kind spans are merged, so there is at most one candidate.
    pub fn enclosing_span(&self, kind: InlineStyle, start: usize, end: usize) -> Option<StyleSpan> {
        self.spans_of(kind)
            .find(|s| s.contains_range(start, end))
            .copied()
    }

    /// Style `[start, end)` with `kind`, merging with neighbouring spans of
    /// the same kind.
    pub fn apply_style(&mut self, kind: InlineStyle, start: usize, end: usize) {
        if self.slice(start, end).is_none() || start == end {
            return;
        }
        self.spans.push(StyleSpan::new(kind, start, end));
        self.normalize();
    }

    /// Remove `kind` from `[start, end)`, splitting spans that extend past the
    /// range.
    pub fn remove_style(&mut self, kind: InlineStyle, start: usize, end: usize) {
        if self.slice(start, end).is_none() || start == end {
            return;
        }
        let mut kept = Vec::with_capacity(self.spans.len() + 1);
        for span in self.spans.drain(..) {
            if span.kind != kind || !span.overlaps(start, end) {
                kept.push(span);
                continue;
            }
            if span.start < start {
                kept.push(StyleSpan::new(kind, span.start, start));
            }
            if end < span.end {
                kept.push(StyleSpan::new(kind, end, span.end));
            }
        }
        self.spans = kept;
        self.normalize();
    }

    /// Insert unstyled text at `at`. Spans strictly containing the insertion
    /// point grow; spans after it shift.
    ///
    /// Returns `false` and leaves the text alone when `at` is not a character
    /// boundary inside the text or `text` is empty.
    pub fn insert_text(&mut self, at: usize, text: &str) -> bool {
        if !self.text.is_char_boundary(at) || text.is_empty() {
            return false;
        }
        self.text.insert_str(at, text);
        let n = text.len();
        for span in &mut self.spans {
            if at <= span.start {
                span.start += n;
                span.end += n;
            } else if at < span.end {
                span.end += n;
            }
        }
        true
    }

    fn normalize(&mut self) {
        let text = &self.text;
        self.spans.retain(|s| {
            !s.is_empty()
                && s.end <= text.len()
                && text.is_char_boundary(s.start)
                && text.is_char_boundary(s.end)
        });
        self.spans
            .sort_by(|a, b| (a.kind, a.start, a.end).cmp(&(b.kind, b.start, b.end)));

        let mut merged: Vec<StyleSpan> = Vec::with_capacity(self.spans.len());
        for span in self.spans.drain(..) {
            match merged.last_mut() {
                Some(last) if last.kind == span.kind && span.start <= last.end => {
                    last.end = last.end.max(span.end);
                }
                _ => merged.push(span),
            }
        }
        merged.sort_by_key(|s| (s.start, s.kind, s.end));
        self.spans = merged;
    }

    /// Render as HTML-ish markup with properly nested tags.
    pub fn to_markup(&self) -> String {
        let mut bounds: Vec<usize> = vec![0, self.text.len()];
        for s in &self.spans {
            bounds.push(s.start);
            bounds.push(s.end);
        }
        bounds.sort_unstable();
        bounds.dedup();

        let mut out = String::new();
        let mut open: Vec<InlineStyle> = Vec::new();
        for pair in bounds.windows(2) {
            let (seg_start, seg_end) = (pair[0], pair[1]);
            let mut active: Vec<InlineStyle> = self
                .spans
                .iter()
                .filter(|s| s.start <= seg_start && seg_end <= s.end)
                .map(|s| s.kind)
                .collect();
            active.sort();

            // Close down to the first open tag that is no longer active.
            let keep = open.iter().take_while(|k| active.contains(k)).count();
            while open.len() > keep {
                if let Some(kind) = open.pop() {
                    out.push_str(kind.close_tag());
                }
            }
            for kind in active {
                if !open.contains(&kind) {
                    out.push_str(&kind.open_tag());
                    open.push(kind);
                }
            }
            out.push_str(&html_escape::encode_text(&self.text[seg_start..seg_end]));
        }
        while let Some(kind) = open.pop() {
            out.push_str(kind.close_tag());
        }
        out
    }

    /// Parse HTML-ish markup. Recognised style tags become spans; every other
    /// tag is dropped and entities are decoded.
    pub fn from_markup(markup: &str) -> Self {
        static TAG: OnceLock<Regex> = OnceLock::new();
        static TAG_NAME: OnceLock<Regex> = OnceLock::new();
        let tag = TAG.get_or_init(|| Regex::new(r"<[^>]+>").expect("Invalid tag regex"));
        let tag_name = TAG_NAME.get_or_init(|| {
            Regex::new(r"^<\s*(/)?\s*([A-Za-z][A-Za-z0-9]*)").expect("Invalid tag name regex")
        });

        let mut text = String::new();
        let mut spans = Vec::new();
        let mut open: Vec<(InlineStyle, usize)> = Vec::new();
        let mut last = 0;

        for m in tag.find_iter(markup) {
            text.push_str(&html_escape::decode_html_entities(&markup[last..m.start()]));
            last = m.end();

            let Some(caps) = tag_name.captures(m.as_str()) else {
                continue;
            };
            let Some(kind) = caps.get(2).and_then(|n| InlineStyle::from_tag_name(n.as_str()))
            else {
                continue;
            };
            if caps.get(1).is_some() {
                if let Some(pos) = open.iter().rposition(|(k, _)| *k == kind) {
                    let (_, start) = open.remove(pos);
                    spans.push(StyleSpan::new(kind, start, text.len()));
                }
            } else {
                open.push((kind, text.len()));
            }
        }
        text.push_str(&html_escape::decode_html_entities(&markup[last..]));

        for (kind, start) in open {
            spans.push(StyleSpan::new(kind, start, text.len()));
        }
        Self::from_parts(text, spans)
    }
}

impl From<&str> for RichText {
    fn from(text: &str) -> Self {
        Self::plain(text)
    }
}

impl From<String> for RichText {
    fn from(text: String) -> Self {
        Self::plain(text)
    }
}

/// Tag-agnostic plain text extraction from markup.
pub fn strip_markup(markup: &str) -> String {
    RichText::from_markup(markup).text
}
