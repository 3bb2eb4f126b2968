use regex::Regex;

use crate::models::{InlineStyle, RichText, StyleSpan};

use super::kinds::InlineDelimiter;

/// Rewrites `**text**` into bold spans and `==text==` into highlight spans.
///
/// One pass per delimiter, no recursion: markup nested inside a rewritten
/// span is only translated if the later pass sees it. Translating the output
/// again is a no-op unless removing a pair exposed a new one: `*====*a**`
/// becomes the literal `**a**`, which a second translation would turn bold.
/// Callers translate each line exactly once.
pub fn translate_inline(content: &RichText) -> RichText {
    let bold = rewrite_delimited(content, InlineDelimiter::bold(), InlineStyle::Bold);
    rewrite_delimited(&bold, InlineDelimiter::highlight(), InlineStyle::Highlight)
}

/// Convenience: translate a raw line.
pub fn translate_inline_str(text: &str) -> RichText {
    translate_inline(&RichText::plain(text))
}

fn rewrite_delimited(content: &RichText, pattern: &Regex, kind: InlineStyle) -> RichText {
    let source = content.text();
    let mut text = String::with_capacity(source.len());
    let mut spans = Vec::new();
    // (offset in source, length) of every removed delimiter, ascending
    let mut removed: Vec<(usize, usize)> = Vec::new();
    let mut last = 0;

    for caps in pattern.captures_iter(source) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        text.push_str(&source[last..whole.start()]);
        let start = text.len();
        text.push_str(inner.as_str());
        spans.push(StyleSpan::new(kind, start, text.len()));
        removed.push((whole.start(), inner.start() - whole.start()));
        removed.push((inner.end(), whole.end() - inner.end()));
        last = whole.end();
    }

    if removed.is_empty() {
        return content.clone();
    }
    text.push_str(&source[last..]);

    for span in content.spans() {
        spans.push(StyleSpan::new(
            span.kind,
            remap(span.start, &removed),
            remap(span.end, &removed),
        ));
    }
    RichText::from_parts(text, spans)
}

/// Map a source offset past removed delimiters. Offsets inside a delimiter
/// collapse to where it was.
fn remap(offset: usize, removed: &[(usize, usize)]) -> usize {
    let mut shift = 0;
    for &(pos, len) in removed {
        if offset >= pos + len {
            shift += len;
        } else {
            if offset > pos {
                shift += offset - pos;
            }
            break;
        }
    }
    offset - shift
}
