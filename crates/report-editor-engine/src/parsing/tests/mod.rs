//! Parser-level tests over whole report sections.

use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::models::{BlockType, InlineStyle, NewBlock, StyleSpan};
use crate::parsing::{parse_blocks, translate_inline_str};

fn outline(blocks: &[NewBlock]) -> String {
    blocks
        .iter()
        .map(|b| format!("{}: {}", b.kind, b.content.to_markup()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn report_section_outline() {
    let section = "\
## Key points

- The **first** point
- The ==second== point
1. Ordered
12. Still ordered
> A quote

https://youtu.be/abc123
Closing remarks";

    insta::assert_snapshot!(outline(&parse_blocks(section)), @r#"
    heading2: Key points
    bullet: The <strong>first</strong> point
    bullet: The <mark style="background-color: #ffeb3b; color: #000;">second</mark> point
    numbered: Ordered
    numbered: Still ordered
    quote: A quote
    media-embed: https://youtu.be/abc123
    paragraph: Closing remarks
    "#);
}

#[rstest]
#[case("Just a sentence.")]
#[case("With **bold** inside")]
#[case("#hashtag without space")]
#[case("-dash without space")]
#[case("1.no space")]
fn unmatched_lines_are_translated_paragraphs(#[case] line: &str) {
    let blocks = parse_blocks(line);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].kind, BlockType::Paragraph);
    assert_eq!(blocks[0].content, translate_inline_str(line.trim()));
}

#[test]
fn heading_levels_use_longest_prefix() {
    let kinds: Vec<BlockType> = parse_blocks("# a\n## b\n### c")
        .into_iter()
        .map(|b| b.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![BlockType::Heading1, BlockType::Heading2, BlockType::Heading3]
    );
}

#[test]
fn blank_lines_never_produce_blocks() {
    assert!(parse_blocks("").is_empty());
    assert!(parse_blocks("\n  \n\t\n").is_empty());
    assert_eq!(parse_blocks("a\n\n\nb").len(), 2);
}

#[test]
fn media_line_is_not_inline_translated() {
    let blocks = parse_blocks("  https://www.youtube.com/watch?v=x==y==  ");
    assert_eq!(blocks[0].kind, BlockType::MediaEmbed);
    assert_eq!(
        blocks[0].content.text(),
        "https://www.youtube.com/watch?v=x==y=="
    );
    assert!(blocks[0].content.spans().is_empty());
}

#[test]
fn bold_heading_body_is_styled() {
    let blocks = parse_blocks("### **Bold** title");
    assert_eq!(blocks[0].content.text(), "Bold title");
    assert_eq!(
        blocks[0].content.spans(),
        &[StyleSpan::new(InlineStyle::Bold, 0, 4)]
    );
}

#[test]
fn parsed_blocks_carry_no_placeholder() {
    let blocks = parse_blocks("- item");
    assert_eq!(blocks[0].placeholder, None);
    assert!(!blocks[0].checked);
}
