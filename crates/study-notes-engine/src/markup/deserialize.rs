use std::sync::OnceLock;

use regex::Regex;

use super::escape::{to_plain_text, unescape};
use super::scan::{Element, ElementTag, scan};
use crate::models::{BlockPayload, ContentBlock, Document, HeadingLevel};

/// Rebuild a document from stored markup.
///
/// Never fails. Recognised top-level elements become blocks in the order they
/// appear; everything else is skipped. Input that yields no blocks at all
/// becomes a single paragraph holding its plain text, so nothing a post
/// contained is silently dropped. Blank input gives an empty document.
///
/// `img` elements are consumed but do not come back as image blocks, so a
/// document with images does not survive a round-trip.
pub fn deserialize(markup: &str) -> Document {
    if markup.trim().is_empty() {
        return Document::new();
    }

    let blocks: Vec<ContentBlock> = scan(markup)
        .iter()
        .filter_map(element_to_payload)
        .map(ContentBlock::new)
        .collect();

    if blocks.is_empty() {
        log::debug!("no recognised elements, keeping markup as one paragraph");
        let text = to_plain_text(markup);
        return Document::from_blocks(vec![ContentBlock::new(BlockPayload::Paragraph { text })]);
    }

    Document::from_blocks(blocks)
}

fn element_to_payload(element: &Element<'_>) -> Option<BlockPayload> {
    let payload = match element.tag {
        ElementTag::H2 => heading(HeadingLevel::H2, element.inner),
        ElementTag::H3 => heading(HeadingLevel::H3, element.inner),
        ElementTag::P => BlockPayload::Paragraph {
            text: paragraph_text(element.inner),
        },
        ElementTag::Pre => BlockPayload::Code {
            code: code_text(element.inner),
        },
        ElementTag::Ul => list(element.inner, false),
        ElementTag::Ol => list(element.inner, true),
        ElementTag::Img => {
            log::debug!(
                "image element at {:?} is not restored as a block",
                element.span
            );
            return None;
        }
    };
    Some(payload)
}

fn heading(level: HeadingLevel, inner: &str) -> BlockPayload {
    BlockPayload::Heading {
        level,
        text: to_plain_text(inner),
    }
}

/// Undo the paragraph transforms: `<strong>` back to `**`, `<br>` back to
/// newlines, then drop any other tags and unescape.
fn paragraph_text(inner: &str) -> String {
    static STRONG_REGEX: OnceLock<Regex> = OnceLock::new();
    static BREAK_REGEX: OnceLock<Regex> = OnceLock::new();
    let strong_regex = STRONG_REGEX
        .get_or_init(|| Regex::new(r"<strong>(.*?)</strong>").expect("Invalid strong regex"));
    let break_regex =
        BREAK_REGEX.get_or_init(|| Regex::new(r"<br\s*/?>").expect("Invalid break regex"));

    let text = strong_regex.replace_all(inner, "**${1}**");
    let text = break_regex.replace_all(&text, "\n");
    to_plain_text(&text)
}

/// Only the `<code>` wrapper (with or without attributes) is removed;
/// everything else in the element is code, including unescaped angle brackets
fn code_text(inner: &str) -> String {
    static CODE_TAG_REGEX: OnceLock<Regex> = OnceLock::new();
    let code_tag_regex = CODE_TAG_REGEX
        .get_or_init(|| Regex::new(r"</?code(?:\s[^>]*)?>").expect("Invalid code tag regex"));

    unescape(&code_tag_regex.replace_all(inner, "")).into_owned()
}

fn list(inner: &str, ordered: bool) -> BlockPayload {
    static ITEM_REGEX: OnceLock<Regex> = OnceLock::new();
    let item_regex =
        ITEM_REGEX.get_or_init(|| Regex::new(r"(?s)<li>(.*?)</li>").expect("Invalid item regex"));

    let mut items: Vec<String> = item_regex
        .captures_iter(inner)
        .map(|caps| to_plain_text(&caps[1]))
        .collect();
    if items.is_empty() {
        items.push(String::new());
    }

    BlockPayload::List { items, ordered }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BlockKind;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn payloads(markup: &str) -> Vec<BlockPayload> {
        deserialize(markup)
            .iter()
            .map(|b| b.payload().clone())
            .collect()
    }

    fn paragraph(text: &str) -> BlockPayload {
        BlockPayload::Paragraph {
            text: text.to_string(),
        }
    }

    #[rstest]
    #[case("")]
    #[case("   \n\t ")]
    fn blank_input_gives_empty_document(#[case] markup: &str) {
        assert!(deserialize(markup).is_empty());
    }

    #[test]
    fn untagged_input_falls_back_to_one_paragraph() {
        assert_eq!(
            payloads("just some notes & thoughts"),
            vec![paragraph("just some notes & thoughts")]
        );
    }

    #[test]
    fn foreign_markup_falls_back_to_stripped_text() {
        assert_eq!(
            payloads("<div><span>Hello</span> &lt;world&gt;</div>"),
            vec![paragraph("Hello <world>")]
        );
    }

    #[test]
    fn image_only_markup_falls_back_to_paragraph() {
        // The image is matched but produces no block, so the fallback applies
        assert_eq!(
            payloads("<img src=\"a.png\" alt=\"a\" />"),
            vec![paragraph("")]
        );
    }

    #[test]
    fn images_are_not_restored() {
        let doc = deserialize("<p>before</p>\n\n<img src=\"a.png\" alt=\"a\" />\n\n<p>after</p>");
        assert_eq!(doc.kinds(), vec![BlockKind::Paragraph, BlockKind::Paragraph]);
    }

    #[rstest]
    #[case("<h2>Intro</h2>", HeadingLevel::H2, "Intro")]
    #[case("<h3>A &lt; B &amp; C</h3>", HeadingLevel::H3, "A < B & C")]
    #[case("<h2 id=\"x\"><em>Styled</em> title</h2>", HeadingLevel::H2, "Styled title")]
    fn headings(#[case] markup: &str, #[case] level: HeadingLevel, #[case] text: &str) {
        assert_eq!(
            payloads(markup),
            vec![BlockPayload::Heading {
                level,
                text: text.to_string()
            }]
        );
    }

    #[rstest]
    #[case("<p>a <strong>bold</strong> b</p>", "a **bold** b")]
    #[case("<p>one<br>two<br/>three<br />four</p>", "one\ntwo\nthree\nfour")]
    #[case("<p><em>emph</em> &quot;quoted&quot;</p>", "emph \"quoted\"")]
    #[case("<p>&lt;b&gt;&amp;&quot;test&quot;&lt;/b&gt;</p>", "<b>&\"test\"</b>")]
    fn paragraphs(#[case] markup: &str, #[case] text: &str) {
        assert_eq!(payloads(markup), vec![paragraph(text)]);
    }

    #[test]
    fn code_keeps_escaped_angle_brackets() {
        assert_eq!(
            payloads("<pre><code>if a &lt; b {\n    <b>x</b>\n}</code></pre>"),
            vec![BlockPayload::Code {
                code: "if a < b {\n    <b>x</b>\n}".to_string()
            }]
        );
    }

    #[test]
    fn code_wrapper_with_attributes_is_removed() {
        assert_eq!(
            payloads("<pre><code class=\"language-rust\">let x = 1;</code></pre>"),
            vec![BlockPayload::Code {
                code: "let x = 1;".to_string()
            }]
        );
    }

    #[test]
    fn lists() {
        assert_eq!(
            payloads("<ul>\n  <li>first</li>\n  <li><strong>second</strong> &amp; more</li>\n</ul>\n\n<ol><li>one</li></ol>"),
            vec![
                BlockPayload::List {
                    items: vec!["first".to_string(), "second & more".to_string()],
                    ordered: false
                },
                BlockPayload::List {
                    items: vec!["one".to_string()],
                    ordered: true
                },
            ]
        );
    }

    #[test]
    fn empty_list_keeps_one_slot() {
        assert_eq!(
            payloads("<ul>\n\n</ul>"),
            vec![BlockPayload::List {
                items: vec![String::new()],
                ordered: false
            }]
        );
    }

    #[test]
    fn text_between_elements_is_skipped() {
        let doc = deserialize("stray text<h2>Kept</h2>more stray<p>Also kept</p>");
        assert_eq!(doc.kinds(), vec![BlockKind::Heading, BlockKind::Paragraph]);
    }

    #[test]
    fn every_block_gets_a_distinct_id() {
        let doc = deserialize("<p>a</p><p>a</p><p>a</p>");
        let mut ids: Vec<_> = doc.iter().map(|b| b.id().clone()).collect();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }
}
