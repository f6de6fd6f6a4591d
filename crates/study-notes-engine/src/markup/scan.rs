//! Lenient scanner for the top-level elements of stored markup.
//!
//! This is not an HTML parser. It looks for an opening tag from a small
//! vocabulary and pairs it with the nearest closing tag of the same name,
//! skipping whatever lies between matches. Nested elements of the same name
//! and unclosed tags are not recovered; an unclosed tag is skipped and the
//! scan resumes just after its `<`.

use std::sync::OnceLock;

use regex::Regex;

/// Tags that start a top-level element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementTag {
    H2,
    H3,
    P,
    Pre,
    Ul,
    Ol,
    /// Self-contained, no closing tag expected
    Img,
}

impl ElementTag {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "h2" => ElementTag::H2,
            "h3" => ElementTag::H3,
            "p" => ElementTag::P,
            "pre" => ElementTag::Pre,
            "ul" => ElementTag::Ul,
            "ol" => ElementTag::Ol,
            "img" => ElementTag::Img,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            ElementTag::H2 => "h2",
            ElementTag::H3 => "h3",
            ElementTag::P => "p",
            ElementTag::Pre => "pre",
            ElementTag::Ul => "ul",
            ElementTag::Ol => "ol",
            ElementTag::Img => "img",
        }
    }
}

/// One matched element, borrowing from the scanned markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element<'a> {
    pub tag: ElementTag,
    /// Raw content between opening and closing tag; empty for `img`
    pub inner: &'a str,
    /// Byte range of the whole element in the scanned markup
    pub span: std::ops::Range<usize>,
}

fn opening_tag_regex() -> &'static Regex {
    static OPEN_REGEX: OnceLock<Regex> = OnceLock::new();
    // The name must end at whitespace, `/` or `>` so `<pre>` is never read as `<p>`
    OPEN_REGEX.get_or_init(|| {
        Regex::new(r"<(h2|h3|pre|p|ul|ol|img)((?:[\s/][^>]*)?)>").expect("Invalid open tag regex")
    })
}

/// Collect top-level elements in document order
pub fn scan(markup: &str) -> Vec<Element<'_>> {
    let open_regex = opening_tag_regex();
    let mut elements = Vec::new();
    let mut pos = 0;

    while let Some(caps) = open_regex.captures_at(markup, pos) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        let Some(tag) = ElementTag::from_name(name.as_str()) else {
            pos = whole.start() + 1;
            continue;
        };

        if tag == ElementTag::Img {
            elements.push(Element {
                tag,
                inner: "",
                span: whole.range(),
            });
            pos = whole.end();
            continue;
        }

        let closing = format!("</{}>", tag.name());
        match markup[whole.end()..].find(&closing) {
            Some(offset) => {
                let inner_end = whole.end() + offset;
                let end = inner_end + closing.len();
                elements.push(Element {
                    tag,
                        inner: &markup[whole.end()..inner_end],
                    span: whole.start()..end,
                });
                pos = end;
            }
            None => {
                log::debug!(
                    "unclosed <{}> at byte {}, skipping",
                    tag.name(),
                    whole.start()
                );
                pos = whole.start() + 1;
            }
        }
    }

    elements
}
