use std::sync::OnceLock;

use regex::Regex;

use super::escape::escape;
use crate::models::{BlockPayload, ContentBlock, Document, HeadingLevel};

/// Separator placed between rendered blocks
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// Render a document to markup.
///
/// Total and deterministic: the same document always yields the same string
/// and an empty document yields an empty string.
pub fn serialize(doc: &Document) -> String {
    doc.iter()
        .map(render_block)
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR)
}

pub fn render_block(block: &ContentBlock) -> String {
    match block.payload() {
        BlockPayload::Heading { level, text } => render_heading(*level, text),
        BlockPayload::Paragraph { text } => format!("<p>{}</p>", render_inline(text)),
        BlockPayload::Code { code } => format!("<pre><code>{}</code></pre>", escape(code)),
        BlockPayload::List { items, ordered } => render_list(items, *ordered),
        BlockPayload::Image { url, alt } => {
            format!("<img src=\"{}\" alt=\"{}\" />", escape(url), escape(alt))
        }
    }
}

fn render_heading(level: HeadingLevel, text: &str) -> String {
    let level = level.digit();
    format!("<h{level}>{}</h{level}>", escape(text))
}

/// Paragraph body: escape, then `**x**` to `<strong>`, then newlines to `<br>`.
///
/// Bold spans pair each `**` with the next one on the same line.
fn render_inline(text: &str) -> String {
    static BOLD_REGEX: OnceLock<Regex> = OnceLock::new();
    let bold_regex =
        BOLD_REGEX.get_or_init(|| Regex::new(r"\*\*(.*?)\*\*").expect("Invalid bold regex"));

    let escaped = escape(text);
    let emphasised = bold_regex.replace_all(&escaped, "<strong>${1}</strong>");
    emphasised.replace('\n', "<br>")
}

fn render_list(items: &[String], ordered: bool) -> String {
    let tag = if ordered { "ol" } else { "ul" };
    let lines = items
        .iter()
        .filter(|item| !item.trim().is_empty())
        .map(|item| format!("  <li>{}</li>", escape(item)))
        .collect::<Vec<_>>()
        .join("\n");
    format!("<{tag}>\n{lines}\n</{tag}>")
}
