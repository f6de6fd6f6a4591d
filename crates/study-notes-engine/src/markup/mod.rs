/*!
 * # Markup Codec
 *
 * Converts between a [`Document`](crate::models::Document) and the markup
 * string stored as a post's `content`.
 *
 * ## Vocabulary
 *
 * The serializer emits a closed set of tags: `h2`, `h3`, `p` (with inline
 * `strong` and `br`), `pre`/`code`, `ul`/`ol`/`li` and `img`. Only these are
 * expected to round-trip.
 *
 * ## Round-trip
 *
 * - **`serialize`** is total and deterministic.
 * - **`deserialize`** is best-effort: it never fails, skips markup it does not
 *   recognise, and falls back to a single paragraph when nothing matched.
 * - For documents made of headings, paragraphs, code and lists,
 *   `serialize(&deserialize(&serialize(&doc))) == serialize(&doc)`.
 * - Images are written but not read back (see [`deserialize`]).
 *
 * ## Module Structure
 *
 * - **`escape`**: the fixed four-entity escape/unescape and tag stripping
 * - **`serialize`**: block to markup rendering
 * - **`scan`**: lenient top-level element scanner
 * - **`deserialize`**: element to block reconstruction
 */

pub mod deserialize;
pub mod escape;
pub mod scan;
pub mod serialize;

pub use deserialize::deserialize;
pub use escape::{escape, unescape};
pub use serialize::{BLOCK_SEPARATOR, serialize};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::commands::{append, update};
    use crate::models::{BlockKind, BlockPayload, Document, HeadingLevel};
    use pretty_assertions::assert_eq;

    fn build(payloads: Vec<BlockPayload>) -> Document {
        payloads.into_iter().fold(Document::new(), |doc, payload| {
            let doc = append(&doc, payload.kind());
            let id = doc.blocks()[doc.len() - 1].id().clone();
            update(&doc, &id, payload)
        })
    }

    fn text_payloads(doc: &Document) -> Vec<BlockPayload> {
        doc.iter().map(|b| b.payload().clone()).collect()
    }

    fn notes() -> Vec<BlockPayload> {
        vec![
            BlockPayload::Heading {
                level: HeadingLevel::H2,
                text: "Borrowing & lifetimes".to_string(),
            },
            BlockPayload::Paragraph {
                text: "A reference is **never** null.\nIt must not outlive \"its\" owner."
                    .to_string(),
            },
            BlockPayload::Code {
                code: "fn longest<'a>(x: &'a str, y: &'a str) -> &'a str {\n    if x.len() > y.len() { x } else { y }\n}".to_string(),
            },
            BlockPayload::Heading {
                level: HeadingLevel::H3,
                text: "Rules".to_string(),
            },
            BlockPayload::List {
                items: vec![
                    "one mutable reference".to_string(),
                    "or many shared ones".to_string(),
                ],
                ordered: true,
            },
        ]
    }

    #[test]
    fn round_trip_preserves_kinds_order_and_text() {
        let original = build(notes());

        let restored = deserialize(&serialize(&original));

        assert_eq!(text_payloads(&restored), text_payloads(&original));
    }

    #[test]
    fn round_trip_assigns_new_ids() {
        let original = build(notes());
        let restored = deserialize(&serialize(&original));
        assert!(
            restored
                .iter()
                .all(|block| original.get(block.id()).is_none())
        );
    }

    #[test]
    fn reserialization_is_idempotent() {
        let markup = serialize(&build(notes()));
        assert_eq!(serialize(&deserialize(&markup)), markup);
    }

    #[test]
    fn blank_list_items_are_lost_in_round_trip() {
        let original = build(vec![BlockPayload::List {
            items: vec!["first".to_string(), "  ".to_string(), "second".to_string()],
            ordered: false,
        }]);

        let restored = deserialize(&serialize(&original));

        assert_eq!(
            text_payloads(&restored),
            vec![BlockPayload::List {
                items: vec!["first".to_string(), "second".to_string()],
                ordered: false
            }]
        );
    }

    #[test]
    fn image_blocks_do_not_round_trip() {
        let original = build(vec![
            BlockPayload::Paragraph {
                text: "caption".to_string(),
            },
            BlockPayload::Image {
                url: "https://example.com/diagram.png".to_string(),
                alt: "diagram".to_string(),
            },
        ]);

        let restored = deserialize(&serialize(&original));

        assert_eq!(restored.kinds(), vec![BlockKind::Paragraph]);
    }
}
