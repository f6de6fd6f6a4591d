use study_notes_engine::{
    BlockKind, BlockPayload, Document, EditSession, HeadingLevel, deserialize, serialize,
};

fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(format!(
        "{}/tests/fixtures/{name}",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap()
}

fn payloads(doc: &Document) -> Vec<&BlockPayload> {
    doc.iter().map(|b| b.payload()).collect()
}

fn study_note() -> EditSession {
    let mut session = EditSession::new();
    session.push(BlockPayload::Heading {
        level: HeadingLevel::H2,
        text: "Iterators".to_string(),
    });
    session.push(BlockPayload::Paragraph {
        text: "Adapters are **lazy**.\nNothing runs until you consume them.".to_string(),
    });
    session.push(BlockPayload::Code {
        code: "let evens: Vec<u32> = (1..10).filter(|n| n % 2 == 0).collect();".to_string(),
    });
    let list = session.append(BlockKind::List);
    session.update(
        &list,
        BlockPayload::default_for(BlockKind::List)
            .with_list_item(0, "map")
            .with_new_list_item()
            .with_new_list_item()
            .with_list_item(2, "filter & fold"),
    );
    session.push(BlockPayload::Image {
        url: "/img/iterator.png".to_string(),
        alt: "Iterator \"pipeline\"".to_string(),
    });
    session
}

#[test]
fn study_note_markup() {
    insta::assert_snapshot!("study_note_markup", study_note().preview());
}

#[test]
fn legacy_post_blocks() {
    let doc = deserialize(&read_fixture("legacy_post.html"));
    insta::assert_debug_snapshot!("legacy_post_blocks", payloads(&doc));
}

#[test]
fn legacy_post_normalized() {
    let doc = deserialize(&read_fixture("legacy_post.html"));
    insta::assert_snapshot!("legacy_post_normalized", serialize(&doc));
}

#[test]
fn normalized_legacy_post_is_stable() {
    let once = serialize(&deserialize(&read_fixture("legacy_post.html")));
    let twice = serialize(&deserialize(&once));
    assert_eq!(once, twice);
}
