use crate::editing::Cmd;
use crate::markup;
use crate::models::{BlockId, BlockKind, BlockPayload, Document};

/// The one document owned by an editing session.
///
/// Stored markup is read once, on [`EditSession::load`]. After that every
/// edit swaps in a new `Document` built by the pure command functions, and
/// the markup is regenerated from the current document on demand for the
/// preview and at submit time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditSession {
    document: Document,
}

impl EditSession {
    /// Start from an empty document (create flow)
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the session from a stored post's markup (edit flow)
    pub fn load(markup: &str) -> Self {
        let document = markup::deserialize(markup);
        log::debug!("loaded {} blocks for editing", document.len());
        Self { document }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn apply(&mut self, cmd: Cmd) {
        log::trace!("applying {cmd:?}");
        self.document = self.document.apply(cmd);
    }

    /// Append a block and return its id
    pub fn append(&mut self, kind: BlockKind) -> BlockId {
        self.apply(Cmd::Append { kind });
        self.document.blocks()[self.document.len() - 1].id().clone()
    }

    pub fn update(&mut self, id: &BlockId, payload: BlockPayload) {
        self.apply(Cmd::Update {
            id: id.clone(),
            payload,
        });
    }

    pub fn remove(&mut self, id: &BlockId) {
        self.apply(Cmd::Remove { id: id.clone() });
    }

    pub fn move_block(&mut self, from: isize, to: isize) {
        self.apply(Cmd::Move { from, to });
    }

    /// Append a block and fill it in one step
    pub fn push(&mut self, payload: BlockPayload) -> BlockId {
        let id = self.append(payload.kind());
        self.update(&id, payload);
        id
    }

    /// Markup for the live preview and for saving
    pub fn preview(&self) -> String {
        markup::serialize(&self.document)
    }

    pub fn into_document(self) -> Document {
        self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_session_is_empty() {
        let session = EditSession::new();
        assert!(session.document().is_empty());
        assert_eq!(session.preview(), "");
    }

    #[test]
    fn load_seeds_document_from_markup() {
        let session = EditSession::load("<h2>Title</h2>\n\n<p>Body</p>");
        assert_eq!(
            session.document().kinds(),
            vec![BlockKind::Heading, BlockKind::Paragraph]
        );
        assert_eq!(session.preview(), "<h2>Title</h2>\n\n<p>Body</p>");
    }

    #[test]
    fn edits_flow_into_preview() {
        let mut session = EditSession::new();
        let heading = session.append(BlockKind::Heading);
        session.update(
            &heading,
            BlockPayload::Heading {
                level: crate::models::HeadingLevel::H2,
                text: "Traits".to_string(),
            },
        );
        session.push(BlockPayload::Paragraph {
            text: "Shared **behaviour**".to_string(),
        });

        assert_eq!(
            session.preview(),
            "<h2>Traits</h2>\n\n<p>Shared <strong>behaviour</strong></p>"
        );

        session.move_block(1, 0);
        assert_eq!(
            session.preview(),
            "<p>Shared <strong>behaviour</strong></p>\n\n<h2>Traits</h2>"
        );

        session.remove(&heading);
        assert_eq!(session.document().len(), 1);
    }
}
