use crate::models::{BlockId, BlockKind, BlockPayload, ContentBlock, Document};

/// Structural edits the editing surface can request.
///
/// Each command maps onto one of the pure functions below. Arguments that do
/// not refer to the current document (stale ids, indices from a racing drag)
/// are absorbed as no-ops rather than reported.
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    Append { kind: BlockKind },
    Update { id: BlockId, payload: BlockPayload },
    Remove { id: BlockId },
    Move { from: isize, to: isize },
}

impl Document {
    /// Apply a command, producing the next document
    pub fn apply(&self, cmd: Cmd) -> Document {
        match cmd {
            Cmd::Append { kind } => append(self, kind),
            Cmd::Update { id, payload } => update(self, &id, payload),
            Cmd::Remove { id } => remove(self, &id),
            Cmd::Move { from, to } => move_block(self, from, to),
        }
    }
}

/// Add a block of `kind` with its default payload at the end
pub fn append(doc: &Document, kind: BlockKind) -> Document {
    let mut blocks = doc.blocks().to_vec();
    blocks.push(ContentBlock::new(BlockPayload::default_for(kind)));
    Document::from_blocks(blocks)
}

/// Replace the payload of the block with `id`.
///
/// A payload of a different kind than the target block is ignored, as is an
/// unknown id.
pub fn update(doc: &Document, id: &BlockId, payload: BlockPayload) -> Document {
    let Some(index) = doc.position(id) else {
        log::trace!("update ignored, no block {id}");
        return doc.clone();
    };
    let target = &doc.blocks()[index];
    if target.kind() != payload.kind() {
        log::warn!(
            "update ignored, block {id} is {:?} but payload is {:?}",
            target.kind(),
            payload.kind()
        );
        return doc.clone();
    }

    let mut blocks = doc.blocks().to_vec();
    blocks[index] = target.with_payload(payload);
    Document::from_blocks(blocks)
}

/// Drop the block with `id`
pub fn remove(doc: &Document, id: &BlockId) -> Document {
    let blocks: Vec<ContentBlock> = doc
        .iter()
        .filter(|b| b.id() != id)
        .cloned()
        .collect();
    Document::from_blocks(blocks)
}

/// Relocate the block at `from` so it ends up at index `to`.
///
/// Signed indices let callers pass `index - 1` straight from a "move up"
/// button; anything outside `0..len` leaves the document unchanged.
pub fn move_block(doc: &Document, from: isize, to: isize) -> Document {
    let len = doc.len();
    let (Some(from), Some(to)) = (in_range(from, len), in_range(to, len)) else {
        log::trace!("move {from} -> {to} ignored for {len} blocks");
        return doc.clone();
    };

    let mut blocks = doc.blocks().to_vec();
    let moved = blocks.remove(from);
    blocks.insert(to, moved);
    Document::from_blocks(blocks)
}

fn in_range(index: isize, len: usize) -> Option<usize> {
    usize::try_from(index).ok().filter(|&i| i < len)
}
