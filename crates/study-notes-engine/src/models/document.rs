use std::fmt;

use serde::{Deserialize, Serialize};

use crate::editing::ids;

/// Identity of a block, stable for the lifetime of one editing session.
///
/// Ids are keys for list diffing in the editing surface. They are never
/// stored and never recomputed when a block's payload changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    /// Mint a fresh id from the process-local generator
    pub fn generate() -> Self {
        Self(ids::next_token())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The closed set of block kinds offered by the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockKind {
    Heading,
    Paragraph,
    Code,
    List,
    Image,
}

/// Heading depth. Post titles own `h1`, so blocks only use the two levels below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HeadingLevel {
    #[default]
    H2,
    H3,
}

impl HeadingLevel {
    pub fn digit(self) -> u8 {
        match self {
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }
}

/// Kind-specific content of a block.
///
/// The variant determines the block's kind, so replacing a payload can never
/// silently change what kind of block the editor is showing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockPayload {
    Heading { level: HeadingLevel, text: String },
    /// May contain newlines and `**bold**` spans
    Paragraph { text: String },
    /// Verbatim, no inline markup
    Code { code: String },
    /// Always holds at least one slot, possibly empty
    List { items: Vec<String>, ordered: bool },
    Image { url: String, alt: String },
}

impl BlockPayload {
    /// Payload a freshly appended block starts with
    pub fn default_for(kind: BlockKind) -> Self {
        match kind {
            BlockKind::Heading => BlockPayload::Heading {
                level: HeadingLevel::default(),
                text: String::new(),
            },
            BlockKind::Paragraph => BlockPayload::Paragraph {
                text: String::new(),
            },
            BlockKind::Code => BlockPayload::Code {
                code: String::new(),
            },
            BlockKind::List => BlockPayload::List {
                items: vec![String::new()],
                ordered: false,
            },
            BlockKind::Image => BlockPayload::Image {
                url: String::new(),
                alt: String::new(),
            },
        }
    }

    pub fn kind(&self) -> BlockKind {
        match self {
            BlockPayload::Heading { .. } => BlockKind::Heading,
            BlockPayload::Paragraph { .. } => BlockKind::Paragraph,
            BlockPayload::Code { .. } => BlockKind::Code,
            BlockPayload::List { .. } => BlockKind::List,
            BlockPayload::Image { .. } => BlockKind::Image,
        }
    }

    /// Replace the text of one list slot. Non-list payloads and
    /// out-of-range indices are returned unchanged.
    pub fn with_list_item(mut self, index: usize, text: impl Into<String>) -> Self {
        if let BlockPayload::List { items, .. } = &mut self
            && let Some(slot) = items.get_mut(index)
        {
            *slot = text.into();
        }
        self
    }

    /// Append an empty slot to a list
    pub fn with_new_list_item(mut self) -> Self {
        if let BlockPayload::List { items, .. } = &mut self {
            items.push(String::new());
        }
        self
    }

    /// Drop one list slot. The last remaining slot is never removed.
    pub fn without_list_item(mut self, index: usize) -> Self {
        if let BlockPayload::List { items, .. } = &mut self
            && items.len() > 1
            && index < items.len()
        {
            items.remove(index);
        }
        self
    }

    /// Switch a list between bullets and numbers
    pub fn with_ordered(mut self, ordered: bool) -> Self {
        if let BlockPayload::List { ordered: current, .. } = &mut self {
            *current = ordered;
        }
        self
    }
}

/// One unit of structured content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    id: BlockId,
    payload: BlockPayload,
}

impl ContentBlock {
    /// Create a block with a freshly generated id
    pub fn new(payload: BlockPayload) -> Self {
        Self {
            id: BlockId::generate(),
            payload,
        }
    }

    pub fn id(&self) -> &BlockId {
        &self.id
    }

    pub fn kind(&self) -> BlockKind {
        self.payload.kind()
    }

    pub fn payload(&self) -> &BlockPayload {
        &self.payload
    }

    /// Same identity, new content
    pub(crate) fn with_payload(&self, payload: BlockPayload) -> Self {
        Self {
            id: self.id.clone(),
            payload,
        }
    }
}

/// A post body: a flat, ordered list of blocks.
///
/// Documents are values. Every edit builds a new `Document` (see
/// [`crate::editing::commands`]) rather than mutating blocks in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    blocks: Vec<ContentBlock>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Callers must only pass blocks whose ids are unique
    pub(crate) fn from_blocks(blocks: Vec<ContentBlock>) -> Self {
        debug_assert!(
            {
                let mut seen = std::collections::HashSet::new();
                blocks.iter().all(|b| seen.insert(b.id()))
            },
            "duplicate block id in document"
        );
        Self { blocks }
    }

    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ContentBlock> {
        self.blocks.iter()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get(&self, id: &BlockId) -> Option<&ContentBlock> {
        self.blocks.iter().find(|b| b.id() == id)
    }

    pub fn position(&self, id: &BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| b.id() == id)
    }

    pub fn kinds(&self) -> Vec<BlockKind> {
        self.blocks.iter().map(ContentBlock::kind).collect()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a ContentBlock;
    type IntoIter = std::slice::Iter<'a, ContentBlock>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}
