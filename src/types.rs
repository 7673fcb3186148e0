//! Core data types shared across the crate.

use serde::{Deserialize, Serialize};

/// A single token with the tag assigned by the external tagger.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaggedToken {
    /// Surface form as it appeared in the text
    pub text: String,
    /// POS tag (Penn Treebank style, e.g. `NN`, `DT`)
    pub tag: String,
}

impl TaggedToken {
    /// Create a new tagged token
    pub fn new(text: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tag: tag.into(),
        }
    }
}

/// One element of a chunked sentence: either a recognized entity span or an
/// ordinary token outside any entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NeChunk {
    /// A named-entity span covering one or more tokens.
    Entity {
        tokens: Vec<TaggedToken>,
        label: String,
    },
    /// A token that belongs to no entity.
    Plain(TaggedToken),
}

impl NeChunk {
    /// Build an entity chunk
    pub fn entity(tokens: Vec<TaggedToken>, label: impl Into<String>) -> Self {
        NeChunk::Entity {
            tokens,
            label: label.into(),
        }
    }

    /// Entity label, or `None` for plain tokens
    pub fn label(&self) -> Option<&str> {
        match self {
            NeChunk::Entity { label, .. } => Some(label),
            NeChunk::Plain(_) => None,
        }
    }

    /// All tokens covered by this chunk, in order
    pub fn tokens(&self) -> &[TaggedToken] {
        match self {
            NeChunk::Entity { tokens, .. } => tokens,
            NeChunk::Plain(token) => std::slice::from_ref(token),
        }
    }
}

/// A recognized entity reduced to its joined surface string and label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Entity {
    pub surface: String,
    pub label: String,
}

impl Entity {
    pub fn new(surface: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            surface: surface.into(),
            label: label.into(),
        }
    }
}

/// One speech in the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub year: i32,
    pub author: String,
    pub text: String,
}

impl DocumentRecord {
    pub fn new(year: i32, author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            year,
            author: author.into(),
            text: text.into(),
        }
    }
}
