//! N-gram extraction over tagged token sequences
//!
//! POS n-grams keep only the tags and ignore the surface tokens. Entity
//! n-grams are one (joined surface, label) pair per recognized span, with
//! tokens outside any entity dropped.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, TagFreqError};
use crate::types::{Entity, NeChunk, TaggedToken};

/// An n-gram key for count tables.
///
/// Equality, hashing and ordering are structural and order-sensitive:
/// `(DT, NN)` and `(NN, DT)` are different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NGram {
    /// Consecutive POS tags
    Tags(Vec<String>),
    /// A recognized entity span
    Entity { surface: String, label: String },
}

impl NGram {
    /// Single-tag n-gram, the key used by unigram tables
    pub fn unigram(tag: impl Into<String>) -> Self {
        NGram::Tags(vec![tag.into()])
    }

    /// Tag n-gram from any sequence of tags
    pub fn tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        NGram::Tags(tags.into_iter().map(Into::into).collect())
    }

    pub fn entity(surface: impl Into<String>, label: impl Into<String>) -> Self {
        NGram::Entity {
            surface: surface.into(),
            label: label.into(),
        }
    }

    /// Number of positions covered (1 for entity n-grams)
    pub fn order(&self) -> usize {
        match self {
            NGram::Tags(tags) => tags.len(),
            NGram::Entity { .. } => 1,
        }
    }
}

impl From<Entity> for NGram {
    fn from(entity: Entity) -> Self {
        NGram::Entity {
            surface: entity.surface,
            label: entity.label,
        }
    }
}

/// Tag n-grams print as space-joined tags (`DT NN`), entity n-grams as
/// `surface/LABEL`. Top-K tie-breaks compare this representation.
impl fmt::Display for NGram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NGram::Tags(tags) => f.write_str(&tags.join(" ")),
            NGram::Entity { surface, label } => write!(f, "{surface}/{label}"),
        }
    }
}

/// Extract tag n-grams of order `n` with a sliding window.
///
/// Returns an empty sequence when `tagged` is shorter than `n`. Fails only
/// when `n` is 0.
pub fn extract_ngrams(tagged: &[TaggedToken], n: usize) -> Result<Vec<NGram>> {
    if n == 0 {
        return Err(TagFreqError::invalid(
            "n",
            "n-gram order must be at least 1, got 0",
        ));
    }
    if tagged.len() < n {
        return Ok(Vec::new());
    }

    Ok(tagged
        .windows(n)
        .map(|window| NGram::Tags(window.iter().map(|t| t.tag.clone()).collect()))
        .collect())
}

/// Reduce chunked output to (joined surface, label) pairs in document order.
pub fn extract_entities(chunks: &[NeChunk]) -> Vec<Entity> {
    chunks
        .iter()
        .filter_map(|chunk| match chunk {
            NeChunk::Entity { tokens, label } => {
                let surface = tokens
                    .iter()
                    .map(|t| t.text.as_str())
                    .collect::<Vec<_>>()
                    .join(" ");
                Some(Entity::new(surface, label.as_str()))
            }
            NeChunk::Plain(_) => None,
        })
        .collect()
}

/// One entity n-gram per recognized span.
pub fn extract_entity_ngrams(chunks: &[NeChunk]) -> Vec<NGram> {
    extract_entities(chunks).into_iter().map(NGram::from).collect()
}
