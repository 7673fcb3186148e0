//! Tagger boundary
//!
//! POS tagging and entity chunking are supplied from outside the crate. These
//! traits define the shape the rest of the pipeline consumes; the submodules
//! provide small reference implementations that need no statistical model.

pub mod gazetteer;
pub mod slash;

pub use gazetteer::GazetteerRecognizer;
pub use slash::SlashTagger;

use crate::types::{NeChunk, TaggedToken};

// ============================================================================
// Tagger: text to tagged tokens
// ============================================================================

/// Assigns a POS tag to every token of a text.
///
/// # Contract
///
/// - **Input**: raw document text.
/// - **Output**: tokens in document order.
/// - **Failure**: a text the tagger cannot handle yields an empty sequence,
///   never a panic. Downstream aggregation treats that as a document with no
///   data.
pub trait Tagger {
    fn tag(&self, text: &str) -> Vec<TaggedToken>;
}

impl<F> Tagger for F
where
    F: Fn(&str) -> Vec<TaggedToken>,
{
    fn tag(&self, text: &str) -> Vec<TaggedToken> {
        self(text)
    }
}

// ============================================================================
// EntityRecognizer: tagged tokens to entity chunks
// ============================================================================

/// Groups tagged tokens into named-entity spans.
///
/// # Contract
///
/// - **Input**: the tagger's output for one document.
/// - **Output**: every input token exactly once, in order, either inside an
///   [`NeChunk::Entity`] or as an [`NeChunk::Plain`].
/// - **Failure**: same policy as [`Tagger`]: empty output, no panic.
pub trait EntityRecognizer {
    fn chunk(&self, tagged: &[TaggedToken]) -> Vec<NeChunk>;
}

/// Recognizer that finds nothing. Every token comes back plain.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEntities;

impl EntityRecognizer for NoEntities {
    #[inline]
    fn chunk(&self, tagged: &[TaggedToken]) -> Vec<NeChunk> {
        tagged.iter().cloned().map(NeChunk::Plain).collect()
    }
}
