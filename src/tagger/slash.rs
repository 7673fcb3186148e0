//! Pre-tagged `word/TAG` text
//!
//! Reads text that was tagged ahead of time in the Brown/Penn slash format,
//! e.g. `The/DT cat/NN sat/VBD ./.`. The last `/` in a token separates the
//! word from its tag, so `1/2/CD` is the word `1/2` tagged `CD`.

use super::Tagger;
use crate::types::TaggedToken;

/// Tagger for whitespace-separated `word/TAG` tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlashTagger;

impl SlashTagger {
    pub fn new() -> Self {
        Self
    }

    fn parse_token(raw: &str) -> Option<TaggedToken> {
        let (word, tag) = raw.rsplit_once('/')?;
        if word.is_empty() || tag.is_empty() {
            return None;
        }
        Some(TaggedToken::new(word, tag))
    }
}

impl Tagger for SlashTagger {
    /// Any malformed token makes the whole text untaggable.
    fn tag(&self, text: &str) -> Vec<TaggedToken> {
        let parsed: Option<Vec<TaggedToken>> =
            text.split_whitespace().map(Self::parse_token).collect();

        match parsed {
            Some(tokens) => tokens,
            None => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    chars = text.len(),
                    "text is not in word/TAG form, treating as untagged"
                );
                Vec::new()
            }
        }
    }
}
