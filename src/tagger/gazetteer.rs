//! Gazetteer entity recognizer
//!
//! Greedy longest-match lookup of known entity names against token surfaces.
//! Useful as a deterministic stand-in for a statistical chunker and for
//! corpora whose entities of interest are known up front.

use rustc_hash::FxHashMap;

use super::EntityRecognizer;
use crate::types::{NeChunk, TaggedToken};

/// Recognizer backed by a table of known entity names.
#[derive(Debug, Clone)]
pub struct GazetteerRecognizer {
    /// Space-joined names and labels as inserted
    raw: Vec<(String, String)>,
    /// Lookup key (case-folded unless case-sensitive) -> label
    entries: FxHashMap<String, String>,
    /// Longest entry, in tokens
    max_tokens: usize,
    case_sensitive: bool,
}

impl Default for GazetteerRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl GazetteerRecognizer {
    /// Create an empty, case-sensitive gazetteer
    pub fn new() -> Self {
        Self {
            raw: Vec::new(),
            entries: FxHashMap::default(),
            max_tokens: 0,
            case_sensitive: true,
        }
    }

    /// Build from `(name, label)` pairs
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut gazetteer = Self::new();
        for (name, label) in entries {
            gazetteer.insert(name, label);
        }
        gazetteer
    }

    /// Set case sensitivity. Lookup keys are rebuilt from the names as
    /// inserted, so the setting can be toggled freely and also applies to
    /// entries inserted afterwards.
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        if self.case_sensitive != case_sensitive {
            self.case_sensitive = case_sensitive;
            self.entries.clear();
            for (name, label) in &self.raw {
                let key = self.key(name);
                self.entries.insert(key, label.clone());
            }
        }
        self
    }

    /// Register an entity name. Multi-word names are split on whitespace.
    pub fn insert(&mut self, name: &str, label: &str) {
        let words: Vec<&str> = name.split_whitespace().collect();
        if words.is_empty() {
            return;
        }
        self.max_tokens = self.max_tokens.max(words.len());
        let name = words.join(" ");
        self.entries.insert(self.key(&name), label.to_string());
        self.raw.push((name, label.to_string()));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn key(&self, surface: &str) -> String {
        if self.case_sensitive {
            surface.to_string()
        } else {
            surface.to_lowercase()
        }
    }

    /// Longest entry starting at `start`, as (length, label)
    fn longest_match(&self, tagged: &[TaggedToken], start: usize) -> Option<(usize, &str)> {
        let longest = self.max_tokens.min(tagged.len() - start);
        (1..=longest).rev().find_map(|len| {
            let surface = tagged[start..start + len]
                .iter()
                .map(|t| t.text.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            self.entries
                .get(&self.key(&surface))
                .map(|label| (len, label.as_str()))
        })
    }
}

impl EntityRecognizer for GazetteerRecognizer {
    fn chunk(&self, tagged: &[TaggedToken]) -> Vec<NeChunk> {
        let mut chunks = Vec::with_capacity(tagged.len());
        let mut i = 0;

        while i < tagged.len() {
            match self.longest_match(tagged, i) {
                Some((len, label)) => {
                    chunks.push(NeChunk::entity(tagged[i..i + len].to_vec(), label));
                    i += len;
                }
                None => {
                    chunks.push(NeChunk::Plain(tagged[i].clone()));
                    i += 1;
                }
            }
        }

        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ngram::extractor::extract_entities;
    use crate::types::Entity;

    fn tokens(words: &[&str]) -> Vec<TaggedToken> {
        words.iter().map(|w| TaggedToken::new(*w, "NNP")).collect()
    }

    fn gazetteer() -> GazetteerRecognizer {
        GazetteerRecognizer::from_entries([
            ("United States", "GPE"),
            ("United States Congress", "ORGANIZATION"),
            ("America", "GPE"),
            ("Lincoln", "PERSON"),
        ])
    }

    #[test]
    fn test_longest_match_wins() {
        let chunks = gazetteer().chunk(&tokens(&["the", "United", "States", "Congress", "met"]));
        let entities = extract_entities(&chunks);
        assert_eq!(entities, vec![Entity::new("United States Congress", "ORGANIZATION")]);
        assert_eq!(chunks.len(), 3);
    }

    #[test]
    fn test_every_token_covered_once() {
        let input = tokens(&["Lincoln", "loved", "America", "and", "the", "United", "States"]);
        let chunks = gazetteer().chunk(&input);
        let covered: usize = chunks.iter().map(|c| c.tokens().len()).sum();
        assert_eq!(covered, input.len());
        assert_eq!(extract_entities(&chunks).len(), 3);
    }

    #[test]
    fn test_case_insensitive() {
        let g = gazetteer().with_case_sensitive(false);
        let chunks = g.chunk(&tokens(&["AMERICA"]));
        assert_eq!(chunks[0].label(), Some("GPE"));
        assert!(gazetteer().chunk(&tokens(&["AMERICA"]))[0].label().is_none());
    }

    #[test]
    fn test_case_sensitivity_toggles_back() {
        let g = GazetteerRecognizer::from_entries([("America", "GPE")])
            .with_case_sensitive(false)
            .with_case_sensitive(true);
        assert_eq!(g.chunk(&tokens(&["America"]))[0].label(), Some("GPE"));
        assert!(g.chunk(&tokens(&["america"]))[0].label().is_none());
    }

    #[test]
    fn test_case_insensitive_applies_to_later_inserts() {
        let mut g = GazetteerRecognizer::new().with_case_sensitive(false);
        g.insert("Ohio", "GPE");
        assert_eq!(g.chunk(&tokens(&["OHIO"]))[0].label(), Some("GPE"));
    }

    #[test]
    fn test_empty_gazetteer_and_input() {
        let g = GazetteerRecognizer::new();
        assert!(g.is_empty());
        assert!(g.chunk(&[]).is_empty());
        assert_eq!(g.chunk(&tokens(&["x"])).len(), 1);
    }
}
