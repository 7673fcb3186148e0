//! Serializable analysis output
//!
//! A [`CorpusReport`] is everything a plotting or printing layer needs:
//! per-document rate columns, top-K lists for the whole corpus and for each
//! author, and the most common focus entities with a year series for the
//! leader. Nothing here computes; the runner fills these in.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entity::CategoryRates;
use crate::errors::Result;
use crate::query::RankValue;

/// One row per document: the tag and entity rate columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRow {
    pub year: i32,
    pub author: String,
    /// Tokens the tagger produced
    pub tokens: usize,
    /// Entity mentions the recognizer found
    pub entities: usize,
    /// Unigram rate of each reported POS tag
    pub pos_rates: BTreeMap<String, f64>,
    /// Share of entity mentions in each reported category
    pub entity_rates: CategoryRates,
}

/// A single top-K entry, keyed by the n-gram's display form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry<V> {
    pub ngram: String,
    pub value: V,
}

impl<V> RankedEntry<V> {
    pub fn new(ngram: impl Into<String>, value: V) -> Self {
        Self {
            ngram: ngram.into(),
            value,
        }
    }
}

/// Top-K list for one n-gram order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderTop<V> {
    pub order: usize,
    pub entries: Vec<RankedEntry<V>>,
}

impl<V: RankValue> OrderTop<V> {
    /// Build from `top_k` output
    pub fn from_ranked<K: ToString>(order: usize, ranked: Vec<(K, V)>) -> Self {
        Self {
            order,
            entries: ranked
                .into_iter()
                .map(|(key, value)| RankedEntry::new(key.to_string(), value))
                .collect(),
        }
    }
}

/// One author's rollup. Values are frequencies, each order normalized by its
/// own n-gram count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorProfile {
    pub author: String,
    pub documents: u64,
    pub top: Vec<OrderTop<f64>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityCount {
    pub surface: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearCount {
    pub year: i32,
    pub count: usize,
}

/// Mentions of one entity string per document, in corpus order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusSeries {
    pub surface: String,
    pub points: Vec<YearCount>,
}

/// Everything the analysis produces for one corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusReport {
    pub documents: u64,
    pub rows: Vec<DocumentRow>,
    /// Raw counts, summed over every document
    pub corpus_top: Vec<OrderTop<u64>>,
    pub authors: Vec<AuthorProfile>,
    pub focus_label: String,
    pub focus_entities: Vec<EntityCount>,
    /// `None` when no entity carries the focus label
    pub focus_series: Option<FocusSeries>,
}

impl CorpusReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Rollup for `author`, if it was part of the run
    pub fn author(&self, author: &str) -> Option<&AuthorProfile> {
        self.authors.iter().find(|p| p.author == author)
    }

    /// Corpus top-K list for order `n`
    pub fn corpus_top(&self, n: usize) -> Option<&OrderTop<u64>> {
        self.corpus_top.iter().find(|t| t.order == n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::count_categories;
    use crate::types::Entity;
    use pretty_assertions::assert_eq;

    fn sample() -> CorpusReport {
        CorpusReport {
            documents: 1,
            rows: vec![DocumentRow {
                year: 1790,
                author: "George Washington".into(),
                tokens: 4,
                entities: 1,
                pos_rates: BTreeMap::from([("DT".to_string(), 0.25)]),
                entity_rates: count_categories(&[Entity::new("France", "GPE")], &["GPE"]),
            }],
            corpus_top: vec![OrderTop::from_ranked(2, vec![("DT NN", 3u64)])],
            authors: vec![AuthorProfile {
                author: "George Washington".into(),
                documents: 1,
                top: vec![OrderTop::from_ranked(1, vec![("NN", 0.5f64)])],
            }],
            focus_label: "GPE".into(),
            focus_entities: vec![EntityCount {
                surface: "France".into(),
                count: 1,
            }],
            focus_series: Some(FocusSeries {
                surface: "France".into(),
                points: vec![YearCount {
                    year: 1790,
                    count: 1,
                }],
            }),
        }
    }

    #[test]
    fn test_json_shape() {
        let json: serde_json::Value = serde_json::from_str(&sample().to_json().unwrap()).unwrap();
        assert_eq!(json["corpus_top"][0]["order"], 2);
        assert_eq!(json["corpus_top"][0]["entries"][0]["ngram"], "DT NN");
        assert_eq!(json["corpus_top"][0]["entries"][0]["value"], 3);
        assert_eq!(json["rows"][0]["entity_rates"]["GPE"], 1.0);
        assert_eq!(json["focus_series"]["points"][0]["year"], 1790);
    }

    #[test]
    fn test_pretty_json_parses_back() {
        let report = sample();
        let back: CorpusReport = serde_json::from_str(&report.to_json_pretty().unwrap()).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn test_lookups() {
        let report = sample();
        assert!(report.author("George Washington").is_some());
        assert!(report.author("John Adams").is_none());
        assert_eq!(report.corpus_top(2).unwrap().entries.len(), 1);
        assert!(report.corpus_top(3).is_none());
    }
}
