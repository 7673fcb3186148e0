//! Corpus- and author-level accumulation
//!
//! A [`CorpusAccumulator`] is a value owned by whoever drives the loop over
//! documents. It keeps one [`CountTable`] per n-gram order plus the number of
//! n-grams extracted for that order, so each order can later be normalized by
//! its own count. Accumulators combine with [`CorpusAccumulator::merge`],
//! which makes sequential folds and parallel reductions interchangeable.

use std::collections::BTreeMap;

use rayon::prelude::*;

use super::table::{normalize_table, CountTable, FrequencyTable};
use crate::errors::Result;
use crate::ngram::extractor::{extract_ngrams, NGram};
use crate::types::TaggedToken;

/// Per-order n-gram counts summed over a set of documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorpusAccumulator {
    /// order -> summed counts
    tables: BTreeMap<usize, CountTable<NGram>>,
    /// order -> number of n-grams extracted
    extracted: BTreeMap<usize, u64>,
    documents: u64,
}

impl CorpusAccumulator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one document's n-grams for each of `orders`
    pub fn from_document(tagged: &[TaggedToken], orders: &[usize]) -> Result<Self> {
        let mut acc = Self::new();
        acc.absorb_document(tagged, orders)?;
        Ok(acc)
    }

    /// Extract and count one document's n-grams into this accumulator
    pub fn absorb_document(&mut self, tagged: &[TaggedToken], orders: &[usize]) -> Result<()> {
        for &n in orders {
            let grams = extract_ngrams(tagged, n)?;
            self.absorb(n, &grams);
        }
        self.documents += 1;
        Ok(())
    }

    /// Add pre-extracted n-grams of order `n`
    ///
    /// Does not bump the document count; use [`Self::absorb_document`] or
    /// [`Self::record_document`] for that.
    pub fn absorb(&mut self, n: usize, grams: &[NGram]) {
        let table = self.tables.entry(n).or_default();
        for gram in grams {
            table.add(gram.clone());
        }
        *self.extracted.entry(n).or_insert(0) += grams.len() as u64;
    }

    /// Count a document that was absorbed order by order
    pub fn record_document(&mut self) {
        self.documents += 1;
    }

    /// Combine two accumulators. Associative and commutative.
    pub fn merge(mut self, other: Self) -> Self {
        for (n, table) in other.tables {
            match self.tables.get_mut(&n) {
                Some(existing) => existing.merge_from(&table),
                None => {
                    self.tables.insert(n, table);
                }
            }
        }
        for (n, count) in other.extracted {
            *self.extracted.entry(n).or_insert(0) += count;
        }
        self.documents += other.documents;
        self
    }

    /// Add `other` into this accumulator without consuming it
    pub fn merge_from(&mut self, other: &Self) {
        for (&n, table) in &other.tables {
            self.tables.entry(n).or_default().merge_from(table);
        }
        for (&n, &count) in &other.extracted {
            *self.extracted.entry(n).or_insert(0) += count;
        }
        self.documents += other.documents;
    }

    /// Raw counts for order `n`
    pub fn counts(&self, n: usize) -> Option<&CountTable<NGram>> {
        self.tables.get(&n)
    }

    /// Number of n-grams of order `n` extracted so far
    pub fn extracted(&self, n: usize) -> u64 {
        self.extracted.get(&n).copied().unwrap_or(0)
    }

    /// Order-`n` counts divided by the order-`n` n-gram count
    pub fn frequencies(&self, n: usize) -> FrequencyTable<NGram> {
        match self.tables.get(&n) {
            Some(table) => normalize_table(table, self.extracted(n)),
            None => FrequencyTable::default(),
        }
    }

    /// Orders seen so far, ascending
    pub fn orders(&self) -> impl Iterator<Item = usize> + '_ {
        self.tables.keys().copied()
    }

    pub fn documents(&self) -> u64 {
        self.documents
    }

    pub fn is_empty(&self) -> bool {
        self.documents == 0
    }
}

/// Explicit left fold over per-document accumulators.
pub fn fold_accumulators<'a, I>(parts: I) -> CorpusAccumulator
where
    I: IntoIterator<Item = &'a CorpusAccumulator>,
{
    parts
        .into_iter()
        .fold(CorpusAccumulator::new(), |mut acc, part| {
            acc.merge_from(part);
            acc
        })
}

/// Reduce per-document accumulators on the rayon pool.
///
/// Equivalent to [`fold_accumulators`]; merge order does not affect the
/// result.
pub fn reduce_parallel<'a, I>(parts: I) -> CorpusAccumulator
where
    I: IntoParallelIterator<Item = &'a CorpusAccumulator>,
{
    parts
        .into_par_iter()
        .fold(CorpusAccumulator::new, |mut acc, part| {
            acc.merge_from(part);
            acc
        })
        .reduce(CorpusAccumulator::new, CorpusAccumulator::merge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn doc(tags: &[&str]) -> Vec<TaggedToken> {
        tags.iter().map(|t| TaggedToken::new("w", *t)).collect()
    }

    fn corpus() -> Vec<Vec<TaggedToken>> {
        vec![
            doc(&["DT", "NN", "VBD", "IN", "DT", "NN"]),
            doc(&["PRP", "VBP", "DT", "NN"]),
            doc(&[]),
            doc(&["NNP"]),
        ]
    }

    fn parts(orders: &[usize]) -> Vec<CorpusAccumulator> {
        corpus()
            .iter()
            .map(|d| CorpusAccumulator::from_document(d, orders).unwrap())
            .collect()
    }

    #[test]
    fn test_extracted_totals_per_order() {
        let acc = fold_accumulators(&parts(&[1, 2, 3]));

        assert_eq!(acc.documents(), 4);
        assert_eq!(acc.extracted(1), 11);
        assert_eq!(acc.extracted(2), 5 + 3);
        assert_eq!(acc.extracted(3), 4 + 2);
        assert_eq!(acc.counts(1).unwrap().total(), acc.extracted(1));
    }

    #[test]
    fn test_frequencies_use_own_order_total() {
        let acc = fold_accumulators(&parts(&[1, 2]));

        let bigrams = acc.frequencies(2);
        assert!((bigrams.sum() - 1.0).abs() < 1e-12);
        // DT NN appears three times among eight bigrams
        assert!((bigrams.get(&NGram::tags(["DT", "NN"])) - 3.0 / 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_order_is_empty() {
        let acc = CorpusAccumulator::from_document(&doc(&["DT"]), &[1]).unwrap();
        assert!(acc.counts(2).is_none());
        assert!(acc.frequencies(2).is_empty());
        assert_eq!(acc.extracted(2), 0);
    }

    #[test]
    fn test_zero_order_propagates_error() {
        assert!(CorpusAccumulator::from_document(&doc(&["DT"]), &[0]).is_err());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let parts = parts(&[1, 2, 3]);
        let sequential = fold_accumulators(&parts);
        let parallel = reduce_parallel(&parts);
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_merge_order_independent() {
        let parts = parts(&[1, 2]);

        let forward = parts
            .iter()
            .cloned()
            .fold(CorpusAccumulator::new(), CorpusAccumulator::merge);
        let backward = parts
            .iter()
            .rev()
            .cloned()
            .fold(CorpusAccumulator::new(), CorpusAccumulator::merge);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_merge_from_matches_consuming_merge() {
        let parts = parts(&[1, 2]);
        let mut borrowed = parts[0].clone();
        borrowed.merge_from(&parts[1]);
        assert_eq!(borrowed, parts[0].clone().merge(parts[1].clone()));
    }

    #[test]
    fn test_absorb_then_record_document() {
        let mut acc = CorpusAccumulator::new();
        acc.absorb(1, &[NGram::unigram("NN"), NGram::unigram("NN")]);
        acc.record_document();
        assert_eq!(acc.documents(), 1);
        assert_eq!(acc.counts(1).unwrap().get(&NGram::unigram("NN")), 2);
    }
}
