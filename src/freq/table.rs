//! Count and frequency tables
//!
//! [`CountTable`] holds raw integer counts and is the unit of accumulation:
//! tables from separate documents combine with [`merge`], which is
//! associative and commutative. [`FrequencyTable`] holds normalized rates and
//! is only ever produced from a count table plus an explicit total, so raw and
//! normalized values never mix.

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ngram::extractor::NGram;

/// Anything usable as a table key.
///
/// `Display` supplies the representation used for deterministic tie-breaks;
/// `Ord` settles keys that display the same.
pub trait TableKey: Clone + Eq + Hash + Ord + fmt::Display {}

impl<T: Clone + Eq + Hash + Ord + fmt::Display> TableKey for T {}

// ============================================================================
// CountTable
// ============================================================================

/// Mapping from key to a positive occurrence count.
///
/// Keys with a zero count are never stored; [`CountTable::get`] reports them
/// as 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountTable<K: TableKey = NGram> {
    counts: FxHashMap<K, u64>,
}

impl<K: TableKey> Default for CountTable<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: TableKey> CountTable<K> {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            counts: FxHashMap::default(),
        }
    }

    /// Count every item of an iterator
    pub fn from_items<I: IntoIterator<Item = K>>(items: I) -> Self {
        let mut table = Self::new();
        for item in items {
            table.add(item);
        }
        table
    }

    /// Record one occurrence of `key`
    pub fn add(&mut self, key: K) {
        self.add_n(key, 1);
    }

    /// Record `n` occurrences of `key`
    pub fn add_n(&mut self, key: K, n: u64) {
        if n == 0 {
            return;
        }
        *self.counts.entry(key).or_insert(0) += n;
    }

    /// Count for `key`, 0 when absent
    pub fn get(&self, key: &K) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> {
        self.counts.iter().map(|(k, &v)| (k, v))
    }

    /// Add every count of `other` into this table
    pub fn merge_from(&mut self, other: &CountTable<K>) {
        self.counts.reserve(other.len());
        for (key, count) in other.iter() {
            *self.counts.entry(key.clone()).or_insert(0) += count;
        }
    }

    /// Consuming key-wise sum
    pub fn merged(mut self, other: &CountTable<K>) -> Self {
        self.merge_from(other);
        self
    }

    /// Divide every count by `total`. See [`normalize_table`].
    pub fn normalized(&self, total: u64) -> FrequencyTable<K> {
        normalize_table(self, total)
    }
}

impl<K: TableKey> FromIterator<K> for CountTable<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self::from_items(iter)
    }
}

// ============================================================================
// FrequencyTable
// ============================================================================

/// Mapping from key to a normalized rate in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyTable<K: TableKey = NGram> {
    rates: FxHashMap<K, f64>,
}

impl<K: TableKey> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self {
            rates: FxHashMap::default(),
        }
    }
}

impl<K: TableKey> FrequencyTable<K> {
    /// Rate for `key`, 0.0 when absent
    pub fn get(&self, key: &K) -> f64 {
        self.rates.get(key).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Sum of all rates (≈ 1.0 for a table normalized by its own count)
    pub fn sum(&self) -> f64 {
        self.rates.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, f64)> {
        self.rates.iter().map(|(k, &v)| (k, v))
    }
}

// ============================================================================
// Aggregation
// ============================================================================

/// Result of [`aggregate`]: raw counts or normalized frequencies.
#[derive(Debug, Clone, PartialEq)]
pub enum Aggregate<K: TableKey = NGram> {
    Counts(CountTable<K>),
    Frequencies(FrequencyTable<K>),
}

impl<K: TableKey> Aggregate<K> {
    pub fn as_counts(&self) -> Option<&CountTable<K>> {
        match self {
            Aggregate::Counts(table) => Some(table),
            Aggregate::Frequencies(_) => None,
        }
    }

    pub fn as_frequencies(&self) -> Option<&FrequencyTable<K>> {
        match self {
            Aggregate::Frequencies(table) => Some(table),
            Aggregate::Counts(_) => None,
        }
    }

    /// Value for `key` as a float, 0.0 when absent
    pub fn value(&self, key: &K) -> f64 {
        match self {
            Aggregate::Counts(table) => table.get(key) as f64,
            Aggregate::Frequencies(table) => table.get(key),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Aggregate::Counts(table) => table.len(),
            Aggregate::Frequencies(table) => table.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Count the n-grams of one document.
///
/// With `normalize`, every count is divided by `ngrams.len()`; an empty input
/// yields an empty table either way.
pub fn aggregate<K: TableKey>(ngrams: &[K], normalize: bool) -> Aggregate<K> {
    let counts: CountTable<K> = ngrams.iter().cloned().collect();
    if normalize {
        Aggregate::Frequencies(normalize_table(&counts, ngrams.len() as u64))
    } else {
        Aggregate::Counts(counts)
    }
}

/// Key-wise sum of two count tables.
pub fn merge<K: TableKey>(a: &CountTable<K>, b: &CountTable<K>) -> CountTable<K> {
    a.clone().merged(b)
}

/// Divide every count by a caller-supplied `total`.
///
/// A `total` of 0 yields an empty table instead of a division fault.
pub fn normalize_table<K: TableKey>(table: &CountTable<K>, total: u64) -> FrequencyTable<K> {
    if total == 0 {
        return FrequencyTable::default();
    }
    let denom = total as f64;
    FrequencyTable {
        rates: table
            .iter()
            .map(|(k, count)| (k.clone(), count as f64 / denom))
            .collect(),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::ngram::extractor::extract_ngrams;
    use crate::types::TaggedToken;
    use proptest::prelude::*;

    fn token_strategy() -> impl Strategy<Value = TaggedToken> {
        ("[a-z]{1,6}", prop::sample::select(vec!["DT", "NN", "NNP", "VBD", "IN", "PRP"]))
            .prop_map(|(word, tag)| TaggedToken::new(word, tag))
    }

    fn table_strategy() -> impl Strategy<Value = CountTable<String>> {
        prop::collection::vec("[A-D]{1,2}", 0..40).prop_map(CountTable::<String>::from_items)
    }

    proptest! {
        /// Property: merge is commutative
        #[test]
        fn merge_commutes(a in table_strategy(), b in table_strategy()) {
            prop_assert_eq!(merge(&a, &b), merge(&b, &a));
        }

        /// Property: merge is associative
        #[test]
        fn merge_associates(
            a in table_strategy(),
            b in table_strategy(),
            c in table_strategy(),
        ) {
            prop_assert_eq!(merge(&merge(&a, &b), &c), merge(&a, &merge(&b, &c)));
        }

        /// Property: counting conserves the number of items
        #[test]
        fn counts_conserve_items(items in prop::collection::vec("[a-c]", 0..60)) {
            let n = items.len() as u64;
            let table = CountTable::from_items(items);
            prop_assert_eq!(table.total(), n);
        }

        /// Property: a table normalized by its own total sums to 1
        #[test]
        fn own_total_normalization_sums_to_one(table in table_strategy()) {
            prop_assume!(!table.is_empty());
            let freqs = table.normalized(table.total());
            prop_assert!((freqs.sum() - 1.0).abs() < 1e-9);
        }

        /// Property: extracted n-grams are counted exactly once each, and
        /// normalizing by their number sums to 1
        #[test]
        fn extracted_ngrams_conserve_windows(
            seq in prop::collection::vec(token_strategy(), 1..60),
            n in 1usize..5,
        ) {
            let grams = extract_ngrams(&seq, n).unwrap();
            prop_assert_eq!(grams.len(), seq.len().saturating_sub(n - 1));

            let unigrams = extract_ngrams(&seq, 1).unwrap();
            let counts = aggregate(&unigrams, false);
            prop_assert_eq!(counts.as_counts().unwrap().total(), seq.len() as u64);

            let freqs = aggregate(&grams, true);
            if grams.is_empty() {
                prop_assert!(freqs.is_empty());
            } else {
                prop_assert!((freqs.as_frequencies().unwrap().sum() - 1.0).abs() < 1e-9);
            }
        }
    }
}
