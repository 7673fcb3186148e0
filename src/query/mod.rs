//! Top-K queries over count and frequency tables
//!
//! Entries come back sorted by value, highest first. Equal values are ordered
//! by the key's display string ascending, so the same table always yields the
//! same list regardless of hash iteration order.

use std::cmp::Ordering;

use crate::freq::table::{CountTable, FrequencyTable, TableKey};

/// A value that can be ranked. Floats use a total order.
pub trait RankValue: Copy {
    fn rank_cmp(&self, other: &Self) -> Ordering;
}

impl RankValue for u64 {
    fn rank_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl RankValue for f64 {
    fn rank_cmp(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

/// A table whose entries can be ranked.
pub trait Ranked {
    type Key: TableKey;
    type Value: RankValue;

    fn ranked_entries(&self) -> Vec<(&Self::Key, Self::Value)>;
}

impl<K: TableKey> Ranked for CountTable<K> {
    type Key = K;
    type Value = u64;

    fn ranked_entries(&self) -> Vec<(&K, u64)> {
        self.iter().collect()
    }
}

impl<K: TableKey> Ranked for FrequencyTable<K> {
    type Key = K;
    type Value = f64;

    fn ranked_entries(&self) -> Vec<(&K, f64)> {
        self.iter().collect()
    }
}

/// The `k` highest-valued entries, descending, with a deterministic tie-break.
///
/// Returns every entry when `k` exceeds the table size and nothing when `k`
/// is 0.
pub fn top_k<T: Ranked>(table: &T, k: usize) -> Vec<(T::Key, T::Value)> {
    if k == 0 {
        return Vec::new();
    }

    let mut entries: Vec<(String, &T::Key, T::Value)> = table
        .ranked_entries()
        .into_iter()
        .map(|(key, value)| (key.to_string(), key, value))
        .collect();

    entries.sort_by(|a, b| {
        b.2.rank_cmp(&a.2)
            .then_with(|| a.0.cmp(&b.0))
            .then_with(|| a.1.cmp(b.1))
    });
    entries.truncate(k);

    entries
        .into_iter()
        .map(|(_, key, value)| (key.clone(), value))
        .collect()
}
