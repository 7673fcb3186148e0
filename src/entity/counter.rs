//! Per-category entity rates
//!
//! Rates are a document's entity mentions of one category divided by all of
//! its entity mentions. Every requested category gets a value, so downstream
//! reports see the same columns for every document.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::freq::table::CountTable;
use crate::types::Entity;

/// Entity labels the standard chunker emits for the categories reported on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityCategory {
    Person,
    Gpe,
    Organization,
}

impl EntityCategory {
    pub const ALL: [EntityCategory; 3] = [Self::Person, Self::Gpe, Self::Organization];

    /// The label as it appears in chunker output
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Person => "PERSON",
            Self::Gpe => "GPE",
            Self::Organization => "ORGANIZATION",
        }
    }
}

/// Category label -> normalized rate, with a fixed key set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryRates(BTreeMap<String, f64>);

impl CategoryRates {
    /// Rate for `label`, 0.0 when it was not requested
    pub fn get(&self, label: &str) -> f64 {
        self.0.get(label).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, &v)| (k.as_str(), v))
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.contains_key(label)
    }
}

/// Rate of each requested category among `entities`.
///
/// Categories with no mentions, and every category when `entities` is empty,
/// get 0.0.
pub fn count_categories<S: AsRef<str>>(entities: &[Entity], categories: &[S]) -> CategoryRates {
    let labels: CountTable<&str> = entities.iter().map(|e| e.label.as_str()).collect();
    let total = entities.len() as f64;

    CategoryRates(
        categories
            .iter()
            .map(|category| {
                let category = category.as_ref();
                let rate = if total > 0.0 {
                    labels.get(&category) as f64 / total
                } else {
                    0.0
                };
                (category.to_string(), rate)
            })
            .collect(),
    )
}

/// Every surface string tagged `label`, in order, duplicates kept.
pub fn select_surface_forms(entities: &[Entity], label: &str) -> Vec<String> {
    entities
        .iter()
        .filter(|e| e.label == label)
        .map(|e| e.surface.clone())
        .collect()
}

/// Non-overlapping occurrences of `needle` in `text`. An empty needle counts 0.
pub fn count_mentions(text: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    text.matches(needle).count()
}
