//! Analysis specification types.
//!
//! An [`AnalysisSpec`] describes which n-gram orders to count, how many
//! entries each top-K list keeps, which tag and entity columns to report, and
//! which authors get their own rollup. These types are the input to the
//! [`super::validation::ValidationEngine`]; a spec that passes validation
//! resolves into an [`AnalysisPlan`] the runner consumes.
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "v": 1,
//!   "ngram_orders": [1, 2, 3],
//!   "top_k": 5,
//!   "pos_tags": ["NNP", "PRP", "DT"],
//!   "entity_categories": ["PERSON", "GPE", "ORGANIZATION"],
//!   "focus_label": "GPE",
//!   "authors": ["George Washington", "Abraham Lincoln"],
//!   "parallel": false,
//!   "strict": false
//! }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::validation::ValidationEngine;
use crate::entity::EntityCategory;
use crate::errors::{Result, TagFreqError};

/// Top-level analysis specification (v1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSpec {
    /// Spec version (currently `1`).
    pub v: u32,

    /// N-gram orders to count. Signed so that bad values reach validation
    /// instead of failing deserialization.
    #[serde(default = "default_ngram_orders")]
    pub ngram_orders: Vec<i64>,

    /// Entries per top-K list.
    #[serde(default = "default_top_k")]
    pub top_k: i64,

    /// POS tags reported as per-document unigram rate columns.
    #[serde(default = "default_pos_tags")]
    pub pos_tags: Vec<String>,

    /// Entity labels reported as per-document rate columns.
    #[serde(default = "default_entity_categories")]
    pub entity_categories: Vec<String>,

    /// Entity label whose surface forms feed the most-common-entity query.
    #[serde(default = "default_focus_label")]
    pub focus_label: String,

    /// Authors that get an individual rollup. Empty means every author.
    #[serde(default)]
    pub authors: Vec<String>,

    /// Analyze documents on the rayon thread pool.
    #[serde(default)]
    pub parallel: bool,

    /// If `true`, unrecognized fields are errors; if `false`, warnings.
    #[serde(default)]
    pub strict: bool,

    /// Captures any fields not recognized by the schema.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

fn default_ngram_orders() -> Vec<i64> {
    vec![1, 2, 3]
}

fn default_top_k() -> i64 {
    5
}

fn default_pos_tags() -> Vec<String> {
    ["NNP", "PRP", "DT"].iter().map(|s| s.to_string()).collect()
}

fn default_entity_categories() -> Vec<String> {
    EntityCategory::ALL
        .iter()
        .map(|c| c.as_str().to_string())
        .collect()
}

fn default_focus_label() -> String {
    EntityCategory::Gpe.as_str().to_string()
}

impl Default for AnalysisSpec {
    fn default() -> Self {
        Self {
            v: 1,
            ngram_orders: default_ngram_orders(),
            top_k: default_top_k(),
            pos_tags: default_pos_tags(),
            entity_categories: default_entity_categories(),
            focus_label: default_focus_label(),
            authors: Vec::new(),
            parallel: false,
            strict: false,
            unknown_fields: HashMap::new(),
        }
    }
}

impl AnalysisSpec {
    /// Parse a spec from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a spec from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Validate with the default rule set and produce a typed plan.
    ///
    /// Warnings are logged and otherwise ignored; any error rejects the spec
    /// with every error message joined.
    pub fn resolve(&self) -> Result<AnalysisPlan> {
        let report = ValidationEngine::with_defaults().validate(self);

        #[cfg(feature = "tracing")]
        for warning in report.warnings() {
            tracing::warn!(%warning, "analysis spec warning");
        }

        if report.has_errors() {
            let messages: Vec<String> = report.errors().map(|e| e.to_string()).collect();
            return Err(TagFreqError::InvalidSpec(messages.join("; ")));
        }

        let mut ngram_orders: Vec<usize> = self
            .ngram_orders
            .iter()
            .map(|&n| to_usize("ngram_orders", n))
            .collect::<Result<_>>()?;
        ngram_orders.sort_unstable();
        ngram_orders.dedup();

        Ok(AnalysisPlan {
            ngram_orders,
            top_k: to_usize("top_k", self.top_k)?,
            pos_tags: dedup_keep_order(&self.pos_tags),
            entity_categories: dedup_keep_order(&self.entity_categories),
            focus_label: self.focus_label.clone(),
            authors: dedup_keep_order(&self.authors),
            parallel: self.parallel,
        })
    }
}

fn to_usize(name: &'static str, value: i64) -> Result<usize> {
    usize::try_from(value)
        .map_err(|_| TagFreqError::invalid(name, format!("must be non-negative, got {value}")))
}

fn dedup_keep_order(values: &[String]) -> Vec<String> {
    let mut seen = rustc_hash::FxHashSet::default();
    values
        .iter()
        .filter(|&v| seen.insert(v.as_str()))
        .cloned()
        .collect()
}

/// A validated spec with typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisPlan {
    /// Ascending, deduplicated, all ≥ 1
    pub ngram_orders: Vec<usize>,
    pub top_k: usize,
    pub pos_tags: Vec<String>,
    pub entity_categories: Vec<String>,
    pub focus_label: String,
    pub authors: Vec<String>,
    pub parallel: bool,
}

impl Default for AnalysisPlan {
    fn default() -> Self {
        Self {
            ngram_orders: vec![1, 2, 3],
            top_k: 5,
            pos_tags: default_pos_tags(),
            entity_categories: default_entity_categories(),
            focus_label: default_focus_label(),
            authors: Vec::new(),
            parallel: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_spec() {
        let spec = AnalysisSpec::from_json_str(r#"{ "v": 1 }"#).unwrap();
        assert_eq!(spec.v, 1);
        assert_eq!(spec.ngram_orders, vec![1, 2, 3]);
        assert_eq!(spec.top_k, 5);
        assert_eq!(spec.focus_label, "GPE");
        assert_eq!(spec.entity_categories, vec!["PERSON", "GPE", "ORGANIZATION"]);
        assert!(!spec.strict);
    }

    #[test]
    fn test_unknown_fields_captured() {
        let spec = AnalysisSpec::from_json_str(r#"{ "v": 1, "bogus": 42 }"#).unwrap();
        assert!(spec.unknown_fields.contains_key("bogus"));
    }

    #[test]
    fn test_resolve_sorts_and_dedups_orders() {
        let spec = AnalysisSpec::from_json_str(
            r#"{ "v": 1, "ngram_orders": [3, 1, 3], "authors": ["A", "B", "A"] }"#,
        )
        .unwrap();
        let plan = spec.resolve().unwrap();
        assert_eq!(plan.ngram_orders, vec![1, 3]);
        assert_eq!(plan.authors, vec!["A", "B"]);
    }

    #[test]
    fn test_resolve_rejects_negative_top_k() {
        let spec = AnalysisSpec::from_json_str(r#"{ "v": 1, "top_k": -1 }"#).unwrap();
        let err = spec.resolve().unwrap_err();
        match err {
            TagFreqError::InvalidSpec(msg) => assert!(msg.contains("/top_k")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_resolve_rejects_zero_order() {
        let spec = AnalysisSpec::from_json_str(r#"{ "v": 1, "ngram_orders": [1, 0] }"#).unwrap();
        assert!(matches!(spec.resolve(), Err(TagFreqError::InvalidSpec(_))));
    }

    #[test]
    fn test_default_plan() {
        let plan = AnalysisPlan::default();
        assert_eq!(plan.ngram_orders, vec![1, 2, 3]);
        assert_eq!(plan.top_k, 5);
        assert_eq!(plan.pos_tags, vec!["NNP", "PRP", "DT"]);
    }

    #[test]
    fn test_from_file() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "v": 1, "top_k": 10 }}"#).unwrap();
        let spec = AnalysisSpec::from_file(file.path()).unwrap();
        assert_eq!(spec.top_k, 10);
    }

    #[test]
    fn test_serde_roundtrip() {
        let spec = AnalysisSpec::default();
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["ngram_orders"], serde_json::json!([1, 2, 3]));
        let back: AnalysisSpec = serde_json::from_value(json).unwrap();
        assert_eq!(back.top_k, spec.top_k);
    }
}
