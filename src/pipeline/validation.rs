//! Validation engine for analysis specifications.
//!
//! The engine runs all registered [`ValidationRule`]s against an
//! [`AnalysisSpec`](super::spec::AnalysisSpec) and collects every diagnostic
//! into a [`ValidationReport`]. It never stops at the first error, so users
//! see all problems at once.
//!
//! # Quick start
//!
//! ```rust
//! use tagfreq::pipeline::spec::AnalysisSpec;
//! use tagfreq::pipeline::validation::ValidationEngine;
//!
//! let spec = AnalysisSpec::from_json_str(r#"{ "v": 1, "top_k": -3 }"#).unwrap();
//! let report = ValidationEngine::with_defaults().validate(&spec);
//! assert!(report.has_errors());
//! for err in report.errors() {
//!     eprintln!("{err}");
//! }
//! ```

use std::collections::HashMap;

use rustc_hash::FxHashSet;
use serde::Serialize;

use super::error_code::ErrorCode;
use super::errors::SpecError;
use super::spec::AnalysisSpec;

// ─── Severity ───────────────────────────────────────────────────────────────

/// Whether a diagnostic is a hard error or a soft warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

// ─── Diagnostic ─────────────────────────────────────────────────────────────

/// A single validation finding: a [`SpecError`] plus its severity.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationDiagnostic {
    pub severity: Severity,
    #[serde(flatten)]
    pub error: SpecError,
}

impl ValidationDiagnostic {
    pub fn error(err: SpecError) -> Self {
        Self {
            severity: Severity::Error,
            error: err,
        }
    }

    pub fn warning(err: SpecError) -> Self {
        Self {
            severity: Severity::Warning,
            error: err,
        }
    }
}

// ─── Report ─────────────────────────────────────────────────────────────────

/// Collected diagnostics from running all validation rules.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    /// Iterate over error-severity diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &SpecError> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .map(|d| &d.error)
    }

    /// Iterate over warning-severity diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &SpecError> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .map(|d| &d.error)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Returns `true` if there are no errors (warnings are acceptable).
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

// ─── Rule trait ─────────────────────────────────────────────────────────────

/// A single validation rule that inspects an [`AnalysisSpec`] and returns
/// zero or more diagnostics.
///
/// Rules are stateless and `Send + Sync` so one engine can be shared.
pub trait ValidationRule: Send + Sync {
    /// Short, stable identifier for this rule (e.g., `"ngram_orders"`).
    fn name(&self) -> &str;

    fn validate(&self, spec: &AnalysisSpec) -> Vec<ValidationDiagnostic>;
}

// ─── Engine ─────────────────────────────────────────────────────────────────

/// Runs a set of [`ValidationRule`]s and collects all diagnostics.
pub struct ValidationEngine {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl ValidationEngine {
    /// Create an empty engine with no rules.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create an engine pre-loaded with the default rule set.
    pub fn with_defaults() -> Self {
        let mut engine = Self::new();
        engine.add_rule(Box::new(VersionRule));
        engine.add_rule(Box::new(NgramOrdersRule));
        engine.add_rule(Box::new(TopKRule));
        engine.add_rule(Box::new(ColumnsRule));
        engine.add_rule(Box::new(FocusLabelRule));
        engine.add_rule(Box::new(UnknownFieldsRule));
        engine
    }

    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    /// Names of the registered rules, in run order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Run all rules against `spec` and return the collected report.
    pub fn validate(&self, spec: &AnalysisSpec) -> ValidationReport {
        let mut report = ValidationReport::default();
        for rule in &self.rules {
            report.diagnostics.extend(rule.validate(spec));
        }
        report
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Concrete rules
// ═══════════════════════════════════════════════════════════════════════════

// ─── 1. Only spec version 1 is understood ───────────────────────────────────

struct VersionRule;

impl ValidationRule for VersionRule {
    fn name(&self) -> &str {
        "version"
    }

    fn validate(&self, spec: &AnalysisSpec) -> Vec<ValidationDiagnostic> {
        if spec.v == 1 {
            return vec![];
        }
        vec![ValidationDiagnostic::error(
            SpecError::new(
                ErrorCode::UnsupportedVersion,
                "/v",
                format!("spec version {} is not supported", spec.v),
            )
            .with_hint("Set \"v\": 1"),
        )]
    }
}

// ─── 2. N-gram orders must be positive ──────────────────────────────────────

struct NgramOrdersRule;

impl ValidationRule for NgramOrdersRule {
    fn name(&self) -> &str {
        "ngram_orders"
    }

    fn validate(&self, spec: &AnalysisSpec) -> Vec<ValidationDiagnostic> {
        let mut out = Vec::new();

        if spec.ngram_orders.is_empty() {
            out.push(ValidationDiagnostic::warning(
                SpecError::new(
                    ErrorCode::EmptySelection,
                    "/ngram_orders",
                    "no n-gram orders selected; only entity statistics will be reported",
                )
                .with_hint("Add orders such as [1, 2, 3]"),
            ));
        }

        let mut seen = FxHashSet::default();
        for (i, &n) in spec.ngram_orders.iter().enumerate() {
            if n < 1 {
                out.push(ValidationDiagnostic::error(
                    SpecError::new(
                        ErrorCode::InvalidParameter,
                        format!("/ngram_orders/{i}"),
                        format!("n-gram order must be at least 1, got {n}"),
                    )
                    .with_hint("Use 1 for unigrams, 2 for bigrams, 3 for trigrams"),
                ));
            } else if !seen.insert(n) {
                out.push(ValidationDiagnostic::warning(SpecError::new(
                    ErrorCode::DuplicateValue,
                    format!("/ngram_orders/{i}"),
                    format!("n-gram order {n} listed more than once"),
                )));
            }
        }

        out
    }
}

// ─── 3. top_k must be non-negative ──────────────────────────────────────────

struct TopKRule;

impl ValidationRule for TopKRule {
    fn name(&self) -> &str {
        "top_k"
    }

    fn validate(&self, spec: &AnalysisSpec) -> Vec<ValidationDiagnostic> {
        match spec.top_k {
            k if k < 0 => vec![ValidationDiagnostic::error(
                SpecError::new(
                    ErrorCode::InvalidParameter,
                    "/top_k",
                    format!("top_k must be >= 0, got {k}"),
                )
                .with_hint("Use 0 to disable top-K lists"),
            )],
            0 => vec![ValidationDiagnostic::warning(SpecError::new(
                ErrorCode::EmptySelection,
                "/top_k",
                "top_k is 0; every top-K list will be empty",
            ))],
            _ => vec![],
        }
    }
}

// ─── 4. Reported columns: warn on empty or duplicate ────────────────────────

struct ColumnsRule;

impl ColumnsRule {
    fn check(path: &str, values: &[String]) -> Vec<ValidationDiagnostic> {
        if values.is_empty() {
            return vec![ValidationDiagnostic::warning(SpecError::new(
                ErrorCode::EmptySelection,
                path,
                "no columns selected",
            ))];
        }

        let mut seen = FxHashSet::default();
        values
            .iter()
            .enumerate()
            .filter(|&(_, v)| !seen.insert(v.as_str()))
            .map(|(i, v)| {
                ValidationDiagnostic::warning(SpecError::new(
                    ErrorCode::DuplicateValue,
                    format!("{path}/{i}"),
                    format!("\"{v}\" listed more than once"),
                ))
            })
            .collect()
    }
}

impl ValidationRule for ColumnsRule {
    fn name(&self) -> &str {
        "columns"
    }

    fn validate(&self, spec: &AnalysisSpec) -> Vec<ValidationDiagnostic> {
        let mut out = Self::check("/pos_tags", &spec.pos_tags);
        out.extend(Self::check("/entity_categories", &spec.entity_categories));
        out
    }
}

// ─── 5. Focus label must name something ─────────────────────────────────────

struct FocusLabelRule;

impl ValidationRule for FocusLabelRule {
    fn name(&self) -> &str {
        "focus_label"
    }

    fn validate(&self, spec: &AnalysisSpec) -> Vec<ValidationDiagnostic> {
        if !spec.focus_label.trim().is_empty() {
            return vec![];
        }
        vec![ValidationDiagnostic::error(
            SpecError::new(
                ErrorCode::InvalidParameter,
                "/focus_label",
                "focus_label must not be empty",
            )
            .with_hint("Use an entity label such as \"GPE\""),
        )]
    }
}

// ─── 6. Unknown fields (strict → error, non-strict → warning) ──────────────

struct UnknownFieldsRule;

impl UnknownFieldsRule {
    fn check_unknowns(
        path: &str,
        unknowns: &HashMap<String, serde_json::Value>,
        strict: bool,
    ) -> Vec<ValidationDiagnostic> {
        let mut keys: Vec<&String> = unknowns.keys().collect();
        keys.sort();
        keys.into_iter()
            .map(|key| {
                let diag_fn = if strict {
                    ValidationDiagnostic::error
                } else {
                    ValidationDiagnostic::warning
                };
                diag_fn(
                    SpecError::new(
                        ErrorCode::UnknownField,
                        format!("{path}/{key}"),
                        format!("unrecognized field \"{key}\""),
                    )
                    .with_hint("Check spelling or remove this field"),
                )
            })
            .collect()
    }
}

impl ValidationRule for UnknownFieldsRule {
    fn name(&self) -> &str {
        "unknown_fields"
    }

    fn validate(&self, spec: &AnalysisSpec) -> Vec<ValidationDiagnostic> {
        Self::check_unknowns("", &spec.unknown_fields, spec.strict)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(json: &str) -> AnalysisSpec {
        serde_json::from_str(json).unwrap()
    }

    fn engine() -> ValidationEngine {
        ValidationEngine::with_defaults()
    }

    // ─── Valid specs ────────────────────────────────────────────────────

    #[test]
    fn test_minimal_spec_is_valid() {
        let report = engine().validate(&spec(r#"{ "v": 1 }"#));
        assert!(report.is_valid());
        assert!(report.is_empty());
    }

    #[test]
    fn test_full_spec_is_valid() {
        let report = engine().validate(&spec(
            r#"{
                "v": 1,
                "ngram_orders": [1, 2, 3],
                "top_k": 5,
                "pos_tags": ["NNP", "PRP", "DT"],
                "entity_categories": ["PERSON", "GPE", "ORGANIZATION"],
                "focus_label": "GPE",
                "authors": ["George Washington"],
                "parallel": true,
                "strict": true
            }"#,
        ));
        assert!(report.is_empty());
    }

    // ─── Rule: version ──────────────────────────────────────────────────

    #[test]
    fn test_unsupported_version_fails() {
        let report = engine().validate(&spec(r#"{ "v": 2 }"#));
        let errs: Vec<_> = report.errors().collect();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].code, ErrorCode::UnsupportedVersion);
        assert_eq!(errs[0].path, "/v");
    }

    // ─── Rule: ngram_orders ─────────────────────────────────────────────

    #[test]
    fn test_non_positive_orders_fail() {
        let report = engine().validate(&spec(r#"{ "v": 1, "ngram_orders": [0, 2, -1] }"#));
        let errs: Vec<_> = report.errors().collect();
        assert_eq!(errs.len(), 2);
        assert_eq!(errs[0].path, "/ngram_orders/0");
        assert_eq!(errs[1].path, "/ngram_orders/2");
        assert!(errs.iter().all(|e| e.code == ErrorCode::InvalidParameter));
    }

    #[test]
    fn test_duplicate_order_warns() {
        let report = engine().validate(&spec(r#"{ "v": 1, "ngram_orders": [2, 2] }"#));
        assert!(report.is_valid());
        let warns: Vec<_> = report.warnings().collect();
        assert_eq!(warns.len(), 1);
        assert_eq!(warns[0].code, ErrorCode::DuplicateValue);
    }

    #[test]
    fn test_empty_orders_warn() {
        let report = engine().validate(&spec(r#"{ "v": 1, "ngram_orders": [] }"#));
        assert!(report.is_valid());
        assert_eq!(report.warnings().next().unwrap().code, ErrorCode::EmptySelection);
    }

    // ─── Rule: top_k ────────────────────────────────────────────────────

    #[test]
    fn test_negative_top_k_fails() {
        let report = engine().validate(&spec(r#"{ "v": 1, "top_k": -5 }"#));
        let errs: Vec<_> = report.errors().collect();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].path, "/top_k");
    }

    #[test]
    fn test_zero_top_k_warns() {
        let report = engine().validate(&spec(r#"{ "v": 1, "top_k": 0 }"#));
        assert!(report.is_valid());
        assert_eq!(report.warnings().count(), 1);
    }

    // ─── Rule: columns ──────────────────────────────────────────────────

    #[test]
    fn test_duplicate_category_warns() {
        let report = engine().validate(&spec(
            r#"{ "v": 1, "entity_categories": ["GPE", "PERSON", "GPE"] }"#,
        ));
        let warns: Vec<_> = report.warnings().collect();
        assert_eq!(warns.len(), 1);
        assert_eq!(warns[0].path, "/entity_categories/2");
    }

    #[test]
    fn test_empty_pos_tags_warn() {
        let report = engine().validate(&spec(r#"{ "v": 1, "pos_tags": [] }"#));
        assert!(report.is_valid());
        assert_eq!(report.warnings().next().unwrap().path, "/pos_tags");
    }

    // ─── Rule: focus_label ──────────────────────────────────────────────

    #[test]
    fn test_blank_focus_label_fails() {
        let report = engine().validate(&spec(r#"{ "v": 1, "focus_label": "  " }"#));
        assert!(report.has_errors());
    }

    // ─── Rule: unknown_fields (strict mode) ─────────────────────────────

    #[test]
    fn test_unknown_fields_non_strict_are_warnings() {
        let report = engine().validate(&spec(r#"{ "v": 1, "strict": false, "bogus": 42 }"#));
        assert!(report.is_valid());
        let warns: Vec<_> = report.warnings().collect();
        assert_eq!(warns.len(), 1);
        assert_eq!(warns[0].code, ErrorCode::UnknownField);
        assert!(warns[0].path.contains("bogus"));
    }

    #[test]
    fn test_unknown_fields_strict_are_errors() {
        let report = engine().validate(&spec(r#"{ "v": 1, "strict": true, "bogus": 42 }"#));
        let errs: Vec<_> = report.errors().collect();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].code, ErrorCode::UnknownField);
    }

    // ─── Engine ─────────────────────────────────────────────────────────

    #[test]
    fn test_multiple_rules_fire_independently() {
        let report = engine().validate(&spec(
            r#"{
                "v": 3,
                "strict": true,
                "bogus": true,
                "top_k": -1,
                "ngram_orders": [0]
            }"#,
        ));
        assert_eq!(report.errors().count(), 4);
    }

    #[test]
    fn test_default_rule_names() {
        assert_eq!(
            engine().rule_names(),
            vec!["version", "ngram_orders", "top_k", "columns", "focus_label", "unknown_fields"]
        );
    }

    #[test]
    fn test_custom_rule() {
        struct AlwaysWarnRule;
        impl ValidationRule for AlwaysWarnRule {
            fn name(&self) -> &str {
                "always_warn"
            }
            fn validate(&self, _spec: &AnalysisSpec) -> Vec<ValidationDiagnostic> {
                vec![ValidationDiagnostic::warning(SpecError::new(
                    ErrorCode::EmptySelection,
                    "",
                    "custom warning",
                ))]
            }
        }

        let mut eng = ValidationEngine::new();
        eng.add_rule(Box::new(AlwaysWarnRule));
        let report = eng.validate(&spec(r#"{ "v": 1 }"#));
        assert!(report.is_valid());
        assert_eq!(report.warnings().count(), 1);
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report = engine().validate(&spec(r#"{ "v": 1, "top_k": -1 }"#));
        let json = serde_json::to_value(&report).unwrap();
        let diags = json["diagnostics"].as_array().unwrap();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0]["severity"], "error");
        assert_eq!(diags[0]["code"], "invalid_parameter");
    }
}
