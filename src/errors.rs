//! Crate-wide error type.
//!
//! Empty input is never an error here: documents without tokens or entities
//! produce empty tables and zero rates. Errors are reserved for caller bugs
//! (bad parameters, rejected specs) and for the corpus I/O boundary.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by tagfreq operations.
#[derive(Debug, Error)]
pub enum TagFreqError {
    /// A parameter outside its valid domain (e.g. n-gram order 0, negative k).
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// An [`AnalysisSpec`](crate::pipeline::spec::AnalysisSpec) failed validation.
    #[error("analysis spec rejected: {0}")]
    InvalidSpec(String),

    #[error("corpus file not found: {}", .0.display())]
    CorpusNotFound(PathBuf),

    /// A corpus row that could not be turned into a document record.
    #[error("malformed corpus record at line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },

    /// An IOB tag that is not `O`, `B-<label>` or `I-<label>`.
    #[error("malformed IOB tag: {0:?}")]
    MalformedIob(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl TagFreqError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TagFreqError>;
