//! Stable error codes for spec diagnostics.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Machine-readable category of a spec diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// A numeric parameter outside its domain
    InvalidParameter,
    /// Spec version this build does not understand
    UnsupportedVersion,
    /// Field not part of the schema
    UnknownField,
    /// A list that selects nothing
    EmptySelection,
    /// The same value listed more than once
    DuplicateValue,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidParameter => "invalid_parameter",
            Self::UnsupportedVersion => "unsupported_version",
            Self::UnknownField => "unknown_field",
            Self::EmptySelection => "empty_selection",
            Self::DuplicateValue => "duplicate_value",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
