//! N-gram extraction
//!
//! This module turns tagged token sequences into tag n-grams and chunked
//! entity output into entity n-grams.

pub mod extractor;
pub mod iob;
