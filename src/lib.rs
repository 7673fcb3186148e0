//! # tagfreq
//!
//! Part-of-speech and named-entity frequency analysis for speech corpora.
//!
//! Tagging and entity chunking are supplied by an external toolkit through the
//! [`tagger::Tagger`] and [`tagger::EntityRecognizer`] traits. Everything
//! downstream of that boundary lives here:
//!
//! - [`ngram`]: tag unigrams/bigrams/trigrams and entity n-grams
//! - [`freq`]: count tables, normalization, and corpus accumulators
//! - [`query`]: deterministic top-K queries
//! - [`entity`]: per-category entity rates and surface-form selection
//! - [`pipeline`]: spec validation and the corpus [`pipeline::runner::Analyzer`]
//! - [`report`]: the serializable output handed to plotting/printing layers
//!
//! Data flows one way: tagged tokens → extractor → aggregator → query/report.

pub mod corpus;
pub mod entity;
pub mod errors;
pub mod freq;
pub mod ngram;
pub mod pipeline;
pub mod query;
pub mod report;
pub mod tagger;
pub mod types;

pub use errors::{Result, TagFreqError};
pub use freq::accumulator::CorpusAccumulator;
pub use freq::table::{aggregate, merge, normalize_table, Aggregate, CountTable, FrequencyTable};
pub use ngram::extractor::{extract_entities, extract_entity_ngrams, extract_ngrams, NGram};
pub use query::top_k;
pub use types::{DocumentRecord, Entity, NeChunk, TaggedToken};
