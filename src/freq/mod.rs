//! Frequency aggregation
//!
//! This module provides per-document count tables, normalization, and the
//! caller-owned accumulators used for corpus and author rollups.

pub mod accumulator;
pub mod table;
