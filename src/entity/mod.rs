//! Named-entity statistics
//!
//! This module provides per-category entity rates and surface-form
//! selection for corpus-wide most-common-entity queries.

pub mod counter;

pub use counter::{count_categories, count_mentions, select_surface_forms, CategoryRates, EntityCategory};
