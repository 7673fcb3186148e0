//! Analysis observer: hooks for logging, profiling, and debugging.
//!
//! Observers receive notifications at stage boundaries without coupling to
//! stage logic. The runner calls [`AnalysisObserver::on_stage_start`] and
//! [`AnalysisObserver::on_stage_end`] around every stage and hands each
//! finished document to [`AnalysisObserver::on_document`].

use std::time::{Duration, Instant};

use super::runner::DocumentAnalysis;

// ============================================================================
// Stage names
// ============================================================================

/// Tag, chunk, and count every document.
pub const STAGE_ANALYZE: &str = "analyze";
/// Merge per-document counts into corpus tables.
pub const STAGE_AGGREGATE: &str = "aggregate";
/// Per-author tables and frequencies.
pub const STAGE_ROLLUP: &str = "rollup";
/// Most common focus entities and their year series.
pub const STAGE_FOCUS: &str = "focus";
/// Assemble the final report.
pub const STAGE_REPORT: &str = "report";

// ============================================================================
// StageClock / StageReport
// ============================================================================

/// Wall-clock timer for one stage.
#[derive(Debug, Clone, Copy)]
pub struct StageClock(Instant);

impl StageClock {
    pub fn start() -> Self {
        Self(Instant::now())
    }

    pub fn elapsed(&self) -> Duration {
        self.0.elapsed()
    }
}

/// What a stage reports when it finishes.
///
/// Only `elapsed` is always present; counts are filled in by stages for
/// which they mean something.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageReport {
    elapsed: Duration,
    documents: Option<usize>,
    items: Option<usize>,
}

impl StageReport {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            elapsed,
            ..Self::default()
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Documents the stage touched
    pub fn documents(&self) -> Option<usize> {
        self.documents
    }

    /// Stage-specific item count (tokens, table entries, authors, ...)
    pub fn items(&self) -> Option<usize> {
        self.items
    }
}

/// Fluent construction of a [`StageReport`] with optional counts.
#[derive(Debug, Clone)]
pub struct StageReportBuilder {
    report: StageReport,
}

impl StageReportBuilder {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            report: StageReport::new(elapsed),
        }
    }

    pub fn documents(mut self, documents: usize) -> Self {
        self.report.documents = Some(documents);
        self
    }

    pub fn items(mut self, items: usize) -> Self {
        self.report.items = Some(items);
        self
    }

    pub fn build(self) -> StageReport {
        self.report
    }
}

// ============================================================================
// AnalysisObserver
// ============================================================================

/// Receives callbacks while an [`Analyzer`](super::runner::Analyzer) runs.
///
/// Every method has an empty default, so implementors override only what
/// they need.
pub trait AnalysisObserver {
    fn on_stage_start(&mut self, _stage: &'static str) {}

    fn on_stage_end(&mut self, _stage: &'static str, _report: &StageReport) {}

    /// Called once per document, in corpus order, after the analyze stage.
    fn on_document(&mut self, _index: usize, _analysis: &DocumentAnalysis) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl AnalysisObserver for NoopObserver {}

/// Observer that keeps every stage report in the order stages finished.
#[derive(Debug, Clone, Default)]
pub struct StageTimingObserver {
    reports: Vec<(&'static str, StageReport)>,
}

impl StageTimingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> &[(&'static str, StageReport)] {
        &self.reports
    }

    /// Sum of all stage times
    pub fn total_elapsed(&self) -> Duration {
        self.reports.iter().map(|(_, r)| r.elapsed()).sum()
    }
}

impl AnalysisObserver for StageTimingObserver {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            stage,
            elapsed_us = report.elapsed().as_micros() as u64,
            documents = report.documents(),
            items = report.items(),
            "stage finished"
        );
        self.reports.push((stage, report.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_counts() {
        let report = StageReportBuilder::new(Duration::from_millis(3))
            .documents(4)
            .items(120)
            .build();
        assert_eq!(report.elapsed(), Duration::from_millis(3));
        assert_eq!(report.documents(), Some(4));
        assert_eq!(report.items(), Some(120));
    }

    #[test]
    fn test_plain_report_has_no_counts() {
        let report = StageReport::new(Duration::ZERO);
        assert_eq!(report.documents(), None);
        assert_eq!(report.items(), None);
    }

    #[test]
    fn test_timing_observer_records_in_order() {
        let mut obs = StageTimingObserver::new();
        obs.on_stage_start(STAGE_ANALYZE);
        obs.on_stage_end(STAGE_ANALYZE, &StageReport::new(Duration::from_millis(2)));
        obs.on_stage_end(STAGE_REPORT, &StageReport::new(Duration::from_millis(1)));

        let names: Vec<&str> = obs.reports().iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec![STAGE_ANALYZE, STAGE_REPORT]);
        assert_eq!(obs.total_elapsed(), Duration::from_millis(3));
    }

    #[test]
    fn test_clock_is_monotonic() {
        let clock = StageClock::start();
        let first = clock.elapsed();
        assert!(clock.elapsed() >= first);
    }
}
