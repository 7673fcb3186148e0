//! Analysis runner: orchestrates stage execution over a corpus.
//!
//! The [`Analyzer`] holds a tagger, an entity recognizer, and a resolved
//! [`AnalysisPlan`]. Calling [`Analyzer::run`] executes the stages in order,
//! notifying an [`AnalysisObserver`] at each boundary:
//!
//! 1. **analyze**: tag, chunk, and count every document
//! 2. **aggregate**: merge per-document counts into corpus tables
//! 3. **rollup**: per-author frequency tables
//! 4. **focus**: most common focus entities and the leader's year series
//! 5. **report**: assemble the [`CorpusReport`]
//!
//! [`Analyzer::run_parallel`] analyzes documents on the rayon pool and
//! produces the same report as the sequential run.

use std::collections::BTreeMap;

use rayon::prelude::*;
use rustc_hash::FxHashMap;

use crate::corpus;
use crate::entity::{count_categories, count_mentions, select_surface_forms, CategoryRates};
use crate::errors::Result;
use crate::freq::accumulator::{fold_accumulators, reduce_parallel, CorpusAccumulator};
use crate::freq::table::{CountTable, FrequencyTable};
use crate::ngram::extractor::{extract_entities, NGram};
use crate::pipeline::observer::{
    AnalysisObserver, StageClock, StageReportBuilder, STAGE_AGGREGATE, STAGE_ANALYZE,
    STAGE_FOCUS, STAGE_REPORT, STAGE_ROLLUP,
};
use crate::pipeline::spec::AnalysisPlan;
use crate::query::top_k;
use crate::report::{
    AuthorProfile, CorpusReport, DocumentRow, EntityCount, FocusSeries, OrderTop, YearCount,
};
use crate::tagger::{EntityRecognizer, Tagger};
use crate::types::{DocumentRecord, Entity};

// ---------------------------------------------------------------------------
// Conditional tracing support
// ---------------------------------------------------------------------------

/// Enter a tracing span for an analysis stage (when the `tracing` feature is
/// enabled). When disabled, this is a no-op and the compiler eliminates it.
macro_rules! trace_stage {
    ($name:expr) => {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("pipeline_stage", stage = $name).entered();
    };
}

// ============================================================================
// DocumentAnalysis: everything computed from one document
// ============================================================================

/// Per-document result of the analyze stage.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentAnalysis {
    pub year: i32,
    pub author: String,
    pub tokens: usize,
    /// Tag n-gram counts for every planned order
    pub counts: CorpusAccumulator,
    pub pos_rates: BTreeMap<String, f64>,
    pub entities: Vec<Entity>,
    pub entity_rates: CategoryRates,
    /// Surface forms carrying the focus label, duplicates kept
    pub focus_surfaces: Vec<String>,
}

impl DocumentAnalysis {
    fn to_row(&self) -> DocumentRow {
        DocumentRow {
            year: self.year,
            author: self.author.clone(),
            tokens: self.tokens,
            entities: self.entities.len(),
            pos_rates: self.pos_rates.clone(),
            entity_rates: self.entity_rates.clone(),
        }
    }
}

// ============================================================================
// Analyzer
// ============================================================================

/// Runs the full analysis over a set of documents.
#[derive(Debug, Clone)]
pub struct Analyzer<T, R> {
    tagger: T,
    recognizer: R,
    plan: AnalysisPlan,
}

impl<T: Tagger, R: EntityRecognizer> Analyzer<T, R> {
    pub fn new(tagger: T, recognizer: R, plan: AnalysisPlan) -> Self {
        Self {
            tagger,
            recognizer,
            plan,
        }
    }

    pub fn plan(&self) -> &AnalysisPlan {
        &self.plan
    }

    /// Tag, chunk, and count a single document.
    ///
    /// A document the tagger cannot handle yields zero tokens; every count
    /// and rate for it is then empty or 0.
    pub fn analyze_document(&self, record: &DocumentRecord) -> Result<DocumentAnalysis> {
        let tagged = self.tagger.tag(&record.text);
        if tagged.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::debug!(year = record.year, author = %record.author, "document tagged to zero tokens");
        }

        let counts = CorpusAccumulator::from_document(&tagged, &self.plan.ngram_orders)?;
        let unigrams = if self.plan.ngram_orders.contains(&1) {
            counts.frequencies(1)
        } else {
            CorpusAccumulator::from_document(&tagged, &[1])?.frequencies(1)
        };
        let pos_rates = self.pos_rates(&unigrams);

        let chunks = self.recognizer.chunk(&tagged);
        let entities = extract_entities(&chunks);
        let entity_rates = count_categories(&entities, self.plan.entity_categories.as_slice());
        let focus_surfaces = select_surface_forms(&entities, &self.plan.focus_label);

        Ok(DocumentAnalysis {
            year: record.year,
            author: record.author.clone(),
            tokens: tagged.len(),
            counts,
            pos_rates,
            entities,
            entity_rates,
            focus_surfaces,
        })
    }

    fn pos_rates(&self, unigrams: &FrequencyTable<NGram>) -> BTreeMap<String, f64> {
        self.plan
            .pos_tags
            .iter()
            .map(|tag| (tag.clone(), unigrams.get(&NGram::unigram(tag.as_str()))))
            .collect()
    }

    /// Analyze `records` one after another.
    pub fn run(
        &self,
        records: &[DocumentRecord],
        observer: &mut impl AnalysisObserver,
    ) -> Result<CorpusReport> {
        let analyses = {
            trace_stage!(STAGE_ANALYZE);
            observer.on_stage_start(STAGE_ANALYZE);
            let clock = StageClock::start();
            let analyses = records
                .iter()
                .map(|record| self.analyze_document(record))
                .collect::<Result<Vec<_>>>()?;
            Self::finish_analyze(&analyses, clock, observer);
            analyses
        };

        self.summarize(records, &analyses, false, observer)
    }

    fn finish_analyze(
        analyses: &[DocumentAnalysis],
        clock: StageClock,
        observer: &mut impl AnalysisObserver,
    ) {
        let report = StageReportBuilder::new(clock.elapsed())
            .documents(analyses.len())
            .items(analyses.iter().map(|a| a.tokens).sum())
            .build();
        observer.on_stage_end(STAGE_ANALYZE, &report);
        for (index, analysis) in analyses.iter().enumerate() {
            observer.on_document(index, analysis);
        }
    }

    /// Stages after analyze. Shared by sequential and parallel runs.
    fn summarize(
        &self,
        records: &[DocumentRecord],
        analyses: &[DocumentAnalysis],
        parallel: bool,
        observer: &mut impl AnalysisObserver,
    ) -> Result<CorpusReport> {
        let k = self.plan.top_k;

        // Stage: aggregate
        trace_stage!(STAGE_AGGREGATE);
        observer.on_stage_start(STAGE_AGGREGATE);
        let clock = StageClock::start();
        let totals = if parallel {
            reduce_parallel(analyses.par_iter().map(|a| &a.counts))
        } else {
            fold_accumulators(analyses.iter().map(|a| &a.counts))
        };
        let corpus_top: Vec<OrderTop<u64>> = self
            .plan
            .ngram_orders
            .iter()
            .map(|&n| {
                let ranked = totals.counts(n).map(|t| top_k(t, k)).unwrap_or_default();
                OrderTop::from_ranked(n, ranked)
            })
            .collect();
        let report = StageReportBuilder::new(clock.elapsed())
            .documents(analyses.len())
            .items(self.plan.ngram_orders.iter().map(|&n| totals.extracted(n) as usize).sum())
            .build();
        observer.on_stage_end(STAGE_AGGREGATE, &report);

        // Stage: rollup
        trace_stage!(STAGE_ROLLUP);
        observer.on_stage_start(STAGE_ROLLUP);
        let clock = StageClock::start();
        let selected: Vec<&str> = if self.plan.authors.is_empty() {
            corpus::authors(records)
        } else {
            self.plan.authors.iter().map(String::as_str).collect()
        };
        let groups = group_by_author(analyses);
        let empty = CorpusAccumulator::new();
        let authors: Vec<AuthorProfile> = selected
            .iter()
            .map(|&author| self.author_profile(author, groups.get(author).unwrap_or(&empty)))
            .collect();
        let report = StageReportBuilder::new(clock.elapsed())
            .documents(analyses.len())
            .items(authors.len())
            .build();
        observer.on_stage_end(STAGE_ROLLUP, &report);

        // Stage: focus entities
        trace_stage!(STAGE_FOCUS);
        observer.on_stage_start(STAGE_FOCUS);
        let clock = StageClock::start();
        let surfaces: CountTable<String> = analyses
            .iter()
            .flat_map(|a| a.focus_surfaces.iter().cloned())
            .collect();
        let focus_entities: Vec<EntityCount> = top_k(&surfaces, k)
            .into_iter()
            .map(|(surface, count)| EntityCount { surface, count })
            .collect();
        let focus_series = top_k(&surfaces, 1)
            .into_iter()
            .next()
            .map(|(surface, _)| FocusSeries {
                points: records
                    .iter()
                    .map(|r| YearCount {
                        year: r.year,
                        count: count_mentions(&r.text, &surface),
                    })
                    .collect(),
                surface,
            });
        let report = StageReportBuilder::new(clock.elapsed())
            .documents(records.len())
            .items(surfaces.len())
            .build();
        observer.on_stage_end(STAGE_FOCUS, &report);

        // Stage: report
        trace_stage!(STAGE_REPORT);
        observer.on_stage_start(STAGE_REPORT);
        let clock = StageClock::start();
        let result = CorpusReport {
            documents: totals.documents(),
            rows: analyses.iter().map(DocumentAnalysis::to_row).collect(),
            corpus_top,
            authors,
            focus_label: self.plan.focus_label.clone(),
            focus_entities,
            focus_series,
        };
        let report = StageReportBuilder::new(clock.elapsed())
            .documents(result.rows.len())
            .build();
        observer.on_stage_end(STAGE_REPORT, &report);

        Ok(result)
    }

    fn author_profile(&self, author: &str, acc: &CorpusAccumulator) -> AuthorProfile {
        let top = self
            .plan
            .ngram_orders
            .iter()
            .map(|&n| OrderTop::from_ranked(n, top_k(&acc.frequencies(n), self.plan.top_k)))
            .collect();

        AuthorProfile {
            author: author.to_string(),
            documents: acc.documents(),
            top,
        }
    }
}

impl<T, R> Analyzer<T, R>
where
    T: Tagger + Sync,
    R: EntityRecognizer + Sync,
{
    /// Analyze `records` on the rayon thread pool.
    ///
    /// Documents are collected back in corpus order, so the report equals
    /// what [`Analyzer::run`] returns.
    pub fn run_parallel(
        &self,
        records: &[DocumentRecord],
        observer: &mut impl AnalysisObserver,
    ) -> Result<CorpusReport> {
        let analyses = {
            trace_stage!(STAGE_ANALYZE);
            observer.on_stage_start(STAGE_ANALYZE);
            let clock = StageClock::start();
            let analyses = records
                .par_iter()
                .map(|record| self.analyze_document(record))
                .collect::<Result<Vec<_>>>()?;
            Self::finish_analyze(&analyses, clock, observer);
            analyses
        };

        self.summarize(records, &analyses, true, observer)
    }

    /// Run sequentially or in parallel, as the plan asks.
    pub fn execute(
        &self,
        records: &[DocumentRecord],
        observer: &mut impl AnalysisObserver,
    ) -> Result<CorpusReport> {
        if self.plan.parallel {
            self.run_parallel(records, observer)
        } else {
            self.run(records, observer)
        }
    }
}

/// One accumulator per author, built in a single pass over the corpus.
fn group_by_author(analyses: &[DocumentAnalysis]) -> FxHashMap<&str, CorpusAccumulator> {
    let mut groups: FxHashMap<&str, CorpusAccumulator> = FxHashMap::default();
    for analysis in analyses {
        groups
            .entry(analysis.author.as_str())
            .or_default()
            .merge_from(&analysis.counts);
    }
    groups
}

// ============================================================================
// Tests
// ============================================================================
