//! Analysis pipeline: JSON spec, validation, and the corpus runner.
//!
//! A typical run loads an [`spec::AnalysisSpec`], resolves it into an
//! [`spec::AnalysisPlan`], and hands the plan to a [`runner::Analyzer`]:
//!
//! ```rust
//! use tagfreq::pipeline::observer::NoopObserver;
//! use tagfreq::pipeline::runner::Analyzer;
//! use tagfreq::pipeline::spec::AnalysisSpec;
//! use tagfreq::tagger::{NoEntities, SlashTagger};
//! use tagfreq::DocumentRecord;
//!
//! let plan = AnalysisSpec::from_json_str(r#"{ "v": 1, "top_k": 3 }"#)
//!     .unwrap()
//!     .resolve()
//!     .unwrap();
//! let analyzer = Analyzer::new(SlashTagger::new(), NoEntities, plan);
//! let records = vec![DocumentRecord::new(1790, "George Washington", "The/DT cat/NN")];
//! let report = analyzer.run(&records, &mut NoopObserver).unwrap();
//! assert_eq!(report.documents, 1);
//! ```

pub mod error_code;
pub mod errors;
pub mod observer;
pub mod runner;
pub mod spec;
pub mod validation;

pub use errors::SpecError;
pub use observer::{AnalysisObserver, NoopObserver, StageTimingObserver};
pub use runner::{Analyzer, DocumentAnalysis};
pub use spec::{AnalysisPlan, AnalysisSpec};
pub use validation::{ValidationEngine, ValidationReport};
