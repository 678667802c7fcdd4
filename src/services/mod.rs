//! Service layer for business logic and orchestration.
//!
//! This module holds the actual domain logic: the fullness classifier, the
//! report persistence policy, the statistics aggregator, annotated-image
//! rendering, and the analysis pipeline that ties them to the detection
//! client and the repository.

pub mod analyzer;

pub mod annotator;

pub mod fullness;

pub mod report_policy;

pub mod statistics;

pub use analyzer::{run_analysis, run_batch_analysis, AnalysisError, AnalysisOutcome, Analyzer};
pub use fullness::{classify, confidence_percent, waste_type};
pub use report_policy::{decide, ReportDecision, PERSIST_THRESHOLD};
pub use statistics::recompute;

#[cfg(test)]
#[path = "fullness_tests.rs"]
mod fullness_tests;


#[cfg(test)]
#[path = "statistics_tests.rs"]
mod statistics_tests;
