//! Report persistence policy.
//!
//! Maps a classification outcome to a workflow priority and decides whether
//! the result is worth persisting. The priority table (cut points 20 and 60,
//! inclusive upper bounds) and the persist threshold (strictly above 50) are
//! business rules independent of the classifier's status buckets; the two
//! scales are deliberately not unified.

use crate::api::Priority;
use crate::services::fullness::FullnessResult;

/// Fill level (percent) strictly above which a report is persisted.
pub const PERSIST_THRESHOLD: f64 = 50.0;

/// Outcome of the persistence decision for one analysis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportDecision {
    /// Whether a report row should be written
    pub should_persist: bool,
    /// Workflow priority for the report
    pub priority: Priority,
    /// Confidence as the integer percentage stored on the report
    pub ai_confidence: i32,
}

/// Decide whether and how to persist a classification outcome.
pub fn decide(result: &FullnessResult, confidence_percent: f64) -> ReportDecision {
    ReportDecision {
        should_persist: result.fill_level > PERSIST_THRESHOLD,
        priority: priority_for(result.fill_level),
        ai_confidence: confidence_percent as i32,
    }
}

/// Priority table over fill level: up to 20 Low, up to 60 Medium, above High.
fn priority_for(fill_level: f64) -> Priority {
    if fill_level <= 20.0 {
        Priority::Low
    } else if fill_level <= 60.0 {
        Priority::Medium
    } else {
        Priority::High
    }
}
