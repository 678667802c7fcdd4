//! Rolling aggregate statistics over the report set.
//!
//! The statistics row is a cache: it must always equal a pure function of
//! the current report rows, so it is recomputed wholesale after every report
//! mutation rather than patched incrementally.

use crate::api::{Report, Statistics};

/// Recompute the aggregate row from the full report set.
pub fn recompute(reports: &[Report]) -> Statistics {
    let total = reports.len() as i64;
    let with_images = reports.iter().filter(|r| r.has_image()).count() as i64;
    let detected = reports.iter().filter(|r| r.ai_confidence > 0).count() as i64;

    let confidence_sum: i64 = reports.iter().map(|r| i64::from(r.ai_confidence)).sum();
    let average = if total > 0 { confidence_sum / total } else { 0 };

    compose(total, with_images, detected, average)
}

/// Build the aggregate row from repository-level aggregate queries.
///
/// `average` is the already-truncated integer mean of ai_confidence.
pub fn compose(total_reports: i64, with_images: i64, detected: i64, average: i64) -> Statistics {
    let detection_rate = if total_reports > 0 {
        detected * 100 / total_reports
    } else {
        0
    };

    Statistics {
        images_analyzed: with_images,
        waste_detected: detected,
        average_confidence: average,
        detection_rate,
    }
}
