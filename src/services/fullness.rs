//! Fullness estimation from detected bounding boxes.
//!
//! The occupancy ratio is the aggregate detected area over the image area,
//! expressed as a percentage. Boxes are taken at face value: they are not
//! clipped to the frame and overlap is not deduplicated, so the ratio is an
//! approximation of coverage and can exceed 100 on noisy detections. It is
//! never clamped; oversized ratios land in the Overflow bucket with their
//! magnitude preserved.

use serde::{Deserialize, Serialize};

use crate::models::detection::Detection;

/// Ordinal fullness bucket.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum FullnessStatus {
    Empty,
    Low,
    #[serde(rename = "Half Full")]
    HalfFull,
    #[serde(rename = "Almost Full")]
    AlmostFull,
    Overflow,
}

impl std::fmt::Display for FullnessStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FullnessStatus::Empty => "Empty",
            FullnessStatus::Low => "Low",
            FullnessStatus::HalfFull => "Half Full",
            FullnessStatus::AlmostFull => "Almost Full",
            FullnessStatus::Overflow => "Overflow",
        };
        write!(f, "{}", s)
    }
}

/// Ordinal severity tier derived from fullness.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Urgency {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Urgency::Low => "Low",
            Urgency::Medium => "Medium",
            Urgency::High => "High",
            Urgency::Critical => "Critical",
        };
        write!(f, "{}", s)
    }
}

/// Classification outcome for one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullnessResult {
    /// Aggregate detected area over image area, percent. Unclamped.
    pub occupancy_ratio: f64,
    pub status: FullnessStatus,
    /// Ratio rounded to 1 decimal; 0 when nothing was detected
    pub fill_level: f64,
    pub urgency: Urgency,
}

// Bucket boundaries in percent; upper bounds are exclusive.
const LOW_UPPER: f64 = 20.0;
const HALF_FULL_UPPER: f64 = 60.0;
const ALMOST_FULL_UPPER: f64 = 90.0;

/// Classify detections against the image dimensions.
///
/// Both dimensions must be positive; they come from a successfully decoded
/// image.
pub fn classify(image_width: u32, image_height: u32, detections: &[Detection]) -> FullnessResult {
    debug_assert!(image_width > 0 && image_height > 0);

    let image_area = f64::from(image_width) * f64::from(image_height);
    let total_area: f64 = detections.iter().map(Detection::area).sum();
    let ratio = if detections.is_empty() {
        0.0
    } else {
        100.0 * total_area / image_area
    };

    let (status, urgency) = if ratio == 0.0 {
        (FullnessStatus::Empty, Urgency::Low)
    } else if ratio < LOW_UPPER {
        (FullnessStatus::Low, Urgency::Low)
    } else if ratio < HALF_FULL_UPPER {
        (FullnessStatus::HalfFull, Urgency::Medium)
    } else if ratio < ALMOST_FULL_UPPER {
        (FullnessStatus::AlmostFull, Urgency::High)
    } else {
        (FullnessStatus::Overflow, Urgency::Critical)
    };

    let fill_level = if ratio == 0.0 { 0.0 } else { round_to(ratio, 1) };

    FullnessResult {
        occupancy_ratio: ratio,
        status,
        fill_level,
        urgency,
    }
}

/// Mean detection confidence as a percentage, rounded to 2 decimals.
/// 0 when nothing was detected.
pub fn confidence_percent(detections: &[Detection]) -> f64 {
    if detections.is_empty() {
        return 0.0;
    }
    let mean =
        detections.iter().map(|d| d.confidence).sum::<f64>() / detections.len() as f64;
    round_to(mean * 100.0, 2)
}

/// Label describing what was detected: the single class when uniform,
/// "Mixed Waste" when classes differ, "Unknown" when nothing was found.
pub fn waste_type(detections: &[Detection]) -> String {
    let mut classes: Vec<&str> = detections.iter().map(|d| d.class_label.as_str()).collect();
    classes.sort_unstable();
    classes.dedup();

    match classes.as_slice() {
        [] => "Unknown".to_string(),
        [single] => (*single).to_string(),
        _ => "Mixed Waste".to_string(),
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
