//! Image analysis pipeline.
//!
//! Orchestrates one analysis: decode the upload, call the hosted detection
//! service, classify fullness, render the annotated result, and persist a
//! report when the policy says so. Batch runs apply a continue-on-error
//! policy so one bad image never aborts the rest.

use chrono::{DateTime, Utc};
use image::RgbImage;
use log::{info, warn};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::{NewReport, Priority, ReportId, ReportStatus};
use crate::config::StorageConfig;
use crate::db::repository::FullRepository;
use crate::db::services as db_services;
use crate::inference::{DetectionClient, InferenceError};
use crate::services::fullness::FullnessResult;
use crate::services::{annotator, fullness, report_policy};

/// Error from a single analysis run.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// The upload could not be decoded as an image. Distinct from a
    /// detection-service failure.
    #[error("failed to read image: {0}")]
    UnreadableImage(String),

    /// The detection service call failed.
    #[error(transparent)]
    Inference(#[from] InferenceError),

    /// Writing the annotated result failed.
    #[error("failed to store annotated image: {0}")]
    Storage(String),
}

/// Outcome of one analysis.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub fullness: FullnessResult,
    pub waste_type: String,
    /// Mean detection confidence, percent
    pub confidence_percent: f64,
    /// Class label of every detection, in detection order
    pub detected_items: Vec<String>,
    pub prediction_count: usize,
    /// Filename of the annotated image in the results directory
    pub output_image: String,
    pub analyzed_at: DateTime<Utc>,
    pub priority: Priority,
    pub report_saved: bool,
    pub report_id: Option<ReportId>,
}

/// One entry of a batch run.
#[derive(Debug, Clone)]
pub struct BatchItemOutcome {
    pub original_filename: String,
    pub outcome: AnalysisOutcome,
}

/// Batch results. Failed items are excluded from `results`.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub results: Vec<BatchItemOutcome>,
    pub reports_saved: usize,
}

/// Analysis pipeline over a detection client and a storage layout.
pub struct Analyzer {
    client: Arc<dyn DetectionClient>,
    storage: StorageConfig,
}

impl Analyzer {
    pub fn new(client: Arc<dyn DetectionClient>, storage: StorageConfig) -> Self {
        Self { client, storage }
    }

    /// Run the full pipeline for one image.
    ///
    /// A repository failure while persisting the report does not fail the
    /// analysis; the outcome comes back with `report_saved = false`. The
    /// statistics cache is left to the caller so batch runs can refresh it
    /// once at the end.
    pub async fn analyze(
        &self,
        repo: &dyn FullRepository,
        bytes: &[u8],
        location: &str,
    ) -> Result<AnalysisOutcome, AnalysisError> {
        let decoded = image::load_from_memory(bytes)
            .map_err(|e| AnalysisError::UnreadableImage(e.to_string()))?;
        let mut raster: RgbImage = decoded.to_rgb8();
        let (width, height) = raster.dimensions();

        let detections = self.client.infer(bytes).await?;
        info!(
            "detection returned {} prediction(s) for a {}x{} image",
            detections.len(),
            width,
            height
        );

        let fullness = fullness::classify(width, height, &detections);
        let confidence_percent = fullness::confidence_percent(&detections);
        let waste_type = fullness::waste_type(&detections);

        annotator::draw_detections(&mut raster, &detections);
        let annotated =
            annotator::encode_jpeg(&raster).map_err(|e| AnalysisError::Storage(e.to_string()))?;

        let output_image = format!("{}.jpg", Uuid::new_v4().simple());
        let output_path = self.storage.result_path(&output_image);
        std::fs::write(&output_path, &annotated)
            .map_err(|e| AnalysisError::Storage(e.to_string()))?;

        let decision = report_policy::decide(&fullness, confidence_percent);
        let mut report_saved = false;
        let mut report_id = None;

        if decision.should_persist {
            let new_report = NewReport {
                location: location.to_string(),
                priority: decision.priority,
                status: ReportStatus::Pending,
                ai_confidence: decision.ai_confidence,
                image_data: Some(annotated),
                image_name: Some(output_image.clone()),
            };
            match repo.insert_report(&new_report).await {
                Ok(report) => {
                    info!("saved report {} at fill level {}", report.id, fullness.fill_level);
                    report_saved = true;
                    report_id = Some(report.id);
                }
                // The classification result is still returned to the caller.
                Err(e) => warn!("failed to save report: {}", e),
            }
        }

        Ok(AnalysisOutcome {
            fullness,
            waste_type,
            confidence_percent,
            detected_items: detections.iter().map(|d| d.class_label.clone()).collect(),
            prediction_count: detections.len(),
            output_image,
            analyzed_at: Utc::now(),
            priority: decision.priority,
            report_saved,
            report_id,
        })
    }
}

/// Analyze one image and refresh the statistics cache when a report was
/// written.
pub async fn run_analysis(
    analyzer: &Analyzer,
    repo: &dyn FullRepository,
    bytes: &[u8],
    location: &str,
) -> Result<AnalysisOutcome, AnalysisError> {
    let outcome = analyzer.analyze(repo, bytes, location).await?;

    if outcome.report_saved {
        if let Err(e) = db_services::refresh_statistics(repo).await {
            warn!("failed to refresh statistics: {}", e);
        }
    }

    Ok(outcome)
}

/// Location recorded on reports persisted from a batch run.
const BATCH_LOCATION: &str = "Batch Analysis";

/// Analyze a sequence of images with a continue-on-error policy.
///
/// A per-image failure is logged and the image is excluded from the result
/// list; the remaining images still run. The statistics cache is refreshed
/// once at the end when at least one report was written.
pub async fn run_batch_analysis(
    analyzer: &Analyzer,
    repo: &dyn FullRepository,
    images: Vec<(String, Vec<u8>)>,
) -> BatchOutcome {
    let mut results = Vec::new();
    let mut reports_saved = 0;

    for (original_filename, bytes) in images {
        match analyzer.analyze(repo, &bytes, BATCH_LOCATION).await {
            Ok(outcome) => {
                if outcome.report_saved {
                    reports_saved += 1;
                }
                results.push(BatchItemOutcome {
                    original_filename,
                    outcome,
                });
            }
            Err(e) => warn!("skipping batch image {}: {}", original_filename, e),
        }
    }

    if reports_saved > 0 {
        if let Err(e) = db_services::refresh_statistics(repo).await {
            warn!("failed to refresh statistics after batch: {}", e);
        }
    }

    BatchOutcome {
        results,
        reports_saved,
    }
}
