//! Data Transfer Objects for the HTTP API.
//!
//! The analysis DTOs keep the camelCase keys the React frontend reads;
//! persistence DTOs use snake_case.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{
    Camera, CameraStatus, FullnessStatus, Priority, Report, ReportStatus, Statistics, Urgency,
};
use crate::db::services::DashboardSummary;
use crate::services::analyzer::{AnalysisOutcome, BatchItemOutcome, BatchOutcome};
use crate::services::report_policy::PERSIST_THRESHOLD;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Service name
    pub service: String,
    /// Database connection status
    pub database: String,
}

// =============================================================================
// Analysis
// =============================================================================

/// Classification block of an analysis response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResultDto {
    pub success: bool,
    pub waste_type: String,
    pub urgency: Urgency,
    pub status: FullnessStatus,
    pub fill_level: f64,
    pub occupancy_ratio: f64,
    /// Mean detection confidence, percent
    pub confidence: f64,
    pub detected_items: Vec<String>,
    pub predictions: usize,
    pub output_image: String,
    pub timestamp: DateTime<Utc>,
}

impl From<&AnalysisOutcome> for AnalysisResultDto {
    fn from(outcome: &AnalysisOutcome) -> Self {
        Self {
            success: true,
            waste_type: outcome.waste_type.clone(),
            urgency: outcome.fullness.urgency,
            status: outcome.fullness.status,
            fill_level: outcome.fullness.fill_level,
            occupancy_ratio: outcome.fullness.occupancy_ratio,
            confidence: outcome.confidence_percent,
            detected_items: outcome.detected_items.clone(),
            predictions: outcome.prediction_count,
            output_image: outcome.output_image.clone(),
            timestamp: outcome.analyzed_at,
        }
    }
}

/// Envelope for POST /api/analyze.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub data: AnalyzeData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeData {
    pub results: AnalysisResultDto,
    pub fullness: f64,
    pub detected_class: String,
    /// Formatted confidence, e.g. "80.00%"
    pub confidence: String,
    pub confidence_value: f64,
    pub priority: Priority,
    pub annotated_image_url: String,
    pub report_saved: bool,
    pub report_id: Option<i64>,
    pub save_threshold: f64,
    pub message: String,
}

impl AnalyzeResponse {
    pub fn from_outcome(outcome: &AnalysisOutcome) -> Self {
        let detected_class = outcome
            .detected_items
            .first()
            .cloned()
            .unwrap_or_else(|| "N/A".to_string());

        Self {
            success: true,
            data: AnalyzeData {
                results: AnalysisResultDto::from(outcome),
                fullness: outcome.fullness.fill_level,
                detected_class,
                confidence: format!("{:.2}%", outcome.confidence_percent),
                confidence_value: outcome.confidence_percent,
                priority: outcome.priority,
                annotated_image_url: result_url(&outcome.output_image),
                report_saved: outcome.report_saved,
                report_id: outcome.report_id.map(|id| id.value()),
                save_threshold: PERSIST_THRESHOLD,
                message: format!(
                    "Report {} - Fullness: {}%",
                    if outcome.report_saved { "saved" } else { "not saved" },
                    outcome.fullness.fill_level
                ),
            },
        }
    }
}

/// One entry of a batch response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchItemDto {
    pub original_filename: String,
    pub results: AnalysisResultDto,
    pub priority: Priority,
    pub annotated_image_url: String,
    pub report_saved: bool,
    pub report_id: Option<i64>,
}

impl From<&BatchItemOutcome> for BatchItemDto {
    fn from(item: &BatchItemOutcome) -> Self {
        Self {
            original_filename: item.original_filename.clone(),
            results: AnalysisResultDto::from(&item.outcome),
            priority: item.outcome.priority,
            annotated_image_url: result_url(&item.outcome.output_image),
            report_saved: item.outcome.report_saved,
            report_id: item.outcome.report_id.map(|id| id.value()),
        }
    }
}

/// Envelope for POST /api/batch-analyze.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchAnalyzeResponse {
    pub success: bool,
    pub count: usize,
    pub reports_saved: usize,
    pub results: Vec<BatchItemDto>,
}

impl BatchAnalyzeResponse {
    pub fn from_outcome(batch: &BatchOutcome) -> Self {
        Self {
            success: true,
            count: batch.results.len(),
            reports_saved: batch.reports_saved,
            results: batch.results.iter().map(BatchItemDto::from).collect(),
        }
    }
}

fn result_url(output_image: &str) -> String {
    format!("/api/results/{}", output_image)
}

// =============================================================================
// Reports
// =============================================================================

/// Report DTO; the image payload is inlined only on request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportDto {
    pub id: i64,
    pub location: String,
    pub priority: Priority,
    pub status: ReportStatus,
    pub ai_confidence: i32,
    pub reported_at: DateTime<Utc>,
    pub has_image: bool,
    pub image_name: Option<String>,
    /// Base64 image data, present when `include_image=true` was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl ReportDto {
    pub fn from_report(report: &Report, image: Option<String>) -> Self {
        Self {
            id: report.id.value(),
            location: report.location.clone(),
            priority: report.priority,
            status: report.status,
            ai_confidence: report.ai_confidence,
            reported_at: report.reported_at,
            has_image: report.has_image(),
            image_name: report.image_name.clone(),
            image,
        }
    }
}

/// Report list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportListResponse {
    pub count: usize,
    pub reports: Vec<ReportDto>,
}

/// Mutation acknowledgement carrying the affected report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportResponse {
    pub message: String,
    pub report: ReportDto,
}

/// Request body for creating a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReportRequest {
    pub location: String,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub status: Option<ReportStatus>,
    #[serde(default)]
    pub ai_confidence: Option<i32>,
    /// Base64 image, with or without a data-URL prefix
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub image_name: Option<String>,
}

/// Request body for updating a report.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateReportRequest {
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub status: Option<ReportStatus>,
    #[serde(default)]
    pub ai_confidence: Option<i32>,
}

/// Query parameters for report listing.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReportListQuery {
    #[serde(default)]
    pub status: Option<ReportStatus>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Query parameters for fetching one report.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReportQuery {
    #[serde(default)]
    pub include_image: Option<bool>,
}

/// Response for GET /api/reports/{id}/image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportImageResponse {
    /// Base64-encoded image bytes
    pub image: String,
    pub image_name: Option<String>,
}

// =============================================================================
// Cameras
// =============================================================================

/// Camera DTO.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraDto {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub status: CameraStatus,
    pub ip_address: String,
}

impl From<&Camera> for CameraDto {
    fn from(camera: &Camera) -> Self {
        Self {
            id: camera.id.value(),
            name: camera.name.clone(),
            location: camera.location.clone(),
            status: camera.status,
            ip_address: camera.ip_address.clone(),
        }
    }
}

/// Camera list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraListResponse {
    pub count: usize,
    pub cameras: Vec<CameraDto>,
}

/// Mutation acknowledgement carrying the affected camera.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraResponse {
    pub message: String,
    pub camera: CameraDto,
}

/// Request body for registering a camera.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCameraRequest {
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub status: Option<CameraStatus>,
    pub ip_address: String,
}

/// Request body for updating a camera.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateCameraRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub status: Option<CameraStatus>,
    #[serde(default)]
    pub ip_address: Option<String>,
}

// =============================================================================
// Statistics / dashboard
// =============================================================================

/// Simple acknowledgement message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Response for POST /api/statistics/update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticsUpdateResponse {
    pub message: String,
    pub statistics: Statistics,
}

/// Camera block of the dashboard summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CamerasSummaryDto {
    pub total: i64,
    pub active: i64,
    pub inactive: i64,
}

/// Report block of the dashboard summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportsSummaryDto {
    pub total: i64,
    pub pending: i64,
    pub high_priority: i64,
}

/// Response for GET /api/dashboard/summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummaryResponse {
    pub cameras: CamerasSummaryDto,
    pub reports: ReportsSummaryDto,
    pub statistics: Statistics,
}

impl From<DashboardSummary> for DashboardSummaryResponse {
    fn from(summary: DashboardSummary) -> Self {
        Self {
            cameras: CamerasSummaryDto {
                total: summary.total_cameras,
                active: summary.active_cameras,
                inactive: summary.total_cameras - summary.active_cameras,
            },
            reports: ReportsSummaryDto {
                total: summary.total_reports,
                pending: summary.pending_reports,
                high_priority: summary.high_priority_reports,
            },
            statistics: summary.statistics,
        }
    }
}
