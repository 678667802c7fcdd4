//! High-level persistence operations.
//!
//! These functions orchestrate repository calls and keep the statistics
//! cache row consistent with the report table: every report mutation ends
//! with a wholesale recompute from aggregate queries. Use these from
//! application code instead of hitting the repository traits directly.

use serde::{Deserialize, Serialize};

use crate::api::{
    Camera, CameraId, CameraUpdate, NewCamera, NewReport, Priority, Report, ReportFilter,
    ReportId, ReportStatus, ReportUpdate, Statistics,
};
use crate::db::repository::{FullRepository, RepositoryResult};
use crate::services::statistics;

/// Summary metrics for the dashboard endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_cameras: i64,
    pub active_cameras: i64,
    pub total_reports: i64,
    pub pending_reports: i64,
    pub high_priority_reports: i64,
    pub statistics: Statistics,
}

/// Check that the repository backend is reachable.
pub async fn health_check(repo: &dyn FullRepository) -> RepositoryResult<bool> {
    repo.health_check().await
}

// ==================== Reports ====================

/// Create a report and refresh the statistics cache.
pub async fn create_report(
    repo: &dyn FullRepository,
    new: &NewReport,
) -> RepositoryResult<Report> {
    let report = repo.insert_report(new).await?;
    refresh_statistics(repo).await?;
    Ok(report)
}

/// Fetch one report.
pub async fn get_report(repo: &dyn FullRepository, id: ReportId) -> RepositoryResult<Report> {
    repo.fetch_report(id).await
}

/// List reports matching the filter, most recent first.
pub async fn list_reports(
    repo: &dyn FullRepository,
    filter: &ReportFilter,
) -> RepositoryResult<Vec<Report>> {
    repo.list_reports(filter).await
}

/// Update a report and refresh the statistics cache.
pub async fn update_report(
    repo: &dyn FullRepository,
    id: ReportId,
    changes: &ReportUpdate,
) -> RepositoryResult<Report> {
    let report = repo.update_report(id, changes).await?;
    refresh_statistics(repo).await?;
    Ok(report)
}

/// Delete a report and refresh the statistics cache.
pub async fn delete_report(repo: &dyn FullRepository, id: ReportId) -> RepositoryResult<()> {
    repo.delete_report(id).await?;
    refresh_statistics(repo).await?;
    Ok(())
}

// ==================== Statistics ====================

/// Recompute the statistics cache row from the current report set.
///
/// Idempotent: calling twice without intervening writes stores and returns
/// the same row.
pub async fn refresh_statistics(repo: &dyn FullRepository) -> RepositoryResult<Statistics> {
    let total = repo.count_reports().await?;
    let with_images = repo.count_reports_with_image().await?;
    let detected = repo.count_reports_detected().await?;
    let average = repo.average_confidence().await?.unwrap_or(0);

    let stats = statistics::compose(total, with_images, detected, average);
    repo.upsert_statistics(&stats).await?;
    Ok(stats)
}

/// Read the current statistics cache row.
pub async fn get_statistics(repo: &dyn FullRepository) -> RepositoryResult<Statistics> {
    repo.fetch_statistics().await
}

// ==================== Cameras ====================

/// Register a camera.
pub async fn add_camera(repo: &dyn FullRepository, new: &NewCamera) -> RepositoryResult<Camera> {
    repo.insert_camera(new).await
}

/// Fetch one camera.
pub async fn get_camera(repo: &dyn FullRepository, id: CameraId) -> RepositoryResult<Camera> {
    repo.fetch_camera(id).await
}

/// List all cameras.
pub async fn list_cameras(repo: &dyn FullRepository) -> RepositoryResult<Vec<Camera>> {
    repo.list_cameras().await
}

/// Update a camera.
pub async fn update_camera(
    repo: &dyn FullRepository,
    id: CameraId,
    changes: &CameraUpdate,
) -> RepositoryResult<Camera> {
    repo.update_camera(id, changes).await
}

/// Delete a camera.
pub async fn delete_camera(repo: &dyn FullRepository, id: CameraId) -> RepositoryResult<()> {
    repo.delete_camera(id).await
}

// ==================== Dashboard ====================

/// Aggregate the dashboard summary metrics.
pub async fn dashboard_summary(repo: &dyn FullRepository) -> RepositoryResult<DashboardSummary> {
    let total_cameras = repo.count_cameras().await?;
    let active_cameras = repo.count_active_cameras().await?;
    let total_reports = repo.count_reports().await?;
    let pending_reports = repo.count_reports_by_status(ReportStatus::Pending).await?;
    let high_priority_reports = repo.count_reports_by_priority(Priority::High).await?;
    let statistics = repo.fetch_statistics().await?;

    Ok(DashboardSummary {
        total_cameras,
        active_cameras,
        total_reports,
        pending_reports,
        high_priority_reports,
        statistics,
    })
}
