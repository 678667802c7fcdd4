//! Report repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{
    NewReport, Priority, Report, ReportFilter, ReportId, ReportStatus, ReportUpdate,
};

/// Repository trait for report persistence and the aggregate queries the
/// statistics cache is recomputed from.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Insert a new report and return the stored row.
    async fn insert_report(&self, new: &NewReport) -> RepositoryResult<Report>;

    /// Fetch a report by id.
    async fn fetch_report(&self, id: ReportId) -> RepositoryResult<Report>;

    /// List reports matching the filter, most recent first.
    async fn list_reports(&self, filter: &ReportFilter) -> RepositoryResult<Vec<Report>>;

    /// Apply a partial update and return the updated row.
    async fn update_report(
        &self,
        id: ReportId,
        changes: &ReportUpdate,
    ) -> RepositoryResult<Report>;

    /// Delete a report by id.
    async fn delete_report(&self, id: ReportId) -> RepositoryResult<()>;

    /// Total number of reports.
    async fn count_reports(&self) -> RepositoryResult<i64>;

    /// Number of reports carrying image data.
    async fn count_reports_with_image(&self) -> RepositoryResult<i64>;

    /// Number of reports with ai_confidence above zero.
    async fn count_reports_detected(&self) -> RepositoryResult<i64>;

    /// Truncated integer mean of ai_confidence; `None` when no reports exist.
    async fn average_confidence(&self) -> RepositoryResult<Option<i64>>;

    /// Number of reports in the given workflow status.
    async fn count_reports_by_status(&self, status: ReportStatus) -> RepositoryResult<i64>;

    /// Number of reports at the given priority.
    async fn count_reports_by_priority(&self, priority: Priority) -> RepositoryResult<i64>;
}
