//! In-memory repository for unit testing and local development.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::BTreeMap;

use crate::api::{
    Camera, CameraId, CameraStatus, CameraUpdate, NewCamera, NewReport, Priority, Report,
    ReportFilter, ReportId, ReportStatus, ReportUpdate, Statistics,
};
use crate::db::repository::{
    CameraRepository, ErrorContext, FullRepository, ReportRepository, RepositoryError,
    RepositoryResult, StatisticsRepository,
};

#[derive(Default)]
struct LocalState {
    reports: BTreeMap<i64, Report>,
    cameras: BTreeMap<i64, Camera>,
    statistics: Option<Statistics>,
    next_report_id: i64,
    next_camera_id: i64,
}

/// In-memory implementation of the repository traits.
///
/// All state lives behind a single RwLock. Suitable for tests and local
/// development, not for multi-process deployments.
pub struct LocalRepository {
    state: RwLock<LocalState>,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(LocalState {
                next_report_id: 1,
                next_camera_id: 1,
                ..Default::default()
            }),
        }
    }

    fn report_not_found(id: ReportId, operation: &str) -> RepositoryError {
        RepositoryError::not_found_with_context(
            format!("Report {} not found", id),
            ErrorContext::new(operation)
                .with_entity("report")
                .with_entity_id(id),
        )
    }

    fn camera_not_found(id: CameraId, operation: &str) -> RepositoryError {
        RepositoryError::not_found_with_context(
            format!("Camera {} not found", id),
            ErrorContext::new(operation)
                .with_entity("camera")
                .with_entity_id(id),
        )
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReportRepository for LocalRepository {
    async fn insert_report(&self, new: &NewReport) -> RepositoryResult<Report> {
        let mut state = self.state.write();
        let id = state.next_report_id;
        state.next_report_id += 1;

        let report = Report {
            id: ReportId::new(id),
            location: new.location.clone(),
            priority: new.priority,
            status: new.status,
            ai_confidence: new.ai_confidence,
            reported_at: Utc::now(),
            image_data: new.image_data.clone(),
            image_name: new.image_name.clone(),
        };
        state.reports.insert(id, report.clone());
        Ok(report)
    }

    async fn fetch_report(&self, id: ReportId) -> RepositoryResult<Report> {
        self.state
            .read()
            .reports
            .get(&id.value())
            .cloned()
            .ok_or_else(|| Self::report_not_found(id, "fetch_report"))
    }

    async fn list_reports(&self, filter: &ReportFilter) -> RepositoryResult<Vec<Report>> {
        let state = self.state.read();
        let mut reports: Vec<Report> = state
            .reports
            .values()
            .filter(|r| filter.status.map_or(true, |s| r.status == s))
            .filter(|r| filter.priority.map_or(true, |p| r.priority == p))
            .cloned()
            .collect();

        // Most recent first; id breaks ties for same-instant inserts.
        reports.sort_by(|a, b| {
            b.reported_at
                .cmp(&a.reported_at)
                .then(b.id.value().cmp(&a.id.value()))
        });

        if let Some(limit) = filter.limit {
            reports.truncate(limit.max(0) as usize);
        }
        Ok(reports)
    }

    async fn update_report(
        &self,
        id: ReportId,
        changes: &ReportUpdate,
    ) -> RepositoryResult<Report> {
        let mut state = self.state.write();
        let report = state
            .reports
            .get_mut(&id.value())
            .ok_or_else(|| Self::report_not_found(id, "update_report"))?;

        if let Some(ref location) = changes.location {
            report.location = location.clone();
        }
        if let Some(priority) = changes.priority {
            report.priority = priority;
        }
        if let Some(status) = changes.status {
            report.status = status;
        }
        if let Some(ai_confidence) = changes.ai_confidence {
            report.ai_confidence = ai_confidence;
        }
        Ok(report.clone())
    }

    async fn delete_report(&self, id: ReportId) -> RepositoryResult<()> {
        self.state
            .write()
            .reports
            .remove(&id.value())
            .map(|_| ())
            .ok_or_else(|| Self::report_not_found(id, "delete_report"))
    }

    async fn count_reports(&self) -> RepositoryResult<i64> {
        Ok(self.state.read().reports.len() as i64)
    }

    async fn count_reports_with_image(&self) -> RepositoryResult<i64> {
        Ok(self
            .state
            .read()
            .reports
            .values()
            .filter(|r| r.has_image())
            .count() as i64)
    }

    async fn count_reports_detected(&self) -> RepositoryResult<i64> {
        Ok(self
            .state
            .read()
            .reports
            .values()
            .filter(|r| r.ai_confidence > 0)
            .count() as i64)
    }

    async fn average_confidence(&self) -> RepositoryResult<Option<i64>> {
        let state = self.state.read();
        let total = state.reports.len() as i64;
        if total == 0 {
            return Ok(None);
        }
        let sum: i64 = state
            .reports
            .values()
            .map(|r| i64::from(r.ai_confidence))
            .sum();
        Ok(Some(sum / total))
    }

    async fn count_reports_by_status(&self, status: ReportStatus) -> RepositoryResult<i64> {
        Ok(self
            .state
            .read()
            .reports
            .values()
            .filter(|r| r.status == status)
            .count() as i64)
    }

    async fn count_reports_by_priority(&self, priority: Priority) -> RepositoryResult<i64> {
        Ok(self
            .state
            .read()
            .reports
            .values()
            .filter(|r| r.priority == priority)
            .count() as i64)
    }
}

#[async_trait]
impl CameraRepository for LocalRepository {
    async fn insert_camera(&self, new: &NewCamera) -> RepositoryResult<Camera> {
        let mut state = self.state.write();
        let id = state.next_camera_id;
        state.next_camera_id += 1;

        let camera = Camera {
            id: CameraId::new(id),
            name: new.name.clone(),
            location: new.location.clone(),
            status: new.status,
            ip_address: new.ip_address.clone(),
        };
        state.cameras.insert(id, camera.clone());
        Ok(camera)
    }

    async fn fetch_camera(&self, id: CameraId) -> RepositoryResult<Camera> {
        self.state
            .read()
            .cameras
            .get(&id.value())
            .cloned()
            .ok_or_else(|| Self::camera_not_found(id, "fetch_camera"))
    }

    async fn list_cameras(&self) -> RepositoryResult<Vec<Camera>> {
        Ok(self.state.read().cameras.values().cloned().collect())
    }

    async fn update_camera(
        &self,
        id: CameraId,
        changes: &CameraUpdate,
    ) -> RepositoryResult<Camera> {
        let mut state = self.state.write();
        let camera = state
            .cameras
            .get_mut(&id.value())
            .ok_or_else(|| Self::camera_not_found(id, "update_camera"))?;

        if let Some(ref name) = changes.name {
            camera.name = name.clone();
        }
        if let Some(ref location) = changes.location {
            camera.location = location.clone();
        }
        if let Some(status) = changes.status {
            camera.status = status;
        }
        if let Some(ref ip_address) = changes.ip_address {
            camera.ip_address = ip_address.clone();
        }
        Ok(camera.clone())
    }

    async fn delete_camera(&self, id: CameraId) -> RepositoryResult<()> {
        self.state
            .write()
            .cameras
            .remove(&id.value())
            .map(|_| ())
            .ok_or_else(|| Self::camera_not_found(id, "delete_camera"))
    }

    async fn count_cameras(&self) -> RepositoryResult<i64> {
        Ok(self.state.read().cameras.len() as i64)
    }

    async fn count_active_cameras(&self) -> RepositoryResult<i64> {
        Ok(self
            .state
            .read()
            .cameras
            .values()
            .filter(|c| c.status == CameraStatus::Active)
            .count() as i64)
    }
}

#[async_trait]
impl StatisticsRepository for LocalRepository {
    async fn fetch_statistics(&self) -> RepositoryResult<Statistics> {
        Ok(self.state.read().statistics.unwrap_or_default())
    }

    async fn upsert_statistics(&self, stats: &Statistics) -> RepositoryResult<()> {
        self.state.write().statistics = Some(*stats);
        Ok(())
    }
}

#[async_trait]
impl FullRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }
}
