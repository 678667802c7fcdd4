//! Diesel row types and conversions to domain models.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{cameras, reports, statistics};
use crate::api::{Camera, CameraId, Report, ReportId, Statistics};
use crate::db::repository::{RepositoryError, RepositoryResult};

/// The statistics table holds exactly one row.
pub const STATISTICS_ROW_ID: i32 = 1;

#[derive(Debug, Queryable, Identifiable)]
#[diesel(table_name = reports)]
pub struct ReportRow {
    pub id: i64,
    pub location: String,
    pub priority: String,
    pub status: String,
    pub ai_confidence: i32,
    pub reported_at: DateTime<Utc>,
    pub image_data: Option<Vec<u8>>,
    pub image_name: Option<String>,
}

impl ReportRow {
    pub fn into_domain(self) -> RepositoryResult<Report> {
        Ok(Report {
            id: ReportId::new(self.id),
            location: self.location,
            priority: self.priority.parse().map_err(RepositoryError::validation)?,
            status: self.status.parse().map_err(RepositoryError::validation)?,
            ai_confidence: self.ai_confidence,
            reported_at: self.reported_at,
            image_data: self.image_data,
            image_name: self.image_name,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = reports)]
pub struct NewReportRow {
    pub location: String,
    pub priority: String,
    pub status: String,
    pub ai_confidence: i32,
    pub image_data: Option<Vec<u8>>,
    pub image_name: Option<String>,
}

#[derive(Debug, Default, AsChangeset)]
#[diesel(table_name = reports)]
pub struct ReportChangeset {
    pub location: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub ai_confidence: Option<i32>,
}

#[derive(Debug, Queryable, Identifiable)]
#[diesel(table_name = cameras)]
pub struct CameraRow {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub status: String,
    pub ip_address: String,
}

impl CameraRow {
    pub fn into_domain(self) -> RepositoryResult<Camera> {
        Ok(Camera {
            id: CameraId::new(self.id),
            name: self.name,
            location: self.location,
            status: self.status.parse().map_err(RepositoryError::validation)?,
            ip_address: self.ip_address,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = cameras)]
pub struct NewCameraRow {
    pub name: String,
    pub location: String,
    pub status: String,
    pub ip_address: String,
}

#[derive(Debug, Default, AsChangeset)]
#[diesel(table_name = cameras)]
pub struct CameraChangeset {
    pub name: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    pub ip_address: Option<String>,
}

#[derive(Debug, Queryable, Identifiable, Insertable)]
#[diesel(table_name = statistics)]
pub struct StatisticsRow {
    pub id: i32,
    pub images_analyzed: i64,
    pub waste_detected: i64,
    pub average_confidence: i64,
    pub detection_rate: i64,
}

impl StatisticsRow {
    pub fn from_domain(stats: &Statistics) -> Self {
        Self {
            id: STATISTICS_ROW_ID,
            images_analyzed: stats.images_analyzed,
            waste_detected: stats.waste_detected,
            average_confidence: stats.average_confidence,
            detection_rate: stats.detection_rate,
        }
    }

    pub fn into_domain(self) -> Statistics {
        Statistics {
            images_analyzed: self.images_analyzed,
            waste_detected: self.waste_detected,
            average_confidence: self.average_confidence,
            detection_rate: self.detection_rate,
        }
    }
}
