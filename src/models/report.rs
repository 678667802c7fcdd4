//! Persisted entities: reports, cameras, and the statistics cache row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::api::{CameraId, ReportId};

/// Workflow priority assigned to a report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

/// Workflow state of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportStatus {
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReportStatus::Pending => "Pending",
            ReportStatus::InProgress => "In Progress",
            ReportStatus::Resolved => "Resolved",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for ReportStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(ReportStatus::Pending),
            "in progress" | "in_progress" => Ok(ReportStatus::InProgress),
            "resolved" => Ok(ReportStatus::Resolved),
            _ => Err(format!("Unknown report status: {}", s)),
        }
    }
}

/// Whether a camera is currently in service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CameraStatus {
    Active,
    Inactive,
}

impl fmt::Display for CameraStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CameraStatus::Active => "Active",
            CameraStatus::Inactive => "Inactive",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for CameraStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(CameraStatus::Active),
            "inactive" => Ok(CameraStatus::Inactive),
            _ => Err(format!("Unknown camera status: {}", s)),
        }
    }
}

/// A persisted waste report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub id: ReportId,
    pub location: String,
    pub priority: Priority,
    pub status: ReportStatus,
    /// Detection confidence as an integer percentage
    pub ai_confidence: i32,
    pub reported_at: DateTime<Utc>,
    /// Annotated image bytes; carried out-of-band in API responses
    #[serde(skip)]
    pub image_data: Option<Vec<u8>>,
    pub image_name: Option<String>,
}

impl Report {
    pub fn has_image(&self) -> bool {
        self.image_data.is_some()
    }
}

/// Fields for creating a report.
#[derive(Debug, Clone)]
pub struct NewReport {
    pub location: String,
    pub priority: Priority,
    pub status: ReportStatus,
    pub ai_confidence: i32,
    pub image_data: Option<Vec<u8>>,
    pub image_name: Option<String>,
}

/// Partial report update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct ReportUpdate {
    pub location: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<ReportStatus>,
    pub ai_confidence: Option<i32>,
}

impl ReportUpdate {
    pub fn is_empty(&self) -> bool {
        self.location.is_none()
            && self.priority.is_none()
            && self.status.is_none()
            && self.ai_confidence.is_none()
    }
}

/// Listing filter; `None` matches everything.
#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    pub status: Option<ReportStatus>,
    pub priority: Option<Priority>,
    pub limit: Option<i64>,
}

/// Camera metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    pub id: CameraId,
    pub name: String,
    pub location: String,
    pub status: CameraStatus,
    pub ip_address: String,
}

/// Fields for registering a camera.
#[derive(Debug, Clone)]
pub struct NewCamera {
    pub name: String,
    pub location: String,
    pub status: CameraStatus,
    pub ip_address: String,
}

/// Partial camera update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct CameraUpdate {
    pub name: Option<String>,
    pub location: Option<String>,
    pub status: Option<CameraStatus>,
    pub ip_address: Option<String>,
}

impl CameraUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.location.is_none()
            && self.status.is_none()
            && self.ip_address.is_none()
    }
}

/// Rolling aggregate statistics derived from the report set.
///
/// This row is a cache of [`crate::services::statistics::recompute`] over
/// the current reports, never a source of truth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    /// Reports carrying image data
    pub images_analyzed: i64,
    /// Reports with ai_confidence above zero
    pub waste_detected: i64,
    /// Truncated integer mean of ai_confidence over all reports
    pub average_confidence: i64,
    /// Integer percentage of detected reports over all reports
    pub detection_rate: i64,
}
