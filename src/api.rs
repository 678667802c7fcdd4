//! Public API surface for the backend.
//!
//! This file consolidates the identifier newtypes and re-exports the domain
//! types so consumers can reach everything through one path.

pub use crate::models::detection::Detection;
pub use crate::models::report::{
    Camera, CameraStatus, CameraUpdate, NewCamera, NewReport, Priority, Report, ReportFilter,
    ReportStatus, ReportUpdate, Statistics,
};
pub use crate::services::fullness::{FullnessResult, FullnessStatus, Urgency};

use serde::{Deserialize, Serialize};

/// Report identifier (database primary key).
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ReportId(pub i64);

/// Camera identifier (database primary key).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CameraId(pub i64);

impl ReportId {
    pub fn new(value: i64) -> Self {
        ReportId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl CameraId {
    pub fn new(value: i64) -> Self {
        CameraId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ReportId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for CameraId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
