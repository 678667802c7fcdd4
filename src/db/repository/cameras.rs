//! Camera repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{Camera, CameraId, CameraUpdate, NewCamera};

/// Repository trait for camera metadata.
#[async_trait]
pub trait CameraRepository: Send + Sync {
    /// Register a camera and return the stored row.
    async fn insert_camera(&self, new: &NewCamera) -> RepositoryResult<Camera>;

    /// Fetch a camera by id.
    async fn fetch_camera(&self, id: CameraId) -> RepositoryResult<Camera>;

    /// List all cameras.
    async fn list_cameras(&self) -> RepositoryResult<Vec<Camera>>;

    /// Apply a partial update and return the updated row.
    async fn update_camera(
        &self,
        id: CameraId,
        changes: &CameraUpdate,
    ) -> RepositoryResult<Camera>;

    /// Delete a camera by id.
    async fn delete_camera(&self, id: CameraId) -> RepositoryResult<()>;

    /// Total number of cameras.
    async fn count_cameras(&self) -> RepositoryResult<i64>;

    /// Number of cameras currently marked active.
    async fn count_active_cameras(&self) -> RepositoryResult<i64>;
}
