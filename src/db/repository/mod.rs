//! Repository trait definitions.
//!
//! The persistence layer is consumed through these traits so storage
//! backends can be swapped: in-memory for unit tests and local development,
//! Postgres in production.

pub mod cameras;
pub mod error;
pub mod reports;
pub mod statistics;

pub use cameras::CameraRepository;
pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use reports::ReportRepository;
pub use statistics::StatisticsRepository;

use async_trait::async_trait;

/// Combined repository surface required by the application.
#[async_trait]
pub trait FullRepository: ReportRepository + CameraRepository + StatisticsRepository {
    /// Check that the backing store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;
}
