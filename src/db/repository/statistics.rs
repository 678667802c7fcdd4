//! Statistics repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::Statistics;

/// Repository trait for the single statistics cache row.
#[async_trait]
pub trait StatisticsRepository: Send + Sync {
    /// Read the cache row; a zeroed row when none has been written yet.
    async fn fetch_statistics(&self) -> RepositoryResult<Statistics>;

    /// Write the cache row, creating it on first use.
    async fn upsert_statistics(&self, stats: &Statistics) -> RepositoryResult<()>;
}
