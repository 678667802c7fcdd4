//! Database module for report, camera, and statistics storage.
//!
//! This module provides abstractions for database operations via the
//! Repository pattern, allowing different storage backends to be swapped
//! easily.
//!
//! # Architecture
//!
//! The database module follows a layered architecture:
//!
//! ```text
//! Application layer (HTTP handlers, analysis pipeline)
//!         |
//! Service layer (services.rs) - statistics cache consistency
//!         |
//! Repository traits (repository/) - abstract interface
//!         |
//! LocalRepository (in-memory) / PostgresRepository (Diesel)
//! ```
//!
//! # Recommended Usage
//!
//! Use the service layer from application code:
//! ```ignore
//! use wastespotter::db::{services, RepositoryFactory};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = RepositoryFactory::from_env().await?;
//!     let stats = services::get_statistics(repo.as_ref()).await?;
//!     Ok(())
//! }
//! ```
//!
//! The repository instance is injected through application state; there is
//! no process-wide singleton.

// Feature flag check: at least one backend must be compiled in.
#[cfg(not(any(feature = "postgres-repo", feature = "local-repo")))]
compile_error!("Enable at least one repository backend feature.");

pub mod checksum;
pub mod factory;
pub mod models;
pub mod repo_config;
pub mod repositories;
pub mod repository;
pub mod services;

#[cfg(test)]
#[path = "services_tests.rs"]
mod services_tests;

// Postgres config is colocated with the repository implementation.
#[cfg(feature = "postgres-repo")]
pub use repositories::postgres::PostgresConfig;
#[cfg(not(feature = "postgres-repo"))]
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    _private: (),
}

// ==================== Service Layer ====================

pub use services::DashboardSummary;

// ==================== Repository Pattern Exports ====================

pub use checksum::image_checksum;
pub use repo_config::RepositoryConfig;

pub use factory::{RepositoryFactory, RepositoryType};
pub use repositories::LocalRepository;
#[cfg(feature = "postgres-repo")]
pub use repositories::PostgresRepository;
pub use repository::{
    CameraRepository, ErrorContext, FullRepository, ReportRepository, RepositoryError,
    RepositoryResult, StatisticsRepository,
};
