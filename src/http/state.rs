//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::StorageConfig;
use crate::db::repository::FullRepository;
use crate::services::analyzer::Analyzer;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for database operations
    pub repository: Arc<dyn FullRepository>,
    /// Analysis pipeline (detection client + annotated result storage)
    pub analyzer: Arc<Analyzer>,
    /// Filesystem layout for uploads and annotated results
    pub storage: StorageConfig,
}

impl AppState {
    /// Create a new application state.
    pub fn new(
        repository: Arc<dyn FullRepository>,
        analyzer: Arc<Analyzer>,
        storage: StorageConfig,
    ) -> Self {
        Self {
            repository,
            analyzer,
            storage,
        }
    }
}
