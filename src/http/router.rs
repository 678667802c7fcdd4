//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Analysis
        .route("/analyze", post(handlers::analyze_image))
        .route("/batch-analyze", post(handlers::batch_analyze))
        // Reports CRUD
        .route(
            "/reports",
            get(handlers::list_reports).post(handlers::create_report),
        )
        .route(
            "/reports/{report_id}",
            get(handlers::get_report)
                .put(handlers::update_report)
                .delete(handlers::delete_report),
        )
        .route("/reports/{report_id}/image", get(handlers::get_report_image))
        // Cameras CRUD
        .route(
            "/cameras",
            get(handlers::list_cameras).post(handlers::add_camera),
        )
        .route(
            "/cameras/{camera_id}",
            get(handlers::get_camera)
                .put(handlers::update_camera)
                .delete(handlers::delete_camera),
        )
        // Statistics and dashboard
        .route("/statistics", get(handlers::get_statistics))
        .route("/statistics/update", post(handlers::update_statistics))
        .route("/dashboard/summary", get(handlers::dashboard_summary))
        // Annotated result images
        .nest_service("/results", ServeDir::new(state.storage.results_dir.clone()));

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api", api)
        // Allow large image payloads during uploads.
        .layer(DefaultBodyLimit::max(25 * 1024 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::config::StorageConfig;
    use crate::db::repositories::LocalRepository;
    use crate::inference::StaticDetectionClient;
    use crate::services::analyzer::Analyzer;

    #[test]
    fn test_router_creation() {
        let repo = Arc::new(LocalRepository::new())
            as Arc<dyn crate::db::repository::FullRepository>;
        let storage = StorageConfig::new("data/uploads", "data/results");
        let analyzer = Arc::new(Analyzer::new(
            Arc::new(StaticDetectionClient::default()),
            storage.clone(),
        ));
        let state = AppState::new(repo, analyzer, storage);
        let _router = create_router(state);
        // If we got here, router was created successfully
    }
}
