//! HTTP server module for the WasteSpotter backend.
//!
//! This module provides an axum-based HTTP server that exposes the analysis
//! pipeline and the persistence layer as a REST API. It reuses the service
//! layer, the repository pattern, and the DTOs from the core library.
//!
//! # Architecture
//!
//! ```text
//! HTTP layer (axum handlers)
//!   - multipart upload parsing, JSON serialization
//!   - CORS, compression, error handling
//!         |
//! Service layer (services/, db/services.rs)
//!   - analysis pipeline, statistics consistency
//!         |
//! Repository layer (db/)
//!   - LocalRepository / PostgresRepository
//! ```

#[cfg(feature = "http-server")]
pub mod handlers;

#[cfg(feature = "http-server")]
pub mod router;

#[cfg(feature = "http-server")]
pub mod state;

#[cfg(feature = "http-server")]
pub mod error;

#[cfg(feature = "http-server")]
pub mod dto;

#[cfg(feature = "http-server")]
pub use router::create_router;

#[cfg(feature = "http-server")]
pub use state::AppState;
