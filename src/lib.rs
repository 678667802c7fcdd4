//! # WasteSpotter Backend
//!
//! Waste-detection analysis backend.
//!
//! This crate provides a Rust backend for the WasteSpotter reporting system:
//! uploaded images are forwarded to a hosted object-detection service, the
//! detected bounding boxes drive a fullness/urgency classification, and
//! noteworthy results are persisted as reports together with a rolling
//! aggregate statistics row. The backend exposes a REST API via Axum for the
//! React frontend.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: identifier newtypes and the public type surface
//! - [`models`]: domain records (detections, reports, cameras, statistics)
//! - [`inference`]: client for the hosted detection service
//! - [`services`]: fullness classifier, report policy, statistics, pipeline
//! - [`db`]: database operations, repository pattern, and persistence layer
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! ## Storage backends
//!
//! Persistence goes through the repository traits in [`db::repository`],
//! with an in-memory `LocalRepository` (default; tests and local
//! development) and a Diesel-backed `PostgresRepository` behind the
//! `postgres-repo` feature.

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;
pub mod config;

pub mod db;
pub mod inference;
pub mod models;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
