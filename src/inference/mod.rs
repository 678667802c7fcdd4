//! Client for the hosted object-detection service.
//!
//! The detection model is an external collaborator: it receives an image
//! and answers with predicted bounding boxes. Everything here is boundary
//! code: building the request, mapping transport and service failures, and
//! validating the dynamically-typed response into `Detection` records.

pub mod client;
pub mod error;

pub use client::{DetectionClient, HostedDetectionClient, StaticDetectionClient};
pub use error::InferenceError;
