//! Error types for detection-service calls.

use crate::models::detection::MalformedPrediction;

/// Error from the hosted detection service boundary.
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    /// Transport-level failure (DNS, connect, timeout).
    #[error("detection service request failed: {0}")]
    Network(String),

    /// The service answered with a non-success status.
    #[error("detection service returned status {status}: {body}")]
    Service { status: u16, body: String },

    /// The response payload could not be mapped into detections.
    #[error("malformed detection response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for InferenceError {
    fn from(err: reqwest::Error) -> Self {
        InferenceError::Network(err.to_string())
    }
}

impl From<MalformedPrediction> for InferenceError {
    fn from(err: MalformedPrediction) -> Self {
        InferenceError::MalformedResponse(err.to_string())
    }
}
