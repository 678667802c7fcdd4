//! Detection client trait and implementations.

use async_trait::async_trait;
use base64::Engine;
use log::debug;

use super::error::InferenceError;
use crate::config::InferenceConfig;
use crate::models::detection::{parse_prediction_payload, Detection};

/// Object-detection service consumed by the analysis pipeline.
#[async_trait]
pub trait DetectionClient: Send + Sync {
    /// Run inference on raw image bytes and return validated detections.
    async fn infer(&self, image: &[u8]) -> Result<Vec<Detection>, InferenceError>;
}

/// Client for a hosted inference HTTP API.
///
/// Posts the base64-encoded image to `{api_url}/{model_id}?api_key=...`.
/// There is no automatic retry: a failed call surfaces to the caller as a
/// request-level failure.
pub struct HostedDetectionClient {
    client: reqwest::Client,
    config: InferenceConfig,
}

impl HostedDetectionClient {
    pub fn new(config: InferenceConfig) -> Result<Self, InferenceError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| InferenceError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl DetectionClient for HostedDetectionClient {
    async fn infer(&self, image: &[u8]) -> Result<Vec<Detection>, InferenceError> {
        let url = format!(
            "{}/{}?api_key={}",
            self.config.api_url.trim_end_matches('/'),
            self.config.model_id,
            self.config.api_key
        );
        let body = base64::engine::general_purpose::STANDARD.encode(image);

        debug!(
            "posting {} image bytes to detection model {}",
            image.len(),
            self.config.model_id
        );

        let response = self
            .client
            .post(&url)
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InferenceError::Service {
                status: status.as_u16(),
                body,
            });
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| InferenceError::MalformedResponse(e.to_string()))?;

        Ok(parse_prediction_payload(&payload)?)
    }
}

/// Client returning a fixed detection list; used by tests and offline runs.
#[derive(Debug, Clone, Default)]
pub struct StaticDetectionClient {
    detections: Vec<Detection>,
}

impl StaticDetectionClient {
    pub fn new(detections: Vec<Detection>) -> Self {
        Self { detections }
    }
}

#[async_trait]
impl DetectionClient for StaticDetectionClient {
    async fn infer(&self, _image: &[u8]) -> Result<Vec<Detection>, InferenceError> {
        Ok(self.detections.clone())
    }
}
