//! Runtime configuration for the analysis pipeline.
//!
//! Detection-service credentials and storage paths are explicit
//! configuration structs passed into each component at construction;
//! nothing reads them from process-wide state after startup.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::db::checksum::image_checksum;

/// Configuration for the hosted detection service.
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    /// Base URL of the inference API
    pub api_url: String,
    /// API key sent with every request
    pub api_key: String,
    /// Model identifier, e.g. "garbage-can-overflow/1"
    pub model_id: String,
    /// Request timeout
    pub timeout: Duration,
}

impl InferenceConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `DETECTION_API_URL`: Base URL of the inference API (required)
    /// - `DETECTION_API_KEY`: API key (required)
    /// - `DETECTION_MODEL_ID`: Model identifier (required)
    /// - `DETECTION_TIMEOUT_SEC`: Request timeout in seconds (default: 30)
    pub fn from_env() -> Result<Self, String> {
        let api_url = std::env::var("DETECTION_API_URL")
            .map_err(|_| "DETECTION_API_URL must be set".to_string())?;

        let api_key = std::env::var("DETECTION_API_KEY")
            .map_err(|_| "DETECTION_API_KEY must be set".to_string())?;

        let model_id = std::env::var("DETECTION_MODEL_ID")
            .map_err(|_| "DETECTION_MODEL_ID must be set".to_string())?;

        let timeout_sec = std::env::var("DETECTION_TIMEOUT_SEC")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30);

        Ok(Self {
            api_url,
            api_key,
            model_id,
            timeout: Duration::from_secs(timeout_sec),
        })
    }
}

/// Filesystem layout for uploaded and annotated images.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory raw uploads are written to
    pub upload_dir: PathBuf,
    /// Directory annotated result images are written to
    pub results_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(upload_dir: impl Into<PathBuf>, results_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            results_dir: results_dir.into(),
        }
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `UPLOAD_DIR`: Upload directory (default: data/uploads)
    /// - `RESULTS_DIR`: Annotated results directory (default: data/results)
    pub fn from_env() -> Self {
        let upload_dir = std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "data/uploads".to_string());
        let results_dir =
            std::env::var("RESULTS_DIR").unwrap_or_else(|_| "data/results".to_string());
        Self::new(upload_dir, results_dir)
    }

    /// Create both directories if they do not exist yet.
    pub fn ensure_dirs(&self) -> io::Result<()> {
        std::fs::create_dir_all(&self.upload_dir)?;
        std::fs::create_dir_all(&self.results_dir)
    }

    /// Write an upload under its content checksum.
    ///
    /// Identical uploads deduplicate to a single file.
    pub fn save_upload(&self, bytes: &[u8], extension: &str) -> io::Result<PathBuf> {
        let filename = format!("{}.{}", image_checksum(bytes), extension);
        let path = self.upload_dir.join(filename);
        std::fs::write(&path, bytes)?;
        Ok(path)
    }

    /// Full path of an annotated result image.
    pub fn result_path(&self, filename: &str) -> PathBuf {
        self.results_dir.join(filename)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(Path::new("data/uploads"), Path::new("data/results"))
    }
}
