//! Configuration loading for Drishti

use crate::error::{DrishtiError, Result};
use marga::{CaptureConfig, RouteConfig};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable consulted when neither flag nor file sets an API key.
pub const API_KEY_ENV: &str = "STREETVIEW_API_KEY";

/// Main configuration structure
#[derive(Clone, Debug, Default, Deserialize)]
pub struct DrishtiConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub route: RouteConfig,
    #[serde(default)]
    pub capture: CaptureConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Street-imagery service settings
#[derive(Clone, Debug, Deserialize)]
pub struct ServiceConfig {
    /// Panorama metadata endpoint
    #[serde(default = "default_metadata_url")]
    pub metadata_url: String,

    /// Image render endpoint
    #[serde(default = "default_image_url")]
    pub image_url: String,

    /// API key (`--api-key` wins; STREETVIEW_API_KEY is the fallback)
    #[serde(default)]
    pub api_key: Option<String>,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in milliseconds (default: 10000)
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,

    /// Proxy for plain HTTP requests
    #[serde(default)]
    pub http_proxy: Option<String>,

    /// Proxy for HTTPS requests
    #[serde(default)]
    pub https_proxy: Option<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            metadata_url: default_metadata_url(),
            image_url: default_image_url(),
            api_key: None,
            user_agent: default_user_agent(),
            timeout_ms: default_timeout(),
            http_proxy: None,
            https_proxy: None,
        }
    }
}

/// Output configuration
#[derive(Clone, Debug, Deserialize)]
pub struct OutputConfig {
    /// Root directory; each route gets a `route_<k>` subdirectory
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    /// Manifest file name inside each route directory
    #[serde(default = "default_manifest_name")]
    pub manifest_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            manifest_name: default_manifest_name(),
        }
    }
}

// Default value functions
fn default_metadata_url() -> String {
    "https://maps.googleapis.com/maps/api/streetview/metadata".to_string()
}
fn default_image_url() -> String {
    "https://maps.googleapis.com/maps/api/streetview".to_string()
}
fn default_user_agent() -> String {
    format!("drishti/{}", env!("CARGO_PKG_VERSION"))
}
fn default_timeout() -> u64 {
    10_000
}
fn default_directory() -> PathBuf {
    PathBuf::from("output")
}
fn default_manifest_name() -> String {
    "manifest.txt".to_string()
}

impl DrishtiConfig {
    /// Load and validate configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| DrishtiError::Config(format!("Failed to read config file: {}", e)))?;
        let config: DrishtiConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would fail every request.
    pub fn validate(&self) -> Result<()> {
        if let Some(size) = &self.capture.image_size {
            size.validate()
                .map_err(|e| DrishtiError::Config(format!("capture.image_size: {}", e)))?;
        }
        if self.capture.retry.max_attempts == 0 {
            return Err(DrishtiError::Config(
                "retry.max_attempts must be at least 1".to_string(),
            ));
        }
        if !(self.route.min_separation.is_finite() && self.route.min_separation >= 0.0) {
            return Err(DrishtiError::Config(format!(
                "min_separation must be a non-negative distance, got {}",
                self.route.min_separation
            )));
        }
        Ok(())
    }

    /// Settle the API key: command line, then file, then environment.
    pub fn resolve_api_key(&mut self, from_cli: Option<String>, from_env: Option<String>) {
        let file = self.service.api_key.take();
        self.service.api_key = [from_cli, file, from_env]
            .into_iter()
            .flatten()
            .find(|key| !key.is_empty());
    }

    /// Output directory of the `route_index`-th route in the file.
    pub fn route_dir(&self, route_index: usize) -> PathBuf {
        self.output.directory.join(format!("route_{}", route_index))
    }
}
