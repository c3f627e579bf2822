//! Street View Static API client.
//!
//! Implements [`ImageryService`] over blocking HTTP. One session owns one
//! connection pool and is meant to live for a single route; dropping it
//! releases the pool.
//!
//! ## Metadata status mapping
//!
//! | status                              | result                  |
//! |-------------------------------------|-------------------------|
//! | `OK`                                | panorama                |
//! | `ZERO_RESULTS`, `NOT_FOUND`         | `NoPanorama` (final)    |
//! | `REQUEST_DENIED`, `INVALID_REQUEST` | `Rejected` (final)      |
//! | anything else                       | `InvalidResponse` (retried) |

use crate::config::ServiceConfig;
use crate::error::{DrishtiError, Result};
use marga::{GeodeticPoint, ImageSize, ImageryError, ImageryService, Panorama, RenderRequest};
use reqwest::Proxy;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, trace};

/// Metadata endpoint response body.
#[derive(Debug, Deserialize)]
struct MetadataResponse {
    status: String,
    #[serde(default)]
    pano_id: Option<String>,
    #[serde(default)]
    location: Option<MetadataLocation>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MetadataLocation {
    lat: f64,
    lng: f64,
}

/// HTTP session against the Street View endpoints.
pub struct StreetViewSession {
    client: Client,
    metadata_url: String,
    image_url: String,
    api_key: Option<String>,
    metadata_requests: usize,
    image_requests: usize,
}

impl StreetViewSession {
    /// Open a session with the configured user agent, timeout and proxies.
    pub fn open(config: &ServiceConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_millis(config.timeout_ms));

        if let Some(url) = &config.http_proxy {
            builder = builder.proxy(Proxy::http(url).map_err(|e| {
                DrishtiError::Config(format!("Invalid http_proxy {}: {}", url, e))
            })?);
        }
        if let Some(url) = &config.https_proxy {
            builder = builder.proxy(Proxy::https(url).map_err(|e| {
                DrishtiError::Config(format!("Invalid https_proxy {}: {}", url, e))
            })?);
        }

        let client = builder
            .build()
            .map_err(|e| DrishtiError::Config(format!("Failed to build HTTP client: {}", e)))?;

        debug!("Opened imagery session against {}", config.metadata_url);
        Ok(Self {
            client,
            metadata_url: config.metadata_url.clone(),
            image_url: config.image_url.clone(),
            api_key: config.api_key.clone(),
            metadata_requests: 0,
            image_requests: 0,
        })
    }

    fn get(&self, url: &str, params: &[(&str, String)]) -> std::result::Result<Vec<u8>, ImageryError> {
        let mut request = self.client.get(url).query(params);
        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key.as_str())]);
        }

        let response = request.send().map_err(transport_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ImageryError::Status(status.as_u16()));
        }
        let body = response.bytes().map_err(transport_error)?;
        trace!("GET {} -> {} bytes", url, body.len());
        Ok(body.to_vec())
    }
}

impl ImageryService for StreetViewSession {
    fn resolve_panorama(
        &mut self,
        location: GeodeticPoint,
    ) -> std::result::Result<Panorama, ImageryError> {
        self.metadata_requests += 1;
        let body = self.get(&self.metadata_url, &metadata_params(location))?;
        let response: MetadataResponse = serde_json::from_slice(&body)
            .map_err(|e| ImageryError::InvalidResponse(e.to_string()))?;
        interpret_metadata(response, location)
    }

    fn render_image(&mut self, request: &RenderRequest) -> std::result::Result<Vec<u8>, ImageryError> {
        self.image_requests += 1;
        let image = self.get(&self.image_url, &image_params(request))?;
        if image.is_empty() {
            return Err(ImageryError::InvalidResponse("empty image body".to_string()));
        }
        Ok(image)
    }
}

impl Drop for StreetViewSession {
    fn drop(&mut self) {
        debug!(
            "Released imagery session ({} metadata, {} image requests)",
            self.metadata_requests, self.image_requests
        );
    }
}

fn transport_error(e: reqwest::Error) -> ImageryError {
    match e.status() {
        Some(status) => ImageryError::Status(status.as_u16()),
        None => ImageryError::Transport(e.to_string()),
    }
}

/// Query for the panorama nearest `location`; pose fields are fixed.
fn metadata_params(location: GeodeticPoint) -> Vec<(&'static str, String)> {
    vec![
        ("size", ImageSize::MAX.to_string()),
        ("location", format!("{},{}", location.lat, location.lon)),
        ("fov", "90".to_string()),
        ("heading", "0".to_string()),
        ("pitch", "0".to_string()),
    ]
}

fn image_params(request: &RenderRequest) -> Vec<(&'static str, String)> {
    let size = request.size().unwrap_or(ImageSize::MAX);
    vec![
        ("size", size.to_string()),
        ("pano", request.pano_id().to_string()),
        ("fov", request.fov().to_string()),
        ("heading", request.heading().to_string()),
        ("pitch", request.pitch().to_string()),
    ]
}

fn interpret_metadata(
    response: MetadataResponse,
    query: GeodeticPoint,
) -> std::result::Result<Panorama, ImageryError> {
    let status = response.status;
    match status.as_str() {
        "OK" => {
            let id = response
                .pano_id
                .ok_or_else(|| ImageryError::InvalidResponse("OK without pano_id".to_string()))?;
            let location = response
                .location
                .map(|l| GeodeticPoint::new(l.lng, l.lat))
                .unwrap_or(query);
            Ok(Panorama { id, location })
        }
        "ZERO_RESULTS" | "NOT_FOUND" => Err(ImageryError::NoPanorama(query)),
        "REQUEST_DENIED" | "INVALID_REQUEST" => Err(ImageryError::Rejected(
            response.error_message.unwrap_or_else(|| status.clone()),
        )),
        other => Err(ImageryError::InvalidResponse(format!(
            "metadata status {}",
            other
        ))),
    }
}
