//! Capture planner configuration.

use serde::{Deserialize, Serialize};

use super::retry::RetryPolicy;
use crate::imagery::ImageSize;

/// Configuration for [`CapturePlanner`](super::CapturePlanner).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Camera pitch in degrees (default: 0, level)
    #[serde(default = "default_pitch")]
    pub pitch: f64,

    /// Horizontal field of view in degrees (default: 90)
    #[serde(default = "default_fov")]
    pub fov: f64,

    /// Render size; `None` leaves it to the service (at most 640x640)
    #[serde(default)]
    pub image_size: Option<ImageSize>,

    /// File name prefix (default: "gsv")
    #[serde(default = "default_filename_prefix")]
    pub filename_prefix: String,

    /// File name extension without the dot (default: "jpg")
    #[serde(default = "default_image_extension")]
    pub image_extension: String,

    /// Retry policy for metadata and render calls
    #[serde(default)]
    pub retry: RetryPolicy,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            pitch: default_pitch(),
            fov: default_fov(),
            image_size: None,
            filename_prefix: default_filename_prefix(),
            image_extension: default_image_extension(),
            retry: RetryPolicy::default(),
        }
    }
}

impl CaptureConfig {
    /// File name for view `view_index` of the panorama resolved at route
    /// point `point_index`.
    pub fn filename(&self, point_index: usize, view_index: usize) -> String {
        format!(
            "{}_{}_{}.{}",
            self.filename_prefix, point_index, view_index, self.image_extension
        )
    }
}

fn default_pitch() -> f64 {
    0.0
}
fn default_fov() -> f64 {
    90.0
}
fn default_filename_prefix() -> String {
    "gsv".to_string()
}
fn default_image_extension() -> String {
    "jpg".to_string()
}
