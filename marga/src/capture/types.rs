//! Panorama and capture records.

use serde::{Deserialize, Serialize};

use super::config::CaptureConfig;
use super::view::CaptureView;
use crate::core::GeodeticPoint;
use crate::imagery::{ImageryError, RenderRequest};

/// A unique panorama resolved for a route point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PanoramaRecord {
    /// Service identifier, unique within one route's output
    pub id: String,
    /// Where the panorama was captured (may differ from the query point)
    pub location: GeodeticPoint,
    /// Travel bearing of the source route point, degrees [0, 360)
    pub bearing_deg: f64,
    /// Index of the source point in the processed route
    pub point_index: usize,
}

impl PanoramaRecord {
    /// The three capture specs for this panorama.
    ///
    /// Output files are named after the source route point, which does not
    /// move when other points fail or succeed on a later run.
    pub fn capture_specs(&self, config: &CaptureConfig) -> [CaptureSpec; 3] {
        CaptureView::ALL.map(|view| CaptureSpec {
            filename: config.filename(self.point_index, view.index()),
            pano_id: self.id.clone(),
            location: self.location,
            view,
            heading: view.heading(self.bearing_deg),
            pitch: config.pitch,
            fov: config.fov,
        })
    }
}

/// One oriented image to capture from a panorama.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CaptureSpec {
    /// Output file name
    pub filename: String,
    /// Panorama to render from
    pub pano_id: String,
    /// Panorama location
    pub location: GeodeticPoint,
    /// Which view this is
    pub view: CaptureView,
    /// Compass heading in degrees [0, 360)
    pub heading: f64,
    /// Pitch in degrees
    pub pitch: f64,
    /// Field of view in degrees
    pub fov: f64,
}

impl CaptureSpec {
    /// Build the service request for this spec.
    ///
    /// Fails without contacting the service when the configured size is
    /// out of bounds.
    pub fn render_request(&self, config: &CaptureConfig) -> Result<RenderRequest, ImageryError> {
        RenderRequest::new(
            self.pano_id.as_str(),
            self.heading,
            self.pitch,
            self.fov,
            config.image_size,
        )
    }
}
