//! Collaborator interfaces for the street-imagery service and image storage.
//!
//! The planner never talks to the network or filesystem directly; it drives
//! an [`ImageryService`] and an [`ImageStore`] supplied by the caller. The
//! `drishti` application provides HTTP and directory-backed implementations.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::capture::Retryable;
use crate::core::GeodeticPoint;

/// Largest image edge the imagery service accepts (pixels).
pub const MAX_IMAGE_DIM: u32 = 640;

/// Imagery service failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImageryError {
    /// Network-level failure (connect, timeout, body read).
    #[error("Transport error: {0}")]
    Transport(String),

    /// Non-success HTTP status.
    #[error("Service returned status {0}")]
    Status(u16),

    /// Response body could not be interpreted.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// No panorama exists near the requested location.
    #[error("No panorama near {0}")]
    NoPanorama(GeodeticPoint),

    /// Request refused (bad key, malformed request).
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// Requested render size exceeds the service limit.
    #[error("Image size {width}x{height} exceeds 640x640")]
    ImageSize {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },
}

impl Retryable for ImageryError {
    fn is_transient(&self) -> bool {
        match self {
            ImageryError::Transport(_) | ImageryError::InvalidResponse(_) => true,
            ImageryError::Status(code) => *code == 429 || (500..600).contains(code),
            ImageryError::NoPanorama(_)
            | ImageryError::Rejected(_)
            | ImageryError::ImageSize { .. } => false,
        }
    }
}

/// Rendered image dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl ImageSize {
    /// Create a size, rejecting dimensions above [`MAX_IMAGE_DIM`].
    pub fn new(width: u32, height: u32) -> Result<Self, ImageryError> {
        let size = Self { width, height };
        size.validate()?;
        Ok(size)
    }

    /// Largest size the service accepts.
    pub const MAX: ImageSize = ImageSize {
        width: MAX_IMAGE_DIM,
        height: MAX_IMAGE_DIM,
    };

    /// Check the size against the service limit.
    pub fn validate(&self) -> Result<(), ImageryError> {
        if self.width > MAX_IMAGE_DIM || self.height > MAX_IMAGE_DIM {
            return Err(ImageryError::ImageSize {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A panorama resolved from a query location.
#[derive(Clone, Debug, PartialEq)]
pub struct Panorama {
    /// Opaque service identifier
    pub id: String,
    /// Where the panorama was actually captured
    pub location: GeodeticPoint,
}

/// Pose and size of one image to render from a panorama.
///
/// Construction validates the size, so an oversized request never reaches
/// an [`ImageryService`].
#[derive(Clone, Debug, PartialEq)]
pub struct RenderRequest {
    pano_id: String,
    heading: f64,
    pitch: f64,
    fov: f64,
    size: Option<ImageSize>,
}

impl RenderRequest {
    /// Build a render request.
    ///
    /// `size = None` leaves the dimensions to the service default.
    pub fn new(
        pano_id: impl Into<String>,
        heading: f64,
        pitch: f64,
        fov: f64,
        size: Option<ImageSize>,
    ) -> Result<Self, ImageryError> {
        if let Some(size) = &size {
            size.validate()?;
        }
        Ok(Self {
            pano_id: pano_id.into(),
            heading,
            pitch,
            fov,
            size,
        })
    }

    /// Panorama identifier
    pub fn pano_id(&self) -> &str {
        &self.pano_id
    }

    /// Compass heading in degrees [0, 360)
    pub fn heading(&self) -> f64 {
        self.heading
    }

    /// Pitch in degrees
    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    /// Horizontal field of view in degrees
    pub fn fov(&self) -> f64 {
        self.fov
    }

    /// Requested size, if any
    pub fn size(&self) -> Option<ImageSize> {
        self.size
    }
}

/// Street-imagery service.
///
/// Calls may block until the service answers. Implementations report
/// failures as [`ImageryError`]; retry policy is applied by the caller.
pub trait ImageryService {
    /// Find the panorama nearest to `location`.
    fn resolve_panorama(&mut self, location: GeodeticPoint) -> Result<Panorama, ImageryError>;

    /// Render one view of a panorama, returning encoded image bytes.
    fn render_image(&mut self, request: &RenderRequest) -> Result<Vec<u8>, ImageryError>;
}

/// Destination for captured images, keyed by file name.
pub trait ImageStore {
    /// Whether an image with this exact name already exists.
    fn contains(&self, name: &str) -> bool;

    /// Persist image bytes under `name`.
    fn save(&mut self, name: &str, image: &[u8]) -> std::io::Result<()>;
}
