//! # Marga: Route Geometry for Street-Level Capture
//!
//! Turns a GPS route into a set of oriented panorama captures: three views
//! (forward, right, back) per waypoint and a manifest row for each image.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use marga::{CaptureConfig, CapturePlanner, GeodeticPoint, RouteProcessor};
//!
//! let route = RouteProcessor::with_defaults().process(&raw_points)?;
//!
//! // `service` implements ImageryService, `store` implements ImageStore
//! let planner = CapturePlanner::new(CaptureConfig::default());
//! let capture = planner.run(&route, &mut service, &mut store);
//!
//! for row in &capture.rows {
//!     println!("{}", row);
//! }
//! ```
//!
//! ## Coordinate Frame
//!
//! Each route is projected into its own local planar frame:
//! - **Origin**: the first point of the route, fixed for the whole route
//! - **X**: local east, meters
//! - **Y**: local north, meters
//!
//! Bearings are compass bearings: clockwise from local north, radians
//! [0, 2π) inside a [`Route`], degrees [0, 360) from capture planning on.
//!
//! ## Data Flow
//!
//! ```text
//!   geodetic points
//!         │ LocalFrame::to_local_all
//!         ▼
//!   local points ──► keep mask ──► travel bearings ──► Route
//!                                                        │
//!                      ImageryService::resolve_panorama ◄┤
//!                                                        ▼
//!                                            PanoramaRecord (unique ids)
//!                                                        │ derive_headings
//!                                                        ▼
//!                         3 × CaptureSpec ──► ImageStore / render_image
//!                                                        │
//!                                                        ▼
//!                                                   ManifestRow
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Geodetic/local point types, local frame, angle helpers
//! - [`route`]: Deduplication, bearings, [`RouteProcessor`]
//! - [`capture`]: Views, retry, manifest, [`CapturePlanner`]
//! - [`imagery`]: Collaborator traits for the imagery service and image store

#![warn(missing_docs)]

// Foundation
pub mod core;

// Route geometry
pub mod route;

// Collaborator interfaces
pub mod imagery;

// Capture planning
pub mod capture;

// Re-export commonly used types
pub use crate::core::{GeodeticPoint, LocalFrame, LocalPoint};

pub use route::{Route, RouteConfig, RouteError, RoutePoint, RouteProcessor};

pub use imagery::{
    ImageSize, ImageStore, ImageryError, ImageryService, MAX_IMAGE_DIM, Panorama, RenderRequest,
};

pub use capture::{
    CaptureConfig, CaptureFailure, CapturePlanner, CaptureSpec, CaptureView, FailureStage,
    ManifestRow, ManifestWriter, PanoramaRecord, RetryPolicy, RouteCapture, derive_headings,
    with_retry,
};
