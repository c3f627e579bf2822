//! Core types for the marga route library.
//!
//! This module provides the fundamental types used throughout the library:
//! - [`GeodeticPoint`]: WGS84 longitude/latitude in degrees
//! - [`LocalPoint`]: Position in the route's local planar frame (meters)
//! - [`LocalFrame`]: Geodetic to local-frame transform anchored at an origin
//! - [`math`]: Bearing and heading helpers

mod frame;
mod point;

pub mod math;

pub use frame::{EARTH_RADIUS_M, LocalFrame};
pub use point::{GeodeticPoint, LocalPoint};
