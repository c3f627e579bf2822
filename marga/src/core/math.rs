//! Angle utilities for bearings and capture headings.
//!
//! Two conventions meet here:
//! - Local-frame angles: radians, counter-clockwise from local east (atan2)
//! - Compass bearings: clockwise from local north, radians internally and
//!   degrees at the imagery interface

use std::f64::consts::{FRAC_PI_2, PI};

use super::point::LocalPoint;

/// Two times PI (full circle in radians).
pub const TWO_PI: f64 = 2.0 * PI;

/// Full circle in degrees.
pub const FULL_TURN_DEG: f64 = 360.0;

/// Convert an angle measured CCW from local east into a compass bearing.
///
/// ```text
/// θ ≤ π/2:  φ = π/2 − θ
/// θ > π/2:  φ = 2π − (θ − π/2)
/// ```
///
/// For θ from `atan2` (range (−π, π]) the result is in [0, 2π).
///
/// # Example
/// ```
/// use marga::core::math::compass_bearing;
/// use std::f64::consts::{FRAC_PI_2, PI};
///
/// assert!(compass_bearing(FRAC_PI_2).abs() < 1e-12);          // north
/// assert!((compass_bearing(0.0) - FRAC_PI_2).abs() < 1e-12);  // east
/// assert!((compass_bearing(-FRAC_PI_2) - PI).abs() < 1e-12);  // south
/// assert!((compass_bearing(PI) - 1.5 * PI).abs() < 1e-12);    // west
/// ```
#[inline]
pub fn compass_bearing(theta: f64) -> f64 {
    let phi = if theta <= FRAC_PI_2 {
        FRAC_PI_2 - theta
    } else {
        TWO_PI - (theta - FRAC_PI_2)
    };
    // θ a hair above π/2 rounds to exactly 2π
    if phi >= TWO_PI { phi - TWO_PI } else { phi }
}

/// Compass bearing of the displacement from `from` to `to` (radians).
#[inline]
pub fn bearing_between(from: &LocalPoint, to: &LocalPoint) -> f64 {
    compass_bearing(from.angle_to(to))
}

/// Convert degrees to radians.
#[inline]
pub fn deg_to_rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

/// Convert radians to degrees.
#[inline]
pub fn rad_to_deg(rad: f64) -> f64 {
    rad * 180.0 / PI
}

/// Convert a compass bearing in [0, 2π) to degrees in [0, 360).
///
/// The multiplication can round a bearing just below 2π up to exactly 360;
/// that case folds back to 0.
#[inline]
pub fn bearing_to_degrees(bearing: f64) -> f64 {
    let deg = rad_to_deg(bearing);
    if deg >= FULL_TURN_DEG { deg - FULL_TURN_DEG } else { deg }
}

/// Fold a heading back into [0, 360) with one conditional subtraction.
///
/// Only valid for inputs in [0, 720): a bearing in [0, 360) plus an offset
/// of at most 360. Values outside that range are a caller bug.
///
/// # Example
/// ```
/// use marga::core::math::wrap_heading;
///
/// assert_eq!(wrap_heading(350.0), 350.0);
/// assert_eq!(wrap_heading(440.0), 80.0);
/// assert_eq!(wrap_heading(360.0), 0.0);
/// ```
#[inline]
pub fn wrap_heading(heading: f64) -> f64 {
    debug_assert!(
        (0.0..2.0 * FULL_TURN_DEG).contains(&heading),
        "heading {heading} outside single-wrap range"
    );
    if heading >= FULL_TURN_DEG {
        heading - FULL_TURN_DEG
    } else {
        heading
    }
}

/// Signed smallest difference between two compass headings (degrees).
///
/// Result in (−180, 180]; positive means `to` is clockwise of `from`.
#[inline]
pub fn heading_diff(from: f64, to: f64) -> f64 {
    let d = (to - from).rem_euclid(FULL_TURN_DEG);
    if d > 180.0 { d - FULL_TURN_DEG } else { d }
}
