//! Point types for geodetic and local-frame coordinates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Geodetic coordinates (degrees, f64).
///
/// Field order follows the route files: longitude first, then latitude.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct GeodeticPoint {
    /// Longitude in degrees, positive east
    pub lon: f64,
    /// Latitude in degrees, positive north
    pub lat: f64,
}

impl GeodeticPoint {
    /// Create a new geodetic point
    #[inline]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Both components are finite numbers
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }
}

impl From<(f64, f64)> for GeodeticPoint {
    fn from((lon, lat): (f64, f64)) -> Self {
        Self::new(lon, lat)
    }
}

impl fmt::Display for GeodeticPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.7}, {:.7})", self.lon, self.lat)
    }
}

/// Local planar coordinates (meters, f64).
///
/// X points local east, Y points local north.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct LocalPoint {
    /// Easting in meters from the frame origin
    pub x: f64,
    /// Northing in meters from the frame origin
    pub y: f64,
}

impl LocalPoint {
    /// Create a new local point
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Frame origin
    pub const ZERO: LocalPoint = LocalPoint { x: 0.0, y: 0.0 };

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: &LocalPoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Angle of the displacement to another point (radians, CCW from local east)
    #[inline]
    pub fn angle_to(&self, other: &LocalPoint) -> f64 {
        let d = *other - *self;
        d.y.atan2(d.x)
    }

    /// Length of this point as a vector from origin
    #[inline]
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl Add for LocalPoint {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        LocalPoint::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for LocalPoint {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        LocalPoint::new(self.x - other.x, self.y - other.y)
    }
}
