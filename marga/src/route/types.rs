//! Processed route types.

use serde::{Deserialize, Serialize};

use crate::core::math::bearing_to_degrees;
use crate::core::{GeodeticPoint, LocalFrame, LocalPoint};

/// A retained waypoint with its local position and travel bearing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoutePoint {
    /// Position as ingested.
    pub geodetic: GeodeticPoint,
    /// Position in the route's local frame (meters).
    pub local: LocalPoint,
    /// Travel bearing in radians [0, 2π), clockwise from local north.
    pub bearing: f64,
}

impl RoutePoint {
    /// Travel bearing in degrees [0, 360).
    #[inline]
    pub fn bearing_degrees(&self) -> f64 {
        bearing_to_degrees(self.bearing)
    }
}

/// An ordered, deduplicated route sharing one local frame.
///
/// Order is traversal order; adjacent points define direction of travel.
#[derive(Clone, Debug)]
pub struct Route {
    frame: LocalFrame,
    points: Vec<RoutePoint>,
    raw_len: usize,
}

impl Route {
    pub(crate) fn new(frame: LocalFrame, points: Vec<RoutePoint>, raw_len: usize) -> Self {
        Self {
            frame,
            points,
            raw_len,
        }
    }

    /// Local frame the route was projected into (origin = first input point).
    #[inline]
    pub fn frame(&self) -> &LocalFrame {
        &self.frame
    }

    /// Retained points in traversal order.
    #[inline]
    pub fn points(&self) -> &[RoutePoint] {
        &self.points
    }

    /// Iterate over retained points.
    pub fn iter(&self) -> std::slice::Iter<'_, RoutePoint> {
        self.points.iter()
    }

    /// Number of retained points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the route has no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of points before deduplication.
    #[inline]
    pub fn raw_len(&self) -> usize {
        self.raw_len
    }

    /// Number of points removed by deduplication.
    #[inline]
    pub fn removed(&self) -> usize {
        self.raw_len - self.points.len()
    }

    /// Total polyline length in local-frame meters.
    pub fn length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| w[0].local.distance(&w[1].local))
            .sum()
    }
}

impl<'a> IntoIterator for &'a Route {
    type Item = &'a RoutePoint;
    type IntoIter = std::slice::Iter<'a, RoutePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
