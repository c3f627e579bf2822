//! Geodetic to local planar frame transform.
//!
//! Small-extent equirectangular projection around a fixed origin:
//!
//! ```text
//! x = R * Δlon * cos(lat₀)      (east, meters)
//! y = R * Δlat                  (north, meters)
//! ```
//!
//! Accurate to well under a centimeter over the few hundred meters a single
//! route covers. Not a geodesic transform; do not use it across cities.

use std::f64::consts::PI;

use super::point::{GeodeticPoint, LocalPoint};

/// WGS84 semi-major axis in meters.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Local planar frame anchored at a geodetic origin.
///
/// The origin maps to exactly (0, 0). All points of one route must be
/// converted with the same frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalFrame {
    origin: GeodeticPoint,
    /// Meters per degree of longitude at the origin latitude
    meters_per_deg_lon: f64,
    /// Meters per degree of latitude
    meters_per_deg_lat: f64,
}

impl LocalFrame {
    /// Create a frame anchored at `origin`.
    pub fn new(origin: GeodeticPoint) -> Self {
        let meters_per_deg_lat = EARTH_RADIUS_M * PI / 180.0;
        let meters_per_deg_lon = meters_per_deg_lat * origin.lat.to_radians().cos();
        Self {
            origin,
            meters_per_deg_lon,
            meters_per_deg_lat,
        }
    }

    /// The frame origin.
    #[inline]
    pub fn origin(&self) -> GeodeticPoint {
        self.origin
    }

    /// Convert a geodetic point into this frame.
    #[inline]
    pub fn to_local(&self, point: GeodeticPoint) -> LocalPoint {
        LocalPoint::new(
            (point.lon - self.origin.lon) * self.meters_per_deg_lon,
            (point.lat - self.origin.lat) * self.meters_per_deg_lat,
        )
    }

    /// Convert a sequence of geodetic points, preserving order.
    pub fn to_local_all(&self, points: &[GeodeticPoint]) -> Vec<LocalPoint> {
        points.iter().map(|&p| self.to_local(p)).collect()
    }

    /// Convert a local point back to geodetic coordinates.
    ///
    /// Inverse of [`to_local`](Self::to_local) except at the poles, where the
    /// longitude scale collapses and the origin longitude is returned.
    #[inline]
    pub fn to_geodetic(&self, point: LocalPoint) -> GeodeticPoint {
        let lon = if self.meters_per_deg_lon.abs() > f64::EPSILON {
            self.origin.lon + point.x / self.meters_per_deg_lon
        } else {
            self.origin.lon
        };
        GeodeticPoint::new(lon, self.origin.lat + point.y / self.meters_per_deg_lat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_origin_maps_to_zero() {
        let origin = GeodeticPoint::new(-122.419_415_5, 37.774_929_5);
        let frame = LocalFrame::new(origin);

        let local = frame.to_local(origin);
        assert_eq!(local, LocalPoint::ZERO);
    }

    #[test]
    fn test_axes_east_and_north() {
        let frame = LocalFrame::new(GeodeticPoint::new(10.0, 45.0));

        let east = frame.to_local(GeodeticPoint::new(10.001, 45.0));
        assert!(east.x > 0.0);
        assert_relative_eq!(east.y, 0.0, epsilon = 1e-9);

        let north = frame.to_local(GeodeticPoint::new(10.0, 45.001));
        assert!(north.y > 0.0);
        assert_relative_eq!(north.x, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_equator_scale() {
        // One thousandth of a degree at the equator is ~111.3m on both axes
        let frame = LocalFrame::new(GeodeticPoint::new(0.0, 0.0));
        let p = frame.to_local(GeodeticPoint::new(0.001, 0.001));
        assert_relative_eq!(p.x, 111.319_49, epsilon = 1e-3);
        assert_relative_eq!(p.y, 111.319_49, epsilon = 1e-3);
    }

    #[test]
    fn test_longitude_shrinks_with_latitude() {
        let frame = LocalFrame::new(GeodeticPoint::new(0.0, 60.0));
        let p = frame.to_local(GeodeticPoint::new(0.001, 60.0));
        // cos(60°) = 0.5
        assert_relative_eq!(p.x, 111.319_49 * 0.5, epsilon = 1e-3);
    }

    #[test]
    fn test_roundtrip_to_geodetic() {
        let frame = LocalFrame::new(GeodeticPoint::new(2.294_5, 48.858_4));
        let target = GeodeticPoint::new(2.295_1, 48.859_0);

        let back = frame.to_geodetic(frame.to_local(target));
        assert_relative_eq!(back.lon, target.lon, epsilon = 1e-12);
        assert_relative_eq!(back.lat, target.lat, epsilon = 1e-12);
    }

    #[test]
    fn test_to_local_all_preserves_order() {
        let origin = GeodeticPoint::new(0.0, 0.0);
        let frame = LocalFrame::new(origin);
        let points = [origin, GeodeticPoint::new(0.0, 0.001), GeodeticPoint::new(0.001, 0.001)];

        let local = frame.to_local_all(&points);
        assert_eq!(local.len(), 3);
        assert_eq!(local[0], LocalPoint::ZERO);
        assert!(local[1].y > 0.0 && local[1].x.abs() < 1e-9);
        assert!(local[2].x > 0.0);
    }
}
