//! Travel bearing at each waypoint.

use crate::core::LocalPoint;
use crate::core::math::bearing_between;

/// Compute the compass bearing of travel at every point (radians, [0, 2π)).
///
/// Point `i` gets the bearing of the displacement to point `i + 1`. The
/// final point has no outgoing displacement and repeats the bearing of the
/// second-to-last point.
///
/// Returns `None` for fewer than two points, where direction is undefined.
pub fn travel_bearings(points: &[LocalPoint]) -> Option<Vec<f64>> {
    if points.len() < 2 {
        return None;
    }

    let mut bearings: Vec<f64> = points
        .windows(2)
        .map(|w| bearing_between(&w[0], &w[1]))
        .collect();

    // Endpoint holds the final travel direction
    let last = bearings[bearings.len() - 1];
    bearings.push(last);

    Some(bearings)
}
