//! Route processor: transform, deduplicate, compute bearings.

use log::debug;

use super::bearing::travel_bearings;
use super::config::RouteConfig;
use super::dedup::{apply_mask, dropped_count, keep_mask};
use super::error::RouteError;
use super::types::{Route, RoutePoint};
use crate::core::{GeodeticPoint, LocalFrame};

/// Turns a raw geodetic point sequence into a [`Route`].
///
/// Steps, in order:
/// 1. Project every point into a [`LocalFrame`] anchored at the first point
/// 2. Drop points closer than `min_separation` to their original predecessor
/// 3. Assign each retained point the compass bearing of travel
///
/// # Example
/// ```
/// use marga::core::GeodeticPoint;
/// use marga::route::RouteProcessor;
///
/// let raw = [
///     GeodeticPoint::new(0.0, 0.0),
///     GeodeticPoint::new(0.0, 0.000_000_5), // ~5cm north, merged
///     GeodeticPoint::new(0.0, 1.0),
/// ];
/// let route = RouteProcessor::with_defaults().process(&raw).unwrap();
/// assert_eq!(route.len(), 2);
/// assert!(route.points()[0].bearing_degrees().abs() < 1e-9); // due north
/// ```
#[derive(Clone, Debug, Default)]
pub struct RouteProcessor {
    config: RouteConfig,
}

impl RouteProcessor {
    /// Create a processor with configuration.
    pub fn new(config: RouteConfig) -> Self {
        Self { config }
    }

    /// Create a processor with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(RouteConfig::default())
    }

    /// Configuration in use.
    pub fn config(&self) -> &RouteConfig {
        &self.config
    }

    /// Process one route.
    ///
    /// Routes of fewer than two points are rejected up front, as are routes
    /// that deduplicate down to a single point.
    pub fn process(&self, raw: &[GeodeticPoint]) -> Result<Route, RouteError> {
        if raw.len() < 2 {
            return Err(RouteError::TooFewPoints { count: raw.len() });
        }
        if let Some(index) = raw.iter().position(|p| !p.is_finite()) {
            return Err(RouteError::NonFinite { index });
        }

        // Origin fixed to the first point for the whole route
        let frame = LocalFrame::new(raw[0]);
        let local = frame.to_local_all(raw);

        let mask = keep_mask(&local, self.config.min_separation);
        let removed = dropped_count(&mask);
        let (geodetic, local) = if removed == 0 {
            (raw.to_vec(), local)
        } else {
            (apply_mask(raw, &mask), apply_mask(&local, &mask))
        };

        let bearings =
            travel_bearings(&local).ok_or(RouteError::Collapsed { raw: raw.len() })?;

        debug!(
            "Route processed: {} raw points, {} removed as duplicates, {} retained",
            raw.len(),
            removed,
            local.len()
        );

        let points = geodetic
            .into_iter()
            .zip(local)
            .zip(bearings)
            .map(|((geodetic, local), bearing)| RoutePoint {
                geodetic,
                local,
                bearing,
            })
            .collect();

        Ok(Route::new(frame, points, raw.len()))
    }
}
