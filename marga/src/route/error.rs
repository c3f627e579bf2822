//! Route processing errors.

use thiserror::Error;

/// Reasons a route cannot be processed.
///
/// All variants are configuration errors of the input: the route is
/// rejected before any imagery request is made.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouteError {
    /// Fewer than two input points; travel direction is undefined.
    #[error("Route has {count} point(s); at least 2 are required")]
    TooFewPoints {
        /// Number of points supplied
        count: usize,
    },

    /// Deduplication left fewer than two points.
    #[error("Route of {raw} points collapsed to a single location after deduplication")]
    Collapsed {
        /// Number of points before deduplication
        raw: usize,
    },

    /// A coordinate is NaN or infinite.
    #[error("Point {index} has a non-finite coordinate")]
    NonFinite {
        /// Index of the offending point in the input
        index: usize,
    },
}
