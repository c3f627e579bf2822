//! Route processing: local-frame transform, waypoint deduplication and
//! per-point travel bearing.
//!
//! ```text
//! raw geodetic points ─► LocalFrame ─► keep mask ─► bearings ─► Route
//! ```
//!
//! - [`RouteProcessor`]: runs the pipeline once per ingested route
//! - [`Route`] / [`RoutePoint`]: the processed output
//! - [`dedup`]: near-coincident point removal
//! - [`bearing`]: compass bearing of travel at each point

pub mod bearing;
pub mod dedup;

mod config;
mod error;
mod processor;
mod types;

pub use config::RouteConfig;
pub use error::RouteError;
pub use processor::RouteProcessor;
pub use types::{Route, RoutePoint};
