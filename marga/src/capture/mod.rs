//! Capture planning: panorama resolution, view headings and manifest rows.
//!
//! For every point of a [`Route`](crate::route::Route), the
//! [`CapturePlanner`] resolves the nearest panorama, drops panoramas it has
//! already seen, derives three views (forward, right, back) and fetches any
//! image not already in the store. Each captured view yields one
//! [`ManifestRow`].

mod config;
mod manifest;
mod planner;
mod retry;
mod types;
mod view;

pub use config::CaptureConfig;
pub use manifest::{ManifestRow, ManifestWriter};
pub use planner::{CaptureFailure, CapturePlanner, FailureStage, RouteCapture};
pub use retry::{RetryFailure, RetryPolicy, Retryable, with_retry};
pub use types::{CaptureSpec, PanoramaRecord};
pub use view::{CaptureView, derive_headings};
