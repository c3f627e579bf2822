//! Capture planner: route points to panoramas, views and manifest rows.
//!
//! Two phases, both in route order:
//!
//! 1. **Resolve** - query the nearest panorama for every route point; drop
//!    panoramas already seen on this route.
//! 2. **Capture** - derive forward/right/back specs per panorama; fetch the
//!    images the store does not already hold; emit a manifest row for every
//!    view that is present in the store afterwards.
//!
//! A failed lookup or render skips only that point or view. Failures are
//! collected in [`RouteCapture::failures`] rather than aborting the route.

use std::collections::HashSet;
use std::fmt;

use log::{debug, info, warn};

use super::config::CaptureConfig;
use super::manifest::ManifestRow;
use super::retry::with_retry;
use super::types::{CaptureSpec, PanoramaRecord};
use crate::imagery::{ImageStore, ImageryService};
use crate::route::Route;

/// Where in the planning a failure happened.
#[derive(Clone, Debug, PartialEq)]
pub enum FailureStage {
    /// Panorama lookup for a route point
    Metadata {
        /// Index of the point in the processed route
        point_index: usize,
    },
    /// Rendering one view
    Render {
        /// Target file name
        filename: String,
    },
    /// Writing a rendered image to the store
    Store {
        /// Target file name
        filename: String,
    },
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureStage::Metadata { point_index } => write!(f, "metadata for point {}", point_index),
            FailureStage::Render { filename } => write!(f, "render of {}", filename),
            FailureStage::Store { filename } => write!(f, "store of {}", filename),
        }
    }
}

/// A skipped point or view, surfaced to the caller.
#[derive(Clone, Debug, PartialEq)]
pub struct CaptureFailure {
    /// What was being done
    pub stage: FailureStage,
    /// Final error message
    pub error: String,
    /// Attempts spent before giving up
    pub attempts: u32,
}

impl fmt::Display for CaptureFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} failed after {} attempt(s): {}",
            self.stage, self.attempts, self.error
        )
    }
}

/// Result of planning and capturing one route.
#[derive(Clone, Debug, Default)]
pub struct RouteCapture {
    /// Unique panoramas in route order
    pub panoramas: Vec<PanoramaRecord>,
    /// Manifest rows in emission order
    pub rows: Vec<ManifestRow>,
    /// Skipped points and views
    pub failures: Vec<CaptureFailure>,
    /// Lookups that returned an already-seen panorama
    pub duplicates: usize,
    /// Images fetched from the service in this run
    pub rendered: usize,
    /// Images already present in the store
    pub reused: usize,
}

/// Plans and executes the capture set for a processed route.
#[derive(Clone, Debug, Default)]
pub struct CapturePlanner {
    config: CaptureConfig,
}

impl CapturePlanner {
    /// Create a planner with configuration.
    pub fn new(config: CaptureConfig) -> Self {
        Self { config }
    }

    /// Configuration in use.
    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    /// Resolve panoramas, capture every view and assemble the manifest rows.
    pub fn run<S, F>(&self, route: &Route, service: &mut S, store: &mut F) -> RouteCapture
    where
        S: ImageryService,
        F: ImageStore,
    {
        let mut capture = RouteCapture::default();

        info!("Resolving panoramas for {} route points", route.len());
        self.resolve_panoramas(route, service, &mut capture);

        info!(
            "Capturing {} views from {} panoramas",
            capture.panoramas.len() * 3,
            capture.panoramas.len()
        );
        let panoramas = std::mem::take(&mut capture.panoramas);
        for record in &panoramas {
            for spec in record.capture_specs(&self.config) {
                if self.capture_view(&spec, service, store, &mut capture) {
                    capture.rows.push(ManifestRow::from(&spec));
                }
            }
        }
        capture.panoramas = panoramas;

        info!(
            "Route captured: {} panoramas ({} duplicates), {} rows, {} rendered, {} reused, {} failures",
            capture.panoramas.len(),
            capture.duplicates,
            capture.rows.len(),
            capture.rendered,
            capture.reused,
            capture.failures.len()
        );
        capture
    }

    /// Phase 1: one lookup per route point, duplicates dropped.
    fn resolve_panoramas<S: ImageryService>(
        &self,
        route: &Route,
        service: &mut S,
        capture: &mut RouteCapture,
    ) {
        let mut seen: HashSet<String> = HashSet::new();

        for (point_index, point) in route.iter().enumerate() {
            info!(
                "Point {}/{}: resolving panorama at {}",
                point_index + 1,
                route.len(),
                point.geodetic
            );

            let label = format!("Metadata lookup for point {}", point_index);
            let result = with_retry(&self.config.retry, &label, |_| {
                service.resolve_panorama(point.geodetic)
            });

            match result {
                Ok(panorama) => {
                    if !seen.insert(panorama.id.clone()) {
                        debug!("Panorama {} already captured; skipping", panorama.id);
                        capture.duplicates += 1;
                        continue;
                    }
                    capture.panoramas.push(PanoramaRecord {
                        id: panorama.id,
                        location: panorama.location,
                        bearing_deg: point.bearing_degrees(),
                        point_index,
                    });
                }
                Err(failure) => {
                    let failure = CaptureFailure {
                        stage: FailureStage::Metadata { point_index },
                        error: failure.error.to_string(),
                        attempts: failure.attempts,
                    };
                    warn!("Skipping point: {}", failure);
                    capture.failures.push(failure);
                }
            }
        }
    }

    /// Phase 2 for one view. Returns `true` when the image is in the store.
    fn capture_view<S, F>(
        &self,
        spec: &CaptureSpec,
        service: &mut S,
        store: &mut F,
        capture: &mut RouteCapture,
    ) -> bool
    where
        S: ImageryService,
        F: ImageStore,
    {
        if store.contains(&spec.filename) {
            debug!("{} exists; not fetching", spec.filename);
            capture.reused += 1;
            return true;
        }

        // Size checked here, before any service call
        let request = match spec.render_request(&self.config) {
            Ok(request) => request,
            Err(e) => {
                let failure = CaptureFailure {
                    stage: FailureStage::Render {
                        filename: spec.filename.clone(),
                    },
                    error: e.to_string(),
                    attempts: 0,
                };
                warn!("Skipping view: {}", failure);
                capture.failures.push(failure);
                return false;
            }
        };

        let label = format!("Render of {}", spec.filename);
        let image = match with_retry(&self.config.retry, &label, |_| {
            service.render_image(&request)
        }) {
            Ok(image) => image,
            Err(failure) => {
                let failure = CaptureFailure {
                    stage: FailureStage::Render {
                        filename: spec.filename.clone(),
                    },
                    error: failure.error.to_string(),
                    attempts: failure.attempts,
                };
                warn!("Skipping view: {}", failure);
                capture.failures.push(failure);
                return false;
            }
        };

        if let Err(e) = store.save(&spec.filename, &image) {
            let failure = CaptureFailure {
                stage: FailureStage::Store {
                    filename: spec.filename.clone(),
                },
                error: e.to_string(),
                attempts: 1,
            };
            warn!("Skipping view: {}", failure);
            capture.failures.push(failure);
            return false;
        }

        debug!(
            "Captured {} (heading {:.1}°, {} bytes)",
            spec.filename,
            spec.heading,
            image.len()
        );
        capture.rendered += 1;
        true
    }
}
