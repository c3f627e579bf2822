//! Per-route capture pipeline.
//!
//! process route -> open route directory -> plan and capture -> write manifest

use crate::config::DrishtiConfig;
use crate::error::Result;
use crate::store::DirectoryStore;
use marga::{
    CapturePlanner, GeodeticPoint, ImageryService, ManifestWriter, RouteCapture, RouteProcessor,
};
use std::fmt;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Outcome of one route.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteSummary {
    pub route_index: usize,
    pub raw_points: usize,
    pub retained_points: usize,
    pub panoramas: usize,
    pub duplicates: usize,
    pub rows: usize,
    pub rendered: usize,
    pub reused: usize,
    pub failures: usize,
    pub manifest: PathBuf,
}

impl RouteSummary {
    fn new(
        route_index: usize,
        raw_points: usize,
        retained_points: usize,
        manifest: PathBuf,
        capture: &RouteCapture,
    ) -> Self {
        Self {
            route_index,
            raw_points,
            retained_points,
            panoramas: capture.panoramas.len(),
            duplicates: capture.duplicates,
            rows: capture.rows.len(),
            rendered: capture.rendered,
            reused: capture.reused,
            failures: capture.failures.len(),
            manifest,
        }
    }
}

impl fmt::Display for RouteSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "route {}: {}/{} points kept, {} panoramas ({} duplicate), {} rows ({} rendered, {} reused), {} failures, manifest {}",
            self.route_index,
            self.retained_points,
            self.raw_points,
            self.panoramas,
            self.duplicates,
            self.rows,
            self.rendered,
            self.reused,
            self.failures,
            self.manifest.display()
        )
    }
}

/// Process, capture and write the manifest for one route.
///
/// The manifest is rewritten from scratch on every run and lists every view
/// present in the route directory, whether fetched now or earlier.
pub fn run_route<S: ImageryService>(
    config: &DrishtiConfig,
    route_index: usize,
    raw: &[GeodeticPoint],
    service: &mut S,
) -> Result<RouteSummary> {
    let route = RouteProcessor::new(config.route.clone()).process(raw)?;
    info!(
        "Route {}: {} of {} points kept, {:.1}m",
        route_index,
        route.len(),
        route.raw_len(),
        route.length()
    );

    let mut store = DirectoryStore::open(config.route_dir(route_index))?;
    debug!("Route {} output in {:?}", route_index, store.root());

    let planner = CapturePlanner::new(config.capture.clone());
    let capture = planner.run(&route, service, &mut store);
    if !capture.failures.is_empty() {
        warn!(
            "Route {}: {} point(s) or view(s) skipped",
            route_index,
            capture.failures.len()
        );
    }

    let manifest_path = store.root().join(&config.output.manifest_name);
    let mut writer = ManifestWriter::new(BufWriter::new(File::create(&manifest_path)?));
    writer.append_all(&capture.rows)?;
    writer.finish()?;

    Ok(RouteSummary::new(
        route_index,
        route.raw_len(),
        route.len(),
        manifest_path,
        &capture,
    ))
}
