//! Test doubles for the imagery service and image store.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};

use marga::{GeodeticPoint, ImageStore, ImageryError, ImageryService, Panorama, RenderRequest};

/// Grid spacing (degrees) used to snap query points onto panoramas.
pub const PANO_GRID_DEG: f64 = 0.0001;

/// Scripted imagery service.
///
/// Scripted responses are consumed first; afterwards lookups snap the query
/// point to a ~11m grid and name the panorama after the cell, so nearby
/// points share a panorama.
#[derive(Default)]
pub struct MockImagery {
    pub resolve_script: VecDeque<Result<Panorama, ImageryError>>,
    pub render_script: VecDeque<ImageryError>,
    pub resolve_calls: usize,
    pub render_calls: Vec<RenderRequest>,
}

impl MockImagery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resolve(mut self, response: Result<Panorama, ImageryError>) -> Self {
        self.resolve_script.push_back(response);
        self
    }

    pub fn with_render_failure(mut self, error: ImageryError) -> Self {
        self.render_script.push_back(error);
        self
    }
}

pub fn snapped_panorama(location: GeodeticPoint) -> Panorama {
    let cell_x = (location.lon / PANO_GRID_DEG).round() as i64;
    let cell_y = (location.lat / PANO_GRID_DEG).round() as i64;
    Panorama {
        id: format!("pano_{}_{}", cell_x, cell_y),
        location: GeodeticPoint::new(cell_x as f64 * PANO_GRID_DEG, cell_y as f64 * PANO_GRID_DEG),
    }
}

impl ImageryService for MockImagery {
    fn resolve_panorama(&mut self, location: GeodeticPoint) -> Result<Panorama, ImageryError> {
        self.resolve_calls += 1;
        match self.resolve_script.pop_front() {
            Some(response) => response,
            None => Ok(snapped_panorama(location)),
        }
    }

    fn render_image(&mut self, request: &RenderRequest) -> Result<Vec<u8>, ImageryError> {
        self.render_calls.push(request.clone());
        if let Some(error) = self.render_script.pop_front() {
            return Err(error);
        }
        Ok(format!("{}@{}", request.pano_id(), request.heading()).into_bytes())
    }
}

/// In-memory image store.
#[derive(Default)]
pub struct MemoryStore {
    pub images: HashMap<String, Vec<u8>>,
    pub fail_saves: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ImageStore for MemoryStore {
    fn contains(&self, name: &str) -> bool {
        self.images.contains_key(name)
    }

    fn save(&mut self, name: &str, image: &[u8]) -> std::io::Result<()> {
        if self.fail_saves {
            return Err(std::io::Error::other("disk full"));
        }
        self.images.insert(name.to_string(), image.to_vec());
        Ok(())
    }
}

/// Straight route heading north from `start`, `count` points `step_deg` apart.
pub fn northbound(start: GeodeticPoint, count: usize, step_deg: f64) -> Vec<GeodeticPoint> {
    (0..count)
        .map(|i| GeodeticPoint::new(start.lon, start.lat + i as f64 * step_deg))
        .collect()
}
