//! Route processing configuration.

use serde::{Deserialize, Serialize};

/// Configuration for [`RouteProcessor`](super::RouteProcessor).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Consecutive points closer than this (local-frame meters) are merged.
    #[serde(default = "default_min_separation")]
    pub min_separation: f64,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            min_separation: default_min_separation(),
        }
    }
}

fn default_min_separation() -> f64 {
    0.1
}
