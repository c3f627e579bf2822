//! Drishti - Street-level panorama capture along GPS routes
//!
//! Reads routes from a KML file and, for each one, captures forward, right
//! and back views at every distinct panorama along the way using the
//! Street View Static API.
//!
//! ## Output
//!
//! ```text
//! <output>/route_0/gsv_0_0.jpg
//!                  gsv_0_1.jpg
//!                  ...
//!                  manifest.txt
//! <output>/route_1/...
//! ```
//!
//! Routes run one after another. A route that fails to ingest or process is
//! reported and skipped; the remaining routes still run.

mod config;
mod error;
mod kml;
mod pipeline;
mod store;
mod street_view;

use clap::Parser;
use config::{API_KEY_ENV, DrishtiConfig};
use error::{DrishtiError, Result};
use pipeline::{RouteSummary, run_route};
use std::path::{Path, PathBuf};
use street_view::StreetViewSession;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "drishti.toml";

#[derive(Parser, Debug)]
#[command(name = "drishti")]
#[command(version)]
#[command(about = "Capture street-level panoramas along KML routes")]
struct Args {
    /// KML file with one or more LineString routes
    route_file: PathBuf,

    /// Configuration file (default: drishti.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory, overrides the configuration file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Street View API key; overrides the configuration file
    #[arg(long)]
    api_key: Option<String>,
}

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("drishti=info,marga=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let config = load_config(&args)?;

    info!("Drishti v{}", env!("CARGO_PKG_VERSION"));
    if config.service.api_key.is_none() {
        warn!("No API key configured; set {} or --api-key", API_KEY_ENV);
    }

    info!("Reading routes from {:?}", args.route_file);
    let routes = kml::read_kml(&args.route_file)?;
    if routes.is_empty() {
        return Err(DrishtiError::Ingest(format!(
            "no LineString routes in {}",
            args.route_file.display()
        )));
    }
    info!("{} route(s) found", routes.len());

    let mut summaries: Vec<RouteSummary> = Vec::new();
    let mut failed = 0usize;

    for (index, route) in routes.into_iter().enumerate() {
        match route.and_then(|raw| capture_route(&config, index, &raw)) {
            Ok(summary) => {
                info!("{}", summary);
                summaries.push(summary);
            }
            Err(e) => {
                error!("Route {} skipped: {}", index, e);
                failed += 1;
            }
        }
    }

    let rows: usize = summaries.iter().map(|s| s.rows).sum();
    let failures: usize = summaries.iter().map(|s| s.failures).sum();
    info!(
        "Done: {} route(s) captured, {} skipped, {} manifest rows, {} capture failures",
        summaries.len(),
        failed,
        rows,
        failures
    );

    if summaries.is_empty() {
        return Err(DrishtiError::Ingest("no route could be captured".to_string()));
    }
    Ok(())
}

/// Config file, then CLI overrides.
fn load_config(args: &Args) -> Result<DrishtiConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            DrishtiConfig::load(path)?
        }
        None if Path::new(DEFAULT_CONFIG).exists() => {
            info!("Loading configuration from {}", DEFAULT_CONFIG);
            DrishtiConfig::load(Path::new(DEFAULT_CONFIG))?
        }
        None => {
            info!("Using default configuration");
            DrishtiConfig::default()
        }
    };

    if let Some(dir) = &args.output {
        config.output.directory = dir.clone();
    }
    config.resolve_api_key(args.api_key.clone(), std::env::var(API_KEY_ENV).ok());
    Ok(config)
}

/// One session per route; dropped when the route is done, success or not.
fn capture_route(
    config: &DrishtiConfig,
    index: usize,
    raw: &[marga::GeodeticPoint],
) -> Result<RouteSummary> {
    let mut session = StreetViewSession::open(&config.service)?;
    run_route(config, index, raw, &mut session)
}
