//! Error types for Drishti

use marga::{ImageryError, RouteError};
use thiserror::Error;

/// Drishti error type
#[derive(Error, Debug)]
pub enum DrishtiError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Route ingest error: {0}")]
    Ingest(String),

    #[error("Route error: {0}")]
    Route(#[from] RouteError),

    #[error("Imagery error: {0}")]
    Imagery(#[from] ImageryError),
}

impl From<toml::de::Error> for DrishtiError {
    fn from(e: toml::de::Error) -> Self {
        DrishtiError::Config(e.to_string())
    }
}

impl From<quick_xml::Error> for DrishtiError {
    fn from(e: quick_xml::Error) -> Self {
        DrishtiError::Ingest(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DrishtiError>;
