//! Manifest rows and the append-only manifest writer.
//!
//! ## Format
//!
//! One line per captured image, seven comma-separated fields, no header:
//!
//! ```text
//! filename,longitude,latitude,0,heading,pitch,0
//! gsv_0_1.jpg,8.5417,47.3769,0,80,0,0
//! ```
//!
//! The two zero columns are placeholders for roll and a trailing field
//! kept for compatibility with existing consumers.

use std::fmt;
use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use super::types::CaptureSpec;
use crate::core::GeodeticPoint;

/// Pose record for one captured image.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ManifestRow {
    /// Image file name
    pub filename: String,
    /// Panorama location
    pub location: GeodeticPoint,
    /// Compass heading in degrees [0, 360)
    pub heading: f64,
    /// Pitch in degrees
    pub pitch: f64,
}

impl From<&CaptureSpec> for ManifestRow {
    fn from(spec: &CaptureSpec) -> Self {
        Self {
            filename: spec.filename.clone(),
            location: spec.location,
            heading: spec.heading,
            pitch: spec.pitch,
        }
    }
}

impl fmt::Display for ManifestRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},0,{},{},0",
            self.filename, self.location.lon, self.location.lat, self.heading, self.pitch
        )
    }
}

/// Append-only manifest sink.
///
/// Rows are written in the order given, one per line.
pub struct ManifestWriter<W: Write> {
    sink: W,
    rows_written: usize,
}

impl<W: Write> ManifestWriter<W> {
    /// Wrap a writer. Buffer it if it is a file.
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            rows_written: 0,
        }
    }

    /// Append one row.
    pub fn append(&mut self, row: &ManifestRow) -> io::Result<()> {
        writeln!(self.sink, "{}", row)?;
        self.rows_written += 1;
        Ok(())
    }

    /// Append every row of a slice.
    pub fn append_all(&mut self, rows: &[ManifestRow]) -> io::Result<()> {
        for row in rows {
            self.append(row)?;
        }
        Ok(())
    }

    /// Rows written so far.
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Flush and return the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.sink.flush()?;
        Ok(self.sink)
    }
}
