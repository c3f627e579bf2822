//! KML route ingest.
//!
//! Every `LineString/coordinates` element becomes one route, in document
//! order. Element names are matched on their local part, so namespaced and
//! unprefixed KML read the same.
//!
//! Coordinates are whitespace-separated `lon,lat[,alt]` tuples; altitude is
//! dropped.

use crate::error::{DrishtiError, Result};
use marga::GeodeticPoint;
use quick_xml::Reader;
use quick_xml::events::Event;
use std::path::Path;

/// Raw route points in file order.
pub type RawRoute = Vec<GeodeticPoint>;

/// Read all routes from a KML file.
///
/// The outer error covers unreadable or malformed XML. Each inner result is
/// one route; a malformed coordinate tuple fails only its own route.
pub fn read_kml(path: &Path) -> Result<Vec<Result<RawRoute>>> {
    let content = std::fs::read_to_string(path)?;
    parse_kml(&content)
}

/// Parse routes from KML text. See [`read_kml`].
pub fn parse_kml(content: &str) -> Result<Vec<Result<RawRoute>>> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut routes = Vec::new();
    let mut line_depth = 0usize;
    let mut coordinates: Option<String> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"LineString" => line_depth += 1,
                b"coordinates" if line_depth > 0 => coordinates = Some(String::new()),
                _ => {}
            },
            Event::Text(t) => {
                if let Some(text) = coordinates.as_mut() {
                    text.push_str(&t.unescape()?);
                    text.push(' ');
                }
            }
            Event::CData(t) => {
                if let Some(text) = coordinates.as_mut() {
                    text.push_str(&String::from_utf8_lossy(&t));
                    text.push(' ');
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"LineString" => line_depth = line_depth.saturating_sub(1),
                b"coordinates" => {
                    if let Some(text) = coordinates.take() {
                        routes.push(parse_coordinates(&text, routes.len()));
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(routes)
}

/// Parse one `coordinates` body.
fn parse_coordinates(text: &str, route_index: usize) -> Result<RawRoute> {
    text.split_whitespace()
        .map(|tuple| {
            parse_tuple(tuple).ok_or_else(|| {
                DrishtiError::Ingest(format!(
                    "route {}: malformed coordinate '{}'",
                    route_index, tuple
                ))
            })
        })
        .collect()
}

fn parse_tuple(tuple: &str) -> Option<GeodeticPoint> {
    let mut fields = tuple.split(',');
    let lon = fields.next()?.trim().parse::<f64>().ok()?;
    let lat = fields.next()?.trim().parse::<f64>().ok()?;
    if let Some(alt) = fields.next() {
        alt.trim().parse::<f64>().ok()?;
    }
    if fields.next().is_some() {
        return None;
    }
    Some(GeodeticPoint::new(lon, lat))
}
