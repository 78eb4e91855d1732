//! Interactive map rendering.
//!
//! Builds a Leaflet map with one colored marker per geolocated IP and writes it
//! to a single HTML file. The marker list is embedded as JSON; Leaflet draws
//! the map in the browser.

mod template;

use std::path::Path;

use serde::Serialize;

use crate::error_handling::{MarkerError, RenderError};
use crate::geolocation::GeoRecord;
use template::{CENTER_PLACEHOLDER, MAP_HTML, MARKERS_PLACEHOLDER, ZOOM_PLACEHOLDER};

/// Marker colors, cycled by cluster label.
pub const PALETTE: [&str; 5] = ["blue", "red", "green", "orange", "purple"];

/// Color for a cluster label: `PALETTE[label % PALETTE.len()]`.
pub fn marker_color(label: usize) -> &'static str {
    PALETTE[label % PALETTE.len()]
}

/// One placed marker as serialized into the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub lat: f64,
    pub lon: f64,
    pub cluster: usize,
    pub color: &'static str,
    /// Popup HTML; user-supplied text is already escaped
    pub popup: String,
}

/// A map under construction.
///
/// `save` consumes the document, so nothing can be added after it is written.
#[derive(Debug, Clone)]
pub struct MapDocument {
    center: (f64, f64),
    zoom: u8,
    markers: Vec<Marker>,
}

impl MapDocument {
    pub fn new(center: (f64, f64), zoom: u8) -> Self {
        Self {
            center,
            zoom,
            markers: Vec::new(),
        }
    }

    /// Places a marker for `record` colored by `cluster`.
    ///
    /// The popup reads `<ip> - <city>, <country> (cluster <n>)`.
    ///
    /// # Errors
    ///
    /// Rejects coordinates that are not finite or fall outside the valid
    /// latitude/longitude ranges. The document is unchanged on error.
    pub fn add_marker(&mut self, record: &GeoRecord, cluster: usize) -> Result<(), MarkerError> {
        if !(-90.0..=90.0).contains(&record.latitude) {
            return Err(MarkerError::LatitudeOutOfRange(record.latitude));
        }
        if !(-180.0..=180.0).contains(&record.longitude) {
            return Err(MarkerError::LongitudeOutOfRange(record.longitude));
        }

        let popup = format!(
            "{} - {}, {} (cluster {})",
            escape_html(&record.ip),
            escape_html(&record.city),
            escape_html(&record.country),
            cluster
        );
        self.markers.push(Marker {
            lat: record.latitude,
            lon: record.longitude,
            cluster,
            color: marker_color(cluster),
            popup,
        });
        Ok(())
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Renders the complete HTML page.
    pub fn render(&self) -> Result<String, RenderError> {
        let center = serde_json::to_string(&[self.center.0, self.center.1])?;
        let markers = script_safe(&serde_json::to_string(&self.markers)?);

        Ok(MAP_HTML
            .replace(CENTER_PLACEHOLDER, &center)
            .replace(ZOOM_PLACEHOLDER, &self.zoom.to_string())
            .replace(MARKERS_PLACEHOLDER, &markers))
    }

    /// Writes the rendered page to `path`, replacing any existing file.
    pub async fn save(self, path: &Path) -> Result<(), RenderError> {
        let html = self.render()?;
        tokio::fs::write(path, html).await?;
        Ok(())
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Keeps embedded JSON from closing the surrounding `<script>` element.
fn script_safe(json: &str) -> String {
    json.replace("</", "<\\/")
}
