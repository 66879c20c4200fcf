#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Leaflet HTML map rendering for region shapes and listing markers.
//!
//! [`MapRenderer`] is the draw-shapes / draw-markers / save contract the
//! plot pipeline builds against. [`LeafletMap`] implements it by collecting
//! layers in memory and writing a single self-contained HTML document that
//! loads Leaflet from a CDN and draws the embedded layer data client-side.

mod leaflet;
mod template;

use std::path::Path;

use serde::Serialize;
use thiserror::Error;

pub use leaflet::LeafletMap;

/// Errors that can occur while rendering or saving a map.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Layer data could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The output file could not be written.
    #[error("{path}: {source}")]
    Io {
        /// File that failed to write.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// A geographic coordinate, serialized as `[lat, lng]` for Leaflet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
}

impl LatLng {
    /// Creates a coordinate.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl Serialize for LatLng {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.lat, self.lng].serialize(serializer)
    }
}

/// Outline and fill styling for region shapes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeStyle {
    /// Stroke color.
    pub color: String,
    /// Stroke width in pixels.
    pub weight: u32,
    /// Fill opacity, `0.0` for outline-only shapes.
    pub fill_opacity: f64,
}

/// Feature properties shown as a labelled table, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldTable {
    /// Property names to read from each feature.
    pub fields: Vec<String>,
    /// Row labels, one per field.
    pub aliases: Vec<String>,
}

impl FieldTable {
    /// Builds a table from `(field, alias)` pairs.
    #[must_use]
    pub fn new(pairs: &[(&str, &str)]) -> Self {
        let (fields, aliases): (Vec<String>, Vec<String>) = pairs
            .iter()
            .map(|(field, alias)| ((*field).to_string(), (*alias).to_string()))
            .unzip();
        Self { fields, aliases }
    }
}

/// Click popup attached to each region shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Popup {
    /// Properties shown in the popup.
    pub table: FieldTable,
    /// Inline CSS applied to the popup body.
    pub style: String,
    /// Maximum popup width in pixels.
    pub max_width: u32,
}

/// A named layer of region polygons.
#[derive(Debug, Clone)]
pub struct RegionLayer {
    /// Layer name shown in the layer control.
    pub name: String,
    /// Region features to draw.
    pub regions: geojson::FeatureCollection,
    /// Shape styling.
    pub style: ShapeStyle,
    /// Hover tooltip contents.
    pub tooltip: FieldTable,
    /// Click popup contents.
    pub popup: Popup,
}

/// A filled circle marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CircleMarker {
    /// Marker position.
    pub location: LatLng,
    /// Radius in pixels.
    pub radius: u32,
    /// Tooltip HTML.
    pub tooltip: String,
}

/// A named layer of same-colored circle markers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerLayer {
    /// Layer name shown in the layer control.
    pub name: String,
    /// Stroke and fill color.
    pub color: String,
    /// Markers in this layer.
    pub markers: Vec<CircleMarker>,
}

/// Draw-shapes, draw-markers, save-to-file contract for map output.
pub trait MapRenderer {
    /// Adds an overview minimap in the corner of the map.
    fn add_minimap(&mut self);

    /// Draws a layer of region shapes.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the region data cannot be prepared for
    /// output.
    fn draw_regions(&mut self, layer: RegionLayer) -> Result<(), RenderError>;

    /// Draws a layer of point markers.
    fn draw_markers(&mut self, layer: MarkerLayer);

    /// Adds a control for toggling the layers drawn so far.
    fn add_layer_control(&mut self, collapsed: bool);

    /// Writes the assembled map to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the map cannot be serialized or written.
    fn save(&self, path: &Path) -> Result<(), RenderError>;
}
