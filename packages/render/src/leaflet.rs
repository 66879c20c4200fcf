//! In-memory Leaflet map document.

use std::path::Path;

use serde::Serialize;

use crate::template::{CONFIG_PLACEHOLDER, MAP_PAGE};
use crate::{
    CircleMarker, FieldTable, LatLng, MapRenderer, MarkerLayer, Popup, RegionLayer, RenderError,
    ShapeStyle,
};

/// A map under construction.
///
/// Layers are kept in draw order; the layer control lists them in the same
/// order.
#[derive(Debug, Clone, Serialize)]
pub struct LeafletMap {
    center: LatLng,
    zoom: u8,
    minimap: bool,
    layers: Vec<Layer>,
    layer_control: Option<LayerControl>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Layer {
    Regions {
        name: String,
        data: serde_json::Value,
        style: ShapeStyle,
        tooltip: FieldTable,
        popup: Popup,
    },
    Markers {
        name: String,
        color: String,
        markers: Vec<CircleMarker>,
    },
}

#[derive(Debug, Clone, Copy, Serialize)]
struct LayerControl {
    collapsed: bool,
}

impl LeafletMap {
    /// Creates an empty map centered on `center`.
    #[must_use]
    pub const fn new(center: LatLng, zoom: u8) -> Self {
        Self {
            center,
            zoom,
            minimap: false,
            layers: Vec::new(),
            layer_control: None,
        }
    }

    /// Returns the number of layers drawn so far.
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Returns the total number of markers across all marker layers.
    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.layers
            .iter()
            .map(|layer| match layer {
                Layer::Markers { markers, .. } => markers.len(),
                Layer::Regions { .. } => 0,
            })
            .sum()
    }

    /// Renders the map as a complete HTML page.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Json`] if the layer data cannot be serialized.
    pub fn to_html(&self) -> Result<String, RenderError> {
        let config = serde_json::to_string(self)?;
        // Keep embedded review text from closing the surrounding <script>.
        let config = config.replace("</", "<\\/");
        Ok(MAP_PAGE.replace(CONFIG_PLACEHOLDER, &config))
    }
}

impl MapRenderer for LeafletMap {
    fn add_minimap(&mut self) {
        self.minimap = true;
    }

    fn draw_regions(&mut self, layer: RegionLayer) -> Result<(), RenderError> {
        let data = serde_json::to_value(&layer.regions)?;
        self.layers.push(Layer::Regions {
            name: layer.name,
            data,
            style: layer.style,
            tooltip: layer.tooltip,
            popup: layer.popup,
        });
        Ok(())
    }

    fn draw_markers(&mut self, layer: MarkerLayer) {
        self.layers.push(Layer::Markers {
            name: layer.name,
            color: layer.color,
            markers: layer.markers,
        });
    }

    fn add_layer_control(&mut self, collapsed: bool) {
        self.layer_control = Some(LayerControl { collapsed });
    }

    fn save(&self, path: &Path) -> Result<(), RenderError> {
        let html = self.to_html()?;
        let io_err = |source: std::io::Error| RenderError::Io {
            path: path.display().to_string(),
            source,
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        std::fs::write(path, html).map_err(io_err)?;
        log::debug!(
            "Wrote map ({} layers, {} markers) to {}",
            self.layer_count(),
            self.marker_count(),
            path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region_layer(review: &str) -> RegionLayer {
        let regions: geojson::FeatureCollection = serde_json::from_value(serde_json::json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {"display_name": "Loop", "display_review": review},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[-87.63, 41.88], [-87.62, 41.88], [-87.62, 41.89], [-87.63, 41.88]]]
                }
            }]
        }))
        .unwrap();

        RegionLayer {
            name: "Neighbourhood Info".to_string(),
            regions,
            style: ShapeStyle {
                color: "black".to_string(),
                weight: 2,
                fill_opacity: 0.0,
            },
            tooltip: FieldTable::new(&[("display_name", "Neighborhood")]),
            popup: Popup {
                table: FieldTable::new(&[("display_review", "Review")]),
                style: "background-color: yellow;".to_string(),
                max_width: 1200,
            },
        }
    }

    fn marker_layer(name: &str, count: usize) -> MarkerLayer {
        MarkerLayer {
            name: name.to_string(),
            color: "#FFBA00".to_string(),
            markers: (0..count)
                .map(|i| CircleMarker {
                    location: LatLng::new(41.88, -87.63),
                    radius: 5,
                    tooltip: format!("Location id : <b>{i}</b>"),
                })
                .collect(),
        }
    }

    #[test]
    fn html_embeds_center_and_layers() {
        let mut map = LeafletMap::new(LatLng::new(41.8781, -87.6298), 12);
        map.add_minimap();
        map.draw_regions(region_layer("Nice")).unwrap();
        map.draw_markers(marker_layer("Entire home/apt", 3));
        map.add_layer_control(false);

        let html = map.to_html().unwrap();
        assert!(html.contains("\"center\":[41.8781,-87.6298]"));
        assert!(html.contains("\"zoom\":12"));
        assert!(html.contains("\"minimap\":true"));
        assert!(html.contains("\"kind\":\"regions\""));
        assert!(html.contains("\"name\":\"Neighbourhood Info\""));
        assert!(html.contains("\"layer_control\":{\"collapsed\":false}"));
        assert!(!html.contains(CONFIG_PLACEHOLDER));

        assert_eq!(map.layer_count(), 2);
        assert_eq!(map.marker_count(), 3);
    }

    #[test]
    fn script_terminators_are_escaped() {
        let mut map = LeafletMap::new(LatLng::new(0.0, 0.0), 12);
        map.draw_regions(region_layer("bye</script><script>alert(1)"))
            .unwrap();

        let html = map.to_html().unwrap();
        assert_eq!(html.matches("</script>").count(), MAP_PAGE.matches("</script>").count());
        assert!(html.contains("bye<\\/script>"));
    }

    #[test]
    fn save_creates_parent_directory_and_overwrites() {
        let dir = std::env::temp_dir().join("realup_map_render_tests/nested");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("map.html");

        let mut map = LeafletMap::new(LatLng::new(51.507_278, -0.127_69), 12);
        map.draw_markers(marker_layer("Private room", 1));
        map.save(&path).unwrap();
        let first = std::fs::read_to_string(&path).unwrap();
        assert!(first.contains("Private room"));

        let map = LeafletMap::new(LatLng::new(51.507_278, -0.127_69), 12);
        map.save(&path).unwrap();
        let second = std::fs::read_to_string(&path).unwrap();
        assert!(!second.contains("Private room"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
