//! Builds renderer layers from annotated regions and listings.

use geojson::FeatureCollection;
use realup_map_listing_models::{Listing, RoomType};
use realup_map_region::{
    DISPLAY_EMOTIONS, DISPLAY_NAME, DISPLAY_REVIEW, DISPLAY_SENTIMENT, SHORT_REVIEW,
};
use realup_map_render::{
    CircleMarker, FieldTable, LatLng, MarkerLayer, Popup, RegionLayer, ShapeStyle,
};

/// Name of the region layer in the layer control.
pub const REGION_LAYER_NAME: &str = "Neighbourhood Info";

/// Marker radius in pixels.
const MARKER_RADIUS: u32 = 5;

/// Wraps annotated regions in the outline-only, tooltip-and-popup layer.
#[must_use]
pub fn region_layer(regions: FeatureCollection) -> RegionLayer {
    RegionLayer {
        name: REGION_LAYER_NAME.to_string(),
        regions,
        style: ShapeStyle {
            color: "black".to_string(),
            weight: 2,
            fill_opacity: 0.0,
        },
        tooltip: FieldTable::new(&[
            (DISPLAY_NAME, "Neighborhood"),
            (DISPLAY_EMOTIONS, "Emotions"),
            (DISPLAY_SENTIMENT, "Sentiment"),
            (SHORT_REVIEW, "Review"),
        ]),
        popup: Popup {
            table: FieldTable::new(&[(DISPLAY_REVIEW, "Review")]),
            style: "background-color: yellow;".to_string(),
            max_width: 1200,
        },
    }
}

/// Marker layers split by room type, plus the rows that fit none of them.
#[derive(Debug)]
pub struct MarkerLayers {
    /// One layer per [`RoomType`], in [`RoomType::all`] order.
    pub layers: Vec<MarkerLayer>,
    /// Rows whose room type is outside the known set.
    pub dropped: usize,
}

/// Partitions listings into one marker layer per room type.
///
/// Every known room type gets a layer even when it has no markers.
#[must_use]
pub fn marker_layers(listings: &[Listing]) -> MarkerLayers {
    let mut layers: Vec<MarkerLayer> = RoomType::all()
        .iter()
        .map(|room_type| MarkerLayer {
            name: room_type.to_string(),
            color: room_type.color().to_string(),
            markers: Vec::new(),
        })
        .collect();
    let mut dropped = 0;

    for listing in listings {
        let Some(room_type) = listing.room_kind() else {
            dropped += 1;
            continue;
        };
        let Some(idx) = RoomType::all().iter().position(|r| *r == room_type) else {
            continue;
        };
        layers[idx].markers.push(CircleMarker {
            location: LatLng::new(listing.latitude, listing.longitude),
            radius: MARKER_RADIUS,
            tooltip: marker_tooltip(listing),
        });
    }

    MarkerLayers { layers, dropped }
}

/// Tooltip HTML for a single listing.
#[must_use]
pub fn marker_tooltip(listing: &Listing) -> String {
    format!(
        "Location id : <b>{}</b><br>Room type : <b>{}</b><br>Price : <b>{}</b><br>",
        listing.id,
        listing.room_type,
        listing.whole_price()
    )
}
