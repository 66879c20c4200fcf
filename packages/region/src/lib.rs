#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Neighborhood region `GeoJSON` loading and sentiment annotation.
//!
//! Each city/period pair has a `GeoJSON` `FeatureCollection` of
//! neighborhood polygons whose properties carry precomputed emotion and
//! sentiment labels plus a representative review. Before drawing, the
//! labels are stripped of their scores and the review is split into a
//! short hover preview and an HTML-formatted full text.

pub mod annotate;

use std::path::Path;

use geojson::{FeatureCollection, GeoJson};
use thiserror::Error;

pub use annotate::annotate_regions;

/// Property holding the neighborhood name.
pub const DISPLAY_NAME: &str = "display_name";
/// Property holding the comma-separated emotion labels.
pub const DISPLAY_EMOTIONS: &str = "display_emotions";
/// Property holding the comma-separated sentiment labels.
pub const DISPLAY_SENTIMENT: &str = "display_sentiment";
/// Property holding the full review text.
pub const DISPLAY_REVIEW: &str = "display_review";
/// Property added during annotation with the truncated review preview.
pub const SHORT_REVIEW: &str = "short_review";

/// Errors that can occur while loading or annotating regions.
#[derive(Debug, Error)]
pub enum RegionError {
    /// The `GeoJSON` file could not be opened.
    #[error("{path}: {source}")]
    Io {
        /// File that failed to open.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid `GeoJSON`.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// The file holds valid `GeoJSON` that is not a `FeatureCollection`.
    #[error("Expected a GeoJSON FeatureCollection in {path}")]
    NotFeatureCollection {
        /// File that was loaded.
        path: String,
    },

    /// A feature lacks one of the display properties, or holds a non-string.
    #[error("Feature {index} is missing string property '{property}'")]
    MissingProperty {
        /// Position of the feature in the collection.
        index: usize,
        /// Name of the absent property.
        property: &'static str,
    },
}

/// Loads a `FeatureCollection` from a `GeoJSON` file.
///
/// # Errors
///
/// Returns [`RegionError`] if the file cannot be opened, is not valid
/// `GeoJSON`, or is not a `FeatureCollection`.
pub fn load_regions(path: &Path) -> Result<FeatureCollection, RegionError> {
    let file = std::fs::File::open(path).map_err(|source| RegionError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let geojson =
        GeoJson::from_reader(std::io::BufReader::new(file)).map_err(geojson::Error::from)?;

    match geojson {
        GeoJson::FeatureCollection(collection) => {
            log::debug!(
                "{}: loaded {} region features",
                path.display(),
                collection.features.len()
            );
            Ok(collection)
        }
        GeoJson::Feature(_) | GeoJson::Geometry(_) => Err(RegionError::NotFeatureCollection {
            path: path.display().to_string(),
        }),
    }
}
