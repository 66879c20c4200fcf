#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Plot pipeline for the REAL-UP map.
//!
//! Given a city and period from the request form, [`Plot`] loads the
//! matching region `GeoJSON` and listing CSV, annotates and draws them
//! through a [`MapRenderer`], and saves the result to the configured map
//! path. Each stage returns a typed error; the first failure ends the run
//! and becomes a [`PlotOutcome::Failure`]. Nothing is written unless every
//! earlier stage succeeded.

pub mod config;
pub mod layers;

use std::path::PathBuf;

use realup_map_listing::{ListingError, load_listings};
use realup_map_plot_models::{
    City, DEFAULT_ZOOM, Period, PlotFailure, PlotOutcome, PlotSummary,
};
use realup_map_region::{RegionError, annotate_regions, load_regions};
use realup_map_render::{LatLng, LeafletMap, MapRenderer, RenderError};
use strum_macros::Display;
use thiserror::Error;

pub use config::PlotConfig;

/// Log target for pipeline stage events.
pub const EVENT_TARGET: &str = "realup.map_plot";

/// File name of the listing table inside each city directory.
pub const LISTINGS_FILE: &str = "markers_listings.csv";

/// A step of the plot pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Stage {
    /// Read the region `GeoJSON`.
    #[strum(serialize = "load regions")]
    LoadRegions,
    /// Rewrite region labels and reviews.
    #[strum(serialize = "annotate regions")]
    AnnotateRegions,
    /// Draw the region layer.
    #[strum(serialize = "plot regions")]
    RenderRegions,
    /// Read and sample the listing CSV.
    #[strum(serialize = "load markers")]
    LoadMarkers,
    /// Draw the listing marker layers.
    #[strum(serialize = "plot markers")]
    RenderMarkers,
    /// Write the map file.
    #[strum(serialize = "save map")]
    SaveMap,
}

/// Errors that can end a plot run.
///
/// Displays as the underlying error's text.
#[derive(Debug, Error)]
pub enum PlotError {
    /// The city value cannot be used as a data directory name.
    #[error("Invalid city identifier '{city}'")]
    InvalidCity {
        /// The rejected value.
        city: String,
    },

    /// Region loading or annotation failed.
    #[error(transparent)]
    Regions(#[from] RegionError),

    /// Listing loading failed.
    #[error(transparent)]
    Listings(#[from] ListingError),

    /// Drawing or saving the map failed.
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// A single plot request.
#[derive(Debug, Clone)]
pub struct Plot<'a> {
    config: &'a PlotConfig,
    city_id: String,
    city: City,
    period: Period,
}

impl<'a> Plot<'a> {
    /// Prepares a plot for the raw form values.
    ///
    /// Unknown cities and periods fall back to their defaults for display
    /// and dataset selection. The raw city value still names the data
    /// directory.
    #[must_use]
    pub fn new(config: &'a PlotConfig, city: &str, period: &str) -> Self {
        Self {
            config,
            city_id: city.to_string(),
            city: City::from_selection(city),
            period: Period::from_selection(period),
        }
    }

    /// Returns the selected city.
    #[must_use]
    pub const fn city(&self) -> City {
        self.city
    }

    /// Returns the selected period.
    #[must_use]
    pub const fn period(&self) -> Period {
        self.period
    }

    /// Returns the directory holding this city's data files.
    ///
    /// # Errors
    ///
    /// Returns [`PlotError::InvalidCity`] unless the raw city value is a
    /// non-empty run of ASCII alphanumerics, `-` and `_`.
    pub fn city_dir(&self) -> Result<PathBuf, PlotError> {
        let valid = !self.city_id.is_empty()
            && self
                .city_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(PlotError::InvalidCity {
                city: self.city_id.clone(),
            });
        }
        Ok(self.config.data_dir.join(&self.city_id))
    }

    /// Returns the region `GeoJSON` path for this city and period.
    ///
    /// # Errors
    ///
    /// See [`Self::city_dir`].
    pub fn regions_path(&self) -> Result<PathBuf, PlotError> {
        Ok(self
            .city_dir()?
            .join(format!("{}.geojson", self.period.file_stem())))
    }

    /// Returns the listing CSV path for this city.
    ///
    /// # Errors
    ///
    /// See [`Self::city_dir`].
    pub fn listings_path(&self) -> Result<PathBuf, PlotError> {
        Ok(self.city_dir()?.join(LISTINGS_FILE))
    }

    /// Runs the pipeline against a fresh Leaflet map.
    #[must_use]
    pub fn run(&self) -> PlotOutcome {
        let (lat, lng) = self.city.center();
        let mut map = LeafletMap::new(LatLng::new(lat, lng), DEFAULT_ZOOM);
        self.run_with(&mut map)
    }

    /// Runs the pipeline against the given renderer.
    pub fn run_with<R: MapRenderer>(&self, map: &mut R) -> PlotOutcome {
        match self.execute(map) {
            Ok(summary) => PlotOutcome::Success(summary),
            Err(e) => PlotOutcome::Failure(PlotFailure::new(e.to_string())),
        }
    }

    fn execute<R: MapRenderer>(&self, map: &mut R) -> Result<PlotSummary, PlotError> {
        let mut regions = self.stage(Stage::LoadRegions, || {
            Ok(load_regions(&self.regions_path()?)?)
        })?;

        self.stage(Stage::AnnotateRegions, || {
            Ok(annotate_regions(&mut regions, self.config.preview_length)?)
        })?;

        self.stage(Stage::RenderRegions, || {
            map.add_minimap();
            Ok(map.draw_regions(layers::region_layer(regions))?)
        })?;

        let listings = self.stage(Stage::LoadMarkers, || {
            Ok(load_listings(
                &self.listings_path()?,
                &self.config.sample_policy(),
            )?)
        })?;

        self.stage(Stage::RenderMarkers, || {
            let layers::MarkerLayers { layers, dropped } = layers::marker_layers(&listings);
            if dropped > 0 {
                log::debug!("Skipped {dropped} listings with an unknown room type");
            }
            for layer in layers {
                map.draw_markers(layer);
            }
            map.add_layer_control(false);
            Ok(())
        })?;

        self.stage(Stage::SaveMap, || Ok(map.save(&self.config.map_path)?))?;

        Ok(PlotSummary {
            number_of_markers: listings.len(),
            map_name: self.config.map_path.display().to_string(),
            city: self.city.display_name().to_string(),
        })
    }

    /// Runs one stage, logging its result when event logging is enabled.
    fn stage<T>(
        &self,
        stage: Stage,
        f: impl FnOnce() -> Result<T, PlotError>,
    ) -> Result<T, PlotError> {
        let result = f();
        if self.config.event_logging {
            match &result {
                Ok(_) => log::info!(target: EVENT_TARGET, "{stage}: success"),
                Err(e) => log::error!(target: EVENT_TARGET, "{stage}: fail: {e}"),
            }
        }
        result
    }
}

/// Runs a single plot for the raw form values.
#[must_use]
pub fn plot(config: &PlotConfig, city: &str, period: &str) -> PlotOutcome {
    let plot = Plot::new(config, city, period);
    log::debug!(
        "Plotting {} ({})",
        plot.city().display_name(),
        plot.period().label()
    );
    plot.run()
}
