//! Pipeline settings.

use std::path::PathBuf;

use realup_map_listing::SamplePolicy;
use realup_map_listing::sample::{DEFAULT_MAX_ROWS, DEFAULT_SEED};
use serde::{Deserialize, Serialize};

/// Settings for the plot pipeline, read once at startup.
///
/// Every field has a default, so a partial TOML table is enough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Root directory holding one subdirectory per city.
    pub data_dir: PathBuf,
    /// Where the rendered map is written. Overwritten by every request.
    pub map_path: PathBuf,
    /// Whether oversized listing tables are sampled down.
    pub truncate_listings: bool,
    /// Maximum number of listings drawn per map.
    pub max_listings: usize,
    /// Seed for listing sampling.
    pub sample_seed: u64,
    /// Number of review characters shown in the hover preview.
    pub preview_length: usize,
    /// Whether per-stage pipeline events are logged.
    pub event_logging: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            map_path: PathBuf::from("templates/map.html"),
            truncate_listings: true,
            max_listings: DEFAULT_MAX_ROWS,
            sample_seed: DEFAULT_SEED,
            preview_length: 64,
            event_logging: true,
        }
    }
}

impl PlotConfig {
    /// Returns the listing sampling policy these settings describe.
    #[must_use]
    pub const fn sample_policy(&self) -> SamplePolicy {
        SamplePolicy {
            enabled: self.truncate_listings,
            max_rows: self.max_listings,
            seed: self.sample_seed,
        }
    }
}
