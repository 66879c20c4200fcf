#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! City/period selections and plot result types for the REAL-UP map.
//!
//! Form values arrive as free text. [`City::from_selection`] and
//! [`Period::from_selection`] map them onto the fixed choices, falling back
//! to a default instead of rejecting unknown input. The result types
//! serialize to the shapes the page templates consume.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Zoom level every base map opens at.
pub const DEFAULT_ZOOM: u8 = 12;

/// A city that has a base map and display name.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum City {
    /// Chicago, IL
    Chicago,
    /// Greater London
    London,
    /// New York City, the default
    #[strum(serialize = "nyc")]
    #[serde(rename = "nyc")]
    NewYorkCity,
}

impl City {
    /// Maps a form value onto a city.
    ///
    /// Anything other than `"chicago"` or `"london"` selects New York City.
    #[must_use]
    pub fn from_selection(value: &str) -> Self {
        match value {
            "chicago" => Self::Chicago,
            "london" => Self::London,
            _ => Self::NewYorkCity,
        }
    }

    /// Returns the human-readable city name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Chicago => "Chicago, IL",
            Self::London => "Greater London, London",
            Self::NewYorkCity => "New York City, NY",
        }
    }

    /// Returns the base map center as `(latitude, longitude)`.
    #[must_use]
    pub const fn center(self) -> (f64, f64) {
        match self {
            Self::Chicago => (41.8781, -87.6298),
            Self::London => (51.507_278, -0.127_690),
            Self::NewYorkCity => (40.684_02, -73.957_04),
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::NewYorkCity, Self::Chicago, Self::London]
    }
}

/// The time window whose sentiment data colors the regions.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Period {
    /// July 2018 only
    #[strum(serialize = "monthly-jul-2018")]
    #[serde(rename = "monthly-jul-2018")]
    MonthlyJul2018,
    /// The last three months of 2018
    #[strum(serialize = "last-three-months-2018")]
    #[serde(rename = "last-three-months-2018")]
    LastThreeMonths2018,
    /// All of 2018, the default
    #[strum(serialize = "all-2018")]
    #[serde(rename = "all-2018")]
    All2018,
}

impl Period {
    /// Maps a form value onto a period.
    ///
    /// `"1"` and `"2"` select the monthly and quarterly windows; anything
    /// else selects the whole year.
    #[must_use]
    pub fn from_selection(value: &str) -> Self {
        match value {
            "1" => Self::MonthlyJul2018,
            "2" => Self::LastThreeMonths2018,
            _ => Self::All2018,
        }
    }

    /// Returns the form value that selects this period.
    #[must_use]
    pub const fn selection(self) -> &'static str {
        match self {
            Self::MonthlyJul2018 => "1",
            Self::LastThreeMonths2018 => "2",
            Self::All2018 => "3",
        }
    }

    /// Returns the `GeoJSON` file stem for this period.
    #[must_use]
    pub const fn file_stem(self) -> &'static str {
        match self {
            Self::MonthlyJul2018 => "monthly-jul-2018",
            Self::LastThreeMonths2018 => "last-three-months-2018",
            Self::All2018 => "all-2018",
        }
    }

    /// Returns a short human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::MonthlyJul2018 => "July 2018",
            Self::LastThreeMonths2018 => "Last three months of 2018",
            Self::All2018 => "All of 2018",
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::MonthlyJul2018,
            Self::LastThreeMonths2018,
            Self::All2018,
        ]
    }
}

/// Summary of a successfully rendered map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlotSummary {
    /// Number of listing rows considered, after sampling.
    pub number_of_markers: usize,
    /// Path the map was written to.
    pub map_name: String,
    /// Display name of the selected city.
    pub city: String,
}

/// Description of a failed plot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlotFailure {
    /// Text of the first error encountered.
    #[serde(rename = "type error")]
    pub type_error: String,
}

impl PlotFailure {
    /// Creates a failure from an error message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            type_error: message.into(),
        }
    }
}

/// Result of one plot request, serialized without a wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlotOutcome {
    /// The map was rendered and saved.
    Success(PlotSummary),
    /// A stage failed; nothing was saved.
    Failure(PlotFailure),
}

impl PlotOutcome {
    /// Returns the HTTP-style status code for this outcome.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Success(_) => 200,
            Self::Failure(_) => 500,
        }
    }
}
