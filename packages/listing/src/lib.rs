#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Listing CSV loading and deterministic row sampling.
//!
//! Reads a city's `markers_listings.csv`, keeps only the columns the map
//! draws, and caps oversized tables with a fixed-seed sample so the same
//! input always yields the same subset.

pub mod sample;

use std::path::Path;

use chrono::NaiveDate;
use realup_map_listing_models::Listing;
use serde::Deserialize;
use thiserror::Error;

pub use sample::SamplePolicy;

/// Columns every listing CSV must provide.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "id",
    "room_type",
    "neighbourhood",
    "latitude",
    "longitude",
    "price",
    "last_review",
];

/// Date format of the `last_review` column.
const REVIEW_DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors that can occur while loading listings.
#[derive(Debug, Error)]
pub enum ListingError {
    /// The CSV file could not be opened or read.
    #[error("{path}: {source}")]
    Io {
        /// File that failed to open.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// CSV parsing or row deserialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row.
    #[error("Missing column '{column}' in listing CSV")]
    MissingColumn {
        /// Name of the absent column.
        column: String,
    },
}

/// Raw CSV row before the review date is parsed.
#[derive(Debug, Deserialize)]
struct ListingRecord {
    id: u64,
    room_type: String,
    neighbourhood: String,
    latitude: f64,
    longitude: f64,
    price: f64,
    last_review: String,
}

/// Loads listings from a CSV file and applies the sampling policy.
///
/// Extra columns are ignored. Empty or unparseable `last_review` cells
/// become `None`.
///
/// # Errors
///
/// Returns [`ListingError`] if the file cannot be read, a required column
/// is missing, or any row fails to deserialize.
pub fn load_listings(path: &Path, policy: &SamplePolicy) -> Result<Vec<Listing>, ListingError> {
    let file = std::fs::File::open(path).map_err(|source| ListingError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(std::io::BufReader::new(file));

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == *column) {
            return Err(ListingError::MissingColumn {
                column: (*column).to_string(),
            });
        }
    }

    let mut listings = Vec::new();
    let mut bad_dates = 0usize;

    for result in reader.deserialize::<ListingRecord>() {
        let record = result?;
        let last_review = parse_review_date(&record.last_review);
        if last_review.is_none() && !record.last_review.is_empty() {
            bad_dates += 1;
        }

        listings.push(Listing {
            id: record.id,
            room_type: record.room_type,
            neighbourhood: record.neighbourhood,
            latitude: record.latitude,
            longitude: record.longitude,
            price: record.price,
            last_review,
        });
    }

    if bad_dates > 0 {
        log::debug!(
            "{}: {bad_dates} rows with an unparseable last_review",
            path.display()
        );
    }

    let total = listings.len();
    let listings = policy.apply(listings);
    if listings.len() < total {
        log::info!(
            "{}: sampled {} of {total} listings",
            path.display(),
            listings.len()
        );
    }

    Ok(listings)
}

/// Parses a `last_review` cell. Returns `None` for empty or malformed dates.
#[must_use]
pub fn parse_review_date(s: &str) -> Option<NaiveDate> {
    if s.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(s, REVIEW_DATE_FORMAT).ok()
}
