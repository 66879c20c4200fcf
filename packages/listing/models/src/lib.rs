#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Property listing row and room type definitions.
//!
//! A [`Listing`] is one row of a city's `markers_listings.csv`, projected
//! down to the columns the map needs. [`RoomType`] is the fixed set of
//! room categories that get their own marker layer.

use chrono::NaiveDate;
use strum_macros::{Display, EnumString};

/// Room category of a listing.
///
/// Each variant is drawn as its own marker layer. Rows whose `room_type`
/// does not parse into one of these are left off the map.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
)]
pub enum RoomType {
    /// A whole home or apartment
    #[strum(serialize = "Entire home/apt")]
    EntireHome,
    /// A private room in a shared home
    #[strum(serialize = "Private room")]
    PrivateRoom,
    /// A shared room
    #[strum(serialize = "Shared room")]
    SharedRoom,
}

impl RoomType {
    /// Returns the marker color used for this room type.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::EntireHome => "#FFBA00",
            Self::PrivateRoom => "#087FBF",
            Self::SharedRoom => "#FF0700",
        }
    }

    /// Returns all variants of this enum, in layer order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::EntireHome, Self::PrivateRoom, Self::SharedRoom]
    }
}

/// A single listing row.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    /// Listing identifier.
    pub id: u64,
    /// Raw room type text as it appears in the CSV.
    pub room_type: String,
    /// Neighbourhood name.
    pub neighbourhood: String,
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Longitude (WGS84).
    pub longitude: f64,
    /// Nightly price.
    pub price: f64,
    /// Date of the most recent review, if any.
    pub last_review: Option<NaiveDate>,
}

impl Listing {
    /// Parses the raw `room_type` into a [`RoomType`].
    ///
    /// Returns `None` for room types outside the known set.
    #[must_use]
    pub fn room_kind(&self) -> Option<RoomType> {
        self.room_type.parse().ok()
    }

    /// Returns the price truncated to whole currency units.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn whole_price(&self) -> i64 {
        self.price as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(room_type: &str, price: f64) -> Listing {
        Listing {
            id: 2539,
            room_type: room_type.to_string(),
            neighbourhood: "Kensington".to_string(),
            latitude: 40.647_49,
            longitude: -73.972_37,
            price,
            last_review: None,
        }
    }

    #[test]
    fn room_types_parse_from_csv_text() {
        for room_type in RoomType::all() {
            let parsed: RoomType = room_type.to_string().parse().unwrap();
            assert_eq!(parsed, *room_type);
        }
        assert_eq!(
            listing("Entire home/apt", 1.0).room_kind(),
            Some(RoomType::EntireHome)
        );
        assert_eq!(
            listing("Shared room", 1.0).room_kind(),
            Some(RoomType::SharedRoom)
        );
    }

    #[test]
    fn unknown_room_type_has_no_kind() {
        assert_eq!(listing("Hotel room", 1.0).room_kind(), None);
        assert_eq!(listing("private room", 1.0).room_kind(), None);
    }

    #[test]
    fn colors_are_distinct() {
        let colors: std::collections::BTreeSet<&str> =
            RoomType::all().iter().map(|r| r.color()).collect();
        assert_eq!(colors.len(), RoomType::all().len());
    }

    #[test]
    fn whole_price_truncates() {
        assert_eq!(listing("Private room", 149.99).whole_price(), 149);
        assert_eq!(listing("Private room", 80.0).whole_price(), 80);
    }
}
