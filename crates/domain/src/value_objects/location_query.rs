//! What a weather lookup is keyed by

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{CityQuery, GeoLocation};

/// A weather lookup target: a place name or a coordinate pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum LocationQuery {
    /// Resolve by city name
    City(CityQuery),
    /// Resolve by coordinates
    Coordinates(GeoLocation),
}

impl LocationQuery {
    /// Coordinates, if this query carries them
    #[must_use]
    pub const fn coordinates(&self) -> Option<GeoLocation> {
        match self {
            Self::Coordinates(location) => Some(*location),
            Self::City(_) => None,
        }
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::City(city) => write!(f, "{city}"),
            Self::Coordinates(location) => write!(f, "{location}"),
        }
    }
}

impl From<CityQuery> for LocationQuery {
    fn from(city: CityQuery) -> Self {
        Self::City(city)
    }
}

impl From<GeoLocation> for LocationQuery {
    fn from(location: GeoLocation) -> Self {
        Self::Coordinates(location)
    }
}
