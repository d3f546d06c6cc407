//! Geolocation port
//!
//! A source of the user's position. Several sources are chained; each one
//! either yields coordinates or a reason it could not.

use async_trait::async_trait;
use domain::GeoLocation;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Why a location source produced no position
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationFailure {
    /// The user or configuration does not allow locating
    #[error("Location permission denied")]
    PermissionDenied,

    /// The source has no position to offer
    #[error("Location unavailable")]
    Unavailable,

    /// The source did not answer in time
    #[error("Location request timed out")]
    Timeout,

    /// Anything else
    #[error("Could not get your location")]
    Other(String),
}

/// Where a resolved location came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationSource {
    /// Position reported by the device
    Device,
    /// Position estimated from the public IP address
    IpLookup,
    /// City or coordinates entered by the user
    Manual,
}

impl fmt::Display for LocationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Device => write!(f, "device"),
            Self::IpLookup => write!(f, "ip lookup"),
            Self::Manual => write!(f, "manual"),
        }
    }
}

/// Port for a single location source
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeolocationPort: Send + Sync {
    /// Which kind of source this is
    fn source(&self) -> LocationSource;

    /// Current position
    async fn locate(&self) -> Result<GeoLocation, LocationFailure>;
}
