//! Device location adapter
//!
//! A terminal has no positioning hardware, so the device position is the one
//! configured under `[geolocation] device_location`. Turning geolocation off
//! behaves like a denied permission prompt.

use application::ports::{GeolocationPort, LocationFailure, LocationSource};
use async_trait::async_trait;
use domain::GeoLocation;
use tracing::debug;

use crate::config::GeolocationAppConfig;

/// Configured device position
#[derive(Debug, Clone)]
pub struct DeviceLocationAdapter {
    allowed: bool,
    location: Option<GeoLocation>,
}

impl DeviceLocationAdapter {
    /// Device reporting a fixed position
    #[must_use]
    pub const fn fixed(location: GeoLocation) -> Self {
        Self {
            allowed: true,
            location: Some(location),
        }
    }

    /// Device that refuses to share its position
    #[must_use]
    pub const fn denied() -> Self {
        Self {
            allowed: false,
            location: None,
        }
    }

    /// Build from configuration
    ///
    /// Invalid configured coordinates count as no position.
    #[must_use]
    pub fn from_config(config: &GeolocationAppConfig) -> Self {
        Self {
            allowed: config.enabled,
            location: config
                .device_location
                .as_ref()
                .and_then(|loc| loc.to_geo_location()),
        }
    }
}

#[async_trait]
impl GeolocationPort for DeviceLocationAdapter {
    fn source(&self) -> LocationSource {
        LocationSource::Device
    }

    async fn locate(&self) -> Result<GeoLocation, LocationFailure> {
        if !self.allowed {
            return Err(LocationFailure::PermissionDenied);
        }
        let location = self.location.ok_or(LocationFailure::Unavailable)?;
        debug!(location = %location, "Using device location");
        Ok(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeoLocationConfig;

    #[tokio::test]
    async fn fixed_location_is_returned() {
        let adapter = DeviceLocationAdapter::fixed(GeoLocation::tokyo());
        assert_eq!(adapter.locate().await, Ok(GeoLocation::tokyo()));
    }

    #[tokio::test]
    async fn denied_reports_permission() {
        let adapter = DeviceLocationAdapter::denied();
        assert_eq!(
            adapter.locate().await,
            Err(LocationFailure::PermissionDenied)
        );
    }

    #[tokio::test]
    async fn missing_position_is_unavailable() {
        let adapter = DeviceLocationAdapter::from_config(&GeolocationAppConfig::default());
        assert_eq!(adapter.locate().await, Err(LocationFailure::Unavailable));
    }

    #[tokio::test]
    async fn disabled_config_denies_even_with_position() {
        let config = GeolocationAppConfig {
            enabled: false,
            device_location: Some(GeoLocationConfig {
                latitude: 35.6895,
                longitude: 139.6917,
            }),
            ..Default::default()
        };
        let adapter = DeviceLocationAdapter::from_config(&config);
        assert_eq!(
            adapter.locate().await,
            Err(LocationFailure::PermissionDenied)
        );
    }

    #[tokio::test]
    async fn invalid_configured_position_is_unavailable() {
        let config = GeolocationAppConfig {
            device_location: Some(GeoLocationConfig {
                latitude: 95.0,
                longitude: 0.0,
            }),
            ..Default::default()
        };
        let adapter = DeviceLocationAdapter::from_config(&config);
        assert_eq!(adapter.locate().await, Err(LocationFailure::Unavailable));
    }

    #[test]
    fn reports_device_source() {
        assert_eq!(
            DeviceLocationAdapter::denied().source(),
            LocationSource::Device
        );
    }
}
