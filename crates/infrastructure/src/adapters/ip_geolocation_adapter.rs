//! IP geolocation adapter - Implements GeolocationPort using integration_geolocation

use application::ports::{GeolocationPort, LocationFailure, LocationSource};
use async_trait::async_trait;
use domain::GeoLocation;
use integration_geolocation::{
    GeolocationClient, GeolocationConfig, GeolocationError, IpApiClient,
};
use tracing::{debug, instrument};

use application::error::ApplicationError;

/// Approximate position from the public IP address
pub struct IpGeolocationAdapter {
    client: IpApiClient,
}

impl std::fmt::Debug for IpGeolocationAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IpGeolocationAdapter")
            .field("client", &"IpApiClient")
            .finish()
    }
}

impl IpGeolocationAdapter {
    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: GeolocationConfig) -> Result<Self, ApplicationError> {
        let client =
            IpApiClient::new(config).map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self { client })
    }

    fn map_error(err: GeolocationError) -> LocationFailure {
        match err {
            GeolocationError::Timeout => LocationFailure::Timeout,
            GeolocationError::LookupFailed(_) => LocationFailure::Unavailable,
            other => LocationFailure::Other(other.to_string()),
        }
    }
}

#[async_trait]
impl GeolocationPort for IpGeolocationAdapter {
    fn source(&self) -> LocationSource {
        LocationSource::IpLookup
    }

    #[instrument(skip(self))]
    async fn locate(&self) -> Result<GeoLocation, LocationFailure> {
        let found = self.client.lookup().await.map_err(Self::map_error)?;

        let location = GeoLocation::new(found.latitude, found.longitude)
            .map_err(|_| LocationFailure::Unavailable)?;

        debug!(
            location = %location,
            city = found.city.as_deref().unwrap_or("unknown"),
            "Located via IP lookup"
        );
        Ok(location)
    }
}
