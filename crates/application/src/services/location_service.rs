//! Location resolution
//!
//! Resolves which place to show: a manual query wins; otherwise the
//! configured sources are tried in order until one yields coordinates.

use std::sync::Arc;

use domain::LocationQuery;
use tracing::{debug, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{GeolocationPort, LocationFailure, LocationSource};

/// Chains location sources, first success wins
#[derive(Clone, Default)]
pub struct LocationService {
    providers: Vec<Arc<dyn GeolocationPort>>,
}

impl std::fmt::Debug for LocationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sources: Vec<LocationSource> = self.providers.iter().map(|p| p.source()).collect();
        f.debug_struct("LocationService")
            .field("providers", &sources)
            .finish()
    }
}

impl LocationService {
    /// Service without automatic sources; only manual queries resolve
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a source, tried after the ones already added
    #[must_use]
    pub fn with_provider(mut self, provider: Arc<dyn GeolocationPort>) -> Self {
        self.providers.push(provider);
        self
    }

    /// Number of automatic sources
    #[must_use]
    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Resolve the query to fetch weather for
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Location` carrying the last source's
    /// failure when no source yields a position, or
    /// `LocationFailure::Unavailable` when there are no sources at all.
    #[instrument(skip(self), fields(providers = self.providers.len()))]
    pub async fn resolve(
        &self,
        manual: Option<LocationQuery>,
    ) -> Result<(LocationQuery, LocationSource), ApplicationError> {
        if let Some(query) = manual {
            debug!(query = %query, "Using manual location");
            return Ok((query, LocationSource::Manual));
        }

        let mut last_failure = LocationFailure::Unavailable;
        for provider in &self.providers {
            let source = provider.source();
            match provider.locate().await {
                Ok(location) => {
                    debug!(%source, location = %location, "Location resolved");
                    return Ok((LocationQuery::Coordinates(location), source));
                },
                Err(failure) => {
                    warn!(%source, error = %failure, "Location source failed");
                    last_failure = failure;
                },
            }
        }

        Err(ApplicationError::Location(last_failure))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MockGeolocationPort;
    use domain::{CityQuery, GeoLocation};

    fn provider(
        source: LocationSource,
        result: Result<GeoLocation, LocationFailure>,
    ) -> Arc<dyn GeolocationPort> {
        let mut mock = MockGeolocationPort::new();
        mock.expect_source().return_const(source);
        mock.expect_locate().returning(move || result.clone());
        Arc::new(mock)
    }

    #[tokio::test]
    async fn manual_query_skips_providers() {
        let mut mock = MockGeolocationPort::new();
        mock.expect_locate().never();
        let service = LocationService::new().with_provider(Arc::new(mock));

        let query = LocationQuery::City(CityQuery::new("Oslo").unwrap());
        let (resolved, source) = service.resolve(Some(query.clone())).await.unwrap();
        assert_eq!(resolved, query);
        assert_eq!(source, LocationSource::Manual);
    }

    #[tokio::test]
    async fn first_success_wins() {
        let service = LocationService::new()
            .with_provider(provider(
                LocationSource::Device,
                Ok(GeoLocation::tokyo()),
            ))
            .with_provider(provider(
                LocationSource::IpLookup,
                Ok(GeoLocation::london()),
            ));

        let (query, source) = service.resolve(None).await.unwrap();
        assert_eq!(query, LocationQuery::Coordinates(GeoLocation::tokyo()));
        assert_eq!(source, LocationSource::Device);
    }

    #[tokio::test]
    async fn falls_back_after_failure() {
        let service = LocationService::new()
            .with_provider(provider(
                LocationSource::Device,
                Err(LocationFailure::PermissionDenied),
            ))
            .with_provider(provider(
                LocationSource::IpLookup,
                Ok(GeoLocation::london()),
            ));

        let (query, source) = service.resolve(None).await.unwrap();
        assert_eq!(query, LocationQuery::Coordinates(GeoLocation::london()));
        assert_eq!(source, LocationSource::IpLookup);
    }

    #[tokio::test]
    async fn reports_last_failure() {
        let service = LocationService::new()
            .with_provider(provider(
                LocationSource::Device,
                Err(LocationFailure::PermissionDenied),
            ))
            .with_provider(provider(LocationSource::IpLookup, Err(LocationFailure::Timeout)));

        let err = service.resolve(None).await.unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Location(LocationFailure::Timeout)
        ));
        assert_eq!(
            err.to_string(),
            "Location request timed out. You can also search by city."
        );
    }

    #[tokio::test]
    async fn no_providers_is_unavailable() {
        let err = LocationService::new().resolve(None).await.unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Location(LocationFailure::Unavailable)
        ));
    }

    #[test]
    fn debug_lists_sources() {
        let service = LocationService::new()
            .with_provider(provider(LocationSource::IpLookup, Err(LocationFailure::Timeout)));
        assert_eq!(service.provider_count(), 1);
        assert!(format!("{service:?}").contains("IpLookup"));
    }
}
