//! Weather service port
//!
//! Defines the interface for fetching raw weather records. Implementations
//! return provider data mapped into domain records; they do not normalize.

use async_trait::async_trait;
use domain::{CityQuery, CurrentConditions, ForecastFeed, GeoLocation, HourlySample};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for weather data retrieval
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherPort: Send + Sync {
    /// Current conditions for a place name
    ///
    /// Returns `ApplicationError::NotFound` when the provider does not know
    /// the place.
    async fn current_by_city(
        &self,
        city: &CityQuery,
    ) -> Result<CurrentConditions, ApplicationError>;

    /// Current conditions at coordinates
    async fn current_by_location(
        &self,
        location: &GeoLocation,
    ) -> Result<CurrentConditions, ApplicationError>;

    /// 3-hour-step forecast covering up to five days
    async fn three_hour_forecast(
        &self,
        location: &GeoLocation,
    ) -> Result<ForecastFeed, ApplicationError>;

    /// True 1-hour feed
    async fn hourly_forecast(
        &self,
        location: &GeoLocation,
    ) -> Result<Vec<HourlySample>, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn WeatherPort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn WeatherPort>();
    }
}
