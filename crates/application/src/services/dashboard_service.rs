//! Dashboard refresh use case
//!
//! Fetches current conditions and forecasts for one place, normalizes them
//! and publishes the result. Refreshes may overlap; each takes a ticket from
//! a generation counter before its first request and only the newest ticket
//! may publish. An older refresh finishing late gets
//! [`ApplicationError::Superseded`] and leaves the published dashboard alone.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use domain::{CurrentConditions, GeoLocation, LocationQuery, NormalizedForecast};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{LocationSource, WeatherPort};
use crate::services::forecast_normalizer;
use crate::services::location_service::LocationService;

/// Everything one refresh produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    /// Current conditions as reported
    pub current: CurrentConditions,
    /// Daily and hourly series
    pub forecast: NormalizedForecast,
    /// What was asked for
    pub query: LocationQuery,
    /// How the query was obtained
    pub source: LocationSource,
    /// When the refresh completed
    pub fetched_at: DateTime<Utc>,
}

/// Refresh behaviour
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardSettings {
    /// Request the 1-hour feed and pass it through
    pub hourly_feed: bool,
}

/// Orchestrates weather fetching for the dashboard
pub struct DashboardService {
    weather: Arc<dyn WeatherPort>,
    locations: LocationService,
    settings: DashboardSettings,
    generation: AtomicU64,
    latest: RwLock<Option<Arc<Dashboard>>>,
}

impl std::fmt::Debug for DashboardService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardService")
            .field("locations", &self.locations)
            .field("settings", &self.settings)
            .field("generation", &self.generation())
            .finish_non_exhaustive()
    }
}

impl DashboardService {
    /// Create a service with default settings
    #[must_use]
    pub fn new(weather: Arc<dyn WeatherPort>, locations: LocationService) -> Self {
        Self {
            weather,
            locations,
            settings: DashboardSettings::default(),
            generation: AtomicU64::new(0),
            latest: RwLock::new(None),
        }
    }

    /// Override refresh settings
    #[must_use]
    pub const fn with_settings(mut self, settings: DashboardSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Newest ticket handed out so far
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Most recently published dashboard
    #[must_use]
    pub fn latest(&self) -> Option<Arc<Dashboard>> {
        self.latest.read().clone()
    }

    /// Resolve the location, then refresh
    ///
    /// `manual` wins over the automatic sources.
    pub async fn refresh_auto(
        &self,
        manual: Option<LocationQuery>,
    ) -> Result<Arc<Dashboard>, ApplicationError> {
        let (query, source) = self.locations.resolve(manual).await?;
        self.refresh(query, source).await
    }

    /// Fetch, normalize and publish the dashboard for `query`
    ///
    /// # Errors
    ///
    /// Propagates weather port failures, normalization failures as
    /// `ApplicationError::Domain`, and returns `Superseded` when a newer
    /// refresh started before this one completed.
    #[instrument(skip_all, fields(query = %query, source = %source))]
    pub async fn refresh(
        &self,
        query: LocationQuery,
        source: LocationSource,
    ) -> Result<Arc<Dashboard>, ApplicationError> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(ticket, "Refresh started");

        let current = match &query {
            LocationQuery::City(city) => self.weather.current_by_city(city).await?,
            LocationQuery::Coordinates(location) => {
                self.weather.current_by_location(location).await?
            },
        };

        let location = resolve_coordinates(&current, &query)?;

        let hourly = if self.settings.hourly_feed {
            match self.weather.hourly_forecast(&location).await {
                Ok(feed) => Some(feed),
                Err(e) => {
                    warn!(error = %e, "Hourly feed unavailable, interpolating");
                    None
                },
            }
        } else {
            None
        };

        let feed = self.weather.three_hour_forecast(&location).await?;
        let forecast = forecast_normalizer::normalize(&current, &feed, hourly.as_deref())?;

        let dashboard = Arc::new(Dashboard {
            current,
            forecast,
            query,
            source,
            fetched_at: Utc::now(),
        });

        let mut latest = self.latest.write();
        let newest = self.generation.load(Ordering::SeqCst);
        if newest != ticket {
            debug!(ticket, newest, "Discarding stale refresh");
            return Err(ApplicationError::Superseded { newer: newest });
        }
        *latest = Some(Arc::clone(&dashboard));
        drop(latest);

        info!(
            ticket,
            place = %dashboard.current.place_name,
            days = dashboard.forecast.daily.len(),
            hours = dashboard.forecast.hourly.len(),
            "Dashboard refreshed"
        );
        Ok(dashboard)
    }
}

/// Coordinates for the forecast requests
///
/// The provider's resolved position wins; a coordinate query is the
/// fallback.
fn resolve_coordinates(
    current: &CurrentConditions,
    query: &LocationQuery,
) -> Result<GeoLocation, ApplicationError> {
    current
        .location
        .or_else(|| query.coordinates())
        .ok_or_else(|| {
            ApplicationError::ExternalService(format!(
                "No coordinates returned for {}",
                current.place_name
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{GeolocationPort, LocationFailure, MockGeolocationPort, MockWeatherPort};
    use async_trait::async_trait;
    use domain::{
        CityQuery, ForecastFeed, HourlySample, HourlySource, RawForecastSample, WeatherCondition,
    };
    use tokio::sync::Notify;

    const START: i64 = 1_714_953_600;

    fn city(name: &str) -> LocationQuery {
        LocationQuery::City(CityQuery::new(name).unwrap())
    }

    fn conditions(name: &str) -> CurrentConditions {
        let mut current = CurrentConditions::new(name, 12.0);
        current.location = Some(GeoLocation::london());
        current
    }

    fn feed() -> ForecastFeed {
        ForecastFeed::new(
            (0..9)
                .map(|i| {
                    RawForecastSample::new(
                        START + i * 3 * 3600,
                        10.0 + i as f64,
                        Some(WeatherCondition::Clouds),
                    )
                })
                .collect(),
        )
    }

    fn mock_weather() -> MockWeatherPort {
        let mut mock = MockWeatherPort::new();
        mock.expect_current_by_city()
            .returning(|c| Ok(conditions(c.as_str())));
        mock.expect_three_hour_forecast()
            .returning(|_| Ok(feed()));
        mock
    }

    #[tokio::test]
    async fn refresh_publishes_dashboard() {
        let mut weather = mock_weather();
        weather.expect_hourly_forecast().never();
        let service = DashboardService::new(Arc::new(weather), LocationService::new());

        let dashboard = service
            .refresh(city("London"), LocationSource::Manual)
            .await
            .unwrap();

        assert_eq!(dashboard.current.place_name, "London");
        assert_eq!(dashboard.forecast.hourly.len(), 24);
        assert_eq!(dashboard.forecast.hourly_source, HourlySource::Interpolated);
        assert_eq!(dashboard.source, LocationSource::Manual);
        assert_eq!(service.latest().unwrap(), dashboard);
        assert_eq!(service.generation(), 1);
    }

    #[tokio::test]
    async fn hourly_feed_is_passed_through() {
        let mut weather = mock_weather();
        weather.expect_hourly_forecast().times(1).returning(|_| {
            Ok((0..30)
                .map(|h| HourlySample::new(START + h * 3600, 5.0, vec![WeatherCondition::Rain]))
                .collect())
        });
        let service = DashboardService::new(Arc::new(weather), LocationService::new())
            .with_settings(DashboardSettings { hourly_feed: true });

        let dashboard = service
            .refresh(city("London"), LocationSource::Manual)
            .await
            .unwrap();
        assert_eq!(dashboard.forecast.hourly_source, HourlySource::Passthrough);
        assert_eq!(dashboard.forecast.hourly.len(), 24);
    }

    #[tokio::test]
    async fn failing_hourly_feed_falls_back_to_interpolation() {
        let mut weather = mock_weather();
        weather
            .expect_hourly_forecast()
            .returning(|_| Err(ApplicationError::ExternalService("401".into())));
        let service = DashboardService::new(Arc::new(weather), LocationService::new())
            .with_settings(DashboardSettings { hourly_feed: true });

        let dashboard = service
            .refresh(city("London"), LocationSource::Manual)
            .await
            .unwrap();
        assert_eq!(dashboard.forecast.hourly_source, HourlySource::Interpolated);
    }

    #[tokio::test]
    async fn unknown_city_is_not_found() {
        let mut weather = MockWeatherPort::new();
        weather
            .expect_current_by_city()
            .returning(|_| Err(ApplicationError::NotFound("City".into())));
        weather.expect_three_hour_forecast().never();
        let service = DashboardService::new(Arc::new(weather), LocationService::new());

        let err = service
            .refresh(city("Atlantis"), LocationSource::Manual)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "City not found");
        assert!(service.latest().is_none());
    }

    #[tokio::test]
    async fn coordinates_fall_back_to_query() {
        let mut weather = MockWeatherPort::new();
        weather
            .expect_current_by_location()
            .returning(|_| Ok(CurrentConditions::new("Somewhere", 20.0)));
        weather
            .expect_three_hour_forecast()
            .withf(|loc| *loc == GeoLocation::tokyo())
            .returning(|_| Ok(feed()));
        let service = DashboardService::new(Arc::new(weather), LocationService::new());

        let dashboard = service
            .refresh(
                LocationQuery::Coordinates(GeoLocation::tokyo()),
                LocationSource::IpLookup,
            )
            .await
            .unwrap();
        assert_eq!(dashboard.source, LocationSource::IpLookup);
    }

    #[tokio::test]
    async fn city_without_coordinates_fails() {
        let mut weather = MockWeatherPort::new();
        weather
            .expect_current_by_city()
            .returning(|_| Ok(CurrentConditions::new("Nowhere", 1.0)));
        let service = DashboardService::new(Arc::new(weather), LocationService::new());

        let err = service
            .refresh(city("Nowhere"), LocationSource::Manual)
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::ExternalService(_)));
    }

    #[tokio::test]
    async fn malformed_forecast_surfaces_field() {
        let mut weather = MockWeatherPort::new();
        weather
            .expect_current_by_city()
            .returning(|c| Ok(conditions(c.as_str())));
        weather.expect_three_hour_forecast().returning(|_| {
            Ok(ForecastFeed::new(vec![RawForecastSample::new(
                START,
                f64::NAN,
                None,
            )]))
        });
        let service = DashboardService::new(Arc::new(weather), LocationService::new());

        let err = service
            .refresh(city("London"), LocationSource::Manual)
            .await
            .unwrap_err();
        match err {
            ApplicationError::Domain(e) => assert_eq!(e.field(), Some("forecast[0].temperature")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn refresh_auto_uses_location_sources() {
        let mut weather = MockWeatherPort::new();
        weather
            .expect_current_by_location()
            .returning(|_| Ok(conditions("Ip Town")));
        weather
            .expect_three_hour_forecast()
            .returning(|_| Ok(feed()));

        let mut ip = MockGeolocationPort::new();
        ip.expect_source().return_const(LocationSource::IpLookup);
        ip.expect_locate().returning(|| Ok(GeoLocation::london()));
        let locations = LocationService::new().with_provider(Arc::new(ip));

        let service = DashboardService::new(Arc::new(weather), locations);
        let dashboard = service.refresh_auto(None).await.unwrap();
        assert_eq!(dashboard.source, LocationSource::IpLookup);
        assert_eq!(dashboard.current.place_name, "Ip Town");
    }

    #[tokio::test]
    async fn refresh_auto_reports_location_failure() {
        let mut weather = MockWeatherPort::new();
        weather.expect_current_by_location().never();

        let mut device = MockGeolocationPort::new();
        device.expect_source().return_const(LocationSource::Device);
        device
            .expect_locate()
            .returning(|| Err(LocationFailure::PermissionDenied));
        let locations =
            LocationService::new().with_provider(Arc::new(device) as Arc<dyn GeolocationPort>);

        let service = DashboardService::new(Arc::new(weather), locations);
        let err = service.refresh_auto(None).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Location permission denied. You can also search by city."
        );
    }

    /// Weather port whose "Slow" city blocks until released
    struct GatedWeather {
        gate: Arc<Notify>,
    }

    #[async_trait]
    impl WeatherPort for GatedWeather {
        async fn current_by_city(
            &self,
            city: &CityQuery,
        ) -> Result<CurrentConditions, ApplicationError> {
            if city.as_str() == "Slow" {
                self.gate.notified().await;
            }
            Ok(conditions(city.as_str()))
        }

        async fn current_by_location(
            &self,
            _location: &GeoLocation,
        ) -> Result<CurrentConditions, ApplicationError> {
            Ok(conditions("Coordinates"))
        }

        async fn three_hour_forecast(
            &self,
            _location: &GeoLocation,
        ) -> Result<ForecastFeed, ApplicationError> {
            Ok(feed())
        }

        async fn hourly_forecast(
            &self,
            _location: &GeoLocation,
        ) -> Result<Vec<HourlySample>, ApplicationError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn stale_refresh_does_not_overwrite_newer() {
        let gate = Arc::new(Notify::new());
        let weather = GatedWeather {
            gate: Arc::clone(&gate),
        };
        let service = Arc::new(DashboardService::new(
            Arc::new(weather),
            LocationService::new(),
        ));

        let slow = {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.refresh(city("Slow"), LocationSource::Manual).await })
        };
        while service.generation() < 1 {
            tokio::task::yield_now().await;
        }

        let fast = service
            .refresh(city("Fast"), LocationSource::Manual)
            .await
            .unwrap();
        assert_eq!(fast.current.place_name, "Fast");

        gate.notify_one();
        let err = slow.await.unwrap().unwrap_err();
        assert!(err.is_superseded());
        assert!(matches!(err, ApplicationError::Superseded { newer: 2 }));
        assert_eq!(service.latest().unwrap().current.place_name, "Fast");
    }
}
