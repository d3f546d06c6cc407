//! Weather adapter - Implements WeatherPort using integration_weather

use application::error::ApplicationError;
use application::ports::WeatherPort;
use async_trait::async_trait;
use domain::{
    CityQuery, CurrentConditions, DomainError, ForecastFeed, GeoLocation, Humidity, HourlySample,
    RawForecastSample, TimezoneOffset, WeatherCondition,
};
use integration_weather::{
    CurrentResponse, ForecastResponse, OneCallResponse, OpenWeatherMapClient, WeatherClient,
    WeatherConfig, WeatherEntry, WeatherError,
};
use tracing::{debug, instrument};

/// Adapter for weather data using the OpenWeatherMap API
pub struct WeatherAdapter {
    client: OpenWeatherMapClient,
}

impl std::fmt::Debug for WeatherAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherAdapter")
            .field("client", &"OpenWeatherMapClient")
            .field("has_api_key", &self.client.has_api_key())
            .finish()
    }
}

impl WeatherAdapter {
    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: WeatherConfig) -> Result<Self, ApplicationError> {
        let client = OpenWeatherMapClient::new(config)
            .map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self { client })
    }

    /// Map integration weather error to application error
    ///
    /// `resource` names what a 404 failed to find, e.g. "City" or "Forecast".
    fn map_error(err: WeatherError, resource: &str) -> ApplicationError {
        match err {
            WeatherError::MissingApiKey => ApplicationError::Configuration(
                "OpenWeatherMap API key is not configured (set SKYCAST_WEATHER__API_KEY)".into(),
            ),
            WeatherError::Unauthorized(e) => {
                ApplicationError::Configuration(format!("OpenWeatherMap rejected the request: {e}"))
            },
            WeatherError::NotFound => ApplicationError::NotFound(resource.to_string()),
            WeatherError::ConnectionFailed(e)
            | WeatherError::RequestFailed(e)
            | WeatherError::ServiceUnavailable(e) => ApplicationError::ExternalService(e),
            WeatherError::ParseError(e) => ApplicationError::Internal(e),
            WeatherError::InvalidCoordinates => DomainError::InvalidCoordinates.into(),
            WeatherError::RateLimitExceeded => ApplicationError::RateLimited,
        }
    }

    /// Condition of the first listed weather entry
    fn map_condition(entries: &[WeatherEntry]) -> Option<WeatherCondition> {
        entries
            .first()
            .and_then(WeatherEntry::group)
            .map(WeatherCondition::from_group)
    }

    /// Convert a current weather response to domain conditions
    fn map_current(response: CurrentResponse) -> CurrentConditions {
        let primary = response.weather.first();
        let sun = response.sys.unwrap_or_default();

        CurrentConditions {
            place_name: response.name.trim().to_string(),
            temperature: response.main.temp,
            feels_like: response.main.feels_like,
            condition: Self::map_condition(&response.weather).unwrap_or_default(),
            description: primary.and_then(WeatherEntry::description).map(str::to_string),
            icon: primary.and_then(WeatherEntry::icon).map(str::to_string),
            humidity: response.main.humidity.map(Humidity::from_reading),
            wind_speed: response.wind.and_then(|w| w.speed),
            timezone_offset: response
                .timezone
                .map_or(TimezoneOffset::UTC, TimezoneOffset::from_seconds),
            location: response
                .coord
                .and_then(|c| GeoLocation::new(c.lat, c.lon).ok()),
            sunrise: sun.sunrise,
            sunset: sun.sunset,
            observed_at: response.dt,
        }
    }

    /// Convert a 3-hour forecast response to a domain feed
    fn map_forecast(response: ForecastResponse) -> ForecastFeed {
        let city = response.city.unwrap_or_default();

        let samples = response
            .list
            .into_iter()
            .map(|entry| RawForecastSample {
                timestamp: entry.dt,
                temperature: entry.main.temp,
                condition: Self::map_condition(&entry.weather),
                icon: entry
                    .weather
                    .first()
                    .and_then(WeatherEntry::icon)
                    .map(str::to_string),
                sunrise: city.sunrise,
                sunset: city.sunset,
            })
            .collect();

        let feed = ForecastFeed::new(samples);
        match city.timezone {
            Some(seconds) => feed.with_offset(TimezoneOffset::from_seconds(seconds)),
            None => feed,
        }
    }

    /// Convert a One Call response to hourly samples
    fn map_hourly(response: OneCallResponse) -> Vec<HourlySample> {
        response
            .hourly
            .into_iter()
            .map(|entry| HourlySample {
                timestamp: entry.dt,
                temperature: entry.temp,
                conditions: entry
                    .weather
                    .iter()
                    .filter_map(WeatherEntry::group)
                    .map(WeatherCondition::from_group)
                    .collect(),
                icon: entry
                    .weather
                    .first()
                    .and_then(WeatherEntry::icon)
                    .map(str::to_string),
            })
            .collect()
    }
}

#[async_trait]
impl WeatherPort for WeatherAdapter {
    #[instrument(skip(self), fields(city = %city))]
    async fn current_by_city(
        &self,
        city: &CityQuery,
    ) -> Result<CurrentConditions, ApplicationError> {
        let response = self
            .client
            .current_by_city(city.as_str())
            .await
            .map_err(|e| Self::map_error(e, "City"))?;

        let current = Self::map_current(response);
        debug!(
            place = %current.place_name,
            temperature = current.temperature,
            condition = %current.condition,
            "Retrieved current weather"
        );
        Ok(current)
    }

    #[instrument(skip(self), fields(lat = location.latitude(), lon = location.longitude()))]
    async fn current_by_location(
        &self,
        location: &GeoLocation,
    ) -> Result<CurrentConditions, ApplicationError> {
        let response = self
            .client
            .current_by_coordinates(location.latitude(), location.longitude())
            .await
            .map_err(|e| Self::map_error(e, "Weather for location"))?;

        let current = Self::map_current(response);
        debug!(
            place = %current.place_name,
            temperature = current.temperature,
            "Retrieved current weather"
        );
        Ok(current)
    }

    #[instrument(skip(self), fields(lat = location.latitude(), lon = location.longitude()))]
    async fn three_hour_forecast(
        &self,
        location: &GeoLocation,
    ) -> Result<ForecastFeed, ApplicationError> {
        let response = self
            .client
            .forecast(location.latitude(), location.longitude())
            .await
            .map_err(|e| Self::map_error(e, "Forecast"))?;

        let feed = Self::map_forecast(response);
        debug!(samples = feed.samples.len(), "Retrieved 3-hour forecast");
        Ok(feed)
    }

    #[instrument(skip(self), fields(lat = location.latitude(), lon = location.longitude()))]
    async fn hourly_forecast(
        &self,
        location: &GeoLocation,
    ) -> Result<Vec<HourlySample>, ApplicationError> {
        let response = self
            .client
            .one_call(location.latitude(), location.longitude())
            .await
            .map_err(|e| Self::map_error(e, "Hourly forecast"))?;

        let hourly = Self::map_hourly(response);
        debug!(hours = hourly.len(), "Retrieved hourly feed");
        Ok(hourly)
    }
}
