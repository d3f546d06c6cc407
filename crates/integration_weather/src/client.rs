//! OpenWeatherMap client
//!
//! HTTP client for the OpenWeatherMap current weather, 5-day/3-hour forecast
//! and One Call endpoints.

use std::fmt;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::models::{ApiErrorBody, CurrentResponse, ForecastResponse, OneCallResponse};

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// No API key configured
    #[error("OpenWeatherMap API key is not configured")]
    MissingApiKey,

    /// The API rejected the key or the plan does not cover the endpoint
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The place is unknown to the API
    #[error("City not found")]
    NotFound,

    /// Connection to the weather service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the weather service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse response from weather service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid coordinates provided
    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Unit system requested from the API; the domain works in °C and m/s
const UNITS: &str = "metric";

/// Weather service configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// API base URL (default: <https://api.openweathermap.org/data>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key, sent as `appid`
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.openweathermap.org/data".to_string()
}

const fn default_timeout() -> u64 {
    10
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl fmt::Debug for WeatherConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Weather client trait for fetching weather data
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Current weather for a place name
    async fn current_by_city(&self, city: &str) -> Result<CurrentResponse, WeatherError>;

    /// Current weather at coordinates
    async fn current_by_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentResponse, WeatherError>;

    /// 5-day forecast in 3-hour steps
    async fn forecast(&self, latitude: f64, longitude: f64)
    -> Result<ForecastResponse, WeatherError>;

    /// One Call feed with 1-hour steps
    async fn one_call(&self, latitude: f64, longitude: f64)
    -> Result<OneCallResponse, WeatherError>;
}

/// OpenWeatherMap HTTP client implementation
#[derive(Debug)]
pub struct OpenWeatherMapClient {
    client: Client,
    config: WeatherConfig,
}

impl OpenWeatherMapClient {
    /// Create a new client with the given configuration
    ///
    /// A missing API key is reported per request, not here.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Whether an API key is configured
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key().is_ok()
    }

    fn api_key(&self) -> Result<&str, WeatherError> {
        self.config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(WeatherError::MissingApiKey)
    }

    /// Validate coordinates
    fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), WeatherError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(WeatherError::InvalidCoordinates);
        }
        Ok(())
    }

    fn coordinate_params(latitude: f64, longitude: f64) -> Vec<(&'static str, String)> {
        vec![("lat", latitude.to_string()), ("lon", longitude.to_string())]
    }

    /// GET `{base_url}{path}` with metric units and key appended, decoding JSON
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, WeatherError> {
        let api_key = self.api_key()?;
        let url = format!("{}{path}", self.config.base_url.trim_end_matches('/'));

        debug!(url = %url, "Fetching weather data");

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("units", UNITS), ("appid", api_key)])
            .send()
            .await
            .map_err(|e| WeatherError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ApiErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| format!("HTTP {status}"));
            return Err(map_status(status, message));
        }

        response
            .json()
            .await
            .map_err(|e| WeatherError::ParseError(e.to_string()))
    }
}

fn map_status(status: StatusCode, message: String) -> WeatherError {
    match status {
        StatusCode::NOT_FOUND => WeatherError::NotFound,
        StatusCode::UNAUTHORIZED => WeatherError::Unauthorized(message),
        StatusCode::TOO_MANY_REQUESTS => WeatherError::RateLimitExceeded,
        s if s.is_server_error() => {
            warn!(status = %s, "Weather service error");
            WeatherError::ServiceUnavailable(message)
        },
        _ => WeatherError::RequestFailed(message),
    }
}

#[async_trait]
impl WeatherClient for OpenWeatherMapClient {
    #[instrument(skip(self))]
    async fn current_by_city(&self, city: &str) -> Result<CurrentResponse, WeatherError> {
        self.get_json("/2.5/weather", &[("q", city.to_string())])
            .await
    }

    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude))]
    async fn current_by_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentResponse, WeatherError> {
        Self::validate_coordinates(latitude, longitude)?;
        self.get_json("/2.5/weather", &Self::coordinate_params(latitude, longitude))
            .await
    }

    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude))]
    async fn forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ForecastResponse, WeatherError> {
        Self::validate_coordinates(latitude, longitude)?;
        self.get_json("/2.5/forecast", &Self::coordinate_params(latitude, longitude))
            .await
    }

    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude))]
    async fn one_call(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<OneCallResponse, WeatherError> {
        Self::validate_coordinates(latitude, longitude)?;
        let mut params = Self::coordinate_params(latitude, longitude);
        params.push(("exclude", "minutely,alerts".to_string()));
        self.get_json("/3.0/onecall", &params).await
    }
}
