//! Integration configurations: OpenWeatherMap, location sources.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::default_true;

// ==============================
// Weather Configuration
// ==============================

/// OpenWeatherMap configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct WeatherAppConfig {
    /// API base URL
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,

    /// API key (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_secs: u64,

    /// Fetch the One Call 1-hour feed instead of interpolating
    ///
    /// One Call 3.0 needs its own subscription, so this is off by default.
    #[serde(default)]
    pub hourly_feed: bool,
}

fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data".to_string()
}

const fn default_weather_timeout() -> u64 {
    10
}

impl Default for WeatherAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            api_key: None,
            timeout_secs: default_weather_timeout(),
            hourly_feed: false,
        }
    }
}

impl std::fmt::Debug for WeatherAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherAppConfig")
            .field("base_url", &self.base_url)
            .field(
                "api_key",
                &if self.api_key.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("timeout_secs", &self.timeout_secs)
            .field("hourly_feed", &self.hourly_feed)
            .finish()
    }
}

impl WeatherAppConfig {
    /// Client configuration with the key exposed
    #[must_use]
    pub fn to_client_config(&self) -> integration_weather::WeatherConfig {
        integration_weather::WeatherConfig {
            base_url: self.base_url.clone(),
            api_key: self
                .api_key
                .as_ref()
                .map(|key| key.expose_secret().to_string()),
            timeout_secs: self.timeout_secs,
        }
    }
}

// ==============================
// Geolocation Configuration
// ==============================

/// Geographic location configuration (latitude/longitude pair)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GeoLocationConfig {
    /// Latitude (-90.0 to 90.0)
    pub latitude: f64,
    /// Longitude (-180.0 to 180.0)
    pub longitude: f64,
}

impl GeoLocationConfig {
    /// Convert to domain `GeoLocation` value object
    ///
    /// Returns `None` if coordinates are invalid.
    #[must_use]
    pub fn to_geo_location(&self) -> Option<domain::GeoLocation> {
        domain::GeoLocation::new(self.latitude, self.longitude).ok()
    }
}

/// Automatic location configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeolocationAppConfig {
    /// Whether automatic location is allowed at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Position of this device, if known
    ///
    /// Configured as inline table: `{ latitude = 52.52, longitude = 13.405 }`
    #[serde(default)]
    pub device_location: Option<GeoLocationConfig>,

    /// IP lookup base URL
    #[serde(default = "default_ip_base_url")]
    pub ip_base_url: String,

    /// IP lookup timeout in seconds
    #[serde(default = "default_geolocation_timeout")]
    pub timeout_secs: u64,
}

fn default_ip_base_url() -> String {
    "https://ipapi.co".to_string()
}

const fn default_geolocation_timeout() -> u64 {
    5
}

impl Default for GeolocationAppConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            device_location: None,
            ip_base_url: default_ip_base_url(),
            timeout_secs: default_geolocation_timeout(),
        }
    }
}

impl GeolocationAppConfig {
    /// IP lookup client configuration
    #[must_use]
    pub fn to_client_config(&self) -> integration_geolocation::GeolocationConfig {
        integration_geolocation::GeolocationConfig {
            base_url: self.ip_base_url.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}
