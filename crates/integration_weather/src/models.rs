//! Weather data models
//!
//! Response bodies of the OpenWeatherMap endpoints. Only the fields the
//! dashboard reads are modelled; everything else is ignored. Fields the API
//! omits for some places are optional.

use serde::{Deserialize, Serialize};

/// One entry of a `weather` array
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherEntry {
    /// Condition code (2xx thunderstorm, 3xx drizzle, ...)
    #[serde(default)]
    pub id: u16,
    /// Condition group ("Rain")
    #[serde(default)]
    pub main: String,
    /// Free-text description ("light rain")
    #[serde(default)]
    pub description: String,
    /// Icon code ("10d")
    #[serde(default)]
    pub icon: String,
}

impl WeatherEntry {
    /// Condition group for a condition code
    ///
    /// See <https://openweathermap.org/weather-conditions>.
    #[must_use]
    pub const fn group_for_id(id: u16) -> Option<&'static str> {
        let group = match id {
            200..=299 => "Thunderstorm",
            300..=399 => "Drizzle",
            500..=599 => "Rain",
            600..=699 => "Snow",
            701 => "Mist",
            711 => "Smoke",
            721 => "Haze",
            731 | 761 => "Dust",
            741 => "Fog",
            751 => "Sand",
            762 => "Ash",
            771 => "Squall",
            781 => "Tornado",
            800 => "Clear",
            801..=809 => "Clouds",
            _ => return None,
        };
        Some(group)
    }

    /// Condition group, from `main` or else derived from `id`
    #[must_use]
    pub fn group(&self) -> Option<&str> {
        let main = self.main.trim();
        if main.is_empty() {
            Self::group_for_id(self.id)
        } else {
            Some(main)
        }
    }

    /// Icon code, `None` when absent
    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        Some(self.icon.trim()).filter(|i| !i.is_empty())
    }

    /// Description, `None` when absent
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        Some(self.description.trim()).filter(|d| !d.is_empty())
    }
}

/// Temperature block shared by current and forecast responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainReadings {
    /// Temperature in the requested units
    pub temp: f64,
    /// Perceived temperature
    #[serde(default)]
    pub feels_like: Option<f64>,
    /// Relative humidity in percent, as reported
    #[serde(default)]
    pub humidity: Option<i64>,
}

/// Wind block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    /// Speed in m/s for metric units
    #[serde(default)]
    pub speed: Option<f64>,
}

/// Coordinates block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lon: f64,
}

/// `sys` block of the current weather response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SunTimes {
    /// Sunrise, unix seconds
    #[serde(default)]
    pub sunrise: Option<i64>,
    /// Sunset, unix seconds
    #[serde(default)]
    pub sunset: Option<i64>,
}

/// `GET /2.5/weather`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentResponse {
    /// Place name
    #[serde(default)]
    pub name: String,
    /// Temperature readings
    pub main: MainReadings,
    /// Conditions, most relevant first
    #[serde(default)]
    pub weather: Vec<WeatherEntry>,
    /// Wind readings
    #[serde(default)]
    pub wind: Option<Wind>,
    /// Offset from UTC in seconds
    #[serde(default)]
    pub timezone: Option<i32>,
    /// Resolved coordinates
    #[serde(default)]
    pub coord: Option<Coordinates>,
    /// Sunrise and sunset
    #[serde(default)]
    pub sys: Option<SunTimes>,
    /// Observation time, unix seconds
    #[serde(default)]
    pub dt: Option<i64>,
}

/// One 3-hour step of `GET /2.5/forecast`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Forecast time, unix seconds
    pub dt: i64,
    /// Temperature readings
    pub main: MainReadings,
    /// Conditions, most relevant first
    #[serde(default)]
    pub weather: Vec<WeatherEntry>,
}

/// `city` block of the forecast response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastCity {
    /// Place name
    #[serde(default)]
    pub name: Option<String>,
    /// Offset from UTC in seconds
    #[serde(default)]
    pub timezone: Option<i32>,
    /// Sunrise, unix seconds
    #[serde(default)]
    pub sunrise: Option<i64>,
    /// Sunset, unix seconds
    #[serde(default)]
    pub sunset: Option<i64>,
}

/// `GET /2.5/forecast`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    /// 3-hour steps, chronological
    #[serde(default)]
    pub list: Vec<ForecastEntry>,
    /// Place the forecast is for
    #[serde(default)]
    pub city: Option<ForecastCity>,
}

/// One hour of the One Call feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyEntry {
    /// Forecast time, unix seconds
    pub dt: i64,
    /// Temperature
    pub temp: f64,
    /// Conditions, most relevant first
    #[serde(default)]
    pub weather: Vec<WeatherEntry>,
}

/// `GET /3.0/onecall`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneCallResponse {
    /// Offset from UTC in seconds
    #[serde(default)]
    pub timezone_offset: Option<i32>,
    /// Hourly steps, chronological
    #[serde(default)]
    pub hourly: Vec<HourlyEntry>,
}

/// Error body, e.g. `{"cod":"404","message":"city not found"}`
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
