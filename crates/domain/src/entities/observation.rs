//! Raw provider records
//!
//! Typed inputs to forecast normalization. Optional fields are optional in
//! the type: a provider that omits humidity produces `humidity: None`, and
//! nothing downstream fails because of it.

use serde::{Deserialize, Serialize};

use super::WeatherCondition;
use crate::value_objects::{GeoLocation, Humidity, TimezoneOffset};

/// Current conditions at a place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Place name as resolved by the provider
    pub place_name: String,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Feels-like temperature in Celsius
    pub feels_like: Option<f64>,
    /// Condition group
    pub condition: WeatherCondition,
    /// Free-text description ("light rain")
    pub description: Option<String>,
    /// Provider icon code ("10d")
    pub icon: Option<String>,
    /// Relative humidity
    pub humidity: Option<Humidity>,
    /// Wind speed in m/s
    pub wind_speed: Option<f64>,
    /// Offset from UTC to the place's local time
    pub timezone_offset: TimezoneOffset,
    /// Coordinates the provider resolved the place to
    pub location: Option<GeoLocation>,
    /// Sunrise, unix seconds
    pub sunrise: Option<i64>,
    /// Sunset, unix seconds
    pub sunset: Option<i64>,
    /// Observation time, unix seconds
    pub observed_at: Option<i64>,
}

impl CurrentConditions {
    /// Minimal record with only the required fields set
    #[must_use]
    pub fn new(place_name: impl Into<String>, temperature: f64) -> Self {
        Self {
            place_name: place_name.into(),
            temperature,
            feels_like: None,
            condition: WeatherCondition::default(),
            description: None,
            icon: None,
            humidity: None,
            wind_speed: None,
            timezone_offset: TimezoneOffset::UTC,
            location: None,
            sunrise: None,
            sunset: None,
            observed_at: None,
        }
    }

    /// Set the sunrise/sunset pair
    #[must_use]
    pub const fn with_sun(mut self, sunrise: i64, sunset: i64) -> Self {
        self.sunrise = Some(sunrise);
        self.sunset = Some(sunset);
        self
    }

    /// Set the timezone offset
    #[must_use]
    pub const fn with_offset(mut self, offset: TimezoneOffset) -> Self {
        self.timezone_offset = offset;
        self
    }

    /// Description to show, falling back to the condition's own
    #[must_use]
    pub fn display_description(&self) -> &str {
        self.description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| self.condition.description())
    }
}

/// One slot of a 3-hour-step forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawForecastSample {
    /// Slot start, unix seconds
    pub timestamp: i64,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Condition group, if the provider sent one
    pub condition: Option<WeatherCondition>,
    /// Provider icon code
    pub icon: Option<String>,
    /// Sunrise for the slot's day, unix seconds
    pub sunrise: Option<i64>,
    /// Sunset for the slot's day, unix seconds
    pub sunset: Option<i64>,
}

impl RawForecastSample {
    /// Sample with a timestamp, temperature and condition
    #[must_use]
    pub const fn new(timestamp: i64, temperature: f64, condition: Option<WeatherCondition>) -> Self {
        Self {
            timestamp,
            temperature,
            condition,
            icon: None,
            sunrise: None,
            sunset: None,
        }
    }

    /// Attach a provider icon code
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// A 3-hour forecast as delivered, optionally with its own timezone offset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastFeed {
    /// Samples in ascending timestamp order
    pub samples: Vec<RawForecastSample>,
    /// Offset reported by the forecast container
    pub timezone_offset: Option<TimezoneOffset>,
}

impl ForecastFeed {
    /// Feed without a container offset
    #[must_use]
    pub const fn new(samples: Vec<RawForecastSample>) -> Self {
        Self {
            samples,
            timezone_offset: None,
        }
    }

    /// Set the container offset
    #[must_use]
    pub const fn with_offset(mut self, offset: TimezoneOffset) -> Self {
        self.timezone_offset = Some(offset);
        self
    }
}

/// One entry of a true 1-hour feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlySample {
    /// Hour start, unix seconds
    pub timestamp: i64,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Listed conditions, most significant first
    pub conditions: Vec<WeatherCondition>,
    /// Provider icon code for the first condition
    pub icon: Option<String>,
}

impl HourlySample {
    /// Hourly sample without an icon
    #[must_use]
    pub const fn new(timestamp: i64, temperature: f64, conditions: Vec<WeatherCondition>) -> Self {
        Self {
            timestamp,
            temperature,
            conditions,
            icon: None,
        }
    }

    /// First listed condition, clear when none is listed
    #[must_use]
    pub fn primary_condition(&self) -> WeatherCondition {
        self.conditions.first().copied().unwrap_or_default()
    }
}
