//! Normalized forecast series
//!
//! Output of forecast normalization: at most five daily summaries and at
//! most 24 hourly points, plus the day/night window they were classified
//! against. Every value is built fresh per fetch and never mutated.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{DayNightWindow, WeatherCondition};
use crate::errors::DomainError;
use crate::value_objects::TimezoneOffset;

/// Most daily summaries a forecast carries
pub const MAX_DAILY_SUMMARIES: usize = 5;

/// Most hourly points a forecast carries
pub const MAX_HOURLY_POINTS: usize = 24;

/// Summary of one local calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    /// Local calendar date
    pub date: NaiveDate,
    /// Short weekday name ("Mon")
    pub weekday_label: String,
    /// Lowest sample temperature of the day
    pub min_temperature: f64,
    /// Highest sample temperature of the day
    pub max_temperature: f64,
    /// Condition of the sample closest to local noon
    pub representative_condition: WeatherCondition,
    /// Icon code for the representative condition
    pub icon: String,
    /// Whether the day's first sample falls in daylight
    pub is_daytime: bool,
}

impl DailySummary {
    /// Local date as `YYYY-MM-DD`
    #[must_use]
    pub fn date_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// One point of the 24-hour series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyPoint {
    /// Unix seconds
    pub timestamp: i64,
    /// Local wall-clock time
    pub local_time: NaiveDateTime,
    /// Local hour as `HH:00`
    pub hour_label: String,
    /// Temperature in Celsius, possibly fractional
    pub temperature: f64,
    /// Condition group
    pub condition: WeatherCondition,
    /// Icon code
    pub icon: String,
    /// Whether the point falls in daylight
    pub is_daytime: bool,
}

/// Where the hourly series came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HourlySource {
    /// Taken from a true 1-hour feed
    Passthrough,
    /// Interpolated from 3-hour samples
    Interpolated,
}

/// Daily and hourly series for one fetch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedForecast {
    /// Daily summaries, chronological
    pub daily: Vec<DailySummary>,
    /// Hourly points, chronological
    pub hourly: Vec<HourlyPoint>,
    /// How `hourly` was produced
    pub hourly_source: HourlySource,
    /// Window used for daytime classification; `None` when the current
    /// record carried no sunrise/sunset and every point counts as daytime.
    /// Only the time of day of its sunrise and sunset is compared.
    pub day_night: Option<DayNightWindow>,
    /// Offset every local time in this forecast was computed with
    pub timezone_offset: TimezoneOffset,
}

impl NormalizedForecast {
    /// Classify an arbitrary unix timestamp with this forecast's window
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDateTime` if the timestamp cannot be
    /// represented in local time.
    pub fn is_daytime_at(&self, timestamp: i64) -> Result<bool, DomainError> {
        let local = self.timezone_offset.to_local(timestamp)?;
        Ok(self.day_night.is_none_or(|w| w.is_daytime(local)))
    }

    /// Hourly temperatures in order, for charting
    #[must_use]
    pub fn hourly_temperatures(&self) -> Vec<f64> {
        self.hourly.iter().map(|p| p.temperature).collect()
    }
}
