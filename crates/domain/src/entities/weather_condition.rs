//! Weather condition groups
//!
//! Mirrors the condition groups OpenWeatherMap reports in its `weather[].main`
//! field. Anything a provider sends that is not one of the known groups maps
//! to [`WeatherCondition::Unknown`]; a record with no condition at all is
//! treated as [`WeatherCondition::Clear`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse weather condition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    /// Clear sky
    #[default]
    Clear,
    /// Any cloud cover
    Clouds,
    /// Drizzle
    Drizzle,
    /// Rain
    Rain,
    /// Thunderstorm
    Thunderstorm,
    /// Snow
    Snow,
    /// Mist
    Mist,
    /// Smoke
    Smoke,
    /// Haze
    Haze,
    /// Dust whirls or dust
    Dust,
    /// Fog
    Fog,
    /// Sand
    Sand,
    /// Volcanic ash
    Ash,
    /// Squalls
    Squall,
    /// Tornado
    Tornado,
    /// A group the provider reported that we do not know
    Unknown,
}

impl WeatherCondition {
    /// Parse a provider group name such as `"Clouds"` (case-insensitive)
    #[must_use]
    pub fn from_group(group: &str) -> Self {
        match group.trim().to_ascii_lowercase().as_str() {
            "clear" => Self::Clear,
            "clouds" => Self::Clouds,
            "drizzle" => Self::Drizzle,
            "rain" => Self::Rain,
            "thunderstorm" => Self::Thunderstorm,
            "snow" => Self::Snow,
            "mist" => Self::Mist,
            "smoke" => Self::Smoke,
            "haze" => Self::Haze,
            "dust" => Self::Dust,
            "fog" => Self::Fog,
            "sand" => Self::Sand,
            "ash" => Self::Ash,
            "squall" => Self::Squall,
            "tornado" => Self::Tornado,
            _ => Self::Unknown,
        }
    }

    /// Provider group name
    #[must_use]
    pub const fn group(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::Clouds => "Clouds",
            Self::Drizzle => "Drizzle",
            Self::Rain => "Rain",
            Self::Thunderstorm => "Thunderstorm",
            Self::Snow => "Snow",
            Self::Mist => "Mist",
            Self::Smoke => "Smoke",
            Self::Haze => "Haze",
            Self::Dust => "Dust",
            Self::Fog => "Fog",
            Self::Sand => "Sand",
            Self::Ash => "Ash",
            Self::Squall => "Squall",
            Self::Tornado => "Tornado",
            Self::Unknown => "Unknown",
        }
    }

    /// Human-readable description
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Clear => "Clear sky",
            Self::Clouds => "Cloudy",
            Self::Drizzle => "Drizzle",
            Self::Rain => "Rain",
            Self::Thunderstorm => "Thunderstorm",
            Self::Snow => "Snow",
            Self::Mist => "Mist",
            Self::Smoke => "Smoke",
            Self::Haze => "Haze",
            Self::Dust => "Dust",
            Self::Fog => "Fog",
            Self::Sand => "Sand",
            Self::Ash => "Volcanic ash",
            Self::Squall => "Squalls",
            Self::Tornado => "Tornado",
            Self::Unknown => "Unknown",
        }
    }

    /// Emoji for terminal output
    #[must_use]
    pub const fn emoji(&self, is_daytime: bool) -> &'static str {
        match self {
            Self::Clear if is_daytime => "☀️",
            Self::Clear => "🌙",
            Self::Clouds => "☁️",
            Self::Drizzle | Self::Rain => "🌧️",
            Self::Thunderstorm => "⛈️",
            Self::Snow => "❄️",
            Self::Mist | Self::Smoke | Self::Haze | Self::Dust | Self::Fog | Self::Sand => "🌫️",
            Self::Ash => "🌋",
            Self::Squall => "💨",
            Self::Tornado => "🌪️",
            Self::Unknown => "❓",
        }
    }

    /// OpenWeatherMap icon code (`"10d"`, `"01n"`, ...) for this condition
    #[must_use]
    pub const fn icon_code(&self, is_daytime: bool) -> &'static str {
        match (self, is_daytime) {
            (Self::Clear | Self::Unknown, true) => "01d",
            (Self::Clear | Self::Unknown, false) => "01n",
            (Self::Clouds, true) => "03d",
            (Self::Clouds, false) => "03n",
            (Self::Drizzle, true) => "09d",
            (Self::Drizzle, false) => "09n",
            (Self::Rain, true) => "10d",
            (Self::Rain, false) => "10n",
            (Self::Thunderstorm, true) => "11d",
            (Self::Thunderstorm, false) => "11n",
            (Self::Snow, true) => "13d",
            (Self::Snow, false) => "13n",
            (_, true) => "50d",
            (_, false) => "50n",
        }
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl FromStr for WeatherCondition {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_group(s))
    }
}
