//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: OpenWeatherMap
//! weather data, device and IP location sources, and the JSON preference
//! file. Also owns configuration loading and logging setup.

pub mod adapters;
pub mod config;
pub mod persistence;
pub mod telemetry;

pub use adapters::*;
pub use config::{
    AppConfig, GeoLocationConfig, GeolocationAppConfig, PreferencesConfig, WeatherAppConfig,
};
pub use persistence::JsonFilePreferenceStore;
pub use telemetry::{TelemetryConfig, TelemetryError, init_telemetry};
