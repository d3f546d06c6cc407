//! Application configuration
//!
//! Split into focused sub-modules:
//! - `integrations`: OpenWeatherMap and location sources
//! - `preferences`: where the theme preference is stored
//!
//! Sources are layered: built-in defaults, then `skycast.toml` in the
//! working directory (or an explicit file), then `SKYCAST_*` environment
//! variables. Nested keys use a double underscore, e.g.
//! `SKYCAST_WEATHER__API_KEY`.

mod integrations;
mod preferences;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use integrations::{GeoLocationConfig, GeolocationAppConfig, WeatherAppConfig};
pub use preferences::PreferencesConfig;

use crate::telemetry::TelemetryConfig;

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Environment variable prefix
pub const ENV_PREFIX: &str = "SKYCAST";

/// Default config file name, without extension
pub const DEFAULT_CONFIG_FILE: &str = "skycast";

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// OpenWeatherMap settings
    #[serde(default)]
    pub weather: WeatherAppConfig,

    /// Automatic location sources
    #[serde(default)]
    pub geolocation: GeolocationAppConfig,

    /// Theme preference storage
    #[serde(default)]
    pub preferences: PreferencesConfig,

    /// Logging
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from defaults, a config file and the environment
    ///
    /// With `path` the file must exist; without it `skycast.toml` in the
    /// working directory is read if present.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or a value has the wrong
    /// type.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        Self::load_with_env(path, Self::environment())
    }

    /// Load with an explicit environment source
    pub(crate) fn load_with_env(
        path: Option<&Path>,
        env: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let config = config::Config::builder()
            .add_source(file)
            // Override with environment variables (e.g., SKYCAST_WEATHER__API_KEY)
            .add_source(env)
            .build()?;

        let app: Self = config.try_deserialize()?;
        debug!(config = ?app, "Configuration loaded");
        Ok(app)
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }
}
