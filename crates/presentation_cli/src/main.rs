//! Skycast CLI
//!
//! Weather dashboard for the terminal: current conditions, a 24-hour
//! temperature chart, hourly strip and 5-day outlook.

#![allow(clippy::print_stdout)]

mod render;
mod sparkline;
mod theme;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use application::{DashboardService, DashboardSettings, LocationService, PreferenceService};
use clap::{Parser, Subcommand, ValueEnum};
use domain::{CityQuery, GeoLocation, LocationQuery, Preferences};
use infrastructure::{
    AppConfig, DeviceLocationAdapter, IpGeolocationAdapter, JsonFilePreferenceStore,
    WeatherAdapter, init_telemetry,
};
use tracing::warn;

use crate::render::DashboardView;
use crate::theme::Theme;

/// Skycast CLI
#[derive(Parser)]
#[command(name = "skycast")]
#[command(author, version, about = "Skycast weather dashboard", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Configuration file (default: ./skycast.toml if present)
    #[arg(short, long, global = true, env = "SKYCAST_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the dashboard for a city
    ///
    /// Example: skycast search "San Francisco"
    Search {
        /// City name, optionally with country code ("Paris,FR")
        city: String,
    },

    /// Show the dashboard for the current location
    ///
    /// Without coordinates the configured device position is tried first,
    /// then an IP lookup.
    Here {
        /// Latitude in degrees
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude in degrees
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,
    },

    /// Show or change the dark-mode preference
    Theme {
        /// What to do
        #[arg(value_enum, default_value_t = ThemeAction::Show)]
        action: ThemeAction,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ThemeAction {
    /// Print the current theme
    Show,
    /// Flip dark mode
    Toggle,
    /// Turn dark mode on
    Dark,
    /// Turn dark mode off
    Light,
}

/// Log filter override for `-v` flags; `None` keeps the configured filter
const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

/// Wire adapters into the dashboard service
fn dashboard_service(config: &AppConfig) -> anyhow::Result<DashboardService> {
    let weather = WeatherAdapter::with_config(config.weather.to_client_config())?;

    let mut locations = LocationService::new().with_provider(Arc::new(
        DeviceLocationAdapter::from_config(&config.geolocation),
    ));
    if config.geolocation.enabled {
        let ip = IpGeolocationAdapter::with_config(config.geolocation.to_client_config())?;
        locations = locations.with_provider(Arc::new(ip));
    }

    Ok(DashboardService::new(Arc::new(weather), locations).with_settings(DashboardSettings {
        hourly_feed: config.weather.hourly_feed,
    }))
}

async fn show_dashboard(
    config: &AppConfig,
    preferences: &PreferenceService,
    manual: Option<LocationQuery>,
    json: bool,
) -> anyhow::Result<()> {
    let service = dashboard_service(config)?;

    let dashboard = service
        .refresh_auto(manual.clone())
        .await
        .map_err(|e| anyhow::anyhow!(render::error_message(&e, manual.as_ref())))?;

    let prefs = preferences.load().await.unwrap_or_else(|e| {
        warn!(error = %e, "Using default preferences");
        Preferences::default()
    });
    let theme = Theme::for_condition(Some(dashboard.current.condition), prefs.dark_mode);

    if json {
        let view = DashboardView::new(&dashboard, theme);
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", render::dashboard(&dashboard, &theme));
    }
    Ok(())
}

async fn theme_command(
    preferences: &PreferenceService,
    action: ThemeAction,
    json: bool,
) -> anyhow::Result<()> {
    let prefs = match action {
        ThemeAction::Show => preferences.load().await?,
        ThemeAction::Toggle => preferences.toggle_dark_mode().await?,
        ThemeAction::Dark => preferences.set_dark_mode(true).await?,
        ThemeAction::Light => preferences.set_dark_mode(false).await?,
    };
    let theme = Theme::for_condition(None, prefs.dark_mode);

    if json {
        println!("{}", serde_json::to_string_pretty(&theme)?);
    } else {
        let mode = if theme.dark_mode { "dark" } else { "light" };
        println!("Theme: {mode} ({})", theme.background);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config =
        AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(filter) = log_filter_from_verbosity(cli.verbose) {
        config.telemetry.log_filter = filter.to_string();
    }
    init_telemetry(&config.telemetry)?;

    let store = JsonFilePreferenceStore::new(config.preferences.resolved_path());
    let preferences = PreferenceService::new(Arc::new(store));

    match cli.command {
        Commands::Search { city } => {
            let query = LocationQuery::City(CityQuery::new(&city)?);
            show_dashboard(&config, &preferences, Some(query), cli.json).await
        },

        Commands::Here { lat, lon } => {
            let manual = match (lat, lon) {
                (Some(lat), Some(lon)) => {
                    Some(LocationQuery::Coordinates(GeoLocation::new(lat, lon)?))
                },
                _ => None,
            };
            show_dashboard(&config, &preferences, manual, cli.json).await
        },

        Commands::Theme { action } => theme_command(&preferences, action, cli.json).await,
    }
}
