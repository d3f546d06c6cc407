//! Terminal rendering of the dashboard

use std::fmt::Write as _;

use application::{ApplicationError, Dashboard};
use domain::{CurrentConditions, DailySummary, HourlyPoint, LocationQuery};
use serde::Serialize;

use crate::sparkline::Sparkline;
use crate::theme::Theme;

/// Round half up, the way temperatures are shown everywhere
#[allow(clippy::cast_possible_truncation)]
fn rounded(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Place name, temperature, description and available stats
#[must_use]
pub fn weather_card(current: &CurrentConditions) -> String {
    let mut out = String::new();

    if !current.place_name.is_empty() {
        let _ = writeln!(out, "{}", current.place_name);
    }
    let _ = writeln!(
        out,
        "{} {}°C",
        current.condition.emoji(true),
        rounded(current.temperature)
    );
    let _ = writeln!(out, "{}", capitalize(current.display_description()));

    let mut stats = Vec::new();
    if let Some(humidity) = current.humidity {
        stats.push(format!("💧 Humidity {humidity}"));
    }
    if let Some(wind) = current.wind_speed {
        stats.push(format!("💨 Wind {} m/s", rounded(wind)));
    }
    if let Some(feels_like) = current.feels_like {
        stats.push(format!("🌡️ Feels like {}°C", rounded(feels_like)));
    }
    if !stats.is_empty() {
        let _ = writeln!(out, "{}", stats.join("   "));
    }

    out
}

/// Sparkline block with its "Now" and "+24h" labels
#[must_use]
pub fn temperature_chart(hourly: &[HourlyPoint]) -> Option<String> {
    let temps: Vec<f64> = hourly.iter().map(|p| p.temperature).collect();
    let line = Sparkline::from_temperatures(&temps)?;

    let width = line.blocks.chars().count();
    let gap = width.saturating_sub("Now".len() + "+24h".len());
    Some(format!(
        "Next 24h temperature\n{}\nNow{}+24h\n",
        line.blocks,
        " ".repeat(gap)
    ))
}

/// One line per hour: label, icon, rounded temperature
#[must_use]
pub fn hourly_strip(hourly: &[HourlyPoint]) -> String {
    if hourly.is_empty() {
        return String::new();
    }

    let mut out = String::from("Hourly\n");
    for point in hourly {
        let _ = writeln!(
            out,
            "  {}  {}  {}°",
            point.hour_label,
            point.condition.emoji(point.is_daytime),
            rounded(point.temperature)
        );
    }
    out
}

/// One line per day: weekday, icon, rounded `min° / max°`
#[must_use]
pub fn daily_list(daily: &[DailySummary]) -> String {
    if daily.is_empty() {
        return String::new();
    }

    let mut out = String::from("Next 5 Days\n");
    for day in daily {
        let _ = writeln!(
            out,
            "  {}  {}  {}° / {}°",
            day.weekday_label,
            day.representative_condition.emoji(day.is_daytime),
            rounded(day.min_temperature),
            rounded(day.max_temperature)
        );
    }
    out
}

/// Full dashboard as text
#[must_use]
pub fn dashboard(dashboard: &Dashboard, theme: &Theme) -> String {
    let mut sections = vec![weather_card(&dashboard.current)];

    if let Some(chart) = temperature_chart(&dashboard.forecast.hourly) {
        sections.push(chart);
    }
    for section in [
        hourly_strip(&dashboard.forecast.hourly),
        daily_list(&dashboard.forecast.daily),
    ] {
        if !section.is_empty() {
            sections.push(section);
        }
    }

    let mode = if theme.dark_mode { "dark" } else { "light" };
    sections.push(format!(
        "Theme: {mode} ({})  ·  via {}\n",
        theme.background, dashboard.source
    ));

    sections.join("\n")
}

/// JSON document for `--json`
#[derive(Debug, Serialize)]
pub struct DashboardView<'a> {
    /// The refresh result
    #[serde(flatten)]
    pub dashboard: &'a Dashboard,
    /// Temperature chart, absent with fewer than two hourly points
    pub sparkline: Option<Sparkline>,
    /// Resolved theme
    pub theme: Theme,
}

impl<'a> DashboardView<'a> {
    /// Assemble the view for a dashboard
    #[must_use]
    pub fn new(dashboard: &'a Dashboard, theme: Theme) -> Self {
        Self {
            sparkline: Sparkline::from_temperatures(&dashboard.forecast.hourly_temperatures()),
            dashboard,
            theme,
        }
    }
}

/// Message shown to the user for a failed refresh
#[must_use]
pub fn error_message(err: &ApplicationError, query: Option<&LocationQuery>) -> String {
    match (err, query) {
        (ApplicationError::NotFound(what), Some(LocationQuery::City(city))) if what == "City" => {
            format!("City not found: {city}")
        },
        (ApplicationError::Location(_), _) => err.to_string(),
        (ApplicationError::Configuration(message), _) => message.clone(),
        (ApplicationError::RateLimited, _) => {
            "Weather service rate limit reached, try again in a minute".to_string()
        },
        (ApplicationError::ExternalService(_), _) => {
            format!("Failed to fetch weather data: {err}")
        },
        _ => err.to_string(),
    }
}
