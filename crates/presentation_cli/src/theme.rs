//! Background theme selection
//!
//! The dashboard background is a two-stop gradient picked from the current
//! condition and the dark-mode preference. Colours use Tailwind palette
//! names so a web front end can consume the JSON output unchanged.

use domain::WeatherCondition;
use serde::Serialize;

/// Two-stop vertical gradient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Gradient {
    /// Top colour
    pub from: &'static str,
    /// Bottom colour
    pub to: &'static str,
}

impl Gradient {
    const fn new(from: &'static str, to: &'static str) -> Self {
        Self { from, to }
    }
}

impl std::fmt::Display for Gradient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} → {}", self.from, self.to)
    }
}

/// Resolved theme for one render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Theme {
    /// Dark mode preference
    pub dark_mode: bool,
    /// Background gradient
    pub background: Gradient,
    /// Foreground text colour
    pub text: &'static str,
}

impl Theme {
    /// Theme for a condition; `None` when no weather is shown yet
    #[must_use]
    pub const fn for_condition(condition: Option<WeatherCondition>, dark_mode: bool) -> Self {
        Self {
            dark_mode,
            background: background_gradient(condition, dark_mode),
            text: if dark_mode { "gray-100" } else { "white" },
        }
    }
}

/// Background gradient for a condition
#[must_use]
pub const fn background_gradient(condition: Option<WeatherCondition>, dark_mode: bool) -> Gradient {
    use WeatherCondition as C;

    let (light, dark) = match condition {
        Some(C::Clear) => (
            Gradient::new("blue-400", "yellow-300"),
            Gradient::new("yellow-500", "gray-900"),
        ),
        Some(C::Clouds) => (
            Gradient::new("gray-400", "gray-700"),
            Gradient::new("gray-800", "gray-900"),
        ),
        Some(C::Rain) => (
            Gradient::new("gray-600", "blue-800"),
            Gradient::new("blue-900", "gray-900"),
        ),
        Some(C::Snow) => (
            Gradient::new("white", "blue-200"),
            Gradient::new("blue-200", "gray-800"),
        ),
        Some(C::Thunderstorm) => (
            Gradient::new("purple-700", "gray-900"),
            Gradient::new("purple-900", "black"),
        ),
        Some(C::Drizzle) => (
            Gradient::new("blue-300", "blue-500"),
            Gradient::new("blue-700", "gray-800"),
        ),
        Some(C::Mist | C::Haze | C::Fog) => (
            Gradient::new("gray-300", "gray-500"),
            Gradient::new("gray-700", "gray-900"),
        ),
        _ => (
            Gradient::new("blue-400", "blue-600"),
            Gradient::new("gray-900", "gray-800"),
        ),
    };

    if dark_mode { dark } else { light }
}
