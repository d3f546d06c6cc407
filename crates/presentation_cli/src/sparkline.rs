//! 24-hour temperature sparkline
//!
//! Produces both SVG polyline points (for the JSON output) and a row of
//! unicode block characters for the terminal.

use serde::Serialize;

/// Chart width in SVG units
pub const WIDTH: f64 = 260.0;
/// Chart height in SVG units
pub const HEIGHT: f64 = 60.0;

const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Temperature chart for the hourly series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sparkline {
    /// SVG polyline `points` attribute, `"x,y x,y ..."`
    pub points: String,
    /// Terminal rendering
    pub blocks: String,
    /// Lowest temperature
    pub min: f64,
    /// Highest temperature
    pub max: f64,
}

impl Sparkline {
    /// Build a sparkline; `None` unless there are at least two values
    #[must_use]
    pub fn from_temperatures(temps: &[f64]) -> Option<Self> {
        if temps.len() < 2 {
            return None;
        }

        let min = temps.iter().copied().fold(f64::INFINITY, f64::min);
        let max = temps.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let range = (max - min).max(1.0);

        let step_x = WIDTH / (temps.len() - 1) as f64;

        let points = temps
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let x = i as f64 * step_x;
                let y = HEIGHT - (t - min) / range * HEIGHT;
                format!("{x:.2},{y:.2}")
            })
            .collect::<Vec<_>>()
            .join(" ");

        let blocks = temps
            .iter()
            .map(|t| {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let level = (((t - min) / range) * (BLOCKS.len() - 1) as f64).round() as usize;
                BLOCKS[level.min(BLOCKS.len() - 1)]
            })
            .collect();

        Some(Self {
            points,
            blocks,
            min,
            max,
        })
    }
}
