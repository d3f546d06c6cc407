//! Domain entities - observations, normalized series and preferences

mod day_night;
mod forecast;
mod observation;
mod preferences;
mod weather_condition;

pub use day_night::DayNightWindow;
pub use forecast::{
    DailySummary, HourlyPoint, HourlySource, MAX_DAILY_SUMMARIES, MAX_HOURLY_POINTS,
    NormalizedForecast,
};
pub use observation::{CurrentConditions, ForecastFeed, HourlySample, RawForecastSample};
pub use preferences::Preferences;
pub use weather_condition::WeatherCondition;
