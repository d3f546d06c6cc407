//! OpenWeatherMap weather integration
//!
//! Client for the OpenWeatherMap API (<https://openweathermap.org/api>):
//! current conditions, the 5-day forecast in 3-hour steps, and the optional
//! One Call feed in 1-hour steps. Requires an API key.

pub mod client;
mod models;

pub use client::{OpenWeatherMapClient, WeatherClient, WeatherConfig, WeatherError};
pub use models::{
    Coordinates, CurrentResponse, ForecastCity, ForecastEntry, ForecastResponse, HourlyEntry,
    MainReadings, OneCallResponse, SunTimes, WeatherEntry, Wind,
};
