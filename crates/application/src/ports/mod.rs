//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod geolocation_port;
mod preference_store;
mod weather_port;

#[cfg(test)]
pub use geolocation_port::MockGeolocationPort;
pub use geolocation_port::{GeolocationPort, LocationFailure, LocationSource};
#[cfg(test)]
pub use preference_store::MockPreferenceStorePort;
pub use preference_store::PreferenceStorePort;
#[cfg(test)]
pub use weather_port::MockWeatherPort;
pub use weather_port::WeatherPort;
