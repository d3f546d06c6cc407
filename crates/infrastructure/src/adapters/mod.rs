//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod device_location_adapter;
mod ip_geolocation_adapter;
mod weather_adapter;

pub use device_location_adapter::DeviceLocationAdapter;
pub use ip_geolocation_adapter::IpGeolocationAdapter;
pub use weather_adapter::WeatherAdapter;
