//! IP geolocation integration
//!
//! Approximate position lookup from the public IP address, used when no
//! city was given and the device offers no position.

pub mod client;
mod models;

pub use client::{GeolocationClient, GeolocationConfig, GeolocationError, IpApiClient};
pub use models::{IpLocation, IpLookupResponse};
