//! Value Objects - Immutable, identity-less domain primitives

mod city_query;
mod geo_location;
mod humidity;
mod location_query;
mod timezone_offset;

pub use city_query::CityQuery;
pub use geo_location::GeoLocation;
pub use humidity::{Humidity, InvalidHumidity};
pub use location_query::LocationQuery;
pub use timezone_offset::TimezoneOffset;
