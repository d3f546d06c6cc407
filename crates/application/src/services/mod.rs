//! Application services - Use case implementations

mod dashboard_service;
pub mod forecast_normalizer;
mod location_service;
mod preference_service;

pub use dashboard_service::{Dashboard, DashboardService, DashboardSettings};
pub use forecast_normalizer::normalize;
pub use location_service::LocationService;
pub use preference_service::PreferenceService;
