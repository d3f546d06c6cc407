//! Application layer - Use cases and orchestration
//!
//! Holds the forecast normalizer, the ports adapters implement, and the
//! services that tie location resolution, weather fetching and preferences
//! together.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
