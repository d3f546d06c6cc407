//! Domain layer for Skycast
//!
//! Contains the weather vocabulary shared by every other crate: raw
//! observations as they arrive from a provider, the normalized forecast
//! series derived from them, value objects, and domain errors.
//! This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
