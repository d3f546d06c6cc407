//! Application-level errors

use domain::DomainError;
use thiserror::Error;

use crate::ports::LocationFailure;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The provider does not know the requested place
    #[error("{0} not found")]
    NotFound(String),

    /// External service error
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// No automatic location source produced a position
    #[error("{0}. You can also search by city.")]
    Location(#[from] LocationFailure),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A newer refresh started before this one finished
    #[error("Superseded by a newer refresh (generation {newer})")]
    Superseded {
        /// Generation that replaced this one
        newer: u64,
    },

    /// Preference storage failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Whether the error only means a newer result exists
    pub const fn is_superseded(&self) -> bool {
        matches!(self, Self::Superseded { .. })
    }
}
