//! City search value object

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// A trimmed, non-empty city name as typed by the user
///
/// The provider resolves the actual place; this only guarantees the text is
/// worth sending ("Paris", "Paris,FR", "São Paulo").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CityQuery(String);

impl CityQuery {
    /// Longest accepted query, in characters
    pub const MAX_LEN: usize = 100;

    /// Create a city query from user input
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCityQuery` if the trimmed input is empty,
    /// longer than [`Self::MAX_LEN`] characters, or contains control characters.
    pub fn new(input: &str) -> Result<Self, DomainError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidCityQuery(
                "city name must not be empty".to_string(),
            ));
        }
        if trimmed.chars().count() > Self::MAX_LEN {
            return Err(DomainError::InvalidCityQuery(format!(
                "city name is longer than {} characters",
                Self::MAX_LEN
            )));
        }
        if trimmed.chars().any(char::is_control) {
            return Err(DomainError::InvalidCityQuery(
                "city name contains control characters".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the query text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CityQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CityQuery {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<CityQuery> for String {
    fn from(query: CityQuery) -> Self {
        query.0
    }
}
