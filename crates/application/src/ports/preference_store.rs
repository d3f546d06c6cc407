//! Preference store port

use async_trait::async_trait;
use domain::Preferences;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for persisting user preferences
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PreferenceStorePort: Send + Sync {
    /// Stored preferences, `None` if nothing was saved yet
    async fn load(&self) -> Result<Option<Preferences>, ApplicationError>;

    /// Persist preferences, replacing what was stored
    async fn save(&self, preferences: &Preferences) -> Result<(), ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn PreferenceStorePort>();
    }
}
