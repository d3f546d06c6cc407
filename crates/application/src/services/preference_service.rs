//! Theme preference handling

use std::sync::Arc;

use domain::Preferences;
use tracing::{debug, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::PreferenceStorePort;

/// Loads and updates the persisted dark-mode flag
pub struct PreferenceService {
    store: Arc<dyn PreferenceStorePort>,
}

impl std::fmt::Debug for PreferenceService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferenceService").finish_non_exhaustive()
    }
}

impl PreferenceService {
    /// Create a service over a store
    #[must_use]
    pub fn new(store: Arc<dyn PreferenceStorePort>) -> Self {
        Self { store }
    }

    /// Stored preferences, defaults when nothing was saved
    pub async fn load(&self) -> Result<Preferences, ApplicationError> {
        Ok(self.store.load().await?.unwrap_or_default())
    }

    /// Stored preferences, `None` when the store cannot be read
    async fn readable(&self) -> Option<Preferences> {
        match self.load().await {
            Ok(prefs) => Some(prefs),
            Err(e) => {
                warn!(error = %e, "Stored preferences unreadable, they will be overwritten");
                None
            },
        }
    }

    async fn save(&self, dark_mode: bool) -> Result<Preferences, ApplicationError> {
        let updated = Preferences::with_dark_mode(dark_mode);
        self.store.save(&updated).await?;
        debug!(dark_mode, "Theme preference saved");
        Ok(updated)
    }

    /// Set dark mode, writing when the value changes or the stored value is
    /// unreadable
    #[instrument(skip(self))]
    pub async fn set_dark_mode(&self, dark_mode: bool) -> Result<Preferences, ApplicationError> {
        match self.readable().await {
            Some(current) if current.dark_mode == dark_mode => Ok(current),
            _ => self.save(dark_mode).await,
        }
    }

    /// Flip dark mode and persist it
    ///
    /// An unreadable stored value counts as the default.
    #[instrument(skip(self))]
    pub async fn toggle_dark_mode(&self) -> Result<Preferences, ApplicationError> {
        let current = self.readable().await.unwrap_or_default();
        self.save(!current.dark_mode).await
    }
}
