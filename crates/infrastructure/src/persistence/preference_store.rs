//! JSON file preference store
//!
//! Stores `{"dark_mode": true}` at a single path. An absent file means
//! nothing was saved yet.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use application::error::ApplicationError;
use application::ports::PreferenceStorePort;
use async_trait::async_trait;
use domain::Preferences;
use tokio::fs;
use tracing::{debug, instrument};

/// Preference store backed by a JSON file
#[derive(Debug, Clone)]
pub struct JsonFilePreferenceStore {
    path: PathBuf,
}

impl JsonFilePreferenceStore {
    /// Create a store for the given file path
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File the preferences are kept in
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn storage_error(&self, action: &str, err: impl std::fmt::Display) -> ApplicationError {
        ApplicationError::Storage(format!(
            "Failed to {action} {}: {err}",
            self.path.display()
        ))
    }
}

#[async_trait]
impl PreferenceStorePort for JsonFilePreferenceStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Result<Option<Preferences>, ApplicationError> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No stored preferences");
                return Ok(None);
            },
            Err(e) => return Err(self.storage_error("read", e)),
        };

        let preferences: Preferences =
            serde_json::from_str(&contents).map_err(|e| self.storage_error("parse", e))?;

        debug!(dark_mode = preferences.dark_mode, "Loaded preferences");
        Ok(Some(preferences))
    }

    #[instrument(skip(self), fields(path = %self.path.display(), dark_mode = preferences.dark_mode))]
    async fn save(&self, preferences: &Preferences) -> Result<(), ApplicationError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| self.storage_error("create directory for", e))?;
        }

        let json = serde_json::to_string_pretty(preferences)
            .map_err(|e| self.storage_error("serialize", e))?;

        fs::write(&self.path, json)
            .await
            .map_err(|e| self.storage_error("write", e))?;

        debug!("Saved preferences");
        Ok(())
    }
}
