//! Preference storage configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the theme preference file lives
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreferencesConfig {
    /// Explicit file path; defaults to the user config directory
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl PreferencesConfig {
    /// Configured path, or `<config dir>/skycast/preferences.json`
    #[must_use]
    pub fn resolved_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("skycast")
                .join("preferences.json")
        })
    }
}
