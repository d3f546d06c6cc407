//! User preferences

use serde::{Deserialize, Serialize};

/// Display preferences persisted between runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Dark theme
    #[serde(default)]
    pub dark_mode: bool,
}

impl Preferences {
    /// Preferences with dark mode set
    #[must_use]
    pub const fn with_dark_mode(dark_mode: bool) -> Self {
        Self { dark_mode }
    }

    /// Copy with dark mode flipped
    #[must_use]
    pub const fn toggled(self) -> Self {
        Self {
            dark_mode: !self.dark_mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_light() {
        assert!(!Preferences::default().dark_mode);
    }

    #[test]
    fn toggled_flips() {
        let prefs = Preferences::default().toggled();
        assert!(prefs.dark_mode);
        assert!(!prefs.toggled().dark_mode);
    }

    #[test]
    fn missing_field_deserializes_to_default() {
        let prefs: Preferences = serde_json::from_str("{}").unwrap();
        assert_eq!(prefs, Preferences::default());
    }
}
