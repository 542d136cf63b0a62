//! Preference persistence configuration from TOML (`[preferences]` section)

use serde::{Deserialize, Serialize};

/// Raw preference configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePreferencesConfig {
    /// Restore and save panel preferences on disk
    pub enabled: bool,
    /// Directory for preference files (defaults to the platform data dir)
    pub dir: Option<String>,
    /// Lifetime of a saved snapshot in days
    pub ttl_days: u64,
}

impl Default for FilePreferencesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: None,
            ttl_days: 30,
        }
    }
}
