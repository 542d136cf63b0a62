//! Resource source configuration from TOML (`[source]` section)

use serde::{Deserialize, Serialize};

/// Raw source configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSourceConfig {
    /// HTTP endpoint returning the resource array
    pub url: Option<String>,
    /// Local JSON file used instead of the endpoint
    pub file: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for FileSourceConfig {
    fn default() -> Self {
        Self {
            url: None,
            file: None,
            timeout_secs: 30,
        }
    }
}
