//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL file receiving one line per filter change
    pub filter_log: Option<String>,
}
