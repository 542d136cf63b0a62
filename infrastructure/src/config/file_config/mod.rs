//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod logging;
mod output;
mod preferences;
mod repl;
mod source;

pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use preferences::FilePreferencesConfig;
pub use repl::FileReplConfig;
pub use source::FileSourceConfig;

use navigator_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Longest accepted preference lifetime (about 100 years)
pub const MAX_TTL_DAYS: u64 = 36_500;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Where resources are fetched from
    pub source: FileSourceConfig,
    /// Saved panel preferences
    pub preferences: FilePreferencesConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
    /// Structured event logging
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Errors make the configuration unusable; warnings are reported and the
    /// affected value falls back to its default.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        // 1. Source selection
        let blank = |v: &Option<String>| v.as_deref().is_some_and(|s| s.trim().is_empty());
        if blank(&self.source.url) || blank(&self.source.file) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptySource,
                "source.url and source.file must not be empty strings",
            ));
        }
        if self.source.url.is_some() && self.source.file.is_some() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ConflictingSources,
                "source.url and source.file are both set; configure only one",
            ));
        }
        if self.source.timeout_secs == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroTimeout,
                "source.timeout_secs must be greater than 0",
            ));
        }

        // 2. Preferences
        if self.preferences.enabled && self.preferences.ttl_days == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::ZeroTtl,
                "preferences.ttl_days is 0; saved preferences expire immediately",
            ));
        }
        if self.preferences.ttl_days > MAX_TTL_DAYS {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::TtlTooLarge,
                format!(
                    "preferences.ttl_days must be at most {} (got {})",
                    MAX_TTL_DAYS, self.preferences.ttl_days
                ),
            ));
        }

        // 3. Output
        if self.output.page_size == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::ZeroPageSize,
                "output.page_size is 0, falling back to 5",
            ));
        }

        issues
    }

    /// Page size with the zero fallback applied
    pub fn page_size(&self) -> usize {
        if self.output.page_size == 0 {
            FileOutputConfig::default().page_size
        } else {
            self.output.page_size
        }
    }
}
