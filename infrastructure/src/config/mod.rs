//! Configuration file loading for resource-navigator
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `NAVIGATOR_`-prefixed environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./navigator.toml` or `./.navigator.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/resource-navigator/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileLoggingConfig, FileOutputConfig, FilePreferencesConfig,
    FileReplConfig, FileSourceConfig,
};
pub use loader::{APP_DIR, ConfigLoader, ENV_PREFIX};
