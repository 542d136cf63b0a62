//! Infrastructure layer for resource-navigator
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod preferences;
pub mod source;

// Re-export commonly used types
pub use config::{
    APP_DIR, ConfigLoader, FileConfig, FileLoggingConfig, FileOutputConfig,
    FilePreferencesConfig, FileReplConfig, FileSourceConfig,
};
pub use logging::JsonlFilterLog;
pub use preferences::FilePreferenceStore;
pub use source::{DEFAULT_RESOURCE_URL, FileResourceSource, HttpResourceSource};
