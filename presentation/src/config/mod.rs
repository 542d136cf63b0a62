//! Presentation-level configuration
//!
//! Configuration for output formatting and REPL behavior.

use crate::listing::DEFAULT_PAGE_SIZE;
use navigator_domain::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Output configuration for the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
    /// Rows shown per page of the listing
    pub page_size: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Full,
            color: true,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// REPL configuration for the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplConfig {
    /// Show progress indicators
    pub show_progress: bool,
    /// Path to history file
    pub history_file: Option<PathBuf>,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: None,
        }
    }
}
