//! Presentation layer for resource-navigator
//!
//! This crate contains CLI definitions, the listing view, output formatters,
//! progress reporters, and the interactive panel.

pub mod cli;
pub mod config;
pub mod listing;
pub mod output;
pub mod progress;
pub mod repl;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use config::{OutputConfig, ReplConfig};
pub use listing::{DEFAULT_PAGE_SIZE, ResourceListing, partner_full_name};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{FetchSpinner, SimpleProgress};
pub use repl::{NavigatorRepl, ReplCommand, parse_command, parse_funnel, resolve_chip};
