//! CLI command definitions

use clap::{Parser, ValueEnum};
use navigator_domain::OutputFormat as DomainOutputFormat;
use std::path::PathBuf;

/// Output format for the resource listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Every field of each shown resource
    Full,
    /// One line per resource
    Compact,
    /// JSON array of all matching resources
    Json,
}

impl From<OutputFormat> for DomainOutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => DomainOutputFormat::Full,
            OutputFormat::Compact => DomainOutputFormat::Compact,
            OutputFormat::Json => DomainOutputFormat::Json,
        }
    }
}

/// CLI arguments for resource-navigator
#[derive(Parser, Debug)]
#[command(name = "resource-navigator")]
#[command(author, version, about = "Search a directory of community services")]
#[command(long_about = r#"
Resource Navigator searches a directory of community services by free text,
partner chip and decision-tree answers.

Resources are fetched once at startup from the configured source. Filters and
answers given on the command line are applied on top of any saved preferences.

Configuration files are loaded from (in priority order):
1. --config <path>       Explicit config file
2. ./navigator.toml      Project-level config
3. ~/.config/resource-navigator/config.toml   Global config

Example:
  resource-navigator "family hub"
  resource-navigator --chip Probation --output compact
  resource-navigator --answer 3=Services --answer 3.2=Others --tree
  resource-navigator -i
"#)]
pub struct Cli {
    /// Search text matched against service type and description
    pub search: Option<String>,

    /// Start the interactive panel
    #[arg(short, long)]
    pub interactive: bool,

    /// Partner chip, by index (0 = All) or label
    #[arg(long, value_name = "CHIP")]
    pub chip: Option<String>,

    /// Toggle a county (can be specified multiple times)
    #[arg(long, value_name = "COUNTY")]
    pub county: Vec<String>,

    /// Toggle an insurance type (can be specified multiple times)
    #[arg(long, value_name = "INSURANCE")]
    pub insurance: Vec<String>,

    /// Toggle a child welfare option (can be specified multiple times)
    #[arg(long, value_name = "OPTION")]
    pub cw: Vec<String>,

    /// Select a decision-tree answer (can be specified multiple times)
    #[arg(short, long, value_name = "KEY=OPTION")]
    pub answer: Vec<String>,

    /// Select a funnel (1 or 2), or "none" to unselect
    #[arg(long, value_name = "FUNNEL")]
    pub funnel: Option<String>,

    /// Print the decision tree
    #[arg(long)]
    pub tree: bool,

    /// Print every matching resource instead of the first page
    #[arg(long)]
    pub all: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Resource service URL (overrides config)
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Read resources from a JSON file instead of the service
    #[arg(long, value_name = "PATH", conflicts_with = "url")]
    pub file: Option<PathBuf>,

    /// Neither read nor write saved preferences
    #[arg(long)]
    pub no_persist: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Split `--answer` values into key and option
    pub fn answer_pairs(&self) -> Result<Vec<(String, String)>, String> {
        self.answer
            .iter()
            .map(|raw| match raw.split_once('=') {
                Some((key, option)) if !key.trim().is_empty() => {
                    Ok((key.trim().to_string(), option.trim().to_string()))
                }
                _ => Err(format!("Expected KEY=OPTION, got '{}'", raw)),
            })
            .collect()
    }
}
