//! CLI entrypoint for Resource Navigator
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use navigator_application::{
    FilterObserver, InMemoryPreferenceStore, LoadProgress, LoadResourcesUseCase, NoFilterObserver,
    NoProgress, PanelController, PreferenceStore, ResourceSource,
};
use navigator_domain::{AnswerKey, Facet, PanelAction, Severity};
use navigator_infrastructure::{
    ConfigLoader, DEFAULT_RESOURCE_URL, FileConfig, FilePreferenceStore, FileResourceSource,
    HttpResourceSource, JsonlFilterLog,
};
use navigator_presentation::{
    Cli, ConsoleFormatter, FetchSpinner, NavigatorRepl, OutputConfig, ReplConfig,
    ResourceListing, SimpleProgress, parse_funnel, resolve_chip,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    info!("Starting Resource Navigator");

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };

    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            Severity::Warning => warn!("{}", issue.message),
            Severity::Error => eprintln!("Configuration error: {}", issue.message),
        }
    }
    if issues.iter().any(|i| i.is_error()) {
        bail!("Invalid configuration");
    }

    let output_config = OutputConfig {
        format: cli
            .output
            .map(Into::into)
            .or(config.output.format)
            .unwrap_or_default(),
        color: config.output.color,
        page_size: config.page_size(),
    };
    let repl_config = ReplConfig {
        show_progress: config.repl.show_progress && !cli.quiet,
        history_file: config.repl.history_file.as_ref().map(PathBuf::from),
    };

    if !output_config.color {
        colored::control::set_override(false);
    }

    // === Dependency Injection ===
    let source = build_source(&cli, &config)?;
    let store = build_store(&cli, &config);
    let observer: Arc<dyn FilterObserver> = match &config.logging.filter_log {
        Some(path) => match JsonlFilterLog::new(path) {
            Some(log) => Arc::new(log),
            None => Arc::new(NoFilterObserver),
        },
        None => Arc::new(NoFilterObserver),
    };

    let mut controller = PanelController::new(store)
        .with_observer(observer)
        .with_ttl(Duration::from_secs(
            config.preferences.ttl_days.saturating_mul(SECONDS_PER_DAY),
        ));

    if controller.restore() {
        info!("Restored saved preferences");
    }

    for action in cli_actions(&cli, &controller)? {
        controller
            .dispatch(action)
            .context("Invalid filter argument")?;
    }

    let loader = LoadResourcesUseCase::new(source);
    let progress: Box<dyn LoadProgress> = if cli.quiet {
        Box::new(NoProgress)
    } else if repl_config.show_progress {
        Box::new(FetchSpinner::new())
    } else {
        Box::new(SimpleProgress)
    };
    controller.set_resources(loader.execute_with_progress(progress.as_ref()).await);

    // Interactive mode
    if cli.interactive {
        let mut repl = NavigatorRepl::new(controller, loader)
            .with_format(output_config.format)
            .with_page_size(output_config.page_size)
            .with_progress(repl_config.show_progress)
            .with_history_file(repl_config.history_file);

        repl.run().await?;
        return Ok(());
    }

    // Single query mode
    if let Some(error) = controller.load_error() {
        eprintln!("{}", ConsoleFormatter::format_load_error(error));
    }

    if cli.tree {
        println!("{}", ConsoleFormatter::format_tree(&controller.visible_tree()));
    }

    let resources = controller.filtered_resources();
    let mut listing = ResourceListing::new(output_config.page_size);
    if cli.all {
        while listing.load_more(resources.len()) {}
    }
    let selected = (!resources.is_empty()).then_some(0);
    println!(
        "{}",
        ConsoleFormatter::format_listing(&resources, &listing, selected, output_config.format)
    );

    Ok(())
}

/// `--file`, then `--url`, then the configured source, then the default service
fn build_source(cli: &Cli, config: &FileConfig) -> Result<Arc<dyn ResourceSource>> {
    if let Some(path) = &cli.file {
        return Ok(Arc::new(FileResourceSource::new(path)));
    }
    if cli.url.is_none() {
        if let Some(path) = &config.source.file {
            return Ok(Arc::new(FileResourceSource::new(path)));
        }
    }

    let url = cli
        .url
        .clone()
        .or_else(|| config.source.url.clone())
        .unwrap_or_else(|| DEFAULT_RESOURCE_URL.to_string());
    let timeout = Duration::from_secs(config.source.timeout_secs);
    let source = HttpResourceSource::new(url, timeout).context("Failed to create HTTP client")?;
    Ok(Arc::new(source))
}

fn build_store(cli: &Cli, config: &FileConfig) -> Arc<dyn PreferenceStore> {
    if cli.no_persist || !config.preferences.enabled {
        return Arc::new(InMemoryPreferenceStore::new());
    }

    let dir = config
        .preferences
        .dir
        .as_ref()
        .map(PathBuf::from)
        .or_else(FilePreferenceStore::default_dir);
    match dir {
        Some(dir) => Arc::new(FilePreferenceStore::new(dir)),
        None => {
            warn!("No data directory available; preferences will not be saved");
            Arc::new(InMemoryPreferenceStore::new())
        }
    }
}

/// Translate command-line filters into panel actions.
///
/// Facets, answers and funnels are applied as "make it so": an option that is
/// already selected (for example from saved preferences) is left alone
/// rather than toggled off.
fn cli_actions(cli: &Cli, controller: &PanelController) -> Result<Vec<PanelAction>> {
    let state = controller.state();
    let mut actions = Vec::new();

    if let Some(search) = &cli.search {
        actions.push(PanelAction::SetSearch(search.clone()));
    }

    if let Some(chip) = &cli.chip {
        match resolve_chip(chip) {
            Some(index) => actions.push(PanelAction::SelectChip(index)),
            None => bail!("Unknown chip: {}", chip),
        }
    }

    let facets = [
        (Facet::County, &cli.county),
        (Facet::Insurance, &cli.insurance),
        (Facet::ChildWelfare, &cli.cw),
    ];
    for (facet, options) in facets {
        for option in options {
            if !state.filter.facet(facet).contains(option) {
                actions.push(PanelAction::ToggleFacet {
                    facet,
                    option: option.clone(),
                });
            }
        }
    }

    if let Some(funnel) = &cli.funnel {
        if funnel.eq_ignore_ascii_case("none") {
            if let Some(current) = state.funnel {
                actions.push(PanelAction::SelectFunnel(current));
            }
        } else {
            match parse_funnel(funnel) {
                Some(f) if state.funnel != Some(f) => actions.push(PanelAction::SelectFunnel(f)),
                Some(_) => {}
                None => bail!("Unknown funnel: {}", funnel),
            }
        }
    }

    let pairs = cli.answer_pairs().map_err(anyhow::Error::msg)?;
    for (key, option) in pairs {
        let key: AnswerKey = key.parse()?;
        if !state.answers.is_selected(&key, &option) {
            actions.push(PanelAction::SelectAnswer { key, option });
        }
    }

    Ok(actions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn restored_controller() -> PanelController {
        let mut controller = PanelController::new(Arc::new(InMemoryPreferenceStore::new()));
        controller
            .dispatch(PanelAction::ToggleFacet {
                facet: Facet::County,
                option: "Alameda".to_string(),
            })
            .unwrap();
        controller
            .dispatch(PanelAction::SelectAnswer {
                key: AnswerKey::question("3"),
                option: "Services".to_string(),
            })
            .unwrap();
        controller
    }

    #[test]
    fn test_selected_facet_is_not_toggled_off() {
        let controller = restored_controller();
        let cli = Cli::parse_from([
            "resource-navigator",
            "--county",
            "Alameda",
            "--county",
            "San Diego",
        ]);
        let actions = cli_actions(&cli, &controller).unwrap();
        assert_eq!(
            actions,
            vec![PanelAction::ToggleFacet {
                facet: Facet::County,
                option: "San Diego".to_string(),
            }]
        );
    }

    #[test]
    fn test_selected_answer_and_funnel_are_kept() {
        let controller = restored_controller();
        let cli = Cli::parse_from([
            "resource-navigator",
            "--answer",
            "3=Services",
            "--funnel",
            "2",
        ]);
        assert!(cli_actions(&cli, &controller).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_chip_is_an_error() {
        let controller = restored_controller();
        let cli = Cli::parse_from(["resource-navigator", "--chip", "Housing"]);
        assert!(cli_actions(&cli, &controller).is_err());
    }
}
