//! REPL (Read-Eval-Print Loop) for the interactive panel

use super::command::{HELP, ReplCommand, parse_command};
use crate::listing::ResourceListing;
use crate::output::console::ConsoleFormatter;
use crate::progress::reporter::FetchSpinner;
use colored::Colorize;
use navigator_application::{LoadResourcesUseCase, NoProgress, PanelController};
use navigator_domain::{OutputFormat, PanelAction};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::PathBuf;

/// Interactive panel REPL
pub struct NavigatorRepl {
    controller: PanelController,
    loader: LoadResourcesUseCase,
    listing: ResourceListing,
    format: OutputFormat,
    show_progress: bool,
    history_file: Option<PathBuf>,
}

impl NavigatorRepl {
    pub fn new(controller: PanelController, loader: LoadResourcesUseCase) -> Self {
        Self {
            controller,
            loader,
            listing: ResourceListing::default(),
            format: OutputFormat::Full,
            show_progress: true,
            history_file: dirs::data_dir()
                .map(|p| p.join("resource-navigator").join("history.txt")),
        }
    }

    /// Set the listing format
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Set whether to show the fetch spinner on reload
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.listing = ResourceListing::new(page_size);
        self
    }

    /// Override the history file location
    pub fn with_history_file(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.history_file = path;
        }
        self
    }

    pub fn controller(&self) -> &PanelController {
        &self.controller
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        if let Some(ref path) = self.history_file {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            match rl.readline("navigator> ") {
                Ok(line) => {
                    let Some(command) = parse_command(&line) else {
                        continue;
                    };
                    let _ = rl.add_history_entry(line.trim());

                    if self.execute(command).await {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = self.history_file {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&mut self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│        Resource Navigator - Search          │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        if let Some(error) = self.controller.load_error() {
            println!("{}", ConsoleFormatter::format_load_error(error));
        } else {
            println!("{} resources loaded", self.controller.resources().len());
        }
        let saving = if self.controller.is_saving() { "on" } else { "off" };
        println!("Save my preference: {}", saving);
        println!("Type /help for commands");
        println!();
    }

    /// Execute one command. Returns true if the REPL should exit.
    pub async fn execute(&mut self, command: ReplCommand) -> bool {
        match command {
            ReplCommand::Quit => {
                println!("Bye!");
                return true;
            }
            ReplCommand::Help => println!("\n{}\n", HELP),
            ReplCommand::Invalid(message) => {
                println!("{}", message.yellow());
                println!("Type /help for available commands");
            }
            ReplCommand::Search(text) => self.apply_filter(PanelAction::SetSearch(text)),
            ReplCommand::Chip(index) => self.apply_filter(PanelAction::SelectChip(index)),
            ReplCommand::Facet { facet, option } => {
                self.apply_filter(PanelAction::ToggleFacet { facet, option })
            }
            ReplCommand::Clear => self.apply_filter(PanelAction::ClearAll),
            ReplCommand::Answer { key, option } => {
                self.apply_tree(PanelAction::SelectAnswer { key, option })
            }
            ReplCommand::Other(text) => self.apply_tree(PanelAction::EditOther(text)),
            ReplCommand::CommitOther => self.apply_tree(PanelAction::CommitOther),
            ReplCommand::CancelOther => self.apply_tree(PanelAction::CancelOther),
            ReplCommand::ExpandQuestion(key) => self.apply_tree(PanelAction::ToggleQuestion(key)),
            ReplCommand::ToggleCategory(category) => {
                self.apply_tree(PanelAction::ToggleCategory(category))
            }
            ReplCommand::ToggleTree => self.apply_tree(PanelAction::ToggleDecisionTree),
            ReplCommand::Funnel(funnel) => self.apply_tree(PanelAction::SelectFunnel(funnel)),
            ReplCommand::Tree => self.print_tree(),
            ReplCommand::Filters => {
                println!("{}", ConsoleFormatter::format_filter(&self.controller.state().filter))
            }
            ReplCommand::List => self.print_listing(),
            ReplCommand::More => {
                let total = self.controller.filtered_resources().len();
                if self.listing.load_more(total) {
                    self.print_listing();
                } else {
                    println!("No more results");
                }
            }
            ReplCommand::Select(row) => {
                let total = self.controller.filtered_resources().len();
                if self.listing.select(row - 1, total) {
                    self.print_selected();
                } else {
                    println!("{}", format!("No row {} on screen", row).yellow());
                }
            }
            ReplCommand::Show => self.print_selected(),
            ReplCommand::Json => {
                let resources = self.controller.filtered_resources();
                println!("{}", ConsoleFormatter::format_json(&resources));
            }
            ReplCommand::Save => {
                let saving = self.controller.toggle_saved();
                println!(
                    "Save my preference: {}",
                    if saving { "on".green() } else { "off".dimmed() }
                );
            }
            ReplCommand::Reload => self.reload().await,
        }
        false
    }

    fn apply_filter(&mut self, action: PanelAction) {
        match self.controller.dispatch(action) {
            Ok(change) => {
                if change.filter_changed {
                    self.listing.reset();
                }
                self.print_listing();
            }
            Err(e) => eprintln!("{} {}", "Error:".red(), e),
        }
    }

    fn apply_tree(&mut self, action: PanelAction) {
        match self.controller.dispatch(action) {
            Ok(_) => self.print_tree(),
            Err(e) => eprintln!("{} {}", "Error:".red(), e),
        }
    }

    async fn reload(&mut self) {
        let load = if self.show_progress {
            self.loader.execute_with_progress(&FetchSpinner::new()).await
        } else {
            self.loader.execute_with_progress(&NoProgress).await
        };
        self.controller.set_resources(load);
        self.listing.reset();
        if let Some(error) = self.controller.load_error() {
            println!("{}", ConsoleFormatter::format_load_error(error));
        }
        self.print_listing();
    }

    fn print_tree(&self) {
        println!("{}", ConsoleFormatter::format_tree(&self.controller.visible_tree()));
    }

    fn print_listing(&mut self) {
        let resources = self.controller.filtered_resources();
        let selected = self.listing.selected(resources.len());
        let selected = (!resources.is_empty()).then_some(selected);
        println!(
            "{}",
            ConsoleFormatter::format_listing(&resources, &self.listing, selected, self.format)
        );
    }

    fn print_selected(&mut self) {
        let resources = self.controller.filtered_resources();
        if resources.is_empty() {
            println!("No resources found.");
            return;
        }
        let selected = self.listing.selected(resources.len());
        println!("\n{}", ConsoleFormatter::format_resource(resources[selected]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use navigator_application::{
        InMemoryPreferenceStore, ResourceLoad, ResourceSource, SourceError,
    };
    use navigator_domain::{Funnel, Resource};
    use std::sync::Arc;

    struct StaticSource;

    #[async_trait]
    impl ResourceSource for StaticSource {
        async fn fetch(&self) -> Result<Vec<Resource>, SourceError> {
            Ok((1..=8)
                .map(|i| Resource::new(format!("Service {}", i), "desc"))
                .collect())
        }

        fn describe(&self) -> String {
            "static".to_string()
        }
    }

    fn repl() -> NavigatorRepl {
        colored::control::set_override(false);
        let controller = PanelController::new(Arc::new(InMemoryPreferenceStore::new()));
        NavigatorRepl::new(controller, LoadResourcesUseCase::new(Arc::new(StaticSource)))
            .with_progress(false)
            .with_history_file(None)
    }

    #[tokio::test]
    async fn test_reload_then_filter() {
        let mut repl = repl();
        assert!(!repl.execute(ReplCommand::Reload).await);
        assert_eq!(repl.controller().resources().len(), 8);

        repl.execute(ReplCommand::More).await;
        assert_eq!(repl.listing.visible_count(8), 8);

        // A filter change returns to the first page
        repl.execute(ReplCommand::Search("service".to_string())).await;
        assert_eq!(repl.listing.visible_count(8), 5);
    }

    #[tokio::test]
    async fn test_select_outside_page_is_rejected() {
        let mut repl = repl();
        repl.controller.set_resources(ResourceLoad::loaded(vec![
            Resource::new("A", ""),
            Resource::new("B", ""),
        ]));
        repl.execute(ReplCommand::Select(2)).await;
        assert_eq!(repl.listing.selected(2), 1);
        repl.execute(ReplCommand::Select(5)).await;
        assert_eq!(repl.listing.selected(2), 1);
    }

    #[tokio::test]
    async fn test_tree_commands_reach_controller() {
        let mut repl = repl();
        repl.execute(ReplCommand::Funnel(Funnel::SystemPartner)).await;
        assert_eq!(repl.controller().state().funnel, Some(Funnel::SystemPartner));
        repl.execute(ReplCommand::Save).await;
        assert!(repl.controller().is_saving());
    }

    #[tokio::test]
    async fn test_quit() {
        assert!(repl().execute(ReplCommand::Quit).await);
    }
}
