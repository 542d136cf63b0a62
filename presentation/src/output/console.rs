//! Console output formatter for the listing, the decision tree and the filter

use crate::listing::{ResourceListing, partner_full_name};
use colored::Colorize;
use navigator_domain::core::string::truncate;
use navigator_domain::{
    Category, FILTER_CHIPS, Facet, FilterState, Funnel, OutputFormat, Resource, VisibleBranch,
    VisibleQuestion, VisibleTree,
};

/// Characters of description shown for an unselected row
const DESCRIPTION_PREVIEW: usize = 120;
/// Characters of eligibility shown for an unselected row
const ELIGIBILITY_PREVIEW: usize = 80;

/// Formats panel state and resources for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the shown page of `resources` in the requested format.
    ///
    /// JSON output always carries the whole filtered collection.
    pub fn format_listing(
        resources: &[&Resource],
        listing: &ResourceListing,
        selected: Option<usize>,
        format: OutputFormat,
    ) -> String {
        if format == OutputFormat::Json {
            return Self::format_json(resources);
        }

        let mut output = String::new();
        output.push_str(&Self::header("Resource Listing"));
        output.push('\n');

        if resources.is_empty() {
            output.push_str(&format!("\n  {}\n", "No resources found.".dimmed()));
            output.push_str(&Self::footer());
            return output;
        }

        for (idx, resource) in listing.page(resources).iter().enumerate() {
            let is_selected = selected == Some(idx);
            match format {
                OutputFormat::Compact => {
                    output.push_str(&Self::compact_row(idx, resource, is_selected));
                }
                _ => {
                    output.push_str(&Self::full_row(idx, resource, is_selected));
                }
            }
        }

        let shown = listing.visible_count(resources.len());
        output.push_str(&format!(
            "\n{}\n",
            format!("Showing {} of {} results", shown, resources.len()).dimmed()
        ));
        if listing.has_more(resources.len()) {
            output.push_str(&format!("{}\n", "More results available (load more)".dimmed()));
        }
        output.push_str(&Self::footer());
        output
    }

    /// Format resources as a pretty JSON array
    pub fn format_json(resources: &[&Resource]) -> String {
        serde_json::to_string_pretty(resources).unwrap_or_else(|_| "[]".to_string())
    }

    /// Every field of one resource
    pub fn format_resource(resource: &Resource) -> String {
        Self::resource_body(resource, resource.description.clone(), resource.eligibility.clone())
    }

    /// Collapsed form of an unselected row: long text is cut short
    fn format_resource_preview(resource: &Resource) -> String {
        Self::resource_body(
            resource,
            truncate(&resource.description, DESCRIPTION_PREVIEW),
            truncate(&resource.eligibility, ELIGIBILITY_PREVIEW),
        )
    }

    fn resource_body(resource: &Resource, description: String, eligibility: String) -> String {
        let mut output = String::new();
        output.push_str(&format!("{}\n", resource.service_type.yellow().bold()));
        output.push_str(&Self::field("Description", &description));
        output.push_str(&Self::field("Eligibility", &eligibility));

        let partners = resource
            .partners
            .iter()
            .map(|p| partner_full_name(p))
            .collect::<Vec<_>>()
            .join(", ");
        output.push_str(&Self::field("Partners Involved", &partners));

        output.push_str(&format!("  {}\n", "Associated Direction:".cyan().bold()));
        let lines = resource.direction.lines();
        if lines.is_empty() {
            output.push_str(&format!("    {}\n", "-".dimmed()));
        }
        for line in lines {
            output.push_str(&format!("    {}\n", line));
        }
        output
    }

    fn full_row(idx: usize, resource: &Resource, selected: bool) -> String {
        let number = format!("{:>3}.", idx + 1);
        let marker = if selected {
            format!("{} {}", ">".red().bold(), number.red().bold())
        } else {
            format!("  {}", number.bold())
        };
        let body = if selected {
            Self::format_resource(resource)
        } else {
            Self::format_resource_preview(resource)
        };
        format!(
            "\n{} {}",
            marker,
            Self::indent(&body, "      ").trim_start()
        ) + "\n"
    }

    fn compact_row(idx: usize, resource: &Resource, selected: bool) -> String {
        let marker = if selected { ">" } else { " " };
        let partners = if resource.partners.is_empty() {
            String::new()
        } else {
            format!(" [{}]", resource.partners.join(", "))
        };
        let line = format!(
            "{} {:>3}. {}{}",
            marker,
            idx + 1,
            resource.service_type,
            partners.dimmed()
        );
        if selected {
            format!("{}\n", line.red())
        } else {
            format!("{}\n", line)
        }
    }

    fn field(label: &str, value: &str) -> String {
        let value = if value.is_empty() { "-" } else { value };
        format!("  {} {}\n", format!("{}:", label).cyan().bold(), value)
    }

    /// Format the visible decision tree
    pub fn format_tree(tree: &VisibleTree) -> String {
        let mut output = String::new();
        output.push_str(&Self::section_header("Decision Tree"));

        if !tree.open {
            output.push_str(&format!("{}\n", "(closed)".dimmed()));
            return output;
        }

        for category in &tree.categories {
            let arrow = if category.expanded { "v" } else { ">" };
            output.push_str(&format!(
                "\n{} {}\n",
                arrow.cyan(),
                category.category.label().bold()
            ));
            if !category.expanded {
                continue;
            }

            if category.category == Category::Funnel {
                output.push_str(&Self::format_funnel_selector(tree.funnel));
                if let Some(block) = &tree.funnel_block {
                    for question in &block.questions {
                        output.push_str(&Self::format_question(question, "    "));
                    }
                    for branch in &block.branches {
                        output.push_str(&Self::format_branch(branch));
                    }
                    continue;
                }
            }

            for question in &category.questions {
                output.push_str(&Self::format_question(question, "    "));
            }
        }

        output
    }

    fn format_funnel_selector(current: Option<Funnel>) -> String {
        Funnel::ALL
            .iter()
            .map(|funnel| {
                let mark = if current == Some(*funnel) { "(*)" } else { "( )" };
                format!("  {} {}: {}\n", mark, funnel.to_string().bold(), funnel.prompt())
            })
            .collect()
    }

    fn format_question(question: &VisibleQuestion, prefix: &str) -> String {
        let mut output = format!("{}[{}] {}", prefix, question.key, question.text);
        if let Some(answer) = &question.answer {
            output.push_str(&format!(" {}", format!("= {}", answer).green()));
        }
        output.push('\n');

        for option in &question.options {
            let mark = if option.selected { "(*)" } else { "( )" };
            let label = if option.selected {
                option.label.green().to_string()
            } else {
                option.label.clone()
            };
            output.push_str(&format!("{}  {} {}\n", prefix, mark, label));
        }

        if let Some(draft) = &question.other_draft {
            output.push_str(&format!(
                "{}  {} {}\n",
                prefix,
                "Other:".yellow(),
                if draft.is_empty() { "_" } else { draft.as_str() }
            ));
        }
        output
    }

    fn format_branch(branch: &VisibleBranch) -> String {
        let mut output = format!(
            "      {} {}\n",
            "+".cyan(),
            branch.branch.label().italic()
        );
        for slot in &branch.slots {
            let mark = if slot.selected { "(*)" } else { "( )" };
            output.push_str(&format!("        {} [{}] {}\n", mark, slot.key, slot.option));
        }
        output
    }

    /// Format the filter chips, search text and facet selections
    pub fn format_filter(state: &FilterState) -> String {
        let mut output = String::new();
        output.push_str(&Self::section_header("Filters"));

        let search = if state.search_text.is_empty() {
            "-".dimmed().to_string()
        } else {
            format!("\"{}\"", state.search_text)
        };
        output.push_str(&format!("{} {}\n", "Search:".cyan().bold(), search));

        let chips = FILTER_CHIPS
            .iter()
            .enumerate()
            .map(|(idx, chip)| {
                if idx == state.selected_chip {
                    format!("[{}] {}", idx, chip).green().bold().to_string()
                } else {
                    format!("[{}] {}", idx, chip)
                }
            })
            .collect::<Vec<_>>()
            .join("  ");
        output.push_str(&format!("{} {}\n", "Chips:".cyan().bold(), chips));

        for facet in Facet::ALL {
            let selected = state.facet(facet);
            let value = if selected.is_empty() {
                "-".dimmed().to_string()
            } else {
                selected.join(", ")
            };
            output.push_str(&format!(
                "{} {}\n",
                format!("{}:", facet).cyan().bold(),
                value
            ));
        }
        output
    }

    /// Format a fetch failure
    pub fn format_load_error(message: &str) -> String {
        format!("{} {}", "Failed to load resources:".red().bold(), message)
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use navigator_domain::{Direction, PanelAction, PanelState, QuestionGraph, reduce};

    fn plain() {
        colored::control::set_override(false);
    }

    fn catalog() -> Vec<Resource> {
        (1..=7)
            .map(|i| Resource::new(format!("Service {}", i), "desc").with_partners(&["MHP"]))
            .collect()
    }

    #[test]
    fn test_listing_shows_first_page() {
        plain();
        let resources = catalog();
        let refs: Vec<&Resource> = resources.iter().collect();
        let output = ConsoleFormatter::format_listing(
            &refs,
            &ResourceListing::default(),
            Some(0),
            OutputFormat::Compact,
        );
        assert!(output.contains("Service 5"));
        assert!(!output.contains("Service 6"));
        assert!(output.contains("Showing 5 of 7 results"));
    }

    #[test]
    fn test_empty_listing() {
        plain();
        let output = ConsoleFormatter::format_listing(
            &[],
            &ResourceListing::default(),
            None,
            OutputFormat::Full,
        );
        assert!(output.contains("No resources found."));
    }

    #[test]
    fn test_json_listing_has_every_result() {
        let resources = catalog();
        let refs: Vec<&Resource> = resources.iter().collect();
        let output = ConsoleFormatter::format_listing(
            &refs,
            &ResourceListing::default(),
            None,
            OutputFormat::Json,
        );
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed.len(), 7);
    }

    #[test]
    fn test_resource_uses_partner_full_names() {
        plain();
        let resource = Resource::new("Therapy Services", "desc")
            .with_partners(&["MHP", "Probation"])
            .with_direction(Direction::Steps(vec!["Call".into(), "Visit".into()]));
        let output = ConsoleFormatter::format_resource(&resource);
        assert!(output.contains("Mental Health Plan (MHP), Probation"));
        assert!(output.contains("    Call\n    Visit"));
    }

    #[test]
    fn test_only_selected_row_shows_full_text() {
        plain();
        let long = "x".repeat(150);
        let resources = vec![
            Resource::new("First", long.clone()).with_eligibility("e".repeat(90)),
            Resource::new("Second", long.clone()).with_eligibility("e".repeat(90)),
        ];
        let refs: Vec<&Resource> = resources.iter().collect();
        let output = ConsoleFormatter::format_listing(
            &refs,
            &ResourceListing::default(),
            Some(0),
            OutputFormat::Full,
        );
        assert_eq!(output.matches(long.as_str()).count(), 1);
        assert!(output.contains(&format!("{}...", "x".repeat(120))));
        assert!(output.contains(&format!("Eligibility: {}...", "e".repeat(80))));
        assert!(output.contains(&format!("Eligibility: {}\n", "e".repeat(90))));
    }

    #[test]
    fn test_tree_shows_funnel_block() {
        plain();
        let graph = QuestionGraph::builtin();
        let state = PanelState::new();
        let output = ConsoleFormatter::format_tree(&state.visible_tree(&graph));
        assert!(output.contains("(*) FUNNEL - 2"));
        assert!(output.contains("( ) FUNNEL - 1"));
    }

    #[test]
    fn test_closed_tree() {
        plain();
        let graph = QuestionGraph::builtin();
        let mut state = PanelState::new();
        reduce(&mut state, PanelAction::ToggleDecisionTree).unwrap();
        let output = ConsoleFormatter::format_tree(&state.visible_tree(&graph));
        assert!(output.contains("(closed)"));
    }

    #[test]
    fn test_filter_summary() {
        plain();
        let mut state = FilterState::new();
        state.search_text = "hub".to_string();
        state.toggle_facet(Facet::County, "Alameda");
        let output = ConsoleFormatter::format_filter(&state);
        assert!(output.contains("\"hub\""));
        assert!(output.contains("[0] All"));
        assert!(output.contains("County: Alameda"));
    }
}
