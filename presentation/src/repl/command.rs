//! REPL command parsing

use navigator_domain::{AnswerKey, Category, FILTER_CHIPS, Facet, Funnel, QuestionKey};

/// A parsed REPL line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    Quit,
    /// Set the search text; empty clears it
    Search(String),
    Chip(usize),
    Facet { facet: Facet, option: String },
    Answer { key: AnswerKey, option: String },
    Other(String),
    CommitOther,
    CancelOther,
    ExpandQuestion(QuestionKey),
    ToggleCategory(Category),
    ToggleTree,
    Funnel(Funnel),
    Clear,
    Tree,
    Filters,
    List,
    More,
    /// 1-based row number
    Select(usize),
    Show,
    Save,
    Reload,
    Json,
    /// Unknown command or bad argument, with a message for the user
    Invalid(String),
}

pub const HELP: &str = "\
Commands:
  <text>                 Search service type and description
  /search [text]         Set (or clear) the search text
  /chip <n|label>        Select a partner chip (0 = All)
  /county <option>       Toggle a county
  /insurance <option>    Toggle an insurance type
  /cw <option>           Toggle a child welfare option
  /tree                  Show the decision tree
  /answer <key> <option> Select (or unselect) an answer
  /other <text>          Type the free-text \"Other\" answer
  /commit, /cancel       Commit or discard the \"Other\" answer
  /expand <key>          Expand or collapse a question
  /category <name>       Expand or collapse DEMOGRAPHIC or FUNNEL
  /toggle-tree           Open or close the decision tree
  /funnel <1|2>          Select a funnel (again to unselect)
  /clear                 Clear all filters and answers
  /filters               Show the current filters
  /list, /more           Show results, load more results
  /select <n>, /show     Select a result, show its details
  /json                  Print the results as JSON
  /save                  Toggle saving preferences
  /reload                Fetch the resources again
  /help, /quit";

/// Resolve a chip by index or by label.
///
/// Labels match case-insensitively on the full label or its prefix, so
/// `prob` selects "Probation".
pub fn resolve_chip(arg: &str) -> Option<usize> {
    let arg = arg.trim();
    if let Ok(index) = arg.parse::<usize>() {
        return (index < FILTER_CHIPS.len()).then_some(index);
    }
    let needle = arg.to_lowercase();
    if needle.is_empty() {
        return None;
    }
    FILTER_CHIPS
        .iter()
        .position(|chip| chip.to_lowercase() == needle)
        .or_else(|| {
            FILTER_CHIPS
                .iter()
                .position(|chip| chip.to_lowercase().starts_with(&needle))
        })
}

/// Parse a funnel argument: `1`, `2`, or the funnel's display name
pub fn parse_funnel(arg: &str) -> Option<Funnel> {
    let digits: String = arg.chars().filter(char::is_ascii_digit).collect();
    digits.parse::<u8>().ok().and_then(|n| Funnel::try_from(n).ok())
}

/// Parse one input line; `None` for a blank line
pub fn parse_command(line: &str) -> Option<ReplCommand> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let Some(body) = line.strip_prefix('/') else {
        return Some(ReplCommand::Search(line.to_string()));
    };

    let (name, arg) = match body.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (body, ""),
    };

    let command = match name {
        "help" | "h" | "?" => ReplCommand::Help,
        "quit" | "exit" | "q" => ReplCommand::Quit,
        "search" | "s" => ReplCommand::Search(arg.to_string()),
        "chip" => match resolve_chip(arg) {
            Some(index) => ReplCommand::Chip(index),
            None => ReplCommand::Invalid(format!("Unknown chip: {}", arg)),
        },
        "county" => facet(Facet::County, arg),
        "insurance" => facet(Facet::Insurance, arg),
        "cw" => facet(Facet::ChildWelfare, arg),
        "answer" | "a" => answer(arg),
        "other" => ReplCommand::Other(arg.to_string()),
        "commit" => ReplCommand::CommitOther,
        "cancel" => ReplCommand::CancelOther,
        "expand" | "e" => match arg.parse::<QuestionKey>() {
            Ok(key) => ReplCommand::ExpandQuestion(key),
            Err(e) => ReplCommand::Invalid(e.to_string()),
        },
        "category" => match arg.parse::<Category>() {
            Ok(category) => ReplCommand::ToggleCategory(category),
            Err(e) => ReplCommand::Invalid(e.to_string()),
        },
        "toggle-tree" => ReplCommand::ToggleTree,
        "funnel" => match parse_funnel(arg) {
            Some(funnel) => ReplCommand::Funnel(funnel),
            None => ReplCommand::Invalid(format!("Unknown funnel: {}", arg)),
        },
        "clear" => ReplCommand::Clear,
        "tree" | "t" => ReplCommand::Tree,
        "filters" | "f" => ReplCommand::Filters,
        "list" | "l" => ReplCommand::List,
        "more" | "m" => ReplCommand::More,
        "select" => match arg.parse::<usize>() {
            Ok(row) if row > 0 => ReplCommand::Select(row),
            _ => ReplCommand::Invalid(format!("Invalid row: {}", arg)),
        },
        "show" => ReplCommand::Show,
        "save" => ReplCommand::Save,
        "reload" => ReplCommand::Reload,
        "json" => ReplCommand::Json,
        _ => ReplCommand::Invalid(format!("Unknown command: /{}", name)),
    };
    Some(command)
}

fn facet(facet: Facet, option: &str) -> ReplCommand {
    if option.is_empty() {
        return ReplCommand::Invalid(format!("Options: {}", facet.options().join(", ")));
    }
    // Match the listed option case-insensitively, keep free text as typed
    let option = facet
        .options()
        .iter()
        .find(|o| o.eq_ignore_ascii_case(option))
        .map(|o| o.to_string())
        .unwrap_or_else(|| option.to_string());
    ReplCommand::Facet { facet, option }
}

fn answer(arg: &str) -> ReplCommand {
    let Some((key, option)) = arg.split_once(char::is_whitespace) else {
        return ReplCommand::Invalid("Usage: /answer <key> <option>".to_string());
    };
    match key.parse::<AnswerKey>() {
        Ok(key) => ReplCommand::Answer {
            key,
            option: option.trim().to_string(),
        },
        Err(e) => ReplCommand::Invalid(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use navigator_domain::Branch;

    #[test]
    fn test_blank_line() {
        assert_eq!(parse_command("   "), None);
    }

    #[test]
    fn test_plain_text_is_search() {
        assert_eq!(
            parse_command("family hub"),
            Some(ReplCommand::Search("family hub".to_string()))
        );
        assert_eq!(
            parse_command("/search"),
            Some(ReplCommand::Search(String::new()))
        );
    }

    #[test]
    fn test_chip_by_index_and_label() {
        assert_eq!(parse_command("/chip 2"), Some(ReplCommand::Chip(2)));
        assert_eq!(parse_command("/chip prob"), Some(ReplCommand::Chip(2)));
        assert_eq!(parse_command("/chip all"), Some(ReplCommand::Chip(0)));
        assert!(matches!(
            parse_command("/chip 6"),
            Some(ReplCommand::Invalid(_))
        ));
    }

    #[test]
    fn test_facet_option_case() {
        assert_eq!(
            parse_command("/county alameda"),
            Some(ReplCommand::Facet {
                facet: Facet::County,
                option: "Alameda".to_string()
            })
        );
        assert!(matches!(parse_command("/cw"), Some(ReplCommand::Invalid(_))));
    }

    #[test]
    fn test_answer_keys() {
        assert_eq!(
            parse_command("/answer 3 Services"),
            Some(ReplCommand::Answer {
                key: AnswerKey::question("3"),
                option: "Services".to_string()
            })
        );
        assert_eq!(
            parse_command("/answer 3.2.sud.0 Yes"),
            Some(ReplCommand::Answer {
                key: AnswerKey::sub_option(&QuestionKey::new("3.2"), Branch::SubstanceUse, 0),
                option: "Yes".to_string()
            })
        );
        assert!(matches!(
            parse_command("/answer 3"),
            Some(ReplCommand::Invalid(_))
        ));
    }

    #[test]
    fn test_funnel_and_category() {
        assert_eq!(
            parse_command("/funnel 1"),
            Some(ReplCommand::Funnel(Funnel::SystemPartner))
        );
        assert_eq!(
            parse_command("/funnel FUNNEL - 2"),
            Some(ReplCommand::Funnel(Funnel::ChildSpecific))
        );
        assert!(matches!(
            parse_command("/funnel 3"),
            Some(ReplCommand::Invalid(_))
        ));
        assert_eq!(
            parse_command("/category demographic"),
            Some(ReplCommand::ToggleCategory(Category::Demographic))
        );
    }

    #[test]
    fn test_select_is_one_based() {
        assert_eq!(parse_command("/select 1"), Some(ReplCommand::Select(1)));
        assert!(matches!(
            parse_command("/select 0"),
            Some(ReplCommand::Invalid(_))
        ));
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            parse_command("/bogus"),
            Some(ReplCommand::Invalid("Unknown command: /bogus".to_string()))
        );
    }
}
