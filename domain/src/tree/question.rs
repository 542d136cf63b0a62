//! Question value objects
//!
//! A [`Question`] is a node in the decision tree. Hierarchy is expressed with
//! an explicit `parent` pointer; the key itself is opaque.

use crate::core::error::DomainError;
use crate::tree::answers::AnswerStore;
use crate::tree::key::AnswerKey;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable identifier of a question in the graph.
///
/// The wire form (`"3"`, `"3.1"`) is kept for snapshot compatibility only;
/// nothing derives hierarchy from it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QuestionKey(String);

impl QuestionKey {
    /// Create a key from a static identifier.
    ///
    /// # Panics
    /// Panics if the identifier is empty or contains whitespace
    pub fn new(id: &str) -> Self {
        match id.parse() {
            Ok(key) => key,
            Err(e) => panic!("{}", e),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for QuestionKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s.chars().any(char::is_whitespace) {
            return Err(DomainError::InvalidQuestionKey(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for QuestionKey {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<QuestionKey> for String {
    fn from(key: QuestionKey) -> Self {
        key.0
    }
}

impl fmt::Display for QuestionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Top-level grouping of questions with its own expand/collapse flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Demographic,
    Funnel,
}

impl Category {
    /// Render order of the categories.
    pub const ALL: [Category; 2] = [Category::Demographic, Category::Funnel];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Demographic => "DEMOGRAPHIC",
            Category::Funnel => "FUNNEL",
        }
    }

    /// Whether the category starts expanded in a fresh session
    pub fn default_expanded(&self) -> bool {
        matches!(self, Category::Funnel)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DEMOGRAPHIC" => Ok(Category::Demographic),
            "FUNNEL" | "FUNNELS" => Ok(Category::Funnel),
            _ => Err(DomainError::UnknownCategory(s.to_string())),
        }
    }
}

/// Visibility predicate gating a sub-question on a parent answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShowWhen {
    /// The stored answer for `key` equals one of `values` exactly
    AnswerIn { key: QuestionKey, values: Vec<String> },
    /// `key` has any non-empty stored answer
    Answered { key: QuestionKey },
}

impl ShowWhen {
    pub fn answer_in(key: &str, values: &[&str]) -> Self {
        Self::AnswerIn {
            key: QuestionKey::new(key),
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    pub fn answered(key: &str) -> Self {
        Self::Answered {
            key: QuestionKey::new(key),
        }
    }

    /// Evaluate against the current answers
    pub fn holds(&self, answers: &AnswerStore) -> bool {
        match self {
            ShowWhen::AnswerIn { key, values } => answers
                .get(&AnswerKey::from(key.clone()))
                .is_some_and(|answer| values.iter().any(|v| v == answer)),
            ShowWhen::Answered { key } => answers
                .get(&AnswerKey::from(key.clone()))
                .is_some_and(|answer| !answer.is_empty()),
        }
    }
}

/// A decision tree question (static data)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub key: QuestionKey,
    pub category: Option<Category>,
    pub text: String,
    pub options: Vec<String>,
    pub parent: Option<QuestionKey>,
    pub has_sub_questions: bool,
    pub show_when: Option<ShowWhen>,
}

impl Question {
    pub fn new(key: &str, text: impl Into<String>, options: &[&str]) -> Self {
        Self {
            key: QuestionKey::new(key),
            category: None,
            text: text.into(),
            options: options.iter().map(|o| o.to_string()).collect(),
            parent: None,
            has_sub_questions: false,
            show_when: None,
        }
    }

    pub fn in_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_parent(mut self, parent: &str) -> Self {
        self.parent = Some(QuestionKey::new(parent));
        self
    }

    pub fn with_sub_questions(mut self) -> Self {
        self.has_sub_questions = true;
        self
    }

    pub fn shown_when(mut self, predicate: ShowWhen) -> Self {
        self.show_when = Some(predicate);
        self
    }

    /// Whether the question belongs in the visible set for these answers
    pub fn is_shown(&self, answers: &AnswerStore) -> bool {
        self.show_when
            .as_ref()
            .is_none_or(|predicate| predicate.holds(answers))
    }
}
