//! Expand/collapse flags for categories and questions

use crate::tree::question::{Category, QuestionKey};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Two independent flag maps; a missing entry means collapsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionState {
    pub categories: BTreeMap<Category, bool>,
    pub questions: BTreeMap<QuestionKey, bool>,
}

impl Default for ExpansionState {
    fn default() -> Self {
        Self {
            categories: Category::ALL
                .into_iter()
                .filter(Category::default_expanded)
                .map(|c| (c, true))
                .collect(),
            questions: BTreeMap::new(),
        }
    }
}

impl ExpansionState {
    /// Everything collapsed, including the default-expanded funnel category
    pub fn collapsed() -> Self {
        Self {
            categories: BTreeMap::new(),
            questions: BTreeMap::new(),
        }
    }

    pub fn is_category_expanded(&self, category: Category) -> bool {
        self.categories.get(&category).copied().unwrap_or(false)
    }

    pub fn is_question_expanded(&self, key: &QuestionKey) -> bool {
        self.questions.get(key).copied().unwrap_or(false)
    }

    pub fn toggle_category(&mut self, category: Category) {
        let expanded = self.is_category_expanded(category);
        self.categories.insert(category, !expanded);
    }

    pub fn toggle_question(&mut self, key: &QuestionKey) {
        let expanded = self.is_question_expanded(key);
        self.questions.insert(key.clone(), !expanded);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_expands_funnel_only() {
        let state = ExpansionState::default();
        assert!(state.is_category_expanded(Category::Funnel));
        assert!(!state.is_category_expanded(Category::Demographic));
    }

    #[test]
    fn test_toggle_category_and_question() {
        let mut state = ExpansionState::default();
        state.toggle_category(Category::Demographic);
        state.toggle_category(Category::Funnel);
        assert!(state.is_category_expanded(Category::Demographic));
        assert!(!state.is_category_expanded(Category::Funnel));

        let key = QuestionKey::new("1");
        state.toggle_question(&key);
        assert!(state.is_question_expanded(&key));
        state.toggle_question(&key);
        assert!(!state.is_question_expanded(&key));
    }

    #[test]
    fn test_collapsed_has_no_flags() {
        let state = ExpansionState::collapsed();
        assert!(!state.is_category_expanded(Category::Funnel));
    }
}
