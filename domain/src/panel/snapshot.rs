//! Persisted panel preferences
//!
//! The snapshot is the wire shape stored under [`PREFERENCE_KEY`]. Every field
//! is optional: a field absent from a stored snapshot leaves the live state at
//! its current value when restored. The pending "Other" draft is never saved.

use crate::filter::state::FILTER_CHIPS;
use crate::panel::state::PanelState;
use crate::tree::answers::AnswerStore;
use crate::tree::funnel::Funnel;
use crate::tree::key::AnswerKey;
use crate::tree::question::{Category, QuestionKey};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Storage key for the panel snapshot
pub const PREFERENCE_KEY: &str = "searchPanelPreferences";

/// Lifetime of a stored snapshot
pub const PREFERENCE_TTL: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// Serializable subset of [`PanelState`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_chip: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub county: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cw: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision_tree_open: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expanded_questions: Option<BTreeMap<QuestionKey, bool>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision_tree_answers: Option<BTreeMap<AnswerKey, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expanded_categories: Option<BTreeMap<Category, bool>>,
    /// `Some(None)` is a stored `null`: no funnel selected
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub selected_funnel: Option<Option<Funnel>>,
}

/// Distinguishes an explicit `null` from an absent field
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl PreferenceSnapshot {
    /// Capture every persisted field of `state`
    pub fn capture(state: &PanelState) -> Self {
        Self {
            selected_chip: Some(state.filter.selected_chip),
            search_text: Some(state.filter.search_text.clone()),
            county: Some(state.filter.county.clone()),
            insurance: Some(state.filter.insurance.clone()),
            cw: Some(state.filter.cw.clone()),
            decision_tree_open: Some(state.decision_tree_open),
            expanded_questions: Some(state.expansion.questions.clone()),
            decision_tree_answers: Some(state.answers.entries().clone()),
            expanded_categories: Some(state.expansion.categories.clone()),
            selected_funnel: Some(state.funnel),
        }
    }

    /// Overwrite the fields of `state` present in this snapshot.
    ///
    /// A chip index outside the chip list falls back to "All"; blank search
    /// text and blank answers are ignored.
    pub fn apply_to(&self, state: &mut PanelState) {
        if let Some(chip) = self.selected_chip {
            state.filter.selected_chip = if chip < FILTER_CHIPS.len() { chip } else { 0 };
        }
        if let Some(text) = self.search_text.as_ref().filter(|t| !t.is_empty()) {
            state.filter.search_text = text.clone();
        }
        if let Some(county) = &self.county {
            state.filter.county = county.clone();
        }
        if let Some(insurance) = &self.insurance {
            state.filter.insurance = insurance.clone();
        }
        if let Some(cw) = &self.cw {
            state.filter.cw = cw.clone();
        }
        if let Some(open) = self.decision_tree_open {
            state.decision_tree_open = open;
        }
        if let Some(questions) = &self.expanded_questions {
            state.expansion.questions = questions.clone();
        }
        if let Some(answers) = &self.decision_tree_answers {
            state.answers = AnswerStore::from_entries(
                answers.iter().map(|(k, v)| (k.clone(), v.clone())),
            );
        }
        if let Some(categories) = &self.expanded_categories {
            state.expansion.categories = categories.clone();
        }
        if let Some(funnel) = self.selected_funnel {
            state.funnel = funnel;
        }
    }

    /// Restore a fresh [`PanelState`] from this snapshot
    pub fn restore(&self) -> PanelState {
        let mut state = PanelState::default();
        self.apply_to(&mut state);
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::state::Facet;
    use crate::panel::state::{PanelAction, reduce};
    use crate::tree::key::Branch;
    use serde_json::json;

    fn populated() -> PanelState {
        let mut state = PanelState::new();
        let actions = vec![
            PanelAction::SetSearch("therapy".to_string()),
            PanelAction::SelectChip(3),
            PanelAction::ToggleFacet {
                facet: Facet::Insurance,
                option: "Private".to_string(),
            },
            PanelAction::SelectAnswer {
                key: AnswerKey::question("3"),
                option: "Services".to_string(),
            },
            PanelAction::SelectAnswer {
                key: AnswerKey::sub_option(&QuestionKey::new("3.2"), Branch::Trafficking, 1),
                option: "Yes".to_string(),
            },
            PanelAction::ToggleQuestion(QuestionKey::new("3")),
            PanelAction::ToggleCategory(Category::Demographic),
            PanelAction::SelectFunnel(Funnel::SystemPartner),
        ];
        for action in actions {
            reduce(&mut state, action).unwrap();
        }
        state
    }

    #[test]
    fn test_snapshot_round_trip() {
        let state = populated();
        let json = serde_json::to_string(&PreferenceSnapshot::capture(&state)).unwrap();
        let loaded: PreferenceSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.restore(), state);
    }

    #[test]
    fn test_wire_shape() {
        let value = serde_json::to_value(PreferenceSnapshot::capture(&populated())).unwrap();
        assert_eq!(value["selectedChip"], 3);
        assert_eq!(value["searchText"], "therapy");
        assert_eq!(value["selectedFunnel"], 1);
        assert_eq!(value["decisionTreeAnswers"]["3"], "Services");
        assert_eq!(value["decisionTreeAnswers"]["3.2.trafficking.1"], "Yes");
        assert_eq!(value["expandedCategories"]["DEMOGRAPHIC"], true);
    }

    #[test]
    fn test_missing_fields_keep_defaults() {
        let snapshot: PreferenceSnapshot =
            serde_json::from_value(json!({ "searchText": "hub" })).unwrap();
        let state = snapshot.restore();
        assert_eq!(state.filter.search_text, "hub");
        assert_eq!(state.funnel, Some(Funnel::ChildSpecific));
        assert!(state.decision_tree_open);
    }

    #[test]
    fn test_null_funnel_is_restored_as_unset() {
        let snapshot: PreferenceSnapshot =
            serde_json::from_value(json!({ "selectedFunnel": null })).unwrap();
        assert_eq!(snapshot.selected_funnel, Some(None));
        assert_eq!(snapshot.restore().funnel, None);
    }

    #[test]
    fn test_out_of_range_chip_falls_back_to_all() {
        let snapshot: PreferenceSnapshot =
            serde_json::from_value(json!({ "selectedChip": 99 })).unwrap();
        assert_eq!(snapshot.restore().filter.chip_label(), "All");
    }

    #[test]
    fn test_empty_search_text_is_ignored() {
        let mut state = PanelState::new();
        state.filter.search_text = "keep".to_string();
        let snapshot = PreferenceSnapshot {
            search_text: Some(String::new()),
            ..Default::default()
        };
        snapshot.apply_to(&mut state);
        assert_eq!(state.filter.search_text, "keep");
    }

    #[test]
    fn test_legacy_others_slot_restores() {
        let snapshot: PreferenceSnapshot = serde_json::from_value(
            json!({ "decisionTreeAnswers": { "3.2.0": "Absent from care" } }),
        )
        .unwrap();
        let state = snapshot.restore();
        let slot = AnswerKey::sub_option(&QuestionKey::new("3.2"), Branch::Others, 0);
        assert_eq!(state.answers.get(&slot), Some("Absent from care"));

        let value = serde_json::to_value(PreferenceSnapshot::capture(&state)).unwrap();
        assert_eq!(value["decisionTreeAnswers"]["3.2.others.0"], "Absent from care");
    }

    #[test]
    fn test_invalid_answer_key_rejects_snapshot() {
        let result: Result<PreferenceSnapshot, _> =
            serde_json::from_value(json!({ "decisionTreeAnswers": { "3.2.trafficking.x": "Yes" } }));
        assert!(result.is_err());
    }
}
