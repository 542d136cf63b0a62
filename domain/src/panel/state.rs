//! Panel state and reducer
//!
//! Everything the search panel owns lives in one plain [`PanelState`]. User
//! interactions are expressed as [`PanelAction`]s and applied by [`reduce`];
//! derived views (visible tree, compiled filter) are computed from the state
//! on demand. Persistence is the caller's concern.

use crate::core::error::DomainError;
use crate::filter::state::{Facet, FilterCriteria, FilterState};
use crate::tree::answers::AnswerStore;
use crate::tree::expansion::ExpansionState;
use crate::tree::funnel::{Funnel, toggle_funnel};
use crate::tree::graph::QuestionGraph;
use crate::tree::key::AnswerKey;
use crate::tree::question::{Category, QuestionKey};
use crate::tree::visibility::{VisibilityInput, VisibleTree, resolve};

/// All mutable state of the search panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelState {
    pub filter: FilterState,
    pub answers: AnswerStore,
    pub expansion: ExpansionState,
    pub funnel: Option<Funnel>,
    pub decision_tree_open: bool,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            filter: FilterState::default(),
            answers: AnswerStore::default(),
            expansion: ExpansionState::default(),
            funnel: Some(Funnel::ChildSpecific),
            decision_tree_open: true,
        }
    }
}

impl PanelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn criteria(&self) -> FilterCriteria {
        self.filter.criteria()
    }

    pub fn visible_tree(&self, graph: &QuestionGraph) -> VisibleTree {
        resolve(VisibilityInput {
            graph,
            answers: &self.answers,
            expansion: &self.expansion,
            funnel: self.funnel,
            open: self.decision_tree_open,
        })
    }
}

/// A user interaction with the panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelAction {
    SetSearch(String),
    SelectChip(usize),
    ToggleFacet { facet: Facet, option: String },
    SelectAnswer { key: AnswerKey, option: String },
    EditOther(String),
    CommitOther,
    CancelOther,
    ToggleCategory(Category),
    ToggleQuestion(QuestionKey),
    ToggleDecisionTree,
    SelectFunnel(Funnel),
    ClearAll,
}

/// What a reduction touched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StateChange {
    /// The filter state differs from before the action
    pub filter_changed: bool,
    /// Any part of the panel state differs from before the action
    pub state_changed: bool,
}

/// Apply `action` to `state`.
///
/// An out-of-range chip index is rejected and leaves the state untouched.
pub fn reduce(state: &mut PanelState, action: PanelAction) -> Result<StateChange, DomainError> {
    let before = state.clone();

    match action {
        PanelAction::SetSearch(text) => state.filter.search_text = text,
        PanelAction::SelectChip(index) => {
            state.filter.select_chip(index)?;
        }
        PanelAction::ToggleFacet { facet, option } => state.filter.toggle_facet(facet, &option),
        PanelAction::SelectAnswer { key, option } => state.answers.set_answer(key, &option),
        PanelAction::EditOther(text) => state.answers.edit_other(&text),
        PanelAction::CommitOther => state.answers.commit_other(),
        PanelAction::CancelOther => state.answers.cancel_other(),
        PanelAction::ToggleCategory(category) => state.expansion.toggle_category(category),
        PanelAction::ToggleQuestion(key) => state.expansion.toggle_question(&key),
        PanelAction::ToggleDecisionTree => state.decision_tree_open = !state.decision_tree_open,
        PanelAction::SelectFunnel(funnel) => state.funnel = toggle_funnel(state.funnel, funnel),
        PanelAction::ClearAll => clear_all(state),
    }

    Ok(StateChange {
        filter_changed: state.filter != before.filter,
        state_changed: *state != before,
    })
}

/// Reset everything, collapsing the funnel category and closing the tree
fn clear_all(state: &mut PanelState) {
    state.filter = FilterState::default();
    state.answers.clear_all();
    state.expansion = ExpansionState::collapsed();
    state.funnel = None;
    state.decision_tree_open = false;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(key: &str, option: &str) -> PanelAction {
        PanelAction::SelectAnswer {
            key: AnswerKey::question(key),
            option: option.to_string(),
        }
    }

    #[test]
    fn test_initial_state() {
        let state = PanelState::new();
        assert_eq!(state.funnel, Some(Funnel::ChildSpecific));
        assert!(state.decision_tree_open);
        assert!(state.expansion.is_category_expanded(Category::Funnel));
        assert_eq!(state.filter.chip_label(), "All");
    }

    #[test]
    fn test_search_reports_filter_change() {
        let mut state = PanelState::new();
        let change = reduce(&mut state, PanelAction::SetSearch("hub".to_string())).unwrap();
        assert!(change.filter_changed);
        assert!(change.state_changed);

        let change = reduce(&mut state, PanelAction::SetSearch("hub".to_string())).unwrap();
        assert!(!change.filter_changed);
        assert!(!change.state_changed);
    }

    #[test]
    fn test_answer_is_not_a_filter_change() {
        let mut state = PanelState::new();
        let change = reduce(&mut state, answer("1", "Education")).unwrap();
        assert!(!change.filter_changed);
        assert!(change.state_changed);
    }

    #[test]
    fn test_out_of_range_chip_is_rejected() {
        let mut state = PanelState::new();
        assert!(reduce(&mut state, PanelAction::SelectChip(42)).is_err());
        assert_eq!(state, PanelState::new());
    }

    #[test]
    fn test_funnel_reselect_clears() {
        let mut state = PanelState::new();
        reduce(&mut state, PanelAction::SelectFunnel(Funnel::SystemPartner)).unwrap();
        assert_eq!(state.funnel, Some(Funnel::SystemPartner));
        reduce(&mut state, PanelAction::SelectFunnel(Funnel::SystemPartner)).unwrap();
        assert_eq!(state.funnel, None);
    }

    #[test]
    fn test_other_flow_through_reducer() {
        let mut state = PanelState::new();
        reduce(&mut state, answer("1", "Other")).unwrap();
        reduce(&mut state, PanelAction::EditOther("Homeless Services".to_string())).unwrap();
        reduce(&mut state, PanelAction::CommitOther).unwrap();
        assert_eq!(
            state.answers.get(&AnswerKey::question("1")),
            Some("Other: Homeless Services")
        );
    }

    #[test]
    fn test_clear_all_resets_everything() {
        let mut state = PanelState::new();
        reduce(&mut state, PanelAction::SetSearch("x".to_string())).unwrap();
        reduce(&mut state, PanelAction::SelectChip(2)).unwrap();
        reduce(
            &mut state,
            PanelAction::ToggleFacet {
                facet: Facet::County,
                option: "Alameda".to_string(),
            },
        )
        .unwrap();
        reduce(&mut state, answer("2", "Fiscal")).unwrap();
        reduce(&mut state, PanelAction::ToggleQuestion(QuestionKey::new("2"))).unwrap();

        let change = reduce(&mut state, PanelAction::ClearAll).unwrap();
        assert!(change.filter_changed);
        assert_eq!(state.filter, FilterState::default());
        assert!(state.answers.is_empty());
        assert!(!state.expansion.is_category_expanded(Category::Funnel));
        assert!(!state.expansion.is_question_expanded(&QuestionKey::new("2")));
        assert_eq!(state.funnel, None);
        assert!(!state.decision_tree_open);
    }

    #[test]
    fn test_visible_tree_tracks_answers() {
        let graph = QuestionGraph::builtin();
        let mut state = PanelState::new();
        reduce(&mut state, answer("3", "Services")).unwrap();
        assert!(state.visible_tree(&graph).is_visible(&QuestionKey::new("3.2")));
        reduce(&mut state, answer("3", "Services")).unwrap();
        assert!(!state.visible_tree(&graph).is_visible(&QuestionKey::new("3.2")));
    }
}
