//! Visibility resolution
//!
//! [`resolve`] is a pure function of the static graph and the current
//! answer/expansion/funnel state. It is recomputed after every mutation;
//! nothing is cached, so a cleared gating answer hides its dependents on the
//! next call.

use crate::tree::answers::AnswerStore;
use crate::tree::expansion::ExpansionState;
use crate::tree::funnel::Funnel;
use crate::tree::graph::QuestionGraph;
use crate::tree::key::{AnswerKey, Branch};
use crate::tree::question::{Category, QuestionKey};

/// Inputs of a resolution pass
#[derive(Debug, Clone, Copy)]
pub struct VisibilityInput<'a> {
    pub graph: &'a QuestionGraph,
    pub answers: &'a AnswerStore,
    pub expansion: &'a ExpansionState,
    pub funnel: Option<Funnel>,
    pub open: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleOption {
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleQuestion {
    pub key: QuestionKey,
    pub text: String,
    pub expanded: bool,
    /// Empty unless `expanded`
    pub options: Vec<VisibleOption>,
    pub answer: Option<String>,
    /// Draft text when this question holds the live "Other" capture
    pub other_draft: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleCategory {
    pub category: Category,
    pub expanded: bool,
    /// Empty unless `expanded`
    pub questions: Vec<VisibleQuestion>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleSlot {
    pub key: AnswerKey,
    pub option: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleBranch {
    pub base: QuestionKey,
    pub branch: Branch,
    pub slots: Vec<VisibleSlot>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleFunnelBlock {
    pub funnel: Funnel,
    pub questions: Vec<VisibleQuestion>,
    pub branches: Vec<VisibleBranch>,
}

/// Derived view of the decision tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleTree {
    pub open: bool,
    pub categories: Vec<VisibleCategory>,
    pub funnel: Option<Funnel>,
    pub funnel_block: Option<VisibleFunnelBlock>,
}

impl VisibleTree {
    /// Keys of every question rendered under an expanded category
    pub fn question_keys(&self) -> impl Iterator<Item = &QuestionKey> {
        self.categories
            .iter()
            .flat_map(|c| c.questions.iter().map(|q| &q.key))
    }

    pub fn is_visible(&self, key: &QuestionKey) -> bool {
        self.question_keys().any(|k| k == key)
    }

    pub fn category(&self, category: Category) -> Option<&VisibleCategory> {
        self.categories.iter().find(|c| c.category == category)
    }
}

/// Compute the visible tree
pub fn resolve(input: VisibilityInput<'_>) -> VisibleTree {
    let categories = Category::ALL
        .into_iter()
        .map(|category| {
            let expanded = input.expansion.is_category_expanded(category);
            let questions = if expanded {
                input
                    .graph
                    .questions_in(category)
                    .filter(|q| q.is_shown(input.answers))
                    .map(|q| {
                        let expanded = input.expansion.is_question_expanded(&q.key);
                        visible_question(input.answers, &q.key, &q.text, &q.options, expanded)
                    })
                    .collect()
            } else {
                Vec::new()
            };
            VisibleCategory {
                category,
                expanded,
                questions,
            }
        })
        .collect();

    let funnel_block = input
        .funnel
        .filter(|_| input.expansion.is_category_expanded(Category::Funnel))
        .and_then(|funnel| input.graph.funnel_block(funnel))
        .map(|block| {
            let questions = block
                .questions
                .iter()
                .map(|q| visible_question(input.answers, &q.key, &q.text, &q.options, true))
                .collect();
            let branches = block
                .questions
                .iter()
                .flat_map(|q| open_branches(input, &q.key))
                .collect();
            VisibleFunnelBlock {
                funnel: block.funnel,
                questions,
                branches,
            }
        });

    VisibleTree {
        open: input.open,
        categories,
        funnel: input.funnel,
        funnel_block,
    }
}

fn visible_question(
    answers: &AnswerStore,
    key: &QuestionKey,
    text: &str,
    options: &[String],
    expanded: bool,
) -> VisibleQuestion {
    let answer_key = AnswerKey::from(key.clone());
    let options = if expanded {
        options
            .iter()
            .map(|label| VisibleOption {
                label: label.clone(),
                selected: answers.is_selected(&answer_key, label),
            })
            .collect()
    } else {
        Vec::new()
    };
    let other_draft = answers
        .other_capture()
        .filter(|c| c.key == answer_key)
        .map(|c| c.draft.clone());

    VisibleQuestion {
        key: key.clone(),
        text: text.to_string(),
        expanded,
        options,
        answer: answers.get(&answer_key).map(str::to_string),
        other_draft,
    }
}

/// Branches under `base` whose label matches the stored answer
fn open_branches(input: VisibilityInput<'_>, base: &QuestionKey) -> Vec<VisibleBranch> {
    let answer = input.answers.get(&AnswerKey::from(base.clone()));
    input
        .graph
        .branches_for(base)
        .filter(|b| answer == Some(b.branch.label()))
        .map(|b| VisibleBranch {
            base: b.base.clone(),
            branch: b.branch,
            slots: b
                .options
                .iter()
                .enumerate()
                .map(|(index, option)| {
                    let key = AnswerKey::sub_option(&b.base, b.branch, index);
                    let selected = input.answers.get(&key) == Some(option.as_str());
                    VisibleSlot {
                        key,
                        option: option.clone(),
                        selected,
                    }
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        graph: QuestionGraph,
        answers: AnswerStore,
        expansion: ExpansionState,
        funnel: Option<Funnel>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                graph: QuestionGraph::builtin(),
                answers: AnswerStore::new(),
                expansion: ExpansionState::default(),
                funnel: None,
            }
        }

        fn resolve(&self) -> VisibleTree {
            resolve(VisibilityInput {
                graph: &self.graph,
                answers: &self.answers,
                expansion: &self.expansion,
                funnel: self.funnel,
                open: true,
            })
        }
    }

    fn key(id: &str) -> QuestionKey {
        QuestionKey::new(id)
    }

    #[test]
    fn test_collapsed_category_hides_questions() {
        let fixture = Fixture::new();
        let tree = fixture.resolve();
        let demographic = tree.category(Category::Demographic).unwrap();
        assert!(!demographic.expanded);
        assert!(demographic.questions.is_empty());
        assert!(!tree.is_visible(&key("1")));
    }

    #[test]
    fn test_every_category_is_listed() {
        let tree = Fixture::new().resolve();
        let listed: Vec<_> = tree.categories.iter().map(|c| c.category).collect();
        assert_eq!(listed, Category::ALL.to_vec());
    }

    #[test]
    fn test_show_when_round_trip() {
        let mut fixture = Fixture::new();
        assert!(!fixture.resolve().is_visible(&key("3.1")));

        fixture
            .answers
            .set_answer(AnswerKey::question("3"), "Services");
        let tree = fixture.resolve();
        assert!(tree.is_visible(&key("3.1")));
        assert!(tree.is_visible(&key("3.2")));

        // Same option again toggles the gate off
        fixture
            .answers
            .set_answer(AnswerKey::question("3"), "Services");
        let tree = fixture.resolve();
        assert!(!tree.is_visible(&key("3.1")));
        assert!(!tree.is_visible(&key("3.2")));
    }

    #[test]
    fn test_dependent_answers_survive_hidden_parent() {
        let mut fixture = Fixture::new();
        fixture
            .answers
            .set_answer(AnswerKey::question("3"), "Placement options");
        fixture
            .answers
            .set_answer(AnswerKey::question("3.1"), "Probation");
        fixture
            .answers
            .set_answer(AnswerKey::question("3"), "Placement options");

        assert!(!fixture.resolve().is_visible(&key("3.1")));
        assert_eq!(
            fixture.answers.get(&AnswerKey::question("3.1")),
            Some("Probation")
        );
    }

    #[test]
    fn test_answered_gate_for_four_one() {
        let mut fixture = Fixture::new();
        assert!(!fixture.resolve().is_visible(&key("4.1")));
        fixture
            .answers
            .set_answer(AnswerKey::question("4"), "Education");
        assert!(fixture.resolve().is_visible(&key("4.1")));
    }

    #[test]
    fn test_options_only_when_question_expanded() {
        let mut fixture = Fixture::new();
        fixture.expansion.toggle_category(Category::Demographic);
        let tree = fixture.resolve();
        let question = &tree.category(Category::Demographic).unwrap().questions[0];
        assert!(question.options.is_empty());

        fixture.expansion.toggle_question(&key("1"));
        fixture
            .answers
            .set_answer(AnswerKey::question("1"), "Education");
        let tree = fixture.resolve();
        let question = &tree.category(Category::Demographic).unwrap().questions[0];
        assert_eq!(question.options.len(), 7);
        assert!(question.options.iter().any(|o| o.label == "Education" && o.selected));
    }

    #[test]
    fn test_other_draft_is_reported() {
        let mut fixture = Fixture::new();
        fixture.expansion.toggle_category(Category::Demographic);
        fixture.answers.set_answer(AnswerKey::question("2"), "Other");
        fixture.answers.edit_other("Court liaison");
        let tree = fixture.resolve();
        let question = tree
            .category(Category::Demographic)
            .unwrap()
            .questions
            .iter()
            .find(|q| q.key == key("2"))
            .unwrap();
        assert_eq!(question.other_draft.as_deref(), Some("Court liaison"));
        assert_eq!(question.answer, None);
    }

    #[test]
    fn test_funnel_block_follows_selection() {
        let mut fixture = Fixture::new();
        assert!(fixture.resolve().funnel_block.is_none());

        fixture.funnel = Some(Funnel::SystemPartner);
        let block = fixture.resolve().funnel_block.unwrap();
        assert_eq!(block.funnel, Funnel::SystemPartner);
        assert_eq!(block.questions.len(), 2);
        assert!(block.questions.iter().all(|q| q.expanded));

        fixture.expansion.toggle_category(Category::Funnel);
        assert!(fixture.resolve().funnel_block.is_none());
    }

    #[test]
    fn test_sub_option_branch_visibility() {
        let mut fixture = Fixture::new();
        fixture.funnel = Some(Funnel::ChildSpecific);
        assert!(fixture.resolve().funnel_block.unwrap().branches.is_empty());

        fixture
            .answers
            .set_answer(AnswerKey::question("3.2"), "Child Trafficking");
        let slot_key = AnswerKey::sub_option(&key("3.2"), Branch::Trafficking, 1);
        fixture.answers.set_answer(slot_key.clone(), "CSEC");

        let block = fixture.resolve().funnel_block.unwrap();
        assert_eq!(block.branches.len(), 1);
        let branch = &block.branches[0];
        assert_eq!(branch.branch, Branch::Trafficking);
        assert_eq!(branch.slots.len(), 4);
        assert!(branch.slots[1].selected);
        assert_eq!(branch.slots[1].key, slot_key);

        fixture
            .answers
            .set_answer(AnswerKey::question("3.2"), "Others");
        let block = fixture.resolve().funnel_block.unwrap();
        assert_eq!(block.branches[0].branch, Branch::Others);
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let mut fixture = Fixture::new();
        fixture.funnel = Some(Funnel::ChildSpecific);
        fixture
            .answers
            .set_answer(AnswerKey::question("3"), "Services");
        assert_eq!(fixture.resolve(), fixture.resolve());
    }
}
