//! Static question catalog
//!
//! [`QuestionGraph::builtin`] holds the decision tree shipped with the
//! navigator: the category questions, the funnel blocks and the sub-option
//! branches hanging off question `3.2`.

use crate::tree::funnel::Funnel;
use crate::tree::key::Branch;
use crate::tree::question::{Category, Question, QuestionKey, ShowWhen};

/// A question as rendered inside a funnel block, with its own option list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunnelQuestion {
    pub key: QuestionKey,
    pub text: String,
    pub options: Vec<String>,
}

impl FunnelQuestion {
    fn new(key: &str, text: &str, options: &[&str]) -> Self {
        Self {
            key: QuestionKey::new(key),
            text: text.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
        }
    }
}

/// Questions unlocked by a funnel selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunnelBlock {
    pub funnel: Funnel,
    pub questions: Vec<FunnelQuestion>,
}

/// Extra option slots spawned under `base` when it is answered with the
/// branch label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubOptionBranch {
    pub base: QuestionKey,
    pub branch: Branch,
    pub options: Vec<String>,
}

/// The decision tree catalog (immutable after construction)
#[derive(Debug, Clone)]
pub struct QuestionGraph {
    questions: Vec<Question>,
    funnel_blocks: Vec<FunnelBlock>,
    branches: Vec<SubOptionBranch>,
}

impl QuestionGraph {
    pub fn new(
        questions: Vec<Question>,
        funnel_blocks: Vec<FunnelBlock>,
        branches: Vec<SubOptionBranch>,
    ) -> Self {
        Self {
            questions,
            funnel_blocks,
            branches,
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, key: &QuestionKey) -> Option<&Question> {
        self.questions.iter().find(|q| &q.key == key)
    }

    /// Direct children of `key`, in catalog order
    pub fn children<'a>(&'a self, key: &'a QuestionKey) -> impl Iterator<Item = &'a Question> {
        self.questions
            .iter()
            .filter(move |q| q.parent.as_ref() == Some(key))
    }

    /// Category of a question, inherited from the nearest categorized ancestor
    pub fn category_of(&self, key: &QuestionKey) -> Option<Category> {
        let mut current = self.question(key)?;
        // Bounded by the catalog size so a malformed parent cycle terminates
        for _ in 0..=self.questions.len() {
            if let Some(category) = current.category {
                return Some(category);
            }
            current = self.question(current.parent.as_ref()?)?;
        }
        None
    }

    /// All questions of a category in catalog order, visible or not
    pub fn questions_in(&self, category: Category) -> impl Iterator<Item = &Question> {
        self.questions
            .iter()
            .filter(move |q| self.category_of(&q.key) == Some(category))
    }

    pub fn funnel_block(&self, funnel: Funnel) -> Option<&FunnelBlock> {
        self.funnel_blocks.iter().find(|b| b.funnel == funnel)
    }

    pub fn branch(&self, base: &QuestionKey, branch: Branch) -> Option<&SubOptionBranch> {
        self.branches
            .iter()
            .find(|b| &b.base == base && b.branch == branch)
    }

    /// Branches that can spawn under `base`
    pub fn branches_for<'a>(
        &'a self,
        base: &'a QuestionKey,
    ) -> impl Iterator<Item = &'a SubOptionBranch> {
        self.branches.iter().filter(move |b| &b.base == base)
    }

    /// The catalog used by the navigator
    pub fn builtin() -> Self {
        let questions = vec![
            Question::new(
                "1",
                "What system are you affiliated with?",
                &[
                    "Child Welfare Services (CWS)",
                    "Behavioral Health (BH)",
                    "Education",
                    "Probation",
                    "Regional center",
                    "Community partner",
                    "Other",
                ],
            )
            .in_category(Category::Demographic),
            Question::new(
                "2",
                "What role do you most closely identify with?",
                &["Direct Services", "Leadership/Management", "Fiscal", "Other"],
            )
            .in_category(Category::Demographic),
            Question::new(
                "3",
                "If you would like child-specific resources, please select from the following resource choices, or if looking for general system information, go to the next question.",
                &["Services", "Placement options"],
            )
            .in_category(Category::Funnel)
            .with_sub_questions(),
            Question::new(
                "3.1",
                "What systems already serve the youth, or what systems would the youth be eligible for?",
                &[
                    "Child Welfare Services (CWS)",
                    "Behavioral Health (BH)",
                    "Regional Center",
                    "Probation",
                    "Education",
                ],
            )
            .with_parent("3")
            .shown_when(ShowWhen::answer_in("3", &["Services", "Placement options"])),
            Question::new(
                "3.2",
                "What complex needs does the youth have?",
                &[
                    "Developmental needs",
                    "Behavioral health needs",
                    "Education needs",
                    "Substance use disorder(s)",
                    "CSEC",
                    "Placement disruption",
                ],
            )
            .with_parent("3")
            .shown_when(ShowWhen::answer_in("3", &["Services", "Placement options"])),
            Question::new(
                "4",
                "If you would like more information about system partner placements and services, please identify which system and which resource you would like to learn more about.",
                &[
                    "Child Welfare",
                    "Behavioral Health (BH)",
                    "Education",
                    "Probation",
                    "Regional center",
                ],
            )
            .in_category(Category::Funnel)
            .with_sub_questions(),
            Question::new(
                "4.1",
                "Would you like to know more about services and/or supports from the systems selected?",
                &["Services", "Placement options"],
            )
            .with_parent("4")
            .shown_when(ShowWhen::answered("4")),
        ];

        let funnel_blocks = vec![
            FunnelBlock {
                funnel: Funnel::SystemPartner,
                questions: vec![
                    FunnelQuestion::new(
                        "4",
                        "If you would like more information about system partner placements and services, please identify which system and which resource you would like to learn more about.",
                        &[
                            "Child welfare services (CWS)",
                            "Behavioral health (BH)",
                            "Regional Center",
                            "Probation",
                            "Education",
                        ],
                    ),
                    FunnelQuestion::new(
                        "4.1",
                        "Would you like to know more about services and/or supports from the systems selected?",
                        &["Services", "Placement options", "Both"],
                    ),
                ],
            },
            FunnelBlock {
                funnel: Funnel::ChildSpecific,
                questions: vec![
                    FunnelQuestion::new(
                        "3",
                        "If you would like child-specific resources, please select from the following resource choices.",
                        &["Services", "Placement Options", "Both"],
                    ),
                    FunnelQuestion::new(
                        "3.1",
                        "What systems already serve the youth? Select all that apply.",
                        &["CWS", "BH", "Regional Center", "Probation", "Education"],
                    ),
                    FunnelQuestion::new(
                        "3.2",
                        "What complex needs or issues does the youth have? Select all that apply.",
                        &[
                            "Developmental needs",
                            "Behavioral health needs",
                            "Education needs",
                            "Substance use disorder(s)",
                            "Child Trafficking",
                            "Placement disruption",
                            "Others",
                        ],
                    ),
                ],
            },
        ];

        let base = QuestionKey::new("3.2");
        let branch = |branch: Branch, options: &[&str]| SubOptionBranch {
            base: base.clone(),
            branch,
            options: options.iter().map(|o| o.to_string()).collect(),
        };
        let branches = vec![
            branch(
                Branch::SubstanceUse,
                &["SUD", "Substance", "Drug", "MAT", "Medication Assisted Treatment"],
            ),
            branch(
                Branch::Trafficking,
                &[
                    "Exploitation",
                    "CSEC",
                    "Commercial Sexual Exploitation of Children",
                    "Trafficking",
                ],
            ),
            branch(
                Branch::PlacementDisruption,
                &["Placement", "Disruption", "Stabilization", "Permanency", "Crisis"],
            ),
            branch(
                Branch::Others,
                &[
                    "Absent from care",
                    "Assessment/Evaluation",
                    "Career guidance",
                    "Chronic absenteeism",
                    "Developmental needs diagnosis",
                    "Dual jurisdiction youth CW and Probation",
                    "Family Connection",
                    "Family Criminality",
                    "Gang affiliation/membership",
                    "High-risk sexual behavior",
                    "Homelessness",
                    "Hospitalization",
                    "IEP / 504",
                    "Independent living skills",
                    "In-Patient",
                    "Learning disabilities",
                    "LGBTQIA+",
                    "Mental Health Crisis",
                    "Missing",
                    "Physically Assaultive",
                    "Suicidal / Self Harm",
                    "Suspension / Expulsion",
                    "Teaming",
                    "Threatening Physical Violence",
                    "Truancy",
                    "Victim Awareness",
                    "Vocational Training",
                ],
            ),
        ];

        Self::new(questions, funnel_blocks, branches)
    }
}

impl Default for QuestionGraph {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_children_follow_parent_pointer() {
        let graph = QuestionGraph::builtin();
        let three = QuestionKey::new("3");
        let children: Vec<_> = graph.children(&three).map(|q| q.key.as_str()).collect();
        assert_eq!(children, vec!["3.1", "3.2"]);
    }

    #[test]
    fn test_category_is_inherited() {
        let graph = QuestionGraph::builtin();
        assert_eq!(
            graph.category_of(&QuestionKey::new("4.1")),
            Some(Category::Funnel)
        );
        assert_eq!(
            graph.category_of(&QuestionKey::new("2")),
            Some(Category::Demographic)
        );
        assert_eq!(graph.category_of(&QuestionKey::new("9")), None);
    }

    #[test]
    fn test_questions_in_category() {
        let graph = QuestionGraph::builtin();
        let keys: Vec<_> = graph
            .questions_in(Category::Funnel)
            .map(|q| q.key.as_str())
            .collect();
        assert_eq!(keys, vec!["3", "3.1", "3.2", "4", "4.1"]);
    }

    #[test]
    fn test_funnel_blocks() {
        let graph = QuestionGraph::builtin();
        let one: Vec<_> = graph
            .funnel_block(Funnel::SystemPartner)
            .unwrap()
            .questions
            .iter()
            .map(|q| q.key.as_str())
            .collect();
        assert_eq!(one, vec!["4", "4.1"]);

        let two: Vec<_> = graph
            .funnel_block(Funnel::ChildSpecific)
            .unwrap()
            .questions
            .iter()
            .map(|q| q.key.as_str())
            .collect();
        assert_eq!(two, vec!["3", "3.1", "3.2"]);
    }

    #[test]
    fn test_every_branch_has_options() {
        let graph = QuestionGraph::builtin();
        let base = QuestionKey::new("3.2");
        assert_eq!(graph.branches_for(&base).count(), Branch::ALL.len());
        for branch in Branch::ALL {
            assert!(!graph.branch(&base, branch).unwrap().options.is_empty());
        }
    }

    #[test]
    fn test_parent_cycle_terminates() {
        let graph = QuestionGraph::new(
            vec![
                Question::new("a", "A", &[]).with_parent("b"),
                Question::new("b", "B", &[]).with_parent("a"),
            ],
            vec![],
            vec![],
        );
        assert_eq!(graph.category_of(&QuestionKey::new("a")), None);
    }
}
