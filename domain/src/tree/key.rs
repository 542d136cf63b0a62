//! Answer keys
//!
//! Answers are stored either against a graph question or against a synthetic
//! sub-option slot spawned under a question for a specific answer branch.
//!
//! # Wire form
//!
//! ```text
//! 3.1              question key
//! 3.2.sud.0        sub-option slot {base: 3.2, branch: sud, index: 0}
//! 3.2.others.12    sub-option slot {base: 3.2, branch: others, index: 12}
//! 3.2.12           legacy "Others" slot, read as 3.2.others.12
//! ```

use crate::core::error::DomainError;
use crate::tree::question::QuestionKey;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed answer branches that spawn sub-option slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Branch {
    SubstanceUse,
    Trafficking,
    PlacementDisruption,
    Others,
}

impl Branch {
    pub const ALL: [Branch; 4] = [
        Branch::SubstanceUse,
        Branch::Trafficking,
        Branch::PlacementDisruption,
        Branch::Others,
    ];

    /// The parent answer that opens this branch
    pub fn label(&self) -> &'static str {
        match self {
            Branch::SubstanceUse => "Substance use disorder(s)",
            Branch::Trafficking => "Child Trafficking",
            Branch::PlacementDisruption => "Placement disruption",
            Branch::Others => "Others",
        }
    }

    /// Segment used in the wire form of a [`SubOptionKey`]
    pub fn slug(&self) -> &'static str {
        match self {
            Branch::SubstanceUse => "sud",
            Branch::Trafficking => "trafficking",
            Branch::PlacementDisruption => "placement",
            Branch::Others => "others",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.label() == label)
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.slug() == slug)
    }
}

/// A dynamically spawned sub-option slot
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubOptionKey {
    pub base: QuestionKey,
    pub branch: Branch,
    pub index: usize,
}

impl SubOptionKey {
    pub fn new(base: QuestionKey, branch: Branch, index: usize) -> Self {
        Self {
            base,
            branch,
            index,
        }
    }
}

/// Key under which an answer is stored
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AnswerKey {
    Question(QuestionKey),
    SubOption(SubOptionKey),
}

impl AnswerKey {
    /// Shorthand for a question answer key.
    ///
    /// # Panics
    /// Panics on an invalid question identifier
    pub fn question(id: &str) -> Self {
        Self::Question(QuestionKey::new(id))
    }

    pub fn sub_option(base: &QuestionKey, branch: Branch, index: usize) -> Self {
        Self::SubOption(SubOptionKey::new(base.clone(), branch, index))
    }

    /// The question this answer belongs to (the base question for slots)
    pub fn question_key(&self) -> &QuestionKey {
        match self {
            AnswerKey::Question(key) => key,
            AnswerKey::SubOption(slot) => &slot.base,
        }
    }
}

impl From<QuestionKey> for AnswerKey {
    fn from(key: QuestionKey) -> Self {
        Self::Question(key)
    }
}

impl From<SubOptionKey> for AnswerKey {
    fn from(key: SubOptionKey) -> Self {
        Self::SubOption(key)
    }
}

impl fmt::Display for AnswerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerKey::Question(key) => write!(f, "{}", key),
            AnswerKey::SubOption(slot) => {
                write!(f, "{}.{}.{}", slot.base, slot.branch.slug(), slot.index)
            }
        }
    }
}

impl FromStr for AnswerKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('.').collect();

        // A branch slug must be the second-to-last segment, followed by the index
        if parts.len() >= 3 {
            let slug = parts[parts.len() - 2];
            if let Some(branch) = Branch::from_slug(slug) {
                let index = parts[parts.len() - 1]
                    .parse::<usize>()
                    .map_err(|_| DomainError::InvalidAnswerKey(s.to_string()))?;
                let base: QuestionKey = parts[..parts.len() - 2]
                    .join(".")
                    .parse()
                    .map_err(|_| DomainError::InvalidAnswerKey(s.to_string()))?;
                return Ok(Self::SubOption(SubOptionKey::new(base, branch, index)));
            }

            // Older snapshots stored "Others" slots without a slug
            if let Ok(index) = parts[parts.len() - 1].parse::<usize>() {
                let base: QuestionKey = parts[..parts.len() - 1]
                    .join(".")
                    .parse()
                    .map_err(|_| DomainError::InvalidAnswerKey(s.to_string()))?;
                return Ok(Self::SubOption(SubOptionKey::new(
                    base,
                    Branch::Others,
                    index,
                )));
            }
        }

        s.parse::<QuestionKey>()
            .map(Self::Question)
            .map_err(|_| DomainError::InvalidAnswerKey(s.to_string()))
    }
}

impl TryFrom<String> for AnswerKey {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AnswerKey> for String {
    fn from(key: AnswerKey) -> Self {
        key.to_string()
    }
}
