//! Funnel selection
//!
//! Two mutually exclusive paths through the decision tree. Each unlocks its
//! own fixed question block (see [`QuestionGraph::funnel_block`]).
//!
//! [`QuestionGraph::funnel_block`]: crate::tree::graph::QuestionGraph::funnel_block

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Funnel {
    /// Funnel 1: system partner placements and services
    SystemPartner,
    /// Funnel 2: child-specific resources
    ChildSpecific,
}

impl Funnel {
    pub const ALL: [Funnel; 2] = [Funnel::SystemPartner, Funnel::ChildSpecific];

    pub fn number(&self) -> u8 {
        match self {
            Funnel::SystemPartner => 1,
            Funnel::ChildSpecific => 2,
        }
    }

    /// Prompt shown next to the funnel's radio button
    pub fn prompt(&self) -> &'static str {
        match self {
            Funnel::SystemPartner => {
                "If you would like more information about system partner placements and services, select Funnel 1"
            }
            Funnel::ChildSpecific => {
                "If you would like child-specific resources, select Funnel 2"
            }
        }
    }
}

impl TryFrom<u8> for Funnel {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Funnel::SystemPartner),
            2 => Ok(Funnel::ChildSpecific),
            other => Err(DomainError::UnknownFunnel(other.to_string())),
        }
    }
}

impl From<Funnel> for u8 {
    fn from(funnel: Funnel) -> Self {
        funnel.number()
    }
}

impl fmt::Display for Funnel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FUNNEL - {}", self.number())
    }
}

/// Select `funnel`, clearing the selection when it is already active
pub fn toggle_funnel(current: Option<Funnel>, funnel: Funnel) -> Option<Funnel> {
    if current == Some(funnel) {
        None
    } else {
        Some(funnel)
    }
}
