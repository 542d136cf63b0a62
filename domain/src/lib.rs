//! Domain layer for resource-navigator
//!
//! This crate contains the search panel's state model and its pure rules.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Decision tree
//!
//! A static [`QuestionGraph`] of categorized questions. Answers are stored by
//! [`AnswerKey`] with toggle semantics; [`resolve`] derives what is visible
//! from the graph, the answers and the expand/collapse flags.
//!
//! ## Filtering
//!
//! [`FilterState`] holds the free-text search, the selected chip and the
//! facet selections. [`FilterCompiler`] turns it into a predicate that
//! [`ResourceFilterEngine`] applies to a [`Resource`] list in order.
//!
//! ## Panel
//!
//! [`PanelState`] bundles everything; [`reduce`] applies a [`PanelAction`].
//! [`PreferenceSnapshot`] is the persisted subset.

pub mod config;
pub mod core;
pub mod filter;
pub mod panel;
pub mod resource;
pub mod tree;

// Re-export commonly used types
pub use config::{
    OutputFormat,
    validation::{ConfigIssue, ConfigIssueCode, Severity},
};
pub use core::error::DomainError;
pub use filter::{
    compiler::{
        ChipPredicate, CompiledFilter, FacetPredicate, FilterCompiler, ResourceFilterEngine,
        ResourcePredicate, SearchPredicate,
    },
    partner::PartnerMapping,
    state::{ALL_CHIP, FILTER_CHIPS, Facet, FilterCriteria, FilterState},
};
pub use panel::{
    snapshot::{PREFERENCE_KEY, PREFERENCE_TTL, PreferenceSnapshot},
    state::{PanelAction, PanelState, StateChange, reduce},
};
pub use resource::entities::{Direction, Resource, decode_collection};
pub use tree::{
    answers::{AnswerStore, OTHER_OPTION, OTHER_PREFIX, OtherCapture},
    expansion::ExpansionState,
    funnel::Funnel,
    graph::{FunnelBlock, FunnelQuestion, QuestionGraph, SubOptionBranch},
    key::{AnswerKey, Branch, SubOptionKey},
    question::{Category, Question, QuestionKey, ShowWhen},
    visibility::{
        VisibilityInput, VisibleBranch, VisibleCategory, VisibleFunnelBlock, VisibleOption,
        VisibleQuestion, VisibleSlot, VisibleTree, resolve,
    },
};
