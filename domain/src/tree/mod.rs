//! Decision tree subdomain.
//!
//! - [`graph::QuestionGraph`]: static catalog of questions, funnel blocks and sub-option branches
//! - [`answers::AnswerStore`]: answers with toggle semantics and the "Other" capture
//! - [`expansion::ExpansionState`]: expand/collapse flags
//! - [`visibility::resolve`]: pure visible-tree derivation

pub mod answers;
pub mod expansion;
pub mod funnel;
pub mod graph;
pub mod key;
pub mod question;
pub mod visibility;
