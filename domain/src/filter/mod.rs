//! Filter subdomain.
//!
//! - [`state::FilterState`]: search text, chip and facet selections
//! - [`partner::PartnerMapping`]: chip label to partner-name variants
//! - [`compiler::FilterCompiler`] / [`compiler::ResourceFilterEngine`]: predicate building and stable filtering

pub mod compiler;
pub mod partner;
pub mod state;
