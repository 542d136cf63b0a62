//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod filter_observer;
pub mod preference_store;
pub mod progress;
pub mod resource_source;
