//! Application layer for resource-navigator
//!
//! This crate contains use cases and port definitions.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    filter_observer::{FilterObserver, NoFilterObserver},
    preference_store::{InMemoryPreferenceStore, PreferenceError, PreferenceStore},
    progress::{LoadProgress, NoProgress},
    resource_source::{ResourceSource, SourceError},
};
pub use use_cases::load_resources::{LoadResourcesUseCase, ResourceLoad};
pub use use_cases::panel_controller::PanelController;
