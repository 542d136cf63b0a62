//! Panel Controller
//!
//! Owns the [`PanelState`] and the last fetched catalog. Every user action
//! goes through [`PanelController::dispatch`], which runs the domain reducer,
//! reports filter changes to the [`FilterObserver`] and, while saving is
//! enabled, rewrites the preference snapshot. Derived views (visible tree,
//! filtered listing) are recomputed on request.

use crate::ports::filter_observer::{FilterObserver, NoFilterObserver};
use crate::ports::preference_store::PreferenceStore;
use crate::use_cases::load_resources::ResourceLoad;
use navigator_domain::{
    DomainError, FilterCompiler, FilterCriteria, PREFERENCE_KEY, PREFERENCE_TTL, PanelAction,
    PanelState, PreferenceSnapshot, QuestionGraph, Resource, ResourceFilterEngine, StateChange,
    VisibleTree, reduce,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Panel controller managing state, persistence and derived views
pub struct PanelController {
    state: PanelState,
    graph: QuestionGraph,
    compiler: FilterCompiler,
    store: Arc<dyn PreferenceStore>,
    observer: Arc<dyn FilterObserver>,
    /// "Save my preference" toggle
    saving: bool,
    ttl: Duration,
    resources: Vec<Resource>,
    load_error: Option<String>,
}

impl PanelController {
    /// Create a controller with the built-in question graph and chip mapping
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self {
            state: PanelState::default(),
            graph: QuestionGraph::builtin(),
            compiler: FilterCompiler::default(),
            store,
            observer: Arc::new(NoFilterObserver),
            saving: false,
            ttl: PREFERENCE_TTL,
            resources: Vec::new(),
            load_error: None,
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn FilterObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Apply the stored snapshot, if any.
    ///
    /// A present snapshot also turns saving on. Missing, expired or malformed
    /// snapshots leave the state untouched. Returns whether one was applied.
    pub fn restore(&mut self) -> bool {
        let value = match self.store.get(PREFERENCE_KEY) {
            Ok(Some(value)) => value,
            Ok(None) => return false,
            Err(e) => {
                warn!("Failed to read saved preferences: {}", e);
                return false;
            }
        };

        let snapshot: PreferenceSnapshot = match serde_json::from_value(value) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                debug!("Discarding malformed saved preferences: {}", e);
                return false;
            }
        };

        let before = self.state.filter.clone();
        snapshot.apply_to(&mut self.state);
        self.saving = true;
        if self.state.filter != before {
            self.observer.on_filter_change(&self.state.criteria());
        }
        debug!("Restored saved preferences");
        true
    }

    /// Apply a user action.
    ///
    /// Persistence failures are logged and never fail the action.
    pub fn dispatch(&mut self, action: PanelAction) -> Result<StateChange, DomainError> {
        let change = reduce(&mut self.state, action)?;
        if change.filter_changed {
            self.observer.on_filter_change(&self.state.criteria());
        }
        if change.state_changed && self.saving {
            self.persist();
        }
        Ok(change)
    }

    /// Flip the "save my preference" toggle.
    ///
    /// Enabling writes the snapshot immediately; disabling deletes it.
    /// Returns the new setting.
    pub fn toggle_saved(&mut self) -> bool {
        self.saving = !self.saving;
        if self.saving {
            self.persist();
        } else if let Err(e) = self.store.delete(PREFERENCE_KEY) {
            warn!("Failed to delete saved preferences: {}", e);
        }
        self.saving
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Replace the catalog with the outcome of a fetch
    pub fn set_resources(&mut self, load: ResourceLoad) {
        self.resources = load.resources;
        self.load_error = load.error;
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn criteria(&self) -> FilterCriteria {
        self.state.criteria()
    }

    pub fn visible_tree(&self) -> VisibleTree {
        self.state.visible_tree(&self.graph)
    }

    /// Catalog entries accepted by the current filter, in catalog order
    pub fn filtered_resources(&self) -> Vec<&Resource> {
        let filter = self.compiler.compile_state(&self.state.filter);
        ResourceFilterEngine::apply(&self.resources, &filter)
    }

    fn persist(&self) {
        let snapshot = PreferenceSnapshot::capture(&self.state);
        let value = match serde_json::to_value(&snapshot) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to serialize preferences: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.set(PREFERENCE_KEY, value, self.ttl) {
            warn!("Failed to save preferences: {}", e);
        }
    }
}
