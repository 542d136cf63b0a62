//! Port for filter-change notifications.
//!
//! Every change to the filter state is reported as a [`FilterCriteria`]
//! event with the chip resolved to its label. This is separate from
//! `tracing`: the observer receives the full criteria in a machine-readable
//! form.

use navigator_domain::FilterCriteria;

/// Receiver of filter-change events.
///
/// The method is synchronous and non-fallible; implementations swallow
/// their own failures.
pub trait FilterObserver: Send + Sync {
    fn on_filter_change(&self, criteria: &FilterCriteria);
}

/// No-op implementation for tests and when no consumer is attached.
pub struct NoFilterObserver;

impl FilterObserver for NoFilterObserver {
    fn on_filter_change(&self, _criteria: &FilterCriteria) {}
}
