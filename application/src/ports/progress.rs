//! Progress notification port
//!
//! Defines the interface for reporting progress while the resource catalog
//! is being fetched.

/// Callback for fetch progress
///
/// Implementations live in the presentation layer.
pub trait LoadProgress: Send + Sync {
    /// Called before the source is contacted
    fn on_fetch_start(&self, source: &str);

    /// Called once the fetch finished, successfully or not
    fn on_fetch_complete(&self, count: usize, error: Option<&str>);
}

/// No-op progress for when reporting is not needed
pub struct NoProgress;

impl LoadProgress for NoProgress {
    fn on_fetch_start(&self, _source: &str) {}
    fn on_fetch_complete(&self, _count: usize, _error: Option<&str>) {}
}
