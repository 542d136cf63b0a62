//! Load resources use case
//!
//! Performs the single fetch of the resource catalog. A failure never
//! propagates: the caller receives an empty collection together with the
//! error message, and may retry manually.

use crate::ports::progress::{LoadProgress, NoProgress};
use crate::ports::resource_source::ResourceSource;
use navigator_domain::Resource;
use std::sync::Arc;
use tracing::{info, warn};

/// Outcome of one fetch attempt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceLoad {
    pub resources: Vec<Resource>,
    /// Error message when the fetch failed; `resources` is then empty
    pub error: Option<String>,
}

impl ResourceLoad {
    pub fn loaded(resources: Vec<Resource>) -> Self {
        Self {
            resources,
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            resources: Vec::new(),
            error: Some(message.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Use case for fetching the resource catalog once
pub struct LoadResourcesUseCase {
    source: Arc<dyn ResourceSource>,
}

impl LoadResourcesUseCase {
    pub fn new(source: Arc<dyn ResourceSource>) -> Self {
        Self { source }
    }

    /// Location of the underlying source
    pub fn source_description(&self) -> String {
        self.source.describe()
    }

    pub async fn execute(&self) -> ResourceLoad {
        self.execute_with_progress(&NoProgress).await
    }

    pub async fn execute_with_progress(&self, progress: &dyn LoadProgress) -> ResourceLoad {
        let location = self.source.describe();
        progress.on_fetch_start(&location);
        let load = self.fetch(&location).await;
        progress.on_fetch_complete(load.resources.len(), load.error.as_deref());
        load
    }

    async fn fetch(&self, location: &str) -> ResourceLoad {
        match self.source.fetch().await {
            Ok(resources) => {
                info!("Loaded {} resources from {}", resources.len(), location);
                ResourceLoad::loaded(resources)
            }
            Err(e) => {
                warn!("Failed to load resources from {}: {}", location, e);
                ResourceLoad::failed(e.to_string())
            }
        }
    }
}
