//! Resource source port
//!
//! Defines the interface for the one-shot fetch of the resource catalog.

use async_trait::async_trait;
use navigator_domain::Resource;
use thiserror::Error;

/// Errors that can occur while fetching resources
#[derive(Error, Debug)]
pub enum SourceError {
    /// The server answered with a non-success status code
    #[error("HTTP error! status: {0}")]
    HttpStatus(u16),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout")]
    Timeout,

    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },

    /// The body is not valid JSON
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// The body is valid JSON but not an array
    #[error("Expected a JSON array of resources")]
    NotAnArray,
}

/// Source of the resource catalog
///
/// This port defines how the application layer obtains resources.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ResourceSource: Send + Sync {
    /// Fetch the whole catalog once
    async fn fetch(&self) -> Result<Vec<Resource>, SourceError>;

    /// Human-readable location, used in logs and status lines
    fn describe(&self) -> String;
}
