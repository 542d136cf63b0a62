//! Resource source adapters.
//!
//! Both adapters decode the body with
//! [`decode_collection`](navigator_domain::decode_collection): the body must
//! be a JSON array, and elements that are not objects are skipped.

mod file;
mod http;

pub use file::FileResourceSource;
pub use http::{DEFAULT_RESOURCE_URL, HttpResourceSource};

use navigator_application::SourceError;
use navigator_domain::{Resource, decode_collection};
use tracing::warn;

/// Decode a fetched body into resources
pub(crate) fn decode_body(body: &[u8], origin: &str) -> Result<Vec<Resource>, SourceError> {
    let payload: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| SourceError::InvalidJson(e.to_string()))?;
    let (resources, skipped) = decode_collection(payload).ok_or(SourceError::NotAnArray)?;
    if skipped > 0 {
        warn!("Skipped {} malformed resource entries from {}", skipped, origin);
    }
    Ok(resources)
}
