//! HTTP resource source

use super::decode_body;
use async_trait::async_trait;
use navigator_application::{ResourceSource, SourceError};
use navigator_domain::Resource;
use std::time::Duration;
use tracing::debug;

/// Endpoint used when no source is configured
pub const DEFAULT_RESOURCE_URL: &str = "http://localhost:8000/api/all_data";

/// Fetches the catalog with a single GET request
pub struct HttpResourceSource {
    client: reqwest::Client,
    url: String,
}

impl HttpResourceSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::RequestFailed(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ResourceSource for HttpResourceSource {
    async fn fetch(&self) -> Result<Vec<Resource>, SourceError> {
        debug!("Fetching resources from {}", self.url);

        let response = self.client.get(&self.url).send().await.map_err(|e| {
            if e.is_timeout() {
                SourceError::Timeout
            } else {
                SourceError::RequestFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::HttpStatus(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| SourceError::RequestFailed(format!("Failed to read response body: {e}")))?;

        decode_body(&body, &self.url)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
