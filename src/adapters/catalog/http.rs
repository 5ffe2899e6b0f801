//! Catalog reader backed by the site's REST API.
//!
//! Endpoints: `{base}/listing/{id}`, `{base}/blog/{id}`, `{base}/agent/{id}`.
//! Bodies come either wrapped (`{ "data": {...} }`) or bare.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::domain::catalog::{Agent, BlogPost, Listing};
use crate::domain::foundation::RecordId;
use crate::ports::{CatalogError, CatalogReader};

/// Header carrying the API key, when one is configured.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Configuration for the HTTP catalog reader.
#[derive(Debug, Clone)]
pub struct HttpCatalogConfig {
    /// Base URL of the backend API (e.g., "https://api.aqaargate.com/api").
    pub base_url: String,
    pub timeout: Duration,
    api_key: Option<SecretString>,
}

impl HttpCatalogConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(5),
            api_key: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_api_key(mut self, api_key: SecretString) -> Self {
        self.api_key = Some(api_key);
        self
    }

    fn url(&self, resource: &str, id: &RecordId) -> String {
        format!("{}/{}/{}", self.base_url.trim_end_matches('/'), resource, id)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(record) => record,
        }
    }
}

pub struct HttpCatalogReader {
    config: HttpCatalogConfig,
    client: Client,
}

impl HttpCatalogReader {
    pub fn new(config: HttpCatalogConfig) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CatalogError::Unavailable(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        resource: &str,
        id: &RecordId,
    ) -> Result<Option<T>, CatalogError> {
        let url = self.config.url(resource, id);

        let mut request = self.client.get(&url).header("Accept", "application/json");
        if let Some(api_key) = &self.config.api_key {
            request = request.header(API_KEY_HEADER, api_key.expose_secret());
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                tracing::warn!(%url, "Catalog request timed out");
            } else {
                tracing::warn!(%url, error = %e, "Catalog request failed");
            }
            CatalogError::Unavailable(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            if status == StatusCode::NOT_FOUND {
                tracing::debug!(%url, "Catalog record not found");
            } else {
                tracing::warn!(%url, %status, "Catalog backend returned an error status");
            }
            return Ok(None);
        }

        let body = response.bytes().await.map_err(|e| {
            tracing::warn!(%url, error = %e, "Failed to read catalog response");
            CatalogError::Unavailable(e.to_string())
        })?;

        match serde_json::from_slice::<Envelope<T>>(&body) {
            Ok(envelope) => Ok(Some(envelope.into_inner())),
            Err(e) => {
                tracing::warn!(%url, error = %e, "Malformed catalog response");
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl CatalogReader for HttpCatalogReader {
    async fn listing(&self, id: &RecordId) -> Result<Option<Listing>, CatalogError> {
        self.fetch("listing", id).await
    }

    async fn blog_post(&self, id: &RecordId) -> Result<Option<BlogPost>, CatalogError> {
        self.fetch("blog", id).await
    }

    async fn agent(&self, id: &RecordId) -> Result<Option<Agent>, CatalogError> {
        self.fetch("agent", id).await
    }
}

impl std::fmt::Debug for HttpCatalogReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCatalogReader")
            .field("base_url", &self.config.base_url)
            .field("timeout", &self.config.timeout)
            .finish_non_exhaustive()
    }
}
