//! IPFS HTTP API client.
//!
//! # Responsibilities
//! - Upload sensor documents via `/api/v0/add`
//! - Fetch documents back via `/api/v0/cat`
//! - Check node reachability via `/api/v0/id`

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::config::ContentStoreConfig;
use crate::content_store::types::{ContentId, ContentStore, ContentStoreError, ContentStoreResult};
use crate::observability::metrics;
use crate::sensor::SensorReading;

#[derive(Debug, Deserialize)]
struct AddResponse {
    #[serde(rename = "Hash")]
    hash: Option<String>,
}

/// HTTP client for an IPFS node's RPC API.
#[derive(Clone)]
pub struct ContentStoreClient {
    client: Client,
    config: ContentStoreConfig,
    base_url: String,
}

impl ContentStoreClient {
    /// Build a client for the configured endpoint.
    pub fn new(config: ContentStoreConfig) -> ContentStoreResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let base_url = format!("{}/api/v0", config.endpoint.trim_end_matches('/'));

        tracing::info!(endpoint = %config.endpoint, "Content store client initialized");
        Ok(Self {
            client,
            config,
            base_url,
        })
    }

    /// Upload raw bytes as a single-file multipart form.
    pub async fn add_bytes(&self, bytes: Vec<u8>) -> ContentStoreResult<ContentId> {
        let part = Part::bytes(bytes).file_name(self.config.file_name.clone());
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}/add", self.base_url))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(ContentStoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: AddResponse = response.json().await?;
        ContentId::parse(parsed.hash.unwrap_or_default())
    }

    /// Fetch the raw bytes stored under `id`.
    pub async fn cat(&self, id: &ContentId) -> ContentStoreResult<Vec<u8>> {
        let response = self
            .client
            .post(format!("{}/cat", self.base_url))
            .query(&[("arg", id.as_str())])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(ContentStoreError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.bytes().await?.to_vec())
    }

    async fn spool(&self, dir: &str, bytes: &[u8]) -> ContentStoreResult<()> {
        let path = Path::new(dir).join(&self.config.file_name);
        tokio::fs::write(&path, bytes).await?;
        tracing::debug!(path = %path.display(), "Wrote local copy of sensor document");
        Ok(())
    }
}

#[async_trait]
impl ContentStore for ContentStoreClient {
    async fn add_reading(&self, reading: &SensorReading) -> ContentStoreResult<ContentId> {
        let bytes = serde_json::to_vec(reading)?;
        if let Some(dir) = &self.config.spool_dir {
            self.spool(dir, &bytes).await?;
        }

        match self.add_bytes(bytes).await {
            Ok(id) => {
                metrics::record_upload(true);
                tracing::info!(content_id = %id, "Uploaded sensor document");
                Ok(id)
            }
            Err(e) => {
                metrics::record_upload(false);
                tracing::error!(error = %e, "Failed to upload sensor document");
                Err(e)
            }
        }
    }

    async fn fetch_reading(&self, id: &ContentId) -> ContentStoreResult<SensorReading> {
        let bytes = self.cat(id).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn is_healthy(&self) -> bool {
        let result = self
            .client
            .post(format!("{}/id", self.base_url))
            .send()
            .await;
        let healthy = matches!(result, Ok(ref r) if r.status() == StatusCode::OK);
        metrics::record_dependency_health("content_store", healthy);
        healthy
    }
}

impl std::fmt::Debug for ContentStoreClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentStoreClient")
            .field("endpoint", &self.config.endpoint)
            .field("timeout_secs", &self.config.timeout_secs)
            .finish()
    }
}
