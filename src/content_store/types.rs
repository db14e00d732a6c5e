//! Content identifiers, errors and the store seam.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sensor::SensorReading;

/// Identifier returned by the content store for an uploaded document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(String);

impl ContentId {
    /// Accept any non-blank identifier.
    pub fn parse(value: impl Into<String>) -> ContentStoreResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ContentStoreError::MissingHash);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors that can occur while talking to the content store.
#[derive(Debug, Error)]
pub enum ContentStoreError {
    /// Connection, timeout or protocol failure.
    #[error("Content store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The store answered with a non-200 status.
    #[error("Content store returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response carried no usable `Hash`.
    #[error("Content store response did not contain a hash")]
    MissingHash,

    /// A payload could not be (de)serialized.
    #[error("Invalid sensor document: {0}")]
    Decode(#[from] serde_json::Error),

    /// Writing the local copy failed.
    #[error("Failed to write local copy: {0}")]
    Spool(#[from] std::io::Error),
}

/// Result type for content store operations.
pub type ContentStoreResult<T> = Result<T, ContentStoreError>;

/// A content-addressed store for sensor readings.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Upload a reading and return its identifier.
    async fn add_reading(&self, reading: &SensorReading) -> ContentStoreResult<ContentId>;

    /// Fetch a previously uploaded reading.
    async fn fetch_reading(&self, id: &ContentId) -> ContentStoreResult<SensorReading>;

    /// Whether the store is reachable.
    async fn is_healthy(&self) -> bool;
}
