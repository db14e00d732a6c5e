//! Response bodies and error mapping.
//!
//! Successful stores return `{status, ipfs_hash}`; every failure returns
//! `{detail}` with the error's message.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observability::metrics;
use crate::pipeline::PipelineError;

/// Body of a successful `POST /store_sensor_data/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreResponse {
    pub status: String,
    pub ipfs_hash: String,
}

impl StoreResponse {
    pub fn success(ipfs_hash: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            ipfs_hash: ipfs_hash.into(),
        }
    }
}

/// Error body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub detail: String,
}

/// Errors surfaced by the ingress handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body did not match `{temperature, humidity, pressure}`.
    #[error("{0}")]
    InvalidBody(String),

    /// Upload or ledger write failed.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// The write did not finish within the request deadline. It keeps running
    /// and its outcome is logged.
    #[error("Sensor data was not recorded within {0} seconds; the write continues in the background")]
    Timeout(u64),

    /// The recording task panicked or was cancelled.
    #[error("Recording task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Pipeline(_) | ApiError::Timeout(_) | ApiError::Task(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::InvalidBody(detail) => tracing::warn!(detail = %detail, "Rejected request body"),
            ApiError::Pipeline(e) => tracing::error!(
                error = %e,
                orphaned_content = e.orphaned_content().map(|id| id.as_str()),
                "Failed to store sensor data"
            ),
            ApiError::Timeout(secs) => tracing::error!(timeout_secs = secs, "Request deadline elapsed"),
            ApiError::Task(e) => tracing::error!(error = %e, "Recording task failed"),
        }
        metrics::record_request(status.as_u16());
        (
            status,
            Json(ErrorBody {
                detail: self.to_string(),
            }),
        )
            .into_response()
    }
}
