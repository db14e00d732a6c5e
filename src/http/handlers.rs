//! Ingress handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::http::response::{ApiError, StoreResponse};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::sensor::Measurement;

/// `POST /store_sensor_data/`: upload the reading, record its hash, return the hash.
///
/// Bounded by `listener.request_timeout_secs`; an elapsed deadline is a 500
/// with `{detail}` like any other pipeline failure.
pub async fn store_sensor_data(
    State(state): State<AppState>,
    body: Result<Json<Measurement>, JsonRejection>,
) -> Result<Json<StoreResponse>, ApiError> {
    let Json(measurement) = body?;
    tracing::info!(
        temperature = measurement.temperature,
        humidity = measurement.humidity,
        pressure = measurement.pressure,
        "Data received"
    );

    // The write outlives the deadline; the pipeline logs its outcome.
    let pipeline = state.pipeline.clone();
    let task = tokio::spawn(async move { pipeline.record(measurement, None).await });
    let recorded = match tokio::time::timeout(state.request_timeout, task).await {
        Ok(joined) => joined??,
        Err(_) => return Err(ApiError::Timeout(state.request_timeout.as_secs())),
    };

    metrics::record_request(StatusCode::OK.as_u16());
    Ok(Json(StoreResponse::success(recorded.content_id.to_string())))
}

#[derive(Debug, Serialize)]
struct HealthBody {
    status: &'static str,
    ledger: bool,
    content_store: bool,
}

/// `GET /health`: check both collaborators.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let (ledger, content_store) = tokio::join!(
        state.pipeline.ledger().is_healthy(),
        state.pipeline.store().is_healthy(),
    );

    let (status, code) = if ledger && content_store {
        ("ok", StatusCode::OK)
    } else {
        ("degraded", StatusCode::SERVICE_UNAVAILABLE)
    };

    (
        code,
        Json(HealthBody {
            status,
            ledger,
            content_store,
        }),
    )
}
