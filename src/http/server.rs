//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener and shut down gracefully

use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::http::handlers;
use crate::http::request::{make_span, propagate_request_id_layer, set_request_id_layer};
use crate::pipeline::SensorPipeline;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: SensorPipeline,
    /// Deadline for one store request.
    pub request_timeout: Duration,
}

/// HTTP ingress server.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server around a shared pipeline.
    pub fn new(config: AppConfig, pipeline: SensorPipeline) -> Self {
        let request_timeout = Duration::from_secs(config.listener.request_timeout_secs);
        let state = AppState {
            pipeline,
            request_timeout,
        };
        let router = Self::build_router(request_timeout, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// The store routes enforce their own deadline so a timeout still yields
    /// `{detail}`; the tower timeout only guards the health check.
    #[allow(deprecated)]
    fn build_router(request_timeout: Duration, state: AppState) -> Router {
        Router::new()
            .route("/store_sensor_data/", post(handlers::store_sensor_data))
            .route("/store_sensor_data", post(handlers::store_sensor_data))
            .route(
                "/health",
                get(handlers::health).layer(TimeoutLayer::new(request_timeout)),
            )
            .with_state(state)
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| make_span(request)))
            .layer(set_request_id_layer())
    }

    /// The configured router, for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server received shutdown signal");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
