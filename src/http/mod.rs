//! HTTP ingress subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, graceful shutdown)
//!     → request.rs (assign and propagate x-request-id)
//!     → handlers.rs (decode body, run the pipeline)
//!     → response.rs (success body or {detail} error)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::X_REQUEST_ID;
pub use response::{ApiError, StoreResponse};
pub use server::{AppState, HttpServer};
