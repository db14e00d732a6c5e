//! Content store (IPFS) subsystem.
//!
//! # Data Flow
//! ```text
//! SensorReading
//!     → client.rs (serialize, optional local spool file)
//!     → POST {endpoint}/api/v0/add (multipart, part "file")
//!     → {"Hash": ...} → ContentId
//! ```
//!
//! # Design Decisions
//! - One reqwest client per process, timeouts from configuration
//! - Any non-200 response or missing `Hash` is an error, never an empty id

pub mod client;
pub mod types;

pub use client::ContentStoreClient;
pub use types::{ContentId, ContentStore, ContentStoreError, ContentStoreResult};
