//! Sensor-to-ledger write path.
//!
//! Reads environmental measurements (from a BLE peripheral or an HTTP request),
//! uploads them as JSON to an IPFS content store, and records the returned
//! content identifier on a local blockchain through the `storeData` contract call.

pub mod blockchain;
pub mod config;
pub mod content_store;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod pipeline;
pub mod sensor;

pub use config::schema::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use pipeline::SensorPipeline;
