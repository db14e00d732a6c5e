//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → CLI overrides (main.rs)
//!     → validation.rs (semantic checks, once, on the final config)
//!     → AppConfig (validated, immutable)
//!     → handed to each client at construction
//! ```
//!
//! # Design Decisions
//! - Every field has a default so an absent file still yields a runnable config
//! - Validation separates syntactic (serde) from semantic checks
//! - Endpoints, addresses and paths live here, never as constants in the clients

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::AppConfig;
pub use schema::ContentStoreConfig;
pub use schema::LedgerConfig;
pub use schema::ListenerConfig;
pub use schema::ObservabilityConfig;
pub use schema::SensorConfig;
pub use validation::{validate_config, ValidationError};
