//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate endpoints, addresses and value ranges
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use alloy::primitives::Address;

use crate::config::schema::AppConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }
    if config.listener.request_timeout_secs == 0 {
        errors.push(ValidationError::new("listener.request_timeout_secs", "must be > 0"));
    }

    let ledger = &config.ledger;
    check_http_url(&mut errors, "ledger.rpc_url", &ledger.rpc_url);
    if ledger.contract_address.parse::<Address>().is_err() {
        errors.push(ValidationError::new(
            "ledger.contract_address",
            format!("'{}' is not a 20-byte hex address", ledger.contract_address),
        ));
    }
    if ledger.abi_path.trim().is_empty() {
        errors.push(ValidationError::new("ledger.abi_path", "must not be empty"));
    }
    if ledger.rpc_timeout_secs == 0 {
        errors.push(ValidationError::new("ledger.rpc_timeout_secs", "must be > 0"));
    }
    if ledger.receipt_timeout_secs == 0 {
        errors.push(ValidationError::new("ledger.receipt_timeout_secs", "must be > 0"));
    }
    if ledger.receipt_poll_interval_ms == 0 {
        errors.push(ValidationError::new("ledger.receipt_poll_interval_ms", "must be > 0"));
    } else if ledger.receipt_poll_interval_ms > ledger.receipt_timeout_secs.saturating_mul(1000) {
        errors.push(ValidationError::new(
            "ledger.receipt_poll_interval_ms",
            "must not exceed receipt_timeout_secs",
        ));
    }

    let store = &config.content_store;
    check_http_url(&mut errors, "content_store.endpoint", &store.endpoint);
    if store.file_name.trim().is_empty() {
        errors.push(ValidationError::new("content_store.file_name", "must not be empty"));
    }
    if store.timeout_secs == 0 {
        errors.push(ValidationError::new("content_store.timeout_secs", "must be > 0"));
    }

    let write_budget = store
        .timeout_secs
        .saturating_add(ledger.rpc_timeout_secs)
        .saturating_add(ledger.receipt_timeout_secs);
    if config.listener.request_timeout_secs != 0 && config.listener.request_timeout_secs < write_budget {
        errors.push(ValidationError::new(
            "listener.request_timeout_secs",
            format!(
                "{}s is shorter than content_store.timeout_secs + ledger.rpc_timeout_secs + ledger.receipt_timeout_secs ({}s)",
                config.listener.request_timeout_secs, write_budget
            ),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_http_url(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    match url::Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::new(
            field,
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new(field, format!("invalid URL '{}': {}", value, e))),
    }
}
