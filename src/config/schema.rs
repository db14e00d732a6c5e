//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP ingress settings.
    pub listener: ListenerConfig,

    /// Blockchain RPC and contract settings.
    pub ledger: LedgerConfig,

    /// IPFS HTTP API settings.
    pub content_store: ContentStoreConfig,

    /// BLE peripheral settings.
    pub sensor: SensorConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8000").
    pub bind_address: String,

    /// Upper bound on a single store request, covering upload, RPC calls and
    /// receipt wait. Must be at least the sum of those timeouts.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
            request_timeout_secs: 180,
        }
    }
}

/// Ledger (blockchain) configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Address of the deployed SensorData contract.
    pub contract_address: String,

    /// Path to the JSON file holding the contract ABI under an `abi` key.
    pub abi_path: String,

    /// Timeout for individual RPC calls in seconds.
    pub rpc_timeout_secs: u64,

    /// How long to wait for a transaction receipt before giving up.
    pub receipt_timeout_secs: u64,

    /// Delay between receipt polls in milliseconds.
    pub receipt_poll_interval_ms: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://127.0.0.1:8545".to_string(),
            contract_address: "0x2A942bA77d19Caeb827163aB706394c21167f9Eb".to_string(),
            abi_path: "SensorData_abi.json".to_string(),
            rpc_timeout_secs: 10,
            receipt_timeout_secs: 120,
            receipt_poll_interval_ms: 500,
        }
    }
}

/// Content store (IPFS HTTP API) configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContentStoreConfig {
    /// Base URL of the IPFS API (without `/api/v0`).
    pub endpoint: String,

    /// File name attached to the multipart upload.
    pub file_name: String,

    /// HTTP timeout in seconds.
    pub timeout_secs: u64,

    /// When set, each payload is also written to `<spool_dir>/<file_name>`
    /// before upload.
    pub spool_dir: Option<String>,
}

impl Default for ContentStoreConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:5001".to_string(),
            file_name: "sensor_data.json".to_string(),
            timeout_secs: 30,
            spool_dir: None,
        }
    }
}

/// BLE sensor configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SensorConfig {
    /// Peripheral address (MAC on Linux/Windows, CoreBluetooth UUID on macOS).
    /// When unset the first Environmental Sensing peripheral found is used.
    pub device_address: Option<String>,

    /// Scan duration in seconds before selecting the peripheral.
    pub scan_secs: u64,

    /// Source label passed to `storeData` for BLE readings.
    pub source_label: Option<String>,

    /// Sampling interval in seconds; 0 reads once and exits.
    pub interval_secs: u64,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            device_address: None,
            scan_secs: 5,
            source_label: Some("arduino_sensor".to_string()),
            interval_secs: 0,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus scrape endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
