//! Sensor errors and the measurement source seam.

use async_trait::async_trait;
use thiserror::Error;

use crate::sensor::reading::Measurement;

/// Errors raised while talking to the BLE peripheral.
#[derive(Debug, Error)]
pub enum SensorError {
    /// The BLE stack reported an error.
    #[error("BLE error: {0}")]
    Ble(#[from] btleplug::Error),

    /// No Bluetooth adapter is available on this host.
    #[error("No Bluetooth adapter found")]
    NoAdapter,

    /// The configured (or any matching) peripheral was not seen during the scan.
    #[error("Sensor peripheral not found: {0}")]
    DeviceNotFound(String),

    /// The peripheral does not expose a required characteristic.
    #[error("Characteristic {0} not found on peripheral")]
    MissingCharacteristic(uuid::Uuid),

    /// A characteristic value could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),
}

/// Result type for sensor operations.
pub type SensorResult<T> = Result<T, SensorError>;

/// Anything that can produce a fresh measurement on demand.
#[async_trait]
pub trait SensorSource: Send + Sync {
    async fn read_measurement(&self) -> SensorResult<Measurement>;
}
