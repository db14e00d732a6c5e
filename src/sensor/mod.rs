//! Sensor subsystem.
//!
//! # Data Flow
//! ```text
//! BLE peripheral (GATT characteristics 0x2A1C / 0x2A6F / 0x2A6D)
//!     → ble.rs (scan, connect, read raw bytes)
//!     → characteristic.rs (little-endian decode, per-channel scale)
//!     → reading.rs (Measurement)
//!     → SensorReading::stamp at upload time
//! ```
//!
//! The HTTP ingress bypasses `ble.rs` and produces a `Measurement` directly
//! from the request body.

pub mod ble;
pub mod characteristic;
pub mod reading;
pub mod types;

pub use ble::BleSensor;
pub use characteristic::{decode_le_unsigned, Channel};
pub use reading::{Measurement, SensorReading};
pub use types::{SensorError, SensorResult, SensorSource};
