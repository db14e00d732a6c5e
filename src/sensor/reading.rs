//! Sensor reading data model.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// A decoded environmental measurement without a timestamp.
///
/// This is also the strictly typed body accepted by the HTTP ingress.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Degrees Celsius.
    pub temperature: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
    /// Pressure as reported by the peripheral after scaling.
    pub pressure: f64,
}

/// The JSON document uploaded to the content store.
///
/// `timestamp` is seconds since the Unix epoch, assigned when the reading is
/// uploaded rather than when it was measured.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub timestamp: u64,
}

impl SensorReading {
    /// Stamp a measurement with the current wall clock.
    pub fn stamp(measurement: Measurement) -> Self {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        Self::at(measurement, now)
    }

    /// Build a reading with an explicit timestamp.
    pub fn at(measurement: Measurement, timestamp: u64) -> Self {
        Self {
            temperature: measurement.temperature,
            humidity: measurement.humidity,
            pressure: measurement.pressure,
            timestamp,
        }
    }

    pub fn measurement(&self) -> Measurement {
        Measurement {
            temperature: self.temperature,
            humidity: self.humidity,
            pressure: self.pressure,
        }
    }
}
