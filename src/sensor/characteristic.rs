//! GATT characteristic identifiers and value decoding.
//!
//! Each channel is a little-endian unsigned integer; dividing by the channel's
//! scale recovers the physical value.

use btleplug::api::bleuuid::uuid_from_u16;
use uuid::Uuid;

use crate::sensor::types::{SensorError, SensorResult};

/// Environmental Sensing service advertised by the peripheral.
pub const ENVIRONMENTAL_SENSING_SERVICE: Uuid = Uuid::from_u128(0x0000181a_0000_1000_8000_00805f9b34fb);

/// One of the three measured quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Temperature,
    Humidity,
    Pressure,
}

impl Channel {
    /// All channels in read order.
    pub const ALL: [Channel; 3] = [Channel::Temperature, Channel::Humidity, Channel::Pressure];

    pub fn short_uuid(self) -> u16 {
        match self {
            Channel::Temperature => 0x2A1C,
            Channel::Humidity => 0x2A6F,
            Channel::Pressure => 0x2A6D,
        }
    }

    /// Full 128-bit UUID on the Bluetooth base.
    pub fn uuid(self) -> Uuid {
        uuid_from_u16(self.short_uuid())
    }

    /// Divisor applied to the raw integer.
    pub fn scale(self) -> f64 {
        match self {
            Channel::Temperature | Channel::Humidity => 100.0,
            Channel::Pressure => 1000.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Channel::Temperature => "temperature",
            Channel::Humidity => "humidity",
            Channel::Pressure => "pressure",
        }
    }

    /// Decode a raw characteristic value into physical units.
    pub fn decode(self, raw: &[u8]) -> SensorResult<f64> {
        let value = decode_le_unsigned(raw)
            .map_err(|e| SensorError::Decode(format!("{}: {}", self.name(), e)))?;
        Ok(value as f64 / self.scale())
    }
}

/// Interpret 1 to 8 bytes as a little-endian unsigned integer.
pub fn decode_le_unsigned(raw: &[u8]) -> SensorResult<u64> {
    if raw.is_empty() || raw.len() > 8 {
        return Err(SensorError::Decode(format!(
            "expected 1..=8 bytes, got {}",
            raw.len()
        )));
    }
    let mut buf = [0u8; 8];
    buf[..raw.len()].copy_from_slice(raw);
    Ok(u64::from_le_bytes(buf))
}
