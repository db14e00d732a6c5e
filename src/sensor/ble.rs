//! BLE sensor reader.
//!
//! # Responsibilities
//! - Find the peripheral by configured address (or by advertised service)
//! - Hold one connection for the life of the process
//! - Read and decode the three environmental characteristics
//!
//! No retries and no timeouts beyond the BLE stack's own; every fault is
//! returned to the caller.

use std::time::Duration;

use async_trait::async_trait;
use btleplug::api::{Central, Characteristic, Manager as _, Peripheral as _, ScanFilter};
use btleplug::platform::{Adapter, Manager, Peripheral};

use crate::config::SensorConfig;
use crate::sensor::characteristic::{Channel, ENVIRONMENTAL_SENSING_SERVICE};
use crate::sensor::reading::Measurement;
use crate::sensor::types::{SensorError, SensorResult, SensorSource};

/// A connected BLE environmental sensor.
pub struct BleSensor {
    peripheral: Peripheral,
    address: String,
    temperature: Characteristic,
    humidity: Characteristic,
    pressure: Characteristic,
}

/// Get the default Bluetooth adapter.
async fn get_adapter() -> SensorResult<Adapter> {
    let manager = Manager::new().await?;
    let adapters = manager.adapters().await?;
    adapters.into_iter().next().ok_or(SensorError::NoAdapter)
}

impl BleSensor {
    /// Scan for the peripheral described by `config` and connect to it.
    pub async fn connect(config: &SensorConfig) -> SensorResult<Self> {
        let adapter = get_adapter().await?;
        let target = config
            .device_address
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty());

        tracing::info!(
            device = target.unwrap_or("<any environmental sensor>"),
            scan_secs = config.scan_secs,
            "Scanning for BLE sensor"
        );

        adapter.start_scan(ScanFilter::default()).await?;
        tokio::time::sleep(Duration::from_secs(config.scan_secs)).await;
        let found = find_peripheral(&adapter, target).await;
        adapter.stop_scan().await?;

        let peripheral = found?.ok_or_else(|| {
            SensorError::DeviceNotFound(target.unwrap_or("no environmental sensing peripheral").to_string())
        })?;
        let address = peripheral.address().to_string();

        peripheral.connect().await?;
        peripheral.discover_services().await?;
        tracing::info!(address = %address, "Connected to BLE sensor");

        let characteristics = peripheral.characteristics();
        let lookup = |channel: Channel| {
            let uuid = channel.uuid();
            characteristics
                .iter()
                .find(|c| c.uuid == uuid)
                .cloned()
                .ok_or(SensorError::MissingCharacteristic(uuid))
        };

        Ok(Self {
            temperature: lookup(Channel::Temperature)?,
            humidity: lookup(Channel::Humidity)?,
            pressure: lookup(Channel::Pressure)?,
            peripheral,
            address,
        })
    }

    /// Address of the connected peripheral.
    pub fn address(&self) -> &str {
        &self.address
    }

    async fn read_channel(&self, channel: Channel) -> SensorResult<f64> {
        let characteristic = match channel {
            Channel::Temperature => &self.temperature,
            Channel::Humidity => &self.humidity,
            Channel::Pressure => &self.pressure,
        };
        let raw = self.peripheral.read(characteristic).await?;
        let value = channel.decode(&raw)?;
        tracing::debug!(channel = channel.name(), raw = ?raw, value, "Characteristic read");
        Ok(value)
    }

    /// Release the BLE link.
    pub async fn disconnect(&self) -> SensorResult<()> {
        if self.peripheral.is_connected().await? {
            self.peripheral.disconnect().await?;
            tracing::info!(address = %self.address, "Disconnected from BLE sensor");
        }
        Ok(())
    }
}

#[async_trait]
impl SensorSource for BleSensor {
    async fn read_measurement(&self) -> SensorResult<Measurement> {
        let mut values = [0.0; 3];
        for (value, channel) in values.iter_mut().zip(Channel::ALL) {
            *value = self.read_channel(channel).await?;
        }
        let [temperature, humidity, pressure] = values;

        tracing::info!(temperature, humidity, pressure, "Sensor measurement read");
        Ok(Measurement {
            temperature,
            humidity,
            pressure,
        })
    }
}

async fn find_peripheral(adapter: &Adapter, target: Option<&str>) -> SensorResult<Option<Peripheral>> {
    for peripheral in adapter.peripherals().await? {
        let Some(props) = peripheral.properties().await? else {
            continue;
        };

        let matches = match target {
            Some(t) => {
                address_matches(&peripheral.address().to_string(), t)
                    || address_matches(&peripheral.id().to_string(), t)
            }
            None => props.services.contains(&ENVIRONMENTAL_SENSING_SERVICE),
        };

        if matches {
            tracing::debug!(
                name = props.local_name.as_deref().unwrap_or("Unknown"),
                rssi = ?props.rssi,
                "Matched BLE peripheral"
            );
            return Ok(Some(peripheral));
        }
    }
    Ok(None)
}

/// Addresses are compared case-insensitively; CoreBluetooth reports UUIDs,
/// other platforms report MAC addresses.
fn address_matches(candidate: &str, target: &str) -> bool {
    candidate.eq_ignore_ascii_case(target)
}
