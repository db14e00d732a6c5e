//! Sensor-to-ledger write path.
//!
//! # Data Flow
//! ```text
//! Measurement (BLE read or HTTP body)
//!     → SensorReading::stamp (timestamp assigned here, at upload time)
//!     → ContentStore::add_reading → ContentId
//!     → Ledger::store_data(ContentId, source label)
//!     → Recorded
//! ```
//!
//! Each step runs exactly once per reading. A failed ledger write after a
//! successful upload leaves the uploaded document unreferenced; the error
//! carries its identifier so callers can log it.

pub mod recorder;
pub mod sampler;

pub use recorder::{PipelineError, Recorded, SensorPipeline};
pub use sampler::{run_sensor_loop, SamplerError};

#[cfg(test)]
pub(crate) mod testing;
