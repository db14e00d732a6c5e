//! Standalone sensor loop: read from the peripheral and record each sample.

use std::time::Duration;

use thiserror::Error;
use tokio::sync::broadcast;
use tokio::time::{interval, MissedTickBehavior};

use crate::pipeline::recorder::{PipelineError, SensorPipeline};
use crate::sensor::{SensorError, SensorSource};

/// Failure of a single-shot sensor run.
#[derive(Debug, Error)]
pub enum SamplerError {
    #[error(transparent)]
    Sensor(#[from] SensorError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

/// Read and record measurements from `source`.
///
/// With a zero `every` the source is read once and any failure is returned.
/// Otherwise samples are taken on a fixed interval until `shutdown` fires;
/// failed samples are logged and the loop continues. Returns the number of
/// readings recorded.
pub async fn run_sensor_loop(
    source: &dyn SensorSource,
    pipeline: &SensorPipeline,
    label: Option<&str>,
    every: Duration,
    mut shutdown: broadcast::Receiver<()>,
) -> Result<usize, SamplerError> {
    if every.is_zero() {
        let measurement = source.read_measurement().await?;
        let recorded = pipeline.record(measurement, label).await?;
        tracing::info!(
            content_id = %recorded.content_id,
            tx_hash = %recorded.tx_hash,
            "Stored sensor reading"
        );
        return Ok(1);
    }

    tracing::info!(interval = ?every, "Sampling sensor");
    let mut ticker = interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut recorded_count = 0;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match sample(source, pipeline, label).await {
                    Ok(()) => recorded_count += 1,
                    Err(e) => tracing::error!(error = %e, "Sensor sample failed"),
                }
            }
            _ = shutdown.recv() => {
                tracing::info!(recorded = recorded_count, "Sensor loop received shutdown signal");
                return Ok(recorded_count);
            }
        }
    }
}

async fn sample(
    source: &dyn SensorSource,
    pipeline: &SensorPipeline,
    label: Option<&str>,
) -> Result<(), SamplerError> {
    let measurement = source.read_measurement().await?;
    let recorded = pipeline.record(measurement, label).await?;
    tracing::info!(
        content_id = %recorded.content_id,
        tx_hash = %recorded.tx_hash,
        "Stored sensor reading"
    );
    Ok(())
}
