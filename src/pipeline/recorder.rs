//! The upload-then-record operation.

use std::sync::Arc;
use std::time::Instant;

use alloy::primitives::TxHash;
use thiserror::Error;

use crate::blockchain::{Ledger, LedgerError};
use crate::content_store::{ContentId, ContentStore, ContentStoreError};
use crate::observability::metrics;
use crate::sensor::{Measurement, SensorReading};

/// Why a reading could not be recorded.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The upload failed; nothing was written anywhere.
    #[error("Failed to upload sensor data: {0}")]
    Upload(#[source] ContentStoreError),

    /// The upload succeeded but the ledger write failed.
    #[error("Uploaded sensor data as {content_id} but failed to record it on chain: {source}")]
    Ledger {
        content_id: ContentId,
        #[source]
        source: LedgerError,
    },
}

impl PipelineError {
    /// Identifier of a document that was uploaded but never recorded.
    pub fn orphaned_content(&self) -> Option<&ContentId> {
        match self {
            PipelineError::Ledger { content_id, .. } => Some(content_id),
            PipelineError::Upload(_) => None,
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub reading: SensorReading,
    pub content_id: ContentId,
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
}

/// Shared handles to the content store and ledger.
#[derive(Clone)]
pub struct SensorPipeline {
    store: Arc<dyn ContentStore>,
    ledger: Arc<dyn Ledger>,
}

impl SensorPipeline {
    pub fn new(store: Arc<dyn ContentStore>, ledger: Arc<dyn Ledger>) -> Self {
        Self { store, ledger }
    }

    pub fn store(&self) -> &Arc<dyn ContentStore> {
        &self.store
    }

    pub fn ledger(&self) -> &Arc<dyn Ledger> {
        &self.ledger
    }

    /// Stamp, upload and record one measurement.
    pub async fn record(
        &self,
        measurement: Measurement,
        source: Option<&str>,
    ) -> Result<Recorded, PipelineError> {
        let start = Instant::now();
        let reading = SensorReading::stamp(measurement);
        tracing::info!(
            temperature = reading.temperature,
            humidity = reading.humidity,
            pressure = reading.pressure,
            timestamp = reading.timestamp,
            "Recording sensor reading"
        );

        let content_id = self
            .store
            .add_reading(&reading)
            .await
            .map_err(PipelineError::Upload)?;

        let receipt = match self.ledger.store_data(&content_id, source).await {
            Ok(receipt) => receipt,
            Err(error) => {
                tracing::warn!(content_id = %content_id, "Uploaded document left unreferenced");
                return Err(PipelineError::Ledger {
                    content_id,
                    source: error,
                });
            }
        };

        metrics::record_pipeline_duration(start);
        Ok(Recorded {
            reading,
            content_id,
            tx_hash: receipt.tx_hash,
            block_number: receipt.block_number,
        })
    }
}
