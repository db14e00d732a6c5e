//! In-memory collaborators for unit tests.

use std::sync::Mutex;
use std::time::Duration;

use alloy::primitives::TxHash;
use async_trait::async_trait;

use crate::blockchain::{Ledger, LedgerError, LedgerReceipt, LedgerResult};
use crate::content_store::{ContentId, ContentStore, ContentStoreError, ContentStoreResult};
use crate::sensor::SensorReading;

#[derive(Default)]
pub(crate) struct MemoryStore {
    pub fail: bool,
    pub uploads: Mutex<Vec<SensorReading>>,
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn add_reading(&self, reading: &SensorReading) -> ContentStoreResult<ContentId> {
        if self.fail {
            return Err(ContentStoreError::Status {
                status: 500,
                body: "ipfs down".into(),
            });
        }
        let mut uploads = self.uploads.lock().unwrap();
        uploads.push(*reading);
        ContentId::parse(format!("QmMemory{}", uploads.len()))
    }

    async fn fetch_reading(&self, _id: &ContentId) -> ContentStoreResult<SensorReading> {
        Err(ContentStoreError::MissingHash)
    }

    async fn is_healthy(&self) -> bool {
        !self.fail
    }
}

#[derive(Default)]
pub(crate) struct MemoryLedger {
    pub fail: bool,
    /// Simulated time to mine a transaction.
    pub delay: Option<Duration>,
    pub writes: Mutex<Vec<(ContentId, Option<String>)>>,
}

#[async_trait]
impl Ledger for MemoryLedger {
    async fn store_data(&self, id: &ContentId, source: Option<&str>) -> LedgerResult<LedgerReceipt> {
        if self.fail {
            return Err(LedgerError::NoAccounts);
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let mut writes = self.writes.lock().unwrap();
        writes.push((id.clone(), source.map(str::to_string)));
        Ok(LedgerReceipt {
            tx_hash: TxHash::with_last_byte(writes.len() as u8),
            block_number: Some(writes.len() as u64),
        })
    }

    async fn is_healthy(&self) -> bool {
        !self.fail
    }
}
