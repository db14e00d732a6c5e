//! Ledger client: JSON-RPC connection bound to the SensorData contract.
//!
//! # Responsibilities
//! - Connect to the JSON-RPC endpoint and fail fast when it is unreachable
//! - Load the contract ABI and bind the contract address
//! - Select `accounts[0]` as the sender
//! - Submit `storeData` and wait for the receipt

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use alloy::network::TransactionBuilder;
use alloy::primitives::Address;
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;

use crate::blockchain::abi::{load_abi, StoreDataCall};
use crate::blockchain::transaction::{rpc_call, wait_for_receipt, ReceiptPolicy};
use crate::blockchain::types::{Ledger, LedgerConfig, LedgerError, LedgerReceipt, LedgerResult};
use crate::content_store::ContentId;
use crate::observability::metrics;

/// Long-lived handle to the ledger, shared by every request.
#[derive(Clone)]
pub struct LedgerClient {
    provider: Arc<dyn Provider + Send + Sync>,
    config: LedgerConfig,
    contract: Address,
    account: Address,
    store_data: StoreDataCall,
    rpc_timeout: Duration,
}

impl LedgerClient {
    /// Connect to the configured node and bind the contract.
    ///
    /// Fails if the node is unreachable, the ABI cannot be loaded, the
    /// contract address is invalid, or the node has no accounts.
    pub async fn connect(config: LedgerConfig) -> LedgerResult<Self> {
        let rpc_timeout = Duration::from_secs(config.rpc_timeout_secs);
        let url: url::Url = config.rpc_url.parse().map_err(|e: url::ParseError| LedgerError::InvalidUrl {
            url: config.rpc_url.clone(),
            reason: e.to_string(),
        })?;
        let provider = Arc::new(ProviderBuilder::new().connect_http(url)) as Arc<dyn Provider + Send + Sync>;

        let block = rpc_call(rpc_timeout, provider.get_block_number())
            .await
            .map_err(|e| LedgerError::Unreachable {
                url: config.rpc_url.clone(),
                reason: e.to_string(),
            })?;
        tracing::info!(rpc_url = %config.rpc_url, block, "Connected to blockchain");

        let abi = load_abi(Path::new(&config.abi_path))?;
        let store_data = StoreDataCall::from_abi(&abi)?;
        let contract: Address = config
            .contract_address
            .parse()
            .map_err(|_| LedgerError::InvalidAddress(config.contract_address.clone()))?;

        let accounts = rpc_call(rpc_timeout, provider.get_accounts()).await?;
        let account = *accounts.first().ok_or(LedgerError::NoAccounts)?;

        Ok(Self {
            provider,
            config,
            contract,
            account,
            store_data,
            rpc_timeout,
        })
    }

    /// The sender account (`accounts[0]`).
    pub fn account(&self) -> Address {
        self.account
    }

    pub fn contract(&self) -> Address {
        self.contract
    }

    /// Fail unless the ABI has the `storeData` overload this process will call.
    pub fn require_overload(&self, labeled: bool) -> LedgerResult<()> {
        self.store_data.function(labeled).map(|_| ())
    }

    fn provider(&self) -> &(dyn Provider + Send + Sync) {
        self.provider.as_ref()
    }

    fn receipt_policy(&self) -> ReceiptPolicy {
        ReceiptPolicy {
            poll_interval: Duration::from_millis(self.config.receipt_poll_interval_ms),
            timeout: Duration::from_secs(self.config.receipt_timeout_secs),
            rpc_timeout: self.rpc_timeout,
        }
    }

    async fn submit(&self, id: &ContentId, source: Option<&str>) -> LedgerResult<LedgerReceipt> {
        let calldata = self.store_data.encode(id, source)?;
        let tx = TransactionRequest::default()
            .with_from(self.account)
            .with_to(self.contract)
            .with_input(calldata);

        let pending = rpc_call(self.rpc_timeout, self.provider.send_transaction(tx)).await?;
        let tx_hash = *pending.tx_hash();
        tracing::debug!(tx_hash = %tx_hash, content_id = %id, "storeData submitted");

        let receipt = wait_for_receipt(self.provider(), tx_hash, self.receipt_policy()).await?;
        Ok(LedgerReceipt {
            tx_hash,
            block_number: receipt.block_number,
        })
    }
}

#[async_trait]
impl Ledger for LedgerClient {
    async fn store_data(&self, id: &ContentId, source: Option<&str>) -> LedgerResult<LedgerReceipt> {
        match self.submit(id, source).await {
            Ok(receipt) => {
                metrics::record_ledger_write(true);
                tracing::info!(
                    content_id = %id,
                    source = source.unwrap_or("-"),
                    tx_hash = %receipt.tx_hash,
                    block_number = ?receipt.block_number,
                    "Stored content id on chain"
                );
                Ok(receipt)
            }
            Err(e) => {
                metrics::record_ledger_write(false);
                tracing::error!(content_id = %id, error = %e, "storeData failed");
                Err(e)
            }
        }
    }

    async fn is_healthy(&self) -> bool {
        let healthy = rpc_call(self.rpc_timeout, self.provider.get_block_number())
            .await
            .is_ok();
        metrics::record_dependency_health("ledger_rpc", healthy);
        healthy
    }
}

impl std::fmt::Debug for LedgerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerClient")
            .field("rpc_url", &self.config.rpc_url)
            .field("contract", &self.contract)
            .field("account", &self.account)
            .finish()
    }
}
