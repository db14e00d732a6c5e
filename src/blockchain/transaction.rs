//! Transaction submission and receipt polling.
//!
//! # Responsibilities
//! - Bound every RPC call by the configured timeout
//! - Poll for a receipt at a fixed interval until a deadline
//! - Surface reverted transactions as errors

use std::future::IntoFuture;
use std::time::Duration;

use alloy::primitives::TxHash;
use alloy::providers::Provider;
use alloy::rpc::types::TransactionReceipt;
use tokio::time::{interval, timeout, MissedTickBehavior};

use crate::blockchain::types::{LedgerError, LedgerResult};

/// Await an RPC call, mapping transport errors and timeouts into `LedgerError`.
pub(crate) async fn rpc_call<F, T, E>(rpc_timeout: Duration, call: F) -> LedgerResult<T>
where
    F: IntoFuture<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    match timeout(rpc_timeout, call).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(LedgerError::Rpc(e.to_string())),
        Err(_) => Err(LedgerError::Timeout(rpc_timeout.as_secs())),
    }
}

/// Receipt polling parameters.
#[derive(Debug, Clone, Copy)]
pub struct ReceiptPolicy {
    pub poll_interval: Duration,
    pub timeout: Duration,
    pub rpc_timeout: Duration,
}

/// Block until `tx_hash` has a receipt, or the policy's deadline passes.
pub async fn wait_for_receipt(
    provider: &(dyn Provider + Send + Sync),
    tx_hash: TxHash,
    policy: ReceiptPolicy,
) -> LedgerResult<TransactionReceipt> {
    let result = timeout(policy.timeout, async {
        let mut ticker = interval(policy.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            match rpc_call(policy.rpc_timeout, provider.get_transaction_receipt(tx_hash)).await? {
                Some(receipt) => return Ok::<_, LedgerError>(receipt),
                None => tracing::debug!(tx_hash = %tx_hash, "Transaction pending"),
            }
        }
    })
    .await;

    let receipt = match result {
        Ok(receipt) => receipt?,
        Err(_) => {
            return Err(LedgerError::ReceiptTimeout {
                tx_hash,
                timeout_secs: policy.timeout.as_secs(),
            })
        }
    };

    if !receipt.status() {
        return Err(LedgerError::Reverted(tx_hash));
    }
    Ok(receipt)
}
