//! Ledger types and error definitions.

use alloy::primitives::TxHash;
use async_trait::async_trait;
use thiserror::Error;

use crate::content_store::ContentId;

pub use crate::config::schema::LedgerConfig;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The configured RPC URL cannot be parsed.
    #[error("Invalid RPC URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The node did not answer the connectivity check.
    #[error("Failed to connect to blockchain at {url}: {reason}")]
    Unreachable { url: String, reason: String },

    /// RPC request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// The ABI file is missing, malformed or lacks `storeData`.
    #[error("ABI error: {0}")]
    Abi(String),

    /// The contract address is not a valid address.
    #[error("Invalid contract address '{0}'")]
    InvalidAddress(String),

    /// The node exposes no accounts to sign with.
    #[error("No accounts found on the node; cannot sign transactions")]
    NoAccounts,

    /// The transaction was not mined within the configured window.
    #[error("Transaction {tx_hash} not mined within {timeout_secs} seconds")]
    ReceiptTimeout { tx_hash: TxHash, timeout_secs: u64 },

    /// The transaction was mined but reverted.
    #[error("Transaction {0} reverted")]
    Reverted(TxHash),
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Confirmation of a mined `storeData` transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerReceipt {
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
}

/// An append-only record of content identifiers.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Record `id` (optionally tagged with `source`) and wait until it is mined.
    async fn store_data(&self, id: &ContentId, source: Option<&str>) -> LedgerResult<LedgerReceipt>;

    /// Whether the RPC endpoint currently answers.
    async fn is_healthy(&self) -> bool;
}
