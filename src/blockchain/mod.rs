//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! LedgerConfig (RPC URL, contract address, ABI path)
//!     → client.rs (connectivity check, accounts[0], contract binding)
//!     → abi.rs (load ABI file, resolve storeData overload, encode calldata)
//!     → transaction.rs (eth_sendTransaction, receipt polling)
//! ```
//!
//! # Constraints
//! - Transactions are signed by the node (unlocked `accounts[0]`)
//! - All RPC calls have configurable timeouts
//! - The receipt wait is an explicit, bounded synchronous confirmation

pub mod abi;
pub mod client;
pub mod transaction;
pub mod types;

pub use abi::{load_abi, StoreDataCall};
pub use client::LedgerClient;
pub use types::{Ledger, LedgerConfig, LedgerError, LedgerReceipt, LedgerResult};
