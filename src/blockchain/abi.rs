//! Contract interface loading and `storeData` call encoding.

use std::path::Path;

use alloy::dyn_abi::{DynSolValue, JsonAbiExt};
use alloy::json_abi::{Function, JsonAbi};
use alloy::primitives::Bytes;
use serde::Deserialize;

use crate::blockchain::types::{LedgerError, LedgerResult};
use crate::content_store::ContentId;

const STORE_DATA: &str = "storeData";

/// Build artifact layout: only the `abi` key is used.
#[derive(Deserialize)]
struct Artifact {
    abi: JsonAbi,
}

/// Load a contract ABI from a JSON file with a top-level `abi` array.
pub fn load_abi(path: &Path) -> LedgerResult<JsonAbi> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| LedgerError::Abi(format!("cannot read {}: {}", path.display(), e)))?;
    parse_artifact(&content).map_err(|e| LedgerError::Abi(format!("{}: {}", path.display(), e)))
}

fn parse_artifact(content: &str) -> Result<JsonAbi, serde_json::Error> {
    serde_json::from_str::<Artifact>(content).map(|a| a.abi)
}

/// The `storeData` overloads exposed by the contract.
///
/// `storeData(string)` records a bare content id; `storeData(string,string)`
/// also records a source label.
#[derive(Debug, Clone)]
pub struct StoreDataCall {
    unlabeled: Option<Function>,
    labeled: Option<Function>,
}

impl StoreDataCall {
    /// Resolve the overloads from an ABI. At least one must exist.
    pub fn from_abi(abi: &JsonAbi) -> LedgerResult<Self> {
        let overloads = abi
            .function(STORE_DATA)
            .ok_or_else(|| LedgerError::Abi(format!("contract has no {} function", STORE_DATA)))?;

        let string_args = |f: &&Function, n: usize| {
            f.inputs.len() == n && f.inputs.iter().all(|p| p.ty == "string")
        };
        let unlabeled = overloads.iter().find(|f| string_args(f, 1)).cloned();
        let labeled = overloads.iter().find(|f| string_args(f, 2)).cloned();

        if unlabeled.is_none() && labeled.is_none() {
            return Err(LedgerError::Abi(format!(
                "no {}(string) or {}(string,string) overload",
                STORE_DATA, STORE_DATA
            )));
        }
        Ok(Self { unlabeled, labeled })
    }

    /// Pick the overload matching the presence of a source label.
    pub fn function(&self, labeled: bool) -> LedgerResult<&Function> {
        let (found, signature) = if labeled {
            (self.labeled.as_ref(), "storeData(string,string)")
        } else {
            (self.unlabeled.as_ref(), "storeData(string)")
        };
        found.ok_or_else(|| LedgerError::Abi(format!("contract does not expose {}", signature)))
    }

    /// ABI-encode the call for `id` and an optional `source` label.
    pub fn encode(&self, id: &ContentId, source: Option<&str>) -> LedgerResult<Bytes> {
        let mut args = vec![DynSolValue::String(id.as_str().to_string())];
        if let Some(source) = source {
            args.push(DynSolValue::String(source.to_string()));
        }

        let function = self.function(source.is_some())?;
        let calldata = function
            .abi_encode_input(&args)
            .map_err(|e| LedgerError::Abi(format!("failed to encode {}: {}", function.signature(), e)))?;
        Ok(Bytes::from(calldata))
    }
}
