//! Mock Ethereum JSON-RPC node covering the calls made by the ledger client
//! and the provider's nonce, gas and chain-id fillers.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Ganache's first default account.
pub const ACCOUNT: &str = "0x90f8bf6a479f320ead074411a4b0e7944ea8c9c1";
pub const TX_HASH: &str = "0xabababababababababababababababababababababababababababababababab";
const BLOCK_HASH: &str = "0xcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcd";
const ONE_GWEI: &str = "0x3b9aca00";

/// How the node answers.
#[derive(Debug, Clone)]
pub struct RpcBehaviour {
    pub accounts: Vec<&'static str>,
    /// Receipt polls answered with `null` before the receipt appears.
    pub pending_polls: usize,
    /// `Some(status)` once mined, `None` never mines.
    pub mined: Option<bool>,
}

impl Default for RpcBehaviour {
    fn default() -> Self {
        Self {
            accounts: vec![ACCOUNT],
            pending_polls: 0,
            mined: Some(true),
        }
    }
}

struct RpcState {
    behaviour: RpcBehaviour,
    receipt_polls: AtomicUsize,
    sent: Mutex<Vec<Value>>,
}

/// Handle to a running mock node.
#[derive(Clone)]
pub struct MockRpc {
    state: Arc<RpcState>,
    pub addr: SocketAddr,
}

impl MockRpc {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn receipt_polls(&self) -> usize {
        self.state.receipt_polls.load(Ordering::SeqCst)
    }

    /// Transaction objects passed to `eth_sendTransaction`.
    pub fn sent(&self) -> Vec<Value> {
        self.state.sent.lock().unwrap().clone()
    }
}

fn receipt(state: &RpcState, status: bool) -> Value {
    json!({
        "type": "0x2",
        "status": if status { "0x1" } else { "0x0" },
        "cumulativeGasUsed": "0x5208",
        "logs": [],
        "logsBloom": format!("0x{}", "0".repeat(512)),
        "transactionHash": TX_HASH,
        "transactionIndex": "0x0",
        "blockHash": BLOCK_HASH,
        "blockNumber": "0x5",
        "gasUsed": "0x5208",
        "effectiveGasPrice": ONE_GWEI,
        "from": state.behaviour.accounts.first().copied().unwrap_or(ACCOUNT),
        "to": state
            .sent
            .lock()
            .unwrap()
            .last()
            .and_then(|tx| tx.get("to").cloned())
            .unwrap_or(Value::Null),
        "contractAddress": null,
    })
}

fn result_for(state: &RpcState, method: &str, params: &Value) -> Result<Value, Value> {
    let result = match method {
        "eth_blockNumber" => json!("0x5"),
        "eth_chainId" => json!("0x539"),
        "eth_accounts" => json!(state.behaviour.accounts),
        "eth_getTransactionCount" => json!("0x0"),
        "eth_estimateGas" => json!("0x5208"),
        "eth_gasPrice" | "eth_maxPriorityFeePerGas" => json!(ONE_GWEI),
        "eth_feeHistory" => json!({
            "oldestBlock": "0x0",
            "baseFeePerGas": vec![ONE_GWEI; 11],
            "gasUsedRatio": vec![0.5; 10],
            "reward": vec![vec![ONE_GWEI]; 10],
        }),
        "eth_sendTransaction" => {
            let tx = params.get(0).cloned().unwrap_or(Value::Null);
            state.sent.lock().unwrap().push(tx);
            json!(TX_HASH)
        }
        "eth_getTransactionReceipt" => {
            let polls = state.receipt_polls.fetch_add(1, Ordering::SeqCst) + 1;
            match state.behaviour.mined {
                Some(status) if polls > state.behaviour.pending_polls => receipt(state, status),
                _ => Value::Null,
            }
        }
        other => {
            return Err(json!({
                "code": -32601,
                "message": format!("the method {} does not exist/is not available", other),
            }))
        }
    };
    Ok(result)
}

fn respond(state: &RpcState, request: &Value) -> Value {
    let id = request.get("id").cloned().unwrap_or(Value::Null);
    let method = request.get("method").and_then(Value::as_str).unwrap_or_default();
    let params = request.get("params").cloned().unwrap_or(Value::Null);

    match result_for(state, method, &params) {
        Ok(result) => json!({"jsonrpc": "2.0", "id": id, "result": result}),
        Err(error) => json!({"jsonrpc": "2.0", "id": id, "error": error}),
    }
}

async fn handle(State(state): State<Arc<RpcState>>, Json(body): Json<Value>) -> Json<Value> {
    match body {
        Value::Array(batch) => Json(Value::Array(batch.iter().map(|r| respond(&state, r)).collect())),
        single => Json(respond(&state, &single)),
    }
}

/// Start the mock node on an ephemeral port.
pub async fn start_mock_rpc(behaviour: RpcBehaviour) -> MockRpc {
    let state = Arc::new(RpcState {
        behaviour,
        receipt_polls: AtomicUsize::new(0),
        sent: Mutex::new(Vec::new()),
    });
    let app = Router::new().route("/", post(handle)).with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    MockRpc { state, addr }
}
