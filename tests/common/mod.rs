//! Shared mock collaborators for integration tests.

#![allow(dead_code)]

pub mod rpc;

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy::primitives::TxHash;
use async_trait::async_trait;
use axum::extract::{Multipart, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use tokio::net::TcpListener;

use sensor_ledger::blockchain::{Ledger, LedgerError, LedgerReceipt, LedgerResult};
use sensor_ledger::config::{AppConfig, ContentStoreConfig};
use sensor_ledger::content_store::{ContentId, ContentStoreClient};
use sensor_ledger::lifecycle::Shutdown;
use sensor_ledger::{HttpServer, SensorPipeline};

#[derive(Default)]
struct IpfsState {
    documents: Mutex<HashMap<String, Vec<u8>>>,
    file_names: Mutex<Vec<String>>,
    adds: AtomicUsize,
    fail_status: Mutex<Option<u16>>,
    omit_hash: AtomicBool,
}

/// Handle to a running mock of the IPFS RPC API (`add`, `cat`, `id`).
#[derive(Clone, Default)]
pub struct MockIpfs {
    state: Arc<IpfsState>,
    pub addr: Option<SocketAddr>,
}

impl MockIpfs {
    pub fn endpoint(&self) -> String {
        format!("http://{}", self.addr.expect("mock not started"))
    }

    /// Make every `add` answer with `status`.
    pub fn fail_with(&self, status: u16) {
        *self.state.fail_status.lock().unwrap() = Some(status);
    }

    /// Make every `add` answer 200 without a `Hash` field.
    pub fn omit_hash(&self) {
        self.state.omit_hash.store(true, Ordering::SeqCst);
    }

    pub fn add_count(&self) -> usize {
        self.state.adds.load(Ordering::SeqCst)
    }

    pub fn document(&self, cid: &str) -> Option<Vec<u8>> {
        self.state.documents.lock().unwrap().get(cid).cloned()
    }

    pub fn file_names(&self) -> Vec<String> {
        self.state.file_names.lock().unwrap().clone()
    }

    pub fn client(&self) -> ContentStoreClient {
        ContentStoreClient::new(ContentStoreConfig {
            endpoint: self.endpoint(),
            timeout_secs: 5,
            ..Default::default()
        })
        .unwrap()
    }
}

async fn add(State(state): State<Arc<IpfsState>>, mut multipart: Multipart) -> Response {
    state.adds.fetch_add(1, Ordering::SeqCst);

    let fail_status = *state.fail_status.lock().unwrap();
    if let Some(status) = fail_status {
        let status = StatusCode::from_u16(status).unwrap();
        return (status, "ipfs node unavailable").into_response();
    }

    let mut upload = None;
    while let Some(field) = multipart.next_field().await.unwrap() {
        if field.name() == Some("file") {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let bytes = field.bytes().await.unwrap().to_vec();
            upload = Some((file_name, bytes));
        }
    }
    let Some((file_name, bytes)) = upload else {
        return (StatusCode::BAD_REQUEST, "file argument 'path' is required").into_response();
    };

    if state.omit_hash.load(Ordering::SeqCst) {
        return Json(serde_json::json!({ "Name": file_name })).into_response();
    }

    let mut hasher = DefaultHasher::new();
    bytes.hash(&mut hasher);
    let cid = format!("QmMock{:016x}", hasher.finish());

    state.file_names.lock().unwrap().push(file_name.clone());
    state.documents.lock().unwrap().insert(cid.clone(), bytes.clone());

    Json(serde_json::json!({
        "Name": file_name,
        "Hash": cid,
        "Size": bytes.len().to_string(),
    }))
    .into_response()
}

#[derive(Deserialize)]
struct CatParams {
    arg: String,
}

async fn cat(State(state): State<Arc<IpfsState>>, Query(params): Query<CatParams>) -> Response {
    match state.documents.lock().unwrap().get(&params.arg) {
        Some(bytes) => bytes.clone().into_response(),
        None => (StatusCode::INTERNAL_SERVER_ERROR, "merkledag: not found").into_response(),
    }
}

async fn id() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ID": "12D3KooWMockNode" }))
}

/// Start the mock IPFS API on an ephemeral port.
pub async fn start_mock_ipfs() -> MockIpfs {
    let mut mock = MockIpfs::default();
    let app = Router::new()
        .route("/api/v0/add", post(add))
        .route("/api/v0/cat", post(cat))
        .route("/api/v0/id", post(id))
        .with_state(mock.state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    mock.addr = Some(listener.local_addr().unwrap());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    mock
}

/// Ledger that records writes in memory.
#[derive(Default)]
pub struct RecordingLedger {
    writes: Mutex<Vec<(ContentId, Option<String>)>>,
    unreachable: AtomicBool,
    delay: Mutex<Option<Duration>>,
}

impl RecordingLedger {
    pub fn unreachable() -> Self {
        let ledger = Self::default();
        ledger.unreachable.store(true, Ordering::SeqCst);
        ledger
    }

    pub fn with_delay(delay: Duration) -> Self {
        let ledger = Self::default();
        *ledger.delay.lock().unwrap() = Some(delay);
        ledger
    }

    pub fn writes(&self) -> Vec<(ContentId, Option<String>)> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl Ledger for RecordingLedger {
    async fn store_data(&self, id: &ContentId, source: Option<&str>) -> LedgerResult<LedgerReceipt> {
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(LedgerError::Unreachable {
                url: "http://ganache:8545".to_string(),
                reason: "connection refused".to_string(),
            });
        }

        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
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
        !self.unreachable.load(Ordering::SeqCst)
    }
}

/// Start the ingress on an ephemeral port.
pub async fn start_server(pipeline: SensorPipeline) -> (SocketAddr, Shutdown) {
    start_server_with(AppConfig::default(), pipeline).await
}

pub async fn start_server_with(config: AppConfig, pipeline: SensorPipeline) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, pipeline);
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });
    (addr, shutdown)
}

pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
