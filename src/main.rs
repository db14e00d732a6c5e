//! sensor-ledger
//!
//! Records environmental sensor readings on a local blockchain.
//!
//! # Architecture Overview
//!
//! ```text
//!   BLE peripheral ──▶ sensor::BleSensor ─┐
//!                                         ├─▶ pipeline ──▶ content_store (IPFS /api/v0/add)
//!   POST /store_sensor_data/ ──▶ http ────┘        │
//!                                                  └────▶ blockchain (storeData, receipt wait)
//! ```
//!
//! `serve` runs the HTTP ingress; `read` runs the BLE path once or on an
//! interval. Both build one content store client and one ledger client at
//! startup and release them on shutdown.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use sensor_ledger::blockchain::LedgerClient;
use sensor_ledger::config::{load_config, validate_config, AppConfig, ConfigError};
use sensor_ledger::content_store::ContentStoreClient;
use sensor_ledger::lifecycle::Shutdown;
use sensor_ledger::observability::{logging, metrics};
use sensor_ledger::pipeline::{run_sensor_loop, SensorPipeline};
use sensor_ledger::sensor::BleSensor;
use sensor_ledger::HttpServer;

#[derive(Parser)]
#[command(name = "sensor-ledger")]
#[command(about = "Store sensor readings in IPFS and record their hashes on chain", long_about = None)]
struct Cli {
    /// TOML configuration file; defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP ingress
    Serve {
        /// Override the listener bind address
        #[arg(long)]
        bind: Option<String>,
    },
    /// Read the BLE sensor and record the measurement
    Read {
        /// Peripheral address (MAC, or CoreBluetooth UUID on macOS)
        #[arg(long)]
        device: Option<String>,

        /// Sample every N seconds until interrupted; 0 reads once
        #[arg(long)]
        interval_secs: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    match &cli.command {
        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                config.listener.bind_address = bind.clone();
            }
        }
        Commands::Read {
            device,
            interval_secs,
        } => {
            if device.is_some() {
                config.sensor.device_address = device.clone();
            }
            if let Some(secs) = interval_secs {
                config.sensor.interval_secs = *secs;
            }
        }
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    logging::init_logging(&config.observability.log_level);
    tracing::info!("sensor-ledger v{} starting", env!("CARGO_PKG_VERSION"));

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    tracing::info!(
        rpc_url = %config.ledger.rpc_url,
        contract = %config.ledger.contract_address,
        content_store = %config.content_store.endpoint,
        "Configuration loaded"
    );

    let store = ContentStoreClient::new(config.content_store.clone())?;
    let ledger = LedgerClient::connect(config.ledger.clone()).await?;
    let labeled = match &cli.command {
        Commands::Serve { .. } => false,
        Commands::Read { .. } => config.sensor.source_label.is_some(),
    };
    ledger.require_overload(labeled)?;
    tracing::info!(account = %ledger.account(), contract = %ledger.contract(), "Ledger client ready");
    let pipeline = SensorPipeline::new(Arc::new(store), Arc::new(ledger));

    let shutdown = Shutdown::new();

    match cli.command {
        Commands::Serve { .. } => {
            let listener = TcpListener::bind(&config.listener.bind_address).await?;
            let server = HttpServer::new(config, pipeline.clone());
            let server_shutdown = shutdown.subscribe();
            let server_task = tokio::spawn(server.run(listener, server_shutdown));

            shutdown.trigger_on_signal().await;
            server_task.await??;
        }
        Commands::Read { .. } => {
            let sensor = BleSensor::connect(&config.sensor).await?;
            tracing::info!(address = sensor.address(), "Sampling from BLE sensor");
            let every = Duration::from_secs(config.sensor.interval_secs);
            let label = config.sensor.source_label.as_deref();

            let run = run_sensor_loop(&sensor, &pipeline, label, every, shutdown.subscribe());
            tokio::pin!(run);
            let result = tokio::select! {
                result = &mut run => result,
                _ = shutdown.trigger_on_signal() => {
                    // The interval loop stops on this; a single read runs to completion.
                    run.await
                }
            };

            if let Err(e) = sensor.disconnect().await {
                tracing::warn!(error = %e, "Failed to disconnect from BLE sensor");
            }
            let recorded = result?;
            tracing::info!(recorded, "Sensor run finished");
        }
    }

    drop(pipeline);
    tracing::info!("Clients released, shutdown complete");
    Ok(())
}
