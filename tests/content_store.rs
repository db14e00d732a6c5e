//! Content store client against a mock IPFS RPC API.

mod common;

use common::start_mock_ipfs;
use sensor_ledger::content_store::{ContentStore, ContentStoreError};
use sensor_ledger::sensor::{Measurement, SensorReading};

fn reading() -> SensorReading {
    SensorReading::at(
        Measurement {
            temperature: 21.5,
            humidity: 40.2,
            pressure: 1013.25,
        },
        1_718_000_000,
    )
}

#[tokio::test]
async fn test_round_trip() {
    let ipfs = start_mock_ipfs().await;
    let client = ipfs.client();

    let id = client.add_reading(&reading()).await.unwrap();
    assert!(id.as_str().starts_with("QmMock"));

    let fetched = client.fetch_reading(&id).await.unwrap();
    assert_eq!(fetched, reading());
}

#[tokio::test]
async fn test_upload_uses_configured_file_name() {
    let ipfs = start_mock_ipfs().await;
    ipfs.client().add_reading(&reading()).await.unwrap();
    assert_eq!(ipfs.file_names(), vec!["sensor_data.json".to_string()]);
}

#[tokio::test]
async fn test_non_success_status_is_an_error() {
    let ipfs = start_mock_ipfs().await;
    ipfs.fail_with(503);

    let err = ipfs.client().add_reading(&reading()).await.unwrap_err();
    match err {
        ContentStoreError::Status { status, body } => {
            assert_eq!(status, 503);
            assert!(body.contains("unavailable"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_missing_hash_is_an_error() {
    let ipfs = start_mock_ipfs().await;
    ipfs.omit_hash();

    let err = ipfs.client().add_reading(&reading()).await.unwrap_err();
    assert!(matches!(err, ContentStoreError::MissingHash));
}

#[tokio::test]
async fn test_health_check() {
    let ipfs = start_mock_ipfs().await;
    assert!(ipfs.client().is_healthy().await);
}
