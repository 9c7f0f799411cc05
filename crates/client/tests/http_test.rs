mod test_utils;

use std::time::Duration;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use slotbook_client::http::{HttpSlotSource, SlotSource};
use slotbook_core::{errors::SlotError, models::slot::SlotsResponse};
use test_utils::{sample_slots, spawn_backend, spawn_booking_backend};

fn source(base_url: &str) -> HttpSlotSource {
    HttpSlotSource::new(base_url, Duration::from_secs(5)).expect("Failed to build HTTP client")
}

#[tokio::test]
async fn test_fetch_slots_sends_contract_parameters() {
    let (base_url, seen) = spawn_booking_backend().await;

    let response = source(&base_url)
        .fetch_slots("3", "2024-06-01")
        .await
        .expect("Failed to fetch slots");

    assert_eq!(response, SlotsResponse::Slots(sample_slots()));

    let seen = seen.lock().await;
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].get("barber_id").map(String::as_str), Some("3"));
    assert_eq!(seen[0].get("date").map(String::as_str), Some("2024-06-01"));
}

#[tokio::test]
async fn test_fetch_slots_reads_error_body_of_bad_request() {
    let (base_url, _) = spawn_booking_backend().await;

    let response = source(&base_url)
        .fetch_slots("99", "2024-06-01")
        .await
        .expect("Failed to fetch slots");

    assert_eq!(response, SlotsResponse::Rejected("Invalid barber or date".to_string()));
}

#[tokio::test]
async fn test_fetch_slots_url_encodes_values() {
    let (base_url, seen) = spawn_booking_backend().await;

    let _ = source(&base_url).fetch_slots("3&date=x", "2024-06-01").await;

    let seen = seen.lock().await;
    assert_eq!(seen[0].get("barber_id").map(String::as_str), Some("3&date=x"));
    assert_eq!(seen[0].get("date").map(String::as_str), Some("2024-06-01"));
}

#[tokio::test]
async fn test_fetch_slots_non_json_body_is_decode_error() {
    let (base_url, _) = spawn_backend(|_| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "<h1>Server Error (500)</h1>".to_string(),
        )
    })
    .await;

    let err = source(&base_url)
        .fetch_slots("3", "2024-06-01")
        .await
        .unwrap_err();

    assert!(matches!(err, SlotError::Decode(_)), "unexpected error: {err}");
}

#[tokio::test]
async fn test_fetch_slots_unreachable_backend_is_transport_error() {
    // Bind and immediately drop a listener to get a port nobody serves.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = source(&format!("http://{addr}"))
        .fetch_slots("3", "2024-06-01")
        .await
        .unwrap_err();

    assert!(matches!(err, SlotError::Transport(_)), "unexpected error: {err}");
    assert!(err.is_fetch_failure());
}
