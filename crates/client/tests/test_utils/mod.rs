#![allow(dead_code)]

use std::{collections::HashMap, net::SocketAddr, sync::Arc};

use async_trait::async_trait;
use axum::{
    Router,
    extract::Query,
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use mockall::mock;
use serde_json::{Value, json};
use slotbook_client::http::{AVAILABLE_SLOTS_PATH, SlotSource};
use slotbook_core::{
    errors::{SlotError, SlotResult},
    models::{
        form::{ElementIds, Page},
        slot::{Slot, SlotsResponse},
    },
};
use tokio::{
    net::TcpListener,
    sync::{Mutex, oneshot},
};

mock! {
    pub Source {}

    #[async_trait]
    impl SlotSource for Source {
        async fn fetch_slots(&self, provider_id: &str, date: &str) -> SlotResult<SlotsResponse>;
    }
}

/// The two-slot day used throughout the tests.
pub fn sample_slots() -> Vec<Slot> {
    vec![
        Slot::available("09:00", "9:00 AM"),
        Slot::unavailable("09:30", "9:30 AM", "Booked"),
    ]
}

pub fn sample_page(provider: &str, date: &str) -> Page {
    Page::booking_form(&ElementIds::default(), provider, date)
}

/// Starts an in-process backend serving `/booking/api/available-slots/`.
///
/// The handler answers with `respond(query)`; every query is recorded.
pub async fn spawn_backend<F>(respond: F) -> (String, Arc<Mutex<Vec<HashMap<String, String>>>>)
where
    F: Fn(&HashMap<String, String>) -> (StatusCode, String) + Clone + Send + Sync + 'static,
{
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorded = seen.clone();

    let app = Router::new().route(
        AVAILABLE_SLOTS_PATH,
        get(move |Query(query): Query<HashMap<String, String>>| {
            let respond = respond.clone();
            let recorded = recorded.clone();
            async move {
                recorded.lock().await.push(query.clone());
                let (status, body) = respond(&query);
                (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
            }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), seen)
}

/// Backend that mimics the booking service's slot endpoint.
pub async fn spawn_booking_backend() -> (String, Arc<Mutex<Vec<HashMap<String, String>>>>) {
    spawn_backend(|query| {
        let barber = query.get("barber_id").map(String::as_str).unwrap_or("");
        let date = query.get("date").map(String::as_str).unwrap_or("");
        if barber.is_empty() || date.is_empty() {
            return (StatusCode::BAD_REQUEST, json!({ "error": "Missing parameters" }).to_string());
        }
        if barber != "3" {
            return (StatusCode::BAD_REQUEST, json!({ "error": "Invalid barber or date" }).to_string());
        }
        let body: Value = json!({
            "slots": [
                { "time": "09:00", "display": "9:00 AM", "available": true, "reason": null },
                { "time": "09:30", "display": "9:30 AM", "available": false, "reason": "Booked" }
            ]
        });
        (StatusCode::OK, body.to_string())
    })
    .await
}

/// Slot source whose queries stay pending until released by the test.
#[derive(Default)]
pub struct GatedSource {
    pending: Mutex<HashMap<String, oneshot::Sender<SlotResult<SlotsResponse>>>>,
}

impl GatedSource {
    fn key(provider_id: &str, date: &str) -> String {
        format!("{provider_id}|{date}")
    }

    /// Completes the pending query for `provider_id`/`date`.
    pub async fn release(&self, provider_id: &str, date: &str, outcome: SlotResult<SlotsResponse>) {
        let key = Self::key(provider_id, date);
        loop {
            if let Some(tx) = self.pending.lock().await.remove(&key) {
                let _ = tx.send(outcome);
                return;
            }
            tokio::task::yield_now().await;
        }
    }

    pub async fn pending_count(&self) -> usize {
        self.pending.lock().await.len()
    }
}

#[async_trait]
impl SlotSource for GatedSource {
    async fn fetch_slots(&self, provider_id: &str, date: &str) -> SlotResult<SlotsResponse> {
        let (tx, rx) = oneshot::channel();
        self.pending
            .lock()
            .await
            .insert(Self::key(provider_id, date), tx);
        rx.await
            .unwrap_or_else(|_| Err(SlotError::Transport("gate dropped".into())))
    }
}
