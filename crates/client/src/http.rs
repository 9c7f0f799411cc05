//! # Slot Source
//!
//! Fetching of slot lists from the booking backend.
//!
//! The endpoint is `GET /booking/api/available-slots/?barber_id={id}&date={date}`.
//! The backend answers `{"error": ...}` with a 400 status for bad input, so the
//! body is interpreted whatever the status code.

use async_trait::async_trait;
use eyre::{WrapErr, eyre};
use reqwest::{Client, Url};
use slotbook_core::{
    errors::{SlotError, SlotResult},
    models::slot::SlotsResponse,
};
use std::time::Duration;
use tracing::debug;

use crate::config::ClientConfig;

pub const AVAILABLE_SLOTS_PATH: &str = "/booking/api/available-slots/";

/// Anything able to answer a slot query for a provider and date.
#[async_trait]
pub trait SlotSource: Send + Sync {
    async fn fetch_slots(&self, provider_id: &str, date: &str) -> SlotResult<SlotsResponse>;
}

/// Builds the slot query URL. Both values are percent-encoded and otherwise passed as given.
pub fn slots_url(base_url: &str, provider_id: &str, date: &str) -> String {
    format!(
        "{}{}?barber_id={}&date={}",
        base_url.trim_end_matches('/'),
        AVAILABLE_SLOTS_PATH,
        urlencoding::encode(provider_id),
        urlencoding::encode(date),
    )
}

/// [`SlotSource`] backed by the booking backend's HTTP API.
#[derive(Debug, Clone)]
pub struct HttpSlotSource {
    client: Client,
    base_url: String,
}

impl HttpSlotSource {
    /// Fails with [`SlotError::Config`] unless `base_url` is an absolute
    /// http(s) URL.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> SlotResult<Self> {
        let base_url = base_url.into();
        let parsed = Url::parse(&base_url)
            .wrap_err_with(|| format!("Invalid SLOTBOOK_BASE_URL value: {base_url}"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SlotError::Config(eyre!(
                "SLOTBOOK_BASE_URL must use http or https, got {base_url}"
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .wrap_err("Failed to build HTTP client")?;

        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &ClientConfig) -> SlotResult<Self> {
        Self::new(
            config.base_url.clone(),
            Duration::from_secs(config.request_timeout),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl SlotSource for HttpSlotSource {
    async fn fetch_slots(&self, provider_id: &str, date: &str) -> SlotResult<SlotsResponse> {
        let url = slots_url(&self.base_url, provider_id, date);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| SlotError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SlotError::Transport(e.to_string()))?;
        debug!("slot query answered {} ({} bytes)", status, body.len());

        SlotsResponse::from_json(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_url() {
        assert_eq!(
            slots_url("http://localhost:8000", "3", "2024-06-01"),
            "http://localhost:8000/booking/api/available-slots/?barber_id=3&date=2024-06-01"
        );
    }

    #[test]
    fn test_new_rejects_base_url_without_http_scheme() {
        for base_url in ["localhost:8000", "ftp://shop.example", "not a url"] {
            let err = HttpSlotSource::new(base_url, Duration::from_secs(5)).unwrap_err();
            assert!(matches!(err, SlotError::Config(_)), "{base_url}: {err}");
            assert!(!err.is_fetch_failure());
        }
    }

    #[test]
    fn test_slots_url_trailing_slash_and_encoding() {
        assert_eq!(
            slots_url("https://shop.example/", "7 & 8", "2024/06/01"),
            "https://shop.example/booking/api/available-slots/?barber_id=7%20%26%208&date=2024%2F06%2F01"
        );
    }
}
