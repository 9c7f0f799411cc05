//! # Client Configuration Module
//!
//! This module handles loading configuration for the SlotBook client from
//! environment variables, providing defaults where appropriate.
//!
//! ## Environment Variables
//!
//! - `SLOTBOOK_BASE_URL`: Base URL of the booking backend (default: "http://127.0.0.1:8000")
//! - `SLOTBOOK_REQUEST_TIMEOUT_SECONDS`: HTTP request timeout (default: 30)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `SLOTBOOK_PROVIDER_FIELD_ID`: Provider selector element id (default: "id_barber")
//! - `SLOTBOOK_DATE_FIELD_ID`: Date input element id (default: "id_appointment_date")
//! - `SLOTBOOK_TIME_FIELD_ID`: Hidden time input element id (default: "id_appointment_time")
//! - `SLOTBOOK_CONTAINER_ID`: Slots container element id (default: "time-slots-container")

use eyre::{Result, WrapErr};
use slotbook_core::models::form::ElementIds;
use std::env;
use tracing::Level;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

/// Configuration for the SlotBook client
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use slotbook_client::config::ClientConfig;
///
/// fn example() -> Result<()> {
///     let config = ClientConfig::from_env()?;
///     println!("Querying slots from {}", config.base_url);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the booking backend, without trailing slash
    pub base_url: String,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Log level for the application
    pub log_level: Level,

    /// Element identifiers of the booking form
    pub element_ids: ElementIds,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT_SECONDS,
            log_level: Level::INFO,
            element_ids: ElementIds::default(),
        }
    }
}

impl ClientConfig {
    /// Creates a new ClientConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if `SLOTBOOK_REQUEST_TIMEOUT_SECONDS`
    /// is set but is not a positive integer.
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("SLOTBOOK_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let request_timeout = match env::var("SLOTBOOK_REQUEST_TIMEOUT_SECONDS") {
            Ok(raw) => parse_timeout(&raw)?,
            Err(_) => DEFAULT_REQUEST_TIMEOUT_SECONDS,
        };

        let log_level = parse_log_level(&env::var("LOG_LEVEL").unwrap_or_default());

        let defaults = ElementIds::default();
        let element_ids = ElementIds {
            provider: env::var("SLOTBOOK_PROVIDER_FIELD_ID").unwrap_or(defaults.provider),
            date: env::var("SLOTBOOK_DATE_FIELD_ID").unwrap_or(defaults.date),
            time: env::var("SLOTBOOK_TIME_FIELD_ID").unwrap_or(defaults.time),
            container: env::var("SLOTBOOK_CONTAINER_ID").unwrap_or(defaults.container),
        };

        Ok(Self {
            base_url,
            request_timeout,
            log_level,
            element_ids,
        })
    }
}

pub fn parse_timeout(raw: &str) -> Result<u64> {
    let secs: u64 = raw
        .trim()
        .parse()
        .wrap_err("Invalid SLOTBOOK_REQUEST_TIMEOUT_SECONDS value")?;
    if secs == 0 {
        eyre::bail!("SLOTBOOK_REQUEST_TIMEOUT_SECONDS must be greater than zero");
    }
    Ok(secs)
}

/// Unknown or empty values fall back to INFO.
pub fn parse_log_level(raw: &str) -> Level {
    match raw.trim().to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}
