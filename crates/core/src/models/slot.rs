use serde::{Deserialize, Serialize};

use crate::errors::{SlotError, SlotResult};

/// Tooltip shown for a slot that carries no reason.
pub const DEFAULT_REASON: &str = "Available";

/// A bookable time unit for one provider on one date, as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// Submitted value, `HH:MM`
    pub time: String,
    /// Human readable label, e.g. `09:00 AM`
    pub display: String,
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Slot {
    pub fn available(time: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            display: display.into(),
            available: true,
            reason: None,
        }
    }

    pub fn unavailable(
        time: impl Into<String>,
        display: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            time: time.into(),
            display: display.into(),
            available: false,
            reason: Some(reason.into()),
        }
    }

    /// Tooltip text: the reason, or "Available" when the backend gave none.
    pub fn tooltip(&self) -> &str {
        match self.reason.as_deref() {
            Some(reason) if !reason.is_empty() => reason,
            _ => DEFAULT_REASON,
        }
    }
}

/// Raw body of `GET /booking/api/available-slots/`.
///
/// The backend answers either `{"error": ...}` or `{"slots": [...]}`; both
/// fields are optional here so that a body carrying neither can be reported
/// as a decode failure instead of silently rendering nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlotsPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slots: Option<Vec<Slot>>,
}

/// Interpreted slot-query response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotsResponse {
    /// Backend-reported error, shown verbatim
    Rejected(String),
    Slots(Vec<Slot>),
}

impl TryFrom<SlotsPayload> for SlotsResponse {
    type Error = SlotError;

    fn try_from(payload: SlotsPayload) -> SlotResult<Self> {
        // A non-empty error field wins over any slots sent alongside it.
        if let Some(message) = payload.error.filter(|m| !m.is_empty()) {
            return Ok(SlotsResponse::Rejected(message));
        }
        payload
            .slots
            .map(SlotsResponse::Slots)
            .ok_or_else(|| SlotError::Decode("response has neither `error` nor `slots`".into()))
    }
}

impl SlotsResponse {
    /// Parses a response body, whatever the HTTP status it arrived with.
    pub fn from_json(body: &str) -> SlotResult<Self> {
        let payload: SlotsPayload =
            serde_json::from_str(body).map_err(|e| SlotError::Decode(e.to_string()))?;
        payload.try_into()
    }
}
