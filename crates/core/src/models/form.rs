use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Element identifiers the controller binds to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementIds {
    pub provider: String,
    pub date: String,
    pub time: String,
    pub container: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            provider: "id_barber".to_string(),
            date: "id_appointment_date".to_string(),
            time: "id_appointment_time".to_string(),
            container: "time-slots-container".to_string(),
        }
    }
}

/// The form elements present on a page, keyed by id, with their current values.
///
/// Containers have no meaningful value; they are registered with an empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    elements: HashMap<String, String>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_element(mut self, id: impl Into<String>, value: impl Into<String>) -> Self {
        self.elements.insert(id.into(), value.into());
        self
    }

    /// Builds a page carrying all four booking elements.
    pub fn booking_form(ids: &ElementIds, provider: &str, date: &str) -> Self {
        Self::new()
            .with_element(&ids.provider, provider)
            .with_element(&ids.date, date)
            .with_element(&ids.time, "")
            .with_element(&ids.container, "")
    }

    pub fn value(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(String::as_str)
    }

    pub fn has(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }
}

/// The hidden time input the surrounding booking form submits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HiddenTimeField {
    pub value: String,
    /// Visibility of the input's containing element
    pub container_visible: bool,
}

impl HiddenTimeField {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            container_visible: true,
        }
    }
}

/// Current values of the bound form inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingForm {
    pub provider: String,
    pub date: String,
    /// `None` when the page has no hidden time input
    pub time: Option<HiddenTimeField>,
    pub has_container: bool,
}

impl BookingForm {
    /// Locates the booking elements on `page`.
    ///
    /// Returns `None` when the provider selector or the date input is missing:
    /// such a page does not use the slot picker.
    pub fn bind(page: &Page, ids: &ElementIds) -> Option<Self> {
        let provider = page.value(&ids.provider)?.to_string();
        let date = page.value(&ids.date)?.to_string();
        let time = page.value(&ids.time).map(HiddenTimeField::new);

        Some(Self {
            provider,
            date,
            time,
            has_container: page.has(&ids.container),
        })
    }

    /// Value the form would submit for the appointment time.
    pub fn time_value(&self) -> &str {
        self.time.as_ref().map(|t| t.value.as_str()).unwrap_or("")
    }

    pub fn is_complete(&self) -> bool {
        !self.provider.is_empty() && !self.date.is_empty()
    }
}
