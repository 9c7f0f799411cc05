//! Rendering of the slots container.
//!
//! [`render`] is a pure function of [`BookingState`]. The resulting
//! [`SlotsView`] can be turned into the widget's HTML markup or into a
//! plain-text listing.

use std::fmt::{self, Write};

use serde::Serialize;

use crate::state::{BookingState, SlotsPhase};

pub const PROMPT_MESSAGE: &str = "Please select a barber and date to see available time slots.";
pub const LOADING_MESSAGE: &str = "Loading available slots...";
pub const EMPTY_MESSAGE: &str = "No time slots available for this date.";
pub const FAILURE_MESSAGE: &str = "Failed to load time slots. Please try again.";

/// One button of the slot grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotButton {
    pub label: String,
    /// Raw slot time, carried as `data-time`
    pub time: String,
    pub disabled: bool,
    pub title: String,
    pub selected: bool,
}

impl SlotButton {
    /// Only enabled buttons react to clicks.
    pub fn is_clickable(&self) -> bool {
        !self.disabled
    }

    pub fn class_name(&self) -> String {
        let mut class = String::from(if self.disabled {
            "time-slot unavailable"
        } else {
            "time-slot available"
        });
        if self.selected {
            class.push_str(" selected");
        }
        class
    }
}

/// Contents of the slots container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SlotsView {
    Prompt,
    Loading,
    /// Backend error message, verbatim
    Error(String),
    Failure,
    Empty,
    Grid(Vec<SlotButton>),
}

pub fn render(state: &BookingState) -> SlotsView {
    match &state.phase {
        SlotsPhase::Prompt => SlotsView::Prompt,
        SlotsPhase::Loading => SlotsView::Loading,
        SlotsPhase::Rejected(message) => SlotsView::Error(message.clone()),
        SlotsPhase::Failed => SlotsView::Failure,
        SlotsPhase::Loaded(slots) if slots.is_empty() => SlotsView::Empty,
        SlotsPhase::Loaded(slots) => SlotsView::Grid(
            slots
                .iter()
                .enumerate()
                .map(|(index, slot)| SlotButton {
                    label: slot.display.clone(),
                    time: slot.time.clone(),
                    disabled: !slot.available,
                    title: slot.tooltip().to_string(),
                    selected: state.selected == Some(index),
                })
                .collect(),
        ),
    }
}

impl SlotsView {
    pub fn buttons(&self) -> &[SlotButton] {
        match self {
            SlotsView::Grid(buttons) => buttons,
            _ => &[],
        }
    }

    pub fn selected(&self) -> Option<&SlotButton> {
        self.buttons().iter().find(|button| button.selected)
    }

    /// The informational or error text shown instead of a grid.
    pub fn message(&self) -> Option<&str> {
        match self {
            SlotsView::Prompt => Some(PROMPT_MESSAGE),
            SlotsView::Loading => Some(LOADING_MESSAGE),
            SlotsView::Error(message) => Some(message),
            SlotsView::Failure => Some(FAILURE_MESSAGE),
            SlotsView::Empty => Some(EMPTY_MESSAGE),
            SlotsView::Grid(_) => None,
        }
    }

    /// Markup placed inside the slots container.
    pub fn to_html(&self) -> String {
        match self {
            SlotsView::Prompt => format!(r#"<p class="info-message">{PROMPT_MESSAGE}</p>"#),
            SlotsView::Loading => format!(
                r#"<div class="loading-spinner"><div class="spinner"></div><p>{LOADING_MESSAGE}</p></div>"#
            ),
            SlotsView::Error(message) => {
                format!(r#"<p class="error-message">{}</p>"#, escape_html(message))
            }
            SlotsView::Failure => format!(r#"<p class="error-message">{FAILURE_MESSAGE}</p>"#),
            SlotsView::Empty => format!(r#"<p class="info-message">{EMPTY_MESSAGE}</p>"#),
            SlotsView::Grid(buttons) => {
                let mut html = String::from(r#"<div class="time-slots-grid">"#);
                for button in buttons {
                    // Writing into a String cannot fail.
                    let _ = write!(
                        html,
                        r#"<button type="button" class="{}" data-time="{}"{} title="{}">{}</button>"#,
                        button.class_name(),
                        escape_html(&button.time),
                        if button.disabled { " disabled" } else { "" },
                        escape_html(&button.title),
                        escape_html(&button.label),
                    );
                }
                html.push_str("</div>");
                html
            }
        }
    }
}

impl fmt::Display for SlotsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(message) = self.message() {
            return write!(f, "{message}");
        }
        for button in self.buttons() {
            let marker = match (button.selected, button.disabled) {
                (true, _) => "*",
                (false, true) => "x",
                (false, false) => " ",
            };
            writeln!(f, "[{marker}] {:<10} {:<6} {}", button.label, button.time, button.title)?;
        }
        Ok(())
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_html_neutralises_markup() {
        assert_eq!(
            escape_html(r#"<b onclick="x">Tom & Jerry's</b>"#),
            "&lt;b onclick=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/b&gt;"
        );
    }

    #[test]
    fn class_name_reflects_state() {
        let mut button = SlotButton {
            label: "9:00 AM".into(),
            time: "09:00".into(),
            disabled: false,
            title: "Available".into(),
            selected: false,
        };
        assert_eq!(button.class_name(), "time-slot available");

        button.selected = true;
        assert_eq!(button.class_name(), "time-slot available selected");

        button.disabled = true;
        button.selected = false;
        assert_eq!(button.class_name(), "time-slot unavailable");
    }
}
