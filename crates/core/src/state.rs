//! Explicit state record of the slot picker.
//!
//! Everything the slots container shows is derived from [`BookingState`];
//! see [`crate::view::render`].

use serde::Serialize;

use crate::{
    errors::{SlotError, SlotResult},
    models::slot::{Slot, SlotsResponse},
};

/// Where the slot list currently stands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", content = "detail", rename_all = "snake_case")]
pub enum SlotsPhase {
    /// Provider or date missing
    #[default]
    Prompt,
    Loading,
    Loaded(Vec<Slot>),
    /// Backend-reported error message
    Rejected(String),
    /// Transport or parse failure
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BookingState {
    pub provider: String,
    pub date: String,
    pub phase: SlotsPhase,
    /// Grid position of the selected slot
    pub selected: Option<usize>,
}

impl BookingState {
    pub fn new(provider: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            date: date.into(),
            ..Self::default()
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.provider.is_empty() && !self.date.is_empty()
    }

    /// Replaces the grid with the prompt. Drops any selection.
    pub fn prompt(&mut self) {
        self.phase = SlotsPhase::Prompt;
        self.selected = None;
    }

    /// Replaces the grid with the loading indicator. Drops any selection.
    pub fn start_loading(&mut self) {
        self.phase = SlotsPhase::Loading;
        self.selected = None;
    }

    /// Applies the outcome of a slot query.
    pub fn finish_loading(&mut self, outcome: &SlotResult<SlotsResponse>) {
        self.selected = None;
        self.phase = match outcome {
            Ok(SlotsResponse::Slots(slots)) => SlotsPhase::Loaded(slots.clone()),
            Ok(SlotsResponse::Rejected(message)) => SlotsPhase::Rejected(message.clone()),
            Err(_) => SlotsPhase::Failed,
        };
    }

    pub fn slots(&self) -> &[Slot] {
        match &self.phase {
            SlotsPhase::Loaded(slots) => slots,
            _ => &[],
        }
    }

    /// Marks the slot at grid position `index` as the single selected slot.
    ///
    /// Only slots currently rendered as available can be selected; anything
    /// else is rejected and leaves the state untouched.
    pub fn select_button(&mut self, index: usize) -> SlotResult<&Slot> {
        let slot = self.slots().get(index).ok_or_else(|| {
            SlotError::InvalidSelection(format!("no slot button #{index} is shown"))
        })?;
        if !slot.available {
            return Err(SlotError::InvalidSelection(format!(
                "slot at {} is unavailable: {}",
                slot.time,
                slot.tooltip()
            )));
        }

        self.selected = Some(index);
        Ok(&self.slots()[index])
    }

    /// Selects the first available slot at `time`.
    pub fn select(&mut self, time: &str) -> SlotResult<&Slot> {
        let slots = self.slots();
        // Falling back to an unavailable match reports why it cannot be picked.
        let index = slots
            .iter()
            .position(|slot| slot.time == time && slot.available)
            .or_else(|| slots.iter().position(|slot| slot.time == time))
            .ok_or_else(|| SlotError::InvalidSelection(format!("no slot at {time} is shown")))?;
        self.select_button(index)
    }

    pub fn selected_slot(&self) -> Option<&Slot> {
        self.slots().get(self.selected?)
    }

    pub fn selected_time(&self) -> Option<&str> {
        self.selected_slot().map(|slot| slot.time.as_str())
    }
}
