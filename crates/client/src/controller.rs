//! # Booking Form Controller
//!
//! Keeps the slots container consistent with the (provider, date) inputs and
//! the hidden time input consistent with the clicked slot.
//!
//! Loading is split in three steps so that the fetch itself can run elsewhere
//! (see [`crate::runtime`]):
//!
//! 1. a form change produces a [`LoadStep`]; `Fetch` carries a [`LoadTicket`]
//! 2. the caller queries a [`SlotSource`] with the ticket's provider and date
//! 3. [`BookingController::complete`] applies the outcome, unless a newer
//!    ticket has been issued in the meantime
//!
//! [`BookingController::load_slots`] runs all three in sequence.

use slotbook_core::{
    errors::SlotResult,
    models::{
        form::{BookingForm, ElementIds, Page},
        slot::SlotsResponse,
    },
    state::BookingState,
    view::{SlotsView, render},
};
use tracing::{debug, error, info, warn};

use crate::http::SlotSource;

/// A slot query issued by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub generation: u64,
    pub provider: String,
    pub date: String,
}

/// What a form change asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStep {
    /// Provider or date missing; the prompt is shown and nothing is fetched
    Prompted,
    Fetch(LoadTicket),
}

impl LoadStep {
    pub fn ticket(self) -> Option<LoadTicket> {
        match self {
            LoadStep::Fetch(ticket) => Some(ticket),
            LoadStep::Prompted => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BookingController {
    form: BookingForm,
    state: BookingState,
    generation: u64,
}

impl BookingController {
    /// Binds to the booking elements of `page`.
    ///
    /// Returns `None` when the page lacks the provider selector or the date
    /// input; such a page does not use the slot picker.
    pub fn attach(page: &Page, ids: &ElementIds) -> Option<Self> {
        let Some(form) = BookingForm::bind(page, ids) else {
            debug!("booking form not found on page, slot picker inactive");
            return None;
        };
        if !form.has_container {
            warn!("slots container `{}` missing, rendering off-page", ids.container);
        }

        let state = BookingState::new(form.provider.clone(), form.date.clone());
        Some(Self {
            form,
            state,
            generation: 0,
        })
    }

    /// Load-time trigger: fetches once if the form arrived pre-filled.
    pub fn initial_load(&mut self) -> Option<LoadTicket> {
        if self.form.is_complete() {
            self.begin_load().ticket()
        } else {
            None
        }
    }

    pub fn on_provider_change(&mut self, provider: impl Into<String>) -> LoadStep {
        self.form.provider = provider.into();
        self.begin_load()
    }

    pub fn on_date_change(&mut self, date: impl Into<String>) -> LoadStep {
        self.form.date = date.into();
        self.begin_load()
    }

    /// Re-queries the current provider and date.
    pub fn reload(&mut self) -> LoadStep {
        self.begin_load()
    }

    fn begin_load(&mut self) -> LoadStep {
        // Any new load supersedes whatever is in flight, prompt included.
        self.generation += 1;
        self.state.provider = self.form.provider.clone();
        self.state.date = self.form.date.clone();
        self.clear_time_value();

        if !self.state.is_complete() {
            self.state.prompt();
            return LoadStep::Prompted;
        }

        self.state.start_loading();
        info!(
            "loading slots for barber {} on {} (request {})",
            self.state.provider, self.state.date, self.generation
        );
        LoadStep::Fetch(LoadTicket {
            generation: self.generation,
            provider: self.state.provider.clone(),
            date: self.state.date.clone(),
        })
    }

    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Applies the outcome of `ticket`'s query.
    ///
    /// Returns `false` and changes nothing when the ticket has been superseded.
    pub fn complete(&mut self, ticket: &LoadTicket, outcome: SlotResult<SlotsResponse>) -> bool {
        if !self.is_current(ticket) {
            debug!(
                "ignoring response to superseded request {} (latest is {})",
                ticket.generation, self.generation
            );
            return false;
        }

        match &outcome {
            Ok(SlotsResponse::Slots(slots)) => {
                info!("received {} slots for barber {} on {}", slots.len(), ticket.provider, ticket.date);
            }
            Ok(SlotsResponse::Rejected(message)) => {
                info!("backend rejected slot query: {}", message);
            }
            Err(err) if err.is_fetch_failure() => {
                error!(
                    "Error fetching time slots for barber {} on {}: {}",
                    ticket.provider, ticket.date, err
                );
            }
            Err(err) => {
                warn!("slot query for barber {} on {} failed: {}", ticket.provider, ticket.date, err);
            }
        }

        self.state.finish_loading(&outcome);
        true
    }

    /// Runs a complete load against `source`.
    ///
    /// No request is made when provider or date is empty. Failures are
    /// rendered, never returned.
    pub async fn load_slots<S: SlotSource + ?Sized>(&mut self, source: &S) {
        if let LoadStep::Fetch(ticket) = self.begin_load() {
            let outcome = source.fetch_slots(&ticket.provider, &ticket.date).await;
            self.complete(&ticket, outcome);
        }
    }

    /// Click on the slot button at grid position `index`.
    ///
    /// Only available slots of the current grid react; anything else is
    /// rejected without touching the selection or the hidden input.
    pub fn click_button(&mut self, index: usize) -> SlotResult<()> {
        let time = self.state.select_button(index)?.time.clone();
        self.fill_time_value(time);
        Ok(())
    }

    /// Click on the first available slot button carrying `time`.
    pub fn click(&mut self, time: &str) -> SlotResult<()> {
        let time = self.state.select(time)?.time.clone();
        self.fill_time_value(time);
        Ok(())
    }

    fn fill_time_value(&mut self, time: String) {
        if let Some(field) = self.form.time.as_mut() {
            field.value = time;
            field.container_visible = false;
        }
    }

    fn clear_time_value(&mut self) {
        if let Some(field) = self.form.time.as_mut() {
            field.value.clear();
        }
    }

    pub fn view(&self) -> SlotsView {
        render(&self.state)
    }

    pub fn render_html(&self) -> String {
        self.view().to_html()
    }

    pub fn state(&self) -> &BookingState {
        &self.state
    }

    pub fn form(&self) -> &BookingForm {
        &self.form
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
