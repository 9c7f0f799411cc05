//! # Widget Runtime
//!
//! Drives a [`BookingController`] the way a page's UI thread would: a single
//! task owns the controller and handles form events one at a time, while each
//! slot query runs on its own task and posts its outcome back tagged with the
//! ticket it answers. Outcomes for superseded tickets are dropped by the
//! controller.

use std::sync::Arc;

use slotbook_core::{
    errors::SlotResult,
    models::{form::BookingForm, slot::SlotsResponse},
    view::SlotsView,
};
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use crate::{
    controller::{BookingController, LoadTicket},
    http::SlotSource,
};

const EVENT_BUFFER: usize = 32;

/// User interaction with the booking form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    ProviderChanged(String),
    DateChanged(String),
    /// Click on the first available button carrying this time
    SlotClicked(String),
    /// Click on the button at this grid position
    ButtonClicked(usize),
    Reload,
}

/// What the page currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetSnapshot {
    pub view: SlotsView,
    pub form: BookingForm,
    /// Tickets issued so far
    pub generation: u64,
}

impl WidgetSnapshot {
    fn of(controller: &BookingController) -> Self {
        Self {
            view: controller.view(),
            form: controller.form().clone(),
            generation: controller.generation(),
        }
    }
}

enum Message {
    Form(FormEvent),
    Loaded(LoadTicket, SlotResult<SlotsResponse>),
}

/// Handle to a running widget. Dropping it stops the event loop.
pub struct WidgetHandle {
    events: mpsc::Sender<FormEvent>,
    snapshots: watch::Receiver<WidgetSnapshot>,
    task: JoinHandle<()>,
}

impl WidgetHandle {
    /// Queues a form event. Returns `false` if the widget has stopped.
    pub async fn send(&self, event: FormEvent) -> bool {
        self.events.send(event).await.is_ok()
    }

    /// Queues a form event and returns the next snapshot rendered after it.
    ///
    /// With no fetch in flight that snapshot answers the event; a load it
    /// starts is still pending there. Returns `None` if the widget has stopped.
    pub async fn dispatch(&self, event: FormEvent) -> Option<WidgetSnapshot> {
        let mut rx = self.snapshots.clone();
        rx.borrow_and_update();
        if !self.send(event).await {
            return None;
        }
        rx.changed().await.ok()?;
        let snapshot = rx.borrow().clone();
        Some(snapshot)
    }

    pub fn snapshot(&self) -> WidgetSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver notified on every re-render.
    pub fn subscribe(&self) -> watch::Receiver<WidgetSnapshot> {
        self.snapshots.clone()
    }

    /// Waits until a snapshot satisfies `predicate` and returns it.
    ///
    /// Returns `None` if the widget stopped first.
    pub async fn wait_for<F>(&self, mut predicate: F) -> Option<WidgetSnapshot>
    where
        F: FnMut(&WidgetSnapshot) -> bool,
    {
        let mut rx = self.snapshots.clone();
        let snapshot = rx.wait_for(|s| predicate(s)).await.ok()?;
        Some(snapshot.clone())
    }

    /// Stops the event loop and waits for it to finish.
    pub async fn shutdown(self) {
        let WidgetHandle { events, task, .. } = self;
        drop(events);
        if let Err(err) = task.await {
            warn!("widget task ended abnormally: {}", err);
        }
    }
}

/// Starts the widget on the current tokio runtime.
///
/// The load-time fetch runs immediately when the form arrived pre-filled.
pub fn spawn_widget<S>(mut controller: BookingController, source: Arc<S>) -> WidgetHandle
where
    S: SlotSource + 'static,
{
    let (events_tx, mut events_rx) = mpsc::channel::<FormEvent>(EVENT_BUFFER);
    let (loaded_tx, mut loaded_rx) = mpsc::unbounded_channel::<Message>();

    let initial = controller.initial_load();
    let (snapshot_tx, snapshot_rx) = watch::channel(WidgetSnapshot::of(&controller));

    let task = tokio::spawn(async move {
        if let Some(ticket) = initial {
            spawn_fetch(source.clone(), ticket, loaded_tx.clone());
        }

        loop {
            let message = tokio::select! {
                event = events_rx.recv() => match event {
                    Some(event) => Message::Form(event),
                    None => break,
                },
                Some(message) = loaded_rx.recv() => message,
            };

            let ticket = match message {
                Message::Form(FormEvent::ProviderChanged(provider)) => {
                    controller.on_provider_change(provider).ticket()
                }
                Message::Form(FormEvent::DateChanged(date)) => {
                    controller.on_date_change(date).ticket()
                }
                Message::Form(FormEvent::Reload) => controller.reload().ticket(),
                Message::Form(FormEvent::SlotClicked(time)) => {
                    if let Err(err) = controller.click(&time) {
                        debug!("click ignored: {}", err);
                    }
                    None
                }
                Message::Form(FormEvent::ButtonClicked(index)) => {
                    if let Err(err) = controller.click_button(index) {
                        debug!("click ignored: {}", err);
                    }
                    None
                }
                Message::Loaded(ticket, outcome) => {
                    controller.complete(&ticket, outcome);
                    None
                }
            };

            if let Some(ticket) = ticket {
                spawn_fetch(source.clone(), ticket, loaded_tx.clone());
            }
            snapshot_tx.send_replace(WidgetSnapshot::of(&controller));
        }

        info!("booking widget stopped");
    });

    WidgetHandle {
        events: events_tx,
        snapshots: snapshot_rx,
        task,
    }
}

fn spawn_fetch<S>(source: Arc<S>, ticket: LoadTicket, tx: mpsc::UnboundedSender<Message>)
where
    S: SlotSource + 'static,
{
    tokio::spawn(async move {
        let outcome = source.fetch_slots(&ticket.provider, &ticket.date).await;
        // The widget may have stopped meanwhile; the outcome is then moot.
        let _ = tx.send(Message::Loaded(ticket, outcome));
    });
}
