//! # SlotBook Client
//!
//! Client side of the appointment slot picker. It binds to a booking form,
//! queries the booking backend for the slots of the selected barber and date,
//! and keeps the hidden appointment time input in step with the slot the user
//! clicks.
//!
//! ## Architecture
//!
//! - **Config**: environment configuration (backend URL, timeout, element ids)
//! - **Http**: the [`http::SlotSource`] seam and its HTTP implementation
//! - **Controller**: form binding, request tickets and slot selection
//! - **Runtime**: a single-task event loop driving a controller

/// Configuration module for client settings
pub mod config;
/// Booking form controller
pub mod controller;
/// Slot queries against the booking backend
pub mod http;
/// Event loop running a controller
pub mod runtime;

use std::sync::Arc;

use eyre::Result;
use slotbook_core::models::form::Page;
use tracing::info;

use crate::{
    config::ClientConfig,
    controller::BookingController,
    http::HttpSlotSource,
    runtime::{WidgetHandle, spawn_widget},
};

/// Binds a widget to `page` and starts it against the configured backend.
///
/// Returns `Ok(None)` when the page does not carry the booking form.
pub fn start_widget(config: &ClientConfig, page: &Page) -> Result<Option<WidgetHandle>> {
    let Some(controller) = BookingController::attach(page, &config.element_ids) else {
        return Ok(None);
    };

    let source = Arc::new(HttpSlotSource::from_config(config)?);
    info!("slot picker attached, backend at {}", source.base_url());

    Ok(Some(spawn_widget(controller, source)))
}
