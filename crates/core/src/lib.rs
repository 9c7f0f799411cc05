//! # SlotBook Core
//!
//! Domain types for the appointment slot picker: the slots returned by the
//! booking backend, the bound form elements, the explicit picker state and
//! the pure rendering of the slots container.

pub mod errors;
pub mod models;
pub mod state;
pub mod view;
